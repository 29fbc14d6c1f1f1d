pub mod api;
pub mod store;
pub mod ui;

pub use store::TenantStore;
