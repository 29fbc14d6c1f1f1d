pub mod aggregate;
pub mod validation;

pub use aggregate::{Tenant, TenantDraft, TenantField, TenantPayload};
pub use validation::validate_tenant;
