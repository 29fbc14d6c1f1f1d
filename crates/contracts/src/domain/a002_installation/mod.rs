pub mod aggregate;

pub use aggregate::{Device, Installation, InstallationSnapshot};
