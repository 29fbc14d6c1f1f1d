use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "superadmin")]
    SuperAdmin,
    #[serde(rename = "admin")]
    Admin,
    #[default]
    #[serde(rename = "tecnico")]
    Technician,
    #[serde(rename = "cliente")]
    Client,
}

impl Role {
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Superadministrador",
            Role::Admin => "Administrador",
            Role::Technician => "Técnico",
            Role::Client => "Cliente",
        }
    }

    /// May manage tenants
    pub fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// May create, edit and assign work orders
    pub fn can_manage_work_orders(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }
}

/// Technician as listed for assignment dropdowns (read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technician {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub role: Role,
}
