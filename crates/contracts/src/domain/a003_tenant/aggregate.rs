use crate::domain::common::{AggregateRoot, EntityMetadata};
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Tenant (customer organisation sharing the console)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

fn default_active() -> bool {
    true
}

impl AggregateRoot for Tenant {
    fn id(&self) -> &str {
        &self.id
    }

    fn collection_name() -> &'static str {
        "tenants"
    }

    fn element_name() -> &'static str {
        "Cliente"
    }

    fn list_name() -> &'static str {
        "Clientes"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Tenant form. The admin account fields are only used on create.
#[derive(Debug, Clone, PartialEq)]
pub struct TenantDraft {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub active: bool,
    pub admin_username: String,
    pub admin_password: String,
    pub confirm_password: String,
}

impl Default for TenantDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            active: true,
            admin_username: String::new(),
            admin_password: String::new(),
            confirm_password: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenantField {
    Name,
    Email,
    Phone,
    Active,
    AdminUsername,
    AdminPassword,
    ConfirmPassword,
}

impl TenantField {
    pub fn name(&self) -> &'static str {
        match self {
            TenantField::Name => "nombre",
            TenantField::Email => "email",
            TenantField::Phone => "telefono",
            TenantField::Active => "activo",
            TenantField::AdminUsername => "adminUsername",
            TenantField::AdminPassword => "adminPassword",
            TenantField::ConfirmPassword => "confirmPassword",
        }
    }

    pub fn all() -> [TenantField; 7] {
        [
            TenantField::Name,
            TenantField::Email,
            TenantField::Phone,
            TenantField::Active,
            TenantField::AdminUsername,
            TenantField::AdminPassword,
            TenantField::ConfirmPassword,
        ]
    }
}

impl TenantDraft {
    pub fn is_edit_mode(&self) -> bool {
        self.id.is_some()
    }

    pub fn set_field(&mut self, field: TenantField, value: &str) -> Result<(), String> {
        match field {
            TenantField::Name => self.name = value.to_string(),
            TenantField::Email => self.email = value.to_string(),
            TenantField::Phone => self.phone = value.to_string(),
            TenantField::Active => {
                self.active = match value {
                    "true" | "on" | "1" => true,
                    "false" | "off" | "0" | "" => false,
                    other => return Err(format!("Valor no válido: {}", other)),
                }
            }
            TenantField::AdminUsername => self.admin_username = value.to_string(),
            TenantField::AdminPassword => self.admin_password = value.to_string(),
            TenantField::ConfirmPassword => self.confirm_password = value.to_string(),
        }
        Ok(())
    }

    pub fn from_record(record: &Tenant) -> Self {
        Self {
            id: Some(record.id.clone()),
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone().unwrap_or_default(),
            active: record.active,
            ..Default::default()
        }
    }
}

/// Request body for create/replace. Only obtainable from a validated draft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenantPayload {
    #[serde(rename = "nombre")]
    pub(crate) name: String,
    pub(crate) email: String,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub(crate) phone: Option<String>,
    #[serde(rename = "activo")]
    pub(crate) active: bool,
    #[serde(rename = "adminUsername", skip_serializing_if = "Option::is_none")]
    pub(crate) admin_username: Option<String>,
    #[serde(rename = "adminPassword", skip_serializing_if = "Option::is_none")]
    pub(crate) admin_password: Option<String>,
}
