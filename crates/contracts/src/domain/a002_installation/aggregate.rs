use crate::domain::common::AggregateRoot;
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Customer installation with its embedded device list (read-only here)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installation {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl Installation {
    /// Label for dropdowns: `Company (City)`
    pub fn label(&self) -> String {
        if self.city.trim().is_empty() {
            self.company.clone()
        } else {
            format!("{} ({})", self.company, self.city)
        }
    }

    pub fn device(&self, device_id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == device_id)
    }
}

impl AggregateRoot for Installation {
    fn id(&self) -> &str {
        &self.id
    }

    fn collection_name() -> &'static str {
        "instalaciones"
    }

    fn element_name() -> &'static str {
        "Instalación"
    }

    fn list_name() -> &'static str {
        "Instalaciones"
    }
}

/// Device embedded in an installation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "tipo", default)]
    pub kind: String,
    #[serde(rename = "marca", default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(rename = "modelo", default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(rename = "numeroSerie", default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
}

impl Device {
    pub fn label(&self) -> String {
        match &self.serial_number {
            Some(serial) if !serial.is_empty() => format!("{} · {}", self.name, serial),
            _ => self.name.clone(),
        }
    }
}

/// Denormalized installation copy stored inside a work order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallationSnapshot {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl From<&Installation> for InstallationSnapshot {
    fn from(i: &Installation) -> Self {
        Self {
            id: Some(i.id.clone()),
            company: Some(i.company.clone()),
            address: Some(i.address.clone()),
            city: Some(i.city.clone()),
        }
    }
}
