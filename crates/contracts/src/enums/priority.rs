use serde::{Deserialize, Serialize};

/// Work order priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "baja")]
    Low,
    #[default]
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "critica")]
    Critical,
}

impl Priority {
    pub fn code(&self) -> &'static str {
        match self {
            Priority::Low => "baja",
            Priority::Medium => "media",
            Priority::High => "alta",
            Priority::Critical => "critica",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::Low => "Baja",
            Priority::Medium => "Media",
            Priority::High => "Alta",
            Priority::Critical => "Crítica",
        }
    }

    pub fn all() -> Vec<Priority> {
        vec![Priority::Low, Priority::Medium, Priority::High, Priority::Critical]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "baja" => Some(Priority::Low),
            "media" => Some(Priority::Medium),
            "alta" => Some(Priority::High),
            "critica" => Some(Priority::Critical),
            _ => None,
        }
    }
}
