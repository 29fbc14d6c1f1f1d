use serde::{Deserialize, Serialize};

/// Kind of maintenance work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorkType {
    #[default]
    #[serde(rename = "preventivo")]
    Preventive,
    #[serde(rename = "correctivo")]
    Corrective,
    #[serde(rename = "instalacion")]
    Installation,
    #[serde(rename = "inspeccion")]
    Inspection,
    #[serde(rename = "otro")]
    Other,
}

impl WorkType {
    pub fn code(&self) -> &'static str {
        match self {
            WorkType::Preventive => "preventivo",
            WorkType::Corrective => "correctivo",
            WorkType::Installation => "instalacion",
            WorkType::Inspection => "inspeccion",
            WorkType::Other => "otro",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkType::Preventive => "Mantenimiento preventivo",
            WorkType::Corrective => "Mantenimiento correctivo",
            WorkType::Installation => "Instalación",
            WorkType::Inspection => "Inspección",
            WorkType::Other => "Otro",
        }
    }

    pub fn all() -> Vec<WorkType> {
        vec![
            WorkType::Preventive,
            WorkType::Corrective,
            WorkType::Installation,
            WorkType::Inspection,
            WorkType::Other,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.code() == code)
    }
}
