use serde::{Deserialize, Serialize};

/// Device condition reported when a work order is completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceState {
    #[serde(rename = "operativo")]
    Operational,
    #[serde(rename = "requiere_seguimiento")]
    NeedsFollowUp,
    #[serde(rename = "fuera_de_servicio")]
    OutOfService,
}

impl DeviceState {
    pub fn code(&self) -> &'static str {
        match self {
            DeviceState::Operational => "operativo",
            DeviceState::NeedsFollowUp => "requiere_seguimiento",
            DeviceState::OutOfService => "fuera_de_servicio",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeviceState::Operational => "Operativo",
            DeviceState::NeedsFollowUp => "Requiere seguimiento",
            DeviceState::OutOfService => "Fuera de servicio",
        }
    }

    pub fn all() -> Vec<DeviceState> {
        vec![
            DeviceState::Operational,
            DeviceState::NeedsFollowUp,
            DeviceState::OutOfService,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }
}
