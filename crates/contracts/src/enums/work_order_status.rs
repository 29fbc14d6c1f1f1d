use serde::{Deserialize, Serialize};

/// Work order lifecycle state.
///
/// The ordering pendiente → asignada → en_progreso → completada (with
/// cancelada reachable from any non-terminal state) is enforced by the
/// backend. The `can_*` gates below only decide which UI actions are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorkOrderStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "asignada")]
    Assigned,
    #[serde(rename = "en_progreso")]
    InProgress,
    #[serde(rename = "completada")]
    Completed,
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl WorkOrderStatus {
    /// Wire code
    pub fn code(&self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "pendiente",
            WorkOrderStatus::Assigned => "asignada",
            WorkOrderStatus::InProgress => "en_progreso",
            WorkOrderStatus::Completed => "completada",
            WorkOrderStatus::Cancelled => "cancelada",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "Pendiente",
            WorkOrderStatus::Assigned => "Asignada",
            WorkOrderStatus::InProgress => "En progreso",
            WorkOrderStatus::Completed => "Completada",
            WorkOrderStatus::Cancelled => "Cancelada",
        }
    }

    /// Badge variant used by the list page
    pub fn badge_variant(&self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "warning",
            WorkOrderStatus::Assigned => "primary",
            WorkOrderStatus::InProgress => "primary",
            WorkOrderStatus::Completed => "success",
            WorkOrderStatus::Cancelled => "error",
        }
    }

    pub fn all() -> Vec<WorkOrderStatus> {
        vec![
            WorkOrderStatus::Pending,
            WorkOrderStatus::Assigned,
            WorkOrderStatus::InProgress,
            WorkOrderStatus::Completed,
            WorkOrderStatus::Cancelled,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pendiente" => Some(WorkOrderStatus::Pending),
            "asignada" => Some(WorkOrderStatus::Assigned),
            "en_progreso" => Some(WorkOrderStatus::InProgress),
            "completada" => Some(WorkOrderStatus::Completed),
            "cancelada" => Some(WorkOrderStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkOrderStatus::Completed | WorkOrderStatus::Cancelled)
    }

    pub fn can_edit(&self) -> bool {
        matches!(self, WorkOrderStatus::Pending | WorkOrderStatus::Assigned)
    }

    pub fn can_assign(&self) -> bool {
        matches!(self, WorkOrderStatus::Pending)
    }

    pub fn can_start(&self) -> bool {
        matches!(self, WorkOrderStatus::Assigned)
    }

    pub fn can_complete(&self) -> bool {
        matches!(self, WorkOrderStatus::InProgress)
    }

    pub fn can_cancel(&self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_gates() {
        use WorkOrderStatus::*;

        let editable: Vec<_> = WorkOrderStatus::all().into_iter().filter(|s| s.can_edit()).collect();
        assert_eq!(editable, vec![Pending, Assigned]);

        assert!(Pending.can_assign());
        assert!(!Assigned.can_assign());
        assert!(Assigned.can_start());
        assert!(!InProgress.can_start());
        assert!(InProgress.can_complete());
        assert!(!Assigned.can_complete());

        assert!(InProgress.can_cancel());
        assert!(!Completed.can_cancel());
        assert!(!Cancelled.can_cancel());
    }

    #[test]
    fn test_wire_codes() {
        for status in WorkOrderStatus::all() {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.code()));
            assert_eq!(WorkOrderStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(WorkOrderStatus::from_code("archivada"), None);
    }
}
