use super::draft::{
    CompletionDraft, CompletionField, CompletionPayload, WorkOrderDraft, WorkOrderField,
    WorkOrderPayload,
};
use crate::shared::date::is_valid_date;
use crate::shared::validation::{is_valid_time, ValidationResult, ValidationRules};

pub const TITLE: ValidationRules = ValidationRules::required().length(3, 100);
pub const DESCRIPTION: ValidationRules = ValidationRules::required().length(10, 1000);
pub const WORK_PERFORMED: ValidationRules = ValidationRules::required().length(10, 2000);
pub const OBSERVATIONS: ValidationRules = ValidationRules::none().max_length(1000);
pub const TIME_SPENT_HOURS: ValidationRules = ValidationRules::required().range(0.0, 24.0);

/// Validate a work order draft
pub fn validate_work_order(draft: &WorkOrderDraft) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.check(
        WorkOrderField::Title.name(),
        TITLE.validate_string(&draft.title, "El título"),
    );
    result.check(
        WorkOrderField::Description.name(),
        DESCRIPTION.validate_string(&draft.description, "La descripción"),
    );

    if draft.installation_id.trim().is_empty() {
        result.add(
            WorkOrderField::InstallationId.name(),
            "Debe seleccionar una instalación",
        );
    }

    if draft.scheduled_date.trim().is_empty() {
        result.add(
            WorkOrderField::ScheduledDate.name(),
            "La fecha programada es obligatoria",
        );
    } else if !is_valid_date(&draft.scheduled_date) {
        result.add(
            WorkOrderField::ScheduledDate.name(),
            "La fecha programada no es válida",
        );
    }

    if !draft.scheduled_time.trim().is_empty() && !is_valid_time(&draft.scheduled_time) {
        result.add(
            WorkOrderField::ScheduledTime.name(),
            "La hora debe tener el formato HH:MM",
        );
    }

    result
}

impl WorkOrderDraft {
    /// Validate and build the request body
    pub fn to_payload(&self) -> Result<WorkOrderPayload, ValidationResult> {
        validate_work_order(self).into_result()?;

        let device_id = self.device_id.trim();
        let time = self.scheduled_time.trim();
        Ok(WorkOrderPayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            installation_id: self.installation_id.trim().to_string(),
            device_id: (!device_id.is_empty()).then(|| device_id.to_string()),
            priority: self.priority,
            work_type: self.work_type,
            scheduled_date: self.scheduled_date.trim().to_string(),
            scheduled_time: (!time.is_empty()).then(|| time.to_string()),
        })
    }
}

/// Validate the completion form
pub fn validate_completion(draft: &CompletionDraft) -> ValidationResult {
    check_completion(draft).0
}

/// Validation result plus the parsed hours, so the hours are read once
fn check_completion(draft: &CompletionDraft) -> (ValidationResult, Option<f64>) {
    let mut result = ValidationResult::new();

    result.check(
        CompletionField::WorkPerformed.name(),
        WORK_PERFORMED.validate_string(&draft.work_performed, "El trabajo realizado"),
    );
    result.check(
        CompletionField::Observations.name(),
        OBSERVATIONS.validate_string(&draft.observations, "Las observaciones"),
    );
    let time_spent = result.check(
        CompletionField::TimeSpent.name(),
        TIME_SPENT_HOURS.validate_numeric_str(&draft.time_spent, "El tiempo de trabajo"),
    );
    if draft.device_state.is_none() {
        result.add(
            CompletionField::DeviceState.name(),
            "Debe indicar el estado del dispositivo",
        );
    }

    (result, time_spent)
}

impl CompletionDraft {
    /// Validate and build the request body
    pub fn to_payload(&self) -> Result<CompletionPayload, ValidationResult> {
        let (result, time_spent) = check_completion(self);

        match (time_spent, self.device_state, result.is_valid) {
            (Some(time_spent), Some(device_state), true) => Ok(CompletionPayload {
                work_performed: self.work_performed.trim().to_string(),
                observations: self.observations.trim().to_string(),
                time_spent,
                device_state,
                materials_used: self.materials_list(),
            }),
            _ => Err(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::DeviceState;

    fn valid_draft() -> WorkOrderDraft {
        WorkOrderDraft {
            title: "Revisión caldera".into(),
            description: "Revisión anual de la caldera principal".into(),
            installation_id: "inst1".into(),
            scheduled_date: "2024-05-01".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_draft_builds_payload() {
        let payload = valid_draft().to_payload().unwrap();
        assert_eq!(payload.title(), "Revisión caldera");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["instalacionId"], "inst1");
        assert_eq!(json["prioridad"], "media");
        assert!(json.get("dispositivoId").is_none());
        assert!(json.get("horaProgramada").is_none());
    }

    #[test]
    fn test_short_title_rejected() {
        let draft = WorkOrderDraft {
            title: "ab".into(),
            ..valid_draft()
        };
        let result = validate_work_order(&draft);
        assert!(!result.is_valid);
        assert!(result.error("titulo").is_some());
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_empty_installation_rejected_without_payload() {
        let draft = WorkOrderDraft {
            installation_id: String::new(),
            ..valid_draft()
        };
        let err = draft.to_payload().unwrap_err();
        assert_eq!(
            err.error("instalacionId"),
            Some("Debe seleccionar una instalación")
        );
    }

    #[test]
    fn test_bad_time_rejected() {
        let draft = WorkOrderDraft {
            scheduled_time: "25:00".into(),
            ..valid_draft()
        };
        assert!(validate_work_order(&draft).error("horaProgramada").is_some());
    }

    #[test]
    fn test_completion_validation() {
        let mut draft = CompletionDraft {
            work_performed: "Cambio de filtro y purga del circuito".into(),
            time_spent: "30".into(),
            ..Default::default()
        };
        let result = validate_completion(&draft);
        assert!(result.error("tiempoTrabajo").is_some());
        assert!(result.error("estadoDispositivo").is_some());

        draft.time_spent = "1.5".into();
        draft.device_state = Some(DeviceState::NeedsFollowUp);
        draft.materials = "filtro".into();
        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.to_details().time_spent, Some(1.5));
        assert_eq!(payload.to_details().materials_used, vec!["filtro"]);
        assert_eq!(payload.to_details().observations, None);

        draft.time_spent = "2,25".into();
        assert_eq!(draft.to_payload().unwrap().to_details().time_spent, Some(2.25));
    }

    #[test]
    fn test_bad_hours_reported_by_payload_builder() {
        let draft = CompletionDraft {
            work_performed: "Cambio de filtro y purga del circuito".into(),
            time_spent: "dos".into(),
            device_state: Some(DeviceState::Operational),
            ..Default::default()
        };
        let err = draft.to_payload().unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(
            err.error("tiempoTrabajo"),
            Some("El tiempo de trabajo debe ser un número")
        );
    }
}
