use super::aggregate::{CompletionDetails, WorkOrder};
use crate::domain::a002_installation::Installation;
use crate::enums::{DeviceState, Priority, WorkType};
use crate::shared::date::{normalize_date, DateInput};
use serde::Serialize;

// ============================================================================
// Work order draft
// ============================================================================

/// Editable fields of a work order form.
///
/// Fields are changed through [`WorkOrderDraft::set_field`] so that only known
/// fields with well-formed values can reach the draft.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkOrderDraft {
    /// `Some` when editing an existing record
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub installation_id: String,
    pub device_id: String,
    pub priority: Priority,
    pub work_type: WorkType,
    /// Always `YYYY-MM-DD` or empty
    pub scheduled_date: String,
    pub scheduled_time: String,
}

/// Field selector for [`WorkOrderDraft::set_field`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkOrderField {
    Title,
    Description,
    InstallationId,
    DeviceId,
    Priority,
    WorkType,
    ScheduledDate,
    ScheduledTime,
}

impl WorkOrderField {
    /// Wire name, also the key of the error map
    pub fn name(&self) -> &'static str {
        match self {
            WorkOrderField::Title => "titulo",
            WorkOrderField::Description => "descripcion",
            WorkOrderField::InstallationId => "instalacionId",
            WorkOrderField::DeviceId => "dispositivoId",
            WorkOrderField::Priority => "prioridad",
            WorkOrderField::WorkType => "tipoTrabajo",
            WorkOrderField::ScheduledDate => "fechaProgramada",
            WorkOrderField::ScheduledTime => "horaProgramada",
        }
    }

    pub fn all() -> [WorkOrderField; 8] {
        [
            WorkOrderField::Title,
            WorkOrderField::Description,
            WorkOrderField::InstallationId,
            WorkOrderField::DeviceId,
            WorkOrderField::Priority,
            WorkOrderField::WorkType,
            WorkOrderField::ScheduledDate,
            WorkOrderField::ScheduledTime,
        ]
    }
}

impl WorkOrderDraft {
    pub fn is_edit_mode(&self) -> bool {
        self.id.is_some()
    }

    /// Set one field from raw input text.
    ///
    /// Changing the installation clears the device, since devices belong to
    /// an installation. Enum fields reject unknown codes.
    pub fn set_field(&mut self, field: WorkOrderField, value: &str) -> Result<(), String> {
        match field {
            WorkOrderField::Title => self.title = value.to_string(),
            WorkOrderField::Description => self.description = value.to_string(),
            WorkOrderField::InstallationId => {
                if self.installation_id != value {
                    self.device_id.clear();
                }
                self.installation_id = value.to_string();
            }
            WorkOrderField::DeviceId => self.device_id = value.to_string(),
            WorkOrderField::Priority => {
                self.priority = Priority::from_code(value)
                    .ok_or_else(|| format!("Prioridad desconocida: {}", value))?;
            }
            WorkOrderField::WorkType => {
                self.work_type = WorkType::from_code(value)
                    .ok_or_else(|| format!("Tipo de trabajo desconocido: {}", value))?;
            }
            WorkOrderField::ScheduledDate => {
                self.scheduled_date = normalize_date(&DateInput::from(value));
            }
            WorkOrderField::ScheduledTime => self.scheduled_time = value.to_string(),
        }
        Ok(())
    }

    /// Current raw value of a field, as a form input shows it
    pub fn field_value(&self, field: WorkOrderField) -> String {
        match field {
            WorkOrderField::Title => self.title.clone(),
            WorkOrderField::Description => self.description.clone(),
            WorkOrderField::InstallationId => self.installation_id.clone(),
            WorkOrderField::DeviceId => self.device_id.clone(),
            WorkOrderField::Priority => self.priority.code().to_string(),
            WorkOrderField::WorkType => self.work_type.code().to_string(),
            WorkOrderField::ScheduledDate => self.scheduled_date.clone(),
            WorkOrderField::ScheduledTime => self.scheduled_time.clone(),
        }
    }

    /// Build an edit draft from a server record.
    ///
    /// The installation id is reconciled against the loaded installations:
    /// a direct id match wins, then a match on the record's denormalized
    /// company name, otherwise the field stays empty. The scheduled date is
    /// normalized to `YYYY-MM-DD`.
    pub fn from_record(record: &WorkOrder, installations: &[Installation]) -> Self {
        let installation_id = resolve_installation_id(record, installations);
        let device_id = record
            .device_id
            .as_ref()
            .map(|d| d.as_id().to_string())
            .filter(|_| !installation_id.is_empty())
            .unwrap_or_default();

        Self {
            id: Some(record.id.clone()),
            title: record.title.clone(),
            description: record.description.clone(),
            installation_id,
            device_id,
            priority: record.priority,
            work_type: record.work_type,
            scheduled_date: record
                .scheduled_date
                .as_deref()
                .map(|d| normalize_date(&DateInput::from(d)))
                .unwrap_or_default(),
            scheduled_time: record.scheduled_time.clone().unwrap_or_default(),
        }
    }
}

/// Resolve a record's installation against the loaded installation list
pub fn resolve_installation_id(record: &WorkOrder, installations: &[Installation]) -> String {
    let raw_id = record.installation_id_str();
    if !raw_id.is_empty() {
        if let Some(found) = installations.iter().find(|i| i.id == raw_id) {
            return found.id.clone();
        }
    }

    if let Some(company) = record.installation_company() {
        let company = company.trim();
        if let Some(found) = installations.iter().find(|i| i.company.trim() == company) {
            return found.id.clone();
        }
    }

    String::new()
}

/// Request body for create/replace. Only obtainable from a validated draft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkOrderPayload {
    #[serde(rename = "titulo")]
    pub(crate) title: String,
    #[serde(rename = "descripcion")]
    pub(crate) description: String,
    #[serde(rename = "instalacionId")]
    pub(crate) installation_id: String,
    #[serde(rename = "dispositivoId", skip_serializing_if = "Option::is_none")]
    pub(crate) device_id: Option<String>,
    #[serde(rename = "prioridad")]
    pub(crate) priority: Priority,
    #[serde(rename = "tipoTrabajo")]
    pub(crate) work_type: WorkType,
    #[serde(rename = "fechaProgramada")]
    pub(crate) scheduled_date: String,
    #[serde(rename = "horaProgramada", skip_serializing_if = "Option::is_none")]
    pub(crate) scheduled_time: Option<String>,
}

impl WorkOrderPayload {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn installation_id(&self) -> &str {
        &self.installation_id
    }
}

/// Body of `PATCH /:id/asignar`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignTechnicianPayload {
    #[serde(rename = "tecnicoId")]
    pub technician_id: String,
}

// ============================================================================
// Completion draft
// ============================================================================

/// Form state of the "complete work order" modal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionDraft {
    pub work_performed: String,
    pub observations: String,
    /// Raw input, parsed on validation
    pub time_spent: String,
    pub device_state: Option<DeviceState>,
    /// Comma or newline separated
    pub materials: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionField {
    WorkPerformed,
    Observations,
    TimeSpent,
    DeviceState,
    Materials,
}

impl CompletionField {
    pub fn name(&self) -> &'static str {
        match self {
            CompletionField::WorkPerformed => "trabajoRealizado",
            CompletionField::Observations => "observaciones",
            CompletionField::TimeSpent => "tiempoTrabajo",
            CompletionField::DeviceState => "estadoDispositivo",
            CompletionField::Materials => "materialesUtilizados",
        }
    }

    pub fn all() -> [CompletionField; 5] {
        [
            CompletionField::WorkPerformed,
            CompletionField::Observations,
            CompletionField::TimeSpent,
            CompletionField::DeviceState,
            CompletionField::Materials,
        ]
    }
}

impl CompletionDraft {
    pub fn set_field(&mut self, field: CompletionField, value: &str) -> Result<(), String> {
        match field {
            CompletionField::WorkPerformed => self.work_performed = value.to_string(),
            CompletionField::Observations => self.observations = value.to_string(),
            CompletionField::TimeSpent => self.time_spent = value.to_string(),
            CompletionField::DeviceState => {
                self.device_state = if value.is_empty() {
                    None
                } else {
                    Some(
                        DeviceState::from_code(value)
                            .ok_or_else(|| format!("Estado de dispositivo desconocido: {}", value))?,
                    )
                };
            }
            CompletionField::Materials => self.materials = value.to_string(),
        }
        Ok(())
    }

    pub fn materials_list(&self) -> Vec<String> {
        self.materials
            .split([',', '\n'])
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Body of `POST /:id/completar`. Only obtainable from a validated draft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionPayload {
    #[serde(rename = "trabajoRealizado")]
    pub(crate) work_performed: String,
    #[serde(rename = "observaciones")]
    pub(crate) observations: String,
    #[serde(rename = "tiempoTrabajo")]
    pub(crate) time_spent: f64,
    #[serde(rename = "estadoDispositivo")]
    pub(crate) device_state: DeviceState,
    #[serde(rename = "materialesUtilizados")]
    pub(crate) materials_used: Vec<String>,
}

impl CompletionPayload {
    /// Completion fields as they are merged into the local record
    pub fn to_details(&self) -> CompletionDetails {
        CompletionDetails {
            completed_at: None,
            work_performed: Some(self.work_performed.clone()),
            observations: if self.observations.is_empty() {
                None
            } else {
                Some(self.observations.clone())
            },
            time_spent: Some(self.time_spent),
            device_state_after: Some(self.device_state),
            materials_used: self.materials_used.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installation(id: &str, company: &str) -> Installation {
        Installation {
            id: id.into(),
            company: company.into(),
            address: String::new(),
            city: String::new(),
            devices: vec![],
        }
    }

    fn record(json: &str) -> WorkOrder {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_reconcile_by_direct_id() {
        let wo = record(r#"{"_id":"w","titulo":"t","instalacionId":"A"}"#);
        let draft = WorkOrderDraft::from_record(&wo, &[installation("A", "X")]);
        assert_eq!(draft.installation_id, "A");
    }

    #[test]
    fn test_reconcile_by_oid() {
        let wo = record(r#"{"_id":"w","titulo":"t","instalacionId":{"$oid":"A"}}"#);
        let draft = WorkOrderDraft::from_record(&wo, &[installation("A", "X")]);
        assert_eq!(draft.installation_id, "A");
    }

    #[test]
    fn test_reconcile_by_company_name_fallback() {
        let wo = record(r#"{"_id":"w","titulo":"t","instalacion":{"company":"X"}}"#);
        let draft = WorkOrderDraft::from_record(&wo, &[installation("B", "X")]);
        assert_eq!(draft.installation_id, "B");
    }

    #[test]
    fn test_reconcile_unknown_id_falls_back_to_company() {
        let wo = record(
            r#"{"_id":"w","titulo":"t","instalacionId":"gone","instalacion":{"company":"X"}}"#,
        );
        let list = [installation("A", "Y"), installation("B", "X")];
        assert_eq!(resolve_installation_id(&wo, &list), "B");
    }

    #[test]
    fn test_reconcile_defaults_to_empty() {
        let wo = record(r#"{"_id":"w","titulo":"t","instalacionId":"gone"}"#);
        let draft = WorkOrderDraft::from_record(&wo, &[installation("A", "X")]);
        assert_eq!(draft.installation_id, "");
        assert_eq!(draft.device_id, "");
    }

    #[test]
    fn test_record_dates_normalized() {
        for date in ["2024-05-01T10:00:00Z", "2024-05-01", "2024-05-01T10:00:00.000Z"] {
            let wo = record(&format!(
                r#"{{"_id":"w","titulo":"t","fechaProgramada":"{}"}}"#,
                date
            ));
            let draft = WorkOrderDraft::from_record(&wo, &[]);
            assert_eq!(draft.scheduled_date, "2024-05-01");
        }
    }

    #[test]
    fn test_set_field_rejects_unknown_codes() {
        let mut draft = WorkOrderDraft::default();
        assert!(draft.set_field(WorkOrderField::Priority, "alta").is_ok());
        assert_eq!(draft.priority, Priority::High);
        assert!(draft.set_field(WorkOrderField::Priority, "urgente").is_err());
        assert_eq!(draft.priority, Priority::High);
    }

    #[test]
    fn test_changing_installation_clears_device() {
        let mut draft = WorkOrderDraft::default();
        draft.set_field(WorkOrderField::InstallationId, "A").unwrap();
        draft.set_field(WorkOrderField::DeviceId, "d1").unwrap();
        draft.set_field(WorkOrderField::InstallationId, "A").unwrap();
        assert_eq!(draft.device_id, "d1");
        draft.set_field(WorkOrderField::InstallationId, "B").unwrap();
        assert_eq!(draft.device_id, "");
    }

    #[test]
    fn test_materials_list() {
        let draft = CompletionDraft {
            materials: "filtro, junta\n tornillos ,,".into(),
            ..Default::default()
        };
        assert_eq!(draft.materials_list(), vec!["filtro", "junta", "tornillos"]);
    }
}
