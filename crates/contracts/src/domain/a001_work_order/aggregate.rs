use crate::domain::a002_installation::InstallationSnapshot;
use crate::domain::common::{AggregateRoot, EntityMetadata, ObjectRef};
use crate::enums::{DeviceState, Priority, WorkOrderStatus, WorkType};
use crate::shared::date::{lenient_number, lenient_timestamp};
use crate::system::users::Technician;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Maintenance work order as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "titulo", default)]
    pub title: String,

    #[serde(rename = "descripcion", default)]
    pub description: String,

    /// Foreign key, in whatever shape the endpoint produced
    #[serde(rename = "instalacionId", default, skip_serializing_if = "Option::is_none")]
    pub installation_id: Option<ObjectRef>,

    /// Denormalized installation copy
    #[serde(rename = "instalacion", default, skip_serializing_if = "Option::is_none")]
    pub installation: Option<InstallationSnapshot>,

    #[serde(rename = "dispositivoId", default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<ObjectRef>,

    #[serde(rename = "estado", default)]
    pub status: WorkOrderStatus,

    #[serde(rename = "prioridad", default)]
    pub priority: Priority,

    #[serde(rename = "tipoTrabajo", default)]
    pub work_type: WorkType,

    /// Date as sent by the server (ISO date-time or date-only)
    #[serde(rename = "fechaProgramada", default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,

    #[serde(rename = "horaProgramada", default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,

    #[serde(rename = "tecnicoAsignado", default, skip_serializing_if = "Option::is_none")]
    pub assigned_technician: Option<TechnicianRef>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,

    #[serde(
        rename = "fechaInicio",
        default,
        deserialize_with = "lenient_timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub completion: CompletionDetails,

    #[serde(rename = "historial", default)]
    pub history: Vec<HistoryEntry>,
}

/// Assigned technician: populated document or bare reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TechnicianRef {
    Populated(Technician),
    Ref(ObjectRef),
}

impl TechnicianRef {
    pub fn id(&self) -> &str {
        match self {
            TechnicianRef::Populated(t) => &t.id,
            TechnicianRef::Ref(r) => r.as_id(),
        }
    }

    /// Username when populated
    pub fn username(&self) -> Option<&str> {
        match self {
            TechnicianRef::Populated(t) => Some(&t.username),
            TechnicianRef::Ref(_) => None,
        }
    }
}

/// Fields filled in when the work order is completed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionDetails {
    #[serde(
        rename = "fechaCompletado",
        default,
        deserialize_with = "lenient_timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(rename = "trabajoRealizado", default, skip_serializing_if = "Option::is_none")]
    pub work_performed: Option<String>,

    #[serde(rename = "observaciones", default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,

    /// Hours
    #[serde(
        rename = "tiempoTrabajo",
        default,
        deserialize_with = "lenient_number::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_spent: Option<f64>,

    #[serde(rename = "estadoDispositivo", default, skip_serializing_if = "Option::is_none")]
    pub device_state_after: Option<DeviceState>,

    #[serde(rename = "materialesUtilizados", default, skip_serializing_if = "Vec::is_empty")]
    pub materials_used: Vec<String>,
}

/// Append-only history record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "accion", default)]
    pub action: String,
    #[serde(
        rename = "fecha",
        default,
        deserialize_with = "lenient_timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "usuario", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(rename = "nota", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body returned by `POST /:id/completar`. Every field is optional: the
/// server may answer with the full document, a partial one or `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(rename = "estado", default)]
    pub status: Option<WorkOrderStatus>,
    #[serde(flatten)]
    pub completion: CompletionDetails,
    #[serde(rename = "historial", default)]
    pub history: Option<Vec<HistoryEntry>>,
}

/// Body returned by lifecycle PATCH endpoints that do not echo the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(rename = "estado", default)]
    pub status: Option<WorkOrderStatus>,
    #[serde(
        rename = "fechaInicio",
        default,
        deserialize_with = "lenient_timestamp::deserialize"
    )]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "historial", default)]
    pub history: Option<Vec<HistoryEntry>>,
}

impl WorkOrder {
    /// Installation id as a plain string, empty when absent
    pub fn installation_id_str(&self) -> &str {
        self.installation_id
            .as_ref()
            .map(ObjectRef::as_id)
            .unwrap_or("")
    }

    /// Company name from the denormalized snapshot
    pub fn installation_company(&self) -> Option<&str> {
        self.installation
            .as_ref()
            .and_then(|i| i.company.as_deref())
            .filter(|c| !c.trim().is_empty())
    }

    pub fn technician_name(&self) -> Option<&str> {
        self.assigned_technician
            .as_ref()
            .and_then(TechnicianRef::username)
    }

    /// Local patch after a successful start call
    pub fn apply_start(&mut self, started_at: DateTime<Utc>, response: StatusResponse) {
        self.status = WorkOrderStatus::InProgress;
        self.started_at = Some(response.started_at.unwrap_or(started_at));
        if let Some(history) = response.history {
            self.history = history;
        }
    }

    /// Local patch after a successful completion call.
    ///
    /// Submitted data is merged first, fields present in the response are
    /// laid over it, and the status ends up `completada` whether or not the
    /// response carried one.
    pub fn apply_completion(
        &mut self,
        submitted: &CompletionDetails,
        response: CompletionResponse,
        completed_at: DateTime<Utc>,
    ) {
        let mut merged = submitted.clone();
        let server = response.completion;
        if server.work_performed.is_some() {
            merged.work_performed = server.work_performed;
        }
        if server.observations.is_some() {
            merged.observations = server.observations;
        }
        if server.time_spent.is_some() {
            merged.time_spent = server.time_spent;
        }
        if server.device_state_after.is_some() {
            merged.device_state_after = server.device_state_after;
        }
        if !server.materials_used.is_empty() {
            merged.materials_used = server.materials_used;
        }
        merged.completed_at = server.completed_at.or(Some(completed_at));

        self.completion = merged;
        self.status = WorkOrderStatus::Completed;
        if let Some(history) = response.history {
            self.history = history;
        }
    }

    /// Local patch after a successful cancel call
    pub fn apply_cancel(&mut self, response: StatusResponse) {
        self.status = WorkOrderStatus::Cancelled;
        if let Some(history) = response.history {
            self.history = history;
        }
    }
}

impl AggregateRoot for WorkOrder {
    fn id(&self) -> &str {
        &self.id
    }

    fn collection_name() -> &'static str {
        "ordenes-trabajo"
    }

    fn element_name() -> &'static str {
        "Orden de trabajo"
    }

    fn list_name() -> &'static str {
        "Órdenes de trabajo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> WorkOrder {
        serde_json::from_str(
            r#"{
                "_id": "wo1",
                "titulo": "Revisión caldera",
                "descripcion": "Revisión anual de la caldera principal",
                "instalacionId": {"$oid": "inst1"},
                "instalacion": {"company": "Acme", "city": "Lima"},
                "estado": "en_progreso",
                "prioridad": "alta",
                "tipoTrabajo": "preventivo",
                "fechaProgramada": "2024-05-01T10:00:00.000Z",
                "tecnicoAsignado": {"_id": "t1", "username": "jperez", "role": "tecnico"},
                "createdAt": "2024-04-20T08:00:00Z",
                "historial": [{"accion": "creada", "fecha": "2024-04-20T08:00:00Z"}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_server_record() {
        let wo = sample();
        assert_eq!(wo.installation_id_str(), "inst1");
        assert_eq!(wo.installation_company(), Some("Acme"));
        assert_eq!(wo.status, WorkOrderStatus::InProgress);
        assert_eq!(wo.priority, Priority::High);
        assert_eq!(wo.technician_name(), Some("jperez"));
        assert!(wo.metadata.created_at.is_some());
        assert_eq!(wo.history.len(), 1);
    }

    #[test]
    fn test_loose_server_shapes_still_parse() {
        let wo: WorkOrder = serde_json::from_str(
            r#"{
                "_id": "wo3",
                "estado": "completada",
                "createdAt": "2024-04-20T08:00:00",
                "tiempoTrabajo": "1.5",
                "historial": [{"accion": "creada", "fecha": "2024-04-20"}]
            }"#,
        )
        .unwrap();
        assert_eq!(wo.title, "");
        assert_eq!(
            wo.metadata.created_at,
            Some(Utc.with_ymd_and_hms(2024, 4, 20, 8, 0, 0).unwrap())
        );
        assert_eq!(wo.completion.time_spent, Some(1.5));
        assert!(wo.history[0].timestamp.is_some());
    }

    #[test]
    fn test_technician_as_bare_id() {
        let wo: WorkOrder =
            serde_json::from_str(r#"{"_id":"wo2","titulo":"x","tecnicoAsignado":"t9"}"#).unwrap();
        let tech = wo.assigned_technician.unwrap();
        assert_eq!(tech.id(), "t9");
        assert_eq!(tech.username(), None);
    }

    #[test]
    fn test_completion_forces_status_when_response_omits_it() {
        let mut wo = sample();
        let submitted = CompletionDetails {
            work_performed: Some("Cambio de filtro y purga".into()),
            time_spent: Some(1.5),
            device_state_after: Some(DeviceState::Operational),
            ..Default::default()
        };
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        wo.apply_completion(&submitted, CompletionResponse::default(), at);

        assert_eq!(wo.status, WorkOrderStatus::Completed);
        assert_eq!(wo.completion.time_spent, Some(1.5));
        assert_eq!(wo.completion.completed_at, Some(at));
    }

    #[test]
    fn test_completion_response_overrides_submitted_fields() {
        let mut wo = sample();
        let submitted = CompletionDetails {
            work_performed: Some("borrador".into()),
            observations: Some("sin novedad".into()),
            ..Default::default()
        };
        let response: CompletionResponse = serde_json::from_str(
            r#"{"trabajoRealizado":"Texto normalizado por el servidor","estado":"completada"}"#,
        )
        .unwrap();

        wo.apply_completion(&submitted, response, Utc::now());

        assert_eq!(
            wo.completion.work_performed.as_deref(),
            Some("Texto normalizado por el servidor")
        );
        assert_eq!(wo.completion.observations.as_deref(), Some("sin novedad"));
        // history untouched when the response has none
        assert_eq!(wo.history.len(), 1);
    }

    #[test]
    fn test_start_sets_status_and_timestamp() {
        let mut wo = sample();
        wo.status = WorkOrderStatus::Assigned;
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

        wo.apply_start(at, StatusResponse::default());

        assert_eq!(wo.status, WorkOrderStatus::InProgress);
        assert_eq!(wo.started_at, Some(at));
    }
}
