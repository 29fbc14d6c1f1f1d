pub mod aggregate;
pub mod draft;
pub mod validation;

pub use aggregate::{
    CompletionDetails, CompletionResponse, HistoryEntry, StatusResponse, TechnicianRef, WorkOrder,
};
pub use draft::{
    resolve_installation_id, AssignTechnicianPayload, CompletionDraft, CompletionField,
    CompletionPayload, WorkOrderDraft, WorkOrderField, WorkOrderPayload,
};
pub use validation::{validate_completion, validate_work_order};
