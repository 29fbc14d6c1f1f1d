//! Work order service functions: one function per endpoint.

use crate::shared::api_utils::{
    get_records, request_empty, request_json, request_json_or_default, ApiContext, Verb,
};
use crate::shared::cancel::CancelToken;
use contracts::domain::a001_work_order::{
    AssignTechnicianPayload, CompletionPayload, CompletionResponse, StatusResponse, WorkOrder,
    WorkOrderPayload,
};
use contracts::domain::common::AggregateRoot;

fn action_path(id: &str, action: &str) -> String {
    format!("{}/{}", WorkOrder::item_path(id), action)
}

/// `GET ordenes-trabajo`
pub async fn fetch_work_orders(
    ctx: &ApiContext,
    cancel: &CancelToken,
) -> Result<Vec<WorkOrder>, String> {
    get_records(ctx, WorkOrder::collection_name(), cancel).await
}

/// `POST ordenes-trabajo`
pub async fn create_work_order(
    ctx: &ApiContext,
    payload: &WorkOrderPayload,
    cancel: &CancelToken,
) -> Result<WorkOrder, String> {
    request_json(ctx, Verb::Post, WorkOrder::collection_name(), Some(payload), cancel).await
}

/// `PUT ordenes-trabajo/:id`
pub async fn update_work_order(
    ctx: &ApiContext,
    id: &str,
    payload: &WorkOrderPayload,
    cancel: &CancelToken,
) -> Result<WorkOrder, String> {
    request_json(ctx, Verb::Put, &WorkOrder::item_path(id), Some(payload), cancel).await
}

/// `DELETE ordenes-trabajo/:id`
pub async fn delete_work_order(
    ctx: &ApiContext,
    id: &str,
    cancel: &CancelToken,
) -> Result<(), String> {
    request_empty::<()>(ctx, Verb::Delete, &WorkOrder::item_path(id), None, cancel).await
}

/// `PATCH ordenes-trabajo/:id/asignar`: answers with the populated work order
pub async fn assign_technician(
    ctx: &ApiContext,
    id: &str,
    payload: &AssignTechnicianPayload,
    cancel: &CancelToken,
) -> Result<WorkOrder, String> {
    request_json(ctx, Verb::Patch, &action_path(id, "asignar"), Some(payload), cancel).await
}

/// `PATCH ordenes-trabajo/:id/iniciar`
pub async fn start_work_order(
    ctx: &ApiContext,
    id: &str,
    cancel: &CancelToken,
) -> Result<StatusResponse, String> {
    request_json_or_default::<(), _>(ctx, Verb::Patch, &action_path(id, "iniciar"), None, cancel)
        .await
}

/// `POST ordenes-trabajo/:id/completar`
pub async fn complete_work_order(
    ctx: &ApiContext,
    id: &str,
    payload: &CompletionPayload,
    cancel: &CancelToken,
) -> Result<CompletionResponse, String> {
    request_json_or_default(
        ctx,
        Verb::Post,
        &action_path(id, "completar"),
        Some(payload),
        cancel,
    )
    .await
}

/// `PATCH ordenes-trabajo/:id/cancelar`
pub async fn cancel_work_order(
    ctx: &ApiContext,
    id: &str,
    cancel: &CancelToken,
) -> Result<StatusResponse, String> {
    request_json_or_default::<(), _>(ctx, Verb::Patch, &action_path(id, "cancelar"), None, cancel)
        .await
}
