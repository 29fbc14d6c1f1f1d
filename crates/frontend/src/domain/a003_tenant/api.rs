use crate::shared::api_utils::{get_records, request_empty, request_json, ApiContext, Verb};
use crate::shared::cancel::CancelToken;
use contracts::domain::a003_tenant::{Tenant, TenantPayload};
use contracts::domain::common::AggregateRoot;

/// `GET tenants`
pub async fn fetch_tenants(ctx: &ApiContext, cancel: &CancelToken) -> Result<Vec<Tenant>, String> {
    get_records(ctx, Tenant::collection_name(), cancel).await
}

/// `POST tenants` (creates the tenant and its admin account)
pub async fn create_tenant(
    ctx: &ApiContext,
    payload: &TenantPayload,
    cancel: &CancelToken,
) -> Result<Tenant, String> {
    request_json(ctx, Verb::Post, Tenant::collection_name(), Some(payload), cancel).await
}

pub async fn update_tenant(
    ctx: &ApiContext,
    id: &str,
    payload: &TenantPayload,
    cancel: &CancelToken,
) -> Result<Tenant, String> {
    request_json(ctx, Verb::Put, &Tenant::item_path(id), Some(payload), cancel).await
}

pub async fn delete_tenant(ctx: &ApiContext, id: &str, cancel: &CancelToken) -> Result<(), String> {
    request_empty::<()>(ctx, Verb::Delete, &Tenant::item_path(id), None, cancel).await
}
