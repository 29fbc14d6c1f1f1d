use crate::shared::api_utils::{get_records, ApiContext};
use crate::shared::cancel::CancelToken;
use contracts::domain::a002_installation::Installation;
use contracts::domain::common::AggregateRoot;

/// `GET instalaciones` (with embedded devices)
pub async fn fetch_installations(
    ctx: &ApiContext,
    cancel: &CancelToken,
) -> Result<Vec<Installation>, String> {
    get_records(ctx, Installation::collection_name(), cancel).await
}
