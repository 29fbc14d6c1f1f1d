use crate::shared::api_utils::{get_records, ApiContext};
use crate::shared::cancel::CancelToken;
use contracts::system::users::Technician;

/// `GET usuarios/tecnicos`: technicians available for assignment
pub async fn fetch_technicians(
    ctx: &ApiContext,
    cancel: &CancelToken,
) -> Result<Vec<Technician>, String> {
    get_records(ctx, "usuarios/tecnicos", cancel).await
}
