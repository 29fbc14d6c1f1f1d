use contracts::system::auth::{LoginRequest, LoginResponse};

use crate::shared::api_utils::{api_base, request_json, ApiContext, Verb};
use crate::shared::cancel::CancelToken;

/// Login with username and password (no bearer token yet)
pub async fn login(request: &LoginRequest, cancel: &CancelToken) -> Result<LoginResponse, String> {
    let ctx = ApiContext::new(api_base(), None);
    request_json(&ctx, Verb::Post, "auth/login", Some(request), cancel).await
}
