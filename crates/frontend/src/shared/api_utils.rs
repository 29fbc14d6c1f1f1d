//! API utilities for frontend-backend communication
//!
//! Every service function receives an explicit [`ApiContext`] carrying the
//! base URL and the bearer token, plus a [`CancelToken`] whose abort signal is
//! attached to the request.

use crate::shared::cancel::CancelToken;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Message returned by service calls whose caller went away mid-request
pub const REQUEST_CANCELLED: &str = "Solicitud cancelada";

/// Get the base URL for API requests
///
/// Uses the `API_URL` build-time variable when set, otherwise derives it from
/// the current window location with port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000/api/", always ending in `/`
/// - Empty string if window is not available
pub fn api_base() -> String {
    if let Some(url) = option_env!("API_URL") {
        return with_trailing_slash(url);
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000/api/", protocol, hostname)
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

/// Request context: where to send requests and with which credentials
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiContext {
    pub base_url: String,
    pub token: Option<String>,
}

impl ApiContext {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: with_trailing_slash(&base_url.into()),
            token,
        }
    }

    /// Full URL for a path relative to the API base
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder, cancel: &CancelToken) -> RequestBuilder {
        let builder = builder
            .header("Accept", "application/json")
            .abort_signal(cancel.signal().as_ref());
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }
}

/// HTTP verbs used by the service layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

fn builder_for(verb: Verb, url: &str) -> RequestBuilder {
    match verb {
        Verb::Get => Request::get(url),
        Verb::Post => Request::post(url),
        Verb::Put => Request::put(url),
        Verb::Patch => Request::patch(url),
        Verb::Delete => Request::delete(url),
    }
}

/// Turn a non-2xx response body into a human-readable message.
///
/// The API answers errors with `{"message": ...}` (sometimes `{"error": ...}`);
/// anything else falls back to the status code.
pub fn error_message_from_body(status: u16, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorResponse {
        message: Option<String>,
        error: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        if let Some(msg) = parsed.message.or(parsed.error) {
            if !msg.trim().is_empty() {
                return msg;
            }
        }
    }
    match status {
        401 => "Sesión expirada o no autorizada".to_string(),
        403 => "No tiene permisos para realizar esta acción".to_string(),
        404 => "Recurso no encontrado".to_string(),
        _ => format!("HTTP {}", status),
    }
}

async fn send<B: Serialize>(
    ctx: &ApiContext,
    verb: Verb,
    path: &str,
    body: Option<&B>,
    cancel: &CancelToken,
) -> Result<Response, String> {
    let url = ctx.url(path);
    let builder = ctx.authorize(builder_for(verb, &url), cancel);
    let request = match body {
        Some(body) => builder
            .json(body)
            .map_err(|e| format!("Failed to serialize request: {}", e))?,
        None => builder
            .build()
            .map_err(|e| format!("Failed to build request: {}", e))?,
    };

    let response = request.send().await.map_err(|e| {
        if cancel.is_cancelled() {
            REQUEST_CANCELLED.to_string()
        } else {
            format!("Failed to send request: {}", e)
        }
    })?;

    if !response.ok() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = error_message_from_body(status, &text);
        log::warn!("{:?} {} -> {}: {}", verb, url, status, message);
        return Err(message);
    }
    Ok(response)
}

/// Send a request and parse the JSON response
pub async fn request_json<B: Serialize, T: DeserializeOwned>(
    ctx: &ApiContext,
    verb: Verb,
    path: &str,
    body: Option<&B>,
    cancel: &CancelToken,
) -> Result<T, String> {
    let response = send(ctx, verb, path, body, cancel).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Like [`request_json`], but an empty body yields `T::default()`
pub async fn request_json_or_default<B: Serialize, T: DeserializeOwned + Default>(
    ctx: &ApiContext,
    verb: Verb,
    path: &str,
    body: Option<&B>,
    cancel: &CancelToken,
) -> Result<T, String> {
    let response = send(ctx, verb, path, body, cancel).await?;
    let text = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&text).map_err(|e| format!("Failed to parse response: {}", e))
}

/// Send a request and ignore the response body
pub async fn request_empty<B: Serialize>(
    ctx: &ApiContext,
    verb: Verb,
    path: &str,
    body: Option<&B>,
    cancel: &CancelToken,
) -> Result<(), String> {
    send(ctx, verb, path, body, cancel).await.map(|_| ())
}

/// `GET` shorthand
pub async fn get_json<T: DeserializeOwned>(
    ctx: &ApiContext,
    path: &str,
    cancel: &CancelToken,
) -> Result<T, String> {
    request_json::<(), T>(ctx, Verb::Get, path, None, cancel).await
}

/// Decode list elements one by one. Elements that do not fit `T` are
/// logged and skipped so one bad record does not hide the rest.
pub fn decode_records<T: DeserializeOwned>(values: Vec<serde_json::Value>, what: &str) -> Vec<T> {
    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("skipping {} #{}: {}", what, index, e);
                None
            }
        })
        .collect();
    if records.len() < total {
        log::warn!("{}: {} of {} records unreadable", what, total - records.len(), total);
    }
    records
}

/// `GET` a collection, decoding each element on its own
pub async fn get_records<T: DeserializeOwned>(
    ctx: &ApiContext,
    path: &str,
    cancel: &CancelToken,
) -> Result<Vec<T>, String> {
    let values = get_json::<Vec<serde_json::Value>>(ctx, path, cancel).await?;
    Ok(decode_records(values, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_work_order::WorkOrder;

    #[test]
    fn test_bad_record_does_not_hide_the_rest() {
        let values: Vec<serde_json::Value> = serde_json::from_str(
            r#"[
                {"_id": "1", "titulo": "Revisión caldera", "estado": "pendiente"},
                {"_id": "2", "titulo": "Archivada", "estado": "archivada"},
                {"titulo": "Sin id"},
                {"_id": "4", "titulo": "Cambio de bomba", "createdAt": "2024-04-20T08:00:00",
                 "tiempoTrabajo": "1.5", "historial": [{"accion": "creada", "fecha": "2024-04-20"}]}
            ]"#,
        )
        .unwrap();

        let records: Vec<WorkOrder> = decode_records(values, "ordenes-trabajo");

        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(records[1].completion.time_spent, Some(1.5));
    }

    #[test]
    fn test_context_url_joins_paths() {
        let ctx = ApiContext::new("http://localhost:3000/api", None);
        assert_eq!(ctx.base_url, "http://localhost:3000/api/");
        assert_eq!(
            ctx.url("ordenes-trabajo/1/asignar"),
            "http://localhost:3000/api/ordenes-trabajo/1/asignar"
        );
        assert_eq!(
            ctx.url("/instalaciones"),
            "http://localhost:3000/api/instalaciones"
        );
    }

    #[test]
    fn test_error_message_prefers_body() {
        assert_eq!(
            error_message_from_body(400, r#"{"message":"Título duplicado"}"#),
            "Título duplicado"
        );
        assert_eq!(
            error_message_from_body(500, r#"{"error":"boom"}"#),
            "boom"
        );
        assert_eq!(error_message_from_body(502, "<html>"), "HTTP 502");
        assert_eq!(
            error_message_from_body(401, ""),
            "Sesión expirada o no autorizada"
        );
    }
}
