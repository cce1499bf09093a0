//! API endpoint handlers
//!
//! This module implements the relay endpoint: CORS preflight handling,
//! method gating, payload parsing, and the forward to the Gemini upstream.
//! Every response carries permissive CORS headers so browser callers can
//! always read the outcome, rejections and failures included.

use crate::core::client::{GeminiClient, UpstreamReply};
use crate::core::config::Config;
use crate::models::gemini::GenerateContentRequest;
use crate::models::relay::RelayRequest;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Arc<GeminiClient>,
}

/// Create the API router
///
/// Every path and method lands in the relay handler; method dispatch
/// happens inside it so rejections still carry CORS headers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(relay))
        .route("/{*path}", any(relay))
        .with_state(state)
}

/// Relay handler: one inbound request maps to one upstream request
async fn relay(State(state): State<AppState>, method: Method, body: Bytes) -> Response {
    // Preflight never parses the body
    if method == Method::OPTIONS {
        return preflight_response(&state.config);
    }

    if method != Method::POST {
        return method_not_allowed(&state.config);
    }

    handle_generate(&state, &body).await
}

/// POST path: parse the payload, check the credential, forward upstream,
/// relay the reply
async fn handle_generate(state: &AppState, body: &[u8]) -> Response {
    let request: RelayRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            error!("Failed to parse relay request body: {}", e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Invalid request body: {}", e),
                &state.config,
            );
        }
    };

    // Credential check precedes any outbound traffic
    let Some(api_key) = state.config.api_key.as_deref() else {
        error!("Rejecting request: GEMINI_API_KEY is not configured");
        let status = StatusCode::from_u16(state.config.missing_key_status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return error_response(
            status,
            "Server Configuration Error: GEMINI_API_KEY is missing",
            &state.config,
        );
    };

    let model = state
        .client
        .effective_model(request.model.as_deref())
        .to_string();

    info!(
        "📥 Incoming relay request: model={}, system_prompt={}",
        model,
        request.system_prompt.is_some()
    );
    debug!("Full request payload: {:?}", request);

    let payload = GenerateContentRequest::from_relay(&request);

    match state.client.generate(&model, api_key, &payload).await {
        Ok(reply) => relay_response(reply, &state.config),
        Err(e) => {
            error!("Upstream call failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
                &state.config,
            )
        }
    }
}

/// Attach the permissive CORS headers to a response
fn apply_cors_headers(headers: &mut HeaderMap, config: &Config) {
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_str(&config.allowed_methods)
            .unwrap_or_else(|_| HeaderValue::from_static("POST, OPTIONS")),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_str(&config.allowed_headers)
            .unwrap_or_else(|_| HeaderValue::from_static("*")),
    );
}

/// 204 preflight response with CORS headers and an empty body
fn preflight_response(config: &Config) -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    apply_cors_headers(response.headers_mut(), config);
    response
}

/// 405 rejection, still readable by browser callers
fn method_not_allowed(config: &Config) -> Response {
    let mut response = (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response();
    apply_cors_headers(response.headers_mut(), config);
    response
}

/// JSON error body with CORS headers
fn error_response(status: StatusCode, message: &str, config: &Config) -> Response {
    let mut response = (status, Json(json!({ "error": message }))).into_response();
    apply_cors_headers(response.headers_mut(), config);
    response
}

/// Re-emit the upstream reply verbatim, with relay headers attached
fn relay_response(reply: UpstreamReply, config: &Config) -> Response {
    let status =
        StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, Json(reply.body)).into_response();
    apply_cors_headers(response.headers_mut(), config);
    response
}
