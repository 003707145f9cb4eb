//! Route handlers.
//!
//! Bodies borrow from the shared config, so each handler serializes into a
//! [`Response`] before `state` goes out of scope.

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use crate::http::response::{
    DiscoveryBody, HealthBody, MissingTargetBody, ReceivedBody, StartErrorBody, StartSuccessBody,
};
use crate::http::server::AppState;
use crate::observability::metrics;

pub async fn health(State(state): State<AppState>) -> Response {
    let service = &state.config.service;
    Json(HealthBody::healthy(&service.name, service.port)).into_response()
}

pub async fn root(State(state): State<AppState>) -> Response {
    let service = &state.config.service;
    Json(DiscoveryBody::new(&service.name, service.port)).into_response()
}

/// Forward one GET to the configured target and report the outcome.
pub async fn start(State(state): State<AppState>) -> Response {
    let app = state.config.service.name.as_str();

    let Some(target) = state.config.target_url() else {
        tracing::warn!(app = %app, "TARGET_URL not configured");
        metrics::record_outbound("unconfigured");
        let body = MissingTargetBody {
            error: "TARGET_URL not configured",
            app,
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };

    tracing::info!(app = %app, target = %target, "Sending request to target");

    match state.relay.forward(target).await {
        Ok(outcome) => {
            metrics::record_outbound("success");
            let body = StartSuccessBody {
                status: "success",
                app,
                target,
                response_status: outcome.status,
                response_body: &outcome.body,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            tracing::error!(app = %app, target = %target, error = %e, "Request to target failed");
            metrics::record_outbound(e.kind());
            let body = StartErrorBody {
                status: "error",
                app,
                target,
                error: e.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

/// Echo the request data: the JSON body of a JSON POST, else the query.
pub async fn receive(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let app = state.config.service.name.as_str();

    let data = if method == Method::POST && is_json_request(&headers) {
        serde_json::from_slice(&body).unwrap_or_else(|e| {
            tracing::debug!(app = %app, error = %e, "Malformed JSON body, treating as empty");
            Value::Object(Map::new())
        })
    } else {
        Value::Object(query_map(query.as_deref()))
    };

    tracing::info!(app = %app, method = %method, data = %data, "Request received");

    Json(ReceivedBody::new(app, method.as_str(), data)).into_response()
}

/// `application/json` or any `application/*+json` media type.
pub fn is_json_request(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Decode a query string into a flat map; the first value of a repeated
/// key wins.
pub fn query_map(query: Option<&str>) -> Map<String, Value> {
    let mut data = Map::new();
    if let Some(query) = query {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            data.entry(key.into_owned())
                .or_insert_with(|| Value::String(value.into_owned()));
        }
    }
    data
}
