//! API handlers for the Placard preview server.

use crate::store::{StoreError, StoredResult};
use crate::AppState;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use placard_types::{ActionBody, ActionResponse, Frame, FramePayload, ResponseSummary, ResultId};
use std::sync::Arc;
use thiserror::Error;

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("frame host unreachable: {0}")]
    UpstreamUnreachable(String),
    #[error("frame host returned an invalid document: {0}")]
    UpstreamInvalid(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::UpstreamUnreachable(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::UpstreamInvalid(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::InternalServerError(e.to_string())
    }
}

/// Validates an inbound action body before proxying it.
fn validate_body(body: &ActionBody) -> Result<(), ApiError> {
    if !(1..=placard_types::MAX_BUTTONS as u8).contains(&body.button_index) {
        return Err(ApiError::BadRequest(format!(
            "button index out of range: {}",
            body.button_index
        )));
    }
    let parsed = url::Url::parse(&body.url)
        .map_err(|e| ApiError::BadRequest(format!("invalid action url: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::BadRequest(format!(
            "unsupported action url scheme: {}",
            parsed.scheme()
        )));
    }
    Ok(())
}

/// Handler for `POST /api/frames/action`.
///
/// Wraps the action body into the payload shape a frame host receives,
/// posts it to the body's target URL, and stores the returned frame
/// document under a fresh result id.
pub async fn post_action_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<ActionBody>,
) -> Result<Json<ActionResponse>, ApiError> {
    validate_body(&body)?;

    let payload = FramePayload::from(&body);
    let response = state
        .http
        .post(&body.url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| ApiError::UpstreamUnreachable(e.to_string()))?;

    let status = response.status().as_u16();
    let frame: Frame = response
        .json()
        .await
        .map_err(|e| ApiError::UpstreamInvalid(e.to_string()))?;

    let record = state.store.insert(StoredResult::Frame { frame })?;
    tracing::info!(id = %record.id, status, url = %body.url, "frame action proxied");

    Ok(Json(ActionResponse {
        id: record.id,
        response: ResponseSummary {
            status,
            location: None,
        },
    }))
}

/// Handler for `POST /api/frames/redirect`.
///
/// Posts the action body like the plain handler but with redirects
/// disabled, so a `302` and its `Location` header are captured into the
/// envelope instead of being followed.
pub async fn post_redirect_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<ActionBody>,
) -> Result<Json<ActionResponse>, ApiError> {
    validate_body(&body)?;

    let payload = FramePayload::from(&body);
    let response = state
        .redirect_http
        .post(&body.url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| ApiError::UpstreamUnreachable(e.to_string()))?;

    let status = response.status().as_u16();
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let record = state.store.insert(StoredResult::Redirect {
        status,
        location: location.clone(),
    })?;
    tracing::info!(
        id = %record.id,
        status,
        location = location.as_deref().unwrap_or("<none>"),
        "frame redirect captured"
    );

    Ok(Json(ActionResponse {
        id: record.id,
        response: ResponseSummary { status, location },
    }))
}

/// Handler for `GET /api/frames/{id}`.
pub async fn get_result_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<crate::store::ResultRecord>, ApiError> {
    let id = ResultId::from(id);
    let record = state
        .store
        .get(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("no result stored under {id}")))?;
    Ok(Json(record))
}
