use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::error;

use crate::controllers::ShadowGateway;
use crate::errors::BridgeError;

/// Body of `POST /shadow`
#[derive(Debug, Deserialize)]
pub struct ShadowWriteRequest {
    pub attribute: String,
    pub value: Value,
}

#[derive(Debug, Serialize)]
pub struct Ack {
    ok: bool,
}

impl Ack {
    fn ok() -> Json<Self> {
        Json(Self { ok: true })
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Error response carrying the raw error message
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<BridgeError> for ApiError {
    fn from(err: BridgeError) -> Self {
        error!("{}", err);
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

pub(crate) async fn get_shadow(State(gateway): State<Arc<ShadowGateway>>) -> Result<Json<Map<String, Value>>, ApiError> {
    Ok(Json(gateway.read_shadow().await?))
}

pub(crate) async fn post_shadow(State(gateway): State<Arc<ShadowGateway>>, body: Bytes) -> Result<Json<Ack>, ApiError> {
    let request: ShadowWriteRequest = serde_json::from_slice(&body)
        .map_err(|e| BridgeError::InvalidRequest(e.to_string()))?;
    gateway.write_shadow_attribute(&request.attribute, request.value).await?;
    Ok(Ack::ok())
}

pub(crate) async fn post_procesar(State(gateway): State<Arc<ShadowGateway>>) -> Result<Json<Ack>, ApiError> {
    gateway.run_processing_pass().await?;
    Ok(Ack::ok())
}

pub(crate) async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not found")
}
