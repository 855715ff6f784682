//! HTTP surface of the lookup service.
//!
//! `POST /hltb {"name": "..."}` returns the matched page URL and its
//! normalized times; `GET /` is a liveness probe.
use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use hltb_common::HltbError;
use hltb_web::{GameLookup, HltbClient};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

pub const LIVENESS_TEXT: &str = "HLTB scraper service running.";
const MISSING_NAME: &str = "Missing 'name' in body";

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<HltbClient>,
}

impl AppState {
    pub fn new(client: HltbClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/hltb", post(lookup_game))
        .with_state(state)
}

async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

#[derive(Debug, Deserialize)]
struct LookupRequest {
    #[serde(default)]
    name: Option<String>,
}

async fn lookup_game(
    State(state): State<AppState>,
    body: Result<Json<LookupRequest>, JsonRejection>,
) -> Result<Json<GameLookup>, ApiError> {
    let name = match body {
        Ok(Json(LookupRequest { name: Some(name) })) if !name.trim().is_empty() => name,
        Ok(_) => return Err(ApiError::bad_request()),
        Err(rejection) => {
            warn!(target: "http.request", reason = %rejection.body_text(), "http.request.rejected");
            return Err(ApiError::bad_request());
        }
    };

    let started = Instant::now();
    info!(target: "http.request", %name, "http.request.start");
    let result = state.client.lookup(&name).await;
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => status_for(e),
    };
    info!(
        target: "http.request",
        %name,
        status = status.as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "http.request.finish"
    );
    result.map(Json).map_err(ApiError::from)
}

fn status_for(err: &HltbError) -> StatusCode {
    match err {
        HltbError::Validation(_) => StatusCode::BAD_REQUEST,
        HltbError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error response: a status and a `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: MISSING_NAME.to_string(),
        }
    }
}

impl From<HltbError> for ApiError {
    fn from(err: HltbError) -> Self {
        let status = status_for(&err);
        let message = match err {
            HltbError::Validation(_) => MISSING_NAME.to_string(),
            other => other.to_string(),
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
