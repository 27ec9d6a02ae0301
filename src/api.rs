use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::error::EngineError;
use crate::glyph;
use crate::incident::{IncidentDraft, IncidentRecord};
use crate::ingest::{self, IngestSource};
use crate::registry::IncidentRegistry;

#[derive(Clone)]
pub struct AppState {
    registry: Arc<IncidentRegistry>,
    ingest: Arc<dyn IngestSource>,
}

impl AppState {
    pub fn new(registry: Arc<IncidentRegistry>, ingest: Arc<dyn IngestSource>) -> Self {
        Self { registry, ingest }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/get-incidents", get(get_incidents))
        .route("/report", post(report))
        .route("/scrape", post(scrape))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Record plus its display glyph; what the dashboard actually renders.
#[derive(Serialize)]
struct IncidentView {
    #[serde(flatten)]
    record: IncidentRecord,
    icon: &'static str,
}

impl From<IncidentRecord> for IncidentView {
    fn from(record: IncidentRecord) -> Self {
        let icon = glyph::glyph_for(record.category);
        Self { record, icon }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn error_response(err: EngineError) -> ApiError {
    let status = match err {
        EngineError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Ingestion(_) | EngineError::MalformedResponse { .. } => {
            StatusCode::BAD_GATEWAY
        }
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}

/// Ranked listing, recomputed from the live collection on every call.
async fn get_incidents(State(state): State<AppState>) -> Json<Vec<IncidentView>> {
    let views = state
        .registry
        .ranked()
        .into_iter()
        .map(IncidentView::from)
        .collect();
    Json(views)
}

/// Manually authored report: validate, score, append.
async fn report(
    State(state): State<AppState>,
    Json(draft): Json<IncidentDraft>,
) -> Result<Json<IncidentView>, ApiError> {
    metrics::counter!("incident_reports_total").increment(1);
    let record = state
        .registry
        .submit_manual(&draft)
        .map_err(error_response)?;
    Ok(Json(record.into()))
}

#[derive(Deserialize)]
struct ScrapeReq {
    #[serde(default)]
    url: String,
}

/// Ingest a pre-scored incident from the remote analyzer by locator.
async fn scrape(
    State(state): State<AppState>,
    Json(body): Json<ScrapeReq>,
) -> Result<Json<IncidentView>, ApiError> {
    let locator = body.url.trim();
    if locator.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "URL is required".to_string(),
            }),
        ));
    }

    let record = ingest::ingest_once(state.ingest.as_ref(), &state.registry, locator)
        .await
        .map_err(error_response)?;
    Ok(Json(record.into()))
}
