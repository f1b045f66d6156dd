use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::NaiveTime;
use innova_catalog::Area;
use innova_core::Session;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub first_hour: u32,
    pub last_hour: u32,
    pub start_options: Vec<NaiveTime>,
    pub all: Vec<NaiveTime>,
    /// Present when the request names a start time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_options: Option<Vec<NaiveTime>>,
}

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub start: Option<NaiveTime>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/areas", get(list_areas))
        .route("/v1/slots", get(slots))
}

/// GET /v1/areas
async fn list_areas(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<Area>>, AppError> {
    let areas = state.visible_areas(&session).await?;
    Ok(Json(areas))
}

/// GET /v1/slots?start
async fn slots(State(state): State<AppState>, Query(q): Query<SlotsQuery>) -> Json<SlotsResponse> {
    let menu = state.slots;
    Json(SlotsResponse {
        first_hour: menu.first_hour,
        last_hour: menu.last_hour,
        start_options: menu.start_options(),
        all: menu.all(),
        end_options: q.start.map(|start| menu.end_options(start)),
    })
}
