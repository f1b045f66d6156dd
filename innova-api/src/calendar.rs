use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{NaiveDate, NaiveTime};
use innova_booking::{build_month_matrix, MonthCursor, MonthSummary, TimeRange};
use innova_catalog::{find_area, Area, AreaId, Quote};
use innova_core::{ReservationQuery, Session};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::reservations::{current_month, ReservationResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    /// Zero-based: 0 is January.
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub area: Area,
    #[serde(flatten)]
    pub summary: MonthSummary,
    pub previous: MonthCursor,
    pub next: MonthCursor,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub area_id: String,
    pub date: NaiveDate,
    pub reservations: Vec<ReservationResponse>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub day: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub quote: Quote,
    pub display_total: String,
    /// Zero hourly rate.
    pub free: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/areas/{area_id}/calendar", get(month_view))
        .route("/v1/areas/{area_id}/days/{date}", get(day_panel))
        .route("/v1/areas/{area_id}/quote", post(quote))
}

/// GET /v1/areas/{area_id}/calendar?year&month
async fn month_view(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(area_id): Path<String>,
    Query(q): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let today = current_month();
    let cursor = MonthCursor::new(q.year.unwrap_or(today.year), q.month.unwrap_or(today.month_index))?;

    let matrix = build_month_matrix(cursor.year, cursor.month_index)?;
    let query = match (matrix.first_day(), matrix.last_day()) {
        (Some(first), Some(last)) => ReservationQuery::between(first, last),
        _ => ReservationQuery::default(),
    };

    let view = state.open_view(&session, &area_id, query, cursor).await?;
    let summary = view.month_summary()?;
    Ok(Json(CalendarResponse {
        area: view.area().clone(),
        summary,
        previous: cursor.previous(),
        next: cursor.next(),
    }))
}

/// GET /v1/areas/{area_id}/days/{date}
async fn day_panel(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path((area_id, date)): Path<(String, NaiveDate)>,
) -> Result<Json<DayResponse>, AppError> {
    let view = state
        .open_view(&session, &area_id, ReservationQuery::between(date, date), MonthCursor::containing(date))
        .await?;
    let reservations = view.day(date).into_iter().map(ReservationResponse::from).collect();
    Ok(Json(DayResponse {
        area_id,
        date,
        reservations,
    }))
}

/// POST /v1/areas/{area_id}/quote
async fn quote(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(area_id): Path<String>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let areas = state.visible_areas(&session).await?;
    let area = find_area(&areas, &AreaId::from(area_id.as_str()))?;
    let range = TimeRange::on_day(req.day, req.start, req.end)?;
    let quote = Quote::for_area(area, range.start, range.end);
    Ok(Json(QuoteResponse {
        display_total: quote.display_total(),
        free: area.is_free(),
        quote,
    }))
}
