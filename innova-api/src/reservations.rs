use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use innova_booking::{
    mapping, CalendarView, CancelOutcome, CancellationWorkflow, Confirmation, CreationWorkflow, MonthCursor,
    Reservation, ReservationDraft, ReservationId,
};
use innova_catalog::{format_amount, AreaId};
use innova_core::{PaymentGate, ReservationQuery, Session};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: String,
    pub code: String,
    pub area_id: String,
    pub owner_id: Option<String>,
    pub resident_name: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    pub display_total: String,
    pub status: String,
}

impl From<&Reservation> for ReservationResponse {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id.to_string(),
            code: r.code.clone(),
            area_id: r.area_id.to_string(),
            owner_id: r.owner_id().map(str::to_string),
            resident_name: r.resident.as_ref().map(|p| p.full_name()),
            start: r.start,
            end: r.end,
            total_cost: r.total_cost,
            display_total: format_amount(r.total_cost),
            status: r.status.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub day: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    #[serde(default)]
    pub payment_confirmed: bool,
}

#[derive(Debug, Deserialize)]
pub struct CancelReservationRequest {
    /// Area whose calendar the reservation is shown in.
    pub area_id: String,
    pub confirmed: bool,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
    pub reservation: Option<ReservationResponse>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/areas/{area_id}/reservations", post(create_reservation))
        .route("/v1/reservations/{reservation_id}/cancel", post(cancel_reservation))
        .route("/v1/reservations/mine", get(my_reservations))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/areas/{area_id}/reservations
async fn create_reservation(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(area_id): Path<String>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), AppError> {
    let draft = ReservationDraft {
        area_id: Some(AreaId::from(area_id.as_str())),
        day: req.day,
        start: req.start,
        end: req.end,
        payment: PaymentGate::from_flag(req.payment_confirmed),
    };

    // The day bucket must be current at submission time.
    let mut view = match draft.day {
        Some(day) => {
            state
                .open_view(&session, &area_id, ReservationQuery::between(day, day), MonthCursor::containing(day))
                .await?
        }
        None => return Err(AppError::ValidationError("Select a day".to_string())),
    };

    let workflow = CreationWorkflow::new(state.reservations.clone(), state.slots);
    let reservation = workflow.submit(&mut view, &session, &draft).await?;

    Ok((StatusCode::CREATED, Json(ReservationResponse::from(&reservation))))
}

/// POST /v1/reservations/{reservation_id}/cancel
async fn cancel_reservation(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(reservation_id): Path<String>,
    Json(req): Json<CancelReservationRequest>,
) -> Result<Json<CancelResponse>, AppError> {
    let mut view: CalendarView = state
        .open_view(&session, &req.area_id, ReservationQuery::default(), current_month())
        .await?;

    let workflow = CancellationWorkflow::new(state.reservations.clone());
    let outcome = workflow
        .cancel(
            &mut view,
            &session,
            &ReservationId::from(reservation_id.as_str()),
            Confirmation::from(req.confirmed),
        )
        .await?;

    let response = match outcome {
        CancelOutcome::Declined => CancelResponse {
            cancelled: false,
            reservation: None,
        },
        CancelOutcome::Cancelled(reservation) => CancelResponse {
            cancelled: true,
            reservation: Some(ReservationResponse::from(&reservation)),
        },
    };
    Ok(Json(response))
}

/// GET /v1/reservations/mine
/// Earliest first, cancelled ones included.
async fn my_reservations(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let records = state.reservations.list_mine(&session).await?;
    let mut reservations = mapping::reservations_from_records(records);
    reservations.sort_by_key(|r| r.start);
    Ok(Json(reservations.iter().map(ReservationResponse::from).collect()))
}

pub(crate) fn current_month() -> MonthCursor {
    MonthCursor::containing(chrono::Local::now().date_naive())
}
