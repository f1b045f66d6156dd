use chrono::{NaiveDate, NaiveTime};
use innova_catalog::{AreaId, Quote};
use innova_core::{CollaboratorError, PaymentGate, ReservationStore, Session};
use innova_shared::CreateReservationRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::conflict::find_conflict;
use crate::lifecycle::{self, LifecycleError};
use crate::mapping;
use crate::models::{Reservation, ReservationStatus};
use crate::range::TimeRange;
use crate::slots::SlotMenu;
use crate::view::{CalendarView, ViewTicket};

/// The reservation form: what the user has picked so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationDraft {
    pub area_id: Option<AreaId>,
    pub day: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    #[serde(default)]
    pub payment: PaymentGate,
}

impl ReservationDraft {
    pub fn new(area_id: impl Into<AreaId>, day: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            area_id: Some(area_id.into()),
            day: Some(day),
            start: Some(start),
            end: Some(end),
            payment: PaymentGate::new(),
        }
    }

    pub fn with_payment_confirmed(mut self) -> Self {
        self.payment.confirm();
        self
    }

    /// Range of a complete, well-ordered selection.
    pub fn range(&self) -> Result<TimeRange, ValidationError> {
        if self.area_id.is_none() {
            return Err(ValidationError::MissingArea);
        }
        let day = self.day.ok_or(ValidationError::MissingDay)?;
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(ValidationError::MissingTime);
        };
        TimeRange::on_day(day, start, end).map_err(|_| ValidationError::EndNotAfterStart { start, end })
    }

    /// Live price shown under the form. Zero until the selection is complete and valid.
    pub fn quote(&self, view: &CalendarView) -> Quote {
        match self.range() {
            Ok(range) => Quote::for_area(view.area(), range.start, range.end),
            Err(_) => Quote::default(),
        }
    }
}

/// A validated draft, ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedReservation {
    pub command: CreateReservationRecord,
    pub range: TimeRange,
    pub quote: Quote,
    pub ticket: ViewTicket,
}

pub struct CreationWorkflow {
    store: Arc<dyn ReservationStore>,
    slots: SlotMenu,
}

impl CreationWorkflow {
    pub fn new(store: Arc<dyn ReservationStore>, slots: SlotMenu) -> Self {
        Self { store, slots }
    }

    /// Local checks, in order: selection, ordering, slot menu, conflict, payment.
    /// Nothing leaves the process until all of them pass.
    pub fn prepare(&self, view: &CalendarView, draft: &ReservationDraft) -> Result<PreparedReservation, CreationError> {
        let range = draft.range()?;
        let area = view.area();
        if draft.area_id.as_ref() != Some(&area.id) {
            return Err(ValidationError::AreaNotShown(area.id.clone()).into());
        }
        for t in [range.start.time(), range.end.time()] {
            if !self.slots.contains(t) {
                return Err(ValidationError::OutsideSlotMenu(t).into());
            }
        }

        let quote = Quote::for_area(area, range.start, range.end);

        let bucket = view.index().day(range.start.date());
        if let Some(existing) = find_conflict(&range, bucket) {
            return Err(CreationError::Conflict {
                code: existing.code.clone(),
                range: existing.range(),
            });
        }

        lifecycle::confirm(ReservationStatus::PendingConfirmation, &draft.payment)?;

        Ok(PreparedReservation {
            command: mapping::create_record(&area.id, range.start, range.end, quote.total_cost, true),
            range,
            quote,
            ticket: view.ticket(),
        })
    }

    pub async fn send(&self, session: &Session, prepared: &PreparedReservation) -> Result<Reservation, CreationError> {
        let record = self.store.create(session, &prepared.command).await.map_err(|e| {
            if e.is_rejection() {
                tracing::warn!(area_id = %prepared.command.id_area_comun, message = %e, "Backend rejected reservation");
            } else {
                tracing::error!(area_id = %prepared.command.id_area_comun, error = %e, "Reservation request failed");
            }
            CreationError::from(e)
        })?;
        let (id, code) = (record.id_reserva.clone(), record.codigo.clone());
        Reservation::try_from(record).map_err(|e| {
            tracing::error!(reservation_id = %id, %code, error = %e, "Backend stored a reservation it cannot describe");
            CreationError::StoredUnreadable {
                code: if code.is_empty() { id } else { code },
                reason: e.to_string(),
            }
        })
    }

    /// Prepare, send, and commit the confirmed reservation into the view.
    pub async fn submit(
        &self,
        view: &mut CalendarView,
        session: &Session,
        draft: &ReservationDraft,
    ) -> Result<Reservation, CreationError> {
        let prepared = self.prepare(view, draft)?;
        let reservation = self.send(session, &prepared).await?;
        tracing::info!(
            reservation_id = %reservation.id,
            code = %reservation.code,
            range = %prepared.range,
            total = %prepared.quote.display_total(),
            "Reservation created"
        );
        view.commit_created(&prepared.ticket, reservation.clone());
        Ok(reservation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Select an area")]
    MissingArea,

    #[error("Select a day")]
    MissingDay,

    #[error("Select a start and end time")]
    MissingTime,

    #[error("End time {end} must be after start time {start}")]
    EndNotAfterStart { start: NaiveTime, end: NaiveTime },

    #[error("{0} is not an offered time slot")]
    OutsideSlotMenu(NaiveTime),

    #[error("Area {0} is not the one on screen")]
    AreaNotShown(AreaId),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Overlaps reservation {code} ({range})")]
    Conflict { code: String, range: TimeRange },

    #[error("Confirm the payment before booking")]
    PaymentNotConfirmed,

    #[error("{0}")]
    Rejected(String),

    #[error("Backend unavailable: {0}")]
    Transport(String),

    /// The backend accepted the booking but answered with a record that does
    /// not map. Retrying would book twice.
    #[error("Reservation {code} was created but could not be read back: {reason}")]
    StoredUnreadable { code: String, reason: String },

    #[error(transparent)]
    Lifecycle(LifecycleError),
}

impl From<LifecycleError> for CreationError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::PaymentNotConfirmed => CreationError::PaymentNotConfirmed,
            other => CreationError::Lifecycle(other),
        }
    }
}

impl From<CollaboratorError> for CreationError {
    fn from(err: CollaboratorError) -> Self {
        match err {
            CollaboratorError::Rejected(message) => CreationError::Rejected(message),
            CollaboratorError::Transport(msg) | CollaboratorError::Malformed(msg) => CreationError::Transport(msg),
        }
    }
}
