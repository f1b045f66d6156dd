use innova_core::{CollaboratorError, ReservationStore, Session};
use std::sync::Arc;

use crate::lifecycle::{self, Confirmation, LifecycleError};
use crate::mapping::STATUS_CANCELLED;
use crate::models::{Reservation, ReservationId};
use crate::view::CalendarView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The user backed out at the prompt; nothing was sent.
    Declined,
    Cancelled(Reservation),
}

/// Soft-deletes reservations: they stay in the backend with status `cancelado`.
pub struct CancellationWorkflow {
    store: Arc<dyn ReservationStore>,
}

impl CancellationWorkflow {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self { store }
    }

    pub async fn cancel(
        &self,
        view: &mut CalendarView,
        session: &Session,
        reservation_id: &ReservationId,
        confirmation: Confirmation,
    ) -> Result<CancelOutcome, CancelError> {
        let reservation = view
            .find(reservation_id)
            .ok_or_else(|| CancelError::NotFound(reservation_id.clone()))?;

        if !session.may_act_for(reservation.owner_id()) {
            return Err(CancelError::NotPermitted(reservation_id.clone()));
        }

        if confirmation == Confirmation::Declined {
            return Ok(CancelOutcome::Declined);
        }
        lifecycle::cancel(reservation.status, confirmation)?;

        let ticket = view.ticket();
        let record = self
            .store
            .update_status(session, reservation_id.as_str(), STATUS_CANCELLED)
            .await
            .map_err(|e| {
                tracing::warn!(reservation_id = %reservation_id, error = %e, "Cancellation failed");
                CancelError::from(e)
            })?;

        let updated = Reservation::try_from(record).map_err(|e| CancelError::Transport(e.to_string()))?;
        if !updated.is_cancelled() {
            tracing::warn!(
                reservation_id = %reservation_id,
                status = %updated.status,
                "Backend acknowledged cancellation without cancelled status"
            );
            return Err(CancelError::Rejected(format!(
                "Reservation {} is still {}",
                updated.code, updated.status
            )));
        }

        view.commit_status(&ticket, updated.clone());
        tracing::info!(reservation_id = %reservation_id, code = %updated.code, "Reservation cancelled");
        Ok(CancelOutcome::Cancelled(updated))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CancelError {
    #[error("Reservation not found: {0}")]
    NotFound(ReservationId),

    #[error("Not allowed to cancel reservation {0}")]
    NotPermitted(ReservationId),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("{0}")]
    Rejected(String),

    #[error("Backend unavailable: {0}")]
    Transport(String),
}

impl From<CollaboratorError> for CancelError {
    fn from(err: CollaboratorError) -> Self {
        match err {
            CollaboratorError::Rejected(message) => CancelError::Rejected(message),
            CollaboratorError::Transport(msg) | CollaboratorError::Malformed(msg) => CancelError::Transport(msg),
        }
    }
}
