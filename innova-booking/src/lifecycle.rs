use innova_core::PaymentGate;
use serde::{Deserialize, Serialize};

use crate::models::ReservationStatus;

/// Actor-triggered lifecycle events.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Transition {
    /// Draft accepted by the backend.
    Confirm,
    /// Owner or administrator cancels an active reservation.
    Cancel,
}

impl Transition {
    pub fn target(self) -> ReservationStatus {
        match self {
            Transition::Confirm => ReservationStatus::Active,
            Transition::Cancel => ReservationStatus::Cancelled,
        }
    }
}

/// Answer to the blocking "are you sure?" prompt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(value: bool) -> Self {
        if value {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// Transition: PendingConfirmation → Active, Active → Cancelled.
/// Cancelled is terminal and drafts are discarded rather than cancelled.
pub fn next_status(current: ReservationStatus, transition: Transition) -> Result<ReservationStatus, LifecycleError> {
    match (current, transition) {
        (ReservationStatus::PendingConfirmation, Transition::Confirm) => Ok(ReservationStatus::Active),
        (ReservationStatus::Active, Transition::Cancel) => Ok(ReservationStatus::Cancelled),
        (from, t) => Err(LifecycleError::InvalidTransition {
            from,
            to: t.target(),
        }),
    }
}

/// Transition: PendingConfirmation → Active, gated on the payment acknowledgement.
pub fn confirm(current: ReservationStatus, gate: &PaymentGate) -> Result<ReservationStatus, LifecycleError> {
    gate.ensure_satisfied()
        .map_err(|_| LifecycleError::PaymentNotConfirmed)?;
    next_status(current, Transition::Confirm)
}

/// Transition: Active → Cancelled, only after the user said yes.
pub fn cancel(current: ReservationStatus, confirmation: Confirmation) -> Result<ReservationStatus, LifecycleError> {
    if confirmation == Confirmation::Declined {
        return Err(LifecycleError::NotConfirmed);
    }
    next_status(current, Transition::Cancel)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("Payment has not been confirmed")]
    PaymentNotConfirmed,

    #[error("Cancellation was not confirmed")]
    NotConfirmed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_lifecycle() {
        let mut gate = PaymentGate::new();
        gate.confirm();

        // PendingConfirmation → Active
        let status = confirm(ReservationStatus::PendingConfirmation, &gate).unwrap();
        assert_eq!(status, ReservationStatus::Active);

        // Active → Cancelled
        let status = cancel(status, Confirmation::Confirmed).unwrap();
        assert_eq!(status, ReservationStatus::Cancelled);
    }

    #[test]
    fn test_confirm_requires_payment_gate() {
        let result = confirm(ReservationStatus::PendingConfirmation, &PaymentGate::new());
        assert_eq!(result, Err(LifecycleError::PaymentNotConfirmed));
    }

    #[test]
    fn test_cancel_requires_confirmation() {
        let result = cancel(ReservationStatus::Active, Confirmation::Declined);
        assert_eq!(result, Err(LifecycleError::NotConfirmed));
    }

    #[test]
    fn test_cancelled_is_terminal() {
        for t in [Transition::Confirm, Transition::Cancel] {
            assert!(matches!(
                next_status(ReservationStatus::Cancelled, t),
                Err(LifecycleError::InvalidTransition { from: ReservationStatus::Cancelled, .. })
            ));
        }
    }

    #[test]
    fn test_invalid_transitions() {
        // Drafts are discarded, never cancelled.
        assert!(next_status(ReservationStatus::PendingConfirmation, Transition::Cancel).is_err());
        // Already active.
        assert!(next_status(ReservationStatus::Active, Transition::Confirm).is_err());
    }
}
