use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentAcknowledgement {
    #[default]
    Pending,
    Confirmed,
}

/// Client-side "I have paid" checkbox shown next to the QR code.
///
/// This is a UX gate only. No payment is verified here; the backend decides
/// whether a reservation is accepted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentGate {
    acknowledgement: PaymentAcknowledgement,
}

impl PaymentGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_flag(confirmed: bool) -> Self {
        let mut gate = Self::new();
        gate.set(confirmed);
        gate
    }

    pub fn confirm(&mut self) {
        self.acknowledgement = PaymentAcknowledgement::Confirmed;
    }

    pub fn revoke(&mut self) {
        self.acknowledgement = PaymentAcknowledgement::Pending;
    }

    pub fn set(&mut self, confirmed: bool) {
        if confirmed {
            self.confirm();
        } else {
            self.revoke();
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.acknowledgement == PaymentAcknowledgement::Confirmed
    }

    pub fn ensure_satisfied(&self) -> CoreResult<()> {
        if self.is_satisfied() {
            Ok(())
        } else {
            Err(CoreError::PaymentNotConfirmed)
        }
    }
}
