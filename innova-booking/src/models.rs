use chrono::{NaiveDate, NaiveDateTime};
use innova_catalog::AreaId;
use innova_shared::Masked;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::range::TimeRange;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(pub String);

impl ReservationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReservationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Reservation status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Client-local draft that was never sent to the backend.
    PendingConfirmation,
    /// Persisted and paid ("pagado").
    Active,
    /// Terminal soft delete ("cancelado").
    Cancelled,
}

impl ReservationStatus {
    pub fn is_cancelled(self) -> bool {
        self == ReservationStatus::Cancelled
    }

    /// Whether a reservation in this status holds its time slot.
    pub fn occupies_slot(self) -> bool {
        self == ReservationStatus::Active
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReservationStatus::PendingConfirmation => "PENDING_CONFIRMATION",
            ReservationStatus::Active => "ACTIVE",
            ReservationStatus::Cancelled => "CANCELLED",
        };
        f.write_str(label)
    }
}

/// Display-only identity of the resident who booked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resident {
    pub user_id: Option<String>,
    pub first_name: Masked<String>,
    pub last_name: Masked<String>,
}

impl Resident {
    pub fn full_name(&self) -> String {
        let first = self.first_name.expose().trim();
        let last = self.last_name.expose().trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{} {}", first, last),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (true, true) => String::new(),
        }
    }
}

/// A booked, time-bounded claim on an area.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub code: String,
    pub area_id: AreaId,
    pub resident: Option<Resident>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    pub status: ReservationStatus,
}

impl Reservation {
    /// Calendar day the reservation is bucketed under.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::unchecked(self.start, self.end)
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.resident.as_ref().and_then(|r| r.user_id.as_deref())
    }

    pub fn is_cancelled(&self) -> bool {
        self.status.is_cancelled()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_day_uses_start_timestamp() {
        let r = reservation("1", at(15, 22, 0), at(16, 1, 0));
        assert_eq!(r.day(), NaiveDate::from_ymd_opt(2025, 10, 15).unwrap());
    }

    #[test]
    fn test_resident_full_name() {
        let r = reservation("1", at(15, 9, 0), at(15, 10, 0));
        assert_eq!(r.resident.as_ref().unwrap().full_name(), "Ana Rojas");
        assert_eq!(r.owner_id(), Some("u-1"));
        assert!(!format!("{:?}", r).contains("Rojas"));
    }

    #[test]
    fn test_only_active_occupies_slot() {
        assert!(ReservationStatus::Active.occupies_slot());
        assert!(!ReservationStatus::Cancelled.occupies_slot());
        assert!(!ReservationStatus::PendingConfirmation.occupies_slot());
    }
}
