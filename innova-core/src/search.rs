use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Optional date-range filter for listing an area's reservations.
/// Both bounds are inclusive calendar days.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl ReservationQuery {
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn matches(&self, day: NaiveDate) -> bool {
        self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
    }

    /// Query string pairs in the backend's parameter names.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(from) = self.from {
            params.push(("desde", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to {
            params.push(("hasta", to.format("%Y-%m-%d").to_string()));
        }
        params
    }
}
