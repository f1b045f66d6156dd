use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::area::Area;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Fractional hours between `start` and `end`. Zero when `end` is not after `start`.
pub fn duration_hours(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return Decimal::ZERO;
    }
    Decimal::from(millis) / Decimal::from(MILLIS_PER_HOUR)
}

/// Hourly rate times fractional duration, at full precision.
///
/// A non-positive duration costs 0; callers must treat that interval as invalid
/// rather than submit it. A product beyond `Decimal::MAX` saturates.
pub fn compute_cost(hourly_rate: Decimal, start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    let hours = duration_hours(start, end);
    if hours.is_zero() || hourly_rate <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    hourly_rate.saturating_mul(hours)
}

/// Live price shown in the reservation form.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    #[serde(with = "rust_decimal::serde::float")]
    pub duration_hours: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
}

impl Quote {
    pub fn new(hourly_rate: Decimal, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            duration_hours: duration_hours(start, end),
            total_cost: compute_cost(hourly_rate, start, end),
        }
    }

    pub fn for_area(area: &Area, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::new(area.hourly_rate, start, end)
    }

    /// A zero-length or inverted interval yields an empty quote.
    pub fn is_empty(&self) -> bool {
        self.duration_hours.is_zero()
    }

    pub fn display_total(&self) -> String {
        format_amount(self.total_cost)
    }
}

/// Two-decimal currency rendering. Amounts are only ever rounded for display.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use std::str::FromStr;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_two_hours_at_sixty() {
        let rate = Decimal::from_str("60.00").unwrap();
        let cost = compute_cost(rate, at(19, 0), at(21, 0));
        assert_eq!(cost, Decimal::from(120));

        let quote = Quote::new(rate, at(19, 0), at(21, 0));
        assert_eq!(quote.duration_hours, Decimal::from(2));
        assert_eq!(quote.display_total(), "120.00");
    }

    #[test]
    fn test_cost_is_linear_in_duration() {
        let rate = Decimal::from_str("37.25").unwrap();
        let start = at(8, 0);
        let one = compute_cost(rate, start, start + Duration::hours(1));
        let two = compute_cost(rate, start, start + Duration::hours(2));
        assert_eq!(two, one * Decimal::from(2));
    }

    #[test]
    fn test_fractional_hours() {
        let rate = Decimal::from(40);
        assert_eq!(compute_cost(rate, at(10, 0), at(11, 30)), Decimal::from(60));
        let quote = Quote::new(rate, at(10, 0), at(10, 20));
        assert_eq!(quote.display_total(), "13.33");
        // Full precision is kept in the stored value.
        assert_ne!(quote.total_cost, Decimal::from_str("13.33").unwrap());
    }

    #[test]
    fn test_zero_rate_and_invalid_interval() {
        assert_eq!(compute_cost(Decimal::ZERO, at(9, 0), at(12, 0)), Decimal::ZERO);
        assert_eq!(compute_cost(Decimal::from(60), at(12, 0), at(9, 0)), Decimal::ZERO);
        assert!(Quote::new(Decimal::from(60), at(9, 0), at(9, 0)).is_empty());
    }

    #[test]
    fn test_huge_rate_saturates() {
        let cost = compute_cost(Decimal::MAX, at(6, 0), at(23, 0));
        assert_eq!(cost, Decimal::MAX);
        assert!(!Quote::new(Decimal::MAX, at(6, 0), at(23, 0)).display_total().is_empty());
    }

    #[test]
    fn test_quote_serializes_numbers() {
        let quote = Quote::new(Decimal::from(60), at(19, 0), at(21, 0));
        let value = serde_json::to_value(quote).unwrap();
        assert_eq!(value["total_cost"], serde_json::json!(120.0));
        assert_eq!(value["duration_hours"], serde_json::json!(2.0));
    }
}
