use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open interval `[start, end)` with `end > start`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, TimeRangeError> {
        if end <= start {
            return Err(TimeRangeError::EndNotAfterStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds a range from times on a single day.
    pub fn on_day(day: NaiveDate, start: NaiveTime, end: NaiveTime) -> Result<Self, TimeRangeError> {
        Self::new(day.and_time(start), day.and_time(end))
    }

    // Backend records are taken as-is.
    pub(crate) fn unchecked(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// `a.start < b.end && b.start < a.end`. Touching ranges do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.date() == self.end.date() {
            write!(
                f,
                "{} {}-{}",
                self.start.format("%Y-%m-%d"),
                self.start.format("%H:%M"),
                self.end.format("%H:%M")
            )
        } else {
            write!(
                f,
                "{} - {}",
                self.start.format("%Y-%m-%d %H:%M"),
                self.end.format("%Y-%m-%d %H:%M")
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeRangeError {
    #[error("End time {end} must be after start time {start}")]
    EndNotAfterStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::at;

    fn range(sh: u32, sm: u32, eh: u32, em: u32) -> TimeRange {
        TimeRange::new(at(15, sh, sm), at(15, eh, em)).unwrap()
    }

    #[test]
    fn test_rejects_empty_and_inverted() {
        assert!(TimeRange::new(at(15, 9, 0), at(15, 9, 0)).is_err());
        assert!(TimeRange::new(at(15, 10, 0), at(15, 9, 0)).is_err());
    }

    #[test]
    fn test_adjacent_ranges_do_not_overlap() {
        let a = range(9, 0, 10, 0);
        let b = range(10, 0, 11, 0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_one_minute_overlap() {
        let a = range(9, 0, 10, 1);
        let b = range(10, 0, 11, 0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let ranges = [
            range(6, 0, 8, 0),
            range(7, 0, 9, 0),
            range(8, 0, 9, 0),
            range(9, 0, 12, 0),
            range(10, 30, 11, 0),
            range(9, 0, 12, 0),
        ];
        for a in &ranges {
            for b in &ranges {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{} vs {}", a, b);
            }
        }
        // Equal intervals always overlap.
        assert!(ranges[3].overlaps(&ranges[5]));
    }

    #[test]
    fn test_display() {
        assert_eq!(range(9, 0, 11, 0).to_string(), "2025-10-15 09:00-11:00");
    }
}
