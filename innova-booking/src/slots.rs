use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FIRST_HOUR: u32 = 6;
pub const DEFAULT_LAST_HOUR: u32 = 23;

/// On-the-hour times offered by the start/end selectors, `first_hour..=last_hour`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotMenu {
    pub first_hour: u32,
    pub last_hour: u32,
}

impl Default for SlotMenu {
    fn default() -> Self {
        Self {
            first_hour: DEFAULT_FIRST_HOUR,
            last_hour: DEFAULT_LAST_HOUR,
        }
    }
}

impl SlotMenu {
    pub fn new(first_hour: u32, last_hour: u32) -> Result<Self, SlotError> {
        if last_hour > 23 || first_hour >= last_hour {
            return Err(SlotError::InvalidBounds { first_hour, last_hour });
        }
        Ok(Self { first_hour, last_hour })
    }

    pub fn all(&self) -> Vec<NaiveTime> {
        (self.first_hour..=self.last_hour)
            .filter_map(|h| NaiveTime::from_hms_opt(h, 0, 0))
            .collect()
    }

    /// Start choices: every slot except the last, which leaves no room to end.
    pub fn start_options(&self) -> Vec<NaiveTime> {
        (self.first_hour..self.last_hour)
            .filter_map(|h| NaiveTime::from_hms_opt(h, 0, 0))
            .collect()
    }

    /// End choices for a given start: the slots strictly after it.
    pub fn end_options(&self, start: NaiveTime) -> Vec<NaiveTime> {
        self.all().into_iter().filter(|t| *t > start).collect()
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        time.minute() == 0
            && time.second() == 0
            && time.nanosecond() == 0
            && (self.first_hour..=self.last_hour).contains(&time.hour())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("Invalid slot bounds: first hour {first_hour}, last hour {last_hour}")]
    InvalidBounds { first_hour: u32, last_hour: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_default_menu() {
        let menu = SlotMenu::default();
        assert_eq!(menu.all().len(), 18);
        assert_eq!(menu.start_options().first(), Some(&t(6)));
        assert_eq!(menu.start_options().last(), Some(&t(22)));
        assert_eq!(menu.end_options(t(21)), vec![t(22), t(23)]);
    }

    #[test]
    fn test_contains_only_whole_hours_in_range() {
        let menu = SlotMenu::default();
        assert!(menu.contains(t(6)));
        assert!(menu.contains(t(23)));
        assert!(!menu.contains(t(5)));
        assert!(!menu.contains(NaiveTime::from_hms_opt(9, 30, 0).unwrap()));
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(SlotMenu::new(10, 10).is_err());
        assert!(SlotMenu::new(6, 24).is_err());
        assert!(SlotMenu::new(8, 20).is_ok());
    }
}
