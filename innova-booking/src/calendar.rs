use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const WEEKS: usize = 6;
pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "date", rename_all = "snake_case")]
pub enum DayCell {
    Date(NaiveDate),
    Empty,
}

impl DayCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DayCell::Date(date) => Some(*date),
            DayCell::Empty => None,
        }
    }
}

/// Month view grid: 6 Monday-first weeks of 7 cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthMatrix {
    pub year: i32,
    pub month_index: u32,
    pub rows: [[DayCell; DAYS_PER_WEEK]; WEEKS],
}

impl MonthMatrix {
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.rows.iter().flatten()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells().filter_map(DayCell::date)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.dates().next()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.dates().last()
    }
}

/// Builds the 42-cell grid for `month_index` (0 = January) of `year`.
pub fn build_month_matrix(year: i32, month_index: u32) -> Result<MonthMatrix, CalendarError> {
    if month_index > 11 {
        return Err(CalendarError::InvalidMonth(month_index));
    }
    let first = NaiveDate::from_ymd_opt(year, month_index + 1, 1)
        .ok_or(CalendarError::OutOfRange { year, month_index })?;
    let days = days_in_month(year, month_index + 1).ok_or(CalendarError::OutOfRange { year, month_index })?;

    // Sunday = 0, rotated so the week starts on Monday.
    let weekday_of_first = first.weekday().num_days_from_sunday() as usize;
    let leading = (weekday_of_first + 6) % 7;

    let mut rows = [[DayCell::Empty; DAYS_PER_WEEK]; WEEKS];
    for (offset, date) in first.iter_days().take(days as usize).enumerate() {
        let pos = leading + offset;
        rows[pos / DAYS_PER_WEEK][pos % DAYS_PER_WEEK] = DayCell::Date(date);
    }

    Ok(MonthMatrix {
        year,
        month_index,
        rows,
    })
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    first_of_next.pred_opt().map(|d| d.day())
}

/// Month navigation state for the "previous / next month" controls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    pub month_index: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month_index: u32) -> Result<Self, CalendarError> {
        if month_index > 11 {
            return Err(CalendarError::InvalidMonth(month_index));
        }
        Ok(Self { year, month_index })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month_index: date.month0(),
        }
    }

    pub fn next(self) -> Self {
        if self.month_index == 11 {
            Self { year: self.year + 1, month_index: 0 }
        } else {
            Self { month_index: self.month_index + 1, ..self }
        }
    }

    pub fn previous(self) -> Self {
        if self.month_index == 0 {
            Self { year: self.year - 1, month_index: 11 }
        } else {
            Self { month_index: self.month_index - 1, ..self }
        }
    }

    pub fn matrix(&self) -> Result<MonthMatrix, CalendarError> {
        build_month_matrix(self.year, self.month_index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Month index must be between 0 and 11, got {0}")]
    InvalidMonth(u32),

    #[error("Date out of range: year {year}, month index {month_index}")]
    OutOfRange {
        year: i32,
        month_index: u32,
    },
}
