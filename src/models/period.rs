//! Inclusive date ranges for salary and report computations.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive date range used to filter marks.
///
/// Both the single-month convenience form and the arbitrary from/to form
/// reduce to the same range filter.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let period = Period::month(2026, 8).unwrap();
/// assert!(period.contains(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()));
/// assert!(period.contains(NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()));
/// assert!(!period.contains(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    /// Creates a period from two inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] if `to` precedes `from`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> EngineResult<Self> {
        if to < from {
            return Err(EngineError::InvalidPeriod { from, to });
        }
        Ok(Self {
            start: from,
            end: to,
        })
    }

    /// Creates the period spanning one calendar month.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Calculation`] if `month` does not name a
    /// calendar month.
    pub fn month(year: i32, month: u32) -> EngineResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            EngineError::Calculation {
                message: format!("invalid calendar month: {year}-{month:02}"),
            }
        })?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next_month
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| EngineError::Calculation {
                message: format!("invalid calendar month: {year}-{month:02}"),
            })?;
        Ok(Self { start, end })
    }

    /// The first date of the period (inclusive).
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The last date of the period (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Checks if a date falls within the period, inclusive of both bounds.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for Period {
    /// Formats the period in day.month.year form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} — {}",
            self.start.format("%d.%m.%Y"),
            self.end.format("%d.%m.%Y")
        )
    }
}
