//! Employee model and related types.
//!
//! This module defines the Employee struct and CompensationMode enum for
//! representing warehouse workers and their per-date attendance marks.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::mark::{DayMark, MarkState};
use super::period::Period;

/// Storage-assigned employee identity. Zero means not yet persisted.
pub type EmployeeId = i64;

/// How an employee's base pay is derived from worked shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationMode {
    /// A fixed amount per worked shift, hour counts ignored.
    Daily,
    /// Rate multiplied by the hours of each worked shift.
    Hourly,
}

impl CompensationMode {
    /// Returns true if base pay is derived from hours.
    pub fn is_hourly(self) -> bool {
        self == CompensationMode::Hourly
    }
}

/// A warehouse employee with their per-date attendance marks.
///
/// Invariants: the name is non-blank, both rates are non-negative, and there
/// is at most one mark per calendar date. Marks are kept date-ordered and
/// only exist for non-empty states; reading an unset date yields a transient
/// [`MarkState::Empty`] without creating anything.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::{CompensationMode, Employee};
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new(
///     "Ivanov",
///     "Main warehouse",
///     "Day",
///     Decimal::new(2000, 0),
///     Decimal::new(300, 0),
///     CompensationMode::Daily,
/// )
/// .unwrap();
/// assert_eq!(employee.id, 0);
/// assert!(!employee.is_persisted());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Storage-assigned identity, zero until first saved.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Work location label used for report grouping.
    pub warehouse: String,
    /// Shift label used for report grouping.
    pub shift_name: String,
    /// Fixed-point pay per worked shift in daily mode.
    pub daily_rate: Decimal,
    /// Fixed-point pay per hour in hourly mode.
    pub hourly_rate: Decimal,
    /// Whether base pay is derived from shifts or hours.
    pub mode: CompensationMode,
    #[serde(default)]
    marks: BTreeMap<NaiveDate, DayMark>,
}

impl Employee {
    /// Creates a new, not-yet-persisted employee.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidEmployee`] if the name is blank or
    /// either rate is negative.
    pub fn new(
        name: &str,
        warehouse: &str,
        shift_name: &str,
        daily_rate: Decimal,
        hourly_rate: Decimal,
        mode: CompensationMode,
    ) -> EngineResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "name".to_string(),
                message: "must not be blank".to_string(),
            });
        }
        if daily_rate < Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                field: "daily_rate".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if hourly_rate < Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                field: "hourly_rate".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        Ok(Self {
            id: 0,
            name: name.to_string(),
            warehouse: warehouse.trim().to_string(),
            shift_name: shift_name.trim().to_string(),
            daily_rate,
            hourly_rate,
            mode,
            marks: BTreeMap::new(),
        })
    }

    /// Returns true once storage has assigned an identity.
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    /// Returns the attendance state for a date without materializing a mark.
    pub fn mark_state(&self, date: NaiveDate) -> MarkState {
        self.marks
            .get(&date)
            .map(|mark| mark.state.clone())
            .unwrap_or(MarkState::Empty)
    }

    /// Inserts or replaces the mark for its date.
    ///
    /// Empty marks are dropped rather than stored: the absence of an entry
    /// is the empty state.
    pub fn set_mark(&mut self, mark: DayMark) {
        if mark.state.is_empty() {
            self.marks.remove(&mark.date);
        } else {
            self.marks.insert(mark.date, mark);
        }
    }

    /// Removes the mark for a date, returning it if one existed.
    pub fn clear_mark(&mut self, date: NaiveDate) -> Option<DayMark> {
        self.marks.remove(&date)
    }

    /// Iterates all marks in date order.
    pub fn marks(&self) -> impl Iterator<Item = &DayMark> {
        self.marks.values()
    }

    /// Iterates the marks whose date falls within the period, in date order.
    pub fn marks_in(&self, period: &Period) -> impl Iterator<Item = &DayMark> {
        self.marks
            .range(period.start()..=period.end())
            .map(|(_, mark)| mark)
    }

    /// Number of stored (non-empty) marks.
    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} · {} · {}", self.name, self.warehouse, self.shift_name)
    }
}
