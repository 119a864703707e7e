//! Attendance mark model.
//!
//! This module defines the [`MarkState`] tagged variant and the [`DayMark`]
//! record that associates a state with one calendar date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The attendance state of a single day cell.
///
/// States form a cycle in the order they are declared: `Empty` → `Worked` →
/// `Absent` → `CustomWorkedOrAbsent` → `CustomHours` → `Empty`. Each variant
/// carries exactly the fields that are meaningful in that state, so an hour
/// count can only exist on a `CustomHours` mark and a bonus or deduction can
/// only exist on one of the custom marks.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::MarkState;
/// use rust_decimal::Decimal;
///
/// let mark = MarkState::CustomWorkedOrAbsent {
///     worked: false,
///     extra: Decimal::new(50000, 2), // 500.00 deduction day
/// };
/// assert!(!mark.is_worked());
/// assert_eq!(mark.extra(), Decimal::new(50000, 2));
/// assert_eq!(mark.hours(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum MarkState {
    /// No record for the day. Never persisted; the absence of a stored mark
    /// *is* this state.
    Empty,
    /// A full default shift was worked.
    Worked,
    /// No shift, no pay.
    Absent,
    /// Worked or absent with a manually entered bonus or deduction.
    CustomWorkedOrAbsent {
        /// Whether the day counts as a worked shift.
        worked: bool,
        /// Manually entered bonus or deduction, any sign.
        extra: Decimal,
    },
    /// An explicit hour count for the day.
    CustomHours {
        /// Whether the day counts as a worked shift.
        worked: bool,
        /// The hour count for the day.
        hours: f64,
        /// Manually entered bonus or deduction, any sign.
        extra: Decimal,
    },
}

impl MarkState {
    /// Returns true if this is the `Empty` state.
    pub fn is_empty(&self) -> bool {
        matches!(self, MarkState::Empty)
    }

    /// Returns whether the day counts as a worked shift.
    ///
    /// `Worked` always counts; `Empty` and `Absent` never do; the custom
    /// states carry the flag collected from the user.
    pub fn is_worked(&self) -> bool {
        match self {
            MarkState::Empty | MarkState::Absent => false,
            MarkState::Worked => true,
            MarkState::CustomWorkedOrAbsent { worked, .. }
            | MarkState::CustomHours { worked, .. } => *worked,
        }
    }

    /// Returns the bonus or deduction attached to the day.
    ///
    /// Zero for every state that does not carry a collected amount.
    pub fn extra(&self) -> Decimal {
        match self {
            MarkState::Empty | MarkState::Worked | MarkState::Absent => Decimal::ZERO,
            MarkState::CustomWorkedOrAbsent { extra, .. }
            | MarkState::CustomHours { extra, .. } => *extra,
        }
    }

    /// Returns the explicit hour count, present only on `CustomHours`.
    pub fn hours(&self) -> Option<f64> {
        match self {
            MarkState::CustomHours { hours, .. } => Some(*hours),
            _ => None,
        }
    }
}

/// The attendance record for one employee on one calendar date.
///
/// A `DayMark` exists only for non-empty states: reading an unset date yields
/// a transient [`MarkState::Empty`] without materializing a record, and a
/// transition back to `Empty` removes the record from the roster and from
/// storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMark {
    /// The calendar date the mark applies to.
    pub date: NaiveDate,
    /// The attendance state and its collected fields.
    pub state: MarkState,
}

impl DayMark {
    /// Creates a mark for the given date and state.
    pub fn new(date: NaiveDate, state: MarkState) -> Self {
        Self { date, state }
    }

    /// Returns whether the day counts as a worked shift.
    pub fn is_worked(&self) -> bool {
        self.state.is_worked()
    }

    /// Returns the bonus or deduction attached to the day.
    pub fn extra(&self) -> Decimal {
        self.state.extra()
    }

    /// Returns the explicit hour count, if the state carries one.
    pub fn hours(&self) -> Option<f64> {
        self.state.hours()
    }
}
