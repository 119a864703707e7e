//! Core data models for the timesheet engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod mark;
mod period;
mod salary;

pub use employee::{CompensationMode, Employee, EmployeeId};
pub use mark::{DayMark, MarkState};
pub use period::Period;
pub use salary::SalarySummary;
