//! Attendance and payroll engine for warehouse timesheets.
//!
//! This crate provides the attendance mark state machine, the payroll
//! aggregation engine built on top of it, and the storage and extended-input
//! contracts that an interactive front end plugs into.

#![warn(missing_docs)]

pub mod attendance;
pub mod config;
pub mod error;
pub mod models;
pub mod payroll;
pub mod roster;
pub mod storage;
