//! Salary summary model.
//!
//! This module contains the [`SalarySummary`] type that captures the complete
//! output of folding one employee's marks over a period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The complete result of a salary calculation for one employee and period.
///
/// A summary is produced whole or not at all; callers never observe a
/// partially updated result.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::SalarySummary;
/// use rust_decimal::Decimal;
///
/// let summary = SalarySummary {
///     shifts_worked: 2,
///     total_hours: 0.0,
///     base_amount: Decimal::new(4000, 0),
///     extras_amount: Decimal::new(500, 0),
///     grand_total: Decimal::new(4500, 0),
/// };
/// assert_eq!(summary.grand_total, summary.base_amount + summary.extras_amount);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalarySummary {
    /// Number of marks in the period with the worked flag set.
    pub shifts_worked: u32,
    /// Hours accumulated over worked marks in hourly mode; zero in daily
    /// mode. Advisory only, never fed back into monetary math.
    pub total_hours: f64,
    /// Pay derived purely from rates, excluding extras.
    pub base_amount: Decimal,
    /// Sum of bonus/deduction amounts over all marks in the period,
    /// regardless of worked status.
    pub extras_amount: Decimal,
    /// `base_amount + extras_amount`.
    pub grand_total: Decimal,
}
