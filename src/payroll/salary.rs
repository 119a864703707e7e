//! Salary calculation for one employee over a period.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::error::{EngineError, EngineResult};
use crate::models::{CompensationMode, Employee, Period, SalarySummary};

/// Folds an employee's marks over a period into a salary summary.
///
/// Every mark in the period contributes its extra amount, worked or not.
/// Worked marks additionally count a shift and base pay: in hourly mode the
/// mark's own hour count (or `default_hours` when it carries none) times the
/// hourly rate, in daily mode the daily rate with any hour values ignored.
/// The grand total is base plus extras.
///
/// Monetary accumulation is exact fixed-point arithmetic; the hour total is
/// advisory floating point, converted to fixed point only at the multiply.
///
/// # Errors
///
/// Returns [`EngineError::Calculation`] if an hour value cannot be
/// represented as a fixed-point number. No partial summary is produced.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use timesheet_engine::models::{
///     CompensationMode, DayMark, Employee, MarkState, Period,
/// };
/// use timesheet_engine::payroll::calculate_salary;
/// use chrono::NaiveDate;
///
/// let mut employee = Employee::new(
///     "Ivanov",
///     "Main warehouse",
///     "Day",
///     Decimal::new(2000, 0),
///     Decimal::ZERO,
///     CompensationMode::Daily,
/// )
/// .unwrap();
/// employee.set_mark(DayMark::new(
///     NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
///     MarkState::Worked,
/// ));
///
/// let period = Period::month(2026, 8).unwrap();
/// let summary = calculate_salary(&employee, &period, 8.0).unwrap();
/// assert_eq!(summary.shifts_worked, 1);
/// assert_eq!(summary.base_amount, Decimal::new(2000, 0));
/// ```
pub fn calculate_salary(
    employee: &Employee,
    period: &Period,
    default_hours: f64,
) -> EngineResult<SalarySummary> {
    let mut shifts_worked = 0u32;
    let mut total_hours = 0.0f64;
    let mut base_amount = Decimal::ZERO;
    let mut extras_amount = Decimal::ZERO;

    for mark in employee.marks_in(period) {
        // Extras apply to every mark, including non-worked days.
        extras_amount += mark.extra();

        if !mark.is_worked() {
            continue;
        }

        shifts_worked += 1;
        match employee.mode {
            CompensationMode::Hourly => {
                let hours = mark.hours().unwrap_or(default_hours);
                total_hours += hours;
                base_amount += employee.hourly_rate * decimal_hours(hours)?;
            }
            CompensationMode::Daily => {
                base_amount += employee.daily_rate;
            }
        }
    }

    let grand_total = base_amount + extras_amount;
    Ok(SalarySummary {
        shifts_worked,
        total_hours,
        base_amount,
        extras_amount,
        grand_total,
    })
}

/// Converts an hour value to fixed point for the rate multiply.
fn decimal_hours(hours: f64) -> EngineResult<Decimal> {
    Decimal::from_f64(hours).ok_or_else(|| EngineError::Calculation {
        message: format!("hour value {hours} is not representable as a decimal"),
    })
}
