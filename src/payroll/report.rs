//! Grouped plain-text payroll report.

use std::collections::BTreeMap;
use std::fmt::Write;

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{Employee, Period};

use super::salary::calculate_salary;

/// Builds the payroll report for a period as a plain text block.
///
/// Employees are grouped by warehouse, then by shift label, both ascending;
/// within a group they are sorted by name. Each employee line shows the
/// name, the compensation-mode label (with the hour total in hourly mode),
/// the shift count, and the grand total, numbers formatted to at most two
/// decimal places. The header carries the period in day.month.year form.
///
/// # Errors
///
/// Propagates any per-employee calculation failure; no partial report text
/// is returned.
pub fn build_report(
    employees: &[Employee],
    period: &Period,
    default_hours: f64,
) -> EngineResult<String> {
    let mut grouped: BTreeMap<&str, BTreeMap<&str, Vec<&Employee>>> = BTreeMap::new();
    for employee in employees {
        grouped
            .entry(employee.warehouse.as_str())
            .or_default()
            .entry(employee.shift_name.as_str())
            .or_default()
            .push(employee);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Report for period: {period}");
    let _ = writeln!(out, "{}", "=".repeat(60));

    for (warehouse, shifts) in grouped {
        let _ = writeln!(out, "\nWarehouse: {warehouse}");

        for (shift_name, mut members) in shifts {
            let _ = writeln!(out, "  Shift: {shift_name}");
            members.sort_by(|a, b| a.name.cmp(&b.name));

            for employee in members {
                let summary = calculate_salary(employee, period, default_hours)?;
                let mode = if employee.mode.is_hourly() {
                    format!("hourly, hrs: {}", format_hours(summary.total_hours))
                } else {
                    "daily".to_string()
                };
                let _ = writeln!(
                    out,
                    "    • {:<16} | {:<20} | shifts: {:>2} | total: {:>10}",
                    employee.name,
                    mode,
                    summary.shifts_worked,
                    format_amount(summary.grand_total),
                );
            }
        }
    }

    Ok(out)
}

/// Formats a monetary value with at most two decimal places.
fn format_amount(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

/// Formats an hour total with at most two decimal places.
fn format_hours(hours: f64) -> String {
    let rounded = (hours * 100.0).round() / 100.0;
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompensationMode, DayMark, MarkState};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn employee(
        name: &str,
        warehouse: &str,
        shift: &str,
        mode: CompensationMode,
    ) -> Employee {
        Employee::new(name, warehouse, shift, dec("2000"), dec("300"), mode).unwrap()
    }

    #[test]
    fn test_header_carries_period_in_day_month_year_form() {
        let period = Period::month(2026, 8).unwrap();
        let report = build_report(&[], &period, 8.0).unwrap();

        assert!(report.starts_with("Report for period: 01.08.2026 — 31.08.2026\n"));
        assert!(report.contains(&"=".repeat(60)));
    }

    #[test]
    fn test_groups_are_sorted_warehouse_then_shift_then_name() {
        let employees = vec![
            employee("Zaytsev", "North", "Night", CompensationMode::Daily),
            employee("Ivanov", "Central", "Night", CompensationMode::Daily),
            employee("Petrov", "Central", "Day", CompensationMode::Daily),
            employee("Antonov", "Central", "Night", CompensationMode::Daily),
        ];
        let period = Period::month(2026, 8).unwrap();
        let report = build_report(&employees, &period, 8.0).unwrap();

        let central = report.find("Warehouse: Central").unwrap();
        let north = report.find("Warehouse: North").unwrap();
        assert!(central < north);

        let day = report.find("Shift: Day").unwrap();
        let night = report.find("Shift: Night").unwrap();
        assert!(central < day && day < night && night < north);

        let antonov = report.find("Antonov").unwrap();
        let ivanov = report.find("Ivanov").unwrap();
        assert!(night < antonov && antonov < ivanov);
    }

    #[test]
    fn test_daily_employee_line_shows_shift_count_and_total() {
        let mut worker = employee("Ivanov", "Central", "Day", CompensationMode::Daily);
        worker.set_mark(DayMark::new(date("2026-08-03"), MarkState::Worked));
        worker.set_mark(DayMark::new(date("2026-08-04"), MarkState::Worked));
        worker.set_mark(DayMark::new(
            date("2026-08-05"),
            MarkState::CustomWorkedOrAbsent {
                worked: false,
                extra: dec("500"),
            },
        ));

        let period = Period::month(2026, 8).unwrap();
        let report = build_report(&[worker], &period, 8.0).unwrap();

        assert!(report.contains("Ivanov"));
        assert!(report.contains("daily"));
        assert!(report.contains("shifts:  2"));
        assert!(report.contains("4500"));
    }

    #[test]
    fn test_hourly_employee_line_shows_hour_total() {
        let mut worker = employee("Sidorov", "Central", "Day", CompensationMode::Hourly);
        worker.set_mark(DayMark::new(
            date("2026-08-03"),
            MarkState::CustomHours {
                worked: true,
                hours: 10.0,
                extra: dec("0"),
            },
        ));
        worker.set_mark(DayMark::new(date("2026-08-04"), MarkState::Worked));

        let period = Period::month(2026, 8).unwrap();
        let report = build_report(&[worker], &period, 8.0).unwrap();

        assert!(report.contains("hourly, hrs: 18"));
        assert!(report.contains("5400"));
    }

    #[test]
    fn test_amounts_are_limited_to_two_decimals() {
        assert_eq!(format_amount(dec("4500.006")), "4500.01");
        assert_eq!(format_amount(dec("4500.00")), "4500");
        assert_eq!(format_amount(dec("0.1")), "0.1");
        assert_eq!(format_hours(7.333333), "7.33");
        assert_eq!(format_hours(18.0), "18");
    }

    #[test]
    fn test_employee_with_no_marks_still_listed() {
        let worker = employee("Ivanov", "Central", "Day", CompensationMode::Daily);
        let period = Period::month(2026, 8).unwrap();
        let report = build_report(&[worker], &period, 8.0).unwrap();

        assert!(report.contains("Ivanov"));
        assert!(report.contains("shifts:  0"));
    }
}
