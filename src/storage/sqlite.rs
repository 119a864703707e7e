//! SQLite-backed storage gateway.

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{CompensationMode, DayMark, Employee, EmployeeId, MarkState};

use super::StorageGateway;

// Monetary columns are stored as text so fixed-point values survive the
// round trip; REAL would reintroduce binary rounding.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    warehouse TEXT NOT NULL,
    shift_name TEXT NOT NULL,
    daily_rate TEXT NOT NULL,
    hourly_rate TEXT NOT NULL,
    uses_hourly_rate INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS day_marks (
    employee_id INTEGER NOT NULL,
    mark_date TEXT NOT NULL,
    state INTEGER NOT NULL,
    is_worked INTEGER NOT NULL,
    extra_amount TEXT NOT NULL,
    worked_hours REAL,
    PRIMARY KEY (employee_id, mark_date),
    FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE
);
";

const STATE_WORKED: i64 = 1;
const STATE_ABSENT: i64 = 2;
const STATE_CUSTOM_DAY: i64 = 3;
const STATE_CUSTOM_HOURS: i64 = 4;

/// Storage gateway backed by an embedded SQLite database.
///
/// # Example
///
/// ```no_run
/// use timesheet_engine::storage::{SqliteStore, StorageGateway};
///
/// let store = SqliteStore::open("timesheet.db").unwrap();
/// let employees = store.load_all().unwrap();
/// ```
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if needed) a database file and its parent directory.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| EngineError::Storage {
                    message: format!("cannot create {}: {err}", parent.display()),
                })?;
            }
        }
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens a transient in-memory database.
    pub fn open_in_memory() -> EngineResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> EngineResult<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl StorageGateway for SqliteStore {
    fn load_all(&self) -> EngineResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, warehouse, shift_name, daily_rate, hourly_rate, uses_hourly_rate
             FROM employees ORDER BY name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, i64>(6)?,
            ))
        })?;

        let mut employees = Vec::new();
        for row in rows {
            let (id, name, warehouse, shift_name, daily_rate, hourly_rate, hourly_flag) = row?;
            let mode = if hourly_flag == 1 {
                CompensationMode::Hourly
            } else {
                CompensationMode::Daily
            };
            let mut employee = Employee::new(
                &name,
                &warehouse,
                &shift_name,
                parse_stored_decimal(&daily_rate)?,
                parse_stored_decimal(&hourly_rate)?,
                mode,
            )?;
            employee.id = id;
            employees.push(employee);
        }

        let mut stmt = self.conn.prepare(
            "SELECT employee_id, mark_date, state, is_worked, extra_amount, worked_hours
             FROM day_marks",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, NaiveDate>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<f64>>(5)?,
            ))
        })?;

        for row in rows {
            let (employee_id, date, code, worked, extra, hours) = row?;
            // Marks for unknown employees should not exist under the
            // cascade; skip rather than fail the whole load if they do.
            let Some(employee) = employees.iter_mut().find(|e| e.id == employee_id) else {
                debug!(employee_id, %date, "orphan mark skipped during load");
                continue;
            };
            let state = decode_state(code, worked == 1, parse_stored_decimal(&extra)?, hours)?;
            employee.set_mark(DayMark::new(date, state));
        }

        Ok(employees)
    }

    fn save_employee(&self, employee: &Employee) -> EngineResult<EmployeeId> {
        if employee.is_persisted() {
            self.conn.execute(
                "UPDATE employees
                 SET name = ?1, warehouse = ?2, shift_name = ?3,
                     daily_rate = ?4, hourly_rate = ?5, uses_hourly_rate = ?6
                 WHERE id = ?7",
                params![
                    employee.name,
                    employee.warehouse,
                    employee.shift_name,
                    employee.daily_rate.to_string(),
                    employee.hourly_rate.to_string(),
                    employee.mode.is_hourly() as i64,
                    employee.id,
                ],
            )?;
            debug!(id = employee.id, name = %employee.name, "employee updated");
            Ok(employee.id)
        } else {
            self.conn.execute(
                "INSERT INTO employees
                     (name, warehouse, shift_name, daily_rate, hourly_rate, uses_hourly_rate)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    employee.name,
                    employee.warehouse,
                    employee.shift_name,
                    employee.daily_rate.to_string(),
                    employee.hourly_rate.to_string(),
                    employee.mode.is_hourly() as i64,
                ],
            )?;
            let id = self.conn.last_insert_rowid();
            debug!(id, name = %employee.name, "employee inserted");
            Ok(id)
        }
    }

    fn delete_employee(&self, id: EmployeeId) -> EngineResult<()> {
        // The single statement cascades mark deletion via the foreign key.
        self.conn
            .execute("DELETE FROM employees WHERE id = ?1", params![id])?;
        debug!(id, "employee deleted");
        Ok(())
    }

    fn save_mark(&self, employee_id: EmployeeId, mark: &DayMark) -> EngineResult<()> {
        let (code, worked, extra, hours) = encode_state(&mark.state)?;
        self.conn.execute(
            "INSERT INTO day_marks
                 (employee_id, mark_date, state, is_worked, extra_amount, worked_hours)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(employee_id, mark_date)
             DO UPDATE SET
                 state = excluded.state,
                 is_worked = excluded.is_worked,
                 extra_amount = excluded.extra_amount,
                 worked_hours = excluded.worked_hours",
            params![employee_id, mark.date, code, worked as i64, extra, hours],
        )?;
        Ok(())
    }

    fn delete_mark(&self, employee_id: EmployeeId, date: NaiveDate) -> EngineResult<()> {
        self.conn.execute(
            "DELETE FROM day_marks WHERE employee_id = ?1 AND mark_date = ?2",
            params![employee_id, date],
        )?;
        Ok(())
    }
}

fn parse_stored_decimal(text: &str) -> EngineResult<Decimal> {
    Decimal::from_str(text).map_err(|_| EngineError::Storage {
        message: format!("stored value '{text}' is not a decimal"),
    })
}

fn encode_state(state: &MarkState) -> EngineResult<(i64, bool, String, Option<f64>)> {
    match state {
        MarkState::Empty => Err(EngineError::Storage {
            message: "empty marks are never persisted".to_string(),
        }),
        MarkState::Worked => Ok((STATE_WORKED, true, Decimal::ZERO.to_string(), None)),
        MarkState::Absent => Ok((STATE_ABSENT, false, Decimal::ZERO.to_string(), None)),
        MarkState::CustomWorkedOrAbsent { worked, extra } => {
            Ok((STATE_CUSTOM_DAY, *worked, extra.to_string(), None))
        }
        MarkState::CustomHours {
            worked,
            hours,
            extra,
        } => Ok((STATE_CUSTOM_HOURS, *worked, extra.to_string(), Some(*hours))),
    }
}

fn decode_state(
    code: i64,
    worked: bool,
    extra: Decimal,
    hours: Option<f64>,
) -> EngineResult<MarkState> {
    match code {
        STATE_WORKED => Ok(MarkState::Worked),
        STATE_ABSENT => Ok(MarkState::Absent),
        STATE_CUSTOM_DAY => Ok(MarkState::CustomWorkedOrAbsent { worked, extra }),
        STATE_CUSTOM_HOURS => {
            let hours = hours.ok_or_else(|| EngineError::Storage {
                message: "custom-hours mark stored without an hour count".to_string(),
            })?;
            Ok(MarkState::CustomHours {
                worked,
                hours,
                extra,
            })
        }
        other => Err(EngineError::Storage {
            message: format!("unknown mark state code: {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    fn sample_employee(name: &str) -> Employee {
        Employee::new(
            name,
            "Central",
            "Day",
            dec("2000"),
            dec("300.50"),
            CompensationMode::Daily,
        )
        .unwrap()
    }

    #[test]
    fn test_insert_assigns_identity() {
        let store = store();
        let id = store.save_employee(&sample_employee("Ivanov")).unwrap();
        assert!(id > 0);
    }

    #[test]
    fn test_load_all_round_trips_employee_fields() {
        let store = store();
        let mut employee = sample_employee("Ivanov");
        employee.id = store.save_employee(&employee).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, employee.id);
        assert_eq!(loaded[0].name, "Ivanov");
        assert_eq!(loaded[0].warehouse, "Central");
        assert_eq!(loaded[0].daily_rate, dec("2000"));
        // Decimals persist as text, so scale survives exactly.
        assert_eq!(loaded[0].hourly_rate, dec("300.50"));
        assert_eq!(loaded[0].mode, CompensationMode::Daily);
    }

    #[test]
    fn test_load_all_orders_by_name() {
        let store = store();
        for name in ["Sidorov", "Antonov", "Ivanov"] {
            store.save_employee(&sample_employee(name)).unwrap();
        }

        let names: Vec<String> = store
            .load_all()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Antonov", "Ivanov", "Sidorov"]);
    }

    #[test]
    fn test_update_overwrites_all_mutable_fields() {
        let store = store();
        let mut employee = sample_employee("Ivanov");
        employee.id = store.save_employee(&employee).unwrap();

        employee.name = "Ivanova".to_string();
        employee.warehouse = "North".to_string();
        employee.shift_name = "Night".to_string();
        employee.daily_rate = dec("2500");
        employee.hourly_rate = dec("310");
        employee.mode = CompensationMode::Hourly;
        let id = store.save_employee(&employee).unwrap();
        assert_eq!(id, employee.id);

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Ivanova");
        assert_eq!(loaded[0].warehouse, "North");
        assert_eq!(loaded[0].shift_name, "Night");
        assert_eq!(loaded[0].daily_rate, dec("2500"));
        assert_eq!(loaded[0].mode, CompensationMode::Hourly);
    }

    #[test]
    fn test_marks_round_trip_every_persistable_state() {
        let store = store();
        let mut employee = sample_employee("Ivanov");
        employee.id = store.save_employee(&employee).unwrap();

        let marks = [
            DayMark::new(date("2026-08-03"), MarkState::Worked),
            DayMark::new(date("2026-08-04"), MarkState::Absent),
            DayMark::new(
                date("2026-08-05"),
                MarkState::CustomWorkedOrAbsent {
                    worked: false,
                    extra: dec("-150.25"),
                },
            ),
            DayMark::new(
                date("2026-08-06"),
                MarkState::CustomHours {
                    worked: true,
                    hours: 10.5,
                    extra: dec("200"),
                },
            ),
        ];
        for mark in &marks {
            store.save_mark(employee.id, mark).unwrap();
        }

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded[0].mark_count(), 4);
        for mark in &marks {
            assert_eq!(loaded[0].mark_state(mark.date), mark.state);
        }
    }

    #[test]
    fn test_save_mark_upserts_on_same_date() {
        let store = store();
        let mut employee = sample_employee("Ivanov");
        employee.id = store.save_employee(&employee).unwrap();
        let day = date("2026-08-03");

        store
            .save_mark(employee.id, &DayMark::new(day, MarkState::Worked))
            .unwrap();
        store
            .save_mark(employee.id, &DayMark::new(day, MarkState::Absent))
            .unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded[0].mark_count(), 1);
        assert_eq!(loaded[0].mark_state(day), MarkState::Absent);
    }

    #[test]
    fn test_save_mark_refuses_empty_state() {
        let store = store();
        let mut employee = sample_employee("Ivanov");
        employee.id = store.save_employee(&employee).unwrap();

        let result = store.save_mark(
            employee.id,
            &DayMark::new(date("2026-08-03"), MarkState::Empty),
        );
        assert!(matches!(result, Err(EngineError::Storage { .. })));
    }

    #[test]
    fn test_delete_mark_removes_only_that_date() {
        let store = store();
        let mut employee = sample_employee("Ivanov");
        employee.id = store.save_employee(&employee).unwrap();
        store
            .save_mark(
                employee.id,
                &DayMark::new(date("2026-08-03"), MarkState::Worked),
            )
            .unwrap();
        store
            .save_mark(
                employee.id,
                &DayMark::new(date("2026-08-04"), MarkState::Worked),
            )
            .unwrap();

        store.delete_mark(employee.id, date("2026-08-03")).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded[0].mark_count(), 1);
        assert_eq!(loaded[0].mark_state(date("2026-08-03")), MarkState::Empty);
    }

    #[test]
    fn test_delete_employee_cascades_marks() {
        let store = store();
        let mut keep = sample_employee("Keep");
        keep.id = store.save_employee(&keep).unwrap();
        let mut gone = sample_employee("Gone");
        gone.id = store.save_employee(&gone).unwrap();

        for id in [keep.id, gone.id] {
            store
                .save_mark(id, &DayMark::new(date("2026-08-03"), MarkState::Worked))
                .unwrap();
        }

        store.delete_employee(gone.id).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Keep");
        assert_eq!(loaded[0].mark_count(), 1);

        let orphan_count: i64 = store
            .conn
            .query_row(
                "SELECT COUNT(*) FROM day_marks WHERE employee_id = ?1",
                params![gone.id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(orphan_count, 0);
    }

    #[test]
    fn test_save_mark_for_unknown_employee_fails() {
        let store = store();
        let result = store.save_mark(999, &DayMark::new(date("2026-08-03"), MarkState::Worked));
        assert!(matches!(result, Err(EngineError::Storage { .. })));
    }

    #[test]
    fn test_decode_rejects_unknown_state_code() {
        let result = decode_state(9, true, Decimal::ZERO, None);
        assert!(matches!(result, Err(EngineError::Storage { .. })));
    }

    #[test]
    fn test_decode_rejects_custom_hours_without_hours() {
        let result = decode_state(STATE_CUSTOM_HOURS, true, Decimal::ZERO, None);
        assert!(matches!(result, Err(EngineError::Storage { .. })));
    }
}
