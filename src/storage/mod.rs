//! Storage gateway contract and its SQLite implementation.
//!
//! The engine core only depends on the [`StorageGateway`] trait; the
//! bundled [`SqliteStore`] is one implementation of it. Every gateway call
//! must be individually atomic: a failed call leaves persisted state
//! unchanged.

mod sqlite;

pub use sqlite::SqliteStore;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{DayMark, Employee, EmployeeId};

/// The persistence contract the engine core writes through.
pub trait StorageGateway {
    /// Loads every employee, ordered by name ascending, with marks
    /// populated.
    fn load_all(&self) -> EngineResult<Vec<Employee>>;

    /// Persists an employee. Inserts and returns a fresh identity when the
    /// employee has none yet; otherwise updates all mutable fields and
    /// returns the existing identity.
    fn save_employee(&self, employee: &Employee) -> EngineResult<EmployeeId>;

    /// Deletes an employee, cascading the deletion of all their marks.
    fn delete_employee(&self, id: EmployeeId) -> EngineResult<()>;

    /// Upserts a mark keyed by (employee, date), overwriting state, worked
    /// flag, extra amount, and hours.
    fn save_mark(&self, employee_id: EmployeeId, mark: &DayMark) -> EngineResult<()>;

    /// Deletes the mark for one employee and date, if present.
    fn delete_mark(&self, employee_id: EmployeeId, date: NaiveDate) -> EngineResult<()>;
}
