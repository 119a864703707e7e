//! The roster: employees, their marks, and write-through persistence.
//!
//! [`Roster`] is the composition root an interactive front end drives: it
//! rejects actions on missing employees before the state machine runs,
//! applies transitions, and issues one storage call per mutation. In-memory
//! state is authoritative — a storage failure surfaces as an error without
//! reverting the in-memory change, so the caller can retry the persist.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::attendance::{ExtendedInput, advance};
use crate::error::{EngineError, EngineResult};
use crate::models::{DayMark, Employee, EmployeeId, MarkState, Period, SalarySummary};
use crate::payroll;
use crate::storage::StorageGateway;

/// The in-memory employee roster backed by a storage gateway.
pub struct Roster<S: StorageGateway> {
    store: S,
    employees: Vec<Employee>,
}

impl<S: StorageGateway> Roster<S> {
    /// Opens the roster by loading every employee from the gateway.
    pub fn open(store: S) -> EngineResult<Self> {
        let employees = store.load_all()?;
        info!(count = employees.len(), "roster loaded");
        Ok(Self { store, employees })
    }

    /// All employees, ordered by name ascending.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Looks up one employee by identity.
    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// The underlying storage gateway.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn index_of(&self, id: EmployeeId) -> EngineResult<usize> {
        self.employees
            .iter()
            .position(|e| e.id == id)
            .ok_or(EngineError::EmployeeNotFound { id })
    }

    /// Adds a new employee, letting storage assign its identity.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidEmployee`] if the employee already has
    /// an identity, or a storage error from the insert.
    pub fn add_employee(&mut self, mut employee: Employee) -> EngineResult<EmployeeId> {
        if employee.is_persisted() {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                message: "already persisted; use update_employee".to_string(),
            });
        }
        let id = self.store.save_employee(&employee)?;
        employee.id = id;
        info!(id, name = %employee.name, "employee added");
        self.employees.push(employee);
        self.employees.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(id)
    }

    /// Replaces an employee's profile fields (name, labels, rates, mode),
    /// keeping their marks, and persists the change.
    pub fn update_employee(&mut self, id: EmployeeId, profile: &Employee) -> EngineResult<()> {
        let index = self.index_of(id)?;
        {
            let employee = &mut self.employees[index];
            employee.name = profile.name.clone();
            employee.warehouse = profile.warehouse.clone();
            employee.shift_name = profile.shift_name.clone();
            employee.daily_rate = profile.daily_rate;
            employee.hourly_rate = profile.hourly_rate;
            employee.mode = profile.mode;
        }
        self.store
            .save_employee(&self.employees[index])
            .inspect_err(|err| warn!(id, %err, "employee update not persisted"))?;
        self.employees.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(())
    }

    /// Deletes an employee and, through the gateway's cascade, all their
    /// marks. Storage goes first so a reader never observes marks for a
    /// deleted employee.
    pub fn remove_employee(&mut self, id: EmployeeId) -> EngineResult<()> {
        self.index_of(id)?;
        self.store.delete_employee(id)?;
        self.employees.retain(|e| e.id != id);
        info!(id, "employee removed");
        Ok(())
    }

    /// Reads the attendance state for a date without materializing a mark.
    pub fn mark_state(&self, id: EmployeeId, date: NaiveDate) -> EngineResult<MarkState> {
        let index = self.index_of(id)?;
        Ok(self.employees[index].mark_state(date))
    }

    /// Advances an employee's mark for a date to the next state in the
    /// cycle, collecting extended input through `input` when the target
    /// state requires it, and writes the result through the gateway.
    ///
    /// Returns the resulting state. When the collaborator cancels, the mark
    /// is left exactly as it was and the unchanged state is returned.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmployeeNotFound`] before the state machine is
    /// consulted, or a storage error from the write-through (the in-memory
    /// mark keeps its new state in that case).
    pub fn advance_mark(
        &mut self,
        id: EmployeeId,
        date: NaiveDate,
        default_hours: f64,
        input: &mut dyn ExtendedInput,
    ) -> EngineResult<MarkState> {
        let index = self.index_of(id)?;
        let current = self.employees[index].mark_state(date);

        let Some(next) = advance(&current, default_hours, input) else {
            // Abandoned: no partial mutation.
            return Ok(current);
        };

        let employee = &mut self.employees[index];
        if next.is_empty() {
            employee.clear_mark(date);
            self.store
                .delete_mark(id, date)
                .inspect_err(|err| warn!(id, %date, %err, "mark delete not persisted"))?;
        } else {
            let mark = DayMark::new(date, next.clone());
            employee.set_mark(mark.clone());
            self.store
                .save_mark(id, &mark)
                .inspect_err(|err| warn!(id, %date, %err, "mark save not persisted"))?;
        }
        Ok(next)
    }

    /// Computes the salary summary for one employee over a period.
    pub fn salary(
        &self,
        id: EmployeeId,
        period: &Period,
        default_hours: f64,
    ) -> EngineResult<SalarySummary> {
        let index = self.index_of(id)?;
        payroll::calculate_salary(&self.employees[index], period, default_hours)
    }

    /// Builds the grouped payroll report over the whole roster.
    pub fn report(&self, period: &Period, default_hours: f64) -> EngineResult<String> {
        payroll::build_report(&self.employees, period, default_hours)
    }
}
