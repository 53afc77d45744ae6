use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::error::SalaryError;
use crate::model::employee::Employee;
use crate::model::salary_adjustment::{NewSalaryAdjustment, SalaryAdjustment};
use crate::salary::store::{AdjustmentFilter, AdjustmentPage, SalaryStore};

#[derive(Default)]
struct State {
    employees: BTreeMap<u64, Employee>,
    adjustments: BTreeMap<u64, SalaryAdjustment>,
    next_id: u64,
}

/// In-process [`SalaryStore`] for unit tests.
#[derive(Default)]
pub struct MemorySalaryStore {
    state: Mutex<State>,
}

impl MemorySalaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employee(self, id: u64, base_salary: Option<Decimal>) -> Self {
        self.put_employee(Employee {
            id,
            first_name: format!("Employee{id}"),
            last_name: "Test".to_string(),
            position: None,
            base_salary,
        });
        self
    }

    pub fn put_employee(&self, employee: Employee) {
        self.state
            .lock()
            .unwrap()
            .employees
            .insert(employee.id, employee);
    }

    pub fn adjustment_count(&self) -> usize {
        self.state.lock().unwrap().adjustments.len()
    }
}

#[async_trait]
impl SalaryStore for MemorySalaryStore {
    async fn find_employee(&self, employee_id: u64) -> Result<Option<Employee>, SalaryError> {
        Ok(self.state.lock().unwrap().employees.get(&employee_id).cloned())
    }

    async fn update_employee_salary(
        &self,
        employee_id: u64,
        base_salary: Decimal,
        position: Option<&str>,
    ) -> Result<bool, SalaryError> {
        let mut state = self.state.lock().unwrap();
        match state.employees.get_mut(&employee_id) {
            Some(employee) => {
                employee.base_salary = Some(base_salary);
                if let Some(position) = position {
                    employee.position = Some(position.to_string());
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn adjustments_between(
        &self,
        employee_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SalaryAdjustment>, SalaryError> {
        let state = self.state.lock().unwrap();
        let mut found: Vec<_> = state
            .adjustments
            .values()
            .filter(|a| a.employee_id == employee_id)
            .filter(|a| a.effective_date >= from && a.effective_date <= to)
            .cloned()
            .collect();
        found.sort_by_key(|a| (a.effective_date, a.id));
        Ok(found)
    }

    async fn insert_adjustment(
        &self,
        adjustment: &NewSalaryAdjustment,
    ) -> Result<SalaryAdjustment, SalaryError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let now = Utc::now().naive_utc();

        let stored = SalaryAdjustment {
            id: state.next_id,
            employee_id: adjustment.employee_id,
            admin_id: adjustment.admin_id,
            kind: adjustment.kind,
            category: adjustment.category,
            reason: adjustment.reason.clone(),
            amount: adjustment.amount,
            is_percentage: adjustment.is_percentage,
            percentage_value: adjustment.percentage_value,
            effective_date: adjustment.effective_date,
            created_at: now,
            updated_at: now,
        };
        state.adjustments.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_adjustment(&self, id: u64) -> Result<Option<SalaryAdjustment>, SalaryError> {
        Ok(self.state.lock().unwrap().adjustments.get(&id).cloned())
    }

    async fn list_adjustments(
        &self,
        filter: &AdjustmentFilter,
    ) -> Result<AdjustmentPage, SalaryError> {
        let state = self.state.lock().unwrap();
        let mut matching: Vec<_> = state
            .adjustments
            .values()
            .filter(|a| filter.employee_id.is_none_or(|id| a.employee_id == id))
            .filter(|a| filter.kind.is_none_or(|kind| a.kind == kind))
            .filter(|a| filter.from.is_none_or(|from| a.effective_date >= from))
            .filter(|a| filter.to.is_none_or(|to| a.effective_date <= to))
            .cloned()
            .collect();
        matching.sort_by(|a, b| (b.effective_date, b.id).cmp(&(a.effective_date, a.id)));

        let total = matching.len() as i64;
        let data = matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect();

        Ok(AdjustmentPage { data, total })
    }

    async fn delete_adjustment(&self, id: u64) -> Result<bool, SalaryError> {
        Ok(self.state.lock().unwrap().adjustments.remove(&id).is_some())
    }

    async fn delete_adjustments(&self, ids: &[u64]) -> Result<Vec<u64>, SalaryError> {
        let mut state = self.state.lock().unwrap();
        Ok(ids
            .iter()
            .copied()
            .filter(|id| state.adjustments.remove(id).is_some())
            .collect())
    }
}
