use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use crate::error::SalaryError;
use crate::model::employee::Employee;
use crate::model::money::validate_money;
use crate::model::salary_adjustment::{AdjustmentInput, SalaryAdjustment, ValidatedAdjustment};
use crate::salary::period::PayPeriod;
use crate::salary::store::{AdjustmentFilter, AdjustmentPage, SalaryStore};
use crate::salary::summary::{AnnualSalary, MonthlySalary};

/// Outcome for one target of a bulk record call.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BulkRecordResult {
    Recorded {
        employee_id: u64,
        adjustment: SalaryAdjustment,
    },
    Failed {
        employee_id: u64,
        /// `not_found`, `validation` or `storage`.
        error: String,
        message: String,
    },
}

impl BulkRecordResult {
    pub fn employee_id(&self) -> u64 {
        match self {
            BulkRecordResult::Recorded { employee_id, .. }
            | BulkRecordResult::Failed { employee_id, .. } => *employee_id,
        }
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self, BulkRecordResult::Recorded { .. })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BulkRecordReport {
    pub recorded: usize,
    pub failed: usize,
    /// One entry per requested employee, in request order.
    pub results: Vec<BulkRecordResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BulkDeleteReport {
    pub deleted: Vec<u64>,
    pub not_found: Vec<u64>,
}

/// Salary summaries and adjustment bookkeeping over an injected store.
pub struct SalaryAggregator {
    store: Arc<dyn SalaryStore>,
}

impl SalaryAggregator {
    pub fn new(store: Arc<dyn SalaryStore>) -> Self {
        Self { store }
    }

    pub async fn get_employee(&self, employee_id: u64) -> Result<Employee, SalaryError> {
        self.store
            .find_employee(employee_id)
            .await?
            .ok_or_else(|| SalaryError::employee_not_found(employee_id))
    }

    /// Adjustments already recorded keep their resolved amounts.
    #[instrument(skip(self))]
    pub async fn update_employee_salary(
        &self,
        employee_id: u64,
        base_salary: Decimal,
        position: Option<&str>,
    ) -> Result<Employee, SalaryError> {
        let base_salary = validate_money("base_salary", base_salary)?;

        if !self
            .store
            .update_employee_salary(employee_id, base_salary, position)
            .await?
        {
            return Err(SalaryError::employee_not_found(employee_id));
        }

        info!(employee_id, %base_salary, "Base salary updated");
        self.get_employee(employee_id).await
    }

    #[instrument(skip(self))]
    pub async fn compute_monthly(
        &self,
        employee_id: u64,
        month: u32,
        year: i32,
    ) -> Result<MonthlySalary, SalaryError> {
        let period = PayPeriod::new(month, year)?;
        let employee = self.get_employee(employee_id).await?;
        self.monthly_for(&employee, period).await
    }

    #[instrument(skip(self))]
    pub async fn compute_annual(
        &self,
        employee_id: u64,
        year: i32,
    ) -> Result<AnnualSalary, SalaryError> {
        let months = PayPeriod::months_of(year)?;
        let employee = self.get_employee(employee_id).await?;

        let mut breakdown = Vec::with_capacity(months.len());
        for period in months {
            breakdown.push(self.monthly_for(&employee, period).await?);
        }

        Ok(AnnualSalary::from_breakdown(
            year,
            employee.base_salary,
            breakdown,
        ))
    }

    async fn monthly_for(
        &self,
        employee: &Employee,
        period: PayPeriod,
    ) -> Result<MonthlySalary, SalaryError> {
        let adjustments = self
            .store
            .adjustments_between(employee.id, period.first_day(), period.last_day())
            .await?;

        debug!(
            employee_id = employee.id,
            month = period.month(),
            year = period.year(),
            count = adjustments.len(),
            "Aggregating salary adjustments"
        );

        Ok(MonthlySalary::build(
            period,
            employee.base_salary,
            adjustments,
        ))
    }

    #[instrument(skip(self, input), fields(kind = %input.kind))]
    pub async fn record_adjustment(
        &self,
        admin_id: u64,
        employee_id: u64,
        input: &AdjustmentInput,
    ) -> Result<SalaryAdjustment, SalaryError> {
        let validated = input.validate()?;
        self.record_validated(admin_id, employee_id, &validated).await
    }

    /// Records the same adjustment for every target independently. A target
    /// failing never stops the others; only an invalid payload or an empty
    /// target list fails the call.
    #[instrument(skip(self, employee_ids, input), fields(targets = employee_ids.len()))]
    pub async fn record_bulk(
        &self,
        admin_id: u64,
        employee_ids: &[u64],
        input: &AdjustmentInput,
    ) -> Result<BulkRecordReport, SalaryError> {
        if employee_ids.is_empty() {
            return Err(SalaryError::validation("employee_ids must not be empty"));
        }
        let validated = input.validate()?;

        let mut results = Vec::with_capacity(employee_ids.len());
        for &employee_id in employee_ids {
            let result = match self.record_validated(admin_id, employee_id, &validated).await {
                Ok(adjustment) => BulkRecordResult::Recorded {
                    employee_id,
                    adjustment,
                },
                Err(e) => {
                    warn!(employee_id, error = %e, "Bulk salary adjustment failed for employee");
                    BulkRecordResult::Failed {
                        employee_id,
                        error: e.kind().to_string(),
                        message: e.public_message(),
                    }
                }
            };
            results.push(result);
        }

        let recorded = results.iter().filter(|r| r.is_recorded()).count();
        let failed = results.len() - recorded;
        info!(recorded, failed, "Bulk salary adjustment finished");

        Ok(BulkRecordReport {
            recorded,
            failed,
            results,
        })
    }

    async fn record_validated(
        &self,
        admin_id: u64,
        employee_id: u64,
        validated: &ValidatedAdjustment,
    ) -> Result<SalaryAdjustment, SalaryError> {
        let employee = self.get_employee(employee_id).await?;
        let new = validated.resolve_for(&employee, admin_id)?;
        let stored = self.store.insert_adjustment(&new).await?;

        info!(
            adjustment_id = stored.id,
            employee_id,
            amount = %stored.amount,
            "Salary adjustment recorded"
        );
        Ok(stored)
    }

    pub async fn get_adjustment(&self, id: u64) -> Result<SalaryAdjustment, SalaryError> {
        self.store
            .find_adjustment(id)
            .await?
            .ok_or_else(|| SalaryError::adjustment_not_found(id))
    }

    pub async fn list_adjustments(
        &self,
        filter: &AdjustmentFilter,
    ) -> Result<AdjustmentPage, SalaryError> {
        self.store.list_adjustments(filter).await
    }

    #[instrument(skip(self))]
    pub async fn delete_adjustment(&self, id: u64) -> Result<(), SalaryError> {
        if self.store.delete_adjustment(id).await? {
            info!(adjustment_id = id, "Salary adjustment deleted");
            Ok(())
        } else {
            Err(SalaryError::adjustment_not_found(id))
        }
    }

    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn delete_adjustments(&self, ids: &[u64]) -> Result<BulkDeleteReport, SalaryError> {
        if ids.is_empty() {
            return Err(SalaryError::validation("ids must not be empty"));
        }

        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }

        let deleted = self.store.delete_adjustments(&unique).await?;
        let not_found: Vec<u64> = unique
            .into_iter()
            .filter(|id| !deleted.contains(id))
            .collect();

        info!(deleted = deleted.len(), not_found = not_found.len(), "Salary adjustments deleted");
        Ok(BulkDeleteReport { deleted, not_found })
    }
}
