use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::SalaryError;
use crate::model::employee::Employee;
use crate::model::salary_adjustment::{AdjustmentKind, NewSalaryAdjustment, SalaryAdjustment};

/// Listing filter for adjustments. Date bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct AdjustmentFilter {
    pub employee_id: Option<u64>,
    pub kind: Option<AdjustmentKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug)]
pub struct AdjustmentPage {
    pub data: Vec<SalaryAdjustment>,
    pub total: i64,
}

/// Data access used by [`SalaryAggregator`](super::aggregator::SalaryAggregator).
#[async_trait]
pub trait SalaryStore: Send + Sync {
    async fn find_employee(&self, employee_id: u64) -> Result<Option<Employee>, SalaryError>;

    /// Returns `false` when no such employee exists. `position: None` keeps
    /// the current label.
    async fn update_employee_salary(
        &self,
        employee_id: u64,
        base_salary: Decimal,
        position: Option<&str>,
    ) -> Result<bool, SalaryError>;

    /// Adjustments of one employee with `from <= effective_date <= to`.
    async fn adjustments_between(
        &self,
        employee_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SalaryAdjustment>, SalaryError>;

    async fn insert_adjustment(
        &self,
        adjustment: &NewSalaryAdjustment,
    ) -> Result<SalaryAdjustment, SalaryError>;

    async fn find_adjustment(&self, id: u64) -> Result<Option<SalaryAdjustment>, SalaryError>;

    /// Newest effective date first.
    async fn list_adjustments(
        &self,
        filter: &AdjustmentFilter,
    ) -> Result<AdjustmentPage, SalaryError>;

    async fn delete_adjustment(&self, id: u64) -> Result<bool, SalaryError>;

    /// Deletes whichever of `ids` exist and returns those ids.
    async fn delete_adjustments(&self, ids: &[u64]) -> Result<Vec<u64>, SalaryError>;
}
