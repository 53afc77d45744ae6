use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use tracing::debug;

use crate::error::SalaryError;
use crate::model::employee::Employee;
use crate::model::salary_adjustment::{NewSalaryAdjustment, SalaryAdjustment, SalaryAdjustmentRow};
use crate::salary::store::{AdjustmentFilter, AdjustmentPage, SalaryStore};

const ADJUSTMENT_COLUMNS: &str = r#"
    id, employee_id, admin_id, kind, category, reason, amount,
    is_percentage, percentage_value, effective_date, created_at, updated_at
"#;

enum FilterValue {
    U64(u64),
    Str(String),
    Date(NaiveDate),
}

pub struct MySqlSalaryStore {
    pool: MySqlPool,
}

impl MySqlSalaryStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn into_adjustments(rows: Vec<SalaryAdjustmentRow>) -> Result<Vec<SalaryAdjustment>, SalaryError> {
    rows.into_iter().map(SalaryAdjustment::try_from).collect()
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

#[async_trait]
impl SalaryStore for MySqlSalaryStore {
    async fn find_employee(&self, employee_id: u64) -> Result<Option<Employee>, SalaryError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, first_name, last_name, position, base_salary
            FROM employees
            WHERE id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn update_employee_salary(
        &self,
        employee_id: u64,
        base_salary: Decimal,
        position: Option<&str>,
    ) -> Result<bool, SalaryError> {
        // MySQL reports 0 affected rows when the values are unchanged, so
        // existence is checked separately.
        if self.find_employee(employee_id).await?.is_none() {
            return Ok(false);
        }

        sqlx::query(
            r#"
            UPDATE employees
            SET base_salary = ?, position = COALESCE(?, position)
            WHERE id = ?
            "#,
        )
        .bind(base_salary)
        .bind(position)
        .bind(employee_id)
        .execute(&self.pool)
        .await?;

        Ok(true)
    }

    async fn adjustments_between(
        &self,
        employee_id: u64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SalaryAdjustment>, SalaryError> {
        let sql = format!(
            r#"
            SELECT {ADJUSTMENT_COLUMNS}
            FROM salary_adjustments
            WHERE employee_id = ?
            AND effective_date BETWEEN ? AND ?
            ORDER BY effective_date ASC, id ASC
            "#
        );

        let rows = sqlx::query_as::<_, SalaryAdjustmentRow>(&sql)
            .bind(employee_id)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        into_adjustments(rows)
    }

    async fn insert_adjustment(
        &self,
        adjustment: &NewSalaryAdjustment,
    ) -> Result<SalaryAdjustment, SalaryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO salary_adjustments
            (employee_id, admin_id, kind, category, reason, amount,
             is_percentage, percentage_value, effective_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(adjustment.employee_id)
        .bind(adjustment.admin_id)
        .bind(adjustment.kind.to_string())
        .bind(adjustment.category.to_string())
        .bind(&adjustment.reason)
        .bind(adjustment.amount)
        .bind(adjustment.is_percentage)
        .bind(adjustment.percentage_value)
        .bind(adjustment.effective_date)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id();
        debug!(adjustment_id = id, employee_id = adjustment.employee_id, "Inserted salary adjustment");

        self.find_adjustment(id)
            .await?
            .ok_or_else(|| SalaryError::adjustment_not_found(id))
    }

    async fn find_adjustment(&self, id: u64) -> Result<Option<SalaryAdjustment>, SalaryError> {
        let sql = format!("SELECT {ADJUSTMENT_COLUMNS} FROM salary_adjustments WHERE id = ?");

        let row = sqlx::query_as::<_, SalaryAdjustmentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(SalaryAdjustment::try_from).transpose()
    }

    async fn list_adjustments(
        &self,
        filter: &AdjustmentFilter,
    ) -> Result<AdjustmentPage, SalaryError> {
        let mut where_sql = String::from(" WHERE 1=1");
        let mut args: Vec<FilterValue> = Vec::new();

        if let Some(employee_id) = filter.employee_id {
            where_sql.push_str(" AND employee_id = ?");
            args.push(FilterValue::U64(employee_id));
        }

        if let Some(kind) = filter.kind {
            where_sql.push_str(" AND kind = ?");
            args.push(FilterValue::Str(kind.to_string()));
        }

        if let Some(from) = filter.from {
            where_sql.push_str(" AND effective_date >= ?");
            args.push(FilterValue::Date(from));
        }

        if let Some(to) = filter.to {
            where_sql.push_str(" AND effective_date <= ?");
            args.push(FilterValue::Date(to));
        }

        let count_sql = format!("SELECT COUNT(*) FROM salary_adjustments{}", where_sql);
        debug!(sql = %count_sql, "Counting salary adjustments");

        let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
        for arg in &args {
            count_q = match arg {
                FilterValue::U64(v) => count_q.bind(*v),
                FilterValue::Str(s) => count_q.bind(s.as_str()),
                FilterValue::Date(d) => count_q.bind(*d),
            };
        }
        let total = count_q.fetch_one(&self.pool).await?;

        let data_sql = format!(
            r#"
            SELECT {ADJUSTMENT_COLUMNS}
            FROM salary_adjustments
            {where_sql}
            ORDER BY effective_date DESC, id DESC
            LIMIT ? OFFSET ?
            "#
        );

        let mut data_q = sqlx::query_as::<_, SalaryAdjustmentRow>(&data_sql);
        for arg in &args {
            data_q = match arg {
                FilterValue::U64(v) => data_q.bind(*v),
                FilterValue::Str(s) => data_q.bind(s.as_str()),
                FilterValue::Date(d) => data_q.bind(*d),
            };
        }

        let rows = data_q
            .bind(filter.limit as i64)
            .bind(filter.offset as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(AdjustmentPage {
            data: into_adjustments(rows)?,
            total,
        })
    }

    async fn delete_adjustment(&self, id: u64) -> Result<bool, SalaryError> {
        let result = sqlx::query("DELETE FROM salary_adjustments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_adjustments(&self, ids: &[u64]) -> Result<Vec<u64>, SalaryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;

        let select_sql = format!(
            "SELECT id FROM salary_adjustments WHERE id IN ({}) FOR UPDATE",
            placeholders(ids.len())
        );
        let mut select_q = sqlx::query_scalar::<_, u64>(&select_sql);
        for id in ids {
            select_q = select_q.bind(*id);
        }
        let existing = select_q.fetch_all(&mut *tx).await?;

        if !existing.is_empty() {
            let delete_sql = format!(
                "DELETE FROM salary_adjustments WHERE id IN ({})",
                placeholders(existing.len())
            );
            let mut delete_q = sqlx::query(&delete_sql);
            for id in &existing {
                delete_q = delete_q.bind(*id);
            }
            delete_q.execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(existing)
    }
}
