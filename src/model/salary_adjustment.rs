use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::error::SalaryError;
use crate::model::employee::Employee;
use crate::model::money::{PERCENTAGE_SCALE, validate_money};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AdjustmentKind {
    Bonus,
    Deduction,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AdjustmentCategory {
    #[default]
    Individual,
    Seasonal,
}

/// A recorded bonus or deduction. Never updated once stored.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SalaryAdjustment {
    #[schema(example = 7)]
    pub id: u64,

    #[schema(example = 1001)]
    pub employee_id: u64,

    /// User id of the admin who recorded it.
    #[schema(example = 1)]
    pub admin_id: u64,

    pub kind: AdjustmentKind,
    pub category: AdjustmentCategory,

    #[schema(example = "Q1 performance bonus")]
    pub reason: String,

    /// Final currency value; this is what gets summed.
    #[schema(example = 1000000.0, value_type = f64)]
    pub amount: Decimal,

    pub is_percentage: bool,

    #[schema(example = 0.1, value_type = Option<f64>, nullable = true)]
    pub percentage_value: Option<Decimal>,

    #[schema(example = "2026-03-15", value_type = String, format = "date")]
    pub effective_date: NaiveDate,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: NaiveDateTime,
}

/// Raw `salary_adjustments` row; enum columns are stored as lowercase strings.
#[derive(Debug, sqlx::FromRow)]
pub struct SalaryAdjustmentRow {
    pub id: u64,
    pub employee_id: u64,
    pub admin_id: u64,
    pub kind: String,
    pub category: String,
    pub reason: String,
    pub amount: Decimal,
    pub is_percentage: bool,
    pub percentage_value: Option<Decimal>,
    pub effective_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<SalaryAdjustmentRow> for SalaryAdjustment {
    type Error = SalaryError;

    fn try_from(row: SalaryAdjustmentRow) -> Result<Self, Self::Error> {
        let kind = row
            .kind
            .parse::<AdjustmentKind>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let category = row
            .category
            .parse::<AdjustmentCategory>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(SalaryAdjustment {
            id: row.id,
            employee_id: row.employee_id,
            admin_id: row.admin_id,
            kind,
            category,
            reason: row.reason,
            amount: row.amount,
            is_percentage: row.is_percentage,
            percentage_value: row.percentage_value,
            effective_date: row.effective_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Adjustment fields shared by the single and bulk record requests.
///
/// `amount` is read only for fixed adjustments. With `is_percentage` set the
/// stored amount is always resolved from `percentage_value` and the
/// employee's current base salary.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AdjustmentInput {
    pub kind: AdjustmentKind,

    #[serde(default)]
    pub category: AdjustmentCategory,

    #[serde(default)]
    #[schema(example = "Q1 performance bonus")]
    pub reason: String,

    #[schema(example = 1000000.0, value_type = Option<f64>, nullable = true)]
    pub amount: Option<Decimal>,

    #[serde(default)]
    pub is_percentage: bool,

    #[schema(example = 0.1, value_type = Option<f64>, nullable = true)]
    pub percentage_value: Option<Decimal>,

    #[schema(example = "2026-03-15", value_type = Option<String>, format = "date")]
    pub effective_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentValue {
    Fixed(Decimal),
    /// Fraction of base salary in `[0, 1]`.
    Percentage(Decimal),
}

/// An [`AdjustmentInput`] that passed validation and only lacks the
/// subject employee.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAdjustment {
    pub kind: AdjustmentKind,
    pub category: AdjustmentCategory,
    pub reason: String,
    pub value: AdjustmentValue,
    pub effective_date: NaiveDate,
}

/// A fully resolved adjustment ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSalaryAdjustment {
    pub employee_id: u64,
    pub admin_id: u64,
    pub kind: AdjustmentKind,
    pub category: AdjustmentCategory,
    pub reason: String,
    pub amount: Decimal,
    pub is_percentage: bool,
    pub percentage_value: Option<Decimal>,
    pub effective_date: NaiveDate,
}

impl AdjustmentInput {
    pub fn validate(&self) -> Result<ValidatedAdjustment, SalaryError> {
        let reason = self.reason.trim();
        if reason.is_empty() {
            return Err(SalaryError::validation("reason must not be empty"));
        }

        let effective_date = self
            .effective_date
            .ok_or_else(|| SalaryError::validation("effective_date is required"))?;

        let value = if self.is_percentage {
            let percentage = self.percentage_value.ok_or_else(|| {
                SalaryError::validation("percentage_value is required when is_percentage is true")
            })?;
            if percentage < Decimal::ZERO || percentage > Decimal::ONE {
                return Err(SalaryError::validation(
                    "percentage_value must be between 0 and 1",
                ));
            }
            if percentage.normalize().scale() > PERCENTAGE_SCALE {
                return Err(SalaryError::validation(format!(
                    "percentage_value must have at most {PERCENTAGE_SCALE} decimal places"
                )));
            }
            AdjustmentValue::Percentage(percentage)
        } else {
            if self.percentage_value.is_some() {
                return Err(SalaryError::validation(
                    "percentage_value is only allowed when is_percentage is true",
                ));
            }
            let amount = self
                .amount
                .ok_or_else(|| SalaryError::validation("amount is required"))?;
            AdjustmentValue::Fixed(validate_money("amount", amount)?)
        };

        Ok(ValidatedAdjustment {
            kind: self.kind,
            category: self.category,
            reason: reason.to_string(),
            value,
            effective_date,
        })
    }
}

impl ValidatedAdjustment {
    /// Resolve against `employee` as of now. Percentages are turned into a
    /// currency amount here and never re-derived later.
    pub fn resolve_for(
        &self,
        employee: &Employee,
        admin_id: u64,
    ) -> Result<NewSalaryAdjustment, SalaryError> {
        let (amount, percentage_value) = match self.value {
            AdjustmentValue::Fixed(amount) => (amount, None),
            AdjustmentValue::Percentage(percentage) => {
                let base_salary = employee.base_salary.ok_or_else(|| {
                    SalaryError::validation(format!(
                        "employee {} has no base salary configured",
                        employee.id
                    ))
                })?;
                ((percentage * base_salary).round_dp(2), Some(percentage))
            }
        };

        Ok(NewSalaryAdjustment {
            employee_id: employee.id,
            admin_id,
            kind: self.kind,
            category: self.category,
            reason: self.reason.clone(),
            amount,
            is_percentage: percentage_value.is_some(),
            percentage_value,
            effective_date: self.effective_date,
        })
    }
}
