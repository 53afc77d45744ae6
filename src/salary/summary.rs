use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::salary_adjustment::{AdjustmentKind, SalaryAdjustment};
use crate::salary::period::PayPeriod;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlySalary {
    /// 1 = January.
    #[schema(example = 3)]
    pub month: u32,

    #[schema(example = 2026)]
    pub year: i32,

    #[schema(example = 10000000.0, value_type = f64)]
    pub base_salary: Decimal,

    /// `false` when the employee has no base salary and 0 was used.
    pub base_salary_configured: bool,

    #[schema(example = 1000000.0, value_type = f64)]
    pub total_bonus: Decimal,

    #[schema(example = 500000.0, value_type = f64)]
    pub total_deduction: Decimal,

    /// May be negative when deductions exceed pay.
    #[schema(example = 10500000.0, value_type = f64)]
    pub net_salary: Decimal,

    pub bonus_details: Vec<SalaryAdjustment>,
    pub deduction_details: Vec<SalaryAdjustment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnnualSalary {
    #[schema(example = 2026)]
    pub year: i32,

    #[schema(example = 10000000.0, value_type = f64)]
    pub base_salary: Decimal,

    pub base_salary_configured: bool,

    #[schema(example = 120000000.0, value_type = f64)]
    pub total_annual_base_salary: Decimal,

    #[schema(example = 1000000.0, value_type = f64)]
    pub total_annual_bonus: Decimal,

    #[schema(example = 500000.0, value_type = f64)]
    pub total_annual_deduction: Decimal,

    #[schema(example = 120500000.0, value_type = f64)]
    pub total_annual_net_salary: Decimal,

    /// Always 12 entries, January first.
    pub monthly_breakdown: Vec<MonthlySalary>,
}

impl MonthlySalary {
    /// Summarise `adjustments` for `period`. Records outside the period are
    /// ignored; the rest are ordered by effective date, then id.
    pub fn build(
        period: PayPeriod,
        base_salary: Option<Decimal>,
        adjustments: Vec<SalaryAdjustment>,
    ) -> Self {
        let mut adjustments: Vec<_> = adjustments
            .into_iter()
            .filter(|a| period.contains(a.effective_date))
            .collect();
        adjustments.sort_by_key(|a| (a.effective_date, a.id));

        let (bonus_details, deduction_details): (Vec<_>, Vec<_>) = adjustments
            .into_iter()
            .partition(|a| a.kind == AdjustmentKind::Bonus);

        let total_bonus: Decimal = bonus_details.iter().map(|a| a.amount).sum();
        let total_deduction: Decimal = deduction_details.iter().map(|a| a.amount).sum();
        let base = base_salary.unwrap_or(Decimal::ZERO);

        MonthlySalary {
            month: period.month(),
            year: period.year(),
            base_salary: base,
            base_salary_configured: base_salary.is_some(),
            total_bonus,
            total_deduction,
            net_salary: base + total_bonus - total_deduction,
            bonus_details,
            deduction_details,
        }
    }
}

impl AnnualSalary {
    pub fn from_breakdown(
        year: i32,
        base_salary: Option<Decimal>,
        monthly_breakdown: Vec<MonthlySalary>,
    ) -> Self {
        let base = base_salary.unwrap_or(Decimal::ZERO);
        let total_annual_base_salary = base * Decimal::from(12);
        let total_annual_bonus: Decimal = monthly_breakdown.iter().map(|m| m.total_bonus).sum();
        let total_annual_deduction: Decimal =
            monthly_breakdown.iter().map(|m| m.total_deduction).sum();

        AnnualSalary {
            year,
            base_salary: base,
            base_salary_configured: base_salary.is_some(),
            total_annual_base_salary,
            total_annual_bonus,
            total_annual_deduction,
            total_annual_net_salary: total_annual_base_salary + total_annual_bonus
                - total_annual_deduction,
            monthly_breakdown,
        }
    }

    /// Every bonus of the year, month by month in breakdown order.
    pub fn bonus_details(&self) -> impl Iterator<Item = &SalaryAdjustment> {
        self.monthly_breakdown.iter().flat_map(|m| m.bonus_details.iter())
    }

    /// Every deduction of the year, month by month in breakdown order.
    pub fn deduction_details(&self) -> impl Iterator<Item = &SalaryAdjustment> {
        self.monthly_breakdown
            .iter()
            .flat_map(|m| m.deduction_details.iter())
    }
}
