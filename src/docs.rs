use crate::api::employee::UpdateEmployeeSalary;
use crate::api::salary::{AnnualSalaryQuery, MonthlySalaryQuery};
use crate::api::salary_adjustment::{
    BulkCreateSalaryAdjustment, CreateSalaryAdjustment, DeleteSalaryAdjustments,
    SalaryAdjustmentListResponse, SalaryAdjustmentQuery,
};
use crate::model::employee::Employee;
use crate::model::salary_adjustment::{
    AdjustmentCategory, AdjustmentInput, AdjustmentKind, SalaryAdjustment,
};
use crate::salary::aggregator::{BulkDeleteReport, BulkRecordReport, BulkRecordResult};
use crate::salary::summary::{AnnualSalary, MonthlySalary};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Salary API",
        version = "1.0.0",
        description = r#"
## Salary & Adjustments

Monthly and annual salary summaries built from an employee's base salary and the
bonuses and deductions recorded against them.

### 🔹 Key Features
- **Salary summaries**
  - Monthly totals with per-adjustment detail, annual totals with a 12-month breakdown
  - Self-service (`/salary/me/...`) and HR/Admin views
- **Adjustments**
  - Record a bonus or deduction as a fixed amount or as a share of base salary
  - Bulk recording with per-employee results, single and bulk deletion
- **Employees**
  - Configure base salary and position

### 📐 Conventions
- Months are 1-12
- Percentages are fractions in [0, 1] and are resolved to an amount when recorded
- Net salary is never clamped; it is negative when deductions exceed pay

### 🔐 Security
All endpoints require a **JWT Bearer** access token. Recording, deleting and
salary changes are **Admin** only.
"#,
    ),
    paths(
        crate::api::salary::my_monthly_salary,
        crate::api::salary::my_annual_salary,
        crate::api::salary::employee_monthly_salary,
        crate::api::salary::employee_annual_salary,

        crate::api::salary_adjustment::create_adjustment,
        crate::api::salary_adjustment::bulk_create_adjustments,
        crate::api::salary_adjustment::list_adjustments,
        crate::api::salary_adjustment::get_adjustment,
        crate::api::salary_adjustment::delete_adjustment,
        crate::api::salary_adjustment::bulk_delete_adjustments,

        crate::api::employee::get_employee,
        crate::api::employee::update_employee_salary
    ),
    components(
        schemas(
            MonthlySalaryQuery,
            AnnualSalaryQuery,
            MonthlySalary,
            AnnualSalary,
            AdjustmentKind,
            AdjustmentCategory,
            AdjustmentInput,
            SalaryAdjustment,
            CreateSalaryAdjustment,
            BulkCreateSalaryAdjustment,
            DeleteSalaryAdjustments,
            SalaryAdjustmentQuery,
            SalaryAdjustmentListResponse,
            BulkRecordResult,
            BulkRecordReport,
            BulkDeleteReport,
            Employee,
            UpdateEmployeeSalary
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Salary", description = "Salary summary APIs"),
        (name = "Salary Adjustment", description = "Bonus and deduction APIs"),
        (name = "Employee", description = "Employee base salary APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_salary_paths_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/salary/{employee_id}/annual"));
        assert!(doc.paths.paths.contains_key("/api/salary-adjustment/bulk"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("MonthlySalary"));
    }
}
