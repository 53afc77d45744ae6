use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::auth::auth::AuthUser;
use crate::salary::aggregator::SalaryAggregator;
use crate::salary::summary::{AnnualSalary, MonthlySalary};

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MonthlySalaryQuery {
    /// 1 = January, 12 = December
    #[schema(example = 3)]
    pub month: u32,

    #[schema(example = 2026)]
    pub year: i32,
}

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AnnualSalaryQuery {
    #[schema(example = 2026)]
    pub year: i32,
}

/// Own monthly salary (self-service)
#[utoipa::path(
    get,
    path = "/api/salary/me/monthly",
    params(MonthlySalaryQuery),
    responses(
        (status = 200, description = "Monthly salary summary", body = MonthlySalary),
        (status = 400, description = "Invalid month or year"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile linked to this user")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn my_monthly_salary(
    auth: AuthUser,
    aggregator: web::Data<SalaryAggregator>,
    query: web::Query<MonthlySalaryQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.own_employee_id()?;

    let summary = aggregator
        .compute_monthly(employee_id, query.month, query.year)
        .await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Own annual salary (self-service)
#[utoipa::path(
    get,
    path = "/api/salary/me/annual",
    params(AnnualSalaryQuery),
    responses(
        (status = 200, description = "Annual salary summary with 12 monthly entries", body = AnnualSalary),
        (status = 400, description = "Invalid year"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile linked to this user")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn my_annual_salary(
    auth: AuthUser,
    aggregator: web::Data<SalaryAggregator>,
    query: web::Query<AnnualSalaryQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.own_employee_id()?;

    let summary = aggregator.compute_annual(employee_id, query.year).await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Monthly salary of an employee
#[utoipa::path(
    get,
    path = "/api/salary/{employee_id}/monthly",
    params(
        ("employee_id" = u64, Path, description = "Employee ID"),
        MonthlySalaryQuery
    ),
    responses(
        (status = 200, description = "Monthly salary summary", body = MonthlySalary),
        (status = 400, description = "Invalid month or year"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee 1001 not found"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn employee_monthly_salary(
    auth: AuthUser,
    aggregator: web::Data<SalaryAggregator>,
    path: web::Path<u64>,
    query: web::Query<MonthlySalaryQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    auth.require_self_or_staff(employee_id)?;

    let summary = aggregator
        .compute_monthly(employee_id, query.month, query.year)
        .await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Annual salary of an employee
#[utoipa::path(
    get,
    path = "/api/salary/{employee_id}/annual",
    params(
        ("employee_id" = u64, Path, description = "Employee ID"),
        AnnualSalaryQuery
    ),
    responses(
        (status = 200, description = "Annual salary summary with 12 monthly entries", body = AnnualSalary),
        (status = 400, description = "Invalid year"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn employee_annual_salary(
    auth: AuthUser,
    aggregator: web::Data<SalaryAggregator>,
    path: web::Path<u64>,
    query: web::Query<AnnualSalaryQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    auth.require_self_or_staff(employee_id)?;

    let summary = aggregator.compute_annual(employee_id, query.year).await?;

    Ok(HttpResponse::Ok().json(summary))
}
