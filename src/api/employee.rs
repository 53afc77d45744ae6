use actix_web::{HttpResponse, Responder, web};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::model::employee::Employee;
use crate::salary::aggregator::SalaryAggregator;

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployeeSalary {
    #[schema(example = 10000000.0, value_type = f64)]
    pub base_salary: Decimal,

    /// Keeps the current position when omitted
    #[schema(example = "Senior Backend Engineer", nullable = true)]
    pub position: Option<String>,
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee 1001 not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_employee(
    auth: AuthUser,
    aggregator: web::Data<SalaryAggregator>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id: u64 = path.into_inner();
    auth.require_self_or_staff(employee_id)?;

    let employee = aggregator.get_employee(employee_id).await?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Set base salary (and optionally position). Recorded adjustments are not recomputed.
#[utoipa::path(
    put,
    path = "/api/employee/{employee_id}/salary",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = UpdateEmployeeSalary,
    responses(
        (status = 200, description = "Employee updated successfully", body = Employee),
        (status = 400, description = "Negative base salary"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_employee_salary(
    auth: AuthUser,
    aggregator: web::Data<SalaryAggregator>,
    path: web::Path<u64>,
    body: web::Json<UpdateEmployeeSalary>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let employee_id = path.into_inner();
    let employee = aggregator
        .update_employee_salary(employee_id, body.base_salary, body.position.as_deref())
        .await?;

    info!(admin = %auth.username, employee_id, "Employee salary updated");
    Ok(HttpResponse::Ok().json(employee))
}
