use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::auth::auth::AuthUser;
use crate::error::SalaryError;
use crate::model::salary_adjustment::{AdjustmentInput, AdjustmentKind, SalaryAdjustment};
use crate::salary::aggregator::{BulkDeleteReport, BulkRecordReport, SalaryAggregator};
use crate::salary::period::filter_bounds;
use crate::salary::store::AdjustmentFilter;

#[derive(Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_id": 1001,
        "kind": "bonus",
        "category": "individual",
        "reason": "Q1 performance bonus",
        "is_percentage": true,
        "percentage_value": 0.1,
        "effective_date": "2026-03-15"
    })
)]
pub struct CreateSalaryAdjustment {
    pub employee_id: u64,

    #[serde(flatten)]
    pub adjustment: AdjustmentInput,
}

#[derive(Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_ids": [1001, 1002, 1003],
        "kind": "bonus",
        "category": "seasonal",
        "reason": "Year-end bonus",
        "amount": 2000000,
        "effective_date": "2026-12-20"
    })
)]
pub struct BulkCreateSalaryAdjustment {
    pub employee_ids: Vec<u64>,

    #[serde(flatten)]
    pub adjustment: AdjustmentInput,
}

#[derive(Deserialize, ToSchema)]
pub struct DeleteSalaryAdjustments {
    #[schema(example = json!([7, 8, 9]))]
    pub ids: Vec<u64>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SalaryAdjustmentQuery {
    #[schema(example = 1)]
    pub page: Option<u32>,

    #[schema(example = 10)]
    pub per_page: Option<u32>,

    #[schema(example = 1001)]
    pub employee_id: Option<u64>,

    pub kind: Option<AdjustmentKind>,

    /// Requires `year`
    #[schema(example = 3)]
    pub month: Option<u32>,

    #[schema(example = 2026)]
    pub year: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct SalaryAdjustmentListResponse {
    pub data: Vec<SalaryAdjustment>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

#[utoipa::path(
    post,
    path = "/api/salary-adjustment",
    request_body = CreateSalaryAdjustment,
    responses(
        (status = 201, description = "Salary adjustment recorded", body = SalaryAdjustment),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "reason must not be empty"
        })),
        (status = 401),
        (status = 403),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary Adjustment"
)]
pub async fn create_adjustment(
    auth: AuthUser,
    aggregator: web::Data<SalaryAggregator>,
    payload: web::Json<CreateSalaryAdjustment>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let adjustment = aggregator
        .record_adjustment(auth.user_id, payload.employee_id, &payload.adjustment)
        .await?;

    info!(admin = %auth.username, adjustment_id = adjustment.id, "Adjustment created");
    Ok(HttpResponse::Created().json(adjustment))
}

/// Record one adjustment per listed employee; failures are reported per employee
#[utoipa::path(
    post,
    path = "/api/salary-adjustment/bulk",
    request_body = BulkCreateSalaryAdjustment,
    responses(
        (status = 200, description = "Per-employee results; some may have failed", body = BulkRecordReport),
        (status = 400, description = "Invalid payload or empty employee list"),
        (status = 401),
        (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Salary Adjustment"
)]
pub async fn bulk_create_adjustments(
    auth: AuthUser,
    aggregator: web::Data<SalaryAggregator>,
    payload: web::Json<BulkCreateSalaryAdjustment>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let report = aggregator
        .record_bulk(auth.user_id, &payload.employee_ids, &payload.adjustment)
        .await?;

    Ok(HttpResponse::Ok().json(report))
}

#[utoipa::path(
    get,
    path = "/api/salary-adjustment",
    params(SalaryAdjustmentQuery),
    responses(
        (status = 200, body = SalaryAdjustmentListResponse),
        (status = 400, description = "Invalid period filter")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary Adjustment"
)]
pub async fn list_adjustments(
    auth: AuthUser,
    aggregator: web::Data<SalaryAggregator>,
    query: web::Query<SalaryAdjustmentQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let offset = (page - 1)
        .checked_mul(per_page)
        .ok_or_else(|| SalaryError::validation("page is too large"))?;

    let (from, to) = filter_bounds(query.month, query.year)?;
    let filter = AdjustmentFilter {
        employee_id: query.employee_id,
        kind: query.kind,
        from,
        to,
        limit: per_page,
        offset,
    };

    let result = aggregator.list_adjustments(&filter).await?;

    Ok(HttpResponse::Ok().json(SalaryAdjustmentListResponse {
        data: result.data,
        page,
        per_page,
        total: result.total,
    }))
}

#[utoipa::path(
    get,
    path = "/api/salary-adjustment/{adjustment_id}",
    params(
        ("adjustment_id" = u64, Path, description = "Salary adjustment ID")
    ),
    responses(
        (status = 200, body = SalaryAdjustment),
        (status = 404, description = "Salary adjustment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary Adjustment"
)]
pub async fn get_adjustment(
    auth: AuthUser,
    aggregator: web::Data<SalaryAggregator>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let adjustment = aggregator.get_adjustment(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(adjustment))
}

#[utoipa::path(
    delete,
    path = "/api/salary-adjustment/{adjustment_id}",
    params(
        ("adjustment_id" = u64, Path, description = "Salary adjustment ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Salary adjustment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary Adjustment"
)]
pub async fn delete_adjustment(
    auth: AuthUser,
    aggregator: web::Data<SalaryAggregator>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    aggregator.delete_adjustment(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}

#[utoipa::path(
    delete,
    path = "/api/salary-adjustment",
    request_body = DeleteSalaryAdjustments,
    responses(
        (status = 200, description = "Deleted ids and ids that did not exist", body = BulkDeleteReport),
        (status = 400, description = "Empty id list")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary Adjustment"
)]
pub async fn bulk_delete_adjustments(
    auth: AuthUser,
    aggregator: web::Data<SalaryAggregator>,
    payload: web::Json<DeleteSalaryAdjustments>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let report = aggregator.delete_adjustments(&payload.ids).await?;

    Ok(HttpResponse::Ok().json(report))
}

#[cfg(test)]
mod tests {
    use crate::model::role::Role;
    use crate::salary::memory::MemorySalaryStore;
    use crate::test_support::{bearer, test_app};
    use actix_web::test;
    use rust_decimal::Decimal;
    use serde_json::{Value, json};

    fn store() -> MemorySalaryStore {
        MemorySalaryStore::new()
            .with_employee(1, Some(Decimal::from(10_000_000)))
            .with_employee(2, None)
            .with_employee(3, Some(Decimal::from(6_000_000)))
    }

    fn admin() -> (actix_web::http::header::HeaderName, String) {
        bearer(50, Role::Admin, None)
    }

    #[actix_web::test]
    async fn admin_records_percentage_bonus_and_it_shows_in_salary() {
        let app = test_app!(store());

        let req = test::TestRequest::post()
            .uri("/api/salary-adjustment")
            .insert_header(admin())
            .set_json(json!({
                "employee_id": 1,
                "kind": "bonus",
                "reason": "Q1 performance",
                "is_percentage": true,
                "percentage_value": 0.1,
                "effective_date": "2026-03-15"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["amount"].as_f64(), Some(1_000_000.0));
        assert_eq!(created["admin_id"], 50);
        assert_eq!(created["category"], "individual");

        let req = test::TestRequest::get()
            .uri("/api/salary/1/monthly?month=3&year=2026")
            .insert_header(admin())
            .to_request();
        let summary: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(summary["total_bonus"].as_f64(), Some(1_000_000.0));
        assert_eq!(summary["net_salary"].as_f64(), Some(11_000_000.0));
    }

    #[actix_web::test]
    async fn hr_cannot_record_adjustments() {
        let app = test_app!(store());

        let req = test::TestRequest::post()
            .uri("/api/salary-adjustment")
            .insert_header(bearer(2, Role::Hr, None))
            .set_json(json!({
                "employee_id": 1,
                "kind": "deduction",
                "reason": "Late",
                "amount": 10,
                "effective_date": "2026-03-15"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Admin only" }));
    }

    #[actix_web::test]
    async fn malformed_body_is_a_json_bad_request() {
        let app = test_app!(store());

        let req = test::TestRequest::post()
            .uri("/api/salary-adjustment")
            .insert_header(admin())
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"employee_id\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].is_string());
    }

    #[actix_web::test]
    async fn huge_page_number_is_rejected() {
        let app = test_app!(store());

        let req = test::TestRequest::get()
            .uri("/api/salary-adjustment?page=4294967295&per_page=100")
            .insert_header(bearer(2, Role::Hr, None))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "page is too large" }));
    }

    #[actix_web::test]
    async fn invalid_adjustment_returns_message() {
        let app = test_app!(store());

        let req = test::TestRequest::post()
            .uri("/api/salary-adjustment")
            .insert_header(admin())
            .set_json(json!({
                "employee_id": 1,
                "kind": "bonus",
                "reason": "Too generous",
                "is_percentage": true,
                "percentage_value": 1.5,
                "effective_date": "2026-03-15"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "percentage_value must be between 0 and 1");
    }

    #[actix_web::test]
    async fn bulk_create_keeps_successes_when_one_employee_fails() {
        let app = test_app!(store());

        let req = test::TestRequest::post()
            .uri("/api/salary-adjustment/bulk")
            .insert_header(admin())
            .set_json(json!({
                "employee_ids": [1, 2, 3],
                "kind": "bonus",
                "category": "seasonal",
                "reason": "Lunar new year",
                "is_percentage": true,
                "percentage_value": 0.1,
                "effective_date": "2026-02-10"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let report: Value = test::read_body_json(resp).await;
        assert_eq!(report["recorded"], 2);
        assert_eq!(report["failed"], 1);
        assert_eq!(report["results"][0]["status"], "recorded");
        assert_eq!(report["results"][1]["status"], "failed");
        assert_eq!(report["results"][1]["employee_id"], 2);
        assert_eq!(report["results"][2]["adjustment"]["amount"].as_f64(), Some(600_000.0));
    }

    #[actix_web::test]
    async fn list_filters_by_employee_and_month() {
        let app = test_app!(store());

        for (employee_id, date) in [(1, "2026-03-01"), (1, "2026-04-01"), (3, "2026-03-02")] {
            let req = test::TestRequest::post()
                .uri("/api/salary-adjustment")
                .insert_header(admin())
                .set_json(json!({
                    "employee_id": employee_id,
                    "kind": "bonus",
                    "reason": "Spot award",
                    "amount": 100,
                    "effective_date": date
                }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), 201);
        }

        let req = test::TestRequest::get()
            .uri("/api/salary-adjustment?employee_id=1&month=3&year=2026")
            .insert_header(bearer(2, Role::Hr, None))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["effective_date"], "2026-03-01");

        let req = test::TestRequest::get()
            .uri("/api/salary-adjustment?month=3")
            .insert_header(bearer(2, Role::Hr, None))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }

    #[actix_web::test]
    async fn delete_single_and_bulk() {
        let app = test_app!(store());

        let mut ids = Vec::new();
        for _ in 0..3 {
            let req = test::TestRequest::post()
                .uri("/api/salary-adjustment")
                .insert_header(admin())
                .set_json(json!({
                    "employee_id": 3,
                    "kind": "deduction",
                    "reason": "Equipment",
                    "amount": 250,
                    "effective_date": "2026-06-30"
                }))
                .to_request();
            let created: Value = test::call_and_read_body_json(&app, req).await;
            ids.push(created["id"].as_u64().unwrap());
        }

        let req = test::TestRequest::delete()
            .uri(&format!("/api/salary-adjustment/{}", ids[0]))
            .insert_header(admin())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);

        let req = test::TestRequest::get()
            .uri(&format!("/api/salary-adjustment/{}", ids[0]))
            .insert_header(admin())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);

        let req = test::TestRequest::delete()
            .uri("/api/salary-adjustment")
            .insert_header(admin())
            .set_json(json!({ "ids": [ids[0], ids[1], ids[2]] }))
            .to_request();
        let report: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report["deleted"], json!([ids[1], ids[2]]));
        assert_eq!(report["not_found"], json!([ids[0]]));

        let req = test::TestRequest::get()
            .uri("/api/salary/3/monthly?month=6&year=2026")
            .insert_header(admin())
            .to_request();
        let summary: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(summary["total_deduction"].as_f64(), Some(0.0));
    }
}
