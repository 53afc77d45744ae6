use crate::{
    api::{employee, salary, salary_adjustment},
    auth::middleware::auth_middleware,
    config::Config,
    error::SalaryError,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{Scope, middleware::from_fn, web};

fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    let burst = requests_per_min.max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(burst)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("per_millisecond and burst_size are non-zero");
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Protected routes
    cfg.service(
        salary_routes(web::scope(&config.api_prefix))
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter), // rate limiting
    );
}

/// Salary, adjustment and employee routes, without middleware.
pub fn salary_routes(scope: Scope) -> Scope {
    scope
        // extractor failures answer with the same {"message"} body as handlers
        .app_data(web::JsonConfig::default().error_handler(|err, _| {
            SalaryError::validation(err.to_string()).into()
        }))
        .app_data(web::QueryConfig::default().error_handler(|err, _| {
            SalaryError::validation(err.to_string()).into()
        }))
        .app_data(web::PathConfig::default().error_handler(|err, _| {
            SalaryError::validation(err.to_string()).into()
        }))
        // registered before /salary so the prefixes never overlap
        .service(
            web::scope("/salary-adjustment")
                // /salary-adjustment
                .service(
                    web::resource("")
                        .route(web::post().to(salary_adjustment::create_adjustment))
                        .route(web::get().to(salary_adjustment::list_adjustments))
                        .route(web::delete().to(salary_adjustment::bulk_delete_adjustments)),
                )
                // /salary-adjustment/bulk
                .service(
                    web::resource("/bulk")
                        .route(web::post().to(salary_adjustment::bulk_create_adjustments)),
                )
                // /salary-adjustment/{id}
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(salary_adjustment::get_adjustment))
                        .route(web::delete().to(salary_adjustment::delete_adjustment)),
                ),
        )
        .service(
            web::scope("/salary")
                // self-service first, so "me" is never read as an id
                .service(web::resource("/me/monthly").route(web::get().to(salary::my_monthly_salary)))
                .service(web::resource("/me/annual").route(web::get().to(salary::my_annual_salary)))
                .service(
                    web::resource("/{employee_id}/monthly")
                        .route(web::get().to(salary::employee_monthly_salary)),
                )
                .service(
                    web::resource("/{employee_id}/annual")
                        .route(web::get().to(salary::employee_annual_salary)),
                ),
        )
        .service(
            web::scope("/employee")
                .service(web::resource("/{id}").route(web::get().to(employee::get_employee)))
                .service(
                    web::resource("/{id}/salary")
                        .route(web::put().to(employee::update_employee_salary)),
                ),
        )
}
