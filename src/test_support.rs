use actix_web::http::header::{AUTHORIZATION, HeaderName};

use crate::auth::jwt::issue_token;
use crate::config::Config;
use crate::model::role::Role;
use crate::models::TokenType;

pub const JWT_SECRET: &str = "test-secret";

pub fn config() -> Config {
    Config {
        database_url: "mysql://unused".to_string(),
        db_max_connections: 1,
        jwt_secret: JWT_SECRET.to_string(),
        server_addr: "127.0.0.1:0".to_string(),
        rate_protected_per_min: 1000,
        api_prefix: "/api".to_string(),
        log_dir: "logs".to_string(),
    }
}

pub fn bearer(user_id: u64, role: Role, employee_id: Option<u64>) -> (HeaderName, String) {
    let token = issue_token(user_id, role as u8, employee_id, TokenType::Access, JWT_SECRET);
    (AUTHORIZATION, format!("Bearer {token}"))
}

/// Initialise the API routes with auth over the given `MemorySalaryStore`.
macro_rules! test_app {
    ($store:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($crate::test_support::config()))
                .app_data(actix_web::web::Data::new(
                    $crate::salary::aggregator::SalaryAggregator::new(std::sync::Arc::new($store)),
                ))
                .service(
                    $crate::routes::salary_routes(actix_web::web::scope("/api")).wrap(
                        actix_web::middleware::from_fn($crate::auth::middleware::auth_middleware),
                    ),
                ),
        )
        .await
    };
}

pub(crate) use test_app;
