use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::error::SalaryError;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, ResponseError,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use tracing::debug;

/// Verifies the bearer token and stores the caller as an [`AuthUser`]
/// extension. Rejections are answered here as `{"message": ...}` responses.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let authenticated = match req.app_data::<Data<Config>>() {
        Some(config) => AuthUser::from_headers(req.headers(), &config.jwt_secret),
        None => Err(SalaryError::Internal("App config missing")),
    };

    let user = match authenticated {
        Ok(user) => user,
        Err(e) => {
            debug!(path = %req.path(), reason = %e, "Rejected unauthenticated request");
            let resp = e.error_response();
            return Ok(req.into_response(resp));
        }
    };

    debug!(user_id = user.user_id, role = %user.role, path = %req.path(), "Authenticated request");
    req.extensions_mut().insert(user);

    next.call(req).await
}
