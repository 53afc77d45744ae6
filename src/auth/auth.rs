use crate::auth::jwt::verify_access_token;
use crate::config::Config;
use crate::error::SalaryError;
use crate::model::role::Role;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: u64,
    pub username: String,
    pub role: Role,

    /// Present only if this user is linked to an employee record
    pub employee_id: Option<u64>,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // Already verified by auth_middleware on protected scopes.
        if let Some(user) = req.extensions().get::<AuthUser>() {
            return ready(Ok(user.clone()));
        }

        let result = match req.app_data::<Data<Config>>() {
            Some(config) => AuthUser::from_headers(req.headers(), &config.jwt_secret),
            None => Err(SalaryError::Internal("App config missing")),
        };

        ready(result.map_err(Into::into))
    }
}

impl AuthUser {
    /// Decode the bearer access token in `Authorization`.
    pub fn from_headers(headers: &HeaderMap, secret: &str) -> Result<Self, SalaryError> {
        let header = headers
            .get(AUTHORIZATION)
            .ok_or(SalaryError::Unauthorized("Missing Authorization header"))?
            .to_str()
            .map_err(|_| SalaryError::Unauthorized("Invalid Authorization header encoding"))?;

        let token = header.strip_prefix("Bearer ").ok_or(SalaryError::Unauthorized(
            "Authorization header must start with Bearer",
        ))?;

        let claims = verify_access_token(token, secret).map_err(|e| {
            debug!(error = %e, "Token rejected");
            SalaryError::Unauthorized("Invalid or expired token")
        })?;

        let role = Role::from_id(claims.role).ok_or(SalaryError::Unauthorized("Invalid role"))?;

        Ok(AuthUser {
            user_id: claims.user_id,
            username: claims.sub,
            role,
            employee_id: claims.employee_id,
        })
    }

    pub fn require_admin(&self) -> Result<(), SalaryError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(SalaryError::Forbidden("Admin only"))
        }
    }

    pub fn require_hr_or_admin(&self) -> Result<(), SalaryError> {
        if self.role.is_staff() {
            Ok(())
        } else {
            Err(SalaryError::Forbidden("HR/Admin only"))
        }
    }

    /// Employee record linked to the caller, for self-service views.
    pub fn own_employee_id(&self) -> Result<u64, SalaryError> {
        self.employee_id
            .ok_or(SalaryError::Forbidden("No employee profile"))
    }

    /// Staff may act on anyone; everyone else only on their own record.
    pub fn require_self_or_staff(&self, employee_id: u64) -> Result<(), SalaryError> {
        if self.employee_id == Some(employee_id) {
            return Ok(());
        }
        self.require_hr_or_admin()
    }
}
