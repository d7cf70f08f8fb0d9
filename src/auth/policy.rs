use crate::{
    auth::{Claims, JwtService},
    config::{AuthMode, Config},
    errors::{AppError, AppResult},
};

/// How `/api` requests are authenticated. Routing does not depend on the variant.
#[derive(Clone)]
pub enum AuthPolicy {
    Open,
    Session(JwtService),
}

impl AuthPolicy {
    pub fn from_config(config: &Config) -> Self {
        match config.auth_mode {
            AuthMode::Disabled => AuthPolicy::Open,
            AuthMode::Session => AuthPolicy::Session(JwtService::new(
                &config.jwt_secret,
                config.jwt_expiration_hours,
            )),
        }
    }

    /// Resolves the caller from the raw `Authorization` header value.
    pub fn authenticate(&self, authorization: Option<&str>) -> AppResult<Claims> {
        match self {
            AuthPolicy::Open => Ok(Claims::anonymous()),
            AuthPolicy::Session(jwt_service) => {
                let header = authorization
                    .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;
                let token = header.strip_prefix("Bearer ").ok_or_else(|| {
                    AppError::Unauthorized("Invalid authorization header format".to_string())
                })?;
                jwt_service.validate_token(token.trim())
            }
        }
    }
}
