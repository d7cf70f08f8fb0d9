use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    /// Every `/api` request is served under an anonymous identity.
    Disabled,
    /// `/api` requests need a bearer token signed with `JWT_SECRET`.
    Session,
}

impl AuthMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "session" | "jwt" => AuthMode::Session,
            _ => AuthMode::Disabled,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub notion_api_key: Option<SecretString>,
    pub notion_api_url: String,
    pub notion_version: String,
    pub uploads_database_id: Option<String>,
    pub flashcards_database_id: Option<String>,
    pub quizzes_database_id: Option<String>,
    pub cache_ttl_secs: u64,
    pub record_scores_in_store: bool,
    pub auth_mode: AuthMode,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            notion_api_key: get("NOTION_API_KEY").map(SecretString::from),
            notion_api_url: get("NOTION_API_URL")
                .unwrap_or_else(|| "https://api.notion.com/v1".to_string()),
            notion_version: get("NOTION_VERSION").unwrap_or_else(|| "2022-06-28".to_string()),
            uploads_database_id: get("NOTION_DATABASE_ID_UPLOADS"),
            flashcards_database_id: get("NOTION_DATABASE_ID_FLASHCARDS"),
            quizzes_database_id: get("NOTION_DATABASE_ID_QUIZZES"),
            cache_ttl_secs: get("CACHE_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            record_scores_in_store: get("RECORD_SCORES_IN_STORE")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            auth_mode: get("AUTH_MODE")
                .map(|v| AuthMode::parse(&v))
                .unwrap_or(AuthMode::Disabled),
            jwt_secret: SecretString::from(
                get("JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: get("JWT_EXPIRATION_HOURS")
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            web_server_host: get("WEB_SERVER_HOST").unwrap_or_else(|| "localhost".to_string()),
            web_server_port: get("WEB_SERVER_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN"),
        }
    }

    /// Names of the store settings that are not set. Each one disables the
    /// features that depend on it.
    pub fn missing_store_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.notion_api_key.is_none() {
            missing.push("NOTION_API_KEY");
        }
        if self.uploads_database_id.is_none() {
            missing.push("NOTION_DATABASE_ID_UPLOADS");
        }
        if self.flashcards_database_id.is_none() {
            missing.push("NOTION_DATABASE_ID_FLASHCARDS");
        }
        if self.quizzes_database_id.is_none() {
            missing.push("NOTION_DATABASE_ID_QUIZZES");
        }
        missing
    }

    /// Rejects settings that must not reach production when session auth is on.
    pub fn validate_for_production(&self) -> AppResult<()> {
        if self.auth_mode != AuthMode::Session {
            return Ok(());
        }

        let jwt_secret = self.jwt_secret.expose_secret();
        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::NotConfigured(
                "JWT_SECRET is using the default value; set it to a secure random string"
                    .to_string(),
            ));
        }
        if jwt_secret.len() < 32 {
            return Err(AppError::NotConfigured(format!(
                "JWT_SECRET is too short ({}); it must be at least 32 characters",
                jwt_secret.len()
            )));
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            notion_api_key: Some(SecretString::from("secret_test_key".to_string())),
            notion_api_url: "http://127.0.0.1:9".to_string(),
            notion_version: "2022-06-28".to_string(),
            uploads_database_id: Some("uploads-db".to_string()),
            flashcards_database_id: Some("flashcards-db".to_string()),
            quizzes_database_id: Some("quizzes-db".to_string()),
            cache_ttl_secs: 0,
            record_scores_in_store: false,
            auth_mode: AuthMode::Disabled,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: None,
        }
    }
}
