use std::env;

use secrecy::SecretString;

use crate::{
    errors::{AppError, AppResult},
    services::grading::UnknownQuestionPolicy,
};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub unknown_question_policy: UnknownQuestionPolicy,
    pub app_env: String,
}

impl Config {
    /// Fails when a variable is set to a value that cannot be honoured.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "examroom-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            unknown_question_policy: parse_unknown_question_policy(
                env::var("UNKNOWN_QUESTION_POLICY").ok().as_deref(),
            )?,
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Rejects secrets that are only fit for local development.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::ValidationError(
                "JWT_SECRET is using the default value".to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::ValidationError(format!(
                "JWT_SECRET is too short ({}), must be at least 32 characters",
                jwt_secret.len()
            )));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.web_server_host.clone(), self.web_server_port)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "examroom-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            unknown_question_policy: UnknownQuestionPolicy::Ignore,
            app_env: "test".to_string(),
        }
    }
}

/// Unset means the default policy; a set but unknown value is an error so a
/// typo never silently loosens grading.
fn parse_unknown_question_policy(raw: Option<&str>) -> AppResult<UnknownQuestionPolicy> {
    match raw {
        None => Ok(UnknownQuestionPolicy::default()),
        Some(value) => value.parse().map_err(|e| {
            log::error!("Rejected UNKNOWN_QUESTION_POLICY value '{}'", value);
            e
        }),
    }
}
