use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use cardoctor_core::AppError;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";

/// Deployment mode; decides the session cookie's cross-site flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeMode {
    #[default]
    Development,
    Production,
}

impl RuntimeMode {
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("production") => RuntimeMode::Production,
            _ => RuntimeMode::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == RuntimeMode::Production
    }
}

/// HTTP server settings. Database settings live in `cardoctor_db::DatabaseConfig`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub token_secret: String,
    pub mode: RuntimeMode,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `ACCESS_TOKEN_SECRET` (required)
    /// - `PORT` (optional, defaults to 5000)
    /// - `NODE_ENV` or `APP_ENV` (optional, `production` enables secure cookies)
    /// - `CORS_ORIGINS` (optional, comma-separated)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let token_secret = var("ACCESS_TOKEN_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("ACCESS_TOKEN_SECRET not set. Required to sign sessions.".into())
            })?;

        let port = match var("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().map_err(|_| {
                AppError::ConfigError(format!("Invalid PORT '{raw}': must be a port number"))
            })?,
        };

        let mode = RuntimeMode::from_env_value(var("NODE_ENV").or_else(|| var("APP_ENV")).as_deref());

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            port,
            token_secret,
            mode,
            cors_origins,
        })
    }

    /// CORS for the configured front-end origins. Credentials are allowed so
    /// browsers send the session cookie.
    pub fn cors_layer(&self) -> Result<CorsLayer, AppError> {
        let origins = self
            .cors_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o)
                    .map_err(|_| AppError::ConfigError(format!("Invalid CORS origin '{o}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true))
    }
}
