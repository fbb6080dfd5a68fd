use cardoctor_core::AppError;

/// Atlas cluster the service was deployed against.
pub const DEFAULT_DB_HOST: &str = "cluster0.up5eg.mongodb.net";
pub const DEFAULT_DB_NAME: &str = "carDoctorPractice";

/// Configuration for the MongoDB client.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database: String,
}

impl DatabaseConfig {
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
        }
    }

    /// Read configuration from environment variables.
    ///
    /// - `MONGODB_URI` (optional, full connection string; wins over the parts below)
    /// - `DB_USER`, `DB_PASS` (required when `MONGODB_URI` is unset)
    /// - `DB_HOST` (optional, defaults to the Atlas cluster host)
    /// - `DB_NAME` (optional, defaults to `carDoctorPractice`)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database = var("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        if let Some(uri) = var("MONGODB_URI").filter(|u| !u.is_empty()) {
            return Ok(Self { uri, database });
        }

        let user = var("DB_USER").ok_or_else(|| {
            AppError::ConfigError("DB_USER not set. Required when MONGODB_URI is absent.".into())
        })?;
        let pass = var("DB_PASS").ok_or_else(|| {
            AppError::ConfigError("DB_PASS not set. Required when MONGODB_URI is absent.".into())
        })?;
        let host = var("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string());

        Ok(Self {
            uri: atlas_uri(&user, &pass, &host),
            database,
        })
    }
}

fn atlas_uri(user: &str, pass: &str, host: &str) -> String {
    format!("mongodb+srv://{user}:{pass}@{host}/?retryWrites=true&w=majority&appName=Cluster0")
}
