use std::env;

/// Process configuration, read once at startup.
///
/// The signing secret and store URL are mandatory: the process refuses to
/// start without them rather than falling back to an insecure default.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup. Kept separate from
    /// `from_env` so tests don't have to mutate process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVar("DATABASE_URL"))?;

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVar("JWT_SECRET"))?;

        let jwt_expiry_hours = match lookup("JWT_EXPIRY_HOURS") {
            Some(v) => v
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidVar("JWT_EXPIRY_HOURS", v))?,
            None => 24,
        };

        let port = match lookup("PORT") {
            Some(v) => v
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidVar("PORT", v))?,
            None => 3000,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiry_hours,
            port,
        })
    }
}
