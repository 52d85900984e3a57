use std::str::FromStr;

use notes_core::telegram::DEFAULT_MAX_AUTH_AGE_SECS;

use crate::auth::jwt::{JwtConfig, DEFAULT_TOKEN_EXPIRY_SECS};

/// A required variable is missing or a variable does not parse.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Telegram login widget settings.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Token of the bot the login widget is bound to.
    pub bot_token: String,
    /// Maximum accepted age of `auth_date`, in seconds.
    pub max_auth_age_secs: i64,
}

/// Server configuration loaded from environment variables.
///
/// Built once at startup and shared read-only through
/// [`AppState`](crate::state::AppState).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Upper bound of the connection pool (default: `10`).
    pub database_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session token signing settings.
    pub jwt: JwtConfig,
    pub telegram: TelegramConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                      | Required | Default                 |
    /// |------------------------------|----------|-------------------------|
    /// | `DATABASE_URL`               | **yes**  | --                      |
    /// | `DATABASE_MAX_CONNECTIONS`   | no       | `10`                    |
    /// | `HOST`                       | no       | `0.0.0.0`               |
    /// | `PORT`                       | no       | `3000`                  |
    /// | `CORS_ORIGINS`               | no       | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`       | no       | `30`                    |
    /// | `APP_KEY`                    | **yes**  | --                      |
    /// | `JWT_ISSUER`                 | no       | unset                   |
    /// | `JWT_EXPIRY_SECS`            | no       | `86400`                 |
    /// | `BOT_TOKEN`                  | **yes**  | --                      |
    /// | `TELEGRAM_AUTH_MAX_AGE_SECS` | no       | `300`                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let cors_origins: Vec<String> = env
            .or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let app_key = env.required("APP_KEY")?;
        let bot_token = env.required("BOT_TOKEN")?;

        Ok(Self {
            host: env.or("HOST", "0.0.0.0"),
            port: env.parsed("PORT", 3000)?,
            database_url: env.required("DATABASE_URL")?,
            database_max_connections: env.parsed("DATABASE_MAX_CONNECTIONS", 10)?,
            cors_origins,
            request_timeout_secs: env.parsed("REQUEST_TIMEOUT_SECS", 30)?,
            jwt: JwtConfig {
                secret: app_key,
                issuer: env.optional("JWT_ISSUER"),
                expiry_secs: env.parsed("JWT_EXPIRY_SECS", DEFAULT_TOKEN_EXPIRY_SECS)?,
            },
            telegram: TelegramConfig {
                bot_token,
                max_auth_age_secs: env
                    .parsed("TELEGRAM_AUTH_MAX_AGE_SECS", DEFAULT_MAX_AUTH_AGE_SECS)?,
            },
        })
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Unset and empty values are treated the same.
    fn optional(&self, var: &str) -> Option<String> {
        (self.lookup)(var).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, var: &'static str) -> Result<String, ConfigError> {
        self.optional(var).ok_or(ConfigError::Missing(var))
    }

    fn or(&self, var: &str, default: &str) -> String {
        self.optional(var).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T: FromStr>(&self, var: &'static str, default: T) -> Result<T, ConfigError> {
        match self.optional(var) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { var, value }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DATABASE_URL", "postgres://localhost/notes"),
        ("APP_KEY", "app-secret"),
        ("BOT_TOKEN", "123:abc"),
    ];

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.jwt.expiry_secs, 86_400);
        assert_eq!(config.jwt.issuer, None);
        assert_eq!(config.telegram.max_auth_age_secs, 300);
    }

    #[test]
    fn missing_bot_token_is_reported() {
        let result = load(&REQUIRED[..2]);
        assert_matches!(result, Err(ConfigError::Missing("BOT_TOKEN")));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut vars = REQUIRED.to_vec();
        vars[1] = ("APP_KEY", "  ");
        assert_matches!(load(&vars), Err(ConfigError::Missing("APP_KEY")));
    }

    #[test]
    fn invalid_port_is_reported() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "eighty"));
        assert_matches!(load(&vars), Err(ConfigError::Invalid { var: "PORT", .. }));
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("CORS_ORIGINS", "https://a.example, https://b.example,"));
        let config = load(&vars).unwrap();
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }
}
