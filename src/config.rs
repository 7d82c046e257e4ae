//! Configuration module
//!
//! Everything is read from environment variables. Outside production a
//! `.env` file is loaded first.

use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::crypto::password::DEFAULT_COST;
use crate::infrastructure::database::DatabaseConfig;
use crate::shared::InfraError;

/// HTTP listener configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Session and password settings
#[derive(Clone)]
pub struct SecurityConfig {
    /// HS256 signing key (`SECRET_KEY`)
    pub secret_key: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("secret_key", &"***")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Log output settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
    /// "json" or "pretty"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    /// Apply pending migrations at startup
    pub migrate: bool,
    /// Notices raised while loading, logged once tracing is up
    pub warnings: Vec<String>,
}

/// Load `.env` into the process environment unless `PROD=TRUE`.
///
/// Returns whether a file was loaded.
pub fn load_env() -> bool {
    if is_true(std::env::var("PROD").ok().as_deref()) {
        return false;
    }
    dotenvy::dotenv().is_ok()
}

fn is_true(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, InfraError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Blank values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, InfraError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let secret_key = get("SECRET_KEY")
            .ok_or_else(|| InfraError::Config("SECRET_KEY must be set".into()))?;

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| InfraError::Config(format!("PORT is not a valid port: {}", raw)))?,
            None => ServerConfig::default().port,
        };

        let bcrypt_cost = match get("BCRYPT_COST") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|c| (4..=31).contains(c))
                .ok_or_else(|| {
                    InfraError::Config(format!("BCRYPT_COST must be between 4 and 31: {}", raw))
                })?,
            None => DEFAULT_COST,
        };

        let mut warnings = Vec::new();

        let database = if let Some(url) = get("DATABASE_URL") {
            DatabaseConfig {
                url,
                ..DatabaseConfig::default()
            }
        } else if let Some(host) = get("DB_HOST") {
            let required = |key: &str| {
                get(key).ok_or_else(|| InfraError::Config(format!("{} must be set", key)))
            };
            DatabaseConfig::postgres(
                &host,
                &required("DB_USER")?,
                &required("DB_PASSWORD")?,
                &required("DB_NAME")?,
                &get("DB_PORT").unwrap_or_else(|| "5432".to_string()),
            )
        } else {
            let fallback = DatabaseConfig::default();
            warnings.push(format!(
                "Neither DATABASE_URL nor DB_HOST is set, using {}",
                fallback.url
            ));
            fallback
        };

        let logging = LoggingConfig {
            level: get("LOG_LEVEL").unwrap_or_else(|| LoggingConfig::default().level),
            format: get("LOG_FORMAT").unwrap_or_else(|| LoggingConfig::default().format),
        };

        Ok(Self {
            server: ServerConfig {
                host: get("HOST").unwrap_or_else(|| ServerConfig::default().host),
                port,
            },
            database,
            security: SecurityConfig {
                secret_key,
                token_ttl_hours: 1,
                bcrypt_cost,
            },
            logging,
            migrate: is_true(get("MIGRATE").as_deref()),
            warnings,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            expiration_hours: self.security.token_ttl_hours,
            ..JwtConfig::new(self.security.secret_key.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn secret_key_is_required() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "9000")])).unwrap_err();
        assert!(err.to_string().contains("SECRET_KEY"));

        let blank = AppConfig::from_lookup(lookup(&[("SECRET_KEY", "  ")]));
        assert!(blank.is_err());
    }

    #[test]
    fn defaults_apply() {
        let cfg = AppConfig::from_lookup(lookup(&[("SECRET_KEY", "s3cret")])).unwrap();
        assert_eq!(cfg.address(), "0.0.0.0:8080");
        assert_eq!(cfg.security.bcrypt_cost, DEFAULT_COST);
        assert_eq!(cfg.logging.level, "info");
        assert!(!cfg.migrate);
        assert_eq!(cfg.jwt_config().expiration_secs(), 3600);
    }

    #[test]
    fn postgres_parts_build_the_url() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("SECRET_KEY", "s3cret"),
            ("DB_HOST", "db"),
            ("DB_USER", "shop"),
            ("DB_PASSWORD", "pw"),
            ("DB_NAME", "store"),
            ("DB_PORT", "6543"),
            ("MIGRATE", "TRUE"),
            ("PORT", "3000"),
        ]))
        .unwrap();

        assert_eq!(cfg.database.url, "postgres://shop:pw@db:6543/store?sslmode=disable");
        assert!(cfg.migrate);
        assert_eq!(cfg.server.port, 3000);
    }

    #[test]
    fn missing_db_part_is_reported() {
        let err = AppConfig::from_lookup(lookup(&[
            ("SECRET_KEY", "s3cret"),
            ("DB_HOST", "db"),
            ("DB_USER", "shop"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DB_PASSWORD"));
    }

    #[test]
    fn missing_database_settings_are_reported() {
        let cfg = AppConfig::from_lookup(lookup(&[("SECRET_KEY", "s3cret")])).unwrap();
        assert_eq!(cfg.warnings.len(), 1);
        assert!(cfg.warnings[0].contains("DATABASE_URL"));

        let explicit = AppConfig::from_lookup(lookup(&[
            ("SECRET_KEY", "s3cret"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap();
        assert!(explicit.warnings.is_empty());
    }

    #[test]
    fn database_url_wins_over_parts() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("SECRET_KEY", "s3cret"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_HOST", "db"),
        ]))
        .unwrap();
        assert_eq!(cfg.database.url, "sqlite::memory:");
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(AppConfig::from_lookup(lookup(&[("SECRET_KEY", "s"), ("PORT", "http")])).is_err());
        assert!(
            AppConfig::from_lookup(lookup(&[("SECRET_KEY", "s"), ("BCRYPT_COST", "2")])).is_err()
        );
    }

    #[test]
    fn secret_is_not_printed() {
        let cfg = AppConfig::from_lookup(lookup(&[("SECRET_KEY", "hunter2")])).unwrap();
        assert!(!format!("{:?}", cfg).contains("hunter2"));
    }
}
