//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable
//! overrides. The configuration file path defaults to `config.yaml` but can be
//! specified via `-f` flag or `CATALOGD_CONFIG` environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources
//! override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `CATALOGD_` override
//!    YAML values
//! 3. **DATABASE_URL** - Special case: overrides `database.url` if set
//!
//! For nested config values, use double underscores in environment variables.
//! For example, `CATALOGD_DATABASE__URL=sqlite://catalog.db` sets the
//! `database.url` field.
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! CATALOGD_PORT=8080
//! CATALOGD_SECRET_KEY="change-me"
//! CATALOGD_ADMIN_PASSWORD="hunter2"
//! CATALOGD_TOKEN_EXPIRY="12h"
//! CATALOGD_DATABASE__URL="sqlite://catalog.db"
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "CATALOGD_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// Loaded from YAML and environment variables; every field has a default so a
/// missing config file still yields a runnable (if secret-less) config.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// SQLite database configuration
    pub database: DatabaseConfig,
    /// Username of the initial admin identity (created on first startup)
    pub admin_username: String,
    /// Password for the initial admin identity. When unset, no admin is
    /// bootstrapped and every write route stays unreachable.
    pub admin_password: Option<String>,
    /// Secret key for JWT signing (required)
    pub secret_key: Option<String>,
    /// Session token lifetime (humantime format, e.g. "1day", "12h")
    #[serde(with = "humantime_serde")]
    pub token_expiry: Duration,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            database: DatabaseConfig::default(),
            admin_username: "admin".to_string(),
            admin_password: None,
            secret_key: None,
            token_expiry: Duration::from_secs(24 * 60 * 60),
            cors: CorsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite connection URL (`sqlite://path.db`, or `sqlite::memory:`)
    pub url: String,
    /// Maximum connections in the pool
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://catalogd.db".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Origins allowed to call the API from a browser. Empty means no
    /// cross-origin access.
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Config {
    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("CATALOGD_").split("__"))
    }

    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let mut config: Self = Self::figment(args).extract()?;

        // DATABASE_URL wins over everything, matching deployment conventions
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }

        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        if self.secret_key.is_none() {
            return Err(Error::Internal {
                operation: "Config validation: secret_key is not configured. \
                 Please set CATALOGD_SECRET_KEY environment variable or add secret_key to the config file."
                    .to_string(),
            });
        }

        if self.token_expiry < Duration::from_secs(60) {
            return Err(Error::Internal {
                operation: "Config validation: token_expiry must be at least 1 minute".to_string(),
            });
        }
        if self.token_expiry > Duration::from_secs(30 * 24 * 60 * 60) {
            return Err(Error::Internal {
                operation: "Config validation: token_expiry must be at most 30 days".to_string(),
            });
        }

        if let Some(password) = &self.admin_password {
            if password.is_empty() {
                return Err(Error::Internal {
                    operation: "Config validation: admin_password must not be empty when set".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(path: &str) -> Args {
        Args {
            config: path.to_string(),
            validate: false,
        }
    }

    #[test]
    fn test_defaults_without_config_file() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CATALOGD_SECRET_KEY", "jail-secret");

            let config = Config::load(&args("missing.yaml")).expect("load");
            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.port, 5000);
            assert_eq!(config.admin_username, "admin");
            assert_eq!(config.token_expiry, Duration::from_secs(24 * 60 * 60));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
                port: 6000
                secret_key: file-secret
                token_expiry: 12h
                database:
                  url: sqlite://from-file.db
                "#,
            )?;
            jail.set_env("CATALOGD_PORT", "7000");
            jail.set_env("CATALOGD_DATABASE__URL", "sqlite://from-env.db");

            let config = Config::load(&args("config.yaml")).expect("load");
            assert_eq!(config.port, 7000);
            assert_eq!(config.database.url, "sqlite://from-env.db");
            assert_eq!(config.secret_key.as_deref(), Some("file-secret"));
            assert_eq!(config.token_expiry, Duration::from_secs(12 * 60 * 60));
            Ok(())
        });
    }

    #[test]
    fn test_database_url_env_wins() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CATALOGD_SECRET_KEY", "jail-secret");
            jail.set_env("DATABASE_URL", "sqlite://deploy.db");

            let config = Config::load(&args("missing.yaml")).expect("load");
            assert_eq!(config.database.url, "sqlite://deploy.db");
            Ok(())
        });
    }

    #[test]
    fn test_missing_secret_key_fails_validation() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_token_expiry_bounds() {
        let mut config = Config {
            secret_key: Some("s".to_string()),
            ..Default::default()
        };

        config.token_expiry = Duration::from_secs(10);
        assert!(config.validate().is_err());

        config.token_expiry = Duration::from_secs(60 * 24 * 60 * 60);
        assert!(config.validate().is_err());

        config.token_expiry = Duration::from_secs(24 * 60 * 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_admin_password_rejected() {
        let config = Config {
            secret_key: Some("s".to_string()),
            admin_password: Some(String::new()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
