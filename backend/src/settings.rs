//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `REGISTRAR_*` environment variables and an
//! optional config file, in that order of precedence. Every field is optional;
//! accessors apply the defaults.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use rand::RngCore;
use rand::rngs::OsRng;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::TokenLifetimes;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
const DEFAULT_SIGNUP_TTL_SECS: u64 = 7200;
const DEFAULT_LOGIN_TTL_SECS: u64 = 3600;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const EPHEMERAL_SECRET_LEN: usize = 32;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("bind address `{value}` is not a socket address")]
    InvalidBindAddr { value: String },
    #[error("a JWT secret is required; set REGISTRAR_JWT_SECRET")]
    MissingJwtSecret,
    #[error("{field} must be greater than zero")]
    ZeroTokenLifetime { field: &'static str },
}

/// Configuration values for the registrar service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRAR")]
pub struct RegistrarSettings {
    /// Socket address to listen on; defaults to `0.0.0.0:4000`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// HMAC secret for bearer tokens.
    pub jwt_secret: Option<String>,
    /// Lifetime of tokens issued at signup, in seconds.
    pub signup_token_ttl_secs: Option<u64>,
    /// Lifetime of tokens issued at login, in seconds.
    pub login_token_ttl_secs: Option<u64>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl RegistrarSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
            })
    }

    pub fn token_lifetimes(&self) -> Result<TokenLifetimes, SettingsError> {
        let secs = |value: Option<u64>, default: u64, field: &'static str| {
            match value.unwrap_or(default) {
                0 => Err(SettingsError::ZeroTokenLifetime { field }),
                n => Ok(Duration::from_secs(n)),
            }
        };
        Ok(TokenLifetimes {
            signup: secs(
                self.signup_token_ttl_secs,
                DEFAULT_SIGNUP_TTL_SECS,
                "signup_token_ttl_secs",
            )?,
            login: secs(
                self.login_token_ttl_secs,
                DEFAULT_LOGIN_TTL_SECS,
                "login_token_ttl_secs",
            )?,
        })
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| {
                PoolConfig::new(url).with_max_size(
                    self.db_max_connections
                        .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
                )
            })
    }

    /// Signing secret for bearer tokens.
    ///
    /// Debug builds without a configured secret get a random one, so tokens
    /// stop verifying after a restart. Release builds refuse to start.
    pub fn jwt_secret(&self) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        match self.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => Ok(Zeroizing::new(secret.as_bytes().to_vec())),
            None if cfg!(debug_assertions) => {
                warn!("no JWT secret configured; using an ephemeral secret (dev only)");
                let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
                OsRng.fill_bytes(&mut bytes);
                Ok(bytes)
            }
            None => Err(SettingsError::MissingJwtSecret),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "REGISTRAR_BIND_ADDR",
        "REGISTRAR_DATABASE_URL",
        "REGISTRAR_JWT_SECRET",
        "REGISTRAR_SIGNUP_TOKEN_TTL_SECS",
        "REGISTRAR_LOGIN_TOKEN_TTL_SECS",
        "REGISTRAR_DB_MAX_CONNECTIONS",
    ];

    fn load_from_empty_args() -> RegistrarSettings {
        RegistrarSettings::load_from_iter([OsString::from("registrar")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 4000)))
        );
        assert!(settings.pool_config().is_none());
        assert_eq!(settings.token_lifetimes(), Ok(TokenLifetimes::default()));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("REGISTRAR_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "REGISTRAR_DATABASE_URL",
                Some("postgres://localhost/registrar".to_owned()),
            ),
            ("REGISTRAR_JWT_SECRET", Some("s3cret".to_owned())),
            ("REGISTRAR_SIGNUP_TOKEN_TTL_SECS", Some("60".to_owned())),
            ("REGISTRAR_LOGIN_TOKEN_TTL_SECS", Some("30".to_owned())),
            ("REGISTRAR_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 9000)))
        );
        let pool = settings.pool_config().expect("database configured");
        assert_eq!(pool.database_url(), "postgres://localhost/registrar");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(
            settings.token_lifetimes(),
            Ok(TokenLifetimes {
                signup: Duration::from_secs(60),
                login: Duration::from_secs(30),
            })
        );
        assert_eq!(
            settings.jwt_secret().expect("secret").as_slice(),
            b"s3cret"
        );
    }

    #[rstest]
    fn malformed_bind_addr_is_rejected() {
        let settings = RegistrarSettings {
            bind_addr: Some("localhost".to_owned()),
            ..RegistrarSettings::default()
        };
        assert_eq!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr {
                value: "localhost".to_owned()
            })
        );
    }

    #[rstest]
    fn zero_token_lifetime_is_rejected() {
        let settings = RegistrarSettings {
            login_token_ttl_secs: Some(0),
            ..RegistrarSettings::default()
        };
        assert_eq!(
            settings.token_lifetimes(),
            Err(SettingsError::ZeroTokenLifetime {
                field: "login_token_ttl_secs"
            })
        );
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let settings = RegistrarSettings {
            database_url: Some("  ".to_owned()),
            ..RegistrarSettings::default()
        };
        assert!(settings.pool_config().is_none());
    }

    #[cfg(debug_assertions)]
    #[rstest]
    fn debug_builds_fall_back_to_an_ephemeral_secret() {
        let settings = RegistrarSettings::default();
        let first = settings.jwt_secret().expect("ephemeral secret");
        let second = settings.jwt_secret().expect("ephemeral secret");
        assert_eq!(first.len(), EPHEMERAL_SECRET_LEN);
        assert_ne!(first.as_slice(), second.as_slice());
    }
}
