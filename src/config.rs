use axum_extra::extract::cookie::Key;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::error::HobbyistError;

/// Minimum length of `cookie_secret`; the cookie key derives signing and
/// encryption material from it.
pub const MIN_COOKIE_SECRET_LEN: usize = 64;

/// Runtime configuration, read from `HOBBYIST_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    /// Secret for the private flash cookies. A random key is used when unset.
    pub cookie_secret: Option<String>,
    pub db_timeout_secs: u64,
    pub db_max_connections: u32,
    /// Create the `people` table on `serve` when it does not exist yet.
    pub auto_migrate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:hobbyist.sqlite".to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            loglevel: "info".to_string(),
            cookie_secret: None,
            db_timeout_secs: 5,
            db_max_connections: 5,
            auto_migrate: true,
        }
    }
}

impl Config {
    /// Defaults overlaid with `HOBBYIST_`-prefixed environment variables.
    pub fn load() -> Result<Self, HobbyistError> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("HOBBYIST_"));
        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self, HobbyistError> {
        let cfg: Config = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), HobbyistError> {
        if self.database_url.trim().is_empty() {
            return Err(HobbyistError::InvalidConfig(
                "database_url must not be empty".to_string(),
            ));
        }
        if self.db_timeout_secs == 0 {
            return Err(HobbyistError::InvalidConfig(
                "db_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.db_max_connections == 0 {
            return Err(HobbyistError::InvalidConfig(
                "db_max_connections must be greater than zero".to_string(),
            ));
        }
        if let Some(secret) = &self.cookie_secret
            && secret.len() < MIN_COOKIE_SECRET_LEN
        {
            return Err(HobbyistError::InvalidConfig(format!(
                "cookie_secret must be at least {MIN_COOKIE_SECRET_LEN} bytes"
            )));
        }
        Ok(())
    }

    pub fn db_timeout(&self) -> Duration {
        Duration::from_secs(self.db_timeout_secs)
    }

    /// Key used to encrypt flash cookies.
    pub fn cookie_key(&self) -> Result<Key, HobbyistError> {
        match &self.cookie_secret {
            Some(secret) => Key::try_from(secret.as_bytes())
                .map_err(|e| HobbyistError::InvalidConfig(format!("cookie_secret: {e}"))),
            None => {
                warn!("cookie_secret not set; flash cookies will not survive a restart");
                Ok(Key::generate())
            }
        }
    }
}
