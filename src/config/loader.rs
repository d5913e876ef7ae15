//! Load config from environment variables (after `.env`, if the binary loaded one).

use crate::config::types::*;
use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;
use url::Url;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_NAME: &str = "Students";
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr: SocketAddr = parse_or(&get, "BIND_ADDR", DEFAULT_BIND_ADDR.parse().ok())?;

        let max_connections: u32 = parse_or(&get, "DB_MAX_CONNECTIONS", Some(DEFAULT_MAX_CONNECTIONS))?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                reason: "must be greater than zero".into(),
            });
        }

        let database = DatabaseConfig {
            host: get("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.into()),
            port: parse_or(&get, "DB_PORT", Some(DEFAULT_DB_PORT))?,
            name: get("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.into()),
            user: get("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.into()),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            max_connections,
            create_database: parse_bool(&get, "DB_CREATE_DATABASE", true)?,
        };

        let base_url = match get("OPENAI_BASE_URL") {
            Some(raw) => Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                key: "OPENAI_BASE_URL",
                reason: e.to_string(),
            })?,
            None => Url::parse(DEFAULT_OPENAI_BASE_URL).map_err(|e| ConfigError::Invalid {
                key: "OPENAI_BASE_URL",
                reason: e.to_string(),
            })?,
        };
        let generation = GenerationConfig {
            api_key: get("OPENAI_API_KEY"),
            base_url,
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into()),
        };

        Ok(Config {
            bind_addr,
            database,
            generation,
        })
    }
}

fn parse_or<G, T>(get: &G, key: &'static str, default: Option<T>) -> Result<T, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: format!("'{}': {}", raw, e),
        }),
        None => default.ok_or_else(|| ConfigError::Invalid {
            key,
            reason: "missing".into(),
        }),
    }
}

fn parse_bool<G>(get: &G, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                key,
                reason: format!("'{}' is not a boolean", v),
            }),
        },
    }
}
