use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::schemas::View;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value `{value}`")]
    Invalid { key: &'static str, value: String },
}

// Главная структура конфигурации
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub schema: SchemaConfig,
}

// Настройки приложения
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
}

// Настройки валидации событий
#[derive(Debug, Clone)]
pub struct SchemaConfig {
    pub view: View,
    pub fail_fast: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Собирает конфигурацию из произвольного источника переменных.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            app: AppConfig {
                environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
                rust_log: lookup("RUST_LOG").unwrap_or_else(|| "event_catalog=info".to_string()),
            },
            schema: SchemaConfig {
                view: parse_or(&lookup, "EVENT_VIEW", View::Details)?,
                fail_fast: parse_or(&lookup, "EVENT_FAIL_FAST", false)?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
