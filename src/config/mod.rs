use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub booking: BookingConfig,
    pub sessions: SessionConfig,
    pub features: FeatureFlags,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
    pub cors_permissive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

// Ограничения выбора мест и билетов
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Лимит мест для событий, где он не задан в схеме зала.
    pub max_selectable_seats: u32,
    /// Меньше этого остатка категория помечается как "заканчивается".
    pub low_stock_threshold: u32,
}

// Жизненный цикл сессий выбора
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub idle_ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
}

// Feature flags для включения/выключения функциональности
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    pub enable_dashboard: bool,
    pub enable_event_editing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                environment: "development".to_string(),
                rust_log: "eventify_storefront=debug,tower_http=debug".to_string(),
                log_format: LogFormat::Pretty,
                cors_permissive: true,
            },
            booking: BookingConfig {
                max_selectable_seats: 6,
                low_stock_threshold: 10,
            },
            sessions: SessionConfig {
                idle_ttl_seconds: 1800,
                sweep_interval_seconds: 60,
            },
            features: FeatureFlags {
                enable_dashboard: true,
                enable_event_editing: true,
            },
        }
    }
}

/// Читает переменную окружения; если не задана - значение по умолчанию.
fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        Ok(Config {
            app: AppConfig {
                host: env_or("HOST", defaults.app.host)?,
                port: env_or("PORT", defaults.app.port)?,
                environment: env_or("ENVIRONMENT", defaults.app.environment)?,
                rust_log: env_or("RUST_LOG", defaults.app.rust_log)?,
                log_format: env_or("LOG_FORMAT", defaults.app.log_format)?,
                cors_permissive: env_or("CORS_PERMISSIVE", defaults.app.cors_permissive)?,
            },
            booking: BookingConfig {
                max_selectable_seats: env_or("MAX_SELECTABLE_SEATS", defaults.booking.max_selectable_seats)?,
                low_stock_threshold: env_or("LOW_STOCK_THRESHOLD", defaults.booking.low_stock_threshold)?,
            },
            sessions: SessionConfig {
                idle_ttl_seconds: env_or("SESSION_IDLE_TTL_SECONDS", defaults.sessions.idle_ttl_seconds)?,
                sweep_interval_seconds: env_or(
                    "SESSION_SWEEP_INTERVAL_SECONDS",
                    defaults.sessions.sweep_interval_seconds,
                )?,
            },
            features: FeatureFlags {
                enable_dashboard: env_or("ENABLE_DASHBOARD", defaults.features.enable_dashboard)?,
                enable_event_editing: env_or("ENABLE_EVENT_EDITING", defaults.features.enable_event_editing)?,
            },
        })
    }
}
