use std::env;
use std::net::SocketAddr;
use std::sync::OnceLock;

use teloxide::types::AllowedUpdate;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} not set")]
    Missing(&'static str),
    #[error("environment variable {key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub admin_key: String,
    pub telegram: Option<TelegramConfig>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateMode {
    LongPolling,
    Webhook,
}

#[derive(Clone, Debug)]
pub struct TelegramConfig {
    pub token: String,
    pub update_mode: UpdateMode,
    pub host_url: Option<Url>,
    pub webhook_addr: SocketAddr,
    pub allowed_updates: Vec<AllowedUpdate>,
    pub notify_chat_id: Option<i64>,
}

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_WEBHOOK_ADDR: &str = "0.0.0.0:8443";

impl EnvConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so parsing can run without touching the process env.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            get(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let port = get("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let telegram = match get("TELEGRAM_TOKEN").filter(|t| !t.trim().is_empty()) {
            Some(token) => Some(TelegramConfig::from_lookup(token, &get)?),
            None => None,
        };

        Ok(EnvConfig {
            port,
            db_url: required("POSTGRES_URI")?,
            admin_key: required("ADMIN_KEY")?,
            telegram,
        })
    }
}

impl TelegramConfig {
    fn from_lookup<F>(token: String, get: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let update_mode = match get("TELEGRAM_UPDATE_MODE") {
            Some(mode) => parse_update_mode(&mode)?,
            None => UpdateMode::LongPolling,
        };

        let host_url = match get("TELEGRAM_HOST_URL").filter(|u| !u.trim().is_empty()) {
            Some(raw) => Some(Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
                key: "TELEGRAM_HOST_URL",
                reason: e.to_string(),
            })?),
            None => None,
        };
        if update_mode == UpdateMode::Webhook && host_url.is_none() {
            return Err(ConfigError::Missing("TELEGRAM_HOST_URL"));
        }

        let webhook_addr = get("TELEGRAM_WEBHOOK_ADDR")
            .unwrap_or_else(|| DEFAULT_WEBHOOK_ADDR.to_string())
            .trim()
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "TELEGRAM_WEBHOOK_ADDR",
                reason: e.to_string(),
            })?;

        let allowed_updates = get("TELEGRAM_ALLOWED_UPDATES").unwrap_or_else(|| "message".into());
        let allowed_updates = parse_allowed_updates(&allowed_updates)?;

        let notify_chat_id = match get("TELEGRAM_NOTIFY_CHAT_ID").filter(|c| !c.trim().is_empty()) {
            Some(raw) => Some(raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "TELEGRAM_NOTIFY_CHAT_ID",
                reason: format!("`{raw}` is not a chat id"),
            })?),
            None => None,
        };

        Ok(TelegramConfig {
            token,
            update_mode,
            host_url,
            webhook_addr,
            allowed_updates,
            notify_chat_id,
        })
    }
}

fn parse_update_mode(raw: &str) -> Result<UpdateMode, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "long_polling" | "long-polling" | "longpolling" | "polling" => Ok(UpdateMode::LongPolling),
        "webhook" => Ok(UpdateMode::Webhook),
        other => Err(ConfigError::Invalid {
            key: "TELEGRAM_UPDATE_MODE",
            reason: format!("unknown update mode `{other}`"),
        }),
    }
}

fn parse_allowed_updates(raw: &str) -> Result<Vec<AllowedUpdate>, ConfigError> {
    let updates = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|name| {
            let value = serde_json::Value::String(name.to_ascii_lowercase());
            serde_json::from_value::<AllowedUpdate>(value)
                .map_err(|_| ConfigError::Invalid {
                    key: "TELEGRAM_ALLOWED_UPDATES",
                    reason: format!("unknown update type `{name}`"),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if updates.is_empty() {
        return Err(ConfigError::Invalid {
            key: "TELEGRAM_ALLOWED_UPDATES",
            reason: "at least one update type is required".into(),
        });
    }
    Ok(updates)
}

pub static CONFIG: OnceLock<EnvConfig> = OnceLock::new();

pub fn config() -> Option<&'static EnvConfig> {
    CONFIG.get()
}
