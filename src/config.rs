use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub assistant: AssistantSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub sessions: SessionSettings,
    #[serde(default)]
    pub contact: ContactSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            similar_limit: default_similar_limit(),
        }
    }
}

fn default_similar_limit() -> usize { crate::core::DEFAULT_SIMILAR_LIMIT }

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantSettings {
    #[serde(default = "default_assistant_base_url")]
    pub base_url: String,
    /// No key disables the assistant; local fallbacks are used instead
    pub api_key: Option<String>,
    #[serde(default = "default_assistant_model")]
    pub model: String,
    #[serde(default = "default_assistant_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cache_size")]
    pub cache_size: u64,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            base_url: default_assistant_base_url(),
            api_key: None,
            model: default_assistant_model(),
            timeout_secs: default_assistant_timeout(),
            cache_ttl_secs: default_cache_ttl(),
            cache_size: default_cache_size(),
        }
    }
}

fn default_assistant_base_url() -> String { "https://api.openai.com/v1".to_string() }
fn default_assistant_model() -> String { "gpt-4o-mini".to_string() }
fn default_assistant_timeout() -> u64 { 30 }
fn default_cache_ttl() -> u64 { 600 }
fn default_cache_size() -> u64 { 256 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Option<String>,
    /// Either a list or a comma-separated string (handy in env vars)
    #[serde(default, deserialize_with = "list_or_csv")]
    pub admin_uids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
    /// Carts and wishlists are dropped after this long without a request
    #[serde(default = "default_session_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            idle_timeout_secs: default_session_idle_timeout(),
        }
    }
}

fn default_max_sessions() -> u64 { 10_000 }
fn default_session_idle_timeout() -> u64 { 86_400 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSettings {
    pub whatsapp_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrCsv {
        List(Vec<String>),
        Csv(String),
    }

    Ok(match ListOrCsv::deserialize(deserializer)? {
        ListOrCsv::List(items) => items,
        ListOrCsv::Csv(csv) => csv
            .split(',')
            .map(|uid| uid.trim().to_string())
            .filter(|uid| !uid.is_empty())
            .collect(),
    })
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CARHUB_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CARHUB__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CARHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CARHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
