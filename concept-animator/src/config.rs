//! Configuration for the runner, the selection service and logging.
//!
//! Every field has a serde default so partial configs deserialize, and
//! [`AnimatorConfig::from_env`] overlays environment variables on top of the
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::ConfigError;

/// Upper bound accepted for the remote call timeout, in seconds.
pub const MAX_TIMEOUT_SECS: f64 = 3600.0;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimatorConfig {
    /// Simulated stage latency.
    #[serde(default)]
    pub stage_delay: StageDelayConfig,
    /// Remote content generation call.
    #[serde(default)]
    pub function: FunctionConfig,
    /// Selection HTTP service.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
    /// Path of the JSON request store.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("animation_requests.json")
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            stage_delay: StageDelayConfig::default(),
            function: FunctionConfig::default(),
            server: ServerConfig::default(),
            log: LogConfig::default(),
            store_path: default_store_path(),
        }
    }
}

/// Bounds of the per-stage random delay, `[min_ms, max_ms)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDelayConfig {
    /// Inclusive lower bound in milliseconds.
    #[serde(default = "default_delay_min")]
    pub min_ms: u64,
    /// Exclusive upper bound in milliseconds.
    #[serde(default = "default_delay_max")]
    pub max_ms: u64,
}

fn default_delay_min() -> u64 {
    2000
}

fn default_delay_max() -> u64 {
    3000
}

impl Default for StageDelayConfig {
    fn default() -> Self {
        Self {
            min_ms: default_delay_min(),
            max_ms: default_delay_max(),
        }
    }
}

/// Where and how to call the content generation function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionConfig {
    /// Endpoint URL.
    #[serde(default = "default_function_url")]
    pub url: String,
    /// Optional API key, sent as `apikey` and bearer token.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
}

fn default_function_url() -> String {
    "http://127.0.0.1:3000/generate-educational-video".to_string()
}

fn default_timeout() -> f64 {
    30.0
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            url: default_function_url(),
            api_key: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl FunctionConfig {
    /// Sets the endpoint URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Gets timeout as Duration, clamped to `[0, MAX_TIMEOUT_SECS]`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        if self.timeout_seconds.is_nan() {
            return Duration::from_secs_f64(default_timeout());
        }
        Duration::from_secs_f64(self.timeout_seconds.clamp(0.0, MAX_TIMEOUT_SECS))
    }
}

/// Bind address of the selection service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host or IP to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Tracing subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "concept_animator=info,tower_http=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            json: false,
            filter: default_filter(),
        }
    }
}

impl AnimatorConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads defaults overlaid with process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads defaults overlaid with values from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("ANIMATOR_STAGE_DELAY_MIN_MS") {
            config.stage_delay.min_ms = parse("ANIMATOR_STAGE_DELAY_MIN_MS", &v)?;
        }
        if let Some(v) = lookup("ANIMATOR_STAGE_DELAY_MAX_MS") {
            config.stage_delay.max_ms = parse("ANIMATOR_STAGE_DELAY_MAX_MS", &v)?;
        }
        if config.stage_delay.min_ms > config.stage_delay.max_ms {
            return Err(ConfigError::Invalid {
                key: "ANIMATOR_STAGE_DELAY_MIN_MS".to_string(),
                value: format!(
                    "{} (greater than max {})",
                    config.stage_delay.min_ms, config.stage_delay.max_ms
                ),
            });
        }

        if let Some(v) = lookup("ANIMATOR_FUNCTION_URL") {
            config.function.url = v;
        }
        if let Some(v) = lookup("ANIMATOR_FUNCTION_API_KEY").filter(|v| !v.is_empty()) {
            config.function.api_key = Some(v);
        }
        if let Some(v) = lookup("ANIMATOR_FUNCTION_TIMEOUT_SECS") {
            let seconds: f64 = parse("ANIMATOR_FUNCTION_TIMEOUT_SECS", &v)?;
            if !seconds.is_finite() || seconds <= 0.0 || seconds > MAX_TIMEOUT_SECS {
                return Err(ConfigError::Invalid {
                    key: "ANIMATOR_FUNCTION_TIMEOUT_SECS".to_string(),
                    value: v,
                });
            }
            config.function.timeout_seconds = seconds;
        }

        if let Some(v) = lookup("HOST") {
            config.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            config.server.port = parse("PORT", &v)?;
        }

        if let Some(v) = lookup("ANIMATOR_LOG_JSON") {
            config.log.json = parse_bool("ANIMATOR_LOG_JSON", &v)?;
        }
        if let Some(v) = lookup("ANIMATOR_LOG_FILTER") {
            config.log.filter = v;
        }

        if let Some(v) = lookup("ANIMATOR_STORE_PATH") {
            config.store_path = PathBuf::from(v);
        }

        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
