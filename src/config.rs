//! # Configuration Management

//! This module handles the configuration loading for the PLC shadow bridge.
//! It leverages the `config` crate to layer settings from several sources:

//! * YAML configuration files (default.yaml plus an optional per-environment file such as development.yaml)
//! * Environment variables prefixed with `APP`
//! * The deployment's own `SUPABASE_URL` / `SUPABASE_ANON_KEY` variables

//! The core of this module is the `Settings` struct, which encapsulates every setting the service needs.

use serde::Deserialize;
use config::{Config, Environment, File};
use std::{env, fmt};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use secrecy::Secret;
use log::debug;
use url::Url;
use crate::errors::{BridgeError, BridgeResult};

/// Represents the complete set of configuration settings for the bridge.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Settings for the inbound HTTP surface
    pub server: ServerSettings,
    /// Settings for reaching the device-shadow service
    pub shadow: ShadowSettings,
    /// Settings for the REST event store
    pub store: StoreSettings,
    /// Settings for the change processor
    #[serde(default)]
    pub processor: ProcessorSettings,
    /// Settings shared by the outbound HTTP clients
    #[serde(default)]
    pub http: HttpSettings,
    /// Settings for application logging
    pub logging: LoggingSettings,
}

/// Holds the address the HTTP server binds to
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    /// The socket address to listen on (e.g. "0.0.0.0:8080")
    pub bind_address: SocketAddr,
}

/// # Shadow Settings

/// The device-shadow endpoint and the single device this deployment bridges.
/// The endpoint and thing name are fixed per deployment; requests never choose them.
#[derive(Debug, Deserialize, Clone)]
pub struct ShadowSettings {
    /// Base URL of the IoT data endpoint (e.g. "https://xxxx-ats.iot.us-east-1.amazonaws.com")
    pub endpoint: Url,
    /// The AWS region of the endpoint
    pub region: String,
    /// The thing whose classic shadow is read and patched
    pub thing_name: String,
    /// Static access key id; when this or the secret is unset, the default AWS credential chain is used
    pub access_key_id: Option<String>,
    /// Static secret access key
    #[serde(default, deserialize_with = "deserialize_optional_secret")]
    pub secret_access_key: Option<Secret<String>>,
    /// Session token for temporary static credentials
    #[serde(default, deserialize_with = "deserialize_optional_secret")]
    pub session_token: Option<Secret<String>>,
}

/// # Store Settings

/// The REST event store. Both `base_url` and `api_key` may be absent; inserts are then skipped and logged
#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    /// Base URL of the store (e.g. "https://project.supabase.co")
    pub base_url: Option<String>,
    /// Access key sent as both `apikey` and bearer token
    #[serde(default, deserialize_with = "deserialize_optional_secret")]
    pub api_key: Option<Secret<String>>,
    /// The table the records are inserted into
    #[serde(default = "default_table")]
    pub table: String,
}

/// Holds the configuration settings for the change processor
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProcessorSettings {
    /// When set, a processing pass also runs on this interval (in seconds)
    pub poll_interval_secs: Option<u64>,
}

/// Holds settings shared by the outbound HTTP clients
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HttpSettings {
    /// Per-request timeout in milliseconds; no timeout when absent
    pub request_timeout_ms: Option<u64>,
}

impl HttpSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

/// Holds the configuration settings for application logging
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// The logging level (e.g., "info", "debug", "error")
    pub level: String,
    /// The directory path where log files will be stored (optional)
    pub path: Option<PathBuf>,
}

fn default_table() -> String {
    "eventos_industriales".to_string()
}

/// # Settings Initialization
///
/// The `Settings` implementation provides a `new` function to load and construct the configuration settings.
impl Settings {
    /// Loads and constructs the application settings from various configuration sources.
    ///
    /// Sources, in order of precedence (later wins):
    ///
    /// 1. `default.yaml`: Contains default settings for the service (required)
    /// 2. Environment-specific YAML file (e.g., `development.yaml` or `production.yaml`) based on the `RUN_MODE` environment variable
    /// 3. Environment variables prefixed with `APP` (e.g., `APP__STORE__BASE_URL`)
    ///
    /// Store settings still missing after that are taken from `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    ///
    /// The `CONFIG_DIR` environment variable can be used to specify the directory where the YAML configuration files are located (defaults to "src/config").
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)`: If the settings were loaded and constructed successfully
    /// * `Err(BridgeError)`: If there was an error during the loading or construction process
    pub fn new() -> BridgeResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "src/config".into());
        debug!("Run Mode: {:?}, Config Dir: {:?}", run_mode, config_dir);

        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/default", config_dir)))
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let mut s: Self = s.try_deserialize::<Settings>()
            .map_err(BridgeError::from)?;

        s.apply_env_fallbacks();

        if let Some(ref mut path) = s.logging.path {
            *path = env::current_dir()?.join(path.clone());
        }

        debug!("{}", s.store);
        Ok(s)
    }

    fn apply_env_fallbacks(&mut self) {
        if self.store.base_url.is_none() {
            self.store.base_url = non_empty_env("SUPABASE_URL");
        }
        if self.store.api_key.is_none() {
            self.store.api_key = non_empty_env("SUPABASE_ANON_KEY").map(Secret::new);
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Deserializes a secret string from configuration into a `Secret<String>`
fn deserialize_optional_secret<'de, D>(deserializer: D) -> Result<Option<Secret<String>>, D::Error>
    where
        D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.is_empty()).map(Secret::new))
}

impl fmt::Display for StoreSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StoreSettings {{ base_url: {:?}, api_key: {}, table: {} }}",
            self.base_url,
            if self.api_key.is_some() { "<set>" } else { "<missing>" },
            self.table
        )
    }
}
