use crate::error::{config_error, env_error, AppResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use url::Url;

/// Default backend base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
/// Default route of the shift template collection
pub const DEFAULT_TEMPLATES_PATH: &str = "/api/shift-templates";
/// Default address for the validation gate
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
/// Optional file whose keys override the environment
pub const CONFIG_FILE: &str = "config/shift_templates.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the shift planning backend
    pub api_base_url: String,
    /// Bearer token for the backend, if it needs one
    pub api_token: Option<String>,
    /// Route of the shift template collection below the base URL
    pub templates_path: String,
    /// Address the validation gate listens on
    pub bind_addr: String,
    /// Timeout for backend requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            templates_path: DEFAULT_TEMPLATES_PATH.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Keys accepted in the configuration file, all optional
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base_url: Option<String>,
    api_token: Option<String>,
    templates_path: Option<String>,
    bind_addr: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Start from environment variables
        let mut config = Self::from_env()?;

        // Override with file config if present
        if let Ok(content) = fs::read_to_string(CONFIG_FILE) {
            config.merge_toml(&content)?;
        }

        // Validate the merged result
        config.check()?;
        Ok(config)
    }

    /// Build configuration from environment variables over the defaults
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        // Parse numeric values
        let request_timeout_secs = match env::var("SHIFT_REQUEST_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| env_error("Invalid SHIFT_REQUEST_TIMEOUT_SECS format"))?,
            Err(_) => defaults.request_timeout_secs,
        };

        // Empty token means no Authorization header
        Ok(Config {
            api_base_url: env::var("SHIFT_API_BASE_URL").unwrap_or(defaults.api_base_url),
            api_token: env::var("SHIFT_API_TOKEN").ok().filter(|t| !t.is_empty()),
            templates_path: env::var("SHIFT_TEMPLATES_PATH").unwrap_or(defaults.templates_path),
            bind_addr: env::var("SHIFT_BIND_ADDR").unwrap_or(defaults.bind_addr),
            request_timeout_secs,
        })
    }

    /// Override fields with the keys present in a TOML document
    pub fn merge_toml(&mut self, content: &str) -> AppResult<()> {
        let file: FileConfig = toml::from_str(content)?;

        // Only keys present in the file replace current values
        if let Some(api_base_url) = file.api_base_url {
            self.api_base_url = api_base_url;
        }
        if let Some(api_token) = file.api_token {
            self.api_token = Some(api_token);
        }
        if let Some(templates_path) = file.templates_path {
            self.templates_path = templates_path;
        }
        if let Some(bind_addr) = file.bind_addr {
            self.bind_addr = bind_addr;
        }
        if let Some(request_timeout_secs) = file.request_timeout_secs {
            self.request_timeout_secs = request_timeout_secs;
        }

        Ok(())
    }

    /// Reject values that would only fail later at request time
    pub fn check(&self) -> AppResult<()> {
        // Check URL format
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| config_error(&format!("Invalid api_base_url '{}': {}", self.api_base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(config_error("api_base_url must be an http(s) URL"));
        }
        if self.request_timeout_secs == 0 {
            return Err(config_error("request_timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Whether a configuration file exists in the working directory
    pub fn has_config_file() -> bool {
        Path::new(CONFIG_FILE).exists()
    }
}
