//! Configuration management for text-bridge.
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present). Every value has a default so loading never fails; a bad base
//! URL only surfaces once a [`Router`] is built from it.

use std::env;
use std::sync::OnceLock;
use std::time::Duration;

use crate::services::Router;
use crate::Result;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the instance, e.g. `https://cloud.example.com`.
    pub base_url: String,
    /// Whether app URLs may omit the `index.php` front controller.
    pub pretty_urls: bool,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: "http://localhost".to_string(),
                pretty_urls: false,
            },
            http: HttpConfig {
                timeout_secs: 30,
                user_agent: default_user_agent(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                base_url: env_or("TEXT_BASE_URL", "http://localhost"),
                pretty_urls: env_flag("TEXT_PRETTY_URLS", false),
            },
            http: HttpConfig {
                timeout_secs: env_or("TEXT_HTTP_TIMEOUT_SECS", "30")
                    .parse()
                    .unwrap_or(30),
                user_agent: env::var("TEXT_USER_AGENT").unwrap_or_else(|_| default_user_agent()),
            },
        }
    }

    /// Config pointing at a specific instance, everything else default.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.server.base_url = base_url.into();
        config
    }

    /// Build the URL router for the configured instance.
    pub fn router(&self) -> Result<Router> {
        Router::new(&self.server.base_url, self.server.pretty_urls)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}

fn default_user_agent() -> String {
    format!("text-bridge/{}", env!("CARGO_PKG_VERSION"))
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
