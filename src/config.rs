use anyhow::{Context, Result};
use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wordlit: WordlitConfig,
    pub annotator: AnnotatorConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub http_server: HttpServerConfig,
}

/// Wordlit-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WordlitConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for WordlitConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Annotator service configuration (the external dependency parser)
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotatorConfig {
    /// Base URL of the dependency-parse service, e.g. "http://127.0.0.1:8800"
    pub endpoint: String,
    #[serde(default = "default_annotator_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    /// Named-entity listing only reads this many leading characters
    #[serde(default = "default_entity_window_chars")]
    pub entity_window_chars: usize,
}

/// URL acquisition configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_http_enabled")]
    pub enabled: bool,
    #[serde(default = "default_http_port")]
    pub port: u16,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            enabled: default_http_enabled(),
            port: default_http_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_annotator_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> usize {
    2
}

fn default_entity_window_chars() -> usize {
    6000
}

fn default_fetch_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    format!("wordlit/{}", env!("CARGO_PKG_VERSION"))
}

fn default_http_enabled() -> bool {
    false
}

fn default_http_port() -> u16 {
    8080
}

fn default_allowed_origins() -> Vec<String> {
    // Default empty — set allowed_origins in config.toml for production
    vec![]
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in WORDLIT_CONFIG environment variable
    /// 2. ./config.toml in current directory
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let config_path = std::env::var("WORDLIT_CONFIG")
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|_| std::path::PathBuf::from("config.toml"));

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .context("Failed to parse config.toml")?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        url::Url::parse(&self.annotator.endpoint).with_context(|| {
            format!(
                "annotator.endpoint is not a valid URL: {}",
                self.annotator.endpoint
            )
        })?;

        if self.annotator.timeout_secs == 0 {
            anyhow::bail!("annotator.timeout_secs must be greater than 0");
        }

        if self.annotator.entity_window_chars == 0 {
            anyhow::bail!("annotator.entity_window_chars must be greater than 0");
        }

        if self.fetch.timeout_secs == 0 {
            anyhow::bail!("fetch.timeout_secs must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    const TEST_CONFIG: &str = r#"
[wordlit]
log_level = "debug"

[annotator]
endpoint = "http://127.0.0.1:8800"
timeout_secs = 10
max_retries = 1
entity_window_chars = 6000

[fetch]
timeout_secs = 5
user_agent = "wordlit-test"

[http_server]
enabled = true
port = 8080
allowed_origins = []
"#;

    fn with_config_env(config_path: &std::path::Path, f: impl FnOnce()) {
        let original = std::env::var("WORDLIT_CONFIG").ok();
        std::env::set_var("WORDLIT_CONFIG", config_path.to_str().unwrap());
        f();
        std::env::remove_var("WORDLIT_CONFIG");
        if let Some(val) = original {
            std::env::set_var("WORDLIT_CONFIG", val);
        }
    }

    #[test]
    fn test_config_load_success() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, TEST_CONFIG).unwrap();
        with_config_env(&config_path, || {
            let config = Config::load();
            assert!(config.is_ok(), "Config::load() failed: {:?}", config.err());
            let config = config.unwrap();
            assert_eq!(config.wordlit.log_level, "debug");
            assert_eq!(config.annotator.endpoint, "http://127.0.0.1:8800");
            assert_eq!(config.annotator.entity_window_chars, 6000);
            assert_eq!(config.fetch.user_agent, "wordlit-test");
            assert!(config.http_server.enabled);
        });
    }

    #[test]
    fn test_config_defaults_applied() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[annotator]\nendpoint = \"http://localhost:9999\"\n",
        )
        .unwrap();
        with_config_env(&config_path, || {
            let config = Config::load().unwrap();
            assert_eq!(config.wordlit.log_level, "info");
            assert_eq!(config.annotator.timeout_secs, 30);
            assert_eq!(config.annotator.entity_window_chars, 6000);
            assert_eq!(config.http_server.port, 8080);
            assert!(!config.http_server.enabled);
        });
    }

    #[test]
    fn test_config_invalid_endpoint() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[annotator]\nendpoint = \"not a url\"\n").unwrap();
        with_config_env(&config_path, || {
            let config = Config::load();
            assert!(config.is_err(), "Expected invalid endpoint error");
        });
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nonexistent.toml");
        with_config_env(&missing, || {
            let config = Config::load();
            assert!(config.is_err());
        });
    }

    #[test]
    fn test_config_zero_window_rejected() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[annotator]\nendpoint = \"http://localhost:9999\"\nentity_window_chars = 0\n",
        )
        .unwrap();
        with_config_env(&config_path, || {
            assert!(Config::load().is_err());
        });
    }
}
