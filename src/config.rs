use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::explain::{PrefixedNamespaces, DEFAULT_PREFIXED_NAMESPACES};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub explain: ExplainConfig,
    #[serde(default)]
    pub metakg: MetaKgConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
}

/// Query behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct ExplainConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Namespaces whose values already carry their prefix (e.g. `CHEBI:45783`).
    #[serde(default = "default_prefixed_namespaces")]
    pub self_prefixing_namespaces: Vec<String>,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            self_prefixing_namespaces: default_prefixed_namespaces(),
        }
    }
}

/// Relation-template index source
#[derive(Debug, Clone, Deserialize)]
pub struct MetaKgConfig {
    #[serde(default = "default_metakg_source")]
    pub source: String,
    /// JSON array of relation templates.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for MetaKgConfig {
    fn default() -> Self {
        Self {
            source: default_metakg_source(),
            path: None,
        }
    }
}

/// Batch execution engine
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionConfig {
    /// URL of the batch execution service.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// JSON array of recorded result records, used instead of `endpoint` when set.
    #[serde(default)]
    pub replay_path: Option<PathBuf>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout_secs(),
            replay_path: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_prefixed_namespaces() -> Vec<String> {
    DEFAULT_PREFIXED_NAMESPACES.iter().map(|s| s.to_string()).collect()
}

fn default_metakg_source() -> String {
    "biothings".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in KGEXPLAIN_CONFIG environment variable
    /// 2. ./config.toml in current directory
    pub fn load() -> Result<Self> {
        // .env is optional
        let _ = dotenv::dotenv();

        let config_path = std::env::var("KGEXPLAIN_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));

        Self::load_from(&config_path)
    }

    /// Load and validate a specific config file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid config file: {}", config_path.display()))
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str).context("Failed to parse config.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(ref endpoint) = self.execution.endpoint {
            let url = url::Url::parse(endpoint)
                .with_context(|| format!("execution.endpoint is not a valid URL: {}", endpoint))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                anyhow::bail!("execution.endpoint must use http or https, got {}", url.scheme());
            }
        }

        if self.execution.timeout_secs == 0 {
            anyhow::bail!("execution.timeout_secs must be greater than 0");
        }

        if self
            .explain
            .self_prefixing_namespaces
            .iter()
            .any(|ns| ns.trim().is_empty())
        {
            anyhow::bail!("explain.self_prefixing_namespaces must not contain empty names");
        }

        Ok(())
    }

    /// Self-prefixing namespaces as a lookup set
    pub fn prefixed_namespaces(&self) -> PrefixedNamespaces {
        self.explain.self_prefixing_namespaces.iter().cloned().collect()
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

    const FULL_CONFIG: &str = r#"
[explain]
log_level = "debug"
self_prefixing_namespaces = ["MONDO", "CHEBI"]

[metakg]
source = "biothings"
path = "./metakg.json"

[execution]
endpoint = "http://localhost:3000/v1/execute"
timeout_secs = 30
"#;

    #[test]
    fn test_config_parse_full() {
        let config = Config::from_toml_str(FULL_CONFIG).unwrap();
        assert_eq!(config.explain.log_level, "debug");
        assert_eq!(config.metakg.path.as_deref(), Some(Path::new("./metakg.json")));
        assert_eq!(config.execution.timeout_secs, 30);
        let prefixed = config.prefixed_namespaces();
        assert!(prefixed.contains("CHEBI"));
        assert!(!prefixed.contains("UMLS"));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.explain.log_level, "info");
        assert_eq!(config.metakg.source, "biothings");
        assert_eq!(config.execution.timeout_secs, 60);
        assert!(config.execution.endpoint.is_none());
        assert!(config.prefixed_namespaces().contains("MONDO"));
    }

    #[test]
    fn test_config_rejects_bad_endpoint() {
        let err = Config::from_toml_str("[execution]\nendpoint = \"ftp://example.org/run\"\n").unwrap_err();
        assert!(err.to_string().contains("http"));
        assert!(Config::from_toml_str("[execution]\nendpoint = \"not a url\"\n").is_err());
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        assert!(Config::from_toml_str("[execution]\ntimeout_secs = 0\n").is_err());
    }

    #[test]
    fn test_config_rejects_empty_namespace() {
        assert!(Config::from_toml_str("[explain]\nself_prefixing_namespaces = [\"\"]\n").is_err());
    }

    #[test]
    fn test_config_load_from_env_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, FULL_CONFIG).unwrap();

        let original = std::env::var("KGEXPLAIN_CONFIG").ok();
        std::env::set_var("KGEXPLAIN_CONFIG", config_path.to_str().unwrap());
        let config = Config::load();
        std::env::remove_var("KGEXPLAIN_CONFIG");
        if let Some(v) = original {
            std::env::set_var("KGEXPLAIN_CONFIG", v);
        }

        let config = config.unwrap();
        assert_eq!(config.explain.log_level, "debug");
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let original = std::env::var("KGEXPLAIN_CONFIG").ok();
        std::env::set_var("KGEXPLAIN_CONFIG", "nonexistent.toml");
        let config = Config::load();
        assert!(config.is_err());
        std::env::remove_var("KGEXPLAIN_CONFIG");
        if let Some(v) = original {
            std::env::set_var("KGEXPLAIN_CONFIG", v);
        }
    }
}
