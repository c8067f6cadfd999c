// src/config.rs
//! Client configuration: defaults, optional `truefit.yaml`, environment, CLI flags.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub const CONFIG_FILE: &str = "truefit.yaml";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILE: &str = "/tmp/truefit.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    pub log_file: PathBuf,
    pub environment: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ProfileConfig {
    api_base_url: Option<String>,
    timeout_seconds: Option<u64>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: ProfileConfig,
    #[serde(default)]
    production: ProfileConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            environment: "local".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from `truefit.yaml` (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let file = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Some(Self::parse_file(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?)
        } else {
            None
        };

        let config = Self::resolve(file, |key| std::env::var(key).ok())?;
        info!(
            "Loaded configuration for environment {}: {}",
            config.environment, config.api_base_url
        );
        Ok(config)
    }

    fn parse_file(content: &str) -> Result<ConfigFile> {
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        serde_yaml::from_str(content).context("Invalid YAML")
    }

    fn resolve<F>(file: Option<ConfigFile>, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = var("TRUEFIT_ENV")
            .or_else(|| var("ENVIRONMENT"))
            .unwrap_or_else(|| "local".to_string());

        let mut config = Self {
            environment: environment.clone(),
            ..Self::default()
        };

        if let Some(file) = file {
            let profile = match environment.as_str() {
                "production" => file.production,
                _ => file.local,
            };
            config.apply_profile(profile);
        }

        if let Some(url) = var("TRUEFIT_API_URL") {
            config.api_base_url = url;
        }
        if let Some(timeout) = var("TRUEFIT_TIMEOUT_SECS") {
            config.timeout_seconds = timeout
                .trim()
                .parse()
                .context("TRUEFIT_TIMEOUT_SECS must be a whole number of seconds")?;
        }
        if let Some(log_file) = var("TRUEFIT_LOG_FILE") {
            config.log_file = PathBuf::from(log_file);
        }

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    fn apply_profile(&mut self, profile: ProfileConfig) {
        if let Some(url) = profile.api_base_url {
            self.api_base_url = url;
        }
        if let Some(timeout) = profile.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(log_file) = profile.log_file {
            self.log_file = log_file;
        }
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn with_overrides(mut self, api_url: Option<String>, timeout_secs: Option<u64>) -> Result<Self> {
        if let Some(url) = api_url {
            self.api_base_url = url;
        }
        if let Some(timeout) = timeout_secs {
            self.timeout_seconds = timeout;
        }
        self.normalize();
        self.validate()?;
        Ok(self)
    }

    fn normalize(&mut self) {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
    }

    fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            anyhow::bail!("API base URL is empty");
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            anyhow::bail!("API base URL must start with http:// or https://: {}", self.api_base_url);
        }
        if self.timeout_seconds == 0 {
            anyhow::bail!("Timeout must be at least one second");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::resolve(None, vars(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_profile_selected_by_environment() {
        let yaml = "local:\n  api_base_url: http://localhost:8000\nproduction:\n  api_base_url: https://api.truefit.example/\n  timeout_seconds: 60\n";
        let file = ClientConfig::parse_file(yaml).unwrap();
        let config = ClientConfig::resolve(Some(file), vars(&[("TRUEFIT_ENV", "production")])).unwrap();
        assert_eq!(config.api_base_url, "https://api.truefit.example");
        assert_eq!(config.timeout_seconds, 60);
        assert_eq!(config.environment, "production");
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = ClientConfig::parse_file("local:\n  timeout_seconds: 10\n").unwrap();
        let config = ClientConfig::resolve(
            Some(file),
            vars(&[
                ("TRUEFIT_API_URL", "http://10.0.0.2:9000/"),
                ("TRUEFIT_TIMEOUT_SECS", "45"),
            ]),
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.2:9000");
        assert_eq!(config.timeout_seconds, 45);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ClientConfig::resolve(None, vars(&[("TRUEFIT_TIMEOUT_SECS", "soon")])).is_err());
        assert!(ClientConfig::resolve(None, vars(&[("TRUEFIT_TIMEOUT_SECS", "0")])).is_err());
        assert!(ClientConfig::resolve(None, vars(&[("TRUEFIT_API_URL", "localhost:8000")])).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let config = ClientConfig::default()
            .with_overrides(Some("http://example.test/api/".to_string()), Some(5))
            .unwrap();
        assert_eq!(config.api_base_url, "http://example.test/api");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(ClientConfig::default().with_overrides(None, Some(0)).is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load_from(&dir.path().join("absent.yaml"));
        assert!(config.is_ok());
    }
}
