use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Environment variable taking precedence over the config file.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level configuration stored on disk. The API key is a secret
/// supplied out-of-band and is never embedded in source.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,
}

impl Config {
    /// Resolved API key: the environment override wins, then the config
    /// file value.
    pub fn api_key(&self) -> Result<String> {
        let env = std::env::var(API_KEY_ENV).ok();
        self.resolve_api_key(env)
    }

    fn resolve_api_key(&self, env: Option<String>) -> Result<String> {
        if let Some(key) = env.filter(|k| !k.is_empty()) {
            return Ok(key);
        }

        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeatherMap API key configured.\n\
                     Hint: run `weather-widget configure` or set {API_KEY_ENV}."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }
}

/// Platform data directory for persisted widget state (search history).
pub fn data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weather-widget", "weather-widget")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_errors_when_nothing_is_set() {
        let cfg = Config::default();
        let err = cfg.resolve_api_key(None).unwrap_err();

        assert!(err.to_string().contains("No OpenWeatherMap API key configured"));
        assert!(err.to_string().contains("Hint: run `weather-widget configure`"));
    }

    #[test]
    fn resolve_uses_config_file_value() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".to_string());

        let key = cfg.resolve_api_key(None).expect("key must resolve");
        assert_eq!(key, "FILE_KEY");
    }

    #[test]
    fn env_override_wins_over_config_file() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".to_string());

        let key = cfg
            .resolve_api_key(Some("ENV_KEY".to_string()))
            .expect("key must resolve");
        assert_eq!(key, "ENV_KEY");
    }

    #[test]
    fn empty_values_do_not_count_as_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key(String::new());

        assert!(cfg.resolve_api_key(Some(String::new())).is_err());
    }

    #[test]
    fn toml_round_trip() {
        let mut cfg = Config::default();
        cfg.set_api_key("SECRET".to_string());

        let serialized = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.api_key.as_deref(), Some("SECRET"));
    }
}
