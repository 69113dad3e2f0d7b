use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_PATH_ENV_VAR: &str = "FERIA_CONFIG_FILE";
const API_KEY_ENV_VAR: &str = "FERIA_API_KEY";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("feria").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".feria.toml"));
    }

    locations
}

/// Loads the config from `path` if given, otherwise from the first existing
/// candidate location, otherwise the built-in defaults.
pub fn load_suitable_config(path: Option<&Path>) -> io::Result<Config> {
    if let Some(path) = path {
        return Config::load(path);
    }

    for location in find_configfile_locations() {
        if location.is_file() {
            return Config::load(&location);
        }
    }

    Ok(Config::default())
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Update tick of the UI clock in milliseconds.
    pub tick_rate_ms: Option<u64>,
    /// ISO country code preselected at startup.
    pub default_country: Option<String>,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub holiday_url: String,
    pub country_url: String,
    pub key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            holiday_url: "https://api.api-ninjas.com/v1/holidays".to_owned(),
            country_url: "https://restcountries.com/v3.1/all?fields=name,cca2".to_owned(),
            key: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> io::Result<Config> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.unwrap_or(500))
    }

    /// Configured API key, with the environment as fallback.
    pub fn api_key(&self) -> Option<String> {
        self.api
            .key
            .clone()
            .or_else(|| env::var(API_KEY_ENV_VAR).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.tick_rate(), Duration::from_millis(500));
        assert_eq!(config.default_country, None);
        assert!(config.api.holiday_url.starts_with("https://"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            default_country = "AT"

            [api]
            key = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_country.as_deref(), Some("AT"));
        assert_eq!(config.api.key.as_deref(), Some("secret"));
        assert!(config.api.country_url.contains("restcountries"));
    }

    #[test]
    fn tick_rate_is_configurable() {
        let config: Config = toml::from_str("tick_rate_ms = 100").unwrap();
        assert_eq!(config.tick_rate(), Duration::from_millis(100));
    }
}
