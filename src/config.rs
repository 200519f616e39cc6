use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "domgr";
const DEFAULT_API_URL: &str = "https://api.godaddy.com";

/// Placeholder values shipped in .env.example; treated as unset.
const KEY_PLACEHOLDER: &str = "your_api_key_here";
const SECRET_PLACEHOLDER: &str = "your_api_secret_here";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Registrar API base url. Point at https://api.ote-godaddy.com to
  /// test against the OTE sandbox.
  #[serde(default = "default_api_url")]
  pub api_url: String,
}

fn default_api_url() -> String {
  DEFAULT_API_URL.to_string()
}

impl Default for Config {
  fn default() -> Self {
    Self { api_url: default_api_url() }
  }
}

impl Config {
  /// Get the config file path
  fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
  }

  /// Load config from the default location
  pub fn load() -> Result<Self> {
    let path =
      Self::config_path().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
    Self::load_from(&path)
  }

  /// Load config from a file, falling back to defaults when it does not
  /// exist
  pub fn load_from(path: &Path) -> Result<Self> {
    if !path.exists() {
      return Ok(Self::default());
    }

    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
  }

  /// Effective API base url; the API_URL environment variable wins over
  /// the config file
  pub fn api_url(&self) -> String {
    std::env::var("API_URL").unwrap_or_else(|_| self.api_url.clone())
  }

  /// API credentials from the environment only (never stored in the
  /// config file)
  pub fn credentials(&self) -> Result<(String, String)> {
    let key = std::env::var("GODADDY_API_KEY").unwrap_or_default();
    let secret = std::env::var("GODADDY_API_SECRET").unwrap_or_default();

    if key.is_empty() || secret.is_empty() || key == KEY_PLACEHOLDER || secret == SECRET_PLACEHOLDER
    {
      anyhow::bail!(
        "GoDaddy API credentials not set. Export GODADDY_API_KEY and GODADDY_API_SECRET \
         (or put them in a .env file, see .env.example)"
      );
    }
    Ok((key, secret))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config.api_url, DEFAULT_API_URL);
  }

  #[test]
  fn reads_api_url_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "api_url = \"https://api.ote-godaddy.com\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api_url, "https://api.ote-godaddy.com");
  }

  #[test]
  fn empty_file_uses_field_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api_url, DEFAULT_API_URL);
  }

  #[test]
  fn rejects_missing_and_placeholder_credentials() {
    std::env::remove_var("GODADDY_API_KEY");
    std::env::remove_var("GODADDY_API_SECRET");
    let config = Config::default();
    assert!(config.credentials().is_err());

    std::env::set_var("GODADDY_API_KEY", KEY_PLACEHOLDER);
    std::env::set_var("GODADDY_API_SECRET", "real-secret");
    assert!(config.credentials().is_err());

    std::env::set_var("GODADDY_API_KEY", "real-key");
    let (key, secret) = config.credentials().unwrap();
    assert_eq!(key, "real-key");
    assert_eq!(secret, "real-secret");

    std::env::remove_var("GODADDY_API_KEY");
    std::env::remove_var("GODADDY_API_SECRET");
  }
}
