use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "CATALOG_API_URL";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  /// Custom title for header (defaults to "Product Catalog" if not set)
  pub title: Option<String>,
  #[serde(default)]
  pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
  /// Root of the REST API, e.g. http://localhost:5000/api
  pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
  /// Log file path (defaults to the user data directory)
  pub file: Option<PathBuf>,
  /// Tracing filter directive, e.g. "catalog_tui=debug"
  pub filter: Option<String>,
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./catalog.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/catalog-tui/config.yaml
  ///
  /// A missing file is not an error unless it was named explicitly; the base
  /// URL can come from the command line or environment instead.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("catalog.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("catalog-tui").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents).map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
    serde_yaml::from_str(contents)
  }

  /// Apply command line and environment overrides, command line first.
  pub fn with_overrides(mut self, cli_url: Option<String>, env_url: Option<String>) -> Self {
    if let Some(url) = cli_url.or(env_url) {
      self.api.base_url = Some(url);
    }
    self
  }

  /// Resolve and validate the API base URL.
  pub fn api_url(&self) -> Result<Url> {
    let raw = self.api.base_url.as_deref().ok_or_else(|| {
      eyre!(
        "No API base URL configured. Pass --api-url, set {}, or add api.base_url to \
         ~/.config/catalog-tui/config.yaml",
        API_URL_ENV
      )
    })?;

    let url = Url::parse(raw).map_err(|e| eyre!("Invalid API base URL '{}': {}", raw, e))?;
    match url.scheme() {
      "http" | "https" => Ok(url),
      other => Err(eyre!("Unsupported API URL scheme '{}' in {}", other, raw)),
    }
  }

  pub fn title(&self) -> &str {
    self.title.as_deref().unwrap_or("Product Catalog")
  }

  /// Log file location
  pub fn log_file(&self) -> PathBuf {
    self.log.file.clone().unwrap_or_else(|| {
      dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
        .unwrap_or_else(std::env::temp_dir)
        .join("catalog-tui")
        .join("catalog-tui.log")
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  #[test]
  fn test_parse_full_config() {
    let config = Config::parse(
      r#"
title: Warehouse
api:
  base_url: http://localhost:5000/api
log:
  file: /tmp/catalog.log
  filter: debug
"#,
    )
    .unwrap();

    assert_eq!(config.title(), "Warehouse");
    assert_eq!(
      config.api_url().unwrap().as_str(),
      "http://localhost:5000/api"
    );
    assert_eq!(config.log_file(), PathBuf::from("/tmp/catalog.log"));
    assert_eq!(config.log.filter.as_deref(), Some("debug"));
  }

  #[test]
  fn test_empty_config_needs_url() {
    let config = Config::parse("{}").unwrap();
    assert_eq!(config.title(), "Product Catalog");
    let err = config.api_url().unwrap_err().to_string();
    assert!(err.contains("--api-url"));
  }

  #[test]
  fn test_cli_override_beats_env_and_file() {
    let config = Config::parse("api:\n  base_url: http://file/api\n").unwrap();

    let from_env = config
      .clone()
      .with_overrides(None, Some("http://env/api".to_string()));
    assert_eq!(from_env.api.base_url.as_deref(), Some("http://env/api"));

    let from_cli = config.with_overrides(
      Some("http://cli/api".to_string()),
      Some("http://env/api".to_string()),
    );
    assert_eq!(from_cli.api.base_url.as_deref(), Some("http://cli/api"));
  }

  #[test]
  fn test_rejects_non_http_url() {
    let config = Config::default().with_overrides(Some("ftp://host/api".to_string()), None);
    assert!(config.api_url().is_err());

    let config = Config::default().with_overrides(Some("not a url".to_string()), None);
    assert!(config.api_url().is_err());
  }

  #[test]
  fn test_load_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "api:\n  base_url: https://shop.example.com/api").unwrap();

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(
      config.api_url().unwrap().host_str(),
      Some("shop.example.com")
    );
  }

  #[test]
  fn test_load_missing_explicit_path_fails() {
    let err = Config::load(Some(Path::new("/nonexistent/catalog.yaml"))).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
  }
}
