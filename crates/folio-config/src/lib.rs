//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `data.dir`
//! - `site.base_url`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override catalog data directory.
    pub data_dir: Option<PathBuf>,
    /// Override base URL for absolute links.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Upper bound of URLs per sitemap document allowed by the sitemap protocol.
const MAX_SITEMAP_URLS: usize = 50_000;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Data configuration (paths are relative strings from TOML).
    data: DataConfigRaw,
    /// Site presentation configuration.
    pub site: SiteSection,

    /// Resolved data configuration (set after loading).
    #[serde(skip)]
    pub data_resolved: DataConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Raw data configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DataConfigRaw {
    dir: Option<String>,
    index_file: Option<String>,
    categories_dir: Option<String>,
}

/// Resolved catalog data layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    /// Root directory of the catalog data.
    pub dir: PathBuf,
    /// Site index filename inside `dir`.
    pub index_file: String,
    /// Directory of per-category documents inside `dir`.
    pub categories_dir: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            index_file: "pages.json".to_owned(),
            categories_dir: "categories".to_owned(),
        }
    }
}

/// `[site]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Base URL for absolute links; falls back to the index's `site.baseUrl`.
    pub base_url: Option<String>,
    /// Maximum number of similar pages on a single-page view.
    pub similar_limit: usize,
    /// URLs per page sitemap.
    pub sitemap_page_size: usize,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            base_url: None,
            similar_limit: 8,
            sitemap_page_size: 40_000,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base_url`").
        field: String,
        /// Error message (e.g., "${`FOLIO_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, so CLI
    /// arguments take precedence over config file values.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(data_dir) = &settings.data_dir {
            self.data_resolved.dir.clone_from(data_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.site.base_url = Some(base_url.clone());
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfigRaw::default(),
            site: SiteSection::default(),
            data_resolved: DataConfig {
                dir: base.join("data"),
                ..DataConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_data()?;
        self.validate_site()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 asks the OS for a random port, never what a config file means
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_data(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.data_resolved.index_file, "data.index_file")?;
        require_non_empty(&self.data_resolved.categories_dir, "data.categories_dir")?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        if let Some(ref base_url) = self.site.base_url {
            require_non_empty(base_url, "site.base_url")?;
            require_http_url(base_url, "site.base_url")?;
        }

        let size = self.site.sitemap_page_size;
        if size == 0 {
            return Err(ConfigError::Validation(
                "site.sitemap_page_size must be greater than 0".to_owned(),
            ));
        }
        if size > MAX_SITEMAP_URLS {
            return Err(ConfigError::Validation(format!(
                "site.sitemap_page_size cannot exceed {MAX_SITEMAP_URLS}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref dir) = self.data.dir {
            self.data.dir = Some(expand::expand_env(dir, "data.dir")?);
        }

        if let Some(ref base_url) = self.site.base_url {
            self.site.base_url = Some(expand::expand_env(base_url, "site.base_url")?);
        }

        Ok(())
    }

    /// Resolve the data directory relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = DataConfig::default();
        self.data_resolved = DataConfig {
            dir: config_dir.join(self.data.dir.as_deref().unwrap_or("data")),
            index_file: self.data.index_file.clone().unwrap_or(defaults.index_file),
            categories_dir: self
                .data
                .categories_dir
                .clone()
                .unwrap_or(defaults.categories_dir),
        };
    }
}
