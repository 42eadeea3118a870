use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sources::WINDY_ENDPOINT;

/// Environment variable consulted when the config carries no API key.
pub const API_KEY_VAR: &str = "WINDY_API_KEY";
/// Environment variable that replaces the configured endpoint when set.
pub const ENDPOINT_VAR: &str = "WINDY_ENDPOINT";

/// Endpoint and credentials for the forecast API.
///
/// Example TOML:
/// ```toml
/// endpoint = "https://api.windy.com/api/point-forecast/v2"
/// api_key = "..."
/// ```
///
/// The older YAML layout is read too, see [`Config::from_yaml_str`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint", alias = "Endpoint")]
    pub endpoint: String,

    #[serde(default, alias = "apikey", alias = "ApiKey", alias = "Apikey")]
    pub api_key: String,
}

/// YAML files nest both fields under a `serverinfo` section.
#[derive(Deserialize)]
struct YamlFile {
    #[serde(rename = "serverinfo", alias = "ServerInfo", alias = "serverInfo")]
    server_info: Config,
}

fn default_endpoint() -> String {
    WINDY_ENDPOINT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.api_key.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("api_key", &key)
            .finish()
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Parse the YAML layout:
    /// ```yaml
    /// serverinfo:
    ///   endpoint: https://api.windy.com/api/point-forecast/v2
    ///   apikey: "..."
    /// ```
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let file: YamlFile = serde_yaml::from_str(s)?;
        Ok(file.server_info)
    }

    /// Load from an explicit file. `.yaml`/`.yml` files use the YAML layout,
    /// anything else is TOML. An empty file is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Err(Error::Config(format!(
                "config file is empty: {}",
                path.display()
            )));
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&contents),
            _ => Self::from_toml_str(&contents),
        }
    }

    /// Load from the platform config directory, falling back to
    /// `windy/windy.yaml` under the user config directory. Returns defaults if
    /// neither file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if path.exists() {
            return Self::load_from(&path);
        }
        match Self::yaml_config_file_path() {
            Some(yaml) if yaml.exists() => Self::load_from(&yaml),
            _ => Ok(Self::default()),
        }
    }

    /// `windy/windy.yaml` in the user config directory (`$XDG_CONFIG_HOME` on Linux).
    pub fn yaml_config_file_path() -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.config_dir().join("windy").join("windy.yaml"))
    }

    /// Path to the default config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "windy", "windy-forecast").ok_or_else(|| {
            Error::Config("could not determine platform config directory".to_string())
        })?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay values from the process environment. Reads only.
    pub fn with_env(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup`: the API key is filled in only when the
    /// config has none, the endpoint is replaced whenever a value is present.
    /// Blank values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if self.api_key.trim().is_empty() {
            if let Some(key) = get(API_KEY_VAR) {
                self.api_key = key;
            }
        }
        if let Some(endpoint) = get(ENDPOINT_VAR) {
            self.endpoint = endpoint;
        }
        self
    }
}
