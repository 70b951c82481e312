//! Configuration management for gramscope.
//!
//! Configuration is read from `~/.config/gramscope/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! Credentials may also come from the environment so they stay out of the file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::Deserialize;

use crate::fetcher::{hiker, private_api};

pub const SESSION_ID_ENV: &str = "GRAMSCOPE_SESSION_ID";
pub const ACCESS_KEY_ENV: &str = "GRAMSCOPE_ACCESS_KEY";

const DEFAULT_USER_AGENT: &str =
    "Instagram 269.0.0.18.75 Android (26/8.0.0; 480dpi; 1080x1920; OnePlus; 6T Dev; devitron; qcom; en_US)";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory; each target gets its own subdirectory.
    pub dir: PathBuf,
    pub write_text: bool,
    pub json_dump: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            write_text: false,
            json_dump: false,
        }
    }
}

impl OutputConfig {
    pub fn target_dir(&self, target: &str) -> PathBuf {
        self.dir.join(target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Mobile private API, authenticated with a session cookie
    #[default]
    Private,
    /// HikerAPI service, authenticated with an access key
    Hiker,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub private_base_url: String,
    pub hiker_base_url: String,
    pub session_id: Option<String>,
    pub access_key: Option<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_pages: Option<usize>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Private,
            private_base_url: private_api::DEFAULT_BASE_URL.to_string(),
            hiker_base_url: hiker::DEFAULT_BASE_URL.to_string(),
            session_id: None,
            access_key: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            max_pages: None,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Credential for the selected backend.
    pub fn credential(&self) -> Option<&str> {
        let credential = match self.kind {
            BackendKind::Private => self.session_id.as_deref(),
            BackendKind::Hiker => self.access_key.as_deref(),
        };
        credential.filter(|c| !c.is_empty())
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load an explicit file; unlike [`Config::load`] a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/gramscope/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("gramscope").join("config.toml"))
    }

    /// Fill credentials from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Environment values win over the file; empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(session_id) = non_empty(SESSION_ID_ENV) {
            self.backend.session_id = Some(session_id);
        }
        if let Some(access_key) = non_empty(ACCESS_KEY_ENV) {
            self.backend.access_key = Some(access_key);
        }
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!(path = %path.display(), "Created default config");
        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        format!(
            r##"# gramscope configuration
#
# Credentials can also be supplied through the environment:
#   {session_env}  session cookie for the private backend
#   {access_env}  access key for the hiker backend

[output]
# Artifacts are written to <dir>/<target>/
dir = "output"

# Write <target>_<operation>.txt next to the console summary
write_text = false

# Write <target>_<operation>.json
json_dump = false

[backend]
# "private" or "hiker"
kind = "private"

private_base_url = "{private_url}"
hiker_base_url = "{hiker_url}"

# session_id = ""
# access_key = ""

# Request timeout in seconds
timeout_secs = 30

# Stop with an error after this many pages of one listing (unbounded if unset or 0)
# max_pages = 200
"##,
            session_env = SESSION_ID_ENV,
            access_env = ACCESS_KEY_ENV,
            private_url = private_api::DEFAULT_BASE_URL,
            hiker_url = hiker::DEFAULT_BASE_URL,
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.output.dir, PathBuf::from("output"));
        assert!(!config.output.json_dump);
        assert_eq!(config.backend.kind, BackendKind::Private);
        assert_eq!(config.backend.private_base_url, private_api::DEFAULT_BASE_URL);
        assert_eq!(config.backend.max_pages, None);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[backend]
kind = "hiker"
max_pages = 5
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.backend.kind, BackendKind::Hiker);
        assert_eq!(config.backend.max_pages, Some(5));
        // Defaults fill the rest
        assert_eq!(config.backend.timeout(), Duration::from_secs(30));
        assert_eq!(config.output.dir, PathBuf::from("output"));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.backend.hiker_base_url, hiker::DEFAULT_BASE_URL);
        assert!(config.backend.credential().is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config: Config = toml::from_str(
            r##"
[backend]
session_id = "from_file"
"##,
        )
        .unwrap();

        let env: HashMap<&str, &str> = [(SESSION_ID_ENV, "from_env"), (ACCESS_KEY_ENV, "")]
            .into_iter()
            .collect();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.backend.session_id.as_deref(), Some("from_env"));
        assert_eq!(config.backend.access_key, None);
        assert_eq!(config.backend.credential(), Some("from_env"));
    }

    #[test]
    fn test_credential_follows_kind() {
        let mut backend = BackendConfig {
            session_id: Some("sess".into()),
            access_key: Some("key".into()),
            ..Default::default()
        };
        assert_eq!(backend.credential(), Some("sess"));
        backend.kind = BackendKind::Hiker;
        assert_eq!(backend.credential(), Some("key"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[output]\njson_dump = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.output.json_dump);
        assert_eq!(
            config.output.target_dir("targetuser"),
            PathBuf::from("output/targetuser")
        );
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            Config::load_from(&dir.path().join("absent.toml")),
            Err(ConfigError::Parse { .. }) | Err(ConfigError::Io { .. })
        ));
    }
}
