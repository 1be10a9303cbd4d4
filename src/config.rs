use crate::domain::{StateFormat, ORIGIN};
use crate::error::{MsgtmError, Result};
use crate::ops::{TagAnnotation, DEFAULT_TAG_MESSAGE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "msgtm.toml";

/// Represents the complete configuration for msgtm.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Remote used by push and remote reset
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub state: StateConfig,
}

fn default_remote() -> String {
    ORIGIN.to_string()
}

fn default_annotated() -> bool {
    true
}

fn default_message() -> String {
    DEFAULT_TAG_MESSAGE.to_string()
}

fn default_state_file() -> String {
    "msgtm-state.yaml".to_string()
}

/// How created tags are written.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagsConfig {
    #[serde(default = "default_annotated")]
    pub annotated: bool,

    /// Message template; `{tag}` and `{commit}` are substituted
    #[serde(default = "default_message")]
    pub message: String,
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            annotated: default_annotated(),
            message: default_message(),
        }
    }
}

/// Where the tracked state lives.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StateConfig {
    #[serde(default = "default_state_file")]
    pub file: String,

    /// Inferred from the file extension when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<StateFormat>,
}

impl Default for StateConfig {
    fn default() -> Self {
        StateConfig {
            file: default_state_file(),
            format: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            tags: TagsConfig::default(),
            state: StateConfig::default(),
        }
    }
}

impl Config {
    pub fn annotation(&self) -> TagAnnotation {
        if self.tags.annotated {
            TagAnnotation::Annotated(self.tags.message.clone())
        } else {
            TagAnnotation::Lightweight
        }
    }

    pub fn state_file(&self) -> PathBuf {
        PathBuf::from(&self.state.file)
    }
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| MsgtmError::config(format!("Invalid configuration: {}", e)))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `msgtm.toml` in current directory
/// 3. `msgtm/msgtm.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(),
    };

    match path {
        Some(path) => {
            let content = fs::read_to_string(&path).map_err(|e| {
                MsgtmError::config(format!("Cannot read '{}': {}", path.display(), e))
            })?;
            parse_config(&content)
        }
        None => Ok(Config::default()),
    }
}

fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("msgtm").join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.remote, "origin");
        assert!(config.tags.annotated);
        assert_eq!(config.annotation(), TagAnnotation::default());
        assert_eq!(config.state_file(), PathBuf::from("msgtm-state.yaml"));
        assert_eq!(config.state.format, None);
    }

    #[test]
    fn test_partial_config() {
        let config = parse_config(
            r#"
remote = "upstream"

[tags]
annotated = false

[state]
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.remote, "upstream");
        assert_eq!(config.annotation(), TagAnnotation::Lightweight);
        assert_eq!(config.tags.message, DEFAULT_TAG_MESSAGE);
        assert_eq!(config.state.file, "msgtm-state.yaml");
        assert_eq!(config.state.format, Some(StateFormat::Json));
    }

    #[test]
    fn test_custom_message() {
        let config = parse_config("[tags]\nmessage = \"release {tag}\"\n").unwrap();
        assert_eq!(
            config.annotation(),
            TagAnnotation::Annotated("release {tag}".to_string())
        );
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            parse_config("remote = ["),
            Err(MsgtmError::Config(_))
        ));
        assert!(matches!(
            parse_config("[state]\nformat = \"xml\"\n"),
            Err(MsgtmError::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = load_config(Some(Path::new("/nonexistent/msgtm.toml")));
        assert!(matches!(result, Err(MsgtmError::Config(_))));
    }
}
