use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// User settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where exports land when no output path is given.
    pub output_dir: PathBuf,
    /// Prefix of free-text question ids (`PYTHON-1`).
    pub text_id_prefix: String,
    /// Points stamped on free-text questions.
    pub text_points: String,
    /// Difficulty stamped on free-text questions.
    pub text_difficulty: String,
    /// First-field marker that opens a block when regrouping encoded files.
    pub block_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("outputs"),
            text_id_prefix: "PYTHON".to_string(),
            text_points: "1".to_string(),
            text_difficulty: "1".to_string(),
            block_marker: "NewQuestion".to_string(),
        }
    }
}

impl Config {
    /// Config at `config_path`, or `None` when there is no such file.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let path = config_path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::ConfigReadError {
                    config_path: path.to_path_buf(),
                    source,
                });
            }
        };

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: path.to_path_buf(),
                source,
            })?;
        config.expand_output_dir();
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    /// Loaded config, or defaults when no file exists.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn config_path() -> PathBuf {
        let home_config = shellexpand::tilde("~/.config");
        Path::new(home_config.as_ref())
            .join("quizblock")
            .join("config.toml")
    }

    /// Expands `~` and `$VARS` in `output_dir`. An unset variable leaves
    /// the path as written.
    fn expand_output_dir(&mut self) {
        if let Some(expanded) = expand_path(&self.output_dir) {
            self.output_dir = expanded;
        }
    }
}

fn expand_path(path: &Path) -> Option<PathBuf> {
    shellexpand::full(&path.to_string_lossy())
        .ok()
        .map(|expanded| PathBuf::from(expanded.as_ref()))
}
