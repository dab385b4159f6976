use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR: &str = ".card_import";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(rename = "photoPath", default)]
    pub photo_path: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot locate home directory")]
    NoHome,
    #[error("cannot read config \"{}\": {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in \"{}\": {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("please add photoPath to \"{}\"", .path.display())]
    MissingPhotoPath { path: PathBuf },
}

impl Config {
    /// Loads `~/.card_import/config.json`. Any failure here is fatal to the
    /// run; the caller prints the message and exits.
    pub fn load() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Self::load_from(&home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            // A config that was never written gets the same directive as an
            // empty photoPath: tell the operator what to add and where
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::MissingPhotoPath {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.photo_path.is_empty() {
            return Err(ConfigError::MissingPhotoPath {
                path: path.to_path_buf(),
            });
        }

        Ok(config)
    }
}
