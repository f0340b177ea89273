//! Client secret resolution
//!
//! The agent core only ever sees the resolved secret string. Where it comes
//! from is decided by a [`SecretResolver`].

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Maps a secret reference to its plaintext value.
pub trait SecretResolver {
    fn resolve_secret(&self, reference: &str) -> Result<String, ConfigError>;
}

/// YAML file of `id: secret` pairs.
///
/// References have the form `<id>:<path>`. An empty path selects
/// `~/.ms_intune/secrets.yaml`.
#[derive(Debug, Default)]
pub struct FileSecretStore;

impl FileSecretStore {
    pub fn new() -> Self {
        Self
    }

    /// Get the default store path
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or_else(|| ConfigError::SecretStore {
            path: "~/.ms_intune/secrets.yaml".to_string(),
            reason: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".ms_intune").join("secrets.yaml"))
    }

    fn load(path: &PathBuf) -> Result<HashMap<String, String>, ConfigError> {
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::SecretStore {
            path: display.clone(),
            reason: e.to_string(),
        })?;

        serde_yaml::from_str(&contents).map_err(|e| ConfigError::SecretStore {
            path: display,
            reason: e.to_string(),
        })
    }
}

impl SecretResolver for FileSecretStore {
    fn resolve_secret(&self, reference: &str) -> Result<String, ConfigError> {
        // Split on the first ':' only; Windows paths contain more.
        let (id, path) = reference
            .split_once(':')
            .filter(|(id, _)| !id.is_empty())
            .ok_or_else(|| ConfigError::InvalidSecretRef(reference.to_string()))?;

        let path = if path.is_empty() {
            Self::default_path()?
        } else {
            PathBuf::from(path)
        };

        let mut secrets = Self::load(&path)?;
        secrets
            .remove(id)
            .ok_or_else(|| ConfigError::SecretNotFound {
                id: id.to_string(),
                path: path.display().to_string(),
            })
    }
}
