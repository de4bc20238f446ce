use std::{
    fs,
    path::{Path, PathBuf},
};

use engine::User;
use serde::{Deserialize, Serialize};

use crate::error::StateError;

const DEFAULT_STATE_PATH: &str = "config/session.json";

/// Client state persisted across restarts.
///
/// Only the session identity lives here, under the `root` key; the expense
/// cache is always refetched.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LocalState {
    #[serde(default)]
    pub root: Option<PersistedSession>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedSession {
    pub user: User,
    /// Cookie header of the backend session.
    pub cookies: Option<String>,
}

impl LocalState {
    pub fn load(path: &Path) -> Result<Self, StateError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), StateError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    /// Deletes the file; a missing file is not an error.
    pub fn remove(path: &Path) -> Result<(), StateError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

pub fn default_state_path() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_PATH)
}
