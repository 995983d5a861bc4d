//! Remembered sign-in.
//!
//! The only state kept across runs besides the config: the last signed-in
//! user, stored as `user.json` in the data directory.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::api::UserRecord;
use crate::error::Result;

pub struct UserSession {
    path: PathBuf,
}

impl UserSession {
    /// Store under the default data directory.
    pub fn open() -> Result<Self> {
        Ok(Self::at(data_dir()?.join("user.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The remembered user, if any. A corrupt file is treated as signed out.
    pub fn load(&self) -> Result<Option<UserRecord>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&content) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable user file");
                Ok(None)
            }
        }
    }

    pub fn save(&self, user: &UserRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(user)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Forget the user. Succeeds when nobody was remembered.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
