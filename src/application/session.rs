use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{User, UserId};

use super::AppResult;

pub const DEFAULT_SESSION_FILE: &str = ".expenseshare-session.json";

/// The logged-in viewer. Passed explicitly to every use case that needs one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}

/// Keeps the session between command invocations in a small JSON file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` when nobody is logged in.
    pub fn load(&self) -> AppResult<Option<Session>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    pub fn save(&self, session: &Session) -> AppResult<()> {
        let contents = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, contents)?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Forget the current session. Succeeds when there is none.
    pub fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn temp_store() -> (SessionStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("session.json"));
        (store, temp_dir)
    }

    #[test]
    fn test_load_without_session() {
        let (store, _temp) = temp_store();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let (store, _temp) = temp_store();
        let session = Session::new(User::new(5, "Dana", "GBP"));

        store.save(&session).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded.user_id(), 5);
        assert_eq!(loaded.user.full_name, "Dana");
        assert_eq!(loaded.user.default_currency, "GBP");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (store, _temp) = temp_store();
        store.save(&Session::new(User::new(1, "Eve", "EUR"))).unwrap();

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_session_file_is_an_error() {
        let (store, _temp) = temp_store();
        fs::write(store.path(), "not json").unwrap();

        assert!(store.load().is_err());
    }
}
