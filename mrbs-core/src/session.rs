//! Stored login session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MrbsError, MrbsResult};

/// Session key handed out by `POST /auth/login`, sent back as the
/// `session` cookie on authenticated requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session: String,
    pub username: String,
    pub display_name: String,
}

impl Session {
    /// Read the session at `path`, `None` if nobody is logged in.
    pub fn load(path: &Path) -> MrbsResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)?;
        let session =
            serde_json::from_str(&contents).map_err(|e| MrbsError::Serialization(e.to_string()))?;
        Ok(Some(session))
    }

    pub fn save(&self, path: &Path) -> MrbsResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_json::to_string_pretty(self).map_err(|e| MrbsError::Serialization(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Remove the stored session. Returns false if there was none.
    pub fn clear(path: &Path) -> MrbsResult<bool> {
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path)?;
        Ok(true)
    }

    pub fn cookie(&self) -> String {
        format!("session={}", self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        assert_eq!(Session::load(&path).unwrap(), None);

        let session = Session {
            session: "abc123".into(),
            username: "alice".into(),
            display_name: "Alice Tan".into(),
        };
        session.save(&path).unwrap();
        assert_eq!(Session::load(&path).unwrap(), Some(session.clone()));
        assert_eq!(session.cookie(), "session=abc123");

        assert!(Session::clear(&path).unwrap());
        assert!(!Session::clear(&path).unwrap());
    }

    #[test]
    fn test_corrupt_session_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            Session::load(&path),
            Err(MrbsError::Serialization(_))
        ));
    }
}
