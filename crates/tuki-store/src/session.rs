use tuki_core::SessionUser;

use crate::{FileStorage, StoreError};

pub const SESSION_STORAGE_KEY: &str = "userData";

#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: FileStorage,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: FileStorage) -> Self {
        Self { storage }
    }

    /// Stores `user` as the signed-in session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the session cannot be written.
    pub fn save_user(&self, user: &SessionUser) -> Result<(), StoreError> {
        let session = SessionUser {
            logged_in: true,
            ..user.clone()
        };
        let raw = serde_json::to_string(&session).map_err(|source| StoreError::Encode {
            key: SESSION_STORAGE_KEY.to_string(),
            source,
        })?;
        self.storage.set(SESSION_STORAGE_KEY, &raw)
    }

    /// The stored session, only while it is marked logged in.
    #[must_use]
    pub fn current_user(&self) -> Option<SessionUser> {
        let raw = match self.storage.get(SESSION_STORAGE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored session");
                return None;
            }
        };
        match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) if user.logged_in => Some(user),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed stored session");
                None
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the session file cannot be removed.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.storage.remove(SESSION_STORAGE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use tuki_core::Role;

    use super::*;

    fn store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(FileStorage::new(dir.path()));
        (dir, store)
    }

    fn user() -> SessionUser {
        SessionUser {
            id: 3,
            name: "Ana".into(),
            email: "ana@tuki.test".into(),
            role: Role::Admin,
            logged_in: false,
        }
    }

    #[test]
    fn saved_user_is_current_and_logged_in() {
        let (_dir, store) = store();
        store.save_user(&user()).unwrap();
        let current = store.current_user().unwrap();
        assert!(current.logged_in);
        assert!(current.is_admin());
    }

    #[test]
    fn logged_out_flag_is_not_current() {
        let (dir, store) = store();
        std::fs::write(
            dir.path().join("userData.json"),
            r#"{"id":3,"nombre":"Ana","email":"a@b.c","rol":"CLIENTE","loggedIn":false}"#,
        )
        .unwrap();
        assert!(store.current_user().is_none());
    }

    #[test]
    fn logout_clears_session() {
        let (_dir, store) = store();
        store.save_user(&user()).unwrap();
        store.logout().unwrap();
        assert!(store.current_user().is_none());
        store.logout().unwrap();
    }

    #[test]
    fn malformed_session_is_ignored() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("userData.json"), "[]").unwrap();
        assert!(store.current_user().is_none());
    }
}
