//! In-memory history store with optional JSON file persistence.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{HistoryError, Result};
use crate::record::{LookupRecord, Profile, ProfileLookup, User, UserId};

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryData {
    users: Vec<User>,
    lookups: Vec<LookupRecord>,
}

impl HistoryData {
    fn next_user_id(&self) -> UserId {
        self.users.iter().map(|user| user.id).max().unwrap_or(0) + 1
    }

    fn next_lookup_id(&self) -> u64 {
        self.lookups.iter().map(|record| record.id).max().unwrap_or(0) + 1
    }

    fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }
}

/// Users and saved lookups behind a mutex.
///
/// When backed by a file, the whole store is rewritten after every mutation.
#[derive(Debug, Default)]
pub struct HistoryStore {
    path: Option<PathBuf>,
    data: Mutex<HistoryData>,
}

impl HistoryStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a file-backed store, starting empty when the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(content) => {
                let data: HistoryData =
                    serde_json::from_str(&content).map_err(|source| HistoryError::Json {
                        path: path.clone(),
                        source,
                    })?;
                info!(
                    path = %path.display(),
                    users = data.users.len(),
                    lookups = data.lookups.len(),
                    "loaded lookup history"
                );
                data
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no history file yet, starting empty");
                HistoryData::default()
            }
            Err(source) => return Err(HistoryError::Io { path, source }),
        };
        Ok(Self {
            path: Some(path),
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Register a user; usernames are unique and compared after trimming.
    pub fn create_user(&self, username: &str, email: Option<&str>) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(HistoryError::InvalidInput("username is required".to_string()));
        }
        let mut data = self.lock()?;
        if data.users.iter().any(|user| user.username == username) {
            return Err(HistoryError::DuplicateUsername {
                username: username.to_string(),
            });
        }
        let user = User {
            id: data.next_user_id(),
            username: username.to_string(),
            email: email
                .map(str::trim)
                .filter(|email| !email.is_empty())
                .map(str::to_string),
        };
        data.users.push(user.clone());
        if let Err(err) = self.persist(&data) {
            data.users.pop();
            return Err(err);
        }
        debug!(user_id = user.id, "user created");
        Ok(user)
    }

    pub fn find_user(&self, username: &str) -> Result<User> {
        let username = username.trim();
        self.lock()?
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned()
            .ok_or(HistoryError::UserNotFound)
    }

    pub fn profile(&self, user_id: UserId) -> Result<Profile> {
        let data = self.lock()?;
        let user = data.user(user_id).ok_or(HistoryError::UserNotFound)?;
        Ok(Profile {
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            lookups: data
                .lookups
                .iter()
                .filter(|record| record.user_id == Some(user_id))
                .map(ProfileLookup::from)
                .collect(),
        })
    }

    /// Record a lookup result. An owning user, when given, must exist.
    pub fn save_lookup(
        &self,
        user_id: Option<UserId>,
        disease_text: &str,
        result: Value,
    ) -> Result<LookupRecord> {
        let disease_text = disease_text.trim();
        if disease_text.is_empty() {
            return Err(HistoryError::InvalidInput(
                "disease_text is required".to_string(),
            ));
        }
        let mut data = self.lock()?;
        if let Some(id) = user_id
            && data.user(id).is_none()
        {
            return Err(HistoryError::UserNotFound);
        }
        let record = LookupRecord {
            id: data.next_lookup_id(),
            user_id,
            disease_text: disease_text.to_string(),
            result,
            created_at: Utc::now(),
        };
        data.lookups.push(record.clone());
        if let Err(err) = self.persist(&data) {
            data.lookups.pop();
            return Err(err);
        }
        debug!(lookup_id = record.id, ?user_id, "lookup saved");
        Ok(record)
    }

    pub fn lookup_count(&self) -> Result<usize> {
        Ok(self.lock()?.lookups.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HistoryData>> {
        self.data.lock().map_err(|_| HistoryError::Poisoned)
    }

    fn persist(&self, data: &HistoryData) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| HistoryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(data).map_err(|source| HistoryError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(path, content).map_err(|source| HistoryError::Io {
            path: path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_are_sequential() {
        let store = HistoryStore::in_memory();
        let first = store.create_user("arun", None).unwrap();
        let second = store.create_user("meena", Some("meena@example.org")).unwrap();
        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(second.email.as_deref(), Some("meena@example.org"));
    }

    #[test]
    fn duplicate_username_conflicts() {
        let store = HistoryStore::in_memory();
        store.create_user("arun", None).unwrap();
        assert!(matches!(
            store.create_user(" arun ", None),
            Err(HistoryError::DuplicateUsername { .. })
        ));
    }

    #[test]
    fn anonymous_lookup_is_not_in_any_profile() {
        let store = HistoryStore::in_memory();
        let user = store.create_user("arun", None).unwrap();
        store
            .save_lookup(None, "fever", json!({ "error": "No match found in Siddha or Unani." }))
            .unwrap();
        assert_eq!(store.lookup_count().unwrap(), 1);
        assert!(store.profile(user.id).unwrap().lookups.is_empty());
    }
}
