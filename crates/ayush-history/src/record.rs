use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type UserId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// One saved resolution, stored as the JSON it was returned as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupRecord {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub disease_text: String,
    pub result: Value,
    pub created_at: DateTime<Utc>,
}

/// A user together with their saved lookups, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub user_id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub lookups: Vec<ProfileLookup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileLookup {
    pub disease_text: String,
    pub result: Value,
    pub created_at: DateTime<Utc>,
}

impl From<&LookupRecord> for ProfileLookup {
    fn from(record: &LookupRecord) -> Self {
        Self {
            disease_text: record.disease_text.clone(),
            result: record.result.clone(),
            created_at: record.created_at,
        }
    }
}
