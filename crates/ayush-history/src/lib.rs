//! Lookup history: users and the disease lookups they saved.

#![deny(unsafe_code)]

pub mod error;
pub mod record;
pub mod store;

pub use error::{HistoryError, Result};
pub use record::{LookupRecord, Profile, ProfileLookup, User, UserId};
pub use store::HistoryStore;
