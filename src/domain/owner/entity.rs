//! Owner entity - the account that registers and manages applications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::{StorageEntity, StorageKey};

/// Owner identifier - opaque, resolved by the upstream identity provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for OwnerId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Owner account record
///
/// Holds the display attributes that get denormalized into cached
/// application snapshots. Identity itself (login, tokens) is handled
/// upstream and is not modeled here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    id: OwnerId,
    name: String,
    created_at: DateTime<Utc>,
}

impl Owner {
    pub fn new(id: OwnerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &OwnerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl StorageEntity for Owner {
    type Key = OwnerId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_creation() {
        let owner = Owner::new(OwnerId::new("owner-1"), "Ada");

        assert_eq!(owner.id().as_str(), "owner-1");
        assert_eq!(owner.name(), "Ada");
    }

    #[test]
    fn test_owner_id_display() {
        let id = OwnerId::new("owner-42");
        assert_eq!(id.to_string(), "owner-42");
    }
}
