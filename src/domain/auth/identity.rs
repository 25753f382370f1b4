//! Resolved identity types produced by the authentication gate

use serde::{Deserialize, Serialize};

use crate::domain::application::{Application, ApplicationId};
use crate::domain::owner::{Owner, OwnerId};

/// Namespace prefix for credential cache keys, so raw tokens never collide
/// with unrelated cached values.
const CACHE_KEY_PREFIX: &str = "apikey";

/// Compute the cache lookup key for a presented token
pub fn credential_cache_key(token: &str) -> String {
    format!("{}:{}", CACHE_KEY_PREFIX, token)
}

/// Denormalized owner reference carried in cached snapshots
///
/// The display name is optional: authentication never depends on the owner
/// directory being populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub id: OwnerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl OwnerRef {
    pub fn from_owner(owner: &Owner) -> Self {
        Self {
            id: owner.id().clone(),
            name: Some(owner.name().to_string()),
        }
    }

    pub fn id_only(id: OwnerId) -> Self {
        Self { id, name: None }
    }
}

/// The resolved application identity handed to downstream handlers
///
/// Also the exact payload serialized into the key cache; it must stay
/// self-sufficient so a cache hit resolves a request without touching the
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationIdentity {
    pub application_id: ApplicationId,
    pub application_name: String,
    pub owner: OwnerRef,
}

impl ApplicationIdentity {
    /// Build a snapshot from a store record and an optionally resolved owner
    pub fn from_record(application: &Application, owner: Option<&Owner>) -> Self {
        let owner_ref = match owner {
            Some(owner) => OwnerRef::from_owner(owner),
            None => OwnerRef::id_only(application.owner_id().clone()),
        };

        Self {
            application_id: application.id().clone(),
            application_name: application.name().to_string(),
            owner: owner_ref,
        }
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner.id
    }
}
