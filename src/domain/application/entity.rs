//! Application entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::owner::OwnerId;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Application identifier - opaque UUID string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ApplicationId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A registered tenant application and its credential
///
/// The `api_key` value is the credential itself: globally unique, replaced
/// wholesale on revoke. `api_key_expires_at == None` means the key never
/// expires. Records are never physically deleted; `is_active` is a one-way
/// administrative kill switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    id: ApplicationId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    website_url: String,
    api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key_expires_at: Option<DateTime<Utc>>,
    is_active: bool,
    owner_id: OwnerId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Application {
    /// Create a new application with a freshly issued key
    pub fn new(
        id: ApplicationId,
        name: impl Into<String>,
        website_url: impl Into<String>,
        api_key: impl Into<String>,
        owner_id: OwnerId,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            name: name.into(),
            description: None,
            website_url: website_url.into(),
            api_key: api_key.into(),
            api_key_expires_at: None,
            is_active: true,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set key expiration
    pub fn with_key_expiration(mut self, expires_at: DateTime<Utc>) -> Self {
        self.api_key_expires_at = Some(expires_at);
        self
    }

    // Getters

    pub fn id(&self) -> &ApplicationId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn website_url(&self) -> &str {
        &self.website_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_key_expires_at(&self) -> Option<DateTime<Utc>> {
        self.api_key_expires_at
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Credential checks

    /// Check if the key has expired
    pub fn key_is_expired(&self) -> bool {
        match self.api_key_expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            None => false,
        }
    }

    /// Check if the credential currently authenticates requests
    pub fn key_is_valid(&self) -> bool {
        self.is_active && !self.key_is_expired()
    }

    // Mutators

    /// Replace the credential: new key value, new expiry
    ///
    /// Used by revoke. The old key value stops authenticating as soon as the
    /// updated record is persisted and its cache entry is gone.
    pub fn replace_key(&mut self, api_key: impl Into<String>, expires_at: Option<DateTime<Utc>>) {
        self.api_key = api_key.into();
        self.api_key_expires_at = expires_at;
        self.touch();
    }

    /// Administrative kill switch. One-way; no public endpoint triggers this.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Application {
    type Key = ApplicationId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
