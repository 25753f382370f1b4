//! Analytics event entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::application::ApplicationId;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Event identifier - opaque UUID string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for EventId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Device class reported with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    #[default]
    Desktop,
    Tablet,
    Other,
}

/// Free-form client environment details attached to an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// One collected analytics event, stamped with the application it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    id: EventId,
    name: String,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    referrer: Option<String>,
    device: DeviceType,
    ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<String>,
    application_id: ApplicationId,
    #[serde(default)]
    metadata: EventMetadata,
    /// When the event happened on the client
    occurred_at: DateTime<Utc>,
    /// When the event was accepted by the collector
    recorded_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        ip_address: impl Into<String>,
        application_id: ApplicationId,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: EventId::generate(),
            name: name.into(),
            url: url.into(),
            referrer: None,
            device: DeviceType::default(),
            ip_address: ip_address.into(),
            user_id: None,
            session_id: None,
            application_id,
            metadata: EventMetadata::default(),
            occurred_at: now,
            recorded_at: now,
        }
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    pub fn with_device(mut self, device: DeviceType) -> Self {
        self.device = device;
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_metadata(mut self, metadata: EventMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn referrer(&self) -> Option<&str> {
        self.referrer.as_deref()
    }

    pub fn device(&self) -> DeviceType {
        self.device
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }

    pub fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

impl StorageEntity for AnalyticsEvent {
    type Key = EventId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
