//! Event service
//!
//! Accepts collected events from authenticated applications and persists
//! them. The application identity always comes from the gate, never from the
//! payload.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::auth::ApplicationIdentity;
use crate::domain::event::{AnalyticsEvent, DeviceType, EventMetadata, EventRepository};
use crate::domain::DomainError;

/// An event payload as submitted by a client SDK
#[derive(Debug, Clone)]
pub struct CollectEventRequest {
    pub name: String,
    pub url: String,
    pub ip_address: String,
    pub referrer: Option<String>,
    pub device: Option<DeviceType>,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub metadata: EventMetadata,
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Event intake service
#[derive(Debug)]
pub struct EventService {
    repository: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    /// Record one event for the authenticated application
    pub async fn record(
        &self,
        identity: &ApplicationIdentity,
        request: CollectEventRequest,
    ) -> Result<AnalyticsEvent, DomainError> {
        if request.name.trim().is_empty() {
            return Err(DomainError::validation("Event name cannot be empty"));
        }
        if request.url.trim().is_empty() {
            return Err(DomainError::validation("Event URL cannot be empty"));
        }
        if request.ip_address.trim().is_empty() {
            return Err(DomainError::validation("Event IP address cannot be empty"));
        }

        let mut event = AnalyticsEvent::new(
            request.name,
            request.url,
            request.ip_address,
            identity.application_id.clone(),
        )
        .with_metadata(request.metadata);

        if let Some(referrer) = request.referrer {
            event = event.with_referrer(referrer);
        }
        if let Some(device) = request.device {
            event = event.with_device(device);
        }
        if let Some(user_id) = request.user_id {
            event = event.with_user_id(user_id);
        }
        if let Some(session_id) = request.session_id {
            event = event.with_session_id(session_id);
        }
        if let Some(occurred_at) = request.occurred_at {
            event = event.with_occurred_at(occurred_at);
        }

        let stored = self.repository.insert(event).await?;

        debug!(
            event_id = %stored.id(),
            application_id = %stored.application_id(),
            name = %stored.name(),
            "Event recorded"
        );

        Ok(stored)
    }
}
