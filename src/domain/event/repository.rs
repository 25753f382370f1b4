//! Event repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::AnalyticsEvent;
use crate::domain::application::ApplicationId;
use crate::domain::DomainError;

/// Repository trait for collected events
#[async_trait]
pub trait EventRepository: Send + Sync + Debug {
    /// Persist a collected event
    async fn insert(&self, event: AnalyticsEvent) -> Result<AnalyticsEvent, DomainError>;

    /// List events recorded for one application
    async fn list_by_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<AnalyticsEvent>, DomainError>;
}
