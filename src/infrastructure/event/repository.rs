//! Storage-backed event repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::application::ApplicationId;
use crate::domain::event::{AnalyticsEvent, EventRepository};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of EventRepository
#[derive(Debug)]
pub struct StorageEventRepository {
    storage: Arc<dyn Storage<AnalyticsEvent>>,
}

impl StorageEventRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<AnalyticsEvent>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl EventRepository for StorageEventRepository {
    async fn insert(&self, event: AnalyticsEvent) -> Result<AnalyticsEvent, DomainError> {
        self.storage.create(event).await
    }

    async fn list_by_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<AnalyticsEvent>, DomainError> {
        let all = self.storage.list().await?;
        Ok(all
            .into_iter()
            .filter(|e| e.application_id() == application_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn create_repo() -> StorageEventRepository {
        let storage = Arc::new(InMemoryStorage::<AnalyticsEvent>::new());
        StorageEventRepository::new(storage)
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let repo = create_repo();
        let app_id = ApplicationId::new("app-1");

        repo.insert(AnalyticsEvent::new(
            "page_view",
            "https://example.com/",
            "203.0.113.7",
            app_id.clone(),
        ))
        .await
        .unwrap();
        repo.insert(AnalyticsEvent::new(
            "button_click",
            "https://example.com/signup",
            "203.0.113.7",
            app_id.clone(),
        ))
        .await
        .unwrap();
        repo.insert(AnalyticsEvent::new(
            "page_view",
            "https://other.example.com/",
            "203.0.113.8",
            ApplicationId::new("app-2"),
        ))
        .await
        .unwrap();

        let events = repo.list_by_application(&app_id).await.unwrap();
        assert_eq!(events.len(), 2);
    }
}
