//! Storage-backed application repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::application::{Application, ApplicationId, ApplicationRepository};
use crate::domain::owner::OwnerId;
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of ApplicationRepository
///
/// The storage backend is an opaque document collection keyed by application
/// id; secondary lookups (key value, owner scoping) filter over the listed
/// documents.
#[derive(Debug)]
pub struct StorageApplicationRepository {
    storage: Arc<dyn Storage<Application>>,
}

impl StorageApplicationRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Application>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ApplicationRepository for StorageApplicationRepository {
    async fn find_by_key(&self, api_key: &str) -> Result<Option<Application>, DomainError> {
        let all = self.storage.list().await?;
        Ok(all.into_iter().find(|a| a.api_key() == api_key))
    }

    async fn find_by_owner_and_name(
        &self,
        owner_id: &OwnerId,
        name: &str,
    ) -> Result<Option<Application>, DomainError> {
        let all = self.storage.list().await?;
        Ok(all
            .into_iter()
            .find(|a| a.owner_id() == owner_id && a.name() == name))
    }

    async fn find_by_owner_and_id(
        &self,
        owner_id: &OwnerId,
        id: &ApplicationId,
    ) -> Result<Option<Application>, DomainError> {
        Ok(self
            .storage
            .get(id)
            .await?
            .filter(|a| a.owner_id() == owner_id))
    }

    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Application>, DomainError> {
        let all = self.storage.list().await?;
        Ok(all
            .into_iter()
            .filter(|a| a.owner_id() == owner_id)
            .collect())
    }

    async fn insert(&self, application: Application) -> Result<Application, DomainError> {
        if self.find_by_key(application.api_key()).await?.is_some() {
            return Err(DomainError::conflict(
                "Application with the same API key already exists",
            ));
        }

        self.storage.create(application).await
    }

    async fn update(&self, application: &Application) -> Result<Application, DomainError> {
        if !self.storage.exists(application.id()).await? {
            return Err(DomainError::not_found(format!(
                "Application '{}' not found",
                application.id()
            )));
        }

        self.storage.update(application.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn create_repo() -> StorageApplicationRepository {
        let storage = Arc::new(InMemoryStorage::<Application>::new());
        StorageApplicationRepository::new(storage)
    }

    fn create_test_application(name: &str, key: &str, owner: &str) -> Application {
        Application::new(
            ApplicationId::generate(),
            name,
            "https://example.com",
            key,
            OwnerId::new(owner),
        )
    }

    #[tokio::test]
    async fn test_insert_and_find_by_key() {
        let repo = create_repo();
        let app = create_test_application("Shop", "ak_one", "owner-1");

        repo.insert(app.clone()).await.unwrap();

        let found = repo.find_by_key("ak_one").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().name(), "Shop");
    }

    #[tokio::test]
    async fn test_insert_duplicate_key() {
        let repo = create_repo();

        repo.insert(create_test_application("One", "ak_same", "owner-1"))
            .await
            .unwrap();

        let result = repo
            .insert(create_test_application("Two", "ak_same", "owner-2"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_replaced_key_is_found() {
        let repo = create_repo();
        let mut app = create_test_application("Shop", "ak_old", "owner-1");
        repo.insert(app.clone()).await.unwrap();

        app.replace_key("ak_new", None);
        repo.update(&app).await.unwrap();

        assert!(repo.find_by_key("ak_old").await.unwrap().is_none());
        assert!(repo.find_by_key("ak_new").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let repo = create_repo();
        let app = create_test_application("Shop", "ak_one", "owner-1");

        let result = repo.update(&app).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_owner_scoping() {
        let repo = create_repo();
        let app = create_test_application("Shop", "ak_one", "owner-1");
        let id = app.id().clone();
        repo.insert(app).await.unwrap();

        assert!(repo
            .find_by_owner_and_id(&OwnerId::new("owner-2"), &id)
            .await
            .unwrap()
            .is_none());
        assert_eq!(
            repo.list_by_owner(&OwnerId::new("owner-1"))
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
