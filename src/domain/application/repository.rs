//! Application repository trait - the durable system of record for credentials

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Application, ApplicationId};
use crate::domain::owner::OwnerId;
use crate::domain::DomainError;

/// Repository trait for application records
///
/// The repository is a plain lookup/persist surface; credential validity
/// (active flag, expiry) is judged by the callers against the returned
/// record.
#[async_trait]
pub trait ApplicationRepository: Send + Sync + Debug {
    /// Find the application holding the given key value
    async fn find_by_key(&self, api_key: &str) -> Result<Option<Application>, DomainError>;

    /// Find an owner's application by display name
    async fn find_by_owner_and_name(
        &self,
        owner_id: &OwnerId,
        name: &str,
    ) -> Result<Option<Application>, DomainError>;

    /// Find an owner's application by id
    async fn find_by_owner_and_id(
        &self,
        owner_id: &OwnerId,
        id: &ApplicationId,
    ) -> Result<Option<Application>, DomainError>;

    /// List all applications registered by an owner
    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Application>, DomainError>;

    /// Persist a new application record
    async fn insert(&self, application: Application) -> Result<Application, DomainError>;

    /// Update an existing application record
    async fn update(&self, application: &Application) -> Result<Application, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock application repository for testing
    #[derive(Debug, Default)]
    pub struct MockApplicationRepository {
        applications: Arc<RwLock<HashMap<String, Application>>>,
        should_fail: Arc<RwLock<bool>>,
    }

    impl MockApplicationRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Set whether operations should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ApplicationRepository for MockApplicationRepository {
        async fn find_by_key(&self, api_key: &str) -> Result<Option<Application>, DomainError> {
            self.check_should_fail().await?;
            let applications = self.applications.read().await;
            Ok(applications
                .values()
                .find(|a| a.api_key() == api_key)
                .cloned())
        }

        async fn find_by_owner_and_name(
            &self,
            owner_id: &OwnerId,
            name: &str,
        ) -> Result<Option<Application>, DomainError> {
            self.check_should_fail().await?;
            let applications = self.applications.read().await;
            Ok(applications
                .values()
                .find(|a| a.owner_id() == owner_id && a.name() == name)
                .cloned())
        }

        async fn find_by_owner_and_id(
            &self,
            owner_id: &OwnerId,
            id: &ApplicationId,
        ) -> Result<Option<Application>, DomainError> {
            self.check_should_fail().await?;
            let applications = self.applications.read().await;
            Ok(applications
                .get(id.as_str())
                .filter(|a| a.owner_id() == owner_id)
                .cloned())
        }

        async fn list_by_owner(
            &self,
            owner_id: &OwnerId,
        ) -> Result<Vec<Application>, DomainError> {
            self.check_should_fail().await?;
            let applications = self.applications.read().await;
            Ok(applications
                .values()
                .filter(|a| a.owner_id() == owner_id)
                .cloned()
                .collect())
        }

        async fn insert(&self, application: Application) -> Result<Application, DomainError> {
            self.check_should_fail().await?;
            let mut applications = self.applications.write().await;
            let id = application.id().as_str().to_string();

            if applications.contains_key(&id) {
                return Err(DomainError::conflict(format!(
                    "Application with id '{}' already exists",
                    id
                )));
            }

            applications.insert(id, application.clone());
            Ok(application)
        }

        async fn update(&self, application: &Application) -> Result<Application, DomainError> {
            self.check_should_fail().await?;
            let mut applications = self.applications.write().await;
            let id = application.id().as_str().to_string();

            if !applications.contains_key(&id) {
                return Err(DomainError::not_found(format!(
                    "Application '{}' not found",
                    id
                )));
            }

            applications.insert(id, application.clone());
            Ok(application.clone())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

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
            let repo = MockApplicationRepository::new();
            let app = create_test_application("Shop", "ak_one", "owner-1");

            repo.insert(app.clone()).await.unwrap();

            let found = repo.find_by_key("ak_one").await.unwrap();
            assert!(found.is_some());
            assert_eq!(found.unwrap().name(), "Shop");
        }

        #[tokio::test]
        async fn test_find_by_owner_and_name() {
            let repo = MockApplicationRepository::new();
            repo.insert(create_test_application("Shop", "ak_one", "owner-1"))
                .await
                .unwrap();

            let owner = OwnerId::new("owner-1");
            assert!(repo
                .find_by_owner_and_name(&owner, "Shop")
                .await
                .unwrap()
                .is_some());

            let other = OwnerId::new("owner-2");
            assert!(repo
                .find_by_owner_and_name(&other, "Shop")
                .await
                .unwrap()
                .is_none());
        }

        #[tokio::test]
        async fn test_find_by_owner_and_id_scoping() {
            let repo = MockApplicationRepository::new();
            let app = create_test_application("Shop", "ak_one", "owner-1");
            let id = app.id().clone();
            repo.insert(app).await.unwrap();

            let wrong_owner = OwnerId::new("owner-2");
            assert!(repo
                .find_by_owner_and_id(&wrong_owner, &id)
                .await
                .unwrap()
                .is_none());
        }

        #[tokio::test]
        async fn test_should_fail() {
            let repo = MockApplicationRepository::new();
            repo.set_should_fail(true).await;

            let result = repo.find_by_key("ak_one").await;
            assert!(result.is_err());
        }
    }
}
