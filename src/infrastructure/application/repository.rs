//! In-memory application repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::application::{Application, ApplicationId, ApplicationRepository};
use crate::domain::owner::OwnerId;
use crate::domain::DomainError;

/// In-memory implementation of ApplicationRepository
///
/// Keeps a secondary index from key value to application id so credential
/// lookups stay O(1), matching the unique index the production store keeps
/// on the key column.
#[derive(Debug)]
pub struct InMemoryApplicationRepository {
    applications: Arc<RwLock<HashMap<String, Application>>>,
    key_index: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryApplicationRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self {
            applications: Arc::new(RwLock::new(HashMap::new())),
            key_index: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryApplicationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn find_by_key(&self, api_key: &str) -> Result<Option<Application>, DomainError> {
        let key_index = self.key_index.read().await;

        if let Some(app_id) = key_index.get(api_key) {
            let applications = self.applications.read().await;
            Ok(applications.get(app_id).cloned())
        } else {
            Ok(None)
        }
    }

    async fn find_by_owner_and_name(
        &self,
        owner_id: &OwnerId,
        name: &str,
    ) -> Result<Option<Application>, DomainError> {
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
        let applications = self.applications.read().await;

        Ok(applications
            .get(id.as_str())
            .filter(|a| a.owner_id() == owner_id)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Application>, DomainError> {
        let applications = self.applications.read().await;

        Ok(applications
            .values()
            .filter(|a| a.owner_id() == owner_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, application: Application) -> Result<Application, DomainError> {
        let mut applications = self.applications.write().await;
        let mut key_index = self.key_index.write().await;

        let id = application.id().as_str().to_string();
        let api_key = application.api_key().to_string();

        if applications.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "Application with id '{}' already exists",
                id
            )));
        }

        if key_index.contains_key(&api_key) {
            return Err(DomainError::conflict(
                "Application with the same API key already exists",
            ));
        }

        applications.insert(id.clone(), application.clone());
        key_index.insert(api_key, id);

        Ok(application)
    }

    async fn update(&self, application: &Application) -> Result<Application, DomainError> {
        let mut applications = self.applications.write().await;
        let mut key_index = self.key_index.write().await;

        let id = application.id().as_str().to_string();

        let Some(previous) = applications.get(&id) else {
            return Err(DomainError::not_found(format!(
                "Application '{}' not found",
                id
            )));
        };

        // Keep the key index in step with key replacement on revoke
        if previous.api_key() != application.api_key() {
            key_index.remove(previous.api_key());
            key_index.insert(application.api_key().to_string(), id.clone());
        }

        applications.insert(id, application.clone());
        Ok(application.clone())
    }
}
