//! Application service
//!
//! High-level operations for the credential lifecycle: registration (key
//! issuance), revocation (key replacement) and owner-scoped lookups.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::domain::application::{
    validate_application_name, validate_website_url, Application, ApplicationId,
    ApplicationRepository,
};
use crate::domain::auth::credential_cache_key;
use crate::domain::cache::Cache;
use crate::domain::owner::OwnerId;
use crate::domain::DomainError;

use crate::infrastructure::auth::ApiKeyGenerator;

/// Request to register a new application
#[derive(Debug, Clone)]
pub struct RegisterApplicationRequest {
    pub name: String,
    pub description: Option<String>,
    pub website_url: String,
}

/// Application service managing the credential lifecycle
#[derive(Debug)]
pub struct ApplicationService<R>
where
    R: ApplicationRepository,
{
    repository: Arc<R>,
    cache: Arc<dyn Cache>,
    generator: ApiKeyGenerator,
    /// Grace period a replaced key's successor stays valid for
    revoked_key_lifetime: Duration,
}

impl<R: ApplicationRepository> ApplicationService<R> {
    /// Create a new application service
    pub fn new(repository: Arc<R>, cache: Arc<dyn Cache>) -> Self {
        Self {
            repository,
            cache,
            generator: ApiKeyGenerator::default(),
            revoked_key_lifetime: Duration::days(30),
        }
    }

    /// Create with a custom generator
    pub fn with_generator(mut self, generator: ApiKeyGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Set how long a reissued key remains valid
    pub fn with_revoked_key_lifetime(mut self, lifetime: Duration) -> Self {
        self.revoked_key_lifetime = lifetime;
        self
    }

    /// Register a new application and issue its key
    ///
    /// Name uniqueness is scoped to the owner and only counts records whose
    /// credential is still active.
    pub async fn register(
        &self,
        owner_id: &OwnerId,
        request: RegisterApplicationRequest,
    ) -> Result<Application, DomainError> {
        validate_application_name(&request.name)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_website_url(&request.website_url)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let name = request.name.trim().to_string();

        if let Some(existing) = self
            .repository
            .find_by_owner_and_name(owner_id, &name)
            .await?
        {
            if existing.is_active() {
                return Err(DomainError::conflict(format!(
                    "An active application named '{}' already exists for this owner",
                    name
                )));
            }
        }

        let api_key = self.generator.generate();

        let mut application = Application::new(
            ApplicationId::generate(),
            &name,
            request.website_url,
            api_key,
            owner_id.clone(),
        );

        if let Some(description) = request.description {
            application = application.with_description(description);
        }

        let created = self.repository.insert(application).await?;

        info!(
            application_id = %created.id(),
            owner_id = %owner_id,
            "Application registered, API key issued"
        );

        Ok(created)
    }

    /// Revoke an application's key and issue a replacement
    ///
    /// The old key's cache entry is removed before the replacement exists, so
    /// there is no window in which both credentials authenticate.
    pub async fn revoke_key(
        &self,
        owner_id: &OwnerId,
        application_id: &ApplicationId,
    ) -> Result<Application, DomainError> {
        let mut application = self
            .repository
            .find_by_owner_and_id(owner_id, application_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Application '{}' not found", application_id))
            })?;

        let old_cache_key = credential_cache_key(application.api_key());

        if let Err(e) = self.cache.delete(&old_cache_key).await {
            // An unreachable cache cannot serve the stale entry either; the
            // revoke proceeds and the entry dies with its TTL at worst.
            warn!(error = %e, "Failed to invalidate cached snapshot for revoked key");
        }

        let new_key = self.generator.generate();
        let expires_at = Utc::now() + self.revoked_key_lifetime;
        application.replace_key(new_key, Some(expires_at));

        let updated = self.repository.update(&application).await?;

        info!(
            application_id = %application_id,
            owner_id = %owner_id,
            "API key revoked and replaced"
        );

        Ok(updated)
    }

    /// Fetch an owner's application, including its current credential
    pub async fn get(
        &self,
        owner_id: &OwnerId,
        application_id: &ApplicationId,
    ) -> Result<Option<Application>, DomainError> {
        self.repository
            .find_by_owner_and_id(owner_id, application_id)
            .await
    }

    /// List an owner's applications
    pub async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Application>, DomainError> {
        self.repository.list_by_owner(owner_id).await
    }
}
