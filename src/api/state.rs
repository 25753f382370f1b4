//! Application state for shared services

use std::sync::Arc;

use crate::domain::application::{Application, ApplicationId, ApplicationRepository};
use crate::domain::cache::Cache;
use crate::domain::owner::{OwnerId, OwnerRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::AuthenticationGate;
use crate::infrastructure::rate_limit::RateLimiter;
use crate::infrastructure::services::{
    ApplicationService, EventService, RegisterApplicationRequest,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub auth_gate: Arc<AuthenticationGate>,
    pub application_service: Arc<dyn ApplicationServiceTrait>,
    pub event_service: Arc<EventService>,
    pub owner_repository: Arc<dyn OwnerRepository>,
    pub cache: Arc<dyn Cache>,
    pub rate_limiter: Arc<RateLimiter>,
}

/// Trait for application lifecycle operations
#[async_trait::async_trait]
pub trait ApplicationServiceTrait: Send + Sync {
    async fn register(
        &self,
        owner_id: &OwnerId,
        request: RegisterApplicationRequest,
    ) -> Result<Application, DomainError>;

    async fn revoke_key(
        &self,
        owner_id: &OwnerId,
        application_id: &ApplicationId,
    ) -> Result<Application, DomainError>;

    async fn get(
        &self,
        owner_id: &OwnerId,
        application_id: &ApplicationId,
    ) -> Result<Option<Application>, DomainError>;

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Application>, DomainError>;
}

#[async_trait::async_trait]
impl<R: ApplicationRepository + 'static> ApplicationServiceTrait for ApplicationService<R> {
    async fn register(
        &self,
        owner_id: &OwnerId,
        request: RegisterApplicationRequest,
    ) -> Result<Application, DomainError> {
        ApplicationService::register(self, owner_id, request).await
    }

    async fn revoke_key(
        &self,
        owner_id: &OwnerId,
        application_id: &ApplicationId,
    ) -> Result<Application, DomainError> {
        ApplicationService::revoke_key(self, owner_id, application_id).await
    }

    async fn get(
        &self,
        owner_id: &OwnerId,
        application_id: &ApplicationId,
    ) -> Result<Option<Application>, DomainError> {
        ApplicationService::get(self, owner_id, application_id).await
    }

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Application>, DomainError> {
        ApplicationService::list(self, owner_id).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        auth_gate: Arc<AuthenticationGate>,
        application_service: Arc<dyn ApplicationServiceTrait>,
        event_service: Arc<EventService>,
        owner_repository: Arc<dyn OwnerRepository>,
        cache: Arc<dyn Cache>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            auth_gate,
            application_service,
            event_service,
            owner_repository,
            cache,
            rate_limiter,
        }
    }
}
