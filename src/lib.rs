//! Beacon Analytics API
//!
//! A multi-tenant event-collection service: applications register, receive an
//! API key, and submit analytics events. Every write is fronted by an
//! API-key authentication gate backed by a TTL-bound cache over the key
//! store.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use api::state::{AppState, ApplicationServiceTrait};
use domain::application::{Application, ApplicationRepository};
use domain::cache::Cache;
use domain::event::{AnalyticsEvent, EventRepository};
use domain::owner::{Owner, OwnerRepository};
use infrastructure::application::{InMemoryApplicationRepository, StorageApplicationRepository};
use infrastructure::auth::{AuthGateConfig, AuthenticationGate};
use infrastructure::cache::{CacheConfig, CacheFactory, CacheType};
use infrastructure::event::StorageEventRepository;
use infrastructure::owner::StorageOwnerRepository;
use infrastructure::rate_limit::RateLimiter;
use infrastructure::services::{ApplicationService, EventService};
use infrastructure::storage::{StorageFactory, StorageType};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let snapshot_ttl = Duration::from_secs(config.cache.snapshot_ttl_secs);

    // Cache backend
    let cache_type: CacheType = config.cache.backend.parse()?;

    let mut cache_config = match cache_type {
        CacheType::InMemory => CacheConfig::in_memory(),
        CacheType::Redis => {
            let url = config
                .cache
                .redis_url
                .clone()
                .context("cache.redis_url is required for the redis cache backend")?;
            CacheConfig::redis(url)
        }
    };
    cache_config = cache_config.with_default_ttl(snapshot_ttl);
    if let Some(prefix) = &config.cache.key_prefix {
        cache_config = cache_config.with_key_prefix(prefix.clone());
    }

    info!("Cache backend: {}", cache_type);
    let cache: Arc<dyn Cache> = CacheFactory::new().create(&cache_config).await?;

    // Storage backend
    let storage_type = StorageType::parse(&config.storage.backend)
        .ok_or_else(|| anyhow::anyhow!("Unknown storage backend: {}", config.storage.backend))?;
    info!("Storage backend: {:?}", storage_type);

    let revoked_key_lifetime = chrono::Duration::days(config.auth.revoked_key_lifetime_days);

    let (application_service, gate_repository, owner_repository, event_repository): (
        Arc<dyn ApplicationServiceTrait>,
        Arc<dyn ApplicationRepository>,
        Arc<dyn OwnerRepository>,
        Arc<dyn EventRepository>,
    ) = match storage_type {
        StorageType::InMemory => {
            let application_repository = Arc::new(InMemoryApplicationRepository::new());
            let owner_repository: Arc<dyn OwnerRepository> = Arc::new(
                StorageOwnerRepository::new(StorageFactory::create_in_memory::<Owner>()),
            );
            let event_repository: Arc<dyn EventRepository> = Arc::new(
                StorageEventRepository::new(StorageFactory::create_in_memory::<AnalyticsEvent>()),
            );

            let application_service = Arc::new(
                ApplicationService::new(application_repository.clone(), cache.clone())
                    .with_revoked_key_lifetime(revoked_key_lifetime),
            );

            (
                application_service,
                application_repository,
                owner_repository,
                event_repository,
            )
        }
        StorageType::Postgres => {
            let url = config
                .storage
                .url
                .clone()
                .context("storage.url is required for the postgres backend")?;

            info!("Connecting to PostgreSQL...");
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.storage.max_connections)
                .connect(&url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            info!("PostgreSQL connection established");

            let application_storage =
                StorageFactory::create_postgres_with_pool::<Application>(pool.clone(), "applications");
            application_storage.ensure_table().await?;
            let owner_storage =
                StorageFactory::create_postgres_with_pool::<Owner>(pool.clone(), "owners");
            owner_storage.ensure_table().await?;
            let event_storage =
                StorageFactory::create_postgres_with_pool::<AnalyticsEvent>(pool, "analytics_events");
            event_storage.ensure_table().await?;

            let application_repository =
                Arc::new(StorageApplicationRepository::new(application_storage));
            let owner_repository: Arc<dyn OwnerRepository> =
                Arc::new(StorageOwnerRepository::new(owner_storage));
            let event_repository: Arc<dyn EventRepository> =
                Arc::new(StorageEventRepository::new(event_storage));

            let application_service = Arc::new(
                ApplicationService::new(application_repository.clone(), cache.clone())
                    .with_revoked_key_lifetime(revoked_key_lifetime),
            );

            (
                application_service,
                application_repository,
                owner_repository,
                event_repository,
            )
        }
    };

    let gate_config = AuthGateConfig {
        snapshot_ttl,
        store_timeout: Duration::from_millis(config.auth.store_timeout_ms),
        cache_timeout: Duration::from_millis(config.auth.cache_timeout_ms),
    };

    let auth_gate = Arc::new(
        AuthenticationGate::new(gate_repository, owner_repository.clone(), cache.clone())
            .with_config(gate_config),
    );

    let event_service = Arc::new(EventService::new(event_repository));
    let rate_limiter = Arc::new(RateLimiter::new());

    Ok(AppState::new(
        auth_gate,
        application_service,
        event_service,
        owner_repository,
        cache,
        rate_limiter,
    ))
}
