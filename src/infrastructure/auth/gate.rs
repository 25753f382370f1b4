//! Authentication gate
//!
//! Maps a presented credential to an accepted identity or a typed rejection,
//! maintaining the cache-to-store consistency contract on the way.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, error, warn};

use crate::domain::application::ApplicationRepository;
use crate::domain::auth::{credential_cache_key, ApplicationIdentity, AuthRejection};
use crate::domain::cache::{Cache, CacheExt};
use crate::domain::owner::OwnerRepository;

/// Timeouts and freshness window for the gate's I/O
#[derive(Debug, Clone)]
pub struct AuthGateConfig {
    /// How long a cached snapshot stays fresh
    pub snapshot_ttl: Duration,
    /// Upper bound for store lookups; exceeding it fails the request
    pub store_timeout: Duration,
    /// Upper bound for cache calls; exceeding it degrades to store-only
    pub cache_timeout: Duration,
}

impl Default for AuthGateConfig {
    fn default() -> Self {
        Self {
            snapshot_ttl: Duration::from_secs(300),
            store_timeout: Duration::from_secs(2),
            cache_timeout: Duration::from_millis(250),
        }
    }
}

/// The authentication gate in front of every collected write
///
/// Consults the key cache first and falls back to the store on a miss,
/// repopulating the cache with a snapshot that resolves the request on its
/// own. The cache is an optimization only: any cache failure degrades to
/// store-only lookups. A store failure is fatal to the request and is
/// surfaced as a typed rejection, never replaced with a substitute identity.
#[derive(Debug)]
pub struct AuthenticationGate {
    applications: Arc<dyn ApplicationRepository>,
    owners: Arc<dyn OwnerRepository>,
    cache: Arc<dyn Cache>,
    config: AuthGateConfig,
}

impl AuthenticationGate {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        owners: Arc<dyn OwnerRepository>,
        cache: Arc<dyn Cache>,
    ) -> Self {
        Self {
            applications,
            owners,
            cache,
            config: AuthGateConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AuthGateConfig) -> Self {
        self.config = config;
        self
    }

    /// Authenticate a presented token
    pub async fn authenticate(
        &self,
        token: Option<&str>,
    ) -> Result<ApplicationIdentity, AuthRejection> {
        let token = match token.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return Err(AuthRejection::CredentialMissing),
        };

        let cache_key = credential_cache_key(token);
        let mut cache_usable = true;

        match timeout(
            self.config.cache_timeout,
            self.cache.get::<ApplicationIdentity>(&cache_key),
        )
        .await
        {
            Ok(Ok(Some(identity))) => {
                debug!(
                    application_id = %identity.application_id,
                    "API key resolved from cache"
                );
                return Ok(identity);
            }
            Ok(Ok(None)) => {}
            Ok(Err(e)) => {
                warn!(error = %e, "Key cache lookup failed, falling back to store");
                cache_usable = false;
            }
            Err(_) => {
                warn!("Key cache lookup timed out, falling back to store");
                cache_usable = false;
            }
        }

        let found = match timeout(
            self.config.store_timeout,
            self.applications.find_by_key(token),
        )
        .await
        {
            Ok(Ok(found)) => found,
            Ok(Err(e)) => {
                error!(error = %e, "Key store lookup failed during authentication");
                return Err(AuthRejection::store_unavailable(e.to_string()));
            }
            Err(_) => {
                error!("Key store lookup timed out during authentication");
                return Err(AuthRejection::store_unavailable("lookup timed out"));
            }
        };

        let Some(application) = found else {
            debug!("Presented API key is unknown to the store");
            return Err(AuthRejection::CredentialInvalidOrExpired);
        };

        if !application.key_is_valid() {
            debug!(
                application_id = %application.id(),
                active = application.is_active(),
                expired = application.key_is_expired(),
                "Presented API key no longer authenticates"
            );
            return Err(AuthRejection::CredentialInvalidOrExpired);
        }

        // The snapshot carries the owner's display attributes; a failed owner
        // lookup degrades to an id-only reference rather than failing a
        // credential the store just vouched for.
        let owner = match timeout(
            self.config.store_timeout,
            self.owners.get(application.owner_id()),
        )
        .await
        {
            Ok(Ok(owner)) => owner,
            Ok(Err(e)) => {
                warn!(error = %e, "Owner lookup failed, caching id-only snapshot");
                None
            }
            Err(_) => {
                warn!("Owner lookup timed out, caching id-only snapshot");
                None
            }
        };

        let identity = ApplicationIdentity::from_record(&application, owner.as_ref());

        if cache_usable {
            match timeout(
                self.config.cache_timeout,
                self.cache.set(&cache_key, &identity, self.config.snapshot_ttl),
            )
            .await
            {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(error = %e, "Failed to cache API key snapshot"),
                Err(_) => warn!("Timed out caching API key snapshot"),
            }
        }

        debug!(
            application_id = %identity.application_id,
            "API key resolved from store"
        );

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::application::{Application, ApplicationId, MockApplicationRepository};
    use crate::domain::cache::MockCache;
    use crate::domain::owner::{Owner, OwnerId};
    use crate::domain::DomainError;
    use crate::infrastructure::owner::StorageOwnerRepository;
    use crate::infrastructure::storage::InMemoryStorage;
    use async_trait::async_trait;
    use chrono::Utc;

    fn empty_owner_repo() -> Arc<dyn OwnerRepository> {
        Arc::new(StorageOwnerRepository::new(Arc::new(
            InMemoryStorage::<Owner>::new(),
        )))
    }

    async fn owner_repo_with(owner: Owner) -> Arc<dyn OwnerRepository> {
        let repo = StorageOwnerRepository::new(Arc::new(InMemoryStorage::<Owner>::new()));
        repo.save(owner).await.unwrap();
        Arc::new(repo)
    }

    fn test_application(name: &str, key: &str, owner: &str) -> Application {
        Application::new(
            ApplicationId::generate(),
            name,
            "https://example.com",
            key,
            OwnerId::new(owner),
        )
    }

    fn gate(
        repo: Arc<MockApplicationRepository>,
        owners: Arc<dyn OwnerRepository>,
        cache: Arc<MockCache>,
    ) -> AuthenticationGate {
        AuthenticationGate::new(repo, owners, cache)
    }

    #[tokio::test]
    async fn test_missing_credential_rejected_before_io() {
        let repo = Arc::new(MockApplicationRepository::new());
        // A failing store proves neither collaborator is touched
        repo.set_should_fail(true).await;
        let cache = Arc::new(MockCache::new().with_error("down"));
        let gate = gate(repo, empty_owner_repo(), cache);

        assert!(matches!(
            gate.authenticate(None).await,
            Err(AuthRejection::CredentialMissing)
        ));
        assert!(matches!(
            gate.authenticate(Some("   ")).await,
            Err(AuthRejection::CredentialMissing)
        ));
    }

    #[tokio::test]
    async fn test_valid_key_authenticates_and_populates_cache() {
        let repo = Arc::new(MockApplicationRepository::new());
        repo.insert(test_application("Shop", "ak_valid", "owner-1"))
            .await
            .unwrap();
        let owners = owner_repo_with(Owner::new(OwnerId::new("owner-1"), "Ada")).await;
        let cache = Arc::new(MockCache::new());
        let gate = gate(repo, owners, cache.clone());

        let identity = gate.authenticate(Some("ak_valid")).await.unwrap();
        assert_eq!(identity.application_name, "Shop");
        assert_eq!(identity.owner_id().as_str(), "owner-1");
        assert_eq!(identity.owner.name.as_deref(), Some("Ada"));

        // Snapshot landed in the cache with the freshness window
        let cached: Option<ApplicationIdentity> =
            cache.get(&credential_cache_key("ak_valid")).await.unwrap();
        assert_eq!(cached, Some(identity));

        let ttl = cache.ttl(&credential_cache_key("ak_valid")).await.unwrap();
        assert_eq!(ttl, Some(Duration::from_secs(300)));
    }

    #[tokio::test]
    async fn test_cache_hit_does_not_touch_store() {
        let repo = Arc::new(MockApplicationRepository::new());
        repo.insert(test_application("Shop", "ak_valid", "owner-1"))
            .await
            .unwrap();
        let cache = Arc::new(MockCache::new());
        let gate = gate(repo.clone(), empty_owner_repo(), cache);

        gate.authenticate(Some("ak_valid")).await.unwrap();

        // Store goes down; the cached snapshot must keep resolving
        repo.set_should_fail(true).await;
        let identity = gate.authenticate(Some("ak_valid")).await.unwrap();
        assert_eq!(identity.application_name, "Shop");
    }

    #[tokio::test]
    async fn test_unknown_key_rejected() {
        let repo = Arc::new(MockApplicationRepository::new());
        let gate = gate(repo, empty_owner_repo(), Arc::new(MockCache::new()));

        assert!(matches!(
            gate.authenticate(Some("ak_unknown")).await,
            Err(AuthRejection::CredentialInvalidOrExpired)
        ));
    }

    #[tokio::test]
    async fn test_inactive_record_rejected() {
        let repo = Arc::new(MockApplicationRepository::new());
        let mut app = test_application("Shop", "ak_inactive", "owner-1");
        app.deactivate();
        repo.insert(app).await.unwrap();
        let gate = gate(repo, empty_owner_repo(), Arc::new(MockCache::new()));

        assert!(matches!(
            gate.authenticate(Some("ak_inactive")).await,
            Err(AuthRejection::CredentialInvalidOrExpired)
        ));
    }

    #[tokio::test]
    async fn test_expired_record_rejected() {
        let repo = Arc::new(MockApplicationRepository::new());
        let app = test_application("Shop", "ak_expired", "owner-1")
            .with_key_expiration(Utc::now() - chrono::Duration::hours(1));
        repo.insert(app).await.unwrap();
        let gate = gate(repo, empty_owner_repo(), Arc::new(MockCache::new()));

        assert!(matches!(
            gate.authenticate(Some("ak_expired")).await,
            Err(AuthRejection::CredentialInvalidOrExpired)
        ));
    }

    #[tokio::test]
    async fn test_store_failure_is_fatal_not_a_bypass() {
        let repo = Arc::new(MockApplicationRepository::new());
        repo.set_should_fail(true).await;
        let gate = gate(repo, empty_owner_repo(), Arc::new(MockCache::new()));

        assert!(matches!(
            gate.authenticate(Some("ak_anything")).await,
            Err(AuthRejection::StoreUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_cache_outage_degrades_to_store_only() {
        let repo = Arc::new(MockApplicationRepository::new());
        repo.insert(test_application("Shop", "ak_valid", "owner-1"))
            .await
            .unwrap();
        let cache = Arc::new(MockCache::new().with_error("connection refused"));
        let gate = gate(repo, empty_owner_repo(), cache);

        let identity = gate.authenticate(Some("ak_valid")).await.unwrap();
        assert_eq!(identity.application_name, "Shop");
    }

    #[tokio::test]
    async fn test_missing_owner_record_still_authenticates() {
        let repo = Arc::new(MockApplicationRepository::new());
        repo.insert(test_application("Shop", "ak_valid", "owner-ghost"))
            .await
            .unwrap();
        let gate = gate(repo, empty_owner_repo(), Arc::new(MockCache::new()));

        let identity = gate.authenticate(Some("ak_valid")).await.unwrap();
        assert_eq!(identity.owner_id().as_str(), "owner-ghost");
        assert!(identity.owner.name.is_none());
    }

    /// Cache whose calls never resolve, for exercising the timeout path
    #[derive(Debug)]
    struct StalledCache;

    #[async_trait]
    impl Cache for StalledCache {
        async fn get_raw(&self, _key: &str) -> Result<Option<String>, DomainError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(None)
        }

        async fn set_raw(
            &self,
            _key: &str,
            _value: &str,
            _ttl: Duration,
        ) -> Result<(), DomainError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }

        async fn delete(&self, _key: &str) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn ttl(&self, _key: &str) -> Result<Option<Duration>, DomainError> {
            Ok(None)
        }

        async fn clear(&self) -> Result<(), DomainError> {
            Ok(())
        }

        async fn size(&self) -> Result<usize, DomainError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_cache_timeout_degrades_to_store_only() {
        let repo = Arc::new(MockApplicationRepository::new());
        repo.insert(test_application("Shop", "ak_valid", "owner-1"))
            .await
            .unwrap();

        let gate = AuthenticationGate::new(repo, empty_owner_repo(), Arc::new(StalledCache))
            .with_config(AuthGateConfig {
                snapshot_ttl: Duration::from_secs(300),
                store_timeout: Duration::from_secs(2),
                cache_timeout: Duration::from_millis(20),
            });

        let identity = gate.authenticate(Some("ak_valid")).await.unwrap();
        assert_eq!(identity.application_name, "Shop");
    }
}
