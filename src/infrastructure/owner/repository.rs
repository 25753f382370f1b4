//! Storage-backed owner repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::owner::{Owner, OwnerId, OwnerRepository};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of OwnerRepository
#[derive(Debug)]
pub struct StorageOwnerRepository {
    storage: Arc<dyn Storage<Owner>>,
}

impl StorageOwnerRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Owner>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl OwnerRepository for StorageOwnerRepository {
    async fn get(&self, id: &OwnerId) -> Result<Option<Owner>, DomainError> {
        self.storage.get(id).await
    }

    async fn save(&self, owner: Owner) -> Result<Owner, DomainError> {
        if self.storage.exists(owner.id()).await? {
            self.storage.update(owner).await
        } else {
            self.storage.create(owner).await
        }
    }
}
