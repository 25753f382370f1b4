//! Owner repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Owner, OwnerId};
use crate::domain::DomainError;

/// Repository trait for owner records
#[async_trait]
pub trait OwnerRepository: Send + Sync + Debug {
    /// Get an owner by id
    async fn get(&self, id: &OwnerId) -> Result<Option<Owner>, DomainError>;

    /// Save an owner (create if absent, update if present)
    async fn save(&self, owner: Owner) -> Result<Owner, DomainError>;
}
