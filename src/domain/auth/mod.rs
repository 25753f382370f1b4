//! Authentication domain - resolved identities and typed rejections

mod identity;
mod rejection;

pub use identity::{credential_cache_key, ApplicationIdentity, OwnerRef};
pub use rejection::AuthRejection;
