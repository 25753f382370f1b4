//! API middleware components

pub mod auth;
pub mod owner;
pub mod security;

pub use auth::RequireApplication;
pub use owner::RequireOwner;
pub use security::security_headers_middleware;
