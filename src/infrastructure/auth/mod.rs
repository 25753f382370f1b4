//! Authentication infrastructure
//!
//! Key generation and the gate that fronts collected writes.

mod gate;
mod generator;

pub use gate::{AuthGateConfig, AuthenticationGate};
pub use generator::ApiKeyGenerator;
