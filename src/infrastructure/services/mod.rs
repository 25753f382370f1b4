//! Service layer - high-level operations over repositories

mod application_service;
mod event_service;

pub use application_service::{ApplicationService, RegisterApplicationRequest};
pub use event_service::{CollectEventRequest, EventService};
