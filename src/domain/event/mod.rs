//! Event domain - collected analytics events

mod entity;
mod repository;

pub use entity::{AnalyticsEvent, DeviceType, EventId, EventMetadata};
pub use repository::EventRepository;
