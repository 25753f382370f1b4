//! Event collection endpoint handler

use axum::{extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::RequireApplication;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::event::{DeviceType, EventMetadata};
use crate::infrastructure::rate_limit::RateLimitQuota;
use crate::infrastructure::services::CollectEventRequest;

/// Request body for event collection
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CollectEventBody {
    /// Event name (e.g., button_click, page_view)
    #[validate(length(min = 1, max = 100))]
    pub event: String,
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
    #[validate(length(min = 1, max = 45))]
    pub ip_address: String,
    #[serde(default)]
    pub referrer: Option<String>,
    #[serde(default)]
    pub device: Option<DeviceType>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<EventMetadataBody>,
}

/// Metadata in request format
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMetadataBody {
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub screen_size: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl From<EventMetadataBody> for EventMetadata {
    fn from(body: EventMetadataBody) -> Self {
        Self {
            browser: body.browser,
            os: body.os,
            screen_size: body.screen_size,
            country: body.country,
            city: body.city,
            user_agent: body.user_agent,
        }
    }
}

/// Response for an accepted event
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectEventResponse {
    pub message: String,
    pub event_id: String,
}

/// POST /v1/events
pub async fn collect_event(
    State(state): State<AppState>,
    RequireApplication(identity): RequireApplication,
    Json(body): Json<CollectEventBody>,
) -> Result<(StatusCode, Json<CollectEventResponse>), ApiError> {
    let limit = state
        .rate_limiter
        .check_and_record(
            &format!("collect:{}", identity.application_id),
            &RateLimitQuota::collect(),
        )
        .await;

    if !limit.allowed {
        return Err(ApiError::rate_limited(
            "Too many analytics events, please try again later.",
        ));
    }

    body.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    debug!(
        application_id = %identity.application_id,
        event = %body.event,
        "Collecting analytics event"
    );

    let request = CollectEventRequest {
        name: body.event,
        url: body.url,
        ip_address: body.ip_address,
        referrer: body.referrer,
        device: body.device,
        user_id: body.user_id,
        session_id: body.session_id,
        metadata: body.metadata.map(EventMetadata::from).unwrap_or_default(),
        occurred_at: body.timestamp,
    };

    let event = state
        .event_service
        .record(&identity, request)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(CollectEventResponse {
            message: "Event collected successfully".to_string(),
            event_id: event.id().to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_deserializes_camel_case() {
        let json = r#"{
            "event": "page_view",
            "url": "https://shop.example.com/",
            "ipAddress": "203.0.113.7",
            "userId": "user_123",
            "metadata": {"screenSize": "1920x1080"}
        }"#;

        let body: CollectEventBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.event, "page_view");
        assert_eq!(body.ip_address, "203.0.113.7");
        assert_eq!(body.user_id.as_deref(), Some("user_123"));
        assert_eq!(
            body.metadata.unwrap().screen_size.as_deref(),
            Some("1920x1080")
        );
    }

    #[test]
    fn test_validation_rejects_empty_event() {
        let body = CollectEventBody {
            event: String::new(),
            url: "https://example.com".to_string(),
            ip_address: "203.0.113.7".to_string(),
            referrer: None,
            device: None,
            timestamp: None,
            user_id: None,
            session_id: None,
            metadata: None,
        };

        assert!(body.validate().is_err());
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = CollectEventResponse {
            message: "Event collected successfully".to_string(),
            event_id: "evt-1".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"eventId\":\"evt-1\""));
    }
}
