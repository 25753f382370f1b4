//! v1 API endpoints

pub mod applications;
pub mod events;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/events", post(events::collect_event))
        .route(
            "/applications",
            post(applications::register_application).get(applications::list_applications),
        )
        .route(
            "/applications/{application_id}/key",
            get(applications::get_api_key),
        )
        .route(
            "/applications/{application_id}/revoke",
            post(applications::revoke_api_key),
        )
}
