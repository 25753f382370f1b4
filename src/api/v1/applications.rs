//! Application registration and key lifecycle endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::RequireOwner;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::application::{Application, ApplicationId};
use crate::domain::DomainError;
use crate::infrastructure::rate_limit::RateLimitQuota;
use crate::infrastructure::services::RegisterApplicationRequest;

/// Request to register a new application
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterApplicationBody {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(url)]
    pub website_url: String,
}

/// Application details without the credential
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub website_url: String,
    pub is_active: bool,
    pub created_at: String,
}

/// Application details including the current credential
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCredentialResponse {
    pub id: String,
    pub name: String,
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_expires_at: Option<String>,
    pub website_url: String,
    pub created_at: String,
}

impl From<&Application> for ApplicationSummary {
    fn from(app: &Application) -> Self {
        Self {
            id: app.id().to_string(),
            name: app.name().to_string(),
            description: app.description().map(String::from),
            website_url: app.website_url().to_string(),
            is_active: app.is_active(),
            created_at: app.created_at().to_rfc3339(),
        }
    }
}

impl From<&Application> for ApplicationCredentialResponse {
    fn from(app: &Application) -> Self {
        Self {
            id: app.id().to_string(),
            name: app.name().to_string(),
            api_key: app.api_key().to_string(),
            api_key_expires_at: app.api_key_expires_at().map(|dt| dt.to_rfc3339()),
            website_url: app.website_url().to_string(),
            created_at: app.created_at().to_rfc3339(),
        }
    }
}

/// Registration response
#[derive(Debug, Clone, Serialize)]
pub struct RegisterApplicationResponse {
    pub message: String,
    pub application: ApplicationCredentialResponse,
}

/// List applications response
#[derive(Debug, Clone, Serialize)]
pub struct ListApplicationsResponse {
    pub applications: Vec<ApplicationSummary>,
    pub total: usize,
}

/// Revoke response carrying the replacement credential
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeKeyResponse {
    pub message: String,
    pub new_api_key: String,
    pub expires_at: String,
}

async fn check_key_management_limit(state: &AppState, owner_id: &str) -> Result<(), ApiError> {
    let limit = state
        .rate_limiter
        .check_and_record(
            &format!("auth:{}", owner_id),
            &RateLimitQuota::key_management(),
        )
        .await;

    if !limit.allowed {
        return Err(ApiError::rate_limited(
            "Too many API key requests, please try again later.",
        ));
    }

    Ok(())
}

/// POST /v1/applications
pub async fn register_application(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    Json(body): Json<RegisterApplicationBody>,
) -> Result<(StatusCode, Json<RegisterApplicationResponse>), ApiError> {
    check_key_management_limit(&state, owner.id().as_str()).await?;

    body.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    debug!(owner_id = %owner.id(), name = %body.name, "Registering application");

    let application = state
        .application_service
        .register(
            owner.id(),
            RegisterApplicationRequest {
                name: body.name,
                description: body.description,
                website_url: body.website_url,
            },
        )
        .await
        .map_err(|e| match e {
            DomainError::Conflict { .. } => {
                ApiError::from(e).with_code("duplicate_application")
            }
            _ => ApiError::from(e),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterApplicationResponse {
            message: "Application registered successfully".to_string(),
            application: ApplicationCredentialResponse::from(&application),
        }),
    ))
}

/// GET /v1/applications
pub async fn list_applications(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
) -> Result<Json<ListApplicationsResponse>, ApiError> {
    let applications = state
        .application_service
        .list(owner.id())
        .await
        .map_err(ApiError::from)?;

    let summaries: Vec<ApplicationSummary> =
        applications.iter().map(ApplicationSummary::from).collect();
    let total = summaries.len();

    Ok(Json(ListApplicationsResponse {
        applications: summaries,
        total,
    }))
}

/// GET /v1/applications/{application_id}/key
pub async fn get_api_key(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    Path(application_id): Path<String>,
) -> Result<Json<ApplicationCredentialResponse>, ApiError> {
    check_key_management_limit(&state, owner.id().as_str()).await?;

    let application = state
        .application_service
        .get(owner.id(), &ApplicationId::new(&application_id))
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| {
            ApiError::not_found(format!("Application '{}' not found", application_id))
                .with_code("application_not_found")
        })?;

    Ok(Json(ApplicationCredentialResponse::from(&application)))
}

/// POST /v1/applications/{application_id}/revoke
pub async fn revoke_api_key(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    Path(application_id): Path<String>,
) -> Result<Json<RevokeKeyResponse>, ApiError> {
    check_key_management_limit(&state, owner.id().as_str()).await?;

    debug!(owner_id = %owner.id(), application_id = %application_id, "Revoking API key");

    let application = state
        .application_service
        .revoke_key(owner.id(), &ApplicationId::new(&application_id))
        .await
        .map_err(|e| match e {
            DomainError::NotFound { .. } => {
                ApiError::from(e).with_code("application_not_found")
            }
            _ => ApiError::from(e),
        })?;

    let expires_at = application
        .api_key_expires_at()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default();

    Ok(Json(RevokeKeyResponse {
        message: "API key revoked and new one generated".to_string(),
        new_api_key: application.api_key().to_string(),
        expires_at,
    }))
}
