//! Owner identity middleware
//!
//! The owner is authenticated by an upstream identity provider; this service
//! trusts the resolved identity headers it forwards and keeps a local owner
//! record for display attributes.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::owner::{Owner, OwnerId};

const OWNER_ID_HEADER: &str = "x-owner-id";
const OWNER_NAME_HEADER: &str = "x-owner-name";

/// Extractor that requires a resolved owner identity
#[derive(Debug, Clone)]
pub struct RequireOwner(pub Owner);

impl FromRequestParts<AppState> for RequireOwner {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (owner_id, owner_name) = extract_owner_headers(&parts.headers)?;

        let existing = state
            .owner_repository
            .get(&owner_id)
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?;

        let owner = match existing {
            Some(mut owner) => {
                // Keep the display name in step with the identity provider
                if let Some(name) = owner_name {
                    if owner.name() != name {
                        owner.set_name(name);
                        state
                            .owner_repository
                            .save(owner.clone())
                            .await
                            .map_err(|e| ApiError::internal(e.to_string()))?;
                    }
                }
                owner
            }
            None => {
                let name = owner_name.unwrap_or_else(|| owner_id.as_str().to_string());
                state
                    .owner_repository
                    .save(Owner::new(owner_id, name))
                    .await
                    .map_err(|e| ApiError::internal(e.to_string()))?
            }
        };

        Ok(RequireOwner(owner))
    }
}

fn extract_owner_headers(headers: &HeaderMap) -> Result<(OwnerId, Option<String>), ApiError> {
    let owner_id = headers
        .get(OWNER_ID_HEADER)
        .ok_or_else(|| {
            ApiError::unauthorized("Owner identity required").with_code("owner_identity_missing")
        })?
        .to_str()
        .map_err(|_| ApiError::bad_request("Invalid X-Owner-Id header encoding"))?
        .trim();

    if owner_id.is_empty() {
        return Err(
            ApiError::unauthorized("Owner identity required").with_code("owner_identity_missing")
        );
    }

    let owner_name = match headers.get(OWNER_NAME_HEADER) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| ApiError::bad_request("Invalid X-Owner-Name header encoding"))?
                .trim()
                .to_string(),
        ),
        None => None,
    };

    Ok((OwnerId::new(owner_id), owner_name))
}
