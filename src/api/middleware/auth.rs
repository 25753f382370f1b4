//! API key authentication middleware

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::auth::ApplicationIdentity;

/// Extractor that requires a valid API key
///
/// Extracts the API key from either:
/// - X-API-Key header: `<api_key>` (takes precedence)
/// - Authorization header: `Bearer <api_key>`
#[derive(Debug, Clone)]
pub struct RequireApplication(pub ApplicationIdentity);

impl FromRequestParts<AppState> for RequireApplication {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_api_key_from_headers(&parts.headers)?;

        if let Some(token) = &token {
            debug!(
                key_prefix = %token.chars().take(8).collect::<String>(),
                "Validating API key"
            );
        }

        let identity = state
            .auth_gate
            .authenticate(token.as_deref())
            .await
            .map_err(ApiError::from)?;

        Ok(RequireApplication(identity))
    }
}

fn extract_api_key_from_headers(
    headers: &axum::http::HeaderMap,
) -> Result<Option<String>, ApiError> {
    // The dedicated key header takes precedence over the bearer form
    if let Some(api_key_header) = headers.get("x-api-key") {
        let key = api_key_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid X-API-Key header encoding"))?;

        return Ok(Some(key.trim().to_string()));
    }

    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(Some(token.trim().to_string()));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    #[test]
    fn test_extract_x_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", "ak_test_67890".parse().unwrap());

        let result = extract_api_key_from_headers(&headers).unwrap();
        assert_eq!(result, Some("ak_test_67890".to_string()));
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer ak_test_12345".parse().unwrap());

        let result = extract_api_key_from_headers(&headers).unwrap();
        assert_eq!(result, Some("ak_test_12345".to_string()));
    }

    #[test]
    fn test_dedicated_header_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer ak_bearer_key".parse().unwrap());
        headers.insert("x-api-key", "ak_dedicated_key".parse().unwrap());

        let result = extract_api_key_from_headers(&headers).unwrap();
        assert_eq!(result, Some("ak_dedicated_key".to_string()));
    }

    #[test]
    fn test_no_credential_headers() {
        let headers = HeaderMap::new();

        let result = extract_api_key_from_headers(&headers).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_non_bearer_authorization_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        let result = extract_api_key_from_headers(&headers).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_trimmed_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer   ak_with_spaces   ".parse().unwrap(),
        );

        let result = extract_api_key_from_headers(&headers).unwrap();
        assert_eq!(result, Some("ak_with_spaces".to_string()));
    }
}
