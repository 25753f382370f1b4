//! Application registration validation

use thiserror::Error;

/// Errors that can occur when validating application metadata
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationValidationError {
    #[error("Application name cannot be empty")]
    EmptyName,

    #[error("Application name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Website URL cannot be empty")]
    EmptyWebsiteUrl,

    #[error("Website URL must start with http:// or https://")]
    InvalidWebsiteUrl,
}

const MAX_NAME_LENGTH: usize = 100;

/// Validate an application display name
pub fn validate_application_name(name: &str) -> Result<(), ApplicationValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ApplicationValidationError::EmptyName);
    }

    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(ApplicationValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a website URL
pub fn validate_website_url(url: &str) -> Result<(), ApplicationValidationError> {
    if url.trim().is_empty() {
        return Err(ApplicationValidationError::EmptyWebsiteUrl);
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ApplicationValidationError::InvalidWebsiteUrl);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_application_name("Shop").is_ok());
        assert!(validate_application_name("My App 2").is_ok());
        assert!(validate_application_name("  padded  ").is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(
            validate_application_name(""),
            Err(ApplicationValidationError::EmptyName)
        );
        assert_eq!(
            validate_application_name("   "),
            Err(ApplicationValidationError::EmptyName)
        );
    }

    #[test]
    fn test_name_too_long() {
        let long = "a".repeat(101);
        assert_eq!(
            validate_application_name(&long),
            Err(ApplicationValidationError::NameTooLong(100))
        );
    }

    #[test]
    fn test_max_length_name() {
        let max = "a".repeat(100);
        assert!(validate_application_name(&max).is_ok());
    }

    #[test]
    fn test_valid_urls() {
        assert!(validate_website_url("https://example.com").is_ok());
        assert!(validate_website_url("http://localhost:3000").is_ok());
    }

    #[test]
    fn test_empty_url() {
        assert_eq!(
            validate_website_url(""),
            Err(ApplicationValidationError::EmptyWebsiteUrl)
        );
    }

    #[test]
    fn test_invalid_url_scheme() {
        assert_eq!(
            validate_website_url("ftp://example.com"),
            Err(ApplicationValidationError::InvalidWebsiteUrl)
        );
        assert_eq!(
            validate_website_url("example.com"),
            Err(ApplicationValidationError::InvalidWebsiteUrl)
        );
    }
}
