//! API key generation
//!
//! Generates opaque, high-entropy credential tokens.

use rand::RngCore;

/// Generator for application API keys
///
/// Produces `ak_` + hex-encoded random bytes: fixed length, URL-safe, and
/// uniform enough that collision handling reduces to the store's unique
/// constraint on the key column.
#[derive(Debug, Clone)]
pub struct ApiKeyGenerator {
    /// Prefix for all generated keys
    prefix: String,
    /// Number of random bytes to generate
    key_bytes: usize,
}

impl ApiKeyGenerator {
    /// Create a new generator with the given prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            key_bytes: 32,
        }
    }

    /// Set the number of random bytes
    pub fn with_key_bytes(mut self, bytes: usize) -> Self {
        self.key_bytes = bytes;
        self
    }

    /// Generate a new API key
    pub fn generate(&self) -> String {
        let mut random_bytes = vec![0u8; self.key_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        format!("{}{}", self.prefix, hex::encode(random_bytes))
    }
}

impl Default for ApiKeyGenerator {
    fn default() -> Self {
        Self::new("ak_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_key_format() {
        let generator = ApiKeyGenerator::default();
        let key = generator.generate();

        assert!(key.starts_with("ak_"));
        // 32 bytes hex-encoded = 64 chars, plus prefix
        assert_eq!(key.len(), 3 + 64);
    }

    #[test]
    fn test_generated_key_is_lowercase_hex() {
        let generator = ApiKeyGenerator::default();
        let key = generator.generate();

        let body = key.strip_prefix("ak_").unwrap();
        assert!(body.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_key_uniqueness() {
        let generator = ApiKeyGenerator::default();

        let key1 = generator.generate();
        let key2 = generator.generate();

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_custom_prefix() {
        let generator = ApiKeyGenerator::new("test_");
        let key = generator.generate();

        assert!(key.starts_with("test_"));
    }

    #[test]
    fn test_custom_key_bytes() {
        let generator = ApiKeyGenerator::default().with_key_bytes(16);
        let key = generator.generate();

        assert_eq!(key.len(), 3 + 32);
    }
}
