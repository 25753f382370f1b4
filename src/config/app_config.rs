use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub cache: CacheSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Storage backend selection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// "memory" or "postgres"
    pub backend: String,
    /// Connection URL, required for the postgres backend
    pub url: Option<String>,
    pub max_connections: u32,
}

/// Cache backend selection and freshness window
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// "memory" or "redis"
    pub backend: String,
    /// Connection URL, required for the redis backend
    pub redis_url: Option<String>,
    /// Namespace prefix for all cache keys
    pub key_prefix: Option<String>,
    /// Seconds a cached credential snapshot stays fresh
    pub snapshot_ttl_secs: u64,
}

/// Authentication gate and key lifecycle settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Days a reissued key remains valid after a revoke
    pub revoked_key_lifetime_days: i64,
    /// Upper bound for store lookups during authentication
    pub store_timeout_ms: u64,
    /// Upper bound for cache calls during authentication
    pub cache_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            url: None,
            max_connections: 10,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            redis_url: None,
            key_prefix: Some("beacon".to_string()),
            snapshot_ttl_secs: 300,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            revoked_key_lifetime_days: 30,
            store_timeout_ms: 2000,
            cache_timeout_ms: 250,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
