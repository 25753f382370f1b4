//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthSettings, CacheSettings, LogFormat, LoggingConfig, ServerConfig,
    StorageSettings,
};
