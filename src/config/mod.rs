//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AssemblyOrderConfig, LogFormat, LoggingConfig, MatchingConfig, ServerConfig,
};
