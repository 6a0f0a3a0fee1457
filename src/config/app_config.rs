use chrono::Duration;
use serde::Deserialize;

use crate::infrastructure::matching::{AssemblyOrder, EngineConfig};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub matching: MatchingConfig,
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

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Matching engine settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Target team size
    pub team_size: usize,
    /// Seconds before non-responding members are treated as decliners
    pub team_ttl_secs: u64,
    /// Seconds between expiry sweep passes
    pub sweep_interval_secs: u64,
    /// Candidate ordering for assembly
    pub assembly_order: AssemblyOrderConfig,
    /// Fixed RNG seed for deterministic shuffling; entropy-seeded when absent
    pub shuffle_seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssemblyOrderConfig {
    #[default]
    Fifo,
    Random,
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

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            team_size: 4,
            team_ttl_secs: 24 * 60 * 60,
            sweep_interval_secs: 10 * 60,
            assembly_order: AssemblyOrderConfig::default(),
            shuffle_seed: None,
        }
    }
}

impl MatchingConfig {
    /// Convert to the engine's runtime configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            team_size: self.team_size,
            team_ttl: Duration::seconds(self.team_ttl_secs as i64),
            assembly_order: match self.assembly_order {
                AssemblyOrderConfig::Fifo => AssemblyOrder::Fifo,
                AssemblyOrderConfig::Random => AssemblyOrder::Random,
            },
            shuffle_seed: self.shuffle_seed,
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
