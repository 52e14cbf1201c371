use crate::error::{LineupError, Result};
use crate::queue::QueueConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Service configuration, loaded from a YAML file. Every field has a
/// default, so a partial (or absent) file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Port the HTTP API listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of catalog ids (`1..=seed_count`) created at startup.
    #[serde(default = "default_seed_count")]
    pub seed_count: u64,

    /// Fast-lane (select/deselect/sort) flush interval in milliseconds.
    #[serde(default = "default_fast_flush_ms")]
    pub fast_flush_ms: u64,

    /// Slow-lane (add) flush interval in milliseconds.
    #[serde(default = "default_slow_flush_ms")]
    pub slow_flush_ms: u64,

    /// Page size used when a list request omits `limit`.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

fn default_port() -> u16 {
    3001
}

fn default_seed_count() -> u64 {
    1_000_000
}

fn default_fast_flush_ms() -> u64 {
    1_000
}

fn default_slow_flush_ms() -> u64 {
    10_000
}

fn default_page_size() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            seed_count: default_seed_count(),
            fast_flush_ms: default_fast_flush_ms(),
            slow_flush_ms: default_slow_flush_ms(),
            default_page_size: default_page_size(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fast_flush_ms == 0 {
            return Err(LineupError::InvalidConfig(
                "fast_flush_ms must be greater than zero".into(),
            ));
        }
        if self.slow_flush_ms == 0 {
            return Err(LineupError::InvalidConfig(
                "slow_flush_ms must be greater than zero".into(),
            ));
        }
        if self.default_page_size == 0 {
            return Err(LineupError::InvalidConfig(
                "default_page_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            fast_interval: Duration::from_millis(self.fast_flush_ms),
            slow_interval: Duration::from_millis(self.slow_flush_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.seed_count, 1_000_000);
        assert_eq!(config.fast_flush_ms, 1_000);
        assert_eq!(config.slow_flush_ms, 10_000);
        assert_eq!(config.default_page_size, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lineup.yaml");
        std::fs::write(&path, "port: 8080\nseed_count: 50\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.seed_count, 50);
        assert_eq!(config.fast_flush_ms, 1_000);
    }

    #[test]
    fn zero_flush_interval_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lineup.yaml");
        std::fs::write(&path, "fast_flush_ms: 0\n").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(LineupError::InvalidConfig(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.yaml");
        assert!(matches!(Config::load(&path), Err(LineupError::Io(_))));
    }

    #[test]
    fn queue_config_conversion() {
        let config = Config {
            fast_flush_ms: 250,
            slow_flush_ms: 2_500,
            ..Config::default()
        };
        let qc = config.queue_config();
        assert_eq!(qc.fast_interval, Duration::from_millis(250));
        assert_eq!(qc.slow_interval, Duration::from_millis(2_500));
    }
}
