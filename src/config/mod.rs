pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::core::animation::{DEFAULT_DURATION_MS, DEFAULT_FRAME_INTERVAL_MS};
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str =
    "https://6xq40rciya.execute-api.us-east-1.amazonaws.com/prod/visitor-count";

/// Upper bound for `duration_ms`; anything longer is almost certainly a typo.
pub const MAX_DURATION_MS: u64 = 60_000;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "visitor-counter")]
#[command(about = "Fetch the site visitor count and animate it in the terminal")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, default_value_t = DEFAULT_DURATION_MS)]
    pub duration_ms: u64,

    #[arg(long, default_value_t = DEFAULT_FRAME_INTERVAL_MS)]
    pub frame_interval_ms: u64,

    #[arg(long, default_value_t = 0, help = "Value the animation starts from")]
    pub start_from: u64,

    #[arg(long, help = "Request timeout; waits indefinitely when omitted")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "TOML config file; its values override the flags")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Report process stats when done")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 用 TOML 檔裡有設定的欄位覆蓋 CLI 參數
    pub fn apply_toml(&mut self, toml: &TomlConfig) {
        self.endpoint = toml.endpoint.url.clone();
        if let Some(timeout) = toml.endpoint.timeout_seconds {
            self.timeout_seconds = Some(timeout);
        }
        if let Some(animation) = &toml.animation {
            if let Some(duration_ms) = animation.duration_ms {
                self.duration_ms = duration_ms;
            }
            if let Some(frame_interval_ms) = animation.frame_interval_ms {
                self.frame_interval_ms = frame_interval_ms;
            }
            if let Some(start_from) = animation.start_from {
                self.start_from = start_from;
            }
        }
        if toml.monitoring_enabled() {
            self.monitor = true;
        }
    }

    /// Loads and applies `--config` when given.
    pub fn resolve(mut self) -> Result<Self> {
        if let Some(path) = self.config.clone() {
            tracing::debug!("Loading config file: {}", path.display());
            let toml = TomlConfig::from_file(&path)?;
            toml.validate()?;
            self.apply_toml(&toml);
        }
        Ok(self)
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms
    }

    fn start_from(&self) -> u64 {
        self.start_from
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitor
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_range("duration_ms", self.duration_ms, 0, MAX_DURATION_MS)?;
        validation::validate_positive_number("frame_interval_ms", self.frame_interval_ms, 1)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["visitor-counter"]);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.duration_ms, 1500);
        assert_eq!(config.frame_interval_ms, 16);
        assert_eq!(config.start_from, 0);
        assert_eq!(config.timeout_seconds, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_rejects_bad_values() {
        let config = CliConfig::parse_from(["visitor-counter", "--endpoint", "not a url"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["visitor-counter", "--frame-interval-ms", "0"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["visitor-counter", "--duration-ms", "600000"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_overrides_flags() {
        let mut config = CliConfig::parse_from([
            "visitor-counter",
            "--duration-ms",
            "200",
            "--start-from",
            "3",
        ]);
        let toml = TomlConfig::from_toml_str(
            r#"
[endpoint]
url = "http://localhost:9000/count"
timeout_seconds = 4

[animation]
duration_ms = 900
"#,
        )
        .unwrap();

        config.apply_toml(&toml);

        assert_eq!(config.endpoint, "http://localhost:9000/count");
        assert_eq!(config.timeout_seconds, Some(4));
        assert_eq!(config.duration_ms, 900);
        assert_eq!(config.start_from, 3);
        assert!(!config.monitor);
    }
}
