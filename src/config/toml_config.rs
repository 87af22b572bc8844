use crate::config::MAX_DURATION_MS;
use crate::core::animation::{DEFAULT_DURATION_MS, DEFAULT_FRAME_INTERVAL_MS};
use crate::core::ConfigProvider;
use crate::utils::error::{CounterError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub endpoint: EndpointConfig,
    pub animation: Option<AnimationConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub duration_ms: Option<u64>,
    pub frame_interval_ms: Option<u64>,
    pub start_from: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CounterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COUNTER_URL})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    fn animation(&self) -> AnimationConfig {
        self.animation.clone().unwrap_or_default()
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint.url
    }

    fn duration_ms(&self) -> u64 {
        self.animation().duration_ms.unwrap_or(DEFAULT_DURATION_MS)
    }

    fn frame_interval_ms(&self) -> u64 {
        self.animation()
            .frame_interval_ms
            .unwrap_or(DEFAULT_FRAME_INTERVAL_MS)
    }

    fn start_from(&self) -> u64 {
        self.animation().start_from.unwrap_or(0)
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.endpoint.timeout_seconds
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint.url", &self.endpoint.url)?;
        if let Some(timeout) = self.endpoint.timeout_seconds {
            validation::validate_positive_number("endpoint.timeout_seconds", timeout, 1)?;
        }
        validation::validate_range(
            "animation.duration_ms",
            self.duration_ms(),
            0,
            MAX_DURATION_MS,
        )?;
        validation::validate_positive_number(
            "animation.frame_interval_ms",
            self.frame_interval_ms(),
            1,
        )?;
        Ok(())
    }
}
