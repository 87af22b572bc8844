use thiserror::Error;

#[derive(Error, Debug)]
pub enum CounterError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Counter endpoint returned HTTP {status}")]
    HttpStatusError { status: u16 },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Response has no usable count: {reason}")]
    MissingCountError { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Response,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CounterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CounterError::ApiError(_) | CounterError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            CounterError::SerializationError(_) | CounterError::MissingCountError { .. } => {
                ErrorCategory::Response
            }
            CounterError::ConfigError { .. } | CounterError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            CounterError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Response => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::System => ErrorSeverity::Medium,
        }
    }

    /// Process exit code for this error; 0 only for warnings.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            CounterError::ApiError(e) if e.is_timeout() => {
                "The visitor counter did not answer in time".to_string()
            }
            CounterError::ApiError(_) => "Could not reach the visitor counter".to_string(),
            CounterError::HttpStatusError { status } => {
                format!("The visitor counter rejected the request (HTTP {})", status)
            }
            CounterError::SerializationError(_) | CounterError::MissingCountError { .. } => {
                "The visitor counter sent a response without a valid count".to_string()
            }
            CounterError::IoError(e) => format!("System error: {}", e),
            CounterError::ConfigError { message } => format!("Invalid configuration: {}", message),
            CounterError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CounterError::ApiError(_) => "Check network connectivity and the endpoint URL",
            CounterError::HttpStatusError { status } if *status >= 500 => {
                "The counter service failed; try again later"
            }
            CounterError::HttpStatusError { .. } => {
                "Verify the endpoint accepts POST with a JSON content type"
            }
            CounterError::SerializationError(_) | CounterError::MissingCountError { .. } => {
                "Expected {\"count\": N} or {\"body\": \"{\\\"count\\\": N}\"}"
            }
            CounterError::IoError(_) => "Check file permissions and paths",
            CounterError::ConfigError { .. } | CounterError::InvalidConfigValueError { .. } => {
                "Fix the CLI flags or the TOML config file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CounterError>;
