pub mod analytics;
pub mod error;
pub mod format;
pub mod logger;
pub mod monitor;
pub mod validation;
