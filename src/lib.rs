pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{RecordingDisplay, TerminalDisplay};
pub use config::TomlConfig;
pub use core::{
    animation::{animate, CounterAnimation},
    fetch::HttpCountSource,
    visitor_display::{AnimationSettings, VisitorDisplay},
};
pub use utils::error::{CounterError, Result};
