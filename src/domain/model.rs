use serde::{Deserialize, Serialize};
use std::fmt;

/// The number currently on screen. Owned by the display, mutated only by the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DisplayedCount(pub u64);

impl DisplayedCount {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for DisplayedCount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for DisplayedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    Count(DisplayedCount),
    Error,
}

impl DisplayState {
    pub const LOADING_LABEL: &'static str = "Loading...";
    pub const ERROR_LABEL: &'static str = "Error";

    pub fn count(&self) -> Option<u64> {
        match self {
            DisplayState::Count(c) => Some(c.value()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    /// `{"body": "{\"count\": N}"}`, the API Gateway proxy envelope
    Envelope,
    /// `{"count": N}`
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountResponse {
    pub count: u64,
    pub shape: ResponseShape,
}

#[derive(Debug)]
pub enum DisplayOutcome {
    Displayed { count: u64, frames: usize },
    Failed { error: crate::utils::error::CounterError },
}

impl DisplayOutcome {
    pub fn is_displayed(&self) -> bool {
        matches!(self, DisplayOutcome::Displayed { .. })
    }
}
