use crate::domain::model::DisplayState;
use crate::domain::ports::CountDisplay;
use crate::utils::error::Result;
use std::sync::{Arc, Mutex};

/// Records every rendered state. Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    states: Arc<Mutex<Vec<DisplayState>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> Vec<DisplayState> {
        self.states
            .lock()
            .map(|states| states.clone())
            .unwrap_or_default()
    }

    /// Only the numeric frames, in render order.
    pub fn counts(&self) -> Vec<u64> {
        self.states().iter().filter_map(DisplayState::count).collect()
    }

    pub fn last(&self) -> Option<DisplayState> {
        self.states().last().copied()
    }
}

impl CountDisplay for RecordingDisplay {
    fn render(&mut self, state: DisplayState) -> Result<()> {
        if let Ok(mut states) = self.states.lock() {
            states.push(state);
        }
        Ok(())
    }
}
