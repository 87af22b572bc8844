// Adapters layer: concrete display sinks.

pub mod memory;
pub mod terminal;

pub use memory::RecordingDisplay;
pub use terminal::TerminalDisplay;
