use crate::domain::model::{CountResponse, DisplayState};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the visitor count comes from.
#[async_trait]
pub trait CountSource: Send + Sync {
    async fn fetch_count(&self) -> Result<CountResponse>;
}

/// Where display states are rendered. Called once per state change / animation frame.
pub trait CountDisplay: Send {
    fn render(&mut self, state: DisplayState) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn duration_ms(&self) -> u64;
    fn frame_interval_ms(&self) -> u64;
    fn start_from(&self) -> u64;
    fn timeout_seconds(&self) -> Option<u64>;
    fn monitoring_enabled(&self) -> bool;
}
