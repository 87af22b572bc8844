use chrono::Utc;
use serde_json::Value;

pub const VISITOR_COUNT_UPDATED: &str = "visitor_count_updated";
pub const VISITOR_COUNT_FAILED: &str = "visitor_count_failed";
pub const PAGE_LOAD_COMPLETE: &str = "page_load_complete";

/// 記錄一個事件。目前只寫進 tracing，target 固定為 `analytics`，
/// 可以用 `RUST_LOG=analytics=off` 關掉。
pub fn track_event(event_name: &str, event_data: Value) {
    tracing::info!(
        target: "analytics",
        event = event_name,
        data = %event_data,
        timestamp = %Utc::now().to_rfc3339(),
        "Event: {}",
        event_name
    );
}
