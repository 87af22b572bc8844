use crate::core::animation::{CounterAnimation, DEFAULT_DURATION_MS, DEFAULT_FRAME_INTERVAL_MS};
use crate::core::{ConfigProvider, CountDisplay, CountSource, DisplayOutcome, DisplayState};
use crate::utils::analytics::{self, track_event};
use crate::utils::error::Result;
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSettings {
    pub start_from: u64,
    pub duration: Duration,
    pub frame_interval: Duration,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            start_from: 0,
            duration: Duration::from_millis(DEFAULT_DURATION_MS),
            frame_interval: Duration::from_millis(DEFAULT_FRAME_INTERVAL_MS),
        }
    }
}

impl AnimationSettings {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            start_from: config.start_from(),
            duration: Duration::from_millis(config.duration_ms()),
            frame_interval: Duration::from_millis(config.frame_interval_ms()),
        }
    }
}

/// 取得訪客數並以動畫顯示。失敗時只顯示 "Error"，不重試。
pub struct VisitorDisplay<S: CountSource, D: CountDisplay> {
    source: S,
    display: D,
    settings: AnimationSettings,
}

impl<S: CountSource, D: CountDisplay> VisitorDisplay<S, D> {
    pub fn new(source: S, display: D) -> Self {
        Self::with_settings(source, display, AnimationSettings::default())
    }

    pub fn with_settings(source: S, display: D, settings: AnimationSettings) -> Self {
        Self {
            source,
            display,
            settings,
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }

    /// Loading -> fetch -> animate, or Loading -> fetch -> Error.
    ///
    /// Fetch failures end up in the returned outcome; only a failing display sink is an `Err`.
    pub async fn run(&mut self) -> Result<DisplayOutcome> {
        self.display.render(DisplayState::Loading)?;

        let response = match self.source.fetch_count().await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!("Error updating visitor count: {}", error);
                track_event(
                    analytics::VISITOR_COUNT_FAILED,
                    json!({ "error": error.to_string() }),
                );
                self.display.render(DisplayState::Error)?;
                return Ok(DisplayOutcome::Failed { error });
            }
        };

        let animation = CounterAnimation::new(
            self.settings.start_from,
            response.count,
            self.settings.duration,
        );
        let frames = animation
            .run(&mut self.display, self.settings.frame_interval)
            .await?;

        tracing::info!("Visitor count updated: {}", response.count);
        track_event(
            analytics::VISITOR_COUNT_UPDATED,
            json!({ "count": response.count, "shape": response.shape }),
        );

        Ok(DisplayOutcome::Displayed {
            count: response.count,
            frames,
        })
    }
}
