use crate::core::CountDisplay;
use crate::domain::model::DisplayState;
use crate::utils::error::Result;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};

pub const DEFAULT_DURATION_MS: u64 = 1500;
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// `1 - (1 - p)^4`, with `p` clamped to [0, 1].
pub fn ease_out_quart(progress: f64) -> f64 {
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    1.0 - (1.0 - p).powi(4)
}

/// 一次性的計數動畫。`run` 會消耗自身，所以跑到一半無法重新開始。
#[derive(Debug, PartialEq, Eq)]
pub struct CounterAnimation {
    from: u64,
    to: u64,
    duration: Duration,
}

impl CounterAnimation {
    pub fn new(from: u64, to: u64, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    pub fn start(&self) -> u64 {
        self.from
    }

    pub fn target(&self) -> u64 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Value shown at `progress` in [0, 1], rounded toward `from`. Exactly `to` at 1.
    pub fn value_at_progress(&self, progress: f64) -> u64 {
        if progress >= 1.0 {
            return self.to;
        }

        let eased = ease_out_quart(progress);
        if self.to >= self.from {
            let range = self.to - self.from;
            let offset = ((range as f64 * eased).floor() as u64).min(range);
            self.from + offset
        } else {
            let range = self.from - self.to;
            let offset = ((range as f64 * eased).floor() as u64).min(range);
            self.from - offset
        }
    }

    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if self.duration.is_zero() {
            return self.to;
        }
        self.value_at_progress(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    /// `steps + 1` evenly spaced samples of the curve, first at `from`, last at `to`.
    pub fn sample(&self, steps: usize) -> Vec<u64> {
        if steps == 0 {
            return vec![self.to];
        }
        (0..=steps)
            .map(|i| self.value_at_progress(i as f64 / steps as f64))
            .collect()
    }

    /// Renders one frame per tick until the duration has elapsed. Returns the frame count.
    ///
    /// The animation is moved into `run`, so it cannot be started a second time:
    ///
    /// ```compile_fail
    /// # use std::time::Duration;
    /// # use visitor_counter::{CounterAnimation, RecordingDisplay};
    /// # async fn twice() {
    /// let mut display = RecordingDisplay::new();
    /// let animation = CounterAnimation::new(0, 10, Duration::from_millis(20));
    /// animation.run(&mut display, Duration::from_millis(2)).await.unwrap();
    /// animation.run(&mut display, Duration::from_millis(2)).await.unwrap();
    /// # }
    /// ```
    pub async fn run<D: CountDisplay + ?Sized>(
        self,
        display: &mut D,
        frame_interval: Duration,
    ) -> Result<usize> {
        if self.from == self.to || self.duration.is_zero() {
            display.render(DisplayState::Count(self.to.into()))?;
            return Ok(1);
        }

        let mut ticker = tokio::time::interval(frame_interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let start = Instant::now();
        let mut frames = 0;
        loop {
            ticker.tick().await;
            let elapsed = start.elapsed();
            display.render(DisplayState::Count(self.value_at(elapsed).into()))?;
            frames += 1;

            if elapsed >= self.duration {
                break;
            }
        }

        tracing::debug!("Animation {} -> {} finished after {} frames", self.from, self.to, frames);
        Ok(frames)
    }
}

/// Animates `display` from `from` to `to` over `duration_ms`.
pub async fn animate<D: CountDisplay + ?Sized>(
    display: &mut D,
    from: u64,
    to: u64,
    duration_ms: u64,
    frame_interval: Duration,
) -> Result<usize> {
    CounterAnimation::new(from, to, Duration::from_millis(duration_ms))
        .run(display, frame_interval)
        .await
}
