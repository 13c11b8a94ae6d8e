use std::sync::Arc;
use std::time::Duration;

use super::interval::{FrameInterval, NANOS_PER_SECOND};
use crate::error::LumenResult;

/// Fixed-step frame accumulator.
///
/// Every `tick` converts the elapsed time since the previous tick into
/// fractional frames and adds it to a debt. Whole frames are paid out and the
/// fraction carries over, so the long-run frame count matches the target rate
/// exactly no matter how irregular the ticks are.
///
/// ```text
///  debt:  0.0 ──tick(+0.6)──> 0.6 ──tick(+0.7)──> 1.3 → pays 1 → 0.3
/// ```
///
/// After a stall several frames can be due at once; `tick` reports all of them
/// and leaves the debt in `[0, 1)`.
#[derive(Debug)]
pub struct FrameClock {
    /// Shared with producers so the frame rate can change mid-run.
    interval: Arc<FrameInterval>,
    /// Timestamp of the previous tick. `None` until the first tick.
    previous: Option<u64>,
    /// Fractional frames owed.
    debt: f64,
}

impl FrameClock {
    /// Creates a clock driven by a shared interval.
    #[must_use]
    pub fn new(interval: Arc<FrameInterval>) -> Self {
        Self {
            interval,
            previous: None,
            debt: 0.0,
        }
    }

    /// Creates a clock targeting `cap` frames per second.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `cap <= 0`.
    pub fn with_frame_cap(cap: i32) -> LumenResult<Self> {
        Ok(Self::new(Arc::new(FrameInterval::from_frame_cap(cap)?)))
    }

    /// Returns the shared interval handle.
    #[must_use]
    pub fn interval(&self) -> &Arc<FrameInterval> {
        &self.interval
    }

    /// Replaces the interval; takes effect on the next `tick`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `nanos` is not positive.
    pub fn set_interval(&self, nanos: f64) -> LumenResult<()> {
        self.interval.set_nanos(nanos)
    }

    /// Advances the clock to `now_nanos` and returns how many frames are due.
    ///
    /// The first call only records the baseline and returns 0. A timestamp
    /// earlier than the latest one seen contributes no time.
    pub fn tick(&mut self, now_nanos: u64) -> u32 {
        let Some(previous) = self.previous else {
            self.previous = Some(now_nanos);
            return 0;
        };

        let elapsed = now_nanos.saturating_sub(previous);
        self.previous = Some(previous.max(now_nanos));

        self.debt += elapsed as f64 / self.interval.nanos();
        let due = self.debt.floor();
        self.debt -= due;

        due as u32
    }

    /// Returns the fractional frame debt carried to the next tick.
    #[inline]
    #[must_use]
    pub fn debt(&self) -> f64 {
        self.debt
    }

    /// Returns how long until the debt reaches one whole frame at the current
    /// interval. Saturates at `Duration::MAX`.
    #[must_use]
    pub fn time_until_next_frame(&self) -> Duration {
        let remaining = ((1.0 - self.debt) * self.interval.nanos()).max(0.0);
        Duration::try_from_secs_f64(remaining / NANOS_PER_SECOND as f64).unwrap_or(Duration::MAX)
    }

    /// Forgets the baseline and the debt.
    ///
    /// The next `tick` starts a fresh measurement.
    pub fn reset(&mut self) {
        self.previous = None;
        self.debt = 0.0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Arc::new(FrameInterval::default()))
    }
}
