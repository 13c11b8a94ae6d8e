use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::interval::NANOS_PER_SECOND;

/// Last published frames-per-second value.
///
/// Written once per second by the render thread, read by anyone. The only
/// state in the loop that is shared without a lock.
#[derive(Debug, Clone, Default)]
pub struct FpsGauge {
    /// Frames rendered during the last completed one-second window.
    value: Arc<AtomicU32>,
}

impl FpsGauge {
    /// Creates a gauge reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the frames counted in the last completed second.
    #[inline]
    #[must_use]
    pub fn get(&self) -> u32 {
        self.value.load(Ordering::Relaxed)
    }

    fn publish(&self, fps: u32) {
        self.value.store(fps, Ordering::Relaxed);
    }
}

/// One-second frame counter feeding an [`FpsGauge`].
#[derive(Debug)]
pub struct FpsCounter {
    gauge: FpsGauge,
    frames: u32,
    window_start: Option<u64>,
}

impl FpsCounter {
    /// Creates a counter publishing into `gauge`.
    #[must_use]
    pub fn new(gauge: FpsGauge) -> Self {
        Self {
            gauge,
            frames: 0,
            window_start: None,
        }
    }

    /// Counts one rendered frame.
    #[inline]
    pub fn record_frame(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }

    /// Publishes and resets the count once a full second has passed.
    ///
    /// Returns the published value, or `None` if the window is still open.
    /// The first call opens the window.
    pub fn update(&mut self, now_nanos: u64) -> Option<u32> {
        let start = *self.window_start.get_or_insert(now_nanos);
        if now_nanos.saturating_sub(start) < NANOS_PER_SECOND {
            return None;
        }

        let fps = self.frames;
        self.gauge.publish(fps);
        self.frames = 0;
        self.window_start = Some(now_nanos);
        Some(fps)
    }

    /// Returns the gauge this counter publishes to.
    #[must_use]
    pub fn gauge(&self) -> &FpsGauge {
        &self.gauge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publishes_once_per_second() {
        let gauge = FpsGauge::new();
        let mut counter = FpsCounter::new(gauge.clone());

        assert_eq!(counter.update(0), None);
        for _ in 0..42 {
            counter.record_frame();
        }
        assert_eq!(counter.update(NANOS_PER_SECOND - 1), None);
        assert_eq!(gauge.get(), 0);

        assert_eq!(counter.update(NANOS_PER_SECOND), Some(42));
        assert_eq!(gauge.get(), 42);

        // counter was reset, window restarted at 1s
        counter.record_frame();
        assert_eq!(counter.update(NANOS_PER_SECOND + 10), None);
        assert_eq!(counter.update(2 * NANOS_PER_SECOND), Some(1));
        assert_eq!(gauge.get(), 1);
    }

    #[test]
    fn test_gauge_readable_from_other_threads() {
        let gauge = FpsGauge::new();
        let mut counter = FpsCounter::new(gauge.clone());
        counter.update(0);
        counter.record_frame();
        counter.update(NANOS_PER_SECOND);

        let reader = std::thread::spawn(move || gauge.get());
        assert_eq!(reader.join().unwrap(), 1);
    }
}
