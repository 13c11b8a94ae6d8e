//! Target frame interval shared between the render thread and producers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::{LumenError, LumenResult};

/// Nanoseconds in one second.
pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Frame cap used when nothing else is configured.
pub const DEFAULT_FRAME_CAP: i32 = 60;

/// Target time between frames, in (fractional) nanoseconds.
///
/// Stored as the bit pattern of an `f64` inside an `AtomicU64` so any thread
/// can retarget the frame rate while the render thread is ticking. A store is
/// picked up by the next `FrameClock::tick`.
#[derive(Debug)]
pub struct FrameInterval {
    /// `f64::to_bits` of the interval. Written by any thread, read by the clock.
    nanos_bits: AtomicU64,
}

impl FrameInterval {
    /// Creates an interval from a frame cap (`1e9 / cap` nanoseconds).
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `cap <= 0`.
    pub fn from_frame_cap(cap: i32) -> LumenResult<Self> {
        Ok(Self::unchecked(frame_cap_to_nanos(cap)?))
    }

    /// Creates an interval from a raw nanosecond value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `nanos` is not a positive finite number.
    pub fn from_nanos(nanos: f64) -> LumenResult<Self> {
        Ok(Self::unchecked(validate_nanos(nanos)?))
    }

    fn unchecked(nanos: f64) -> Self {
        Self {
            nanos_bits: AtomicU64::new(nanos.to_bits()),
        }
    }

    /// Returns the current interval in nanoseconds.
    #[inline]
    #[must_use]
    pub fn nanos(&self) -> f64 {
        f64::from_bits(self.nanos_bits.load(Ordering::Acquire))
    }

    /// Returns the current interval as a `Duration`, saturating at
    /// `Duration::MAX` for intervals too long to represent.
    #[must_use]
    pub fn as_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.nanos() / NANOS_PER_SECOND as f64).unwrap_or(Duration::MAX)
    }

    /// Replaces the interval. The previous value is kept on error.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `nanos` is not a positive finite number.
    pub fn set_nanos(&self, nanos: f64) -> LumenResult<()> {
        let nanos = validate_nanos(nanos)?;
        self.nanos_bits.store(nanos.to_bits(), Ordering::Release);
        Ok(())
    }

    /// Retargets to `cap` frames per second. The previous value is kept on error.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `cap <= 0`.
    pub fn set_frame_cap(&self, cap: i32) -> LumenResult<()> {
        let nanos = frame_cap_to_nanos(cap)?;
        self.nanos_bits.store(nanos.to_bits(), Ordering::Release);
        Ok(())
    }
}

impl Default for FrameInterval {
    fn default() -> Self {
        Self::unchecked(NANOS_PER_SECOND as f64 / f64::from(DEFAULT_FRAME_CAP))
    }
}

fn frame_cap_to_nanos(cap: i32) -> LumenResult<f64> {
    if cap <= 0 {
        return Err(LumenError::InvalidConfiguration(format!(
            "invalid frame cap {cap}: should be greater than zero"
        )));
    }
    Ok(NANOS_PER_SECOND as f64 / f64::from(cap))
}

fn validate_nanos(nanos: f64) -> LumenResult<f64> {
    if !nanos.is_finite() || nanos <= 0.0 {
        return Err(LumenError::InvalidConfiguration(format!(
            "invalid frame interval {nanos}ns: should be a positive number"
        )));
    }
    Ok(nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sixty_fps() {
        let interval = FrameInterval::default();
        assert!((interval.nanos() - 16_666_666.666_666_668).abs() < 1e-3);
    }

    #[test]
    fn test_rejects_non_positive_cap() {
        assert!(matches!(
            FrameInterval::from_frame_cap(0),
            Err(LumenError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            FrameInterval::from_frame_cap(-30),
            Err(LumenError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejected_update_keeps_previous_value() {
        let interval = FrameInterval::from_frame_cap(2).unwrap();
        assert!(interval.set_frame_cap(0).is_err());
        assert!(interval.set_nanos(-1.0).is_err());
        assert!(interval.set_nanos(f64::NAN).is_err());
        assert!(interval.set_nanos(f64::INFINITY).is_err());
        assert_eq!(interval.nanos(), 500_000_000.0);
    }

    #[test]
    fn test_as_duration() {
        let interval = FrameInterval::from_frame_cap(4).unwrap();
        assert_eq!(interval.as_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_as_duration_saturates() {
        let interval = FrameInterval::from_frame_cap(4).unwrap();
        interval.set_nanos(1e30).unwrap();
        assert_eq!(interval.as_duration(), Duration::MAX);

        interval.set_nanos(f64::MAX).unwrap();
        assert_eq!(interval.as_duration(), Duration::MAX);
    }
}
