#![forbid(unsafe_code)]

//! Motion primitives for collapsible regions.
//!
//! A [`Glide`] interpolates an integer extent (rows) between two values over
//! a fixed duration. Time only advances through explicit [`Glide::tick`]
//! calls; nothing here reads the wall clock, so transitions are fully
//! deterministic under test and trivially cancellable by dropping the value.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use menukit_core::motion::Glide;
//!
//! let mut glide = Glide::new(0, 6, Duration::from_millis(500));
//! assert_eq!(glide.position(), 0);
//! glide.tick(Duration::from_millis(500));
//! assert!(glide.is_complete());
//! assert_eq!(glide.position(), 6);
//! ```

use std::time::Duration;

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
///
/// The default for collapsible regions; approximates the CSS `ease` curve
/// the reference implementation transitions with.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Interpolates a `u16` extent between `from` and `to` over a duration.
///
/// Tracks elapsed time as [`Duration`] internally for precise accumulation
/// (no floating-point drift).
#[derive(Debug, Clone, Copy)]
pub struct Glide {
    from: u16,
    to: u16,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Glide {
    /// Create a new glide from `from` to `to` over `duration`.
    ///
    /// A zero duration is bumped to one nanosecond so the first tick
    /// completes the glide instead of dividing by zero.
    pub fn new(from: u16, to: u16, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: ease_in_out,
        }
    }

    /// Set the easing function (builder).
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Advance the glide by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Whether the glide has reached its end value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// The glide's target extent.
    #[must_use]
    pub fn target(&self) -> u16 {
        self.to
    }

    fn progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// Current interpolated extent.
    #[must_use]
    pub fn position(&self) -> u16 {
        let t = (self.easing)(self.progress());
        let range = f32::from(self.to) - f32::from(self.from);
        let pos = f32::from(self.from) + range * t;
        pos.round().clamp(0.0, f32::from(u16::MAX)) as u16
    }
}
