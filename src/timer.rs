//! Countdown timer used for every piece of attack and animation pacing.
//!
//! Expiry is derived from `elapsed >= duration`, never stored.  A new cycle is
//! started by replacing the timer with a fresh one, not by resetting it.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timer {
    duration: f64,
    elapsed: f64,
}

impl Timer {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// A timer that has already run out, for feedback that starts idle.
    pub fn expired(duration: f64) -> Self {
        let duration = duration.max(0.0);
        Self {
            duration,
            elapsed: duration,
        }
    }

    /// Accumulate `dt` and report whether the countdown has run out.
    ///
    /// Not edge-triggered: keeps returning `true` after expiry.  Negative `dt`
    /// is treated as zero so `elapsed` never runs backwards.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.elapsed += dt.max(0.0);
        self.is_expired()
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Elapsed share of the duration; 1.0 for a zero-length timer.
    pub fn fraction(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }
}
