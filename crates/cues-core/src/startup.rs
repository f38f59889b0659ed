//! One-shot reveal wave shown right after the overlay is activated.
//!
//! A band starts just below the screen, widens and sweeps upward, adding
//! extra radius to the particles it passes.

use crate::constants::*;
use crate::math::lerp;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartupTransition {
    pub duration: Duration,
}

impl Default for StartupTransition {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(STARTUP_DURATION_MS),
        }
    }
}

impl StartupTransition {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Progress in \[0, 1\] while the wave runs, `None` once it is over.
    pub fn progress(&self, since_activation: Duration) -> Option<f32> {
        if self.duration.is_zero() {
            return None;
        }
        let p = since_activation.as_secs_f32() / self.duration.as_secs_f32();
        (0.0..=1.0).contains(&p).then_some(p)
    }
}

/// Extra radius for a particle at screen row `y` at wave progress `progress`.
pub fn bonus(progress: f32, y: f32, height: f32) -> f32 {
    if height.is_nan() || height <= 0.0 {
        return 0.0;
    }
    let y_frac = 1.0 - y / height;
    let span = lerp(STARTUP_SPAN_START, STARTUP_SPAN_END, progress);
    let center = lerp(STARTUP_CENTER_START, STARTUP_CENTER_END, progress * progress);
    let t = ((span - (y_frac - center).abs()) / span).max(0.0);
    let b = STARTUP_BONUS_PX * t * t;
    if b.is_finite() {
        b
    } else {
        0.0
    }
}
