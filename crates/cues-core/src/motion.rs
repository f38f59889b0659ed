//! Inertial motion estimation.
//!
//! Raw linear-acceleration samples go through two exponential low-pass stages.
//! The slow stage acts as a bias estimate that is removed from the signal, the
//! fast stage residual adds a small high-frequency correction. The result is
//! integrated twice with adaptive friction on the velocity, and a scalar
//! intensity in \[0, 1\] follows the planar speed.

use crate::constants::*;
use crate::math::{hypot2, lerp, sigmoid, time_factor};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertialSample {
    pub timestamp_nanos: u64,
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
}

impl InertialSample {
    pub fn new(timestamp_nanos: u64, ax: f32, ay: f32, az: f32) -> Self {
        Self {
            timestamp_nanos,
            ax,
            ay,
            az,
        }
    }

    #[inline]
    pub fn accel(&self) -> Vec3 {
        Vec3::new(self.ax, self.ay, self.az)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.ax.is_finite() && self.ay.is_finite() && self.az.is_finite()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn from_rotation_degrees(degrees: f32) -> Self {
        if !degrees.is_finite() {
            return Orientation::Portrait;
        }
        let folded = degrees.rem_euclid(180.0);
        if folded > 45.0 && folded < 135.0 {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    #[inline]
    pub fn remap(self, v: Vec3) -> Vec3 {
        match self {
            Orientation::Portrait => v,
            Orientation::Landscape => Vec3::new(v.y, v.x, v.z),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FilterState {
    pub fast: Vec3,
    pub slow: Vec3,
    pub velocity: Vec3,
    pub last_timestamp: Option<u64>,
}

/// What the renderer needs from one estimator step.
///
/// `position` is unbounded; only its wrapped value is used downstream.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionSnapshot {
    pub position: Vec3,
    pub previous_position: Vec3,
    pub intensity: f32,
}

impl MotionSnapshot {
    pub const REST: MotionSnapshot = MotionSnapshot {
        position: Vec3::ZERO,
        previous_position: Vec3::ZERO,
        intensity: 0.0,
    };

    #[inline]
    pub fn step_delta(&self) -> Vec3 {
        self.position - self.previous_position
    }
}

#[derive(Clone, Debug, Default)]
pub struct MotionEstimator {
    state: FilterState,
    snapshot: MotionSnapshot,
}

impl MotionEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MotionSnapshot {
        self.snapshot
    }

    pub fn filter_state(&self) -> FilterState {
        self.state
    }

    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    pub fn reset(&mut self) {
        self.state = FilterState::default();
        self.snapshot = MotionSnapshot::REST;
    }

    /// Feed one sample and return the resulting snapshot.
    ///
    /// Invalid input (non-finite values, a timestamp that does not advance)
    /// leaves every piece of state untouched and returns the previous
    /// snapshot.
    pub fn process(&mut self, sample: InertialSample, orientation: Orientation) -> MotionSnapshot {
        if !sample.is_finite() {
            log::trace!("skipping non-finite sample at {}", sample.timestamp_nanos);
            return self.snapshot;
        }
        let Some(last) = self.state.last_timestamp else {
            self.seed(sample);
            self.snapshot = MotionSnapshot::REST;
            return self.snapshot;
        };
        let dt = match sample.timestamp_nanos.checked_sub(last) {
            Some(nanos) if nanos > 0 => (nanos as f64 * NANOS_TO_SECS) as f32,
            _ => {
                log::trace!("skipping sample with non-advancing timestamp");
                return self.snapshot;
            }
        };
        if !dt.is_finite() || dt <= 0.0 {
            return self.snapshot;
        }
        if dt > MAX_SAMPLE_GAP_SECS {
            log::debug!("sensor gap of {dt:.3}s, re-seeding filters");
            self.resume(sample);
            return self.snapshot;
        }

        match self.step(sample, orientation, dt) {
            Some((state, snapshot)) => {
                self.state = state;
                self.snapshot = snapshot;
            }
            None => log::trace!("discarding non-finite estimator step"),
        }
        self.snapshot
    }

    fn seed(&mut self, sample: InertialSample) {
        let raw = sample.accel();
        self.state = FilterState {
            fast: raw,
            slow: raw,
            velocity: Vec3::ZERO,
            last_timestamp: Some(sample.timestamp_nanos),
        };
    }

    // Re-acquired sensor: fresh filters and velocity, but keep where the
    // field is so nothing jumps.
    fn resume(&mut self, sample: InertialSample) {
        self.seed(sample);
        self.snapshot.previous_position = self.snapshot.position;
    }

    fn step(
        &self,
        sample: InertialSample,
        orientation: Orientation,
        dt: f32,
    ) -> Option<(FilterState, MotionSnapshot)> {
        let raw = sample.accel();
        let fast = self.state.fast + (raw - self.state.fast) * time_factor(FAST_FILTER_BASE, dt);
        let slow = self.state.slow + (raw - self.state.slow) * time_factor(SLOW_FILTER_BASE, dt);

        let raw_d = orientation.remap(raw);
        let fast_d = orientation.remap(fast);
        let slow_d = orientation.remap(slow);
        let accel = (raw_d - slow_d) + (raw_d - fast_d) * FAST_RESIDUAL_WEIGHT;

        // X inverted so the field moves against the device
        let mut velocity = self.state.velocity;
        velocity.x -= accel.x * dt;
        velocity.y += accel.y * dt;
        velocity.z += accel.z * dt;

        let previous_position = self.snapshot.position;
        let position = previous_position + velocity * dt;

        let accel_2d = hypot2(accel.x, accel.y);
        let speed_2d = hypot2(velocity.x, velocity.y);

        let friction = 1.0
            / (1.0
                + dt * (FRICTION_BASE + FRICTION_STILLNESS / (1.0 + accel_2d * FRICTION_ACCEL_GAIN)));
        velocity *= friction;

        let rate = INTENSITY_RATE * dt;
        let decayed = self.snapshot.intensity * (1.0 - INTENSITY_DECAY_BASE.powf(rate));
        let drive = sigmoid((speed_2d - INTENSITY_SPEED_THRESHOLD) * INTENSITY_SPEED_GAIN);
        let intensity = lerp(decayed, 1.0, 1.0 - (1.0 - drive).powf(rate)).clamp(0.0, 1.0);

        let finite = fast.is_finite()
            && slow.is_finite()
            && velocity.is_finite()
            && position.is_finite()
            && intensity.is_finite();
        finite.then_some((
            FilterState {
                fast,
                slow,
                velocity,
                last_timestamp: Some(sample.timestamp_nanos),
            },
            MotionSnapshot {
                position,
                previous_position,
                intensity,
            },
        ))
    }
}
