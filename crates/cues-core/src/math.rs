//! Scalar helpers shared by the estimator, the projector and the field.
//!
//! Everything here is a pure function over `f32`.

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Blend factor of an exponential filter after `dt` seconds: `1 - base^dt`.
///
/// `base` is the fraction of the old state left after one second, so a smaller
/// base reacts faster.
#[inline]
pub fn time_factor(base: f32, dt: f32) -> f32 {
    1.0 - base.powf(dt)
}

#[inline]
pub fn perspective_scale(z: f32, eye_distance: f32) -> f32 {
    eye_distance / (z + eye_distance)
}

#[inline]
pub fn project_axis(coord: f32, center: f32, scale: f32) -> f32 {
    center + (coord - center) * scale
}

#[inline]
pub fn hypot2(a: f32, b: f32) -> f32 {
    a.hypot(b)
}

#[inline]
pub fn wrap(value: f32, period: f32) -> f32 {
    wrap_with_cells(value, period).0
}

/// Like [`wrap`], also returning how many whole periods were removed.
///
/// The count lets callers keep lattice parity stable while the wrapped offset
/// jumps back by one period.
#[inline]
pub fn wrap_with_cells(value: f32, period: f32) -> (f32, i64) {
    if period.is_nan() || period <= 0.0 || !value.is_finite() {
        return (0.0, 0);
    }
    let cells = (value / period).floor();
    let mut rem = value - cells * period;
    // guard float rounding pushing the remainder onto the period boundary
    if rem >= period {
        rem -= period;
    }
    (rem.max(0.0), cells as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_handles_negative_values() {
        assert!((wrap(-1.0, 4.0) - 3.0).abs() < 1e-6);
        assert!((wrap(9.0, 4.0) - 1.0).abs() < 1e-6);
        assert_eq!(wrap_with_cells(-1.0, 4.0).1, -1);
        assert_eq!(wrap_with_cells(9.0, 4.0).1, 2);
    }

    #[test]
    fn wrap_rejects_degenerate_period() {
        assert_eq!(wrap_with_cells(3.0, 0.0), (0.0, 0));
        assert_eq!(wrap_with_cells(f32::NAN, 2.0), (0.0, 0));
    }

    #[test]
    fn sigmoid_midpoint_and_tails() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(20.0) > 0.999);
        assert!(sigmoid(-20.0) < 0.001);
    }

    #[test]
    fn time_factor_is_zero_for_zero_dt() {
        assert_eq!(time_factor(0.01, 0.0), 0.0);
        assert!((time_factor(0.01, 1.0) - 0.99).abs() < 1e-6);
    }
}
