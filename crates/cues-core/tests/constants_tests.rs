// Host-side tests for tuning constants and their relationships.

use cues_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn filter_bases_are_fractions() {
    assert!(FAST_FILTER_BASE > 0.0 && FAST_FILTER_BASE < 1.0);
    assert!(SLOW_FILTER_BASE > 0.0 && SLOW_FILTER_BASE < 1.0);
    assert!(INTENSITY_DECAY_BASE > 0.0 && INTENSITY_DECAY_BASE < 1.0);
    assert!(FAST_RESIDUAL_WEIGHT < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn lattice_constants_are_consistent() {
    assert!((HEX_RATIO - 2.0 * 3f32.sqrt() / 3.0).abs() < 1e-6);
    assert!(GRID_Z_FRACTION > 0.0 && GRID_Z_FRACTION < 1.0);
    assert!(PAD_X > 0 && PAD_Y > 0 && PAD_Z_NEAR > 0 && PAD_Z_FAR > 0);
    // row shift plus depth shift plus one wrapped row must stay inside the Y margin
    assert!(HEX_DEPTH_SHIFT_Y + 1.0 < PAD_Y as f32);
    assert!(HEX_ROW_SHIFT_X + 1.0 < PAD_X as f32);
    assert!(EYE_DISTANCE_DP > DEPTH_RANGE_DP);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ranges_are_ordered() {
    assert!(SPEED_FACTOR_MIN < SPEED_FACTOR_MAX);
    assert!(AREA_FRACTION_MIN > 0.0 && AREA_FRACTION_MIN < 1.0);
    assert!(PERIPHERY_INTENSITY_MIN > 0.0 && PERIPHERY_INTENSITY_MIN < 1.0);
    assert!(STARTUP_SPAN_START < STARTUP_SPAN_END);
    // the band ends fully above the screen
    assert!(STARTUP_CENTER_END - STARTUP_SPAN_END >= 1.0 - 1e-6);
    assert!(STARTUP_CENTER_START + STARTUP_SPAN_START <= 0.0);
}
