// Shared tuning constants for the motion estimator and the particle field.
//
// Lengths suffixed `_DP` are density-independent and get multiplied by
// `Screen::density` before use; everything else is in the unit named.

// ---------------- Motion estimator ----------------

pub const NANOS_TO_SECS: f64 = 1e-9;

// Low-pass stage bases for `1 - base^dt`
pub const FAST_FILTER_BASE: f32 = 0.01; // ~100 ms time constant
pub const SLOW_FILTER_BASE: f32 = 0.02; // ~50 ms time constant, bias/gravity estimate

// Weight of the fast stage residual in the net acceleration
pub const FAST_RESIDUAL_WEIGHT: f32 = 0.1;

// Adaptive friction: 1 / (1 + dt * (BASE + STILLNESS / (1 + accel2d * GAIN)))
pub const FRICTION_BASE: f32 = 8.0;
pub const FRICTION_STILLNESS: f32 = 16.0;
pub const FRICTION_ACCEL_GAIN: f32 = 60.0;

// Intensity recurrence
pub const INTENSITY_DECAY_BASE: f32 = 0.2;
pub const INTENSITY_RATE: f32 = 72.0; // exponent scale applied to dt
pub const INTENSITY_SPEED_THRESHOLD: f32 = 0.09; // planar speed where the sigmoid crosses 0.5
pub const INTENSITY_SPEED_GAIN: f32 = 60.0;

// Gaps longer than this are treated as a re-acquired sensor
pub const MAX_SAMPLE_GAP_SECS: f32 = 0.5;

// ---------------- Particle field ----------------

pub const BASE_RADIUS_DP: f32 = 4.0;
pub const MIN_VISIBLE_RADIUS: f32 = 0.15; // below this (and no startup wave) nothing is drawn

pub const GRID_SPACING_DP: f32 = 48.0;
pub const HEX_RATIO: f32 = 1.154_700_5; // 2 * sqrt(3) / 3
pub const DEPTH_RANGE_DP: f32 = 400.0;
pub const GRID_Z_FRACTION: f32 = 0.8; // grid_z = fraction * depth range
pub const EYE_DISTANCE_DP: f32 = 1000.0;

// Enumeration margins in cells, so edge cells never pop in or out
pub const PAD_X: i32 = 2;
pub const PAD_Y: i32 = 4;
pub const PAD_Z_NEAR: i32 = 1;
pub const PAD_Z_FAR: i32 = 2;
// Screens needing more cells than this draw nothing
pub const MAX_FIELD_CELLS: usize = 250_000;

// Hex offsets in grid cells
pub const HEX_ROW_SHIFT_X: f32 = 0.5;
pub const HEX_DEPTH_SHIFT_Y: f32 = 4.0 / 3.0;
pub const WHITE_ROW_OFFSET_Y: f32 = 2.0 / 3.0;
pub const WHITE_RADIUS_REDUCTION_PX: f32 = 0.5; // 1 px narrower stroke

// Device motion (position units) to screen pixels
pub const DISTANCE_SCALE_DP: f32 = 4000.0;
pub const SPEED_FACTOR_MIN: f32 = 0.6;
pub const SPEED_FACTOR_MAX: f32 = 2.7;

// Periphery remaps
pub const AREA_FRACTION_MIN: f32 = 0.2;
pub const PERIPHERY_INTENSITY_MIN: f32 = 0.4;
pub const DEFAULT_PERIPHERY_FRACTION: f32 = 0.5; // of the shorter screen side

// Stroke shaping
pub const TRAIL_THINNING: f32 = 0.44;
pub const MIN_STROKE_PX: f32 = 1.0;

// ---------------- Startup transition ----------------

pub const STARTUP_DURATION_MS: u64 = 700;
pub const STARTUP_BONUS_PX: f32 = 12.0;
pub const STARTUP_SPAN_START: f32 = 0.1;
pub const STARTUP_SPAN_END: f32 = 0.7;
pub const STARTUP_CENTER_START: f32 = -0.1;
pub const STARTUP_CENTER_END: f32 = 1.7;

// ---------------- Preview modes ----------------

pub const PREVIEW_SPEED_VELOCITY: f32 = 0.15; // position units per second along X
pub const PREVIEW_FRAME_SECS: f32 = 1.0 / 60.0; // trail length of the synthetic motion
pub const PREVIEW_SPEED_PERIPHERY_DP: f32 = 96.0;
