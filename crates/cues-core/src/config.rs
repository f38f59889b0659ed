//! Per-frame inputs supplied by the host: user preferences, preview mode and
//! display geometry.

use crate::constants::*;
use crate::math::lerp;
use glam::Vec2;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite value in [0, 1], got {value}")]
    FractionOutOfRange { name: &'static str, value: f32 },
    #[error("unknown color mode `{0}`")]
    UnknownColorMode(String),
    #[error("unknown preview mode `{0}`")]
    UnknownPreviewMode(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorMode {
    #[default]
    Black,
    White,
    BlackAndWhite,
}

impl ColorMode {
    pub const ALL: [ColorMode; 3] = [ColorMode::Black, ColorMode::White, ColorMode::BlackAndWhite];

    #[inline]
    pub fn draws_black(self) -> bool {
        matches!(self, ColorMode::Black | ColorMode::BlackAndWhite)
    }

    #[inline]
    pub fn draws_white(self) -> bool {
        matches!(self, ColorMode::White | ColorMode::BlackAndWhite)
    }

    pub fn next(self) -> Self {
        match self {
            ColorMode::Black => ColorMode::White,
            ColorMode::White => ColorMode::BlackAndWhite,
            ColorMode::BlackAndWhite => ColorMode::Black,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Black => "black",
            ColorMode::White => "white",
            ColorMode::BlackAndWhite => "black_and_white",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(ColorMode::Black),
            "white" => Ok(ColorMode::White),
            "black_and_white" | "black-and-white" | "both" => Ok(ColorMode::BlackAndWhite),
            _ => Err(ConfigError::UnknownColorMode(s.to_string())),
        }
    }
}

/// Preview selected by the settings UI; overrides intensity and offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PreviewMode {
    #[default]
    None,
    Size,
    Speed,
}

impl PreviewMode {
    #[inline]
    pub fn is_previewing(self) -> bool {
        self != PreviewMode::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PreviewMode::None => "none",
            PreviewMode::Size => "size",
            PreviewMode::Speed => "speed",
        }
    }
}

impl fmt::Display for PreviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreviewMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "live" => Ok(PreviewMode::None),
            "size" => Ok(PreviewMode::Size),
            "speed" => Ok(PreviewMode::Speed),
            _ => Err(ConfigError::UnknownPreviewMode(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayConfig {
    pub color_mode: ColorMode,
    pub area_size_fraction: f32,
    pub speed_fraction: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Black,
            area_size_fraction: 0.5,
            speed_fraction: 0.5,
        }
    }
}

impl OverlayConfig {
    pub fn new(
        color_mode: ColorMode,
        area_size_fraction: f32,
        speed_fraction: f32,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            color_mode,
            area_size_fraction: check_fraction("area_size_fraction", area_size_fraction)?,
            speed_fraction: check_fraction("speed_fraction", speed_fraction)?,
        })
    }

    /// Lenient constructor for preference stores that may hold stale values:
    /// out-of-range fractions are clamped, NaN falls back to the default.
    pub fn clamped(color_mode: ColorMode, area_size_fraction: f32, speed_fraction: f32) -> Self {
        let defaults = Self::default();
        let fix = |v: f32, fallback: f32| if v.is_nan() { fallback } else { v.clamp(0.0, 1.0) };
        Self {
            color_mode,
            area_size_fraction: fix(area_size_fraction, defaults.area_size_fraction),
            speed_fraction: fix(speed_fraction, defaults.speed_fraction),
        }
    }

    #[inline]
    pub fn speed_factor(&self) -> f32 {
        lerp(SPEED_FACTOR_MIN, SPEED_FACTOR_MAX, self.speed_fraction)
    }

    #[inline]
    pub fn area_factor(&self) -> f32 {
        lerp(AREA_FRACTION_MIN, 1.0, self.area_size_fraction)
    }
}

fn check_fraction(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::FractionOutOfRange { name, value })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
    pub density: f32,
}

impl Screen {
    pub fn new(width: f32, height: f32, density: f32) -> Self {
        Self {
            width,
            height,
            density,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        !(ok(self.width) && ok(self.height) && ok(self.density))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    #[inline]
    pub fn shorter_side(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn default_periphery(&self) -> f32 {
        self.shorter_side() * DEFAULT_PERIPHERY_FRACTION
    }

    #[inline]
    pub fn dp(&self, value_dp: f32) -> f32 {
        value_dp * self.density
    }
}
