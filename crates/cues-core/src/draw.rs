//! Draw primitives handed to an immediate-mode 2D canvas.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleColor {
    Black,
    White,
}

impl ParticleColor {
    pub fn rgb(self) -> [f32; 3] {
        match self {
            ParticleColor::Black => [0.0, 0.0, 0.0],
            ParticleColor::White => [1.0, 1.0, 1.0],
        }
    }
}

/// A round-capped, alpha-blended line segment in screen pixels.
///
/// Laid out as nine `f32`s so a frame can be handed over as one flat buffer:
/// `start.x, start.y, end.x, end.y, width, alpha, r, g, b`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DrawPrimitive {
    pub start: [f32; 2],
    pub end: [f32; 2],
    pub width: f32,
    pub alpha: f32,
    pub color: [f32; 3],
}

impl DrawPrimitive {
    pub const FLOATS: usize = 9;

    pub fn new(start: Vec2, end: Vec2, width: f32, alpha: f32, color: ParticleColor) -> Self {
        Self {
            start: start.to_array(),
            end: end.to_array(),
            width,
            alpha,
            color: color.rgb(),
        }
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        Vec2::from(self.start)
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        Vec2::from(self.end)
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.start().distance(self.end())
    }

    pub fn css_rgba(&self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({},{},{},{:.3})",
            c(self.color[0]),
            c(self.color[1]),
            c(self.color[2]),
            self.alpha.clamp(0.0, 1.0)
        )
    }

    pub fn as_floats(primitives: &[DrawPrimitive]) -> &[f32] {
        bytemuck::cast_slice(primitives)
    }
}
