//! Pinhole projection of particles into line segments.

use crate::config::Screen;
use crate::constants::*;
use crate::draw::{DrawPrimitive, ParticleColor};
use crate::math::{perspective_scale, project_axis};
use crate::startup;
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectRequest {
    pub point: Vec3,
    pub trail_end: Vec3,
    pub color: ParticleColor,
    pub base_radius: f32,
    pub periphery_px: f32,
    pub startup: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    screen: Screen,
    eye_distance: f32,
    depth_range: f32,
}

impl Projector {
    pub fn new(screen: Screen) -> Self {
        Self::with_geometry(
            screen,
            screen.dp(EYE_DISTANCE_DP),
            screen.dp(DEPTH_RANGE_DP),
        )
    }

    pub fn with_geometry(screen: Screen, eye_distance: f32, depth_range: f32) -> Self {
        Self {
            screen,
            eye_distance,
            depth_range,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn eye_distance(&self) -> f32 {
        self.eye_distance
    }

    pub fn depth_range(&self) -> f32 {
        self.depth_range
    }

    pub fn project_point(&self, p: Vec3) -> Vec2 {
        let center = self.screen.center();
        let scale = perspective_scale(p.z, self.eye_distance);
        Vec2::new(
            project_axis(p.x, center.x, scale),
            project_axis(p.y, center.y, scale),
        )
    }

    pub fn edge_distance(&self, p: Vec2) -> f32 {
        p.x.min(self.screen.width - p.x)
            .min(p.y)
            .min(self.screen.height - p.y)
            .max(0.0)
    }

    /// 1 on the screen edge, falling linearly to 0 at `periphery_px` inward.
    pub fn edge_factor(&self, p: Vec2, periphery_px: f32) -> f32 {
        if periphery_px.is_nan() || periphery_px <= 0.0 {
            return 0.0;
        }
        (1.0 - (self.edge_distance(p) / periphery_px).min(1.0)).clamp(0.0, 1.0)
    }

    pub fn depth_alpha(&self, z: f32) -> f32 {
        let half = self.depth_range * 0.5;
        if half.is_nan() || half <= 0.0 {
            return 0.0;
        }
        let t = ((z - half).abs() / half).min(1.0);
        1.0 - t * t
    }

    /// Project one particle; `None` when it ends up without radius or fully
    /// transparent.
    pub fn project(&self, req: &ProjectRequest) -> Option<DrawPrimitive> {
        let start = self.project_point(req.point);
        let end = self.project_point(req.trail_end);

        let bonus = req
            .startup
            .map_or(0.0, |p| startup::bonus(p, start.y, self.screen.height));
        // white strokes stay a full pixel narrower wherever they are drawn
        let reduction = match req.color {
            ParticleColor::Black => 0.0,
            ParticleColor::White => WHITE_RADIUS_REDUCTION_PX,
        };
        let radius =
            (req.base_radius * self.edge_factor(start, req.periphery_px)).max(0.0) + bonus - reduction;
        if radius.is_nan() || radius <= 0.0 {
            return None;
        }

        let alpha = self.depth_alpha(req.point.z);
        if alpha.is_nan() || alpha <= 0.0 {
            return None;
        }

        let scale = perspective_scale(req.point.z, self.eye_distance);
        let trail_px = start.distance(end);
        let width = (2.0 * radius - trail_px * TRAIL_THINNING).max(MIN_STROKE_PX) * scale;
        if !width.is_finite() || !start.is_finite() || !end.is_finite() {
            return None;
        }

        Some(DrawPrimitive::new(start, end, width, alpha, req.color))
    }
}
