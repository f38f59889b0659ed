//! Particle field generation.
//!
//! The field is a hex-packed 3D lattice covering the viewport plus a margin.
//! Device displacement scrolls the lattice (wrapped by the lattice spacing so
//! it appears infinite) and every cell is turned into at most one black and
//! one white line segment by the [`Projector`].

use crate::config::{OverlayConfig, PreviewMode, Screen};
use crate::constants::*;
use crate::draw::{DrawPrimitive, ParticleColor};
use crate::math::{lerp, wrap_with_cells};
use crate::motion::MotionSnapshot;
use crate::projector::{ProjectRequest, Projector};
use crate::startup::StartupTransition;
use glam::Vec3;
use smallvec::SmallVec;
use std::ops::Range;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridOffset {
    pub wrapped: Vec3,
    pub cells: [i64; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldGrid {
    pub grid_x: f32,
    pub grid_y: f32,
    pub grid_z: f32,
    pub depth_range: f32,
    pub x_range: Range<i32>,
    pub y_range: Range<i32>,
    pub z_range: Range<i32>,
}

impl FieldGrid {
    /// `None` for a degenerate screen or one needing more than
    /// [`MAX_FIELD_CELLS`] cells.
    pub fn new(screen: &Screen) -> Option<Self> {
        if screen.is_degenerate() {
            return None;
        }
        let grid_x = screen.dp(GRID_SPACING_DP);
        let grid_y = grid_x / HEX_RATIO;
        let depth_range = screen.dp(DEPTH_RANGE_DP);
        let grid_z = GRID_Z_FRACTION * depth_range;

        // counts in f64 so absurd screens are rejected before any cast
        let cols = (screen.width as f64 / grid_x as f64).ceil();
        let rows = (screen.height as f64 / grid_y as f64).ceil();
        let layers = (depth_range as f64 / grid_z as f64).ceil();
        let cells = (cols + 2.0 * PAD_X as f64)
            * (rows + 2.0 * PAD_Y as f64)
            * (layers + (PAD_Z_NEAR + PAD_Z_FAR) as f64);
        if !cells.is_finite() || cells > MAX_FIELD_CELLS as f64 {
            log::debug!("field of {cells} cells exceeds budget, skipping");
            return None;
        }
        let (cols, rows, layers) = (cols as i32, rows as i32, layers as i32);

        Some(Self {
            grid_x,
            grid_y,
            grid_z,
            depth_range,
            x_range: -PAD_X..cols + PAD_X,
            y_range: -PAD_Y..rows + PAD_Y,
            z_range: -PAD_Z_NEAR..layers + PAD_Z_FAR,
        })
    }

    pub fn cell_count(&self) -> usize {
        self.x_range.len() * self.y_range.len() * self.z_range.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.z_range.clone().rev().flat_map(move |z| {
            self.y_range
                .clone()
                .flat_map(move |y| self.x_range.clone().map(move |x| Cell { x, y, z }))
        })
    }

    pub fn offset(&self, offset: Vec3) -> GridOffset {
        let (x, cx) = wrap_with_cells(offset.x, self.grid_x);
        let (y, cy) = wrap_with_cells(offset.y, self.grid_y);
        let (z, cz) = wrap_with_cells(offset.z, self.grid_z);
        GridOffset {
            wrapped: Vec3::new(x, y, z),
            cells: [cx, cy, cz],
        }
    }

    /// Pixel position of a cell's black particle.
    ///
    /// Odd rows shift half a cell in X and odd layers shift 4/3 of a cell in
    /// Y. Parity follows the lattice index the particle had before wrapping,
    /// so wrapping the offset never flips the pattern.
    pub fn cell_position(&self, cell: Cell, offset: &GridOffset) -> Vec3 {
        let world_y = cell.y as i64 - offset.cells[1];
        let world_z = cell.z as i64 - offset.cells[2];
        let row_shift = if world_y.rem_euclid(2) == 1 {
            HEX_ROW_SHIFT_X * self.grid_x
        } else {
            0.0
        };
        let layer_shift = if world_z.rem_euclid(2) == 1 {
            HEX_DEPTH_SHIFT_Y * self.grid_y
        } else {
            0.0
        };
        Vec3::new(
            cell.x as f32 * self.grid_x + row_shift + offset.wrapped.x,
            cell.y as f32 * self.grid_y + layer_shift + offset.wrapped.y,
            cell.z as f32 * self.grid_z + offset.wrapped.z,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub snapshot: MotionSnapshot,
    pub config: OverlayConfig,
    pub screen: Screen,
    pub periphery_px: f32,
    pub since_activation: Duration,
    pub preview: PreviewMode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub intensity: f32,
    pub base_radius: f32,
    pub periphery_px: f32,
    pub offset: Vec3,
    pub trail: Vec3,
    pub startup: Option<f32>,
    pub grid: FieldGrid,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParticleField {
    startup: StartupTransition,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_startup(startup: StartupTransition) -> Self {
        Self { startup }
    }

    pub fn plan(&self, input: &FrameInput) -> Option<FramePlan> {
        let screen = input.screen;
        let grid = FieldGrid::new(&screen)?;
        let startup = self.startup.progress(input.since_activation);

        let intensity = if input.preview.is_previewing() {
            1.0
        } else {
            input.snapshot.intensity.clamp(0.0, 1.0)
        };
        let base_radius = screen.dp(BASE_RADIUS_DP) * intensity;
        if base_radius <= MIN_VISIBLE_RADIUS && startup.is_none() {
            return None;
        }

        let distance_scale = screen.dp(DISTANCE_SCALE_DP);
        let (periphery_px, offset, trail) = match input.preview {
            PreviewMode::None => {
                let snap = input.snapshot;
                (
                    remap_periphery(input.periphery_px, &input.config, intensity),
                    snap.position * distance_scale * input.config.speed_factor(),
                    snap.step_delta() * distance_scale,
                )
            }
            PreviewMode::Size => (
                remap_periphery(input.periphery_px, &input.config, intensity),
                Vec3::ZERO,
                Vec3::ZERO,
            ),
            PreviewMode::Speed => {
                let snap = speed_preview_snapshot(input.since_activation);
                (
                    screen.dp(PREVIEW_SPEED_PERIPHERY_DP),
                    snap.position * distance_scale * input.config.speed_factor(),
                    snap.step_delta() * distance_scale,
                )
            }
        };

        Some(FramePlan {
            intensity,
            base_radius,
            periphery_px,
            offset,
            trail,
            startup,
            grid,
        })
    }

    pub fn generate(&self, input: &FrameInput) -> Vec<DrawPrimitive> {
        let mut out = Vec::new();
        self.generate_into(input, &mut out);
        out
    }

    pub fn generate_into(&self, input: &FrameInput, out: &mut Vec<DrawPrimitive>) {
        let Some(plan) = self.plan(input) else {
            return;
        };
        let projector = Projector::with_geometry(
            input.screen,
            input.screen.dp(EYE_DISTANCE_DP),
            plan.grid.depth_range,
        );
        let offset = plan.grid.offset(plan.offset);
        for cell in plan.grid.cells() {
            out.extend(cell_primitives(
                &plan,
                &projector,
                input.config,
                plan.grid.cell_position(cell, &offset),
            ));
        }
    }
}

fn cell_primitives(
    plan: &FramePlan,
    projector: &Projector,
    config: OverlayConfig,
    point: Vec3,
) -> SmallVec<[DrawPrimitive; 2]> {
    let mut prims = SmallVec::new();
    let request = |point: Vec3, color: ParticleColor, base_radius: f32| ProjectRequest {
        point,
        trail_end: point - plan.trail,
        color,
        base_radius,
        periphery_px: plan.periphery_px,
        startup: plan.startup,
    };
    if config.color_mode.draws_black() {
        let req = request(point, ParticleColor::Black, plan.base_radius);
        prims.extend(projector.project(&req));
    }
    if config.color_mode.draws_white() {
        let white = point + Vec3::new(0.0, WHITE_ROW_OFFSET_Y * plan.grid.grid_y, 0.0);
        let req = request(white, ParticleColor::White, plan.base_radius);
        prims.extend(projector.project(&req));
    }
    prims
}

/// Smaller area settings and lower intensity both pull the falloff toward
/// the screen edge, intensity quadratically.
pub fn remap_periphery(periphery_px: f32, config: &OverlayConfig, intensity: f32) -> f32 {
    let i = lerp(PERIPHERY_INTENSITY_MIN, 1.0, intensity.clamp(0.0, 1.0));
    periphery_px * config.area_factor() * i * i
}

pub fn speed_preview_snapshot(elapsed: Duration) -> MotionSnapshot {
    let t = elapsed.as_secs_f32();
    MotionSnapshot {
        position: Vec3::new(t * PREVIEW_SPEED_VELOCITY, 0.0, 0.0),
        previous_position: Vec3::new((t - PREVIEW_FRAME_SECS) * PREVIEW_SPEED_VELOCITY, 0.0, 0.0),
        intensity: 1.0,
    }
}
