// Host-side tests for lattice enumeration and particle field generation.

use cues_core::constants::{MAX_FIELD_CELLS, PAD_X, PAD_Y};
use cues_core::{
    remap_periphery, Cell, ColorMode, FieldGrid, FrameInput, MotionSnapshot, OverlayConfig,
    ParticleField, PreviewMode, Projector, Screen,
};
use glam::Vec3;
use std::time::Duration;

const SETTLED: Duration = Duration::from_secs(10);

fn screen() -> Screen {
    Screen::new(400.0, 800.0, 1.0)
}

fn input(preview: PreviewMode, snapshot: MotionSnapshot) -> FrameInput {
    FrameInput {
        snapshot,
        config: OverlayConfig::default(),
        screen: screen(),
        periphery_px: 150.0,
        since_activation: SETTLED,
        preview,
    }
}

fn moving(position: Vec3, previous: Vec3, intensity: f32) -> MotionSnapshot {
    MotionSnapshot {
        position,
        previous_position: previous,
        intensity,
    }
}

#[test]
fn degenerate_screens_draw_nothing() {
    let field = ParticleField::new();
    for s in [
        Screen::new(0.0, 800.0, 1.0),
        Screen::new(400.0, 0.0, 1.0),
        Screen::new(400.0, 800.0, 0.0),
        Screen::new(f32::NAN, 800.0, 1.0),
        Screen::new(400.0, f32::INFINITY, 1.0),
    ] {
        let mut frame = input(PreviewMode::Size, MotionSnapshot::REST);
        frame.screen = s;
        frame.since_activation = Duration::ZERO;
        assert!(field.generate(&frame).is_empty(), "{s:?}");
        assert!(FieldGrid::new(&s).is_none());
    }
}

#[test]
fn resting_device_draws_nothing() {
    let field = ParticleField::new();
    let frame = input(PreviewMode::None, MotionSnapshot::REST);
    assert!(field.plan(&frame).is_none());
    assert!(field.generate(&frame).is_empty());

    // radius just under the visibility floor
    let faint = input(PreviewMode::None, moving(Vec3::ZERO, Vec3::ZERO, 0.03));
    assert!(field.generate(&faint).is_empty());
}

#[test]
fn startup_wave_draws_even_at_rest() {
    let field = ParticleField::new();
    let mut frame = input(PreviewMode::None, MotionSnapshot::REST);
    frame.since_activation = Duration::from_millis(350);
    let plan = field.plan(&frame).expect("wave keeps the frame alive");
    assert_eq!(plan.base_radius, 0.0);
    assert!(!field.generate(&frame).is_empty());
}

#[test]
fn cell_count_matches_padded_bounds() {
    let s = screen();
    let grid = FieldGrid::new(&s).unwrap();
    let cols = (s.width / grid.grid_x).ceil() as usize;
    let rows = (s.height / grid.grid_y).ceil() as usize;
    let layers = (grid.depth_range / grid.grid_z).ceil() as usize;
    assert_eq!(grid.cell_count(), (cols + 4) * (rows + 8) * (layers + 3));
    assert_eq!(grid.cells().count(), grid.cell_count());
}

#[test]
fn hex_spacing_ratio() {
    let grid = FieldGrid::new(&screen()).unwrap();
    assert!((grid.grid_x / grid.grid_y - 2.0 * 3f32.sqrt() / 3.0).abs() < 1e-5);
    assert!((grid.grid_z - 0.8 * grid.depth_range).abs() < 1e-4);
}

#[test]
fn enumeration_covers_the_viewport_with_margin() {
    let s = screen();
    let grid = FieldGrid::new(&s).unwrap();
    let offset = grid.offset(Vec3::ZERO);
    let positions: Vec<Vec3> = grid.cells().map(|c| grid.cell_position(c, &offset)).collect();

    let min = positions.iter().fold(Vec3::splat(f32::MAX), |a, p| a.min(*p));
    let max = positions.iter().fold(Vec3::splat(f32::MIN), |a, p| a.max(*p));
    assert!(min.x <= -grid.grid_x && max.x >= s.width + grid.grid_x);
    assert!(min.y <= -grid.grid_y && max.y >= s.height + grid.grid_y);
    assert!(min.z <= 0.0 && max.z >= grid.depth_range);

    for p in &positions {
        assert!(p.x >= -(PAD_X + 1) as f32 * grid.grid_x);
        assert!(p.x <= s.width + (PAD_X + 1) as f32 * grid.grid_x);
        assert!(p.y >= -(PAD_Y + 2) as f32 * grid.grid_y);
        assert!(p.y <= s.height + (PAD_Y + 2) as f32 * grid.grid_y);
    }
}

#[test]
fn scrolling_one_column_is_seamless() {
    let grid = FieldGrid::new(&screen()).unwrap();
    for base in [Vec3::new(13.0, 7.0, 5.0), Vec3::new(-250.3, -91.7, -400.2)] {
        let a = grid.offset(base);
        let b = grid.offset(base + Vec3::new(grid.grid_x, 0.0, 0.0));
        for cell in grid.cells().take(200) {
            let pa = grid.cell_position(cell, &a);
            let pb = grid.cell_position(cell, &b);
            assert!((pa - pb).length() < 1e-2, "{cell:?}: {pa} vs {pb}");
        }
    }
}

#[test]
fn scrolling_one_row_moves_particles_by_one_row() {
    let grid = FieldGrid::new(&screen()).unwrap();
    for base in [Vec3::new(3.0, 11.0, 0.0), Vec3::new(-17.0, -123.4, 0.0)] {
        let a = grid.offset(base);
        let b = grid.offset(base + Vec3::new(0.0, grid.grid_y, 0.0));
        for cell in grid.cells().take(400) {
            let before = grid.cell_position(Cell { y: cell.y - 1, ..cell }, &a);
            let after = grid.cell_position(cell, &b);
            let moved = after - before;
            assert!(
                (moved - Vec3::new(0.0, grid.grid_y, 0.0)).length() < 1e-2,
                "{cell:?} moved by {moved}"
            );
        }
    }
}

#[test]
fn size_preview_ignores_live_motion() {
    let field = ParticleField::new();
    let live = moving(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 1.0, 1.0), 0.0);
    let frame = input(PreviewMode::Size, live);
    let plan = field.plan(&frame).unwrap();
    assert_eq!(plan.intensity, 1.0);
    assert_eq!(plan.offset, Vec3::ZERO);
    assert_eq!(plan.trail, Vec3::ZERO);
    let expected = remap_periphery(150.0, &frame.config, 1.0);
    assert!((plan.periphery_px - expected).abs() < 1e-4);
}

#[test]
fn speed_preview_scrolls_along_x_with_fixed_periphery() {
    let field = ParticleField::new();
    let mut frame = input(PreviewMode::Speed, MotionSnapshot::REST);
    frame.since_activation = Duration::from_secs(2);
    let plan = field.plan(&frame).unwrap();
    assert_eq!(plan.intensity, 1.0);
    assert!((plan.periphery_px - 96.0).abs() < 1e-4);
    let speed_factor = frame.config.speed_factor();
    assert!((plan.offset.x - 2.0 * 0.15 * 4000.0 * speed_factor).abs() < 0.5);
    assert_eq!(plan.offset.y, 0.0);
    assert_eq!(plan.offset.z, 0.0);
    assert!((plan.trail.x - 0.15 / 60.0 * 4000.0).abs() < 1e-2);
    assert!(!field.generate(&frame).is_empty());
}

#[test]
fn live_offsets_follow_position_and_speed_setting() {
    let field = ParticleField::new();
    let mut frame = input(
        PreviewMode::None,
        moving(Vec3::new(0.01, -0.02, 0.0), Vec3::ZERO, 1.0),
    );
    frame.config.speed_fraction = 1.0;
    let plan = field.plan(&frame).unwrap();
    assert!((plan.offset - Vec3::new(108.0, -216.0, 0.0)).length() < 1e-2);
    assert!((plan.trail - Vec3::new(40.0, -80.0, 0.0)).length() < 1e-2);
}

#[test]
fn periphery_shrinks_with_area_and_intensity() {
    let full = OverlayConfig::clamped(ColorMode::Black, 1.0, 0.5);
    let small = OverlayConfig::clamped(ColorMode::Black, 0.0, 0.5);
    assert!((remap_periphery(100.0, &full, 1.0) - 100.0).abs() < 1e-4);
    assert!((remap_periphery(100.0, &full, 0.0) - 16.0).abs() < 1e-4);
    assert!((remap_periphery(100.0, &full, 0.5) - 49.0).abs() < 1e-4);
    assert!((remap_periphery(100.0, &small, 1.0) - 20.0).abs() < 1e-4);
}

#[test]
fn oversized_fields_are_skipped() {
    let field = ParticleField::new();
    for s in [
        Screen::new(1.0e12, 800.0, 1.0),
        Screen::new(400.0, f32::MAX, 1.0),
        Screen::new(1080.0, 2340.0, 0.01),
        Screen::new(1080.0, 2340.0, f32::MIN_POSITIVE),
    ] {
        assert!(FieldGrid::new(&s).is_none(), "{s:?}");
        let mut frame = input(PreviewMode::Size, MotionSnapshot::REST);
        frame.screen = s;
        assert!(field.generate(&frame).is_empty());
    }
    // a phone-sized screen stays well inside the budget
    let phone = FieldGrid::new(&Screen::new(1080.0, 2340.0, 2.75)).unwrap();
    assert!(phone.cell_count() < MAX_FIELD_CELLS / 10);
}

#[test]
fn color_modes_select_particle_sets() {
    let field = ParticleField::new();
    let mut frame = input(PreviewMode::Size, MotionSnapshot::REST);

    frame.config.color_mode = ColorMode::Black;
    let black = field.generate(&frame);
    frame.config.color_mode = ColorMode::White;
    let white = field.generate(&frame);
    frame.config.color_mode = ColorMode::BlackAndWhite;
    let both = field.generate(&frame);

    assert!(!black.is_empty() && !white.is_empty());
    assert!(black.iter().all(|p| p.color == [0.0, 0.0, 0.0]));
    assert!(white.iter().all(|p| p.color == [1.0, 1.0, 1.0]));
    assert_eq!(both.len(), black.len() + white.len());
}

#[test]
fn white_particles_are_interleaved_and_narrower() {
    let grid = FieldGrid::new(&screen()).unwrap();
    let field = ParticleField::new();
    let mut frame = input(PreviewMode::Size, MotionSnapshot::REST);
    frame.config.color_mode = ColorMode::BlackAndWhite;
    let both = field.generate(&frame);
    // each cell emits black then white; pairs on the same cell share x
    let pair = both
        .windows(2)
        .find(|w| {
            w[0].color == [0.0, 0.0, 0.0]
                && w[1].color == [1.0, 1.0, 1.0]
                && (w[0].start[0] - w[1].start[0]).abs() < 1e-3
        })
        .expect("a cell with both particles");
    let scale = 1000.0 / (grid.grid_z + 1000.0);
    let dy = pair[1].start[1] - pair[0].start[1];
    assert!((dy - 2.0 / 3.0 * grid.grid_y * scale).abs() < 1e-2);
}

#[test]
fn focal_center_stays_clear() {
    let field = ParticleField::new();
    let frame = input(PreviewMode::Size, MotionSnapshot::REST);
    let plan = field.plan(&frame).unwrap();
    let projector = Projector::new(screen());
    let prims = field.generate(&frame);
    assert!(!prims.is_empty());
    for p in &prims {
        assert!(projector.edge_distance(p.start()) < plan.periphery_px);
        assert!(p.alpha > 0.0 && p.alpha <= 1.0);
        assert!(p.width >= 0.0);
    }
}

#[test]
fn generation_is_deterministic_and_appends() {
    let field = ParticleField::new();
    let frame = input(
        PreviewMode::None,
        moving(Vec3::new(0.3, -0.7, 0.02), Vec3::new(0.29, -0.69, 0.02), 0.8),
    );
    let a = field.generate(&frame);
    let b = field.generate(&frame);
    assert_eq!(a, b);

    let mut buf = a.clone();
    field.generate_into(&frame, &mut buf);
    assert_eq!(buf.len(), 2 * a.len());
    assert_eq!(&buf[a.len()..], &a[..]);
}
