use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use cues_core::{
    ColorMode, DrawPrimitive, FrameInput, InertialSample, MotionTracker, Orientation,
    OverlayConfig, ParticleColor, ParticleField, PreviewMode, Screen, SnapshotCell,
};
use glam::Vec3;
use instant::Instant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SENSOR_HZ: u64 = 200;
const FRAME_HZ: u64 = 60;
const DEFAULT_RUN_SECS: u64 = 5;

// Phone-sized surface: 1080x2340 px at density 2.75.
const SCREEN_WIDTH: f32 = 1080.0;
const SCREEN_HEIGHT: f32 = 2340.0;
const SCREEN_DENSITY: f32 = 2.75;

// Road-like sway in m/s^2 per axis, with a slower heave on z.
const SWAY_AMPLITUDE: [f32; 3] = [0.8, 0.5, 0.3];
const SWAY_HZ: [f32; 3] = [0.4, 0.25, 0.9];
const NOISE_AMPLITUDE: f32 = 0.05;

#[derive(Debug)]
struct Args {
    preview: PreviewMode,
    color: ColorMode,
    seconds: u64,
    seed: u64,
}

fn parse_args(mut it: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut args = Args {
        preview: PreviewMode::None,
        color: ColorMode::default(),
        seconds: DEFAULT_RUN_SECS,
        seed: 42,
    };
    while let Some(flag) = it.next() {
        let mut value = || it.next().with_context(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--preview" => args.preview = value()?.parse()?,
            "--color" => args.color = value()?.parse()?,
            "--seconds" => args.seconds = value()?.parse().context("--seconds")?,
            "--seed" => args.seed = value()?.parse().context("--seed")?,
            other => bail!("unknown argument `{other}`"),
        }
    }
    Ok(args)
}

fn synthetic_sample(t: f32, timestamp_nanos: u64, rng: &mut StdRng) -> InertialSample {
    let mut a = [0.0f32; 3];
    for (i, v) in a.iter_mut().enumerate() {
        let phase = std::f32::consts::TAU * SWAY_HZ[i] * t;
        *v = SWAY_AMPLITUDE[i] * phase.sin()
            + rng.gen_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE);
    }
    InertialSample::new(timestamp_nanos, a[0], a[1], a[2])
}

/// Feed synthetic samples into a fresh session until `running` clears.
fn spawn_sensor(
    tracker: MotionTracker,
    seed: u64,
    running: Arc<AtomicBool>,
) -> anyhow::Result<thread::JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("sensor".into())
        .spawn(move || {
            let mut tracker = tracker;
            let session = tracker.start_session();
            let mut rng = StdRng::seed_from_u64(seed);
            let start = Instant::now();
            let period = Duration::from_micros(1_000_000 / SENSOR_HZ);
            while running.load(Ordering::Relaxed) {
                let elapsed = start.elapsed();
                let sample = synthetic_sample(
                    elapsed.as_secs_f32(),
                    elapsed.as_nanos() as u64,
                    &mut rng,
                );
                tracker.push(session, sample, Orientation::Portrait);
                thread::sleep(period);
            }
            if let Err(e) = tracker.stop_session(session) {
                log::warn!("sensor shutdown: {e}");
            }
        })?;
    Ok(handle)
}

#[derive(Default)]
struct FrameStats {
    frames: u32,
    primitives: usize,
    black: usize,
    white: usize,
    max_width: f32,
}

impl FrameStats {
    fn record(&mut self, primitives: &[DrawPrimitive]) {
        self.frames += 1;
        self.primitives += primitives.len();
        for p in primitives {
            if p.color == ParticleColor::White.rgb() {
                self.white += 1;
            } else {
                self.black += 1;
            }
            self.max_width = self.max_width.max(p.width);
        }
    }

    fn mean(&self, count: usize) -> usize {
        count.checked_div(self.frames as usize).unwrap_or(0)
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let screen = Screen::new(SCREEN_WIDTH, SCREEN_HEIGHT, SCREEN_DENSITY);
    let config = OverlayConfig {
        color_mode: args.color,
        ..OverlayConfig::default()
    };
    let tracker = MotionTracker::new();
    let cell: SnapshotCell = tracker.snapshot_cell();
    let running = Arc::new(AtomicBool::new(true));
    let sensor = spawn_sensor(tracker, args.seed, running.clone())?;

    log::info!(
        "running {}s: preview={} color={} screen={}x{}@{}",
        args.seconds,
        args.preview,
        args.color,
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        SCREEN_DENSITY
    );

    let field = ParticleField::new();
    let mut primitives = Vec::new();
    let mut stats = FrameStats::default();
    let frame_period = Duration::from_micros(1_000_000 / FRAME_HZ);
    let activated_at = Instant::now();
    let run_for = Duration::from_secs(args.seconds);
    let mut next_report = Duration::from_secs(1);

    loop {
        let since_activation = activated_at.elapsed();
        if since_activation >= run_for {
            break;
        }
        let snapshot = cell.load();
        let input = FrameInput {
            snapshot,
            config,
            screen,
            periphery_px: screen.default_periphery(),
            since_activation,
            preview: args.preview,
        };
        primitives.clear();
        field.generate_into(&input, &mut primitives);
        stats.record(&primitives);

        if since_activation >= next_report {
            let pos: Vec3 = snapshot.position;
            log::info!(
                "t={:.0}s intensity={:.3} pos=({:.3}, {:.3}, {:.3}) primitives/frame={} (black {}, white {}) max width {:.1}px",
                since_activation.as_secs_f32(),
                snapshot.intensity,
                pos.x,
                pos.y,
                pos.z,
                stats.mean(stats.primitives),
                stats.mean(stats.black),
                stats.mean(stats.white),
                stats.max_width,
            );
            stats = FrameStats::default();
            next_report += Duration::from_secs(1);
        }
        thread::sleep(frame_period);
    }

    running.store(false, Ordering::Relaxed);
    sensor
        .join()
        .map_err(|_| anyhow::anyhow!("sensor thread panicked"))?;
    Ok(())
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let result = parse_args(std::env::args().skip(1)).and_then(run);
    if let Err(e) = result {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
