// Pure key-binding logic, kept free of web-sys so it can be tested on the host.

use cues_core::{ColorMode, OverlayConfig, PreviewMode};

pub const FRACTION_STEP: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    Preview(PreviewMode),
    CycleColor,
    AreaStep(f32),
    SpeedStep(f32),
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "0" => Some(KeyAction::Preview(PreviewMode::None)),
        "1" => Some(KeyAction::Preview(PreviewMode::Size)),
        "2" => Some(KeyAction::Preview(PreviewMode::Speed)),
        "c" | "C" => Some(KeyAction::CycleColor),
        "ArrowUp" => Some(KeyAction::AreaStep(FRACTION_STEP)),
        "ArrowDown" => Some(KeyAction::AreaStep(-FRACTION_STEP)),
        "ArrowRight" => Some(KeyAction::SpeedStep(FRACTION_STEP)),
        "ArrowLeft" => Some(KeyAction::SpeedStep(-FRACTION_STEP)),
        _ => None,
    }
}

/// Apply an action; returns true when the preview mode changed.
pub fn apply(action: KeyAction, config: &mut OverlayConfig, preview: &mut PreviewMode) -> bool {
    match action {
        KeyAction::Preview(mode) => {
            let changed = *preview != mode;
            *preview = mode;
            return changed;
        }
        KeyAction::CycleColor => config.color_mode = config.color_mode.next(),
        KeyAction::AreaStep(step) => {
            *config = OverlayConfig::clamped(
                config.color_mode,
                config.area_size_fraction + step,
                config.speed_fraction,
            );
        }
        KeyAction::SpeedStep(step) => {
            *config = OverlayConfig::clamped(
                config.color_mode,
                config.area_size_fraction,
                config.speed_fraction + step,
            );
        }
    }
    false
}

#[inline]
pub fn color_label(mode: ColorMode) -> &'static str {
    match mode {
        ColorMode::Black => "Black",
        ColorMode::White => "White",
        ColorMode::BlackAndWhite => "Black & white",
    }
}
