use crate::keys::color_label;
use cues_core::{OverlayConfig, PreviewMode};
use web_sys as web;

/// Show the current settings in the hint overlay, if the page has one.
pub fn update_hint(document: &web::Document, config: &OverlayConfig, preview: PreviewMode) {
    if let Some(el) = document.get_element_by_id("hint-overlay") {
        let preview_text = match preview {
            PreviewMode::None => "Live".to_string(),
            other => format!("Preview: {other}"),
        };
        let hint_html = format!(
            "<div style='color: #cfe7ff; font: 13px system-ui; background: rgba(10, 14, 24, 0.8); padding: 8px 12px; border-radius: 6px;'>{} • {} • Area {:.0}% • Speed {:.0}%</div>",
            preview_text,
            color_label(config.color_mode),
            config.area_size_fraction * 100.0,
            config.speed_fraction * 100.0,
        );
        el.set_inner_html(&hint_html);
    }
}
