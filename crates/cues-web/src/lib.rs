#![cfg(target_arch = "wasm32")]
use cues_core::{DrawPrimitive, MotionTracker, ParticleField};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod keys;
mod overlay;
mod sensor;

thread_local! {
    static LAST_FRAME: RefCell<Vec<f32>> = const { RefCell::new(Vec::new()) };
}

pub(crate) fn publish_frame(primitives: &[DrawPrimitive]) {
    LAST_FRAME.with(|f| {
        let mut buf = f.borrow_mut();
        buf.clear();
        buf.extend_from_slice(DrawPrimitive::as_floats(primitives));
    });
}

/// Last frame as a flat buffer, nine floats per primitive, for hosts that
/// draw the field themselves.
#[wasm_bindgen]
pub fn frame_floats() -> js_sys::Float32Array {
    LAST_FRAME.with(|f| js_sys::Float32Array::from(f.borrow().as_slice()))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cues-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::sync_canvas_backing_size(&canvas);
    let ctx2d = dom::canvas_2d(&canvas)?;

    let tracker = Rc::new(RefCell::new(MotionTracker::new()));
    let session: sensor::SharedSession =
        Rc::new(RefCell::new(Some(tracker.borrow_mut().start_session())));
    let settings = Rc::new(RefCell::new(frame::Settings::default()));

    sensor::wire_device_motion(&window, tracker.clone(), session.clone());
    events::wire_visibility(&document, tracker.clone(), session, settings.clone());
    events::wire_global_keydown(settings.clone());
    {
        let s = settings.borrow();
        overlay::update_hint(&document, &s.config, s.preview);
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        canvas,
        ctx2d,
        tracker,
        settings,
        field: ParticleField::new(),
        primitives: Vec::new(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
