use cues_core::{InertialSample, MotionTracker, Orientation, SessionHandle};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Running session, if the page is visible.
pub type SharedSession = Rc<RefCell<Option<SessionHandle>>>;

#[inline]
fn ms_to_nanos(ms: f64) -> u64 {
    if ms.is_finite() && ms > 0.0 {
        (ms * 1e6) as u64
    } else {
        0
    }
}

pub fn current_orientation(window: &web::Window) -> Orientation {
    window
        .screen()
        .ok()
        .and_then(|s| s.orientation().angle().ok())
        .map(|deg| Orientation::from_rotation_degrees(deg as f32))
        .unwrap_or_default()
}

/// Feed `devicemotion` linear acceleration into the running session.
pub fn wire_device_motion(
    window: &web::Window,
    tracker: Rc<RefCell<MotionTracker>>,
    session: SharedSession,
) {
    let win = window.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::DeviceMotionEvent| {
        let Some(handle) = *session.borrow() else {
            return;
        };
        let Some(acc) = ev.acceleration() else {
            return;
        };
        let sample = InertialSample::new(
            ms_to_nanos(ev.time_stamp()),
            acc.x().unwrap_or(0.0) as f32,
            acc.y().unwrap_or(0.0) as f32,
            acc.z().unwrap_or(0.0) as f32,
        );
        tracker
            .borrow_mut()
            .push(handle, sample, current_orientation(&win));
    }) as Box<dyn FnMut(web::DeviceMotionEvent)>);
    if let Err(e) =
        window.add_event_listener_with_callback("devicemotion", closure.as_ref().unchecked_ref())
    {
        log::error!("devicemotion listener: {:?}", e);
    }
    closure.forget();
}
