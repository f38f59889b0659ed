use crate::dom;
use crate::frame::Settings;
use crate::keys;
use crate::overlay;
use crate::sensor::SharedSession;
use cues_core::MotionTracker;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, settings: &Rc<RefCell<Settings>>) {
    let Some(action) = keys::key_action(&ev.key()) else {
        return;
    };
    ev.prevent_default();
    let mut s = settings.borrow_mut();
    let Settings {
        config, preview, ..
    } = &mut *s;
    if keys::apply(action, config, preview) {
        // previews replay the reveal so the setting is easy to judge
        s.activated_at = Instant::now();
    }
    if let Some(doc) = dom::window_document() {
        overlay::update_hint(&doc, &s.config, s.preview);
    }
}

pub fn wire_global_keydown(settings: Rc<RefCell<Settings>>) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &settings);
    }) as Box<dyn FnMut(web::KeyboardEvent)>);
    let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Stop the motion session while the page is hidden and start a fresh one
/// when it comes back, so a resumed feed never sees a stale timestamp.
pub fn wire_visibility(
    document: &web::Document,
    tracker: Rc<RefCell<MotionTracker>>,
    session: SharedSession,
    settings: Rc<RefCell<Settings>>,
) {
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        let hidden = doc.visibility_state() == web::VisibilityState::Hidden;
        let mut current = session.borrow_mut();
        let mut tracker = tracker.borrow_mut();
        if hidden {
            if let Some(handle) = current.take() {
                if let Err(e) = tracker.stop_session(handle) {
                    log::warn!("stopping motion session: {e}");
                }
            }
        } else if current.is_none() {
            *current = Some(tracker.start_session());
            settings.borrow_mut().activated_at = Instant::now();
        }
    }) as Box<dyn FnMut()>);
    let _ = document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}
