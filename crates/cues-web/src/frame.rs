use crate::dom;
use cues_core::{
    DrawPrimitive, FrameInput, MotionTracker, OverlayConfig, ParticleField, PreviewMode, Screen,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Host-side state switched by the keyboard and visibility handlers.
pub struct Settings {
    pub config: OverlayConfig,
    pub preview: PreviewMode,
    pub activated_at: Instant,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config: OverlayConfig::default(),
            preview: PreviewMode::None,
            activated_at: Instant::now(),
        }
    }
}

pub struct FrameContext {
    pub canvas: web::HtmlCanvasElement,
    pub ctx2d: web::CanvasRenderingContext2d,
    pub tracker: Rc<RefCell<MotionTracker>>,
    pub settings: Rc<RefCell<Settings>>,
    pub field: ParticleField,
    pub primitives: Vec<DrawPrimitive>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        dom::sync_canvas_backing_size(&self.canvas);
        let width = self.canvas.width() as f32;
        let height = self.canvas.height() as f32;
        let screen = Screen::new(width, height, dom::device_pixel_ratio());

        let input = {
            let s = self.settings.borrow();
            FrameInput {
                snapshot: self.tracker.borrow().snapshot(),
                config: s.config,
                screen,
                periphery_px: screen.default_periphery(),
                since_activation: s.activated_at.elapsed(),
                preview: s.preview,
            }
        };

        self.primitives.clear();
        self.field.generate_into(&input, &mut self.primitives);

        self.ctx2d
            .clear_rect(0.0, 0.0, width as f64, height as f64);
        draw_primitives(&self.ctx2d, &self.primitives);
        crate::publish_frame(&self.primitives);
    }
}

fn draw_primitives(ctx: &web::CanvasRenderingContext2d, primitives: &[DrawPrimitive]) {
    ctx.set_line_cap("round");
    for p in primitives {
        ctx.set_stroke_style_str(&p.css_rgba());
        ctx.set_line_width(p.width as f64);
        ctx.begin_path();
        ctx.move_to(p.start[0] as f64, p.start[1] as f64);
        ctx.line_to(p.end[0] as f64, p.end[1] as f64);
        ctx.stroke();
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
