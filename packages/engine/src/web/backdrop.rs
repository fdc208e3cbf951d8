//! Browser wiring for both backdrops: canvas lookup, resize / scroll /
//! visibility listeners and observers, the frame loop and, for the GPU
//! backdrop, the mode stack and scroll hijack.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlCanvasElement, KeyboardEvent, TouchEvent, WheelEvent, Window};

use crate::core::EngineError;
use crate::domain::{AnimationMode, BackdropConfig};
use crate::gpu::GpuBackdropCore;
use crate::orchestration::{
    HijackPhase, InputDisposition, ModeController, ScopeToken, ScrollHijack, ScrollInput, ScrollKey,
};
use crate::simulation::{now_ms, ArcFieldCore};

use super::canvas_painter::CanvasPainter;
use super::dom_geometry::DomGeometry;
use super::events::EventListener;
use super::frame_loop::FrameLoop;
use super::gl_renderer::GlBackdropRenderer;
use super::observers::ElementObserver;
use super::scroll_lock::BodyScrollLock;

// === DOM HELPERS ===

fn window() -> Result<Window, EngineError> {
    web_sys::window().ok_or_else(|| EngineError::Dom("no window".to_string()))
}

fn document(window: &Window) -> Result<Document, EngineError> {
    window.document().ok_or_else(|| EngineError::Dom("no document".to_string()))
}

fn canvas_by_id(document: &Document, id: &str) -> Result<HtmlCanvasElement, EngineError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| EngineError::ElementNotFound(format!("#{id}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| EngineError::ElementNotFound(format!("#{id} is not a canvas")))
}

fn css_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
    let r = canvas.get_bounding_client_rect();
    (r.width(), r.height())
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|m| m.matches())
}

fn load_config(window: &Window, config_json: Option<&str>) -> Result<BackdropConfig, EngineError> {
    let mut config = BackdropConfig::from_optional_json(config_json)?;
    config.reduced_motion |= prefers_reduced_motion(window);
    Ok(config)
}

// === CANVAS2D BACKDROP ===

struct CanvasState {
    window: Window,
    canvas: HtmlCanvasElement,
    field: ArcFieldCore,
    painter: CanvasPainter,
}

impl CanvasState {
    fn render(&mut self, now: f64) {
        if self.field.step(now) {
            self.painter.paint(self.field.draw_list());
        }
    }

    fn remeasure(&mut self) {
        let (w, h) = css_size(&self.canvas);
        let dpr = self.window.device_pixel_ratio();
        self.field.resize(w, h, dpr);
        self.painter.resize(w, h, dpr);
        // the loop may have stopped on a static frame
        self.render(now_ms());
    }
}

/// Running Canvas2D backdrop. `stop()` (or dropping the handle) removes every
/// listener and cancels the frame loop.
#[wasm_bindgen]
pub struct CanvasBackdropHandle {
    state: Rc<RefCell<CanvasState>>,
    frame: Option<FrameLoop>,
    listeners: Vec<EventListener>,
    observers: Vec<ElementObserver>,
}

#[wasm_bindgen]
impl CanvasBackdropHandle {
    pub fn stop(&mut self) {
        self.frame = None;
        self.listeners.clear();
        self.observers.clear();
    }

    pub fn restart(&mut self) {
        self.state.borrow_mut().field.restart();
        if let Some(frame) = &self.frame {
            frame.resume();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn is_final(&self) -> bool {
        self.state.borrow().field.is_final()
    }

    /// False once stopped or parked on a static reduced-motion frame.
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.frame.as_ref().is_some_and(FrameLoop::is_running)
    }
}

/// Start the Canvas2D backdrop on `<canvas id=canvas_id>`.
#[wasm_bindgen]
pub fn start_canvas_backdrop(
    canvas_id: &str,
    config_json: Option<String>,
) -> Result<CanvasBackdropHandle, JsValue> {
    Ok(start_canvas(canvas_id, config_json.as_deref())?)
}

fn start_canvas(canvas_id: &str, config_json: Option<&str>) -> Result<CanvasBackdropHandle, EngineError> {
    let window = window()?;
    let canvas = canvas_by_id(&document(&window)?, canvas_id)?;
    let config = load_config(&window, config_json)?;

    let dpr = window.device_pixel_ratio();
    let (w, h) = css_size(&canvas);
    let mut painter = CanvasPainter::new(canvas.clone())?;
    painter.resize(w, h, dpr);
    let state = Rc::new(RefCell::new(CanvasState {
        window: window.clone(),
        canvas: canvas.clone(),
        field: ArcFieldCore::new(config, w, h, dpr),
        painter,
    }));

    // window resize also catches device pixel ratio changes
    let resize = {
        let state = Rc::clone(&state);
        EventListener::passive(&window, "resize", move |_| state.borrow_mut().remeasure())?
    };
    let layout = {
        let state = Rc::clone(&state);
        ElementObserver::on_resize(&canvas, move || state.borrow_mut().remeasure())?
    };

    let frame = {
        let state = Rc::clone(&state);
        FrameLoop::start(move |now| {
            let mut s = state.borrow_mut();
            s.render(now);
            // a reduced-motion frame never changes once final
            !(s.field.reduced_motion() && s.field.is_final())
        })?
    };

    log::info!("canvas backdrop started on #{canvas_id}");
    Ok(CanvasBackdropHandle { state, frame: Some(frame), listeners: vec![resize], observers: vec![layout] })
}

// === GPU BACKDROP ===

struct GpuState {
    window: Window,
    canvas: HtmlCanvasElement,
    core: GpuBackdropCore,
    renderer: GlBackdropRenderer,
    geometry: DomGeometry,
    modes: ModeController,
    hijack: Option<ScrollHijack<BodyScrollLock>>,
    touch_y: Option<f64>,
}

impl GpuState {
    fn remeasure(&mut self) {
        let (w, h) = css_size(&self.canvas);
        let dpr = self.window.device_pixel_ratio();
        self.core.resize(w, h, dpr);
        self.renderer.resize(w, h, dpr);
    }

    /// The loop parks while hidden, except to finish a pending scroll release.
    fn keep_running(&self) -> bool {
        self.core.is_visible() || self.hijack.as_ref().is_some_and(|h| h.phase() == HijackPhase::Releasing)
    }

    fn render(&mut self, now: f64) {
        self.core.set_mode(self.modes.active());
        if let Some(hijack) = self.hijack.as_mut() {
            hijack.tick(now);
        }

        let Some(out) = self.core.frame(now, &self.geometry) else {
            return;
        };
        if self.renderer.instances_version() != self.core.instances_version() {
            self.renderer.upload_instances(self.core.instances(), self.core.instances_version());
        }
        self.renderer.draw(&out.uniforms);

        if out.intro_completed {
            self.modes.complete_intro();
            let scroll_y = self.window.scroll_y().unwrap_or(0.0);
            if let Some(hijack) = self.hijack.as_mut() {
                hijack.on_intro_complete(scroll_y);
            }
        }
    }

    fn input(&mut self, input: ScrollInput, event: &Event) {
        let Some(hijack) = self.hijack.as_mut() else {
            return;
        };
        if hijack.handle_input(input, now_ms()) == InputDisposition::Consumed {
            event.prevent_default();
        }
    }
}

/// Running GPU backdrop.
#[wasm_bindgen]
pub struct GpuBackdropHandle {
    state: Rc<RefCell<GpuState>>,
    frame: Option<FrameLoop>,
    listeners: Vec<EventListener>,
    observers: Vec<ElementObserver>,
}

#[wasm_bindgen]
impl GpuBackdropHandle {
    pub fn stop(&mut self) {
        self.frame = None;
        self.listeners.clear();
        self.observers.clear();
        let mut s = self.state.borrow_mut();
        s.core.unmount();
        if let Some(hijack) = s.hijack.as_mut() {
            hijack.release_now();
        }
    }

    /// Replace the root mode (explicit reset; the intro may play again).
    pub fn set_mode(&mut self, mode: &str) {
        self.state.borrow_mut().modes.set_root(AnimationMode::parse(mode));
    }

    /// Override the mode until the returned scope is released.
    pub fn push_mode(&mut self, mode: &str) -> ModeScope {
        let token = self.state.borrow_mut().modes.push(AnimationMode::parse(mode));
        ModeScope { state: Rc::downgrade(&self.state), token: Some(token) }
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.state.borrow().modes.active().as_str().to_string()
    }

    /// Negative index clears the hover.
    pub fn set_hovered(&mut self, index: i32) {
        self.state.borrow_mut().core.set_hovered(index, now_ms());
    }

    /// False once stopped or parked while the canvas is hidden.
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.frame.as_ref().is_some_and(FrameLoop::is_running)
    }

    #[wasm_bindgen(getter)]
    pub fn hijack_phase(&self) -> String {
        let s = self.state.borrow();
        s.hijack.as_ref().map_or("disabled", |h| h.phase().as_str()).to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn hijack_progress(&self) -> f64 {
        self.state.borrow().hijack.as_ref().map_or(0.0, |h| h.progress())
    }
}

/// Mode override pushed by [`GpuBackdropHandle::push_mode`]. Releasing it (or
/// freeing it from JS) restores the enclosing mode.
#[wasm_bindgen]
pub struct ModeScope {
    state: Weak<RefCell<GpuState>>,
    token: Option<ScopeToken>,
}

#[wasm_bindgen]
impl ModeScope {
    pub fn release(&mut self) {
        if let (Some(state), Some(token)) = (self.state.upgrade(), self.token.take()) {
            state.borrow_mut().modes.pop(token);
        }
    }
}

impl Drop for ModeScope {
    fn drop(&mut self) {
        self.release();
    }
}

/// Start the GPU backdrop on `<canvas id=canvas_id>` with the initial `mode`.
/// With `hijack_scroll`, the first scroll after the intro drives the hero.
#[wasm_bindgen]
pub fn start_gpu_backdrop(
    canvas_id: &str,
    mode: &str,
    hijack_scroll: bool,
    config_json: Option<String>,
) -> Result<GpuBackdropHandle, JsValue> {
    Ok(start_gpu(canvas_id, AnimationMode::parse(mode), hijack_scroll, config_json.as_deref())?)
}

fn start_gpu(
    canvas_id: &str,
    mode: AnimationMode,
    hijack_scroll: bool,
    config_json: Option<&str>,
) -> Result<GpuBackdropHandle, EngineError> {
    let window = window()?;
    let document = document(&window)?;
    let canvas = canvas_by_id(&document, canvas_id)?;
    let config = load_config(&window, config_json)?;

    let dpr = window.device_pixel_ratio();
    let (w, h) = css_size(&canvas);
    let mut renderer = GlBackdropRenderer::new(canvas.clone())?;
    renderer.resize(w, h, dpr);

    let geometry = DomGeometry::new(document.clone(), &config.gpu);
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let mut hijack = hijack_scroll.then(|| ScrollHijack::new(config.scroll.clone(), BodyScrollLock::new(window.clone())));
    // no intro to wait for
    if mode != AnimationMode::Intro {
        if let Some(hijack) = hijack.as_mut() {
            hijack.on_intro_complete(scroll_y);
        }
    }
    let mut core = GpuBackdropCore::new(config, w, h, dpr);
    core.mount(now_ms());
    core.set_scroll(scroll_y);

    let state = Rc::new(RefCell::new(GpuState {
        window: window.clone(),
        canvas: canvas.clone(),
        core,
        renderer,
        geometry,
        modes: ModeController::new(mode),
        hijack,
        touch_y: None,
    }));
    state.borrow_mut().core.set_tab_hidden(document.hidden(), now_ms());

    let frame = {
        let state = Rc::clone(&state);
        FrameLoop::start(move |now| {
            let mut s = state.borrow_mut();
            s.render(now);
            s.keep_running()
        })?
    };
    let waker = frame.waker();

    let mut listeners = Vec::new();

    listeners.push({
        let state = Rc::clone(&state);
        EventListener::passive(&window, "resize", move |_| state.borrow_mut().remeasure())?
    });

    listeners.push({
        let state = Rc::clone(&state);
        let win = window.clone();
        EventListener::passive(&window, "scroll", move |_| {
            let y = win.scroll_y().unwrap_or(0.0);
            let mut s = state.borrow_mut();
            s.core.set_scroll(y);
            if let Some(hijack) = s.hijack.as_mut() {
                hijack.on_scroll(y);
            }
        })?
    });

    listeners.push({
        let state = Rc::clone(&state);
        let doc = document.clone();
        let waker = waker.clone();
        EventListener::passive(&document, "visibilitychange", move |_| {
            if state.borrow_mut().core.set_tab_hidden(doc.hidden(), now_ms()) {
                waker.resume();
            }
        })?
    });

    let observers = vec![
        {
            let state = Rc::clone(&state);
            ElementObserver::on_resize(&canvas, move || state.borrow_mut().remeasure())?
        },
        {
            let state = Rc::clone(&state);
            ElementObserver::on_screen(&canvas, move |on_screen| {
                if state.borrow_mut().core.set_on_screen(on_screen, now_ms()) {
                    waker.resume();
                }
            })?
        },
    ];

    if hijack_scroll {
        listeners.push({
            let state = Rc::clone(&state);
            EventListener::blocking(&window, "wheel", move |event| {
                if let Some(wheel) = event.dyn_ref::<WheelEvent>() {
                    state.borrow_mut().input(ScrollInput::Wheel { delta_y: wheel.delta_y() }, &event);
                }
            })?
        });
        listeners.push({
            let state = Rc::clone(&state);
            EventListener::passive(&window, "touchstart", move |event| {
                let y = event.dyn_ref::<TouchEvent>().and_then(|t| t.touches().get(0)).map(|t| t.client_y() as f64);
                state.borrow_mut().touch_y = y;
            })?
        });
        listeners.push({
            let state = Rc::clone(&state);
            EventListener::blocking(&window, "touchmove", move |event| {
                let Some(y) = event.dyn_ref::<TouchEvent>().and_then(|t| t.touches().get(0)).map(|t| t.client_y() as f64)
                else {
                    return;
                };
                let mut s = state.borrow_mut();
                // finger moving up scrolls down
                let delta_y = s.touch_y.replace(y).map_or(0.0, |last| last - y);
                s.input(ScrollInput::Touch { delta_y }, &event);
            })?
        });
        listeners.push({
            let state = Rc::clone(&state);
            EventListener::blocking(&window, "keydown", move |event| {
                let key = event.dyn_ref::<KeyboardEvent>().and_then(|k| ScrollKey::from_key(&k.key()));
                if let Some(key) = key {
                    state.borrow_mut().input(ScrollInput::Key(key), &event);
                }
            })?
        });
    }

    log::info!("gpu backdrop started on #{canvas_id} (mode {})", mode.as_str());
    Ok(GpuBackdropHandle { state, frame: Some(frame), listeners, observers })
}
