use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::core::EngineError;

struct LoopState {
    // Holds the frame closure so it can re-schedule itself
    callback: Option<Closure<dyn FnMut(f64)>>,
    handle: Option<i32>,
    running: bool,
}

/// `requestAnimationFrame` loop. The tick receives the frame timestamp and
/// returns `false` to stop. Dropping the loop cancels the pending frame.
pub(crate) struct FrameLoop {
    state: Rc<RefCell<LoopState>>,
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    web_sys::window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

impl FrameLoop {
    pub(crate) fn start(mut tick: impl FnMut(f64) -> bool + 'static) -> Result<Self, EngineError> {
        let state = Rc::new(RefCell::new(LoopState { callback: None, handle: None, running: true }));
        let weak = Rc::downgrade(&state);

        let callback = Closure::wrap(Box::new(move |now: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            if !state.borrow().running {
                return;
            }
            if !tick(now) {
                let mut s = state.borrow_mut();
                s.running = false;
                s.handle = None;
                return;
            }
            let next = state.borrow().callback.as_ref().and_then(request_frame);
            state.borrow_mut().handle = next;
        }) as Box<dyn FnMut(f64)>);

        let handle = request_frame(&callback)
            .ok_or_else(|| EngineError::Dom("requestAnimationFrame".to_string()))?;
        {
            let mut s = state.borrow_mut();
            s.callback = Some(callback);
            s.handle = Some(handle);
        }
        Ok(Self { state })
    }

    pub(crate) fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    /// Restart a loop whose tick returned `false`.
    pub(crate) fn resume(&self) {
        resume(&self.state);
    }

    /// Handle that can resume the loop from an event callback without owning it.
    pub(crate) fn waker(&self) -> FrameWaker {
        FrameWaker { state: Rc::downgrade(&self.state) }
    }

    pub(crate) fn stop(&self) {
        let mut s = self.state.borrow_mut();
        s.running = false;
        if let (Some(handle), Some(window)) = (s.handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(handle);
        }
    }
}

fn resume(state: &RefCell<LoopState>) {
    let mut s = state.borrow_mut();
    if s.running {
        return;
    }
    s.running = true;
    s.handle = s.callback.as_ref().and_then(request_frame);
}

/// Weak handle from [`FrameLoop::waker`]; a no-op once the loop is dropped.
#[derive(Clone)]
pub(crate) struct FrameWaker {
    state: Weak<RefCell<LoopState>>,
}

impl FrameWaker {
    pub(crate) fn resume(&self) {
        if let Some(state) = self.state.upgrade() {
            resume(&state);
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
        self.state.borrow_mut().callback = None;
    }
}
