use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, ResizeObserver};

use crate::core::EngineError;

enum Observer {
    Intersection(IntersectionObserver),
    Resize(ResizeObserver),
}

/// `IntersectionObserver` / `ResizeObserver` on one element, disconnected on
/// drop.
pub(crate) struct ElementObserver {
    observer: Observer,
    _closure: Closure<dyn FnMut(Array)>,
}

impl ElementObserver {
    /// Calls `handler(on_screen)` whenever `element` enters or leaves the viewport.
    pub(crate) fn on_screen(
        element: &Element,
        mut handler: impl FnMut(bool) + 'static,
    ) -> Result<Self, EngineError> {
        let closure = Closure::wrap(Box::new(move |entries: Array| {
            // batched entries arrive oldest first
            let last = entries.iter().last().and_then(|e| e.dyn_into::<IntersectionObserverEntry>().ok());
            if let Some(entry) = last {
                handler(entry.is_intersecting());
            }
        }) as Box<dyn FnMut(Array)>);
        let observer = IntersectionObserver::new(closure.as_ref().unchecked_ref())
            .map_err(|_| EngineError::Dom("IntersectionObserver".to_string()))?;
        observer.observe(element);
        Ok(Self { observer: Observer::Intersection(observer), _closure: closure })
    }

    /// Calls `handler()` whenever the layout size of `element` changes.
    pub(crate) fn on_resize(
        element: &Element,
        mut handler: impl FnMut() + 'static,
    ) -> Result<Self, EngineError> {
        let closure = Closure::wrap(Box::new(move |_entries: Array| handler()) as Box<dyn FnMut(Array)>);
        let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())
            .map_err(|_| EngineError::Dom("ResizeObserver".to_string()))?;
        observer.observe(element);
        Ok(Self { observer: Observer::Resize(observer), _closure: closure })
    }
}

impl Drop for ElementObserver {
    fn drop(&mut self) {
        match &self.observer {
            Observer::Intersection(o) => o.disconnect(),
            Observer::Resize(o) => o.disconnect(),
        }
    }
}
