use web_sys::Window;

use crate::orchestration::ScrollLock;

const LOCKED_STYLE: [(&str, &str); 3] = [("position", "fixed"), ("width", "100%"), ("overflow", "hidden")];

/// Pins `document.body` in place (position fixed, offset by the current
/// scroll) and puts the page back where it was on unlock.
pub struct BodyScrollLock {
    window: Window,
    saved_y: f64,
}

impl BodyScrollLock {
    pub fn new(window: Window) -> Self {
        Self { window, saved_y: 0.0 }
    }

    fn body(&self) -> Option<web_sys::HtmlElement> {
        self.window.document()?.body()
    }
}

impl ScrollLock for BodyScrollLock {
    fn lock(&mut self) {
        self.saved_y = self.window.scroll_y().unwrap_or(0.0);
        let Some(body) = self.body() else {
            log::warn!("scroll lock: no body");
            return;
        };
        let style = body.style();
        let top = format!("-{}px", self.saved_y);
        for (name, value) in LOCKED_STYLE.iter().copied().chain([("top", top.as_str())]) {
            if style.set_property(name, value).is_err() {
                log::warn!("scroll lock: could not set {name}");
            }
        }
    }

    fn unlock(&mut self) {
        if let Some(body) = self.body() {
            let style = body.style();
            for name in LOCKED_STYLE.iter().map(|(n, _)| *n).chain(["top"]) {
                let _ = style.remove_property(name);
            }
        }
        self.window.scroll_to_with_x_and_y(0.0, self.saved_y);
    }
}
