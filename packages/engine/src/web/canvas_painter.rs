use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::core::EngineError;
use crate::simulation::DrawList;

/// Replays a [`DrawList`] onto a 2D canvas.
pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, EngineError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(EngineError::ContextUnavailable("2d"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::ContextUnavailable("2d"))?;
        Ok(Self { canvas, ctx, width: 0.0, height: 0.0 })
    }

    /// Size the backing store for `dpr` and draw in CSS pixels from here on.
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        self.width = width;
        self.height = height;
        self.canvas.set_width((width * dpr).round().max(0.0) as u32);
        self.canvas.set_height((height * dpr).round().max(0.0) as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    pub fn paint(&self, list: &DrawList) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.width, self.height);

        for rec in list.records() {
            ctx.set_fill_style_str(&rec.fill.to_css());
            match rec.glow {
                Some(glow) => {
                    ctx.set_shadow_blur(glow.blur);
                    ctx.set_shadow_color(&glow.color.to_css());
                }
                None => ctx.set_shadow_blur(0.0),
            }
            self.rounded_rect(rec.x as f64, rec.y as f64, rec.size as f64, rec.radius as f64);
            ctx.fill();
        }
        ctx.set_shadow_blur(0.0);
    }

    fn rounded_rect(&self, x: f64, y: f64, size: f64, radius: f64) {
        let ctx = &self.ctx;
        let r = radius.clamp(0.0, size * 0.5);
        ctx.begin_path();
        ctx.move_to(x + r, y);
        let _ = ctx.arc_to(x + size, y, x + size, y + size, r);
        let _ = ctx.arc_to(x + size, y + size, x, y + size, r);
        let _ = ctx.arc_to(x, y + size, x, y, r);
        let _ = ctx.arc_to(x, y, x + size, y, r);
        ctx.close_path();
    }
}
