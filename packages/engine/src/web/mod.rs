//! Browser drivers (wasm32 only)
//!
//! Thin glue between the host-independent cores and the page: Canvas2D and
//! WebGL2 output, DOM geometry, element observers, body scroll locking and
//! the `requestAnimationFrame` loop. Everything here tears down on drop.

mod backdrop;
mod canvas_painter;
mod dom_geometry;
mod events;
mod frame_loop;
mod gl_renderer;
mod observers;
mod scroll_lock;

pub use backdrop::{
    start_canvas_backdrop, start_gpu_backdrop, CanvasBackdropHandle, GpuBackdropHandle, ModeScope,
};
pub use canvas_painter::CanvasPainter;
pub use dom_geometry::DomGeometry;
pub use gl_renderer::GlBackdropRenderer;
pub use scroll_lock::BodyScrollLock;
