//! Arcfield Engine - procedural grid/arc backdrop in WASM
//!
//! Two interchangeable renderers share one per-cell model (seeded noise,
//! arc coverage, wave timing, breathing):
//! - `ArcField`    - Canvas2D, evaluates every cell on the CPU into a draw list
//! - `GpuBackdrop` - WebGL2 instanced grid, per-cell work in the shader
//!
//! Architecture:
//! - core/          - errors, logging
//! - noise/         - hash, value/fractal noise, rng
//! - domain/        - config, animation modes
//! - spatial/       - cell grid
//! - systems/       - arc geometry and timing, color, sparkle/trail effects
//! - simulation/    - Canvas2D frame driver
//! - gpu/           - instance buffers, uniforms, DOM geometry bridge, shaders
//! - orchestration/ - mode stack, scroll hijack, timers
//! - web/           - browser drivers (wasm32 only)

pub mod core;
pub mod noise;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;
pub mod gpu;
pub mod orchestration;
#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(feature = "parallel")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine with `info` logging
#[wasm_bindgen]
pub fn init() {
    init_with_level("info");
}

/// Initialize the engine; `level` is a `log` level name ("off" .. "trace").
#[wasm_bindgen]
pub fn init_with_level(level: &str) {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::install(crate::core::logging::parse_level(level));
    log::info!("arcfield engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::EngineError;
pub use domain::{AnimationMode, BackdropConfig};
pub use gpu::{GpuBackdrop, GpuBackdropCore};
pub use orchestration::{ModeController, ScrollHijack};
pub use simulation::{ArcField, ArcFieldCore};
