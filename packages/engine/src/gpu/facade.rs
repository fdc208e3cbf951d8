use wasm_bindgen::prelude::*;

use crate::domain::{AnimationMode, BackdropConfig};

use super::geometry::{PushedGeometry, Rect, TrackedRegion};
use super::uniforms::UniformSet;
use super::GpuBackdropCore;

/// JS handle for the instanced-grid backdrop.
///
/// JS owns the WebGL program in this setup: it uploads the four instance
/// arrays (via the `*_ptr` / `instance_count` getters, re-reading them when
/// `instances_version` changes) and copies `uniform_array()` into the shader
/// after every `frame(now)`. `web::start_gpu_backdrop` does all of that in Rust.
#[wasm_bindgen]
pub struct GpuBackdrop {
    core: GpuBackdropCore,
    pushed: PushedGeometry,
    uniforms: UniformSet,
    intro_just_completed: bool,
}

#[wasm_bindgen]
impl GpuBackdrop {
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
        config_json: Option<String>,
    ) -> Result<GpuBackdrop, JsValue> {
        let config = BackdropConfig::from_optional_json(config_json.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_config(config, width, height, device_pixel_ratio))
    }

    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> u32 { self.core.grid().cols() }

    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> u32 { self.core.grid().rows() }

    #[wasm_bindgen(getter)]
    pub fn instance_count(&self) -> usize { self.core.instances().len() }

    #[wasm_bindgen(getter)]
    pub fn instances_version(&self) -> u32 { self.core.instances_version() }

    #[wasm_bindgen(getter)]
    pub fn intro_complete(&self) -> bool { self.core.intro_complete() }

    /// True only right after the `frame` call that finished the intro ramp.
    #[wasm_bindgen(getter)]
    pub fn intro_just_completed(&self) -> bool { self.intro_just_completed }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String { self.core.mode().as_str().to_string() }

    pub fn resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64) -> bool {
        self.core.resize(width, height, device_pixel_ratio)
    }

    /// `"none" | "intro" | "idle" | "blog"`; anything else is `none`.
    pub fn set_mode(&mut self, mode: &str) {
        self.core.set_mode(AnimationMode::parse(mode));
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.core.set_reduced_motion(reduced);
    }

    pub fn set_scroll(&mut self, scroll_y: f64) {
        self.core.set_scroll(scroll_y);
    }

    pub fn set_visible(&mut self, visible: bool, now_ms: f64) {
        self.core.set_visible(visible, now_ms);
    }

    /// Negative index clears the hover.
    pub fn set_hovered(&mut self, index: i32, now_ms: f64) -> bool {
        self.core.set_hovered(index, now_ms)
    }

    /// Region 0 = process section, 1 = solution card. Viewport CSS pixels.
    pub fn set_region_rect(&mut self, region: u8, x: f64, y: f64, width: f64, height: f64) {
        if let Some(region) = TrackedRegion::from_u8(region) {
            self.pushed.set(region, Some(Rect::new(x, y, width, height)));
            self.core.geometry_changed();
        }
    }

    pub fn clear_region(&mut self, region: u8) {
        if let Some(region) = TrackedRegion::from_u8(region) {
            self.pushed.set(region, None);
            self.core.geometry_changed();
        }
    }

    pub fn mount(&mut self, now_ms: f64) {
        self.core.mount(now_ms);
    }

    /// Advance to `now_ms`. Returns false (and keeps the previous uniforms)
    /// while hidden or sizeless.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        match self.core.frame(now_ms, &self.pushed) {
            Some(out) => {
                self.uniforms = out.uniforms;
                self.intro_just_completed = out.intro_completed;
                true
            }
            None => {
                self.intro_just_completed = false;
                false
            }
        }
    }

    /// Latest uniforms, flat, in `shaders::UNIFORMS` order.
    pub fn uniform_array(&self) -> Vec<f32> {
        self.uniforms.to_array().to_vec()
    }

    pub fn offsets_ptr(&self) -> *const f32 { self.core.instances().offsets.as_ptr() }

    pub fn indices_ptr(&self) -> *const f32 { self.core.instances().indices.as_ptr() }

    pub fn seeds_ptr(&self) -> *const f32 { self.core.instances().seeds.as_ptr() }

    pub fn positions_ptr(&self) -> *const f32 { self.core.instances().positions.as_ptr() }

    pub fn vertex_shader_source(&self) -> String { super::shaders::VERTEX_SRC.to_string() }

    pub fn fragment_shader_source(&self) -> String { super::shaders::FRAGMENT_SRC.to_string() }
}

impl GpuBackdrop {
    pub fn from_config(config: BackdropConfig, width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            core: GpuBackdropCore::new(config, width, height, device_pixel_ratio),
            pushed: PushedGeometry::default(),
            uniforms: UniformSet::default(),
            intro_just_completed: false,
        }
    }

    pub fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    pub fn core(&self) -> &GpuBackdropCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut GpuBackdropCore {
        &mut self.core
    }
}
