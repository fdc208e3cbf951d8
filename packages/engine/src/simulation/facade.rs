use wasm_bindgen::prelude::*;

use crate::domain::BackdropConfig;

use super::perf_stats::PerfStats;
use super::{ArcFieldCore, DRAW_STRIDE};

/// JS handle for the Canvas2D arc field.
///
/// JS drives it from `requestAnimationFrame`: call `step(now)`, then either
/// read the packed draw list through `draw_list_ptr` / `draw_list_len` or let
/// the built-in painter replay it (`web::start_canvas_backdrop`).
#[wasm_bindgen]
pub struct ArcField {
    core: ArcFieldCore,
}

#[wasm_bindgen]
impl ArcField {
    /// Create a field for a container of `width × height` CSS pixels.
    /// `config_json` may be omitted for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
        config_json: Option<String>,
    ) -> Result<ArcField, JsValue> {
        let config = BackdropConfig::from_optional_json(config_json.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_config(config, width, height, device_pixel_ratio))
    }

    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> u32 { self.core.grid().cols() }

    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> u32 { self.core.grid().rows() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    /// 0 = drawing, 1 = breathing
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> u8 { self.core.phase().as_u8() }

    #[wasm_bindgen(getter)]
    pub fn is_final(&self) -> bool { self.core.is_final() }

    /// Returns true when the grid was rebuilt.
    pub fn resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64) -> bool {
        self.core.resize(width, height, device_pixel_ratio)
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.core.set_reduced_motion(reduced);
    }

    pub fn restart(&mut self) {
        self.core.restart();
    }

    /// Enable or disable step timings
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    /// Advance to `now_ms`; false while the container has no size.
    pub fn step(&mut self, now_ms: f64) -> bool {
        self.core.step(now_ms)
    }

    /// Pointer to the packed draw list (f32 records, see `draw_stride`)
    pub fn draw_list_ptr(&self) -> *const f32 {
        self.core.draw_list().as_ptr()
    }

    /// Number of records in the draw list
    pub fn draw_list_len(&self) -> usize {
        self.core.draw_list().len()
    }

    pub fn draw_list_len_floats(&self) -> usize {
        self.core.draw_list().float_len()
    }

    pub fn draw_stride(&self) -> usize {
        DRAW_STRIDE
    }
}

impl ArcField {
    pub fn from_config(config: BackdropConfig, width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self { core: ArcFieldCore::new(config, width, height, device_pixel_ratio) }
    }

    pub fn core(&self) -> &ArcFieldCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ArcFieldCore {
        &mut self.core
    }
}
