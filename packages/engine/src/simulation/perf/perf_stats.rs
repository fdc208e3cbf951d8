use wasm_bindgen::prelude::*;

/// Per-step counters for the arc field. Counts are always filled in;
/// `step_ms` only when perf metrics are enabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) evaluate_ms: f64,
    pub(super) frame: u32,
    pub(super) phase: u8,
    pub(super) cells_evaluated: u32,
    pub(super) cells_drawn: u32,
    pub(super) cells_skipped: u32,
    pub(super) glow_cells: u32,
    pub(super) sparkles_started: u32,
    pub(super) sparkles_active: u32,
    pub(super) trails_tracked: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn evaluate_ms(&self) -> f64 { self.evaluate_ms }
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u32 { self.frame }
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> u8 { self.phase }
    #[wasm_bindgen(getter)]
    pub fn cells_evaluated(&self) -> u32 { self.cells_evaluated }
    #[wasm_bindgen(getter)]
    pub fn cells_drawn(&self) -> u32 { self.cells_drawn }
    #[wasm_bindgen(getter)]
    pub fn cells_skipped(&self) -> u32 { self.cells_skipped }
    #[wasm_bindgen(getter)]
    pub fn glow_cells(&self) -> u32 { self.glow_cells }
    #[wasm_bindgen(getter)]
    pub fn sparkles_started(&self) -> u32 { self.sparkles_started }
    #[wasm_bindgen(getter)]
    pub fn sparkles_active(&self) -> u32 { self.sparkles_active }
    #[wasm_bindgen(getter)]
    pub fn trails_tracked(&self) -> u32 { self.trails_tracked }
}
