//! Arc field - Canvas2D procedural renderer
//!
//! Evaluates every cell of the grid each frame and writes a packed draw list
//! (one record per lit cell) that a painter replays onto a 2D canvas.
//!
//! Frame structure:
//! - evaluate: pure per-cell quantities (arc coverage, reveal, breathing)
//! - effects:  sparkle and trail fields, the only state kept across frames
//! - shade:    HSLA fill and optional glow, skipped below the dim threshold

use crate::domain::BackdropConfig;
use crate::noise::Rng;
use crate::spatial::CellGrid;
use crate::systems::{ArcShape, Palette, SparkleField, TrailField, WaveTiming};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/evaluate.rs"]
mod evaluate;
#[path = "step/step.rs"]
mod step;
#[path = "render/draw_list.rs"]
mod draw_list;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use draw_list::{DrawList, DrawRecord, DRAW_STRIDE};
pub use facade::ArcField;
pub use perf_stats::PerfStats;

pub(crate) use init::sanitize_dpr;
pub(crate) use perf_timer::PerfTimer;
#[cfg(target_arch = "wasm32")]
pub(crate) use perf_timer::now_ms;

use evaluate::CellEval;

/// Two-state loop: the intro reveal, then an endless idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopPhase {
    Drawing,
    Breathing,
}

impl LoopPhase {
    pub fn as_u8(self) -> u8 {
        match self {
            LoopPhase::Drawing => 0,
            LoopPhase::Breathing => 1,
        }
    }
}

/// The Canvas2D backdrop state
pub struct ArcFieldCore {
    config: BackdropConfig,
    grid: CellGrid,
    shape: ArcShape,
    timing: WaveTiming,
    palette: Palette,
    sparkles: SparkleField,
    trails: TrailField,
    rng: Rng,

    // Surface
    device_pixel_ratio: f64,

    // Loop state
    phase: LoopPhase,
    is_final: bool,
    started_ms: Option<f64>,
    frame: u64,
    reduced_motion: bool,

    // Scratch + output
    evals: Vec<CellEval>,
    draw_list: DrawList,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl ArcFieldCore {
    /// Create a field for a `width × height` CSS-pixel surface.
    pub fn new(config: BackdropConfig, width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        init::create_arc_field(config, width, height, device_pixel_ratio)
    }

    pub fn config(&self) -> &BackdropConfig { &self.config }

    pub fn grid(&self) -> &CellGrid { &self.grid }

    pub fn shape(&self) -> &ArcShape { &self.shape }

    pub fn phase(&self) -> LoopPhase { self.phase }

    /// Set once the reveal has completed; never cleared except by `restart`.
    pub fn is_final(&self) -> bool { self.is_final }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn device_pixel_ratio(&self) -> f64 { self.device_pixel_ratio }

    pub fn draw_list(&self) -> &DrawList { &self.draw_list }

    pub fn sparkles(&self) -> &SparkleField { &self.sparkles }

    pub fn trails(&self) -> &TrailField { &self.trails }

    /// Follow a container resize. Effect maps are reset when the grid
    /// dimensions change.
    pub fn resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64) -> bool {
        settings::resize(self, width, height, device_pixel_ratio)
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        settings::set_reduced_motion(self, reduced);
    }

    pub fn reduced_motion(&self) -> bool { self.reduced_motion }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step perf snapshot (timings are zero when perf is disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.perf_stats.clone()
    }

    /// Start the reveal over from the first frame.
    pub fn restart(&mut self) {
        settings::restart(self);
    }

    /// Advance to `now_ms` and rebuild the draw list.
    ///
    /// Returns `false` (and leaves the list empty) while the surface has no size.
    pub fn step(&mut self, now_ms: f64) -> bool {
        step::step(self, now_ms)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
