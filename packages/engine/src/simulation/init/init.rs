use crate::domain::BackdropConfig;
use crate::noise::Rng;
use crate::spatial::CellGrid;
use crate::systems::{ArcShape, Palette, SparkleField, TrailField, WaveTiming};

use super::perf_stats::PerfStats;
use super::{ArcFieldCore, DrawList, LoopPhase};

pub(super) fn create_arc_field(
    config: BackdropConfig,
    width: f64,
    height: f64,
    device_pixel_ratio: f64,
) -> ArcFieldCore {
    let grid = CellGrid::new(&config.grid, width, height);
    let (shape, timing) = build_shape(&config, grid.width(), grid.height());
    let capacity = grid.count();

    ArcFieldCore {
        palette: Palette::new(&config.color, &config.sparkle),
        sparkles: SparkleField::new(&config.sparkle, capacity),
        trails: TrailField::new(&config.trail, capacity),
        rng: Rng::new(config.seed),
        device_pixel_ratio: sanitize_dpr(device_pixel_ratio),
        phase: LoopPhase::Drawing,
        is_final: false,
        started_ms: None,
        frame: 0,
        reduced_motion: config.reduced_motion,
        evals: Vec::with_capacity(capacity),
        draw_list: DrawList::with_capacity(capacity / 4),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        grid,
        shape,
        timing,
        config,
    }
}

pub(super) fn build_shape(config: &BackdropConfig, width: f64, height: f64) -> (ArcShape, WaveTiming) {
    let shape = ArcShape::new(&config.arc, width, height);
    let timing = WaveTiming::new(&config.timing, width, height, shape.apex());
    (shape, timing)
}

pub(crate) fn sanitize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    }
}
