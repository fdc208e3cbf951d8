use super::init::{build_shape, sanitize_dpr};
use super::{ArcFieldCore, LoopPhase};

pub(super) fn resize(world: &mut ArcFieldCore, width: f64, height: f64, dpr: f64) -> bool {
    world.device_pixel_ratio = sanitize_dpr(dpr);
    let rebuilt = world.grid.resize(width, height);

    let (shape, timing) = build_shape(&world.config, world.grid.width(), world.grid.height());
    world.shape = shape;
    world.timing = timing;

    if rebuilt {
        let capacity = world.grid.count();
        world.sparkles.clear();
        world.trails.clear();
        world.sparkles.set_capacity(capacity);
        world.trails.set_capacity(capacity);
        world.evals = Vec::with_capacity(capacity);
        log::debug!(
            "arc field grid rebuilt: {}x{} cells for {:.0}x{:.0}px",
            world.grid.cols(),
            world.grid.rows(),
            world.grid.width(),
            world.grid.height()
        );
    }
    rebuilt
}

pub(super) fn set_reduced_motion(world: &mut ArcFieldCore, reduced: bool) {
    if world.reduced_motion != reduced {
        log::info!("arc field reduced motion: {}", reduced);
    }
    world.reduced_motion = reduced;
    if reduced {
        world.sparkles.clear();
        world.trails.clear();
    }
}

pub(super) fn enable_perf_metrics(world: &mut ArcFieldCore, enabled: bool) {
    world.perf_enabled = enabled;
}

pub(super) fn restart(world: &mut ArcFieldCore) {
    world.phase = LoopPhase::Drawing;
    world.is_final = false;
    world.started_ms = None;
    world.frame = 0;
    world.sparkles.clear();
    world.trails.clear();
    world.rng.reseed(world.config.seed);
    world.draw_list.clear();
}
