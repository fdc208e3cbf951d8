use crate::systems::{organic_ease, ShadeInput};

use super::evaluate::{evaluate_all, FrameContext, Reveal};
use super::{ArcFieldCore, LoopPhase, PerfTimer};

// Effect maps are swept for stale entries this often (frames)
const PRUNE_INTERVAL: u64 = 60;

pub(super) fn step(world: &mut ArcFieldCore, now_ms: f64) -> bool {
    let perf_on = world.perf_enabled;
    let mut timer = perf_on.then(PerfTimer::start);
    world.perf_stats.reset();
    world.draw_list.clear();

    if world.grid.is_empty() {
        return false;
    }

    let started = *world.started_ms.get_or_insert(now_ms);
    let elapsed = (now_ms - started).max(0.0);

    // === PHASE ===
    let reveal = match world.phase {
        LoopPhase::Drawing => {
            let total = world.config.timing.total_draw_ms();
            let progress = if world.reduced_motion { 1.0 } else { (elapsed / total).min(1.0) };
            if progress >= 1.0 {
                world.phase = LoopPhase::Breathing;
                world.is_final = true;
                log::info!("arc field reveal complete after {:.0}ms, breathing", elapsed);
                Reveal::Full
            } else {
                Reveal::Partial(organic_ease(progress) * total)
            }
        }
        LoopPhase::Breathing => Reveal::Full,
    };
    let animate = world.phase == LoopPhase::Breathing && !world.reduced_motion;

    // === EVALUATE (pure, optionally parallel) ===
    let ctx = FrameContext {
        grid: &world.grid,
        shape: &world.shape,
        timing: &world.timing,
        breathing: &world.config.breathing,
        reveal,
        elapsed_ms: elapsed,
        animate,
    };
    evaluate_all(&ctx, &mut world.evals);
    if let Some(t) = timer.as_mut() {
        world.perf_stats.evaluate_ms = t.lap_ms();
    }

    // === EFFECTS + SHADE (serial, touches the persistent maps) ===
    let threshold = world.palette.intensity_threshold();
    let size = world.grid.cell_size();
    let radius = world.config.grid.corner_radius;
    let boost = world.config.sparkle.intensity_boost;
    let stats = &mut world.perf_stats;

    for eval in world.evals.iter() {
        let mut sparkle = 0.0;
        if animate {
            if eval.intensity > threshold && world.sparkles.roll(eval.key, now_ms, &mut world.rng) {
                stats.sparkles_started += 1;
            }
            if !world.sparkles.is_empty() {
                sparkle = world.sparkles.sample(eval.key, now_ms).unwrap_or(0.0);
            }
        }

        let computed = (eval.intensity + sparkle * boost).min(1.0);
        let shown = if animate {
            let factor = world.trails.factor_for(eval.seed_b);
            world.trails.apply(eval.key, factor, computed, now_ms)
        } else {
            computed
        };

        if shown < threshold {
            stats.cells_skipped += 1;
            continue;
        }

        let paint = world.palette.shade(ShadeInput {
            intensity: shown,
            hue_noise: eval.hue_noise,
            detail_noise: eval.detail,
            sparkle,
        });
        world.draw_list.push(eval.x, eval.y, size, radius, &paint);
    }

    world.frame += 1;
    if world.frame % PRUNE_INTERVAL == 0 {
        world.sparkles.prune(now_ms);
        world.trails.prune(now_ms);
    }

    let stats = &mut world.perf_stats;
    stats.frame = world.frame as u32;
    stats.phase = world.phase.as_u8();
    stats.cells_evaluated = world.evals.len() as u32;
    stats.cells_drawn = world.draw_list.len() as u32;
    stats.glow_cells = world.draw_list.glow_count() as u32;
    stats.sparkles_active = world.sparkles.len() as u32;
    stats.trails_tracked = world.trails.len() as u32;
    if let Some(t) = timer.as_mut() {
        stats.step_ms = stats.evaluate_ms + t.elapsed_ms();
    }
    true
}
