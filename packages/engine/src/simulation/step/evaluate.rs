use crate::domain::config::BreathingConfig;
use crate::noise::value_noise_2d;
use crate::spatial::{Cell, CellGrid};
use crate::systems::{ArcShape, Breathing, WaveTiming};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Scale of the low-frequency hue drift across the grid
const HUE_NOISE_SCALE: f64 = 0.07;

/// How much of the reveal has happened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Reveal {
    /// Wavefront position in ms since the draw started (already eased).
    Partial(f64),
    Full,
}

/// Read-only inputs for one frame's per-cell evaluation.
pub(crate) struct FrameContext<'a> {
    pub grid: &'a CellGrid,
    pub shape: &'a ArcShape,
    pub timing: &'a WaveTiming,
    pub breathing: &'a BreathingConfig,
    pub reveal: Reveal,
    pub elapsed_ms: f64,
    pub animate: bool,
}

/// Pure per-cell result; effects and shading are applied afterwards.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CellEval {
    pub key: (i32, i32),
    pub x: f64,
    pub y: f64,
    pub intensity: f64,
    pub hue_noise: f64,
    pub detail: f64,
    pub seed_b: f64,
}

pub(crate) fn evaluate_cell(ctx: &FrameContext, cell: Cell) -> CellEval {
    let (cx, cy) = ctx.grid.cell_center(cell.col, cell.row);
    let sample = ctx.shape.sample(cell.col, cell.row, cx, cy);

    let mut eval = CellEval {
        key: cell.key(),
        x: cell.x,
        y: cell.y,
        intensity: 0.0,
        hue_noise: 0.0,
        detail: sample.detail,
        seed_b: cell.seed_b,
    };
    if !sample.inside {
        return eval;
    }

    let base = sample.profile * (0.55 + 0.45 * sample.detail);

    let reveal = match ctx.reveal {
        Reveal::Full => 1.0,
        Reveal::Partial(front_ms) => {
            let appear = ctx.timing.appearance_time(cx, cy, cell.seed_a);
            ctx.timing.fade_in(front_ms, appear)
        }
    };
    if reveal <= 0.0 {
        return eval;
    }

    let breath = if ctx.animate {
        Breathing::for_cell(ctx.breathing, cell.seed_a, cell.seed_b).multiplier(ctx.elapsed_ms)
    } else {
        1.0
    };

    eval.intensity = (base * reveal * breath).clamp(0.0, 1.0);
    eval.hue_noise = value_noise_2d(cell.col as f64, cell.row as f64, HUE_NOISE_SCALE);
    eval
}

/// Evaluate the whole grid row-major into `out`.
pub(crate) fn evaluate_all(ctx: &FrameContext, out: &mut Vec<CellEval>) {
    let count = ctx.grid.count();

    #[cfg(feature = "parallel")]
    {
        (0..count)
            .into_par_iter()
            .map(|idx| {
                let (col, row) = ctx.grid.coords(idx);
                evaluate_cell(ctx, ctx.grid.cell(col, row))
            })
            .collect_into_vec(out);
    }

    #[cfg(not(feature = "parallel"))]
    {
        out.clear();
        out.reserve(count);
        out.extend(ctx.grid.cells().map(|cell| evaluate_cell(ctx, cell)));
    }
}
