use super::hash::{seeded_random, smoothstep};

pub const DEFAULT_OCTAVES: u32 = 3;
pub const DEFAULT_PERSISTENCE: f64 = 0.5;

// Lattice seed shared by every value-noise evaluation
const LATTICE_SEED: f64 = 17.0;

/// Smoothed value noise: bilinear blend of the four lattice corners around
/// `(x * scale, y * scale)`. Output in `[0, 1)` and continuous across lattice lines.
#[inline]
pub fn value_noise_2d(x: f64, y: f64, scale: f64) -> f64 {
    let sx = x * scale;
    let sy = y * scale;
    let x0 = sx.floor();
    let y0 = sy.floor();

    let tx = smoothstep(sx - x0);
    let ty = smoothstep(sy - y0);

    let c00 = seeded_random(x0, y0, LATTICE_SEED);
    let c10 = seeded_random(x0 + 1.0, y0, LATTICE_SEED);
    let c01 = seeded_random(x0, y0 + 1.0, LATTICE_SEED);
    let c11 = seeded_random(x0 + 1.0, y0 + 1.0, LATTICE_SEED);

    let top = c00 + (c10 - c00) * tx;
    let bottom = c01 + (c11 - c01) * tx;
    top + (bottom - top) * ty
}

/// Octave sum of [`value_noise_2d`] at doubling frequency and `persistence`
/// decaying amplitude, normalized by the total amplitude.
pub fn fractal_noise(x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
    if octaves == 0 {
        return 0.0;
    }

    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_amplitude = 0.0;

    for _ in 0..octaves {
        total += value_noise_2d(x, y, frequency) * amplitude;
        max_amplitude += amplitude;
        amplitude *= persistence;
        frequency *= 2.0;
    }

    if max_amplitude <= 0.0 {
        return 0.0;
    }
    // keep the half-open range even when rounding lands on 1.0
    (total / max_amplitude).min(1.0 - f64::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::Rng;

    #[test]
    fn value_noise_is_bounded_for_sampled_coordinates() {
        let mut rng = Rng::new(99);
        for _ in 0..5_000 {
            let x = rng.next_f64() * 2_000.0 - 1_000.0;
            let y = rng.next_f64() * 2_000.0 - 1_000.0;
            let v = value_noise_2d(x, y, 0.05);
            assert!((0.0..1.0).contains(&v), "({x},{y}) -> {v}");
        }
    }

    #[test]
    fn fractal_noise_is_bounded_for_any_octave_count() {
        let mut rng = Rng::new(7);
        for octaves in 1..=6 {
            for _ in 0..500 {
                let x = rng.next_f64() * 300.0;
                let y = rng.next_f64() * 300.0;
                let v = fractal_noise(x, y, octaves, DEFAULT_PERSISTENCE);
                assert!((0.0..1.0).contains(&v), "octaves={octaves} -> {v}");
            }
        }
        assert_eq!(fractal_noise(1.0, 1.0, 0, 0.5), 0.0);
    }

    #[test]
    fn value_noise_has_no_seams_at_lattice_lines() {
        // Approach each integer lattice line from both sides.
        let eps = 1e-9;
        for i in -5..5 {
            let edge = i as f64;
            for j in 0..10 {
                let y = j as f64 * 0.37 + 0.11;
                let left = value_noise_2d(edge - eps, y, 1.0);
                let right = value_noise_2d(edge + eps, y, 1.0);
                assert!((left - right).abs() < 1e-6, "x seam at {edge}: {left} vs {right}");

                let below = value_noise_2d(y, edge - eps, 1.0);
                let above = value_noise_2d(y, edge + eps, 1.0);
                assert!((below - above).abs() < 1e-6, "y seam at {edge}: {below} vs {above}");
            }
        }
    }

    #[test]
    fn value_noise_hits_lattice_values_exactly() {
        let v = value_noise_2d(3.0, 4.0, 1.0);
        assert_eq!(v, seeded_random(3.0, 4.0, LATTICE_SEED));
    }
}
