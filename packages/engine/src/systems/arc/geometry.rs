use std::f64::consts::PI;

use crate::domain::config::ArcConfig;
use crate::noise::{fractal_noise, seeded_random};

// Normalized distances where the irregular edge treatment starts
const EDGE_NOISE_START: f64 = 0.6;
const EDGE_ROLL_START: f64 = 0.85;
const EDGE_ROLL_PUSH: f64 = 0.15;

const EDGE_ROLL_SEED: f64 = 5.0;
const EDGE_DIR_SEED: f64 = 6.0;

// Offsets that decorrelate the noise layers sampled per cell
const EDGE_NOISE_OFFSET: (f64, f64) = (31.7, 11.3);
const DETAIL_NOISE_OFFSET: (f64, f64) = (-47.1, 83.9);

/// Arc band laid over a `width × height` surface.
///
/// The centerline is a parabola around the horizontal middle; thickness is
/// lens-shaped (thin at the sides, full at the apex) and noise-perturbed.
#[derive(Clone, Debug)]
pub struct ArcShape {
    width: f64,
    height: f64,
    curvature: f64,
    center_y: f64,
    base_thickness: f64,
    thickness_variation: f64,
    edge_noise_amount: f64,
    edge_roll_probability: f64,
    noise_scale: f64,
    octaves: u32,
    persistence: f64,
}

/// Result of testing one cell against the band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSample {
    pub inside: bool,
    /// `|y - centerline| / half_thickness`; 0 on the centerline, 1 at the nominal edge.
    pub distance: f64,
    /// Effective edge after noise and the rim roll.
    pub boundary: f64,
    /// Intensity falloff across the band, 1 on the centerline, 0 outside.
    pub profile: f64,
    /// Fractal noise at the cell, reused for color and brightness texture.
    pub detail: f64,
}

impl ArcShape {
    pub fn new(config: &ArcConfig, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            curvature: config.curvature,
            center_y: config.center_fraction * height,
            base_thickness: config.thickness_fraction * height,
            thickness_variation: config.thickness_variation,
            edge_noise_amount: config.edge_noise_amount,
            edge_roll_probability: config.edge_roll_probability,
            noise_scale: config.noise_scale,
            octaves: config.octaves,
            persistence: config.persistence,
        }
    }

    pub fn width(&self) -> f64 { self.width }

    pub fn height(&self) -> f64 { self.height }

    /// Horizontal position mapped to `[-1, 1]` around the middle.
    #[inline]
    pub fn normalized_x(&self, x: f64) -> f64 {
        let half = self.width * 0.5;
        if half <= 0.0 {
            return 0.0;
        }
        ((x - half) / half).clamp(-1.0, 1.0)
    }

    /// Centerline height at horizontal position `x`.
    #[inline]
    pub fn centerline_y(&self, x: f64) -> f64 {
        let nx = self.normalized_x(x);
        self.center_y + self.curvature * self.width * nx * nx
    }

    /// Band thickness before noise: `base * (0.25 + 0.75 * sin(u * π))`.
    #[inline]
    pub fn nominal_thickness(&self, x: f64) -> f64 {
        let u = (self.normalized_x(x) + 1.0) * 0.5;
        self.base_thickness * (0.25 + 0.75 * (u * PI).sin())
    }

    /// Thickness with the ± variation driven by `noise` in `[0, 1)`.
    #[inline]
    pub fn thickness(&self, x: f64, noise: f64) -> f64 {
        let jitter = (noise - 0.5) * 2.0 * self.thickness_variation;
        (self.nominal_thickness(x) * (1.0 + jitter)).max(0.0)
    }

    /// Apex of the arc, where the wavefront starts.
    pub fn apex(&self) -> (f64, f64) {
        let x = self.width * 0.5;
        (x, self.centerline_y(x))
    }

    /// Fractal noise for a cell, offset into its own layer.
    #[inline]
    fn cell_noise(&self, col: u32, row: u32, offset: (f64, f64)) -> f64 {
        fractal_noise(
            col as f64 * self.noise_scale + offset.0,
            row as f64 * self.noise_scale + offset.1,
            self.octaves,
            self.persistence,
        )
    }

    /// Test the cell centered at `(x, y)` with grid coordinates `(col, row)`.
    pub fn sample(&self, col: u32, row: u32, x: f64, y: f64) -> ArcSample {
        let shape_noise = self.cell_noise(col, row, (0.0, 0.0));
        let detail = self.cell_noise(col, row, DETAIL_NOISE_OFFSET);
        let half = self.thickness(x, shape_noise) * 0.5;

        if half <= 0.0 {
            return ArcSample { inside: false, distance: f64::INFINITY, boundary: 1.0, profile: 0.0, detail };
        }

        let distance = (y - self.centerline_y(x)).abs() / half;
        let mut boundary = 1.0;

        if distance > EDGE_NOISE_START {
            let edge = self.cell_noise(col, row, EDGE_NOISE_OFFSET);
            boundary += (edge - 0.5) * self.edge_noise_amount;
        }

        if distance > EDGE_ROLL_START {
            let c = col as f64;
            let r = row as f64;
            if seeded_random(c, r, EDGE_ROLL_SEED) < self.edge_roll_probability {
                if seeded_random(c, r, EDGE_DIR_SEED) < 0.5 {
                    boundary += EDGE_ROLL_PUSH;
                } else {
                    boundary -= EDGE_ROLL_PUSH;
                }
            }
        }

        let inside = boundary > 0.0 && distance <= boundary;
        let profile = if inside {
            let d = distance / boundary;
            (1.0 - d * d).clamp(0.0, 1.0)
        } else {
            0.0
        };

        ArcSample { inside, distance, boundary, profile, detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape() -> ArcShape {
        ArcShape::new(&ArcConfig::default(), 1000.0, 800.0)
    }

    #[test]
    fn centerline_is_a_parabola_around_the_middle() {
        let s = shape();
        let cfg = ArcConfig::default();
        assert!((s.centerline_y(500.0) - cfg.center_fraction * 800.0).abs() < 1e-9);
        let edge = cfg.center_fraction * 800.0 + cfg.curvature * 1000.0;
        assert!((s.centerline_y(0.0) - edge).abs() < 1e-9);
        assert!((s.centerline_y(1000.0) - edge).abs() < 1e-9);
        assert!((s.centerline_y(250.0) - s.centerline_y(750.0)).abs() < 1e-9);
    }

    #[test]
    fn thickness_is_lens_shaped() {
        let s = shape();
        let base = ArcConfig::default().thickness_fraction * 800.0;
        assert!((s.nominal_thickness(500.0) - base).abs() < 1e-9);
        assert!((s.nominal_thickness(0.0) - base * 0.25).abs() < 1e-9);
        assert!(s.nominal_thickness(250.0) > s.nominal_thickness(50.0));
        // neutral noise leaves thickness untouched
        assert!((s.thickness(500.0, 0.5) - base).abs() < 1e-9);
    }

    #[test]
    fn centerline_cells_are_inside_and_far_cells_are_not() {
        let s = shape();
        let (ax, ay) = s.apex();
        let hit = s.sample(10, 10, ax, ay);
        assert!(hit.inside);
        assert!(hit.profile > 0.99);

        let miss = s.sample(10, 10, ax, ay + 700.0);
        assert!(!miss.inside);
        assert_eq!(miss.profile, 0.0);
    }

    #[test]
    fn sample_is_deterministic() {
        let s = shape();
        for col in 0..20 {
            let x = col as f64 * 50.0;
            let y = s.centerline_y(x) + 60.0;
            assert_eq!(s.sample(col, 3, x, y), s.sample(col, 3, x, y));
        }
    }

    fn shape_with_roll(probability: f64) -> ArcShape {
        let config = ArcConfig { edge_roll_probability: probability, ..ArcConfig::default() };
        ArcShape::new(&config, 1000.0, 800.0)
    }

    /// Every cell of a 30x30 patch, each sampled at rising offsets below the centerline.
    fn sweep(s: &ArcShape) -> Vec<(u32, u32, ArcSample)> {
        let mut out = Vec::new();
        for col in 0..30 {
            for row in 0..30 {
                let x = 20.0 + col as f64 * 32.0;
                for k in 0..40 {
                    let y = s.centerline_y(x) + k as f64 * 4.0;
                    out.push((col, row, s.sample(col, row, x, y)));
                }
            }
        }
        out
    }

    fn noise_term(s: &ArcShape, col: u32, row: u32) -> f64 {
        (s.cell_noise(col, row, EDGE_NOISE_OFFSET) - 0.5) * s.edge_noise_amount
    }

    #[test]
    fn core_of_the_band_keeps_the_nominal_edge() {
        let s = shape();
        let samples = sweep(&s);
        let core: Vec<_> = samples.iter().filter(|(_, _, a)| a.distance <= EDGE_NOISE_START).collect();
        assert!(!core.is_empty());
        assert!(core.iter().all(|(_, _, a)| a.boundary == 1.0));
    }

    #[test]
    fn edge_zone_boundary_follows_noise() {
        let s = shape_with_roll(0.0);
        let edge: Vec<_> = sweep(&s)
            .into_iter()
            .filter(|(_, _, a)| a.distance > EDGE_NOISE_START && a.distance.is_finite())
            .collect();
        assert!(!edge.is_empty());
        for (col, row, a) in &edge {
            assert!((a.boundary - (1.0 + noise_term(&s, *col, *row))).abs() < 1e-12);
        }
        assert!(edge.iter().any(|(_, _, a)| a.boundary > 1.0));
        assert!(edge.iter().any(|(_, _, a)| a.boundary < 1.0));
    }

    #[test]
    fn certain_roll_pushes_every_rim_cell_by_a_fixed_step() {
        let s = shape_with_roll(1.0);
        let rim: Vec<_> = sweep(&s)
            .into_iter()
            .filter(|(_, _, a)| a.distance > EDGE_ROLL_START && a.distance.is_finite())
            .collect();
        assert!(!rim.is_empty());
        for (col, row, a) in &rim {
            let push = a.boundary - 1.0 - noise_term(&s, *col, *row);
            assert!((push.abs() - EDGE_ROLL_PUSH).abs() < 1e-9, "push {push} at ({col},{row})");
        }
        // both directions show up
        assert!(rim.iter().any(|(col, row, a)| a.boundary - 1.0 - noise_term(&s, *col, *row) > 0.0));
        assert!(rim.iter().any(|(col, row, a)| a.boundary - 1.0 - noise_term(&s, *col, *row) < 0.0));
    }

    #[test]
    fn rim_roll_is_stable_across_frames() {
        let s = shape();
        let first = sweep(&s);
        assert_eq!(first, sweep(&s));
    }

    #[test]
    fn zero_height_surface_has_no_band() {
        let s = ArcShape::new(&ArcConfig::default(), 1000.0, 0.0);
        assert!(!s.sample(1, 1, 500.0, 0.0).inside);
    }
}
