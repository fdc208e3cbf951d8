use std::f64::consts::{PI, TAU};

use crate::domain::config::{BreathingConfig, TimingConfig};
use crate::noise::smoothstep;

/// Amplitude of the sine ripple layered over the ease-out.
pub const EASE_RIPPLE: f64 = 0.02;

/// Ease-out cubic with a small decaying sine ripple.
///
/// `t <= 0 -> 0`, `t >= 1 -> 1`. The ripple can make the curve dip, but never by
/// more than [`EASE_RIPPLE`] below the plain ease-out.
pub fn organic_ease(t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let inv = 1.0 - t;
    let base = 1.0 - inv * inv * inv;
    let ripple = EASE_RIPPLE * (t * PI * 3.0).sin() * inv;
    (base + ripple).clamp(0.0, 1.0)
}

/// Wavefront timing for the intro reveal.
#[derive(Clone, Debug)]
pub struct WaveTiming {
    width: f64,
    apex: (f64, f64),
    max_distance: f64,
    draw_duration_ms: f64,
    max_wave_delay_ms: f64,
    jitter_ms: f64,
    fade_in_ms: f64,
}

impl WaveTiming {
    pub fn new(config: &TimingConfig, width: f64, height: f64, apex: (f64, f64)) -> Self {
        let max_distance = (width * 0.5).hypot(height).max(1.0);
        Self {
            width,
            apex,
            max_distance,
            draw_duration_ms: config.draw_duration_ms,
            max_wave_delay_ms: config.max_wave_delay_ms,
            jitter_ms: config.wave_jitter_ms,
            fade_in_ms: config.fade_in_ms,
        }
    }

    /// Delay grows with distance from the apex (capped) plus per-cell jitter.
    pub fn wave_delay(&self, x: f64, y: f64, seed: f64) -> f64 {
        let d = (x - self.apex.0).hypot(y - self.apex.1);
        let scaled = (d / self.max_distance * self.max_wave_delay_ms).min(self.max_wave_delay_ms);
        scaled + seed * self.jitter_ms
    }

    /// When the cell starts fading in, in ms since the draw started.
    pub fn appearance_time(&self, x: f64, y: f64, seed: f64) -> f64 {
        let sweep = if self.width > 0.0 { (x / self.width).clamp(0.0, 1.0) } else { 0.0 };
        sweep * self.draw_duration_ms + self.wave_delay(x, y, seed)
    }

    /// Smoothstepped fade over the window following `appearance`.
    pub fn fade_in(&self, elapsed: f64, appearance: f64) -> f64 {
        smoothstep((elapsed - appearance) / self.fade_in_ms)
    }
}

/// Per-cell breathing oscillator. Frequency and phase come from the cell's
/// seeds so neighbours never pulse in unison.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breathing {
    amplitude: f64,
    speed: f64,
    phase: f64,
}

impl Breathing {
    pub fn for_cell(config: &BreathingConfig, seed_a: f64, seed_b: f64) -> Self {
        let factor = config.frequency_min + (config.frequency_max - config.frequency_min) * seed_a;
        Self {
            amplitude: config.amplitude,
            speed: config.base_speed * factor,
            phase: seed_b * TAU,
        }
    }

    /// `1 + amplitude * sin(time * speed * factor + phase)`.
    #[inline]
    pub fn multiplier(&self, time_ms: f64) -> f64 {
        1.0 + self.amplitude * (time_ms * self.speed + self.phase).sin()
    }
}
