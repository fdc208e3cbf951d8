//! Backdrop configuration
//!
//! Loaded from JSON the same way content bundles are: every section carries
//! `#[serde(default)]` so a page only has to spell out what it tunes.

use serde::{Deserialize, Serialize};

use crate::core::EngineError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// Seed for the per-frame roll stream.
    pub seed: u32,
    /// Show a static frame instead of animating.
    pub reduced_motion: bool,
    pub grid: GridConfig,
    pub arc: ArcConfig,
    pub timing: TimingConfig,
    pub breathing: BreathingConfig,
    pub sparkle: SparkleConfig,
    pub trail: TrailConfig,
    pub color: ColorConfig,
    pub gpu: GpuConfig,
    pub scroll: ScrollConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cell edge in CSS pixels.
    pub cell_size: f64,
    /// Spacing between cells in CSS pixels.
    pub gap: f64,
    /// Extra cells on every side of the viewport.
    pub margin_cells: u32,
    /// Center the grid in the viewport instead of anchoring it top-left.
    pub centered: bool,
    pub corner_radius: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { cell_size: 14.0, gap: 3.0, margin_cells: 2, centered: true, corner_radius: 2.5 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcConfig {
    pub curvature: f64,
    /// Vertical position of the arc apex as a fraction of height.
    pub center_fraction: f64,
    /// Full band thickness at the apex as a fraction of height.
    pub thickness_fraction: f64,
    /// Noise perturbation of the thickness (± fraction).
    pub thickness_variation: f64,
    /// How far noise may push the boundary in the irregular edge zone.
    pub edge_noise_amount: f64,
    /// Chance of flipping inclusion in the outermost rim.
    pub edge_roll_probability: f64,
    /// Cell coordinate to noise space multiplier.
    pub noise_scale: f64,
    pub octaves: u32,
    pub persistence: f64,
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            curvature: 0.16,
            center_fraction: 0.38,
            thickness_fraction: 0.24,
            thickness_variation: 0.25,
            edge_noise_amount: 0.35,
            edge_roll_probability: 0.5,
            noise_scale: 0.12,
            octaves: crate::noise::DEFAULT_OCTAVES,
            persistence: crate::noise::DEFAULT_PERSISTENCE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub draw_duration_ms: f64,
    pub max_wave_delay_ms: f64,
    pub wave_jitter_ms: f64,
    pub fade_in_ms: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            draw_duration_ms: 2200.0,
            max_wave_delay_ms: 600.0,
            wave_jitter_ms: 120.0,
            fade_in_ms: 300.0,
        }
    }
}

impl TimingConfig {
    /// Time until the last cell can have finished fading in.
    pub fn total_draw_ms(&self) -> f64 {
        self.draw_duration_ms + self.max_wave_delay_ms + self.wave_jitter_ms + self.fade_in_ms
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathingConfig {
    pub amplitude: f64,
    /// Radians per millisecond before the per-cell factor.
    pub base_speed: f64,
    pub frequency_min: f64,
    pub frequency_max: f64,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self { amplitude: 0.12, base_speed: 0.0015, frequency_min: 0.7, frequency_max: 1.3 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkleConfig {
    /// Base per-cell per-frame trigger chance.
    pub probability: f64,
    pub duration_ms: f64,
    /// Fraction of the duration spent ramping up.
    pub attack_fraction: f64,
    pub intensity_boost: f64,
    /// Hue degrees added at the envelope peak.
    pub hue_shift: f64,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            probability: 0.0008,
            duration_ms: 150.0,
            attack_fraction: 0.3,
            intensity_boost: 0.6,
            hue_shift: 18.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub min_factor: f64,
    pub max_factor: f64,
    /// Entries untouched for this long are dropped.
    pub prune_horizon_ms: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self { min_factor: 0.88, max_factor: 0.95, prune_horizon_ms: 4000.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub base_hue: f64,
    pub hue_variation: f64,
    pub saturation_min: f64,
    pub saturation_max: f64,
    pub lightness_min: f64,
    pub lightness_max: f64,
    pub glow_threshold: f64,
    pub glow_blur: f64,
    /// Cells dimmer than this are not drawn.
    pub intensity_threshold: f64,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            base_hue: 214.0,
            hue_variation: 16.0,
            saturation_min: 55.0,
            saturation_max: 90.0,
            lightness_min: 30.0,
            lightness_max: 68.0,
            glow_threshold: 0.75,
            glow_blur: 12.0,
            intensity_threshold: 0.02,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuConfig {
    pub intro_duration_ms: f64,
    /// One-shot geometry re-polls after mount, in ms.
    pub geometry_retry_ms: Vec<f64>,
    pub process_selector: String,
    pub card_selector: String,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            intro_duration_ms: 2500.0,
            geometry_retry_ms: vec![100.0, 500.0, 1500.0],
            process_selector: "[data-backdrop=\"process\"]".to_string(),
            card_selector: "[data-backdrop=\"solution-card\"]".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub sensitivity: f64,
    pub release_delay_ms: f64,
    /// `scroll_y` at or below this counts as "top of page".
    pub top_threshold_px: f64,
    /// Already scrolled past this when the intro ends: skip the hijack.
    pub skip_threshold_px: f64,
    pub line_step_px: f64,
    pub page_step_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.0015,
            release_delay_ms: 400.0,
            top_threshold_px: 5.0,
            skip_threshold_px: 50.0,
            line_step_px: 100.0,
            page_step_px: 600.0,
        }
    }
}

impl BackdropConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: BackdropConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse `json` when present, otherwise use defaults.
    pub fn from_optional_json(json: Option<&str>) -> Result<Self, EngineError> {
        match json {
            Some(s) if !s.trim().is_empty() => Self::from_json(s),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.grid.cell_size > 0.0) {
            return Err(EngineError::value("grid.cell_size", "must be > 0"));
        }
        if self.grid.gap < 0.0 {
            return Err(EngineError::value("grid.gap", "must be >= 0"));
        }
        if self.arc.octaves == 0 {
            return Err(EngineError::value("arc.octaves", "must be >= 1"));
        }
        if !(0.0..=1.0).contains(&self.arc.persistence) {
            return Err(EngineError::value("arc.persistence", "must be within [0, 1]"));
        }
        if !(self.timing.draw_duration_ms > 0.0) {
            return Err(EngineError::value("timing.draw_duration_ms", "must be > 0"));
        }
        if !(self.timing.fade_in_ms > 0.0) {
            return Err(EngineError::value("timing.fade_in_ms", "must be > 0"));
        }
        if !(self.sparkle.duration_ms > 0.0) {
            return Err(EngineError::value("sparkle.duration_ms", "must be > 0"));
        }
        if !(0.0..1.0).contains(&self.sparkle.attack_fraction) {
            return Err(EngineError::value("sparkle.attack_fraction", "must be within [0, 1)"));
        }
        let t = &self.trail;
        if !(t.min_factor > 0.0 && t.max_factor < 1.0 && t.min_factor <= t.max_factor) {
            return Err(EngineError::value(
                "trail",
                format!("factor range [{}, {}] must sit inside (0, 1)", t.min_factor, t.max_factor),
            ));
        }
        if self.breathing.frequency_min > self.breathing.frequency_max {
            return Err(EngineError::value("breathing.frequency_min", "must be <= frequency_max"));
        }
        if !(self.gpu.intro_duration_ms > 0.0) {
            return Err(EngineError::value("gpu.intro_duration_ms", "must be > 0"));
        }
        if self.scroll.sensitivity <= 0.0 {
            return Err(EngineError::value("scroll.sensitivity", "must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        BackdropConfig::default().validate().expect("defaults must be valid");
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = BackdropConfig::from_json(r#"{ "seed": 7, "sparkle": { "duration_ms": 200 } }"#)
            .expect("parse");
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.sparkle.duration_ms, 200.0);
        assert_eq!(cfg.sparkle.attack_fraction, SparkleConfig::default().attack_fraction);
        assert_eq!(cfg.grid, GridConfig::default());
    }

    #[test]
    fn rejects_bad_trail_range() {
        let err = BackdropConfig::from_json(r#"{ "trail": { "min_factor": 0.9, "max_factor": 1.2 } }"#)
            .unwrap_err();
        assert!(matches!(err, EngineError::ConfigValue { field: "trail", .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = BackdropConfig::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, EngineError::ConfigParse(_)));
    }

    #[test]
    fn empty_optional_json_is_default() {
        assert_eq!(BackdropConfig::from_optional_json(Some("  ")).unwrap(), BackdropConfig::default());
        assert_eq!(BackdropConfig::from_optional_json(None).unwrap(), BackdropConfig::default());
    }
}
