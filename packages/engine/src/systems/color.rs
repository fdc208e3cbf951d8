//! Cell color - HSL around a fixed blue, nudged by noise and sparkles

use crate::domain::config::{ColorConfig, SparkleConfig};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    /// Degrees.
    pub h: f64,
    /// Percent.
    pub s: f64,
    /// Percent.
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    /// CSS color string for Canvas2D fill/shadow styles.
    pub fn to_css(&self) -> String {
        format!("hsla({:.1}, {:.1}%, {:.1}%, {:.3})", self.h, self.s, self.l, self.a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub blur: f64,
    pub color: Hsla,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPaint {
    pub fill: Hsla,
    pub glow: Option<Glow>,
}

/// Texture inputs for one cell, all in `[0, 1)` except `sparkle` (envelope, 0 when idle).
#[derive(Clone, Copy, Debug, Default)]
pub struct ShadeInput {
    pub intensity: f64,
    pub hue_noise: f64,
    pub detail_noise: f64,
    pub sparkle: f64,
}

pub struct Palette {
    color: ColorConfig,
    sparkle_hue_shift: f64,
}

impl Palette {
    pub fn new(color: &ColorConfig, sparkle: &SparkleConfig) -> Self {
        Self { color: color.clone(), sparkle_hue_shift: sparkle.hue_shift }
    }

    #[inline]
    pub fn intensity_threshold(&self) -> f64 {
        self.color.intensity_threshold
    }

    pub fn shade(&self, input: ShadeInput) -> CellPaint {
        let c = &self.color;
        let i = input.intensity.clamp(0.0, 1.0);
        let spark = input.sparkle.clamp(0.0, 1.0);

        let hue = c.base_hue
            + (input.hue_noise - 0.5) * c.hue_variation
            + spark * self.sparkle_hue_shift;
        let sat = c.saturation_min
            + (c.saturation_max - c.saturation_min) * i
            + (input.detail_noise - 0.5) * 8.0
            + spark * 10.0;
        let light = c.lightness_min
            + (c.lightness_max - c.lightness_min) * i
            + (input.detail_noise - 0.5) * 6.0
            + spark * 15.0;

        let fill = Hsla {
            h: hue.rem_euclid(360.0),
            s: sat.clamp(0.0, 100.0),
            l: light.clamp(0.0, 100.0),
            a: i,
        };

        let glow = (i > c.glow_threshold || spark > 0.0).then(|| Glow {
            blur: c.glow_blur * i + spark * c.glow_blur * 0.5,
            color: Hsla {
                l: (fill.l + 12.0).min(100.0),
                a: (0.6 * i + 0.3 * spark).min(1.0),
                ..fill
            },
        });

        CellPaint { fill, glow }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        Palette::new(&ColorConfig::default(), &SparkleConfig::default())
    }

    #[test]
    fn neutral_noise_keeps_base_hue() {
        let p = palette().shade(ShadeInput { intensity: 0.5, hue_noise: 0.5, detail_noise: 0.5, sparkle: 0.0 });
        assert!((p.fill.h - 214.0).abs() < 1e-9);
        assert_eq!(p.fill.a, 0.5);
        assert!(p.glow.is_none());
    }

    #[test]
    fn bright_or_sparkling_cells_glow() {
        let pal = palette();
        let bright = pal.shade(ShadeInput { intensity: 0.9, hue_noise: 0.5, detail_noise: 0.5, sparkle: 0.0 });
        assert!(bright.glow.is_some());

        let spark = pal.shade(ShadeInput { intensity: 0.3, hue_noise: 0.5, detail_noise: 0.5, sparkle: 1.0 });
        let glow = spark.glow.expect("sparkles glow");
        assert!(glow.blur > 0.0);
        assert!(spark.fill.h > 214.0);
    }

    #[test]
    fn saturation_and_lightness_rise_with_intensity() {
        let pal = palette();
        let dim = pal.shade(ShadeInput { intensity: 0.1, hue_noise: 0.5, detail_noise: 0.5, sparkle: 0.0 });
        let lit = pal.shade(ShadeInput { intensity: 0.7, hue_noise: 0.5, detail_noise: 0.5, sparkle: 0.0 });
        assert!(lit.fill.s > dim.fill.s);
        assert!(lit.fill.l > dim.fill.l);
    }

    #[test]
    fn css_string_format() {
        let c = Hsla { h: 214.0, s: 80.0, l: 50.0, a: 0.5 };
        assert_eq!(c.to_css(), "hsla(214.0, 80.0%, 50.0%, 0.500)");
    }
}
