use crate::systems::{CellPaint, Glow, Hsla};

/// Floats per record:
/// `x, y, size, radius, h, s, l, a, glow_blur, glow_l, glow_a` (CSS pixels).
/// `glow_blur == 0` means no glow; the glow shares the fill's hue and saturation.
pub const DRAW_STRIDE: usize = 11;

/// Packed per-frame draw commands, readable from JS through `as_ptr`.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    data: Vec<f32>,
    glow_count: usize,
}

/// One decoded record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawRecord {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub radius: f32,
    pub fill: Hsla,
    pub glow: Option<Glow>,
}

impl DrawList {
    pub fn with_capacity(records: usize) -> Self {
        Self { data: Vec::with_capacity(records * DRAW_STRIDE), glow_count: 0 }
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.glow_count = 0;
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.data.len() / DRAW_STRIDE
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn glow_count(&self) -> usize {
        self.glow_count
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    /// Length of the backing buffer in floats.
    pub fn float_len(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn push(&mut self, x: f64, y: f64, size: f64, radius: f64, paint: &CellPaint) {
        let f = paint.fill;
        let (blur, gl, ga) = match paint.glow {
            Some(g) => {
                self.glow_count += 1;
                (g.blur, g.color.l, g.color.a)
            }
            None => (0.0, 0.0, 0.0),
        };
        self.data.extend_from_slice(&[
            x as f32,
            y as f32,
            size as f32,
            radius as f32,
            f.h as f32,
            f.s as f32,
            f.l as f32,
            f.a as f32,
            blur as f32,
            gl as f32,
            ga as f32,
        ]);
    }

    pub fn records(&self) -> impl Iterator<Item = DrawRecord> + '_ {
        self.data.chunks_exact(DRAW_STRIDE).map(|r| {
            let fill = Hsla { h: r[4] as f64, s: r[5] as f64, l: r[6] as f64, a: r[7] as f64 };
            let glow = (r[8] > 0.0).then(|| Glow {
                blur: r[8] as f64,
                color: Hsla { l: r[9] as f64, a: r[10] as f64, ..fill },
            });
            DrawRecord { x: r[0], y: r[1], size: r[2], radius: r[3], fill, glow }
        })
    }
}
