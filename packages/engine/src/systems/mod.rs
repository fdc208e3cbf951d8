//! Systems - per-cell derived quantities
//!
//! Pure (or lightly stateful) functions of cell coordinates and time. Both
//! renderers build on these; neither owns them.

pub mod arc;
pub mod color;
pub mod effects;

pub use arc::{organic_ease, ArcSample, ArcShape, Breathing, WaveTiming};
pub use color::{CellPaint, Glow, Hsla, Palette, ShadeInput};
pub use effects::{SparkleField, TrailField};
