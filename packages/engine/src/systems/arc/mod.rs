//! Arc band geometry and per-cell timing

pub mod geometry;
pub mod timing;

pub use geometry::{ArcSample, ArcShape};
pub use timing::{organic_ease, Breathing, WaveTiming, EASE_RIPPLE};
