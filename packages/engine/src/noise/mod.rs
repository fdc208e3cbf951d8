//! Noise - deterministic pseudo-random primitives
//!
//! Everything here is a pure function of its inputs (no state, no allocation)
//! so a cell looks the same on every frame and in every test run.
//!
//! - hash.rs  - `seeded_random`, `smoothstep`
//! - value.rs - `value_noise_2d`, `fractal_noise`
//! - rng.rs   - xorshift32 stream for per-frame rolls

mod hash;
mod rng;
mod value;

pub use hash::{seeded_random, smoothstep, smoothstep_range};
pub use rng::Rng;
pub use value::{fractal_noise, value_noise_2d, DEFAULT_OCTAVES, DEFAULT_PERSISTENCE};
