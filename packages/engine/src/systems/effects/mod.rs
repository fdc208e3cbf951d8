//! Per-cell transient effects that persist across frames

pub mod sparkle;
pub mod trail;

pub use sparkle::SparkleField;
pub use trail::TrailField;
