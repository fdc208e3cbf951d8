//! Domain - configuration and the animation-mode vocabulary

pub mod config;
pub mod mode;

pub use config::BackdropConfig;
pub use mode::AnimationMode;
