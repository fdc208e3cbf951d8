//! Core - crate-wide plumbing shared by every renderer
//!
//! - error.rs   - `EngineError`, the only error type the engine defines
//! - logging.rs - logger installation (`wasm_logger` in the page, `env_logger` on the host)

pub mod error;
pub mod logging;

pub use error::EngineError;
