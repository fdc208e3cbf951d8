//! Orchestration - mode scoping, scroll hijack, timers
//!
//! Everything here is plain state machines fed with timestamps and events; the
//! browser wiring lives in `web`.

pub mod mode_controller;
pub mod scroll;
pub mod timers;

pub use mode_controller::{ModeController, ScopeToken};
pub use scroll::{HijackPhase, InputDisposition, NoopLock, ScrollHijack, ScrollInput, ScrollKey, ScrollLock};
pub use timers::{Deadline, PausableClock, RetrySchedule};
