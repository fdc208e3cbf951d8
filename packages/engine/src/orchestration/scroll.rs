//! Scroll hijack
//!
//! After the intro, the first stretch of scrolling drives the hero animation
//! instead of the page: input is consumed and mapped onto `progress`, and the
//! page only starts moving once progress has run down to zero and a short
//! release delay has passed.
//!
//! ```text
//!  Intro --(intro done, at top)--> Hijacked --(progress 0)--> Releasing
//!    |                               ^                           |
//!    +--(already scrolled)--> Normal +----(back at top)---- Normal <-(delay)
//! ```

use crate::domain::config::ScrollConfig;

use super::timers::Deadline;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HijackPhase {
    Intro,
    Hijacked,
    Releasing,
    Normal,
}

impl HijackPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            HijackPhase::Intro => "intro",
            HijackPhase::Hijacked => "hijacked",
            HijackPhase::Releasing => "releasing",
            HijackPhase::Normal => "normal",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollKey {
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Space,
    Home,
    End,
}

impl ScrollKey {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "ArrowUp" => ScrollKey::ArrowUp,
            "ArrowDown" => ScrollKey::ArrowDown,
            "PageUp" => ScrollKey::PageUp,
            "PageDown" => ScrollKey::PageDown,
            " " | "Spacebar" => ScrollKey::Space,
            "Home" => ScrollKey::Home,
            "End" => ScrollKey::End,
            _ => return None,
        })
    }
}

/// Positive `delta_y` scrolls down, as in `WheelEvent.deltaY`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollInput {
    Wheel { delta_y: f64 },
    Touch { delta_y: f64 },
    Key(ScrollKey),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputDisposition {
    /// The default scroll must be suppressed.
    Consumed,
    PassThrough,
}

/// Freezes page scrolling while hijacked.
pub trait ScrollLock {
    /// Stop the page from scrolling, remembering where it was.
    fn lock(&mut self);
    /// Undo `lock` and return the page to the remembered offset.
    fn unlock(&mut self);
}

/// For hosts that block scrolling some other way.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLock;

impl ScrollLock for NoopLock {
    fn lock(&mut self) {}
    fn unlock(&mut self) {}
}

pub struct ScrollHijack<L: ScrollLock> {
    config: ScrollConfig,
    phase: HijackPhase,
    progress: f64,
    release: Deadline,
    lock: L,
    locked: bool,
}

impl<L: ScrollLock> ScrollHijack<L> {
    pub fn new(config: ScrollConfig, lock: L) -> Self {
        Self { config, phase: HijackPhase::Intro, progress: 1.0, release: Deadline::default(), lock, locked: false }
    }

    pub fn phase(&self) -> HijackPhase { self.phase }

    /// 1 = hero fully shown, 0 = ready to hand scrolling back to the page.
    pub fn progress(&self) -> f64 { self.progress }

    pub fn is_locked(&self) -> bool { self.locked }

    pub fn lock(&self) -> &L { &self.lock }

    fn enter(&mut self, phase: HijackPhase) {
        if phase == self.phase {
            return;
        }
        log::debug!("scroll: {} -> {}", self.phase.as_str(), phase.as_str());
        self.phase = phase;
        match (phase == HijackPhase::Hijacked, self.locked) {
            (true, false) => {
                self.lock.lock();
                self.locked = true;
            }
            (false, true) => {
                self.lock.unlock();
                self.locked = false;
            }
            _ => {}
        }
    }

    /// Called once when the intro animation finishes.
    pub fn on_intro_complete(&mut self, scroll_y: f64) {
        if self.phase != HijackPhase::Intro {
            return;
        }
        if scroll_y > self.config.skip_threshold_px {
            self.enter(HijackPhase::Normal);
        } else {
            self.progress = 1.0;
            self.enter(HijackPhase::Hijacked);
        }
    }

    fn key_delta(&self, key: ScrollKey) -> Option<f64> {
        let c = &self.config;
        match key {
            ScrollKey::ArrowDown => Some(c.line_step_px),
            ScrollKey::ArrowUp => Some(-c.line_step_px),
            ScrollKey::PageDown | ScrollKey::Space => Some(c.page_step_px),
            ScrollKey::PageUp => Some(-c.page_step_px),
            ScrollKey::Home | ScrollKey::End => None,
        }
    }

    /// Feed one input event. Only consumed while hijacked.
    pub fn handle_input(&mut self, input: ScrollInput, now_ms: f64) -> InputDisposition {
        if self.phase != HijackPhase::Hijacked {
            return InputDisposition::PassThrough;
        }

        self.progress = match input {
            ScrollInput::Wheel { delta_y } | ScrollInput::Touch { delta_y } => {
                self.progress - delta_y * self.config.sensitivity
            }
            ScrollInput::Key(ScrollKey::Home) => 1.0,
            ScrollInput::Key(ScrollKey::End) => 0.0,
            ScrollInput::Key(key) => {
                let delta = self.key_delta(key).unwrap_or(0.0);
                self.progress - delta * self.config.sensitivity
            }
        }
        .clamp(0.0, 1.0);

        if self.progress <= 0.0 {
            self.enter(HijackPhase::Releasing);
            self.release.schedule(now_ms, self.config.release_delay_ms);
        }
        InputDisposition::Consumed
    }

    /// Drive the timed release.
    pub fn tick(&mut self, now_ms: f64) {
        if self.phase == HijackPhase::Releasing && self.release.take_due(now_ms) {
            self.enter(HijackPhase::Normal);
        }
    }

    /// Page scroll position changed.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        if self.phase == HijackPhase::Normal && scroll_y <= self.config.top_threshold_px {
            self.progress = 0.0;
            self.enter(HijackPhase::Hijacked);
        }
    }

    /// Drop the lock; used on teardown.
    pub fn release_now(&mut self) {
        self.release.cancel();
        self.enter(HijackPhase::Normal);
    }
}
