use crate::domain::AnimationMode;

/// Handle returned by [`ModeController::push`]; give it back to `pop` when the
/// scope that pushed the override goes away.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping the token leaves the override on the stack forever"]
pub struct ScopeToken(u64);

#[derive(Clone, Copy, Debug)]
struct Scope {
    id: u64,
    mode: AnimationMode,
}

/// Owns the animation mode.
///
/// Nested views override the mode by pushing a scope and restore the parent's
/// mode by popping it; the active mode is always the innermost scope, or the
/// root when none is open. The root itself can only be replaced, never popped.
#[derive(Debug)]
pub struct ModeController {
    root: AnimationMode,
    scopes: Vec<Scope>,
    next_id: u64,
    intro_done: bool,
}

impl ModeController {
    pub fn new(root: AnimationMode) -> Self {
        Self { root, scopes: Vec::new(), next_id: 1, intro_done: false }
    }

    pub fn active(&self) -> AnimationMode {
        self.scopes.last().map_or(self.root, |s| s.mode)
    }

    pub fn root(&self) -> AnimationMode {
        self.root
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn intro_done(&self) -> bool {
        self.intro_done
    }

    /// Once the intro has played, later intro requests resolve to idle.
    fn resolve(&self, mode: AnimationMode) -> AnimationMode {
        if mode == AnimationMode::Intro && self.intro_done {
            AnimationMode::Idle
        } else {
            mode
        }
    }

    pub fn push(&mut self, mode: AnimationMode) -> ScopeToken {
        let before = self.active();
        let id = self.next_id;
        self.next_id += 1;
        self.scopes.push(Scope { id, mode: self.resolve(mode) });
        self.log_change(before);
        ScopeToken(id)
    }

    /// Close a scope. Scopes may close out of order; closing one that is not
    /// innermost leaves the active mode alone. Returns `false` for a token that
    /// is no longer open.
    pub fn pop(&mut self, token: ScopeToken) -> bool {
        let before = self.active();
        let Some(pos) = self.scopes.iter().position(|s| s.id == token.0) else {
            return false;
        };
        self.scopes.remove(pos);
        self.log_change(before);
        true
    }

    /// Explicit reset: replaces the root, closes every scope and lets the
    /// intro play again.
    pub fn set_root(&mut self, mode: AnimationMode) {
        let before = self.active();
        self.scopes.clear();
        self.intro_done = false;
        self.root = mode;
        self.log_change(before);
    }

    /// The intro finished: the active intro becomes idle. Happens at most once
    /// until the next `set_root`. Returns `true` when the switch happened.
    pub fn complete_intro(&mut self) -> bool {
        if self.intro_done || self.active() != AnimationMode::Intro {
            return false;
        }
        self.intro_done = true;
        match self.scopes.last_mut() {
            Some(top) => top.mode = AnimationMode::Idle,
            None => self.root = AnimationMode::Idle,
        }
        log::info!("mode: intro -> idle");
        true
    }

    /// Convenience for frame drivers: completes the intro once `progress` hits 1.
    pub fn on_intro_progress(&mut self, progress: f64) -> bool {
        progress >= 1.0 && self.complete_intro()
    }

    fn log_change(&self, before: AnimationMode) {
        let after = self.active();
        if after != before {
            log::debug!("mode: {} -> {}", before.as_str(), after.as_str());
        }
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new(AnimationMode::None)
    }
}
