use std::cell::RefCell;
use std::rc::Rc;

use arcfield_engine::domain::config::ScrollConfig;
use arcfield_engine::gpu::PushedGeometry;
use arcfield_engine::orchestration::{
    HijackPhase, InputDisposition, ModeController, ScrollHijack, ScrollInput, ScrollLock,
};
use arcfield_engine::{AnimationMode, BackdropConfig, GpuBackdropCore};

/// Records lock calls so the scenario can check the body is only pinned while hijacked.
#[derive(Clone, Default)]
struct SharedLock(Rc<RefCell<Vec<&'static str>>>);

impl ScrollLock for SharedLock {
    fn lock(&mut self) {
        self.0.borrow_mut().push("lock");
    }
    fn unlock(&mut self) {
        self.0.borrow_mut().push("unlock");
    }
}

#[test]
fn intro_hijack_release_and_return() {
    let lock = SharedLock::default();
    let calls = Rc::clone(&lock.0);

    let mut modes = ModeController::new(AnimationMode::Intro);
    let mut gpu = GpuBackdropCore::new(BackdropConfig::default(), 1280.0, 800.0, 1.0);
    let mut hijack = ScrollHijack::new(ScrollConfig::default(), lock);
    let geometry = PushedGeometry::default();

    // intro plays; wheel input is not hijacked yet
    let mut t = 0.0;
    let mut completed_at = None;
    while completed_at.is_none() && t < 10_000.0 {
        gpu.set_mode(modes.active());
        let out = gpu.frame(t, &geometry).expect("visible, sized backdrop");
        if out.intro_completed {
            completed_at = Some(t);
            modes.complete_intro();
            hijack.on_intro_complete(0.0);
        } else {
            assert_eq!(
                hijack.handle_input(ScrollInput::Wheel { delta_y: 100.0 }, t),
                InputDisposition::PassThrough
            );
        }
        t += 16.0;
    }
    let completed_at = completed_at.expect("intro never completed");
    assert!(completed_at >= 2_500.0);
    assert_eq!(modes.active(), AnimationMode::Idle);
    assert_eq!(hijack.phase(), HijackPhase::Hijacked);
    assert_eq!(calls.borrow().as_slice(), ["lock"]);

    // one large wheel gesture runs progress to zero: 700 * 0.0015 > 1
    let now = completed_at + 100.0;
    assert_eq!(hijack.handle_input(ScrollInput::Wheel { delta_y: 700.0 }, now), InputDisposition::Consumed);
    assert_eq!(hijack.progress(), 0.0);
    assert_eq!(hijack.phase(), HijackPhase::Releasing);

    hijack.tick(now + 399.0);
    assert_eq!(hijack.phase(), HijackPhase::Releasing);
    hijack.tick(now + 400.0);
    assert_eq!(hijack.phase(), HijackPhase::Normal);
    assert_eq!(calls.borrow().as_slice(), ["lock", "unlock"]);

    // normal page scrolling, then back to the top
    assert_eq!(hijack.handle_input(ScrollInput::Wheel { delta_y: 300.0 }, now + 500.0), InputDisposition::PassThrough);
    hijack.on_scroll(450.0);
    assert_eq!(hijack.phase(), HijackPhase::Normal);
    hijack.on_scroll(0.0);
    assert_eq!(hijack.phase(), HijackPhase::Hijacked);
    assert_eq!(hijack.progress(), 0.0);
    assert_eq!(calls.borrow().len(), 3);

    // the intro does not come back after completion
    gpu.set_mode(modes.active());
    let out = gpu.frame(t + 1_000.0, &geometry).unwrap();
    assert_eq!(out.uniforms.mode, 2.0);
    assert!(!out.intro_completed);
}

#[test]
fn page_already_scrolled_skips_the_hijack() {
    let lock = SharedLock::default();
    let calls = Rc::clone(&lock.0);
    let mut hijack = ScrollHijack::new(ScrollConfig::default(), lock);
    hijack.on_intro_complete(51.0);
    assert_eq!(hijack.phase(), HijackPhase::Normal);
    assert!(calls.borrow().is_empty());
}

#[test]
fn nested_mode_scope_overrides_and_restores() {
    let mut modes = ModeController::new(AnimationMode::Idle);
    let blog = modes.push(AnimationMode::Blog);
    assert_eq!(modes.active(), AnimationMode::Blog);
    assert!(modes.pop(blog));
    assert_eq!(modes.active(), AnimationMode::Idle);
}
