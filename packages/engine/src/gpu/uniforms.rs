use crate::domain::AnimationMode;

/// Values written to the shader every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UniformSet {
    /// Seconds since the backdrop started (paused time excluded).
    pub time: f32,
    /// Intro ramp, 0..1 over the intro duration.
    pub progress: f32,
    /// 0..1 over one viewport height of scrolling.
    pub scroll_progress: f32,
    /// See [`AnimationMode::shader_code`].
    pub mode: f32,
    pub resolution: [f32; 2],
    pub cell_size: f32,
    pub pixel_ratio: f32,
    /// x, y, w, h in CSS pixels; all zero when the region is not on the page.
    pub process_rect: [f32; 4],
    pub card_rect: [f32; 4],
    /// Hovered item, -1 for none.
    pub hover_index: f32,
    pub hover_prev_index: f32,
    /// `time` at the last hover change, seconds.
    pub hover_change_time: f32,
    pub reduced_motion: f32,
}

/// Number of floats in [`UniformSet::to_array`].
pub const UNIFORM_FLOATS: usize = 20;

impl UniformSet {
    /// Flat layout for JS, in declaration order.
    pub fn to_array(&self) -> [f32; UNIFORM_FLOATS] {
        let p = self.process_rect;
        let c = self.card_rect;
        [
            self.time,
            self.progress,
            self.scroll_progress,
            self.mode,
            self.resolution[0],
            self.resolution[1],
            self.cell_size,
            self.pixel_ratio,
            p[0], p[1], p[2], p[3],
            c[0], c[1], c[2], c[3],
            self.hover_index,
            self.hover_prev_index,
            self.hover_change_time,
            self.reduced_motion,
        ]
    }
}

/// Tracks whether the intro ramp has finished for the current intro run.
///
/// Flips to complete exactly once per run and never back while the mode
/// stays `Intro`; a new run starts only when the mode re-enters `Intro`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntroLatch {
    complete: bool,
}

impl IntroLatch {
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Returns `true` on the frame the latch flips.
    pub fn update(&mut self, mode: AnimationMode, ramp_done: bool) -> bool {
        if mode == AnimationMode::Intro && ramp_done && !self.complete {
            self.complete = true;
            return true;
        }
        false
    }

    pub fn on_mode_change(&mut self, old: AnimationMode, new: AnimationMode) {
        if new == AnimationMode::Intro && old != AnimationMode::Intro {
            self.complete = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_flips_exactly_once() {
        let mut latch = IntroLatch::default();
        let mut flips = 0;
        for frame in 0..100 {
            let done = frame >= 40;
            if latch.update(AnimationMode::Intro, done) {
                flips += 1;
            }
            assert_eq!(latch.is_complete(), done);
        }
        assert_eq!(flips, 1);
        // a later "not done" reading does not reopen it
        latch.update(AnimationMode::Intro, false);
        assert!(latch.is_complete());
    }

    #[test]
    fn latch_ignores_other_modes_and_rearms_on_reentry() {
        let mut latch = IntroLatch::default();
        assert!(!latch.update(AnimationMode::Idle, true));
        assert!(latch.update(AnimationMode::Intro, true));
        latch.on_mode_change(AnimationMode::Intro, AnimationMode::Intro);
        assert!(latch.is_complete());
        latch.on_mode_change(AnimationMode::Intro, AnimationMode::Blog);
        assert!(latch.is_complete());
        latch.on_mode_change(AnimationMode::Blog, AnimationMode::Intro);
        assert!(!latch.is_complete());
    }

    #[test]
    fn array_layout() {
        let u = UniformSet {
            time: 1.0,
            mode: 2.0,
            process_rect: [1.0, 2.0, 3.0, 4.0],
            hover_index: -1.0,
            ..UniformSet::default()
        };
        let a = u.to_array();
        assert_eq!(a.len(), UNIFORM_FLOATS);
        assert_eq!(a[0], 1.0);
        assert_eq!(a[3], 2.0);
        assert_eq!(&a[8..12], &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a[16], -1.0);
    }
}
