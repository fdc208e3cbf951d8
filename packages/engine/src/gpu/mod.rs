//! GPU backdrop - instanced grid driven by uniforms
//!
//! The CPU side does very little per frame: it builds the per-instance
//! attribute arrays when the grid layout changes and produces a
//! [`UniformSet`] each frame. All per-cell evaluation happens in the shader
//! (`shaders::FRAGMENT_SRC`).

mod facade;
pub mod geometry;
pub mod hover;
pub mod instances;
pub mod shaders;
pub mod uniforms;

pub use facade::GpuBackdrop;
pub use geometry::{GeometryBridge, GeometryProvider, PushedGeometry, Rect, TrackedRegion};
pub use hover::HoverTracker;
pub use instances::InstanceBuffers;
pub use uniforms::{IntroLatch, UniformSet, UNIFORM_FLOATS};

use crate::domain::{AnimationMode, BackdropConfig};
use crate::orchestration::timers::PausableClock;
use crate::spatial::CellGrid;

/// What one call to [`GpuBackdropCore::frame`] produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutcome {
    pub uniforms: UniformSet,
    /// Set on the single frame where the intro ramp finished.
    pub intro_completed: bool,
}

pub struct GpuBackdropCore {
    config: BackdropConfig,
    grid: CellGrid,
    instances: InstanceBuffers,
    instances_version: u32,
    device_pixel_ratio: f64,

    mode: AnimationMode,
    latch: IntroLatch,
    // Elapsed clock time at which the current intro run started
    intro_origin: Option<f64>,

    clock: PausableClock,
    visible: bool,
    // Sources combined into `visible` by the browser driver
    on_screen: bool,
    tab_hidden: bool,
    reduced_motion: bool,

    scroll_y: f64,
    geometry: GeometryBridge,
    hover: HoverTracker,
}

impl GpuBackdropCore {
    pub fn new(config: BackdropConfig, width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        let grid = CellGrid::new(&config.grid, width, height);
        let instances = InstanceBuffers::build(&grid);
        let geometry = GeometryBridge::new(&config.gpu.geometry_retry_ms);
        let reduced_motion = config.reduced_motion;
        log::debug!("gpu backdrop: {}x{} grid, {} instances", grid.cols(), grid.rows(), instances.len());
        Self {
            config,
            grid,
            instances,
            instances_version: 1,
            device_pixel_ratio: crate::simulation::sanitize_dpr(device_pixel_ratio),
            mode: AnimationMode::None,
            latch: IntroLatch::default(),
            intro_origin: None,
            clock: PausableClock::default(),
            visible: true,
            on_screen: true,
            tab_hidden: false,
            reduced_motion,
            scroll_y: 0.0,
            geometry,
            hover: HoverTracker::default(),
        }
    }

    pub fn grid(&self) -> &CellGrid { &self.grid }

    pub fn instances(&self) -> &InstanceBuffers { &self.instances }

    /// Bumped every time the instance arrays are rebuilt.
    pub fn instances_version(&self) -> u32 { self.instances_version }

    pub fn mode(&self) -> AnimationMode { self.mode }

    pub fn intro_complete(&self) -> bool { self.latch.is_complete() }

    pub fn is_visible(&self) -> bool { self.visible }

    pub fn geometry(&self) -> &GeometryBridge { &self.geometry }

    pub fn hover(&self) -> &HoverTracker { &self.hover }

    /// Returns `true` when the instance arrays were rebuilt: the grid
    /// dimensions changed, or a centered grid's origin moved with the viewport.
    pub fn resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64) -> bool {
        self.device_pixel_ratio = crate::simulation::sanitize_dpr(device_pixel_ratio);
        self.geometry.invalidate();
        let origin = self.grid.origin();
        let rebuilt = self.grid.resize(width, height);
        if !rebuilt && origin == self.grid.origin() {
            return false;
        }
        self.instances = InstanceBuffers::build(&self.grid);
        self.instances_version = self.instances_version.wrapping_add(1);
        log::debug!(
            "gpu backdrop: rebuilt {}x{} instances (v{})",
            self.grid.cols(),
            self.grid.rows(),
            self.instances_version
        );
        true
    }

    pub fn set_mode(&mut self, mode: AnimationMode) {
        if mode == self.mode {
            return;
        }
        log::debug!("gpu backdrop: mode {} -> {}", self.mode.as_str(), mode.as_str());
        self.latch.on_mode_change(self.mode, mode);
        if mode == AnimationMode::Intro {
            self.intro_origin = None;
        }
        self.mode = mode;
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn set_scroll(&mut self, scroll_y: f64) {
        self.scroll_y = if scroll_y.is_finite() { scroll_y.max(0.0) } else { 0.0 };
        self.geometry.invalidate();
    }

    /// Off-screen pauses the clock; nothing is produced until visible again.
    pub fn set_visible(&mut self, visible: bool, now_ms: f64) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        if visible {
            self.clock.resume(now_ms);
        } else {
            self.clock.pause(now_ms);
        }
        log::debug!("gpu backdrop: {}", if visible { "resumed" } else { "paused" });
    }

    /// Canvas entered or left the viewport. Returns whether the backdrop is
    /// now visible.
    pub fn set_on_screen(&mut self, on_screen: bool, now_ms: f64) -> bool {
        self.on_screen = on_screen;
        self.sync_visibility(now_ms)
    }

    /// Page tab hidden or shown. Returns whether the backdrop is now visible.
    pub fn set_tab_hidden(&mut self, hidden: bool, now_ms: f64) -> bool {
        self.tab_hidden = hidden;
        self.sync_visibility(now_ms)
    }

    fn sync_visibility(&mut self, now_ms: f64) -> bool {
        let visible = self.on_screen && !self.tab_hidden;
        self.set_visible(visible, now_ms);
        visible
    }

    /// `index < 0` clears the hover.
    pub fn set_hovered(&mut self, index: i32, now_ms: f64) -> bool {
        let time_s = self.clock.elapsed(now_ms) / 1000.0;
        self.hover.set_hovered(index, time_s)
    }

    /// A tracked region moved or (un)mounted; re-poll on the next frame.
    pub fn geometry_changed(&mut self) {
        self.geometry.invalidate();
    }

    /// Arm the delayed geometry retries.
    pub fn mount(&mut self, now_ms: f64) {
        self.geometry.mount(now_ms);
    }

    pub fn unmount(&mut self) {
        self.geometry.unmount();
    }

    /// Intro ramp for the current mode at clock time `elapsed_ms`.
    fn progress(&mut self, elapsed_ms: f64) -> f64 {
        match self.mode {
            AnimationMode::None => 0.0,
            AnimationMode::Idle | AnimationMode::Blog => 1.0,
            AnimationMode::Intro => {
                if self.reduced_motion || self.latch.is_complete() {
                    return 1.0;
                }
                let origin = *self.intro_origin.get_or_insert(elapsed_ms);
                ((elapsed_ms - origin) / self.config.gpu.intro_duration_ms).clamp(0.0, 1.0)
            }
        }
    }

    /// Produce this frame's uniforms, or `None` while paused or sizeless.
    pub fn frame(&mut self, now_ms: f64, provider: &dyn GeometryProvider) -> Option<FrameOutcome> {
        if !self.visible || self.grid.is_empty() {
            return None;
        }
        self.clock.start_if_needed(now_ms);
        let elapsed = self.clock.elapsed(now_ms);

        let progress = self.progress(elapsed);
        let intro_completed = self.latch.update(self.mode, progress >= 1.0);
        if intro_completed {
            log::info!("gpu backdrop: intro complete");
        }

        self.geometry.poll(provider, now_ms);

        let viewport = self.grid.height();
        let scroll_progress = if viewport > 0.0 { (self.scroll_y / viewport).clamp(0.0, 1.0) } else { 0.0 };

        let uniforms = UniformSet {
            time: (elapsed / 1000.0) as f32,
            progress: progress as f32,
            scroll_progress: scroll_progress as f32,
            mode: self.mode.shader_code(self.latch.is_complete()),
            resolution: [self.grid.width() as f32, self.grid.height() as f32],
            cell_size: self.grid.cell_size() as f32,
            pixel_ratio: self.device_pixel_ratio as f32,
            process_rect: self.geometry.uniform(TrackedRegion::ProcessSection),
            card_rect: self.geometry.uniform(TrackedRegion::SolutionCard),
            hover_index: self.hover.current() as f32,
            hover_prev_index: self.hover.previous() as f32,
            hover_change_time: self.hover.changed_at() as f32,
            reduced_motion: if self.reduced_motion { 1.0 } else { 0.0 },
        };
        Some(FrameOutcome { uniforms, intro_completed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core() -> GpuBackdropCore {
        GpuBackdropCore::new(BackdropConfig::default(), 800.0, 600.0, 1.0)
    }

    #[test]
    fn intro_latch_flips_once_past_the_duration() {
        let mut gpu = core();
        let none = PushedGeometry::default();
        gpu.set_mode(AnimationMode::Intro);

        let mut flips = 0;
        let mut t = 0.0;
        while t <= 6_000.0 {
            let out = gpu.frame(t, &none).unwrap();
            if out.intro_completed {
                flips += 1;
                assert!(t >= 2_500.0);
            }
            if t >= 2_500.0 {
                assert_eq!(out.uniforms.mode, 1.5);
                assert_eq!(out.uniforms.progress, 1.0);
            } else {
                assert_eq!(out.uniforms.mode, 1.0);
            }
            t += 16.0;
        }
        assert_eq!(flips, 1);
        assert!(gpu.intro_complete());
    }

    #[test]
    fn intro_ramp_starts_when_the_mode_is_entered() {
        let mut gpu = core();
        let none = PushedGeometry::default();
        gpu.set_mode(AnimationMode::Idle);
        gpu.frame(0.0, &none);
        gpu.frame(5_000.0, &none);
        gpu.set_mode(AnimationMode::Intro);
        let out = gpu.frame(5_000.0, &none).unwrap();
        assert_eq!(out.uniforms.progress, 0.0);
        let out = gpu.frame(6_250.0, &none).unwrap();
        assert!((out.uniforms.progress - 0.5).abs() < 1e-6);
    }

    #[test]
    fn hidden_backdrop_produces_nothing_and_keeps_time() {
        let mut gpu = core();
        let none = PushedGeometry::default();
        gpu.set_mode(AnimationMode::Idle);
        gpu.frame(0.0, &none);
        gpu.set_visible(false, 1_000.0);
        assert!(gpu.frame(5_000.0, &none).is_none());
        gpu.set_visible(true, 9_000.0);
        let out = gpu.frame(9_500.0, &none).unwrap();
        assert!((out.uniforms.time - 1.5).abs() < 1e-6);
    }

    #[test]
    fn off_screen_or_hidden_tab_pauses_until_both_clear() {
        let mut gpu = core();
        let none = PushedGeometry::default();
        gpu.set_mode(AnimationMode::Idle);
        gpu.frame(0.0, &none);

        assert!(!gpu.set_on_screen(false, 1_000.0));
        assert!(!gpu.set_tab_hidden(true, 2_000.0));
        // back in the viewport, but the tab is still hidden
        assert!(!gpu.set_on_screen(true, 3_000.0));
        assert!(gpu.frame(3_500.0, &none).is_none());

        assert!(gpu.set_tab_hidden(false, 6_000.0));
        let out = gpu.frame(6_500.0, &none).unwrap();
        // only the 1s on screen before scrolling away plus 0.5s since
        assert!((out.uniforms.time - 1.5).abs() < 1e-6);
    }

    #[test]
    fn zero_size_defers_frames() {
        let mut gpu = GpuBackdropCore::new(BackdropConfig::default(), 0.0, 0.0, 1.0);
        assert!(gpu.frame(0.0, &PushedGeometry::default()).is_none());
        assert!(gpu.resize(640.0, 480.0, 2.0));
        assert!(gpu.frame(16.0, &PushedGeometry::default()).is_some());
    }

    #[test]
    fn resize_rebuilds_instances_only_when_layout_changes() {
        let mut gpu = core();
        let v = gpu.instances_version();
        assert!(!gpu.resize(800.0, 600.0, 2.0));
        assert_eq!(gpu.instances_version(), v);
        assert!(gpu.resize(1600.0, 900.0, 1.0));
        assert_eq!(gpu.instances().len(), gpu.grid().count());
        assert_ne!(gpu.instances_version(), v);
    }

    #[test]
    fn centered_resize_at_same_dimensions_moves_offsets() {
        let mut gpu = core();
        let (cols, rows) = (gpu.grid().cols(), gpu.grid().rows());
        let v = gpu.instances_version();
        assert!(gpu.resize(814.0, 600.0, 1.0));
        assert_eq!((gpu.grid().cols(), gpu.grid().rows()), (cols, rows));
        assert_ne!(gpu.instances_version(), v);

        let fresh = InstanceBuffers::build(&CellGrid::new(&BackdropConfig::default().grid, 814.0, 600.0));
        assert_eq!(gpu.instances().offsets, fresh.offsets);
    }

    #[test]
    fn pinned_grid_keeps_instances_at_same_dimensions() {
        let mut config = BackdropConfig::default();
        config.grid.centered = false;
        let mut gpu = GpuBackdropCore::new(config, 800.0, 600.0, 1.0);
        let (cols, rows) = (gpu.grid().cols(), gpu.grid().rows());
        let v = gpu.instances_version();
        assert!(!gpu.resize(801.0, 600.0, 1.0));
        assert_eq!((gpu.grid().cols(), gpu.grid().rows()), (cols, rows));
        assert_eq!(gpu.instances_version(), v);
    }

    #[test]
    fn region_rects_and_hover_reach_uniforms() {
        let mut gpu = core();
        let mut pushed = PushedGeometry::default();
        pushed.set(TrackedRegion::SolutionCard, Some(Rect::new(100.0, 200.0, 400.0, 120.0)));
        gpu.set_mode(AnimationMode::Idle);
        gpu.frame(0.0, &pushed);
        gpu.set_hovered(1, 2_000.0);
        gpu.set_scroll(300.0);
        let u = gpu.frame(2_100.0, &pushed).unwrap().uniforms;
        assert_eq!(u.card_rect, [100.0, 200.0, 400.0, 120.0]);
        assert_eq!(u.process_rect, [0.0; 4]);
        assert_eq!((u.hover_index, u.hover_prev_index), (1.0, -1.0));
        assert!((u.hover_change_time - 2.0).abs() < 1e-6);
        assert!((u.scroll_progress - 0.5).abs() < 1e-6);
    }

    #[test]
    fn reduced_motion_skips_the_intro_ramp() {
        let mut gpu = core();
        gpu.set_reduced_motion(true);
        gpu.set_mode(AnimationMode::Intro);
        let out = gpu.frame(0.0, &PushedGeometry::default()).unwrap();
        assert!(out.intro_completed);
        assert_eq!(out.uniforms.reduced_motion, 1.0);
    }
}
