//! DOM-to-GPU geometry bridge
//!
//! Shaders cannot query the page, so the rectangles of a couple of tracked
//! regions are polled on the CPU and copied into uniforms. How a rectangle is
//! obtained is hidden behind [`GeometryProvider`]; the browser implementation
//! lives in `web::dom_geometry`.

use crate::orchestration::timers::RetrySchedule;

/// Axis-aligned rectangle in viewport CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn intersects_viewport(&self, width: f64, height: f64) -> bool {
        !self.is_empty()
            && self.x < width
            && self.y < height
            && self.x + self.width > 0.0
            && self.y + self.height > 0.0
    }

    pub fn to_vec4(self) -> [f32; 4] {
        [self.x as f32, self.y as f32, self.width as f32, self.height as f32]
    }
}

/// Page regions the shader reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackedRegion {
    ProcessSection,
    SolutionCard,
}

impl TrackedRegion {
    pub const ALL: [TrackedRegion; 2] = [TrackedRegion::ProcessSection, TrackedRegion::SolutionCard];

    fn slot(self) -> usize {
        match self {
            TrackedRegion::ProcessSection => 0,
            TrackedRegion::SolutionCard => 1,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(TrackedRegion::ProcessSection),
            1 => Some(TrackedRegion::SolutionCard),
            _ => None,
        }
    }
}

/// Source of region rectangles. `None` means "not on the page (yet)".
pub trait GeometryProvider {
    fn rect(&self, region: TrackedRegion) -> Option<Rect>;
}

/// Provider fed explicitly, e.g. by JS calling `set_region_rect`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PushedGeometry {
    rects: [Option<Rect>; 2],
}

impl PushedGeometry {
    pub fn set(&mut self, region: TrackedRegion, rect: Option<Rect>) {
        self.rects[region.slot()] = rect;
    }
}

impl GeometryProvider for PushedGeometry {
    fn rect(&self, region: TrackedRegion) -> Option<Rect> {
        self.rects[region.slot()]
    }
}

/// Caches region rectangles and decides when to re-poll: after a scroll or
/// resize notification, and at the one-shot retry offsets after mount.
#[derive(Clone, Debug, Default)]
pub struct GeometryBridge {
    rects: [Option<Rect>; 2],
    dirty: bool,
    retries: RetrySchedule,
}

impl GeometryBridge {
    pub fn new(retry_delays_ms: &[f64]) -> Self {
        Self { rects: [None; 2], dirty: true, retries: RetrySchedule::new(retry_delays_ms) }
    }

    /// Start the late-mount retries.
    pub fn mount(&mut self, now_ms: f64) {
        self.dirty = true;
        self.retries.arm(now_ms);
    }

    pub fn unmount(&mut self) {
        self.retries.cancel();
        self.rects = [None; 2];
    }

    /// Scroll or resize happened; rectangles are stale.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn pending_retries(&self) -> usize {
        self.retries.pending()
    }

    /// Re-read rectangles if anything asked for it. Returns whether a poll ran.
    pub fn poll(&mut self, provider: &dyn GeometryProvider, now_ms: f64) -> bool {
        let retry = self.retries.take_due(now_ms);
        if !self.dirty && !retry {
            return false;
        }
        for region in TrackedRegion::ALL {
            self.rects[region.slot()] = provider.rect(region).filter(|r| !r.is_empty());
        }
        self.dirty = false;
        true
    }

    pub fn rect(&self, region: TrackedRegion) -> Option<Rect> {
        self.rects[region.slot()]
    }

    /// Uniform value: the rectangle, or zeros when absent.
    pub fn uniform(&self, region: TrackedRegion) -> [f32; 4] {
        self.rect(region).map(Rect::to_vec4).unwrap_or([0.0; 4])
    }
}
