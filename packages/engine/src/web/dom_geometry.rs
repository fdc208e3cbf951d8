use web_sys::Document;

use crate::domain::config::GpuConfig;
use crate::gpu::{GeometryProvider, Rect, TrackedRegion};

/// Reads tracked regions straight from the page with
/// `getBoundingClientRect`. An element that is not mounted yet yields `None`.
pub struct DomGeometry {
    document: Document,
    process_selector: String,
    card_selector: String,
}

impl DomGeometry {
    pub fn new(document: Document, config: &GpuConfig) -> Self {
        Self {
            document,
            process_selector: config.process_selector.clone(),
            card_selector: config.card_selector.clone(),
        }
    }

    fn selector(&self, region: TrackedRegion) -> &str {
        match region {
            TrackedRegion::ProcessSection => &self.process_selector,
            TrackedRegion::SolutionCard => &self.card_selector,
        }
    }
}

impl GeometryProvider for DomGeometry {
    fn rect(&self, region: TrackedRegion) -> Option<Rect> {
        let element = self.document.query_selector(self.selector(region)).ok().flatten()?;
        let r = element.get_bounding_client_rect();
        Some(Rect::new(r.x(), r.y(), r.width(), r.height()))
    }
}
