/// Which navigation item is hovered, plus enough history for the shader to
/// crossfade the highlight from the previous item to the current one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverTracker {
    current: i32,
    previous: i32,
    changed_at_s: f64,
}

impl Default for HoverTracker {
    fn default() -> Self {
        Self { current: -1, previous: -1, changed_at_s: 0.0 }
    }
}

impl HoverTracker {
    /// `index < 0` clears the hover. Returns `true` when the value changed.
    pub fn set_hovered(&mut self, index: i32, time_s: f64) -> bool {
        let index = index.max(-1);
        if index == self.current {
            return false;
        }
        self.previous = self.current;
        self.current = index;
        self.changed_at_s = time_s;
        true
    }

    pub fn current(&self) -> i32 { self.current }

    pub fn previous(&self) -> i32 { self.previous }

    pub fn changed_at(&self) -> f64 { self.changed_at_s }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_previous_and_change_time() {
        let mut h = HoverTracker::default();
        assert!(h.set_hovered(2, 1.5));
        assert_eq!((h.current(), h.previous()), (2, -1));
        assert!(!h.set_hovered(2, 3.0));
        assert_eq!(h.changed_at(), 1.5);
        assert!(h.set_hovered(0, 4.0));
        assert_eq!((h.current(), h.previous(), h.changed_at()), (0, 2, 4.0));
        assert!(h.set_hovered(-7, 5.0));
        assert_eq!(h.current(), -1);
    }
}
