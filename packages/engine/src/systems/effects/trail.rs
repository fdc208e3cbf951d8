use std::collections::HashMap;

use crate::domain::config::TrailConfig;

// Displayed values below this are forgotten instead of stored
const FORGET_BELOW: f64 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
struct TrailEntry {
    intensity: f64,
    touched_ms: f64,
}

/// Afterglow memory: a cell whose intensity drops fades out at its own
/// multiplicative rate instead of snapping to the new value.
pub struct TrailField {
    entries: HashMap<(i32, i32), TrailEntry>,
    capacity: usize,
    min_factor: f64,
    max_factor: f64,
    horizon_ms: f64,
}

impl TrailField {
    pub fn new(config: &TrailConfig, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
            min_factor: config.min_factor,
            max_factor: config.max_factor,
            horizon_ms: config.prune_horizon_ms,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if self.entries.len() > capacity {
            self.entries.clear();
        }
    }

    /// Decay factor for a cell, spread across the configured range by `seed`.
    #[inline]
    pub fn factor_for(&self, seed: f64) -> f64 {
        self.min_factor + (self.max_factor - self.min_factor) * seed.clamp(0.0, 1.0)
    }

    /// Last displayed intensity, if the cell is tracked.
    pub fn previous(&self, key: (i32, i32)) -> Option<f64> {
        self.entries.get(&key).map(|e| e.intensity)
    }

    /// Blend `computed` with the stored afterglow and remember the result.
    pub fn apply(&mut self, key: (i32, i32), factor: f64, computed: f64, now_ms: f64) -> f64 {
        let displayed = match self.entries.get(&key) {
            Some(prev) if computed < prev.intensity => (prev.intensity * factor).max(computed),
            _ => computed,
        };

        if displayed < FORGET_BELOW {
            self.entries.remove(&key);
            return displayed;
        }

        let entry = TrailEntry { intensity: displayed, touched_ms: now_ms };
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = entry;
        } else if self.entries.len() < self.capacity {
            self.entries.insert(key, entry);
        }
        displayed
    }

    /// Forget cells that have not been touched within the horizon.
    pub fn prune(&mut self, now_ms: f64) {
        let horizon = self.horizon_ms;
        self.entries.retain(|_, e| now_ms - e.touched_ms <= horizon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> TrailField {
        TrailField::new(&TrailConfig::default(), 100)
    }

    #[test]
    fn drop_decays_instead_of_snapping() {
        let mut f = field();
        f.apply((0, 0), 0.92, 0.8, 0.0);
        let shown = f.apply((0, 0), 0.92, 0.1, 16.0);
        assert!((shown - 0.736).abs() < 1e-12);
    }

    #[test]
    fn repeated_frames_settle_on_the_floor() {
        let mut f = field();
        f.apply((0, 0), 0.92, 0.8, 0.0);
        let mut shown = 0.0;
        for frame in 1..=200 {
            shown = f.apply((0, 0), 0.92, 0.1, frame as f64 * 16.0);
            assert!(shown >= 0.1);
        }
        assert!((shown - 0.1).abs() < 1e-9);
    }

    #[test]
    fn rising_intensity_passes_straight_through() {
        let mut f = field();
        f.apply((1, 1), 0.9, 0.2, 0.0);
        assert_eq!(f.apply((1, 1), 0.9, 0.7, 16.0), 0.7);
    }

    #[test]
    fn factor_spans_configured_range() {
        let f = field();
        let cfg = TrailConfig::default();
        assert_eq!(f.factor_for(0.0), cfg.min_factor);
        assert!((f.factor_for(1.0) - cfg.max_factor).abs() < 1e-12);
    }

    #[test]
    fn prune_forgets_stale_cells_and_capacity_is_respected() {
        let mut f = TrailField::new(&TrailConfig::default(), 1);
        f.apply((0, 0), 0.9, 0.5, 0.0);
        f.apply((0, 1), 0.9, 0.5, 0.0);
        assert_eq!(f.len(), 1);
        f.prune(10_000.0);
        assert!(f.is_empty());
    }
}
