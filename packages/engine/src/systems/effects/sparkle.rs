use std::collections::HashMap;

use crate::domain::config::SparkleConfig;
use crate::noise::{smoothstep, Rng};

// Envelope never drops to zero inside the sparkle window
const ENVELOPE_FLOOR: f64 = 0.05;

/// Cells currently sparkling, keyed by `(col, row)`, valued by start time.
pub struct SparkleField {
    active: HashMap<(i32, i32), f64>,
    capacity: usize,
    probability: f64,
    duration_ms: f64,
    attack_fraction: f64,
}

impl SparkleField {
    pub fn new(config: &SparkleConfig, capacity: usize) -> Self {
        Self {
            active: HashMap::new(),
            capacity,
            probability: config.probability,
            duration_ms: config.duration_ms,
            attack_fraction: config.attack_fraction,
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn contains(&self, key: (i32, i32)) -> bool {
        self.active.contains_key(&key)
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Cap the map at the current grid's cell count.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if self.active.len() > capacity {
            self.active.clear();
        }
    }

    /// Trigger chance for this frame; drifts slowly so sparkles come in waves.
    #[inline]
    pub fn probability_at(&self, now_ms: f64) -> f64 {
        self.probability * (0.6 + 0.4 * (now_ms * 0.0007).sin())
    }

    /// Start a sparkle at `now_ms` unconditionally (unless one is running).
    pub fn start(&mut self, key: (i32, i32), now_ms: f64) -> bool {
        if self.active.contains_key(&key) || self.active.len() >= self.capacity {
            return false;
        }
        self.active.insert(key, now_ms);
        true
    }

    /// Roll for a new sparkle on this cell.
    pub fn roll(&mut self, key: (i32, i32), now_ms: f64, rng: &mut Rng) -> bool {
        if self.active.contains_key(&key) {
            return false;
        }
        let p = self.probability_at(now_ms);
        rng.next_f64() < p && self.start(key, now_ms)
    }

    /// Attack-then-decay envelope at `age` ms, `None` outside the window.
    pub fn envelope(&self, age: f64) -> Option<f64> {
        if !(0.0..self.duration_ms).contains(&age) {
            return None;
        }
        let phase = age / self.duration_ms;
        let shape = if phase < self.attack_fraction {
            smoothstep(phase / self.attack_fraction)
        } else {
            smoothstep(1.0 - (phase - self.attack_fraction) / (1.0 - self.attack_fraction))
        };
        Some(ENVELOPE_FLOOR + (1.0 - ENVELOPE_FLOOR) * shape)
    }

    /// Current envelope for a cell. Expired entries are removed on the spot.
    pub fn sample(&mut self, key: (i32, i32), now_ms: f64) -> Option<f64> {
        let start = *self.active.get(&key)?;
        match self.envelope(now_ms - start) {
            Some(env) => Some(env),
            None if now_ms >= start + self.duration_ms => {
                self.active.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Drop every sparkle whose window has closed.
    pub fn prune(&mut self, now_ms: f64) {
        let duration = self.duration_ms;
        self.active.retain(|_, start| now_ms < *start + duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> SparkleField {
        SparkleField::new(&SparkleConfig::default(), 1000)
    }

    #[test]
    fn boost_is_positive_for_whole_window() {
        let mut f = field();
        let t0 = 10_000.0;
        assert!(f.start((3, 4), t0));
        let mut t = t0;
        while t < t0 + 150.0 {
            let env = f.sample((3, 4), t).expect("still sparkling");
            assert!(env > 0.0, "t={t}");
            t += 0.5;
        }
        let last = f.sample((3, 4), t0 + 149.999).expect("still sparkling");
        assert!(last > 0.0);
    }

    #[test]
    fn entry_is_gone_at_window_end() {
        let mut f = field();
        f.start((1, 1), 500.0);
        assert_eq!(f.sample((1, 1), 650.0), None);
        assert!(!f.contains((1, 1)));

        f.start((2, 2), 500.0);
        assert_eq!(f.sample((2, 2), 9_999.0), None);
        assert!(f.is_empty());
    }

    #[test]
    fn envelope_peaks_after_attack() {
        let f = field();
        let peak = f.envelope(45.0).unwrap();
        assert!((peak - 1.0).abs() < 1e-12);
        assert!(f.envelope(5.0).unwrap() < peak);
        assert!(f.envelope(140.0).unwrap() < peak);
    }

    #[test]
    fn prune_and_capacity() {
        let mut f = SparkleField::new(&SparkleConfig::default(), 2);
        assert!(f.start((0, 0), 0.0));
        assert!(f.start((0, 1), 100.0));
        assert!(!f.start((0, 2), 100.0), "capacity reached");
        f.prune(160.0);
        assert_eq!(f.len(), 1);
        assert!(f.contains((0, 1)));
    }

    #[test]
    fn roll_with_certain_probability_starts() {
        let cfg = SparkleConfig { probability: 10.0, ..SparkleConfig::default() };
        let mut f = SparkleField::new(&cfg, 10);
        let mut rng = Rng::new(1);
        assert!(f.roll((5, 5), 0.0, &mut rng));
        assert!(!f.roll((5, 5), 1.0, &mut rng), "already sparkling");
    }
}
