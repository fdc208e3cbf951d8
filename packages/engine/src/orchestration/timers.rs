//! Timekeeping driven by caller-supplied timestamps
//!
//! Nothing here reads a clock. The browser driver passes `performance.now()`
//! values in; tests pass whatever they like.

/// Single deadline, e.g. the scroll-release delay.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Deadline {
    due_at: Option<f64>,
}

impl Deadline {
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64) {
        self.due_at = Some(now_ms + delay_ms.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.due_at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due_at.is_some()
    }

    /// Fires once: returns `true` and disarms when `now_ms` has reached the deadline.
    pub fn take_due(&mut self, now_ms: f64) -> bool {
        match self.due_at {
            Some(at) if now_ms >= at => {
                self.due_at = None;
                true
            }
            _ => false,
        }
    }
}

/// One-shot retries at fixed offsets after `arm`, used to re-poll layout for
/// elements that mount late.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RetrySchedule {
    delays_ms: Vec<f64>,
    fired: Vec<bool>,
    armed_at: Option<f64>,
}

impl RetrySchedule {
    pub fn new(delays_ms: &[f64]) -> Self {
        Self { delays_ms: delays_ms.to_vec(), fired: vec![false; delays_ms.len()], armed_at: None }
    }

    pub fn arm(&mut self, now_ms: f64) {
        self.armed_at = Some(now_ms);
        self.fired.iter_mut().for_each(|f| *f = false);
    }

    pub fn cancel(&mut self) {
        self.armed_at = None;
    }

    /// Retries still waiting to fire.
    pub fn pending(&self) -> usize {
        if self.armed_at.is_none() {
            return 0;
        }
        self.fired.iter().filter(|f| !**f).count()
    }

    /// `true` if at least one retry became due since the last call.
    pub fn take_due(&mut self, now_ms: f64) -> bool {
        let Some(armed) = self.armed_at else {
            return false;
        };
        let mut any = false;
        for (delay, fired) in self.delays_ms.iter().zip(self.fired.iter_mut()) {
            if !*fired && now_ms - armed >= *delay {
                *fired = true;
                any = true;
            }
        }
        any
    }
}

/// Elapsed-time clock that can be paused (off-screen) without the animation
/// jumping forward when it resumes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PausableClock {
    origin: Option<f64>,
    paused_at: Option<f64>,
}

impl PausableClock {
    pub fn is_started(&self) -> bool {
        self.origin.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn start_if_needed(&mut self, now_ms: f64) {
        if self.origin.is_none() {
            self.origin = Some(now_ms);
        }
    }

    pub fn elapsed(&self, now_ms: f64) -> f64 {
        let Some(origin) = self.origin else {
            return 0.0;
        };
        let end = self.paused_at.unwrap_or(now_ms);
        (end - origin).max(0.0)
    }

    pub fn pause(&mut self, now_ms: f64) {
        if self.origin.is_some() && self.paused_at.is_none() {
            self.paused_at = Some(now_ms);
        }
    }

    pub fn resume(&mut self, now_ms: f64) {
        if let (Some(origin), Some(paused)) = (self.origin, self.paused_at.take()) {
            self.origin = Some(origin + (now_ms - paused).max(0.0));
        }
    }

    pub fn reset(&mut self) {
        *self = PausableClock::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_fires_once() {
        let mut d = Deadline::default();
        d.schedule(100.0, 400.0);
        assert!(!d.take_due(499.0));
        assert!(d.take_due(500.0));
        assert!(!d.take_due(600.0));
        assert!(!d.is_armed());
    }

    #[test]
    fn retries_fire_each_delay_once() {
        let mut r = RetrySchedule::new(&[100.0, 500.0, 1500.0]);
        assert!(!r.take_due(10_000.0), "not armed yet");
        r.arm(0.0);
        assert_eq!(r.pending(), 3);
        assert!(!r.take_due(50.0));
        assert!(r.take_due(120.0));
        assert!(!r.take_due(130.0));
        assert!(r.take_due(2_000.0));
        assert_eq!(r.pending(), 0);
        assert!(!r.take_due(5_000.0));
    }

    #[test]
    fn clock_excludes_paused_time() {
        let mut c = PausableClock::default();
        assert_eq!(c.elapsed(50.0), 0.0);
        c.start_if_needed(1_000.0);
        assert_eq!(c.elapsed(1_500.0), 500.0);
        c.pause(1_500.0);
        assert_eq!(c.elapsed(9_000.0), 500.0);
        c.resume(9_000.0);
        assert_eq!(c.elapsed(9_100.0), 600.0);
    }
}
