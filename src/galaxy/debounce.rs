use std::time::Duration;

/// Trailing-edge debounce window.
///
/// A trigger (re)arms the full delay; rapid triggers collapse into a single
/// fire once the window elapses without a new trigger. At most one window is
/// pending at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Pending { remaining: Duration },
}

#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    state: DebounceState,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: DebounceState::Idle,
        }
    }

    /// Arms the window, restarting the full delay if one is already pending.
    pub fn trigger(&mut self) {
        self.state = DebounceState::Pending {
            remaining: self.delay,
        };
    }

    /// Drops any pending window without firing.
    pub fn cancel(&mut self) {
        self.state = DebounceState::Idle;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// Advances the window by `delta`. Returns true exactly once per armed
    /// window, on the tick where the delay elapses.
    pub fn tick(&mut self, delta: Duration) -> bool {
        match self.state {
            DebounceState::Idle => false,
            DebounceState::Pending { remaining } => {
                if remaining <= delta {
                    self.state = DebounceState::Idle;
                    true
                } else {
                    self.state = DebounceState::Pending {
                        remaining: remaining - delta,
                    };
                    false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);
    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn idle_until_triggered() {
        let mut debounce = Debounce::new(DELAY);
        assert!(!debounce.is_pending());
        assert!(!debounce.tick(Duration::from_secs(10)));
    }

    #[test]
    fn fires_once_after_the_delay() {
        let mut debounce = Debounce::new(DELAY);
        debounce.trigger();
        assert!(debounce.is_pending());

        assert!(!debounce.tick(Duration::from_millis(150)));
        assert!(debounce.tick(Duration::from_millis(150)));
        assert!(!debounce.is_pending());
        assert!(!debounce.tick(Duration::from_secs(1)));
    }

    #[test]
    fn retriggering_restarts_the_window() {
        let mut debounce = Debounce::new(DELAY);
        debounce.trigger();
        assert!(!debounce.tick(Duration::from_millis(299)));

        // A fresh edit just before the deadline pushes the fire back.
        debounce.trigger();
        assert!(!debounce.tick(Duration::from_millis(299)));
        assert!(debounce.tick(Duration::from_millis(1)));
    }

    #[test]
    fn rapid_edits_collapse_to_a_single_fire() {
        let mut debounce = Debounce::new(DELAY);
        let mut fires = 0;
        for _ in 0..20 {
            debounce.trigger();
            if debounce.tick(FRAME) {
                fires += 1;
            }
        }
        // Let the last window run out.
        let mut elapsed = Duration::ZERO;
        while elapsed < DELAY {
            if debounce.tick(FRAME) {
                fires += 1;
            }
            elapsed += FRAME;
        }
        assert_eq!(fires, 1);
    }

    #[test]
    fn cancel_discards_the_pending_window() {
        let mut debounce = Debounce::new(DELAY);
        debounce.trigger();
        debounce.cancel();
        assert!(!debounce.is_pending());
        assert!(!debounce.tick(Duration::from_secs(1)));
    }
}
