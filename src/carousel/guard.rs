//! Idle/Transitioning navigation lock.
//!
//! The guard is timer based, not completion based: a step holds the lock for
//! exactly the configured transition duration, which must equal the visual
//! card transition.

use super::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Locked until the given instant.
    Transitioning { until: Millis },
}

/// Inputs to the guard's transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardEvent {
    /// A navigation wants to start at `now`.
    Begin { now: Millis },
    /// Time has advanced to `now`.
    Elapsed { now: Millis },
    /// The owning surface is going away; drop the pending timeout.
    Teardown,
}

#[derive(Debug, Clone)]
pub struct TransitionGuard {
    phase: Phase,
    duration: Millis,
}

impl TransitionGuard {
    pub fn new(duration: Millis) -> Self {
        Self {
            phase: Phase::Idle,
            duration,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    /// The single transition function. Returns whether a `Begin` was
    /// accepted; other events always return `false`.
    pub fn on(&mut self, event: GuardEvent) -> bool {
        match (self.phase, event) {
            (Phase::Transitioning { until }, GuardEvent::Begin { now })
            | (Phase::Transitioning { until }, GuardEvent::Elapsed { now })
                if now >= until =>
            {
                self.phase = Phase::Idle;
                // An expired lock does not swallow the request that found it.
                self.on(event)
            }
            (Phase::Idle, GuardEvent::Begin { now }) => {
                self.phase = Phase::Transitioning {
                    until: now + self.duration,
                };
                true
            }
            (_, GuardEvent::Teardown) => {
                self.phase = Phase::Idle;
                false
            }
            _ => false,
        }
    }

    pub fn try_begin(&mut self, now: Millis) -> bool {
        self.on(GuardEvent::Begin { now })
    }

    pub fn tick(&mut self, now: Millis) {
        self.on(GuardEvent::Elapsed { now });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let guard = TransitionGuard::new(700);
        assert_eq!(guard.phase(), Phase::Idle);
        assert!(!guard.is_transitioning());
    }

    #[test]
    fn begin_locks_for_duration() {
        let mut guard = TransitionGuard::new(700);
        assert!(guard.try_begin(1_000));
        assert_eq!(guard.phase(), Phase::Transitioning { until: 1_700 });
        assert!(!guard.try_begin(1_001));
        assert!(!guard.try_begin(1_699));
    }

    #[test]
    fn begin_after_duration_is_accepted_without_tick() {
        let mut guard = TransitionGuard::new(700);
        assert!(guard.try_begin(0));
        assert!(guard.try_begin(700));
        assert_eq!(guard.phase(), Phase::Transitioning { until: 1_400 });
    }

    #[test]
    fn elapsed_returns_to_idle() {
        let mut guard = TransitionGuard::new(700);
        guard.try_begin(0);
        guard.tick(699);
        assert!(guard.is_transitioning());
        guard.tick(700);
        assert_eq!(guard.phase(), Phase::Idle);
    }

    #[test]
    fn elapsed_while_idle_is_noop() {
        let mut guard = TransitionGuard::new(700);
        assert!(!guard.on(GuardEvent::Elapsed { now: 5 }));
        assert_eq!(guard.phase(), Phase::Idle);
    }

    #[test]
    fn teardown_clears_pending_timeout() {
        let mut guard = TransitionGuard::new(700);
        guard.try_begin(0);
        assert!(!guard.on(GuardEvent::Teardown));
        assert_eq!(guard.phase(), Phase::Idle);
    }
}
