use game_types::RoundOutcome;
use std::time::Duration;

/// Cosmetic pause between a round resolving and its summary appearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DwellTimings {
    pub win: Duration,  // Let the last letter flip over
    pub loss: Duration, // Let the figure fall
}

impl Default for DwellTimings {
    fn default() -> Self {
        Self {
            win: Duration::from_millis(500),
            loss: Duration::from_millis(1200),
        }
    }
}

impl DwellTimings {
    pub fn new(win: Duration, loss: Duration) -> Self {
        Self { win, loss }
    }

    /// Zero delays, for tests and headless hosts.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn for_outcome(&self, outcome: RoundOutcome) -> Duration {
        match outcome {
            RoundOutcome::Win => self.win,
            RoundOutcome::Loss => self.loss,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    ConcludeRound,
}

/// A follow-up command the host must issue after `delay`. The core never
/// sleeps; hosts decide how to wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTransition {
    pub kind: TransitionKind,
    pub delay: Duration,
}

impl ScheduledTransition {
    pub fn conclude_round(outcome: RoundOutcome, timings: &DwellTimings) -> Self {
        Self {
            kind: TransitionKind::ConcludeRound,
            delay: timings.for_outcome(outcome),
        }
    }

    pub fn is_immediate(&self) -> bool {
        self.delay.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dwell_times() {
        let timings = DwellTimings::default();
        assert_eq!(timings.for_outcome(RoundOutcome::Win), Duration::from_millis(500));
        assert_eq!(timings.for_outcome(RoundOutcome::Loss), Duration::from_millis(1200));
    }

    #[test]
    fn test_instant_timings_produce_immediate_transitions() {
        let transition = ScheduledTransition::conclude_round(RoundOutcome::Loss, &DwellTimings::instant());
        assert_eq!(transition.kind, TransitionKind::ConcludeRound);
        assert!(transition.is_immediate());
    }
}
