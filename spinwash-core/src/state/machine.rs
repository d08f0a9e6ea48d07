//! Run state machine
//!
//! Tracks one pattern or program execution:
//! `Idle -> Running(0) -> Running(1) -> ... -> Finished`.
//! An aborted phase re-enters `Running` with the next phase; it is not a
//! terminal state.

use super::events::RunEvent;

/// Execution states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// Nothing running
    #[default]
    Idle,
    /// Phase `index` of `phase_count` is running
    Running {
        /// Index of the running phase (0-based)
        index: u16,
        /// Total phases in the sequence
        phase_count: u16,
    },
    /// Every phase has ended, or the rest were cancelled
    Finished,
    /// A driver call failed; motor state unknown
    Faulted,
}

impl RunState {
    /// Index of the running phase
    pub fn phase_index(&self) -> Option<u16> {
        match self {
            RunState::Running { index, .. } => Some(*index),
            RunState::Idle | RunState::Finished | RunState::Faulted => None,
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: RunEvent) -> Self {
        use RunEvent::*;
        use RunState::*;

        match (self, event) {
            // Idle transitions
            (Idle, Start { phase_count: 0 }) => Finished,
            (Idle, Start { phase_count }) => Running {
                index: 0,
                phase_count,
            },

            // Running transitions: completed and aborted phases both move on
            (Running { index, phase_count }, PhaseEnded(_)) => {
                if index + 1 < phase_count {
                    Running {
                        index: index + 1,
                        phase_count,
                    }
                } else {
                    Finished
                }
            }
            (Running { .. }, Cancel) => Finished,
            (Running { .. }, DriverFault) => Faulted,

            // Terminal transitions
            (Finished, Reset) => Idle,
            (Faulted, Reset) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PhaseOutcome;

    #[test]
    fn test_full_run() {
        let mut state = RunState::Idle.transition(RunEvent::Start { phase_count: 3 });
        assert_eq!(state.phase_index(), Some(0));

        state = state.transition(RunEvent::PhaseEnded(PhaseOutcome::Completed));
        assert_eq!(state.phase_index(), Some(1));

        state = state.transition(RunEvent::PhaseEnded(PhaseOutcome::Completed));
        assert_eq!(state.phase_index(), Some(2));

        state = state.transition(RunEvent::PhaseEnded(PhaseOutcome::Completed));
        assert_eq!(state, RunState::Finished);

        assert_eq!(state.transition(RunEvent::Reset), RunState::Idle);
    }

    #[test]
    fn test_aborted_phase_continues() {
        let state = RunState::Idle.transition(RunEvent::Start { phase_count: 2 });
        let next = state.transition(RunEvent::PhaseEnded(PhaseOutcome::Aborted));
        assert_eq!(
            next,
            RunState::Running {
                index: 1,
                phase_count: 2
            }
        );
    }

    #[test]
    fn test_cancel_finishes() {
        let state = RunState::Idle.transition(RunEvent::Start { phase_count: 5 });
        assert_eq!(state.transition(RunEvent::Cancel), RunState::Finished);
    }

    #[test]
    fn test_fault() {
        let state = RunState::Idle.transition(RunEvent::Start { phase_count: 5 });
        let faulted = state.transition(RunEvent::DriverFault);
        assert_eq!(faulted, RunState::Faulted);
        assert_eq!(faulted.phase_index(), None);

        // Needs a reset before the next run
        assert_eq!(
            faulted.transition(RunEvent::Start { phase_count: 1 }),
            RunState::Faulted
        );
        assert_eq!(faulted.transition(RunEvent::Reset), RunState::Idle);
    }

    #[test]
    fn test_empty_sequence_finishes_immediately() {
        assert_eq!(
            RunState::Idle.transition(RunEvent::Start { phase_count: 0 }),
            RunState::Finished
        );
    }

    #[test]
    fn test_ignored_events() {
        assert_eq!(
            RunState::Idle.transition(RunEvent::PhaseEnded(PhaseOutcome::Completed)),
            RunState::Idle
        );
        assert_eq!(RunState::Idle.transition(RunEvent::Reset), RunState::Idle);
        let running = RunState::Idle.transition(RunEvent::Start { phase_count: 2 });
        assert_eq!(running.transition(RunEvent::Start { phase_count: 9 }), running);
    }
}
