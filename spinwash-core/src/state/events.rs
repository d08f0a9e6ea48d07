//! Events that trigger run state transitions

use crate::engine::PhaseOutcome;

/// Events that can trigger run state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunEvent {
    /// A validated phase sequence of `phase_count` phases is starting
    Start {
        /// Number of phases in the sequence
        phase_count: u16,
    },
    /// The running phase ended
    PhaseEnded(PhaseOutcome),
    /// Skip the remaining phases
    Cancel,
    /// A motor or display call failed
    DriverFault,
    /// Return to idle after a finished or faulted run
    Reset,
}
