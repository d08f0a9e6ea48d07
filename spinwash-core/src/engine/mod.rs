//! Phase execution engine
//!
//! The engine owns the motor, display, and clock for the duration of a run
//! and borrows the abort signal shared with the interrupt context.
//!
//! - [`phase`]: phase data and outcomes
//! - [`runner`]: one phase with its polling countdown
//! - [`executor`]: phase sequences, patterns, programs, and cycle recipes

pub mod executor;
pub mod phase;
pub mod runner;

#[cfg(test)]
pub(crate) mod mock;

pub use executor::RunReport;
pub use phase::{BrakeOption, Phase, PhaseOutcome, MAX_DURATION_S};
pub use runner::CountdownState;

use crate::abort::AbortSignal;
use crate::config::{AbortPolicy, EngineTiming, MachineConfig};
use crate::state::RunState;
use crate::traits::{Clock, CountdownDisplay, MotorDriver};

/// Phase execution engine
///
/// Single-threaded and blocking: each run call returns only after the
/// motor has been stopped and the display cleared.
pub struct Engine<'a, M, D, C> {
    motor: M,
    display: D,
    clock: C,
    /// Shared with the stop/door interrupt context
    abort: &'a AbortSignal,
    timing: EngineTiming,
    policy: AbortPolicy,
    state: RunState,
}

impl<'a, M, D, C> Engine<'a, M, D, C>
where
    M: MotorDriver,
    D: CountdownDisplay,
    C: Clock,
{
    /// Create an engine with default timing and per-phase abort
    pub fn new(motor: M, display: D, clock: C, abort: &'a AbortSignal) -> Self {
        Self {
            motor,
            display,
            clock,
            abort,
            timing: EngineTiming::default(),
            policy: AbortPolicy::default(),
            state: RunState::Idle,
        }
    }

    /// Apply timing and abort policy from the machine configuration
    pub fn configure(&mut self, config: &MachineConfig) {
        self.timing = config.timing;
        self.policy = config.abort_policy;
    }

    /// Use different timing
    pub fn with_timing(mut self, timing: EngineTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Use a different abort policy
    pub fn with_abort_policy(mut self, policy: AbortPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Current timing
    pub fn timing(&self) -> EngineTiming {
        self.timing
    }

    /// Current abort policy
    pub fn abort_policy(&self) -> AbortPolicy {
        self.policy
    }

    /// The motor driver
    pub fn motor(&self) -> &M {
        &self.motor
    }

    /// The display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The display, for showing the selected cycle between runs
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// The clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Best-effort stop after a failure
    pub fn halt_motor(&mut self) {
        if let Err(e) = self.motor.stop() {
            error!("motor stop failed while halting: {:?}", e);
        }
    }
}
