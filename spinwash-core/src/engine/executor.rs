//! Sequence execution
//!
//! Feeds phases to the runner in order while driving the run state
//! machine. Parameters are validated before the first motor call.
//!
//! With [`AbortPolicy::PerPhase`] an aborted phase only ends itself and the
//! next phase starts as usual. With [`AbortPolicy::CancelPattern`] the
//! remaining phases are skipped.

use super::phase::{BrakeOption, Phase, PhaseOutcome};
use super::Engine;
use crate::config::{AbortPolicy, CycleRecipe};
use crate::error::{EngineError, ParamError};
use crate::pattern::{generate_phases, PatternDescriptor};
use crate::program::Program;
use crate::state::RunEvent;
use crate::traits::{Clock, CountdownDisplay, MotorDriver};

/// Summary of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunReport {
    /// Phases that ran their full duration
    pub completed: u16,
    /// Phases cut short by the abort signal
    pub aborted: u16,
    /// Phases never started because the run was cancelled
    pub skipped: u16,
}

impl RunReport {
    fn record(&mut self, outcome: PhaseOutcome) {
        match outcome {
            PhaseOutcome::Completed => self.completed += 1,
            PhaseOutcome::Aborted => self.aborted += 1,
        }
    }

    /// Phases that were started
    pub fn phases_run(&self) -> u16 {
        self.completed + self.aborted
    }

    /// `Aborted` if any phase was aborted
    pub fn outcome(&self) -> PhaseOutcome {
        if self.aborted > 0 {
            PhaseOutcome::Aborted
        } else {
            PhaseOutcome::Completed
        }
    }
}

impl<M, D, C> Engine<'_, M, D, C>
where
    M: MotorDriver,
    D: CountdownDisplay,
    C: Clock,
{
    /// Run phases in order
    ///
    /// `brake` applies after every phase. A driver error stops the run
    /// immediately and leaves the engine in `Faulted`.
    pub fn execute_phases(
        &mut self,
        phases: &[Phase],
        brake: BrakeOption,
    ) -> Result<RunReport, EngineError> {
        let phase_count =
            u16::try_from(phases.len()).map_err(|_| ParamError::StepCountTooLarge)?;

        self.state = self
            .state
            .transition(RunEvent::Reset)
            .transition(RunEvent::Start { phase_count });

        let mut report = RunReport::default();

        while let Some(index) = self.state.phase_index() {
            let Some(phase) = phases.get(index as usize) else {
                break;
            };

            let outcome = match self.run_phase(phase, brake) {
                Ok(outcome) => outcome,
                Err(e) => {
                    self.state = self.state.transition(RunEvent::DriverFault);
                    return Err(e);
                }
            };
            report.record(outcome);

            let event = match (outcome, self.policy) {
                (PhaseOutcome::Aborted, AbortPolicy::CancelPattern) => {
                    report.skipped = phase_count - index - 1;
                    RunEvent::Cancel
                }
                (PhaseOutcome::Aborted, AbortPolicy::PerPhase) | (PhaseOutcome::Completed, _) => {
                    RunEvent::PhaseEnded(outcome)
                }
            };
            self.state = self.state.transition(event);
        }

        info!(
            "run finished: {} completed, {} aborted, {} skipped",
            report.completed,
            report.aborted,
            report.skipped
        );

        Ok(report)
    }

    /// Generate and run a pattern
    ///
    /// An invalid descriptor is rejected before the motor is touched.
    pub fn execute_pattern(
        &mut self,
        descriptor: &PatternDescriptor,
    ) -> Result<RunReport, EngineError> {
        let phases = generate_phases(descriptor)?;
        info!(
            "pattern {:?}: {} phases",
            descriptor.mode,
            phases.len() as u32
        );
        self.execute_phases(&phases, descriptor.brake)
    }

    /// Run a single-phase program
    pub fn execute_program(&mut self, program: &Program) -> Result<RunReport, EngineError> {
        let phases = program.phases()?;
        info!("program: {}s", program.spin_time_s);
        self.execute_phases(&phases, program.brake)
    }

    /// Run a wash cycle recipe
    pub fn execute_recipe(&mut self, recipe: &CycleRecipe) -> Result<RunReport, EngineError> {
        match recipe {
            CycleRecipe::Program(program) => self.execute_program(program),
            CycleRecipe::Pattern(pattern) => self.execute_pattern(pattern),
        }
    }
}
