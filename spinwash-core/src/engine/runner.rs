//! Phase runner
//!
//! Runs one phase: start the motor, poll the countdown until the phase
//! expires or the abort signal is raised, stop the motor, optionally wait
//! for it to settle, and clear the display.
//!
//! Remaining time is shown in whole seconds rounded up, so a 3 s phase
//! shows 3, 2, 1 and completes at 3000 ms. Zero is never shown.

use super::phase::{BrakeOption, Phase, PhaseOutcome};
use super::Engine;
use crate::error::EngineError;
use crate::traits::{Clock, CountdownDisplay, MotorDriver};

/// Countdown for one phase
///
/// Created when the motor starts and dropped when the phase ends, so the
/// last displayed value never leaks into the next phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CountdownState {
    start_ms: u64,
    duration_ms: u64,
    last_displayed: Option<u16>,
}

impl CountdownState {
    /// Start a countdown at `start_ms`
    pub fn start(start_ms: u64, duration_ms: u64) -> Self {
        Self {
            start_ms,
            duration_ms,
            last_displayed: None,
        }
    }

    /// Whole seconds remaining at `now_ms`, rounded up
    pub fn remaining_s(&self, now_ms: u64) -> u16 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let remaining_ms = self.duration_ms.saturating_sub(elapsed);
        remaining_ms.div_ceil(1000).min(u16::MAX as u64) as u16
    }

    /// Value to show at `now_ms`, if it differs from the last one shown
    pub fn update(&mut self, now_ms: u64) -> Option<u16> {
        let remaining = self.remaining_s(now_ms);
        if remaining == 0 || self.last_displayed == Some(remaining) {
            return None;
        }
        self.last_displayed = Some(remaining);
        Some(remaining)
    }

    /// Last value shown
    pub fn last_displayed(&self) -> Option<u16> {
        self.last_displayed
    }
}

impl<M, D, C> Engine<'_, M, D, C>
where
    M: MotorDriver,
    D: CountdownDisplay,
    C: Clock,
{
    /// Run a single phase
    ///
    /// The abort signal is cleared before the motor starts, so an abort
    /// raised during an earlier phase never reaches this one.
    ///
    /// # Returns
    /// - `Ok(Completed)` when the full duration elapsed
    /// - `Ok(Aborted)` when the abort signal ended the phase early
    /// - `Err(DriverUnavailable)` when the motor or display failed; the
    ///   motor has been told to stop, and the display cleared if the
    ///   stop itself failed
    pub fn run_phase(
        &mut self,
        phase: &Phase,
        brake: BrakeOption,
    ) -> Result<PhaseOutcome, EngineError> {
        self.abort.consume_and_reset();

        debug!(
            "phase start: dir={:?} speed={} duration={}s",
            phase.direction(),
            phase.speed(),
            phase.duration_s()
        );

        if let Err(e) = self.motor.run(phase.direction(), phase.speed()) {
            error!("motor run failed: {:?}", e);
            self.halt_motor();
            return Err(e.into());
        }

        let mut countdown = CountdownState::start(self.clock.now_ms(), phase.duration_ms());

        let outcome = loop {
            let now = self.clock.now_ms();

            if let Some(remaining) = countdown.update(now) {
                if let Err(e) = self.display.show_number(remaining) {
                    error!("display failed: {:?}", e);
                    self.halt_motor();
                    return Err(e.into());
                }
            }

            if countdown.remaining_s(now) == 0 {
                break PhaseOutcome::Completed;
            }
            if self.abort.is_raised() {
                break PhaseOutcome::Aborted;
            }

            if self.timing.poll_interval_ms > 0 {
                self.clock.delay_ms(self.timing.poll_interval_ms);
            }
        };

        if let Err(e) = self.motor.stop() {
            error!("motor stop failed: {:?}", e);
            if let Err(clear_err) = self.display.clear() {
                error!("display clear failed: {:?}", clear_err);
            }
            return Err(e.into());
        }

        if brake == BrakeOption::Brake {
            trace!("brake settle {}ms", self.timing.brake_settle_ms);
            self.clock.delay_ms(self.timing.brake_settle_ms);
        }

        self.display.clear()?;

        match outcome {
            PhaseOutcome::Completed => debug!("phase completed"),
            PhaseOutcome::Aborted => warn!("phase aborted"),
        }

        Ok(outcome)
    }
}
