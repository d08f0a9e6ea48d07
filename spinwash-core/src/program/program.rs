//! Single-phase programs

use crate::engine::phase::check_duration;
use crate::engine::{BrakeOption, Phase};
use crate::error::ParamError;
use crate::pattern::{PhaseSequence, MAX_SPEED};
use crate::traits::Direction;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A user-authored program: one explicit phase
///
/// Construction does not check anything. The engine runs
/// [`Program::validate`] before the motor is started, and [`Program::phase`]
/// only hands out a phase for a valid program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Program {
    /// Rotation direction
    pub direction: Direction,
    /// Motor speed (0-255)
    pub speed: u16,
    /// Spin time in seconds (1 to `MAX_DURATION_S`)
    pub spin_time_s: u16,
    /// Settle pause after the motor stops
    pub brake: BrakeOption,
}

impl Program {
    /// Create a program
    pub const fn new(direction: Direction, speed: u16, spin_time_s: u16, brake: BrakeOption) -> Self {
        Self {
            direction,
            speed,
            spin_time_s,
            brake,
        }
    }

    /// Check the program parameters
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.speed > MAX_SPEED {
            return Err(ParamError::SpeedOutOfRange);
        }
        check_duration(self.spin_time_s)
    }

    /// The program's phase
    pub fn phase(&self) -> Result<Phase, ParamError> {
        self.validate()?;
        Phase::new(self.direction, self.speed as u8, self.spin_time_s)
    }

    /// The program as a one-element phase sequence
    pub fn phases(&self) -> Result<PhaseSequence, ParamError> {
        let mut phases = PhaseSequence::new();
        phases
            .push(self.phase()?)
            .map_err(|_| ParamError::StepCountTooLarge)?;
        Ok(phases)
    }
}
