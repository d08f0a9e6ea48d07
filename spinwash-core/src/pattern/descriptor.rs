//! Pattern descriptors
//!
//! A descriptor holds the raw, user-supplied pattern parameters. Nothing is
//! generated until the descriptor passes [`PatternDescriptor::validate`].

use crate::engine::{BrakeOption, MAX_DURATION_S};
use crate::error::ParamError;
use crate::traits::Direction;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum phases in one generated sequence
pub const MAX_PHASES: usize = 64;

/// Highest motor speed
pub const MAX_SPEED: u16 = 255;

/// Pattern type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PatternMode {
    /// Alternate between speed A and speed B
    Pulse,
    /// Ramp from speed A towards speed B
    Steps,
    /// Ramp up from speed A, then back down
    Pyramid,
    /// Fixed speed A, reversing direction every step
    Alternate,
}

impl PatternMode {
    /// Number of phases generated per step
    pub const fn phases_per_step(self) -> usize {
        match self {
            PatternMode::Steps => 1,
            PatternMode::Pulse | PatternMode::Pyramid | PatternMode::Alternate => 2,
        }
    }
}

/// Pattern parameters
///
/// Construction does not check anything; [`PatternDescriptor::validate`]
/// runs before any phase is generated or the motor is started.
///
/// A pattern may generate at most [`MAX_PHASES`] phases. Steps generates one
/// phase per step; Pulse, Pyramid and Alternate generate two, so their
/// `step_count` tops out at 32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatternDescriptor {
    /// Pattern type
    pub mode: PatternMode,
    /// Number of steps (at least 1, see [`MAX_PHASES`])
    pub step_count: u16,
    /// Duration of each generated phase in seconds (1 to `MAX_DURATION_S`)
    pub step_time_s: u16,
    /// Rotation direction (starting direction for `Alternate`)
    pub direction: Direction,
    /// First speed (0-255)
    pub speed_a: u16,
    /// Second speed (0-255)
    pub speed_b: u16,
    /// Applied after every phase of the pattern
    pub brake: BrakeOption,
}

impl PatternDescriptor {
    /// Create a descriptor without braking between phases
    pub const fn new(
        mode: PatternMode,
        step_count: u16,
        step_time_s: u16,
        direction: Direction,
        speed_a: u16,
        speed_b: u16,
    ) -> Self {
        Self {
            mode,
            step_count,
            step_time_s,
            direction,
            speed_a,
            speed_b,
            brake: BrakeOption::NoBrake,
        }
    }

    /// Same pattern with a different brake option
    pub const fn with_brake(mut self, brake: BrakeOption) -> Self {
        self.brake = brake;
        self
    }

    /// Number of phases this pattern generates
    pub fn phase_count(&self) -> usize {
        self.step_count as usize * self.mode.phases_per_step()
    }

    /// Check all parameters
    ///
    /// Must pass before generation: the Steps and Pyramid interpolation
    /// divides by `step_count`.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.step_count == 0 {
            return Err(ParamError::ZeroStepCount);
        }
        if self.step_time_s == 0 {
            return Err(ParamError::ZeroStepTime);
        }
        if self.step_time_s > MAX_DURATION_S {
            return Err(ParamError::DurationTooLong);
        }
        if self.speed_a > MAX_SPEED || self.speed_b > MAX_SPEED {
            return Err(ParamError::SpeedOutOfRange);
        }
        if self.phase_count() > MAX_PHASES {
            return Err(ParamError::StepCountTooLarge);
        }
        Ok(())
    }
}
