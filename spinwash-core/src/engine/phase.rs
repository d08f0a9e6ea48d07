//! Phases: the atomic units of motor execution
//!
//! A phase is one uninterrupted motor actuation at a fixed direction and
//! speed for a bounded number of seconds. Direction and speed changes only
//! happen between phases.

use crate::error::ParamError;
use crate::traits::Direction;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest phase in seconds
///
/// The countdown display has four digits.
pub const MAX_DURATION_S: u16 = 9999;

/// Post-stop behavior of a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BrakeOption {
    /// Wait for the motor to settle after stopping
    Brake,
    /// Finish as soon as the motor is told to stop
    #[default]
    NoBrake,
}

/// How a phase ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseOutcome {
    /// Ran for its full duration
    Completed,
    /// Cut short by the abort signal
    Aborted,
}

/// A single motor phase
///
/// Immutable once built. Fields are only reachable through accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Phase {
    direction: Direction,
    speed: u8,
    duration_s: u16,
}

impl Phase {
    /// Build a phase, rejecting a duration of zero or above `MAX_DURATION_S`
    pub fn new(direction: Direction, speed: u8, duration_s: u16) -> Result<Self, ParamError> {
        check_duration(duration_s)?;
        Ok(Self::new_unchecked(direction, speed, duration_s))
    }

    /// Build a phase from already validated parameters
    pub(crate) const fn new_unchecked(direction: Direction, speed: u8, duration_s: u16) -> Self {
        Self {
            direction,
            speed,
            duration_s,
        }
    }

    /// Rotation direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Motor speed (0-255)
    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Duration in whole seconds
    pub fn duration_s(&self) -> u16 {
        self.duration_s
    }

    /// Duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.duration_s as u64 * 1000
    }
}

/// Check a phase duration fits the countdown
pub(crate) fn check_duration(duration_s: u16) -> Result<(), ParamError> {
    if duration_s == 0 {
        return Err(ParamError::ZeroDuration);
    }
    if duration_s > MAX_DURATION_S {
        return Err(ParamError::DurationTooLong);
    }
    Ok(())
}
