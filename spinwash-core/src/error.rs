//! Engine error types
//!
//! An aborted phase is not an error; it is reported through
//! [`PhaseOutcome::Aborted`](crate::engine::PhaseOutcome).

use crate::traits::{DisplayError, MotorError};

/// Reason a pattern or program parameter was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamError {
    /// Pattern step count is zero
    ZeroStepCount,
    /// Pattern would generate more phases than fit in a sequence
    StepCountTooLarge,
    /// Pattern step time is zero
    ZeroStepTime,
    /// Speed outside 0-255
    SpeedOutOfRange,
    /// Phase duration is zero
    ZeroDuration,
    /// Phase duration does not fit the four-digit countdown
    DurationTooLong,
}

/// Capability that failed during a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverFault {
    Motor(MotorError),
    Display(DisplayError),
}

/// Errors returned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// Rejected before any motor actuation
    InvalidParameter(ParamError),
    /// Motor or display failed; the phase was cut short
    DriverUnavailable(DriverFault),
}

impl From<ParamError> for EngineError {
    fn from(e: ParamError) -> Self {
        EngineError::InvalidParameter(e)
    }
}

impl From<MotorError> for EngineError {
    fn from(e: MotorError) -> Self {
        EngineError::DriverUnavailable(DriverFault::Motor(e))
    }
}

impl From<DisplayError> for EngineError {
    fn from(e: DisplayError) -> Self {
        EngineError::DriverUnavailable(DriverFault::Display(e))
    }
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::InvalidParameter(e) => write!(f, "invalid parameter: {:?}", e),
            EngineError::DriverUnavailable(DriverFault::Motor(e)) => {
                write!(f, "motor driver unavailable: {:?}", e)
            }
            EngineError::DriverUnavailable(DriverFault::Display(e)) => {
                write!(f, "display unavailable: {:?}", e)
            }
        }
    }
}
