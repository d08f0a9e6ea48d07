//! Motor driver trait
//!
//! The machine has a single spin motor. The engine only ever asks it to run
//! at a direction and 8-bit speed, or to stop.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Clockwise rotation
    #[default]
    Clockwise,
    /// Counter-clockwise rotation
    CounterClockwise,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Errors that can occur with motor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// PWM output rejected the duty cycle
    Pwm,
    /// Direction pin could not be driven
    DirectionPin,
    /// Driver is not connected or not responding
    NotResponding,
}

/// Trait for the spin motor driver
///
/// Calls are synchronous and expected to return quickly. A failing call
/// leaves the motor in an unknown state, so the engine treats any error as
/// fatal for the running phase.
pub trait MotorDriver {
    /// Run the motor in `direction` at `speed` (0-255)
    ///
    /// A speed of 0 holds the motor still but keeps the driver engaged.
    fn run(&mut self, direction: Direction, speed: u8) -> Result<(), MotorError>;

    /// Stop the motor
    fn stop(&mut self) -> Result<(), MotorError>;
}

impl<T: MotorDriver + ?Sized> MotorDriver for &mut T {
    fn run(&mut self, direction: Direction, speed: u8) -> Result<(), MotorError> {
        T::run(self, direction, speed)
    }

    fn stop(&mut self) -> Result<(), MotorError> {
        T::stop(self)
    }
}
