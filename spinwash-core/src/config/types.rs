//! Configuration type definitions
//!
//! These types describe engine timing, abort behavior, and the recipes
//! behind the factory wash cycles. Configuration is built in memory at
//! boot; nothing is persisted.

use crate::engine::BrakeOption;
use crate::error::ParamError;
use crate::pattern::{PatternDescriptor, PatternMode};
use crate::program::{Program, WashCycle};
use crate::traits::Direction;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settle pause after the motor stops when braking (ms)
pub const BRAKE_SETTLE_MS: u32 = 1800;

/// Default countdown poll interval (ms)
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 100;

/// Default motor speed of the factory cycles
pub const DEFAULT_SPEED: u16 = 128;

/// Engine timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineTiming {
    /// Wait between countdown polls (0 = busy poll)
    ///
    /// This is also the worst-case abort latency.
    pub poll_interval_ms: u32,
    /// Pause after stopping a braked phase
    pub brake_settle_ms: u32,
}

impl Default for EngineTiming {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            brake_settle_ms: BRAKE_SETTLE_MS,
        }
    }
}

/// What an aborted phase does to the rest of its pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AbortPolicy {
    /// Only the current phase ends; the next phase starts normally
    #[default]
    PerPhase,
    /// The whole pattern ends; remaining phases are skipped
    CancelPattern,
}

/// What a wash cycle runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CycleRecipe {
    /// A single explicit phase
    Program(Program),
    /// A generated phase sequence
    Pattern(PatternDescriptor),
}

impl CycleRecipe {
    /// Check the recipe parameters
    pub fn validate(&self) -> Result<(), ParamError> {
        match self {
            CycleRecipe::Program(program) => program.validate(),
            CycleRecipe::Pattern(pattern) => pattern.validate(),
        }
    }
}

/// Complete machine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineConfig {
    /// Engine timing
    pub timing: EngineTiming,
    /// Abort scope for multi-phase recipes
    pub abort_policy: AbortPolicy,
    /// Normal wash recipe
    pub normal_wash: CycleRecipe,
    /// Gentle wash recipe
    pub gentle_wash: CycleRecipe,
    /// Spin recipe
    pub spin: CycleRecipe,
}

impl MachineConfig {
    /// Factory configuration with all cycles at `speed`
    pub fn with_default_speed(speed: u16) -> Self {
        Self {
            timing: EngineTiming::default(),
            abort_policy: AbortPolicy::default(),
            // Short clockwise wash
            normal_wash: CycleRecipe::Program(Program::new(
                Direction::Clockwise,
                speed,
                2,
                BrakeOption::NoBrake,
            )),
            // Slow ramp up to the wash speed
            gentle_wash: CycleRecipe::Pattern(PatternDescriptor::new(
                PatternMode::Steps,
                4,
                3,
                Direction::Clockwise,
                speed / 4,
                speed,
            )),
            // Clockwise then counter-clockwise, settling in between
            spin: CycleRecipe::Pattern(
                PatternDescriptor::new(PatternMode::Alternate, 1, 2, Direction::Clockwise, speed, speed)
                    .with_brake(BrakeOption::Brake),
            ),
        }
    }

    /// Recipe for a cycle
    pub fn recipe(&self, cycle: WashCycle) -> &CycleRecipe {
        match cycle {
            WashCycle::NormalWash => &self.normal_wash,
            WashCycle::GentleWash => &self.gentle_wash,
            WashCycle::Spin => &self.spin,
        }
    }

    /// Validate every recipe
    pub fn validate(&self) -> Result<(), ParamError> {
        for cycle in WashCycle::ALL {
            self.recipe(cycle).validate()?;
        }
        Ok(())
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::with_default_speed(DEFAULT_SPEED)
    }
}
