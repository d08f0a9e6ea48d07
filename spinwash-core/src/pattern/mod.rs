//! Pattern generation
//!
//! Expands parametric patterns (steps, pyramid, pulse, alternate) into
//! ordered phase sequences for the engine.

pub mod descriptor;
pub mod generator;

pub use descriptor::{PatternDescriptor, PatternMode, MAX_PHASES, MAX_SPEED};
pub use generator::{generate_phases, ramp_speed, PhaseSequence};
