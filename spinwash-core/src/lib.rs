//! Board-agnostic phase engine for the washing machine firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (motor, display, clock, buttons)
//! - Abort signal shared with the button/door interrupt context
//! - Phase runner with the polling countdown
//! - Pattern generation (steps, pyramid, pulse, alternate)
//! - Single-phase programs and the factory wash cycles
//! - Run state machine
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible in every module.
#[macro_use]
mod fmt;

pub mod abort;
pub mod config;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod program;
pub mod state;
pub mod traits;

pub use abort::{watch_abort, AbortSignal};
pub use engine::{Engine, Phase, PhaseOutcome, RunReport};
pub use error::{DriverFault, EngineError, ParamError};
pub use pattern::{generate_phases, PatternDescriptor, PatternMode, PhaseSequence};
pub use program::{Program, WashCycle};
