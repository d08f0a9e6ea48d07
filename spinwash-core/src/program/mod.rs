//! Programs and wash cycles
//!
//! A program is the simplest runnable entity: one explicit phase. Wash
//! cycles are the factory presets picked with the program button.

pub mod cycle;
#[allow(clippy::module_inception)]
pub mod program;

pub use cycle::{CycleSelector, WashCycle};
pub use program::Program;
