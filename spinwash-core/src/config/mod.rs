//! Configuration types
//!
//! Board-agnostic configuration structures, built in memory at boot.

pub mod types;

pub use types::*;
