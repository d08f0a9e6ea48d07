//! State machine for pattern execution
//!
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::RunEvent;
pub use machine::RunState;
