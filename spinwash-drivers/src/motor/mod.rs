//! Motor driver implementations
//!
//! - DC motors behind an H-bridge: PWM speed plus a direction pin

pub mod hbridge;

pub use hbridge::{HBridgeConfig, HBridgeMotor};
