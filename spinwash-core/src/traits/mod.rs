//! Hardware abstraction traits
//!
//! These traits define the interface between the phase engine and the
//! hardware-specific implementations (see `spinwash-drivers`).

pub mod clock;
pub mod display;
pub mod input;
pub mod motor;

pub use clock::Clock;
pub use display::{CountdownDisplay, DisplayError};
pub use input::{AbortSource, ButtonEventSource, ButtonId, ButtonPoll};
pub use motor::{Direction, MotorDriver, MotorError};
