//! Countdown display trait

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Display did not acknowledge a transfer
    NoAck,
    /// Bus pin could not be driven or read
    Bus,
    /// Value does not fit on the display
    Overflow,
}

/// Trait for the numeric countdown display
///
/// The engine shows the remaining whole seconds of the running phase and
/// clears the display when the phase ends.
pub trait CountdownDisplay {
    /// Show a number
    fn show_number(&mut self, n: u16) -> Result<(), DisplayError>;

    /// Blank the display
    fn clear(&mut self) -> Result<(), DisplayError>;
}

impl<T: CountdownDisplay + ?Sized> CountdownDisplay for &mut T {
    fn show_number(&mut self, n: u16) -> Result<(), DisplayError> {
        T::show_number(self, n)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        T::clear(self)
    }
}
