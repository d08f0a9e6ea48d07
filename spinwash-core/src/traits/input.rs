//! Button and door input traits
//!
//! Two kinds of input exist: edge events on the stop button and door switch,
//! which only ever raise the abort signal, and level polling of the panel
//! buttons for cycle selection.

/// Front panel inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Cycles through the wash cycles
    Program,
    /// Starts the selected cycle
    Start,
    /// Stops the running phase
    Stop,
    /// Door switch (pressed = door closed)
    Door,
}

/// Input edge that requests an abort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AbortSource {
    /// Stop button pressed
    StopButton,
    /// Door opened
    DoorOpened,
}

/// Level-polled buttons
pub trait ButtonPoll {
    /// Returns true while the button is pressed (door: while closed)
    fn read(&mut self, button: ButtonId) -> bool;
}

/// Edge-triggered stop/door events
///
/// Implementations wait on pin interrupts. The consumer of these events
/// must not do anything except raise the abort signal.
#[allow(async_fn_in_trait)]
pub trait ButtonEventSource {
    /// Wait for the next stop or door edge
    ///
    /// Returns `None` once the source is shut down.
    async fn next_edge(&mut self) -> Option<AbortSource>;
}
