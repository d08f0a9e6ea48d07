//! Debounced front panel buttons
//!
//! All inputs are wired active low with pull-ups: a pressed button (or a
//! closed door switch) reads low. A level only counts once it has been
//! read the same way `DEBOUNCE_SAMPLES` times in a row.

use embedded_hal::digital::InputPin;
use spinwash_core::traits::{ButtonId, ButtonPoll};

/// Consecutive equal reads before a level change is accepted
pub const DEBOUNCE_SAMPLES: u8 = 3;

/// Debounce state for one input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Debouncer {
    stable: bool,
    candidate: bool,
    count: u8,
}

impl Debouncer {
    /// Feed one raw sample, returns the debounced level
    pub fn sample(&mut self, raw: bool) -> bool {
        if raw == self.stable {
            self.count = 0;
            return self.stable;
        }

        if raw == self.candidate {
            self.count = self.count.saturating_add(1);
        } else {
            self.candidate = raw;
            self.count = 1;
        }

        if self.count >= DEBOUNCE_SAMPLES {
            self.stable = raw;
            self.count = 0;
        }
        self.stable
    }

    /// Debounced level
    pub fn level(&self) -> bool {
        self.stable
    }
}

/// Front panel inputs
///
/// Buttons are attached individually so that pins owned elsewhere (the
/// stop/door edge watcher) can be left out. A button that is not attached
/// always reads released.
pub struct ButtonPanel<P> {
    pins: [Option<P>; 4],
    debounce: [Debouncer; 4],
}

impl<P: InputPin> ButtonPanel<P> {
    /// Create a panel with no buttons attached
    pub fn new() -> Self {
        Self {
            pins: [None, None, None, None],
            debounce: [Debouncer::default(); 4],
        }
    }

    /// Attach the pin for `button`
    pub fn with_button(mut self, button: ButtonId, pin: P) -> Self {
        let slot = Self::slot(button);
        self.pins[slot] = Some(pin);
        self.debounce[slot] = Debouncer::default();
        self
    }

    /// Check if a pin is attached for `button`
    pub fn has_button(&self, button: ButtonId) -> bool {
        self.pins[Self::slot(button)].is_some()
    }

    fn slot(button: ButtonId) -> usize {
        match button {
            ButtonId::Program => 0,
            ButtonId::Start => 1,
            ButtonId::Stop => 2,
            ButtonId::Door => 3,
        }
    }
}

impl<P: InputPin> Default for ButtonPanel<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin> ButtonPoll for ButtonPanel<P> {
    fn read(&mut self, button: ButtonId) -> bool {
        let slot = Self::slot(button);
        let Some(pin) = self.pins[slot].as_mut() else {
            return false;
        };

        // A pin that cannot be read counts as released
        let raw = match pin.is_low() {
            Ok(low) => low,
            Err(_) => {
                warn!("button {:?} read failed", button);
                false
            }
        };
        self.debounce[slot].sample(raw)
    }
}
