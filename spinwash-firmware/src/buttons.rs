//! Stop button and door switch edges
//!
//! Both inputs are active low with pull-ups. The stop button falls when
//! pressed; the door switch rises when the door opens.

use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Input;
use spinwash_core::traits::{AbortSource, ButtonEventSource};

/// Pin-interrupt backed abort inputs
pub struct AbortInputs {
    stop: Input<'static>,
    door: Input<'static>,
}

impl AbortInputs {
    pub fn new(stop: Input<'static>, door: Input<'static>) -> Self {
        Self { stop, door }
    }
}

impl ButtonEventSource for AbortInputs {
    async fn next_edge(&mut self) -> Option<AbortSource> {
        let edge = select(
            self.stop.wait_for_falling_edge(),
            self.door.wait_for_rising_edge(),
        )
        .await;

        Some(match edge {
            Either::First(()) => AbortSource::StopButton,
            Either::Second(()) => AbortSource::DoorOpened,
        })
    }
}
