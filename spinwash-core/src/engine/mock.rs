//! Mock capabilities for engine tests

use heapless::Vec;

use crate::abort::AbortSignal;
use crate::traits::{Clock, CountdownDisplay, Direction, DisplayError, MotorDriver, MotorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorCall {
    Run(Direction, u8),
    Stop,
}

pub struct MockMotor {
    pub calls: Vec<MotorCall, 256>,
    pub fail_run: bool,
    pub fail_stop: bool,
}

impl MockMotor {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            fail_run: false,
            fail_stop: false,
        }
    }

    /// Speeds of every run call, in order
    pub fn run_speeds(&self) -> Vec<u8, 256> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                MotorCall::Run(_, speed) => Some(*speed),
                MotorCall::Stop => None,
            })
            .collect()
    }
}

impl MotorDriver for MockMotor {
    fn run(&mut self, direction: Direction, speed: u8) -> Result<(), MotorError> {
        if self.fail_run {
            return Err(MotorError::NotResponding);
        }
        let _ = self.calls.push(MotorCall::Run(direction, speed));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), MotorError> {
        if self.fail_stop {
            return Err(MotorError::NotResponding);
        }
        let _ = self.calls.push(MotorCall::Stop);
        Ok(())
    }
}

pub struct MockDisplay {
    pub shown: Vec<u16, 256>,
    pub clears: u32,
    pub fail_show: bool,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            shown: Vec::new(),
            clears: 0,
            fail_show: false,
        }
    }
}

impl CountdownDisplay for MockDisplay {
    fn show_number(&mut self, n: u16) -> Result<(), DisplayError> {
        if self.fail_show {
            return Err(DisplayError::NoAck);
        }
        let _ = self.shown.push(n);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.clears += 1;
        Ok(())
    }
}

/// Clock that only moves when the engine delays
///
/// Can stand in for the interrupt context by raising an abort once time
/// passes a given instant.
pub struct FakeClock<'a> {
    now: u64,
    pub delays: Vec<u32, 256>,
    abort_at: Option<(u64, &'a AbortSignal)>,
}

impl<'a> FakeClock<'a> {
    pub fn new() -> Self {
        Self {
            now: 0,
            delays: Vec::new(),
            abort_at: None,
        }
    }

    pub fn raise_abort_at(mut self, at_ms: u64, signal: &'a AbortSignal) -> Self {
        self.abort_at = Some((at_ms, signal));
        self
    }
}

impl Clock for FakeClock<'_> {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn delay_ms(&mut self, ms: u32) {
        let _ = self.delays.push(ms);
        self.now += ms as u64;

        if let Some((at, signal)) = self.abort_at {
            if self.now >= at {
                signal.raise();
                self.abort_at = None;
            }
        }
    }
}
