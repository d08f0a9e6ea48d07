//! Engine clock on top of embassy-time

use embassy_time::{block_for, Duration, Instant};
use spinwash_core::traits::Clock;

/// Monotonic clock with blocking delays
///
/// The engine runs blocking in thread mode; blocking here does not stall
/// the abort watcher, which runs on the interrupt executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }
}
