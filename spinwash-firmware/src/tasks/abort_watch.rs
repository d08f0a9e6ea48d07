//! Abort watcher task
//!
//! Runs on the interrupt executor so it preempts the blocking engine. Every
//! stop or door edge raises the abort flag and nothing else.

use defmt::*;

use spinwash_core::watch_abort;

use crate::buttons::AbortInputs;
use crate::channels::ABORT;

#[embassy_executor::task]
pub async fn abort_watch_task(mut inputs: AbortInputs) {
    info!("Abort watcher started");

    let edges = watch_abort(&mut inputs, &ABORT).await;

    // Only reached if the inputs shut down
    warn!("Abort watcher stopped after {} edges", edges);
}
