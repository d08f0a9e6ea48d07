//! State shared between executors
//!
//! The abort watcher runs on the interrupt executor and the engine in
//! thread mode. This flag is the only thing they share.

use spinwash_core::AbortSignal;

/// Raised by the stop/door watcher, cleared by the engine at phase start
pub static ABORT: AbortSignal = AbortSignal::new();
