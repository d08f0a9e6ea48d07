//! Abort signal
//!
//! The only state shared between the stop/door interrupt context and the
//! engine. Single writer (interrupt handler), single reader (engine).
//! Only atomic loads and stores are used, so this works on cores without
//! compare-and-swap (Cortex-M0).

use portable_atomic::{AtomicBool, Ordering};

use crate::traits::ButtonEventSource;

/// Request to end the current phase early
///
/// Lives in a `static` on the firmware side and is borrowed by the engine.
#[derive(Debug)]
pub struct AbortSignal {
    raised: AtomicBool,
}

impl AbortSignal {
    /// Create a cleared signal
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Request an abort
    ///
    /// Idempotent and non-blocking; safe to call from interrupt context.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Clear the flag at the start of a phase
    ///
    /// Any abort raised before this call is discarded, so an abort never
    /// carries over into the next phase.
    pub fn consume_and_reset(&self) {
        self.raised.store(false, Ordering::Release);
    }

    /// Check the flag from the countdown loop
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

impl Default for AbortSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward stop/door edges to the abort signal
///
/// Runs in the interrupt-priority context. Each edge only raises the flag.
/// Returns the number of edges handled once the source shuts down.
pub async fn watch_abort<E: ButtonEventSource>(source: &mut E, signal: &AbortSignal) -> u32 {
    let mut edges: u32 = 0;
    while let Some(edge) = source.next_edge().await {
        signal.raise();
        edges = edges.saturating_add(1);
        trace!("abort raised by {:?}", edge);
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::AbortSource;

    struct ScriptedEdges<'a> {
        edges: &'a [AbortSource],
        pos: usize,
    }

    impl ButtonEventSource for ScriptedEdges<'_> {
        async fn next_edge(&mut self) -> Option<AbortSource> {
            let edge = self.edges.get(self.pos).copied();
            self.pos += 1;
            edge
        }
    }

    #[test]
    fn test_new_is_cleared() {
        let signal = AbortSignal::new();
        assert!(!signal.is_raised());
    }

    #[test]
    fn test_raise_is_idempotent() {
        let signal = AbortSignal::new();
        signal.raise();
        signal.raise();
        assert!(signal.is_raised());

        signal.consume_and_reset();
        assert!(!signal.is_raised());
    }

    #[test]
    fn test_reset_when_not_raised() {
        let signal = AbortSignal::new();
        signal.consume_and_reset();
        assert!(!signal.is_raised());
    }

    #[test]
    fn test_static_signal() {
        static SIGNAL: AbortSignal = AbortSignal::new();
        SIGNAL.raise();
        assert!(SIGNAL.is_raised());
        SIGNAL.consume_and_reset();
    }

    #[test]
    fn test_watch_abort_raises_on_every_edge() {
        let signal = AbortSignal::new();
        let mut source = ScriptedEdges {
            edges: &[AbortSource::StopButton, AbortSource::DoorOpened],
            pos: 0,
        };

        let edges = embassy_futures::block_on(watch_abort(&mut source, &signal));

        assert_eq!(edges, 2);
        assert!(signal.is_raised());
    }

    #[test]
    fn test_watch_abort_without_edges() {
        let signal = AbortSignal::new();
        let mut source = ScriptedEdges { edges: &[], pos: 0 };

        let edges = embassy_futures::block_on(watch_abort(&mut source, &signal));

        assert_eq!(edges, 0);
        assert!(!signal.is_raised());
    }
}
