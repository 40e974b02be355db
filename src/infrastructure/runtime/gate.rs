//! Per-feed tick sequencing

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic sequence numbers for one feed's ticks. Only the latest issued
/// sequence is current: a response carrying an older sequence is stale and
/// must be discarded (last-issued-wins, not last-arrived-wins). Closing the
/// gate makes every sequence stale, so in-flight responses at teardown can
/// never paint.
#[derive(Debug, Clone, Default)]
pub struct TickGate {
    issued: Arc<AtomicU64>,
    closed: Arc<AtomicBool>,
}

impl TickGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next tick's sequence number.
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, seq: u64) -> bool {
        !self.closed.load(Ordering::SeqCst) && seq == self.issued.load(Ordering::SeqCst)
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
