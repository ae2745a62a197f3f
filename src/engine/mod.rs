//! Orchestration layer: schedulers, shared frame execution, and the live
//! reconstruction loop.

pub mod heat;
pub mod pipeline;
pub mod reconstruction;
pub mod scheduler;

mod executor;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Session-wide reconstruction enable flag.
///
/// Cleared when tracking is lost; stays cleared across subsequent batches and
/// reconstruction calls until [`reset`](ReconstructionSwitch::reset) is
/// invoked externally. Cloning yields a handle to the same flag.
#[derive(Debug, Clone)]
pub struct ReconstructionSwitch(Arc<AtomicBool>);

impl ReconstructionSwitch {
    /// Create an enabled switch.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Whether reconstruction is currently enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Disable reconstruction until an explicit reset.
    pub fn disable(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    /// Re-enable reconstruction after a tracking loss was handled externally.
    pub fn reset(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl Default for ReconstructionSwitch {
    fn default() -> Self {
        Self::new()
    }
}
