//! Minimal pass-through scheduler.

use crate::config::{FusionConfig, Result, StreamingSection};
use crate::core::types::FrameRequest;
use crate::engine::executor::{execute_request, ExecutionOutcome};
use crate::engine::ReconstructionSwitch;
use crate::map::{ChunkStreaming, VolumetricMap};

use super::{BatchReport, FrameScheduler};

/// Executes every request in arrival order and retains the most recent one.
///
/// Used for ground-truth-trajectory replay, where every frame must be
/// applied in order and the newest frame stays queued as the render
/// reference for the next cycle.
#[derive(Debug)]
pub struct PassThroughScheduler {
    streaming: StreamingSection,
    switch: ReconstructionSwitch,
    pending: Vec<FrameRequest>,
}

impl PassThroughScheduler {
    /// Create a scheduler from validated configuration.
    ///
    /// Rejects configurations with integration disabled: the shared
    /// execution contract has no compaction-only fallback for batches.
    pub fn new(config: &FusionConfig, switch: ReconstructionSwitch) -> Result<Self> {
        config.validate_for_batch()?;
        Ok(Self {
            streaming: config.streaming.clone(),
            switch,
            pending: Vec::new(),
        })
    }
}

impl FrameScheduler for PassThroughScheduler {
    fn enqueue(&mut self, request: FrameRequest) {
        self.pending.push(request);
    }

    fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn run_batch(
        &mut self,
        map: &mut dyn VolumetricMap,
        chunks: &mut dyn ChunkStreaming,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        if self.pending.is_empty() {
            return report;
        }

        for request in &self.pending {
            match execute_request(request, &self.streaming, &self.switch, map, chunks) {
                ExecutionOutcome::Integrated => report.executed += 1,
                ExecutionOutcome::InvalidFrame => report.invalid += 1,
                ExecutionOutcome::TrackingLost => report.lost += 1,
            }
        }

        // Keep only the newest request; it stays queued as the raycast
        // reference for the next cycle.
        let newest = self.pending.len() - 1;
        self.pending.drain(..newest);
        report
    }
}
