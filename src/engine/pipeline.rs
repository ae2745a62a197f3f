//! Owning fusion context.
//!
//! Binds the external engines, the configured scheduler variant, and the
//! reconstruction loop into one value with a single lifetime: everything is
//! acquired when the pipeline is built and released when it is dropped, on
//! every exit path. Hosts that manage engine lifetimes themselves can drive
//! the schedulers and [`ReconstructionLoop`] directly instead.

use crate::config::{FusionConfig, Result, SchedulerKind};
use crate::core::types::FrameRequest;
use crate::engine::reconstruction::{FrameOutcome, ReconstructionLoop};
use crate::engine::scheduler::{
    BatchReport, BatchScheduler, FrameScheduler, PassThroughScheduler,
};
use crate::engine::ReconstructionSwitch;
use crate::map::{ChunkStreaming, VolumetricMap};
use crate::sensors::DepthSource;
use crate::tracking::CameraTracker;

/// Owns the engines and both execution paths of the fusion core.
pub struct FusionPipeline<M, C, T>
where
    M: VolumetricMap,
    C: ChunkStreaming,
    T: CameraTracker,
{
    map: M,
    chunks: C,
    tracker: T,
    scheduler: Box<dyn FrameScheduler>,
    reconstruction: ReconstructionLoop,
    switch: ReconstructionSwitch,
}

impl<M, C, T> FusionPipeline<M, C, T>
where
    M: VolumetricMap,
    C: ChunkStreaming,
    T: CameraTracker,
{
    /// Build a pipeline from validated configuration and the external
    /// engines.
    ///
    /// The scheduler variant is chosen by [`SchedulerKind`]; both variants
    /// reject configurations with integration disabled. A compaction-only
    /// session (integration disabled, live tracking) has no batched path and
    /// drives [`ReconstructionLoop`] directly instead of this context.
    pub fn new(config: &FusionConfig, map: M, chunks: C, tracker: T) -> Result<Self> {
        let switch = ReconstructionSwitch::new();
        let scheduler: Box<dyn FrameScheduler> = match config.scheduler {
            SchedulerKind::PassThrough => {
                Box::new(PassThroughScheduler::new(config, switch.clone())?)
            }
            SchedulerKind::BatchWithThrottling => {
                Box::new(BatchScheduler::new(config, switch.clone())?)
            }
        };
        Ok(Self {
            map,
            chunks,
            tracker,
            scheduler,
            reconstruction: ReconstructionLoop::new(config, switch.clone()),
            switch,
        })
    }

    /// Queue one candidate frame for the batched path.
    pub fn submit(&mut self, request: FrameRequest) {
        self.scheduler.enqueue(request);
    }

    /// Number of frames currently pending in the scheduler.
    pub fn pending_frames(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Drain pending frames through the configured scheduler.
    pub fn run_batch(&mut self) -> BatchReport {
        self.scheduler.run_batch(&mut self.map, &mut self.chunks)
    }

    /// Process one live-tracking tick.
    pub fn process_frame(&mut self, source: &dyn DepthSource) -> FrameOutcome {
        self.reconstruction
            .process_frame(source, &mut self.map, &mut self.chunks, &mut self.tracker)
    }

    /// Session-wide reconstruction switch.
    pub fn switch(&self) -> &ReconstructionSwitch {
        &self.switch
    }

    /// Explicit reset after a tracking loss: clears the map and re-enables
    /// reconstruction.
    pub fn reset(&mut self) {
        log::info!("resetting fusion session");
        self.map.reset();
        self.switch.reset();
    }

    /// The owned map engine.
    pub fn map(&self) -> &M {
        &self.map
    }

    /// The owned streaming engine.
    pub fn chunks(&self) -> &C {
        &self.chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::core::types::{DepthCameraParams, DepthFrame, FramePose};
    use crate::map::mock::{MockChunkGrid, MockMapEngine};
    use crate::tracking::{IcpIterationParams, RaycastFrame};
    use nalgebra::Matrix4;

    struct IdentityTracker;

    impl CameraTracker for IdentityTracker {
        fn track(
            &mut self,
            _frame: &DepthFrame,
            _reference: &RaycastFrame,
            last_transform: &Matrix4<f32>,
            _params: &IcpIterationParams,
        ) -> FramePose {
            FramePose::Valid(*last_transform)
        }
    }

    fn pipeline(
        config: &FusionConfig,
    ) -> Result<FusionPipeline<MockMapEngine, MockChunkGrid, IdentityTracker>> {
        FusionPipeline::new(
            config,
            MockMapEngine::new(),
            MockChunkGrid::new(),
            IdentityTracker,
        )
    }

    #[test]
    fn test_pipeline_runs_configured_scheduler() {
        let mut p = pipeline(&FusionConfig::default()).unwrap();
        p.submit(FrameRequest::new(
            FramePose::Valid(Matrix4::identity()),
            DepthFrame::new(1),
            DepthCameraParams::default(),
            0,
            "sensor 0, frame 1",
        ));
        assert_eq!(p.pending_frames(), 1);

        let report = p.run_batch();
        assert_eq!(report.executed, 1);
        assert_eq!(p.pending_frames(), 0);
        assert_eq!(p.map().integrated(), vec![1]);
    }

    #[test]
    fn test_pass_through_kind_retains_newest() {
        let mut config = FusionConfig::default();
        config.scheduler = SchedulerKind::PassThrough;
        let mut p = pipeline(&config).unwrap();

        for handle in [1u64, 2] {
            p.submit(FrameRequest::new(
                FramePose::Valid(Matrix4::identity()),
                DepthFrame::new(handle),
                DepthCameraParams::default(),
                0,
                format!("sensor 0, frame {}", handle),
            ));
        }
        p.run_batch();
        assert_eq!(p.pending_frames(), 1);
    }

    #[test]
    fn test_pipeline_rejects_batch_without_integration() {
        let mut config = FusionConfig::default();
        config.integration.integration_enabled = false;
        assert!(matches!(
            pipeline(&config),
            Err(ConfigError::BatchWithoutIntegration)
        ));
    }

    #[test]
    fn test_reset_clears_map_and_reenables() {
        let mut p = pipeline(&FusionConfig::default()).unwrap();
        p.switch().disable();
        assert!(!p.switch().is_enabled());

        p.reset();
        assert!(p.switch().is_enabled());
        assert!(p
            .map()
            .calls()
            .contains(&crate::map::mock::MapCall::Reset));
    }
}
