//! GhanaFusion - Frame scheduling and volumetric-integration orchestration
//! for real-time 3D scanning.
//!
//! Depth frames from one or several sensors arrive as candidates to be fused
//! into a shared, spatially-hashed volumetric map. This crate decides in
//! what order candidates are fused, whether a candidate should be dropped to
//! avoid redundant work in an already-saturated region, and how fusion is
//! sequenced with host/device chunk streaming and failure detection.
//!
//! The map itself, its GPU kernels, the ICP tracker, and the sensor
//! hardware are external collaborators consumed through the contracts in
//! [`map`], [`tracking`], and [`sensors`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    engine/                          │  ← Orchestration
//! │   (schedulers, heat throttle, reconstruction loop)  │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │          map/        tracking/      sensors/        │  ← Collaborator
//! │   (volumetric map,  (ICP tracker)  (depth sources)  │    contracts
//! │    chunk streaming)                                 │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                    config/                          │  ← Configuration
//! │        (sections, validation, YAML loading)         │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                 (types, math)                       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Execution paths
//!
//! **Batched** (multi-sensor or pre-recorded trajectories): the sensor
//! adapter assembles [`FrameRequest`]s per tick, a [`FrameScheduler`]
//! variant drains them — [`PassThroughScheduler`] in arrival order,
//! [`BatchScheduler`] with reordering and heat throttling.
//!
//! **Live tracking**: [`ReconstructionLoop`] processes one frame per call —
//! acquire a pose (trajectory or tracker), validate, stream, integrate or
//! compactify.
//!
//! A shared [`ReconstructionSwitch`] is cleared on tracking loss and stays
//! cleared until an explicit external reset.

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;

// ============================================================================
// Layer 2: Configuration (depends on core, tracking params)
// ============================================================================
pub mod config;

// ============================================================================
// Layer 3: Collaborator contracts (depend on core)
// ============================================================================
pub mod map;
pub mod sensors;
pub mod tracking;

// ============================================================================
// Layer 4: Orchestration engine (depends on all layers)
// ============================================================================
pub mod engine;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

// Core types
pub use crate::core::types::{ChunkCoord, DepthCameraParams, DepthFrame, FramePose, FrameRequest};

// Configuration
pub use config::{
    ConfigError, FusionConfig, IntegrationSection, OrderingSection, SchedulerKind,
    StreamingSection, ThrottleSection,
};

// Collaborator contracts
pub use map::{ActivityMask, ChunkStreaming, VolumetricMap};
pub use sensors::{DepthSource, FrameBatchBuilder};
pub use tracking::{CameraTracker, IcpIterationParams, RaycastFrame};

// Engine
pub use engine::heat::HeatMap;
pub use engine::pipeline::FusionPipeline;
pub use engine::reconstruction::{FrameOutcome, ReconstructionLoop};
pub use engine::scheduler::{BatchReport, BatchScheduler, FrameScheduler, PassThroughScheduler};
pub use engine::ReconstructionSwitch;
