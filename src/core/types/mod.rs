//! Core value types shared by the scheduling and reconstruction paths.

mod chunk;
mod frame;
mod pose;

pub use chunk::ChunkCoord;
pub use frame::{DepthCameraParams, DepthFrame, FrameRequest};
pub use pose::FramePose;
