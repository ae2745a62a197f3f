//! Chunk coordinate key type.

use serde::{Deserialize, Serialize};

/// Integer coordinate of a fixed-size spatial chunk of the volumetric map.
///
/// Chunks are the unit of host/device streaming and of heat throttling.
/// The derived `Hash` runs the three fields through the hasher in sequence,
/// so distinct coordinates mix properly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// Chunk index along X.
    pub x: i32,
    /// Chunk index along Y.
    pub y: i32,
    /// Chunk index along Z.
    pub z: i32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate.
    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
