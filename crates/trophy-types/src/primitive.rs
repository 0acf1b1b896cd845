use serde::{Deserialize, Serialize};

use crate::heightmap::{CommitCount, GridCell};
use crate::vec3::Point3;

/// Axis-aligned box described by its center and full extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxPrimitive {
    pub center: [f64; 3],
    pub extents: [f64; 3],
}

impl BoxPrimitive {
    pub fn new(center: [f64; 3], extents: [f64; 3]) -> Self {
        Self { center, extents }
    }

    pub fn min(&self) -> Point3 {
        [
            self.center[0] - self.extents[0] * 0.5,
            self.center[1] - self.extents[1] * 0.5,
            self.center[2] - self.extents[2] * 0.5,
        ]
    }

    pub fn max(&self) -> Point3 {
        [
            self.center[0] + self.extents[0] * 0.5,
            self.center[1] + self.extents[1] * 0.5,
            self.center[2] + self.extents[2] * 0.5,
        ]
    }

    /// The 8 corners: bottom face counter-clockwise seen from +Z, then the
    /// top face in the same order (corner `i + 4` sits above corner `i`).
    pub fn corners(&self) -> [Point3; 8] {
        let [x0, y0, z0] = self.min();
        let [x1, y1, z1] = self.max();
        [
            [x0, y0, z0],
            [x1, y0, z0],
            [x1, y1, z0],
            [x0, y1, z0],
            [x0, y0, z1],
            [x1, y0, z1],
            [x1, y1, z1],
            [x0, y1, z1],
        ]
    }

    /// True when every extent is finite and strictly positive.
    pub fn is_solid(&self) -> bool {
        self.extents.iter().all(|e| e.is_finite() && *e > 0.0)
    }
}

/// The pedestal, before realization by a kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BasePrimitive {
    /// Plain box pedestal.
    Block(BoxPrimitive),
    /// Box whose bottom corners were pushed outward. `corners` follows the
    /// ordering of [`BoxPrimitive::corners`].
    Flared {
        block: BoxPrimitive,
        corners: [Point3; 8],
    },
}

impl BasePrimitive {
    /// The undeformed box this base was derived from.
    pub fn block(&self) -> &BoxPrimitive {
        match self {
            BasePrimitive::Block(block) => block,
            BasePrimitive::Flared { block, .. } => block,
        }
    }

    pub fn corners(&self) -> [Point3; 8] {
        match self {
            BasePrimitive::Block(block) => block.corners(),
            BasePrimitive::Flared { corners, .. } => *corners,
        }
    }

    /// Z coordinate of the pedestal's top face.
    pub fn top(&self) -> f64 {
        self.block().max()[2]
    }
}

/// One bar standing on the pedestal, for one active day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarPrimitive {
    pub cell: GridCell,
    /// Heightmap index of `cell`.
    pub day: usize,
    /// Raw commit count (after clipping).
    pub count: CommitCount,
    /// Scaled bar height.
    pub height: f64,
    pub block: BoxPrimitive,
}

impl BarPrimitive {
    /// Z coordinate of the bar's bottom face.
    pub fn bottom(&self) -> f64 {
        self.block.min()[2]
    }
}
