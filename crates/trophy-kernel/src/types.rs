use serde::{Deserialize, Serialize};

/// Opaque handle to a solid in the geometry kernel.
/// Valid only for the kernel that issued it. Not `Clone`: passing a handle
/// to `boolean_union` gives the solid back to the kernel.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct KernelSolidHandle(pub(crate) u64);

impl KernelSolidHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Transient kernel-internal entity identifier (faces, vertices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KernelId(pub u64);

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("invalid primitive: {reason}")]
    InvalidPrimitive { reason: String },

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },

    #[error("solid not found: {id}")]
    EntityNotFound { id: u64 },
}

/// Axis-aligned bounds of a solid or mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Bounds {
    /// Bounds of a point set, `None` when empty.
    pub fn of_points<I: IntoIterator<Item = [f64; 3]>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for p in iter {
            for i in 0..3 {
                bounds.min[i] = bounds.min[i].min(p[i]);
                bounds.max[i] = bounds.max[i].max(p[i]);
            }
        }
        Some(bounds)
    }

    /// True when a gap wider than `gap` separates the two boxes on some axis.
    pub fn is_separated_from(&self, other: &Bounds, gap: f64) -> bool {
        (0..3).any(|i| self.max[i] + gap < other.min[i] || other.max[i] + gap < self.min[i])
    }

    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

/// Tessellated triangle mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderMesh {
    /// Flat array of vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f32>,
    /// Flat array of vertex normals [nx0, ny0, nz0, nx1, ny1, nz1, ...].
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex array.
    pub indices: Vec<u32>,
    /// Mapping from triangle ranges to logical faces.
    pub face_ranges: Vec<FaceRange>,
}

impl RenderMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of_points(
            self.vertices
                .chunks_exact(3)
                .map(|v| [v[0] as f64, v[1] as f64, v[2] as f64]),
        )
    }
}

/// Maps a contiguous range of triangles to a logical face.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceRange {
    /// The KernelId of the face this range belongs to.
    pub face_id: KernelId,
    /// Start index in the indices array (inclusive).
    pub start_index: u32,
    /// End index in the indices array (exclusive).
    pub end_index: u32,
}

impl Serialize for KernelId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KernelId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(KernelId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separation_needs_a_gap_wider_than_tolerance() {
        let base = Bounds {
            min: [0.0, 0.0, 0.0],
            max: [52.0, 7.0, 2.0],
        };
        let bar = Bounds {
            min: [0.005, 0.005, 2.01],
            max: [0.995, 0.995, 12.01],
        };
        assert!(base.is_separated_from(&bar, 0.002));
        assert!(bar.is_separated_from(&base, 0.002));
        assert!(!base.is_separated_from(&bar, 0.02));

        let overlapping = Bounds {
            min: [51.0, 6.0, 1.0],
            max: [53.0, 8.0, 3.0],
        };
        assert!(!base.is_separated_from(&overlapping, 0.0));
    }

    #[test]
    fn bounds_of_empty_is_none() {
        assert!(Bounds::of_points(Vec::new()).is_none());
    }

    #[test]
    fn mesh_bounds_cover_all_vertices() {
        let mesh = RenderMesh {
            vertices: vec![0.0, 0.0, 0.0, 2.0, -1.0, 0.5, 1.0, 3.0, 4.0],
            normals: vec![],
            indices: vec![0, 1, 2],
            face_ranges: vec![],
        };
        let b = mesh.bounds().unwrap();
        assert_eq!(b.min, [0.0, -1.0, 0.0]);
        assert_eq!(b.max, [2.0, 3.0, 4.0]);
        assert_eq!(b.size(), [2.0, 4.0, 4.0]);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
    }
}
