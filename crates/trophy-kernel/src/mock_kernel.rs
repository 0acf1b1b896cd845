//! Deterministic test double implementing Kernel + KernelIntrospect.
//!
//! A mock solid is a list of hexahedral pieces with known corners. Union
//! concatenates pieces under fresh IDs instead of computing a real boolean,
//! which keeps face/vertex counts predictable: every piece contributes
//! 6 faces, 8 vertices and 12 triangles.

use crate::traits::{Kernel, KernelIntrospect};
use crate::types::*;
use std::collections::HashMap;

/// Corner indices of each quad, wound counter-clockwise seen from outside.
const QUADS: [[usize; 4]; 6] = [
    [0, 3, 2, 1], // bottom
    [4, 5, 6, 7], // top
    [0, 1, 5, 4], // front
    [1, 2, 6, 5], // right
    [2, 3, 7, 6], // back
    [3, 0, 4, 7], // left
];

/// One hexahedral piece of a mock solid.
#[derive(Debug, Clone)]
struct MockPiece {
    corners: [[f64; 3]; 8],
    vertex_ids: Vec<KernelId>,
    face_ids: Vec<KernelId>,
}

/// A synthetic solid: the pieces that were unioned into it.
#[derive(Debug, Clone)]
struct MockSolid {
    pieces: Vec<MockPiece>,
}

/// Deterministic test double for the geometry kernel.
pub struct MockKernel {
    next_id: u64,
    next_handle: u64,
    solids: HashMap<u64, MockSolid>,
    union_calls: usize,
    fail_union_at: Option<usize>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            next_handle: 1,
            solids: HashMap::new(),
            union_calls: 0,
            fail_union_at: None,
        }
    }

    /// A kernel whose `n`-th union call (0-based) fails with `BooleanFailed`.
    pub fn failing_union_at(n: usize) -> Self {
        Self {
            fail_union_at: Some(n),
            ..Self::new()
        }
    }

    /// Number of union calls made so far, including failed ones.
    pub fn union_calls(&self) -> usize {
        self.union_calls
    }

    /// Number of hexahedral pieces merged into a solid.
    pub fn piece_count(&self, solid: &KernelSolidHandle) -> usize {
        self.solids
            .get(&solid.id())
            .map(|s| s.pieces.len())
            .unwrap_or(0)
    }

    /// Corners of every piece of a solid, in union order.
    pub fn piece_corners(&self, solid: &KernelSolidHandle) -> Vec<[[f64; 3]; 8]> {
        self.solids
            .get(&solid.id())
            .map(|s| s.pieces.iter().map(|p| p.corners).collect())
            .unwrap_or_default()
    }

    fn alloc_id(&mut self) -> KernelId {
        let id = KernelId(self.next_id);
        self.next_id += 1;
        id
    }

    fn alloc_handle(&mut self) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    fn new_piece(&mut self, corners: [[f64; 3]; 8]) -> MockPiece {
        MockPiece {
            corners,
            vertex_ids: (0..8).map(|_| self.alloc_id()).collect(),
            face_ids: (0..6).map(|_| self.alloc_id()).collect(),
        }
    }

    fn store(&mut self, solid: MockSolid) -> KernelSolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        handle
    }

    fn take(&mut self, handle: &KernelSolidHandle) -> Result<MockSolid, KernelError> {
        self.solids
            .remove(&handle.id())
            .ok_or(KernelError::EntityNotFound { id: handle.id() })
    }

    /// Re-ID every piece of both solids to simulate fresh kernel output.
    fn merge_solids(&mut self, a: MockSolid, b: MockSolid) -> MockSolid {
        let pieces = a
            .pieces
            .into_iter()
            .chain(b.pieces)
            .map(|p| self.new_piece(p.corners))
            .collect();
        MockSolid { pieces }
    }

    fn tessellate_pieces(solid: &MockSolid) -> RenderMesh {
        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        let mut indices = Vec::new();
        let mut face_ranges = Vec::new();

        for piece in &solid.pieces {
            for (quad, &face_id) in QUADS.iter().zip(&piece.face_ids) {
                let start_index = indices.len() as u32;
                let base_vertex = (vertices.len() / 3) as u32;
                let p = quad.map(|i| piece.corners[i]);
                let n = quad_normal(&p);

                for corner in &p {
                    vertices.extend_from_slice(&[
                        corner[0] as f32,
                        corner[1] as f32,
                        corner[2] as f32,
                    ]);
                    normals.extend_from_slice(&[n[0] as f32, n[1] as f32, n[2] as f32]);
                }

                // Two triangles: 0-1-2 and 0-2-3
                indices.extend_from_slice(&[
                    base_vertex,
                    base_vertex + 1,
                    base_vertex + 2,
                    base_vertex,
                    base_vertex + 2,
                    base_vertex + 3,
                ]);

                face_ranges.push(FaceRange {
                    face_id,
                    start_index,
                    end_index: indices.len() as u32,
                });
            }
        }

        RenderMesh {
            vertices,
            normals,
            indices,
            face_ranges,
        }
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

/// Unit normal of a quad from its diagonals.
fn quad_normal(p: &[[f64; 3]; 4]) -> [f64; 3] {
    let d0 = [p[2][0] - p[0][0], p[2][1] - p[0][1], p[2][2] - p[0][2]];
    let d1 = [p[3][0] - p[1][0], p[3][1] - p[1][1], p[3][2] - p[1][2]];
    let n = cross(d0, d1);
    trophy_types::vec3::normalize(n).unwrap_or([0.0, 0.0, 1.0])
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

impl Kernel for MockKernel {
    fn make_box(
        &mut self,
        center: [f64; 3],
        extents: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        let block = trophy_types::BoxPrimitive::new(center, extents);
        if !block.is_solid() {
            return Err(KernelError::InvalidPrimitive {
                reason: format!("box extents must be positive, got {:?}", extents),
            });
        }
        let piece = self.new_piece(block.corners());
        Ok(self.store(MockSolid {
            pieces: vec![piece],
        }))
    }

    fn make_hexahedron(
        &mut self,
        corners: &[[f64; 3]; 8],
    ) -> Result<KernelSolidHandle, KernelError> {
        if (0..4).any(|i| corners[i + 4][2] <= corners[i][2]) {
            return Err(KernelError::InvalidPrimitive {
                reason: "every top corner must lie above its bottom corner".to_string(),
            });
        }
        let piece = self.new_piece(*corners);
        Ok(self.store(MockSolid {
            pieces: vec![piece],
        }))
    }

    fn boolean_union(
        &mut self,
        a: KernelSolidHandle,
        b: KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let call = self.union_calls;
        self.union_calls += 1;

        let solid_a = self.take(&a);
        let solid_b = self.take(&b);
        let (solid_a, solid_b) = (solid_a?, solid_b?);

        if self.fail_union_at == Some(call) {
            return Err(KernelError::BooleanFailed {
                reason: format!("injected failure on union #{}", call),
            });
        }

        let merged = self.merge_solids(solid_a, solid_b);
        Ok(self.store(merged))
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        _tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        let s = self
            .solids
            .get(&solid.id())
            .ok_or(KernelError::EntityNotFound { id: solid.id() })?;
        Ok(Self::tessellate_pieces(s))
    }

    fn release(&mut self, solid: KernelSolidHandle) {
        self.solids.remove(&solid.id());
    }
}

impl KernelIntrospect for MockKernel {
    fn list_faces(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        self.solids
            .get(&solid.id())
            .map(|s| {
                s.pieces
                    .iter()
                    .flat_map(|p| p.face_ids.iter().copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn list_vertices(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        self.solids
            .get(&solid.id())
            .map(|s| {
                s.pieces
                    .iter()
                    .flat_map(|p| p.vertex_ids.iter().copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<Bounds> {
        let s = self.solids.get(&solid.id())?;
        Bounds::of_points(s.pieces.iter().flat_map(|p| p.corners))
    }

    fn solid_count(&self) -> usize {
        self.solids.len()
    }
}
