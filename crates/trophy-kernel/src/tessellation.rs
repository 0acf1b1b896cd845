//! Tessellation of truck solids into a flat RenderMesh.
//!
//! Each truck face gets its own FaceRange so callers can count and bound
//! faces after a long chain of unions.

use crate::types::*;
use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::{MeshableShape, MeshedShape};
use tracing::debug;

type TruckSolid = truck_modeling::Solid;

/// Accumulates per-face polygon meshes into one indexed RenderMesh.
#[derive(Default)]
struct MeshBuilder {
    vertices: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
    face_ranges: Vec<FaceRange>,
}

impl MeshBuilder {
    fn push_polygon(&mut self, face_id: KernelId, mesh: &PolygonMesh) {
        let start_index = self.indices.len() as u32;
        let base_vertex = (self.vertices.len() / 3) as u32;

        let positions = mesh.positions();
        for pos in positions {
            self.vertices
                .extend_from_slice(&[pos[0] as f32, pos[1] as f32, pos[2] as f32]);
        }

        // Planar faces may come back without normals; STL recomputes them anyway.
        let normals = mesh.normals();
        if normals.len() == positions.len() {
            for n in normals {
                self.normals
                    .extend_from_slice(&[n[0] as f32, n[1] as f32, n[2] as f32]);
            }
        } else {
            for _ in positions {
                self.normals.extend_from_slice(&[0.0, 0.0, 1.0]);
            }
        }

        for tri in mesh.tri_faces() {
            for v in tri.iter() {
                self.indices.push(v.pos as u32 + base_vertex);
            }
        }

        let end_index = self.indices.len() as u32;
        if end_index > start_index {
            self.face_ranges.push(FaceRange {
                face_id,
                start_index,
                end_index,
            });
        }
    }

    fn finish(self) -> RenderMesh {
        RenderMesh {
            vertices: self.vertices,
            normals: self.normals,
            indices: self.indices,
            face_ranges: self.face_ranges,
        }
    }
}

/// Tessellate a truck Solid into a RenderMesh, one FaceRange per face.
///
/// Falls back to a single merged polygon when no face yields triangles
/// individually, and fails if that is empty too.
pub fn tessellate_solid(
    solid: &TruckSolid,
    tolerance: f64,
    next_id: &mut u64,
) -> Result<RenderMesh, KernelError> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(KernelError::TessellationFailed {
            reason: format!("tolerance must be positive, got {}", tolerance),
        });
    }

    let meshed = solid.triangulation(tolerance);
    let mut builder = MeshBuilder::default();

    for shell in meshed.boundaries().iter() {
        for face in shell.face_iter() {
            let face_id = KernelId(*next_id);
            *next_id += 1;

            let Some(mut polygon) = face.surface() else {
                continue;
            };
            if !face.orientation() {
                polygon.invert();
            }
            builder.push_polygon(face_id, &polygon);
        }
    }

    if builder.indices.is_empty() {
        debug!("per-face tessellation empty, falling back to merged polygon");
        let merged = meshed.to_polygon();
        let face_id = KernelId(*next_id);
        *next_id += 1;
        builder = MeshBuilder::default();
        builder.push_polygon(face_id, &merged);
    }

    let mesh = builder.finish();
    if mesh.indices.is_empty() {
        return Err(KernelError::TessellationFailed {
            reason: "solid produced no triangles".to_string(),
        });
    }

    debug!(
        triangles = mesh.triangle_count(),
        faces = mesh.face_ranges.len(),
        "tessellated solid"
    );
    Ok(mesh)
}
