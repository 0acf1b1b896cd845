//! STL export from RenderMesh: binary and ASCII formats.
//!
//! Facet normals are recomputed from the winding of each triangle, so the
//! mesh's per-vertex normals are not consulted.

use std::fmt::Write as _;
use std::path::Path;

use tracing::info;
use trophy_kernel::RenderMesh;

use crate::errors::ExportError;

/// Which STL flavour to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

/// Bytes of one binary STL facet record.
const FACET_BYTES: usize = 50;

/// Check the mesh has triangles and every index points at a vertex.
pub(crate) fn validate(mesh: &RenderMesh) -> Result<(), ExportError> {
    if mesh.indices.len() < 3 {
        return Err(ExportError::EmptyMesh);
    }
    let vertex_count = mesh.vertices.len() / 3;
    match mesh
        .indices
        .iter()
        .find(|&&idx| idx as usize >= vertex_count)
    {
        Some(&index) => Err(ExportError::IndexOutOfRange {
            index,
            vertex_count,
        }),
        None => Ok(()),
    }
}

fn vertex(mesh: &RenderMesh, idx: u32) -> [f32; 3] {
    let i = idx as usize * 3;
    [mesh.vertices[i], mesh.vertices[i + 1], mesh.vertices[i + 2]]
}

/// Unit normal of a triangle from its winding, +Z for degenerate ones.
fn facet_normal(v: &[[f32; 3]; 3]) -> [f32; 3] {
    let a = [v[1][0] - v[0][0], v[1][1] - v[0][1], v[1][2] - v[0][2]];
    let b = [v[2][0] - v[0][0], v[2][1] - v[0][1], v[2][2] - v[0][2]];
    let n = [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 1e-12 {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

fn facets(mesh: &RenderMesh) -> impl Iterator<Item = ([f32; 3], [[f32; 3]; 3])> + '_ {
    mesh.indices.chunks_exact(3).map(|tri| {
        let v = [vertex(mesh, tri[0]), vertex(mesh, tri[1]), vertex(mesh, tri[2])];
        (facet_normal(&v), v)
    })
}

/// Export a RenderMesh as binary STL.
///
/// Layout: 80-byte header, u32 LE triangle count, then per triangle
/// 3×f32 normal, 3×3×f32 vertices and a zero u16 attribute.
pub fn export_binary_stl(mesh: &RenderMesh, name: &str) -> Result<Vec<u8>, ExportError> {
    validate(mesh)?;
    let tri_count = mesh.indices.len() / 3;

    let mut buf = Vec::with_capacity(84 + tri_count * FACET_BYTES);

    let header = format!("binary STL: {}", name);
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(80)]);
    buf.resize(80, 0u8);

    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());

    for (normal, verts) in facets(mesh) {
        for c in normal {
            buf.extend_from_slice(&c.to_le_bytes());
        }
        for v in &verts {
            for c in v {
                buf.extend_from_slice(&c.to_le_bytes());
            }
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(buf)
}

/// Export a RenderMesh as an ASCII STL string.
pub fn export_ascii_stl(mesh: &RenderMesh, name: &str) -> Result<String, ExportError> {
    validate(mesh)?;
    let tri_count = mesh.indices.len() / 3;

    let mut out = String::with_capacity(tri_count * 300);
    // Writing into a String cannot fail.
    let _ = writeln!(out, "solid {}", name);
    for (n, verts) in facets(mesh) {
        let _ = writeln!(out, "  facet normal {} {} {}", n[0], n[1], n[2]);
        out.push_str("    outer loop\n");
        for v in &verts {
            let _ = writeln!(out, "      vertex {} {} {}", v[0], v[1], v[2]);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    let _ = writeln!(out, "endsolid {}", name);
    Ok(out)
}

/// Serialize a mesh and write it to `path`, replacing any existing file.
pub fn write_stl(
    mesh: &RenderMesh,
    path: impl AsRef<Path>,
    format: StlFormat,
    name: &str,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let bytes = match format {
        StlFormat::Binary => export_binary_stl(mesh, name)?,
        StlFormat::Ascii => export_ascii_stl(mesh, name)?.into_bytes(),
    };
    std::fs::write(path, &bytes).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!(
        path = %path.display(),
        triangles = mesh.triangle_count(),
        bytes = bytes.len(),
        "wrote STL"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> RenderMesh {
        RenderMesh {
            vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            indices: vec![0, 1, 2],
            face_ranges: vec![],
        }
    }

    #[test]
    fn normal_follows_winding() {
        let v = [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]];
        assert_eq!(facet_normal(&v), [0.0, 0.0, -1.0]);
    }

    #[test]
    fn degenerate_triangle_gets_up_normal() {
        let v = [[1.0, 1.0, 1.0]; 3];
        assert_eq!(facet_normal(&v), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn binary_header_is_padded_and_truncated() {
        let mesh = single_triangle();
        let short = export_binary_stl(&mesh, "t").unwrap();
        assert!(short[..80].starts_with(b"binary STL: t"));
        assert!(short[13..80].iter().all(|&b| b == 0));

        let long_name = "x".repeat(200);
        let long = export_binary_stl(&mesh, &long_name).unwrap();
        assert_eq!(long.len(), 84 + FACET_BYTES);
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let mut mesh = single_triangle();
        mesh.indices[2] = 7;
        let err = export_binary_stl(&mesh, "bad").unwrap_err();
        assert!(matches!(
            err,
            ExportError::IndexOutOfRange {
                index: 7,
                vertex_count: 3
            }
        ));
    }
}
