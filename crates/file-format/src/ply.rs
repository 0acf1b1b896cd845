//! Binary little-endian PLY export from RenderMesh.

use std::path::Path;

use tracing::info;
use trophy_kernel::RenderMesh;

use crate::errors::ExportError;
use crate::stl::validate;

/// Export a RenderMesh as binary PLY: float `x y z` per vertex and one
/// `uchar`-counted `uint` index list per triangle.
pub fn export_binary_ply(mesh: &RenderMesh, name: &str) -> Result<Vec<u8>, ExportError> {
    validate(mesh)?;
    let vertex_count = mesh.vertex_count();
    let tri_count = mesh.triangle_count();

    let header = format!(
        "ply\nformat binary_little_endian 1.0\ncomment {}\n\
         element vertex {}\nproperty float x\nproperty float y\nproperty float z\n\
         element face {}\nproperty list uchar uint vertex_indices\nend_header\n",
        name, vertex_count, tri_count
    );

    let mut buf = Vec::with_capacity(header.len() + vertex_count * 12 + tri_count * 13);
    buf.extend_from_slice(header.as_bytes());
    for c in &mesh.vertices[..vertex_count * 3] {
        buf.extend_from_slice(&c.to_le_bytes());
    }
    for tri in mesh.indices.chunks_exact(3) {
        buf.push(3u8);
        for idx in tri {
            buf.extend_from_slice(&idx.to_le_bytes());
        }
    }
    Ok(buf)
}

/// Write a binary PLY to `path`, replacing any existing file.
pub fn write_ply(mesh: &RenderMesh, path: impl AsRef<Path>, name: &str) -> Result<(), ExportError> {
    let path = path.as_ref();
    let bytes = export_binary_ply(mesh, name)?;
    std::fs::write(path, &bytes).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote PLY");
    Ok(())
}
