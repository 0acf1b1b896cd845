use std::path::PathBuf;

/// Errors while reading a heightmap file.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },

    #[error("failed to parse heightmap: {0}")]
    Parse(String),

    #[error("heightmap has no \"commits\" array")]
    MissingCommits,
}

/// Errors during STL export.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("mesh has no triangles")]
    EmptyMesh,

    #[error("index {index} out of range (vertex count = {vertex_count})")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("failed to write {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },
}
