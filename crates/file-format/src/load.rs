use std::path::Path;

use serde::Deserialize;
use tracing::debug;
use trophy_types::{CommitCount, Heightmap};

use crate::errors::LoadError;

/// On-disk heightmap layout: `{"year": 2023, "commits": [..]}`.
///
/// `year` is written by heightmap producers but plays no part in the model.
#[derive(Debug, Clone, Deserialize)]
pub struct HeightmapFileRaw {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub commits: Option<Vec<CommitCount>>,
}

/// Deserialize a heightmap from a JSON string.
pub fn parse_heightmap(json: &str) -> Result<Heightmap, LoadError> {
    let raw: HeightmapFileRaw =
        serde_json::from_str(json).map_err(|e| LoadError::Parse(e.to_string()))?;

    let commits = raw.commits.ok_or(LoadError::MissingCommits)?;
    debug!(year = ?raw.year, days = commits.len(), "parsed heightmap");
    Ok(Heightmap::new(commits))
}

/// Read and deserialize a heightmap file.
pub fn load_heightmap(path: impl AsRef<Path>) -> Result<Heightmap, LoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_heightmap(&json)
}
