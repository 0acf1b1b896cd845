//! File I/O for trophies: heightmap JSON in, STL or PLY out.

pub mod errors;
pub mod load;
pub mod ply;
pub mod stl;

pub use errors::{ExportError, LoadError};
pub use load::{load_heightmap, parse_heightmap};
pub use ply::{export_binary_ply, write_ply};
pub use stl::{export_ascii_stl, export_binary_stl, write_stl, StlFormat};
