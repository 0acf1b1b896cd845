pub mod config;
pub mod heightmap;
pub mod primitive;
pub mod vec3;

pub use config::*;
pub use heightmap::*;
pub use primitive::*;
