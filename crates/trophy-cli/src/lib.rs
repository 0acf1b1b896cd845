//! Command-line front end: heightmap JSON in, trophy STL out.

pub mod cli;
pub mod report;

pub use cli::{run, Args, RunSummary};
pub use report::ModelReport;
