use trophy_kernel::KernelError;
use trophy_types::{ConfigError, GridCell};

/// Errors from planning the trophy primitives.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("heightmap has {len} days, the grid needs at least {required}")]
    HeightmapTooShort { len: usize, required: usize },
}

/// Errors from folding primitives into one solid.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssembleError {
    #[error("failed to create base: {source}")]
    Base { source: KernelError },

    #[error(
        "bar at {cell} (day {day}, height {height:.3}, bounds {min:?} to {max:?}) failed: {source}"
    )]
    Bar {
        cell: GridCell,
        day: usize,
        height: f64,
        min: [f64; 3],
        max: [f64; 3],
        source: KernelError,
    },

    #[error("assembly cancelled after {merged} of {total} bars")]
    Cancelled { merged: usize, total: usize },
}

/// Any failure of the trophy pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TrophyError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Assemble(#[from] AssembleError),

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
}

/// Timing of a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    /// Time spent planning primitives, in milliseconds.
    pub plan_time_ms: f64,
    /// Time spent in the union fold, in milliseconds.
    pub assembly_time_ms: f64,
}
