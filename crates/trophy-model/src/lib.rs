//! Trophy geometry: plan the pedestal and bars from a heightmap, then fold
//! them into one solid through a [`trophy_kernel::Kernel`].

pub mod assembler;
pub mod flare;
pub mod pipeline;
pub mod planner;
pub mod types;

pub use assembler::{assemble, AssemblyProgress};
pub use flare::flare_base;
pub use pipeline::{build_trophy, Trophy};
pub use planner::{bar_height, plan, TrophyPlan};
pub use types::*;
