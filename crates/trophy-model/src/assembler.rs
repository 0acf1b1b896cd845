//! Fold a [`TrophyPlan`] into a single solid by sequential union.
//!
//! The base is created first; every bar is then created and unioned into
//! the accumulated solid in plan order. The kernel consumes both operands
//! of a union, so at most two live solids exist at any time.

use std::ops::ControlFlow;

use tracing::{debug, instrument};
use trophy_kernel::{Kernel, KernelSolidHandle};
use trophy_types::{BasePrimitive, GridCell};

use crate::planner::TrophyPlan;
use crate::types::AssembleError;

/// Progress after one bar has been merged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblyProgress {
    /// Bars merged so far.
    pub merged: usize,
    /// Bars in the plan.
    pub total: usize,
    /// Cell of the bar just merged.
    pub cell: GridCell,
}

impl AssemblyProgress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.merged as f64 / self.total as f64
        }
    }
}

/// Create the base and union every bar into it.
///
/// `on_progress` runs after each successful union. Returning
/// `ControlFlow::Break` stops the fold before the next bar and releases
/// the partial solid; a break after the last bar has no effect.
#[instrument(skip_all, fields(bars = plan.bars.len()))]
pub fn assemble<K, F>(
    kernel: &mut K,
    plan: &TrophyPlan,
    mut on_progress: F,
) -> Result<KernelSolidHandle, AssembleError>
where
    K: Kernel + ?Sized,
    F: FnMut(AssemblyProgress) -> ControlFlow<()>,
{
    let total = plan.bars.len();
    let mut solid = make_base(kernel, &plan.base)?;

    for (i, bar) in plan.bars.iter().enumerate() {
        let bar_error = |source| AssembleError::Bar {
            cell: bar.cell,
            day: bar.day,
            height: bar.height,
            min: bar.block.min(),
            max: bar.block.max(),
            source,
        };

        let handle = match kernel.make_box(bar.block.center, bar.block.extents) {
            Ok(handle) => handle,
            Err(e) => {
                kernel.release(solid);
                return Err(bar_error(e));
            }
        };
        solid = kernel.boolean_union(solid, handle).map_err(bar_error)?;

        let progress = AssemblyProgress {
            merged: i + 1,
            total,
            cell: bar.cell,
        };
        debug!(merged = progress.merged, total, cell = %bar.cell, "merged bar");

        if on_progress(progress).is_break() && progress.merged < total {
            kernel.release(solid);
            return Err(AssembleError::Cancelled {
                merged: progress.merged,
                total,
            });
        }
    }

    Ok(solid)
}

fn make_base<K: Kernel + ?Sized>(
    kernel: &mut K,
    base: &BasePrimitive,
) -> Result<KernelSolidHandle, AssembleError> {
    let made = match base {
        BasePrimitive::Block(block) => kernel.make_box(block.center, block.extents),
        BasePrimitive::Flared { corners, .. } => kernel.make_hexahedron(corners),
    };
    made.map_err(|source| AssembleError::Base { source })
}
