use std::ops::ControlFlow;
use std::time::Instant;

use tracing::info;
use trophy_kernel::{Kernel, KernelSolidHandle, RenderMesh};
use trophy_types::{Heightmap, TrophyConfig};

use crate::assembler::{assemble, AssemblyProgress};
use crate::planner::{plan, TrophyPlan};
use crate::types::{Diagnostics, TrophyError};

/// A fully assembled trophy living in a kernel.
#[derive(Debug)]
pub struct Trophy {
    pub solid: KernelSolidHandle,
    pub plan: TrophyPlan,
    pub diagnostics: Diagnostics,
}

impl Trophy {
    /// Tessellate the assembled solid for export.
    pub fn tessellate<K: Kernel + ?Sized>(
        &self,
        kernel: &mut K,
        tolerance: f64,
    ) -> Result<RenderMesh, TrophyError> {
        Ok(kernel.tessellate(&self.solid, tolerance)?)
    }
}

/// Plan and assemble a trophy from a heightmap.
pub fn build_trophy<K, F>(
    kernel: &mut K,
    heightmap: &Heightmap,
    config: &TrophyConfig,
    on_progress: F,
) -> Result<Trophy, TrophyError>
where
    K: Kernel + ?Sized,
    F: FnMut(AssemblyProgress) -> ControlFlow<()>,
{
    let start = Instant::now();
    let plan = plan(heightmap, config)?;
    let plan_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let solid = assemble(kernel, &plan, on_progress)?;
    let assembly_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    info!(
        bars = plan.bars.len(),
        plan_time_ms, assembly_time_ms, "assembled trophy"
    );

    Ok(Trophy {
        solid,
        plan,
        diagnostics: Diagnostics {
            plan_time_ms,
            assembly_time_ms,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AssembleError, PlanError};
    use trophy_kernel::{KernelIntrospect, MockKernel};

    #[test]
    fn build_and_tessellate() {
        let mut counts = vec![0; 364];
        counts[10] = 3;
        counts[200] = 6;
        let mut kernel = MockKernel::new();
        let trophy = build_trophy(
            &mut kernel,
            &Heightmap::new(counts),
            &TrophyConfig::pyramid(),
            |_| ControlFlow::Continue(()),
        )
        .unwrap();

        assert_eq!(trophy.plan.bars.len(), 2);
        assert!(trophy.diagnostics.plan_time_ms >= 0.0);

        let mesh = trophy.tessellate(&mut kernel, 0.01).unwrap();
        assert_eq!(mesh.triangle_count(), 3 * 12);
        let bounds = kernel.bounding_box(&trophy.solid).unwrap();
        assert!((bounds.max[2] - 12.01).abs() < 1e-9);
    }

    #[test]
    fn plan_errors_surface_unchanged() {
        let mut kernel = MockKernel::new();
        let err = build_trophy(
            &mut kernel,
            &Heightmap::zeros(10),
            &TrophyConfig::pyramid(),
            |_| ControlFlow::Continue(()),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TrophyError::Plan(PlanError::HeightmapTooShort { len: 10, .. })
        ));
        assert_eq!(kernel.solid_count(), 0);
    }

    #[test]
    fn assembly_errors_surface_unchanged() {
        let mut counts = vec![0; 364];
        counts[0] = 1;
        let mut kernel = MockKernel::failing_union_at(0);
        let err = build_trophy(
            &mut kernel,
            &Heightmap::new(counts),
            &TrophyConfig::flat(),
            |_| ControlFlow::Continue(()),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TrophyError::Assemble(AssembleError::Bar { day: 0, .. })
        ));
    }
}
