//! End-to-end trophy scenarios against MockKernel.

use std::ops::ControlFlow;

use trophy_kernel::{Kernel, KernelIntrospect, MockKernel};
use trophy_model::{build_trophy, AssembleError, PlanError, TrophyError};
use trophy_types::{BasePrimitive, GridCell, Heightmap, TrophyConfig};

fn year(days: &[(usize, u64)]) -> Heightmap {
    let mut counts = vec![0; 364];
    for &(day, count) in days {
        counts[day] = count;
    }
    Heightmap::new(counts)
}

fn build(
    kernel: &mut MockKernel,
    heightmap: &Heightmap,
    config: &TrophyConfig,
) -> Result<trophy_model::Trophy, TrophyError> {
    build_trophy(kernel, heightmap, config, |_| ControlFlow::Continue(()))
}

// ── Empty year ──────────────────────────────────────────────────────────

#[test]
fn empty_year_is_flared_pedestal() {
    let mut kernel = MockKernel::new();
    let trophy = build(&mut kernel, &Heightmap::zeros(364), &TrophyConfig::pyramid()).unwrap();

    assert!(trophy.plan.bars.is_empty());
    assert_eq!(kernel.piece_count(&trophy.solid), 1);
    assert!(matches!(trophy.plan.base, BasePrimitive::Flared { .. }));

    // footprint widened by base_height on every side, top untouched
    let b = kernel.bounding_box(&trophy.solid).unwrap();
    assert_eq!(b.min, [-2.0, -2.0, 0.0]);
    assert_eq!(b.max, [54.0, 9.0, 2.0]);

    let top: Vec<_> = trophy.plan.base.corners()[4..].to_vec();
    assert_eq!(
        top,
        vec![
            [0.0, 0.0, 2.0],
            [52.0, 0.0, 2.0],
            [52.0, 7.0, 2.0],
            [0.0, 7.0, 2.0]
        ]
    );
}

#[test]
fn empty_year_flat_is_plain_box() {
    let mut kernel = MockKernel::new();
    let trophy = build(&mut kernel, &Heightmap::zeros(364), &TrophyConfig::flat()).unwrap();
    let b = kernel.bounding_box(&trophy.solid).unwrap();
    assert_eq!(b.min, [0.0, 0.0, 0.0]);
    assert_eq!(b.max, [52.0, 7.0, 2.0]);
}

// ── Single contribution ─────────────────────────────────────────────────

#[test]
fn single_commit_gives_one_full_bar_in_first_cell() {
    let mut kernel = MockKernel::new();
    let trophy = build(&mut kernel, &year(&[(0, 1)]), &TrophyConfig::pyramid()).unwrap();

    assert_eq!(trophy.plan.bars.len(), 1);
    let bar = &trophy.plan.bars[0];
    assert_eq!(bar.cell, GridCell::new(0, 0));
    assert_eq!(bar.height, 10.0);

    let min = bar.block.min();
    let max = bar.block.max();
    assert!((min[0] - 0.005).abs() < 1e-12);
    assert!((max[0] - 0.995).abs() < 1e-12);
    assert!((min[2] - 2.01).abs() < 1e-12);
    assert!((max[2] - 12.01).abs() < 1e-12);

    let mesh = trophy.tessellate(&mut kernel, 0.01).unwrap();
    assert_eq!(mesh.triangle_count(), 24);
    assert_eq!(mesh.face_ranges.len(), 12);
}

#[test]
fn half_count_gives_half_bar() {
    let mut kernel = MockKernel::new();
    let trophy = build(&mut kernel, &year(&[(0, 5), (1, 10)]), &TrophyConfig::flat()).unwrap();

    let heights: Vec<f64> = trophy.plan.bars.iter().map(|b| b.height).collect();
    assert_eq!(heights, vec![5.0, 10.0]);
}

#[test]
fn last_cell_is_week_51_weekday_6() {
    let mut kernel = MockKernel::new();
    let trophy = build(&mut kernel, &year(&[(363, 2)]), &TrophyConfig::flat()).unwrap();
    let bar = &trophy.plan.bars[0];
    assert_eq!(bar.cell, GridCell::new(51, 6));
    assert_eq!(bar.block.center[0], 51.5);
    assert_eq!(bar.block.center[1], 6.5);
}

// ── Failures ────────────────────────────────────────────────────────────

#[test]
fn short_heightmap_fails_before_touching_kernel() {
    let mut kernel = MockKernel::new();
    let err = build(&mut kernel, &Heightmap::zeros(100), &TrophyConfig::pyramid()).unwrap_err();
    assert!(matches!(
        err,
        TrophyError::Plan(PlanError::HeightmapTooShort {
            len: 100,
            required: 364
        })
    ));
    assert_eq!(kernel.solid_count(), 0);
}

#[test]
fn union_failure_reports_cell_and_releases_everything() {
    let mut kernel = MockKernel::failing_union_at(2);
    let heightmap = year(&[(3, 1), (4, 1), (70, 1), (71, 1)]);
    let err = build(&mut kernel, &heightmap, &TrophyConfig::pyramid()).unwrap_err();

    let TrophyError::Assemble(AssembleError::Bar { cell, day, .. }) = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(*cell, GridCell::new(10, 0));
    assert_eq!(*day, 70);
    assert!(err.to_string().contains("(week 10, weekday 0)"));
    assert_eq!(kernel.solid_count(), 0);
}

#[test]
fn cancelled_build_releases_partial_solid() {
    let mut kernel = MockKernel::new();
    let heightmap = year(&[(0, 1), (1, 1), (2, 1), (3, 1)]);
    let err = build_trophy(&mut kernel, &heightmap, &TrophyConfig::flat(), |p| {
        if p.fraction() >= 0.5 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .unwrap_err();

    assert!(matches!(
        err,
        TrophyError::Assemble(AssembleError::Cancelled {
            merged: 2,
            total: 4
        })
    ));
    assert_eq!(kernel.solid_count(), 0);
}

#[test]
fn released_trophy_leaves_kernel_empty() {
    let mut kernel = MockKernel::new();
    let trophy = build(&mut kernel, &year(&[(9, 9)]), &TrophyConfig::pyramid()).unwrap();
    kernel.release(trophy.solid);
    assert_eq!(kernel.solid_count(), 0);
}
