//! Geometry kernel backed by the truck BREP library.

use crate::primitives;
use crate::tessellation;
use crate::traits::{Kernel, KernelIntrospect};
use crate::types::*;
use std::collections::{HashMap, HashSet};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, instrument, warn};

use truck_modeling::topology::{Shell, Solid};

/// Default tolerance passed to `truck_shapeops::or`.
///
/// Must stay well below the smallest feature gap of a trophy: the 0.01
/// lift between bars and pedestal.
pub const DEFAULT_UNION_TOLERANCE: f64 = 0.002;

/// Real geometry kernel backed by the truck BREP library.
pub struct TruckKernel {
    next_handle: u64,
    next_id: u64,
    tolerance: f64,
    solids: HashMap<u64, Solid>,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_UNION_TOLERANCE)
    }

    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            next_handle: 1,
            next_id: 1,
            tolerance,
            solids: HashMap::new(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn alloc_handle(&mut self) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    pub(crate) fn store_solid(&mut self, solid: Solid) -> KernelSolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        handle
    }

    pub(crate) fn get_solid(&self, handle: &KernelSolidHandle) -> Option<&Solid> {
        self.solids.get(&handle.id())
    }

    fn take_solid(&mut self, handle: &KernelSolidHandle) -> Result<Solid, KernelError> {
        self.solids
            .remove(&handle.id())
            .ok_or(KernelError::EntityNotFound { id: handle.id() })
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for TruckKernel {
    fn make_box(
        &mut self,
        center: [f64; 3],
        extents: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        if !extents.iter().all(|e| e.is_finite() && *e > 0.0) {
            return Err(KernelError::InvalidPrimitive {
                reason: format!("box extents must be positive, got {:?}", extents),
            });
        }
        let min = [
            center[0] - extents[0] * 0.5,
            center[1] - extents[1] * 0.5,
            center[2] - extents[2] * 0.5,
        ];
        let solid = primitives::make_box(min, extents[0], extents[1], extents[2]);
        Ok(self.store_solid(solid))
    }

    fn make_hexahedron(
        &mut self,
        corners: &[[f64; 3]; 8],
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid = primitives::make_hexahedron(corners)?;
        Ok(self.store_solid(solid))
    }

    #[instrument(skip(self), fields(tolerance = self.tolerance))]
    fn boolean_union(
        &mut self,
        a: KernelSolidHandle,
        b: KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid_a = self.take_solid(&a);
        let solid_b = self.take_solid(&b);
        let (solid_a, solid_b) = (solid_a?, solid_b?);

        let result = union_solids(solid_a, solid_b, self.tolerance)?;
        debug!(shells = result.boundaries().len(), "union done");
        Ok(self.store_solid(result))
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        let truck_solid = self
            .solids
            .get(&solid.id())
            .ok_or(KernelError::EntityNotFound { id: solid.id() })?;

        tessellation::tessellate_solid(truck_solid, tolerance, &mut self.next_id)
    }

    fn release(&mut self, solid: KernelSolidHandle) {
        self.solids.remove(&solid.id());
    }
}

fn shell_bounds(shell: &Shell) -> Option<Bounds> {
    Bounds::of_points(shell.vertex_iter().map(|v| {
        let p = v.point();
        [p[0], p[1], p[2]]
    }))
}

fn solid_bounds(solid: &Solid) -> Option<Bounds> {
    Bounds::of_points(solid.boundaries().iter().flat_map(|shell| {
        shell.vertex_iter().map(|v| {
            let p = v.point();
            [p[0], p[1], p[2]]
        })
    }))
}

fn assemble_shells(shells: Vec<Shell>) -> Result<Solid, KernelError> {
    Solid::try_new(shells).map_err(|e| KernelError::BooleanFailed {
        reason: format!("union result is not a valid solid: {}", e),
    })
}

/// Union two solids, keeping shells that do not touch `b` out of `or`.
///
/// `truck_shapeops::or` only handles single-shell operands, so shells of `a`
/// separated from `b` by more than `tolerance` are carried over unchanged
/// and only the touching ones are sent through the boolean.
fn union_solids(a: Solid, b: Solid, tolerance: f64) -> Result<Solid, KernelError> {
    let b_bounds = solid_bounds(&b).ok_or_else(|| KernelError::BooleanFailed {
        reason: "union operand has no vertices".to_string(),
    })?;

    let (apart, touching): (Vec<Shell>, Vec<Shell>) =
        a.into_boundaries().into_iter().partition(|shell| {
            shell_bounds(shell).map_or(true, |sb| sb.is_separated_from(&b_bounds, tolerance))
        });

    if touching.is_empty() {
        let mut shells = apart;
        shells.extend(b.into_boundaries());
        return assemble_shells(shells);
    }

    let touching = assemble_shells(touching)?;
    let merged = catch_unwind(AssertUnwindSafe(|| {
        truck_shapeops::or(&touching, &b, tolerance)
    }))
    .map_err(|_| {
        warn!("truck or() panicked");
        KernelError::BooleanFailed {
            reason: "truck or() panicked".to_string(),
        }
    })?
    .ok_or_else(|| KernelError::BooleanFailed {
        reason: "truck or() returned None".to_string(),
    })?;

    let mut shells = apart;
    shells.extend(merged.into_boundaries());
    assemble_shells(shells)
}

impl KernelIntrospect for TruckKernel {
    fn list_faces(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        let Some(s) = self.get_solid(solid) else {
            return Vec::new();
        };
        let count: usize = s
            .boundaries()
            .iter()
            .map(|shell| shell.face_iter().count())
            .sum();
        (0..count as u64).map(KernelId).collect()
    }

    fn list_vertices(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        let Some(s) = self.get_solid(solid) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        for shell in s.boundaries().iter() {
            for v in shell.vertex_iter() {
                seen.insert(v.id());
            }
        }
        (0..seen.len() as u64).map(KernelId).collect()
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<Bounds> {
        solid_bounds(self.get_solid(solid)?)
    }

    fn solid_count(&self) -> usize {
        self.solids.len()
    }
}
