use crate::types::*;

/// Solid construction kernel. Implemented by TruckKernel (wraps real truck)
/// and MockKernel (deterministic test double).
///
/// Solids are owned by the kernel; callers hold handles. `boolean_union`
/// consumes both operand handles, so an accumulator can be folded without
/// ever keeping a handle to a solid the kernel has discarded.
pub trait Kernel {
    /// Create an axis-aligned box from its center and full extents.
    fn make_box(
        &mut self,
        center: [f64; 3],
        extents: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Create a solid bounded by six planar quads from 8 corners: bottom
    /// face counter-clockwise seen from +Z, then the top face in the same
    /// order. Each side quad must be planar.
    fn make_hexahedron(&mut self, corners: &[[f64; 3]; 8])
        -> Result<KernelSolidHandle, KernelError>;

    /// Boolean union of two solids. Both operands are consumed, on success
    /// and on failure alike.
    fn boolean_union(
        &mut self,
        a: KernelSolidHandle,
        b: KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Tessellate a solid to a triangle mesh.
    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError>;

    /// Drop a solid that is no longer needed.
    fn release(&mut self, solid: KernelSolidHandle);
}

/// Read-only queries on kernel solids.
pub trait KernelIntrospect {
    /// List all faces of a solid.
    fn list_faces(&self, solid: &KernelSolidHandle) -> Vec<KernelId>;

    /// List all vertices of a solid.
    fn list_vertices(&self, solid: &KernelSolidHandle) -> Vec<KernelId>;

    /// Axis-aligned bounds of a solid's vertices.
    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<Bounds>;

    /// Number of solids currently alive in the kernel.
    fn solid_count(&self) -> usize;
}
