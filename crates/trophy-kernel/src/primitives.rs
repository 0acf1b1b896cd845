//! Primitive solid builders on top of truck's builder API.
//!
//! truck has no built-in box: boxes are successive translational sweeps.
//! Hexahedra with arbitrary (planar) sides are stitched face by face.

use truck_modeling::builder;
use truck_modeling::topology::{Edge, Face, Shell, Solid, Vertex, Wire};
use truck_modeling::{Point3, Vector3};

use crate::types::KernelError;

/// Create a box solid via successive translational sweeps.
/// Extends from `min` to `min + (w, h, d)`.
pub fn make_box(min: [f64; 3], w: f64, h: f64, d: f64) -> Solid {
    let v = builder::vertex(Point3::new(min[0], min[1], min[2]));
    let edge = builder::tsweep(&v, Vector3::new(w, 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, h, 0.0));
    builder::tsweep(&face, Vector3::new(0.0, 0.0, d))
}

/// Create a closed hexahedron from 8 corners.
///
/// Corners 0..4 form the bottom loop, counter-clockwise seen from +Z;
/// corner `i + 4` is the top corner above corner `i`. Every edge is shared
/// by exactly two faces, once in each direction, so the shell is closed and
/// oriented with outward normals.
pub fn make_hexahedron(corners: &[[f64; 3]; 8]) -> Result<Solid, KernelError> {
    let v: Vec<Vertex> = corners
        .iter()
        .map(|c| builder::vertex(Point3::new(c[0], c[1], c[2])))
        .collect();

    // bottom[i]: i -> i+1, top[i]: 4+i -> 4+i+1, rise[i]: i -> 4+i
    let bottom: Vec<Edge> = (0..4).map(|i| builder::line(&v[i], &v[(i + 1) % 4])).collect();
    let top: Vec<Edge> = (0..4)
        .map(|i| builder::line(&v[4 + i], &v[4 + (i + 1) % 4]))
        .collect();
    let rise: Vec<Edge> = (0..4).map(|i| builder::line(&v[i], &v[4 + i])).collect();

    let mut faces: Vec<Face> = Vec::with_capacity(6);

    // Bottom loop reversed so the normal points down.
    let bottom_wire = Wire::from_iter(bottom.iter().rev().map(|e| e.inverse()));
    faces.push(planar_face(bottom_wire, "bottom")?);

    let top_wire = Wire::from_iter(top.iter().cloned());
    faces.push(planar_face(top_wire, "top")?);

    for i in 0..4 {
        let j = (i + 1) % 4;
        let side = Wire::from_iter([
            bottom[i].clone(),
            rise[j].clone(),
            top[i].inverse(),
            rise[i].inverse(),
        ]);
        faces.push(planar_face(side, "side")?);
    }

    Solid::try_new(vec![Shell::from(faces)]).map_err(|e| KernelError::InvalidPrimitive {
        reason: format!("hexahedron shell is not closed: {}", e),
    })
}

fn planar_face(wire: Wire, which: &str) -> Result<Face, KernelError> {
    builder::try_attach_plane(&[wire]).map_err(|e| KernelError::InvalidPrimitive {
        reason: format!("{} face is not planar: {}", which, e),
    })
}
