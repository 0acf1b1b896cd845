//! Small `[f64; 3]` helpers shared by the planner and the kernels.

pub type Point3 = [f64; 3];
pub type Vector3 = [f64; 3];

pub fn sub(a: Point3, b: Point3) -> Vector3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn add(a: Point3, b: Vector3) -> Point3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn scale(v: Vector3, s: f64) -> Vector3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

pub fn length(v: Vector3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Unit vector along `v`, or `None` for a zero-length (or non-finite) input.
pub fn normalize(v: Vector3) -> Option<Vector3> {
    let len = length(v);
    if len < 1e-12 || !len.is_finite() {
        return None;
    }
    Some(scale(v, 1.0 / len))
}

/// Component sign: -1, 0 or 1. Unlike `f64::signum`, zero maps to zero.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
