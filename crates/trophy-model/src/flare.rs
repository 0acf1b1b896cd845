use trophy_types::vec3::{self, Point3};

/// Bottom-face membership tolerance on Z.
const BOTTOM_EPS: f64 = 1e-9;

/// Push the bottom-face points of a box outward to form a frustum skirt.
///
/// Points whose Z equals the lowest Z of `points` move by `amount` along X
/// and Y, away from `center`, following the sign of the normalized
/// center-to-point direction. Every other point is returned unchanged. A
/// point straight below `center` on some axis does not move on that axis.
pub fn flare_base(points: &[Point3], center: Point3, amount: f64) -> Vec<Point3> {
    let Some(bottom) = points.iter().map(|p| p[2]).reduce(f64::min) else {
        return Vec::new();
    };

    points
        .iter()
        .map(|&p| {
            if (p[2] - bottom).abs() > BOTTOM_EPS {
                return p;
            }
            match vec3::normalize(vec3::sub(p, center)) {
                Some(dir) => [
                    p[0] + vec3::sign(dir[0]) * amount,
                    p[1] + vec3::sign(dir[1]) * amount,
                    p[2],
                ],
                None => p,
            }
        })
        .collect()
}
