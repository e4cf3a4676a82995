//! The vector algebra the track model is built on. Everything here is a pure
//! function over `nalgebra` types; angles are radians unless a name says
//! otherwise.

use nalgebra::{Matrix3, Point3, Unit, Vector3};

/// Axes shorter than this are treated as degenerate and rotations about them
/// become the identity.
const AXIS_EPSILON: f32 = 1e-12;

/// Move `current` toward `target` with exponential smoothing. The result
/// always lies between `current` and `target` and approaches the target
/// asymptotically; `rate` is the decay constant per second.
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    (current - target) * (-rate * dt).exp() + target
}

/// Rotate `point` about the line through `center` with direction `axis` by
/// `theta` radians (Rodrigues' formula). The axis does not need to be
/// normalized; a near-zero axis leaves the point untouched.
pub fn rotate_about_axis(
    center: Point3<f32>,
    axis: Vector3<f32>,
    point: Point3<f32>,
    theta: f32,
) -> Point3<f32> {
    if axis.norm_squared() < AXIS_EPSILON {
        return point;
    }
    let k = axis.normalize();
    let v = point - center;
    let (sin, cos) = theta.sin_cos();
    let rotated = v * cos + k.cross(&v) * sin + k * (k.dot(&v)) * (1.0 - cos);
    center + rotated
}

/// Rotate a free vector about an axis through the origin.
pub fn rotate_vector(v: Vector3<f32>, axis: Vector3<f32>, theta: f32) -> Vector3<f32> {
    rotate_about_axis(Point3::origin(), axis, Point3::from(v), theta).coords
}

/// Reflect `v` across the plane defined by `normal` and scale the result by
/// `elasticity`.
pub fn bounce(v: &Vector3<f32>, normal: &Unit<Vector3<f32>>, elasticity: f32) -> Vector3<f32> {
    (v - normal.into_inner() * (2.0 * v.dot(normal))) * elasticity
}

/// Remove the component of `v` along `normal`, leaving the part that lies in
/// the plane.
pub fn project_onto_plane(v: &Vector3<f32>, normal: &Unit<Vector3<f32>>) -> Vector3<f32> {
    v - normal.into_inner() * v.dot(normal)
}

/// Given two vectors, produce a third perpendicular to both. The result is
/// not normalized.
pub fn third_axis(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a.cross(b)
}

/// Coordinates of `a` relative to the basis {v1, v2, v3}. Returns `None` when
/// the basis is (numerically) linearly dependent.
pub fn coordinates_in_basis(
    v1: &Vector3<f32>,
    v2: &Vector3<f32>,
    v3: &Vector3<f32>,
    a: &Vector3<f32>,
) -> Option<Vector3<f32>> {
    let basis = Matrix3::from_columns(&[*v1, *v2, *v3]);
    basis.try_inverse().map(|inv| inv * a)
}

/// Signed smallest difference `a - b` between two angles in radians. The
/// result lies in `(-PI, PI]`.
pub fn angle_diff(a: f32, b: f32) -> f32 {
    use std::f32::consts::PI;
    let mut diff = (a - b) % (2.0 * PI);
    if diff > PI {
        diff -= 2.0 * PI;
    } else if diff <= -PI {
        diff += 2.0 * PI;
    }
    diff
}

#[cfg(test)]
mod tests {
    use crate::math;
    use nalgebra::{Point3, Unit, Vector3};
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-4;

    #[test]
    fn approach_never_overshoots() {
        let cases = [
            (0.0, 10.0, 5.0, 1.0 / 60.0),
            (10.0, 0.0, 5.0, 1.0 / 60.0),
            (-3.0, 3.0, 100.0, 10.0),
            (298.0, 298.0, 0.45, 1.0),
            (5.0, -5.0, 0.0, 1.0),
        ];
        for &(x, target, rate, dt) in &cases {
            let result = math::approach(x, target, rate, dt);
            let lo = x.min(target);
            let hi = x.max(target);
            assert!(
                lo - EPS <= result && result <= hi + EPS,
                "{} {} {}",
                x,
                target,
                result,
            );
        }
    }

    #[test]
    fn approach_is_asymptotic() {
        let mut speed = 0.0;
        for _ in 0..600 {
            speed = math::approach(speed, 298.0, 0.45, 1.0 / 60.0);
            assert!(speed < 298.0);
        }
        let before = speed;
        speed = math::approach(speed, 298.0, 0.45, 1.0 / 60.0);
        assert!(speed > before);
    }

    #[test]
    fn rotate_preserves_distance_from_center() {
        let center = Point3::new(1.0, -2.0, 3.0);
        let point = Point3::new(4.0, 0.5, -1.0);
        let axes = [
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-0.3, 0.2, 5.0),
        ];
        for axis in &axes {
            for &theta in &[0.1, FRAC_PI_2, PI, 4.2] {
                let rotated = math::rotate_about_axis(center, *axis, point, theta);
                let before = (point - center).norm();
                let after = (rotated - center).norm();
                assert!((before - after).abs() < EPS, "{} {}", before, after);
            }
        }
    }

    #[test]
    fn rotate_quarter_turn_about_y() {
        let rotated = math::rotate_vector(Vector3::new(1.0, 0.0, 0.0), Vector3::y(), FRAC_PI_2);
        assert!((rotated - Vector3::new(0.0, 0.0, -1.0)).norm() < EPS);
    }

    #[test]
    fn rotate_degenerate_axis_is_identity() {
        let point = Point3::new(1.0, 2.0, 3.0);
        let rotated = math::rotate_about_axis(Point3::origin(), Vector3::zeros(), point, 1.0);
        assert_eq!(rotated, point);
    }

    #[test]
    fn bounce_reflects_across_plane() {
        let v = Vector3::new(1.0, -1.0, 0.0);
        let n = Unit::new_normalize(Vector3::new(0.0, 1.0, 0.0));
        let bounced = math::bounce(&v, &n, 1.0);
        assert!((bounced - Vector3::new(1.0, 1.0, 0.0)).norm() < EPS);

        let damped = math::bounce(&v, &n, 0.5);
        assert!((damped - Vector3::new(0.5, 0.5, 0.0)).norm() < EPS);
    }

    #[test]
    fn project_removes_normal_component() {
        let v = Vector3::new(3.0, 4.0, 5.0);
        let n = Unit::new_normalize(Vector3::new(0.0, 1.0, 0.0));
        let flat = math::project_onto_plane(&v, &n);
        assert!(flat.dot(&n).abs() < EPS);
        assert!((flat - Vector3::new(3.0, 0.0, 5.0)).norm() < EPS);
    }

    #[test]
    fn coordinates_in_basis_round_trip() {
        let v1 = Vector3::new(1.0, 0.5, 0.0);
        let v2 = Vector3::new(0.0, 2.0, 0.0);
        let v3 = Vector3::new(0.0, -1.0, 3.0);
        let a = v1 * 2.0 + v2 * -0.5 + v3 * 1.25;
        let coords = math::coordinates_in_basis(&v1, &v2, &v3, &a).unwrap();
        assert!((coords - Vector3::new(2.0, -0.5, 1.25)).norm() < EPS);
    }

    #[test]
    fn coordinates_in_degenerate_basis() {
        let v1 = Vector3::new(1.0, 0.0, 0.0);
        let a = Vector3::new(1.0, 2.0, 3.0);
        assert!(math::coordinates_in_basis(&v1, &v1, &v1, &a).is_none());
    }

    #[test]
    fn angle_diff_wraps() {
        let cases = [
            (0.1, -0.1, 0.2),
            (PI - 0.05, -PI + 0.05, -0.1),
            (-PI + 0.05, PI - 0.05, 0.1),
            (0.0, 0.0, 0.0),
        ];
        for &(a, b, expected) in &cases {
            let diff = math::angle_diff(a, b);
            assert!((diff - expected).abs() < EPS, "{} {} {}", a, b, diff);
        }
    }
}
