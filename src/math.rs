//! Spherical math helpers shared by the geometry and pathfinding modules
//!
//! Everything here operates on `glam::Vec3`. Interpolation between directions
//! uses slerp rather than lerp so intermediate points stay on the sphere, and
//! every normalization has an explicit fallback so degenerate inputs never
//! propagate NaN into the mesh.

use glam::Vec3;

/// Normalize a vector, falling back to the given direction when the input is
/// too short to normalize reliably.
///
/// Degenerate inputs occur in practice (e.g. the difference of two coincident
/// cell centroids during cliff orientation). The policy is to produce a valid,
/// possibly visually-wrong direction rather than NaN.
#[inline]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    const MIN_LEN_SQ: f32 = 1e-12;
    if v.length_squared() > MIN_LEN_SQ {
        v.normalize()
    } else {
        fallback
    }
}

/// Spherical linear interpolation between two directions.
///
/// Inputs need not be unit length; the result is always unit length.
/// Falls back to normalized lerp when the directions are nearly parallel.
pub fn slerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    let ua = normalize_or(a, Vec3::X);
    let ub = normalize_or(b, ua);

    let dot = ua.dot(ub).clamp(-1.0, 1.0);
    let theta = dot.acos();

    if theta.abs() < 1e-4 {
        return normalize_or(ua.lerp(ub, t), ua);
    }

    let sin_theta = theta.sin();
    let wa = ((1.0 - t) * theta).sin() / sin_theta;
    let wb = (t * theta).sin() / sin_theta;
    normalize_or(ua * wa + ub * wb, ua)
}

/// Great-circle angular distance between two directions, in radians.
///
/// Inputs need not be unit length. Symmetric, zero for coincident directions.
#[inline]
pub fn arc_angle(a: Vec3, b: Vec3) -> f32 {
    let ua = normalize_or(a, Vec3::X);
    let ub = normalize_or(b, Vec3::X);
    ua.dot(ub).clamp(-1.0, 1.0).acos()
}

/// Build an arbitrary orthogonal tangent basis around an outward normal.
///
/// The choice of reference axis avoids degeneracy when the normal is close to
/// a coordinate axis (e.g. cells at the poles). Returns `(t1, t2)` with
/// `t1 × t2` pointing along the normal, so angles measured as
/// `atan2(d·t2, d·t1)` increase counter-clockwise seen from outside.
pub fn tangent_basis(normal: Vec3) -> (Vec3, Vec3) {
    let n = normalize_or(normal, Vec3::Y);
    let reference = if n.y.abs() < 0.99 { Vec3::Y } else { Vec3::X };
    let t1 = normalize_or(reference.cross(n), Vec3::X);
    let t2 = normalize_or(n.cross(t1), Vec3::Z);
    (t1, t2)
}

/// Linear interpolation between two scalars.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_or_fallback() {
        let v = normalize_or(Vec3::ZERO, Vec3::Y);
        assert_eq!(v, Vec3::Y);

        let v = normalize_or(Vec3::new(3.0, 0.0, 0.0), Vec3::Y);
        assert!((v - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = Vec3::X;
        let b = Vec3::Y;

        assert!((slerp(a, b, 0.0) - a).length() < 1e-5);
        assert!((slerp(a, b, 1.0) - b).length() < 1e-5);
    }

    #[test]
    fn test_slerp_stays_on_sphere() {
        let a = Vec3::new(1.0, 0.2, -0.3).normalize();
        let b = Vec3::new(-0.4, 0.9, 0.1).normalize();

        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let p = slerp(a, b, t);
            assert!((p.length() - 1.0).abs() < 1e-5, "slerp left the unit sphere at t={}", t);
        }
    }

    #[test]
    fn test_slerp_midpoint_equidistant() {
        let a = Vec3::X;
        let b = Vec3::Z;
        let mid = slerp(a, b, 0.5);

        let da = arc_angle(a, mid);
        let db = arc_angle(mid, b);
        assert!((da - db).abs() < 1e-5);
    }

    #[test]
    fn test_slerp_nearly_parallel() {
        let a = Vec3::X;
        let b = Vec3::new(1.0, 1e-6, 0.0).normalize();
        let p = slerp(a, b, 0.5);
        assert!((p.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_arc_angle_properties() {
        let a = Vec3::new(0.3, 0.8, -0.2).normalize();
        let b = Vec3::new(-0.5, 0.1, 0.6).normalize();

        // Zero at coincidence, symmetric
        assert!(arc_angle(a, a) < 1e-6);
        assert!((arc_angle(a, b) - arc_angle(b, a)).abs() < 1e-6);

        // Quarter turn
        assert!((arc_angle(Vec3::X, Vec3::Y) - std::f32::consts::FRAC_PI_2).abs() < 1e-5);

        // Antipodal
        assert!((arc_angle(Vec3::X, -Vec3::X) - std::f32::consts::PI).abs() < 1e-5);
    }

    #[test]
    fn test_tangent_basis_orthogonal() {
        for n in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(0.6, 0.7, -0.4).normalize()] {
            let (t1, t2) = tangent_basis(n);
            assert!(t1.dot(n.normalize()).abs() < 1e-5);
            assert!(t2.dot(n.normalize()).abs() < 1e-5);
            assert!(t1.dot(t2).abs() < 1e-5);
            // Right-handed: t1 x t2 points along n
            assert!(t1.cross(t2).dot(n.normalize()) > 0.99);
        }
    }
}
