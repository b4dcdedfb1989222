//! Rotation composition and safe vector helpers.

use nalgebra::{Rotation3, Vector3};

/// Compose a full orientation from per-axis angles.
///
/// The axis chain is fixed: Y first, then X, then Z (`Rz * Rx * Ry`). The
/// same composition must be applied to positions and to normals, otherwise
/// shading drifts away from the geometry it lights.
pub fn orientation(angles: &Vector3<f32>) -> Rotation3<f32> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angles.z)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), angles.x)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), angles.y)
}

/// Normalize `v`, falling back to `fallback` when the length is zero.
///
/// Degenerate inputs are expected during normal operation (a zero light
/// vector, a collapsed tangent) and must never abort a frame.
pub fn normalize_or(v: Vector3<f32>, fallback: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(1e-12).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_zero_angles_are_identity() {
        let rot = orientation(&Vector3::zeros());
        let v = Vector3::new(1.5, -2.0, 0.25);
        let rotated = rot * v;
        assert!((rotated - v).norm() < 1e-6);
    }

    #[test]
    fn test_axis_rotation_matches_plane_formula() {
        // quarter turn about x maps +y onto +z
        let rot = orientation(&Vector3::new(FRAC_PI_2, 0.0, 0.0));
        let rotated = rot * Vector3::new(0.0, 1.0, 0.0);
        assert!((rotated - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_chain_applies_y_then_x() {
        // +z goes to +x under the y rotation; the following x rotation
        // leaves it alone. The reverse order would yield -y instead.
        let rot = orientation(&Vector3::new(FRAC_PI_2, FRAC_PI_2, 0.0));
        let rotated = rot * Vector3::new(0.0, 0.0, 1.0);
        assert!((rotated - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_normalize_or_unit_output() {
        let v = normalize_or(Vector3::new(3.0, 4.0, 0.0), Vector3::x());
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_or_falls_back_on_zero() {
        let v = normalize_or(Vector3::zeros(), Vector3::y());
        assert_eq!(v, Vector3::y());
    }
}
