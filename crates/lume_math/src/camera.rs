use crate::{DVec4, Mat4, Vec3};

/// Tolerance for detecting a camera looking straight up or down.
const POLE_EPSILON: f64 = 1e-8;

/// Build the camera-to-world transform for a camera at `from` looking at `to`.
///
/// The camera looks down its local -Z axis. Columns of the result are the
/// world-space right, up and backward axes plus the camera position, so
/// `transform_point3` maps camera-space points into the world.
pub fn camera_to_world(from: Vec3, to: Vec3) -> Mat4 {
    let forward = (from - to).normalize();

    // World up is parallel to the view axis at the poles, pick another hint there
    let up_hint = if (forward - Vec3::Y).length() < POLE_EPSILON {
        Vec3::NEG_Z
    } else if (forward - Vec3::NEG_Y).length() < POLE_EPSILON {
        Vec3::Z
    } else {
        Vec3::Y
    };

    let right = up_hint.cross(forward).normalize();
    let up = forward.cross(right);

    Mat4::from_cols(
        right.extend(0.0),
        up.extend(0.0),
        forward.extend(0.0),
        DVec4::new(from.x, from.y, from.z, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERR: f64 = 1e-9;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < ERR, "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_view_is_identity_rotation() {
        let m = camera_to_world(Vec3::ZERO, Vec3::NEG_Z);

        assert_close(m.transform_point3(Vec3::ZERO), Vec3::ZERO);
        assert_close(m.transform_point3(Vec3::X), Vec3::X);
        assert_close(m.transform_point3(Vec3::Y), Vec3::Y);
        assert_close(m.transform_point3(Vec3::NEG_Z), Vec3::NEG_Z);
    }

    #[test]
    fn test_translation() {
        let from = Vec3::new(1.0, 2.0, 3.0);
        let m = camera_to_world(from, Vec3::new(1.0, 2.0, 0.0));

        assert_close(m.transform_point3(Vec3::ZERO), from);
        assert_close(m.transform_point3(Vec3::NEG_Z), Vec3::new(1.0, 2.0, 2.0));
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let m = camera_to_world(Vec3::new(-0.5, 1.5, 0.98), Vec3::new(0.0, 1.0, 0.0));
        let right = m.x_axis.truncate();
        let up = m.y_axis.truncate();
        let forward = m.z_axis.truncate();

        assert!((right.length() - 1.0).abs() < ERR);
        assert!((up.length() - 1.0).abs() < ERR);
        assert!((forward.length() - 1.0).abs() < ERR);
        assert!(right.dot(up).abs() < ERR);
        assert!(right.dot(forward).abs() < ERR);
        assert!(up.dot(forward).abs() < ERR);
    }

    #[test]
    fn test_looking_straight_down() {
        let m = camera_to_world(Vec3::new(0.0, 2.0, 0.0), Vec3::ZERO);

        // The view axis -Z maps onto world -Y
        let view = m.transform_point3(Vec3::NEG_Z) - m.transform_point3(Vec3::ZERO);
        assert_close(view, Vec3::NEG_Y);
        assert!(!m.x_axis.is_nan());
    }

    #[test]
    fn test_looking_straight_up() {
        let m = camera_to_world(Vec3::new(0.0, -2.0, 0.0), Vec3::ZERO);

        let view = m.transform_point3(Vec3::NEG_Z) - m.transform_point3(Vec3::ZERO);
        assert_close(view, Vec3::Y);
        assert!(!m.y_axis.is_nan());
    }
}
