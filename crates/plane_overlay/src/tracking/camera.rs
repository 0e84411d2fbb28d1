//! Per-frame camera data supplied by the tracking service

use crate::foundation::math::{Mat4, Mat4Ext, Pose, Vec3, utils};

/// Camera pose and projection for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct CameraFrame {
    /// Camera pose in world space
    pub pose: Pose,

    /// Projection matrix for the frame's near/far planes
    pub projection: Mat4,
}

impl CameraFrame {
    /// Create a frame from a pose and a projection matrix
    pub fn new(pose: Pose, projection: Mat4) -> Self {
        Self { pose, projection }
    }

    /// Create a frame with a perspective projection
    pub fn perspective(pose: Pose, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            pose,
            projection: Mat4::perspective(utils::deg_to_rad(fov_degrees), aspect, near, far),
        }
    }

    /// Camera position in world space
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// World-to-camera matrix
    pub fn view_matrix(&self) -> Mat4 {
        self.pose.inverse().to_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Point3, Quat};
    use approx::assert_relative_eq;

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let pose = Pose::new(
            Vec3::new(1.0, 1.5, 2.0),
            Quat::from_axis_angle(&Vec3::y_axis(), 0.4),
        );
        let frame = CameraFrame::perspective(pose, 60.0, 1.0, 0.1, 100.0);
        let eye = frame.view_matrix().transform_point(&Point3::from(pose.position));
        assert_relative_eq!(eye, Point3::origin(), epsilon = 1e-5);
    }
}
