//! Math utilities and types
//!
//! Provides the fundamental math types shared by the tracking seam, the mesh
//! builder and the plane renderer.

pub use nalgebra::{
    Vector2, Vector3,
    Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Rigid transform reported by the tracking service
///
/// A pose has no scale: it maps a local frame (plane, anchor or camera) into
/// world space by a rotation followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Translation in world space
    pub position: Vec3,

    /// Orientation of the local frame
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl Pose {
    /// Create a pose from position and rotation
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create the identity pose
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a pose with only a translation
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Convert to a local-to-world matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position) * self.rotation.to_homogeneous()
    }

    /// Get the inverse pose (world-to-local)
    pub fn inverse(&self) -> Pose {
        let inv_rotation = self.rotation.inverse();
        Pose {
            position: inv_rotation * (-self.position),
            rotation: inv_rotation,
        }
    }

    /// Map a point from the local frame into world space
    pub fn transform_point(&self, point: &Point3) -> Point3 {
        Point3::from(self.rotation * point.coords + self.position)
    }

    /// Map a world-space point into the local frame
    pub fn inverse_transform_point(&self, point: &Point3) -> Point3 {
        Point3::from(self.rotation.inverse() * (point.coords - self.position))
    }

    /// The local +Y axis expressed in world space
    ///
    /// For a plane this is the surface normal.
    pub fn y_axis(&self) -> Vec3 {
        self.rotation * Vec3::y()
    }

    /// Copy of this pose with the world height replaced
    pub fn with_height(&self, y: f32) -> Pose {
        let mut pose = *self;
        pose.position.y = y;
        pose
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create an OpenGL-style perspective projection matrix
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // Clip-space depth in [-1, 1], matching the GLES plane shader
        Mat4::new_perspective(aspect, fov_y, near, far)
    }
}

/// Math utility functions
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }
}
