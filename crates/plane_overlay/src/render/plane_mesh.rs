//! Boundary mesh generation for tracked planes
//!
//! Each boundary point of a plane produces two vertices: an outer vertex on
//! the boundary with alpha 0 and an inner vertex pulled toward the center by
//! the fade radius with alpha 1. A single triangle strip then covers the
//! fading ring and the interior:
//!
//! ```text
//! perimeter:  outer[n-1], outer[0], inner[0], ..., outer[n-1], inner[n-1], inner[0]
//! interior:   inner[n-2], inner[1], inner[n-3], inner[2], ... (+ inner[n/2] when n is odd)
//! ```
//!
//! The perimeter pass ends on the edge inner[n-1]..inner[0], which is the
//! first edge of the interior zig-zag, so the strip never restarts. The
//! interior zig-zag is only free of overlaps when the boundary is star-shaped
//! about the plane center; tracked planes are convex in practice, and
//! [`BoundaryMeshBuilder::with_boundary_validation`] rejects the rest.

use thiserror::Error;

use crate::foundation::math::{Mat4, Vec2, Vec3};
use crate::tracking::{TrackedPlane, polygon};
use super::buffer::GrowableBuffer;

/// Vertices emitted per boundary point
pub const VERTICES_PER_BOUNDARY_POINT: usize = 2;

/// Strip indices emitted per boundary point
pub const INDICES_PER_BOUNDARY_POINT: usize = 3;

/// Largest boundary whose vertices are addressable with 16-bit indices
pub const MAX_BOUNDARY_POINTS: usize = (u16::MAX as usize + 1) / VERTICES_PER_BOUNDARY_POINT;

/// Plane-local vertex: position on the plane and edge fade
///
/// Bound to the `a_XZPositionAlpha` attribute as three floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneVertex {
    /// Local X
    pub x: f32,
    /// Local Z
    pub z: f32,
    /// 0 on the boundary, 1 inside the fade radius
    pub alpha: f32,
}

impl PlaneVertex {
    /// Create a vertex
    pub const fn new(x: f32, z: f32, alpha: f32) -> Self {
        Self { x, z, alpha }
    }
}

/// Reusable vertex and index storage for plane meshes
///
/// Owned by the renderer and handed to the builder by exclusive reference;
/// every build overwrites the previous plane's data.
#[derive(Debug, Clone)]
pub struct MeshBuffers {
    vertices: GrowableBuffer<PlaneVertex>,
    indices: GrowableBuffer<u16>,
}

impl MeshBuffers {
    /// Size the buffers for a boundary of `boundary_points` points
    pub fn for_boundary_points(boundary_points: usize) -> Self {
        Self {
            vertices: GrowableBuffer::with_capacity(boundary_points * VERTICES_PER_BOUNDARY_POINT),
            indices: GrowableBuffer::with_capacity(boundary_points * INDICES_PER_BOUNDARY_POINT),
        }
    }

    /// Vertices of the last built mesh
    pub fn vertices(&self) -> &[PlaneVertex] {
        self.vertices.as_slice()
    }

    /// Strip indices of the last built mesh
    pub fn indices(&self) -> &[u16] {
        self.indices.as_slice()
    }

    /// Vertex buffer capacity, in vertices
    pub fn vertex_capacity(&self) -> usize {
        self.vertices.capacity()
    }

    /// Index buffer capacity, in indices
    pub fn index_capacity(&self) -> usize {
        self.indices.capacity()
    }

    fn clear(&mut self) {
        self.vertices.reset(0);
        self.indices.reset(0);
    }
}

/// Per-plane mesh problems; the plane is skipped, the frame goes on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// The boundary has more points than 16-bit indices can address
    #[error("boundary has {count} points, at most {max} fit 16-bit indices")]
    TooManyBoundaryPoints {
        /// Points in the boundary
        count: usize,
        /// Largest supported boundary
        max: usize,
    },

    /// Boundary validation is on and the boundary is not star-shaped
    #[error("boundary of {count} points is not star-shaped about the plane center")]
    NotStarShaped {
        /// Points in the boundary
        count: usize,
    },
}

/// Description of the mesh currently held in a [`MeshBuffers`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneMesh {
    /// Plane-to-world transform
    pub model_matrix: Mat4,
    /// Plane up axis in world space
    pub normal: Vec3,
    /// Vertices written
    pub vertex_count: usize,
    /// Strip indices written
    pub index_count: usize,
}

impl PlaneMesh {
    /// Whether the mesh has nothing to draw
    pub fn is_empty(&self) -> bool {
        self.index_count == 0
    }
}

/// Converts plane boundaries into fading-edge triangle strips
#[derive(Debug, Clone)]
pub struct BoundaryMeshBuilder {
    fade_radius: f32,
    validate_boundaries: bool,
}

impl BoundaryMeshBuilder {
    /// Create a builder with the given fade radius
    pub fn new(fade_radius: f32) -> Self {
        Self {
            fade_radius,
            validate_boundaries: false,
        }
    }

    /// Reject boundaries that are not star-shaped about the plane center
    pub fn with_boundary_validation(mut self, enabled: bool) -> Self {
        self.validate_boundaries = enabled;
        self
    }

    /// Fade radius in plane units
    pub fn fade_radius(&self) -> f32 {
        self.fade_radius
    }

    /// Scale factors that move boundary points inward by the fade radius
    ///
    /// Planes narrower than twice the fade radius collapse the inner ring to
    /// the center.
    pub fn inset_scales(&self, extent_x: f32, extent_z: f32) -> (f32, f32) {
        (inset_scale(extent_x, self.fade_radius), inset_scale(extent_z, self.fade_radius))
    }

    /// Build the mesh of a tracked plane
    pub fn build_for<P: TrackedPlane + ?Sized>(&self, buffers: &mut MeshBuffers, plane: &P) -> Result<PlaneMesh, MeshError> {
        let plane_matrix = plane.center_pose().to_matrix();
        self.build(buffers, &plane_matrix, plane.extent_x(), plane.extent_z(), plane.polygon())
    }

    /// Build a mesh into `buffers`
    ///
    /// A missing boundary, or one with fewer than three points, yields an
    /// empty mesh without touching buffer capacity. On error the buffers are
    /// left empty.
    pub fn build(
        &self,
        buffers: &mut MeshBuffers,
        plane_matrix: &Mat4,
        extent_x: f32,
        extent_z: f32,
        boundary: Option<&[Vec2]>,
    ) -> Result<PlaneMesh, MeshError> {
        let mut mesh = PlaneMesh {
            model_matrix: *plane_matrix,
            normal: plane_matrix.transform_vector(&Vec3::y()),
            vertex_count: 0,
            index_count: 0,
        };

        let boundary = match boundary {
            Some(points) if points.len() >= 3 => points,
            _ => {
                buffers.clear();
                return Ok(mesh);
            }
        };

        let count = boundary.len();
        if count > MAX_BOUNDARY_POINTS {
            buffers.clear();
            return Err(MeshError::TooManyBoundaryPoints { count, max: MAX_BOUNDARY_POINTS });
        }
        if self.validate_boundaries && !polygon::is_star_shaped_about_center(boundary) {
            buffers.clear();
            return Err(MeshError::NotStarShaped { count });
        }

        mesh.vertex_count = count * VERTICES_PER_BOUNDARY_POINT;
        mesh.index_count = count * INDICES_PER_BOUNDARY_POINT;

        buffers.vertices.ensure_capacity(mesh.vertex_count);
        buffers.indices.ensure_capacity(mesh.index_count);
        buffers.vertices.reset(mesh.vertex_count);
        buffers.indices.reset(mesh.index_count);

        let (x_scale, z_scale) = self.inset_scales(extent_x, extent_z);
        for point in boundary {
            buffers.vertices.put(PlaneVertex::new(point.x, point.y, 0.0));
            buffers.vertices.put(PlaneVertex::new(point.x * x_scale, point.y * z_scale, 1.0));
        }

        write_strip_indices(&mut buffers.indices, count);
        debug_assert_eq!(buffers.vertices.remaining(), 0);
        debug_assert_eq!(buffers.indices.remaining(), 0);

        buffers.vertices.rewind();
        buffers.indices.rewind();
        Ok(mesh)
    }
}

fn inset_scale(extent: f32, fade_radius: f32) -> f32 {
    if extent > 0.0 {
        ((extent - 2.0 * fade_radius) / extent).max(0.0)
    } else {
        0.0
    }
}

fn outer(i: usize) -> u16 {
    (i * VERTICES_PER_BOUNDARY_POINT) as u16
}

fn inner(i: usize) -> u16 {
    (i * VERTICES_PER_BOUNDARY_POINT + 1) as u16
}

fn write_strip_indices(indices: &mut GrowableBuffer<u16>, count: usize) {
    // Fading ring; opening on outer[n-1] makes the first and last triangles
    // share the diagonal outer[n-1]..inner[0] of the wrap-around quad
    indices.put(outer(count - 1));
    for i in 0..count {
        indices.put(outer(i));
        indices.put(inner(i));
    }
    indices.put(inner(0));

    // Interior, zig-zagging across from the shared edge inner[n-1]..inner[0]
    for i in 1..count / 2 {
        indices.put(inner(count - 1 - i));
        indices.put(inner(i));
    }
    if count % 2 != 0 {
        indices.put(inner(count / 2));
    }
}
