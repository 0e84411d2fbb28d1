//! Plane and trackable contracts of the tracking service
//!
//! The tracking service owns planes and updates them between frames. This
//! crate only reads them, through the traits below, during a single frame.

use crate::foundation::math::{Point3, Pose, Vec2, Vec3};
use super::polygon;

/// Stable identity of a tracked plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaneId(pub u64);

/// Orientation class of a plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneType {
    /// Floors and table tops
    HorizontalUpwardFacing,
    /// Ceilings
    HorizontalDownwardFacing,
    /// Walls
    Vertical,
}

/// Tracking state reported for planes and anchors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingState {
    /// Currently tracked; pose and geometry are valid
    Tracking,
    /// Temporarily lost; may resume
    Paused,
    /// Will never be tracked again
    Stopped,
}

/// Anything the tracking service reports a tracking state for
pub trait Trackable {
    /// Current tracking state
    fn tracking_state(&self) -> TrackingState;

    /// Whether the state is [`TrackingState::Tracking`]
    fn is_tracking(&self) -> bool {
        self.tracking_state() == TrackingState::Tracking
    }
}

/// The part of a plane that placed content follows
pub trait PlaneSurface: Trackable {
    /// Pose of the plane's center; local +Y is the surface normal
    fn center_pose(&self) -> Pose;
}

/// Full read access to one tracked plane
pub trait TrackedPlane: PlaneSurface {
    /// Identity, stable across frames
    fn id(&self) -> PlaneId;

    /// Orientation class
    fn plane_type(&self) -> PlaneType;

    /// Extent along the plane's local X axis
    fn extent_x(&self) -> f32;

    /// Extent along the plane's local Z axis
    fn extent_z(&self) -> f32;

    /// Boundary polygon as (x, z) points in the plane's local frame
    ///
    /// `None` while the plane has no visible footprint yet.
    fn polygon(&self) -> Option<&[Vec2]>;

    /// The plane that merged this one, if any
    fn subsumed_by(&self) -> Option<PlaneId> {
        None
    }

    /// Whether a world-space point projects inside the boundary polygon
    fn is_point_in_polygon(&self, point: &Point3) -> bool {
        let local = self.center_pose().inverse_transform_point(point);
        self.polygon()
            .map_or(false, |boundary| polygon::contains_point(boundary, Vec2::new(local.x, local.z)))
    }

    /// Whether a world-space point projects inside the plane's extents rectangle
    fn is_point_in_extents(&self, point: &Point3) -> bool {
        let local = self.center_pose().inverse_transform_point(point);
        local.x.abs() <= self.extent_x() * 0.5 && local.z.abs() <= self.extent_z() * 0.5
    }

    /// Hit test for selecting a plane from a world-space point, e.g. a tap ray hit
    fn contains_world_point(&self, point: &Point3) -> bool {
        self.is_point_in_extents(point) && self.is_point_in_polygon(point)
    }

    /// Signed distance of a point above the plane surface
    fn signed_distance_to(&self, point: &Vec3) -> f32 {
        let pose = self.center_pose();
        (point - pose.position).dot(&pose.y_axis())
    }
}

/// Owned, frame-local copy of a plane
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneSnapshot {
    /// Plane identity
    pub id: PlaneId,
    /// Orientation class
    pub plane_type: PlaneType,
    /// Tracking state
    pub tracking_state: TrackingState,
    /// Center pose
    pub center_pose: Pose,
    /// Extent along local X
    pub extent_x: f32,
    /// Extent along local Z
    pub extent_z: f32,
    /// Boundary polygon in the local frame
    pub polygon: Option<Vec<Vec2>>,
    /// Merging plane, if subsumed
    pub subsumed_by: Option<PlaneId>,
}

impl PlaneSnapshot {
    /// Create a tracking, upward-facing plane
    pub fn horizontal(id: PlaneId, center_pose: Pose, extent_x: f32, extent_z: f32, polygon: Option<Vec<Vec2>>) -> Self {
        Self {
            id,
            plane_type: PlaneType::HorizontalUpwardFacing,
            tracking_state: TrackingState::Tracking,
            center_pose,
            extent_x,
            extent_z,
            polygon,
            subsumed_by: None,
        }
    }

    /// Create a horizontal plane whose boundary is its extents rectangle
    pub fn rectangle(id: PlaneId, center_pose: Pose, extent_x: f32, extent_z: f32) -> Self {
        let (hx, hz) = (extent_x * 0.5, extent_z * 0.5);
        let corners = vec![
            Vec2::new(hx, hz),
            Vec2::new(hx, -hz),
            Vec2::new(-hx, -hz),
            Vec2::new(-hx, hz),
        ];
        Self::horizontal(id, center_pose, extent_x, extent_z, Some(corners))
    }

    /// Set the orientation class
    pub fn with_type(mut self, plane_type: PlaneType) -> Self {
        self.plane_type = plane_type;
        self
    }

    /// Set the tracking state
    pub fn with_tracking_state(mut self, state: TrackingState) -> Self {
        self.tracking_state = state;
        self
    }

    /// Mark as merged into another plane
    pub fn with_subsumed_by(mut self, parent: PlaneId) -> Self {
        self.subsumed_by = Some(parent);
        self
    }
}

impl Trackable for PlaneSnapshot {
    fn tracking_state(&self) -> TrackingState {
        self.tracking_state
    }
}

impl PlaneSurface for PlaneSnapshot {
    fn center_pose(&self) -> Pose {
        self.center_pose
    }
}

impl TrackedPlane for PlaneSnapshot {
    fn id(&self) -> PlaneId {
        self.id
    }

    fn plane_type(&self) -> PlaneType {
        self.plane_type
    }

    fn extent_x(&self) -> f32 {
        self.extent_x
    }

    fn extent_z(&self) -> f32 {
        self.extent_z
    }

    fn polygon(&self) -> Option<&[Vec2]> {
        self.polygon.as_deref()
    }

    fn subsumed_by(&self) -> Option<PlaneId> {
        self.subsumed_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Quat;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangle_polygon_matches_extents() {
        let plane = PlaneSnapshot::rectangle(PlaneId(1), Pose::identity(), 2.0, 4.0);
        let boundary = plane.polygon().unwrap();
        assert_eq!(boundary.len(), 4);
        assert_eq!(boundary[0], Vec2::new(1.0, 2.0));
        assert_eq!(boundary[2], Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn test_point_selection_uses_plane_frame() {
        let pose = Pose::new(
            Vec3::new(10.0, -1.0, 0.0),
            Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2),
        );
        // 4 wide along local X, 1 deep along local Z; rotated so local X points down world -Z
        let plane = PlaneSnapshot::rectangle(PlaneId(7), pose, 4.0, 1.0);

        assert!(plane.is_point_in_polygon(&Point3::new(10.0, -1.0, 1.5)));
        assert!(!plane.is_point_in_polygon(&Point3::new(11.5, -1.0, 0.0)));
        assert!(plane.is_point_in_extents(&Point3::new(10.2, -1.0, -1.9)));
        assert!(plane.contains_world_point(&Point3::new(10.2, -1.0, -1.9)));
    }

    #[test]
    fn test_hit_test_requires_polygon_and_extents() {
        // Triangle footprint inside a 2x2 extents box
        let polygon = vec![Vec2::new(0.0, 1.0), Vec2::new(1.0, -1.0), Vec2::new(-1.0, -1.0)];
        let plane = PlaneSnapshot::horizontal(PlaneId(5), Pose::identity(), 2.0, 2.0, Some(polygon));

        assert!(plane.contains_world_point(&Point3::new(0.0, 0.0, 0.0)));
        // Inside extents but outside the triangle
        assert!(plane.is_point_in_extents(&Point3::new(0.9, 0.0, 0.9)));
        assert!(!plane.contains_world_point(&Point3::new(0.9, 0.0, 0.9)));
    }

    #[test]
    fn test_missing_polygon_selects_nothing() {
        let plane = PlaneSnapshot::horizontal(PlaneId(2), Pose::identity(), 1.0, 1.0, None);
        assert!(!plane.is_point_in_polygon(&Point3::origin()));
    }

    #[test]
    fn test_signed_distance_follows_normal() {
        let plane = PlaneSnapshot::rectangle(PlaneId(3), Pose::from_position(Vec3::new(0.0, 1.0, 0.0)), 1.0, 1.0);
        assert_relative_eq!(plane.signed_distance_to(&Vec3::new(5.0, 3.0, 2.0)), 2.0);
        assert_relative_eq!(plane.signed_distance_to(&Vec3::new(0.0, 0.5, 0.0)), -0.5);
    }

    #[test]
    fn test_trackable_state() {
        let plane = PlaneSnapshot::rectangle(PlaneId(4), Pose::identity(), 1.0, 1.0);
        assert!(plane.is_tracking());
        assert!(!plane.with_tracking_state(TrackingState::Paused).is_tracking());
    }
}
