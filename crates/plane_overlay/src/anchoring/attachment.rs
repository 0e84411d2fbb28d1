//! Anchor-plus-plane pairing

use crate::foundation::math::Pose;
use crate::tracking::{PlaneSurface, TrackedAnchor};

/// Content placement following an anchor, resting on a plane
///
/// The pairing is fixed at creation; the pose is recomputed from the current
/// anchor and plane every time it is asked for.
#[derive(Debug, Clone)]
pub struct PlaneAttachment<P, A> {
    plane: P,
    anchor: A,
}

impl<P: PlaneSurface, A: TrackedAnchor> PlaneAttachment<P, A> {
    /// Pair a plane with an anchor
    pub fn new(plane: P, anchor: A) -> Self {
        Self { plane, anchor }
    }

    /// Whether both the plane and the anchor are tracking
    pub fn is_tracking(&self) -> bool {
        self.plane.is_tracking() && self.anchor.is_tracking()
    }

    /// Anchor pose with its height replaced by the plane's current height
    pub fn pose(&self) -> Pose {
        self.anchor.pose().with_height(self.plane.center_pose().position.y)
    }

    /// The plane content rests on
    pub fn plane(&self) -> &P {
        &self.plane
    }

    /// The anchor content follows
    pub fn anchor(&self) -> &A {
        &self.anchor
    }

    /// Detach the anchor and release the pairing
    pub fn detach(mut self) {
        self.anchor.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use crate::foundation::math::{Quat, Vec3};
    use crate::tracking::{StaticAnchor, Trackable, TrackingState};
    use approx::assert_relative_eq;

    /// Plane whose height the test moves between frames
    struct MovingPlane {
        height: Cell<f32>,
        state: Cell<TrackingState>,
    }

    impl MovingPlane {
        fn at(height: f32) -> Self {
            Self {
                height: Cell::new(height),
                state: Cell::new(TrackingState::Tracking),
            }
        }
    }

    impl Trackable for &MovingPlane {
        fn tracking_state(&self) -> TrackingState {
            self.state.get()
        }
    }

    impl PlaneSurface for &MovingPlane {
        fn center_pose(&self) -> Pose {
            Pose::from_position(Vec3::new(4.0, self.height.get(), -2.0))
        }
    }

    #[test]
    fn test_pose_takes_height_from_plane() {
        let plane = MovingPlane::at(0.5);
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), 0.7);
        let anchor = StaticAnchor::new(Pose::new(Vec3::new(1.0, 0.8, 2.0), rotation));
        let attachment = PlaneAttachment::new(&plane, anchor);

        let pose = attachment.pose();
        assert_relative_eq!(pose.position, Vec3::new(1.0, 0.5, 2.0));
        assert_relative_eq!(pose.rotation, rotation);
    }

    #[test]
    fn test_pose_follows_plane_refinement() {
        let plane = MovingPlane::at(0.0);
        let attachment = PlaneAttachment::new(&plane, StaticAnchor::new(Pose::from_position(Vec3::new(1.0, 0.1, 1.0))));

        plane.height.set(-0.25);
        assert_relative_eq!(attachment.pose().position.y, -0.25);
        assert_relative_eq!(attachment.pose().position.x, 1.0);
    }

    #[test]
    fn test_tracking_requires_both() {
        let plane = MovingPlane::at(0.0);
        let mut anchor = StaticAnchor::new(Pose::identity());
        assert!(PlaneAttachment::new(&plane, anchor.clone()).is_tracking());

        anchor.set_tracking_state(TrackingState::Paused);
        assert!(!PlaneAttachment::new(&plane, anchor).is_tracking());

        let attachment = PlaneAttachment::new(&plane, StaticAnchor::new(Pose::identity()));
        plane.state.set(TrackingState::Stopped);
        assert!(!attachment.is_tracking());
    }
}
