//! Anchor contract of the tracking service

use crate::foundation::math::Pose;
use super::plane::{Trackable, TrackingState};

/// A tracked spatial point that virtual content is pinned to
pub trait TrackedAnchor: Trackable {
    /// Current pose of the anchor
    fn pose(&self) -> Pose;

    /// Stop tracking this anchor and release it in the tracking service
    fn detach(&mut self);
}

/// Anchor with a fixed pose, for offline scenes and tests
#[derive(Debug, Clone, PartialEq)]
pub struct StaticAnchor {
    pose: Pose,
    state: TrackingState,
}

impl StaticAnchor {
    /// Create a tracking anchor at a pose
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            state: TrackingState::Tracking,
        }
    }

    /// Move the anchor, as a tracking correction would
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Override the tracking state
    pub fn set_tracking_state(&mut self, state: TrackingState) {
        self.state = state;
    }
}

impl Trackable for StaticAnchor {
    fn tracking_state(&self) -> TrackingState {
        self.state
    }
}

impl TrackedAnchor for StaticAnchor {
    fn pose(&self) -> Pose {
        self.pose
    }

    fn detach(&mut self) {
        log::trace!("Detaching anchor at {:?}", self.pose.position);
        self.state = TrackingState::Stopped;
    }
}
