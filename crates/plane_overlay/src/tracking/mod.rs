//! Tracking service seam
//!
//! Planes, anchors and camera frames come from an external tracking service.
//! These types describe what the renderer and the attachment logic read from
//! it; nothing here estimates poses.

pub mod plane;
pub mod anchor;
pub mod camera;
pub mod polygon;

pub use plane::{PlaneId, PlaneType, TrackingState, Trackable, PlaneSurface, TrackedPlane, PlaneSnapshot};
pub use anchor::{TrackedAnchor, StaticAnchor};
pub use camera::CameraFrame;
