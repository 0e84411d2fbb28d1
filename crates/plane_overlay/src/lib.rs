//! # Plane Overlay
//!
//! Visualization of detected AR surfaces: fading-edge grid meshes built from
//! tracked plane boundaries, drawn so nearer planes hide farther ones, plus
//! placement of virtual content at a plane's height.
//!
//! ## Features
//!
//! - **Boundary Meshes**: one triangle strip per plane with a soft rim
//! - **Occlusion Ordering**: nearest-first drawing against an alpha mask
//! - **Stable Identity**: per-plane colors and grid rotation that survive across frames
//! - **Attachments**: content that follows an anchor but rests on a plane
//! - **Pluggable Backend**: any graphics API behind [`render::PlaneGraphics`]
//!
//! ## Quick Start
//!
//! ```rust
//! use plane_overlay::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PlaneRendererConfig::default();
//!     let mut graphics = RecordingGraphics::new();
//!     let mut renderer = PlaneRenderer::create(&mut graphics, &config, &GridTexture::procedural(64))?;
//!
//!     let floor = PlaneSnapshot::rectangle(PlaneId(1), Pose::identity(), 2.0, 3.0);
//!     let camera = CameraFrame::perspective(Pose::from_position(Vec3::new(0.0, 1.5, 0.0)), 60.0, 1.0, 0.1, 100.0);
//!
//!     let stats = renderer.draw_planes(&mut graphics, &[floor], &camera)?;
//!     assert_eq!(stats.drawn, 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Crate configuration
pub mod core;
pub mod config;

pub mod foundation;
pub mod assets;
pub mod tracking;
pub mod render;
pub mod anchoring;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        anchoring::{PlaneAttachment, PlaneAttachments},
        assets::{AssetError, GridTexture},
        config::{Config, ConfigError, ConfigFormat},
        core::config::{AttachmentConfig, OverlayConfig, PlaneRendererConfig},
        foundation::math::{Mat4, Point3, Pose, Quat, Vec2, Vec3},
        render::{
            FramePlaneStats, PlaneGraphics, PlaneIndexSource, PlaneRenderer, RecordingGraphics, RenderError,
            RenderResult,
        },
        tracking::{
            CameraFrame, PlaneId, PlaneSnapshot, PlaneSurface, PlaneType, StaticAnchor, Trackable,
            TrackedAnchor, TrackedPlane, TrackingState,
        },
    };
}
