//! # Plane Rendering
//!
//! Turns tracked planes into fading-edge grid meshes and draws them so that
//! nearer planes hide farther ones.
//!
//! ## Architecture
//!
//! - **Buffers**: [`GrowableBuffer`] and [`MeshBuffers`], reused across planes and frames
//! - **Mesh**: [`BoundaryMeshBuilder`] converts a boundary polygon into a triangle strip
//! - **Identity**: [`PlaneIndexSource`] gives every plane a stable index; [`PlaneStylist`]
//!   derives its colors and grid rotation
//! - **Drawing**: [`PlaneRenderer`] sorts and draws planes inside an [`OcclusionPass`]
//! - **Backend**: [`PlaneGraphics`] is the seam to the graphics API; [`RecordingGraphics`]
//!   is the headless implementation

pub mod buffer;
pub mod plane_mesh;
pub mod identity;
pub mod plane_style;
pub mod shader;
pub mod graphics;
pub mod render_state;
pub mod plane_renderer;

/// Graphics backend implementations
pub mod backends;

pub use buffer::GrowableBuffer;
pub use plane_mesh::{BoundaryMeshBuilder, MeshBuffers, MeshError, PlaneMesh, PlaneVertex};
pub use identity::{PlaneIndexSource, PlaneIndexRegistry, BoundedPlaneIndexRegistry};
pub use plane_style::{PlaneStyle, PlaneStylist};
pub use graphics::{PlaneGraphics, BackendResult, TextureHandle, PlaneUniforms, BlendFactor, BlendState};
pub use render_state::OcclusionPass;
pub use plane_renderer::{PlaneRenderer, FramePlaneStats, SortablePlane};
pub use backends::recording::{RecordingGraphics, GraphicsCommand};

use thiserror::Error;

use crate::config::ConfigError;

/// Plane rendering errors
///
/// Per-plane geometry problems are never reported here; they are logged and
/// the plane is skipped. These errors abort the current frame's plane pass.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The graphics API reported an error
    #[error("Graphics error while {operation}: {message}")]
    GraphicsApi {
        /// What the renderer was doing when the error was detected
        operation: String,
        /// Backend description of the error
        message: String,
    },

    /// The renderer configuration was rejected
    #[error("Invalid renderer configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
