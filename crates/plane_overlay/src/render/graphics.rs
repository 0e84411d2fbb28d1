//! Backend abstraction for the plane pass
//!
//! Defines the narrow slice of a graphics API the plane renderer needs. Calls
//! are infallible in the style of immediate-mode APIs; errors accumulate in the
//! backend and surface at [`PlaneGraphics::check_error`].

use crate::assets::GridTexture;
use crate::foundation::math::Mat4;
use super::plane_mesh::PlaneVertex;
use super::RenderError;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Handle to a texture stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Source and destination blend factors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    /// 0
    Zero,
    /// 1
    One,
    /// Source alpha
    SrcAlpha,
    /// 1 - source alpha
    OneMinusSrcAlpha,
    /// Destination alpha
    DstAlpha,
    /// 1 - destination alpha
    OneMinusDstAlpha,
}

/// Separate RGB and alpha blend factors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendState {
    /// Source RGB factor
    pub src_rgb: BlendFactor,
    /// Destination RGB factor
    pub dst_rgb: BlendFactor,
    /// Source alpha factor
    pub src_alpha: BlendFactor,
    /// Destination alpha factor
    pub dst_alpha: BlendFactor,
}

impl BlendState {
    /// Additive color weighted by what is left of the destination alpha
    ///
    /// The color buffer's alpha starts at 1 and every plane drawn erases it by
    /// its own alpha, so a plane only shows where no nearer plane was drawn.
    pub const OCCLUSION_MASK: Self = Self {
        src_rgb: BlendFactor::DstAlpha,
        dst_rgb: BlendFactor::One,
        src_alpha: BlendFactor::Zero,
        dst_alpha: BlendFactor::OneMinusSrcAlpha,
    };
}

/// Per-plane uniform values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneUniforms {
    /// `u_Model`
    pub model: Mat4,
    /// `u_ModelViewProjection`
    pub model_view_projection: Mat4,
    /// `u_lineColor`
    pub line_color: [f32; 4],
    /// `u_dotColor`
    pub dot_color: [f32; 4],
    /// `u_PlaneUvMatrix`, column-major 2x2
    pub uv_matrix: [f32; 4],
}

/// Graphics API operations used by the plane renderer
///
/// Implemented by real GPU backends and by
/// [`RecordingGraphics`](super::backends::recording::RecordingGraphics).
pub trait PlaneGraphics {
    /// Upload a texture and return its handle
    fn upload_texture(&mut self, texture: &GridTexture) -> TextureHandle;

    /// Enable or disable writes to the RGB and alpha channels
    fn set_color_mask(&mut self, rgb: bool, alpha: bool);

    /// Clear the color buffer, limited by the color mask
    fn clear_color(&mut self, color: [f32; 4]);

    /// Enable or disable depth writes
    fn set_depth_write(&mut self, enabled: bool);

    /// Enable blending with the given factors, or disable it with `None`
    fn set_blend(&mut self, blend: Option<BlendState>);

    /// Make the plane program current
    fn use_plane_program(&mut self);

    /// Bind a texture to the grid texture unit, or unbind with `None`
    fn bind_texture(&mut self, texture: Option<TextureHandle>);

    /// Enable or disable the `a_XZPositionAlpha` attribute array
    fn set_vertex_attribute_enabled(&mut self, enabled: bool);

    /// Set `u_gridControl`
    fn set_grid_control(&mut self, grid_control: [f32; 4]);

    /// Set the per-plane uniforms
    fn set_plane_uniforms(&mut self, uniforms: &PlaneUniforms);

    /// Draw one indexed triangle strip
    fn draw_triangle_strip(&mut self, vertices: &[PlaneVertex], indices: &[u16]);

    /// Report any error raised since the last check
    ///
    /// `operation` names what the caller was doing and ends up in
    /// [`RenderError::GraphicsApi`].
    fn check_error(&mut self, operation: &str) -> BackendResult<()>;
}
