//! Headless backend that records every call
//!
//! Tracks the render state the calls leave behind, copies every draw, and
//! reports errors the way an immediate-mode API does: out-of-range indices and
//! draws without an enabled vertex attribute raise an error that the next
//! [`check_error`](PlaneGraphics::check_error) returns. Errors can also be
//! injected for a given operation label.

use crate::assets::GridTexture;
use crate::render::graphics::{BackendResult, BlendState, PlaneGraphics, PlaneUniforms, TextureHandle};
use crate::render::plane_mesh::PlaneVertex;
use crate::render::RenderError;

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsCommand {
    /// Texture uploaded
    UploadTexture {
        /// Handle returned
        handle: TextureHandle,
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// Color mask changed
    SetColorMask {
        /// RGB writes enabled
        rgb: bool,
        /// Alpha writes enabled
        alpha: bool,
    },
    /// Color buffer cleared
    ClearColor([f32; 4]),
    /// Depth writes toggled
    SetDepthWrite(bool),
    /// Blending changed
    SetBlend(Option<BlendState>),
    /// Plane program made current
    UsePlaneProgram,
    /// Texture bound or unbound
    BindTexture(Option<TextureHandle>),
    /// Vertex attribute array toggled
    SetVertexAttributeEnabled(bool),
    /// Grid control uniform set
    SetGridControl([f32; 4]),
    /// Per-plane uniforms set
    SetPlaneUniforms(PlaneUniforms),
    /// Triangle strip drawn
    DrawTriangleStrip {
        /// Vertices supplied
        vertex_count: usize,
        /// Indices drawn
        index_count: usize,
    },
    /// Error check performed
    CheckError(String),
}

/// Copy of one draw call and the uniforms in effect
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    /// Uniforms set before the draw
    pub uniforms: Option<PlaneUniforms>,
    /// Vertices supplied
    pub vertices: Vec<PlaneVertex>,
    /// Strip indices
    pub indices: Vec<u16>,
}

/// Render state left behind by the recorded calls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedState {
    /// Color mask (rgb, alpha)
    pub color_mask: (bool, bool),
    /// Depth writes enabled
    pub depth_write: bool,
    /// Active blending
    pub blend: Option<BlendState>,
    /// Bound texture
    pub bound_texture: Option<TextureHandle>,
    /// Vertex attribute array enabled
    pub vertex_attribute_enabled: bool,
    /// Alpha of the last clear that reached the alpha channel
    pub cleared_alpha: Option<f32>,
}

impl Default for RecordedState {
    fn default() -> Self {
        Self {
            color_mask: (true, true),
            depth_write: true,
            blend: None,
            bound_texture: None,
            vertex_attribute_enabled: false,
            cleared_alpha: None,
        }
    }
}

impl RecordedState {
    /// Whether the state matches what the rest of the frame expects
    pub fn is_default(&self) -> bool {
        self.color_mask == (true, true)
            && self.depth_write
            && self.blend.is_none()
            && self.bound_texture.is_none()
            && !self.vertex_attribute_enabled
    }
}

/// Recording [`PlaneGraphics`] implementation
#[derive(Debug, Default)]
pub struct RecordingGraphics {
    commands: Vec<GraphicsCommand>,
    draws: Vec<RecordedDraw>,
    state: RecordedState,
    current_uniforms: Option<PlaneUniforms>,
    textures: Vec<TextureHandle>,
    next_texture: u64,
    pending_error: Option<String>,
    injected: Vec<(String, String)>,
}

impl RecordingGraphics {
    /// Create a backend with default render state
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next error check labelled `operation` with `message`
    pub fn fail_on(&mut self, operation: &str, message: &str) {
        self.injected.push((operation.to_string(), message.to_string()));
    }

    /// Every call so far
    pub fn commands(&self) -> &[GraphicsCommand] {
        &self.commands
    }

    /// Every draw so far
    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// Current render state
    pub fn state(&self) -> &RecordedState {
        &self.state
    }

    /// Textures uploaded so far
    pub fn textures(&self) -> &[TextureHandle] {
        &self.textures
    }

    /// Forget recorded calls and draws, keeping state and textures
    pub fn clear_recording(&mut self) {
        self.commands.clear();
        self.draws.clear();
    }

    fn raise(&mut self, message: impl Into<String>) {
        // First error wins until checked, like glGetError
        if self.pending_error.is_none() {
            self.pending_error = Some(message.into());
        }
    }
}

impl PlaneGraphics for RecordingGraphics {
    fn upload_texture(&mut self, texture: &GridTexture) -> TextureHandle {
        let handle = TextureHandle(self.next_texture);
        self.next_texture += 1;
        if texture.size_bytes() != texture.width as usize * texture.height as usize * 4 {
            self.raise("GL_INVALID_VALUE: texture data does not match its dimensions");
        }
        self.textures.push(handle);
        self.commands.push(GraphicsCommand::UploadTexture {
            handle,
            width: texture.width,
            height: texture.height,
        });
        handle
    }

    fn set_color_mask(&mut self, rgb: bool, alpha: bool) {
        self.state.color_mask = (rgb, alpha);
        self.commands.push(GraphicsCommand::SetColorMask { rgb, alpha });
    }

    fn clear_color(&mut self, color: [f32; 4]) {
        if self.state.color_mask.1 {
            self.state.cleared_alpha = Some(color[3]);
        }
        self.commands.push(GraphicsCommand::ClearColor(color));
    }

    fn set_depth_write(&mut self, enabled: bool) {
        self.state.depth_write = enabled;
        self.commands.push(GraphicsCommand::SetDepthWrite(enabled));
    }

    fn set_blend(&mut self, blend: Option<BlendState>) {
        self.state.blend = blend;
        self.commands.push(GraphicsCommand::SetBlend(blend));
    }

    fn use_plane_program(&mut self) {
        self.commands.push(GraphicsCommand::UsePlaneProgram);
    }

    fn bind_texture(&mut self, texture: Option<TextureHandle>) {
        if let Some(handle) = texture {
            if !self.textures.contains(&handle) {
                self.raise(format!("GL_INVALID_VALUE: unknown texture {:?}", handle));
            }
        }
        self.state.bound_texture = texture;
        self.commands.push(GraphicsCommand::BindTexture(texture));
    }

    fn set_vertex_attribute_enabled(&mut self, enabled: bool) {
        self.state.vertex_attribute_enabled = enabled;
        self.commands.push(GraphicsCommand::SetVertexAttributeEnabled(enabled));
    }

    fn set_grid_control(&mut self, grid_control: [f32; 4]) {
        self.commands.push(GraphicsCommand::SetGridControl(grid_control));
    }

    fn set_plane_uniforms(&mut self, uniforms: &PlaneUniforms) {
        self.current_uniforms = Some(*uniforms);
        self.commands.push(GraphicsCommand::SetPlaneUniforms(*uniforms));
    }

    fn draw_triangle_strip(&mut self, vertices: &[PlaneVertex], indices: &[u16]) {
        if !indices.is_empty() && !self.state.vertex_attribute_enabled {
            self.raise("GL_INVALID_OPERATION: vertex attribute array disabled");
        }
        if let Some(index) = indices.iter().find(|&&index| index as usize >= vertices.len()) {
            self.raise(format!("GL_INVALID_VALUE: index {} out of range for {} vertices", index, vertices.len()));
        }

        self.commands.push(GraphicsCommand::DrawTriangleStrip {
            vertex_count: vertices.len(),
            index_count: indices.len(),
        });
        self.draws.push(RecordedDraw {
            uniforms: self.current_uniforms,
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
        });
    }

    fn check_error(&mut self, operation: &str) -> BackendResult<()> {
        self.commands.push(GraphicsCommand::CheckError(operation.to_string()));

        let injected = self.injected.iter().position(|(label, _)| label == operation);
        let message = match injected {
            Some(position) => Some(self.injected.remove(position).1),
            None => self.pending_error.take(),
        };

        match message {
            Some(message) => {
                log::error!("Graphics error while {}: {}", operation, message);
                Err(RenderError::GraphicsApi {
                    operation: operation.to_string(),
                    message,
                })
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_index_raises_error() {
        let mut graphics = RecordingGraphics::new();
        graphics.set_vertex_attribute_enabled(true);
        graphics.draw_triangle_strip(&[PlaneVertex::default(); 3], &[0, 1, 3]);

        let err = graphics.check_error("drawing plane").unwrap_err();
        assert!(err.to_string().contains("out of range"));
        // Checking clears the error
        assert!(graphics.check_error("drawing plane").is_ok());
    }

    #[test]
    fn test_draw_without_attribute_raises_error() {
        let mut graphics = RecordingGraphics::new();
        graphics.draw_triangle_strip(&[PlaneVertex::default(); 3], &[0, 1, 2]);
        assert!(graphics.check_error("drawing plane").is_err());
    }

    #[test]
    fn test_empty_draw_is_valid() {
        let mut graphics = RecordingGraphics::new();
        graphics.draw_triangle_strip(&[], &[]);
        assert!(graphics.check_error("drawing plane").is_ok());
        assert_eq!(graphics.draws().len(), 1);
    }

    #[test]
    fn test_injected_error_matches_label_once() {
        let mut graphics = RecordingGraphics::new();
        graphics.fail_on("drawing plane", "GL_OUT_OF_MEMORY");

        assert!(graphics.check_error("setting up to draw planes").is_ok());
        assert!(graphics.check_error("drawing plane").is_err());
        assert!(graphics.check_error("drawing plane").is_ok());
    }

    #[test]
    fn test_texture_upload_and_bind() {
        let mut graphics = RecordingGraphics::new();
        let handle = graphics.upload_texture(&GridTexture::procedural(4));
        graphics.bind_texture(Some(handle));
        assert!(graphics.check_error("binding").is_ok());
        assert_eq!(graphics.state().bound_texture, Some(handle));

        graphics.bind_texture(Some(TextureHandle(99)));
        assert!(graphics.check_error("binding").is_err());
    }

    #[test]
    fn test_masked_clear_only_touches_alpha() {
        let mut graphics = RecordingGraphics::new();
        graphics.set_color_mask(true, false);
        graphics.clear_color([0.0; 4]);
        assert_eq!(graphics.state().cleared_alpha, None);

        graphics.set_color_mask(false, true);
        graphics.clear_color([1.0; 4]);
        assert_eq!(graphics.state().cleared_alpha, Some(1.0));
    }
}
