//! Scoped render state for the plane pass

use super::graphics::{BlendState, PlaneGraphics, PlaneUniforms, TextureHandle};
use super::plane_mesh::PlaneVertex;
use super::RenderResult;

/// Error-check label after the pass state is set up
pub const SETUP_OPERATION: &str = "setting up to draw planes";
/// Error-check label after each plane draw
pub const DRAW_OPERATION: &str = "drawing plane";
/// Error-check label after the pass state is restored
pub const CLEANUP_OPERATION: &str = "cleaning up after drawing planes";

/// Render state of the occlusion-ordered plane pass
///
/// While alive, depth writes are off and blending uses
/// [`BlendState::OCCLUSION_MASK`]. The previous state is restored by
/// [`finish`](Self::finish), or on drop when the pass is abandoned early.
pub struct OcclusionPass<'a, G: PlaneGraphics + ?Sized> {
    graphics: &'a mut G,
    restored: bool,
}

impl<'a, G: PlaneGraphics + ?Sized> OcclusionPass<'a, G> {
    /// Enter the plane pass
    ///
    /// If the setup check fails the state is restored before the error is
    /// returned.
    pub fn begin(graphics: &'a mut G, texture: TextureHandle, grid_control: [f32; 4]) -> RenderResult<Self> {
        let pass = Self {
            graphics,
            restored: false,
        };

        // Reset only the occlusion mask; the camera image stays
        pass.graphics.set_color_mask(false, true);
        pass.graphics.clear_color([1.0, 1.0, 1.0, 1.0]);
        pass.graphics.set_color_mask(true, true);

        pass.graphics.set_depth_write(false);
        pass.graphics.set_blend(Some(BlendState::OCCLUSION_MASK));

        pass.graphics.use_plane_program();
        pass.graphics.bind_texture(Some(texture));
        pass.graphics.set_grid_control(grid_control);
        pass.graphics.set_vertex_attribute_enabled(true);

        pass.graphics.check_error(SETUP_OPERATION)?;
        Ok(pass)
    }

    /// Draw one plane
    pub fn draw_plane(&mut self, uniforms: &PlaneUniforms, vertices: &[PlaneVertex], indices: &[u16]) -> RenderResult<()> {
        self.graphics.set_plane_uniforms(uniforms);
        self.graphics.draw_triangle_strip(vertices, indices);
        self.graphics.check_error(DRAW_OPERATION)
    }

    /// Leave the pass and check for errors
    pub fn finish(mut self) -> RenderResult<()> {
        self.restore();
        self.graphics.check_error(CLEANUP_OPERATION)
    }

    fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.graphics.set_vertex_attribute_enabled(false);
        self.graphics.bind_texture(None);
        self.graphics.set_blend(None);
        self.graphics.set_depth_write(true);
        self.restored = true;
    }
}

impl<G: PlaneGraphics + ?Sized> Drop for OcclusionPass<'_, G> {
    fn drop(&mut self) {
        if !self.restored {
            log::debug!("Plane pass abandoned; restoring render state");
            self.restore();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::GridTexture;
    use crate::render::backends::recording::{GraphicsCommand, RecordingGraphics};
    use crate::render::RenderError;

    const GRID: [f32; 4] = [0.2, 0.4, 2.0, 1.5];

    fn graphics_with_texture() -> (RecordingGraphics, TextureHandle) {
        let mut graphics = RecordingGraphics::new();
        let texture = graphics.upload_texture(&GridTexture::procedural(4));
        graphics.clear_recording();
        (graphics, texture)
    }

    #[test]
    fn test_pass_protocol_order() {
        let (mut graphics, texture) = graphics_with_texture();
        {
            let pass = OcclusionPass::begin(&mut graphics, texture, GRID).unwrap();
            pass.finish().unwrap();
        }

        assert_eq!(
            graphics.commands(),
            &[
                GraphicsCommand::SetColorMask { rgb: false, alpha: true },
                GraphicsCommand::ClearColor([1.0; 4]),
                GraphicsCommand::SetColorMask { rgb: true, alpha: true },
                GraphicsCommand::SetDepthWrite(false),
                GraphicsCommand::SetBlend(Some(BlendState::OCCLUSION_MASK)),
                GraphicsCommand::UsePlaneProgram,
                GraphicsCommand::BindTexture(Some(texture)),
                GraphicsCommand::SetGridControl(GRID),
                GraphicsCommand::SetVertexAttributeEnabled(true),
                GraphicsCommand::CheckError(SETUP_OPERATION.to_string()),
                GraphicsCommand::SetVertexAttributeEnabled(false),
                GraphicsCommand::BindTexture(None),
                GraphicsCommand::SetBlend(None),
                GraphicsCommand::SetDepthWrite(true),
                GraphicsCommand::CheckError(CLEANUP_OPERATION.to_string()),
            ]
        );
        assert!(graphics.state().is_default());
    }

    #[test]
    fn test_state_active_during_pass() {
        let (mut graphics, texture) = graphics_with_texture();
        let pass = OcclusionPass::begin(&mut graphics, texture, GRID).unwrap();
        assert!(!pass.graphics.state().depth_write);
        assert_eq!(pass.graphics.state().blend, Some(BlendState::OCCLUSION_MASK));
        assert!(pass.graphics.state().vertex_attribute_enabled);
        pass.finish().unwrap();
    }

    #[test]
    fn test_drop_restores_state() {
        let (mut graphics, texture) = graphics_with_texture();
        {
            let _pass = OcclusionPass::begin(&mut graphics, texture, GRID).unwrap();
        }
        assert!(graphics.state().is_default());
    }

    #[test]
    fn test_setup_error_restores_state() {
        let (mut graphics, texture) = graphics_with_texture();
        graphics.fail_on(SETUP_OPERATION, "GL_INVALID_OPERATION");

        let error = OcclusionPass::begin(&mut graphics, texture, GRID).err();
        match error {
            Some(RenderError::GraphicsApi { operation, message }) => {
                assert_eq!(operation, SETUP_OPERATION);
                assert_eq!(message, "GL_INVALID_OPERATION");
            }
            Some(other) => panic!("unexpected error: {}", other),
            None => panic!("setup should fail"),
        }
        assert!(graphics.state().is_default());
    }

    #[test]
    fn test_unknown_texture_fails_setup() {
        let mut graphics = RecordingGraphics::new();
        let error = OcclusionPass::begin(&mut graphics, TextureHandle(42), GRID).err();
        assert!(matches!(
            error,
            Some(RenderError::GraphicsApi { ref operation, .. }) if operation == SETUP_OPERATION
        ));
        assert!(graphics.state().is_default());
    }
}
