//! Interface of the plane shader program
//!
//! The GLSL sources live in `shaders/plane.vert` and `shaders/plane.frag`.
//! Backends look attributes and uniforms up by these names.

/// Per-vertex (x, z, alpha) in plane space
pub const ATTRIBUTE_XZ_POSITION_ALPHA: &str = "a_XZPositionAlpha";

/// Plane-to-world matrix
pub const UNIFORM_MODEL: &str = "u_Model";

/// Plane-to-clip matrix
pub const UNIFORM_MODEL_VIEW_PROJECTION: &str = "u_ModelViewProjection";

/// Grid texture sampler
pub const UNIFORM_TEXTURE: &str = "u_Texture";

/// Grid line color
pub const UNIFORM_LINE_COLOR: &str = "u_lineColor";

/// Grid dot color
pub const UNIFORM_DOT_COLOR: &str = "u_dotColor";

/// Shared grid thresholds
pub const UNIFORM_GRID_CONTROL: &str = "u_gridControl";

/// Texture rotation and density
pub const UNIFORM_PLANE_UV_MATRIX: &str = "u_PlaneUvMatrix";

/// Texture unit the grid texture is bound to
pub const GRID_TEXTURE_UNIT: u32 = 0;

/// Floats per vertex fed to [`ATTRIBUTE_XZ_POSITION_ALPHA`]
pub const COORDS_PER_VERTEX: usize = 3;

/// Every uniform the program declares, for backends that resolve locations up front
pub const UNIFORMS: [&str; 7] = [
    UNIFORM_MODEL,
    UNIFORM_MODEL_VIEW_PROJECTION,
    UNIFORM_TEXTURE,
    UNIFORM_LINE_COLOR,
    UNIFORM_DOT_COLOR,
    UNIFORM_GRID_CONTROL,
    UNIFORM_PLANE_UV_MATRIX,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::plane_mesh::PlaneVertex;

    #[test]
    fn test_vertex_layout_matches_attribute() {
        assert_eq!(std::mem::size_of::<PlaneVertex>(), COORDS_PER_VERTEX * std::mem::size_of::<f32>());
    }

    #[test]
    fn test_shader_sources_declare_interface() {
        let vertex = include_str!("../../shaders/plane.vert");
        let fragment = include_str!("../../shaders/plane.frag");
        let combined = format!("{}\n{}", vertex, fragment);

        assert!(vertex.contains(ATTRIBUTE_XZ_POSITION_ALPHA));
        for uniform in UNIFORMS {
            assert!(combined.contains(uniform), "{} is not declared", uniform);
        }
    }
}
