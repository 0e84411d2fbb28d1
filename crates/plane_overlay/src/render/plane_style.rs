//! Per-plane colors and grid orientation derived from the visual index

use crate::core::config::PlaneRendererConfig;

/// Ratio between the grid's V and U densities that keeps the dot pattern's
/// triangles equilateral
pub const EQUILATERAL_TRIANGLE_SCALE: f32 = 0.577_350_26; // 1 / sqrt(3)

/// Unpack `0xRRGGBBAA` into normalized RGBA floats
pub fn rgba_to_float(rgba: u32) -> [f32; 4] {
    [
        ((rgba >> 24) & 0xff) as f32 / 255.0,
        ((rgba >> 16) & 0xff) as f32 / 255.0,
        ((rgba >> 8) & 0xff) as f32 / 255.0,
        (rgba & 0xff) as f32 / 255.0,
    ]
}

/// Uniform values that make one plane look distinct
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneStyle {
    /// Palette slot used by the plane
    pub color_index: usize,
    /// Grid line color
    pub line_color: [f32; 4],
    /// Grid dot color
    pub dot_color: [f32; 4],
    /// Texture rotation, radians
    pub angle: f32,
    /// Column-major 2x2 rotation and density matrix for texture coordinates
    pub uv_matrix: [f32; 4],
}

/// Maps visual indices to [`PlaneStyle`]s
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneStylist {
    palette: Vec<[f32; 4]>,
    angle_step: f32,
    u_scale: f32,
    v_scale: f32,
}

impl PlaneStylist {
    /// Create a stylist
    ///
    /// An empty palette falls back to opaque white.
    pub fn new(palette: &[u32], angle_step: f32, dots_per_meter: f32) -> Self {
        let mut palette: Vec<[f32; 4]> = palette.iter().copied().map(rgba_to_float).collect();
        if palette.is_empty() {
            palette.push([1.0; 4]);
        }
        Self {
            palette,
            angle_step,
            u_scale: dots_per_meter,
            v_scale: dots_per_meter * EQUILATERAL_TRIANGLE_SCALE,
        }
    }

    /// Create a stylist from renderer configuration
    pub fn from_config(config: &PlaneRendererConfig) -> Self {
        Self::new(&config.palette, config.uv_angle_step, config.dots_per_meter)
    }

    /// Number of palette colors
    pub fn palette_len(&self) -> usize {
        self.palette.len()
    }

    /// Style for a visual index
    pub fn style_for(&self, index: usize) -> PlaneStyle {
        let color_index = index % self.palette.len();
        let color = self.palette[color_index];
        let angle = index as f32 * self.angle_step;
        let (sin, cos) = angle.sin_cos();

        PlaneStyle {
            color_index,
            line_color: color,
            dot_color: color,
            angle,
            uv_matrix: [
                cos * self.u_scale,
                -sin * self.v_scale,
                sin * self.u_scale,
                cos * self.v_scale,
            ],
        }
    }
}

impl Default for PlaneStylist {
    fn default() -> Self {
        Self::from_config(&PlaneRendererConfig::default())
    }
}
