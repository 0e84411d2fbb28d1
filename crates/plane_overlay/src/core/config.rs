//! # Overlay Configuration
//!
//! Configuration structures for the plane renderer and the attachment
//! collection. Every structure carries the reference defaults and can be
//! loaded from TOML or RON through the [`Config`] trait.
//!
//! ## Configuration Categories
//!
//! - **Plane renderer**: fade radius, buffer sizing, palette and grid texture
//! - **Attachments**: capacity of the placed-object collection

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError, ConfigFormat};

/// Inward distance over which a plane's opacity ramps from 0 to 1
pub const DEFAULT_FADE_RADIUS: f32 = 0.25;

/// Boundary point count the mesh buffers are sized for up front
pub const DEFAULT_INITIAL_BOUNDARY_VERTICES: usize = 64;

/// Per-plane texture rotation step, in radians per identity index
pub const DEFAULT_UV_ANGLE_STEP: f32 = 0.144;

/// Grid dot density along the texture U axis
pub const DEFAULT_DOTS_PER_METER: f32 = 10.0;

/// Shared grid shader controls (dot threshold, line threshold, line fade, line width)
pub const DEFAULT_GRID_CONTROL: [f32; 4] = [0.2, 0.4, 2.0, 1.5];

/// Attachments kept before the oldest one is evicted
pub const DEFAULT_MAX_ATTACHMENTS: usize = 20;

/// Plane colors as packed `0xRRGGBBAA`
pub const DEFAULT_PLANE_PALETTE: [u32; 16] = [
    0xFFFF_FFFF,
    0xF443_36FF,
    0xE91E_63FF,
    0x9C27_B0FF,
    0x673A_B7FF,
    0x3F51_B5FF,
    0x2196_F3FF,
    0x03A9_F4FF,
    0x00BC_D4FF,
    0x0096_88FF,
    0x4CAF_50FF,
    0x8BC3_4AFF,
    0xCDDC_39FF,
    0xFFEB_3BFF,
    0xFFC1_07FF,
    0xFF98_00FF,
];

/// # Plane Renderer Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneRendererConfig {
    /// Width of the fading rim, in meters
    pub fade_radius: f32,
    /// Boundary point count used to size the mesh buffers initially
    pub initial_boundary_vertices: usize,
    /// Plane colors as packed `0xRRGGBBAA`
    pub palette: Vec<u32>,
    /// Texture rotation step per identity index, in radians
    pub uv_angle_step: f32,
    /// Grid dot density along texture U
    pub dots_per_meter: f32,
    /// Shared grid shader controls
    pub grid_control: [f32; 4],
    /// Reject boundaries that are not star-shaped about the plane center
    pub validate_boundaries: bool,
    /// Bound on remembered plane identities; `None` keeps every plane forever
    pub identity_capacity: Option<usize>,
    /// Grid texture image; a procedural grid is used when absent
    pub grid_texture_path: Option<String>,
}

impl Default for PlaneRendererConfig {
    fn default() -> Self {
        Self {
            fade_radius: DEFAULT_FADE_RADIUS,
            initial_boundary_vertices: DEFAULT_INITIAL_BOUNDARY_VERTICES,
            palette: DEFAULT_PLANE_PALETTE.to_vec(),
            uv_angle_step: DEFAULT_UV_ANGLE_STEP,
            dots_per_meter: DEFAULT_DOTS_PER_METER,
            grid_control: DEFAULT_GRID_CONTROL,
            validate_boundaries: false,
            identity_capacity: None,
            grid_texture_path: None,
        }
    }
}

impl PlaneRendererConfig {
    /// Set the fade radius
    pub fn with_fade_radius(mut self, fade_radius: f32) -> Self {
        self.fade_radius = fade_radius;
        self
    }

    /// Set the initial buffer sizing
    pub fn with_initial_boundary_vertices(mut self, count: usize) -> Self {
        self.initial_boundary_vertices = count;
        self
    }

    /// Replace the color palette
    pub fn with_palette(mut self, palette: Vec<u32>) -> Self {
        self.palette = palette;
        self
    }

    /// Enable or disable star-shape validation of boundaries
    pub fn with_boundary_validation(mut self, enabled: bool) -> Self {
        self.validate_boundaries = enabled;
        self
    }

    /// Bound the identity registry with LRU eviction
    pub fn with_identity_capacity(mut self, capacity: usize) -> Self {
        self.identity_capacity = Some(capacity);
        self
    }

    /// Use a grid texture from disk
    pub fn with_grid_texture(mut self, path: impl Into<String>) -> Self {
        self.grid_texture_path = Some(path.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fade_radius.is_finite() || self.fade_radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fade_radius must be a non-negative number, got {}",
                self.fade_radius
            )));
        }
        if self.initial_boundary_vertices == 0 {
            return Err(ConfigError::Invalid("initial_boundary_vertices must be at least 1".to_string()));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must contain at least one color".to_string()));
        }
        if !(self.dots_per_meter > 0.0) {
            return Err(ConfigError::Invalid("dots_per_meter must be positive".to_string()));
        }
        if self.identity_capacity == Some(0) {
            return Err(ConfigError::Invalid("identity_capacity must be at least 1 when set".to_string()));
        }
        Ok(())
    }
}

/// # Attachment Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentConfig {
    /// Placed objects kept before the oldest is evicted
    pub max_attachments: usize,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            max_attachments: DEFAULT_MAX_ATTACHMENTS,
        }
    }
}

impl AttachmentConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attachments == 0 {
            return Err(ConfigError::Invalid("max_attachments must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// # Overlay Configuration
///
/// Top-level document read by applications, e.g. `plane_overlay.toml`:
///
/// ```toml
/// [renderer]
/// fade_radius = 0.25
/// validate_boundaries = true
///
/// [attachments]
/// max_attachments = 20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Plane renderer settings
    pub renderer: PlaneRendererConfig,
    /// Attachment collection settings
    pub attachments: AttachmentConfig,
}

impl OverlayConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.renderer.validate()?;
        self.attachments.validate()
    }
}

impl Config for OverlayConfig {}

impl Config for PlaneRendererConfig {}
