//! # Occlusion-Ordered Plane Renderer
//!
//! Draws every visible upward-facing plane with its grid, nearest first, in a
//! single pass over the camera image.
//!
//! ## Ordering
//!
//! Planes are sorted by the camera's height above each plane. The color
//! buffer's alpha starts at 1 and each plane erases it where it draws, so a
//! plane drawn later only shows through where no nearer plane covered the
//! pixel. Depth writes stay off so the planes never hide virtual content.
//!
//! ## Failure model
//!
//! Planes without a boundary still issue an (empty) draw, and planes whose
//! mesh cannot be built are logged and skipped. Graphics errors abort the pass
//! with [`RenderError::GraphicsApi`]; render state is restored either way.

use crate::assets::GridTexture;
use crate::core::config::PlaneRendererConfig;
use crate::foundation::math::Vec3;
use crate::tracking::{CameraFrame, PlaneType, TrackedPlane};
use super::graphics::{PlaneGraphics, PlaneUniforms, TextureHandle};
use super::identity::{BoundedPlaneIndexRegistry, PlaneIndexRegistry, PlaneIndexSource};
use super::plane_mesh::{BoundaryMeshBuilder, MeshBuffers};
use super::plane_style::PlaneStylist;
use super::render_state::OcclusionPass;
use super::RenderResult;

/// Error-check label after renderer resources are created
pub const CREATE_OPERATION: &str = "creating plane renderer";

/// A plane paired with the camera's height above it
#[derive(Debug, Clone, Copy)]
pub struct SortablePlane<'a, P> {
    /// Signed distance from the plane to the camera along the plane normal
    pub distance: f32,
    /// The plane
    pub plane: &'a P,
}

/// Per-frame counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FramePlaneStats {
    /// Planes handed to the renderer
    pub considered: usize,
    /// Planes filtered out or facing away from the camera
    pub culled: usize,
    /// Planes drawn with a non-empty mesh
    pub drawn: usize,
    /// Planes drawn with no boundary
    pub empty: usize,
    /// Planes skipped because their mesh could not be built
    pub skipped: usize,
}

/// Filter drawable planes and sort them nearest first
///
/// Keeps tracking, upward-facing planes that no other plane has subsumed and
/// that the camera is not below. Ties keep their input order.
pub fn sort_planes_by_distance<'a, P: TrackedPlane>(planes: &'a [P], camera_position: &Vec3) -> Vec<SortablePlane<'a, P>> {
    let mut sorted: Vec<SortablePlane<'a, P>> = planes
        .iter()
        .filter(|plane| {
            plane.plane_type() == PlaneType::HorizontalUpwardFacing
                && plane.is_tracking()
                && plane.subsumed_by().is_none()
        })
        .filter_map(|plane| {
            let distance = plane.signed_distance_to(camera_position);
            // Rejects NaN as well as planes above the camera
            if distance >= 0.0 {
                Some(SortablePlane { distance, plane })
            } else {
                None
            }
        })
        .collect();

    sorted.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Draws tracked planes with per-plane colors and occlusion ordering
///
/// Owns the mesh scratch buffers and the identity source; both persist across
/// frames. Generic over the identity source so applications can supply their
/// own; [`create`](PlaneRenderer::create) picks one from the configuration.
pub struct PlaneRenderer<I: PlaneIndexSource = Box<dyn PlaneIndexSource>> {
    builder: BoundaryMeshBuilder,
    buffers: MeshBuffers,
    identities: I,
    stylist: PlaneStylist,
    grid_control: [f32; 4],
    texture: TextureHandle,
}

impl PlaneRenderer {
    /// Create a renderer and upload its grid texture
    ///
    /// Uses a bounded identity registry when `identity_capacity` is set.
    pub fn create<G: PlaneGraphics + ?Sized>(
        graphics: &mut G,
        config: &PlaneRendererConfig,
        grid_texture: &GridTexture,
    ) -> RenderResult<Self> {
        let identities: Box<dyn PlaneIndexSource> = match config.identity_capacity {
            Some(capacity) => Box::new(BoundedPlaneIndexRegistry::with_capacity(capacity)),
            None => Box::new(PlaneIndexRegistry::new()),
        };
        Self::with_index_source(graphics, config, grid_texture, identities)
    }
}

impl<I: PlaneIndexSource> PlaneRenderer<I> {
    /// Create a renderer around an existing identity source
    pub fn with_index_source<G: PlaneGraphics + ?Sized>(
        graphics: &mut G,
        config: &PlaneRendererConfig,
        grid_texture: &GridTexture,
        identities: I,
    ) -> RenderResult<Self> {
        config.validate()?;

        let texture = graphics.upload_texture(grid_texture);
        graphics.check_error(CREATE_OPERATION)?;

        log::info!(
            "Created plane renderer: grid texture {}x{}, {} palette colors, buffers for {} boundary points",
            grid_texture.width,
            grid_texture.height,
            config.palette.len(),
            config.initial_boundary_vertices
        );

        Ok(Self {
            builder: BoundaryMeshBuilder::new(config.fade_radius).with_boundary_validation(config.validate_boundaries),
            buffers: MeshBuffers::for_boundary_points(config.initial_boundary_vertices),
            identities,
            stylist: PlaneStylist::from_config(config),
            grid_control: config.grid_control,
            texture,
        })
    }

    /// Draw all visible planes for one frame
    pub fn draw_planes<G, P>(&mut self, graphics: &mut G, planes: &[P], camera: &CameraFrame) -> RenderResult<FramePlaneStats>
    where
        G: PlaneGraphics + ?Sized,
        P: TrackedPlane,
    {
        let sorted = sort_planes_by_distance(planes, &camera.position());
        let mut stats = FramePlaneStats {
            considered: planes.len(),
            culled: planes.len() - sorted.len(),
            ..FramePlaneStats::default()
        };

        if sorted.is_empty() {
            log::trace!("No visible planes among {}", planes.len());
            return Ok(stats);
        }

        let view_projection = camera.projection * camera.view_matrix();
        let mut pass = OcclusionPass::begin(graphics, self.texture, self.grid_control)?;

        for sortable in &sorted {
            let plane = sortable.plane;
            let mesh = match self.builder.build_for(&mut self.buffers, plane) {
                Ok(mesh) => mesh,
                Err(e) => {
                    log::warn!("Skipping plane {:?}: {}", plane.id(), e);
                    stats.skipped += 1;
                    continue;
                }
            };

            let style = self.stylist.style_for(self.identities.index_for(plane.id()));
            let uniforms = PlaneUniforms {
                model: mesh.model_matrix,
                model_view_projection: view_projection * mesh.model_matrix,
                line_color: style.line_color,
                dot_color: style.dot_color,
                uv_matrix: style.uv_matrix,
            };
            pass.draw_plane(&uniforms, self.buffers.vertices(), self.buffers.indices())?;

            if mesh.is_empty() {
                stats.empty += 1;
            } else {
                stats.drawn += 1;
            }
        }

        pass.finish()?;
        log::debug!("Plane pass: {:?}", stats);
        Ok(stats)
    }

    /// Mesh scratch buffers
    pub fn mesh_buffers(&self) -> &MeshBuffers {
        &self.buffers
    }

    /// Identity source
    pub fn index_source(&self) -> &I {
        &self.identities
    }

    /// Handle of the uploaded grid texture
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }
}
