//! Plane overlay demo application
//!
//! Runs the plane renderer headless against a simulated tracking session and
//! a recording graphics backend, placing content on planes as a user would by
//! tapping. Pass a `.toml` or `.ron` configuration path as the first argument
//! to override the defaults.

mod simulated_tracking;

use plane_overlay::foundation::logging;
use plane_overlay::prelude::*;
use plane_overlay::render::GraphicsCommand;
use simulated_tracking::{SharedPlane, SimulatedTracking};
use thiserror::Error;

const FRAMES: u64 = 120;
const TAP_INTERVAL: u64 = 15;

#[derive(Error, Debug)]
enum DemoError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("grid texture: {0}")]
    Asset(#[from] AssetError),
    #[error("rendering: {0}")]
    Render(#[from] RenderError),
}

struct OverlayDemo {
    tracking: SimulatedTracking,
    graphics: RecordingGraphics,
    renderer: PlaneRenderer,
    attachments: PlaneAttachments<SharedPlane, StaticAnchor>,
    totals: FramePlaneStats,
}

impl OverlayDemo {
    fn new(config: &OverlayConfig) -> Result<Self, DemoError> {
        config.validate()?;

        let texture = GridTexture::from_config(&config.renderer)?;
        let mut graphics = RecordingGraphics::new();
        let renderer = PlaneRenderer::create(&mut graphics, &config.renderer, &texture)?;

        Ok(Self {
            tracking: SimulatedTracking::new(7, 16.0 / 9.0),
            graphics,
            renderer,
            attachments: PlaneAttachments::from_config(&config.attachments),
            totals: FramePlaneStats::default(),
        })
    }

    fn run(&mut self, frames: u64) -> Result<(), DemoError> {
        for _ in 0..frames {
            self.tracking.step();
            self.frame()?;
        }
        Ok(())
    }

    fn frame(&mut self) -> Result<(), DemoError> {
        let planes = self.tracking.planes();
        let camera = self.tracking.camera();

        self.graphics.clear_recording();
        let stats = self.renderer.draw_planes(&mut self.graphics, &planes, &camera)?;
        self.accumulate(&stats);

        let draw_calls = self
            .graphics
            .commands()
            .iter()
            .filter(|command| matches!(command, GraphicsCommand::DrawTriangleStrip { .. }))
            .count();
        log::debug!("Frame {}: {:?}, {} draw calls", self.tracking.frame(), stats, draw_calls);

        if self.tracking.frame() % TAP_INTERVAL == 0 {
            self.tap(&planes);
        }

        for pose in self.attachments.tracking_poses() {
            log::trace!("Model at {:?}", pose.position);
        }
        Ok(())
    }

    fn tap(&mut self, planes: &[PlaneSnapshot]) {
        let point = self.tracking.tap_point();
        let hit = planes
            .iter()
            .filter(|plane| plane.is_tracking() && plane.subsumed_by.is_none())
            .find(|plane| plane.contains_world_point(&point));

        let Some(plane) = hit else {
            log::info!("Tap at {:?} missed every plane", point.coords);
            return;
        };
        let Some(shared) = self.tracking.shared_plane(plane.id) else {
            return;
        };

        log::info!("Placing content on plane {:?} at {:?}", plane.id, point.coords);
        self.attachments.attach(shared, StaticAnchor::new(Pose::from_position(point.coords)));
    }

    fn accumulate(&mut self, stats: &FramePlaneStats) {
        self.totals.considered += stats.considered;
        self.totals.culled += stats.culled;
        self.totals.drawn += stats.drawn;
        self.totals.empty += stats.empty;
        self.totals.skipped += stats.skipped;
    }

    fn report(&self) {
        log::info!("Totals over {} frames: {:?}", self.tracking.frame(), self.totals);
        log::info!(
            "Mesh buffers: {} vertices, {} indices; {} planes remembered",
            self.renderer.mesh_buffers().vertex_capacity(),
            self.renderer.mesh_buffers().index_capacity(),
            self.renderer.index_source().len()
        );
        for (i, attachment) in self.attachments.iter().enumerate() {
            log::info!(
                "Attachment {}: tracking={}, pose={:?}",
                i,
                attachment.is_tracking(),
                attachment.pose().position
            );
        }
    }
}

fn load_config() -> Result<OverlayConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            OverlayConfig::load_from_file(path)
        }
        None => Ok(OverlayConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(log::LevelFilter::Info);
    log::info!("Starting plane overlay demo");

    let config = load_config()?;
    let mut demo = OverlayDemo::new(&config)?;
    demo.run(FRAMES)?;
    demo.report();

    demo.attachments.clear();
    log::info!("Plane overlay demo finished successfully");
    Ok(())
}
