//! Scripted stand-in for an AR tracking service
//!
//! Grows a few floor and table planes over time with a little measurement
//! noise, merges one into another, and moves the camera around the room.

use std::cell::RefCell;
use std::rc::Rc;

use plane_overlay::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BOUNDARY_POINTS: usize = 12;
const GROWTH_PER_FRAME: f32 = 0.02;
const HEIGHT_NOISE: f32 = 0.003;

/// Plane handle shared between the tracking service and attachments
///
/// Attachments read the live plane, so refinements move placed content.
#[derive(Debug, Clone)]
pub struct SharedPlane(Rc<RefCell<PlaneSnapshot>>);

impl SharedPlane {
    fn new(plane: PlaneSnapshot) -> Self {
        Self(Rc::new(RefCell::new(plane)))
    }

    /// Current state of the plane
    pub fn snapshot(&self) -> PlaneSnapshot {
        self.0.borrow().clone()
    }
}

impl Trackable for SharedPlane {
    fn tracking_state(&self) -> TrackingState {
        self.0.borrow().tracking_state
    }
}

impl PlaneSurface for SharedPlane {
    fn center_pose(&self) -> Pose {
        self.0.borrow().center_pose
    }
}

struct GrowingPlane {
    plane: SharedPlane,
    radius: f32,
    max_radius: f32,
}

/// Simulated tracking session
pub struct SimulatedTracking {
    rng: StdRng,
    planes: Vec<GrowingPlane>,
    frame: u64,
    aspect: f32,
}

impl SimulatedTracking {
    /// Start a session with a fixed seed
    pub fn new(seed: u64, aspect: f32) -> Self {
        let mut session = Self {
            rng: StdRng::seed_from_u64(seed),
            planes: Vec::new(),
            frame: 0,
            aspect,
        };
        session.spawn(PlaneId(1), Vec3::new(0.0, 0.0, -1.0), 2.5);
        session
    }

    fn spawn(&mut self, id: PlaneId, center: Vec3, max_radius: f32) {
        log::info!("Tracking service detected plane {:?} at {:?}", id, center);
        let plane = PlaneSnapshot::horizontal(id, Pose::from_position(center), 0.0, 0.0, None);
        self.planes.push(GrowingPlane {
            plane: SharedPlane::new(plane),
            radius: 0.0,
            max_radius,
        });
    }

    /// Advance one frame
    pub fn step(&mut self) {
        self.frame += 1;

        match self.frame {
            20 => self.spawn(PlaneId(2), Vec3::new(1.2, 0.75, -1.5), 0.6),
            35 => self.spawn(PlaneId(3), Vec3::new(-1.5, 0.01, -0.5), 0.8),
            70 => {
                // The floor grew over plane 3
                if let Some(grown) = self.planes.iter().find(|p| p.plane.0.borrow().id == PlaneId(3)) {
                    log::info!("Plane 3 subsumed by plane 1");
                    grown.plane.0.borrow_mut().subsumed_by = Some(PlaneId(1));
                }
            }
            _ => {}
        }

        for growing in &mut self.planes {
            growing.radius = (growing.radius + GROWTH_PER_FRAME).min(growing.max_radius);
            let mut plane = growing.plane.0.borrow_mut();

            // No footprint for the first couple of frames
            if growing.radius < 2.0 * GROWTH_PER_FRAME {
                continue;
            }

            plane.polygon = Some(
                (0..BOUNDARY_POINTS)
                    .map(|i| {
                        let angle = i as f32 / BOUNDARY_POINTS as f32 * std::f32::consts::TAU;
                        let r = growing.radius * self.rng.gen_range(0.85..1.0);
                        Vec2::new(r * angle.cos(), -r * angle.sin())
                    })
                    .collect(),
            );
            plane.extent_x = growing.radius * 2.0;
            plane.extent_z = growing.radius * 2.0;
            plane.center_pose.position.y += self.rng.gen_range(-HEIGHT_NOISE..HEIGHT_NOISE);
        }
    }

    /// Frame-local copies of every plane
    pub fn planes(&self) -> Vec<PlaneSnapshot> {
        self.planes.iter().map(|p| p.plane.snapshot()).collect()
    }

    /// Live handle of a plane
    pub fn shared_plane(&self, id: PlaneId) -> Option<SharedPlane> {
        self.planes
            .iter()
            .find(|p| p.plane.0.borrow().id == id)
            .map(|p| p.plane.clone())
    }

    /// Camera circling the room at eye height
    pub fn camera(&self) -> CameraFrame {
        let angle = self.frame as f32 * 0.02;
        let position = Vec3::new(2.5 * angle.cos(), 1.5, 2.5 * angle.sin());
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2 - angle);
        CameraFrame::perspective(Pose::new(position, rotation), 60.0, self.aspect, 0.1, 100.0)
    }

    /// A simulated tap: a point on the floor near the room center
    pub fn tap_point(&mut self) -> Point3 {
        Point3::new(self.rng.gen_range(-1.0..1.0), 0.0, self.rng.gen_range(-2.0..0.0))
    }

    /// Frames simulated so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
