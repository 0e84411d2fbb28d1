//! Graphics backend implementations
//!
//! Only the headless recording backend ships with the crate; GPU backends
//! implement [`PlaneGraphics`](super::graphics::PlaneGraphics) in the host
//! application.

pub mod recording;

pub use recording::{RecordingGraphics, GraphicsCommand, RecordedDraw, RecordedState};
