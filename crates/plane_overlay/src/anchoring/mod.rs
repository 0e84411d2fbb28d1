//! Placing virtual content on tracked planes
//!
//! An attachment pins content to an anchor while keeping it at the height of
//! the plane the user selected, so objects stay on the surface as the
//! tracking service refines the plane.

pub mod attachment;
pub mod attachment_set;

pub use attachment::PlaneAttachment;
pub use attachment_set::PlaneAttachments;
