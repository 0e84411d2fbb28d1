//! Capacity-bounded collection of plane attachments

use std::collections::VecDeque;

use crate::core::config::AttachmentConfig;
use crate::foundation::math::Pose;
use crate::tracking::{PlaneSurface, TrackedAnchor};
use super::attachment::PlaneAttachment;

/// Placed content, oldest first
///
/// Adding past the capacity evicts the oldest attachment and detaches its
/// anchor so the tracking service can stop following it.
#[derive(Debug)]
pub struct PlaneAttachments<P, A> {
    attachments: VecDeque<PlaneAttachment<P, A>>,
    capacity: usize,
}

impl<P: PlaneSurface, A: TrackedAnchor> PlaneAttachments<P, A> {
    /// Create an empty collection holding at most `capacity` attachments (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            attachments: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Create an empty collection sized by configuration
    pub fn from_config(config: &AttachmentConfig) -> Self {
        Self::with_capacity(config.max_attachments)
    }

    /// Add an attachment, evicting the oldest when full
    pub fn push(&mut self, attachment: PlaneAttachment<P, A>) {
        if self.attachments.len() >= self.capacity {
            if let Some(oldest) = self.attachments.pop_front() {
                log::debug!("Attachment limit {} reached, detaching the oldest", self.capacity);
                oldest.detach();
            }
        }
        self.attachments.push_back(attachment);
    }

    /// Pair a plane with an anchor and add the attachment
    pub fn attach(&mut self, plane: P, anchor: A) {
        self.push(PlaneAttachment::new(plane, anchor));
    }

    /// Detach and drop every attachment
    pub fn clear(&mut self) {
        for attachment in self.attachments.drain(..) {
            attachment.detach();
        }
    }

    /// Poses of the attachments that are currently tracking, oldest first
    pub fn tracking_poses(&self) -> impl Iterator<Item = Pose> + '_ {
        self.attachments
            .iter()
            .filter(|attachment| attachment.is_tracking())
            .map(PlaneAttachment::pose)
    }

    /// Attachments, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &PlaneAttachment<P, A>> {
        self.attachments.iter()
    }

    /// Number of attachments
    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    /// Whether there are no attachments
    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    /// Maximum number of attachments
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
