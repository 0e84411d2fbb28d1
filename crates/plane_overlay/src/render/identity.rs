//! Stable per-plane visual identity
//!
//! Every plane gets an integer index the first time the renderer sees it.
//! Colors and texture rotation derive from that index only, so a plane keeps
//! its look while other planes appear and disappear.

use std::collections::HashMap;

use crate::tracking::PlaneId;

/// Source of stable per-plane indices
///
/// Injected into the renderer so long-running applications can bound the
/// memory spent remembering planes.
pub trait PlaneIndexSource {
    /// Index for a plane, assigning the next one on first sight
    fn index_for(&mut self, plane: PlaneId) -> usize;

    /// Planes currently remembered
    fn len(&self) -> usize;

    /// Whether no plane is remembered
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded registry: remembers every plane for its whole lifetime
///
/// New planes receive the registry size at the time they are first seen, so
/// indices follow first-seen order and are never reused.
#[derive(Debug, Clone, Default)]
pub struct PlaneIndexRegistry {
    indices: HashMap<PlaneId, usize>,
}

impl PlaneIndexRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of a plane without assigning one
    pub fn get(&self, plane: PlaneId) -> Option<usize> {
        self.indices.get(&plane).copied()
    }
}

impl PlaneIndexSource for PlaneIndexRegistry {
    fn index_for(&mut self, plane: PlaneId) -> usize {
        let next = self.indices.len();
        *self.indices.entry(plane).or_insert_with(|| {
            log::debug!("Assigned visual index {} to plane {:?}", next, plane);
            next
        })
    }

    fn len(&self) -> usize {
        self.indices.len()
    }
}

#[derive(Debug, Clone, Copy)]
struct BoundedEntry {
    index: usize,
    last_used: u64,
}

/// Registry that forgets the least recently used plane beyond a capacity
///
/// Indices keep counting up after an eviction; an evicted plane that comes
/// back gets a fresh index rather than someone else's.
#[derive(Debug, Clone)]
pub struct BoundedPlaneIndexRegistry {
    capacity: usize,
    entries: HashMap<PlaneId, BoundedEntry>,
    next_index: usize,
    clock: u64,
}

impl BoundedPlaneIndexRegistry {
    /// Create a registry remembering at most `capacity` planes (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            next_index: 0,
            clock: 0,
        }
    }

    /// Maximum number of remembered planes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index of a plane without assigning one or touching recency
    pub fn get(&self, plane: PlaneId) -> Option<usize> {
        self.entries.get(&plane).map(|entry| entry.index)
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(plane, _)| *plane);

        if let Some(plane) = oldest {
            log::debug!("Evicting visual index of plane {:?}", plane);
            self.entries.remove(&plane);
        }
    }
}

impl PlaneIndexSource for BoundedPlaneIndexRegistry {
    fn index_for(&mut self, plane: PlaneId) -> usize {
        self.clock += 1;
        if let Some(entry) = self.entries.get_mut(&plane) {
            entry.last_used = self.clock;
            return entry.index;
        }

        if self.entries.len() >= self.capacity {
            self.evict_least_recent();
        }

        let index = self.next_index;
        self.next_index += 1;
        self.entries.insert(plane, BoundedEntry { index, last_used: self.clock });
        index
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<T: PlaneIndexSource + ?Sized> PlaneIndexSource for Box<T> {
    fn index_for(&mut self, plane: PlaneId) -> usize {
        (**self).index_for(plane)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
