//! Growable typed buffers for per-frame mesh data
//!
//! Vertex and index data are rebuilt from scratch for every plane, so the
//! buffers never preserve contents across growth. Capacity only ever doubles
//! and never shrinks; reallocation is amortized over the lifetime of the
//! renderer rather than avoided.

/// Fixed-element buffer with a cursor and a logical limit
///
/// Mirrors the position/limit model of a GPU staging buffer: `reset` rewinds
/// the cursor and sets how many elements are meaningful, `put` writes at the
/// cursor, and `as_slice` exposes exactly the first `limit` elements.
#[derive(Debug, Clone)]
pub struct GrowableBuffer<T> {
    data: Vec<T>,
    position: usize,
    limit: usize,
}

impl<T: Copy + Default> GrowableBuffer<T> {
    /// Create a buffer with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![T::default(); capacity],
            position: 0,
            limit: 0,
        }
    }

    /// Number of elements the buffer can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Grow to at least `required` elements by repeated doubling
    ///
    /// Returns `true` when a reallocation happened. Old contents are
    /// discarded and the cursor and limit are reset to zero.
    pub fn ensure_capacity(&mut self, required: usize) -> bool {
        if self.data.len() >= required {
            return false;
        }

        let mut capacity = self.data.len().max(1);
        while capacity < required {
            capacity *= 2;
        }
        log::debug!(
            "Growing buffer from {} to {} elements (requested {})",
            self.data.len(),
            capacity,
            required
        );

        self.data = vec![T::default(); capacity];
        self.position = 0;
        self.limit = 0;
        true
    }

    /// Rewind the cursor and set the logical element count
    ///
    /// # Panics
    /// If `limit` exceeds the capacity; callers grow the buffer first.
    pub fn reset(&mut self, limit: usize) {
        assert!(
            limit <= self.data.len(),
            "buffer limit {} exceeds capacity {}",
            limit,
            self.data.len()
        );
        self.position = 0;
        self.limit = limit;
    }

    /// Move the cursor back to the start without changing the limit
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Write one element at the cursor and advance it
    pub fn put(&mut self, value: T) {
        debug_assert!(self.position < self.limit, "write past buffer limit {}", self.limit);
        self.data[self.position] = value;
        self.position += 1;
    }

    /// Cursor position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Logical element count
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Elements left between the cursor and the limit
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Whether the logical element count is zero
    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }

    /// The first `limit` elements
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.limit]
    }
}

impl<T: bytemuck::Pod + Default> GrowableBuffer<T> {
    /// The first `limit` elements as raw bytes, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }
}
