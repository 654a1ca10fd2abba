//! Fixed-capacity ring buffer for bounded histories.

/// A drop-oldest ring buffer over a fixed backing array.
///
/// All history in the controller (road samples for prediction, performance
/// scores for diagnostics) is bounded by construction: once `N` entries are
/// held, each push overwrites the oldest entry. No allocation ever happens
/// after construction.
#[derive(Clone, Debug)]
pub struct RingBuffer<T: Copy + Default, const N: usize> {
    buffer: [T; N],
    head: usize,
    len: usize,
}

impl<T: Copy + Default, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self {
            buffer: [T::default(); N],
            head: 0,
            len: 0,
        }
    }
}

impl<T: Copy + Default, const N: usize> RingBuffer<T, N> {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capacity of the backing array.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the buffer has reached capacity (pushes now evict).
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Append an entry, evicting the oldest when full.
    pub fn push(&mut self, value: T) {
        self.buffer[self.head] = value;
        self.head = (self.head + 1) % N;
        if self.len < N {
            self.len += 1;
        }
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        let start = if self.len == N {
            self.head
        } else {
            0
        };
        (0..self.len).map(move |i| self.buffer[(start + i) % N])
    }

    /// The most recently pushed entry.
    pub fn last(&self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            Some(self.buffer[(self.head + N - 1) % N])
        }
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

impl<const N: usize> RingBuffer<f64, N> {
    /// Arithmetic mean of the held entries (0 when empty).
    pub fn mean(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        self.iter().sum::<f64>() / self.len as f64
    }
}
