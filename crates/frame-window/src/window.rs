//! Circular Frame Window Implementation

use crate::WindowError;

/// Default window capacity (100 processed frames)
pub const DEFAULT_CAPACITY: usize = 100;

/// Fixed-capacity circular window of frame records
///
/// Slots start out as `T::default()` (an empty record). `replace` writes at
/// the cursor, advances it modulo capacity and hands back whatever occupied
/// the slot, so callers can retract the evicted record.
#[derive(Debug, Clone)]
pub struct FrameWindow<T> {
    /// Pre-allocated storage
    slots: Box<[T]>,
    /// Slot written by the next `replace`
    cursor: usize,
    /// Total records written (for statistics)
    total_written: u64,
}

impl<T: Default> FrameWindow<T> {
    /// Create a new window with given capacity
    pub fn new(capacity: usize) -> Result<Self, WindowError> {
        if capacity == 0 {
            return Err(WindowError::ZeroCapacity);
        }
        let slots: Vec<T> = (0..capacity).map(|_| T::default()).collect();
        Ok(Self {
            slots: slots.into_boxed_slice(),
            cursor: 0,
            total_written: 0,
        })
    }

    /// Create a window with default capacity (100 frames)
    pub fn with_default_capacity() -> Self {
        let slots: Vec<T> = (0..DEFAULT_CAPACITY).map(|_| T::default()).collect();
        Self {
            slots: slots.into_boxed_slice(),
            cursor: 0,
            total_written: 0,
        }
    }

    /// Store a record at the cursor and advance; returns the evicted record
    pub fn replace(&mut self, record: T) -> T {
        let evicted = std::mem::replace(&mut self.slots[self.cursor], record);
        self.cursor = (self.cursor + 1) % self.slots.len();
        self.total_written += 1;
        evicted
    }

    /// Reset every slot to an empty record
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = T::default());
        self.cursor = 0;
        self.total_written = 0;
    }
}

impl<T> FrameWindow<T> {
    /// Record that the next `replace` will evict
    pub fn oldest(&self) -> &T {
        &self.slots[self.cursor]
    }

    /// Number of records currently held (min(written, capacity))
    pub fn len(&self) -> usize {
        let written = usize::try_from(self.total_written).unwrap_or(usize::MAX);
        written.min(self.slots.len())
    }

    /// Check if nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.total_written == 0
    }

    /// Check if every slot holds a written record
    pub fn is_full(&self) -> bool {
        self.len() == self.slots.len()
    }

    /// Get the window capacity
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Current cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total records written since construction or the last clear
    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// Get fill ratio (0.0 to 1.0)
    pub fn fill_ratio(&self) -> f64 {
        self.len() as f64 / self.slots.len() as f64
    }

    /// Iterate over the held records, most recent first
    pub fn iter_recent(&self) -> impl Iterator<Item = &T> + '_ {
        let capacity = self.slots.len();
        (1..=self.len()).map(move |back| &self.slots[(self.cursor + capacity - back) % capacity])
    }
}
