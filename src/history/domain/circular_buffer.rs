//! Fixed-capacity ring buffer.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Result type for buffer operations.
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors returned by [`CircularBuffer`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BufferError {
    /// A buffer must hold at least one element.
    #[error("buffer capacity must be greater than zero")]
    ZeroCapacity,

    /// The index is not below the current element count.
    #[error("index {index} is out of range for {len} elements")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Elements currently held.
        len: usize,
    },
}

/// Thread-safe buffer keeping the most recent `capacity` elements.
///
/// Index `0` is always the oldest retained element. Adding to a full
/// buffer evicts exactly that element. Every operation takes the buffer's
/// lock once, so two calls in a row are not atomic as a pair.
///
/// # Examples
///
/// ```
/// use courier::history::domain::CircularBuffer;
///
/// let buffer = CircularBuffer::new(2).expect("non-zero capacity");
/// for value in 1..=3 {
///     buffer.add(value);
/// }
/// assert_eq!(buffer.to_vec(), vec![2, 3]);
/// assert_eq!(buffer.virtual_index(0), 1);
/// ```
pub struct CircularBuffer<T> {
    ring: Mutex<Ring<T>>,
}

struct Ring<T> {
    slots: Vec<Option<T>>,
    head: usize,
    count: usize,
    total_added: usize,
}

impl<T> Ring<T> {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    // Maps a logical position (0 = oldest) to a slot; `logical` never
    // exceeds the capacity.
    fn slot_of(&self, logical: usize) -> usize {
        let slot = self.head + logical;
        if slot >= self.capacity() {
            slot - self.capacity()
        } else {
            slot
        }
    }

    fn push(&mut self, item: T) {
        let tail = self.slot_of(self.count);
        if let Some(slot) = self.slots.get_mut(tail) {
            *slot = Some(item);
        }
        if self.count == self.capacity() {
            self.head = self.slot_of(1);
        } else {
            self.count += 1;
        }
        self.total_added = self.total_added.saturating_add(1);
    }

    fn get(&self, logical: usize) -> Option<&T> {
        if logical >= self.count {
            return None;
        }
        self.slots.get(self.slot_of(logical))?.as_ref()
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.count).filter_map(move |logical| self.get(logical))
    }
}

impl<T> CircularBuffer<T> {
    /// Creates an empty buffer holding at most `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::ZeroCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> BufferResult<Self> {
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        let slots = std::iter::repeat_with(|| None).take(capacity).collect();
        Ok(Self {
            ring: Mutex::new(Ring {
                slots,
                head: 0,
                count: 0,
                total_added: 0,
            }),
        })
    }

    // Each operation completes its mutation before releasing the lock, so
    // a poisoned ring is still consistent.
    fn lock(&self) -> MutexGuard<'_, Ring<T>> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `item`, evicting the oldest element when full.
    pub fn add(&self, item: T) {
        self.lock().push(item);
    }

    /// Returns the number of retained elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().count
    }

    /// Returns whether no element is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether the next [`Self::add`] will evict an element.
    #[must_use]
    pub fn is_full(&self) -> bool {
        let ring = self.lock();
        ring.count == ring.capacity()
    }

    /// Returns the maximum number of retained elements.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    /// Returns how many elements were ever added since creation or the last
    /// [`Self::clear`].
    #[must_use]
    pub fn total_added(&self) -> usize {
        self.lock().total_added
    }

    /// Returns the position `index` would have in an unbounded history.
    ///
    /// Before anything has been evicted this is `index` itself.
    #[must_use]
    pub fn virtual_index(&self, index: usize) -> usize {
        let ring = self.lock();
        if ring.total_added <= ring.capacity() {
            index
        } else {
            ring.total_added
                .saturating_sub(ring.capacity().saturating_sub(index))
        }
    }

    /// Drops every element and resets the added counter.
    pub fn clear(&self) {
        let mut ring = self.lock();
        for slot in &mut ring.slots {
            *slot = None;
        }
        ring.head = 0;
        ring.count = 0;
        ring.total_added = 0;
    }
}

impl<T: Clone> CircularBuffer<T> {
    /// Returns a copy of the element at `index`, where `0` is the oldest.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfRange`] when `index` is not below
    /// [`Self::len`].
    pub fn get(&self, index: usize) -> BufferResult<T> {
        let ring = self.lock();
        ring.get(index).cloned().ok_or(BufferError::IndexOutOfRange {
            index,
            len: ring.count,
        })
    }

    /// Returns the oldest element, if any.
    #[must_use]
    pub fn try_first(&self) -> Option<T> {
        self.lock().get(0).cloned()
    }

    /// Returns the newest element, if any.
    #[must_use]
    pub fn try_last(&self) -> Option<T> {
        let ring = self.lock();
        ring.count
            .checked_sub(1)
            .and_then(|last| ring.get(last))
            .cloned()
    }

    /// Returns every element, oldest first, as an independent copy.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.lock().iter().cloned().collect()
    }

    /// Returns every element paired with its virtual index, oldest first.
    #[must_use]
    pub fn to_indexed_vec(&self) -> Vec<(usize, T)> {
        let ring = self.lock();
        let first = ring.total_added.saturating_sub(ring.count);
        ring.iter()
            .cloned()
            .enumerate()
            .map(|(offset, item)| (first + offset, item))
            .collect()
    }
}

impl<T: Clone> IntoIterator for &CircularBuffer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.to_vec().into_iter()
    }
}

impl<T> fmt::Debug for CircularBuffer<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ring = self.lock();
        formatter
            .debug_struct("CircularBuffer")
            .field("capacity", &ring.capacity())
            .field("len", &ring.count)
            .field("total_added", &ring.total_added)
            .finish()
    }
}
