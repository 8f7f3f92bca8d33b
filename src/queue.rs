//! Bounded event queues between the decoders and the application loop.
//!
//! A fixed-capacity FIFO ring built on `heapless::Deque`.  Pushing to a
//! full queue never blocks and never grows the buffer: the item is handed
//! back to the caller and counted as dropped.
//!
//! The queue holds no lock.  Producer and consumer are expected to run on
//! the same executor; if one of them moves to an interrupt context the
//! caller must switch to a split SPSC queue (`heapless::spsc::Queue`).

use crate::config::{KEY_QUEUE_CAPACITY, MOUSE_QUEUE_CAPACITY};
use crate::mouse::MouseEvent;
use heapless::Deque;

/// Queue of decoded terminal output codes.
pub type KeyQueue = EventQueue<u16, KEY_QUEUE_CAPACITY>;

/// Queue of raw mouse deltas.
pub type MouseQueue = EventQueue<MouseEvent, MOUSE_QUEUE_CAPACITY>;

/// Fixed-capacity FIFO with drop-on-full semantics.
pub struct EventQueue<T, const N: usize> {
    items: Deque<T, N>,
    dropped: u32,
}

impl<T, const N: usize> EventQueue<T, N> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            items: Deque::new(),
            dropped: 0,
        }
    }

    /// Append `item` at the tail.
    ///
    /// Returns the item back when the queue is full; the caller decides
    /// whether to log it, the queue only counts it.
    pub fn push(&mut self, item: T) -> Result<(), T> {
        let result = self.items.push_back(item);
        if result.is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
        result
    }

    /// Remove the item at the head, if any.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// The item at the head, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of pushes rejected since creation (saturating).
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Iterate head to tail without consuming anything.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Discard every queued item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: core::fmt::Debug, const N: usize> EventQueue<T, N> {
    /// Log the queue contents head to tail (diagnostics only).
    pub fn dump(&self) {
        if self.is_empty() {
            return;
        }
        debug!("queue: {} queued, {} dropped", self.len(), self.dropped);
        for (_index, _item) in self.iter().enumerate() {
            #[cfg(feature = "defmt")]
            defmt::debug!("  [{}] {}", _index, defmt::Debug2Format(_item));
        }
    }
}

impl<T, const N: usize> Default for EventQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
