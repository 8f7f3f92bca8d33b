//! Mouse decoder - records each report's deltas into the mouse queue.
//!
//! There is no protocol translation here: position accumulation and
//! clamping belong to whoever drains the queue (see `dispatch::Pointer`).

use crate::error::Error;
use crate::queue::MouseQueue;

/// One mouse report worth of relative motion and button state.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseEvent {
    pub dx: i8,
    pub dy: i8,
    pub wheel: i8,
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl MouseEvent {
    pub const fn new(dx: i8, dy: i8, wheel: i8, left: bool, right: bool, middle: bool) -> Self {
        Self {
            dx,
            dy,
            wheel,
            left,
            right,
            middle,
        }
    }
}

/// Queue exactly one event, or report that the queue is full.
pub fn decode(queue: &mut MouseQueue, event: MouseEvent) -> Result<(), Error> {
    queue.push(event).map_err(|_| {
        warn!("mouse queue full - dropping event");
        Error::QueueFull
    })
}
