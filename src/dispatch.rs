//! Dispatch layer between raw HID reports and the decoders.
//!
//! Owns the decoder state and both event queues.  Keyboard reports are
//! reduced to newly pressed keys, lock keys toggle latches here (they
//! never reach the decoder), everything else is decoded.  The queues are
//! drained into terminal bytes and an absolute pointer position.

use core::fmt::Write as _;

use heapless::{String, Vec};

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH, WHEEL_RANGE};
use crate::error::Error;
use crate::hid::{HidReport, KeyboardReport, MouseReport};
use crate::keyboard::{self, DecoderState, KeySlot};
use crate::mouse::{self, MouseEvent};
use crate::queue::{KeyQueue, MouseQueue};

// LED output report

/// HID keyboard LED output byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LockLeds(u8);

impl LockLeds {
    pub const NUM_LOCK: u8 = 0x01;
    pub const CAPS_LOCK: u8 = 0x02;
    pub const SCROLL_LOCK: u8 = 0x04;

    /// LEDs for the current latches.
    ///
    /// The Num Lock LED is lit while the keypad is in digit mode, i.e.
    /// while the navigation latch is off.
    pub const fn from_state(state: &DecoderState) -> Self {
        let mut bits = 0;
        if !state.numlock {
            bits |= Self::NUM_LOCK;
        }
        if state.capslock {
            bits |= Self::CAPS_LOCK;
        }
        if state.scrolllock {
            bits |= Self::SCROLL_LOCK;
        }
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn num(self) -> bool {
        self.0 & Self::NUM_LOCK != 0
    }

    pub const fn caps(self) -> bool {
        self.0 & Self::CAPS_LOCK != 0
    }

    pub const fn scroll(self) -> bool {
        self.0 & Self::SCROLL_LOCK != 0
    }
}

// Pointer tracking

/// Absolute pointer position on the virtual screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub x: i16,
    pub y: i16,
    pub wheel: i16,
}

/// Accumulates relative mouse motion into a clamped absolute position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pointer {
    position: Position,
    buttons: (bool, bool, bool),
}

impl Pointer {
    /// Centre of the screen, wheel at mid-range.
    pub const fn new() -> Self {
        Self {
            position: Position {
                x: SCREEN_WIDTH / 2,
                y: SCREEN_HEIGHT / 2,
                wheel: WHEEL_RANGE / 2,
            },
            buttons: (false, false, false),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// `(left, right, middle)` as of the last applied event.
    pub fn buttons(&self) -> (bool, bool, bool) {
        self.buttons
    }

    /// Apply one event; every axis is clamped on its own.
    pub fn apply(&mut self, event: &MouseEvent) -> Position {
        let p = &mut self.position;
        p.x = clamp_axis(p.x, event.dx, SCREEN_WIDTH);
        p.y = clamp_axis(p.y, event.dy, SCREEN_HEIGHT);
        p.wheel = clamp_axis(p.wheel, event.wheel, WHEEL_RANGE);
        self.buttons = (event.left, event.right, event.middle);
        *p
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_axis(current: i16, delta: i8, range: i16) -> i16 {
    current.saturating_add(i16::from(delta)).clamp(0, range - 1)
}

// Dispatcher

/// Routes reports to the decoders and drains their queues.
pub struct Dispatcher {
    state: DecoderState,
    keys: KeyQueue,
    mice: MouseQueue,
    last_report: KeyboardReport,
    last_leds: LockLeds,
    pointer: Pointer,
}

impl Dispatcher {
    pub const fn new(state: DecoderState) -> Self {
        let last_leds = LockLeds::from_state(&state);
        Self {
            state,
            keys: KeyQueue::new(),
            mice: MouseQueue::new(),
            last_report: KeyboardReport::empty(),
            last_leds,
            pointer: Pointer::new(),
        }
    }

    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DecoderState {
        &mut self.state
    }

    pub fn keys(&self) -> &KeyQueue {
        &self.keys
    }

    pub fn mice(&self) -> &MouseQueue {
        &self.mice
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    /// A keyboard was attached: forget previous key state and return the
    /// LED byte to send to it.
    pub fn mount_keyboard(&mut self) -> LockLeds {
        self.last_report = KeyboardReport::empty();
        self.last_leds = LockLeds::from_state(&self.state);
        info!("keyboard mounted, leds {:x}", self.last_leds.bits());
        self.last_leds
    }

    /// Process one keyboard report. Returns the new LED byte if any lock
    /// latch changed.
    pub fn keyboard_report(&mut self, report: &KeyboardReport) -> Option<LockLeds> {
        let previous = self.last_report;
        for keycode in report.newly_pressed(&previous) {
            match KeySlot::try_from(keycode) {
                Ok(KeySlot::CAPS_LOCK) => self.state.capslock = !self.state.capslock,
                Ok(KeySlot::SCROLL_LOCK) => self.state.scrolllock = !self.state.scrolllock,
                Ok(KeySlot::NUM_LOCK) => self.state.numlock = !self.state.numlock,
                _ => {
                    if let Err(e) = keyboard::decode(&mut self.state, &mut self.keys, keycode, report.modifier) {
                        debug!("ignoring key {:x}: {}", keycode, e);
                    }
                }
            }
        }
        self.last_report = *report;

        let leds = LockLeds::from_state(&self.state);
        if leds == self.last_leds {
            return None;
        }
        self.last_leds = leds;
        debug!("leds -> {:x}", leds.bits());
        Some(leds)
    }

    /// Process one mouse report.
    pub fn mouse_report(&mut self, report: &MouseReport) -> Result<(), Error> {
        mouse::decode(&mut self.mice, report.to_event())
    }

    /// Route any report. Returns an LED update for keyboard reports.
    pub fn handle(&mut self, report: &HidReport) -> Option<LockLeds> {
        match report {
            HidReport::Keyboard(kb) => self.keyboard_report(kb),
            HidReport::Mouse(m) => {
                // Already logged by the decoder.
                let _ = self.mouse_report(m);
                None
            }
        }
    }

    /// Move every queued key into `out`, as raw bytes or, in debug mode,
    /// as `key = <hex>` lines.
    ///
    /// Stops early (leaving the rest queued) once `out` cannot hold the
    /// next item. Returns the number of keys drained.
    pub fn drain_terminal<const N: usize>(&mut self, out: &mut Vec<u8, N>) -> usize {
        let mut drained = 0;
        loop {
            let Some(&code) = self.keys.peek() else {
                break;
            };
            let written = if self.state.debug {
                let mut line: String<16> = String::new();
                // 16 bytes always fit "key = ffff\n".
                let _ = writeln!(line, "key = {:x}", code);
                out.extend_from_slice(line.as_bytes()).is_ok()
            } else {
                out.push(code as u8).is_ok()
            };
            if !written {
                break;
            }
            self.keys.pop();
            drained += 1;
        }
        drained
    }

    /// Apply every queued mouse event to the pointer. Returns the final
    /// position if anything was drained.
    pub fn drain_pointer(&mut self) -> Option<Position> {
        let mut last = None;
        while let Some(event) = self.mice.pop() {
            let position = self.pointer.apply(&event);
            trace!("position: {} {}, wheel = {}", position.x, position.y, position.wheel);
            last = Some(position);
        }
        last
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DecoderState::default())
    }
}
