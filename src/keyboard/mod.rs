//! Keyboard decoder: (keycode, modifier) pairs to terminal bytes.
//!
//! Every emulation shares one algorithm:
//!
//! ```text
//! 1. Meta hot-keys      language, debug and (TVI950 only) terminal mode
//! 2. Layout lookup      (language, slot) -> LayoutEntry
//! 3. Modifier branch    Ctrl > Alt > plain (locks and Shift)
//! 4. Escape resolver    Char -> byte, Virtual -> table sequence
//! ```
//!
//! Only the escape table and the terminal hot-keys differ between
//! emulations.  Output is pushed onto a [`KeyQueue`](crate::queue::KeyQueue)
//! as 16-bit codes holding one byte each.

pub mod escape;
pub mod layout;
pub mod tvi950;
pub mod vt100;

#[cfg(test)]
mod tests;

pub use escape::{Quadrant, Segment, VirtualKey};
pub use layout::{KeySlot, KeyValue, Language, LayoutEntry, LockFlags, SystemKey};
pub use tvi950::Tvi950;
pub use vt100::Vt100;

use crate::error::Error;
use crate::queue::EventQueue;
use escape::EscapeTable;

/// Logical modifier mask, left and right keys folded together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Modifiers(u8);

impl Modifiers {
    pub const CTRL: u8 = 0x01;
    pub const SHIFT: u8 = 0x02;
    pub const ALT: u8 = 0x04;
    pub const META: u8 = 0x08;

    /// Fold a boot-report modifier byte (`left | right << 4`).
    pub const fn from_report(raw: u8) -> Self {
        Self((raw & 0x0F) | (raw >> 4))
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn ctrl(self) -> bool {
        self.0 & Self::CTRL != 0
    }

    pub const fn shift(self) -> bool {
        self.0 & Self::SHIFT != 0
    }

    pub const fn alt(self) -> bool {
        self.0 & Self::ALT != 0
    }

    pub const fn meta(self) -> bool {
        self.0 & Self::META != 0
    }

    pub const fn quadrant(self) -> Quadrant {
        Quadrant::new(self.ctrl(), self.shift())
    }
}

/// Which escape table the decoder expands virtual keys through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TerminalMode {
    #[default]
    Tvi950,
    Vt100,
}

/// Lock latches and mode selection shared by the decoder and its caller.
///
/// The dispatch layer owns this and toggles the lock latches; the decoder
/// only changes `language`, `terminal` and `debug` through hot-keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderState {
    pub language: Language,
    pub terminal: TerminalMode,
    pub capslock: bool,
    /// Selects the shifted column like Caps Lock; on the keypad that is
    /// navigation instead of digits.
    pub numlock: bool,
    pub scrolllock: bool,
    /// Render drained codes as hex lines instead of raw bytes.
    pub debug: bool,
}

/// A terminal emulation: an escape table plus optional extra hot-keys.
pub trait Emulation {
    /// Escape sequences for every virtual key.
    fn table(&self) -> &'static EscapeTable;

    /// Handle an emulation-specific Meta hot-key. Returns `true` if the
    /// key was consumed.
    fn terminal_hotkey(&self, _state: &mut DecoderState, _slot: KeySlot) -> bool {
        false
    }

    /// Meta hot-keys common to every emulation.
    fn hotkey(&self, state: &mut DecoderState, slot: KeySlot, modifiers: Modifiers) -> bool {
        if !modifiers.meta() {
            return false;
        }
        match slot {
            KeySlot::F1 => state.language = Language::English,
            KeySlot::F2 => state.language = Language::French,
            KeySlot::F12 => state.debug = !state.debug,
            _ => return self.terminal_hotkey(state, slot),
        }
        info!(
            "hot-key: language {}, debug {}",
            state.language,
            state.debug
        );
        true
    }

    /// Decode one newly pressed key into `queue`.
    ///
    /// Unmapped keys and full queues are not errors: nothing (or only part
    /// of a sequence) is queued.  Only a keycode above 127 is rejected.
    fn decode<const N: usize>(
        &self,
        state: &mut DecoderState,
        queue: &mut EventQueue<u16, N>,
        keycode: u8,
        modifier: u8,
    ) -> Result<(), Error> {
        let slot = KeySlot::try_from(keycode)?;
        let modifiers = Modifiers::from_report(modifier);
        trace!("decode: slot {:x} modifiers {:x}", slot.code(), modifiers.bits());

        if self.hotkey(state, slot, modifiers) {
            return Ok(());
        }

        let entry = state.language.entry(slot);
        if modifiers.ctrl() {
            match (entry.ctrl, entry.base) {
                (KeyValue::Virtual(key), _) => self.expand(queue, key, modifiers.quadrant()),
                (_, KeyValue::Char(byte)) if byte < 0x80 && entry.flags.contains(LockFlags::CTRL) => {
                    push_byte(queue, byte & 0x1F)
                }
                _ => {}
            }
        } else if modifiers.alt() {
            // Any key with an alternate value sends its control code.
            if let (KeyValue::Char(_), KeyValue::Char(byte)) = (entry.ctrl, entry.base) {
                push_byte(queue, byte & 0x1F);
            }
        } else {
            // Either latch selects the shifted column; Shift inverts it.
            let locked = state.capslock || state.numlock;
            let value = if locked != modifiers.shift() {
                entry.shifted
            } else {
                entry.base
            };
            self.emit(queue, value, modifiers.quadrant());
        }
        Ok(())
    }

    /// Push a resolved layout value.
    fn emit<const N: usize>(&self, queue: &mut EventQueue<u16, N>, value: KeyValue, quadrant: Quadrant) {
        match value {
            KeyValue::Char(byte) => push_byte(queue, byte),
            KeyValue::Virtual(key) => self.expand(queue, key, quadrant),
            KeyValue::None | KeyValue::System(_) => {}
        }
    }

    /// Push every byte of the escape sequence for `key`.
    fn expand<const N: usize>(&self, queue: &mut EventQueue<u16, N>, key: VirtualKey, quadrant: Quadrant) {
        for segment in escape::lookup(self.table(), key, quadrant) {
            for byte in segment.bytes() {
                push_byte(queue, byte);
            }
        }
    }
}

fn push_byte<const N: usize>(queue: &mut EventQueue<u16, N>, byte: u8) {
    if queue.push(u16::from(byte)).is_err() {
        warn!("key queue full - dropping {:x}", byte);
    }
}

/// Decode one key with the emulation selected by `state.terminal`.
pub fn decode<const N: usize>(
    state: &mut DecoderState,
    queue: &mut EventQueue<u16, N>,
    keycode: u8,
    modifier: u8,
) -> Result<(), Error> {
    match state.terminal {
        TerminalMode::Tvi950 => Tvi950.decode(state, queue, keycode, modifier),
        TerminalMode::Vt100 => Vt100.decode(state, queue, keycode, modifier),
    }
}
