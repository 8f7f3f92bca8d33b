//! TeleVideo 950 emulation.
//!
//! Cursor keys are single control codes.  Function keys send
//! `SOH <code> CR`: `@`..`J` unshifted, `\` then `a`..`j` shifted.
//! F12 and the editing block send nothing.

use super::escape::{EscapeTable, Segment, Sequence};
use super::layout::KeySlot;
use super::{DecoderState, Emulation, TerminalMode};

const NONE: Sequence = &[];

/// A single control code, whatever the modifiers.
macro_rules! control_row {
    ($code:literal) => {
        [
            &[Segment::Control($code)],
            &[Segment::Control($code)],
            &[Segment::Control($code)],
            &[Segment::Control($code)],
        ]
    };
}

macro_rules! function_key {
    ($plain:literal, $shifted:literal) => {
        [
            &[Segment::Control(b'A'), Segment::Bytes($plain)],
            &[Segment::Control(b'A'), Segment::Bytes($shifted)],
            NONE,
            NONE,
        ]
    };
}

const EMPTY_ROW: [Sequence; 4] = [NONE; 4];

pub(crate) static TABLE: EscapeTable = [
    control_row!(b'M'), // Enter
    control_row!(b'K'), // Up
    control_row!(b'V'), // Down
    control_row!(b'L'), // Right
    control_row!(b'H'), // Left
    EMPTY_ROW,          // Insert
    EMPTY_ROW,          // Delete
    EMPTY_ROW,          // Page Up
    EMPTY_ROW,          // Page Down
    EMPTY_ROW,          // Home
    EMPTY_ROW,          // End
    EMPTY_ROW,          // Pause
    function_key!(b"@\r", b"\\\r"),
    function_key!(b"A\r", b"a\r"),
    function_key!(b"B\r", b"b\r"),
    function_key!(b"C\r", b"c\r"),
    function_key!(b"D\r", b"d\r"),
    function_key!(b"E\r", b"e\r"),
    function_key!(b"F\r", b"f\r"),
    function_key!(b"G\r", b"g\r"),
    function_key!(b"H\r", b"h\r"),
    function_key!(b"I\r", b"i\r"),
    function_key!(b"J\r", b"j\r"),
    EMPTY_ROW, // F12
];

/// TeleVideo 950. Also owns the terminal-mode hot-keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tvi950;

impl Emulation for Tvi950 {
    fn table(&self) -> &'static EscapeTable {
        &TABLE
    }

    fn terminal_hotkey(&self, state: &mut DecoderState, slot: KeySlot) -> bool {
        let mode = match slot {
            KeySlot::F5 => TerminalMode::Tvi950,
            KeySlot::F6 => TerminalMode::Vt100,
            _ => return false,
        };
        info!("terminal mode -> {}", mode);
        state.terminal = mode;
        true
    }
}
