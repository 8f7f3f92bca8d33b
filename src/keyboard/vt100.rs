//! ANSI / VT100 emulation: xterm-style CSI sequences.
//!
//! Modified keys use the `CSI 1 ; <m>` form with `m` = 2 (Shift),
//! 5 (Ctrl) and 6 (Ctrl+Shift).  F1..F4 are SS3 when unmodified.
//!
//! Some rows deliberately differ from captures of older firmware, which
//! sent malformed sequences: Up with Ctrl+Shift, Insert with Shift, Delete
//! with Ctrl and Ctrl+Shift, End with Shift, and plain F1..F4.  Those
//! rows now follow xterm.  Page Up/Down with Ctrl+Shift and Home/End
//! with Ctrl still send nothing.

use super::escape::{EscapeTable, Segment, Sequence};
use super::Emulation;

/// Wrap one byte string as a sequence.
macro_rules! seq {
    () => {
        &[]
    };
    ($bytes:literal) => {
        &[Segment::Bytes($bytes)]
    };
}

const NEWLINE: Sequence = seq!(b"\n");
const SUB: Sequence = seq!(b"\x1a");

pub(crate) static TABLE: EscapeTable = [
    // Enter
    [NEWLINE, NEWLINE, NEWLINE, NEWLINE],
    // Up
    [seq!(b"\x1b[A"), seq!(b"\x1b[1;2A"), seq!(b"\x1b[1;5A"), seq!(b"\x1b[1;6A")],
    // Down
    [seq!(b"\x1b[B"), seq!(b"\x1b[1;2B"), seq!(b"\x1b[1;5B"), seq!(b"\x1b[1;6B")],
    // Right
    [seq!(b"\x1b[C"), seq!(b"\x1b[1;2C"), seq!(b"\x1b[1;5C"), seq!(b"\x1b[1;6C")],
    // Left
    [seq!(b"\x1b[D"), seq!(b"\x1b[1;2D"), seq!(b"\x1b[1;5D"), seq!(b"\x1b[1;6D")],
    // Insert
    [seq!(b"\x1b[2~"), seq!(b"\x1b[2;2~"), seq!(b"\x1b[2;5~"), seq!(b"\x1b[2;6~")],
    // Delete
    [seq!(b"\x1b[3~"), seq!(b"\x1b[3;2~"), seq!(b"\x1b[3;5~"), seq!(b"\x1b[3;6~")],
    // Page Up
    [seq!(b"\x1b[5~"), seq!(b"\x1b[5;2~"), seq!(b"\x1b[5;5~"), seq!()],
    // Page Down
    [seq!(b"\x1b[6~"), seq!(b"\x1b[6;2~"), seq!(b"\x1b[6;5~"), seq!()],
    // Home
    [seq!(b"\x1b[H"), seq!(b"\x1b[1;2H"), seq!(), seq!()],
    // End
    [seq!(b"\x1b[F"), seq!(b"\x1b[1;2F"), seq!(), seq!()],
    // Pause
    [SUB, SUB, seq!(), seq!()],
    // F1..F4
    [seq!(b"\x1bOP"), seq!(b"\x1b[1;2P"), seq!(b"\x1b[1;5P"), seq!(b"\x1b[1;6P")],
    [seq!(b"\x1bOQ"), seq!(b"\x1b[1;2Q"), seq!(b"\x1b[1;5Q"), seq!(b"\x1b[1;6Q")],
    [seq!(b"\x1bOR"), seq!(b"\x1b[1;2R"), seq!(b"\x1b[1;5R"), seq!(b"\x1b[1;6R")],
    [seq!(b"\x1bOS"), seq!(b"\x1b[1;2S"), seq!(b"\x1b[1;5S"), seq!(b"\x1b[1;6S")],
    // F5..F12
    [seq!(b"\x1b[15~"), seq!(b"\x1b[15;2~"), seq!(b"\x1b[15;5~"), seq!(b"\x1b[15;6~")],
    [seq!(b"\x1b[17~"), seq!(b"\x1b[17;2~"), seq!(b"\x1b[17;5~"), seq!(b"\x1b[17;6~")],
    [seq!(b"\x1b[18~"), seq!(b"\x1b[18;2~"), seq!(b"\x1b[18;5~"), seq!(b"\x1b[18;6~")],
    [seq!(b"\x1b[19~"), seq!(b"\x1b[19;2~"), seq!(b"\x1b[19;5~"), seq!(b"\x1b[19;6~")],
    [seq!(b"\x1b[20~"), seq!(b"\x1b[20;2~"), seq!(b"\x1b[20;5~"), seq!(b"\x1b[20;6~")],
    [seq!(b"\x1b[21~"), seq!(b"\x1b[21;2~"), seq!(b"\x1b[21;5~"), seq!(b"\x1b[21;6~")],
    [seq!(b"\x1b[23~"), seq!(b"\x1b[23;2~"), seq!(b"\x1b[23;5~"), seq!(b"\x1b[23;6~")],
    [seq!(b"\x1b[24~"), seq!(b"\x1b[24;2~"), seq!(b"\x1b[24;5~"), seq!(b"\x1b[24;6~")],
];

/// xterm-compatible terminal. Intercepts no extra hot-keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vt100;

impl Emulation for Vt100 {
    fn table(&self) -> &'static EscapeTable {
        &TABLE
    }
}
