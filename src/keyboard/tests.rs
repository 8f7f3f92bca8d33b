//! Unit tests for the keyboard decoder.
//!
//! Each test decodes into a fresh queue and compares the drained codes.

use super::escape::{self, Quadrant, Segment, VirtualKey};
use super::layout::{KeySlot, KeyValue, Language, LayoutEntry, LockFlags, SystemKey};
use super::{decode, DecoderState, Emulation, Modifiers, TerminalMode, Tvi950, Vt100};
use crate::error::Error;
use crate::queue::EventQueue;

type Queue = EventQueue<u16, 32>;

const LCTRL: u8 = 0x01;
const LSHIFT: u8 = 0x02;
const LALT: u8 = 0x04;
const LGUI: u8 = 0x08;
const RCTRL: u8 = 0x10;
const RSHIFT: u8 = 0x20;
const RGUI: u8 = 0x80;

fn drain(queue: &mut Queue) -> Vec<u8> {
    core::iter::from_fn(|| queue.pop()).map(|code| code as u8).collect()
}

fn vt100() -> DecoderState {
    DecoderState {
        terminal: TerminalMode::Vt100,
        ..DecoderState::default()
    }
}

fn press(state: &mut DecoderState, keycode: u8, modifier: u8) -> Vec<u8> {
    let mut queue = Queue::new();
    decode(state, &mut queue, keycode, modifier).unwrap();
    drain(&mut queue)
}

// ═══════════════════════════════════════════════════════════════════════════
// Modifier Folding
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn right_hand_modifiers_fold_onto_left() {
    let mods = Modifiers::from_report(RCTRL | RSHIFT);
    assert!(mods.ctrl());
    assert!(mods.shift());
    assert!(!mods.alt());
    assert_eq!(mods.bits(), LCTRL | LSHIFT);
    assert_eq!(mods.quadrant(), Quadrant::CtrlShift);
}

#[test]
fn quadrant_index_is_two_ctrl_plus_shift() {
    assert_eq!(Quadrant::new(false, false).index(), 0);
    assert_eq!(Quadrant::new(false, true).index(), 1);
    assert_eq!(Quadrant::new(true, false).index(), 2);
    assert_eq!(Quadrant::new(true, true).index(), 3);
}

// ═══════════════════════════════════════════════════════════════════════════
// Layout Table
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn keycode_above_127_is_rejected() {
    assert_eq!(KeySlot::try_from(0x80), Err(Error::KeycodeOutOfRange(0x80)));
    assert!(KeySlot::try_from(0x7F).is_ok());

    let mut state = DecoderState::default();
    let mut queue = Queue::new();
    assert_eq!(
        decode(&mut state, &mut queue, 0xE0, 0),
        Err(Error::KeycodeOutOfRange(0xE0))
    );
    assert!(queue.is_empty());
}

#[test]
fn slots_past_the_table_are_unmapped() {
    for language in [Language::English, Language::French] {
        for code in 0x65..0x80u8 {
            let slot = KeySlot::try_from(code).unwrap();
            assert!(language.entry(slot).is_unmapped(), "{language:?} {code:#x}");
        }
    }
}

#[test]
fn letters_respond_to_caps_and_ctrl() {
    let entry = Language::English.entry(KeySlot::try_from(0x04).unwrap());
    assert!(entry.flags.contains(LockFlags::CAPS));
    assert!(entry.flags.contains(LockFlags::CTRL));
    assert_eq!(entry.base, KeyValue::Char(b'a'));
    assert_eq!(entry.shifted, KeyValue::Char(b'A'));
}

#[test]
fn lock_keys_are_system_values() {
    let caps = Language::English.entry(KeySlot::CAPS_LOCK);
    assert_eq!(caps.base, KeyValue::System(SystemKey::CapsLock));
    let num = Language::French.entry(KeySlot::NUM_LOCK);
    assert_eq!(num.base, KeyValue::System(SystemKey::NumLock));
}

#[test]
fn zero_column_is_no_output() {
    assert_eq!(KeyValue::char(0), KeyValue::None);
    assert_eq!(LayoutEntry::UNMAPPED.base, KeyValue::None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Plain, Shift and Lock Selection
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn letter_plain_shift_ctrl() {
    let mut state = DecoderState::default();
    assert_eq!(press(&mut state, 0x04, 0), b"a");
    assert_eq!(press(&mut state, 0x04, LSHIFT), b"A");
    assert_eq!(press(&mut state, 0x04, RSHIFT), b"A");
    assert_eq!(press(&mut state, 0x04, LCTRL), [0x01]);
    assert_eq!(press(&mut state, 0x1D, RCTRL), [0x1A]);
}

#[test]
fn capslock_selects_shifted_and_shift_inverts_it() {
    let mut state = DecoderState {
        capslock: true,
        ..DecoderState::default()
    };
    assert_eq!(press(&mut state, 0x04, 0), b"A");
    assert_eq!(press(&mut state, 0x04, LSHIFT), b"a");
}

#[test]
fn capslock_shifts_digits_too() {
    let mut state = DecoderState {
        capslock: true,
        ..DecoderState::default()
    };
    assert_eq!(press(&mut state, 0x1E, 0), b"!");
    assert_eq!(press(&mut state, 0x1E, LSHIFT), b"1");
    assert_eq!(press(&mut state, 0x38, 0), b"?");
}

#[test]
fn numlock_uppercases_letters() {
    let mut state = DecoderState {
        numlock: true,
        ..DecoderState::default()
    };
    assert_eq!(press(&mut state, 0x04, 0), b"A");
    assert_eq!(press(&mut state, 0x04, LSHIFT), b"a");
    assert_eq!(press(&mut state, 0x1F, 0), b"@");
}

#[test]
fn both_latches_still_select_shifted() {
    let mut state = DecoderState {
        capslock: true,
        numlock: true,
        ..DecoderState::default()
    };
    assert_eq!(press(&mut state, 0x04, 0), b"A");
    assert_eq!(press(&mut state, 0x04, RSHIFT), b"a");
}

#[test]
fn keypad_sends_digits_until_navigation_latch_is_set() {
    let mut state = vt100();
    assert_eq!(press(&mut state, 0x60, 0), b"8");

    state.numlock = true;
    assert_eq!(press(&mut state, 0x60, 0), b"\x1b[A");
    assert_eq!(press(&mut state, 0x5F, 0), b"\x1b[H");
    // Shift inverts the latch.
    assert_eq!(press(&mut state, 0x60, LSHIFT), b"8");
}

#[test]
fn unmapped_keys_produce_nothing_under_any_modifier() {
    let mut state = DecoderState::default();
    for code in 0x00..=0x03 {
        for modifier in [0, LSHIFT, LCTRL, LALT, LCTRL | LSHIFT, 0xFF] {
            assert!(press(&mut state, code, modifier).is_empty());
        }
    }
}

#[test]
fn system_keys_produce_nothing() {
    let mut state = DecoderState::default();
    assert!(press(&mut state, 0x39, 0).is_empty());
    assert!(press(&mut state, 0x46, LSHIFT).is_empty());
    assert!(press(&mut state, 0x53, LCTRL).is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Ctrl and Alt
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn ctrl_on_digit_sends_nothing() {
    let mut state = DecoderState::default();
    assert!(press(&mut state, 0x1F, LCTRL).is_empty());
}

#[test]
fn ctrl_on_virtual_key_uses_ctrl_quadrant() {
    let mut state = vt100();
    assert_eq!(press(&mut state, 0x52, LCTRL), b"\x1b[1;5A");
    assert_eq!(press(&mut state, 0x52, LCTRL | LSHIFT), b"\x1b[1;6A");
}

#[test]
fn alt_sends_control_code_only_for_keys_with_alternate_value() {
    let mut state = DecoderState {
        language: Language::French,
        ..DecoderState::default()
    };
    // FR '"' has an alternate ('#'): '"' & 0x1F.
    assert_eq!(press(&mut state, 0x20, LALT), [b'"' & 0x1F]);
    // FR '&' has none.
    assert!(press(&mut state, 0x1E, LALT).is_empty());
}

#[test]
fn alt_on_letters_reuses_control_derivation() {
    let mut state = DecoderState::default();
    assert_eq!(press(&mut state, 0x04, LALT), [0x01]);
}

#[test]
fn ctrl_wins_over_alt() {
    let mut state = DecoderState::default();
    assert_eq!(press(&mut state, 0x06, LCTRL | LALT), [0x03]);
}

// ═══════════════════════════════════════════════════════════════════════════
// VT100 Escape Table
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn vt100_arrow_up_quadrants() {
    let mut state = vt100();
    assert_eq!(press(&mut state, 0x52, 0), [0x1B, b'[', b'A']);
    assert_eq!(press(&mut state, 0x52, LSHIFT), b"\x1b[1;2A");
}

#[test]
fn vt100_enter_is_newline_everywhere() {
    let mut state = vt100();
    for modifier in [0, LSHIFT, LCTRL, LCTRL | LSHIFT] {
        assert_eq!(press(&mut state, 0x28, modifier), b"\n");
        assert_eq!(press(&mut state, 0x58, modifier), b"\n");
    }
}

#[test]
fn vt100_function_keys() {
    let mut state = vt100();
    assert_eq!(press(&mut state, 0x3A, 0), b"\x1bOP");
    assert_eq!(press(&mut state, 0x3D, LSHIFT), b"\x1b[1;2S");
    assert_eq!(press(&mut state, 0x3E, 0), b"\x1b[15~");
    assert_eq!(press(&mut state, 0x44, LCTRL), b"\x1b[23;5~");
    assert_eq!(press(&mut state, 0x45, LCTRL | LSHIFT), b"\x1b[24;6~");
}

#[test]
fn vt100_editing_keys() {
    let mut state = vt100();
    assert_eq!(press(&mut state, 0x49, LSHIFT), b"\x1b[2;2~");
    assert_eq!(press(&mut state, 0x4C, LCTRL), b"\x1b[3;5~");
    assert_eq!(press(&mut state, 0x4D, LSHIFT), b"\x1b[1;2F");
    assert_eq!(press(&mut state, 0x4B, 0), b"\x1b[5~");
    assert!(press(&mut state, 0x4E, LCTRL | LSHIFT).is_empty());
    assert!(press(&mut state, 0x4A, LCTRL).is_empty());
    assert_eq!(press(&mut state, 0x48, 0), [0x1A]);
}

#[test]
fn vt100_has_no_terminal_hotkeys() {
    let mut state = vt100();
    // Meta+F5 is not intercepted: it decodes as a plain F5.
    assert_eq!(press(&mut state, 0x3E, LGUI), b"\x1b[15~");
    assert_eq!(state.terminal, TerminalMode::Vt100);
}

// ═══════════════════════════════════════════════════════════════════════════
// TVI950 Escape Table
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn tvi950_is_default_terminal() {
    assert_eq!(DecoderState::default().terminal, TerminalMode::Tvi950);
}

#[test]
fn tvi950_cursor_keys_are_control_codes() {
    let mut state = DecoderState::default();
    assert_eq!(press(&mut state, 0x28, 0), [0x0D]);
    assert_eq!(press(&mut state, 0x52, 0), [0x0B]);
    assert_eq!(press(&mut state, 0x51, LSHIFT), [0x16]);
    assert_eq!(press(&mut state, 0x4F, LCTRL), [0x0C]);
    assert_eq!(press(&mut state, 0x50, LCTRL | LSHIFT), [0x08]);
}

#[test]
fn tvi950_function_keys_send_soh_code_cr() {
    let mut state = DecoderState::default();
    assert_eq!(press(&mut state, 0x3A, 0), [0x01, b'@', b'\r']);
    assert_eq!(press(&mut state, 0x3A, LSHIFT), [0x01, b'\\', b'\r']);
    assert_eq!(press(&mut state, 0x44, 0), [0x01, b'J', b'\r']);
    assert_eq!(press(&mut state, 0x44, LSHIFT), [0x01, b'j', b'\r']);
    assert!(press(&mut state, 0x3B, LCTRL).is_empty());
    assert!(press(&mut state, 0x45, 0).is_empty());
}

#[test]
fn tvi950_editing_block_is_silent() {
    let mut state = DecoderState::default();
    for code in 0x48..=0x4E {
        assert!(press(&mut state, code, 0).is_empty(), "{code:#x}");
    }
}

#[test]
fn control_segment_masks_to_low_five_bits() {
    let bytes: Vec<u8> = Segment::Control(b'M').bytes().collect();
    assert_eq!(bytes, [0x0D]);
    let bytes: Vec<u8> = Segment::Bytes(b"@\r").bytes().collect();
    assert_eq!(bytes, b"@\r");
}

#[test]
fn lookup_picks_row_and_quadrant() {
    let expand = |seq: &[Segment]| -> Vec<u8> { seq.iter().flat_map(|s| s.bytes()).collect() };

    let f1 = escape::lookup(Tvi950.table(), VirtualKey::F1, Quadrant::Plain);
    assert_eq!(expand(f1), [0x01, b'@', b'\r']);
    let f5 = escape::lookup(Vt100.table(), VirtualKey::F5, Quadrant::CtrlShift);
    assert_eq!(expand(f5), b"\x1b[15;6~");
    assert!(escape::lookup(Vt100.table(), VirtualKey::Home, Quadrant::Ctrl).is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Hot-keys
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn meta_f2_switches_to_french() {
    let mut state = DecoderState::default();
    assert_eq!(press(&mut state, 0x04, 0), b"a");

    assert!(press(&mut state, 0x3B, LGUI).is_empty());
    assert_eq!(state.language, Language::French);
    assert_eq!(press(&mut state, 0x04, 0), b"q");

    // Either GUI key works.
    assert!(press(&mut state, 0x3A, RGUI).is_empty());
    assert_eq!(state.language, Language::English);
}

#[test]
fn meta_f12_toggles_debug() {
    let mut state = DecoderState::default();
    press(&mut state, 0x45, LGUI);
    assert!(state.debug);
    press(&mut state, 0x45, LGUI);
    assert!(!state.debug);
}

#[test]
fn tvi950_meta_f6_switches_to_vt100_and_back_is_not_possible() {
    let mut state = DecoderState::default();
    assert!(press(&mut state, 0x3F, LGUI).is_empty());
    assert_eq!(state.terminal, TerminalMode::Vt100);
    assert_eq!(press(&mut state, 0x52, 0), b"\x1b[A");

    press(&mut state, 0x3E, LGUI);
    assert_eq!(state.terminal, TerminalMode::Vt100);
}

#[test]
fn tvi950_meta_f5_keeps_tvi950() {
    let mut state = DecoderState::default();
    assert!(press(&mut state, 0x3E, LGUI).is_empty());
    assert_eq!(state.terminal, TerminalMode::Tvi950);
}

#[test]
fn meta_on_other_keys_decodes_normally() {
    let mut state = DecoderState::default();
    assert_eq!(press(&mut state, 0x04, LGUI), b"a");
}

// ═══════════════════════════════════════════════════════════════════════════
// Queue Overflow
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn full_queue_drops_silently() {
    let mut state = vt100();
    let mut queue: EventQueue<u16, 4> = EventQueue::new();
    // 7-byte sequence into a 4-slot queue.
    decode(&mut state, &mut queue, 0x45, LCTRL | LSHIFT).unwrap();
    assert!(queue.is_full());
    assert_eq!(queue.dropped(), 3);
    let kept: Vec<u16> = core::iter::from_fn(|| queue.pop()).collect();
    assert_eq!(kept, [0x1B, u16::from(b'['), u16::from(b'2'), u16::from(b'4')]);
}
