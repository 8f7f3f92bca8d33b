//! Per-language layout tables.
//!
//! Each physical key slot (USB HID usage on the Keyboard page) maps to a
//! `LayoutEntry`: which locks it reacts to and the value it produces
//! unshifted, shifted and with Ctrl.  Slots `0x00..=0x64` are defined;
//! everything above is unmapped.

use crate::error::Error;
use crate::keyboard::escape::VirtualKey;

/// Number of addressable physical key slots.
pub const KEY_SLOTS: usize = 128;

/// A validated physical key identifier (`0..=127`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySlot(u8);

impl KeySlot {
    pub const F1: KeySlot = KeySlot(0x3A);
    pub const F2: KeySlot = KeySlot(0x3B);
    pub const F5: KeySlot = KeySlot(0x3E);
    pub const F6: KeySlot = KeySlot(0x3F);
    pub const F12: KeySlot = KeySlot(0x45);
    pub const CAPS_LOCK: KeySlot = KeySlot(0x39);
    pub const SCROLL_LOCK: KeySlot = KeySlot(0x47);
    pub const NUM_LOCK: KeySlot = KeySlot(0x53);

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn code(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for KeySlot {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        if (code as usize) < KEY_SLOTS {
            Ok(KeySlot(code))
        } else {
            Err(Error::KeycodeOutOfRange(code))
        }
    }
}

/// Keys the dispatch layer handles itself; they never produce output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemKey {
    CapsLock,
    PrintScreen,
    ScrollLock,
    NumLock,
}

/// What a key produces in one column of the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyValue {
    /// Nothing.
    None,
    /// A literal byte, pushed as-is.
    Char(u8),
    /// A non-printable key, expanded through the terminal's escape table.
    Virtual(VirtualKey),
    /// A lock or system key.
    System(SystemKey),
}

impl KeyValue {
    /// A literal byte, with `0` meaning "no output".
    pub const fn char(byte: u8) -> Self {
        if byte == 0 {
            KeyValue::None
        } else {
            KeyValue::Char(byte)
        }
    }
}

/// Per-key flags from the layout table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LockFlags(u8);

impl LockFlags {
    pub const NONE: LockFlags = LockFlags(0);
    /// A letter key (Caps Lock sensitive on a real terminal keyboard).
    pub const CAPS: LockFlags = LockFlags(0x01);
    /// Ctrl derives a control code from the base character.
    pub const CTRL: LockFlags = LockFlags(0x08);

    pub const fn union(self, other: LockFlags) -> LockFlags {
        LockFlags(self.0 | other.0)
    }

    pub const fn contains(self, other: LockFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

/// One row of a layout table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayoutEntry {
    pub flags: LockFlags,
    pub base: KeyValue,
    pub shifted: KeyValue,
    pub ctrl: KeyValue,
}

impl LayoutEntry {
    pub const UNMAPPED: LayoutEntry = LayoutEntry {
        flags: LockFlags::NONE,
        base: KeyValue::None,
        shifted: KeyValue::None,
        ctrl: KeyValue::None,
    };

    pub fn is_unmapped(&self) -> bool {
        *self == Self::UNMAPPED
    }
}

/// Keyboard language, selecting the layout table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Language {
    #[default]
    English,
    French,
}

impl Language {
    pub fn table(self) -> &'static [LayoutEntry] {
        match self {
            Language::English => &EN_US,
            Language::French => &FR_FR,
        }
    }

    /// Layout row for `slot`; slots past the table are unmapped.
    pub fn entry(self, slot: KeySlot) -> LayoutEntry {
        self.table()
            .get(slot.index())
            .copied()
            .unwrap_or(LayoutEntry::UNMAPPED)
    }
}

// Table builders

const CAPS_CTRL: LockFlags = LockFlags::CAPS.union(LockFlags::CTRL);

const fn c(byte: u8) -> KeyValue {
    KeyValue::char(byte)
}

const fn v(key: VirtualKey) -> KeyValue {
    KeyValue::Virtual(key)
}

const fn s(key: SystemKey) -> KeyValue {
    KeyValue::System(key)
}

const fn entry(flags: LockFlags, base: KeyValue, shifted: KeyValue, ctrl: KeyValue) -> LayoutEntry {
    LayoutEntry {
        flags,
        base,
        shifted,
        ctrl,
    }
}

/// Letter key: Caps Lock and Ctrl aware.
const fn letter(base: u8, shifted: u8, ctrl: u8) -> LayoutEntry {
    entry(CAPS_CTRL, c(base), c(shifted), c(ctrl))
}

/// Printable key with an optional AltGr/Ctrl column.
const fn key(base: u8, shifted: u8, ctrl: u8) -> LayoutEntry {
    entry(LockFlags::NONE, c(base), c(shifted), c(ctrl))
}

/// Same value in every column.
const fn all(value: KeyValue) -> LayoutEntry {
    entry(LockFlags::NONE, value, value, value)
}

/// Keypad key: digit in the base column, navigation when shifted or locked.
const fn pad(digit: u8, nav: KeyValue) -> LayoutEntry {
    entry(LockFlags::NONE, c(digit), nav, nav)
}

const UNMAPPED: LayoutEntry = LayoutEntry::UNMAPPED;

// Keys shared by both layouts (0x28..=0x2c and 0x39..=0x63).

const ENTER: LayoutEntry = all(v(VirtualKey::Enter));
const ESCAPE: LayoutEntry = all(c(0x1B));
const BACKSPACE: LayoutEntry = all(c(0x08));
const TAB: LayoutEntry = all(c(0x09));
const SPACE: LayoutEntry = key(b' ', b' ', 0);

const F_KEYS: [LayoutEntry; 12] = [
    all(v(VirtualKey::F1)),
    all(v(VirtualKey::F2)),
    all(v(VirtualKey::F3)),
    all(v(VirtualKey::F4)),
    all(v(VirtualKey::F5)),
    all(v(VirtualKey::F6)),
    all(v(VirtualKey::F7)),
    all(v(VirtualKey::F8)),
    all(v(VirtualKey::F9)),
    all(v(VirtualKey::F10)),
    all(v(VirtualKey::F11)),
    all(v(VirtualKey::F12)),
];

/// US English (QWERTY).
static EN_US: [LayoutEntry; 0x65] = [
    UNMAPPED,                   // 0x00
    UNMAPPED,                   // 0x01
    UNMAPPED,                   // 0x02
    UNMAPPED,                   // 0x03
    letter(b'a', b'A', 0x01),   // 0x04
    letter(b'b', b'B', 0x02),   // 0x05
    letter(b'c', b'C', 0x03),   // 0x06
    letter(b'd', b'D', 0x04),   // 0x07
    letter(b'e', b'E', 0x05),   // 0x08
    letter(b'f', b'F', 0x06),   // 0x09
    letter(b'g', b'G', 0x07),   // 0x0a
    letter(b'h', b'H', 0x08),   // 0x0b
    letter(b'i', b'I', 0x09),   // 0x0c
    letter(b'j', b'J', 0x0A),   // 0x0d
    letter(b'k', b'K', 0x0B),   // 0x0e
    letter(b'l', b'L', 0x0C),   // 0x0f
    letter(b'm', b'M', 0x0D),   // 0x10
    letter(b'n', b'N', 0x0E),   // 0x11
    letter(b'o', b'O', 0x0F),   // 0x12
    letter(b'p', b'P', 0x10),   // 0x13
    letter(b'q', b'Q', 0x11),   // 0x14
    letter(b'r', b'R', 0x12),   // 0x15
    letter(b's', b'S', 0x13),   // 0x16
    letter(b't', b'T', 0x14),   // 0x17
    letter(b'u', b'U', 0x15),   // 0x18
    letter(b'v', b'V', 0x16),   // 0x19
    letter(b'w', b'W', 0x17),   // 0x1a
    letter(b'x', b'X', 0x18),   // 0x1b
    letter(b'y', b'Y', 0x19),   // 0x1c
    letter(b'z', b'Z', 0x1A),   // 0x1d
    key(b'1', b'!', 0),         // 0x1e
    key(b'2', b'@', 0),         // 0x1f
    key(b'3', b'#', 0),         // 0x20
    key(b'4', b'$', 0),         // 0x21
    key(b'5', b'%', 0),         // 0x22
    key(b'6', b'^', 0),         // 0x23
    key(b'7', b'&', 0),         // 0x24
    key(b'8', b'*', 0),         // 0x25
    key(b'9', b'(', 0),         // 0x26
    key(b'0', b')', 0),         // 0x27
    ENTER,                      // 0x28
    ESCAPE,                     // 0x29
    BACKSPACE,                  // 0x2a
    TAB,                        // 0x2b
    SPACE,                      // 0x2c
    key(b'-', b'_', 0),         // 0x2d
    key(b'=', b'+', 0),         // 0x2e
    key(b'[', b'{', 0),         // 0x2f
    key(b']', b'}', 0),         // 0x30
    key(b'\\', b'|', 0),        // 0x31
    key(b'#', b'~', 0),         // 0x32 non-US hash
    key(b';', b':', 0),         // 0x33
    key(b'\'', b'"', 0),        // 0x34
    key(b'`', b'~', 0),         // 0x35
    key(b',', b'<', 0),         // 0x36
    key(b'.', b'>', 0),         // 0x37
    key(b'/', b'?', 0),         // 0x38
    all(s(SystemKey::CapsLock)),    // 0x39
    F_KEYS[0],                  // 0x3a
    F_KEYS[1],                  // 0x3b
    F_KEYS[2],                  // 0x3c
    F_KEYS[3],                  // 0x3d
    F_KEYS[4],                  // 0x3e
    F_KEYS[5],                  // 0x3f
    F_KEYS[6],                  // 0x40
    F_KEYS[7],                  // 0x41
    F_KEYS[8],                  // 0x42
    F_KEYS[9],                  // 0x43
    F_KEYS[10],                 // 0x44
    F_KEYS[11],                 // 0x45
    all(s(SystemKey::PrintScreen)), // 0x46
    all(s(SystemKey::ScrollLock)),  // 0x47
    all(v(VirtualKey::Pause)),      // 0x48
    all(v(VirtualKey::Insert)),     // 0x49
    all(v(VirtualKey::Home)),       // 0x4a
    all(v(VirtualKey::PageUp)),     // 0x4b
    all(v(VirtualKey::Delete)),     // 0x4c
    all(v(VirtualKey::End)),        // 0x4d
    all(v(VirtualKey::PageDown)),   // 0x4e
    all(v(VirtualKey::Right)),      // 0x4f
    all(v(VirtualKey::Left)),       // 0x50
    all(v(VirtualKey::Down)),       // 0x51
    all(v(VirtualKey::Up)),         // 0x52
    all(s(SystemKey::NumLock)),     // 0x53
    key(b'/', b'/', 0),         // 0x54 keypad
    key(b'*', b'*', 0),         // 0x55
    key(b'-', b'-', 0),         // 0x56
    key(b'+', b'+', 0),         // 0x57
    ENTER,                      // 0x58
    pad(b'1', v(VirtualKey::End)),      // 0x59
    pad(b'2', v(VirtualKey::Down)),     // 0x5a
    pad(b'3', v(VirtualKey::PageDown)), // 0x5b
    pad(b'4', v(VirtualKey::Left)),     // 0x5c
    entry(LockFlags::NONE, c(b'5'), c(b'5'), KeyValue::None), // 0x5d
    pad(b'6', v(VirtualKey::Right)),    // 0x5e
    pad(b'7', v(VirtualKey::Home)),     // 0x5f
    pad(b'8', v(VirtualKey::Up)),       // 0x60
    pad(b'9', v(VirtualKey::PageUp)),   // 0x61
    pad(b'0', v(VirtualKey::Insert)),   // 0x62
    pad(b'.', v(VirtualKey::Delete)),   // 0x63
    entry(LockFlags::NONE, c(b'='), c(b'='), KeyValue::None), // 0x64
];

/// French (AZERTY), Latin-1 bytes for accented characters.
static FR_FR: [LayoutEntry; 0x65] = [
    UNMAPPED,                   // 0x00
    UNMAPPED,                   // 0x01
    UNMAPPED,                   // 0x02
    UNMAPPED,                   // 0x03
    letter(b'q', b'Q', 0x11),   // 0x04
    letter(b'b', b'B', 0x02),   // 0x05
    letter(b'c', b'C', 0x03),   // 0x06
    letter(b'd', b'D', 0x04),   // 0x07
    letter(b'e', b'E', 0x05),   // 0x08
    letter(b'f', b'F', 0x06),   // 0x09
    letter(b'g', b'G', 0x07),   // 0x0a
    letter(b'h', b'H', 0x08),   // 0x0b
    letter(b'i', b'I', 0x09),   // 0x0c
    letter(b'j', b'J', 0x0A),   // 0x0d
    letter(b'k', b'K', 0x0B),   // 0x0e
    letter(b'l', b'L', 0x0C),   // 0x0f
    letter(b',', b'?', 0),      // 0x10
    letter(b'n', b'N', 0x0E),   // 0x11
    letter(b'o', b'O', 0x0F),   // 0x12
    letter(b'p', b'P', 0x10),   // 0x13
    letter(b'a', b'A', 0x01),   // 0x14
    letter(b'r', b'R', 0x12),   // 0x15
    letter(b's', b'S', 0x13),   // 0x16
    letter(b't', b'T', 0x14),   // 0x17
    letter(b'u', b'U', 0x15),   // 0x18
    letter(b'v', b'V', 0x16),   // 0x19
    letter(b'z', b'Z', 0x1A),   // 0x1a
    letter(b'x', b'X', 0x18),   // 0x1b
    letter(b'y', b'Y', 0x19),   // 0x1c
    letter(b'w', b'W', 0x17),   // 0x1d
    key(b'&', b'1', 0),         // 0x1e
    key(0xE9, b'2', b'~'),      // 0x1f é
    key(b'"', b'3', b'#'),      // 0x20
    key(b'\'', b'4', b'{'),     // 0x21
    key(b'(', b'5', b'['),      // 0x22
    key(b'-', b'6', b'|'),      // 0x23
    key(0xE8, b'7', b'`'),      // 0x24 è
    key(b'_', b'8', b'\\'),     // 0x25
    key(0xE7, b'9', b'^'),      // 0x26 ç
    key(0xE0, b'0', b'@'),      // 0x27 à
    ENTER,                      // 0x28
    ESCAPE,                     // 0x29
    BACKSPACE,                  // 0x2a
    TAB,                        // 0x2b
    SPACE,                      // 0x2c
    key(b')', 0xB0, b']'),      // 0x2d °
    key(b'=', b'+', b'}'),      // 0x2e
    key(b'^', 0xA8, 0),         // 0x2f ¨
    key(b'$', 0xA3, 0xA4),      // 0x30 £ ¤
    key(b'*', 0xB5, 0),         // 0x31 µ
    key(b'#', b'~', 0),         // 0x32
    key(b'm', b'M', 0),         // 0x33
    key(0xF9, b'%', 0),         // 0x34 ù
    key(0xB2, 0, 0),            // 0x35 ²
    key(b';', b'.', 0),         // 0x36
    key(b':', b'/', 0),         // 0x37
    key(b'!', 0xA7, 0),         // 0x38 §
    entry(LockFlags::NONE, s(SystemKey::CapsLock), s(SystemKey::CapsLock), KeyValue::None), // 0x39
    F_KEYS[0],                  // 0x3a
    F_KEYS[1],                  // 0x3b
    F_KEYS[2],                  // 0x3c
    F_KEYS[3],                  // 0x3d
    F_KEYS[4],                  // 0x3e
    F_KEYS[5],                  // 0x3f
    F_KEYS[6],                  // 0x40
    F_KEYS[7],                  // 0x41
    F_KEYS[8],                  // 0x42
    F_KEYS[9],                  // 0x43
    F_KEYS[10],                 // 0x44
    F_KEYS[11],                 // 0x45
    all(s(SystemKey::PrintScreen)), // 0x46
    all(s(SystemKey::ScrollLock)),  // 0x47
    all(v(VirtualKey::Pause)),      // 0x48
    all(v(VirtualKey::Insert)),     // 0x49
    all(v(VirtualKey::Home)),       // 0x4a
    all(v(VirtualKey::PageUp)),     // 0x4b
    all(v(VirtualKey::Delete)),     // 0x4c
    all(v(VirtualKey::End)),        // 0x4d
    all(v(VirtualKey::PageDown)),   // 0x4e
    all(v(VirtualKey::Right)),      // 0x4f
    all(v(VirtualKey::Left)),       // 0x50
    all(v(VirtualKey::Down)),       // 0x51
    all(v(VirtualKey::Up)),         // 0x52
    all(s(SystemKey::NumLock)),     // 0x53
    key(b'/', b'/', 0),         // 0x54 keypad
    key(b'*', b'*', 0),         // 0x55
    key(b'-', b'-', 0),         // 0x56
    key(b'+', b'+', 0),         // 0x57
    ENTER,                      // 0x58
    pad(b'1', v(VirtualKey::End)),      // 0x59
    pad(b'2', v(VirtualKey::Down)),     // 0x5a
    pad(b'3', v(VirtualKey::PageDown)), // 0x5b
    pad(b'4', v(VirtualKey::Left)),     // 0x5c
    entry(LockFlags::NONE, c(b'5'), c(b'5'), KeyValue::None), // 0x5d
    pad(b'6', v(VirtualKey::Right)),    // 0x5e
    pad(b'7', v(VirtualKey::Home)),     // 0x5f
    pad(b'8', v(VirtualKey::Up)),       // 0x60
    pad(b'9', v(VirtualKey::PageUp)),   // 0x61
    pad(b'0', v(VirtualKey::Insert)),   // 0x62
    pad(b'.', v(VirtualKey::Delete)),   // 0x63
    entry(LockFlags::NONE, c(b'<'), c(b'>'), KeyValue::None), // 0x64 non-US backslash
];
