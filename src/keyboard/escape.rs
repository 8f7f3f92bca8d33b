//! Virtual keys and the escape sequences terminals expect for them.

/// A non-printable key that expands to a terminal-specific sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum VirtualKey {
    Enter = 0,
    Up,
    Down,
    Right,
    Left,
    Insert,
    Delete,
    PageUp,
    PageDown,
    Home,
    End,
    Pause,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl VirtualKey {
    pub const COUNT: usize = 24;

    /// Row in an escape table.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Which of Ctrl and Shift are held when a virtual key is expanded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Quadrant {
    Plain = 0,
    Shift = 1,
    Ctrl = 2,
    CtrlShift = 3,
}

impl Quadrant {
    /// `2 * ctrl + shift`.
    pub const fn new(ctrl: bool, shift: bool) -> Self {
        match (ctrl, shift) {
            (false, false) => Quadrant::Plain,
            (false, true) => Quadrant::Shift,
            (true, false) => Quadrant::Ctrl,
            (true, true) => Quadrant::CtrlShift,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One piece of an escape sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Pushed verbatim.
    Bytes(&'static [u8]),
    /// Pushed as the control code `byte & 0x1F` (`Control(b'A')` is SOH).
    Control(u8),
}

impl Segment {
    /// Bytes this segment expands to, in order.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        let (slice, mask): (&[u8], u8) = match self {
            Segment::Bytes(bytes) => (*bytes, 0xFF),
            Segment::Control(byte) => (core::slice::from_ref(byte), 0x1F),
        };
        slice.iter().map(move |b| b & mask)
    }
}

/// An escape sequence; empty means "no output".
pub type Sequence = &'static [Segment];

/// The four sequences for one virtual key, indexed by `Quadrant`.
pub type EscapeRow = [Sequence; 4];

/// A full escape table, indexed by `VirtualKey`.
pub type EscapeTable = [EscapeRow; VirtualKey::COUNT];

/// Look up the sequence for `key` held with `quadrant`.
pub fn lookup(table: &EscapeTable, key: VirtualKey, quadrant: Quadrant) -> Sequence {
    table[key.index()][quadrant.index()]
}
