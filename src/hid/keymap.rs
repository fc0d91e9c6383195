//! Scan-code tables
//!
//! Four fixed tables map a boot report usage code (0x00-0xE7) to a logical
//! [`Key`] and an index into the input subsystem's code-point map. The
//! tables differ only where Shift changes the symbol on a key or where Num
//! Lock switches the keypad between digits and navigation. They are built
//! at compile time from one base table plus two overlays.

use super::constants::{KEYPAD_SLASH, MAX_SCAN_CODE};
use super::key::Key;

/// Code-point map index meaning "no entry"
pub const NO_MAP_ENTRY: u8 = 0xFF;

/// Entries per table: one per usage code 0x00..=0xE7
pub const TABLE_LEN: usize = MAX_SCAN_CODE as usize + 1;

/// One scan-code table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCodeEntry {
    /// Logical key
    pub key: Key,
    /// Index into the code-point map, or [`NO_MAP_ENTRY`]
    pub map_entry_index: u8,
}

impl KeyCodeEntry {
    const NONE: Self = Self::new(Key::Invalid, NO_MAP_ENTRY);

    const fn new(key: Key, map_entry_index: u8) -> Self {
        Self {
            key,
            map_entry_index,
        }
    }
}

type Patch = (u8, Key, u8);

// Usage codes 0x00-0x03 (no key, roll over, POST fail, undefined) and the
// reserved range 0x68-0xDF stay `Key::Invalid`.
const BASE: &[Patch] = &[
    (0x04, Key::A, 0x1E),
    (0x05, Key::B, 0x30),
    (0x06, Key::C, 0x2E),
    (0x07, Key::D, 0x20),
    (0x08, Key::E, 0x12),
    (0x09, Key::F, 0x21),
    (0x0A, Key::G, 0x22),
    (0x0B, Key::H, 0x23),
    (0x0C, Key::I, 0x17),
    (0x0D, Key::J, 0x24),
    (0x0E, Key::K, 0x25),
    (0x0F, Key::L, 0x26),
    (0x10, Key::M, 0x32),
    (0x11, Key::N, 0x31),
    (0x12, Key::O, 0x18),
    (0x13, Key::P, 0x19),
    (0x14, Key::Q, 0x10),
    (0x15, Key::R, 0x13),
    (0x16, Key::S, 0x1F),
    (0x17, Key::T, 0x14),
    (0x18, Key::U, 0x16),
    (0x19, Key::V, 0x2F),
    (0x1A, Key::W, 0x11),
    (0x1B, Key::X, 0x2D),
    (0x1C, Key::Y, 0x15),
    (0x1D, Key::Z, 0x2C),
    (0x1E, Key::Key1, 0x02),
    (0x1F, Key::Key2, 0x03),
    (0x20, Key::Key3, 0x04),
    (0x21, Key::Key4, 0x05),
    (0x22, Key::Key5, 0x06),
    (0x23, Key::Key6, 0x07),
    (0x24, Key::Key7, 0x08),
    (0x25, Key::Key8, 0x09),
    (0x26, Key::Key9, 0x0A),
    (0x27, Key::Key0, 0x0B),
    (0x28, Key::Return, 0x1C),
    (0x29, Key::Escape, 0x01),
    (0x2A, Key::Backspace, 0x0E),
    (0x2B, Key::Tab, 0x0F),
    (0x2C, Key::Space, 0x39),
    (0x2D, Key::Minus, 0x0C),
    (0x2E, Key::Equal, 0x0D),
    (0x2F, Key::LeftBracket, 0x1A),
    (0x30, Key::RightBracket, 0x1B),
    (0x31, Key::Backslash, 0x2B),
    // Non-US '#' next to a vertical Return key; shares the backslash entry
    (0x32, Key::Hashtag, 0x2B),
    (0x33, Key::Semicolon, 0x27),
    (0x34, Key::Apostrophe, 0x28),
    (0x35, Key::Backtick, 0x29),
    (0x36, Key::Comma, 0x33),
    (0x37, Key::Period, 0x34),
    (0x38, Key::Slash, 0x35),
    (0x39, Key::CapsLock, 0x3A),
    (0x3A, Key::F1, 0x3B),
    (0x3B, Key::F2, 0x3C),
    (0x3C, Key::F3, 0x3D),
    (0x3D, Key::F4, 0x3E),
    (0x3E, Key::F5, 0x3F),
    (0x3F, Key::F6, 0x40),
    (0x40, Key::F7, 0x41),
    (0x41, Key::F8, 0x42),
    (0x42, Key::F9, 0x43),
    (0x43, Key::F10, 0x44),
    (0x44, Key::F11, NO_MAP_ENTRY),
    (0x45, Key::F12, NO_MAP_ENTRY),
    (0x46, Key::PrintScreen, NO_MAP_ENTRY),
    (0x47, Key::ScrollLock, NO_MAP_ENTRY),
    (0x48, Key::PauseBreak, NO_MAP_ENTRY),
    (0x49, Key::Insert, NO_MAP_ENTRY),
    (0x4A, Key::Home, NO_MAP_ENTRY),
    (0x4B, Key::PageUp, NO_MAP_ENTRY),
    (0x4C, Key::Delete, NO_MAP_ENTRY),
    (0x4D, Key::End, NO_MAP_ENTRY),
    (0x4E, Key::PageDown, NO_MAP_ENTRY),
    (0x4F, Key::Right, NO_MAP_ENTRY),
    (0x50, Key::Left, NO_MAP_ENTRY),
    (0x51, Key::Down, NO_MAP_ENTRY),
    (0x52, Key::Up, NO_MAP_ENTRY),
    // Keypad
    (0x53, Key::NumLock, NO_MAP_ENTRY),
    (0x54, Key::Slash, 0x35),
    (0x55, Key::Asterisk, 0x37),
    (0x56, Key::Minus, 0x4A),
    (0x57, Key::Plus, 0x4E),
    (0x58, Key::Return, 0x1C),
    (0x59, Key::Key1, 0x02),
    (0x5A, Key::Key2, 0x03),
    (0x5B, Key::Key3, 0x04),
    (0x5C, Key::Key4, 0x05),
    (0x5D, Key::Key5, 0x06),
    (0x5E, Key::Key6, 0x07),
    (0x5F, Key::Key7, 0x08),
    (0x60, Key::Key8, 0x09),
    (0x61, Key::Key9, 0x0A),
    (0x62, Key::Key0, 0x0B),
    (0x63, Key::Period, 0x34),
    (0x64, Key::Backslash, 0x2B),
    (0x65, Key::Menu, NO_MAP_ENTRY),
    (0x66, Key::Power, NO_MAP_ENTRY),
    (0x67, Key::Equal, 0x0D),
    // Modifier usages
    (0xE0, Key::Control, 0x1D),
    (0xE1, Key::LeftShift, 0x2A),
    (0xE2, Key::Alt, 0x38),
    (0xE3, Key::LeftGui, NO_MAP_ENTRY),
    (0xE4, Key::RightControl, NO_MAP_ENTRY),
    (0xE5, Key::RightShift, 0x36),
    (0xE6, Key::RightAlt, NO_MAP_ENTRY),
    (0xE7, Key::RightGui, NO_MAP_ENTRY),
];

const SHIFTED: &[Patch] = &[
    (0x1E, Key::ExclamationPoint, 0x02),
    (0x1F, Key::AtSign, 0x03),
    (0x20, Key::Hashtag, 0x04),
    (0x21, Key::Dollar, 0x05),
    (0x22, Key::Percent, 0x06),
    (0x23, Key::Circumflex, 0x07),
    (0x24, Key::Ampersand, 0x08),
    (0x25, Key::Asterisk, 0x09),
    (0x26, Key::LeftParen, 0x0A),
    (0x27, Key::RightParen, 0x0B),
    (0x2D, Key::Underscore, 0x0C),
    (0x2F, Key::LeftBrace, 0x1A),
    (0x30, Key::RightBrace, 0x1B),
    (0x31, Key::Pipe, 0x2B),
    (0x32, Key::Tilde, 0x2B),
    (0x33, Key::Colon, 0x27),
    (0x34, Key::DoubleQuote, 0x28),
    (0x36, Key::Tilde, 0x33),
    (0x37, Key::LessThan, 0x34),
    (0x38, Key::GreaterThan, 0x35),
    (0x64, Key::Pipe, 0x2B),
    (0x67, Key::Plus, 0x0D),
];

// Keypad 5 keeps its digit with Num Lock off.
const NUM_LOCK_OFF: &[Patch] = &[
    (0x59, Key::End, NO_MAP_ENTRY),
    (0x5A, Key::Down, NO_MAP_ENTRY),
    (0x5B, Key::PageDown, NO_MAP_ENTRY),
    (0x5C, Key::Left, NO_MAP_ENTRY),
    (0x5E, Key::Right, NO_MAP_ENTRY),
    (0x5F, Key::Home, NO_MAP_ENTRY),
    (0x60, Key::Up, NO_MAP_ENTRY),
    (0x61, Key::PageUp, NO_MAP_ENTRY),
    (0x62, Key::Insert, NO_MAP_ENTRY),
    (0x63, Key::Delete, NO_MAP_ENTRY),
];

const fn apply(
    mut table: [KeyCodeEntry; TABLE_LEN],
    patches: &[Patch],
) -> [KeyCodeEntry; TABLE_LEN] {
    let mut i = 0;
    while i < patches.len() {
        let (code, key, map_entry_index) = patches[i];
        table[code as usize] = KeyCodeEntry::new(key, map_entry_index);
        i += 1;
    }
    table
}

const PLAIN_TABLE: [KeyCodeEntry; TABLE_LEN] = apply([KeyCodeEntry::NONE; TABLE_LEN], BASE);
const NUM_LOCK_OFF_TABLE: [KeyCodeEntry; TABLE_LEN] = apply(PLAIN_TABLE, NUM_LOCK_OFF);
const SHIFTED_TABLE: [KeyCodeEntry; TABLE_LEN] = apply(PLAIN_TABLE, SHIFTED);
const SHIFTED_NUM_LOCK_OFF_TABLE: [KeyCodeEntry; TABLE_LEN] =
    apply(SHIFTED_TABLE, NUM_LOCK_OFF);

static PLAIN: [KeyCodeEntry; TABLE_LEN] = PLAIN_TABLE;
static NUM_LOCK_OFF_KEYS: [KeyCodeEntry; TABLE_LEN] = NUM_LOCK_OFF_TABLE;
static SHIFTED_KEYS: [KeyCodeEntry; TABLE_LEN] = SHIFTED_TABLE;
static SHIFTED_NUM_LOCK_OFF_KEYS: [KeyCodeEntry; TABLE_LEN] = SHIFTED_NUM_LOCK_OFF_TABLE;

/// Scan-code table variant, chosen by (Shift, Num Lock)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyTable {
    /// No Shift, Num Lock on: keypad produces digits
    Plain,
    /// No Shift, Num Lock off: keypad produces navigation keys
    NumLockOff,
    /// Shift, Num Lock on
    Shifted,
    /// Shift, Num Lock off
    ShiftedNumLockOff,
}

impl KeyTable {
    /// Select the table for the current Shift and Num Lock state
    pub const fn select(shift: bool, num_lock_on: bool) -> Self {
        match (shift, num_lock_on) {
            (false, true) => Self::Plain,
            (false, false) => Self::NumLockOff,
            (true, true) => Self::Shifted,
            (true, false) => Self::ShiftedNumLockOff,
        }
    }

    /// All entries of this table, indexed by usage code
    pub fn entries(self) -> &'static [KeyCodeEntry; TABLE_LEN] {
        match self {
            Self::Plain => &PLAIN,
            Self::NumLockOff => &NUM_LOCK_OFF_KEYS,
            Self::Shifted => &SHIFTED_KEYS,
            Self::ShiftedNumLockOff => &SHIFTED_NUM_LOCK_OFF_KEYS,
        }
    }

    /// Look up a usage code; codes above 0xE7 have no entry
    pub fn lookup(self, scan_code: u8) -> Option<KeyCodeEntry> {
        self.entries().get(scan_code as usize).copied()
    }
}

/// Result of translating one pressed usage code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Translation {
    /// Table entry for the usage code
    pub entry: KeyCodeEntry,
    /// Code point forced by the decoder, bypassing the code-point map
    pub code_point: Option<char>,
}

/// Translate a usage code through `table`
///
/// Returns `None` for an empty slot (0x00) and for codes above 0xE7. The
/// keypad slash always carries a `/` code point: the generic code-point map
/// renders its entry as the main slash key's shifted symbol otherwise.
pub fn translate(scan_code: u8, table: KeyTable) -> Option<Translation> {
    if scan_code == 0 {
        return None;
    }

    let entry = table.lookup(scan_code)?;
    let code_point = (scan_code == KEYPAD_SLASH).then_some('/');

    Some(Translation { entry, code_point })
}
