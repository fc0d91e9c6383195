//! HID keyboard support
//!
//! Implements HID Boot Protocol keyboard reports (USB HID Spec 1.11, Appendix B.1)
//! and the key event record handed to the input subsystem.

use bitflags::bitflags;

use super::constants::{BOOT_REPORT_LEN, ERROR_ROLL_OVER, MAX_ROLLOVER_SLOTS};
use super::key::Key;
use super::keymap::NO_MAP_ENTRY;
use crate::error::{Result, UsbError};

/// HID keyboard report (boot protocol)
///
/// Standard 8-byte keyboard report format:
/// - Byte 0: Modifier keys (Ctrl, Alt, Shift, GUI)
/// - Byte 1: Reserved (OEM use)
/// - Bytes 2-7: Up to 6 simultaneous key presses
///
/// See USB HID Specification 1.11, Appendix B.1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootReport {
    /// Modifier key states
    pub modifiers: ReportModifiers,
    /// Reserved byte
    _reserved: u8,
    /// Raw usage code per slot (0x00 = empty)
    keycodes: [u8; MAX_ROLLOVER_SLOTS],
}

impl BootReport {
    /// Parse report from raw data
    ///
    /// Bytes past the first eight are ignored; a shorter buffer is rejected
    /// with [`UsbError::BufferUnderflow`].
    ///
    /// # Example
    ///
    /// ```
    /// use usbh_keyboard::hid::BootReport;
    ///
    /// let data: [u8; 8] = [0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00];
    /// let report = BootReport::parse(&data)?;
    /// assert_eq!(report.slots()[0], 0x04); // 'A' held in the first slot
    /// # Ok::<(), usbh_keyboard::UsbError>(())
    /// ```
    pub fn parse(data: &[u8]) -> Result<Self> {
        let Some(bytes) = data.get(..BOOT_REPORT_LEN) else {
            return Err(UsbError::BufferUnderflow);
        };

        let mut keycodes = [0u8; MAX_ROLLOVER_SLOTS];
        keycodes.copy_from_slice(&bytes[2..]);

        Ok(Self {
            modifiers: ReportModifiers::from_bits_retain(bytes[0]),
            _reserved: bytes[1],
            keycodes,
        })
    }

    /// Build a report from its parts
    pub const fn new(modifiers: u8, keycodes: [u8; MAX_ROLLOVER_SLOTS]) -> Self {
        Self {
            modifiers: ReportModifiers::from_bits_retain(modifiers),
            _reserved: 0,
            keycodes,
        }
    }

    /// Raw usage code of every slot, in report order
    pub fn slots(&self) -> &[u8; MAX_ROLLOVER_SLOTS] {
        &self.keycodes
    }

    /// Get iterator over non-empty slots
    pub fn keys_pressed(&self) -> impl Iterator<Item = u8> + '_ {
        self.keycodes.iter().copied().filter(|&code| code != 0)
    }

    /// Check if any slot holds a usage code
    pub fn has_keys(&self) -> bool {
        self.keycodes.iter().any(|&code| code != 0)
    }

    /// Check for the phantom state the keyboard reports when too many keys are held
    pub fn is_rollover_error(&self) -> bool {
        self.keycodes.iter().all(|&code| code == ERROR_ROLL_OVER)
    }
}

bitflags! {
    /// Raw modifier byte of a boot report
    ///
    /// Left and right keys are reported separately here; [`Modifiers`]
    /// folds them into logical modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ReportModifiers: u8 {
        /// Left Control
        const LEFT_CTRL  = 0b00000001;
        /// Left Shift
        const LEFT_SHIFT = 0b00000010;
        /// Left Alt
        const LEFT_ALT   = 0b00000100;
        /// Left GUI (Windows/Command key)
        const LEFT_GUI   = 0b00001000;
        /// Right Control
        const RIGHT_CTRL  = 0b00010000;
        /// Right Shift
        const RIGHT_SHIFT = 0b00100000;
        /// Right Alt (AltGr on most layouts)
        const RIGHT_ALT   = 0b01000000;
        /// Right GUI (Windows/Command key)
        const RIGHT_GUI   = 0b10000000;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReportModifiers {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ReportModifiers({=u8:#04x})", self.bits())
    }
}

bitflags! {
    /// Logical modifier mask handed to the input subsystem
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        /// Alt (left Alt only)
        const ALT   = 0x01;
        /// Either Control key
        const CTRL  = 0x02;
        /// Either Shift key
        const SHIFT = 0x04;
        /// Either GUI key
        const SUPER = 0x08;
        /// Right Alt
        const ALTGR = 0x10;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Modifiers {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Modifiers({=u8:#04x})", self.bits())
    }
}

impl Modifiers {
    /// Recompute every logical modifier from the raw report byte
    pub fn from_report(raw: ReportModifiers) -> Self {
        let mut mask = Self::empty();
        mask.set(
            Self::CTRL,
            raw.intersects(ReportModifiers::LEFT_CTRL | ReportModifiers::RIGHT_CTRL),
        );
        mask.set(
            Self::SHIFT,
            raw.intersects(ReportModifiers::LEFT_SHIFT | ReportModifiers::RIGHT_SHIFT),
        );
        mask.set(Self::ALT, raw.contains(ReportModifiers::LEFT_ALT));
        mask.set(
            Self::SUPER,
            raw.intersects(ReportModifiers::LEFT_GUI | ReportModifiers::RIGHT_GUI),
        );
        mask.set(Self::ALTGR, raw.contains(ReportModifiers::RIGHT_ALT));
        mask
    }

    /// Check if Shift is active
    pub fn shift(&self) -> bool {
        self.contains(Self::SHIFT)
    }
}

bitflags! {
    /// Key event flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KeyEventFlags: u8 {
        /// The event reports a press
        const PRESS = 0x80;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for KeyEventFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "KeyEventFlags({=u8:#04x})", self.bits())
    }
}

/// Key event forwarded to the input subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Logical key
    pub key: Key,
    /// Index into the code-point map ([`NO_MAP_ENTRY`] when there is none)
    pub map_entry_index: u8,
    /// Event flags
    pub flags: KeyEventFlags,
    /// Code point set by the decoder instead of the code-point map
    pub code_point: Option<char>,
    /// Logical modifiers live when the event was built
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Check if this event reports a press
    pub fn is_press(&self) -> bool {
        self.flags.contains(KeyEventFlags::PRESS)
    }
}

impl Default for KeyEvent {
    fn default() -> Self {
        Self {
            key: Key::Invalid,
            map_entry_index: NO_MAP_ENTRY,
            flags: KeyEventFlags::empty(),
            code_point: None,
            modifiers: Modifiers::empty(),
        }
    }
}

/// Consumer of key events (the input subsystem)
///
/// Called synchronously from the report callback; implementations must not block.
pub trait KeyEventSink {
    /// Take one key event
    fn consume(&mut self, event: KeyEvent);
}

impl<S: KeyEventSink + ?Sized> KeyEventSink for &mut S {
    fn consume(&mut self, event: KeyEvent) {
        (**self).consume(event)
    }
}

/// Fixed-capacity event queue; events past capacity are dropped
impl<const N: usize> KeyEventSink for heapless::Vec<KeyEvent, N> {
    fn consume(&mut self, event: KeyEvent) {
        if self.push(event).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Key event queue full, dropping {:?}", event.key);
        }
    }
}

/// Keyboard lock state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LockState {
    /// Num Lock
    pub num_lock: bool,
    /// Caps Lock
    pub caps_lock: bool,
    /// Scroll Lock
    pub scroll_lock: bool,
}

impl LockState {
    /// Toggle the lock belonging to `key`; returns `false` for other keys
    pub fn toggle(&mut self, key: Key) -> bool {
        match key {
            Key::NumLock => self.num_lock = !self.num_lock,
            Key::CapsLock => self.caps_lock = !self.caps_lock,
            Key::ScrollLock => self.scroll_lock = !self.scroll_lock,
            _ => return false,
        }
        true
    }

    /// LED output report byte (bit 0 Num Lock, bit 1 Caps Lock, bit 2 Scroll Lock)
    pub fn led_report(&self) -> u8 {
        (self.num_lock as u8) | ((self.caps_lock as u8) << 1) | ((self.scroll_lock as u8) << 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_boot_report() {
        let report = BootReport::parse(&[0x22, 0x00, 0x04, 0x05, 0, 0, 0, 0]).unwrap();

        assert!(report.modifiers.contains(ReportModifiers::LEFT_SHIFT));
        assert!(report.modifiers.contains(ReportModifiers::RIGHT_SHIFT));
        assert_eq!(report.slots(), &[0x04, 0x05, 0, 0, 0, 0]);
        assert!(report.has_keys());
        assert!(!report.is_rollover_error());

        let mut keys = report.keys_pressed();
        assert_eq!(keys.next(), Some(0x04));
        assert_eq!(keys.next(), Some(0x05));
        assert_eq!(keys.next(), None);
    }

    #[test]
    fn test_parse_ignores_trailing_bytes() {
        let data = [0u8, 0, 0x1E, 0, 0, 0, 0, 0, 0xAA, 0xBB];
        let report = BootReport::parse(&data).unwrap();
        assert_eq!(report, BootReport::new(0, [0x1E, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn test_parse_short_buffer() {
        assert_eq!(BootReport::parse(&[0; 7]), Err(UsbError::BufferUnderflow));
        assert_eq!(BootReport::parse(&[]), Err(UsbError::BufferUnderflow));
    }

    #[test]
    fn test_rollover_error_report() {
        let report = BootReport::new(0, [0x01; 6]);
        assert!(report.is_rollover_error());
        assert!(report.has_keys());

        let empty = BootReport::new(0, [0; 6]);
        assert!(!empty.has_keys());
        assert!(!empty.is_rollover_error());
    }

    #[test]
    fn test_modifier_aliasing() {
        // left and right control fold into one logical modifier
        let mask = Modifiers::from_report(ReportModifiers::from_bits_retain(0b0001_0001));
        assert_eq!(mask, Modifiers::CTRL);

        let mask = Modifiers::from_report(ReportModifiers::from_bits_retain(0b0010_0000));
        assert_eq!(mask, Modifiers::SHIFT);
        assert!(mask.shift());

        let mask = Modifiers::from_report(ReportModifiers::from_bits_retain(0b1000_1000));
        assert_eq!(mask, Modifiers::SUPER);
    }

    #[test]
    fn test_left_and_right_alt_differ() {
        let alt = Modifiers::from_report(ReportModifiers::LEFT_ALT);
        let altgr = Modifiers::from_report(ReportModifiers::RIGHT_ALT);
        assert_eq!(alt, Modifiers::ALT);
        assert_eq!(altgr, Modifiers::ALTGR);
    }

    #[test]
    fn test_modifiers_fully_recomputed() {
        let all = Modifiers::from_report(ReportModifiers::all());
        assert_eq!(all, Modifiers::all());

        let none = Modifiers::from_report(ReportModifiers::empty());
        assert_eq!(none, Modifiers::empty());
    }

    #[test]
    fn test_lock_toggle_and_leds() {
        let mut locks = LockState::default();
        assert_eq!(locks.led_report(), 0);

        assert!(locks.toggle(Key::NumLock));
        assert!(locks.toggle(Key::ScrollLock));
        assert_eq!(locks.led_report(), 0b101);

        assert!(locks.toggle(Key::CapsLock));
        assert!(locks.toggle(Key::NumLock));
        assert_eq!(locks.led_report(), 0b110);

        assert!(!locks.toggle(Key::A));
        assert_eq!(locks.led_report(), 0b110);
    }

    #[test]
    fn test_vec_sink_drops_when_full() {
        let mut sink: heapless::Vec<KeyEvent, 2> = heapless::Vec::new();
        for _ in 0..3 {
            sink.consume(KeyEvent::default());
        }
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_default_event_is_not_a_press() {
        let event = KeyEvent::default();
        assert!(!event.is_press());
        assert_eq!(event.key, Key::Invalid);
        assert_eq!(event.map_entry_index, NO_MAP_ENTRY);
    }
}
