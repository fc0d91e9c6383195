//! Per-slot press tracking and the held-key repeat heuristic
//!
//! A boot keyboard reports the complete set of held keys on every poll. Press
//! edges are reconstructed per report slot: a slot fires once when it goes
//! from empty to holding a usage code, then stays quiet until the keyboard
//! reports that slot empty again.

use super::constants::{MAX_ROLLOVER_SLOTS, MAX_SCAN_CODE};
use super::keyboard::KeyEvent;

/// Outcome of feeding one slot's usage code through its tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotTransition {
    /// Slot is empty (0x00); any earlier press is cleared
    Empty,
    /// Slot went from empty to holding a key
    Press,
    /// Slot still holds the key that already fired
    Held,
    /// Usage code outside 0x01..=0xE7 on an idle slot
    Rejected,
}

/// Press state of the six report slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySlots {
    pressed: [bool; MAX_ROLLOVER_SLOTS],
}

impl KeySlots {
    /// All slots released
    pub const fn new() -> Self {
        Self {
            pressed: [false; MAX_ROLLOVER_SLOTS],
        }
    }

    /// Feed the usage code reported in `slot`
    ///
    /// Slots are independent: the same key moving to another slot fires
    /// again, because the tracker only sees positions.
    pub fn step(&mut self, slot: usize, code: u8) -> SlotTransition {
        let Some(pressed) = self.pressed.get_mut(slot) else {
            return SlotTransition::Rejected;
        };

        match (code, *pressed) {
            (0, _) => {
                *pressed = false;
                SlotTransition::Empty
            }
            (_, true) => SlotTransition::Held,
            (code, false) if code <= MAX_SCAN_CODE => {
                *pressed = true;
                SlotTransition::Press
            }
            _ => SlotTransition::Rejected,
        }
    }

    /// Check if `slot` holds a press that already fired
    pub fn is_pressed(&self, slot: usize) -> bool {
        self.pressed.get(slot).copied().unwrap_or(false)
    }

    /// Number of slots currently pressed
    pub fn pressed_count(&self) -> u8 {
        self.pressed.iter().filter(|&&pressed| pressed).count() as u8
    }

    /// Release every slot
    pub fn clear(&mut self) {
        self.pressed = [false; MAX_ROLLOVER_SLOTS];
    }
}

/// Re-emits the last press while the number of held keys stays put
///
/// This is a poll-rate driven stand-in for key repeat, not a timed repeat
/// policy: it fires on every report whose pressed count equals the previous
/// report's and is nonzero, and stops as soon as any key joins or leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepeatTracker {
    last_event: Option<KeyEvent>,
    previous_count: u8,
}

impl RepeatTracker {
    /// Nothing emitted yet, no keys held
    pub const fn new() -> Self {
        Self {
            last_event: None,
            previous_count: 0,
        }
    }

    /// Remember the most recently emitted press
    pub fn record(&mut self, event: KeyEvent) {
        self.last_event = Some(event);
    }

    /// Close out a report with `current_count` pressed slots
    ///
    /// Returns the event to re-emit, if any. Presses carrying the forced `/`
    /// code point are never repeated.
    pub fn update(&mut self, current_count: u8) -> Option<KeyEvent> {
        let stable = current_count == self.previous_count && current_count != 0;
        self.previous_count = current_count;

        if !stable {
            return None;
        }

        self.last_event
            .filter(|event| event.code_point != Some('/'))
    }

    /// Most recently emitted press
    pub fn last_event(&self) -> Option<&KeyEvent> {
        self.last_event.as_ref()
    }

    /// Pressed count carried over from the previous report
    pub fn previous_count(&self) -> u8 {
        self.previous_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hid::key::Key;
    use crate::hid::keyboard::KeyEventFlags;

    fn press(key: Key, code_point: Option<char>) -> KeyEvent {
        KeyEvent {
            key,
            flags: KeyEventFlags::PRESS,
            code_point,
            ..KeyEvent::default()
        }
    }

    #[test]
    fn test_slot_press_edge_fires_once() {
        let mut slots = KeySlots::new();

        assert_eq!(slots.step(0, 0x04), SlotTransition::Press);
        assert_eq!(slots.step(0, 0x04), SlotTransition::Held);
        assert_eq!(slots.step(0, 0x04), SlotTransition::Held);
        assert!(slots.is_pressed(0));
        assert_eq!(slots.pressed_count(), 1);
    }

    #[test]
    fn test_slot_release_rearms_edge() {
        let mut slots = KeySlots::new();

        slots.step(0, 0x04);
        assert_eq!(slots.step(0, 0x00), SlotTransition::Empty);
        assert!(!slots.is_pressed(0));
        assert_eq!(slots.step(0, 0x04), SlotTransition::Press);
    }

    #[test]
    fn test_held_slot_ignores_code_change() {
        let mut slots = KeySlots::new();

        slots.step(2, 0x04);
        // a different key in a still-pressed slot is not a new edge
        assert_eq!(slots.step(2, 0x05), SlotTransition::Held);
    }

    #[test]
    fn test_out_of_range_code_rejected() {
        let mut slots = KeySlots::new();

        assert_eq!(slots.step(0, 0xE8), SlotTransition::Rejected);
        assert!(!slots.is_pressed(0));
        assert_eq!(slots.step(0, 0xE7), SlotTransition::Press);
        assert_eq!(slots.step(6, 0x04), SlotTransition::Rejected);
        assert!(!slots.is_pressed(6));
    }

    #[test]
    fn test_error_codes_occupy_slot() {
        let mut slots = KeySlots::new();

        for slot in 0..MAX_ROLLOVER_SLOTS {
            assert_eq!(slots.step(slot, 0x01), SlotTransition::Press);
        }
        assert_eq!(slots.pressed_count(), 6);

        slots.clear();
        assert_eq!(slots.pressed_count(), 0);
    }

    #[test]
    fn test_repeat_requires_stable_nonzero_count() {
        let mut repeat = RepeatTracker::new();
        let a = press(Key::A, None);

        repeat.record(a);
        assert_eq!(repeat.update(1), None); // 0 -> 1
        assert_eq!(repeat.update(1), Some(a));
        assert_eq!(repeat.update(1), Some(a));
        assert_eq!(repeat.update(2), None);
        assert_eq!(repeat.update(1), None);
        assert_eq!(repeat.update(0), None);
        assert_eq!(repeat.update(0), None);
        assert_eq!(repeat.previous_count(), 0);
    }

    #[test]
    fn test_repeat_skips_forced_slash() {
        let mut repeat = RepeatTracker::new();

        repeat.record(press(Key::Slash, Some('/')));
        repeat.update(1);
        assert_eq!(repeat.update(1), None);

        let b = press(Key::B, None);
        repeat.record(b);
        assert_eq!(repeat.update(1), Some(b));
    }

    #[test]
    fn test_repeat_without_recorded_event() {
        let mut repeat = RepeatTracker::new();
        repeat.update(1);
        assert_eq!(repeat.update(1), None);
        assert!(repeat.last_event().is_none());
    }
}
