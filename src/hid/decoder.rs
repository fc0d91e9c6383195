//! Boot report decoder
//!
//! Turns consecutive boot reports into key press events. The decoder is
//! plain owned state: the caller serializes reports (one at a time, in
//! arrival order) by holding `&mut` for the duration of each report.

use core::sync::atomic::{AtomicU32, Ordering};

use super::config::KeyboardConfig;
use super::keyboard::{BootReport, KeyEvent, KeyEventFlags, KeyEventSink, LockState, Modifiers};
use super::keymap::{translate, KeyTable};
use super::slots::{KeySlots, RepeatTracker, SlotTransition};
use crate::error::Result;

/// Decode state of one keyboard
#[derive(Debug)]
pub struct KeyboardDecoder {
    modifiers: Modifiers,
    locks: LockState,
    slots: KeySlots,
    repeat: RepeatTracker,
    repeat_enabled: bool,
    stats: KeyboardStats,
}

impl KeyboardDecoder {
    /// Fresh decoder: no keys held, no modifiers, locks per `config`
    pub fn new(config: &KeyboardConfig) -> Self {
        Self {
            modifiers: Modifiers::empty(),
            locks: LockState {
                num_lock: config.num_lock_on,
                ..LockState::default()
            },
            slots: KeySlots::new(),
            repeat: RepeatTracker::new(),
            repeat_enabled: config.repeat,
            stats: KeyboardStats::new(),
        }
    }

    /// Decode raw report bytes
    ///
    /// A buffer shorter than a boot report is counted as dropped and leaves
    /// all state untouched.
    pub fn handle_report<S: KeyEventSink>(&mut self, data: &[u8], sink: &mut S) -> Result<()> {
        match BootReport::parse(data) {
            Ok(report) => {
                self.process(&report, sink);
                Ok(())
            }
            Err(e) => {
                self.stats.record_dropped();
                #[cfg(feature = "defmt")]
                defmt::warn!("Dropping short keyboard report: {} bytes", data.len());
                Err(e)
            }
        }
    }

    /// Decode one parsed report, forwarding zero or more events to `sink`
    pub fn process<S: KeyEventSink>(&mut self, report: &BootReport, sink: &mut S) {
        self.stats.record_report();
        self.modifiers = Modifiers::from_report(report.modifiers);

        if report.is_rollover_error() {
            #[cfg(feature = "defmt")]
            defmt::debug!("Keyboard reports roll over error");
        }

        for (slot, &code) in report.slots().iter().enumerate() {
            if self.slots.step(slot, code) != SlotTransition::Press {
                continue;
            }

            // A lock toggled by an earlier slot applies to the following ones
            let table = KeyTable::select(self.modifiers.shift(), self.locks.num_lock);
            let Some(translation) = translate(code, table) else {
                continue;
            };

            let event = KeyEvent {
                key: translation.entry.key,
                map_entry_index: translation.entry.map_entry_index,
                flags: KeyEventFlags::PRESS,
                code_point: translation.code_point,
                modifiers: self.modifiers,
            };

            if self.locks.toggle(event.key) {
                #[cfg(feature = "defmt")]
                defmt::debug!("Lock state now {}", self.locks);
            }

            #[cfg(feature = "defmt")]
            defmt::trace!("Press: slot={}, code={=u8:#04x}, key={}", slot, code, event.key);

            self.repeat.record(event);
            self.stats.record_press();
            sink.consume(event);
        }

        let repeated = self.repeat.update(self.slots.pressed_count());
        if let Some(event) = repeated.filter(|_| self.repeat_enabled) {
            #[cfg(feature = "defmt")]
            defmt::trace!("Repeat: key={}", event.key);

            self.stats.record_repeat();
            sink.consume(event);
        }
    }

    /// Logical modifiers from the last report
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Current lock state
    pub fn locks(&self) -> LockState {
        self.locks
    }

    /// Overwrite the lock state (e.g. to sync with other keyboards)
    pub fn set_locks(&mut self, locks: LockState) {
        self.locks = locks;
    }

    /// Check if report slot `slot` holds a press that already fired
    pub fn is_slot_pressed(&self, slot: usize) -> bool {
        self.slots.is_pressed(slot)
    }

    /// Number of pressed slots after the last report
    pub fn pressed_count(&self) -> u8 {
        self.slots.pressed_count()
    }

    /// Most recently emitted press
    pub fn last_event(&self) -> Option<&KeyEvent> {
        self.repeat.last_event()
    }

    /// Decode statistics
    pub fn statistics(&self) -> &KeyboardStats {
        &self.stats
    }
}

/// Keyboard decode statistics
#[derive(Debug)]
pub struct KeyboardStats {
    reports: AtomicU32,
    dropped: AtomicU32,
    presses: AtomicU32,
    repeats: AtomicU32,
}

impl KeyboardStats {
    const fn new() -> Self {
        Self {
            reports: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            presses: AtomicU32::new(0),
            repeats: AtomicU32::new(0),
        }
    }

    fn record_report(&self) {
        self.reports.fetch_add(1, Ordering::Relaxed);
    }

    fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    fn record_press(&self) {
        self.presses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_repeat(&self) {
        self.repeats.fetch_add(1, Ordering::Relaxed);
    }

    /// Reports decoded
    pub fn reports(&self) -> u32 {
        self.reports.load(Ordering::Relaxed)
    }

    /// Reports dropped for being too short
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Press edges emitted
    pub fn presses(&self) -> u32 {
        self.presses.load(Ordering::Relaxed)
    }

    /// Repeat re-emits
    pub fn repeats(&self) -> u32 {
        self.repeats.load(Ordering::Relaxed)
    }
}
