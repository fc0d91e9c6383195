//! HID boot keyboard support
//!
//! Decodes HID boot protocol keyboard reports into key press events.
//!
//! # Pipeline
//!
//! Each 8-byte report goes through:
//!
//! 1. **Modifiers** - the raw modifier byte is folded into [`Modifiers`]
//! 2. **Slots** - six independent trackers turn held keys into press edges
//! 3. **Tables** - Shift and Num Lock pick one of four scan code tables
//! 4. **Repeat** - the last press is re-emitted while the held count is stable
//!
//! [`KeyboardDecoder`] runs the pipeline on its own;
//! [`UsbKeyboardDevice`] binds it to an interrupt-IN pipe.
//!
//! # Quick Start
//!
//! ```
//! use usbh_keyboard::hid::{Key, KeyEvent, KeyboardConfig, KeyboardDecoder};
//!
//! let mut decoder = KeyboardDecoder::new(&KeyboardConfig::new());
//! let mut events: heapless::Vec<KeyEvent, 8> = heapless::Vec::new();
//!
//! // Left Shift + '1'
//! decoder.handle_report(&[0x02, 0x00, 0x1E, 0, 0, 0, 0, 0], &mut events)?;
//! assert_eq!(events[0].key, Key::ExclamationPoint);
//! # Ok::<(), usbh_keyboard::UsbError>(())
//! ```
//!
//! # Reference
//!
//! - USB HID Specification 1.11: <https://www.usb.org/document-library/device-class-definition-hid-111>
//! - HID Usage Tables 1.12: <https://usb.org/document-library/hid-usage-tables-15>

pub mod config;
pub mod constants;
pub mod decoder;
pub mod device;
pub mod key;
pub mod keyboard;
pub mod keymap;
pub mod slots;
pub mod usb_keyboard;

pub use config::KeyboardConfig;
pub use constants::*;
pub use decoder::{KeyboardDecoder, KeyboardStats};
pub use device::{BootKeyboardInterface, EndpointDescriptor, InterfaceDescriptor};
pub use key::Key;
pub use keyboard::{
    BootReport, KeyEvent, KeyEventFlags, KeyEventSink, LockState, Modifiers, ReportModifiers,
};
pub use keymap::{translate, KeyCodeEntry, KeyTable, Translation, NO_MAP_ENTRY};
pub use slots::{KeySlots, RepeatTracker, SlotTransition};
pub use usb_keyboard::{UsbDeviceInfo, UsbKeyboardDevice};
