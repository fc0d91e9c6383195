#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! USB HID boot keyboard driver core
//!
//! Turns the periodic 8-byte reports of a boot protocol keyboard into key
//! press events for an input subsystem. The USB host controller is not part
//! of this crate: it is reached through the [`transfer::InterruptInPipe`]
//! trait, and events leave through [`hid::KeyEventSink`].
//!
//! # Core Components
//!
//! - [`hid`] - report decoding, scan code tables, the keyboard device
//! - [`transfer`] - interrupt-IN polling interface and HID class requests
//! - [`error`] - error types
//!
//! # Features
//!
//! - `defmt` - structured logging through `defmt`

#[cfg(feature = "defmt")]
use defmt as _;

pub mod error;
pub mod hid;
pub mod transfer;

pub use error::{Result, UsbError};
pub use hid::{KeyEvent, KeyEventSink, KeyboardConfig, KeyboardDecoder, UsbKeyboardDevice};
pub use transfer::{InterruptInHandler, InterruptInPipe, PollRequest, SetupPacket};
