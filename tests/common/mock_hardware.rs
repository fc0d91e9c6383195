//! Mock hardware helpers for testing without real USB devices
//!
//! Provides a mock interrupt pipe, a recording event sink, and test data builders.

use heapless::Vec;
use usbh_keyboard::hid::{Key, KeyEvent, KeyEventSink, UsbDeviceInfo};
use usbh_keyboard::transfer::{InterruptInPipe, PollRequest};
use usbh_keyboard::{Result, UsbError};

/// Interrupt pipe that records every poll request
#[derive(Debug, Default)]
pub struct MockPipe {
    pub requests: Vec<PollRequest, 4>,
    pub cancelled: bool,
    pub fail_with: Option<UsbError>,
}

impl MockPipe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipe whose submit always fails with `error`
    pub fn failing(error: UsbError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }
}

impl InterruptInPipe for MockPipe {
    fn submit_interrupt_in_transfer(&mut self, request: PollRequest) -> Result<()> {
        if let Some(error) = self.fail_with {
            return Err(error);
        }
        self.requests.push(request).map_err(|_| UsbError::NoResources)
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }
}

/// Input subsystem stand-in recording every event in order
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<KeyEvent, 64>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys of all recorded events, in order
    pub fn keys(&self) -> Vec<Key, 64> {
        self.events.iter().map(|event| event.key).collect()
    }

    /// Take the recorded events, leaving the sink empty
    pub fn drain(&mut self) -> Vec<KeyEvent, 64> {
        core::mem::take(&mut self.events)
    }
}

impl KeyEventSink for RecordingSink {
    fn consume(&mut self, event: KeyEvent) {
        self.events.push(event).expect("recording sink overflow");
    }
}

/// Build an 8-byte boot report; `keys` fill the slots from the left
pub fn boot_report(modifiers: u8, keys: &[u8]) -> [u8; 8] {
    assert!(keys.len() <= 6, "boot report holds at most 6 keys");

    let mut report = [0u8; 8];
    report[0] = modifiers;
    report[2..2 + keys.len()].copy_from_slice(keys);
    report
}

/// Identification of a typical low-speed keyboard
pub fn create_test_device_info() -> UsbDeviceInfo {
    // Logitech K120
    UsbDeviceInfo::new(2, 0x046D, 0xC31C)
}

/// Configuration descriptor of a single-interface boot keyboard
pub fn create_keyboard_config_descriptor() -> [u8; 34] {
    [
        // Configuration
        0x09,       // bLength
        0x02,       // bDescriptorType (CONFIGURATION)
        0x22, 0x00, // wTotalLength (34)
        0x01,       // bNumInterfaces
        0x01,       // bConfigurationValue
        0x00,       // iConfiguration
        0xA0,       // bmAttributes (bus powered, remote wakeup)
        0x32,       // bMaxPower (100mA)
        // Interface 0
        0x09,       // bLength
        0x04,       // bDescriptorType (INTERFACE)
        0x00,       // bInterfaceNumber
        0x00,       // bAlternateSetting
        0x01,       // bNumEndpoints
        0x03,       // bInterfaceClass (HID)
        0x01,       // bInterfaceSubClass (Boot)
        0x01,       // bInterfaceProtocol (Keyboard)
        0x00,       // iInterface
        // HID
        0x09, 0x21, 0x10, 0x01, 0x00, 0x01, 0x22, 0x41, 0x00,
        // Endpoint 0x81
        0x07,       // bLength
        0x05,       // bDescriptorType (ENDPOINT)
        0x81,       // bEndpointAddress (IN 1)
        0x03,       // bmAttributes (Interrupt)
        0x08, 0x00, // wMaxPacketSize (8)
        0x0A,       // bInterval (10 ms)
    ]
}

/// Configuration descriptor of a boot mouse (no keyboard interface)
pub fn create_mouse_config_descriptor() -> [u8; 25] {
    [
        0x09, 0x02, 0x19, 0x00, 0x01, 0x01, 0x00, 0xA0, 0x32,
        // Interface 0: HID boot mouse
        0x09, 0x04, 0x00, 0x00, 0x01, 0x03, 0x01, 0x02, 0x00,
        // Endpoint 0x81, interrupt, 4 bytes
        0x07, 0x05, 0x81, 0x03, 0x04, 0x00, 0x0A,
    ]
}
