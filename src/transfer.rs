//! USB transfer types and control requests
//!
//! The keyboard driver only ever talks to its device through the
//! interrupt-IN pipe in [`interrupt`]; control requests are built here and
//! executed by whoever owns endpoint 0.

pub mod interrupt;

pub use interrupt::{InterruptInHandler, InterruptInPipe, PollRequest};

use crate::hid::constants::{HidProtocolMode, HidReportType, HidRequest};

/// USB transfer types (bmAttributes bits 1:0 of an endpoint descriptor)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferType {
    /// Control transfer
    Control,
    /// Isochronous transfer
    Isochronous,
    /// Bulk transfer
    Bulk,
    /// Interrupt transfer
    Interrupt,
}

impl TransferType {
    /// Decode from endpoint bmAttributes
    pub const fn from_attributes(attributes: u8) -> Self {
        match attributes & 0x03 {
            0 => Self::Control,
            1 => Self::Isochronous,
            2 => Self::Bulk,
            _ => Self::Interrupt,
        }
    }
}

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Device to host
    In,
    /// Host to device
    Out,
}

impl Direction {
    /// Direction encoded in bit 7 of an endpoint address
    pub const fn from_endpoint_address(address: u8) -> Self {
        if address & 0x80 != 0 {
            Self::In
        } else {
            Self::Out
        }
    }
}

/// bmRequestType for class requests addressed to an interface, host to device
const CLASS_INTERFACE_OUT: u8 = 0x21;

/// USB Setup packet for control transfers
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetupPacket {
    /// Request type and direction
    pub request_type: u8,
    /// Specific request
    pub request: u8,
    /// Request-specific value
    pub value: u16,
    /// Request-specific index
    pub index: u16,
    /// Data stage length
    pub length: u16,
}

impl SetupPacket {
    /// HID SET_PROTOCOL(boot) for `interface`
    pub const fn hid_set_protocol(interface: u8) -> Self {
        Self {
            request_type: CLASS_INTERFACE_OUT,
            request: HidRequest::SetProtocol as u8,
            value: HidProtocolMode::Boot as u16,
            index: interface as u16,
            length: 0,
        }
    }

    /// HID SET_IDLE with infinite duration for all reports
    ///
    /// The device then only sends a report when something changes.
    pub const fn hid_set_idle(interface: u8) -> Self {
        Self {
            request_type: CLASS_INTERFACE_OUT,
            request: HidRequest::SetIdle as u8,
            value: 0,
            index: interface as u16,
            length: 0,
        }
    }

    /// HID SET_REPORT(Output, id 0) carrying the one-byte LED report
    pub const fn hid_set_report_leds(interface: u8) -> Self {
        Self {
            request_type: CLASS_INTERFACE_OUT,
            request: HidRequest::SetReport as u8,
            value: (HidReportType::Output as u16) << 8,
            index: interface as u16,
            length: 1,
        }
    }

    /// Check if this is an IN transfer
    pub fn is_in(&self) -> bool {
        (self.request_type & 0x80) != 0
    }

    /// Wire encoding (little-endian fields)
    pub fn to_bytes(&self) -> [u8; 8] {
        let value = self.value.to_le_bytes();
        let index = self.index.to_le_bytes();
        let length = self.length.to_le_bytes();
        [
            self.request_type,
            self.request,
            value[0],
            value[1],
            index[0],
            index[1],
            length[0],
            length[1],
        ]
    }
}
