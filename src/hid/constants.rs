//! HID protocol constants
//!
//! Standard constants from USB HID Specification 1.11 and HID Usage Tables 1.12

/// HID interface class code
pub const HID_CLASS: u8 = 0x03;

/// Length of a boot protocol keyboard input report
pub const BOOT_REPORT_LEN: usize = 8;

/// Number of key slots in a boot report (6-key rollover)
pub const MAX_ROLLOVER_SLOTS: usize = 6;

/// Highest keyboard usage code carried in a boot report (Right GUI)
pub const MAX_SCAN_CODE: u8 = 0xE7;

/// Usage reported in every slot when too many keys are held ("phantom" state)
pub const ERROR_ROLL_OVER: u8 = 0x01;

/// Usage of the numeric keypad slash key
pub const KEYPAD_SLASH: u8 = 0x54;

/// Default interrupt-IN poll interval in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u8 = 10;

/// HID subclass codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum HidSubclass {
    /// No subclass
    None = 0x00,
    /// Boot interface subclass
    Boot = 0x01,
}

/// HID protocol codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum HidProtocol {
    /// No protocol
    None = 0x00,
    /// Keyboard protocol
    Keyboard = 0x01,
    /// Mouse protocol
    Mouse = 0x02,
}

/// HID class-specific requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HidRequest {
    /// Set report
    SetReport = 0x09,
    /// Set idle rate
    SetIdle = 0x0A,
    /// Set protocol
    SetProtocol = 0x0B,
}

/// HID report types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HidReportType {
    /// Input report
    Input = 0x01,
    /// Output report
    Output = 0x02,
    /// Feature report
    Feature = 0x03,
}

/// HID protocol modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HidProtocolMode {
    /// Boot protocol (simplified, standard reports)
    Boot = 0x00,
    /// Report protocol (full HID report descriptors)
    Report = 0x01,
}
