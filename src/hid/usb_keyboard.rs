//! USB boot keyboard device
//!
//! Binds a [`KeyboardDecoder`] to the interrupt-IN pipe of one keyboard and
//! the input subsystem's [`KeyEventSink`].
//!
//! # Example
//!
//! ```
//! use usbh_keyboard::hid::{Key, KeyEvent, KeyboardConfig, UsbDeviceInfo, UsbKeyboardDevice};
//! use usbh_keyboard::transfer::{InterruptInHandler, InterruptInPipe, PollRequest};
//! use usbh_keyboard::Result;
//!
//! struct Pipe;
//!
//! impl InterruptInPipe for Pipe {
//!     fn submit_interrupt_in_transfer(&mut self, _request: PollRequest) -> Result<()> {
//!         Ok(())
//!     }
//!     fn cancel(&mut self) {}
//! }
//!
//! let info = UsbDeviceInfo::new(1, 0x046D, 0xC31C);
//! let events: heapless::Vec<KeyEvent, 8> = heapless::Vec::new();
//! let mut kbd = UsbKeyboardDevice::try_create_instance(info, 8, Pipe, events, KeyboardConfig::new())?;
//!
//! // called by the transport for every completed transfer
//! kbd.on_interrupt_in(&[0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00]);
//! assert_eq!(kbd.sink()[0].key, Key::A);
//! # Ok::<(), usbh_keyboard::UsbError>(())
//! ```

use super::config::KeyboardConfig;
use super::constants::BOOT_REPORT_LEN;
use super::decoder::KeyboardDecoder;
use super::device::BootKeyboardInterface;
use super::keyboard::KeyEventSink;
use crate::error::{Result, UsbError};
use crate::transfer::{InterruptInHandler, InterruptInPipe, PollRequest, SetupPacket};

/// Identification of the attached USB device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsbDeviceInfo {
    /// Device address on the bus
    pub address: u8,
    /// Vendor ID
    pub vendor_id: u16,
    /// Product ID
    pub product_id: u16,
    /// Keyboard interface number (wIndex of class requests)
    pub interface_number: u8,
}

impl UsbDeviceInfo {
    /// Device info for interface 0
    pub const fn new(address: u8, vendor_id: u16, product_id: u16) -> Self {
        Self {
            address,
            vendor_id,
            product_id,
            interface_number: 0,
        }
    }

    /// Set the keyboard interface number
    pub const fn with_interface(mut self, interface_number: u8) -> Self {
        self.interface_number = interface_number;
        self
    }
}

/// USB boot keyboard bound to its interrupt-IN pipe
pub struct UsbKeyboardDevice<P: InterruptInPipe, S: KeyEventSink> {
    device: UsbDeviceInfo,
    pipe: P,
    sink: S,
    decoder: KeyboardDecoder,
    config: KeyboardConfig,
    max_packet_size: u16,
    polling: bool,
}

impl<P: InterruptInPipe, S: KeyEventSink> UsbKeyboardDevice<P, S> {
    /// Create the device and start polling
    ///
    /// Fails with [`UsbError::Unsupported`] if `max_packet_size` cannot hold
    /// a boot report; in that case the pipe is dropped without ever being
    /// asked to poll. Errors from the pipe's submit are returned unchanged.
    pub fn try_create_instance(
        device: UsbDeviceInfo,
        max_packet_size: u16,
        pipe: P,
        sink: S,
        config: KeyboardConfig,
    ) -> Result<Self> {
        if (max_packet_size as usize) < BOOT_REPORT_LEN {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Keyboard {=u8}: max packet size {} too small for boot report",
                device.address,
                max_packet_size
            );
            return Err(UsbError::Unsupported);
        }

        let mut keyboard = Self {
            device,
            pipe,
            sink,
            decoder: KeyboardDecoder::new(&config),
            config,
            max_packet_size,
            polling: false,
        };

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Keyboard {=u8}: {=u16:04x}:{=u16:04x} created",
            device.address,
            device.vendor_id,
            device.product_id
        );

        keyboard.start_polling()?;
        Ok(keyboard)
    }

    /// Create the device from a probed boot keyboard interface
    pub fn from_interface(
        device: UsbDeviceInfo,
        interface: &BootKeyboardInterface,
        pipe: P,
        sink: S,
        config: KeyboardConfig,
    ) -> Result<Self> {
        Self::try_create_instance(
            device.with_interface(interface.interface_number),
            interface.max_packet_size,
            pipe,
            sink,
            config,
        )
    }

    /// Request the recurring interrupt-IN poll
    fn start_polling(&mut self) -> Result<()> {
        if self.polling {
            return Err(UsbError::InvalidState);
        }

        let request = PollRequest::new(self.max_packet_size, self.config.poll_interval_ms);
        self.pipe.submit_interrupt_in_transfer(request)?;
        self.polling = true;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Keyboard {=u8}: polling every {} ms",
            self.device.address,
            request.interval_ms
        );

        Ok(())
    }

    /// SET_REPORT request and payload that light the LEDs for the current locks
    pub fn led_request(&self) -> (SetupPacket, [u8; 1]) {
        (
            SetupPacket::hid_set_report_leds(self.device.interface_number),
            [self.decoder.locks().led_report()],
        )
    }

    /// Stop polling and hand back the pipe
    pub fn into_pipe(mut self) -> P {
        self.pipe.cancel();
        self.polling = false;
        self.pipe
    }

    /// Attached device
    pub fn device(&self) -> &UsbDeviceInfo {
        &self.device
    }

    /// Decode state
    pub fn decoder(&self) -> &KeyboardDecoder {
        &self.decoder
    }

    /// Mutable decode state (e.g. to sync lock state)
    pub fn decoder_mut(&mut self) -> &mut KeyboardDecoder {
        &mut self.decoder
    }

    /// Event consumer
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable event consumer (e.g. to drain a queue)
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Active configuration
    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    /// Negotiated interrupt-IN max packet size
    pub fn max_packet_size(&self) -> u16 {
        self.max_packet_size
    }

    /// Check if the recurring poll is running
    pub fn is_polling(&self) -> bool {
        self.polling
    }
}

impl<P: InterruptInPipe, S: KeyEventSink> InterruptInHandler for UsbKeyboardDevice<P, S> {
    fn on_interrupt_in(&mut self, data: &[u8]) {
        // Short deliveries are counted and logged by the decoder
        let _ = self.decoder.handle_report(data, &mut self.sink);
    }
}
