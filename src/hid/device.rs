//! Boot keyboard interface discovery
//!
//! Walks a configuration descriptor (as returned by GET_DESCRIPTOR) to find
//! a HID boot keyboard interface and its interrupt-IN endpoint.

use super::constants::{HidProtocol, HidSubclass, HID_CLASS};
use crate::error::{Result, UsbError};
use crate::transfer::{Direction, TransferType};

const DESC_TYPE_CONFIGURATION: u8 = 0x02;
const DESC_TYPE_INTERFACE: u8 = 0x04;
const DESC_TYPE_ENDPOINT: u8 = 0x05;

const CONFIGURATION_DESC_LEN: usize = 9;
const INTERFACE_DESC_LEN: usize = 9;
const ENDPOINT_DESC_LEN: usize = 7;

/// Interface descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceDescriptor {
    /// Interface number
    pub interface_number: u8,
    /// Alternate setting
    pub alternate_setting: u8,
    /// Number of endpoints (excluding endpoint 0)
    pub num_endpoints: u8,
    /// Interface class
    pub interface_class: u8,
    /// Interface subclass
    pub interface_sub_class: u8,
    /// Interface protocol
    pub interface_protocol: u8,
}

impl InterfaceDescriptor {
    /// Parse from raw descriptor bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let Some(bytes) = data.get(..INTERFACE_DESC_LEN) else {
            return Err(UsbError::InvalidDescriptor);
        };
        if (bytes[0] as usize) < INTERFACE_DESC_LEN || bytes[1] != DESC_TYPE_INTERFACE {
            return Err(UsbError::InvalidDescriptor);
        }

        Ok(Self {
            interface_number: bytes[2],
            alternate_setting: bytes[3],
            num_endpoints: bytes[4],
            interface_class: bytes[5],
            interface_sub_class: bytes[6],
            interface_protocol: bytes[7],
        })
    }

    /// Check if this is a HID boot keyboard interface
    pub fn is_boot_keyboard(&self) -> bool {
        self.interface_class == HID_CLASS
            && self.interface_sub_class == HidSubclass::Boot as u8
            && self.interface_protocol == HidProtocol::Keyboard as u8
    }
}

/// Endpoint descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EndpointDescriptor {
    /// Endpoint address (includes direction bit)
    pub address: u8,
    /// Endpoint attributes (transfer type)
    pub attributes: u8,
    /// Maximum packet size
    pub max_packet_size: u16,
    /// Polling interval (for interrupt endpoints)
    pub interval: u8,
}

impl EndpointDescriptor {
    /// Parse from raw descriptor bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let Some(bytes) = data.get(..ENDPOINT_DESC_LEN) else {
            return Err(UsbError::InvalidDescriptor);
        };
        if (bytes[0] as usize) < ENDPOINT_DESC_LEN || bytes[1] != DESC_TYPE_ENDPOINT {
            return Err(UsbError::InvalidDescriptor);
        }

        Ok(Self {
            address: bytes[2],
            attributes: bytes[3],
            // bits 10:0 are the size, 12:11 high-bandwidth multiplier
            max_packet_size: u16::from_le_bytes([bytes[4], bytes[5]]) & 0x07FF,
            interval: bytes[6],
        })
    }

    /// Get transfer direction
    pub fn direction(&self) -> Direction {
        Direction::from_endpoint_address(self.address)
    }

    /// Get transfer type
    pub fn transfer_type(&self) -> TransferType {
        TransferType::from_attributes(self.attributes)
    }

    /// Check if this is an interrupt IN endpoint
    pub fn is_interrupt_in(&self) -> bool {
        self.direction() == Direction::In && self.transfer_type() == TransferType::Interrupt
    }
}

/// Boot keyboard interface located in a configuration descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootKeyboardInterface {
    /// Interface number (wIndex of class requests)
    pub interface_number: u8,
    /// Interrupt-IN endpoint address
    pub endpoint_address: u8,
    /// Interrupt-IN wMaxPacketSize
    pub max_packet_size: u16,
    /// Device-requested polling interval (bInterval)
    pub interval: u8,
}

impl BootKeyboardInterface {
    /// Find the first boot keyboard interface with an interrupt-IN endpoint
    ///
    /// `config` is the full configuration descriptor including all
    /// interface, class and endpoint descriptors that follow it. Truncated
    /// trailing descriptors are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use usbh_keyboard::hid::BootKeyboardInterface;
    ///
    /// let config: [u8; 34] = [
    ///     0x09, 0x02, 34, 0, 1, 1, 0, 0xA0, 50,      // configuration
    ///     0x09, 0x04, 0, 0, 1, 0x03, 0x01, 0x01, 0, // interface 0: boot keyboard
    ///     0x09, 0x21, 0x11, 0x01, 0, 1, 0x22, 63, 0, // HID class descriptor
    ///     0x07, 0x05, 0x81, 0x03, 8, 0, 10,          // endpoint 0x81, interrupt IN
    /// ];
    /// let kbd = BootKeyboardInterface::probe(&config)?;
    /// assert_eq!(kbd.endpoint_address, 0x81);
    /// assert_eq!(kbd.max_packet_size, 8);
    /// # Ok::<(), usbh_keyboard::UsbError>(())
    /// ```
    pub fn probe(config: &[u8]) -> Result<Self> {
        let mut offset = match config.get(..2) {
            Some(&[len, DESC_TYPE_CONFIGURATION]) if len as usize >= CONFIGURATION_DESC_LEN => {
                len as usize
            }
            _ => return Err(UsbError::InvalidDescriptor),
        };
        let mut current: Option<InterfaceDescriptor> = None;

        while let Some(&[desc_len, desc_type]) = config.get(offset..offset + 2) {
            let desc_len = desc_len as usize;
            if desc_len < 2 {
                // zero-length descriptor would never advance
                return Err(UsbError::InvalidDescriptor);
            }
            let Some(desc) = config.get(offset..offset + desc_len) else {
                break;
            };

            match desc_type {
                DESC_TYPE_INTERFACE => {
                    current = InterfaceDescriptor::from_bytes(desc)
                        .ok()
                        .filter(InterfaceDescriptor::is_boot_keyboard);
                }
                DESC_TYPE_ENDPOINT => {
                    if let Some(interface) = current {
                        let endpoint = EndpointDescriptor::from_bytes(desc)?;
                        if endpoint.is_interrupt_in() {
                            #[cfg(feature = "defmt")]
                            defmt::info!(
                                "Boot keyboard: interface {}, endpoint {=u8:#04x}, mps {}",
                                interface.interface_number,
                                endpoint.address,
                                endpoint.max_packet_size
                            );

                            return Ok(Self {
                                interface_number: interface.interface_number,
                                endpoint_address: endpoint.address,
                                max_packet_size: endpoint.max_packet_size,
                                interval: endpoint.interval,
                            });
                        }
                    }
                }
                _ => {}
            }

            offset += desc_len;
        }

        Err(UsbError::InvalidDescriptor)
    }

    /// Endpoint number without the direction bit
    pub fn endpoint_number(&self) -> u8 {
        self.endpoint_address & 0x0F
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_HEADER: [u8; 9] = [0x09, 0x02, 0, 0, 2, 1, 0, 0xA0, 50];
    const HID_CLASS_DESC: [u8; 9] = [0x09, 0x21, 0x11, 0x01, 0, 1, 0x22, 63, 0];

    fn interface(number: u8, class: u8, subclass: u8, protocol: u8) -> [u8; 9] {
        [0x09, 0x04, number, 0, 1, class, subclass, protocol, 0]
    }

    fn endpoint(address: u8, attributes: u8, mps: u16, interval: u8) -> [u8; 7] {
        let mps = mps.to_le_bytes();
        [0x07, 0x05, address, attributes, mps[0], mps[1], interval]
    }

    fn config(parts: &[&[u8]]) -> heapless::Vec<u8, 128> {
        let mut data = heapless::Vec::new();
        data.extend_from_slice(&CONFIG_HEADER).unwrap();
        for part in parts {
            data.extend_from_slice(part).unwrap();
        }
        data
    }

    #[test]
    fn test_probe_boot_keyboard() {
        let data = config(&[
            &interface(0, 0x03, 0x01, 0x01),
            &HID_CLASS_DESC,
            &endpoint(0x81, 0x03, 8, 10),
        ]);

        let kbd = BootKeyboardInterface::probe(&data).unwrap();
        assert_eq!(kbd.interface_number, 0);
        assert_eq!(kbd.endpoint_address, 0x81);
        assert_eq!(kbd.endpoint_number(), 1);
        assert_eq!(kbd.max_packet_size, 8);
        assert_eq!(kbd.interval, 10);
    }

    #[test]
    fn test_probe_skips_mouse_interface() {
        let data = config(&[
            &interface(0, 0x03, 0x01, 0x02),
            &endpoint(0x81, 0x03, 4, 10),
            &interface(1, 0x03, 0x01, 0x01),
            &endpoint(0x82, 0x03, 8, 8),
        ]);

        let kbd = BootKeyboardInterface::probe(&data).unwrap();
        assert_eq!(kbd.interface_number, 1);
        assert_eq!(kbd.endpoint_address, 0x82);
    }

    #[test]
    fn test_probe_requires_interrupt_in() {
        let data = config(&[
            &interface(0, 0x03, 0x01, 0x01),
            &endpoint(0x01, 0x03, 8, 10),
            &endpoint(0x82, 0x02, 64, 0),
        ]);

        assert_eq!(
            BootKeyboardInterface::probe(&data),
            Err(UsbError::InvalidDescriptor)
        );
    }

    #[test]
    fn test_probe_rejects_report_protocol_keyboard() {
        let data = config(&[&interface(0, 0x03, 0x00, 0x01), &endpoint(0x81, 0x03, 8, 10)]);
        assert_eq!(
            BootKeyboardInterface::probe(&data),
            Err(UsbError::InvalidDescriptor)
        );
    }

    #[test]
    fn test_probe_malformed() {
        assert_eq!(BootKeyboardInterface::probe(&[]), Err(UsbError::InvalidDescriptor));
        assert_eq!(
            BootKeyboardInterface::probe(&[0x12, 0x01, 0, 2]),
            Err(UsbError::InvalidDescriptor)
        );

        let data = config(&[&[0x00, 0x04]]);
        assert_eq!(
            BootKeyboardInterface::probe(&data),
            Err(UsbError::InvalidDescriptor)
        );
    }

    #[test]
    fn test_endpoint_mps_masks_multiplier() {
        let ep = EndpointDescriptor::from_bytes(&endpoint(0x81, 0x03, 0x0808, 1)).unwrap();
        assert_eq!(ep.max_packet_size, 8);
        assert!(ep.is_interrupt_in());
    }
}
