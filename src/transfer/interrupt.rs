//! Interrupt-IN polling interface
//!
//! The host controller side (queue heads, periodic schedule, resubmission)
//! lives behind [`InterruptInPipe`]. A driver asks for a recurring poll once
//! and then receives every completed report through [`InterruptInHandler`].

use crate::error::Result;

/// Recurring interrupt-IN poll parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollRequest {
    /// Transfer size in bytes (the endpoint's wMaxPacketSize)
    pub max_packet_size: u16,
    /// Polling interval in milliseconds
    pub interval_ms: u8,
}

impl PollRequest {
    /// Create poll request (interval clamped to at least 1 ms)
    pub fn new(max_packet_size: u16, interval_ms: u8) -> Self {
        Self {
            max_packet_size,
            interval_ms: interval_ms.max(1),
        }
    }
}

/// Interrupt-IN pipe owned by a device driver
///
/// Implementations deliver each completed transfer to the driver's
/// [`InterruptInHandler`] and resubmit at the requested interval. Delivery
/// is serialized per pipe: at most one handler invocation is active and the
/// handler is never entered reentrantly.
pub trait InterruptInPipe {
    /// Start recurring interrupt-IN transfers
    fn submit_interrupt_in_transfer(&mut self, request: PollRequest) -> Result<()>;

    /// Stop delivery; no handler invocation may start after this returns
    fn cancel(&mut self);
}

impl<P: InterruptInPipe + ?Sized> InterruptInPipe for &mut P {
    fn submit_interrupt_in_transfer(&mut self, request: PollRequest) -> Result<()> {
        (**self).submit_interrupt_in_transfer(request)
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }
}

/// Receiver of completed interrupt-IN transfers
pub trait InterruptInHandler {
    /// Handle one report; `data` is only valid for the duration of the call
    fn on_interrupt_in(&mut self, data: &[u8]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_request_interval_clamped() {
        let request = PollRequest::new(8, 0);
        assert_eq!(request.interval_ms, 1);
        assert_eq!(request.max_packet_size, 8);
    }
}
