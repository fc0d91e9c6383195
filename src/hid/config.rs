//! Keyboard driver configuration

use super::constants::DEFAULT_POLL_INTERVAL_MS;

/// Per-device keyboard configuration
///
/// # Example
///
/// ```
/// use usbh_keyboard::hid::KeyboardConfig;
///
/// let config = KeyboardConfig::new()
///     .poll_interval_ms(8)
///     .num_lock(false);
/// assert_eq!(config.poll_interval_ms, 8);
/// assert!(config.repeat);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardConfig {
    /// Interrupt-IN poll interval requested from the transport (milliseconds)
    pub poll_interval_ms: u8,
    /// Num Lock state at device creation
    pub num_lock_on: bool,
    /// Re-emit the last press while the held-key count is stable
    pub repeat: bool,
}

impl KeyboardConfig {
    /// Default configuration: 10 ms polling, Num Lock on, repeat enabled
    pub const fn new() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            num_lock_on: true,
            repeat: true,
        }
    }

    /// Set the poll interval (clamped to at least 1 ms)
    pub fn poll_interval_ms(mut self, interval_ms: u8) -> Self {
        self.poll_interval_ms = interval_ms.max(1);
        self
    }

    /// Set the initial Num Lock state
    pub fn num_lock(mut self, on: bool) -> Self {
        self.num_lock_on = on;
        self
    }

    /// Enable or disable the repeat heuristic
    pub fn repeat(mut self, enabled: bool) -> Self {
        self.repeat = enabled;
        self
    }
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self::new()
    }
}
