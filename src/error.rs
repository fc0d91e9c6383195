//! USB error types

use core::fmt;

/// USB operation result type
pub type Result<T> = core::result::Result<T, UsbError>;

/// USB error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbError {
    /// Unsupported configuration (e.g. max packet size too small for a boot report)
    Unsupported,
    /// Report buffer shorter than a boot protocol report
    BufferUnderflow,
    /// Invalid descriptor, or not a boot keyboard interface
    InvalidDescriptor,
    /// Invalid state for operation
    InvalidState,
    /// No available resources (descriptors, buffers)
    NoResources,
    /// USB stall condition
    Stall,
    /// Transaction error (CRC, timeout, bad PID)
    TransactionError,
}

impl fmt::Display for UsbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "Unsupported configuration"),
            Self::BufferUnderflow => write!(f, "Buffer underflow"),
            Self::InvalidDescriptor => write!(f, "Invalid descriptor"),
            Self::InvalidState => write!(f, "Invalid state"),
            Self::NoResources => write!(f, "No resources available"),
            Self::Stall => write!(f, "USB stall"),
            Self::TransactionError => write!(f, "Transaction error"),
        }
    }
}
