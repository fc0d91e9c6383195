//! Shared test utilities for usbh-keyboard tests
//!
//! This module provides common helpers, mocks, and utilities
//! used across multiple test files.

#![allow(dead_code)]

pub mod mock_hardware;

// Re-export commonly used items
pub use mock_hardware::{
    boot_report, create_keyboard_config_descriptor, create_mouse_config_descriptor,
    create_test_device_info, MockPipe, RecordingSink,
};
