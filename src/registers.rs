//! MAX31865 register map and config-register bit masks.

/// Configuration register
pub const CONFIG: u8 = 0x00;
/// RTD resistance ratio, high byte
pub const RTD_MSB: u8 = 0x01;
/// RTD resistance ratio, low byte (bit 0 is the fault flag)
pub const RTD_LSB: u8 = 0x02;
/// High fault threshold, high byte
pub const HIGH_FAULT_MSB: u8 = 0x03;
/// High fault threshold, low byte
pub const HIGH_FAULT_LSB: u8 = 0x04;
/// Low fault threshold, high byte
pub const LOW_FAULT_MSB: u8 = 0x05;
/// Low fault threshold, low byte
pub const LOW_FAULT_LSB: u8 = 0x06;
/// Fault status
pub const FAULT_STATUS: u8 = 0x07;

// Config register bits
pub const CONFIG_BIAS: u8 = 0x80;
pub const CONFIG_MODE_AUTO: u8 = 0x40;
pub const CONFIG_ONE_SHOT: u8 = 0x20;
pub const CONFIG_THREE_WIRE: u8 = 0x10;
pub const CONFIG_FAULT_CLEAR: u8 = 0x02;
pub const CONFIG_FILTER_50HZ: u8 = 0x01;

/// Set on the address byte of a write frame, cleared for a read frame.
pub const WRITE_FLAG: u8 = 0x80;
/// Placeholder clocked out while reading response bytes.
pub const DUMMY: u8 = 0xFF;
