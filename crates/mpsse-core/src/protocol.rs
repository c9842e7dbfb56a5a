//! MPSSE protocol constants
//!
//! Opcodes and sizes from the FTDI MPSSE command processor documentation
//! (AN_108).

// ============================================================================
// Data shifting commands
// ============================================================================

/// Clock data bytes out
pub const MPSSE_DO_WRITE: u8 = 0x10;

/// Clock data bytes in
pub const MPSSE_DO_READ: u8 = 0x20;

/// Change output data on the negative clock edge
pub const MPSSE_WRITE_NEG: u8 = 0x01;

/// Transfer bits instead of bytes
pub const MPSSE_BITMODE: u8 = 0x02;

/// Sample input data on the negative clock edge
pub const MPSSE_READ_NEG: u8 = 0x04;

/// Shift least significant bit first
pub const MPSSE_LSB: u8 = 0x08;

/// Most significant bit first (no flag bit set)
pub const MPSSE_MSB: u8 = 0x00;

// ============================================================================
// Pin and clock commands
// ============================================================================

/// Set data bits low byte
pub const SET_BITS_LOW: u8 = 0x80;

/// Get data bits low byte
pub const GET_BITS_LOW: u8 = 0x81;

/// Set data bits high byte
pub const SET_BITS_HIGH: u8 = 0x82;

/// Get data bits high byte
pub const GET_BITS_HIGH: u8 = 0x83;

/// Connect TDI to TDO internally
pub const LOOPBACK_START: u8 = 0x84;

/// Disconnect internal loopback
pub const LOOPBACK_END: u8 = 0x85;

/// Set clock divisor
pub const TCK_DIVISOR: u8 = 0x86;

/// Flush the chip's buffer back to the host
pub const SEND_IMMEDIATE: u8 = 0x87;

/// Disable divide-by-5 prescaler (60 MHz clock)
pub const DIS_DIV_5: u8 = 0x8A;

/// Enable divide-by-5 prescaler (12 MHz clock)
pub const EN_DIV_5: u8 = 0x8B;

// ============================================================================
// Sizes
// ============================================================================

/// Size of a block header: opcode plus 16-bit length
pub const CMD_SIZE: usize = 3;

/// Default largest chunk placed in one block
pub const DEFAULT_TRANSFER_SIZE: usize = 65535;

/// Largest chunk a block header can describe (`0xFFFF + 1`)
pub const MAX_TRANSFER_SIZE: usize = 0x1_0000;
