//! Default command and pin configuration
//!
//! Pin assignments on the low byte (ADBUS):
//!
//! ```text
//! bit 0  SK   clock
//! bit 1  DO   data out (MOSI / TDI)
//! bit 2  DI   data in (MISO / TDO)
//! bit 3  CS   chip select (TMS)
//! bit 4-7     GPIOL0-GPIOL3
//! ```

use bitflags::bitflags;

use crate::protocol::{
    MPSSE_DO_READ, MPSSE_DO_WRITE, MPSSE_LSB, MPSSE_MSB, MPSSE_READ_NEG, SET_BITS_LOW,
};

bitflags! {
    /// Low-byte MPSSE pins
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Pins: u8 {
        /// Clock
        const SK = 0x01;
        /// Data out
        const DO = 0x02;
        /// Data in
        const DI = 0x04;
        /// Chip select
        const CS = 0x08;
        /// GPIOL0
        const GPIO0 = 0x10;
        /// GPIOL1
        const GPIO1 = 0x20;
        /// GPIOL2
        const GPIO2 = 0x40;
        /// GPIOL3
        const GPIO3 = 0x80;
    }
}

/// Default pin direction: SK, DO and CS are outputs
pub const DEFAULT_TRIS: Pins = Pins::SK.union(Pins::DO).union(Pins::CS);

/// Default pin levels: SK and CS idle high
pub const DEFAULT_PORT: Pins = Pins::SK.union(Pins::CS);

/// Bit order of shifted data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitOrder {
    /// Most significant bit first
    #[default]
    Msb,
    /// Least significant bit first
    Lsb,
}

impl BitOrder {
    /// Flag OR-ed into shift opcodes
    pub fn flag(&self) -> u8 {
        match self {
            BitOrder::Msb => MPSSE_MSB,
            BitOrder::Lsb => MPSSE_LSB,
        }
    }

    /// Get the name of this bit order
    pub fn name(&self) -> &'static str {
        match self {
            BitOrder::Msb => "MSB first",
            BitOrder::Lsb => "LSB first",
        }
    }
}

/// Command and pin template for a session
///
/// Built once from a [`BitOrder`]; callers then own it and may adjust the
/// fields before programming the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Bit order the command bytes were derived from
    pub bit_order: BitOrder,
    /// Opcode for clocking bytes out
    pub write_cmd: u8,
    /// Opcode for clocking bytes in
    pub read_cmd: u8,
    /// Pin directions (set = output)
    pub direction: Pins,
    /// Pin levels between transfers
    pub idle: Pins,
    /// Pin levels at the start of a transfer
    pub start: Pins,
    /// Pin levels at the end of a transfer
    pub stop: Pins,
}

impl Config {
    /// Build the default configuration for `bit_order`
    pub fn new(bit_order: BitOrder) -> Self {
        let order = bit_order.flag();

        Config {
            bit_order,
            // Data propagated on the rising clock edge
            write_cmd: MPSSE_DO_WRITE | order,
            // Data sampled on the falling clock edge
            read_cmd: MPSSE_DO_READ | MPSSE_READ_NEG | order,
            direction: DEFAULT_TRIS,
            idle: DEFAULT_PORT,
            // CS is active low for the duration of a transfer
            start: DEFAULT_PORT.difference(Pins::CS),
            stop: DEFAULT_PORT,
        }
    }

    /// Opcode for a full-duplex transfer
    pub fn transfer_cmd(&self) -> u8 {
        self.write_cmd | self.read_cmd
    }

    /// `SET_BITS_LOW` command driving `levels` with this config's directions
    pub fn pin_command(&self, levels: Pins) -> [u8; 3] {
        [SET_BITS_LOW, levels.bits(), self.direction.bits()]
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(BitOrder::default())
    }
}

/// Build the default configuration for `bit_order`
///
/// Alias for [`Config::new`].
pub fn configure_default_settings(bit_order: BitOrder) -> Config {
    Config::new(bit_order)
}
