//! libftdi1 transport and session setup
//!
//! [`FtdiTransport`] is the byte endpoint handed to [`mpsse_core::Session`];
//! [`open_session`] opens a device and programs the default configuration.

use std::io::{Read, Write};

use ftdi::{find_by_vid_pid, BitMode, Device, Interface};
use mpsse_core::clock::ClockSetting;
use mpsse_core::protocol::SET_BITS_LOW;
use mpsse_core::transport::{raw_write, Transport};
use mpsse_core::{ArgIter, BitOrder, Session};

use crate::error::{FtdiError, Result};
use crate::protocol::*;

/// Configuration for opening an FTDI device
#[derive(Debug, Clone)]
pub struct FtdiConfig {
    /// USB vendor ID
    pub vendor_id: u16,
    /// USB product ID
    pub product_id: u16,
    /// Interface/channel to use (A, B, C, D)
    pub interface: FtdiInterface,
    /// Requested clock frequency in Hz
    pub frequency: u32,
    /// Bit order for shifted data
    pub bit_order: BitOrder,
    /// USB latency timer in milliseconds
    pub latency_ms: u8,
}

impl Default for FtdiConfig {
    fn default() -> Self {
        FtdiConfig::for_device(FtdiDeviceType::default())
    }
}

impl FtdiConfig {
    /// Create a new config for a specific device type
    pub fn for_device(device_type: FtdiDeviceType) -> Self {
        FtdiConfig {
            vendor_id: FTDI_VID,
            product_id: device_type.product_id(),
            interface: FtdiInterface::default(),
            frequency: DEFAULT_FREQUENCY,
            bit_order: BitOrder::default(),
            latency_ms: DEFAULT_LATENCY_MS,
        }
    }

    /// Set the interface/channel
    pub fn interface(mut self, interface: FtdiInterface) -> Self {
        self.interface = interface;
        self
    }

    /// Set the clock frequency
    pub fn frequency(mut self, frequency: u32) -> Result<Self> {
        ClockSetting::for_frequency(frequency)?;
        self.frequency = frequency;
        Ok(self)
    }

    /// Set the bit order
    pub fn bit_order(mut self, bit_order: BitOrder) -> Self {
        self.bit_order = bit_order;
        self
    }
}

/// libftdi1-backed MPSSE endpoint
pub struct FtdiTransport {
    /// libftdi device context
    device: Device,
}

impl FtdiTransport {
    /// Open the first device matching `config` and enter MPSSE mode
    pub fn open(config: &FtdiConfig) -> Result<Self> {
        let name = FtdiDeviceType::from_ids(config.vendor_id, config.product_id)
            .map_or("FTDI device", |t| t.name());
        log::info!(
            "Opening {} {:04X}:{:04X} channel {}",
            name,
            config.vendor_id,
            config.product_id,
            config.interface.letter()
        );

        let interface = match config.interface {
            FtdiInterface::A => Interface::A,
            FtdiInterface::B => Interface::B,
            FtdiInterface::C => Interface::C,
            FtdiInterface::D => Interface::D,
        };

        let mut device = find_by_vid_pid(config.vendor_id, config.product_id)
            .interface(interface)
            .open()
            .map_err(|e| FtdiError::OpenFailed(format!("{}", e)))?;

        device
            .usb_reset()
            .map_err(|e| FtdiError::ConfigFailed(format!("USB reset failed: {}", e)))?;

        device
            .set_latency_timer(config.latency_ms)
            .map_err(|e| FtdiError::ConfigFailed(format!("Set latency timer failed: {}", e)))?;

        device
            .set_bitmode(0x00, BitMode::Mpsse)
            .map_err(|e| FtdiError::ConfigFailed(format!("Set MPSSE mode failed: {}", e)))?;

        Ok(FtdiTransport { device })
    }

    /// Release I/O pins (set all as inputs)
    fn release_pins(&mut self) -> Result<()> {
        raw_write(self, &[SET_BITS_LOW, 0x00, 0x00])?;
        Ok(())
    }
}

impl Transport for FtdiTransport {
    type Error = FtdiError;

    fn write_data(&mut self, data: &[u8]) -> Result<usize> {
        self.device
            .write(data)
            .map_err(|e| FtdiError::TransferFailed(format!("Write failed: {}", e)))
    }

    fn read_data(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.device
            .read(buf)
            .map_err(|e| FtdiError::TransferFailed(format!("Read failed: {}", e)))
    }

    fn purge_rx(&mut self) -> Result<()> {
        self.device.usb_purge_rx_buffer()?;
        Ok(())
    }
}

impl Drop for FtdiTransport {
    fn drop(&mut self) {
        if let Err(e) = self.release_pins() {
            log::warn!("Failed to release pins on close: {}", e);
        }
    }
}

/// Open a device and program loopback, clock and idle pins
pub fn open_session(config: &FtdiConfig) -> Result<Session<FtdiTransport>> {
    let transport = FtdiTransport::open(config)?;
    let mut session = Session::new(transport, config.bit_order);

    let actual = session.init(config.frequency)?;
    log::info!(
        "MPSSE configured at {} Hz ({}, requested {} Hz)",
        actual,
        config.bit_order.name(),
        config.frequency
    );

    Ok(session)
}

fn parse_hex_u16(s: &str) -> Option<u16> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => u16::from_str_radix(s, 16).ok(),
    }
}

/// Parse transport options
///
/// Each option is `key=value` or a bare integer. Bare integers are
/// positional: the first selects the interface (0 = default, 1-4 = A-D)
/// and out-of-range values fall back to the default.
pub fn parse_options(options: &[&str]) -> Result<FtdiConfig> {
    let mut config = FtdiConfig::default();
    let mut positional = Vec::new();

    for opt in options.iter().filter(|o| !o.is_empty()) {
        let Some((key, value)) = opt.split_once('=') else {
            let index: i32 = opt.parse().map_err(|_| {
                FtdiError::InvalidParameter(format!(
                    "Invalid option '{}' (expected key=value or an interface index)",
                    opt
                ))
            })?;
            positional.push(index);
            continue;
        };

        match key {
            "vid" => {
                config.vendor_id = parse_hex_u16(value).ok_or_else(|| {
                    FtdiError::InvalidParameter(format!("Invalid vendor ID '{}'", value))
                })?;
            }
            "pid" => {
                config.product_id = parse_hex_u16(value).ok_or_else(|| {
                    FtdiError::InvalidParameter(format!("Invalid product ID '{}'", value))
                })?;
            }
            "type" => {
                let device_type = FtdiDeviceType::parse(value).ok_or_else(|| {
                    FtdiError::InvalidParameter(format!(
                        "Unknown device type '{}'. Valid types: 2232h, 4232h, 232h",
                        value
                    ))
                })?;
                config.vendor_id = FTDI_VID;
                config.product_id = device_type.product_id();
            }
            "port" | "channel" => {
                let mut chars = value.chars();
                config.interface = match (chars.next(), chars.next()) {
                    (Some(c), None) => FtdiInterface::from_char(c),
                    _ => None,
                }
                .ok_or_else(|| {
                    FtdiError::InvalidParameter(format!(
                        "Invalid channel '{}': must be A, B, C, or D",
                        value
                    ))
                })?;
            }
            "freq" | "frequency" => {
                let freq: u32 = value.parse().map_err(|_| {
                    FtdiError::InvalidParameter(format!("Invalid frequency '{}'", value))
                })?;
                config = config.frequency(freq)?;
            }
            "order" => {
                config.bit_order = match value.to_lowercase().as_str() {
                    "msb" => BitOrder::Msb,
                    "lsb" => BitOrder::Lsb,
                    _ => {
                        return Err(FtdiError::InvalidParameter(format!(
                            "Invalid bit order '{}': must be msb or lsb",
                            value
                        )))
                    }
                };
            }
            "latency" => {
                config.latency_ms = value.parse().map_err(|_| {
                    FtdiError::InvalidParameter(format!("Invalid latency '{}'", value))
                })?;
            }
            _ => {
                log::warn!("Unknown FTDI option: {}={}", key, value);
            }
        }
    }

    if !positional.is_empty() {
        let count = positional.len();
        let mut args = ArgIter::new(positional);
        config.interface = FtdiInterface::from_index(args.next_arg(0));
        if args.consumed() < count {
            log::warn!(
                "Ignoring {} extra positional option(s)",
                count - args.consumed()
            );
        }
    }

    Ok(config)
}
