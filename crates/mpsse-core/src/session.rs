//! MPSSE session
//!
//! A [`Session`] bundles everything one connection to a chip needs: the
//! transport, the command/pin [`Config`], the transfer limit, and the
//! current clock. Sessions are independent of each other; nothing here is
//! global.

use alloc::vec;
use alloc::vec::Vec;

use crate::block::{build_block_buffer, build_read_commands, check_transfer_size};
use crate::clock::ClockSetting;
use crate::config::{BitOrder, Config, Pins};
use crate::error::{Error, Result};
use crate::protocol::{DEFAULT_TRANSFER_SIZE, LOOPBACK_END, SEND_IMMEDIATE};
use crate::transport::{raw_read, raw_write, Transport};

/// One connection to an MPSSE chip
pub struct Session<T: Transport> {
    transport: T,
    config: Config,
    transfer_size: usize,
    clock: Option<ClockSetting>,
}

impl<T: Transport> Session<T> {
    /// Create a session with the default configuration for `bit_order`
    ///
    /// Nothing is sent to the device until [`Session::init`] or another
    /// command is issued.
    pub fn new(transport: T, bit_order: BitOrder) -> Self {
        Self::with_config(transport, Config::new(bit_order))
    }

    /// Create a session with an explicit configuration
    pub fn with_config(transport: T, config: Config) -> Self {
        Session {
            transport,
            config,
            transfer_size: DEFAULT_TRANSFER_SIZE,
            clock: None,
        }
    }

    /// Set the largest chunk placed in one command block
    pub fn with_transfer_size(mut self, transfer_size: usize) -> Result<Self> {
        check_transfer_size(transfer_size)?;
        self.transfer_size = transfer_size;
        Ok(self)
    }

    /// Command and pin configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the configuration
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Largest chunk placed in one command block
    pub fn transfer_size(&self) -> usize {
        self.transfer_size
    }

    /// Clock programmed by the last successful [`Session::set_clock`]
    pub fn clock(&self) -> Option<&ClockSetting> {
        self.clock.as_ref()
    }

    /// Mutable access to the underlying transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the session, returning the transport
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Program the device: loopback off, clock, idle pin levels
    pub fn init(&mut self, freq: u32) -> Result<u32> {
        log::debug!("Disabling loopback");
        raw_write(&mut self.transport, &[LOOPBACK_END])?;

        let actual = self.set_clock(freq)?;

        log::debug!(
            "Setting idle pins: levels=0x{:02X} direction=0x{:02X}",
            self.config.idle.bits(),
            self.config.direction.bits()
        );
        self.set_pins(self.config.idle)?;

        Ok(actual)
    }

    /// Program the clock closest to `freq`, returning the actual frequency
    pub fn set_clock(&mut self, freq: u32) -> Result<u32> {
        let setting = ClockSetting::for_frequency(freq)?;
        raw_write(&mut self.transport, &setting.commands())?;
        self.clock = Some(setting);
        Ok(setting.frequency)
    }

    /// Drive the low pins to `levels` using the configured directions
    pub fn set_pins(&mut self, levels: Pins) -> Result<()> {
        raw_write(&mut self.transport, &self.config.pin_command(levels))
    }

    /// Assert chip select
    pub fn start(&mut self) -> Result<()> {
        self.set_pins(self.config.start)
    }

    /// Release chip select
    pub fn stop(&mut self) -> Result<()> {
        self.set_pins(self.config.stop)
    }

    /// Clock `data` out
    ///
    /// The whole payload is framed into one buffer and written in a single
    /// call. Empty data is a no-op.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }

        let buf = build_block_buffer(self.config.write_cmd, data, self.transfer_size)?;
        log::debug!("Writing {} bytes ({} framed)", data.len(), buf.len());
        raw_write(&mut self.transport, &buf)
    }

    /// Clock `len` bytes in
    pub fn read(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; len];
        let mut offset = 0;

        while offset < len {
            let chunk = (len - offset).min(self.transfer_size);
            let mut cmd = build_read_commands(self.config.read_cmd, chunk, self.transfer_size)?;
            cmd.push(SEND_IMMEDIATE);
            raw_write(&mut self.transport, &cmd)?;

            let got = raw_read(&mut self.transport, &mut out[offset..offset + chunk]);
            if got != chunk {
                return Err(Error::ShortRead {
                    expected: len,
                    actual: offset + got,
                });
            }
            offset += chunk;
        }

        log::debug!("Read {} bytes", len);
        Ok(out)
    }

    /// Clock `data` out while clocking the same number of bytes in
    pub fn transfer(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = vec![0u8; data.len()];
        let mut offset = 0;

        for chunk in data.chunks(self.transfer_size) {
            let mut cmd =
                build_block_buffer(self.config.transfer_cmd(), chunk, self.transfer_size)?;
            cmd.push(SEND_IMMEDIATE);
            raw_write(&mut self.transport, &cmd)?;

            let end = offset + chunk.len();
            let got = raw_read(&mut self.transport, &mut out[offset..end]);
            if got != chunk.len() {
                return Err(Error::ShortRead {
                    expected: data.len(),
                    actual: offset + got,
                });
            }
            offset = end;
        }

        log::debug!("Transferred {} bytes", data.len());
        Ok(out)
    }
}
