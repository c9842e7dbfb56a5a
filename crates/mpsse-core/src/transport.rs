//! Raw transport
//!
//! The only code that talks to the USB endpoint. Writes are a single call
//! that must accept the whole buffer; reads keep issuing calls until the
//! destination is full or the endpoint reports an error, and always purge
//! the receive buffer afterwards.

use core::fmt;

use crate::error::{Error, Result};

/// Byte-oriented endpoint to an MPSSE chip
///
/// Implementations block until the underlying call completes. Timeouts, if
/// any, belong to the implementation.
pub trait Transport {
    /// Error reported by the endpoint
    type Error: fmt::Debug + fmt::Display;

    /// Write bytes, returning how many the endpoint accepted
    fn write_data(&mut self, data: &[u8]) -> core::result::Result<usize, Self::Error>;

    /// Read up to `buf.len()` bytes, returning how many were received
    fn read_data(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error>;

    /// Discard anything left in the receive buffer
    fn purge_rx(&mut self) -> core::result::Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn write_data(&mut self, data: &[u8]) -> core::result::Result<usize, Self::Error> {
        (**self).write_data(data)
    }

    fn read_data(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
        (**self).read_data(buf)
    }

    fn purge_rx(&mut self) -> core::result::Result<(), Self::Error> {
        (**self).purge_rx()
    }
}

/// Write `data` in one call
///
/// Succeeds only if the endpoint reports exactly `data.len()` bytes written.
/// Short writes and endpoint errors both become [`Error::WriteFailed`]; no
/// retry is attempted.
pub fn raw_write<T: Transport + ?Sized>(transport: &mut T, data: &[u8]) -> Result<()> {
    match transport.write_data(data) {
        Ok(n) if n == data.len() => {
            log::trace!("Sent {} bytes", n);
            Ok(())
        }
        Ok(n) => {
            log::debug!("Short write: {} of {} bytes", n, data.len());
            Err(Error::WriteFailed)
        }
        Err(e) => {
            log::debug!("Write of {} bytes failed: {}", data.len(), e);
            Err(Error::WriteFailed)
        }
    }
}

/// Read until `buf` is full or the endpoint fails
///
/// Returns the number of bytes received, which is less than `buf.len()` if a
/// read call failed part way. The receive buffer is purged once afterwards
/// in every case, since leftover bytes corrupt the next read; a failed purge
/// is only logged.
pub fn raw_read<T: Transport + ?Sized>(transport: &mut T, buf: &mut [u8]) -> usize {
    let size = buf.len();
    let mut n = 0;

    while n < size {
        match transport.read_data(&mut buf[n..]) {
            Ok(r) => n += r.min(size - n),
            Err(e) => {
                log::debug!("Read failed after {} of {} bytes: {}", n, size, e);
                break;
            }
        }
    }

    if let Err(e) = transport.purge_rx() {
        log::warn!("Failed to purge receive buffer: {}", e);
    }

    log::trace!("Received {} bytes", n);
    n
}
