//! mpsse-ftdi - libftdi1 transport for mpsse-core
//!
//! This crate connects the framing core to FTDI chips with an MPSSE engine
//! (FT2232H, FT4232H, FT232H) through the libftdi1 C library.
//!
//! # Example
//!
//! ```no_run
//! use mpsse_ftdi::{open_session, FtdiConfig, FtdiInterface};
//!
//! let config = FtdiConfig::default()
//!     .interface(FtdiInterface::B)
//!     .frequency(1_000_000)?;
//! let mut session = open_session(&config)?;
//!
//! session.start()?;
//! session.write(&[0x9F])?;
//! let id = session.read(3)?;
//! session.stop()?;
//! println!("ID: {:02X?}", id);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Options
//!
//! [`parse_options`] accepts the following, comma separated on the CLI:
//!
//! - `vid=<hex>` / `pid=<hex>` - USB IDs (default: FT2232H)
//! - `type=<device>` - Shorthand for the IDs of 2232h, 4232h or 232h
//! - `port=<A|B|C|D>` - Channel to use (default: A)
//! - `freq=<Hz>` - Clock frequency (default: 1 MHz)
//! - `order=<msb|lsb>` - Bit order (default: msb)
//! - `latency=<ms>` - Latency timer (default: 2)
//! - a bare integer - Interface index (0 = default, 1-4 = A-D)

mod device;
mod error;
mod protocol;

pub use device::{open_session, parse_options, FtdiConfig, FtdiTransport};
pub use error::{FtdiError, Result};
pub use protocol::{FtdiDeviceType, FtdiInterface};
