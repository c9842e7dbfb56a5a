//! mpsse-core - Command framing core for FTDI MPSSE bridges
//!
//! This crate holds the part of an MPSSE driver that has to be bit exact:
//! splitting payloads into command blocks that respect the chip's transfer
//! limit, converting between clock frequencies and clock divisors, and
//! driving a byte-oriented USB endpoint robustly against partial reads.
//!
//! It is `no_std` compatible (it needs `alloc` for framed buffers). The
//! endpoint itself is supplied by the caller through the
//! [`transport::Transport`] trait, so the same core drives libftdi, a
//! pure-Rust USB stack, or an in-memory mock in tests.
//!
//! # Features
//!
//! - `std` - Implement `std::error::Error` for [`Error`]
//!
//! # Example
//!
//! ```
//! use mpsse_core::block::{build_block_buffer, parse_blocks};
//! use mpsse_core::protocol::MPSSE_DO_WRITE;
//!
//! let framed = build_block_buffer(MPSSE_DO_WRITE, &[0xAA; 5], 4)?;
//! assert_eq!(framed.len(), 5 + 2 * 3);
//!
//! let sizes: Vec<usize> = parse_blocks(&framed)
//!     .map(|b| b.map(|b| b.data.len()))
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(sizes, [4, 1]);
//! # Ok::<(), mpsse_core::Error>(())
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod args;
pub mod block;
pub mod clock;
pub mod config;
pub mod error;
pub mod protocol;
pub mod session;
pub mod transport;

pub use args::ArgIter;
pub use config::{BitOrder, Config, Pins};
pub use error::{Error, Result};
pub use session::Session;
pub use transport::Transport;
