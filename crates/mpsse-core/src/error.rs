//! Error types for mpsse-core
//!
//! A single no_std compatible error type shared by every module. Failures at
//! this layer are always local and recoverable by the immediate caller.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Allocating a framed buffer failed
    OutOfMemory,
    /// The transport did not accept the whole buffer in one call
    WriteFailed,
    /// Transfer size is zero or larger than a block header can encode
    InvalidTransferSize(usize),
    /// Requested clock frequency cannot be generated
    InvalidFrequency(u32),
    /// A framed buffer ended in the middle of a block
    MalformedBlock {
        /// Offset of the block that could not be decoded
        offset: usize,
    },
    /// The device returned fewer bytes than a command asked for
    ShortRead {
        /// Number of bytes requested
        expected: usize,
        /// Number of bytes received before the transport gave up
        actual: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory => write!(f, "out of memory while building command buffer"),
            Self::WriteFailed => write!(f, "write to device failed"),
            Self::InvalidTransferSize(size) => {
                write!(f, "invalid transfer size {}: must be 1-65536", size)
            }
            Self::InvalidFrequency(freq) => write!(f, "invalid clock frequency {} Hz", freq),
            Self::MalformedBlock { offset } => {
                write!(f, "truncated command block at offset {}", offset)
            }
            Self::ShortRead { expected, actual } => {
                write!(f, "short read: expected {} bytes, got {}", expected, actual)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
