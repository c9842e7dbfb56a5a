//! Error types for the FTDI transport

use std::fmt;

/// Result type for FTDI operations
pub type Result<T> = std::result::Result<T, FtdiError>;

/// Errors that can occur during FTDI operations
#[derive(Debug)]
pub enum FtdiError {
    /// Failed to open device
    OpenFailed(String),

    /// Failed to configure device
    ConfigFailed(String),

    /// USB transfer failed
    TransferFailed(String),

    /// Invalid parameter
    InvalidParameter(String),

    /// libftdi error
    LibFtdi(String),

    /// Framing or session error
    Core(mpsse_core::Error),
}

impl fmt::Display for FtdiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FtdiError::OpenFailed(s) => write!(f, "Failed to open device: {}", s),
            FtdiError::ConfigFailed(s) => write!(f, "Failed to configure device: {}", s),
            FtdiError::TransferFailed(s) => write!(f, "USB transfer failed: {}", s),
            FtdiError::InvalidParameter(s) => write!(f, "Invalid parameter: {}", s),
            FtdiError::LibFtdi(s) => write!(f, "libftdi error: {}", s),
            FtdiError::Core(e) => write!(f, "MPSSE error: {}", e),
        }
    }
}

impl std::error::Error for FtdiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FtdiError::Core(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ftdi::Error> for FtdiError {
    fn from(e: ftdi::Error) -> Self {
        FtdiError::LibFtdi(e.to_string())
    }
}

impl From<mpsse_core::Error> for FtdiError {
    fn from(e: mpsse_core::Error) -> Self {
        FtdiError::Core(e)
    }
}
