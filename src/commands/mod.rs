//! CLI command implementations
//!
//! Offline commands (`frame`, `inspect`, `clock`, `defaults`) only use the
//! framing core. Transfer commands run against any [`mpsse_core::Session`],
//! so they work the same with a real device or a test transport.

pub mod clock;
pub mod frame;
#[cfg_attr(not(feature = "ftdi"), allow(dead_code))]
pub mod transfer;
