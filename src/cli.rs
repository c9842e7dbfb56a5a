//! CLI argument parsing

use clap::{Parser, Subcommand};
use mpsse_core::protocol::{DEFAULT_TRANSFER_SIZE, MPSSE_DO_WRITE};
use std::path::PathBuf;

/// Parse a string as a hex or decimal u32
fn parse_hex_u32(s: &str) -> Result<u32, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u32>().map_err(|e| format!("Invalid number: {}", e))
    }
}

/// Parse a string as a hex or decimal opcode byte
fn parse_opcode(s: &str) -> Result<u8, String> {
    let value = parse_hex_u32(s)?;
    u8::try_from(value).map_err(|_| format!("Opcode 0x{:X} does not fit in a byte", value))
}

/// Parse a string as a hex or decimal clock divisor
fn parse_divisor(s: &str) -> Result<u16, String> {
    let value = parse_hex_u32(s)?;
    u16::try_from(value).map_err(|_| format!("Divisor {} exceeds 0xFFFF", value))
}

#[derive(Parser)]
#[command(name = "mpsse")]
#[command(author, version, about = "MPSSE command framing and transfer tool", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Frame a payload file into MPSSE command blocks
    Frame {
        /// Opcode placed in every block header
        #[arg(long, value_parser = parse_opcode, default_value_t = MPSSE_DO_WRITE)]
        opcode: u8,

        /// Payload file
        #[arg(short, long)]
        input: PathBuf,

        /// Framed output file
        #[arg(short, long)]
        output: PathBuf,

        /// Largest chunk per block (1-65536)
        #[arg(long, default_value_t = DEFAULT_TRANSFER_SIZE)]
        transfer_size: usize,
    },

    /// List the blocks of a framed command file
    Inspect {
        /// Framed input file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Convert between clock frequency and divisor
    Clock {
        /// System clock in Hz (60 MHz or 12 MHz on real chips)
        #[arg(long, value_parser = parse_hex_u32, default_value = "60000000")]
        system_clock: u32,

        /// Frequency to convert to a divisor, in Hz
        #[arg(short, long, value_parser = parse_hex_u32, conflicts_with = "divisor", required_unless_present = "divisor")]
        frequency: Option<u32>,

        /// Divisor to convert to a frequency
        #[arg(short, long, value_parser = parse_divisor)]
        divisor: Option<u16>,
    },

    /// Show the default command and pin configuration
    Defaults {
        /// Shift least significant bit first
        #[arg(long)]
        lsb: bool,
    },

    /// Clock a file out through a device
    #[cfg(feature = "ftdi")]
    Write {
        /// Programmer (e.g. "ftdi:type=232h,freq=1000000")
        #[arg(short, long)]
        programmer: String,

        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        /// Leave chip select untouched
        #[arg(long)]
        no_cs: bool,
    },

    /// Clock bytes in from a device into a file
    #[cfg(feature = "ftdi")]
    Read {
        /// Programmer (e.g. "ftdi:port=B")
        #[arg(short, long)]
        programmer: String,

        /// Number of bytes to read
        #[arg(short, long, value_parser = parse_hex_u32)]
        length: u32,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Leave chip select untouched
        #[arg(long)]
        no_cs: bool,
    },

    /// List supported programmers
    ListProgrammers,
}
