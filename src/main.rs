//! mpsse - MPSSE command framing and transfer tool
//!
//! Frames payloads into MPSSE command blocks, converts clock settings, and
//! drives FTDI MPSSE chips through libftdi1.
//!
//! # Architecture
//!
//! - `mpsse-core` holds the framing algorithm, clock math, default
//!   configuration and the raw transport loop, independent of any USB stack.
//! - `mpsse-ftdi` supplies a libftdi1-backed transport for it.
//! - This binary wires both to a command line.

mod cli;
mod commands;
mod error;
mod programmers;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Commands::Frame {
            opcode,
            input,
            output,
            transfer_size,
        } => commands::frame::run_frame(opcode, &input, &output, transfer_size).map_err(Into::into),
        Commands::Inspect { input } => commands::frame::run_inspect(&input).map_err(Into::into),
        Commands::Clock {
            system_clock,
            frequency,
            divisor,
        } => commands::clock::run_clock(system_clock, frequency, divisor).map_err(Into::into),
        Commands::Defaults { lsb } => {
            commands::clock::run_defaults(lsb);
            Ok(())
        }
        #[cfg(feature = "ftdi")]
        Commands::Write {
            programmer,
            input,
            no_cs,
        } => {
            let mut session = programmers::open_session(&programmer)?;
            commands::transfer::run_write(&mut session, &input, !no_cs)
        }
        #[cfg(feature = "ftdi")]
        Commands::Read {
            programmer,
            length,
            output,
            no_cs,
        } => {
            let mut session = programmers::open_session(&programmer)?;
            commands::transfer::run_read(&mut session, length as usize, &output, !no_cs)
        }
        Commands::ListProgrammers => {
            programmers::list_programmers();
            Ok(())
        }
    };

    result
}
