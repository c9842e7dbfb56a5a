//! Clock and configuration commands

use mpsse_core::clock::{divisor_to_freq, freq_to_divisor};
use mpsse_core::{BitOrder, Config, Pins};

use crate::error::CliError;

/// Result of a clock conversion
#[derive(Debug, PartialEq, Eq)]
pub struct ClockConversion {
    /// Divisor programmed into the chip
    pub divisor: u16,
    /// Frequency the divisor produces
    pub frequency: u32,
}

/// Convert a frequency or a divisor against `system_clock`
pub fn convert(
    system_clock: u32,
    frequency: Option<u32>,
    divisor: Option<u16>,
) -> Result<ClockConversion, CliError> {
    let divisor = match (frequency, divisor) {
        (Some(0), _) => return Err(mpsse_core::Error::InvalidFrequency(0).into()),
        (Some(freq), _) => freq_to_divisor(system_clock, freq),
        (None, Some(div)) => div,
        (None, None) => return Err(mpsse_core::Error::InvalidFrequency(0).into()),
    };

    Ok(ClockConversion {
        divisor,
        frequency: divisor_to_freq(system_clock, divisor),
    })
}

/// Run the clock command
pub fn run_clock(
    system_clock: u32,
    frequency: Option<u32>,
    divisor: Option<u16>,
) -> Result<(), CliError> {
    let conv = convert(system_clock, frequency, divisor)?;

    println!("System clock: {} Hz", system_clock);
    println!("Divisor:      {} (0x{:04X})", conv.divisor, conv.divisor);
    println!("Frequency:    {} Hz", conv.frequency);

    if let Some(requested) = frequency {
        if requested != conv.frequency {
            println!(
                "Note: {} Hz is not reachable exactly; nearest setting gives {} Hz",
                requested, conv.frequency
            );
        }
    }

    Ok(())
}

fn pin_names(pins: Pins) -> String {
    let names: Vec<&str> = pins.iter_names().map(|(name, _)| name).collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join("|")
    }
}

/// Run the defaults command
pub fn run_defaults(lsb: bool) {
    let order = if lsb { BitOrder::Lsb } else { BitOrder::Msb };
    let config = Config::new(order);

    println!("Bit order:     {}", order.name());
    println!("Write command: 0x{:02X}", config.write_cmd);
    println!("Read command:  0x{:02X}", config.read_cmd);
    println!(
        "Direction:     0x{:02X} ({})",
        config.direction.bits(),
        pin_names(config.direction)
    );
    println!(
        "Idle levels:   0x{:02X} ({})",
        config.idle.bits(),
        pin_names(config.idle)
    );
    println!(
        "Start levels:  0x{:02X} ({})",
        config.start.bits(),
        pin_names(config.start)
    );
    println!(
        "Stop levels:   0x{:02X} ({})",
        config.stop.bits(),
        pin_names(config.stop)
    );
}
