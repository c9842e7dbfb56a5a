//! Programmer registration and dispatch
//!
//! A programmer string has the form `name[:opt,opt,...]`, for example
//! `ftdi:type=232h,port=A,freq=1000000`.

/// Information about a programmer
pub struct ProgrammerInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Alternative names/aliases
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
}

/// Get information about all available programmers (enabled at compile time)
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_programmers() -> Vec<ProgrammerInfo> {
    let mut programmers = Vec::new();

    #[cfg(feature = "ftdi")]
    programmers.push(ProgrammerInfo {
        name: "ftdi",
        aliases: &["mpsse"],
        description: "FTDI MPSSE via libftdi1 (type=<dev>,port=<A-D>,freq=<Hz>,order=<msb|lsb>)",
    });

    programmers
}

/// Print the programmer list
pub fn list_programmers() {
    let programmers = available_programmers();
    if programmers.is_empty() {
        println!("No programmers compiled in (enable the 'ftdi' feature)");
        return;
    }

    println!("Supported programmers:");
    println!();
    for p in &programmers {
        if p.aliases.is_empty() {
            println!("  {:<10} - {}", p.name, p.description);
        } else {
            println!(
                "  {:<10} - {} (aliases: {})",
                p.name,
                p.description,
                p.aliases.join(", ")
            );
        }
    }
}

/// Parsed programmer string
#[derive(Debug, PartialEq, Eq)]
pub struct ProgrammerParams<'a> {
    /// Programmer name
    pub name: &'a str,
    /// Options in the order given
    pub options: Vec<&'a str>,
}

/// Split a programmer string into name and options
pub fn parse_programmer_params(s: &str) -> ProgrammerParams<'_> {
    let (name, opts_str) = s.split_once(':').unwrap_or((s, ""));
    let options = opts_str
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .collect();

    ProgrammerParams { name, options }
}

/// Open a programmer and program its default configuration
#[cfg(feature = "ftdi")]
pub fn open_session(
    programmer: &str,
) -> Result<mpsse_core::Session<mpsse_ftdi::FtdiTransport>, Box<dyn std::error::Error>> {
    let params = parse_programmer_params(programmer);

    match params.name {
        "ftdi" | "mpsse" => {
            let config = mpsse_ftdi::parse_options(&params.options)?;
            Ok(mpsse_ftdi::open_session(&config)?)
        }
        _ => Err(crate::error::CliError::UnknownProgrammer(params.name.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_programmer_params() {
        assert_eq!(
            parse_programmer_params("ftdi"),
            ProgrammerParams {
                name: "ftdi",
                options: vec![],
            }
        );
        assert_eq!(
            parse_programmer_params("ftdi:type=232h, 2,,freq=400000"),
            ProgrammerParams {
                name: "ftdi",
                options: vec!["type=232h", "2", "freq=400000"],
            }
        );
    }
}
