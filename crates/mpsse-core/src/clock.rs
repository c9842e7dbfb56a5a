//! Clock divisor conversion
//!
//! The MPSSE derives its serial clock from a fixed system clock:
//!
//! ```text
//! clock = system_clock / ((1 + divisor) * 2)
//! ```
//!
//! Both directions use integer floor division, so the conversions are not
//! exact inverses. A frequency that does not divide the system clock evenly
//! maps to the nearest achievable frequency below it.

use crate::error::{Error, Result};
use crate::protocol::{DIS_DIV_5, EN_DIV_5, TCK_DIVISOR};

/// 60 MHz base clock (divide-by-5 prescaler disabled, 'H' devices)
pub const SIXTY_MHZ: u32 = 60_000_000;

/// 12 MHz base clock (divide-by-5 prescaler enabled)
pub const TWELVE_MHZ: u32 = 12_000_000;

/// Highest frequency served from the 12 MHz base clock
pub const SIX_MHZ: u32 = 6_000_000;

/// Lowest frequency the 12 MHz base clock reaches with a 16-bit divisor
pub const MIN_FREQUENCY: u32 = TWELVE_MHZ / ((1 + u16::MAX as u32) * 2) + 1;

/// Highest frequency the 60 MHz base clock reaches (divisor 0)
pub const MAX_FREQUENCY: u32 = SIXTY_MHZ / 2;

/// Convert a frequency to a clock divisor
///
/// Computes `((system_clock / freq) / 2) - 1` truncated to 16 bits. A
/// frequency above `system_clock / 2` wraps to `0xFFFF`.
///
/// # Panics
///
/// Panics if `freq` is zero. Callers taking user input must reject zero
/// first, as [`ClockSetting::for_frequency`] does.
pub fn freq_to_divisor(system_clock: u32, freq: u32) -> u16 {
    ((system_clock / freq) / 2).wrapping_sub(1) as u16
}

/// Convert a clock divisor to a frequency
pub fn divisor_to_freq(system_clock: u32, divisor: u16) -> u32 {
    system_clock / ((1 + divisor as u32) * 2)
}

/// Base clock feeding the divisor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseClock {
    /// 60 MHz, prescaler disabled
    SixtyMhz,
    /// 12 MHz, prescaler enabled
    TwelveMhz,
}

impl BaseClock {
    /// Pick the base clock for a requested frequency
    pub fn for_frequency(freq: u32) -> Self {
        if freq > SIX_MHZ {
            BaseClock::SixtyMhz
        } else {
            BaseClock::TwelveMhz
        }
    }

    /// Base clock rate in Hz
    pub fn hz(&self) -> u32 {
        match self {
            BaseClock::SixtyMhz => SIXTY_MHZ,
            BaseClock::TwelveMhz => TWELVE_MHZ,
        }
    }

    /// Prescaler command selecting this base clock
    pub fn command(&self) -> u8 {
        match self {
            BaseClock::SixtyMhz => DIS_DIV_5,
            BaseClock::TwelveMhz => EN_DIV_5,
        }
    }
}

/// A resolved clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSetting {
    /// Base clock the divisor applies to
    pub base: BaseClock,
    /// Value programmed with `TCK_DIVISOR`
    pub divisor: u16,
    /// Frequency the chip will actually generate
    pub frequency: u32,
}

impl ClockSetting {
    /// Resolve the base clock and divisor for `freq`
    ///
    /// Frequencies outside `MIN_FREQUENCY..=MAX_FREQUENCY` cannot be
    /// generated and are rejected.
    pub fn for_frequency(freq: u32) -> Result<Self> {
        if !(MIN_FREQUENCY..=MAX_FREQUENCY).contains(&freq) {
            return Err(Error::InvalidFrequency(freq));
        }

        let base = BaseClock::for_frequency(freq);
        let divisor = freq_to_divisor(base.hz(), freq);
        let frequency = divisor_to_freq(base.hz(), divisor);

        log::debug!(
            "Clock {} Hz: base {} Hz, divisor {}, actual {} Hz",
            freq,
            base.hz(),
            divisor,
            frequency
        );

        Ok(ClockSetting {
            base,
            divisor,
            frequency,
        })
    }

    /// Command bytes that program this clock: prescaler, then divisor
    pub fn commands(&self) -> [u8; 4] {
        let [lo, hi] = self.divisor.to_le_bytes();
        [self.base.command(), TCK_DIVISOR, lo, hi]
    }
}
