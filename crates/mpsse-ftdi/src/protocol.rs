//! FTDI USB identifiers and channel selection

/// FTDI vendor ID
pub const FTDI_VID: u16 = 0x0403;

/// FT2232H product ID (dual channel)
pub const FTDI_FT2232H_PID: u16 = 0x6010;

/// FT4232H product ID (quad channel)
pub const FTDI_FT4232H_PID: u16 = 0x6011;

/// FT232H product ID (single channel)
pub const FTDI_FT232H_PID: u16 = 0x6014;

/// Default latency timer in milliseconds
pub const DEFAULT_LATENCY_MS: u8 = 2;

/// Default clock frequency (1 MHz)
pub const DEFAULT_FREQUENCY: u32 = 1_000_000;

/// FTDI chips with an MPSSE engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FtdiDeviceType {
    /// FT2232H (dual channel)
    #[default]
    Ft2232H,
    /// FT4232H (quad channel)
    Ft4232H,
    /// FT232H (single channel)
    Ft232H,
}

impl FtdiDeviceType {
    /// Get the product ID for this device type
    pub fn product_id(&self) -> u16 {
        match self {
            FtdiDeviceType::Ft2232H => FTDI_FT2232H_PID,
            FtdiDeviceType::Ft4232H => FTDI_FT4232H_PID,
            FtdiDeviceType::Ft232H => FTDI_FT232H_PID,
        }
    }

    /// Parse device type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "2232h" | "ft2232h" => Some(FtdiDeviceType::Ft2232H),
            "4232h" | "ft4232h" => Some(FtdiDeviceType::Ft4232H),
            "232h" | "ft232h" => Some(FtdiDeviceType::Ft232H),
            _ => None,
        }
    }

    /// Identify a known device type from its USB IDs
    pub fn from_ids(vendor_id: u16, product_id: u16) -> Option<Self> {
        if vendor_id != FTDI_VID {
            return None;
        }
        match product_id {
            FTDI_FT2232H_PID => Some(FtdiDeviceType::Ft2232H),
            FTDI_FT4232H_PID => Some(FtdiDeviceType::Ft4232H),
            FTDI_FT232H_PID => Some(FtdiDeviceType::Ft232H),
            _ => None,
        }
    }

    /// Get the name of this device type
    pub fn name(&self) -> &'static str {
        match self {
            FtdiDeviceType::Ft2232H => "FT2232H",
            FtdiDeviceType::Ft4232H => "FT4232H",
            FtdiDeviceType::Ft232H => "FT232H",
        }
    }
}

/// FTDI interface/channel selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FtdiInterface {
    /// Channel A (default)
    #[default]
    A,
    /// Channel B
    B,
    /// Channel C
    C,
    /// Channel D
    D,
}

impl FtdiInterface {
    /// Parse interface from character
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(FtdiInterface::A),
            'B' => Some(FtdiInterface::B),
            'C' => Some(FtdiInterface::C),
            'D' => Some(FtdiInterface::D),
            _ => None,
        }
    }

    /// Map a positional interface index: 1-4 select A-D, anything else
    /// selects the default channel
    pub fn from_index(index: i32) -> Self {
        match index {
            2 => FtdiInterface::B,
            3 => FtdiInterface::C,
            4 => FtdiInterface::D,
            _ => FtdiInterface::A,
        }
    }

    /// Get the channel letter
    pub fn letter(&self) -> char {
        match self {
            FtdiInterface::A => 'A',
            FtdiInterface::B => 'B',
            FtdiInterface::C => 'C',
            FtdiInterface::D => 'D',
        }
    }
}
