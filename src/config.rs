use std::path::PathBuf;

use image::Rgba;

use crate::code::DEFAULT_CODE_SIZE;
use crate::error::{WalletError, WalletResult};

pub const DEFAULT_PRIVATE_MARKER: Rgba<u8> = Rgba([213, 213, 255, 255]);
pub const DEFAULT_ADDRESS_MARKER: Rgba<u8> = Rgba([213, 255, 246, 255]);

// Markers
//------------------------------------------------------------------------------

/// Placeholder colors searched for in the template.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Markers {
    pub private: Rgba<u8>,
    pub address: Rgba<u8>,
}

impl Default for Markers {
    fn default() -> Self {
        Self { private: DEFAULT_PRIVATE_MARKER, address: DEFAULT_ADDRESS_MARKER }
    }
}

// Wallet config
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct WalletConfig {
    pub template: Option<PathBuf>,
    pub out: PathBuf,
    pub borders: bool,
    pub code_size: u32,
    pub markers: Markers,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            template: None,
            out: PathBuf::from("wallet"),
            borders: true,
            code_size: DEFAULT_CODE_SIZE,
            markers: Markers::default(),
        }
    }
}

/// Parses `RRGGBB` or `RRGGBBAA`, with an optional leading `#`. Alpha defaults to opaque.
pub fn parse_color(s: &str) -> WalletResult<Rgba<u8>> {
    let invalid = || WalletError::InvalidColor(s.to_string());
    let hex_str = s.strip_prefix('#').unwrap_or(s);
    if !matches!(hex_str.len(), 6 | 8) {
        return Err(invalid());
    }

    let bytes = hex::decode(hex_str).map_err(|_| invalid())?;
    let alpha = bytes.get(3).copied().unwrap_or(255);
    Ok(Rgba([bytes[0], bytes[1], bytes[2], alpha]))
}
