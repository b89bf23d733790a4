use std::fmt::{Display, Formatter};
use std::io;

use image::{ImageError, Rgba};
use qrcode::types::QrError;

use crate::code::MAX_CODE_SIZE;

// Error
//------------------------------------------------------------------------------

#[derive(Debug)]
pub enum WalletError {
    // Key
    KeyDerivation,

    // Code renderer
    Code(QrError),
    CodeSize(u32),

    // Template
    TemplateIo(io::Error),
    TemplateDecode(ImageError),
    RegionNotFound(Rgba<u8>),

    // Output
    OutputIo(io::Error),
    OutputEncode(ImageError),

    // Config
    InvalidColor(String),
}

impl Display for WalletError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            // Key
            Self::KeyDerivation => f.write_str("Cannot derive key pair from private key"),

            // Code renderer
            Self::Code(e) => write!(f, "Cannot encode QR code: {e}"),
            Self::CodeSize(sz) => {
                write!(f, "Code size {sz}px exceeds the {MAX_CODE_SIZE}px maximum")
            }

            // Template
            Self::TemplateIo(e) => write!(f, "Cannot read template: {e}"),
            Self::TemplateDecode(e) => write!(f, "Cannot decode template: {e}"),
            Self::RegionNotFound(Rgba([r, g, b, a])) => {
                write!(f, "No region with color ({r}, {g}, {b}, {a}) found in template")
            }

            // Output
            Self::OutputIo(e) => write!(f, "Cannot write wallet: {e}"),
            Self::OutputEncode(e) => write!(f, "Cannot encode wallet: {e}"),

            // Config
            Self::InvalidColor(s) => write!(f, "Invalid color {s:?}, expected RRGGBB or RRGGBBAA"),
        }
    }
}

impl std::error::Error for WalletError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Code(e) => Some(e),
            Self::TemplateIo(e) | Self::OutputIo(e) => Some(e),
            Self::TemplateDecode(e) | Self::OutputEncode(e) => Some(e),
            Self::KeyDerivation
            | Self::CodeSize(_)
            | Self::RegionNotFound(_)
            | Self::InvalidColor(_) => None,
        }
    }
}

impl From<QrError> for WalletError {
    fn from(e: QrError) -> Self {
        Self::Code(e)
    }
}

pub type WalletResult<T> = Result<T, WalletError>;
