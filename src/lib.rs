//! # ethpaper
//!
//! Generates Ethereum paper wallets: a fresh secp256k1 key is rendered as two QR codes, one
//! for the private key and one for the checksummed address, which are composited onto a
//! template image.
//!
//! ## Templates
//!
//! A template is any PNG containing solid, axis aligned rectangles painted in the marker
//! colors. The default markers are `#d5d5ff` for the private key and `#d5fff6` for the
//! address. Every marker rectangle is replaced by the matching code, resized to fill it.
//!
//! Markers are found by scanning columns left to right, so two placeholders of the same color
//! must be separated by at least one column without that color. A placeholder touching the
//! right edge of the template is not detected.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ethpaper::{build_wallet, save_png, EthKey, WalletConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let key = EthKey::generate();
//! let config = WalletConfig::default();
//!
//! let wallet = build_wallet(&key, &config)?;
//! let path = save_png(&config.out, &wallet)?;
//! println!("Saved: {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod code;
pub mod config;
pub mod error;
pub mod key;
pub mod template;

pub use code::{CodeBuilder, RenderedCode};
pub use config::{parse_color, Markers, WalletConfig};
pub use error::{WalletError, WalletResult};
pub use key::EthKey;
pub use template::{find_regions, render, Point, Rect, RegionSet, Template};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ImageError, ImageFormat, RgbaImage};
use log::info;

// Pipeline
//------------------------------------------------------------------------------

pub fn build_wallet(key: &EthKey, config: &WalletConfig) -> WalletResult<RgbaImage> {
    info!("Rendering private key code...");
    let private_code = CodeBuilder::new(key.private().as_bytes())
        .size(config.code_size)
        .borders(config.borders)
        .build()?;

    info!("Rendering address code...");
    let address_code = CodeBuilder::new(key.address().as_bytes())
        .size(config.code_size)
        .borders(config.borders)
        .build()?;

    let template = Template::load(config.template.as_deref())?;

    info!("Compositing wallet...");
    template.generate(&private_code, &address_code, config.markers)
}

/// Writes `img` to `<out>.png` and returns the written path.
pub fn save_png(out: &Path, img: &RgbaImage) -> WalletResult<PathBuf> {
    let mut name = out.as_os_str().to_owned();
    name.push(".png");
    let path = PathBuf::from(name);

    let file = File::create(&path).map_err(WalletError::OutputIo)?;
    let mut writer = BufWriter::new(file);
    img.write_to(&mut writer, ImageFormat::Png).map_err(|e| match e {
        ImageError::IoError(e) => WalletError::OutputIo(e),
        e => WalletError::OutputEncode(e),
    })?;
    writer.flush().map_err(WalletError::OutputIo)?;

    Ok(path)
}
