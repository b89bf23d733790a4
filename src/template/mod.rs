mod compose;
mod geometry;
mod scan;

pub use compose::{draw, render, Blend};
pub use geometry::{Point, Rect};
pub use scan::{find_regions, RegionSet};

use std::fs;
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::{
    drawing::{draw_filled_rect_mut, draw_hollow_rect_mut},
    rect::Rect as ImgRect,
};
use log::{debug, info};

use crate::code::RenderedCode;
use crate::config::Markers;
use crate::error::{WalletError, WalletResult};

// Template
//------------------------------------------------------------------------------

/// Background image of a paper wallet. Solid rectangles painted in the marker colors are
/// replaced by the QR codes.
#[derive(Debug, Clone)]
pub struct Template {
    image: RgbaImage,
}

impl Template {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Loads the template at `path`, or the built-in one when no path is given.
    pub fn load(path: Option<&Path>) -> WalletResult<Self> {
        match path {
            Some(p) if !p.as_os_str().is_empty() => Self::open(p),
            _ => {
                info!("Using built-in template");
                Ok(Self::embedded())
            }
        }
    }

    pub fn open(path: &Path) -> WalletResult<Self> {
        info!("Loading template {}", path.display());
        let bytes = fs::read(path).map_err(WalletError::TemplateIo)?;
        Self::from_png(&bytes)
    }

    pub fn from_png(bytes: &[u8]) -> WalletResult<Self> {
        let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map_err(WalletError::TemplateDecode)?;
        Ok(Self::new(img.to_rgba8()))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn find_regions(&self, color: Rgba<u8>) -> RegionSet {
        find_regions(&self.image, color)
    }

    /// Places the private key code on every private marker and the address code on every
    /// address marker. Fails with [`WalletError::RegionNotFound`] if either marker color is
    /// missing from the template.
    pub fn generate(
        &self,
        private_code: &RenderedCode,
        address_code: &RenderedCode,
        markers: Markers,
    ) -> WalletResult<RgbaImage> {
        let private_regions = self.find_regions(markers.private);
        if private_regions.is_empty() {
            return Err(WalletError::RegionNotFound(markers.private));
        }

        let address_regions = self.find_regions(markers.address);
        if address_regions.is_empty() {
            return Err(WalletError::RegionNotFound(markers.address));
        }

        debug!(
            "Found {} private and {} address regions",
            private_regions.len(),
            address_regions.len()
        );
        Ok(render(&self.image, &private_regions, &address_regions, private_code, address_code))
    }
}

// Built-in template
//------------------------------------------------------------------------------

pub const EMBEDDED_WIDTH: u32 = 1600;
pub const EMBEDDED_HEIGHT: u32 = 800;
pub const EMBEDDED_PRIVATE_REGION: (i32, i32, u32) = (140, 220, 460);
pub const EMBEDDED_ADDRESS_REGION: (i32, i32, u32) = (1000, 220, 460);

const PAPER: Rgba<u8> = Rgba([250, 250, 247, 255]);
const INK: Rgba<u8> = Rgba([40, 40, 40, 255]);
const FOLD: Rgba<u8> = Rgba([190, 190, 190, 255]);
const PRIVATE_BAND: Rgba<u8> = Rgba([70, 70, 140, 255]);
const ADDRESS_BAND: Rgba<u8> = Rgba([60, 130, 120, 255]);

impl Template {
    /// Two panels separated by a dashed fold line, each holding a framed placeholder in the
    /// default marker colors.
    pub fn embedded() -> Self {
        let markers = Markers::default();
        let mut img = RgbaImage::from_pixel(EMBEDDED_WIDTH, EMBEDDED_HEIGHT, PAPER);

        // Header bands; must not use a marker color
        let band = ImgRect::at(0, 0).of_size(EMBEDDED_WIDTH / 2, 120);
        draw_filled_rect_mut(&mut img, band, PRIVATE_BAND);
        draw_filled_rect_mut(
            &mut img,
            ImgRect::at(EMBEDDED_WIDTH as i32 / 2, 0).of_size(EMBEDDED_WIDTH / 2, 120),
            ADDRESS_BAND,
        );
        draw_filled_rect_mut(&mut img, ImgRect::at(0, 120).of_size(EMBEDDED_WIDTH, 6), INK);

        // Fold line
        let fold_x = EMBEDDED_WIDTH as i32 / 2;
        for y in (140..EMBEDDED_HEIGHT as i32 - 20).step_by(24) {
            draw_filled_rect_mut(&mut img, ImgRect::at(fold_x - 1, y).of_size(2, 12), FOLD);
        }

        for ((x, y, sz), clr) in [
            (EMBEDDED_PRIVATE_REGION, markers.private),
            (EMBEDDED_ADDRESS_REGION, markers.address),
        ] {
            let frame = ImgRect::at(x - 12, y - 12).of_size(sz + 24, sz + 24);
            draw_hollow_rect_mut(&mut img, frame, INK);
            draw_filled_rect_mut(&mut img, ImgRect::at(x, y).of_size(sz, sz), clr);
        }

        Self::new(img)
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::embedded()
    }
}
