use image::{Rgba, RgbaImage};
use log::debug;
use qrcode::{Color, EcLevel, QrCode};

use crate::error::{WalletError, WalletResult};
use crate::template::{Point, Rect};

pub const DEFAULT_CODE_SIZE: u32 = 1024;
pub const MAX_CODE_SIZE: u32 = 8192;
pub const QUIET_ZONE: u32 = 4;
pub const LIGHT: Rgba<u8> = Rgba([240, 240, 240, 255]);
pub const DARK: Rgba<u8> = Rgba([40, 40, 40, 255]);

// Rendered code
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RenderedCode {
    image: RgbaImage,
    modules: u32,
    bordered: bool,
}

impl RenderedCode {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn modules(&self) -> u32 {
        self.modules
    }

    pub fn is_bordered(&self) -> bool {
        self.bordered
    }

    /// Area of the canvas covered by modules, excluding the quiet zone and the padding left
    /// over when the size is not a multiple of the module count.
    pub fn content_bounds(&self) -> Rect {
        let (ppm, offset) = layout(self.size(), self.modules, self.bordered);
        let start = offset + self.quiet_zone() * ppm;
        let end = start + self.modules * ppm - 1;
        Rect::new(Point::new(start, start), Point::new(end, end))
    }

    fn quiet_zone(&self) -> u32 {
        if self.bordered {
            QUIET_ZONE
        } else {
            0
        }
    }
}

// Returns pixels per module and the offset centering the symbol on the canvas
fn layout(size: u32, modules: u32, bordered: bool) -> (u32, u32) {
    let quiet = if bordered { QUIET_ZONE } else { 0 };
    let real_sz = modules + 2 * quiet;
    let size = size.max(real_sz);
    let ppm = size / real_sz;
    let offset = (size - real_sz * ppm) / 2;
    (ppm, offset)
}

// Code builder
//------------------------------------------------------------------------------

pub struct CodeBuilder<'a> {
    data: &'a [u8],
    size: u32,
    borders: bool,
}

impl<'a> CodeBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, size: DEFAULT_CODE_SIZE, borders: true }
    }

    pub fn size(&mut self, size: u32) -> &mut Self {
        self.size = size;
        self
    }

    pub fn borders(&mut self, borders: bool) -> &mut Self {
        self.borders = borders;
        self
    }

    pub fn build(&self) -> WalletResult<RenderedCode> {
        if self.size > MAX_CODE_SIZE {
            return Err(WalletError::CodeSize(self.size));
        }

        let code = QrCode::with_error_correction_level(self.data, EcLevel::H)?;
        let modules = code.width() as u32;
        let colors = code.to_colors();

        let quiet = if self.borders { QUIET_ZONE } else { 0 };
        let size = self.size.max(modules + 2 * quiet);
        let (ppm, offset) = layout(size, modules, self.borders);
        let qr_start = offset + quiet * ppm;
        let qr_end = qr_start + modules * ppm;
        debug!("Rendering {modules}x{modules} code at {ppm}px per module on a {size}px canvas");

        let mut canvas = RgbaImage::from_pixel(size, size, LIGHT);
        for (x, y, px) in canvas.enumerate_pixels_mut() {
            if x < qr_start || x >= qr_end || y < qr_start || y >= qr_end {
                continue;
            }
            let c = (x - qr_start) / ppm;
            let r = (y - qr_start) / ppm;
            if colors[(r * modules + c) as usize] == Color::Dark {
                *px = DARK;
            }
        }

        Ok(RenderedCode { image: canvas, modules, bordered: self.borders })
    }
}

#[cfg(test)]
mod code_tests {
    use image::{Rgba, RgbaImage};
    use qrcode::types::QrError;
    use test_case::test_case;

    use super::{CodeBuilder, DARK, LIGHT, MAX_CODE_SIZE};
    use crate::error::WalletError;

    fn decode_luma(img: &RgbaImage) -> Vec<String> {
        let (w, h) = img.dimensions();
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
                let Rgba([r, g, b, _]) = *img.get_pixel(x as u32, y as u32);
                ((r as u32 + g as u32 + b as u32) / 3) as u8
            });
        prepared.detect_grids().iter().filter_map(|g| g.decode().ok()).map(|(_, s)| s).collect()
    }

    #[test_case("4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318")]
    #[test_case("0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf")]
    fn test_render_decodes(data: &str) {
        let code = CodeBuilder::new(data.as_bytes()).build().unwrap();
        assert_eq!(code.image().dimensions(), (1024, 1024));
        assert_eq!(decode_luma(code.image()), vec![data.to_string()]);
    }

    #[test]
    fn test_two_color_palette() {
        let code = CodeBuilder::new(b"palette").build().unwrap();
        assert!(code.image().pixels().all(|p| *p == LIGHT || *p == DARK));
        assert_eq!(*code.image().get_pixel(0, 0), LIGHT);
    }

    #[test]
    fn test_border_shrinks_content() {
        let data = b"0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";
        let bordered = CodeBuilder::new(data).build().unwrap();
        let borderless = CodeBuilder::new(data).borders(false).build().unwrap();

        assert_eq!(bordered.modules(), borderless.modules());
        assert!(bordered.is_bordered());
        assert!(!borderless.is_bordered());
        assert!(bordered.content_bounds().width() < borderless.content_bounds().width());

        // Finder pattern corner is dark and sits at the content origin
        let origin = bordered.content_bounds().min;
        assert_eq!(*bordered.image().get_pixel(origin.x, origin.y), DARK);
        assert_eq!(*bordered.image().get_pixel(origin.x - 1, origin.y - 1), LIGHT);
    }

    #[test]
    fn test_content_bounds_centered() {
        let code = CodeBuilder::new(b"centered").size(1000).build().unwrap();
        let bounds = code.content_bounds();
        let left = bounds.min.x;
        let right = code.size() - 1 - bounds.max.x;
        assert!(left.abs_diff(right) <= 1);
    }

    #[test]
    fn test_size_below_module_count() {
        let code = CodeBuilder::new(b"tiny").size(1).build().unwrap();
        assert_eq!(code.size(), code.modules() + 8);
        assert_eq!(code.content_bounds().width(), code.modules());
    }

    #[test_case(MAX_CODE_SIZE + 1)]
    #[test_case(100_000)]
    fn test_size_above_maximum(size: u32) {
        let res = CodeBuilder::new(b"oversized").size(size).build();
        assert!(matches!(res, Err(WalletError::CodeSize(s)) if s == size));
    }

    #[test]
    fn test_data_too_long() {
        let data = "f".repeat(4096);
        let res = CodeBuilder::new(data.as_bytes()).build();
        assert!(matches!(res, Err(WalletError::Code(QrError::DataTooLong))));
    }
}
