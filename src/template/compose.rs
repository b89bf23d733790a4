use std::borrow::Cow;

use image::{
    imageops::{self, FilterType},
    RgbaImage,
};
use log::debug;

use super::geometry::Rect;
use crate::code::RenderedCode;

// Blend
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Blend {
    /// Destination pixels are overwritten
    Replace,
    /// Source is alpha composited over the destination
    Over,
}

// Compositor
// Steps:
// 1. Copies the template onto a fresh canvas of the same size
// 2. Resamples the private key code into every private region and replaces the pixels
// 3. Resamples the address code into every address region and blends it over the canvas
//------------------------------------------------------------------------------

pub fn render(
    template: &RgbaImage,
    private_regions: &[Rect],
    address_regions: &[Rect],
    private_code: &RenderedCode,
    address_code: &RenderedCode,
) -> RgbaImage {
    let (w, h) = template.dimensions();
    let mut canvas = RgbaImage::new(w, h);
    imageops::replace(&mut canvas, template, 0, 0);

    for rect in private_regions {
        draw(&mut canvas, private_code.image(), rect, Blend::Replace);
    }

    for rect in address_regions {
        draw(&mut canvas, address_code.image(), rect, Blend::Over);
    }

    canvas
}

/// Resizes `src` to exactly fill `rect` and draws it onto `canvas`.
pub fn draw(canvas: &mut RgbaImage, src: &RgbaImage, rect: &Rect, blend: Blend) {
    let (w, h) = (rect.width(), rect.height());
    debug!("Drawing {w}x{h} code at ({}, {}) with {blend:?}", rect.min.x, rect.min.y);

    let resized = if src.dimensions() == (w, h) {
        Cow::Borrowed(src)
    } else {
        Cow::Owned(imageops::resize(src, w, h, FilterType::Lanczos3))
    };

    let (x, y) = (rect.min.x as i64, rect.min.y as i64);
    match blend {
        Blend::Replace => imageops::replace(canvas, &*resized, x, y),
        Blend::Over => imageops::overlay(canvas, &*resized, x, y),
    }
}

#[cfg(test)]
mod compose_tests {
    use image::{
        imageops::{self, FilterType},
        Rgba, RgbaImage,
    };

    use super::{draw, render, Blend};
    use crate::code::CodeBuilder;
    use crate::template::geometry::Rect;

    const BG: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn checker(sz: u32, alpha: u8) -> RgbaImage {
        RgbaImage::from_fn(sz, sz, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgba([10, 20, 30, alpha])
            } else {
                Rgba([200, 180, 160, alpha])
            }
        })
    }

    #[test]
    fn test_replace_copies_resized_pixels() {
        let src = checker(64, 255);
        let rect = Rect::at(7, 9, 10, 10);
        let mut canvas = RgbaImage::from_pixel(32, 32, BG);
        draw(&mut canvas, &src, &rect, Blend::Replace);

        let expected = imageops::resize(&src, 10, 10, FilterType::Lanczos3);
        for (x, y) in rect.pixels() {
            assert_eq!(canvas.get_pixel(x, y), expected.get_pixel(x - 7, y - 9));
        }
        assert_eq!(*canvas.get_pixel(6, 9), BG);
        assert_eq!(*canvas.get_pixel(17, 19), BG);
    }

    #[test]
    fn test_replace_ignores_alpha() {
        let src = checker(10, 0);
        let rect = Rect::at(0, 0, 10, 10);
        let mut canvas = RgbaImage::from_pixel(12, 12, BG);
        draw(&mut canvas, &src, &rect, Blend::Replace);
        for (x, y) in rect.pixels() {
            assert_eq!(canvas.get_pixel(x, y), src.get_pixel(x, y));
        }
    }

    #[test]
    fn test_over_opaque_source_replaces() {
        let src = checker(8, 255);
        let rect = Rect::at(2, 2, 8, 8);
        let mut canvas = RgbaImage::from_pixel(12, 12, Rgba([0, 128, 0, 255]));
        draw(&mut canvas, &src, &rect, Blend::Over);
        for (x, y) in rect.pixels() {
            assert_eq!(canvas.get_pixel(x, y), src.get_pixel(x - 2, y - 2));
        }
    }

    #[test]
    fn test_over_transparent_source_keeps_destination() {
        let src = checker(8, 0);
        let rect = Rect::at(2, 2, 8, 8);
        let dst = Rgba([0, 128, 0, 255]);
        let mut canvas = RgbaImage::from_pixel(12, 12, dst);
        draw(&mut canvas, &src, &rect, Blend::Over);
        assert!(canvas.pixels().all(|p| *p == dst));
    }

    #[test]
    fn test_render_keeps_template_outside_regions() {
        let template = RgbaImage::from_fn(120, 60, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        let private_code = CodeBuilder::new(b"private").size(64).build().unwrap();
        let address_code = CodeBuilder::new(b"address").size(64).build().unwrap();
        let private_rect = Rect::at(10, 10, 30, 30);
        let address_rect = Rect::at(70, 10, 30, 30);

        let wallet =
            render(&template, &[private_rect], &[address_rect], &private_code, &address_code);

        assert_eq!(wallet.dimensions(), template.dimensions());
        for (x, y, px) in wallet.enumerate_pixels() {
            if private_rect.contains(x, y) || address_rect.contains(x, y) {
                continue;
            }
            assert_eq!(px, template.get_pixel(x, y));
        }
        assert_ne!(wallet.get_pixel(10, 10), template.get_pixel(10, 10));
        assert_ne!(wallet.get_pixel(70, 10), template.get_pixel(70, 10));
    }

    #[test]
    fn test_render_no_regions_copies_template() {
        let template = RgbaImage::from_pixel(16, 16, Rgba([1, 2, 3, 4]));
        let code = CodeBuilder::new(b"x").build().unwrap();
        let wallet = render(&template, &[], &[], &code, &code);
        assert_eq!(wallet, template);
    }
}
