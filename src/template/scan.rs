use image::{GenericImageView, Rgba};
use log::{debug, warn};

use super::geometry::{Point, Rect};

pub type RegionSet = Vec<Rect>;

// Region scan
// Steps:
// 1. Walks the image column by column, left to right, and each column top to bottom
// 2. The first matching pixel since the last flush starts a run and every later match
//    becomes its end, across columns
// 3. A column without any matching pixel closes the pending run into a rect
// Note: A run still open after the last column is dropped, so placeholders touching the
// right edge of the template are never reported
//------------------------------------------------------------------------------

pub fn find_regions<I>(img: &I, color: Rgba<u8>) -> RegionSet
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (w, h) = img.dimensions();
    let mut regions = Vec::new();
    let mut run: Option<(Point, Point)> = None;

    for x in 0..w {
        let mut col_has_color = false;
        for y in 0..h {
            if img.get_pixel(x, y) != color {
                continue;
            }
            col_has_color = true;

            let pt = Point::new(x, y);
            run = match run {
                Some((start, _)) => Some((start, pt)),
                None => Some((pt, pt)),
            };
        }

        if col_has_color {
            continue;
        }
        if let Some((start, end)) = run.take() {
            let rect = Rect::spanning(start, end);
            let (w, h) = (rect.width(), rect.height());
            debug!("Found {w}x{h} region at ({}, {})", rect.min.x, rect.min.y);
            regions.push(rect);
        }
    }

    if let Some((start, _)) = run {
        warn!(
            "Dropping region starting at ({}, {}): it reaches the right edge of the template",
            start.x, start.y
        );
    }

    regions
}
