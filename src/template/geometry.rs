// Point
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

// Rect
//------------------------------------------------------------------------------

/// Axis aligned rectangle with inclusive corners, so `min == max` is a single pixel.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(min: Point, max: Point) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y,
            "Rect corners out of order: {min:?} {max:?}"
        );
        Self { min, max }
    }

    pub fn at(x: u32, y: u32, w: u32, h: u32) -> Self {
        debug_assert!(w > 0 && h > 0, "Rect must be at least 1x1");
        Self::new(Point::new(x, y), Point::new(x + w - 1, y + h - 1))
    }

    /// Smallest rect containing both points, whatever their order.
    pub fn spanning(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> u32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> u32 {
        self.max.y - self.min.y + 1
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.min.x..=self.max.x).contains(&x) && (self.min.y..=self.max.y).contains(&y)
    }

    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.min.y..=self.max.y).flat_map(move |y| (self.min.x..=self.max.x).map(move |x| (x, y)))
    }
}
