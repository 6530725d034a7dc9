//! Core types for the layout stage

/// A 2D point in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if `other` lies entirely inside this box, allowing `tolerance`
    /// pixels of slack on each edge for floating point error
    pub fn contains_box(&self, other: &BoundingBox, tolerance: f64) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.right() <= self.right() + tolerance
            && other.bottom() <= self.bottom() + tolerance
    }
}

/// Pixel dimensions of an overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
}

impl Footprint {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A zero-sized footprint
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// True when the footprint covers no area (zero, negative or NaN sides)
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Footprint used when drawing the overlay: a 1x1 box stands in for an
    /// empty one so the nested viewport never collapses
    pub fn drawable(&self) -> Footprint {
        if self.is_empty() {
            Footprint::new(1.0, 1.0)
        } else {
            *self
        }
    }
}

/// Rectangle of grid cells that is left undrawn, in half-open cell coordinates
///
/// Bounds are signed: an overlay larger than the symbol yields a zone that
/// starts before column 0 and ends after column N.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusionZone {
    pub start_x: i64,
    pub start_y: i64,
    pub end_x: i64,
    pub end_y: i64,
}

impl ExclusionZone {
    /// The zone that contains no cell
    pub fn empty() -> Self {
        Self {
            start_x: 0,
            start_y: 0,
            end_x: 0,
            end_y: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end_x <= self.start_x || self.end_y <= self.start_y
    }

    /// Whether cell (x, y) is excluded
    pub fn contains(&self, x: usize, y: usize) -> bool {
        let (x, y) = (x as i64, y as i64);
        x >= self.start_x && x < self.end_x && y >= self.start_y && y < self.end_y
    }

    /// Width in cells
    pub fn width(&self) -> i64 {
        (self.end_x - self.start_x).max(0)
    }

    /// Height in cells
    pub fn height(&self) -> i64 {
        (self.end_y - self.start_y).max(0)
    }

    /// The zone expressed in canvas pixels
    pub fn to_pixels(&self, cell_size: f64, margin: f64) -> BoundingBox {
        BoundingBox::new(
            margin + self.start_x as f64 * cell_size,
            margin + self.start_y as f64 * cell_size,
            self.width() as f64 * cell_size,
            self.height() as f64 * cell_size,
        )
    }
}

impl Default for ExclusionZone {
    fn default() -> Self {
        Self::empty()
    }
}

/// Exclusion zone plus the overlay's pixel origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mask {
    pub zone: ExclusionZone,
    /// Top-left of the overlay, centered on the symbol without cell snapping
    pub origin: Point,
}

/// Everything the renderer needs besides the grid itself
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Canvas side length in pixels
    pub canvas: f64,
    /// Quiet margin on every side in pixels
    pub margin: f64,
    /// Side length N of the grid
    pub grid_size: usize,
    /// Side of one module in pixels
    pub cell_size: f64,
    /// Resolved overlay footprint, if an overlay was supplied
    pub footprint: Option<Footprint>,
    pub mask: Mask,
}

impl LayoutResult {
    /// Pixel box the overlay occupies, if any
    pub fn overlay_bounds(&self) -> Option<BoundingBox> {
        self.footprint.map(|fp| {
            BoundingBox::new(self.mask.origin.x, self.mask.origin.y, fp.width, fp.height)
        })
    }
}
