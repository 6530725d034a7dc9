//! Exclusion zone computation
//!
//! The overlay footprint is converted to fractional cell units and centered
//! on the grid. The zone is then snapped outward to whole cells: `floor` on
//! the leading edge, `ceil` on the trailing edge. A partially covered module
//! is always excluded, never half drawn under the overlay.

use super::types::{ExclusionZone, Footprint, Mask, Point};

/// Compute the exclusion zone and overlay origin
///
/// `footprint` is in pixels. With no footprint, an empty one, or an unusable
/// `cell_size`, the zone is empty and the origin sits at `(margin, margin)`.
/// No clamping is applied: an overlay wider than the symbol produces a zone
/// extending past both edges of the grid.
pub fn compute_mask(
    footprint: Option<Footprint>,
    cell_size: f64,
    grid_size: usize,
    margin: f64,
) -> Mask {
    let degenerate = Mask {
        zone: ExclusionZone::empty(),
        origin: Point::new(margin, margin),
    };

    let footprint = match footprint {
        Some(fp) if !fp.is_empty() => fp,
        _ => return degenerate,
    };
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return degenerate;
    }

    let n = grid_size as f64;
    let cells_w = footprint.width / cell_size;
    let cells_h = footprint.height / cell_size;

    let start_xf = (n - cells_w) / 2.0;
    let start_yf = (n - cells_h) / 2.0;

    let zone = ExclusionZone {
        start_x: start_xf.floor() as i64,
        start_y: start_yf.floor() as i64,
        end_x: (start_xf + cells_w).ceil() as i64,
        end_y: (start_yf + cells_h).ceil() as i64,
    };

    Mask {
        zone,
        origin: Point::new(margin + start_xf * cell_size, margin + start_yf * cell_size),
    }
}
