//! Module path rendering
//!
//! Every dark module outside the exclusion zone becomes one closed square
//! subpath. Subpaths are concatenated without separators.

use crate::layout::{ExclusionZone, LayoutResult, Point};
use crate::symbol::Grid;

/// A segment in a resolved path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Move to an absolute point
    MoveTo(Point),
    /// Relative horizontal line
    HorizontalBy(f64),
    /// Relative vertical line
    VerticalBy(f64),
    /// Close path back to the last move
    Close,
}

/// A resolved path ready for SVG rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPath {
    pub segments: Vec<PathSegment>,
}

impl ResolvedPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a closed square with its top-left corner at `origin`
    pub fn push_square(&mut self, origin: Point, side: f64) {
        self.segments.extend([
            PathSegment::MoveTo(origin),
            PathSegment::HorizontalBy(side),
            PathSegment::VerticalBy(side),
            PathSegment::HorizontalBy(-side),
            PathSegment::Close,
        ]);
    }

    /// Number of independent subpaths
    pub fn subpath_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|seg| matches!(seg, PathSegment::MoveTo(_)))
            .count()
    }

    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();
        for seg in &self.segments {
            match seg {
                PathSegment::MoveTo(p) => d.push_str(&format!("M{},{}", p.x, p.y)),
                PathSegment::HorizontalBy(dx) => d.push_str(&format!("h{}", dx)),
                PathSegment::VerticalBy(dy) => d.push_str(&format!("v{}", dy)),
                PathSegment::Close => d.push('z'),
            }
        }
        d
    }
}

/// Path of all dark modules outside `zone`, in row-major order
pub fn module_path(
    grid: &Grid,
    cell_size: f64,
    margin: f64,
    zone: &ExclusionZone,
) -> ResolvedPath {
    let mut path = ResolvedPath::new();
    for y in 0..grid.size() {
        for x in 0..grid.size() {
            if zone.contains(x, y) || !grid.is_dark(x, y) {
                continue;
            }
            let origin = Point::new(
                margin + x as f64 * cell_size,
                margin + y as f64 * cell_size,
            );
            path.push_square(origin, cell_size);
        }
    }
    path
}

/// Module path for a computed layout
pub fn layout_path(grid: &Grid, layout: &LayoutResult) -> ResolvedPath {
    module_path(grid, layout.cell_size, layout.margin, &layout.mask.zone)
}

/// Square covering the whole canvas
pub fn background_path(size: f64) -> ResolvedPath {
    let mut path = ResolvedPath::new();
    path.push_square(Point::new(0.0, 0.0), size);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn checker() -> Grid {
        Grid::from_rows(vec![
            vec![true, false, true],
            vec![false, true, false],
            vec![true, false, true],
        ])
        .unwrap()
    }

    #[test]
    fn test_square_svg_output() {
        let mut path = ResolvedPath::new();
        path.push_square(Point::new(4.0, 4.0), 4.8);
        assert_eq!(path.to_svg_d(), "M4,4h4.8v4.8h-4.8z");
        assert_eq!(path.subpath_count(), 1);
    }

    #[test]
    fn test_background_path() {
        assert_eq!(background_path(128.0).to_svg_d(), "M0,0h128v128h-128z");
    }

    #[test]
    fn test_empty_path() {
        let path = ResolvedPath::new();
        assert_eq!(path.to_svg_d(), "");
        assert_eq!(path.subpath_count(), 0);
    }

    #[test]
    fn test_module_path_row_major() {
        let path = module_path(&checker(), 10.0, 2.0, &ExclusionZone::empty());
        assert_eq!(path.subpath_count(), 5);
        assert_snapshot!(
            path.to_svg_d(),
            @"M2,2h10v10h-10zM22,2h10v10h-10zM12,12h10v10h-10zM2,22h10v10h-10zM22,22h10v10h-10z"
        );
    }

    #[test]
    fn test_module_path_skips_zone() {
        let zone = ExclusionZone {
            start_x: 1,
            start_y: 1,
            end_x: 2,
            end_y: 2,
        };
        let path = module_path(&checker(), 10.0, 0.0, &zone);
        assert_eq!(path.subpath_count(), 4);
        assert!(!path.to_svg_d().contains("M10,10"));
    }

    #[test]
    fn test_oversized_zone_skips_everything() {
        let zone = ExclusionZone {
            start_x: -5,
            start_y: -5,
            end_x: 8,
            end_y: 8,
        };
        let path = module_path(&checker(), 10.0, 0.0, &zone);
        assert_eq!(path.to_svg_d(), "");
    }
}
