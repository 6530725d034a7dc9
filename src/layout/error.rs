//! Error types for the layout stage

use thiserror::Error;

/// Render parameters that cannot produce a meaningful canvas
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// A numeric parameter is NaN or infinite
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    /// Margin below zero
    #[error("margin must not be negative, got {margin}")]
    NegativeMargin { margin: f64 },

    /// Margins leave no room for the symbol
    #[error("canvas size {size} must exceed twice the margin ({margin} on each side)")]
    CanvasTooSmall { size: f64, margin: f64 },

    /// A grid with no modules
    #[error("symbol grid is empty")]
    EmptyGrid,
}

impl LayoutError {
    /// Create a non-finite parameter error
    pub fn non_finite(name: &'static str, value: f64) -> Self {
        Self::NonFinite { name, value }
    }

    /// Create a canvas-too-small error
    pub fn canvas_too_small(size: f64, margin: f64) -> Self {
        Self::CanvasTooSmall { size, margin }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_too_small_display() {
        let err = LayoutError::canvas_too_small(8.0, 4.0);
        assert!(err.to_string().contains("canvas size 8"));
    }

    #[test]
    fn test_non_finite_display() {
        let err = LayoutError::non_finite("size", f64::INFINITY);
        assert_eq!(err.to_string(), "size must be a finite number, got inf");
    }
}
