//! Render parameters consumed by the layout stage

use serde::Deserialize;

use crate::symbol::EcLevel;

use super::LayoutError;

/// Caller-supplied parameters for one render
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// Canvas side length in pixels
    pub size: f64,

    /// Quiet margin applied to all four sides, in pixels
    pub margin: f64,

    /// Fill color of dark modules
    pub foreground: String,

    /// Fill color of the canvas
    pub background: String,

    /// Error correction level handed to the symbol provider
    pub error_correction: EcLevel,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            size: 128.0,
            margin: 4.0,
            foreground: "#000".to_string(),
            background: "#fff".to_string(),
            error_correction: EcLevel::L,
        }
    }
}

impl RenderParams {
    /// Create parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas side length
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set the margin
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the foreground color
    pub fn with_foreground(mut self, color: impl Into<String>) -> Self {
        self.foreground = color.into();
        self
    }

    /// Set the background color
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }

    /// Set the error correction level
    pub fn with_error_correction(mut self, level: EcLevel) -> Self {
        self.error_correction = level;
        self
    }

    /// Reject parameters that leave no drawable area
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.size.is_finite() {
            return Err(LayoutError::non_finite("size", self.size));
        }
        if !self.margin.is_finite() {
            return Err(LayoutError::non_finite("margin", self.margin));
        }
        if self.margin < 0.0 {
            return Err(LayoutError::NegativeMargin {
                margin: self.margin,
            });
        }
        if self.size <= 2.0 * self.margin {
            return Err(LayoutError::canvas_too_small(self.size, self.margin));
        }
        Ok(())
    }

    /// Side of one module for a grid of side `grid_size`
    pub fn cell_size(&self, grid_size: usize) -> Result<f64, LayoutError> {
        self.validate()?;
        if grid_size == 0 {
            return Err(LayoutError::EmptyGrid);
        }
        Ok((self.size - 2.0 * self.margin) / grid_size as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = RenderParams::default();
        assert_eq!(params.size, 128.0);
        assert_eq!(params.margin, 4.0);
        assert_eq!(params.foreground, "#000");
        assert_eq!(params.background, "#fff");
        assert_eq!(params.error_correction, EcLevel::L);
    }

    #[test]
    fn test_builder_pattern() {
        let params = RenderParams::new()
            .with_size(256.0)
            .with_margin(8.0)
            .with_foreground("navy")
            .with_error_correction(EcLevel::H);

        assert_eq!(params.size, 256.0);
        assert_eq!(params.margin, 8.0);
        assert_eq!(params.foreground, "navy");
        assert_eq!(params.error_correction, EcLevel::H);
    }

    #[test]
    fn test_cell_size() {
        let params = RenderParams::default();
        assert_eq!(params.cell_size(24).unwrap(), 5.0);
        assert_eq!(params.cell_size(25).unwrap(), 4.8);
    }

    #[test]
    fn test_zero_margin_is_valid() {
        let params = RenderParams::new().with_margin(0.0).with_size(21.0);
        assert_eq!(params.cell_size(21).unwrap(), 1.0);
    }

    #[test]
    fn test_rejects_canvas_smaller_than_margins() {
        let params = RenderParams::new().with_size(8.0).with_margin(4.0);
        assert_eq!(
            params.validate(),
            Err(LayoutError::canvas_too_small(8.0, 4.0))
        );
    }

    #[test]
    fn test_rejects_negative_and_non_finite() {
        assert!(matches!(
            RenderParams::new().with_margin(-1.0).validate(),
            Err(LayoutError::NegativeMargin { .. })
        ));
        assert!(matches!(
            RenderParams::new().with_size(f64::NAN).validate(),
            Err(LayoutError::NonFinite { name: "size", .. })
        ));
        assert!(matches!(
            RenderParams::new().with_size(-10.0).validate(),
            Err(LayoutError::CanvasTooSmall { .. })
        ));
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert_eq!(
            RenderParams::default().cell_size(0),
            Err(LayoutError::EmptyGrid)
        );
    }
}
