//! QR Overlay - QR codes as SVG with a logo in the middle
//!
//! The symbol is drawn as a single path of square modules. An optional
//! overlay graphic is centered on it, and every module under the overlay is
//! left out so the logo sits on a clean background.
//!
//! # Example
//!
//! ```rust
//! use qr_overlay::{render_with_config, EcLevel, Overlay, RenderConfig};
//!
//! let logo = Overlay::image("logo.png", 32, 32);
//! let config = RenderConfig::new().with_error_correction(EcLevel::H);
//!
//! let out = render_with_config("https://example.com", Some(&logo), &config).unwrap();
//! assert!(out.svg.contains("<svg"));
//! assert!(out.svg.contains("logo.png"));
//! ```

pub mod config;
pub mod diagnostics;
pub mod layout;
pub mod overlay;
pub mod renderer;
pub mod session;
pub mod symbol;

pub use config::ConfigError;
pub use diagnostics::{DiagnosticSink, RecordingSink, TracingSink};
pub use layout::{
    compute_layout, ExclusionZone, Footprint, LayoutError, LayoutResult, Mask, RenderParams,
};
pub use overlay::{LayoutSurface, Overlay, OverlayContent};
pub use renderer::SvgConfig;
pub use session::{MeasurementRequest, QrSession, RenderPass};
pub use symbol::{EcLevel, EncodingError, Grid, QrEncoder, SymbolProvider};

use thiserror::Error;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    /// The text could not be encoded as a symbol
    #[error("encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    /// The render parameters are unusable
    #[error("invalid render parameters: {0}")]
    Layout(#[from] LayoutError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderConfig {
    /// Canvas, colors and error correction
    pub params: RenderParams,
    /// SVG output configuration
    pub svg: SvgConfig,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the render parameters
    pub fn with_params(mut self, params: RenderParams) -> Self {
        self.params = params;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the canvas side length in pixels
    pub fn with_size(mut self, size: f64) -> Self {
        self.params.size = size;
        self
    }

    /// Set the margin in pixels
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.params.margin = margin;
        self
    }

    /// Set the error correction level
    pub fn with_error_correction(mut self, level: EcLevel) -> Self {
        self.params.error_correction = level;
        self
    }

    /// Set the foreground and background colors
    pub fn with_colors(
        mut self,
        foreground: impl Into<String>,
        background: impl Into<String>,
    ) -> Self {
        self.params.foreground = foreground.into();
        self.params.background = background.into();
        self
    }
}

/// A finished render
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// Complete SVG document
    pub svg: String,
    /// `d` attribute of the dark-module path
    pub module_path: String,
    /// Geometry the document was drawn from
    pub layout: LayoutResult,
}

/// Lay out and draw an already encoded grid
///
/// `footprint` is only used when an overlay is given. This is a pure
/// function: identical inputs give identical output.
pub fn compose(
    grid: &Grid,
    overlay: Option<&dyn OverlayContent>,
    footprint: Option<Footprint>,
    config: &RenderConfig,
) -> Result<Rendered, LayoutError> {
    let footprint = overlay.and(footprint);
    let layout = compute_layout(grid, &config.params, footprint)?;
    let module_path = renderer::layout_path(grid, &layout).to_svg_d();
    let svg = renderer::render_svg(&layout, &module_path, &config.params, overlay, &config.svg);

    Ok(Rendered {
        svg,
        module_path,
        layout,
    })
}

/// Encode and render, returning failures to the caller
///
/// The overlay is sized from its declared dimensions only. Overlays that
/// need measuring should go through [`QrSession`].
pub fn try_render(
    value: &str,
    overlay: Option<&dyn OverlayContent>,
    config: &RenderConfig,
) -> Result<Rendered, RenderError> {
    try_render_with(&QrEncoder, value, overlay, config)
}

/// Like [`try_render`] with a custom symbol provider
pub fn try_render_with<P: SymbolProvider + ?Sized>(
    provider: &P,
    value: &str,
    overlay: Option<&dyn OverlayContent>,
    config: &RenderConfig,
) -> Result<Rendered, RenderError> {
    config.params.validate()?;
    let grid = provider.encode(value, config.params.error_correction)?;
    let footprint = overlay.map(|content| content.declared_size().unwrap_or_else(Footprint::zero));
    Ok(compose(&grid, overlay, footprint, config)?)
}

/// Render with default configuration
///
/// Failures are logged through `tracing` and yield `None`.
pub fn render(value: &str) -> Option<Rendered> {
    render_with_config(value, None, &RenderConfig::default())
}

/// Render with custom configuration and an optional overlay
///
/// Failures are logged through `tracing` and yield `None`.
pub fn render_with_config(
    value: &str,
    overlay: Option<&dyn OverlayContent>,
    config: &RenderConfig,
) -> Option<Rendered> {
    render_reporting(&QrEncoder, &TracingSink, value, overlay, config)
}

/// Render, sending any failure to `sink` exactly once
pub fn render_reporting<P, D>(
    provider: &P,
    sink: &D,
    value: &str,
    overlay: Option<&dyn OverlayContent>,
    config: &RenderConfig,
) -> Option<Rendered>
where
    P: SymbolProvider + ?Sized,
    D: DiagnosticSink + ?Sized,
{
    match try_render_with(provider, value, overlay, config) {
        Ok(rendered) => Some(rendered),
        Err(err) => {
            sink.report(&err);
            None
        }
    }
}
