//! SVG renderer for generating output from layout results
//!
//! This module walks the symbol grid to build the module path and wraps it,
//! together with the background and overlay, into an SVG document.

pub mod config;
pub mod path;
pub mod svg;

pub use config::SvgConfig;
pub use path::{background_path, layout_path, module_path, PathSegment, ResolvedPath};
pub use svg::{render_svg, SvgBuilder};
