//! Layout stage: cell size and overlay exclusion zone
//!
//! This module takes a symbol grid, the render parameters and an optional
//! overlay footprint, and produces a LayoutResult the renderer can draw
//! without further arithmetic.

pub mod config;
pub mod error;
pub mod mask;
pub mod types;

pub use config::RenderParams;
pub use error::LayoutError;
pub use mask::compute_mask;
pub use types::*;

use crate::symbol::Grid;

/// Compute the layout for one render
///
/// This is a pure function of its inputs: the same grid, parameters and
/// footprint always give the same result.
pub fn compute_layout(
    grid: &Grid,
    params: &RenderParams,
    footprint: Option<Footprint>,
) -> Result<LayoutResult, LayoutError> {
    let cell_size = params.cell_size(grid.size())?;
    let mask = compute_mask(footprint, cell_size, grid.size(), params.margin);

    Ok(LayoutResult {
        canvas: params.size,
        margin: params.margin,
        grid_size: grid.size(),
        cell_size,
        footprint,
        mask,
    })
}
