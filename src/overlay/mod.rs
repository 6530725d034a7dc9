//! Overlay content and sizing
//!
//! An overlay is opaque SVG markup. Its footprint comes from declared
//! attributes when present, else from a measurement supplied by the host
//! after the overlay has been laid out once.

pub mod content;
pub mod sizer;

pub use content::{parse_number, parse_view_box, Dimension, Overlay, OverlayContent};
pub use sizer::{Measurement, OverlaySizer, Sizing};

use crate::layout::Footprint;

/// Host capability that can measure overlay content after layout
///
/// `provisional` is the footprint the overlay was drawn at in the pass being
/// measured. Returning `None` means no layout surface is available.
pub trait LayoutSurface {
    fn measured_size(&self, content: &dyn OverlayContent, provisional: Footprint)
        -> Option<Footprint>;
}

impl<F> LayoutSurface for F
where
    F: Fn(&dyn OverlayContent, Footprint) -> Option<Footprint>,
{
    fn measured_size(
        &self,
        content: &dyn OverlayContent,
        provisional: Footprint,
    ) -> Option<Footprint> {
        self(content, provisional)
    }
}
