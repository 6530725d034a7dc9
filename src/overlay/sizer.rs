//! Resolution of the overlay footprint
//!
//! Declared sizes win. Otherwise a measurement recorded for the same content
//! and cell size is reused. Failing both, the overlay is drawn at a
//! provisional size and the host is asked to measure it.

use crate::layout::Footprint;

use super::OverlayContent;

/// A host measurement, valid for one overlay at one cell size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub fingerprint: u64,
    pub cell_size: f64,
    pub footprint: Footprint,
}

/// Outcome of sizing an overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sizing {
    /// The content declares its own size
    Declared(Footprint),
    /// A cached measurement applies
    Measured(Footprint),
    /// No usable size yet; draw at `provisional` and request a measurement
    Pending { provisional: Footprint },
}

impl Sizing {
    /// Footprint to lay out with in this pass
    pub fn footprint(&self) -> Footprint {
        match self {
            Sizing::Declared(fp) | Sizing::Measured(fp) => *fp,
            Sizing::Pending { provisional } => *provisional,
        }
    }

    pub fn needs_measurement(&self) -> bool {
        matches!(self, Sizing::Pending { .. })
    }
}

/// Holds the most recent measurement across renders
#[derive(Debug, Clone, Default)]
pub struct OverlaySizer {
    cache: Option<Measurement>,
}

impl OverlaySizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide the footprint for `content` at `cell_size`
    pub fn resolve<C: OverlayContent + ?Sized>(&self, content: &C, cell_size: f64) -> Sizing {
        if let Some(declared) = content.declared_size() {
            return Sizing::Declared(declared);
        }

        let fingerprint = content.fingerprint();
        match &self.cache {
            Some(m) if m.fingerprint == fingerprint && m.cell_size == cell_size => {
                Sizing::Measured(m.footprint)
            }
            // Same content at a new cell size: keep the old size until remeasured
            Some(m) if m.fingerprint == fingerprint => Sizing::Pending {
                provisional: m.footprint,
            },
            _ => Sizing::Pending {
                provisional: Footprint::zero(),
            },
        }
    }

    /// Store a measurement. Empty measurements are not cached, so the next
    /// render asks for a fresh one. Returns whether the cache changed.
    pub fn record<C: OverlayContent + ?Sized>(
        &mut self,
        content: &C,
        cell_size: f64,
        footprint: Footprint,
    ) -> bool {
        if footprint.is_empty() {
            return false;
        }
        self.cache = Some(Measurement {
            fingerprint: content.fingerprint(),
            cell_size,
            footprint,
        });
        true
    }

    pub fn cached(&self) -> Option<&Measurement> {
        self.cache.as_ref()
    }

    pub fn clear(&mut self) {
        self.cache = None;
    }
}
