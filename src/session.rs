//! Two-phase rendering for overlays that must be measured
//!
//! An overlay without a declared size is first drawn at a provisional
//! footprint. The host lays that document out, measures the overlay and hands
//! the result back through [`QrSession::apply_measurement`]. Each call to
//! [`QrSession::render`] starts a new generation; measurements for an older
//! generation are discarded, so the latest inputs always win.

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::layout::Footprint;
use crate::overlay::{LayoutSurface, OverlayContent, OverlaySizer};
use crate::symbol::{Grid, QrEncoder, SymbolProvider};
use crate::{compose, RenderConfig, RenderError, Rendered};

/// Ticket for the measurement a render pass is waiting on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementRequest {
    /// Render generation this request belongs to
    pub generation: u64,
    /// Footprint the overlay was drawn at in the provisional pass
    pub provisional: Footprint,
}

/// Result of one call to [`QrSession::render`]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    /// The rendered document, `None` when the render failed
    pub output: Option<Rendered>,
    /// Present when the overlay still has to be measured
    pub request: Option<MeasurementRequest>,
}

impl RenderPass {
    fn failed() -> Self {
        Self {
            output: None,
            request: None,
        }
    }
}

/// Inputs kept around until the measurement for them arrives
#[derive(Debug, Clone)]
struct PendingPass {
    generation: u64,
    grid: Grid,
    fingerprint: u64,
    cell_size: f64,
}

/// Stateful renderer holding the measurement cache between renders
pub struct QrSession<P = QrEncoder, D = TracingSink> {
    provider: P,
    diagnostics: D,
    config: RenderConfig,
    sizer: OverlaySizer,
    generation: u64,
    pending: Option<PendingPass>,
}

impl QrSession {
    /// Session using the `qrcode` encoder and `tracing` diagnostics
    pub fn new(config: RenderConfig) -> Self {
        Self::with_parts(QrEncoder, TracingSink, config)
    }
}

impl<P: SymbolProvider, D: DiagnosticSink> QrSession<P, D> {
    /// Session with a custom symbol provider and diagnostic sink
    pub fn with_parts(provider: P, diagnostics: D, config: RenderConfig) -> Self {
        Self {
            provider,
            diagnostics,
            config,
            sizer: OverlaySizer::new(),
            generation: 0,
            pending: None,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Replace the configuration. Any outstanding measurement becomes stale.
    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
        self.generation += 1;
        self.pending = None;
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn sizer(&self) -> &OverlaySizer {
        &self.sizer
    }

    /// Generation of the most recent render
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Render `value` with an optional overlay
    ///
    /// When the overlay has neither a declared size nor a cached measurement,
    /// the output uses a provisional footprint and the pass carries a
    /// [`MeasurementRequest`].
    pub fn render(&mut self, value: &str, overlay: Option<&dyn OverlayContent>) -> RenderPass {
        self.generation += 1;
        self.pending = None;
        let generation = self.generation;

        let grid = match self
            .provider
            .encode(value, self.config.params.error_correction)
        {
            Ok(grid) => grid,
            Err(err) => return self.fail(err.into()),
        };
        let cell_size = match self.config.params.cell_size(grid.size()) {
            Ok(cell_size) => cell_size,
            Err(err) => return self.fail(err.into()),
        };

        let Some(overlay) = overlay else {
            return match compose(&grid, None, None, &self.config) {
                Ok(rendered) => RenderPass {
                    output: Some(rendered),
                    request: None,
                },
                Err(err) => self.fail(err.into()),
            };
        };

        let sizing = self.sizer.resolve(overlay, cell_size);
        let output = match compose(&grid, Some(overlay), Some(sizing.footprint()), &self.config)
        {
            Ok(rendered) => rendered,
            Err(err) => return self.fail(err.into()),
        };

        let request = if sizing.needs_measurement() {
            tracing::debug!(generation, "overlay measurement requested");
            self.pending = Some(PendingPass {
                generation,
                grid,
                fingerprint: overlay.fingerprint(),
                cell_size,
            });
            Some(MeasurementRequest {
                generation,
                provisional: sizing.footprint(),
            })
        } else {
            None
        };

        RenderPass {
            output: Some(output),
            request,
        }
    }

    /// Apply a host measurement of `content` and re-render
    ///
    /// Returns `None` without touching the cache when `request` belongs to an
    /// older render than the latest one, or when `content` is not the overlay
    /// that render was waiting on.
    pub fn apply_measurement(
        &mut self,
        request: MeasurementRequest,
        content: &dyn OverlayContent,
        measured: Footprint,
    ) -> Option<Rendered> {
        let pending = match &self.pending {
            Some(pending) if pending.generation == request.generation => pending,
            _ => {
                tracing::debug!(
                    stale = request.generation,
                    current = self.generation,
                    "discarding stale overlay measurement"
                );
                return None;
            }
        };
        if content.fingerprint() != pending.fingerprint {
            tracing::debug!(
                generation = request.generation,
                "measurement is for different overlay content"
            );
            return None;
        }

        self.sizer.record(content, pending.cell_size, measured);

        match compose(&pending.grid, Some(content), Some(measured), &self.config) {
            Ok(rendered) => Some(rendered),
            Err(err) => {
                self.diagnostics.report(&RenderError::from(err));
                None
            }
        }
    }

    /// Render, then measure through `surface` and render again if needed
    ///
    /// A surface that cannot measure leaves the provisional output in place.
    pub fn render_measured(
        &mut self,
        value: &str,
        overlay: Option<&dyn OverlayContent>,
        surface: &dyn LayoutSurface,
    ) -> Option<Rendered> {
        let pass = self.render(value, overlay);
        let (Some(request), Some(content)) = (pass.request, overlay) else {
            return pass.output;
        };

        match surface.measured_size(content, request.provisional) {
            Some(measured) => self
                .apply_measurement(request, content, measured)
                .or(pass.output),
            None => {
                tracing::debug!("no layout surface available, keeping provisional layout");
                pass.output
            }
        }
    }

    fn fail(&mut self, err: RenderError) -> RenderPass {
        self.diagnostics.report(&err);
        RenderPass::failed()
    }
}
