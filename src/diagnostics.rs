//! Diagnostic channel for failed renders
//!
//! A failed render produces no output. The reason goes to a
//! [`DiagnosticSink`] instead of being returned to the caller.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::RenderError;

/// Receives one report per failed render
pub trait DiagnosticSink {
    fn report(&self, error: &RenderError);
}

/// Logs reports through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, error: &RenderError) {
        tracing::error!(error = %error, "QR generation failed");
    }
}

/// Keeps reports in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A panic while holding the lock leaves the list intact
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Messages reported so far, oldest first
    pub fn reports(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, error: &RenderError) {
        self.lock().push(error.to_string());
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn report(&self, error: &RenderError) {
        (**self).report(error)
    }
}
