//! Diagnostic queue: the accumulating sink used in analysis mode.
//!
//! Features:
//! - Error limits to prevent overwhelming output
//! - Deduplication of identical reports (the same member can be validated
//!   once per pass and again on every scheduler retry)
//! - `ErrorGuaranteed` proof that errors were emitted

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use ditto_ir::Span;

use crate::{Diagnostic, ErrorCode, ErrorGuaranteed};

/// Identity of a report for dedup: code, primary location and message.
#[inline]
fn report_hash(diag: &Diagnostic) -> u64 {
    let mut hasher = DefaultHasher::new();
    diag.code.hash(&mut hasher);
    diag.primary_span().hash(&mut hasher);
    diag.message.hash(&mut hasher);
    hasher.finish()
}

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before further errors are dropped (0 = unlimited).
    pub error_limit: usize,
    /// Drop diagnostics identical to one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 100,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Queue for collecting, deduplicating, and sorting diagnostics.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.add(diagnostic);
/// // ... add more diagnostics
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiagnosticQueue {
    /// Collected diagnostics, in report order.
    diagnostics: Vec<Diagnostic>,
    /// Hashes of queued reports.
    seen: HashSet<u64>,
    /// Count of errors (not warnings/notes).
    error_count: usize,
    /// Whether the error limit cut off a report.
    truncated: bool,
    config: DiagnosticConfig,
}

impl Default for DiagnosticQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticQueue {
    /// Create a new diagnostic queue with default configuration.
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    /// Create a diagnostic queue with custom configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            seen: HashSet::new(),
            error_count: 0,
            truncated: false,
            config,
        }
    }

    /// Add a diagnostic.
    ///
    /// Returns `true` if the diagnostic was added, `false` if it was filtered.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        let is_error = diag.is_error();

        if is_error && self.limit_reached() {
            self.truncated = true;
            return false;
        }

        if self.config.deduplicate && !self.seen.insert(report_hash(&diag)) {
            return false;
        }

        self.diagnostics.push(diag);
        if is_error {
            self.error_count += 1;
        }
        true
    }

    /// Emit an error diagnostic and get proof it was emitted.
    pub fn emit_error(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        self.add(diag);
        ErrorGuaranteed::new()
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    /// Get the number of errors collected.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Check if any errors were emitted and get proof if so.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Sort diagnostics by primary location and return them.
    ///
    /// Clears the queue. Diagnostics without a location sort last; ties keep
    /// report order. Appends a "too many errors" note if the limit cut
    /// anything off.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut result: Vec<Diagnostic> = self.diagnostics.drain(..).collect();
        result.sort_by_key(|d| d.primary_span().map_or(u32::MAX, |s| s.start));

        if self.truncated {
            result.push(too_many_errors(self.config.error_limit, Span::DUMMY));
        }

        self.seen.clear();
        self.error_count = 0;
        self.truncated = false;
        result
    }

    /// Get diagnostics without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

/// Create a "too many errors" diagnostic.
#[cold]
pub fn too_many_errors(limit: usize, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9002)
        .with_message(format!("aborting due to {limit} previous errors"))
        .with_label(span, "error limit reached here")
        .with_note("raise `error_limit` in the diagnostic configuration to see more")
}

#[cfg(test)]
mod tests;
