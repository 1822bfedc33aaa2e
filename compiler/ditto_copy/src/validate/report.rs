//! Reporting strategies for the validator.
//!
//! The same predicates run in analysis mode, which must surface every
//! independent problem, and in generation mode, which only needs to know
//! whether the member may proceed. The difference is entirely in how a
//! blocking error is handled.

use std::ops::ControlFlow;

use ditto_diagnostic::{Diagnostic, DiagnosticQueue};

/// Why validation of a member stopped early.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Stop {
    /// A blocking error was reported and the strategy does not continue.
    Blocked,
    Cancelled,
}

/// Receives the validator's findings.
pub trait Reporter {
    /// A blocking error. `Break` stops validating the current member.
    fn error(&mut self, diag: Diagnostic) -> ControlFlow<Stop>;

    /// A warning; never blocks.
    fn warning(&mut self, diag: Diagnostic);

    /// An error that drops one rule but lets the member proceed.
    fn advisory(&mut self, diag: Diagnostic);
}

/// Analysis mode: accumulate everything, never stop early.
pub struct Accumulate<'q> {
    queue: &'q mut DiagnosticQueue,
}

impl<'q> Accumulate<'q> {
    pub fn new(queue: &'q mut DiagnosticQueue) -> Self {
        Accumulate { queue }
    }
}

impl Reporter for Accumulate<'_> {
    fn error(&mut self, diag: Diagnostic) -> ControlFlow<Stop> {
        self.queue.add(diag);
        ControlFlow::Continue(())
    }

    fn warning(&mut self, diag: Diagnostic) {
        self.queue.add(diag);
    }

    fn advisory(&mut self, diag: Diagnostic) {
        self.queue.add(diag);
    }
}

/// Generation mode: stop at the first blocking error.
///
/// Keeps that error (to explain the rejection) and any advisories; warnings
/// are discarded.
#[derive(Debug, Default)]
pub struct FailFast {
    first: Option<Diagnostic>,
    advisories: Vec<Diagnostic>,
}

impl FailFast {
    pub fn new() -> Self {
        Self::default()
    }

    /// The blocking error that stopped validation, if any.
    pub fn take_error(&mut self) -> Option<Diagnostic> {
        self.first.take()
    }

    pub fn take_advisories(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.advisories)
    }
}

impl Reporter for FailFast {
    fn error(&mut self, diag: Diagnostic) -> ControlFlow<Stop> {
        if self.first.is_none() {
            self.first = Some(diag);
        }
        ControlFlow::Break(Stop::Blocked)
    }

    fn warning(&mut self, _diag: Diagnostic) {}

    fn advisory(&mut self, diag: Diagnostic) {
        self.advisories.push(diag);
    }
}
