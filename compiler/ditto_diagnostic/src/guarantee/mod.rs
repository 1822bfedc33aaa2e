//! Type-level proof that an error was reported.

use std::fmt;

/// Proof that at least one error diagnostic was emitted.
///
/// Can only be obtained from [`crate::queue::DiagnosticQueue`] or from a
/// nonzero error count, so a function returning `Result<_, ErrorGuaranteed>`
/// cannot fail without having reported why.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// Get a guarantee from an error count, if any errors were counted.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}

#[cfg(test)]
mod tests;
