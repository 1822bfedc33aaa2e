//! Engine failures that are not diagnostics.

use ditto_ir::SymbolId;

/// A pattern rule that could not be compiled.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid pattern `{pattern}`: {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure of a generation or analysis pass as a whole.
///
/// Problems with individual members are diagnostics, not errors: the member
/// is skipped and its siblings proceed.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("generation was cancelled")]
    Cancelled,

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("symbol {0:?} is not known to the program view")]
    UnknownSymbol(SymbolId),
}
