//! Symbol handles.
//!
//! `SymbolId` is a live handle into one program view and is only meaningful
//! while that view is alive. `SymbolKey` is the durable identity: it can be
//! stored across passes and re-fetched, and it is what the registry records.

use std::fmt;

/// A 32-bit index into a program's declaration table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    /// Create a handle from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The raw index as a `usize`, for table access.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

/// Identifies a compilation-unit group (an assembly).
///
/// Copies never cross unit boundaries.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct UnitId(pub u32);

/// Canonical, durable key of a symbol.
///
/// Formed from the fully qualified name, generic arity and (for methods)
/// the parameter list, e.g. ``N.Outer.Copy1`1`` or `N.Outer.Compute(int)`.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolKey(String);

impl SymbolKey {
    pub fn new(key: impl Into<String>) -> Self {
        SymbolKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolKey({})", self.0)
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
