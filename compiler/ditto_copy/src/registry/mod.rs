//! Symbols whose output has been emitted in the current generation group.
//!
//! The registry is owned by one pass context and cleared at the group
//! boundary. It sits behind a `RwLock` so a host may drive independent
//! passes from different threads; one pass itself is single-threaded.

use ditto_ir::SymbolKey;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// The text a member generated, kept so later copies of that member can
/// embed it.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct GeneratedFragment {
    pub attributes: String,
    pub documentation: String,
    pub body: String,
    pub usings: Vec<String>,
}

/// An emitted symbol.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RegistryEntry {
    pub key: SymbolKey,
    pub generated: GeneratedFragment,
}

#[derive(Debug, Default)]
struct RegistryState {
    entries: FxHashMap<SymbolKey, RegistryEntry>,
    /// Registration order.
    order: Vec<SymbolKey>,
}

/// Emitted-symbol registry for one generation group.
#[derive(Debug, Default)]
pub struct SymbolRegistry {
    state: RwLock<RegistryState>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` as emitted. Returns `false` (and keeps the first
    /// entry) if it was already registered.
    pub fn register(&self, key: SymbolKey, generated: GeneratedFragment) -> bool {
        let mut state = self.state.write();
        if state.entries.contains_key(&key) {
            return false;
        }
        tracing::trace!(key = %key, "registered");
        state.order.push(key.clone());
        state.entries.insert(key.clone(), RegistryEntry { key, generated });
        true
    }

    pub fn is_registered(&self, key: &SymbolKey) -> bool {
        self.state.read().entries.contains_key(key)
    }

    /// Whether every key in `keys` is registered.
    pub fn all_registered<'a>(&self, keys: impl IntoIterator<Item = &'a SymbolKey>) -> bool {
        let state = self.state.read();
        keys.into_iter().all(|key| state.entries.contains_key(key))
    }

    /// The generated text of a registered symbol.
    pub fn generated(&self, key: &SymbolKey) -> Option<GeneratedFragment> {
        self.state
            .read()
            .entries
            .get(key)
            .map(|entry| entry.generated.clone())
    }

    /// Keys in registration order.
    pub fn registration_order(&self) -> Vec<SymbolKey> {
        self.state.read().order.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Forget everything; called at the end of a generation group.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.entries.clear();
        state.order.clear();
    }
}

#[cfg(test)]
mod tests;
