//! The program view consumed by the copy engine.
//!
//! Binding, overload resolution and constraint checking belong to the host
//! type system. The engine talks to it only through [`ProgramView`], so any
//! binder (or the in-memory [`crate::Program`]) can drive generation.

use crate::{Constraint, Declaration, SpecialType, SymbolId, SymbolKey};

/// Outcome of binding a reference.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Lookup {
    /// Exactly one symbol matched.
    Unique(SymbolId),
    /// Several symbols matched (overloads or conflicting declarations).
    Ambiguous(Vec<SymbolId>),
    NotFound,
}

impl Lookup {
    /// Build from a candidate list.
    pub fn from_candidates(mut candidates: Vec<SymbolId>) -> Lookup {
        candidates.sort_unstable();
        candidates.dedup();
        match candidates.len() {
            0 => Lookup::NotFound,
            1 => Lookup::Unique(candidates[0]),
            _ => Lookup::Ambiguous(candidates),
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, Lookup::NotFound)
    }
}

/// A bound generic type argument.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeArg {
    /// Fully qualified generic name, e.g. `global::N.List<int>`.
    pub qualified_name: String,
    pub special: Option<SpecialType>,
    pub symbol: Option<SymbolId>,
    /// Written with a trailing `?`.
    pub nullable: bool,
    /// Set when the argument is itself a type parameter in scope; holds
    /// that parameter's constraints.
    pub parameter_constraints: Option<Vec<Constraint>>,
}

impl TypeArg {
    pub fn special(special: SpecialType) -> Self {
        TypeArg {
            qualified_name: special.qualified_name(),
            special: Some(special),
            symbol: None,
            nullable: false,
            parameter_constraints: None,
        }
    }

    pub fn named(qualified_name: impl Into<String>, symbol: Option<SymbolId>) -> Self {
        TypeArg {
            qualified_name: qualified_name.into(),
            special: None,
            symbol,
            nullable: false,
            parameter_constraints: None,
        }
    }

    pub fn type_parameter(name: impl Into<String>, constraints: Vec<Constraint>) -> Self {
        TypeArg {
            qualified_name: name.into(),
            special: None,
            symbol: None,
            nullable: false,
            parameter_constraints: Some(constraints),
        }
    }

    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// Symbol lookup, speculative binding and type queries.
pub trait ProgramView {
    fn declaration(&self, id: SymbolId) -> Option<&Declaration>;

    /// Declarations directly contained in `id`.
    fn children(&self, id: SymbolId) -> Vec<SymbolId>;

    /// Bind a plain name, qualified path or generic name from `context`.
    ///
    /// Call-like text (with an argument list) is not a path and binds to
    /// nothing here.
    fn lookup(&self, reference: &str, context: SymbolId) -> Lookup;

    /// Speculatively bind a documentation comment containing one
    /// `cref` reference, as if it were attached to `context`.
    fn bind_documentation(&self, doc_comment: &str, context: SymbolId) -> Lookup;

    fn resolve_type_argument(&self, text: &str, context: SymbolId) -> Option<TypeArg>;

    /// Whether `arg` satisfies `constraint`.
    fn satisfies(&self, arg: &TypeArg, constraint: &Constraint) -> bool;

    /// Whether `target` may be referenced from inside `from`.
    fn is_accessible(&self, target: SymbolId, from: SymbolId) -> bool;

    /// Containing declarations, innermost first.
    fn containers(&self, id: SymbolId) -> Vec<SymbolId> {
        let mut chain = Vec::new();
        let mut current = self.declaration(id).and_then(|d| d.container);
        while let Some(container) = current {
            chain.push(container);
            current = self.declaration(container).and_then(|d| d.container);
        }
        chain
    }

    /// Whether `ancestor` (transitively) contains `id`.
    fn is_within(&self, id: SymbolId, ancestor: SymbolId) -> bool {
        self.containers(id).contains(&ancestor)
    }

    /// Dotted name without generic parameters, e.g. `N.Outer.Source`.
    fn qualified_name(&self, id: SymbolId) -> String {
        let Some(decl) = self.declaration(id) else {
            return String::new();
        };
        let mut parts: Vec<&str> = self
            .containers(id)
            .iter()
            .rev()
            .filter_map(|c| self.declaration(*c))
            .map(|d| d.name.as_str())
            .collect();
        parts.push(&decl.name);
        let outermost = self.containers(id).last().copied().unwrap_or(id);
        let namespace = self
            .declaration(outermost)
            .map_or("", |d| d.namespace.as_str());
        if namespace.is_empty() {
            parts.join(".")
        } else {
            format!("{namespace}.{}", parts.join("."))
        }
    }

    /// Durable identity used by the registry.
    fn canonical_key(&self, id: SymbolId) -> Option<SymbolKey> {
        let decl = self.declaration(id)?;
        let mut key = self.qualified_name(id);
        if decl.is_generic() {
            key.push('`');
            key.push_str(&decl.arity().to_string());
        }
        if decl.kind.is_method_like() {
            key.push('(');
            key.push_str(&decl.parameters.join(","));
            key.push(')');
        }
        Some(SymbolKey::new(key))
    }
}
