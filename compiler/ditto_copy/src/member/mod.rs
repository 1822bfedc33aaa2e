//! The engine's data model: candidates in, members and targets out.
//!
//! A [`Candidate`] is what the upstream collection step hands over: a
//! declaration plus its raw copy-from and pattern annotations. Validation
//! turns it into a [`Member`] with resolved [`Target`]s and ordered
//! [`PatternRule`]s, or rejects it.

use std::cmp::Ordering;

use ditto_ir::{Span, SymbolId, SymbolKey, TypeArg};
use smallvec::SmallVec;

/// Which filter group a member belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    Type,
    Method,
}

impl MemberKind {
    pub fn describe(self) -> &'static str {
        match self {
            MemberKind::Type => "type",
            MemberKind::Method => "method",
        }
    }
}

/// A raw copy-from reference as written in the annotation.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Reference {
    /// Free text: plain name, qualified path, generic name or call-like
    /// text such as `Compute(int)`.
    Name(String),
    /// A type handle the host already bound, with its type arguments.
    Handle {
        symbol: SymbolId,
        type_arguments: Vec<TypeArg>,
    },
    /// Explicit "no target".
    None,
}

impl Reference {
    pub fn name(text: impl Into<String>) -> Self {
        Reference::Name(text.into())
    }

    pub fn handle(symbol: SymbolId) -> Self {
        Reference::Handle {
            symbol,
            type_arguments: Vec::new(),
        }
    }

    /// Text used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Reference::Name(text) => text.clone(),
            Reference::Handle { symbol, .. } => format!("{symbol:?}"),
            Reference::None => "<none>".to_owned(),
        }
    }
}

/// Per-target options.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetOptions {
    /// Apply order among a member's targets; `0` sorts first.
    pub order: i32,
    /// Copy only the partial fragment with this selector name.
    pub fragment: Option<String>,
    /// Merge the target file's using directives into the output.
    pub copy_usings: bool,
    /// Rename constructors and destructors named after the target.
    pub rename_special_members: bool,
}

impl Default for TargetOptions {
    fn default() -> Self {
        TargetOptions {
            order: 0,
            fragment: None,
            copy_usings: true,
            rename_special_members: true,
        }
    }
}

impl TargetOptions {
    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    #[must_use]
    pub fn with_copy_usings(mut self, copy: bool) -> Self {
        self.copy_usings = copy;
        self
    }

    #[must_use]
    pub fn with_rename_special_members(mut self, rename: bool) -> Self {
        self.rename_special_members = rename;
        self
    }
}

/// One copy-from annotation on a candidate.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CopyRequest {
    pub reference: Reference,
    pub options: TargetOptions,
    /// Index of the member fragment carrying the annotation.
    pub fragment: usize,
    pub span: Span,
}

impl CopyRequest {
    pub fn new(reference: Reference) -> Self {
        CopyRequest {
            reference,
            options: TargetOptions::default(),
            fragment: 0,
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: TargetOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn on_fragment(mut self, fragment: usize) -> Self {
        self.fragment = fragment;
        self
    }

    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// One pattern annotation on a candidate, before validation.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PatternRequest {
    pub pattern: Option<String>,
    pub replacement: Option<String>,
    pub order: i32,
    pub fragment: usize,
    pub span: Span,
}

impl PatternRequest {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        PatternRequest {
            pattern: Some(pattern.into()),
            replacement: Some(replacement.into()),
            order: 0,
            fragment: 0,
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn on_fragment(mut self, fragment: usize) -> Self {
        self.fragment = fragment;
        self
    }

    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// An annotated declaration found by the upstream collection step.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Candidate {
    pub symbol: SymbolId,
    pub copies: Vec<CopyRequest>,
    pub patterns: Vec<PatternRequest>,
}

impl Candidate {
    pub fn new(symbol: SymbolId) -> Self {
        Candidate {
            symbol,
            copies: Vec::new(),
            patterns: Vec::new(),
        }
    }

    #[must_use]
    pub fn copy(mut self, request: CopyRequest) -> Self {
        self.copies.push(request);
        self
    }

    /// Shorthand for a plain-name copy request with default options.
    #[must_use]
    pub fn copy_from(self, reference: impl Into<String>) -> Self {
        self.copy(CopyRequest::new(Reference::name(reference)))
    }

    #[must_use]
    pub fn pattern(mut self, request: PatternRequest) -> Self {
        self.patterns.push(request);
        self
    }
}

/// One independent generation group, split by filter.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct CandidateSet {
    pub types: Vec<Candidate>,
    pub methods: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_type(mut self, candidate: Candidate) -> Self {
        self.types.push(candidate);
        self
    }

    #[must_use]
    pub fn with_method(mut self, candidate: Candidate) -> Self {
        self.methods.push(candidate);
        self
    }

    pub fn candidates(&self, kind: MemberKind) -> &[Candidate] {
        match kind {
            MemberKind::Type => &self.types,
            MemberKind::Method => &self.methods,
        }
    }

    pub fn len(&self) -> usize {
        self.types.len() + self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.methods.is_empty()
    }
}

/// Durable reference to a candidate inside its [`CandidateSet`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CandidateRef {
    pub kind: MemberKind,
    pub index: usize,
}

/// A resolved copy source.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Target {
    pub symbol: SymbolId,
    pub key: SymbolKey,
    /// Selected partial fragment, or all fragments when `None`.
    pub fragment: Option<usize>,
    pub type_arguments: SmallVec<[TypeArg; 2]>,
    pub options: TargetOptions,
    /// Index of the originating request, the declaration-order tie breaker.
    pub request: usize,
    /// Member fragment carrying the request.
    pub member_fragment: usize,
    pub span: Span,
}

/// A validated text-rewrite rule.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PatternRule {
    pub pattern: String,
    pub replacement: String,
    pub order: i32,
    /// Declaration index among the member's pattern annotations.
    pub index: usize,
    pub span: Span,
}

/// Sort key for ordered application: `0` first, then ascending, ties by
/// declaration index.
pub fn apply_order(order: i32, index: usize) -> (bool, i32, usize) {
    (order != 0, order, index)
}

/// Compare two `(order, index)` pairs with [`apply_order`].
pub fn compare_apply_order(a: (i32, usize), b: (i32, usize)) -> Ordering {
    apply_order(a.0, a.1).cmp(&apply_order(b.0, b.1))
}

impl PatternRule {
    pub fn sort(rules: &mut [PatternRule]) {
        rules.sort_by(|a, b| compare_apply_order((a.order, a.index), (b.order, b.index)));
    }
}

/// A validated member, ready for scheduling.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Member {
    pub symbol: SymbolId,
    pub kind: MemberKind,
    pub key: SymbolKey,
    /// Targets in apply order.
    pub targets: SmallVec<[Target; 1]>,
    /// Rules in apply order.
    pub rules: Vec<PatternRule>,
    /// Keys of targets that are themselves pending members and must be
    /// registered before this member can emit.
    pub dependencies: Vec<SymbolKey>,
    pub origin: CandidateRef,
}

#[cfg(test)]
mod tests;
