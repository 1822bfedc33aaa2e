//! Binding copy-from references to target declarations.
//!
//! Resolution tries the reference as a name or path first. Call-like text
//! (`Compute(int)`) is not a path; for it the resolver synthesizes a
//! one-line documentation comment holding the reference as a `cref` and
//! binds that speculatively, which lets the host pick an overload.

use ditto_diagnostic::{Diagnostic, ErrorCode};
use ditto_ir::path::{looks_like_call, ReferencePath};
use ditto_ir::{DeclKind, Declaration, Lookup, ProgramView, Span, SymbolId, TypeArg};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::diagnostics;
use crate::member::{MemberKind, Reference};
use crate::CancellationToken;

/// A bound target with its type arguments.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Resolved {
    pub symbol: SymbolId,
    pub type_arguments: SmallVec<[TypeArg; 2]>,
}

/// Why a reference did not resolve.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("cannot resolve `{0}`")]
    NotFound(String),
    #[error("no target specified")]
    Unspecified,
    #[error("`{reference}` is ambiguous")]
    Conflict {
        reference: String,
        candidates: Vec<SymbolId>,
    },
    #[error("{0:?} is not accessible")]
    NotAccessible(SymbolId),
    #[error("{0:?} is the wrong kind of declaration")]
    WrongKind(SymbolId),
    #[error("{0:?} has no implementation")]
    NoImplementation(SymbolId),
    #[error("`{reference}` expects {expected} type argument(s), found {found}")]
    WrongArity {
        reference: String,
        expected: usize,
        found: usize,
    },
    #[error("resolution was cancelled")]
    Cancelled,
}

impl ResolveError {
    /// Diagnostic code, `None` for cancellation.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ResolveError::NotFound(_) | ResolveError::Unspecified => Some(ErrorCode::E1001),
            ResolveError::Conflict { .. } => Some(ErrorCode::E1002),
            ResolveError::NotAccessible(_) => Some(ErrorCode::E1003),
            ResolveError::WrongKind(_) => Some(ErrorCode::E1004),
            ResolveError::NoImplementation(_) => Some(ErrorCode::E1005),
            ResolveError::WrongArity { .. } => Some(ErrorCode::E1006),
            ResolveError::Cancelled => None,
        }
    }
}

/// Resolves references from one program view.
pub struct Resolver<'a, P: ProgramView + ?Sized> {
    program: &'a P,
    /// Symbols that are themselves members of the current group.
    pending: &'a FxHashSet<SymbolId>,
    cancel: &'a CancellationToken,
}

impl<'a, P: ProgramView + ?Sized> Resolver<'a, P> {
    pub fn new(
        program: &'a P,
        pending: &'a FxHashSet<SymbolId>,
        cancel: &'a CancellationToken,
    ) -> Self {
        Resolver {
            program,
            pending,
            cancel,
        }
    }

    /// Resolve `reference` as written on `context`, for a member of `kind`.
    pub fn resolve(
        &self,
        reference: &Reference,
        context: SymbolId,
        kind: MemberKind,
    ) -> Result<Resolved, ResolveError> {
        if self.cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }
        let resolved = match reference {
            Reference::Name(text) => self.resolve_name(text, context)?,
            Reference::Handle {
                symbol,
                type_arguments,
            } => self.resolve_handle(*symbol, type_arguments, context)?,
            Reference::None => return Err(ResolveError::Unspecified),
        };
        self.check_kind(&resolved, kind)?;
        Ok(resolved)
    }

    fn resolve_name(&self, text: &str, context: SymbolId) -> Result<Resolved, ResolveError> {
        let text = text.trim();
        let mut lookup = self.program.lookup(text, context);
        if !lookup.is_found() && looks_like_call(text) {
            let cref = text.replace('<', "{").replace('>', "}");
            tracing::trace!(reference = text, "binding call-like reference as cref");
            lookup = self
                .program
                .bind_documentation(&format!("/// <see cref=\"{cref}\"/>"), context);
        }

        let symbol = match lookup {
            Lookup::Unique(symbol) => {
                if !self.program.is_accessible(symbol, context) {
                    return Err(ResolveError::NotAccessible(symbol));
                }
                symbol
            }
            Lookup::Ambiguous(candidates) => self.pick_accessible(text, candidates, context)?,
            Lookup::NotFound => return Err(self.not_found(text, context)),
        };

        let arguments = ReferencePath::parse(text)
            .filter(|path| !path.is_call_like())
            .map(|path| path.last().type_args.clone())
            .unwrap_or_default();
        let type_arguments = arguments
            .iter()
            .map(|arg| {
                self.program
                    .resolve_type_argument(arg, context)
                    .ok_or_else(|| ResolveError::NotFound(arg.clone()))
            })
            .collect::<Result<SmallVec<_>, _>>()?;

        let resolved = Resolved {
            symbol,
            type_arguments,
        };
        self.check_arity(text, &resolved)?;
        Ok(resolved)
    }

    fn resolve_handle(
        &self,
        symbol: SymbolId,
        type_arguments: &[TypeArg],
        context: SymbolId,
    ) -> Result<Resolved, ResolveError> {
        let Some(decl) = self.program.declaration(symbol) else {
            return Err(ResolveError::NotFound(format!("{symbol:?}")));
        };
        if !self.program.is_accessible(symbol, context) {
            return Err(ResolveError::NotAccessible(symbol));
        }
        let resolved = Resolved {
            symbol,
            type_arguments: type_arguments.iter().cloned().collect(),
        };
        self.check_arity(&decl.display_name(), &resolved)?;
        Ok(resolved)
    }

    /// Overloads: exactly one accessible candidate wins.
    fn pick_accessible(
        &self,
        text: &str,
        candidates: Vec<SymbolId>,
        context: SymbolId,
    ) -> Result<SymbolId, ResolveError> {
        let accessible: Vec<SymbolId> = candidates
            .iter()
            .copied()
            .filter(|c| self.program.is_accessible(*c, context))
            .collect();
        match (accessible.as_slice(), candidates.first()) {
            ([single], _) => Ok(*single),
            ([], Some(first)) => Err(ResolveError::NotAccessible(*first)),
            ([], None) => Err(ResolveError::NotFound(text.to_owned())),
            _ => Err(ResolveError::Conflict {
                reference: text.to_owned(),
                candidates: accessible,
            }),
        }
    }

    /// Distinguish a wrong generic arity from a missing name.
    fn not_found(&self, text: &str, context: SymbolId) -> ResolveError {
        let Some(path) = ReferencePath::parse(text).filter(|p| !p.is_call_like()) else {
            return ResolveError::NotFound(text.to_owned());
        };
        let found = path.last().type_args.len();
        if found == 0 {
            return ResolveError::NotFound(text.to_owned());
        }
        let bare = strip_last_type_arguments(text);
        let expected = match self.program.lookup(&bare, context) {
            Lookup::Unique(id) => self.program.declaration(id).map(Declaration::arity),
            Lookup::Ambiguous(ids) => ids
                .first()
                .and_then(|id| self.program.declaration(*id))
                .map(Declaration::arity),
            Lookup::NotFound => None,
        };
        match expected {
            Some(expected) => ResolveError::WrongArity {
                reference: text.to_owned(),
                expected,
                found,
            },
            None => ResolveError::NotFound(text.to_owned()),
        }
    }

    /// Arguments, when given, must match the declaration's arity. An open
    /// reference (no arguments) to a generic declaration is allowed.
    fn check_arity(&self, text: &str, resolved: &Resolved) -> Result<(), ResolveError> {
        let Some(decl) = self.program.declaration(resolved.symbol) else {
            return Err(ResolveError::NotFound(text.to_owned()));
        };
        let found = resolved.type_arguments.len();
        if found > 0 && found != decl.arity() {
            return Err(ResolveError::WrongArity {
                reference: text.to_owned(),
                expected: decl.arity(),
                found,
            });
        }
        Ok(())
    }

    fn check_kind(&self, resolved: &Resolved, kind: MemberKind) -> Result<(), ResolveError> {
        let Some(decl) = self.program.declaration(resolved.symbol) else {
            return Err(ResolveError::NotFound(format!("{:?}", resolved.symbol)));
        };
        match kind {
            MemberKind::Type if decl.kind.is_copyable_type() => Ok(()),
            MemberKind::Method if matches!(decl.kind, DeclKind::Method | DeclKind::LocalFunction) => {
                if decl.has_implementation() || self.pending.contains(&resolved.symbol) {
                    Ok(())
                } else {
                    Err(ResolveError::NoImplementation(resolved.symbol))
                }
            }
            MemberKind::Type | MemberKind::Method => Err(ResolveError::WrongKind(resolved.symbol)),
        }
    }

    /// Turn a resolution failure into its diagnostic.
    ///
    /// Returns `None` for cancellation, which is not a diagnostic.
    pub fn diagnose(
        &self,
        error: &ResolveError,
        reference: &Reference,
        member: SymbolId,
        kind: MemberKind,
        span: Span,
    ) -> Option<Diagnostic> {
        let name = |id: SymbolId| {
            self.program
                .declaration(id)
                .map_or_else(|| format!("{id:?}"), |d| self.program.qualified_name(d.id))
        };
        let diag = match error {
            ResolveError::NotFound(_) => diagnostics::unresolved(&reference.describe(), span),
            ResolveError::Unspecified => diagnostics::unspecified_target(span),
            ResolveError::Conflict {
                reference,
                candidates,
            } => {
                let names: Vec<String> = candidates.iter().map(|c| self.describe(*c)).collect();
                diagnostics::conflict(reference, &names, span)
            }
            ResolveError::NotAccessible(target) => {
                diagnostics::not_accessible(&name(*target), &name(member), span)
            }
            ResolveError::WrongKind(target) => {
                let found = self
                    .program
                    .declaration(*target)
                    .map_or(DeclKind::Field, |d| d.kind);
                diagnostics::wrong_kind(&name(*target), found, kind.describe(), span)
            }
            ResolveError::NoImplementation(target) => {
                diagnostics::no_implementation(&self.describe(*target), span)
            }
            ResolveError::WrongArity {
                reference,
                expected,
                found,
            } => diagnostics::wrong_arity(reference, *expected, *found, span),
            ResolveError::Cancelled => return None,
        };
        Some(diag)
    }

    /// `N.Outer.Compute(int)` style name, for overload lists.
    fn describe(&self, id: SymbolId) -> String {
        match self.program.declaration(id) {
            Some(decl) if decl.kind.is_method_like() => format!(
                "{}({})",
                self.program.qualified_name(id),
                decl.parameters.join(", ")
            ),
            Some(_) => self.program.qualified_name(id),
            None => format!("{id:?}"),
        }
    }
}

/// `N.Source<int, T>` to `N.Source`; only the last segment's arguments.
fn strip_last_type_arguments(text: &str) -> String {
    let text = text.trim();
    let last_dot = last_top_level_dot(text);
    match text[last_dot..].find('<') {
        Some(open) => text[..last_dot + open].to_owned(),
        None => text.to_owned(),
    }
}

fn last_top_level_dot(text: &str) -> usize {
    let mut depth = 0usize;
    let mut last = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => last = i + 1,
            _ => {}
        }
    }
    last
}

#[cfg(test)]
mod tests;
