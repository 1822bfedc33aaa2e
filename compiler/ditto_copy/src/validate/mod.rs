//! Candidate validation: structure, targets, patterns.
//!
//! One predicate set, parameterized by a [`Reporter`]. Stages run in order
//! (structure, then targets, then pattern rules) and each blocking problem
//! is handed to the reporter, which decides whether validation continues.
//! A member is accepted only if no blocking error was reported.

mod report;

pub use report::{Accumulate, FailFast, Reporter, Stop};

use std::ops::ControlFlow;

use ditto_diagnostic::Diagnostic;
use ditto_ir::{DeclKind, Declaration, ProgramView, Span, SymbolId};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::diagnostics;
use crate::member::{apply_order, Candidate, CandidateRef, Member, MemberKind, PatternRule, Target};
use crate::pattern::TextRewriter;
use crate::resolve::{ResolveError, Resolver};
use crate::{CancellationToken, GenerateError, GeneratorConfig, PatternError};

/// Validates candidates of one generation group.
pub struct Validator<'a, P: ProgramView + ?Sized> {
    program: &'a P,
    config: &'a GeneratorConfig,
    resolver: Resolver<'a, P>,
    pending: &'a FxHashSet<SymbolId>,
    cancel: &'a CancellationToken,
}

/// Per-member bookkeeping shared by the stages.
struct Check<'r, R: Reporter + ?Sized> {
    reporter: &'r mut R,
    blocked: bool,
}

impl<R: Reporter + ?Sized> Check<'_, R> {
    fn error(&mut self, diag: Diagnostic) -> ControlFlow<Stop> {
        self.blocked = true;
        self.reporter.error(diag)
    }

    fn warning(&mut self, diag: Diagnostic) {
        self.reporter.warning(diag);
    }

    fn advisory(&mut self, diag: Diagnostic) {
        self.reporter.advisory(diag);
    }
}

impl<'a, P: ProgramView + ?Sized> Validator<'a, P> {
    pub fn new(
        program: &'a P,
        config: &'a GeneratorConfig,
        pending: &'a FxHashSet<SymbolId>,
        cancel: &'a CancellationToken,
    ) -> Self {
        Validator {
            program,
            config,
            resolver: Resolver::new(program, pending, cancel),
            pending,
            cancel,
        }
    }

    /// Validate one candidate.
    ///
    /// `Ok(None)` means the member was rejected; the reporter has the
    /// reason. Cancellation and unknown symbols are errors of the pass.
    pub fn validate<R: Reporter + ?Sized>(
        &self,
        candidate: &Candidate,
        origin: CandidateRef,
        rewriter: &mut dyn TextRewriter,
        reporter: &mut R,
    ) -> Result<Option<Member>, GenerateError> {
        self.cancel.check()?;
        let decl = self
            .program
            .declaration(candidate.symbol)
            .ok_or(GenerateError::UnknownSymbol(candidate.symbol))?;
        let key = self
            .program
            .canonical_key(candidate.symbol)
            .ok_or(GenerateError::UnknownSymbol(candidate.symbol))?;

        let mut check = Check {
            reporter,
            blocked: false,
        };
        let flow = self.run(candidate, decl, origin.kind, rewriter, &mut check);
        let (targets, rules) = match flow {
            ControlFlow::Continue(parts) => parts,
            ControlFlow::Break(Stop::Cancelled) => return Err(GenerateError::Cancelled),
            ControlFlow::Break(Stop::Blocked) => return Ok(None),
        };
        if check.blocked {
            tracing::debug!(member = %key, "rejected");
            return Ok(None);
        }

        let mut dependencies: Vec<_> = targets
            .iter()
            .filter(|t| t.symbol != candidate.symbol && self.pending.contains(&t.symbol))
            .map(|t| t.key.clone())
            .collect();
        dependencies.sort();
        dependencies.dedup();

        Ok(Some(Member {
            symbol: candidate.symbol,
            kind: origin.kind,
            key,
            targets,
            rules,
            dependencies,
            origin,
        }))
    }

    fn run<R: Reporter + ?Sized>(
        &self,
        candidate: &Candidate,
        decl: &Declaration,
        kind: MemberKind,
        rewriter: &mut dyn TextRewriter,
        check: &mut Check<'_, R>,
    ) -> ControlFlow<Stop, (SmallVec<[Target; 1]>, Vec<PatternRule>)> {
        self.check_structure(decl, kind, check)?;
        self.checkpoint()?;
        let targets = self.check_targets(candidate, decl, kind, check)?;
        self.checkpoint()?;
        let rules = self.check_patterns(candidate, decl, kind, rewriter, check)?;
        ControlFlow::Continue((targets, rules))
    }

    fn checkpoint(&self) -> ControlFlow<Stop> {
        if self.cancel.is_cancelled() {
            ControlFlow::Break(Stop::Cancelled)
        } else {
            ControlFlow::Continue(())
        }
    }

    fn name(&self, id: SymbolId) -> String {
        self.program.qualified_name(id)
    }

    /// Openness, duplicate implementation and member-kind rules.
    fn check_structure<R: Reporter + ?Sized>(
        &self,
        decl: &Declaration,
        kind: MemberKind,
        check: &mut Check<'_, R>,
    ) -> ControlFlow<Stop> {
        let name = self.name(decl.id);
        let span = decl.span();

        let supported = match kind {
            MemberKind::Type => decl.kind.is_copyable_type(),
            MemberKind::Method => match decl.kind {
                DeclKind::Method => true,
                DeclKind::LocalFunction => self.config.allow_local_functions,
                _ => false,
            },
        };
        if !supported {
            check.error(diagnostics::unsupported_kind(&name, decl.kind, span))?;
        }

        // Local functions cannot be declared partial.
        if decl.kind != DeclKind::LocalFunction && !decl.is_partial {
            check.error(diagnostics::member_not_open(&name, span))?;
        }

        for container in self.program.containers(decl.id) {
            let Some(outer) = self.program.declaration(container) else {
                continue;
            };
            if outer.kind.is_type() && !outer.is_partial {
                check.error(diagnostics::container_not_open(
                    &name,
                    &self.name(container),
                    span,
                ))?;
            }
        }

        if kind == MemberKind::Method && decl.is_partial && decl.has_implementation() {
            check.error(diagnostics::already_implemented(&name, span))?;
        }
        ControlFlow::Continue(())
    }

    fn check_targets<R: Reporter + ?Sized>(
        &self,
        candidate: &Candidate,
        decl: &Declaration,
        kind: MemberKind,
        check: &mut Check<'_, R>,
    ) -> ControlFlow<Stop, SmallVec<[Target; 1]>> {
        let mut targets: SmallVec<[Target; 1]> = SmallVec::new();
        let mut seen: FxHashMap<(SymbolId, Option<usize>), Span> = FxHashMap::default();

        for (index, request) in candidate.copies.iter().enumerate() {
            self.checkpoint()?;
            let span = request.span;
            let resolved = match self.resolver.resolve(&request.reference, decl.id, kind) {
                Ok(resolved) => resolved,
                Err(ResolveError::Cancelled) => return ControlFlow::Break(Stop::Cancelled),
                Err(err) => {
                    if let Some(diag) =
                        self.resolver
                            .diagnose(&err, &request.reference, decl.id, kind, span)
                    {
                        check.error(diag)?;
                    }
                    continue;
                }
            };
            let Some(target) = self.program.declaration(resolved.symbol) else {
                continue;
            };
            let target_name = self.name(target.id);

            let fragment = match &request.options.fragment {
                Some(selector) => match target.fragment_named(selector) {
                    Some((i, _)) => Some(i),
                    None => {
                        check.error(diagnostics::unknown_fragment(&target_name, selector, span))?;
                        continue;
                    }
                },
                None => None,
            };

            if let Some(relation) = self.relation(decl.id, target.id) {
                check.error(diagnostics::invalid_target(&target_name, relation, span))?;
                continue;
            }

            if target.unit != decl.unit {
                check.error(diagnostics::not_accessible(
                    &target_name,
                    &self.name(decl.id),
                    span,
                ))?;
                continue;
            }

            if let Some(first) = seen.get(&(target.id, fragment)) {
                check.warning(diagnostics::duplicate_target(&target_name, span, *first));
                continue;
            }

            if kind == MemberKind::Type {
                if let Some(collision) = self.collision(decl, target) {
                    check.warning(diagnostics::name_collision(&target_name, &collision, span));
                    continue;
                }
            }

            let mut satisfied = true;
            for (param, arg) in target.type_params.iter().zip(&resolved.type_arguments) {
                for constraint in &param.constraints {
                    if !self.program.satisfies(arg, constraint) {
                        satisfied = false;
                        check.error(diagnostics::constraint_violation(
                            &arg.qualified_name,
                            &param.name,
                            constraint,
                            span,
                        ))?;
                    }
                }
            }
            if !satisfied {
                continue;
            }

            let Some(key) = self.program.canonical_key(target.id) else {
                continue;
            };
            seen.insert((target.id, fragment), span);
            targets.push(Target {
                symbol: target.id,
                key,
                fragment,
                type_arguments: resolved.type_arguments,
                options: request.options.clone(),
                request: index,
                member_fragment: request.fragment,
                span,
            });
        }

        targets.sort_by_key(|t| apply_order(t.options.order, t.request));
        ControlFlow::Continue(targets)
    }

    /// The immediate-cycle guard: self, a container, or something contained.
    fn relation(&self, member: SymbolId, target: SymbolId) -> Option<&'static str> {
        if member == target {
            Some("the member itself")
        } else if self.program.is_within(member, target) {
            Some("a container of the member")
        } else if self.program.is_within(target, member) {
            Some("contained in the member")
        } else {
            None
        }
    }

    /// A declaration the copy would introduce that clashes with the member's
    /// own name or with a member it already has.
    ///
    /// Constructors and destructors are renamed on copy and methods may
    /// overload, so neither collides.
    fn collision(&self, member: &Declaration, target: &Declaration) -> Option<String> {
        let existing: FxHashSet<String> = self
            .program
            .children(member.id)
            .into_iter()
            .filter_map(|c| self.program.declaration(c))
            .filter(|d| !d.kind.is_method_like())
            .map(|d| d.name.clone())
            .collect();

        self.program
            .children(target.id)
            .into_iter()
            .filter_map(|c| self.program.declaration(c))
            .filter(|d| !matches!(d.kind, DeclKind::Constructor | DeclKind::Destructor))
            .find(|d| {
                d.name == member.name || (!d.kind.is_method_like() && existing.contains(&d.name))
            })
            .map(|d| d.name.clone())
    }

    fn check_patterns<R: Reporter + ?Sized>(
        &self,
        candidate: &Candidate,
        decl: &Declaration,
        kind: MemberKind,
        rewriter: &mut dyn TextRewriter,
        check: &mut Check<'_, R>,
    ) -> ControlFlow<Stop, Vec<PatternRule>> {
        let name = self.name(decl.id);
        if candidate.copies.is_empty() {
            for request in &candidate.patterns {
                check.warning(diagnostics::redundant_pattern(&name, request.span));
            }
            return ControlFlow::Continue(Vec::new());
        }

        let copy_fragments: FxHashSet<usize> =
            candidate.copies.iter().map(|c| c.fragment).collect();
        let mut first_seen: FxHashMap<&str, Span> = FxHashMap::default();
        let mut rules = Vec::new();

        for (index, request) in candidate.patterns.iter().enumerate() {
            let (Some(pattern), Some(replacement)) = (&request.pattern, &request.replacement)
            else {
                let missing = match request.pattern.as_deref() {
                    Some(text) if !text.is_empty() => "replacement",
                    _ => "pattern text",
                };
                check.warning(diagnostics::malformed_pattern(missing, request.span));
                continue;
            };
            if pattern.is_empty() {
                check.warning(diagnostics::malformed_pattern("pattern text", request.span));
                continue;
            }

            if kind == MemberKind::Type && !copy_fragments.contains(&request.fragment) {
                check.warning(diagnostics::pattern_on_other_declaration(&name, request.span));
                continue;
            }

            if let Some(first) = first_seen.get(pattern.as_str()) {
                check.warning(diagnostics::duplicate_pattern(pattern, request.span, *first));
                continue;
            }
            first_seen.insert(pattern.as_str(), request.span);

            if let Err(err) = rewriter.check(pattern) {
                let reason = match &err {
                    PatternError::Invalid { source, .. } => source.to_string(),
                };
                check.advisory(diagnostics::invalid_pattern(pattern, &reason, request.span));
                continue;
            }

            rules.push(PatternRule {
                pattern: pattern.clone(),
                replacement: replacement.clone(),
                order: request.order,
                index,
                span: request.span,
            });
        }

        PatternRule::sort(&mut rules);
        ControlFlow::Continue(rules)
    }
}
