//! The generation driver.
//!
//! A run processes candidate groups in order. Within a group, type
//! candidates are filtered and emitted first, then method candidates; each
//! filter pass is followed by re-driving the dependency queue. The symbol
//! registry lives for one group. Compiled patterns and claimed hint names
//! are shared by the whole run.

use ditto_diagnostic::{Diagnostic, DiagnosticQueue};
use ditto_ir::{ProgramView, SymbolId, SymbolKey};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::diagnostics;
use crate::emit::{EmittedSource, Emitter, HintNameProvider, QualifiedHintNames, UniqueHints};
use crate::member::{CandidateRef, CandidateSet, Member, MemberKind};
use crate::pattern::PatternEngine;
use crate::registry::{GeneratedFragment, SymbolRegistry};
use crate::schedule::{DependencyScheduler, DurableRef, Redrive, Stalled};
use crate::transform::Transformer;
use crate::validate::{Accumulate, FailFast, Validator};
use crate::{CancellationToken, GenerateError, GeneratorConfig};

/// A candidate that did not become a member.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Rejection {
    pub symbol: SymbolId,
    pub key: SymbolKey,
    /// The first blocking diagnostic.
    pub reason: Option<Diagnostic>,
}

/// Everything a generation run produced.
#[derive(Clone, Debug, Default)]
pub struct GenerationReport {
    /// Emitted text, in emission order.
    pub outputs: Vec<EmittedSource>,
    /// Diagnostics that survive generation mode: rules dropped for an
    /// invalid pattern, and stalled-dependency reports when enabled.
    pub diagnostics: Vec<Diagnostic>,
    /// Members the dependency queue could never emit.
    pub stalled: Vec<Stalled>,
    pub rejected: Vec<Rejection>,
}

impl GenerationReport {
    /// The emitted text for `key`, if any.
    pub fn output(&self, key: &str) -> Option<&EmittedSource> {
        self.outputs.iter().find(|o| o.key.as_str() == key)
    }
}

/// Drives resolution, validation, scheduling and emission.
pub struct Generator<'p, P: ProgramView + ?Sized> {
    program: &'p P,
    config: GeneratorConfig,
    hints: Box<dyn HintNameProvider + 'p>,
    cancel: CancellationToken,
}

impl<'p, P: ProgramView + ?Sized> Generator<'p, P> {
    pub fn new(program: &'p P) -> Self {
        Generator {
            program,
            config: GeneratorConfig::default(),
            hints: Box::new(QualifiedHintNames),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_hint_names(mut self, hints: impl HintNameProvider + 'p) -> Self {
        self.hints = Box::new(hints);
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate every group in order.
    ///
    /// Per-member problems never fail the run; they show up as rejections
    /// (and, for analysis, through [`analyze`](Self::analyze)).
    ///
    /// # Errors
    /// `Cancelled` if the token fires; no partial report is returned.
    #[tracing::instrument(level = "debug", skip_all, fields(groups = groups.len()))]
    pub fn generate(&self, groups: &[CandidateSet]) -> Result<GenerationReport, GenerateError> {
        let mut engine = PatternEngine::new();
        let mut hints = UniqueHints::new();
        let mut report = GenerationReport::default();

        for group in groups {
            self.cancel.check()?;
            self.generate_in(group, &mut engine, &mut hints, &mut report)?;
        }

        tracing::debug!(
            outputs = report.outputs.len(),
            rejected = report.rejected.len(),
            stalled = report.stalled.len(),
            cached_patterns = engine.cache().len(),
            "generation finished"
        );
        Ok(report)
    }

    /// Generate a single group.
    pub fn generate_group(&self, group: &CandidateSet) -> Result<GenerationReport, GenerateError> {
        self.generate(std::slice::from_ref(group))
    }

    /// Run analysis mode over `group`: every independent problem of every
    /// candidate, sorted by location. Nothing is emitted.
    #[tracing::instrument(level = "debug", skip_all, fields(candidates = group.len()))]
    pub fn analyze(&self, group: &CandidateSet) -> Result<Vec<Diagnostic>, GenerateError> {
        let pending = pending_symbols(group);
        let validator = Validator::new(self.program, &self.config, &pending, &self.cancel);
        let mut engine = PatternEngine::new();
        let mut queue = DiagnosticQueue::with_config(self.config.diagnostics.clone());

        for kind in [MemberKind::Type, MemberKind::Method] {
            for (index, candidate) in group.candidates(kind).iter().enumerate() {
                let mut reporter = Accumulate::new(&mut queue);
                validator.validate(
                    candidate,
                    CandidateRef { kind, index },
                    &mut engine,
                    &mut reporter,
                )?;
            }
        }
        Ok(queue.flush())
    }

    fn generate_in(
        &self,
        group: &CandidateSet,
        engine: &mut PatternEngine,
        hints: &mut UniqueHints,
        report: &mut GenerationReport,
    ) -> Result<(), GenerateError> {
        let pending = pending_symbols(group);
        let validator = Validator::new(self.program, &self.config, &pending, &self.cancel);
        let registry = SymbolRegistry::new();
        let scheduler = DependencyScheduler::new();
        let mut offered: FxHashMap<SymbolKey, SymbolId> = FxHashMap::default();

        let mut pass = Pass {
            program: self.program,
            config: &self.config,
            group,
            validator: &validator,
            registry: &registry,
            rewriter: engine,
            outputs: &mut report.outputs,
            rejected: &mut report.rejected,
        };

        for kind in [MemberKind::Type, MemberKind::Method] {
            for (index, candidate) in group.candidates(kind).iter().enumerate() {
                self.cancel.check()?;
                let key = self
                    .program
                    .canonical_key(candidate.symbol)
                    .ok_or(GenerateError::UnknownSymbol(candidate.symbol))?;
                if registry.is_registered(&key) {
                    continue;
                }

                let mut reporter = FailFast::new();
                let member = validator.validate(
                    candidate,
                    CandidateRef { kind, index },
                    &mut *pass.rewriter,
                    &mut reporter,
                )?;
                report.diagnostics.extend(reporter.take_advisories());

                let Some(member) = member else {
                    pass.rejected.push(Rejection {
                        symbol: candidate.symbol,
                        key,
                        reason: reporter.take_error(),
                    });
                    continue;
                };
                offered.insert(member.key.clone(), member.symbol);
                let hint = hints.claim(self.hints.hint_name(&member.key, kind));
                scheduler.offer(&registry, member, hint, &mut pass)?;
            }

            for stalled in scheduler.redrive(&registry, &mut pass)? {
                if self.config.report_stalled_dependencies {
                    if let Some(&symbol) = offered.get(&stalled.key) {
                        report.diagnostics.push(self.stalled_diagnostic(symbol, &stalled));
                    }
                }
                report.stalled.push(stalled);
            }
        }

        registry.clear();
        Ok(())
    }

    fn stalled_diagnostic(&self, symbol: SymbolId, stalled: &Stalled) -> Diagnostic {
        let missing: Vec<String> = stalled.missing.iter().map(|k| k.as_str().to_owned()).collect();
        let span = self
            .program
            .declaration(symbol)
            .map(|d| d.span())
            .unwrap_or_default();
        diagnostics::circular_dependency(&self.program.qualified_name(symbol), &missing, span)
    }
}

fn pending_symbols(group: &CandidateSet) -> FxHashSet<SymbolId> {
    group
        .types
        .iter()
        .chain(&group.methods)
        .map(|c| c.symbol)
        .collect()
}

/// The scheduler's view of one group's pass.
struct Pass<'a, 'r, P: ProgramView + ?Sized> {
    program: &'a P,
    config: &'a GeneratorConfig,
    group: &'a CandidateSet,
    validator: &'a Validator<'a, P>,
    registry: &'a SymbolRegistry,
    rewriter: &'r mut PatternEngine,
    outputs: &'r mut Vec<EmittedSource>,
    rejected: &'r mut Vec<Rejection>,
}

impl<P: ProgramView + ?Sized> Redrive for Pass<'_, '_, P> {
    fn materialize(&mut self, durable: &DurableRef) -> Result<Option<Member>, GenerateError> {
        let origin = durable.origin;
        let Some(candidate) = self.group.candidates(origin.kind).get(origin.index) else {
            return Ok(None);
        };
        // Advisories were already reported on the first validation.
        let mut reporter = FailFast::new();
        let member = self
            .validator
            .validate(candidate, origin, &mut *self.rewriter, &mut reporter)?;
        if member.is_none() && !self.rejected.iter().any(|r| r.key == durable.key) {
            tracing::debug!(member = %durable.key, "deferred candidate no longer validates");
            self.rejected.push(Rejection {
                symbol: candidate.symbol,
                key: durable.key.clone(),
                reason: reporter.take_error(),
            });
        }
        Ok(member)
    }

    fn emit(&mut self, member: &Member, hint: &str) -> Result<GeneratedFragment, GenerateError> {
        let generated =
            Transformer::new(self.program, self.registry).transform(member, &mut *self.rewriter)?;
        if member.targets.is_empty() {
            return Ok(generated);
        }
        if let Some(source) =
            Emitter::new(self.program, self.config).emit(member, &generated, hint.to_owned())
        {
            tracing::debug!(member = %member.key, hint = %source.hint_name, "emitted");
            self.outputs.push(source);
        }
        Ok(generated)
    }
}

#[cfg(test)]
mod tests;
