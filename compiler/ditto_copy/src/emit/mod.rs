//! Final source text for a generated member.
//!
//! The emitter re-opens the member's namespace and containing types,
//! writes documentation according to policy, the copied attributes with
//! generator-owned markers stripped, an optional provenance attribute, the
//! member header, and the copied body.

mod hint;
mod writer;

pub use hint::{HintNameProvider, QualifiedHintNames, UniqueHints};

use ditto_ir::{Declaration, ProgramView, SymbolId, SymbolKey};
use rustc_hash::FxHashSet;

use crate::member::{Member, MemberKind, Target};
use crate::registry::GeneratedFragment;
use crate::text::{attribute_lists, attribute_name, dedent, split_attributes};
use crate::{DocumentationPolicy, GeneratorConfig};

use writer::Writer;

/// One emitted text block.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct EmittedSource {
    /// Output identifier from the hint-name provider, unique per run.
    pub hint_name: String,
    pub text: String,
    pub symbol: SymbolId,
    pub key: SymbolKey,
    /// Keys of the targets the text was copied from, in apply order.
    pub origins: Vec<SymbolKey>,
}

/// Writes generated members as source text.
pub struct Emitter<'a, P: ProgramView + ?Sized> {
    program: &'a P,
    config: &'a GeneratorConfig,
}

impl<'a, P: ProgramView + ?Sized> Emitter<'a, P> {
    pub fn new(program: &'a P, config: &'a GeneratorConfig) -> Self {
        Emitter { program, config }
    }

    /// Emit `member` with its transformed text.
    ///
    /// Returns `None` if the member's declaration is not in the program.
    pub fn emit(
        &self,
        member: &Member,
        generated: &GeneratedFragment,
        hint_name: String,
    ) -> Option<EmittedSource> {
        let decl = self.program.declaration(member.symbol)?;
        let mut w = Writer::new();

        if self.config.auto_generated_header {
            w.line("// <auto-generated/>");
        }
        if !generated.usings.is_empty() {
            for using in &generated.usings {
                w.line(&format_using(using));
            }
            w.blank();
        }

        let namespace = self.namespace_of(decl);
        if !namespace.is_empty() {
            w.open(&format!("namespace {namespace}"));
        }
        for container in self.program.containers(decl.id).into_iter().rev() {
            if let Some(outer) = self.program.declaration(container) {
                if outer.kind.is_type() {
                    w.open(&format!("partial {} {}", outer.kind.keyword(), outer.display_name()));
                }
            }
        }

        if let Some(docs) = self.documentation(member, generated) {
            w.lines(&docs);
        }
        for list in self.attributes(&generated.attributes) {
            w.line(&list);
        }
        if self.config.emit_provenance {
            for target in &member.targets {
                w.line(&format!(
                    "[{}(\"{}\")]",
                    self.config.provenance_attribute,
                    self.provenance_name(target)
                ));
            }
        }

        let header = match member.kind {
            MemberKind::Type => format!("partial {} {}", decl.kind.keyword(), decl.display_name()),
            MemberKind::Method => decl.signature.clone(),
        };
        w.open(&header);
        w.lines(&dedent(&generated.body));
        w.close_all();

        Some(EmittedSource {
            hint_name,
            text: w.finish(),
            symbol: member.symbol,
            key: member.key.clone(),
            origins: member.targets.iter().map(|t| t.key.clone()).collect(),
        })
    }

    fn namespace_of(&self, decl: &Declaration) -> String {
        let outermost = self
            .program
            .containers(decl.id)
            .last()
            .copied()
            .unwrap_or(decl.id);
        self.program
            .declaration(outermost)
            .map(|d| d.namespace.clone())
            .unwrap_or_default()
    }

    /// Documentation per policy, one comment line per entry.
    fn documentation(&self, member: &Member, generated: &GeneratedFragment) -> Option<String> {
        let copied = generated
            .documentation
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        let synthesize = match self.config.documentation {
            DocumentationPolicy::Never => false,
            DocumentationPolicy::Always => true,
            DocumentationPolicy::WhenMissing => copied.is_empty(),
        };
        if synthesize {
            let target = member.targets.first()?;
            Some(format!("/// <inheritdoc cref=\"{}\"/>", self.cref(target)))
        } else if copied.is_empty() {
            None
        } else {
            Some(copied)
        }
    }

    /// Documentation cross-reference form: `N.Outer.Source{T}` or
    /// `N.Outer.Compute(int)`.
    fn cref(&self, target: &Target) -> String {
        let mut cref = self.program.qualified_name(target.symbol);
        if let Some(decl) = self.program.declaration(target.symbol) {
            if decl.is_generic() {
                let params: Vec<&str> = decl.type_params.iter().map(|p| p.name.as_str()).collect();
                cref.push('{');
                cref.push_str(&params.join(","));
                cref.push('}');
            }
            if decl.kind.is_method_like() {
                cref.push('(');
                cref.push_str(&decl.parameters.join(","));
                cref.push(')');
            }
        }
        cref
    }

    /// `global::N.Outer.Source<T>`.
    fn provenance_name(&self, target: &Target) -> String {
        let qualified = self.program.qualified_name(target.symbol);
        let display = self
            .program
            .declaration(target.symbol)
            .map(Declaration::display_name)
            .unwrap_or_default();
        let prefix = match qualified.rfind('.') {
            Some(dot) => &qualified[..=dot],
            None => "",
        };
        format!("global::{prefix}{display}")
    }

    /// Copied attribute lists without marker attributes, deduplicated.
    fn attributes(&self, text: &str) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut lists = Vec::new();
        for list in attribute_lists(text) {
            let (target, attributes) = split_attributes(list);
            let kept: Vec<&str> = attributes
                .into_iter()
                .filter(|a| !self.config.is_marker_attribute(attribute_name(a)))
                .collect();
            if kept.is_empty() {
                continue;
            }
            let rendered = match target {
                Some(target) => format!("[{target}: {}]", kept.join(", ")),
                None => format!("[{}]", kept.join(", ")),
            };
            if seen.insert(rendered.clone()) {
                lists.push(rendered);
            }
        }
        lists
    }
}

/// `System` or `using System;` to `using System;`.
fn format_using(using: &str) -> String {
    let using = using.trim().trim_end_matches(';');
    if using.starts_with("using ") || using.starts_with("global using ") {
        format!("{using};")
    } else {
        format!("using {using};")
    }
}
