//! Building a member's copied text from its targets.
//!
//! For each target, in apply order: gather the selected fragments (plus the
//! generated text of a target that is itself a member already emitted in
//! this group), substitute generic parameters, rename special members.
//! The targets' texts are concatenated, then the member's pattern rules run
//! over body, attributes and documentation.

use ditto_ir::{Declaration, Fragment, ProgramView};
use rustc_hash::FxHashSet;

use crate::member::{Member, MemberKind, Target};
use crate::pattern::TextRewriter;
use crate::registry::{GeneratedFragment, SymbolRegistry};
use crate::substitute::{rename_special_members, Substitution};
use crate::text::dedent;
use crate::GenerateError;

/// Produces the generated text of members.
pub struct Transformer<'a, P: ProgramView + ?Sized> {
    program: &'a P,
    registry: &'a SymbolRegistry,
}

/// Text gathered from one target before the member's rules run.
#[derive(Debug, Default)]
struct TargetText {
    attributes: Vec<String>,
    documentation: String,
    body: Vec<String>,
    usings: Vec<String>,
}

impl<'a, P: ProgramView + ?Sized> Transformer<'a, P> {
    pub fn new(program: &'a P, registry: &'a SymbolRegistry) -> Self {
        Transformer { program, registry }
    }

    /// Transform `member` into its generated fragment.
    pub fn transform(
        &self,
        member: &Member,
        rewriter: &mut dyn TextRewriter,
    ) -> Result<GeneratedFragment, GenerateError> {
        let member_decl = self
            .program
            .declaration(member.symbol)
            .ok_or(GenerateError::UnknownSymbol(member.symbol))?;

        let mut attributes = Vec::new();
        let mut documentation = String::new();
        let mut bodies = Vec::new();
        let mut usings = Vec::new();
        let mut seen_usings = FxHashSet::default();

        for target in &member.targets {
            let decl = self
                .program
                .declaration(target.symbol)
                .ok_or(GenerateError::UnknownSymbol(target.symbol))?;
            let text = self.target_text(member, member_decl, decl, target);

            attributes.extend(text.attributes);
            if documentation.is_empty() {
                documentation = text.documentation;
            }
            bodies.extend(text.body);
            for using in text.usings {
                if seen_usings.insert(using.clone()) {
                    usings.push(using);
                }
            }
        }

        let mut attributes = attributes.join("\n");
        let mut body = bodies.join("\n\n");
        rewriter.rewrite_all(
            &member.rules,
            &mut [&mut body, &mut attributes, &mut documentation],
        )?;

        Ok(GeneratedFragment {
            attributes,
            documentation,
            body,
            usings,
        })
    }

    fn target_text(
        &self,
        member: &Member,
        member_decl: &Declaration,
        decl: &Declaration,
        target: &Target,
    ) -> TargetText {
        let fragments: Vec<&Fragment> = match target.fragment {
            Some(index) => decl.fragments.get(index).into_iter().collect(),
            None => decl.fragments.iter().collect(),
        };

        let mut text = TargetText::default();
        for fragment in fragments {
            if !fragment.attributes.trim().is_empty() {
                text.attributes.push(fragment.attributes.clone());
            }
            if text.documentation.is_empty() && !fragment.documentation.trim().is_empty() {
                text.documentation = fragment.documentation.clone();
            }
            if let Some(body) = fragment.body.as_deref().map(dedent) {
                if !body.is_empty() {
                    text.body.push(body);
                }
            }
            if target.options.copy_usings {
                text.usings.extend(fragment.usings.iter().cloned());
            }
        }

        if target.fragment.is_none() {
            if let Some(generated) = self.registry.generated(&target.key) {
                tracing::trace!(target = %target.key, "embedding generated text of target");
                if !generated.attributes.trim().is_empty() {
                    text.attributes.push(generated.attributes);
                }
                if text.documentation.is_empty() {
                    text.documentation = generated.documentation;
                }
                if !generated.body.trim().is_empty() {
                    text.body.push(generated.body);
                }
                if target.options.copy_usings {
                    text.usings.extend(generated.usings);
                }
            }
        }

        let substitution = Substitution::for_target(&decl.type_params, &target.type_arguments);
        let rename = member.kind == MemberKind::Type && target.options.rename_special_members;
        let rewrite = |s: &str| {
            let s = substitution.apply(s);
            if rename {
                rename_special_members(&s, &decl.name, &member_decl.name)
            } else {
                s
            }
        };

        text.body = text.body.iter().map(|b| rewrite(b)).collect();
        text.attributes = text.attributes.iter().map(|a| substitution.apply(a)).collect();
        text.documentation = substitution.apply(&text.documentation);
        text
    }
}
