//! In-memory program view.
//!
//! A self-contained implementation of [`ProgramView`] for hosts that hand the
//! engine a flattened declaration table instead of a live binder.
//!
//! # Name lookup
//!
//! The first segment of a path is searched through the scope chain of the
//! context: the context declaration itself, its containers (innermost first),
//! then its namespace and each parent namespace up to the global namespace.
//! The first scope with any match wins. Remaining segments are members of
//! the previous segment's matches. A segment without generic arguments
//! prefers non-generic declarations and falls back to any arity. Constructors
//! and destructors are not found by name.

mod builder;

pub use builder::{DeclSpec, ProgramBuilder};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::path::{ReferencePath, Segment};
use crate::{
    Accessibility, Constraint, DeclKind, Declaration, Lookup, ProgramView, SpecialType, SymbolId,
    TypeArg,
};

/// Flat declaration table with scope indexes.
#[derive(Clone, Debug, Default)]
pub struct Program {
    decls: Vec<Declaration>,
    /// Declarations directly contained in a declaration.
    children: FxHashMap<SymbolId, Vec<SymbolId>>,
    /// Top-level declarations of each namespace (`""` is global).
    namespace_members: FxHashMap<String, Vec<SymbolId>>,
    /// Every namespace and namespace prefix that exists.
    namespaces: FxHashSet<String>,
}

#[derive(Clone, Debug)]
enum Scope {
    Namespace(String),
    Symbol(SymbolId),
}

impl Program {
    pub fn builder() -> ProgramBuilder {
        ProgramBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.iter()
    }

    /// Find a declaration by dotted qualified name (no generics).
    pub fn find(&self, qualified: &str) -> Option<SymbolId> {
        self.decls
            .iter()
            .find(|d| self.qualified_name(d.id) == qualified)
            .map(|d| d.id)
    }

    fn insert(&mut self, decl: Declaration) {
        match decl.container {
            Some(container) => self.children.entry(container).or_default().push(decl.id),
            None => {
                self.namespace_members
                    .entry(decl.namespace.clone())
                    .or_default()
                    .push(decl.id);
                let mut prefix = String::new();
                for part in decl.namespace.split('.').filter(|p| !p.is_empty()) {
                    if !prefix.is_empty() {
                        prefix.push('.');
                    }
                    prefix.push_str(part);
                    self.namespaces.insert(prefix.clone());
                }
            }
        }
        self.decls.push(decl);
    }

    fn decl(&self, id: SymbolId) -> Option<&Declaration> {
        self.decls.get(id.index())
    }

    /// Scopes searched for the first segment of a relative path.
    fn scope_chain(&self, context: SymbolId) -> Vec<Scope> {
        let mut chain = vec![Scope::Symbol(context)];
        chain.extend(self.containers(context).into_iter().map(Scope::Symbol));

        let namespace = self.decl(context).map_or("", |d| d.namespace.as_str());
        let mut current = namespace.to_owned();
        while !current.is_empty() {
            chain.push(Scope::Namespace(current.clone()));
            current = match current.rfind('.') {
                Some(dot) => current[..dot].to_owned(),
                None => String::new(),
            };
        }
        chain.push(Scope::Namespace(String::new()));
        chain
    }

    fn members_named(&self, scope: &Scope, segment: &Segment) -> Vec<Scope> {
        let (candidates, namespace) = match scope {
            Scope::Symbol(id) => (self.children.get(id), None),
            Scope::Namespace(ns) => (self.namespace_members.get(ns), Some(ns)),
        };
        let named: Vec<SymbolId> = candidates
            .into_iter()
            .flatten()
            .copied()
            .filter(|id| {
                self.decl(*id).is_some_and(|d| {
                    d.name == segment.name
                        && !matches!(d.kind, DeclKind::Constructor | DeclKind::Destructor)
                })
            })
            .collect();
        let mut found: Vec<Scope> = self
            .filter_arity(named, segment.type_args.len())
            .into_iter()
            .map(Scope::Symbol)
            .collect();

        if let Some(ns) = namespace {
            if segment.type_args.is_empty() {
                let nested = if ns.is_empty() {
                    segment.name.clone()
                } else {
                    format!("{ns}.{}", segment.name)
                };
                if self.namespaces.contains(&nested) {
                    found.push(Scope::Namespace(nested));
                }
            }
        }
        found
    }

    fn filter_arity(&self, named: Vec<SymbolId>, arity: usize) -> Vec<SymbolId> {
        let arity_of = |id: &SymbolId| self.decl(*id).map_or(0, Declaration::arity);
        if arity > 0 {
            return named.into_iter().filter(|id| arity_of(id) == arity).collect();
        }
        if named.iter().any(|id| arity_of(id) == 0) {
            named.into_iter().filter(|id| arity_of(id) == 0).collect()
        } else {
            named
        }
    }

    fn resolve_path(&self, path: &ReferencePath, context: SymbolId) -> Vec<SymbolId> {
        let scopes = if path.global {
            vec![Scope::Namespace(String::new())]
        } else {
            self.scope_chain(context)
        };

        let mut current = Vec::new();
        for scope in &scopes {
            let found = self.members_named(scope, &path.segments[0]);
            if !found.is_empty() {
                current = found;
                break;
            }
        }
        for segment in &path.segments[1..] {
            current = current
                .iter()
                .flat_map(|scope| self.members_named(scope, segment))
                .collect();
        }

        current
            .into_iter()
            .filter_map(|scope| match scope {
                Scope::Symbol(id) => Some(id),
                Scope::Namespace(_) => None,
            })
            .collect()
    }

    /// Type parameter named `name` visible from `context`.
    fn type_parameter_in_scope(&self, name: &str, context: SymbolId) -> Option<Vec<Constraint>> {
        std::iter::once(context)
            .chain(self.containers(context))
            .filter_map(|id| self.decl(id))
            .flat_map(|d| d.type_params.iter())
            .find(|p| p.name == name)
            .map(|p| p.constraints.clone())
    }

    fn is_value_type(&self, arg: &TypeArg) -> bool {
        if let Some(special) = arg.special {
            return special.is_value_type();
        }
        arg.symbol.and_then(|id| self.decl(id)).is_some_and(|d| {
            matches!(
                d.kind,
                DeclKind::Struct | DeclKind::RecordStruct | DeclKind::Enum
            )
        })
    }

    /// Whether `id` names `base` or (transitively) derives from it.
    fn derives_from(&self, id: SymbolId, base: &str, depth: usize) -> bool {
        let Some(decl) = self.decl(id) else {
            return false;
        };
        if same_type_name(&decl.name, base) || same_type_name(&self.qualified_name(id), base) {
            return true;
        }
        if depth > 32 {
            return false;
        }
        decl.base_types.iter().any(|written| {
            same_type_name(written, base)
                || matches!(self.lookup(written, id), Lookup::Unique(parent) if self.derives_from(parent, base, depth + 1))
        })
    }

    fn has_public_parameterless_constructor(&self, id: SymbolId) -> bool {
        let constructors: Vec<&Declaration> = self
            .children(id)
            .into_iter()
            .filter_map(|c| self.decl(c))
            .filter(|d| d.kind == DeclKind::Constructor)
            .collect();
        constructors.is_empty()
            || constructors
                .iter()
                .any(|c| c.parameters.is_empty() && c.accessibility == Accessibility::Public)
    }

    fn format_type_arg(&self, text: &str, context: SymbolId) -> Option<String> {
        let arg = self.resolve_type_argument(text, context)?;
        let mut rendered = match arg.special {
            Some(special) => special.keyword().to_owned(),
            None => arg.qualified_name,
        };
        if arg.nullable {
            rendered.push('?');
        }
        Some(rendered)
    }
}

/// Compare type names as written, ignoring `global::`, whitespace and
/// keyword-versus-metadata spelling of primitives.
fn same_type_name(a: &str, b: &str) -> bool {
    let normalize = |s: &str| -> String {
        let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        s.strip_prefix("global::").map(str::to_owned).unwrap_or(s)
    };
    let (a, b) = (normalize(a), normalize(b));
    if a == b {
        return true;
    }
    match (SpecialType::parse(&a), SpecialType::parse(&b)) {
        (Some(x), Some(y)) => x == y,
        _ => {
            let last = |s: &str| s.rsplit('.').next().unwrap_or("").to_owned();
            (!a.contains('.') && last(&b) == a) || (!b.contains('.') && last(&a) == b)
        }
    }
}

/// Extract the value of the first `cref="..."` attribute.
fn extract_cref(doc_comment: &str) -> Option<&str> {
    let start = doc_comment.find("cref=\"")? + "cref=\"".len();
    let len = doc_comment[start..].find('"')?;
    Some(&doc_comment[start..start + len])
}

impl ProgramView for Program {
    fn declaration(&self, id: SymbolId) -> Option<&Declaration> {
        self.decl(id)
    }

    fn children(&self, id: SymbolId) -> Vec<SymbolId> {
        self.children.get(&id).cloned().unwrap_or_default()
    }

    fn lookup(&self, reference: &str, context: SymbolId) -> Lookup {
        match ReferencePath::parse(reference) {
            Some(path) if !path.is_call_like() => {
                Lookup::from_candidates(self.resolve_path(&path, context))
            }
            _ => Lookup::NotFound,
        }
    }

    fn bind_documentation(&self, doc_comment: &str, context: SymbolId) -> Lookup {
        let Some(path) = extract_cref(doc_comment).and_then(ReferencePath::parse) else {
            return Lookup::NotFound;
        };
        let candidates = self.resolve_path(&path, context);
        let Some(parameters) = &path.parameters else {
            return Lookup::from_candidates(candidates);
        };

        let matching = candidates
            .into_iter()
            .filter(|id| {
                self.decl(*id).is_some_and(|d| {
                    d.kind.is_method_like()
                        && d.parameters.len() == parameters.len()
                        && d
                            .parameters
                            .iter()
                            .zip(parameters)
                            .all(|(declared, written)| same_type_name(declared, written))
                })
            })
            .collect();
        Lookup::from_candidates(matching)
    }

    fn resolve_type_argument(&self, text: &str, context: SymbolId) -> Option<TypeArg> {
        let text = text.trim();
        let (text, nullable) = match text.strip_suffix('?') {
            Some(inner) => (inner.trim(), true),
            None => (text, false),
        };

        if let Some(special) = SpecialType::parse(text) {
            return Some(TypeArg::special(special).with_nullable(nullable));
        }
        if let Some(constraints) = self.type_parameter_in_scope(text, context) {
            return Some(TypeArg::type_parameter(text, constraints).with_nullable(nullable));
        }

        let path = ReferencePath::parse(text)?;
        if path.is_call_like() {
            return None;
        }
        let types: Vec<SymbolId> = self
            .resolve_path(&path, context)
            .into_iter()
            .filter(|id| self.decl(*id).is_some_and(|d| d.kind.is_type()))
            .collect();
        let [symbol] = types.as_slice() else {
            return None;
        };
        if let Some(special) = self.decl(*symbol).and_then(|d| d.special) {
            return Some(TypeArg::special(special).with_nullable(nullable));
        }

        let mut qualified = format!("global::{}", self.qualified_name(*symbol));
        let args = &path.last().type_args;
        if !args.is_empty() {
            let rendered: Option<Vec<String>> = args
                .iter()
                .map(|a| self.format_type_arg(a, context))
                .collect();
            qualified.push('<');
            qualified.push_str(&rendered?.join(", "));
            qualified.push('>');
        }
        Some(TypeArg::named(qualified, Some(*symbol)).with_nullable(nullable))
    }

    fn satisfies(&self, arg: &TypeArg, constraint: &Constraint) -> bool {
        if let Some(own) = &arg.parameter_constraints {
            let has = |c: &Constraint| own.contains(c);
            return match constraint {
                Constraint::ReferenceType => has(&Constraint::ReferenceType),
                Constraint::ValueType => {
                    has(&Constraint::ValueType) || has(&Constraint::Unmanaged)
                }
                Constraint::Unmanaged => has(&Constraint::Unmanaged),
                Constraint::NotNull => {
                    has(&Constraint::NotNull)
                        || has(&Constraint::ValueType)
                        || has(&Constraint::Unmanaged)
                }
                Constraint::Constructor => {
                    has(&Constraint::Constructor)
                        || has(&Constraint::ValueType)
                        || has(&Constraint::Unmanaged)
                }
                Constraint::Type(name) => own.iter().any(|c| match c {
                    Constraint::Type(other) => same_type_name(other, name),
                    _ => false,
                }),
            };
        }

        let value_type = self.is_value_type(arg);
        match constraint {
            Constraint::ReferenceType => !value_type,
            Constraint::ValueType => value_type && !arg.nullable,
            Constraint::Unmanaged => value_type && !arg.nullable,
            Constraint::NotNull => !arg.nullable,
            Constraint::Constructor => {
                value_type
                    || arg
                        .symbol
                        .is_some_and(|id| self.has_public_parameterless_constructor(id))
                    || arg.special == Some(SpecialType::Object)
            }
            Constraint::Type(name) => match (arg.special, arg.symbol) {
                (_, Some(id)) => self.derives_from(id, name, 0),
                (Some(special), None) => {
                    same_type_name(special.keyword(), name) || same_type_name("object", name)
                }
                (None, None) => false,
            },
        }
    }

    fn is_accessible(&self, target: SymbolId, from: SymbolId) -> bool {
        let Some(from_unit) = self.decl(from).map(|d| d.unit) else {
            return false;
        };
        std::iter::once(target)
            .chain(self.containers(target))
            .all(|id| {
                let Some(decl) = self.decl(id) else {
                    return false;
                };
                if decl.unit != from_unit && !decl.accessibility.is_externally_visible() {
                    return false;
                }
                if decl.accessibility.is_container_scoped() {
                    if let Some(container) = decl.container {
                        return from == container || self.is_within(from, container);
                    }
                }
                true
            })
    }
}
