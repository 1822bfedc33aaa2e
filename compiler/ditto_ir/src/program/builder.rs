//! Construction of in-memory programs.

use crate::{
    Accessibility, DeclKind, Declaration, Fragment, Span, SpecialType, SymbolId, TypeParam, UnitId,
};

use super::Program;

/// Description of one declaration to add to a [`ProgramBuilder`].
///
/// Nested declarations inherit namespace and unit from their container.
#[derive(Clone, Debug)]
pub struct DeclSpec {
    name: String,
    kind: DeclKind,
    container: Option<SymbolId>,
    namespace: String,
    unit: UnitId,
    accessibility: Accessibility,
    is_partial: bool,
    type_params: Vec<TypeParam>,
    parameters: Vec<String>,
    return_type: String,
    signature: Option<String>,
    fragments: Vec<Fragment>,
    base_types: Vec<String>,
    special: Option<SpecialType>,
}

impl DeclSpec {
    pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        DeclSpec {
            name: name.into(),
            kind,
            container: None,
            namespace: String::new(),
            unit: UnitId::default(),
            accessibility: Accessibility::Public,
            is_partial: false,
            type_params: Vec::new(),
            parameters: Vec::new(),
            return_type: "void".to_owned(),
            signature: None,
            fragments: Vec::new(),
            base_types: Vec::new(),
            special: None,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(DeclKind::Class, name)
    }

    pub fn structure(name: impl Into<String>) -> Self {
        Self::new(DeclKind::Struct, name)
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self::new(DeclKind::Method, name)
    }

    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn inside(mut self, container: SymbolId) -> Self {
        self.container = Some(container);
        self
    }

    #[must_use]
    pub fn unit(mut self, unit: UnitId) -> Self {
        self.unit = unit;
        self
    }

    #[must_use]
    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    #[must_use]
    pub fn partial(mut self) -> Self {
        self.is_partial = true;
        self
    }

    #[must_use]
    pub fn type_param(mut self, param: TypeParam) -> Self {
        self.type_params.push(param);
        self
    }

    #[must_use]
    pub fn parameter(mut self, ty: impl Into<String>) -> Self {
        self.parameters.push(ty.into());
        self
    }

    #[must_use]
    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = ty.into();
        self
    }

    #[must_use]
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    #[must_use]
    pub fn base_type(mut self, name: impl Into<String>) -> Self {
        self.base_types.push(name.into());
        self
    }

    #[must_use]
    pub fn special(mut self, special: SpecialType) -> Self {
        self.special = Some(special);
        self
    }

    /// Add a complete fragment.
    #[must_use]
    pub fn fragment(mut self, fragment: Fragment) -> Self {
        self.fragments.push(fragment);
        self
    }

    /// Set the body of the first fragment, creating it if needed.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.first_fragment().body = Some(body.into());
        self
    }

    #[must_use]
    pub fn attributes(mut self, attributes: impl Into<String>) -> Self {
        self.first_fragment().attributes = attributes.into();
        self
    }

    #[must_use]
    pub fn documentation(mut self, documentation: impl Into<String>) -> Self {
        self.first_fragment().documentation = documentation.into();
        self
    }

    #[must_use]
    pub fn using(mut self, using: impl Into<String>) -> Self {
        self.first_fragment().usings.push(using.into());
        self
    }

    #[must_use]
    pub fn span(mut self, span: Span) -> Self {
        self.first_fragment().span = span;
        self
    }

    fn first_fragment(&mut self) -> &mut Fragment {
        if self.fragments.is_empty() {
            self.fragments.push(Fragment::default());
        }
        &mut self.fragments[0]
    }

    fn default_signature(&self) -> String {
        let mut words: Vec<String> = Vec::new();
        words.push(accessibility_keyword(self.accessibility).to_owned());
        if self.is_partial {
            words.push("partial".to_owned());
        }
        if self.kind.is_type() {
            words.push(self.kind.keyword().to_owned());
            words.push(display_name(&self.name, &self.type_params));
        } else {
            words.push(self.return_type.clone());
            words.push(format!(
                "{}({})",
                display_name(&self.name, &self.type_params),
                self.parameters
                    .iter()
                    .enumerate()
                    .map(|(i, ty)| format!("{ty} arg{i}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        words.retain(|w| !w.is_empty());
        words.join(" ")
    }
}

fn display_name(name: &str, params: &[TypeParam]) -> String {
    if params.is_empty() {
        name.to_owned()
    } else {
        let params: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        format!("{name}<{}>", params.join(", "))
    }
}

fn accessibility_keyword(accessibility: Accessibility) -> &'static str {
    match accessibility {
        Accessibility::Public => "public",
        Accessibility::Internal => "internal",
        Accessibility::ProtectedInternal => "protected internal",
        Accessibility::Protected => "protected",
        Accessibility::PrivateProtected => "private protected",
        Accessibility::Private => "private",
    }
}

/// Incrementally builds a [`Program`].
#[derive(Default)]
pub struct ProgramBuilder {
    program: Program,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration and return its handle.
    ///
    /// # Panics
    /// Panics if the container handle was not produced by this builder.
    pub fn add(&mut self, spec: DeclSpec) -> SymbolId {
        let raw = u32::try_from(self.program.decls.len()).unwrap_or(u32::MAX);
        let id = SymbolId::from_raw(raw);

        let (namespace, unit) = match spec.container {
            Some(container) => {
                let parent = &self.program.decls[container.index()];
                (parent.namespace.clone(), parent.unit)
            }
            None => (spec.namespace.clone(), spec.unit),
        };
        let signature = spec
            .signature
            .clone()
            .unwrap_or_else(|| spec.default_signature());
        let mut fragments = spec.fragments;
        if fragments.is_empty() {
            fragments.push(Fragment::default());
        }

        let decl = Declaration {
            id,
            name: spec.name,
            kind: spec.kind,
            container: spec.container,
            namespace,
            unit,
            accessibility: spec.accessibility,
            is_partial: spec.is_partial,
            type_params: spec.type_params,
            parameters: spec.parameters,
            signature,
            fragments,
            base_types: spec.base_types,
            special: spec.special,
        };
        self.program.insert(decl);
        id
    }

    pub fn build(self) -> Program {
        self.program
    }
}
