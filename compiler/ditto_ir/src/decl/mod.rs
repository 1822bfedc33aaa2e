//! Declarations as seen by the copy engine.
//!
//! The host binder owns the real syntax trees. What reaches the engine is a
//! flattened view: identity, nesting, generic parameters, and the serialized
//! text of each partial fragment (attributes, documentation, body, usings).
//! Pattern rules and generic substitution operate on that text.

use crate::{Span, SpecialType, SymbolId, UnitId};

/// Category of a declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclKind {
    Class,
    Struct,
    Interface,
    Record,
    RecordStruct,
    Enum,
    Delegate,
    Method,
    Constructor,
    Destructor,
    Operator,
    Conversion,
    Accessor,
    LocalFunction,
    Property,
    Field,
}

impl DeclKind {
    /// Types a copy can be generated into or copied from.
    pub fn is_copyable_type(self) -> bool {
        matches!(
            self,
            DeclKind::Class
                | DeclKind::Struct
                | DeclKind::Interface
                | DeclKind::Record
                | DeclKind::RecordStruct
        )
    }

    pub fn is_type(self) -> bool {
        self.is_copyable_type() || matches!(self, DeclKind::Enum | DeclKind::Delegate)
    }

    /// Anything with a body of statements.
    pub fn is_method_like(self) -> bool {
        matches!(
            self,
            DeclKind::Method
                | DeclKind::Constructor
                | DeclKind::Destructor
                | DeclKind::Operator
                | DeclKind::Conversion
                | DeclKind::Accessor
                | DeclKind::LocalFunction
        )
    }

    /// Source keyword used when re-opening a type declaration.
    pub fn keyword(self) -> &'static str {
        match self {
            DeclKind::Class => "class",
            DeclKind::Struct => "struct",
            DeclKind::Interface => "interface",
            DeclKind::Record => "record",
            DeclKind::RecordStruct => "record struct",
            DeclKind::Enum => "enum",
            DeclKind::Delegate => "delegate",
            DeclKind::Method
            | DeclKind::Constructor
            | DeclKind::Destructor
            | DeclKind::Operator
            | DeclKind::Conversion
            | DeclKind::Accessor
            | DeclKind::LocalFunction
            | DeclKind::Property
            | DeclKind::Field => "",
        }
    }

    /// Human-readable name for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            DeclKind::Class => "class",
            DeclKind::Struct => "struct",
            DeclKind::Interface => "interface",
            DeclKind::Record => "record",
            DeclKind::RecordStruct => "record struct",
            DeclKind::Enum => "enum",
            DeclKind::Delegate => "delegate",
            DeclKind::Method => "method",
            DeclKind::Constructor => "constructor",
            DeclKind::Destructor => "destructor",
            DeclKind::Operator => "operator",
            DeclKind::Conversion => "conversion operator",
            DeclKind::Accessor => "accessor",
            DeclKind::LocalFunction => "local function",
            DeclKind::Property => "property",
            DeclKind::Field => "field",
        }
    }
}

/// Declared accessibility.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Accessibility {
    Public,
    #[default]
    Internal,
    ProtectedInternal,
    Protected,
    PrivateProtected,
    Private,
}

impl Accessibility {
    /// Visible to other compilation units.
    pub fn is_externally_visible(self) -> bool {
        matches!(
            self,
            Accessibility::Public | Accessibility::ProtectedInternal | Accessibility::Protected
        )
    }

    /// Restricted to the containing type (and, for the protected forms, its
    /// derived types, which the copy engine treats as the containing type).
    pub fn is_container_scoped(self) -> bool {
        matches!(
            self,
            Accessibility::Private | Accessibility::PrivateProtected | Accessibility::Protected
        )
    }
}

/// A constraint on a generic type parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Constraint {
    /// `class`
    ReferenceType,
    /// `struct`
    ValueType,
    /// `unmanaged`
    Unmanaged,
    /// `notnull`
    NotNull,
    /// `new()`
    Constructor,
    /// A base type or interface the argument must derive from.
    Type(String),
}

impl Constraint {
    pub fn describe(&self) -> String {
        match self {
            Constraint::ReferenceType => "class".to_owned(),
            Constraint::ValueType => "struct".to_owned(),
            Constraint::Unmanaged => "unmanaged".to_owned(),
            Constraint::NotNull => "notnull".to_owned(),
            Constraint::Constructor => "new()".to_owned(),
            Constraint::Type(name) => name.clone(),
        }
    }
}

/// A generic type parameter with its constraints.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeParam {
    pub name: String,
    pub constraints: Vec<Constraint>,
}

impl TypeParam {
    pub fn new(name: impl Into<String>) -> Self {
        TypeParam {
            name: name.into(),
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// One partial piece of a declaration.
///
/// Types may be split over several fragments; every other declaration has
/// exactly one. Text fields hold the serialized source as written.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Fragment {
    /// Selector name the host attached to this fragment, if any.
    pub name: Option<String>,
    /// Location of the fragment's declaration header.
    pub span: Span,
    /// Attribute lists, e.g. `[Serializable]\n[Obsolete("x")]`.
    pub attributes: String,
    /// Documentation comment lines, including the `///` markers.
    pub documentation: String,
    /// Text between the braces, or `None` when the fragment has no
    /// implementation (abstract, extern, or a partial definition).
    pub body: Option<String>,
    /// Using directives of the file holding this fragment.
    pub usings: Vec<String>,
}

impl Fragment {
    pub fn new(span: Span) -> Self {
        Fragment {
            span,
            ..Fragment::default()
        }
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// A declaration known to the program view.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Declaration {
    pub id: SymbolId,
    pub name: String,
    pub kind: DeclKind,
    /// Containing type or method; `None` for namespace members.
    pub container: Option<SymbolId>,
    /// Dotted namespace, empty for the global namespace.
    pub namespace: String,
    pub unit: UnitId,
    pub accessibility: Accessibility,
    /// Declared `partial` (open for extension).
    pub is_partial: bool,
    pub type_params: Vec<TypeParam>,
    /// Parameter type texts, for methods.
    pub parameters: Vec<String>,
    /// Declaration header without attributes, docs or body,
    /// e.g. `public partial int Compute(int a)`.
    pub signature: String,
    pub fragments: Vec<Fragment>,
    /// Base type and interface names as written.
    pub base_types: Vec<String>,
    /// Set when this declaration is a well-known primitive.
    pub special: Option<SpecialType>,
}

impl Declaration {
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    /// Any fragment carries an implementation.
    pub fn has_implementation(&self) -> bool {
        self.fragments.iter().any(Fragment::has_body)
    }

    /// Find a fragment by selector name.
    pub fn fragment_named(&self, name: &str) -> Option<(usize, &Fragment)> {
        self.fragments
            .iter()
            .enumerate()
            .find(|(_, fragment)| fragment.name.as_deref() == Some(name))
    }

    /// Primary location for diagnostics.
    pub fn span(&self) -> Span {
        self.fragments.first().map_or(Span::DUMMY, |f| f.span)
    }

    /// `Name<T, U>` form used in headers and cross references.
    pub fn display_name(&self) -> String {
        if self.type_params.is_empty() {
            self.name.clone()
        } else {
            let params: Vec<&str> = self.type_params.iter().map(|p| p.name.as_str()).collect();
            format!("{}<{}>", self.name, params.join(", "))
        }
    }
}
