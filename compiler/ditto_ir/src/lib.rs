//! Declaration model for the ditto copy generator.
//!
//! The host binder is an external collaborator. This crate defines the
//! shape of what it hands the engine:
//! - [`Declaration`] and its partial [`Fragment`]s, carrying serialized text
//! - [`SymbolId`] live handles and durable [`SymbolKey`]s
//! - the [`ProgramView`] trait for lookup, speculative binding and
//!   constraint queries
//!
//! [`Program`] is an in-memory `ProgramView` built from a declaration table.

mod decl;
pub mod path;
pub mod program;
mod span;
mod special;
mod symbol;
mod view;

pub use decl::{Accessibility, Constraint, DeclKind, Declaration, Fragment, TypeParam};
pub use program::{DeclSpec, Program, ProgramBuilder};
pub use span::Span;
pub use special::SpecialType;
pub use symbol::{SymbolId, SymbolKey, UnitId};
pub use view::{Lookup, ProgramView, TypeArg};
