//! Copy-from generation engine.
//!
//! A member (a partial type or partial method) annotated with copy-from
//! references gets its body generated from the serialized text of the
//! referenced declarations:
//! - references are resolved against a [`ditto_ir::ProgramView`]
//! - candidates are validated by one predicate set, run either in
//!   analysis mode (every problem) or generation mode (first blocking one)
//! - generic parameters are substituted and pattern rules rewrite the text
//! - members that copy from other members of the same group are emitted
//!   in dependency order
//!
//! # Entry points
//!
//! [`Generator::generate`] returns a [`GenerationReport`] with the emitted
//! sources; [`Generator::analyze`] returns diagnostics without emitting.

mod cancel;
mod config;
pub mod diagnostics;
pub mod emit;
mod error;
mod generator;
pub mod member;
pub mod pattern;
pub mod registry;
pub mod resolve;
pub mod schedule;
pub mod substitute;
pub mod text;
pub mod transform;
pub mod validate;

pub use cancel::CancellationToken;
pub use config::{
    DocumentationPolicy, GeneratorConfig, DEPENDENCY_CACHE_CAPACITY, PATTERN_CACHE_CAPACITY,
};
pub use emit::{EmittedSource, HintNameProvider, QualifiedHintNames};
pub use error::{GenerateError, PatternError};
pub use generator::{GenerationReport, Generator, Rejection};
pub use member::{
    Candidate, CandidateSet, CopyRequest, MemberKind, PatternRequest, Reference, TargetOptions,
};
pub use schedule::Stalled;
