//! Resolved type model for the SSA builder
//!
//! The type checker hands the SSA builder fully resolved types, function
//! objects, declaration syntax and per-package type information. This crate
//! defines those shapes together with the operations the builder consumes
//! from the front end:
//!
//! - **Types**: structurally comparable [`Type`]s, shared [`TypeParamList`]s and [`Signature`]s
//! - **Substitution**: rewriting type expressions under a parameter-to-argument mapping
//! - **Instantiation**: [`instantiate_signature`] for functions, [`instantiate_method`] for methods
//! - **Syntax**: [`FuncDecl`] handles that can be cloned and rewritten for specialization

pub mod display;
pub mod error;
pub mod instantiate;
pub mod object;
pub mod subst;
pub mod syntax;
pub mod types;

// Re-export public API
pub use display::TypeArgs;
pub use error::InstantiateError;
pub use instantiate::{instantiate_method, instantiate_signature};
pub use object::Func;
pub use subst::Substitution;
pub use syntax::{FuncDecl, Info, Stmt};
pub use types::{
    BasicKind, Field, Param, Signature, Type, TypeParam, TypeParamGenerator, TypeParamId,
    TypeParamList,
};
