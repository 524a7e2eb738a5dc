//! Error types for the SSA builder
//!
//! Following the miette patterns of the front end for consistent reporting.

use miette::{Diagnostic, SourceSpan};
use ssa_types::InstantiateError;
use thiserror::Error;

/// Internal consistency failures while creating function nodes
///
/// None of these are user errors: each one means the type checker accepted
/// something the builder cannot realize, and the build should abort.
#[derive(Error, Diagnostic, Debug)]
pub enum BuildError {
    #[error("Cannot instantiate {template} with type arguments {type_args}")]
    #[diagnostic(
        code(ssa::build::instantiation_failed),
        help("The type checker accepted an instantiation the builder cannot realize; this is a compiler bug")
    )]
    Instantiation {
        template: String,
        type_args: String,
        #[label("generic function declared here")]
        span: Option<SourceSpan>,
        #[source]
        source: InstantiateError,
    },

    #[error("{function} is not a generic function")]
    #[diagnostic(
        code(ssa::build::not_generic),
        help("Only functions with type parameters and no type arguments have instances")
    )]
    NotGeneric { function: String },

    #[error("Cannot create {function}: the program already holds {count} functions")]
    #[diagnostic(
        code(ssa::build::function_limit),
        help("Function ids are 32-bit; split the program into smaller builds")
    )]
    FunctionLimit { function: String, count: usize },

    #[error("Sanity check failed for {function}: {reason}")]
    #[diagnostic(code(ssa::build::sanity_check))]
    SanityCheck { function: String, reason: String },
}

/// Builder mode string contains an unknown flag letter
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("Invalid builder mode flag {flag:?} in {mode:?}")]
#[diagnostic(
    code(ssa::build::mode),
    help("Valid flags are C (sanity check), F (print functions) and G (instantiate generics)")
)]
pub struct ModeParseError {
    pub mode: String,
    pub flag: char,
}
