//! Error types for front-end instantiation
//!
//! Following the miette diagnostic patterns used across the compiler.

use miette::Diagnostic;
use thiserror::Error;

/// Signature or method instantiation rejected by the front end
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum InstantiateError {
    #[error("Arity mismatch: {name} expects {expected} type arguments, found {found}")]
    #[diagnostic(
        code(ssa::types::instantiate::arity_mismatch),
        help("Ensure one type argument is supplied per type parameter")
    )]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid type argument {argument} at position {index}")]
    #[diagnostic(
        code(ssa::types::instantiate::invalid_argument),
        help("Type arguments must be fully resolved before instantiation")
    )]
    InvalidTypeArgument { argument: String, index: usize },
}
