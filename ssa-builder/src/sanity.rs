//! Structural checks on newly created instances
//!
//! Enabled by [`BuilderMode::SANITY_CHECK_FUNCTIONS`](crate::BuilderMode).

use crate::error::BuildError;
use crate::function::{Function, InstanceKind};

/// Verify the invariants every instance must satisfy before it is published
pub fn check_instance(function: &Function) -> Result<(), BuildError> {
    let fail = |reason: String| BuildError::SanityCheck {
        function: function.name().to_string(),
        reason,
    };

    let Some(kind) = function.instance_kind() else {
        return Err(fail("not an instance".to_string()));
    };

    let params = function.type_params();
    let args = function.type_args();
    if params.len() != args.len() {
        return Err(fail(format!(
            "{} type parameters but {} type arguments",
            params.len(),
            args.len()
        )));
    }

    if function.package().is_some() {
        return Err(fail("instances must not belong to a package".to_string()));
    }

    let sig = function.signature();
    if !sig.type_params.is_empty() || !sig.recv_type_params.is_empty() {
        return Err(fail(format!("signature {sig} still declares type parameters")));
    }

    match kind {
        InstanceKind::Specialized(subst) => {
            if args.iter().any(|arg| arg.contains_type_params()) {
                return Err(fail("specialized with non-concrete type arguments".to_string()));
            }
            if subst.len() != params.len() || params.iter().any(|p| subst.get(p).is_none()) {
                return Err(fail("substitution does not bind every type parameter".to_string()));
            }
            if sig.contains_type_params() {
                return Err(fail(format!("specialized signature {sig} is not concrete")));
            }
        }
        InstanceKind::Wrapper => {}
    }

    Ok(())
}
