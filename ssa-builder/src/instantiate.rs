//! Creation of instance nodes for generic functions
//!
//! Given a template and a canonical type-argument tuple this decides how the
//! instance is built:
//!
//! - **Methods** are instantiated through the receiver, so the receiver's type
//!   parameters are threaded through the whole signature
//! - **Concrete** arguments (with `INSTANTIATE_GENERICS`) give a fully
//!   specialized instance carrying the substitution for its body
//! - **Anything else** gives a forwarding wrapper around the generic body
//!
//! Only the signature is built here. Runs under the program's generics lock.

use crate::canon::TypeList;
use crate::error::BuildError;
use crate::function::{Function, Instance, InstanceKind};
use crate::instance::InstanceSet;
use crate::mode::BuilderMode;
use crate::program::Program;
use crate::sanity;
use ssa_types::{instantiate_signature, InstantiateError, Substitution, Type};
use std::sync::Arc;

/// No element still refers to a type parameter of an enclosing generic function
pub fn is_concrete(targs: &[Type]) -> bool {
    !targs.iter().any(Type::contains_type_params)
}

pub(crate) fn instantiate(
    prog: &Program,
    set: &InstanceSet,
    targs: &TypeList,
) -> Result<Arc<Function>, BuildError> {
    let template = set.template();
    let fail = |source: InstantiateError| BuildError::Instantiation {
        template: template.object().full_name(),
        type_args: targs.to_string(),
        span: Some(template.span()),
        source,
    };

    let (object, signature) = if template.signature().recv.is_some() {
        let object = prog
            .canon()
            .instantiate_method(template.object(), targs)
            .map_err(fail)?;
        let signature = Arc::clone(&object.sig);
        (object, signature)
    } else {
        let sig = instantiate_signature(template.signature(), targs).map_err(fail)?;
        // The generic function object stands in until the instance has its own
        (Arc::clone(template.object()), prog.canon().signature(sig))
    };

    let mode = prog.mode();
    let specialize = mode.contains(BuilderMode::INSTANTIATE_GENERICS) && is_concrete(targs);
    let (synthetic, kind) = if specialize {
        (
            format!("instance of {}", template.name()),
            InstanceKind::Specialized(Substitution::new(template.type_params(), targs)),
        )
    } else {
        (
            format!("instantiation wrapper of {}", template.name()),
            InstanceKind::Wrapper,
        )
    };

    let name = format!("{}{}", template.name(), targs);
    let instance = prog.try_insert_function(&name, |id| {
        let function = Function {
            id,
            name: name.clone(),
            span: object.span,
            object,
            signature,
            synthetic: Some(synthetic),
            syntax: set.syntax().cloned(),
            info: set.info().cloned(),
            package: None,
            type_params: template.type_params().clone(),
            instance: Some(Instance {
                origin: template.id(),
                type_args: targs.clone(),
                kind,
            }),
        };
        if mode.contains(BuilderMode::SANITY_CHECK_FUNCTIONS) {
            sanity::check_instance(&function)?;
        }
        Ok(function)
    })?;

    tracing::debug!(
        template = %template,
        instance = %instance.name(),
        specialized = instance.substitution().is_some(),
        "created instance"
    );
    if mode.contains(BuilderMode::PRINT_FUNCTIONS) {
        tracing::info!(
            "{} ({}): {}",
            instance.name(),
            instance.synthetic().unwrap_or_default(),
            instance.signature()
        );
    }

    Ok(instance)
}
