//! Front-end instantiation of generic signatures and methods

use crate::error::InstantiateError;
use crate::object::Func;
use crate::subst::Substitution;
use crate::types::{Signature, Type, TypeParamList};
use std::sync::Arc;

fn check_type_args(
    name: &str,
    params: &TypeParamList,
    targs: &[Type],
) -> Result<(), InstantiateError> {
    if params.len() != targs.len() {
        return Err(InstantiateError::ArityMismatch {
            name: name.to_string(),
            expected: params.len(),
            found: targs.len(),
        });
    }

    if let Some((index, arg)) = targs.iter().enumerate().find(|(_, t)| t.contains_invalid()) {
        return Err(InstantiateError::InvalidTypeArgument {
            argument: arg.to_string(),
            index,
        });
    }

    Ok(())
}

/// Instantiate a generic function signature with `targs`
///
/// Only the signature's own type parameters are bound, so a method signature
/// (whose parameters belong to its receiver) is rejected here; use
/// [`instantiate_method`] instead. The result has no type parameters.
pub fn instantiate_signature(
    sig: &Signature,
    targs: &[Type],
) -> Result<Signature, InstantiateError> {
    check_type_args("signature", &sig.type_params, targs)?;

    let subst = Substitution::new(&sig.type_params, targs);
    let mut instance = subst.apply_signature(sig).into_owned();
    instance.type_params = TypeParamList::empty();
    Ok(instance)
}

/// Instantiate a method of a generic receiver type with `targs`
///
/// The receiver's type parameters are threaded through the receiver,
/// parameters and results alike.
pub fn instantiate_method(method: &Arc<Func>, targs: &[Type]) -> Result<Func, InstantiateError> {
    let sig = &method.sig;
    if sig.recv.is_none() {
        return Err(InstantiateError::ArityMismatch {
            name: method.full_name(),
            expected: 0,
            found: targs.len(),
        });
    }
    check_type_args(&method.full_name(), &sig.recv_type_params, targs)?;

    let subst = Substitution::new(&sig.recv_type_params, targs);
    let mut instance = subst.apply_signature(sig).into_owned();
    instance.recv_type_params = TypeParamList::empty();

    Ok(Func {
        name: method.name.clone(),
        package: method.package.clone(),
        sig: Arc::new(instance),
        span: method.span,
        origin: Some(Arc::clone(method.origin.as_ref().unwrap_or(method))),
    })
}
