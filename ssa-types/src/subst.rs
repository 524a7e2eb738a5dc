//! Type parameter substitution
//!
//! A [`Substitution`] maps the type parameters of one generic declaration to
//! the type arguments of one instantiation. Applying it never mutates the
//! input: subtrees that mention none of the mapped parameters are returned
//! borrowed, so template types are shared rather than copied.

use crate::types::{Field, Param, Signature, Type, TypeParam, TypeParamId, TypeParamList};
use std::borrow::Cow;
use std::collections::HashMap;

/// Substitution mapping type parameters to type arguments
#[derive(Debug, Clone, Default)]
pub struct Substitution {
    params: TypeParamList,
    mappings: HashMap<TypeParamId, Type>,
}

impl Substitution {
    /// Build the mapping `params[i] -> args[i]`
    ///
    /// The caller has already checked arity; extra entries on either side are ignored.
    pub fn new(params: &TypeParamList, args: &[Type]) -> Self {
        debug_assert_eq!(params.len(), args.len(), "substitution arity mismatch");
        let mappings = params
            .iter()
            .zip(args)
            .map(|(param, arg)| (param.id, arg.clone()))
            .collect();
        Self {
            params: params.clone(),
            mappings,
        }
    }

    /// Get the type that a parameter maps to
    pub fn get(&self, param: &TypeParam) -> Option<&Type> {
        self.mappings.get(&param.id)
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// The parameters this substitution binds, in declaration order
    pub fn params(&self) -> &TypeParamList {
        &self.params
    }

    /// Iterate `(parameter, argument)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&TypeParam, &Type)> {
        self.params
            .iter()
            .filter_map(|param| self.mappings.get(&param.id).map(|ty| (param, ty)))
    }

    /// Apply this substitution to a type
    pub fn apply<'a>(&self, ty: &'a Type) -> Cow<'a, Type> {
        if self.is_empty() {
            return Cow::Borrowed(ty);
        }

        match ty {
            Type::Basic(_) => Cow::Borrowed(ty),
            Type::Param(param) => match self.mappings.get(&param.id) {
                Some(arg) => Cow::Owned(arg.clone()),
                None => Cow::Borrowed(ty),
            },
            Type::Named { name, args } => match self.apply_all(args) {
                Some(args) => Cow::Owned(Type::Named {
                    name: name.clone(),
                    args,
                }),
                None => Cow::Borrowed(ty),
            },
            Type::Pointer(elem) => match self.apply(elem) {
                Cow::Owned(elem) => Cow::Owned(Type::pointer(elem)),
                Cow::Borrowed(_) => Cow::Borrowed(ty),
            },
            Type::Slice(elem) => match self.apply(elem) {
                Cow::Owned(elem) => Cow::Owned(Type::slice(elem)),
                Cow::Borrowed(_) => Cow::Borrowed(ty),
            },
            Type::Array { len, elem } => match self.apply(elem) {
                Cow::Owned(elem) => Cow::Owned(Type::array(*len, elem)),
                Cow::Borrowed(_) => Cow::Borrowed(ty),
            },
            Type::Map { key, value } => match (self.apply(key), self.apply(value)) {
                (Cow::Borrowed(_), Cow::Borrowed(_)) => Cow::Borrowed(ty),
                (key, value) => Cow::Owned(Type::map(key.into_owned(), value.into_owned())),
            },
            Type::Struct(fields) => {
                let mut rewritten: Option<Vec<Field>> = None;
                for (i, field) in fields.iter().enumerate() {
                    match self.apply(&field.ty) {
                        Cow::Owned(new_ty) => rewritten
                            .get_or_insert_with(|| fields[..i].to_vec())
                            .push(Field {
                                name: field.name.clone(),
                                ty: new_ty,
                            }),
                        Cow::Borrowed(_) => {
                            if let Some(out) = rewritten.as_mut() {
                                out.push(field.clone());
                            }
                        }
                    }
                }
                match rewritten {
                    Some(fields) => Cow::Owned(Type::Struct(fields)),
                    None => Cow::Borrowed(ty),
                }
            }
            Type::Func(sig) => match self.apply_signature(sig) {
                Cow::Owned(sig) => Cow::Owned(Type::func(sig)),
                Cow::Borrowed(_) => Cow::Borrowed(ty),
            },
        }
    }

    /// Apply this substitution to the receiver, parameters and results of a signature
    ///
    /// Type parameter lists are left as they are; instantiation clears them.
    pub fn apply_signature<'a>(&self, sig: &'a Signature) -> Cow<'a, Signature> {
        let recv = sig.recv.as_ref().and_then(|recv| self.apply_param(recv));
        let params = self.apply_params(&sig.params);
        let results = self.apply_all(&sig.results);

        if recv.is_none() && params.is_none() && results.is_none() {
            return Cow::Borrowed(sig);
        }

        Cow::Owned(Signature {
            recv: recv.or_else(|| sig.recv.clone()),
            recv_type_params: sig.recv_type_params.clone(),
            type_params: sig.type_params.clone(),
            params: params.unwrap_or_else(|| sig.params.clone()),
            results: results.unwrap_or_else(|| sig.results.clone()),
            variadic: sig.variadic,
        })
    }

    /// Rewrite a list of types, returning `None` when no element changed
    fn apply_all(&self, types: &[Type]) -> Option<Vec<Type>> {
        let mut rewritten: Option<Vec<Type>> = None;
        for (i, ty) in types.iter().enumerate() {
            match self.apply(ty) {
                Cow::Owned(new_ty) => rewritten
                    .get_or_insert_with(|| types[..i].to_vec())
                    .push(new_ty),
                Cow::Borrowed(_) => {
                    if let Some(out) = rewritten.as_mut() {
                        out.push(ty.clone());
                    }
                }
            }
        }
        rewritten
    }

    fn apply_param(&self, param: &Param) -> Option<Param> {
        match self.apply(&param.ty) {
            Cow::Owned(ty) => Some(Param {
                name: param.name.clone(),
                ty,
            }),
            Cow::Borrowed(_) => None,
        }
    }

    fn apply_params(&self, params: &[Param]) -> Option<Vec<Param>> {
        let mut rewritten: Option<Vec<Param>> = None;
        for (i, param) in params.iter().enumerate() {
            match self.apply_param(param) {
                Some(new_param) => rewritten
                    .get_or_insert_with(|| params[..i].to_vec())
                    .push(new_param),
                None => {
                    if let Some(out) = rewritten.as_mut() {
                        out.push(param.clone());
                    }
                }
            }
        }
        rewritten
    }
}
