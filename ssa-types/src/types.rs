//! Resolved types as produced by the type checker.
//!
//! Types carry no source positions so that derived structural equality and
//! hashing are exact: two independently built `List[int]` values compare equal.

use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Program-unique identity of a declared type parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeParamId(pub u32);

/// Predeclared basic types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    /// Placeholder for a type the checker could not resolve
    Invalid,
    Bool,
    Int,
    Int64,
    Uint8,
    Float64,
    String,
}

impl BasicKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Invalid => "invalid type",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Float64 => "float64",
            Self::String => "string",
        }
    }
}

/// A declared type parameter, e.g. the `T` of `func Pair[T any](x T) T`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParam {
    pub id: TypeParamId,
    pub name: String,
    /// Position within the declaring parameter list
    pub index: usize,
}

/// Struct field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub ty: Type,
}

/// Unified resolved type representation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Basic(BasicKind),

    /// Declared types, possibly instantiated: `Box`, `List[int]`, `Map[K, V]`
    Named { name: String, args: Vec<Type> },

    Pointer(Box<Type>),

    Slice(Box<Type>),

    Array { len: u64, elem: Box<Type> },

    Map { key: Box<Type>, value: Box<Type> },

    Struct(Vec<Field>),

    /// Function types: `func(int) string`
    Func(Box<Signature>),

    /// Free occurrence of a type parameter
    Param(TypeParam),
}

impl Type {
    pub fn basic(kind: BasicKind) -> Self {
        Self::Basic(kind)
    }

    pub fn int() -> Self {
        Self::Basic(BasicKind::Int)
    }

    pub fn string() -> Self {
        Self::Basic(BasicKind::String)
    }

    pub fn bool() -> Self {
        Self::Basic(BasicKind::Bool)
    }

    pub fn invalid() -> Self {
        Self::Basic(BasicKind::Invalid)
    }

    /// Create a named type with no type arguments
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: vec![],
        }
    }

    /// Create an instantiated named type, e.g. `List[T]`
    pub fn generic_named(name: impl Into<String>, args: Vec<Type>) -> Self {
        Self::Named {
            name: name.into(),
            args,
        }
    }

    pub fn pointer(elem: Type) -> Self {
        Self::Pointer(Box::new(elem))
    }

    pub fn slice(elem: Type) -> Self {
        Self::Slice(Box::new(elem))
    }

    pub fn array(len: u64, elem: Type) -> Self {
        Self::Array {
            len,
            elem: Box::new(elem),
        }
    }

    pub fn map(key: Type, value: Type) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn func(sig: Signature) -> Self {
        Self::Func(Box::new(sig))
    }

    pub fn param(param: &TypeParam) -> Self {
        Self::Param(param.clone())
    }

    /// Check whether any type parameter still occurs free in this type
    pub fn contains_type_params(&self) -> bool {
        match self {
            Self::Basic(_) => false,
            Self::Param(_) => true,
            Self::Named { args, .. } => args.iter().any(Type::contains_type_params),
            Self::Pointer(elem) | Self::Slice(elem) | Self::Array { elem, .. } => {
                elem.contains_type_params()
            }
            Self::Map { key, value } => key.contains_type_params() || value.contains_type_params(),
            Self::Struct(fields) => fields.iter().any(|f| f.ty.contains_type_params()),
            Self::Func(sig) => sig.contains_type_params(),
        }
    }

    /// Check whether the invalid basic type occurs anywhere in this type
    pub fn contains_invalid(&self) -> bool {
        match self {
            Self::Basic(kind) => *kind == BasicKind::Invalid,
            Self::Param(_) => false,
            Self::Named { args, .. } => args.iter().any(Type::contains_invalid),
            Self::Pointer(elem) | Self::Slice(elem) | Self::Array { elem, .. } => {
                elem.contains_invalid()
            }
            Self::Map { key, value } => key.contains_invalid() || value.contains_invalid(),
            Self::Struct(fields) => fields.iter().any(|f| f.ty.contains_invalid()),
            Self::Func(sig) => sig
                .recv
                .iter()
                .chain(sig.params.iter())
                .any(|p| p.ty.contains_invalid())
                || sig.results.iter().any(Type::contains_invalid),
        }
    }
}

/// Immutable, shared list of type parameters
///
/// Instances of a generic function share their template's list; use
/// [`TypeParamList::ptr_eq`] to observe that sharing.
#[derive(Debug, Clone)]
pub struct TypeParamList(Arc<[TypeParam]>);

impl TypeParamList {
    pub fn new(params: Vec<TypeParam>) -> Self {
        Self(params.into())
    }

    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for TypeParamList {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for TypeParamList {
    type Target = [TypeParam];

    fn deref(&self) -> &[TypeParam] {
        &self.0
    }
}

impl PartialEq for TypeParamList {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for TypeParamList {}

impl Hash for TypeParamList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// A named parameter or receiver
///
/// Only the type takes part in equality and hashing; `func(x int)` and
/// `func(y int)` are the same signature.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}

impl Eq for Param {}

impl Hash for Param {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
    }
}

/// Function or method signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Signature {
    pub recv: Option<Param>,
    /// Type parameters of a generic receiver type; methods have none of their own
    pub recv_type_params: TypeParamList,
    pub type_params: TypeParamList,
    pub params: Vec<Param>,
    pub results: Vec<Type>,
    pub variadic: bool,
}

impl Signature {
    /// Create a plain, non-generic function signature
    pub fn new(params: Vec<Param>, results: Vec<Type>) -> Self {
        Self {
            params,
            results,
            ..Self::default()
        }
    }

    pub fn with_type_params(mut self, type_params: TypeParamList) -> Self {
        self.type_params = type_params;
        self
    }

    /// Attach a receiver along with the receiver type's parameters
    pub fn with_recv(mut self, recv: Param, recv_type_params: TypeParamList) -> Self {
        self.recv = Some(recv);
        self.recv_type_params = recv_type_params;
        self
    }

    /// The parameters instantiation binds: the receiver's for methods, the function's own otherwise
    pub fn generic_params(&self) -> &TypeParamList {
        if self.recv.is_some() {
            &self.recv_type_params
        } else {
            &self.type_params
        }
    }

    /// Check whether any type parameter occurs free in the receiver, parameters or results
    pub fn contains_type_params(&self) -> bool {
        self.recv
            .iter()
            .chain(self.params.iter())
            .any(|p| p.ty.contains_type_params())
            || self.results.iter().any(Type::contains_type_params)
    }
}

/// Allocates program-unique type parameter identities
#[derive(Debug, Clone, Default)]
pub struct TypeParamGenerator {
    next_id: u32,
}

impl TypeParamGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh parameter list from its names, in declaration order
    pub fn fresh_list(&mut self, names: &[&str]) -> TypeParamList {
        let params = names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let id = TypeParamId(self.next_id);
                self.next_id += 1;
                TypeParam {
                    id,
                    name: (*name).to_string(),
                    index,
                }
            })
            .collect();
        TypeParamList::new(params)
    }
}
