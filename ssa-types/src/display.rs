//! Display implementations for types and signatures (for debug names and error messages)

use crate::types::{Param, Signature, Type, TypeParamList};
use std::fmt;

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(kind) => write!(f, "{}", kind.name()),
            Self::Named { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "[")?;
                    write_list(f, args)?;
                    write!(f, "]")?;
                }
                Ok(())
            }
            Self::Pointer(elem) => write!(f, "*{elem}"),
            Self::Slice(elem) => write!(f, "[]{elem}"),
            Self::Array { len, elem } => write!(f, "[{len}]{elem}"),
            Self::Map { key, value } => write!(f, "map[{key}]{value}"),
            Self::Struct(fields) => {
                write!(f, "struct{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{} {}", field.name, field.ty)?;
                }
                write!(f, "}}")
            }
            Self::Func(sig) => write!(f, "{sig}"),
            Self::Param(param) => write!(f, "{}", param.name),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.ty)
        } else {
            write!(f, "{} {}", self.name, self.ty)
        }
    }
}

impl fmt::Display for TypeParamList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "[")?;
        for (i, param) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} any", param.name)?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(recv) = &self.recv {
            write!(f, "({recv}) ")?;
        }
        write!(f, "func{}(", self.type_params)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if self.variadic && i + 1 == self.params.len() {
                match &param.ty {
                    Type::Slice(elem) if param.name.is_empty() => write!(f, "...{elem}")?,
                    Type::Slice(elem) => write!(f, "{} ...{elem}", param.name)?,
                    _ => write!(f, "{param}")?,
                }
            } else {
                write!(f, "{param}")?;
            }
        }
        write!(f, ")")?;

        match self.results.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " {single}"),
            many => {
                write!(f, " (")?;
                write_list(f, many)?;
                write!(f, ")")
            }
        }
    }
}

/// Renders a type-argument tuple as `[int, string]`
///
/// The rendering is a diagnostic label only: distinct tuples may render identically.
pub struct TypeArgs<'a>(pub &'a [Type]);

impl fmt::Display for TypeArgs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        write_list(f, self.0)?;
        write!(f, "]")
    }
}
