//! Declaration syntax handles and resolved type information
//!
//! Only the parts the SSA builder needs to clone and rewrite a generic
//! declaration are modelled: parameter and result types, local variable types
//! and the explicit type arguments of calls.

use crate::object::Func;
use crate::types::{Param, Type};
use miette::SourceSpan;
use std::collections::HashMap;
use std::sync::Arc;

/// A function or method declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    pub span: SourceSpan,
    pub recv: Option<Param>,
    pub params: Vec<Param>,
    pub results: Vec<Type>,
    pub body: Vec<Stmt>,
}

/// Statements with type-bearing positions
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `var name ty`
    Var { name: String, ty: Type },
    /// `callee[type_args](args...)`
    Call {
        callee: String,
        type_args: Vec<Type>,
        args: Vec<String>,
    },
    Return { values: Vec<String> },
}

impl FuncDecl {
    pub fn new(name: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            name: name.into(),
            span,
            recv: None,
            params: Vec::new(),
            results: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Clone this declaration, rewriting every type expression with `f`
    pub fn map_types(&self, mut f: impl FnMut(&Type) -> Type) -> FuncDecl {
        let mut map_param = |p: &Param| Param {
            name: p.name.clone(),
            ty: f(&p.ty),
        };

        let recv = self.recv.as_ref().map(&mut map_param);
        let params = self.params.iter().map(&mut map_param).collect();
        let results = self.results.iter().map(&mut f).collect();
        let body = self
            .body
            .iter()
            .map(|stmt| match stmt {
                Stmt::Var { name, ty } => Stmt::Var {
                    name: name.clone(),
                    ty: f(ty),
                },
                Stmt::Call {
                    callee,
                    type_args,
                    args,
                } => Stmt::Call {
                    callee: callee.clone(),
                    type_args: type_args.iter().map(&mut f).collect(),
                    args: args.clone(),
                },
                Stmt::Return { values } => Stmt::Return {
                    values: values.clone(),
                },
            })
            .collect();

        FuncDecl {
            name: self.name.clone(),
            span: self.span,
            recv,
            params,
            results,
            body,
        }
    }

    /// Calls in this body that supply explicit type arguments
    pub fn generic_calls(&self) -> impl Iterator<Item = (&str, &[Type])> {
        self.body.iter().filter_map(|stmt| match stmt {
            Stmt::Call {
                callee, type_args, ..
            } if !type_args.is_empty() => Some((callee.as_str(), type_args.as_slice())),
            _ => None,
        })
    }
}

/// Resolved type information for one package
#[derive(Debug, Clone, Default)]
pub struct Info {
    package: String,
    uses: HashMap<String, Arc<Func>>,
}

impl Info {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            uses: HashMap::new(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Record the object an identifier in this package's syntax resolves to
    pub fn record_use(&mut self, ident: impl Into<String>, func: Arc<Func>) {
        self.uses.insert(ident.into(), func);
    }

    pub fn object_of(&self, ident: &str) -> Option<&Arc<Func>> {
        self.uses.get(ident)
    }
}
