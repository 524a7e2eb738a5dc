//! Integration tests for generic function instantiation
//!
//! Fixtures here declare small generic programs the way the type checker
//! would hand them to the builder: resolved objects, declaration syntax and
//! package type information.

mod test_program;
mod test_scenarios;

use crate::{BuilderMode, Function, Program};
use miette::SourceSpan;
use ssa_types::{Func, FuncDecl, Info, Param, Signature, Stmt, Type, TypeParamGenerator};
use std::sync::Arc;

pub(crate) const PKG: &str = "example.com/app";

pub(crate) fn program(mode: &str) -> Program {
    let mode: BuilderMode = mode.parse().expect("valid builder mode");
    Program::new(mode)
}

pub(crate) fn span(start: usize, len: usize) -> SourceSpan {
    SourceSpan::from(start..start + len)
}

/// Declaration syntax mirroring a signature, with `body` as its statements
pub(crate) fn decl_for(name: &str, sig: &Signature, body: Vec<Stmt>) -> FuncDecl {
    let mut decl = FuncDecl::new(name, span(0, name.len()));
    decl.recv = sig.recv.clone();
    decl.params = sig.params.clone();
    decl.results = sig.results.clone();
    decl.body = body;
    decl
}

/// Declare `func name[T1, T2, ...](t1 T1, t2 T2, ...) T1` in [`PKG`]
pub(crate) fn declare_generic(
    prog: &Program,
    gen: &mut TypeParamGenerator,
    name: &str,
    tparams: &[&str],
) -> Arc<Function> {
    let params = gen.fresh_list(tparams);
    let sig = Signature::new(
        params
            .iter()
            .map(|p| Param::new(p.name.to_lowercase(), Type::param(p)))
            .collect(),
        params.first().map(Type::param).into_iter().collect(),
    )
    .with_type_params(params);

    let decl = decl_for(
        name,
        &sig,
        vec![Stmt::Return {
            values: vec![tparams[0].to_lowercase()],
        }],
    );
    let object = Arc::new(Func::new(name, Some(PKG.to_string()), sig, span(0, name.len())));
    prog.create_function(object, Some(Arc::new(decl)), Some(Arc::new(Info::new(PKG))))
        .unwrap()
}

/// Declare a non-generic `func name(x int) int` in [`PKG`]
pub(crate) fn declare_plain(prog: &Program, name: &str) -> Arc<Function> {
    let sig = Signature::new(vec![Param::new("x", Type::int())], vec![Type::int()]);
    let decl = decl_for(name, &sig, Vec::new());
    let object = Arc::new(Func::new(name, Some(PKG.to_string()), sig, span(0, name.len())));
    prog.create_function(object, Some(Arc::new(decl)), Some(Arc::new(Info::new(PKG))))
        .unwrap()
}
