//! End-to-end scenarios: declaring generic functions, requesting instances
//! and lowering the calls their bodies make

use super::{decl_for, declare_generic, program, span, PKG};
use crate::{Creator, Function, Program, Worklist};
use pretty_assertions::assert_eq;
use ssa_types::{Func, Info, Signature, Stmt, Type, TypeParamGenerator};
use std::sync::{Arc, Barrier};
use std::thread;

/// Request the instances needed by the generic calls in `function`'s body,
/// the way the lowering pass would
fn lower_generic_calls(
    prog: &Program,
    function: &Function,
    cr: &mut dyn Creator,
) -> Vec<Arc<Function>> {
    let Some(decl) = function.body_plan().materialize_syntax() else {
        return Vec::new();
    };
    let info = function.info().expect("declared functions carry type info");

    decl.generic_calls()
        .map(|(callee, targs)| {
            let object = info.object_of(callee).expect("callee is resolved");
            let callee = prog.declared_func(object).expect("callee is declared");
            prog.needs_instance(&callee, targs.to_vec(), cr).unwrap()
        })
        .collect()
}

/// `func Inner[V any]()` and `func Outer[U any]() { Inner[U]() }`
fn declare_outer_and_inner(prog: &Program) -> (Arc<Function>, Arc<Function>) {
    let mut gen = TypeParamGenerator::new();
    let mut info = Info::new(PKG);

    let inner_sig = Signature::default().with_type_params(gen.fresh_list(&["V"]));
    let inner_decl = decl_for("Inner", &inner_sig, Vec::new());
    let inner_obj = Arc::new(Func::new(
        "Inner",
        Some(PKG.to_string()),
        inner_sig,
        span(0, 5),
    ));
    info.record_use("Inner", Arc::clone(&inner_obj));

    let outer_params = gen.fresh_list(&["U"]);
    let u = Type::param(&outer_params[0]);
    let outer_sig = Signature::default().with_type_params(outer_params);
    let outer_decl = decl_for(
        "Outer",
        &outer_sig,
        vec![Stmt::Call {
            callee: "Inner".to_string(),
            type_args: vec![u],
            args: Vec::new(),
        }],
    );
    let outer_obj = Arc::new(Func::new(
        "Outer",
        Some(PKG.to_string()),
        outer_sig,
        span(20, 5),
    ));

    let info = Arc::new(info);
    let inner = prog.create_function(
        inner_obj,
        Some(Arc::new(inner_decl)),
        Some(Arc::clone(&info)),
    )
    .unwrap();
    let outer = prog
        .create_function(outer_obj, Some(Arc::new(outer_decl)), Some(info))
        .unwrap();
    (outer, inner)
}

#[test]
fn test_simple_generic_function() {
    let prog = program("G");
    let mut gen = TypeParamGenerator::new();
    let pair = declare_generic(&prog, &mut gen, "Pair", &["T"]);
    let mut worklist = Worklist::new();

    let instance = prog
        .needs_instance(&pair, vec![Type::int()], &mut worklist)
        .unwrap();

    assert_eq!(instance.name(), "Pair[int]");
    assert_eq!(instance.synthetic(), Some("instance of Pair"));
    assert!(instance.instance_kind().unwrap().is_specialized());

    let subst: Vec<_> = instance
        .substitution()
        .unwrap()
        .iter()
        .map(|(param, arg)| (param.name.clone(), arg.clone()))
        .collect();
    assert_eq!(subst, vec![("T".to_string(), Type::int())]);

    assert_eq!(worklist.len(), 1);
    assert!(Arc::ptr_eq(worklist.iter().next().unwrap(), &instance));
}

#[test]
fn test_repeated_instantiation_from_concurrent_callers() {
    const CALLERS: usize = 3;
    let prog = program("G");
    let mut gen = TypeParamGenerator::new();
    let pair = declare_generic(&prog, &mut gen, "Pair", &["T"]);
    let barrier = Barrier::new(CALLERS);
    let (prog_ref, pair_ref, barrier) = (&prog, &pair, &barrier);

    let worklists: Vec<Worklist> = thread::scope(|s| {
        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                s.spawn(move || {
                    let mut worklist = Worklist::new();
                    barrier.wait();
                    prog_ref
                        .needs_instance(pair_ref, vec![Type::int()], &mut worklist)
                        .unwrap();
                    worklist
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let registered: Vec<_> = worklists
        .into_iter()
        .flat_map(Worklist::into_functions)
        .map(|f| f.name().to_string())
        .collect();
    assert_eq!(registered, vec!["Pair[int]"]);
    assert_eq!(prog.instance_count(&pair), 1);
}

#[test]
fn test_nested_generic_call_from_generic_body() {
    let prog = program("G");
    let (outer, inner) = declare_outer_and_inner(&prog);
    let mut worklist = Worklist::new();

    let outer_string = prog
        .needs_instance(&outer, vec![Type::string()], &mut worklist)
        .unwrap();
    assert!(outer_string.instance_kind().unwrap().is_specialized());

    // Lowering the generic body of Outer sees Inner[U] with U still open
    let calls = lower_generic_calls(&prog, &outer, &mut worklist);
    assert_eq!(calls.len(), 1);
    let inner_u = &calls[0];
    assert!(inner_u.instance_kind().unwrap().is_wrapper());
    assert!(inner_u.substitution().is_none());
    assert_eq!(inner_u.name(), "Inner[U]");
    assert_eq!(inner_u.synthetic(), Some("instantiation wrapper of Inner"));
    assert_eq!(inner_u.origin(), Some(inner.id()));

    // Lowering the specialized Outer[string] body sees Inner[string]
    let calls = lower_generic_calls(&prog, &outer_string, &mut worklist);
    assert_eq!(calls.len(), 1);
    let inner_string = &calls[0];
    assert!(inner_string.instance_kind().unwrap().is_specialized());
    assert_eq!(inner_string.name(), "Inner[string]");

    let names: Vec<_> = worklist.iter().map(|f| f.name().to_string()).collect();
    assert_eq!(names, vec!["Outer[string]", "Inner[U]", "Inner[string]"]);
    assert_eq!(prog.instances(&inner).len(), 2);
}

#[test]
fn test_wrapper_instances_are_shared_between_callers() {
    let prog = program("G");
    let (outer, _inner) = declare_outer_and_inner(&prog);
    let mut first = Worklist::new();
    let mut second = Worklist::new();

    let a = lower_generic_calls(&prog, &outer, &mut first);
    let b = lower_generic_calls(&prog, &outer, &mut second);

    assert!(Arc::ptr_eq(&a[0], &b[0]));
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}
