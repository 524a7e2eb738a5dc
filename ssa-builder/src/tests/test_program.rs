//! Tests for the program's function table and instance sets

use super::{declare_generic, declare_plain, program, span, PKG};
use crate::{BuildError, Creator, Function, FunctionId, Program, Worklist};
use pretty_assertions::assert_eq;
use ssa_types::{Func, Signature, Type, TypeParamGenerator};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Creator that unwinds on the first node it is handed
struct PanickingCreator;

impl Creator for PanickingCreator {
    fn add(&mut self, function: Arc<Function>) {
        panic!("cannot schedule {}", function.name());
    }
}

#[test]
fn test_declared_function_node() {
    let prog = program("");
    let plain = declare_plain(&prog, "Count");

    assert_eq!(plain.id(), FunctionId(0));
    assert_eq!(plain.package(), Some(PKG));
    assert_eq!(plain.to_string(), "example.com/app.Count");
    assert!(!plain.is_generic_template());
    assert!(!plain.is_instance());
    assert!(plain.type_args().is_empty());
    assert!(plain.origin().is_none());
    assert!(!prog.has_instance_set(&plain));
}

#[test]
fn test_create_function_is_idempotent_per_object() {
    let prog = Program::default();
    let object = Arc::new(Func::new("Init", None, Signature::default(), span(0, 4)));

    let a = prog.create_function(Arc::clone(&object), None, None).unwrap();
    let b = prog.create_function(Arc::clone(&object), None, None).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(prog.function_count(), 1);

    // A structurally equal but distinct object is a distinct declaration
    let twin = Arc::new(Func::new("Init", None, Signature::default(), span(0, 4)));
    let c = prog.create_function(twin, None, None).unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(prog.function_count(), 2);
}

#[test]
fn test_declared_func_lookup() {
    let prog = program("G");
    let mut gen = TypeParamGenerator::new();
    let pair = declare_generic(&prog, &mut gen, "Pair", &["T"]);

    let found = prog.declared_func(pair.object()).unwrap();
    assert!(Arc::ptr_eq(&found, &pair));

    let unknown = Arc::new(Func::new("Pair", None, Signature::default(), span(0, 4)));
    assert!(prog.declared_func(&unknown).is_none());
}

#[test]
fn test_generic_templates_get_an_instance_set() {
    let prog = program("G");
    let mut gen = TypeParamGenerator::new();
    let pair = declare_generic(&prog, &mut gen, "Pair", &["T"]);

    assert!(pair.is_generic_template());
    assert!(prog.has_instance_set(&pair));
    assert!(prog.instances(&pair).is_empty());

    // Creating it again is a no-op
    prog.create_instance_set(&pair).unwrap();
    assert_eq!(prog.instance_count(&pair), 0);
}

#[test]
fn test_instance_set_rejects_non_generic_functions() {
    let prog = program("G");
    let plain = declare_plain(&prog, "Count");

    let err = prog.create_instance_set(&plain).unwrap_err();
    assert!(matches!(
        err,
        BuildError::NotGeneric { ref function } if function == "example.com/app.Count"
    ));
    assert!(!prog.has_instance_set(&plain));

    let mut worklist = Worklist::new();
    assert!(matches!(
        prog.needs_instance(&plain, vec![Type::int()], &mut worklist),
        Err(BuildError::NotGeneric { .. })
    ));
    assert!(prog.instances(&plain).is_empty());
}

#[test]
fn test_instances_are_not_templates() {
    let prog = program("G");
    let mut gen = TypeParamGenerator::new();
    let pair = declare_generic(&prog, &mut gen, "Pair", &["T"]);
    let mut worklist = Worklist::new();
    let instance = prog
        .needs_instance(&pair, vec![Type::int()], &mut worklist)
        .unwrap();

    assert!(instance.is_instance());
    assert!(!instance.is_generic_template());
    assert!(prog.instances(&instance).is_empty());
    assert!(matches!(
        prog.needs_instance(&instance, vec![Type::int()], &mut worklist),
        Err(BuildError::NotGeneric { .. })
    ));
    assert!(matches!(
        prog.create_instance_set(&instance),
        Err(BuildError::NotGeneric { .. })
    ));
}

#[test]
fn test_instance_metadata() {
    let prog = program("G");
    let mut gen = TypeParamGenerator::new();
    let pair = declare_generic(&prog, &mut gen, "Pair", &["T"]);
    let mut worklist = Worklist::new();
    let instance = prog
        .needs_instance(&pair, vec![Type::int()], &mut worklist)
        .unwrap();

    assert_eq!(instance.origin(), Some(pair.id()));
    assert!(Arc::ptr_eq(&prog.origin(&instance).unwrap(), &pair));
    assert!(prog.origin(&pair).is_none());

    // Instances belong to the program, not to a package
    assert_eq!(instance.package(), None);
    assert_eq!(instance.to_string(), "Pair[int]");

    assert!(instance.type_params().ptr_eq(pair.type_params()));
    assert_eq!(instance.type_args(), &[Type::int()][..]);

    let by_id = prog.function(instance.id()).unwrap();
    assert!(Arc::ptr_eq(&by_id, &instance));
    assert!(prog.function(FunctionId(99)).is_none());
}

#[test]
fn test_instances_snapshot_is_not_live() {
    let prog = program("G");
    let mut gen = TypeParamGenerator::new();
    let pair = declare_generic(&prog, &mut gen, "Pair", &["T"]);
    let mut worklist = Worklist::new();

    prog.needs_instance(&pair, vec![Type::int()], &mut worklist)
        .unwrap();
    let snapshot = prog.instances(&pair);
    prog.needs_instance(&pair, vec![Type::string()], &mut worklist)
        .unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(prog.instances(&pair).len(), 2);
}

#[test]
fn test_worklist_receives_nodes_in_creation_order() {
    let prog = program("G");
    let mut gen = TypeParamGenerator::new();
    let pair = declare_generic(&prog, &mut gen, "Pair", &["T"]);
    let mut worklist = Worklist::new();

    for ty in [Type::int(), Type::string(), Type::int(), Type::bool()] {
        prog.needs_instance(&pair, vec![ty], &mut worklist).unwrap();
    }

    let names: Vec<_> = worklist.iter().map(|f| f.name().to_string()).collect();
    assert_eq!(names, vec!["Pair[int]", "Pair[string]", "Pair[bool]"]);

    let pending = worklist.take();
    assert_eq!(pending.len(), 3);
    assert!(worklist.is_empty());
}

#[test]
fn test_panicking_creator_does_not_duplicate_instance() {
    let prog = program("G");
    let mut gen = TypeParamGenerator::new();
    let pair = declare_generic(&prog, &mut gen, "Pair", &["T"]);

    let unwound = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = prog.needs_instance(&pair, vec![Type::int()], &mut PanickingCreator);
    }));
    assert!(unwound.is_err());

    // The generics lock is poisoned now; the next request recovers it and
    // finds the node created before the creator unwound
    let mut worklist = Worklist::new();
    let instance = prog
        .needs_instance(&pair, vec![Type::int()], &mut worklist)
        .unwrap();

    assert!(worklist.is_empty());
    assert_eq!(prog.instance_count(&pair), 1);
    assert_eq!(prog.function_count(), 2);
    assert!(Arc::ptr_eq(&prog.instances(&pair)[0], &instance));
    assert_eq!(instance.id(), FunctionId(1));
}
