//! Binder integration tests.
//!
//! Drives the scope, label, private name and export tables the way the
//! parser does while walking a program.

use pretty_assertions::assert_eq;
use sable_binder::{BindingKind, LabelSet, ModuleRecord, PrivateNameKind, PrivateNameTable, ScopeKind, ScopeStack};
use sable_core::StringInterner;
use sable_diagnostics::messages;

/// Helper: a fresh scope chain holding only the top-level scope.
fn scopes() -> ScopeStack {
    ScopeStack::new(StringInterner::new())
}

/// Helper: open a function with the given parameters, returning the id of
/// its parameter scope.
fn open_function(scopes: &mut ScopeStack, params: &[&str]) -> usize {
    let id = scopes.push(ScopeKind::FUNCTION_PARAMS);
    for (offset, name) in params.iter().enumerate() {
        scopes.declare(name, BindingKind::Parameter, offset as u32, false).unwrap();
    }
    scopes.push(ScopeKind::FUNCTION_BODY);
    id
}

// ============================================================================
// Scopes
// ============================================================================

#[test]
fn test_top_level_declarations() {
    let mut scopes = scopes();
    scopes.declare("a", BindingKind::Var, 0, false).unwrap();
    scopes.declare("a", BindingKind::Var, 10, false).unwrap();
    scopes.declare("f", BindingKind::FunctionVar, 20, false).unwrap();
    scopes.declare("b", BindingKind::Let, 30, false).unwrap();
    assert!(scopes.is_declared_top_level("a"));
    assert!(scopes.is_declared_top_level("b"));
    assert!(!scopes.is_declared_top_level("c"));
    let err = scopes.declare("f", BindingKind::Let, 40, false).unwrap_err();
    assert_eq!(err.message, messages::DUPLICATE_BINDING);
}

#[test]
fn test_lexical_after_var_in_nested_block() {
    // { { var x; } } let x;
    let mut scopes = scopes();
    scopes.push(ScopeKind::BLOCK);
    scopes.push(ScopeKind::BLOCK);
    scopes.declare("x", BindingKind::Var, 8, false).unwrap();
    scopes.pop();
    scopes.pop();
    let err = scopes.declare("x", BindingKind::Let, 22, false).unwrap_err();
    assert_eq!(err.message, messages::DUPLICATE_BINDING);
    assert_eq!(err.offset, 22);
}

#[test]
fn test_function_body_shadows_outer_lexical() {
    // let x; function f() { var x; let y; }
    let mut scopes = scopes();
    scopes.declare("x", BindingKind::Let, 4, false).unwrap();
    open_function(&mut scopes, &[]);
    scopes.declare("x", BindingKind::Var, 26, false).unwrap();
    scopes.declare("y", BindingKind::Let, 33, false).unwrap();
    scopes.pop();
    scopes.pop();
    assert!(scopes.pop().is_none());
    assert!(!scopes.is_declared_top_level("y"));
}

#[test]
fn test_parameter_conflicts() {
    // function f(a) { var a; }  is fine, let a is not.
    let mut scopes = scopes();
    open_function(&mut scopes, &["a"]);
    scopes.declare("a", BindingKind::Var, 20, false).unwrap();
    let err = scopes.declare("a", BindingKind::Let, 28, false).unwrap_err();
    assert_eq!(err.message, messages::DUPLICATE_BINDING);
}

#[test]
fn test_duplicate_parameters_are_deferred() {
    let mut scopes = scopes();
    let params = open_function(&mut scopes, &["a", "b", "a"]);
    let deferred = scopes.take_deferred(params).unwrap();
    assert_eq!(deferred.message, messages::DUPLICATE_PARAMETER);
    assert_eq!(deferred.name, "a");
    assert_eq!(deferred.offset, 2);
}

#[test]
fn test_catch_parameter_rules() {
    // try {} catch (e) { var e; }
    let mut scopes = scopes();
    scopes.push(ScopeKind::CATCH_PARAM);
    scopes.declare("e", BindingKind::CatchSimple, 14, false).unwrap();
    scopes.push(ScopeKind::CATCH_BODY);
    scopes.declare("e", BindingKind::Var, 23, false).unwrap();
    let err = scopes.declare("e", BindingKind::Let, 30, false).unwrap_err();
    assert_eq!(err.message, messages::DUPLICATE_BINDING);
    scopes.pop();
    scopes.pop();

    // try {} catch ([e]) { var e; }
    scopes.push(ScopeKind::CATCH_PARAM);
    scopes.declare("e", BindingKind::CatchPattern, 15, false).unwrap();
    scopes.push(ScopeKind::CATCH_BODY);
    assert!(scopes.declare("e", BindingKind::Var, 25, false).is_err());
}

#[test]
fn test_block_functions_under_annex_b() {
    let mut scopes = scopes();
    scopes.push(ScopeKind::BLOCK);
    scopes.declare("f", BindingKind::FunctionLexical, 2, true).unwrap();
    scopes.declare("f", BindingKind::FunctionLexical, 20, true).unwrap();
    assert!(scopes.declare("f", BindingKind::FunctionLexical, 40, false).is_err());
    assert!(scopes.declare("f", BindingKind::Let, 60, true).is_err());
}

#[test]
fn test_var_stops_at_static_block() {
    // let x; class A { static { var x; } }
    let mut scopes = scopes();
    scopes.declare("x", BindingKind::Let, 4, false).unwrap();
    scopes.push(ScopeKind::CLASS);
    scopes.push(ScopeKind::STATIC_BLOCK);
    assert!(scopes.declare("x", BindingKind::Var, 30, false).is_ok());
}

#[test]
fn test_top_level_scope_is_never_popped() {
    let mut scopes = scopes();
    assert!(scopes.pop().is_none());
    assert_eq!(scopes.current_kind(), ScopeKind::TOP_LEVEL);
}

// ============================================================================
// Labels
// ============================================================================

#[test]
fn test_nested_labels() {
    // a: b: while (x) { continue a; }
    let mut labels = LabelSet::new();
    assert!(labels.push("a"));
    assert!(labels.push("b"));
    labels.mark_iteration(0);
    assert_eq!(labels.is_iteration("a"), Some(true));
    assert_eq!(labels.is_iteration("missing"), None);
    assert!(!labels.push("a"));
    labels.pop();
    labels.pop();
    assert!(labels.is_empty());
}

#[test]
fn test_labels_reset_at_function_boundary() {
    let mut labels = LabelSet::new();
    labels.push("outer");
    let saved = labels.take();
    assert!(!labels.contains("outer"));
    assert!(labels.push("outer"));
    labels.restore(saved);
    assert_eq!(labels.len(), 1);
    assert_eq!(labels.is_iteration("outer"), Some(false));
}

// ============================================================================
// Private names
// ============================================================================

#[test]
fn test_private_names_across_nested_classes() {
    // class A { #a; m() { class B { n() { this.#a; } } } }
    let mut names = PrivateNameTable::new();
    names.enter_class();
    names.declare("a", PrivateNameKind::Field, false, 10).unwrap();
    names.enter_class();
    names.reference("a", 40).unwrap();
    names.exit_class().unwrap();
    names.exit_class().unwrap();
    assert!(!names.in_class());
}

#[test]
fn test_private_accessor_pairs() {
    let mut names = PrivateNameTable::new();
    names.enter_class();
    names.declare("x", PrivateNameKind::Getter, false, 0).unwrap();
    names.declare("x", PrivateNameKind::Setter, false, 10).unwrap();
    let err = names.declare("x", PrivateNameKind::Getter, false, 20).unwrap_err();
    assert_eq!(err.message, messages::DUPLICATE_PRIVATE_NAME);

    names.declare("y", PrivateNameKind::Getter, true, 30).unwrap();
    assert!(names.declare("y", PrivateNameKind::Setter, false, 40).is_err());
}

#[test]
fn test_private_reference_outside_class() {
    let mut names = PrivateNameTable::new();
    let err = names.reference("x", 3).unwrap_err();
    assert_eq!(err.message, messages::UNDECLARED_PRIVATE_NAME);
    assert_eq!(err.offset, 3);
}

#[test]
fn test_unresolved_private_name_reported_at_outermost_class() {
    let mut names = PrivateNameTable::new();
    names.enter_class();
    names.enter_class();
    names.reference("missing", 25).unwrap();
    names.exit_class().unwrap();
    let err = names.exit_class().unwrap_err();
    assert_eq!(err.name, "missing");
    assert_eq!(err.offset, 25);
}

// ============================================================================
// Module records
// ============================================================================

#[test]
fn test_local_exports_resolve_against_top_level() {
    // let a; function f() { let b; } export { a, b };
    let mut scopes = scopes();
    scopes.declare("a", BindingKind::Let, 4, false).unwrap();
    open_function(&mut scopes, &[]);
    scopes.declare("b", BindingKind::Let, 26, false).unwrap();
    scopes.pop();
    scopes.pop();

    let mut record = ModuleRecord::new();
    record.add_export("a", 41).unwrap();
    record.add_local_export("a", 41);
    record.add_export("b", 44).unwrap();
    record.add_local_export("b", 44);
    let err = record.finish(&scopes).unwrap_err();
    assert_eq!(err.message, messages::UNDECLARED_EXPORT);
    assert_eq!(err.name, "b");
}

#[test]
fn test_exports_after_declaration() {
    // export { x }; var x;
    let mut record = ModuleRecord::new();
    record.add_export("x", 9).unwrap();
    record.add_local_export("x", 9);
    let mut scopes = scopes();
    scopes.declare("x", BindingKind::Var, 18, false).unwrap();
    assert!(record.finish(&scopes).is_ok());
    assert!(record.has_export("x"));
    assert!(record.add_export("x", 30).is_err());
}
