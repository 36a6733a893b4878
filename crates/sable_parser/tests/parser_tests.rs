//! Parser integration tests.
//!
//! Parses JavaScript sources and inspects the serialized ESTree output.

use pretty_assertions::assert_eq;
use sable_core::Allocator;
use sable_diagnostics::{messages, DiagnosticMessage, ParseError};
use sable_options::ParseOptions;
use sable_parser::{parse, parse_with_observer, Collector};
use sable_ast::Token;
use serde_json::{json, Value};

/// Helper: parse and serialize, panicking with the error on failure.
fn parse_json(source: &str, options: ParseOptions) -> Value {
    let arena = Allocator::new();
    match parse(&arena, source, options) {
        Ok(program) => serde_json::to_value(&program).unwrap(),
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    }
}

fn script(source: &str) -> Value {
    parse_json(source, ParseOptions::script())
}

fn module(source: &str) -> Value {
    parse_json(source, ParseOptions::module())
}

fn ranged(source: &str) -> Value {
    parse_json(
        source,
        ParseOptions {
            ranges: true,
            ..ParseOptions::default()
        },
    )
}

/// Helper: the error for a source that must not parse.
fn parse_error(source: &str, options: ParseOptions) -> ParseError {
    let arena = Allocator::new();
    match parse(&arena, source, options) {
        Ok(_) => panic!("expected {source:?} to fail"),
        Err(err) => err,
    }
}

fn assert_script_error(source: &str) {
    parse_error(source, ParseOptions::script());
}

fn assert_module_error(source: &str) {
    parse_error(source, ParseOptions::module());
}

fn assert_script_error_is(source: &str, message: &DiagnosticMessage) {
    let err = parse_error(source, ParseOptions::script());
    assert!(err.is(message), "{source:?} failed with {err}");
}

fn assert_script_ok(source: &str) {
    script(source);
}

fn assert_module_ok(source: &str) {
    module(source);
}

/// Count nodes of the given ESTree type anywhere in `value`.
fn count_type(value: &Value, kind: &str) -> usize {
    match value {
        Value::Object(map) => {
            let own = usize::from(map.get("type").and_then(Value::as_str) == Some(kind));
            own + map.values().map(|v| count_type(v, kind)).sum::<usize>()
        }
        Value::Array(items) => items.iter().map(|v| count_type(v, kind)).sum(),
        _ => 0,
    }
}

fn first_expression(program: &Value) -> &Value {
    &program["body"][0]["expression"]
}

// ============================================================================
// Programs
// ============================================================================

#[test]
fn test_empty_program() {
    let program = script("");
    assert_eq!(program["type"], "Program");
    assert_eq!(program["sourceType"], "script");
    assert_eq!(program["body"], json!([]));
}

#[test]
fn test_module_source_type() {
    assert_eq!(module("export {};")["sourceType"], "module");
}

#[test]
fn test_hashbang_is_skipped() {
    let program = script("#!/usr/bin/env node\nfoo();");
    assert_eq!(program["body"].as_array().unwrap().len(), 1);
}

#[test]
fn test_directives() {
    let program = script("'use strict'; 'other'; x;");
    assert_eq!(program["body"][0]["directive"], "use strict");
    assert_eq!(program["body"][1]["directive"], "other");
    assert_eq!(program["body"][2].get("directive"), None);
}

#[test]
fn test_ranges_on_nodes() {
    let program = ranged("a + b;");
    assert_eq!(program["start"], 0);
    assert_eq!(program["end"], 6);
    assert_eq!(program["body"][0]["end"], 6);
    assert_eq!(first_expression(&program)["range"], json!([0, 5]));
}

// ============================================================================
// Cover grammar and destructuring
// ============================================================================

#[test]
fn test_arrow_with_member_in_array_pattern_fails() {
    assert_script_error("([a.b]) => a");
}

#[test]
fn test_arrow_with_array_pattern_parameter() {
    let program = script("([a]) => a");
    let arrow = first_expression(&program);
    assert_eq!(arrow["type"], "ArrowFunctionExpression");
    assert_eq!(arrow["params"][0]["type"], "ArrayPattern");
    assert_eq!(arrow["expression"], true);
}

#[test]
fn test_let_object_pattern_with_default() {
    let program = script("let {x=1,y}=z;");
    let declaration = &program["body"][0];
    assert_eq!(declaration["type"], "VariableDeclaration");
    assert_eq!(declaration["kind"], "let");
    let pattern = &declaration["declarations"][0]["id"];
    assert_eq!(pattern["type"], "ObjectPattern");
    let first = &pattern["properties"][0];
    assert_eq!(first["shorthand"], true);
    assert_eq!(first["value"]["type"], "AssignmentPattern");
    assert_eq!(first["value"]["left"]["name"], "x");
    assert_eq!(first["value"]["right"]["value"], 1);
    assert_eq!(pattern["properties"][1]["value"]["type"], "Identifier");
}

#[test]
fn test_destructuring_assignment() {
    let program = script("[a, {b: c.d}] = e;");
    let assignment = first_expression(&program);
    assert_eq!(assignment["left"]["type"], "ArrayPattern");
    assert_eq!(assignment["left"]["elements"][1]["properties"][0]["value"]["type"], "MemberExpression");
}

#[test]
fn test_shorthand_initializer_outside_pattern_fails() {
    assert_script_error_is("({a = 1});", &messages::INVALID_SHORTHAND_INITIALIZER);
    assert_script_ok("({a = 1} = b);");
    assert_script_ok("({a = 1}) => a;");
}

#[test]
fn test_invalid_assignment_targets() {
    assert_script_error("a + b = c;");
    assert_script_error("a() = 1;");
    assert_script_error("++a++;");
    assert_script_error("({a: 1} = b);");
    assert_script_error("[...a, b] = c;");
    assert_script_error("[...a,] = c;");
}

#[test]
fn test_parenthesized_target() {
    assert_script_ok("(a) = 1;");
    assert_script_ok("(a.b) = 1;");
    assert_script_error("([a]) = 1;");
    assert_script_error("({a}) = 1;");
}

#[test]
fn test_parenthesized_start_offset() {
    let program = ranged("(a) = 1;");
    assert_eq!(first_expression(&program)["start"], 0);
    let program = ranged("(a) + b;");
    assert_eq!(first_expression(&program)["start"], 0);
    assert_eq!(first_expression(&program)["left"]["start"], 1);
}

#[test]
fn test_duplicate_proto() {
    assert_script_error_is("({__proto__: 1, __proto__: 2});", &messages::DUPLICATE_PROTO);
    assert_script_ok("({__proto__: 1, __proto__});");
    assert_script_ok("({__proto__: a, __proto__: b} = x);");
    assert_script_ok("({__proto__: a, __proto__: b}) => 1;");
    assert_script_error_is("({__proto__: a, __proto__: b});", &messages::DUPLICATE_PROTO);
}

#[test]
fn test_rest_element_rules() {
    assert_script_ok("let [a, ...b] = c;");
    assert_script_ok("let {a, ...b} = c;");
    assert_script_error("let [...a = 1] = b;");
    assert_script_error("let {...{a}} = b;");
    assert_script_error("(...a, b) => a;");
}

#[test]
fn test_missing_initializers() {
    assert_script_error_is("const a;", &messages::MISSING_CONST_INITIALIZER);
    assert_script_error_is("let [a];", &messages::MISSING_DESTRUCTURING_INITIALIZER);
    assert_script_ok("let a;");
}

#[test]
fn test_unique_keys_in_patterns() {
    let options = ParseOptions {
        unique_keys_in_patterns: true,
        ..ParseOptions::default()
    };
    let err = parse_error("let {a, a: b} = c;", options);
    assert!(err.is(&messages::DUPLICATE_PATTERN_KEY));
    assert_script_ok("let {a, a: b} = c;");
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_binary_precedence() {
    let program = script("1 + 2 * 3;");
    let expr = first_expression(&program);
    assert_eq!(expr["operator"], "+");
    assert_eq!(expr["right"]["operator"], "*");
}

#[test]
fn test_exponent_is_right_associative() {
    let program = script("a ** b ** c;");
    let expr = first_expression(&program);
    assert_eq!(expr["left"]["name"], "a");
    assert_eq!(expr["right"]["operator"], "**");
}

#[test]
fn test_unary_before_exponent_fails() {
    assert_script_error_is("-a ** b;", &messages::UNARY_BEFORE_EXPONENTIATION);
    assert_script_ok("(-a) ** b;");
}

#[test]
fn test_nullish_mixing() {
    assert_script_error_is("a ?? b || c;", &messages::NULLISH_MIXED_WITH_LOGICAL);
    assert_script_error_is("a && b ?? c;", &messages::NULLISH_MIXED_WITH_LOGICAL);
    assert_script_ok("(a ?? b) || c;");
    assert_script_ok("a ?? (b && c);");
    assert_script_ok("a ?? b ?? c;");
}

#[test]
fn test_logical_node_type() {
    let program = script("a || b;");
    assert_eq!(first_expression(&program)["type"], "LogicalExpression");
}

#[test]
fn test_logical_assignment() {
    let program = script("a ||= b; c &&= d; e ??= f;");
    assert_eq!(program["body"][2]["expression"]["operator"], "??=");
    assert_script_error("[a] ||= b;");
}

#[test]
fn test_private_in() {
    assert_script_ok("class A { #x; m(o) { return #x in o; } }");
    assert_script_error("class A { #x; m(o) { return #y in o; } }");
    assert_script_error("#x in o;");
}

#[test]
fn test_sequence_and_conditional() {
    let program = script("a ? b : c, d;");
    let expr = first_expression(&program);
    assert_eq!(expr["type"], "SequenceExpression");
    assert_eq!(expr["expressions"][0]["type"], "ConditionalExpression");
}

// ============================================================================
// Optional chains
// ============================================================================

#[test]
fn test_single_chain_expression_for_member() {
    let program = script("a?.b.c;");
    assert_eq!(count_type(&program, "ChainExpression"), 1);
    assert_eq!(first_expression(&program)["type"], "ChainExpression");
}

#[test]
fn test_single_chain_expression_for_call() {
    let program = script("a?.b.c();");
    assert_eq!(count_type(&program, "ChainExpression"), 1);
    let chain = first_expression(&program);
    assert_eq!(chain["expression"]["type"], "CallExpression");
}

#[test]
fn test_parenthesized_chain_splits() {
    let program = script("(a?.b).c;");
    assert_eq!(count_type(&program, "ChainExpression"), 1);
    assert_eq!(first_expression(&program)["type"], "MemberExpression");
}

#[test]
fn test_optional_chain_errors() {
    assert_script_error_is("new a?.b();", &messages::OPTIONAL_CHAIN_NEW);
    assert_script_error_is("a?.b`c`;", &messages::OPTIONAL_CHAIN_TEMPLATE);
    assert_script_error("a?.b = 1;");
}

// ============================================================================
// Automatic semicolon insertion
// ============================================================================

#[test]
fn test_block_with_newline_has_two_statements() {
    let program = script("{ a\nb }");
    let block = &program["body"][0];
    assert_eq!(block["type"], "BlockStatement");
    assert_eq!(block["body"].as_array().unwrap().len(), 2);
}

#[test]
fn test_newline_before_increment() {
    let program = script("a\n++b");
    let body = program["body"].as_array().unwrap();
    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["expression"]["name"], "a");
    assert_eq!(body[1]["expression"]["type"], "UpdateExpression");
    assert_eq!(body[1]["expression"]["prefix"], true);
}

#[test]
fn test_no_asi_on_same_line() {
    assert_script_error("a b");
}

#[test]
fn test_restricted_productions() {
    let program = parse_json(
        "function f() { return\n1 }",
        ParseOptions::script(),
    );
    let body = &program["body"][0]["body"]["body"];
    assert_eq!(body[0]["argument"], Value::Null);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_script_error_is("throw\nerr;", &messages::NEWLINE_AFTER_THROW);
}

#[test]
fn test_do_while_semicolon() {
    assert_script_ok("do x; while (y) z;");
}

#[test]
fn test_arrow_line_terminator() {
    assert_script_error("a\n=> a;");
}

// ============================================================================
// Strict mode and directives
// ============================================================================

#[test]
fn test_sloppy_duplicate_parameters() {
    assert_script_ok("function f(a, a) {}");
}

#[test]
fn test_strict_body_rejects_duplicate_parameters() {
    assert_script_error("function f(a, a) { 'use strict'; }");
}

#[test]
fn test_arrow_duplicate_parameters() {
    assert_script_error("(a, a) => {};");
}

#[test]
fn test_generator_duplicate_parameters() {
    assert_script_error("function* f(a, a) {}");
}

#[test]
fn test_method_duplicate_parameters() {
    assert_script_error("({ m(a, a) {} });");
    assert_script_error("function f(a, [a]) {}");
}

#[test]
fn test_with_in_strict_program() {
    assert_script_error_is("\"use strict\"; with (x) {}", &messages::STRICT_WITH);
}

#[test]
fn test_with_in_strict_function() {
    assert_script_error("(function () { \"use strict\"; with (x) {} })");
}

#[test]
fn test_with_body_directive() {
    assert_script_error("with (x) { \"use strict\"; }");
    assert_script_ok("with (x) { y; }");
}

#[test]
fn test_use_strict_with_non_simple_parameters() {
    assert_script_error_is("function f(a = 1) { 'use strict'; }", &messages::ILLEGAL_USE_STRICT);
}

#[test]
fn test_strict_octal() {
    assert_script_ok("010;");
    assert_script_error("'use strict'; 010;");
    assert_script_error("'\\01'; 'use strict';");
}

#[test]
fn test_strict_delete_identifier() {
    assert_script_ok("delete x;");
    assert_script_error_is("'use strict'; delete x;", &messages::STRICT_DELETE);
    assert_script_ok("'use strict'; delete x.y;");
}

#[test]
fn test_strict_eval_arguments() {
    assert_script_ok("eval = 1;");
    assert_script_error_is("'use strict'; eval = 1;", &messages::STRICT_EVAL_ARGUMENTS);
    assert_script_error("'use strict'; arguments++;");
    assert_script_error("function eval() { 'use strict'; }");
}

#[test]
fn test_strict_reserved_words() {
    assert_script_ok("var let = 1, yield = 2, static = 3;");
    assert_script_error("'use strict'; var implements;");
    assert_module_error("var yield;");
}

#[test]
fn test_implied_strict_option() {
    let options = ParseOptions {
        implied_strict: true,
        ..ParseOptions::default()
    };
    parse_error("with (x) {}", options);
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_if_else() {
    let program = script("if (a) b; else c;");
    assert_eq!(program["body"][0]["type"], "IfStatement");
    assert_eq!(program["body"][0]["alternate"]["type"], "ExpressionStatement");
}

#[test]
fn test_switch() {
    let program = script("switch (x) { case 1: a; break; default: b; }");
    let cases = program["body"][0]["cases"].as_array().unwrap();
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[1]["test"], Value::Null);
    assert_script_error_is(
        "switch (x) { default: a; default: b; }",
        &messages::MULTIPLE_DEFAULTS_IN_SWITCH,
    );
}

#[test]
fn test_try_forms() {
    let program = script("try {} catch {} finally {}");
    assert_eq!(program["body"][0]["handler"]["param"], Value::Null);
    assert_script_ok("try {} catch ({a, b}) {}");
    assert_script_error_is("try {}", &messages::MISSING_CATCH_OR_FINALLY);
}

#[test]
fn test_catch_parameter_conflicts() {
    assert_script_ok("try {} catch (e) { var e; }");
    assert_script_error("try {} catch ([e]) { var e; }");
    assert_script_error("try {} catch (e) { let e; }");
}

#[test]
fn test_return_outside_function() {
    assert_script_error_is("return;", &messages::ILLEGAL_RETURN);
    let options = ParseOptions {
        global_return: true,
        ..ParseOptions::default()
    };
    parse_json("return 1;", options);
}

#[test]
fn test_declarations_in_single_statement_position() {
    assert_script_error_is("if (a) let [b] = c;", &messages::LEXICAL_IN_SINGLE_STATEMENT);
    assert_script_error("while (a) const b = 1;");
    assert_script_error("while (a) function f() {}");
    assert_script_error("if (a) function* g() {}");
    assert_script_error("label: class A {}");
}

#[test]
fn test_web_compat_function_in_if() {
    let options = ParseOptions {
        web_compat: true,
        ..ParseOptions::default()
    };
    let program = parse_json("if (a) function f() {}", options);
    assert_eq!(program["body"][0]["consequent"]["type"], "FunctionDeclaration");
    assert_script_error("if (a) function f() {}");
}

#[test]
fn test_let_as_identifier() {
    let program = script("let\nfoo;");
    assert_eq!(program["body"][0]["kind"], "let");
    assert_script_ok("let = 1;");
    assert_script_ok("if (a) let;");
    assert_script_error("let let = 1;");
}

// ============================================================================
// Loops
// ============================================================================

#[test]
fn test_for_classic() {
    let program = script("for (let i = 0; i < n; i++) {}");
    let stmt = &program["body"][0];
    assert_eq!(stmt["type"], "ForStatement");
    assert_eq!(stmt["init"]["kind"], "let");
    assert_eq!(stmt["update"]["type"], "UpdateExpression");
}

#[test]
fn test_for_in_and_of() {
    let program = script("for (const k in o) {} for (x of y) {} for ([a, b] of c) {}");
    assert_eq!(program["body"][0]["type"], "ForInStatement");
    assert_eq!(program["body"][1]["type"], "ForOfStatement");
    assert_eq!(program["body"][1]["await"], false);
    assert_eq!(program["body"][2]["left"]["type"], "ArrayPattern");
}

#[test]
fn test_for_in_inside_initializer_needs_parens() {
    assert_script_ok("for (var a = (b in c); ;) break;");
    assert_script_error("for (var a = b in c; ;) break;");
}

#[test]
fn test_for_head_errors() {
    assert_script_error_is("for (let a, b of c) {}", &messages::FOR_IN_OF_SINGLE_BINDING);
    assert_script_error_is("for (let a = 1 of c) {}", &messages::FOR_IN_OF_INITIALIZER);
    assert_script_error_is("for (async of x) {}", &messages::FOR_OF_ASYNC);
    assert_script_error("for (let.x of y) {}");
    assert_script_error("for (a + b of c) {}");
    assert_script_ok("for ((async) of x) {}");
    assert_script_ok("for (async of => {}; ;) break;");
    assert_script_ok("async of => 1;");
}

#[test]
fn test_for_await() {
    let program = module("for await (const x of y) {}");
    assert_eq!(program["body"][0]["await"], true);
    assert_script_ok("async function f() { for await (x of y) {} }");
    assert_script_error("function f() { for await (x of y) {} }");
    assert_script_ok("async function f() { for await (async of y) {} }");
    assert_module_error("for await (x in y) {}");
}

#[test]
fn test_web_compat_for_in_initializer() {
    let options = ParseOptions {
        web_compat: true,
        ..ParseOptions::default()
    };
    parse_json("for (var a = 1 in b) {}", options);
    assert_script_error("for (var a = 1 in b) {}");
}

// ============================================================================
// Labels and jumps
// ============================================================================

#[test]
fn test_labels() {
    assert_script_ok("a: while (1) { continue a; }");
    assert_script_ok("a: b: for (;;) { continue a; }");
    assert_script_ok("a: { break a; }");
    assert_script_error_is("a: { continue a; }", &messages::CONTINUE_TARGET_NOT_ITERATION);
    assert_script_error_is("a: a: ;", &messages::DUPLICATE_LABEL);
    assert_script_error_is("break b;", &messages::UNDEFINED_LABEL);
    assert_script_ok("a: ; a: ;");
}

#[test]
fn test_jumps_outside_loops() {
    assert_script_error_is("break;", &messages::ILLEGAL_BREAK);
    assert_script_error_is("continue;", &messages::ILLEGAL_CONTINUE);
    assert_script_error("while (1) { function f() { break; } }");
    assert_script_ok("switch (x) { case 1: break; }");
}

#[test]
fn test_await_and_yield_labels() {
    assert_script_ok("await: ;");
    assert_module_error("await: ;");
    assert_script_error("function* g() { yield: ; }");
}

// ============================================================================
// Functions and generators
// ============================================================================

#[test]
fn test_function_shapes() {
    let program = script("async function* f(a, [b], {c}, ...d) {}");
    let function = &program["body"][0];
    assert_eq!(function["async"], true);
    assert_eq!(function["generator"], true);
    assert_eq!(function["params"][3]["type"], "RestElement");
}

#[test]
fn test_yield_expressions() {
    let program = script("function* g() { yield; yield a; yield* b; }");
    let body = &program["body"][0]["body"]["body"];
    assert_eq!(body[0]["expression"]["argument"], Value::Null);
    assert_eq!(body[2]["expression"]["delegate"], true);
    assert_script_error("function* g(a = yield) {}");
    assert_script_ok("function f() { var yield; }");
}

#[test]
fn test_await_expressions() {
    assert_script_ok("async function f() { await x; }");
    assert_script_ok("function f() { var await; }");
    assert_script_error("async function f() { var await; }");
    assert_script_error("async function f(a = await x) {}");
    assert_script_error("async (a = await x) => {};");
}

#[test]
fn test_top_level_await() {
    let program = module("await x;");
    assert_eq!(first_expression(&program)["type"], "AwaitExpression");
    let program = script("await;");
    assert_eq!(first_expression(&program)["type"], "Identifier");
}

#[test]
fn test_async_arrows() {
    let program = script("async (a) => a; async x => x; async(a);");
    assert_eq!(program["body"][0]["expression"]["async"], true);
    assert_eq!(program["body"][1]["expression"]["type"], "ArrowFunctionExpression");
    assert_eq!(program["body"][2]["expression"]["type"], "CallExpression");
    assert_script_error("async\n(a) => a;");
}

#[test]
fn test_accessor_arity() {
    assert_script_error_is("({ get a(b) {} });", &messages::GETTER_PARAMETERS);
    assert_script_error_is("({ set a() {} });", &messages::SETTER_PARAMETERS);
    assert_script_error_is("({ set a(...b) {} });", &messages::SETTER_REST_PARAMETER);
    assert_script_ok("({ get a() {}, set a(v) {} });");
}

#[test]
fn test_new_target() {
    assert_script_ok("function f() { new.target; }");
    assert_script_ok("function f() { () => new.target; }");
    assert_script_error("new.target;");
    assert_script_error("() => new.target;");
}

#[test]
fn test_arguments_in_class_field() {
    assert_script_error_is("class A { x = arguments; }", &messages::ARGUMENTS_IN_INITIALIZER);
    assert_script_error("class A { x = () => arguments; }");
    assert_script_ok("class A { x = function () { arguments; }; }");
}

// ============================================================================
// Classes
// ============================================================================

#[test]
fn test_class_members() {
    let program = script("class A extends B { constructor() { super(); } static m() {} get x() {} #p = 1; static { this.y = 1; } }");
    let class = &program["body"][0];
    assert_eq!(class["type"], "ClassDeclaration");
    assert_eq!(class["superClass"]["name"], "B");
    let body = class["body"]["body"].as_array().unwrap();
    assert_eq!(body[0]["kind"], "constructor");
    assert_eq!(body[1]["static"], true);
    assert_eq!(body[2]["kind"], "get");
    assert_eq!(body[3]["type"], "PropertyDefinition");
    assert_eq!(body[3]["key"]["type"], "PrivateIdentifier");
    assert_eq!(body[4]["type"], "StaticBlock");
}

#[test]
fn test_class_modifier_names_as_keys() {
    let program = script("class A { static; get; set = 1; async() {} static static() {} }");
    let body = program["body"][0]["body"]["body"].as_array().unwrap();
    assert_eq!(body[0]["key"]["name"], "static");
    assert_eq!(body[1]["key"]["name"], "get");
    assert_eq!(body[3]["key"]["name"], "async");
    assert_eq!(body[4]["static"], true);
}

#[test]
fn test_class_constructor_rules() {
    assert_script_error_is("class A { constructor() {} constructor() {} }", &messages::DUPLICATE_CONSTRUCTOR);
    assert_script_error_is("class A { get constructor() {} }", &messages::INVALID_CONSTRUCTOR);
    assert_script_error_is("class A { *constructor() {} }", &messages::INVALID_CONSTRUCTOR);
    assert_script_error_is("class A { constructor = 1; }", &messages::CONSTRUCTOR_FIELD);
    assert_script_error_is("class A { static prototype() {} }", &messages::STATIC_PROTOTYPE);
    assert_script_error_is("class A { #constructor; }", &messages::PRIVATE_CONSTRUCTOR);
    assert_script_ok("class A { static constructor() {} }");
}

#[test]
fn test_super_rules() {
    assert_script_error_is("class A { constructor() { super(); } }", &messages::SUPER_CALL_NOT_ALLOWED);
    assert_script_ok("class A { m() { super.x; } }");
    assert_script_ok("({ m() { super.x; } });");
    assert_script_error("function f() { super.x; }");
    assert_script_error("class A extends B { m() { super(); } }");
    assert_script_ok("class A extends B { constructor() { () => super(); } }");
}

#[test]
fn test_private_names() {
    assert_script_ok("class A { #a; m() { this.#a; } }");
    assert_script_ok("class A { m() { this.#a; } #a; }");
    assert_script_ok("class A { get #a() {} set #a(v) {} }");
    assert_script_error_is("class A { #a; #a; }", &messages::DUPLICATE_PRIVATE_NAME);
    assert_script_error_is("class A { m() { this.#b; } }", &messages::UNDECLARED_PRIVATE_NAME);
    assert_script_ok("class A { #a; m() { class B { n() { this.#a; } } } }");
    assert_script_error("this.#a;");
    assert_script_error("class A { #a; m() { delete this.#a; } }");
}

#[test]
fn test_class_is_strict() {
    assert_script_error("class A { m() { with (x) {} } }");
    assert_script_error_is("class A { m() { var x = 010; } }", &messages::STRICT_OCTAL_LITERAL);
}

#[test]
fn test_class_name_required() {
    assert_script_error_is("class {}", &messages::CLASS_NAME_REQUIRED);
    assert_script_ok("(class {});");
    assert_module_ok("export default class {}");
}

#[test]
fn test_static_block_rules() {
    assert_script_error("class A { static { await; } }");
    assert_script_error("class A { static { return; } }");
    assert_script_error("class A { static { arguments; } }");
    assert_script_ok("class A { static { var x; let y; } }");
}

#[test]
fn test_decorators_require_next() {
    let options = ParseOptions {
        next: true,
        ..ParseOptions::default()
    };
    let program = parse_json("@a.b(c) class A { @d m() {} }", options);
    assert_eq!(program["body"][0]["decorators"][0]["expression"]["type"], "CallExpression");
    assert_script_error("@a class A {}");
}

// ============================================================================
// Scope errors
// ============================================================================

#[test]
fn test_lexical_redeclaration() {
    assert_script_error_is("let a; let a;", &messages::DUPLICATE_BINDING);
    assert_script_error("let a; var a;");
    assert_script_error("var a; let a;");
    assert_script_error("{ var a; } let a;");
    assert_script_ok("var a; var a;");
    assert_script_ok("let a; { let a; }");
    assert_script_error("function f(a) { let a; }");
    assert_script_ok("function f(a) { var a; }");
}

#[test]
fn test_let_in_lexical_binding() {
    assert_script_error_is("let [let] = x;", &messages::LET_IN_LEXICAL_BINDING);
    assert_script_error("const let = 1;");
}

#[test]
fn test_function_declarations_in_blocks() {
    assert_script_ok("function f() {} function f() {}");
    assert_script_error("{ function f() {} let f; }");
    assert_module_error("function f() {} let f;");
}

#[test]
fn test_escaped_keywords() {
    assert_script_error("v\\u0061r x = 1;");
    assert_script_ok("var v\\u0061lue = 1;");
}

// ============================================================================
// Modules
// ============================================================================

#[test]
fn test_import_forms() {
    let program = module(
        "import a from 'a'; import * as b from 'b'; import c, { d, e as f, 'g h' as i } from 'c'; import 'side';",
    );
    let body = program["body"].as_array().unwrap();
    assert_eq!(body[0]["specifiers"][0]["type"], "ImportDefaultSpecifier");
    assert_eq!(body[1]["specifiers"][0]["type"], "ImportNamespaceSpecifier");
    assert_eq!(body[2]["specifiers"].as_array().unwrap().len(), 4);
    assert_eq!(body[2]["specifiers"][3]["imported"]["value"], "g h");
    assert_eq!(body[3]["specifiers"], json!([]));
}

#[test]
fn test_import_attributes() {
    let program = module("import data from './data.json' with { type: 'json' };");
    assert_eq!(program["body"][0]["attributes"][0]["key"]["name"], "type");
    assert_eq!(program["body"][0]["attributes"][0]["value"]["value"], "json");
    assert_module_error("import a from 'a' with { type: 'json', type: 'css' };");
}

#[test]
fn test_export_forms() {
    let program = module(
        "export const a = 1; export function b() {} export { a as c, b as 'd' }; export * from 'x'; export * as ns from 'y'; export default 1;",
    );
    let body = program["body"].as_array().unwrap();
    assert_eq!(body[0]["type"], "ExportNamedDeclaration");
    assert_eq!(body[0]["declaration"]["type"], "VariableDeclaration");
    assert_eq!(body[2]["specifiers"][1]["exported"]["value"], "d");
    assert_eq!(body[3]["type"], "ExportAllDeclaration");
    assert_eq!(body[3]["exported"], Value::Null);
    assert_eq!(body[4]["exported"]["name"], "ns");
    assert_eq!(body[5]["type"], "ExportDefaultDeclaration");
}

#[test]
fn test_export_default_function() {
    let program = module("export default function () {}");
    assert_eq!(program["body"][0]["declaration"]["type"], "FunctionDeclaration");
    assert_eq!(program["body"][0]["declaration"]["id"], Value::Null);
}

#[test]
fn test_export_errors() {
    let err = parse_error("export const a = 1; export { a };", ParseOptions::module());
    assert!(err.is(&messages::DUPLICATE_EXPORT));
    let err = parse_error("export { missing };", ParseOptions::module());
    assert!(err.is(&messages::UNDECLARED_EXPORT));
    let err = parse_error("export { 'x' };", ParseOptions::module());
    assert!(err.is(&messages::STRING_EXPORT_WITHOUT_FROM));
    assert_module_ok("export { 'x' } from 'y';");
    assert_module_error("export default 1; export default 2;");
    assert_module_error("export { if };");
    assert_module_ok("export { if } from 'y';");
    assert_module_error("export * as 'a\\uD800' from 'y';");
}

#[test]
fn test_module_only_syntax() {
    assert_script_error_is("import a from 'a';", &messages::IMPORT_EXPORT_OUTSIDE_MODULE);
    assert_script_error("export {};");
    assert_module_error("{ import a from 'a'; }");
    assert_module_error("function f() { export {}; }");
    assert_script_error_is("import.meta;", &messages::IMPORT_META_OUTSIDE_MODULE);
    assert_module_ok("import.meta.url;");
}

#[test]
fn test_dynamic_import() {
    let program = script("import('a'); import('b', { with: {} });");
    assert_eq!(program["body"][0]["expression"]["type"], "ImportExpression");
    assert_eq!(program["body"][1]["expression"]["options"]["type"], "ObjectExpression");
    assert_script_error_is("import();", &messages::IMPORT_CALL_ARGUMENTS);
    assert_script_error("import(...a);");
}

#[test]
fn test_module_declares_lexically() {
    assert_module_error("import a from 'a'; let a;");
    assert_module_error("import { a, a } from 'b';");
}

// ============================================================================
// Literals and templates
// ============================================================================

#[test]
fn test_literals() {
    let options = ParseOptions {
        raw: true,
        ..ParseOptions::default()
    };
    let program = parse_json("'a'; 0x10; 1n; /x/g; null; true;", options);
    let body = program["body"].as_array().unwrap();
    assert_eq!(body[0]["expression"]["raw"], "'a'");
    assert_eq!(body[1]["expression"]["value"], 16);
    assert_eq!(body[2]["expression"]["bigint"], "1");
    assert_eq!(body[3]["expression"]["regex"]["flags"], "g");
    assert_eq!(body[4]["expression"]["value"], Value::Null);
    assert_eq!(body[5]["expression"]["value"], true);
}

#[test]
fn test_template_literals() {
    let program = script("`a${b}c`;");
    let template = first_expression(&program);
    assert_eq!(template["quasis"].as_array().unwrap().len(), 2);
    assert_eq!(template["quasis"][1]["tail"], true);
    assert_eq!(template["quasis"][0]["value"]["cooked"], "a");
}

#[test]
fn test_tagged_template_invalid_escape() {
    let program = script("tag`\\unicode`;");
    assert_eq!(first_expression(&program)["quasi"]["quasis"][0]["value"]["cooked"], Value::Null);
    assert_script_error("`\\unicode`;");
}

#[test]
fn test_regex_after_expression_statement() {
    let program = script("a\n/b/g.test(c);");
    assert_eq!(program["body"].as_array().unwrap().len(), 1);
    assert_eq!(first_expression(&program)["type"], "BinaryExpression");
}

// ============================================================================
// Markup
// ============================================================================

fn jsx(source: &str) -> Value {
    parse_json(
        source,
        ParseOptions {
            jsx: true,
            ..ParseOptions::default()
        },
    )
}

#[test]
fn test_jsx_element() {
    let program = jsx("<div className=\"a\" {...rest}>hi {name}<br /></div>;");
    let element = first_expression(&program);
    assert_eq!(element["type"], "JSXElement");
    assert_eq!(element["openingElement"]["name"]["name"], "div");
    assert_eq!(element["openingElement"]["attributes"][1]["type"], "JSXSpreadAttribute");
    let children = element["children"].as_array().unwrap();
    assert_eq!(children[0]["type"], "JSXText");
    assert_eq!(children[1]["type"], "JSXExpressionContainer");
    assert_eq!(children[2]["openingElement"]["selfClosing"], true);
}

#[test]
fn test_jsx_fragment_and_names() {
    let program = jsx("<><a.b.c /><svg:path data-x={1} /></>;");
    let fragment = first_expression(&program);
    assert_eq!(fragment["type"], "JSXFragment");
    assert_eq!(fragment["children"][0]["openingElement"]["name"]["type"], "JSXMemberExpression");
    assert_eq!(fragment["children"][1]["openingElement"]["name"]["type"], "JSXNamespacedName");
    assert_eq!(fragment["children"][1]["openingElement"]["attributes"][0]["name"]["name"], "data-x");
}

#[test]
fn test_jsx_errors() {
    let options = ParseOptions {
        jsx: true,
        ..ParseOptions::default()
    };
    assert!(parse_error("<a></b>;", options).is(&messages::JSX_CLOSING_TAG_MISMATCH));
    assert!(parse_error("<a x={} />;", options).is(&messages::JSX_EMPTY_ATTRIBUTE_EXPRESSION));
    assert!(parse_error("<a /><b />;", options).is(&messages::JSX_ADJACENT_ELEMENTS));
    assert_script_error("<a />;");
}

// ============================================================================
// Errors and limits
// ============================================================================

#[test]
fn test_error_display_has_position() {
    let err = parse_error("a b", ParseOptions::script());
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 2);
    assert!(err.to_string().ends_with("(1:2)"), "{err}");
}

#[test]
fn test_error_position_on_later_line() {
    let err = parse_error("a;\n  )", ParseOptions::script());
    assert_eq!((err.line, err.column), (2, 2));
    assert_eq!(err.offset, 5);
}

#[test]
fn test_max_nesting_depth() {
    let handle = std::thread::Builder::new()
        .stack_size(16 * 1024 * 1024)
        .spawn(|| {
            let deep = format!("{}a{}", "(".repeat(1000), ")".repeat(1000));
            let err = parse_error(&deep, ParseOptions::script());
            assert!(err.is(&messages::MAX_NESTING_DEPTH), "{err}");

            let blocks = format!("{}{}", "{".repeat(1000), "}".repeat(1000));
            let err = parse_error(&blocks, ParseOptions::script());
            assert!(err.is(&messages::MAX_NESTING_DEPTH), "{err}");

            let shallow = format!("{}a{}", "[".repeat(50), "]".repeat(50));
            script(&shallow);
        })
        .unwrap();
    handle.join().unwrap();
}

#[test]
fn test_max_nesting_depth_in_patterns_and_operators() {
    let handle = std::thread::Builder::new()
        .stack_size(16 * 1024 * 1024)
        .spawn(|| {
            let bindings = format!("let {}a{} = x;", "[".repeat(1000), "]".repeat(1000));
            let err = parse_error(&bindings, ParseOptions::script());
            assert!(err.is(&messages::MAX_NESTING_DEPTH), "{err}");

            let objects = format!("let {}{} = x;", "{a:".repeat(1000), "}".repeat(1000));
            let err = parse_error(&objects, ParseOptions::script());
            assert!(err.is(&messages::MAX_NESTING_DEPTH), "{err}");

            let powers = format!("{}a;", "a ** ".repeat(1000));
            let err = parse_error(&powers, ParseOptions::script());
            assert!(err.is(&messages::MAX_NESTING_DEPTH), "{err}");

            let yields = format!("function* g() {{ {}1; }}", "yield ".repeat(1000));
            let err = parse_error(&yields, ParseOptions::script());
            assert!(err.is(&messages::MAX_NESTING_DEPTH), "{err}");

            script(&format!("let {}a{} = x;", "[".repeat(20), "]".repeat(20)));
            script(&format!("{}a;", "a ** ".repeat(20)));
            script(&format!("function* g() {{ {}1; }}", "yield ".repeat(20)));
        })
        .unwrap();
    handle.join().unwrap();
}

// ============================================================================
// Observer
// ============================================================================

#[test]
fn test_observer_tokens_and_semicolons() {
    let arena = Allocator::new();
    let mut collector = Collector::new();
    parse_with_observer(&arena, "a + b\nc", ParseOptions::script(), &mut collector).unwrap();
    let kinds: Vec<Token> = collector.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![Token::Identifier, Token::Add, Token::Identifier, Token::Identifier]);
    assert_eq!(collector.semicolons, vec![5, 7]);
}

#[test]
fn test_observer_reports_regex_once() {
    let arena = Allocator::new();
    let mut collector = Collector::new();
    parse_with_observer(&arena, "x = /a/;", ParseOptions::script(), &mut collector).unwrap();
    let values: Vec<&str> = collector.tokens.iter().map(|t| t.value).collect();
    assert_eq!(values, vec!["x", "=", "/a/", ";"]);
}

#[test]
fn test_observer_comments() {
    let arena = Allocator::new();
    let mut collector = Collector::new();
    parse_with_observer(&arena, "// one\na; /* two */", ParseOptions::script(), &mut collector).unwrap();
    let values: Vec<&str> = collector.comments.iter().map(|c| c.value).collect();
    assert_eq!(values, vec![" one", " two "]);
}
