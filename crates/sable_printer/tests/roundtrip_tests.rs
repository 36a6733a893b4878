//! Printer integration tests.
//!
//! Every program is parsed, printed, and parsed again; the two trees must
//! serialize identically. A few tests also pin the exact output where the
//! parenthesization is the point.

use pretty_assertions::assert_eq;
use sable_core::Allocator;
use sable_options::ParseOptions;
use sable_parser::parse;
use sable_printer::print;

/// Helper: parse, print and reparse `source`, returning the printed text.
fn roundtrip(source: &str, options: ParseOptions) -> String {
    let arena = Allocator::new();
    let program = match parse(&arena, source, options) {
        Ok(program) => program,
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    };
    let printed = print(&program);
    let expected = serde_json::to_value(&program).unwrap();

    let reparse_arena = Allocator::new();
    let reparsed = match parse(&reparse_arena, &printed, options) {
        Ok(program) => program,
        Err(err) => panic!("printed source does not parse: {err}\n{printed}"),
    };
    assert_eq!(serde_json::to_value(&reparsed).unwrap(), expected, "printed:\n{printed}");
    printed
}

fn script(source: &str) -> String {
    roundtrip(source, ParseOptions::script())
}

fn module(source: &str) -> String {
    roundtrip(source, ParseOptions::module())
}

fn with_raw(source: &str) -> String {
    roundtrip(
        source,
        ParseOptions {
            raw: true,
            ..ParseOptions::default()
        },
    )
}

fn jsx(source: &str) -> String {
    roundtrip(
        source,
        ParseOptions {
            jsx: true,
            raw: true,
            ..ParseOptions::default()
        },
    )
}

fn assert_prints(source: &str, expected: &str) {
    assert_eq!(script(source), expected);
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_precedence_parentheses() {
    assert_prints("a + b * c;", "a + b * c;\n");
    assert_prints("(a + b) * c;", "(a + b) * c;\n");
    assert_prints("(a - b) - c;", "a - b - c;\n");
    assert_prints("a - (b - c);", "a - (b - c);\n");
    assert_prints("a = (b, c);", "a = (b, c);\n");
    assert_prints("(a ? b : c) ? d : e;", "(a ? b : c) ? d : e;\n");
}

#[test]
fn test_exponent_grouping() {
    assert_prints("a ** b ** c;", "a ** b ** c;\n");
    assert_prints("(a ** b) ** c;", "(a ** b) ** c;\n");
    assert_prints("(-a) ** b;", "(-a) ** b;\n");
    assert_prints("a ** -b;", "a ** -b;\n");
}

#[test]
fn test_coalesce_keeps_explicit_grouping() {
    assert_prints("a ?? (b || c);", "a ?? (b || c);\n");
    assert_prints("(a && b) ?? c;", "(a && b) ?? c;\n");
    assert_prints("a || (b && c);", "a || b && c;\n");
    assert_prints("(a ?? b) ?? c;", "a ?? b ?? c;\n");
}

#[test]
fn test_unary_signs_do_not_fuse() {
    assert_prints("-(-a);", "- -a;\n");
    assert_prints("+(+a);", "+ +a;\n");
    assert_prints("-(--a);", "- --a;\n");
    assert_prints("typeof (a + b);", "typeof (a + b);\n");
}

#[test]
fn test_expression_forms() {
    script("x = a ? b : c ? d : e;");
    script("a ||= b; a &&= c; a ??= d; a **= 2; a >>>= 1;");
    script("x = typeof a === \"string\" && !b;");
    script("x = (void 0, delete a.b);");
    script("x = a instanceof B || \"k\" in o;");
    script("x = ++a + b++ - --c;");
    script("x = (a, b) => a + b;");
    script("x = async (a) => { await a; };");
    script("x = async function () { for await (const v of s) {} };");
    script("x = function* () { yield; yield* a; yield b; };");
    script("x = { a, b: 1, [c]: 2, \"d\": 3, 4: 5, get e() { return 1; }, set e(v) {}, f() {}, async *g() {}, ...h };");
    script("x = [1, , 2, ...a, ,];");
    script("x = [,];");
    script("x = `a${b}c${`d${e}`}`;");
    script("x = tag`a${b}\\u{41}`;");
    script("x = /ab+c/gi.test(s);");
    script("x = 10n + 0x1Fn;");
    script("x = 1_000 + .5 + 5e-7 + 0b101 + 0o17 + 1e400;");
    script("x = import(\"./m.js\");");
    script("function f() { return new.target; }");
}

// ============================================================================
// Statement starts and heads
// ============================================================================

#[test]
fn test_statement_start_guards() {
    assert_prints("({}).toString();", "({}).toString();\n");
    assert_prints("(function () {})();", "(function() {})();\n");
    assert_prints("(class {});", "(class {});\n");
    assert_prints("({ a } = b);", "({ a } = b);\n");
    assert_prints("(async function () {});", "(async function() {});\n");
    assert_prints("x = () => ({});", "x = () => ({});\n");
    assert_prints("x = () => ({ a } = b);", "x = () => ({ a } = b);\n");
}

#[test]
fn test_in_inside_for_initializer() {
    assert_prints("for ((a in b);;);", "for ((a in b);;) ;\n");
    assert_prints(
        "for (var i = (0 in x); i < 1; i++) {}",
        "for (var i = (0 in x); i < 1; i++) {}\n",
    );
    script("for (var f = function () { return a in b; };;) break;");
    script("for (x = [a in b];;) break;");
}

#[test]
fn test_directives_and_strings() {
    assert_prints("\"use strict\"; 'it\"s';", "\"use strict\";\n'it\"s';\n");
    assert_prints("(\"not a directive\");", "(\"not a directive\");\n");
    assert_prints("a; \"b\";", "a;\n(\"b\");\n");
    script("function f() { 'use strict'; return this; }");
}

// ============================================================================
// Calls, members and chains
// ============================================================================

#[test]
fn test_new_callees() {
    assert_prints("new (a())();", "new (a())();\n");
    assert_prints("new (a.b().c);", "new (a.b().c)();\n");
    assert_prints("new a.b;", "new a.b();\n");
    assert_prints("new new A()();", "new new A()();\n");
    assert_prints("(new A).b;", "new A().b;\n");
}

#[test]
fn test_optional_chain_boundaries() {
    assert_prints("(a?.b).c;", "(a?.b).c;\n");
    assert_prints("a?.b.c;", "a?.b.c;\n");
    assert_prints("(a?.b)();", "(a?.b)();\n");
    assert_prints("a?.(b)?.[c];", "a?.(b)?.[c];\n");
    assert_prints("new (a?.b)();", "new (a?.b)();\n");
}

#[test]
fn test_number_member_access() {
    assert_prints("1..toString();", "(1).toString();\n");
    assert_eq!(with_raw("1..toString();"), "1..toString();\n");
    assert_eq!(with_raw("1.5.toFixed(1);"), "1.5.toFixed(1);\n");
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_literals_without_raw_text() {
    assert_prints("let x = 0x10, y = 'a\\nb';", "let x = 16, y = \"a\\nb\";\n");
    assert_prints("x = 'say \"hi\"';", "x = \"say \\\"hi\\\"\";\n");
    assert_prints("x = 1e21;", "x = 1e21;\n");
}

#[test]
fn test_literals_keep_raw_text() {
    assert_eq!(with_raw("let x = 0x10, y = 'a\\nb';"), "let x = 0x10, y = 'a\\nb';\n");
    assert_eq!(with_raw("x = 1_000n;"), "x = 1_000n;\n");
    assert_eq!(with_raw("x = `a\\x41${b}`;"), "x = `a\\x41${b}`;\n");
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_block_layout() {
    assert_prints(
        "function f(a, b = 1) { return a; }",
        "function f(a, b = 1) {\n    return a;\n}\n",
    );
    assert_prints("if (a) b; else c;", "if (a) b;\nelse c;\n");
    assert_prints("if (a) {} else {}", "if (a) {} else {}\n");
}

#[test]
fn test_statement_forms() {
    script("var a = 1, b;\nlet { c, d: [e, , f = 2], ...g } = h;\nconst [i, ...j] = k;");
    script("label: for (var i = 0; i < 10; i++) { if (i) continue label; else break label; }");
    script("for (const k in o) ;\nfor (let [k, v] of m) {}\nfor (a.b of c) {}\nfor (;;) {}");
    script("while (a) a--;\ndo a++; while (a < 10);");
    script("switch (a) { case 1: b(); break; case 2: default: c(); }\nswitch (a) {}");
    script("try { a(); } catch { b(); } finally { c(); }\ntry { a(); } catch ({ message }) { b(message); }");
    script("throw new Error(\"x\");");
    script("if (a) if (b) c(); else d(); else e();");
    script("with (o) { a; }\ndebugger;");
    script("function f(a, b = a, ...c) { return arguments.length; }");
    script("function* g() { const x = yield 1; return x; }\nasync function h() { return await g(); }");
}

#[test]
fn test_semicolon_insertion_sources() {
    script("a = 1\nb = 2\nc\n++d");
    script("let x = y\n(z)\nlet w = `t`");
    script("function f() {\n  return\n  a\n}");
    script("do x++\nwhile (x < 3) y()");
}

#[test]
fn test_classes() {
    script(concat!(
        "class A extends B {\n",
        "  static #count = 0;\n",
        "  #x;\n",
        "  y = 1;\n",
        "  constructor() { super(); this.#x = 1; }\n",
        "  get x() { return this.#x; }\n",
        "  set x(v) { this.#x = v; }\n",
        "  static { A.#count++; }\n",
        "  static has(o) { return #x in o; }\n",
        "  *[Symbol.iterator]() {}\n",
        "  async m() { await super.m(); }\n",
        "  'quoted'() {}\n",
        "  get() {}\n",
        "  static async *gen() {}\n",
        "}\n",
        "const C = class extends (a, b) {};",
    ));
}

// ============================================================================
// Modules
// ============================================================================

#[test]
fn test_module_forms() {
    module(concat!(
        "import def, * as ns from \"a\";\n",
        "import { a, b as c, \"d e\" as f } from \"b\";\n",
        "import \"side-effect\";\n",
        "import json from \"./data.json\" with { type: \"json\" };\n",
        "export const x = 1;\n",
        "export function g() {}\n",
        "export class K {}\n",
        "const q = 1;\n",
        "export { q as qq, q as \"s t\" };\n",
        "export * from \"c\";\n",
        "export * as n from \"d\";\n",
        "export { default as dd, e } from \"e\";\n",
        "export default function () {}\n",
        "const m = import.meta.url;\n",
        "const p = await import(\"./p.js\");\n",
        "for await (const v of s) {}\n",
    ));
}

#[test]
fn test_export_default_expressions() {
    module("export default (function () {});");
    module("export default (class {});");
    module("export default a + b;");
    module("export default async () => {};");
}

// ============================================================================
// Markup
// ============================================================================

#[test]
fn test_markup() {
    let printed = jsx("<a b=\"c\" {...d}>text {e}</a>;");
    assert_eq!(printed, "<a b=\"c\" {...d}>text {e}</a>;\n");
    jsx(concat!(
        "const el = <div className='a' data-x={1} {...p}>\n",
        "  text &amp; more\n",
        "  <Foo.Bar x:y=\"z\" />\n",
        "  {cond ? <>frag</> : null}\n",
        "  {/* comment */}\n",
        "</div>;",
    ));
}

#[test]
fn test_markup_strings_without_raw_text() {
    let options = ParseOptions {
        jsx: true,
        ..ParseOptions::default()
    };
    let printed = roundtrip("<a b='say \"hi\" &amp; bye' />;", options);
    assert_eq!(printed, "<a b=\"say &quot;hi&quot; &amp; bye\" />;\n");
}
