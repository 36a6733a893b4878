//! sable_printer: Syntax tree to JavaScript source.
//!
//! Regenerates source text that parses back into the same tree. Only the
//! parentheses the tree needs are written: operator precedence, constructs
//! that would be misread at the start of a statement, a bare `in` inside a
//! `for` head, `??` mixed with `&&`/`||`, `new` callees and optional-chain
//! boundaries. Literals keep their raw text when the tree carries it.

use sable_ast::precedence::{expression_precedence, OperatorPrecedence};
use sable_ast::*;

/// Options for the printer.
#[derive(Debug, Clone)]
pub struct PrinterOptions {
    /// Indentation string.
    pub indent_str: String,
    /// Newline string.
    pub new_line: String,
    /// Whether to emit a trailing newline.
    pub trailing_newline: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_str: "    ".to_string(),
            new_line: "\n".to_string(),
            trailing_newline: true,
        }
    }
}

/// Print a program with the default options.
pub fn print(program: &Program<'_>) -> String {
    Printer::new().print_program(program)
}

/// Which expressions cannot start at `Printer::guard_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartGuard {
    None,
    /// Expression statement: `{`, `function`, `class` and `let`.
    Statement,
    /// Concise arrow body: `{`.
    ArrowBody,
    /// `export default`: `function` and `class`.
    ExportDefault,
    /// Left side of a `for` head: `let`.
    ForHead,
}

/// The printer converts a syntax tree to text.
pub struct Printer {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
    guard: StartGuard,
    guard_at: usize,
    /// Inside a `for` initializer, where a bare `in` would end the head.
    no_in: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_level: 0,
            options,
            guard: StartGuard::None,
            guard_at: 0,
            no_in: false,
        }
    }

    /// Print a program to a string.
    pub fn print_program(&mut self, program: &Program<'_>) -> String {
        self.output.clear();
        self.indent_level = 0;
        self.guard = StartGuard::None;
        self.no_in = false;
        for (i, stmt) in program.body.iter().enumerate() {
            if i > 0 {
                self.write_newline();
            }
            self.write_indent();
            self.print_statement(stmt);
        }
        if self.options.trailing_newline && !self.output.is_empty() {
            self.write_newline();
        }
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Statement printing
    // ========================================================================

    fn print_statement(&mut self, stmt: &Statement<'_>) {
        match *stmt {
            Statement::Expression(n) => match n.directive {
                Some(directive) => self.print_directive(directive),
                None => {
                    self.set_guard(StartGuard::Statement);
                    // A lone string would turn into a directive in a prologue.
                    if n.expression.is_string_literal() {
                        self.parenthesize(&n.expression);
                    } else {
                        self.print_expression(&n.expression, OperatorPrecedence::Comma);
                    }
                    self.write(";");
                }
            },
            Statement::Block(n) => self.print_block(n.body),
            Statement::Empty(_) => self.write(";"),
            Statement::Debugger(_) => self.write("debugger;"),
            Statement::With(n) => {
                self.write("with (");
                self.print_expression(&n.object, OperatorPrecedence::Comma);
                self.write(") ");
                self.print_statement(&n.body);
            }
            Statement::Return(n) => {
                self.write("return");
                if let Some(argument) = &n.argument {
                    self.write(" ");
                    self.print_expression(argument, OperatorPrecedence::Comma);
                }
                self.write(";");
            }
            Statement::Labeled(n) => {
                self.write(n.label.name);
                self.write(": ");
                self.print_statement(&n.body);
            }
            Statement::Break(n) => {
                self.write("break");
                if let Some(label) = n.label {
                    self.write(" ");
                    self.write(label.name);
                }
                self.write(";");
            }
            Statement::Continue(n) => {
                self.write("continue");
                if let Some(label) = n.label {
                    self.write(" ");
                    self.write(label.name);
                }
                self.write(";");
            }
            Statement::If(n) => self.print_if_statement(n),
            Statement::Switch(n) => self.print_switch_statement(n),
            Statement::Throw(n) => {
                self.write("throw ");
                self.print_expression(&n.argument, OperatorPrecedence::Comma);
                self.write(";");
            }
            Statement::Try(n) => self.print_try_statement(n),
            Statement::While(n) => {
                self.write("while (");
                self.print_expression(&n.test, OperatorPrecedence::Comma);
                self.write(") ");
                self.print_statement(&n.body);
            }
            Statement::DoWhile(n) => {
                self.write("do ");
                self.print_statement(&n.body);
                self.write(" while (");
                self.print_expression(&n.test, OperatorPrecedence::Comma);
                self.write(");");
            }
            Statement::For(n) => self.print_for_statement(n),
            Statement::ForIn(n) => {
                self.write("for (");
                self.print_for_target(&n.left, false);
                self.write(" in ");
                self.print_expression(&n.right, OperatorPrecedence::Comma);
                self.write(") ");
                self.print_statement(&n.body);
            }
            Statement::ForOf(n) => {
                self.write(if n.is_await { "for await (" } else { "for (" });
                self.print_for_target(&n.left, true);
                self.write(" of ");
                self.print_expression(&n.right, OperatorPrecedence::Assignment);
                self.write(") ");
                self.print_statement(&n.body);
            }
            Statement::Variable(n) => {
                self.print_variable_declaration(n);
                self.write(";");
            }
            Statement::Function(n) => self.print_function(n),
            Statement::Class(n) => self.print_class(n),
            Statement::Import(n) => self.print_import_declaration(n),
            Statement::ExportNamed(n) => self.print_export_named_declaration(n),
            Statement::ExportDefault(n) => {
                self.write("export default ");
                match n.declaration {
                    ExportDefaultKind::Function(func) => self.print_function(func),
                    ExportDefaultKind::Class(class) => self.print_class(class),
                    ExportDefaultKind::Expression(expr) => {
                        self.set_guard(StartGuard::ExportDefault);
                        self.print_expression(&expr, OperatorPrecedence::Assignment);
                        self.write(";");
                    }
                }
            }
            Statement::ExportAll(n) => {
                self.write("export *");
                if let Some(exported) = &n.exported {
                    self.write(" as ");
                    self.print_module_export_name(exported);
                }
                self.write(" from ");
                self.print_literal(n.source);
                self.print_import_attributes(n.attributes);
                self.write(";");
            }
        }
    }

    /// Directives keep their source text, so only the quote is chosen here.
    fn print_directive(&mut self, directive: &str) {
        let quote = if has_unescaped(directive, '"') { "'" } else { "\"" };
        self.write(quote);
        self.write(directive);
        self.write(quote);
        self.write(";");
    }

    fn print_block(&mut self, body: &[Statement<'_>]) {
        if body.is_empty() {
            self.write("{}");
            return;
        }
        let no_in = std::mem::replace(&mut self.no_in, false);
        self.write("{");
        self.increase_indent();
        for stmt in body {
            self.write_newline();
            self.write_indent();
            self.print_statement(stmt);
        }
        self.decrease_indent();
        self.write_newline();
        self.write_indent();
        self.write("}");
        self.no_in = no_in;
    }

    fn print_if_statement(&mut self, node: &IfStatement<'_>) {
        self.write("if (");
        self.print_expression(&node.test, OperatorPrecedence::Comma);
        self.write(") ");
        self.print_statement(&node.consequent);
        if let Some(alternate) = &node.alternate {
            if matches!(node.consequent, Statement::Block(_)) {
                self.write(" ");
            } else {
                self.write_newline();
                self.write_indent();
            }
            self.write("else ");
            self.print_statement(alternate);
        }
    }

    fn print_switch_statement(&mut self, node: &SwitchStatement<'_>) {
        self.write("switch (");
        self.print_expression(&node.discriminant, OperatorPrecedence::Comma);
        self.write(") ");
        if node.cases.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.increase_indent();
        for case in node.cases {
            self.write_newline();
            self.write_indent();
            match &case.test {
                Some(test) => {
                    self.write("case ");
                    self.print_expression(test, OperatorPrecedence::Comma);
                    self.write(":");
                }
                None => self.write("default:"),
            }
            self.increase_indent();
            for stmt in case.consequent {
                self.write_newline();
                self.write_indent();
                self.print_statement(stmt);
            }
            self.decrease_indent();
        }
        self.decrease_indent();
        self.write_newline();
        self.write_indent();
        self.write("}");
    }

    fn print_try_statement(&mut self, node: &TryStatement<'_>) {
        self.write("try ");
        self.print_block(node.block.body);
        if let Some(handler) = node.handler {
            self.write(" catch ");
            if let Some(param) = &handler.param {
                self.write("(");
                self.print_pattern(param);
                self.write(") ");
            }
            self.print_block(handler.body.body);
        }
        if let Some(finalizer) = node.finalizer {
            self.write(" finally ");
            self.print_block(finalizer.body);
        }
    }

    fn print_for_statement(&mut self, node: &ForStatement<'_>) {
        self.write("for (");
        if let Some(init) = &node.init {
            let no_in = std::mem::replace(&mut self.no_in, true);
            match *init {
                ForInit::Variable(decl) => self.print_variable_declaration(decl),
                ForInit::Expression(expr) => {
                    self.set_guard(StartGuard::ForHead);
                    self.print_expression(&expr, OperatorPrecedence::Comma);
                }
            }
            self.no_in = no_in;
        }
        self.write(";");
        if let Some(test) = &node.test {
            self.write(" ");
            self.print_expression(test, OperatorPrecedence::Comma);
        }
        self.write(";");
        if let Some(update) = &node.update {
            self.write(" ");
            self.print_expression(update, OperatorPrecedence::Comma);
        }
        self.write(") ");
        self.print_statement(&node.body);
    }

    fn print_for_target(&mut self, target: &ForTarget<'_>, is_of: bool) {
        match *target {
            ForTarget::Variable(decl) => {
                let no_in = std::mem::replace(&mut self.no_in, true);
                self.print_variable_declaration(decl);
                self.no_in = no_in;
            }
            // `for (let` starts a declaration and `for (async of` is reserved.
            ForTarget::Pattern(Pattern::Identifier(id)) if id.name == "let" || (is_of && id.name == "async") => {
                self.write("(");
                self.write(id.name);
                self.write(")");
            }
            ForTarget::Pattern(pattern) => {
                self.set_guard(StartGuard::ForHead);
                self.print_pattern(&pattern);
            }
        }
    }

    fn print_variable_declaration(&mut self, node: &VariableDeclaration<'_>) {
        self.write(node.kind.as_str());
        self.write(" ");
        for (i, decl) in node.declarations.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_pattern(&decl.id);
            if let Some(init) = &decl.init {
                self.write(" = ");
                self.print_expression(init, OperatorPrecedence::Assignment);
            }
        }
    }

    // ========================================================================
    // Modules
    // ========================================================================

    fn print_import_declaration(&mut self, node: &ImportDeclaration<'_>) {
        self.write("import ");
        let mut named = Vec::new();
        let mut wrote_binding = false;
        for specifier in node.specifiers {
            match *specifier {
                ImportDeclarationSpecifier::Default(n) => {
                    self.write(n.local.name);
                    wrote_binding = true;
                }
                ImportDeclarationSpecifier::Namespace(n) => {
                    if wrote_binding {
                        self.write(", ");
                    }
                    self.write("* as ");
                    self.write(n.local.name);
                    wrote_binding = true;
                }
                ImportDeclarationSpecifier::Specifier(n) => named.push(n),
            }
        }
        if !named.is_empty() {
            if wrote_binding {
                self.write(", ");
            }
            self.write("{ ");
            for (i, specifier) in named.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                match specifier.imported {
                    ModuleExportName::Identifier(imported) if imported.name == specifier.local.name => {}
                    imported => {
                        self.print_module_export_name(&imported);
                        self.write(" as ");
                    }
                }
                self.write(specifier.local.name);
            }
            self.write(" }");
            wrote_binding = true;
        }
        if wrote_binding {
            self.write(" from ");
        }
        self.print_literal(node.source);
        self.print_import_attributes(node.attributes);
        self.write(";");
    }

    fn print_export_named_declaration(&mut self, node: &ExportNamedDeclaration<'_>) {
        self.write("export ");
        if let Some(declaration) = &node.declaration {
            self.print_statement(declaration);
            return;
        }
        if node.specifiers.is_empty() {
            self.write("{}");
        } else {
            self.write("{ ");
            for (i, specifier) in node.specifiers.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.print_module_export_name(&specifier.local);
                if !same_export_name(&specifier.local, &specifier.exported) {
                    self.write(" as ");
                    self.print_module_export_name(&specifier.exported);
                }
            }
            self.write(" }");
        }
        if let Some(source) = node.source {
            self.write(" from ");
            self.print_literal(source);
            self.print_import_attributes(node.attributes);
        }
        self.write(";");
    }

    fn print_import_attributes(&mut self, attributes: &[ImportAttribute<'_>]) {
        if attributes.is_empty() {
            return;
        }
        self.write(" with { ");
        for (i, attribute) in attributes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_module_export_name(&attribute.key);
            self.write(": ");
            self.print_literal(attribute.value);
        }
        self.write(" }");
    }

    fn print_module_export_name(&mut self, name: &ModuleExportName<'_>) {
        match *name {
            ModuleExportName::Identifier(id) => self.write(id.name),
            ModuleExportName::Literal(lit) => self.print_literal(lit),
        }
    }

    // ========================================================================
    // Functions and classes
    // ========================================================================

    fn print_function(&mut self, func: &Function<'_>) {
        if func.is_async {
            self.write("async ");
        }
        self.write("function");
        if func.generator {
            self.write("*");
        }
        if let Some(id) = func.id {
            self.write(" ");
            self.write(id.name);
        }
        self.print_function_tail(func);
    }

    /// Parameters and body, shared by functions and methods.
    fn print_function_tail(&mut self, func: &Function<'_>) {
        self.print_params(func.params);
        self.write(" ");
        self.print_block(func.body.body);
    }

    fn print_params(&mut self, params: &[Pattern<'_>]) {
        self.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_pattern(param);
        }
        self.write(")");
    }

    fn print_class(&mut self, class: &Class<'_>) {
        self.print_decorators(class.decorators);
        self.write("class");
        if let Some(id) = class.id {
            self.write(" ");
            self.write(id.name);
        }
        if let Some(super_class) = &class.super_class {
            self.write(" extends ");
            self.print_expression(super_class, OperatorPrecedence::LeftHandSide);
        }
        self.write(" ");
        if class.body.body.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.increase_indent();
        for element in class.body.body {
            self.write_newline();
            self.write_indent();
            self.print_class_element(element);
        }
        self.decrease_indent();
        self.write_newline();
        self.write_indent();
        self.write("}");
    }

    fn print_class_element(&mut self, element: &ClassElement<'_>) {
        match *element {
            ClassElement::Method(n) => {
                self.print_decorators(n.decorators);
                if n.is_static {
                    self.write("static ");
                }
                match n.kind {
                    MethodKind::Get => self.write("get "),
                    MethodKind::Set => self.write("set "),
                    MethodKind::Constructor | MethodKind::Method => {
                        self.print_method_modifiers(n.value);
                    }
                }
                self.print_property_key(&n.key, n.computed);
                self.print_function_tail(n.value);
            }
            ClassElement::Property(n) => {
                self.print_decorators(n.decorators);
                if n.is_static {
                    self.write("static ");
                }
                self.print_property_key(&n.key, n.computed);
                if let Some(value) = &n.value {
                    self.write(" = ");
                    self.print_expression(value, OperatorPrecedence::Assignment);
                }
                self.write(";");
            }
            ClassElement::StaticBlock(n) => {
                self.write("static ");
                self.print_block(n.body);
            }
        }
    }

    fn print_method_modifiers(&mut self, func: &Function<'_>) {
        if func.is_async {
            self.write("async ");
        }
        if func.generator {
            self.write("*");
        }
    }

    fn print_decorators(&mut self, decorators: &[Decorator<'_>]) {
        for decorator in decorators {
            self.write("@");
            if is_plain_decorator(&decorator.expression) {
                self.print_expression(&decorator.expression, OperatorPrecedence::LeftHandSide);
            } else {
                self.parenthesize(&decorator.expression);
            }
            self.write(" ");
        }
    }

    fn print_property_key(&mut self, key: &Expression<'_>, computed: bool) {
        if computed {
            self.write("[");
            self.print_expression(key, OperatorPrecedence::Assignment);
            self.write("]");
            return;
        }
        match *key {
            Expression::Identifier(id) => self.write(id.name),
            Expression::PrivateIdentifier(id) => {
                self.write("#");
                self.write(id.name);
            }
            Expression::Literal(lit) => self.print_literal(lit),
            _ => self.print_expression(key, OperatorPrecedence::Assignment),
        }
    }

    // ========================================================================
    // Expression printing
    // ========================================================================

    /// Print `expr` in a position that binds at least as tightly as `min`,
    /// adding parentheses when it would not.
    fn print_expression(&mut self, expr: &Expression<'_>, min: OperatorPrecedence) {
        let wrap = expression_precedence(expr) < min
            || self.starts_ambiguously(expr)
            || (self.no_in && matches!(expr, Expression::Binary(n) if n.operator == BinaryOperator::In));
        if wrap {
            self.parenthesize(expr);
        } else {
            self.print_expression_inner(expr);
        }
    }

    fn parenthesize(&mut self, expr: &Expression<'_>) {
        let no_in = std::mem::replace(&mut self.no_in, false);
        self.write("(");
        self.print_expression(expr, OperatorPrecedence::Comma);
        self.write(")");
        self.no_in = no_in;
    }

    fn print_expression_inner(&mut self, expr: &Expression<'_>) {
        match *expr {
            Expression::Identifier(n) => self.write(n.name),
            Expression::PrivateIdentifier(n) => {
                self.write("#");
                self.write(n.name);
            }
            Expression::Literal(n) => self.print_literal(n),
            Expression::This(_) => self.write("this"),
            Expression::Super(_) => self.write("super"),
            Expression::Array(n) => self.print_array(n),
            Expression::Object(n) => self.print_object(n),
            Expression::Function(n) => self.print_function(n),
            Expression::ArrowFunction(n) => self.print_arrow_function(n),
            Expression::Class(n) => self.print_class(n),
            Expression::Template(n) => self.print_template(n),
            Expression::TaggedTemplate(n) => {
                self.print_callee(&n.tag);
                self.print_template(n.quasi);
            }
            Expression::Member(n) => self.print_member(n),
            Expression::Call(n) => {
                self.print_callee(&n.callee);
                if n.optional {
                    self.write("?.");
                }
                self.print_arguments(n.arguments);
            }
            Expression::New(n) => {
                self.write("new ");
                if contains_call(&n.callee) {
                    self.parenthesize(&n.callee);
                } else {
                    self.print_expression(&n.callee, OperatorPrecedence::Member);
                }
                self.print_arguments(n.arguments);
            }
            // Links inside the chain carry their own `?.`; the chain node
            // itself only matters where it ends.
            Expression::Chain(n) => self.print_expression_inner(&n.expression),
            Expression::Update(n) => {
                if n.prefix {
                    self.write(n.operator.as_str());
                    self.print_expression(&n.argument, OperatorPrecedence::LeftHandSide);
                } else {
                    self.print_expression(&n.argument, OperatorPrecedence::LeftHandSide);
                    self.write(n.operator.as_str());
                }
            }
            Expression::Unary(n) => {
                let operator = n.operator.as_str();
                self.write(operator);
                if n.operator.is_keyword() {
                    self.write(" ");
                }
                let at = self.output.len();
                self.print_expression(&n.argument, OperatorPrecedence::Unary);
                // `- -a` and `+ ++a` must not fuse into one token.
                let signed = matches!(n.operator, UnaryOperator::Minus | UnaryOperator::Plus);
                if signed && self.output[at..].starts_with(operator) {
                    self.output.insert(at, ' ');
                }
            }
            Expression::Binary(n) => {
                let level = expression_precedence(expr);
                let (left_min, right_min) = if n.operator == BinaryOperator::Exponentiate {
                    // Right associative, and a unary operand on the left is
                    // a syntax error.
                    (OperatorPrecedence::Update, level)
                } else {
                    (level, level.tighter())
                };
                self.print_expression(&n.left, left_min);
                self.write(" ");
                self.write(n.operator.as_str());
                self.write(" ");
                self.print_expression(&n.right, right_min);
            }
            Expression::Logical(n) => {
                let level = expression_precedence(expr);
                self.print_logical_operand(&n.left, n.operator, level);
                self.write(" ");
                self.write(n.operator.as_str());
                self.write(" ");
                self.print_logical_operand(&n.right, n.operator, level.tighter());
            }
            Expression::Conditional(n) => {
                self.print_expression(&n.test, OperatorPrecedence::Coalesce);
                self.write(" ? ");
                self.print_expression(&n.consequent, OperatorPrecedence::Assignment);
                self.write(" : ");
                self.print_expression(&n.alternate, OperatorPrecedence::Assignment);
            }
            Expression::Assignment(n) => {
                self.print_pattern(&n.left);
                self.write(" ");
                self.write(n.operator.as_str());
                self.write(" ");
                self.print_expression(&n.right, OperatorPrecedence::Assignment);
            }
            Expression::Sequence(n) => {
                for (i, item) in n.expressions.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print_expression(item, OperatorPrecedence::Assignment);
                }
            }
            Expression::Yield(n) => {
                self.write(if n.delegate { "yield*" } else { "yield" });
                if let Some(argument) = &n.argument {
                    self.write(" ");
                    self.print_expression(argument, OperatorPrecedence::Assignment);
                }
            }
            Expression::Await(n) => {
                self.write("await ");
                self.print_expression(&n.argument, OperatorPrecedence::Unary);
            }
            Expression::Import(n) => {
                self.write("import(");
                self.print_expression(&n.source, OperatorPrecedence::Assignment);
                if let Some(options) = &n.options {
                    self.write(", ");
                    self.print_expression(options, OperatorPrecedence::Assignment);
                }
                self.write(")");
            }
            Expression::MetaProperty(n) => {
                self.write(n.meta.name);
                self.write(".");
                self.write(n.property.name);
            }
            Expression::Parenthesized(n) => self.parenthesize(&n.expression),
            Expression::JsxElement(n) => self.print_jsx_element(n),
            Expression::JsxFragment(n) => self.print_jsx_fragment(n),
        }
    }

    fn print_logical_operand(&mut self, operand: &Expression<'_>, operator: LogicalOperator, min: OperatorPrecedence) {
        let mixes = matches!(
            operand,
            Expression::Logical(inner)
                if (operator == LogicalOperator::Coalesce) != (inner.operator == LogicalOperator::Coalesce)
        );
        if mixes {
            self.parenthesize(operand);
        } else {
            self.print_expression(operand, min);
        }
    }

    /// The object of a member access, callee of a call or tag of a
    /// template. A finished optional chain has to stay closed off.
    fn print_callee(&mut self, callee: &Expression<'_>) {
        if matches!(callee, Expression::Chain(_)) {
            self.parenthesize(callee);
        } else {
            self.print_expression(callee, OperatorPrecedence::LeftHandSide);
        }
    }

    fn print_member(&mut self, node: &MemberExpression<'_>) {
        let bare_integer = !node.computed
            && matches!(node.object, Expression::Literal(lit) if is_bare_integer(&literal_number_text(lit)));
        if bare_integer {
            self.parenthesize(&node.object);
        } else {
            self.print_callee(&node.object);
        }
        if node.computed {
            self.write(if node.optional { "?.[" } else { "[" });
            self.print_expression(&node.property, OperatorPrecedence::Comma);
            self.write("]");
            return;
        }
        self.write(if node.optional { "?." } else { "." });
        match node.property {
            Expression::Identifier(id) => self.write(id.name),
            Expression::PrivateIdentifier(id) => {
                self.write("#");
                self.write(id.name);
            }
            property => self.print_expression(&property, OperatorPrecedence::Primary),
        }
    }

    fn print_arguments(&mut self, arguments: &[ExpressionOrSpread<'_>]) {
        self.write("(");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_expression_or_spread(argument);
        }
        self.write(")");
    }

    fn print_expression_or_spread(&mut self, item: &ExpressionOrSpread<'_>) {
        match *item {
            ExpressionOrSpread::Expression(expr) => self.print_expression(&expr, OperatorPrecedence::Assignment),
            ExpressionOrSpread::Spread(spread) => {
                self.write("...");
                self.print_expression(&spread.argument, OperatorPrecedence::Assignment);
            }
        }
    }

    fn print_array(&mut self, node: &ArrayExpression<'_>) {
        self.write("[");
        for (i, element) in node.elements.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if let Some(element) = element {
                self.print_expression_or_spread(element);
            }
        }
        // A trailing hole needs its own comma.
        if matches!(node.elements.last(), Some(None)) {
            self.write(",");
        }
        self.write("]");
    }

    fn print_object(&mut self, node: &ObjectExpression<'_>) {
        if node.properties.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        for (i, member) in node.properties.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            match *member {
                ObjectMember::Property(prop) => self.print_property(prop),
                ObjectMember::Spread(spread) => {
                    self.write("...");
                    self.print_expression(&spread.argument, OperatorPrecedence::Assignment);
                }
            }
        }
        self.write(" }");
    }

    fn print_property(&mut self, prop: &Property<'_>) {
        let method = match prop.value {
            Expression::Function(func) if prop.method || prop.kind != PropertyKind::Init => Some(func),
            _ => None,
        };
        if let Some(func) = method {
            match prop.kind {
                PropertyKind::Get => self.write("get "),
                PropertyKind::Set => self.write("set "),
                PropertyKind::Init => self.print_method_modifiers(func),
            }
            self.print_property_key(&prop.key, prop.computed);
            self.print_function_tail(func);
        } else if prop.shorthand {
            self.print_expression(&prop.value, OperatorPrecedence::Assignment);
        } else {
            self.print_property_key(&prop.key, prop.computed);
            self.write(": ");
            self.print_expression(&prop.value, OperatorPrecedence::Assignment);
        }
    }

    fn print_arrow_function(&mut self, node: &ArrowFunctionExpression<'_>) {
        if node.is_async {
            self.write("async ");
        }
        self.print_params(node.params);
        self.write(" => ");
        match node.body {
            ArrowBody::Block(block) => self.print_block(block.body),
            ArrowBody::Expression(body) => {
                self.set_guard(StartGuard::ArrowBody);
                self.print_expression(&body, OperatorPrecedence::Assignment);
            }
        }
    }

    fn print_template(&mut self, node: &TemplateLiteral<'_>) {
        self.write("`");
        for (i, quasi) in node.quasis.iter().enumerate() {
            self.write(quasi.value.raw);
            if let Some(expr) = node.expressions.get(i) {
                let no_in = std::mem::replace(&mut self.no_in, false);
                self.write("${");
                self.print_expression(expr, OperatorPrecedence::Comma);
                self.write("}");
                self.no_in = no_in;
            }
        }
        self.write("`");
    }

    // ========================================================================
    // Patterns
    // ========================================================================

    fn print_pattern(&mut self, pattern: &Pattern<'_>) {
        match *pattern {
            Pattern::Identifier(id) => self.write(id.name),
            Pattern::Object(n) => {
                if n.properties.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                for (i, property) in n.properties.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    match *property {
                        ObjectPatternProperty::Property(prop) if prop.shorthand => self.print_pattern(&prop.value),
                        ObjectPatternProperty::Property(prop) => {
                            self.print_property_key(&prop.key, prop.computed);
                            self.write(": ");
                            self.print_pattern(&prop.value);
                        }
                        ObjectPatternProperty::Rest(rest) => {
                            self.write("...");
                            self.print_pattern(&rest.argument);
                        }
                    }
                }
                self.write(" }");
            }
            Pattern::Array(n) => {
                self.write("[");
                for (i, element) in n.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(element) = element {
                        self.print_pattern(element);
                    }
                }
                if matches!(n.elements.last(), Some(None)) {
                    self.write(",");
                }
                self.write("]");
            }
            Pattern::Rest(n) => {
                self.write("...");
                self.print_pattern(&n.argument);
            }
            Pattern::Assignment(n) => {
                self.print_pattern(&n.left);
                self.write(" = ");
                self.print_expression(&n.right, OperatorPrecedence::Assignment);
            }
            Pattern::Member(member) => {
                self.print_expression(&Expression::Member(member), OperatorPrecedence::LeftHandSide);
            }
        }
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn print_literal(&mut self, lit: &Literal<'_>) {
        if let Some(raw) = lit.raw {
            self.write(raw);
            return;
        }
        match lit.value {
            LiteralValue::String(value) => self.write_quoted(value),
            LiteralValue::Number(_) => {
                let text = literal_number_text(lit);
                self.write_owned(text);
            }
            LiteralValue::Boolean(value) => self.write(if value { "true" } else { "false" }),
            LiteralValue::Null => self.write("null"),
            LiteralValue::RegExp => {
                if let Some(regex) = lit.regex {
                    self.write("/");
                    self.write(regex.pattern);
                    self.write("/");
                    self.write(regex.flags);
                }
            }
            LiteralValue::BigInt => {
                self.write(lit.bigint.unwrap_or("0"));
                self.write("n");
            }
        }
    }

    fn write_quoted(&mut self, value: &str) {
        self.output.push('"');
        for ch in value.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{2028}' => self.output.push_str("\\u2028"),
                '\u{2029}' => self.output.push_str("\\u2029"),
                c if (c as u32) < 0x20 || c == '\u{7f}' => {
                    self.write_owned(format!("\\u{:04x}", c as u32));
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    // ========================================================================
    // Markup
    // ========================================================================

    fn print_jsx_element(&mut self, node: &JsxElement<'_>) {
        let opening = node.opening_element;
        self.write("<");
        self.print_jsx_element_name(&opening.name);
        for attribute in opening.attributes {
            self.write(" ");
            match *attribute {
                JsxAttributeItem::Attribute(attr) => {
                    match attr.name {
                        JsxAttributeName::Identifier(id) => self.write(id.name),
                        JsxAttributeName::Namespaced(name) => self.print_jsx_namespaced_name(name),
                    }
                    if let Some(value) = &attr.value {
                        self.write("=");
                        self.print_jsx_attribute_value(value);
                    }
                }
                JsxAttributeItem::Spread(spread) => {
                    self.write("{...");
                    self.print_expression(&spread.argument, OperatorPrecedence::Assignment);
                    self.write("}");
                }
            }
        }
        if opening.self_closing {
            self.write(" />");
            return;
        }
        self.write(">");
        self.print_jsx_children(node.children);
        self.write("</");
        match node.closing_element {
            Some(closing) => self.print_jsx_element_name(&closing.name),
            None => self.print_jsx_element_name(&opening.name),
        }
        self.write(">");
    }

    fn print_jsx_fragment(&mut self, node: &JsxFragment<'_>) {
        self.write("<>");
        self.print_jsx_children(node.children);
        self.write("</>");
    }

    fn print_jsx_children(&mut self, children: &[JsxChild<'_>]) {
        for child in children {
            match *child {
                JsxChild::Text(text) => self.write(text.raw),
                JsxChild::Element(element) => self.print_jsx_element(element),
                JsxChild::Fragment(fragment) => self.print_jsx_fragment(fragment),
                JsxChild::Expression(container) => self.print_jsx_expression_container(container),
                JsxChild::Spread(spread) => {
                    self.write("{...");
                    self.print_expression(&spread.expression, OperatorPrecedence::Assignment);
                    self.write("}");
                }
            }
        }
    }

    fn print_jsx_attribute_value(&mut self, value: &JsxAttributeValue<'_>) {
        match *value {
            JsxAttributeValue::String(lit) => match (lit.raw, lit.as_str()) {
                (Some(raw), _) => self.write(raw),
                (None, Some(text)) => {
                    // No escapes in markup strings; entities stand in for
                    // the characters that would end or rewrite the value.
                    self.write("\"");
                    let escaped = text.replace('&', "&amp;").replace('"', "&quot;");
                    self.write_owned(escaped);
                    self.write("\"");
                }
                (None, None) => self.write("\"\""),
            },
            JsxAttributeValue::Expression(container) => self.print_jsx_expression_container(container),
            JsxAttributeValue::Element(element) => self.print_jsx_element(element),
            JsxAttributeValue::Fragment(fragment) => self.print_jsx_fragment(fragment),
        }
    }

    fn print_jsx_expression_container(&mut self, container: &JsxExpressionContainer<'_>) {
        self.write("{");
        if let JsxExpression::Expression(expr) = container.expression {
            self.print_expression(&expr, OperatorPrecedence::Assignment);
        }
        self.write("}");
    }

    fn print_jsx_element_name(&mut self, name: &JsxElementName<'_>) {
        match *name {
            JsxElementName::Identifier(id) => self.write(id.name),
            JsxElementName::Namespaced(name) => self.print_jsx_namespaced_name(name),
            JsxElementName::Member(member) => self.print_jsx_member(member),
        }
    }

    fn print_jsx_namespaced_name(&mut self, name: &JsxNamespacedName<'_>) {
        self.write(name.namespace.name);
        self.write(":");
        self.write(name.name.name);
    }

    fn print_jsx_member(&mut self, member: &JsxMemberExpression<'_>) {
        match member.object {
            JsxMemberObject::Identifier(id) => self.write(id.name),
            JsxMemberObject::Member(inner) => self.print_jsx_member(inner),
        }
        self.write(".");
        self.write(member.property.name);
    }

    // ========================================================================
    // Start-of-construct guards
    // ========================================================================

    fn set_guard(&mut self, guard: StartGuard) {
        self.guard = guard;
        self.guard_at = self.output.len();
    }

    /// Whether `expr` would be read as something else if printed at the
    /// current position.
    fn starts_ambiguously(&self, expr: &Expression<'_>) -> bool {
        if self.output.len() != self.guard_at {
            return false;
        }
        let is_let = matches!(expr, Expression::Identifier(id) if id.name == "let");
        let assigns_object = matches!(expr, Expression::Assignment(n) if matches!(n.left, Pattern::Object(_)));
        match self.guard {
            StartGuard::None => false,
            StartGuard::Statement => {
                matches!(expr, Expression::Object(_) | Expression::Function(_) | Expression::Class(_))
                    || is_let
                    || assigns_object
            }
            StartGuard::ArrowBody => matches!(expr, Expression::Object(_)) || assigns_object,
            StartGuard::ExportDefault => matches!(expr, Expression::Function(_) | Expression::Class(_)),
            StartGuard::ForHead => is_let,
        }
    }

    // ========================================================================
    // Output helpers
    // ========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_owned(&mut self, s: String) {
        self.output.push_str(&s);
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

/// A call anywhere along a member chain would end a `new` callee early.
fn contains_call(expr: &Expression<'_>) -> bool {
    match *expr {
        Expression::Call(_) | Expression::Chain(_) | Expression::Import(_) => true,
        Expression::Member(n) => contains_call(&n.object),
        Expression::TaggedTemplate(n) => contains_call(&n.tag),
        _ => false,
    }
}

/// `@a.b.c` and `@a.b(args)` need no parentheses; anything else does.
fn is_plain_decorator(expr: &Expression<'_>) -> bool {
    match *expr {
        Expression::Identifier(_) => true,
        Expression::Member(n) => !n.computed && !n.optional && is_plain_decorator(&n.object),
        Expression::Call(n) => !n.optional && is_plain_decorator(&n.callee),
        _ => false,
    }
}

fn same_export_name(a: &ModuleExportName<'_>, b: &ModuleExportName<'_>) -> bool {
    match (a, b) {
        (ModuleExportName::Identifier(a), ModuleExportName::Identifier(b)) => a.name == b.name,
        (ModuleExportName::Literal(a), ModuleExportName::Literal(b)) => a.as_str() == b.as_str() && a.raw == b.raw,
        _ => false,
    }
}

/// Whether `text` contains `quote` outside an escape sequence.
fn has_unescaped(text: &str, quote: char) -> bool {
    let mut escaped = false;
    for ch in text.chars() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return true;
        }
    }
    false
}

fn literal_number_text(lit: &Literal<'_>) -> String {
    if let Some(raw) = lit.raw {
        return raw.to_string();
    }
    match lit.value {
        LiteralValue::Number(value) => format_number(value),
        _ => String::new(),
    }
}

/// Shortest text that reads back as `value`.
fn format_number(value: f64) -> String {
    if value.is_infinite() {
        return "1e999".to_string();
    }
    let abs = value.abs();
    if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

/// `1.x` would read as a malformed number.
fn is_bare_integer(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1e21), "1e21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(f64::INFINITY), "1e999");
    }

    #[test]
    fn test_has_unescaped() {
        assert!(has_unescaped("it\"s", '"'));
        assert!(!has_unescaped("it\\\"s", '"'));
        assert!(has_unescaped("a\\\\\"", '"'));
        assert!(!has_unescaped("plain", '\''));
    }

    #[test]
    fn test_is_bare_integer() {
        assert!(is_bare_integer("10"));
        assert!(is_bare_integer("1_000"));
        assert!(!is_bare_integer("1.5"));
        assert!(!is_bare_integer("0x10"));
        assert!(!is_bare_integer("1e3"));
    }
}
