//! Statements and declarations.

use sable_ast::types::DestructuringFlags;
use sable_ast::*;
use sable_binder::{BindingKind, ScopeKind};
use sable_diagnostics::{messages, ParseResult};
use tracing::trace;

use crate::context::Context;
use crate::parser::{Parser, StatementPosition};
use crate::patterns::PatternMode;
use crate::utilities::{is_eval_or_arguments, starts_let_declaration};

impl<'a, 'o> Parser<'a, 'o> {
    // ========================================================================
    // Statement lists
    // ========================================================================

    /// A statement or declaration directly inside a statement list.
    pub(crate) fn parse_statement_list_item(&mut self, ctx: Context) -> ParseResult<Statement<'a>> {
        let start = self.start();
        match self.token() {
            Token::FunctionKeyword if !self.escaped() => {
                self.enter_nesting()?;
                let function = self.parse_function_declaration(ctx, false, true)?;
                self.leave_nesting();
                Ok(Statement::Function(function))
            }
            Token::AsyncKeyword if self.at_async_function() => {
                self.enter_nesting()?;
                let function = self.parse_function_declaration(ctx, true, true)?;
                self.leave_nesting();
                Ok(Statement::Function(function))
            }
            Token::ClassKeyword if !self.escaped() => {
                self.enter_nesting()?;
                let class = self.parse_class(ctx, start, ClassType::ClassDeclaration, &[], false)?;
                self.leave_nesting();
                Ok(Statement::Class(class))
            }
            Token::At if self.options.next => {
                let decorators = self.parse_decorators(ctx)?;
                match self.token() {
                    Token::ClassKeyword => Ok(Statement::Class(self.parse_class(
                        ctx,
                        start,
                        ClassType::ClassDeclaration,
                        decorators,
                        false,
                    )?)),
                    Token::ExportKeyword if ctx.contains(Context::TOP_LEVEL) => self.parse_export(ctx, start, decorators),
                    _ => Err(self.error(&messages::INVALID_DECORATOR_POSITION, &[])),
                }
            }
            Token::ConstKeyword if !self.escaped() => self.parse_variable_statement(ctx, VariableKind::Const),
            Token::LetKeyword if self.at_let_declaration() => self.parse_variable_statement(ctx, VariableKind::Let),
            Token::ImportKeyword if !self.escaped() && !matches!(self.peek().0, Token::LeftParen | Token::Dot) => {
                if !ctx.contains(Context::TOP_LEVEL) {
                    return Err(self.error(&messages::IMPORT_EXPORT_OUTSIDE_MODULE, &["import"]));
                }
                self.parse_import_declaration(ctx)
            }
            Token::ExportKeyword if !self.escaped() => {
                if !ctx.contains(Context::TOP_LEVEL) {
                    return Err(self.error(&messages::IMPORT_EXPORT_OUTSIDE_MODULE, &["export"]));
                }
                self.parse_export(ctx, start, &[])
            }
            _ => self.parse_statement(ctx, StatementPosition::ListItem),
        }
    }

    /// `async function` with no line break between the two words.
    pub(crate) fn at_async_function(&mut self) -> bool {
        if !self.at_keyword(Token::AsyncKeyword) {
            return false;
        }
        let (next, flags) = self.peek();
        next == Token::FunctionKeyword && !flags.has_preceding_line_break()
    }

    /// `let` that starts a lexical declaration rather than an identifier
    /// expression.
    fn at_let_declaration(&mut self) -> bool {
        self.at_keyword(Token::LetKeyword) && starts_let_declaration(self.peek().0)
    }

    pub(crate) fn parse_statement(&mut self, ctx: Context, position: StatementPosition) -> ParseResult<Statement<'a>> {
        self.enter_nesting()?;
        let statement = self.parse_statement_inner(ctx, position)?;
        self.leave_nesting();
        Ok(statement)
    }

    fn parse_statement_inner(&mut self, ctx: Context, position: StatementPosition) -> ParseResult<Statement<'a>> {
        let start = self.start();
        if self.escaped() && self.token().is_reserved_word() {
            return Err(self.error(&messages::ESCAPED_KEYWORD, &[]));
        }
        match self.token() {
            Token::LeftBrace => Ok(Statement::Block(self.parse_block(ctx, ScopeKind::BLOCK)?)),
            Token::Semicolon => {
                self.next_token()?;
                Ok(Statement::Empty(self.alloc(EmptyStatement {
                    span: self.finish(start),
                })))
            }
            Token::VarKeyword => self.parse_variable_statement(ctx, VariableKind::Var),
            Token::IfKeyword => self.parse_if(ctx, start),
            Token::ForKeyword => self.parse_for(ctx, start),
            Token::WhileKeyword => self.parse_while(ctx, start),
            Token::DoKeyword => self.parse_do_while(ctx, start),
            Token::ContinueKeyword => self.parse_break_or_continue(ctx, start, true),
            Token::BreakKeyword => self.parse_break_or_continue(ctx, start, false),
            Token::ReturnKeyword => self.parse_return(ctx, start),
            Token::WithKeyword => self.parse_with(ctx, start),
            Token::SwitchKeyword => self.parse_switch(ctx, start),
            Token::ThrowKeyword => self.parse_throw(ctx, start),
            Token::TryKeyword => self.parse_try(ctx, start),
            Token::DebuggerKeyword => {
                self.next_token()?;
                self.consume_semicolon()?;
                Ok(Statement::Debugger(self.alloc(DebuggerStatement {
                    span: self.finish(start),
                })))
            }
            Token::FunctionKeyword => self.parse_function_in_statement_position(ctx, position),
            Token::AsyncKeyword if self.at_async_function() => {
                Err(self.error(&messages::GENERATOR_IN_SINGLE_STATEMENT, &[]))
            }
            Token::ClassKeyword | Token::ConstKeyword => {
                Err(self.error(&messages::LEXICAL_IN_SINGLE_STATEMENT, &[]))
            }
            Token::LetKeyword if !self.escaped() && self.at_single_statement_let() => {
                Err(self.error(&messages::LEXICAL_IN_SINGLE_STATEMENT, &[]))
            }
            Token::ImportKeyword if !matches!(self.peek().0, Token::LeftParen | Token::Dot) => {
                Err(self.error(&messages::IMPORT_EXPORT_OUTSIDE_MODULE, &["import"]))
            }
            Token::ExportKeyword => Err(self.error(&messages::IMPORT_EXPORT_OUTSIDE_MODULE, &["export"])),
            _ => self.parse_expression_or_labelled(ctx, start, position),
        }
    }

    /// `let [` can never start an expression statement, and `let x` on one
    /// line is a misplaced declaration.
    fn at_single_statement_let(&mut self) -> bool {
        let (next, flags) = self.peek();
        next == Token::LeftBracket || (starts_let_declaration(next) && !flags.has_preceding_line_break())
    }

    /// A function declaration where only a statement is expected. Sloppy
    /// web-compatible code allows plain functions as `if` bodies and labelled
    /// statements.
    fn parse_function_in_statement_position(
        &mut self,
        ctx: Context,
        position: StatementPosition,
    ) -> ParseResult<Statement<'a>> {
        if self.peek().0 == Token::Multiply {
            return Err(self.error(&messages::GENERATOR_IN_SINGLE_STATEMENT, &[]));
        }
        let allowed = !ctx.is_strict()
            && self.options.web_compat
            && matches!(position, StatementPosition::IfBody | StatementPosition::Labelled);
        if !allowed {
            return Err(self.error(&messages::FUNCTION_IN_SINGLE_STATEMENT, &[]));
        }
        if position == StatementPosition::IfBody {
            self.scopes.push(ScopeKind::BLOCK);
            let function = self.parse_function_declaration(ctx, false, true)?;
            self.scopes.pop();
            return Ok(Statement::Function(function));
        }
        Ok(Statement::Function(self.parse_function_declaration(ctx, false, true)?))
    }

    // ========================================================================
    // Expression and labelled statements
    // ========================================================================

    fn parse_expression_or_labelled(
        &mut self,
        ctx: Context,
        start: u32,
        position: StatementPosition,
    ) -> ParseResult<Statement<'a>> {
        if self.token().is_identifier() && self.peek().0 == Token::Colon {
            return self.parse_labelled(ctx, start, position);
        }
        let expression = self.parse_expression(ctx)?;
        self.consume_semicolon()?;
        Ok(Statement::Expression(self.alloc(ExpressionStatement {
            span: self.finish(start),
            expression,
            directive: None,
        })))
    }

    fn parse_labelled(&mut self, ctx: Context, start: u32, position: StatementPosition) -> ParseResult<Statement<'a>> {
        let name = self.token_value();
        self.check_identifier_reference(name, start, ctx)?;
        let label = self.identifier_node()?;
        self.expect(Token::Colon)?;

        let chain = self.label_chain.take().unwrap_or(self.labels.len());
        if !self.labels.push(name) {
            return Err(self.error_at(&messages::DUPLICATE_LABEL, &[name], start));
        }
        if matches!(self.token(), Token::ForKeyword | Token::WhileKeyword | Token::DoKeyword) && !self.escaped() {
            self.labels.mark_iteration(chain);
        } else if self.token().is_identifier() && self.peek().0 == Token::Colon {
            self.label_chain = Some(chain);
        }

        let body_position = match position {
            StatementPosition::ListItem | StatementPosition::Labelled => StatementPosition::Labelled,
            _ => StatementPosition::Single,
        };
        let body = self.parse_statement(ctx, body_position)?;
        self.labels.pop();
        Ok(Statement::Labeled(self.alloc(LabeledStatement {
            span: self.finish(start),
            label,
            body,
        })))
    }

    // ========================================================================
    // Blocks and declarations
    // ========================================================================

    /// `{ ... }` in a fresh scope of `kind`.
    pub(crate) fn parse_block(&mut self, ctx: Context, kind: ScopeKind) -> ParseResult<&'a BlockStatement<'a>> {
        let start = self.start();
        self.expect(Token::LeftBrace)?;
        let ctx = ctx.without(Context::TOP_LEVEL);
        self.scopes.push(kind);
        let mut body = self.vec();
        while self.token() != Token::RightBrace {
            if self.token() == Token::EndOfSource {
                return Err(self.unexpected());
            }
            body.push(self.parse_statement_list_item(ctx)?);
        }
        self.next_token()?;
        self.scopes.pop();
        Ok(self.alloc(BlockStatement {
            span: self.finish(start),
            body: body.into_bump_slice(),
        }))
    }

    fn parse_variable_statement(&mut self, ctx: Context, kind: VariableKind) -> ParseResult<Statement<'a>> {
        let start = self.start();
        self.next_token()?;
        let declarations = self.parse_variable_declarations(ctx, kind, false)?;
        self.consume_semicolon()?;
        Ok(Statement::Variable(self.alloc(VariableDeclaration {
            span: self.finish(start),
            declarations,
            kind,
        })))
    }

    /// Declarators after `var`, `let` or `const`. Inside a `for` head the
    /// initializer checks are left to the caller, which knows whether this
    /// is a for-in/of binding.
    pub(crate) fn parse_variable_declarations(
        &mut self,
        ctx: Context,
        kind: VariableKind,
        in_for: bool,
    ) -> ParseResult<&'a [VariableDeclarator<'a>]> {
        let binding = match kind {
            VariableKind::Var => BindingKind::Var,
            VariableKind::Let => BindingKind::Let,
            VariableKind::Const => BindingKind::Const,
        };
        let mut declarations = self.vec();
        loop {
            let start = self.start();
            let id = self.parse_binding_target(ctx, binding)?;
            let init = if self.eat(Token::Assign)? {
                Some(self.parse_assignment_expression(ctx)?)
            } else {
                None
            };
            let declarator = VariableDeclarator {
                span: self.finish(start),
                id,
                init,
            };
            if !in_for {
                self.check_declarator_initializer(&declarator, kind)?;
            }
            declarations.push(declarator);
            if !self.eat(Token::Comma)? {
                break;
            }
        }
        Ok(declarations.into_bump_slice())
    }

    fn check_declarator_initializer(&self, declarator: &VariableDeclarator<'a>, kind: VariableKind) -> ParseResult<()> {
        if declarator.init.is_some() {
            return Ok(());
        }
        if kind == VariableKind::Const {
            return Err(self.error_at(&messages::MISSING_CONST_INITIALIZER, &[], declarator.span.start));
        }
        if !matches!(declarator.id, Pattern::Identifier(_)) {
            return Err(self.error_at(&messages::MISSING_DESTRUCTURING_INITIALIZER, &[], declarator.span.start));
        }
        Ok(())
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    fn parse_paren_expression(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        self.expect(Token::LeftParen)?;
        let expr = self.parse_expression(ctx.without(Context::DISALLOW_IN))?;
        self.expect(Token::RightParen)?;
        Ok(expr)
    }

    fn parse_if(&mut self, ctx: Context, start: u32) -> ParseResult<Statement<'a>> {
        self.next_token()?;
        let test = self.parse_paren_expression(ctx)?;
        let consequent = self.parse_statement(ctx, StatementPosition::IfBody)?;
        let alternate = if self.eat(Token::ElseKeyword)? {
            Some(self.parse_statement(ctx, StatementPosition::IfBody)?)
        } else {
            None
        };
        Ok(Statement::If(self.alloc(IfStatement {
            span: self.finish(start),
            test,
            consequent,
            alternate,
        })))
    }

    fn parse_while(&mut self, ctx: Context, start: u32) -> ParseResult<Statement<'a>> {
        self.next_token()?;
        let test = self.parse_paren_expression(ctx)?;
        let body = self.parse_statement(ctx.with(Context::IN_ITERATION), StatementPosition::Single)?;
        Ok(Statement::While(self.alloc(WhileStatement {
            span: self.finish(start),
            test,
            body,
        })))
    }

    fn parse_do_while(&mut self, ctx: Context, start: u32) -> ParseResult<Statement<'a>> {
        self.next_token()?;
        let body = self.parse_statement(ctx.with(Context::IN_ITERATION), StatementPosition::Single)?;
        self.expect(Token::WhileKeyword)?;
        let test = self.parse_paren_expression(ctx)?;
        // A semicolon is always inserted after `do ... while (x)`.
        if !self.eat(Token::Semicolon)? {
            self.insert_semicolon();
        }
        Ok(Statement::DoWhile(self.alloc(DoWhileStatement {
            span: self.finish(start),
            body,
            test,
        })))
    }

    fn parse_break_or_continue(&mut self, ctx: Context, start: u32, is_continue: bool) -> ParseResult<Statement<'a>> {
        self.next_token()?;
        let label = if self.token().is_identifier() && !self.line_break_before() {
            let name = self.token_value();
            match self.labels.is_iteration(name) {
                None => return Err(self.error(&messages::UNDEFINED_LABEL, &[name])),
                Some(false) if is_continue => {
                    return Err(self.error(&messages::CONTINUE_TARGET_NOT_ITERATION, &[name]));
                }
                Some(_) => {}
            }
            Some(self.identifier_node()?)
        } else if is_continue && !ctx.contains(Context::IN_ITERATION) {
            return Err(self.error_at(&messages::ILLEGAL_CONTINUE, &[], start));
        } else if !is_continue && !ctx.intersects(Context::IN_ITERATION | Context::IN_SWITCH) {
            return Err(self.error_at(&messages::ILLEGAL_BREAK, &[], start));
        } else {
            None
        };
        self.consume_semicolon()?;
        let span = self.finish(start);
        Ok(if is_continue {
            Statement::Continue(self.alloc(ContinueStatement { span, label }))
        } else {
            Statement::Break(self.alloc(BreakStatement { span, label }))
        })
    }

    fn parse_return(&mut self, ctx: Context, start: u32) -> ParseResult<Statement<'a>> {
        if !ctx.contains(Context::IN_FUNCTION) {
            return Err(self.error(&messages::ILLEGAL_RETURN, &[]));
        }
        self.next_token()?;
        let ends_here = matches!(self.token(), Token::Semicolon | Token::RightBrace | Token::EndOfSource)
            || self.line_break_before();
        let argument = if ends_here { None } else { Some(self.parse_expression(ctx)?) };
        self.consume_semicolon()?;
        Ok(Statement::Return(self.alloc(ReturnStatement {
            span: self.finish(start),
            argument,
        })))
    }

    fn parse_with(&mut self, ctx: Context, start: u32) -> ParseResult<Statement<'a>> {
        if ctx.is_strict() {
            return Err(self.error(&messages::STRICT_WITH, &[]));
        }
        self.next_token()?;
        let object = self.parse_paren_expression(ctx)?;
        let body = self.parse_statement(ctx, StatementPosition::Single)?;
        // A body opening with the strict pragma is rejected like strict code.
        if let Statement::Block(block) = body {
            if block.body.first().map_or(false, |first| is_use_strict(*first)) {
                return Err(self.error_at(&messages::STRICT_WITH, &[], start));
            }
        }
        Ok(Statement::With(self.alloc(WithStatement {
            span: self.finish(start),
            object,
            body,
        })))
    }

    fn parse_switch(&mut self, ctx: Context, start: u32) -> ParseResult<Statement<'a>> {
        self.next_token()?;
        let discriminant = self.parse_paren_expression(ctx)?;
        self.expect(Token::LeftBrace)?;
        self.scopes.push(ScopeKind::SWITCH);
        let case_ctx = ctx.with(Context::IN_SWITCH).without(Context::TOP_LEVEL);
        let mut cases = self.vec();
        let mut seen_default = false;

        while self.token() != Token::RightBrace {
            let case_start = self.start();
            let test = match self.token() {
                Token::CaseKeyword => {
                    self.next_token()?;
                    Some(self.parse_expression(ctx.without(Context::DISALLOW_IN))?)
                }
                Token::DefaultKeyword => {
                    if seen_default {
                        return Err(self.error(&messages::MULTIPLE_DEFAULTS_IN_SWITCH, &[]));
                    }
                    seen_default = true;
                    self.next_token()?;
                    None
                }
                _ => return Err(self.unexpected()),
            };
            self.expect(Token::Colon)?;
            let mut consequent = self.vec();
            while !matches!(
                self.token(),
                Token::CaseKeyword | Token::DefaultKeyword | Token::RightBrace | Token::EndOfSource
            ) {
                consequent.push(self.parse_statement_list_item(case_ctx)?);
            }
            cases.push(SwitchCase {
                span: self.finish(case_start),
                test,
                consequent: consequent.into_bump_slice(),
            });
        }
        self.next_token()?;
        self.scopes.pop();
        Ok(Statement::Switch(self.alloc(SwitchStatement {
            span: self.finish(start),
            discriminant,
            cases: cases.into_bump_slice(),
        })))
    }

    fn parse_throw(&mut self, ctx: Context, start: u32) -> ParseResult<Statement<'a>> {
        self.next_token()?;
        if self.line_break_before() {
            return Err(self.error(&messages::NEWLINE_AFTER_THROW, &[]));
        }
        let argument = self.parse_expression(ctx)?;
        self.consume_semicolon()?;
        Ok(Statement::Throw(self.alloc(ThrowStatement {
            span: self.finish(start),
            argument,
        })))
    }

    fn parse_try(&mut self, ctx: Context, start: u32) -> ParseResult<Statement<'a>> {
        self.next_token()?;
        let block = self.parse_block(ctx, ScopeKind::BLOCK)?;

        let handler = if self.at_keyword(Token::CatchKeyword) {
            let catch_start = self.start();
            self.next_token()?;
            self.scopes.push(ScopeKind::CATCH_PARAM);
            let param = if self.eat(Token::LeftParen)? {
                let kind = if self.token().is_identifier() {
                    BindingKind::CatchSimple
                } else {
                    BindingKind::CatchPattern
                };
                let param = self.parse_binding_target(ctx, kind)?;
                self.expect(Token::RightParen)?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block(ctx, ScopeKind::CATCH_BODY)?;
            self.scopes.pop();
            Some(&*self.alloc(CatchClause {
                span: self.finish(catch_start),
                param,
                body,
            }))
        } else {
            None
        };

        let finalizer = if self.eat(Token::FinallyKeyword)? {
            Some(self.parse_block(ctx, ScopeKind::BLOCK)?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.error(&messages::MISSING_CATCH_OR_FINALLY, &[]));
        }
        Ok(Statement::Try(self.alloc(TryStatement {
            span: self.finish(start),
            block,
            handler,
            finalizer,
        })))
    }

    // ========================================================================
    // for, for-in, for-of
    // ========================================================================

    /// All three loop forms share the prefix up to the token after the
    /// first head element, which decides the form.
    fn parse_for(&mut self, ctx: Context, start: u32) -> ParseResult<Statement<'a>> {
        self.next_token()?;
        let is_await = if self.at_keyword(Token::AwaitKeyword) {
            if !ctx.in_async() {
                return Err(self.unexpected());
            }
            self.last_await = Some(self.start());
            self.next_token()?;
            true
        } else {
            false
        };
        self.expect(Token::LeftParen)?;
        self.scopes.push(ScopeKind::FOR_HEAD);
        let statement = self.parse_for_head(ctx, start, is_await)?;
        self.scopes.pop();
        Ok(statement)
    }

    fn parse_for_head(&mut self, ctx: Context, start: u32, is_await: bool) -> ParseResult<Statement<'a>> {
        let head_ctx = ctx.with(Context::DISALLOW_IN);
        let init_start = self.start();

        if self.token() == Token::Semicolon {
            if is_await {
                return Err(self.error(&messages::FOR_AWAIT_REQUIRES_OF, &[]));
            }
            return self.parse_for_rest(ctx, start, None);
        }

        let declaration_kind = match self.token() {
            Token::VarKeyword => Some(VariableKind::Var),
            Token::ConstKeyword if !self.escaped() => Some(VariableKind::Const),
            Token::LetKeyword if self.at_let_declaration() => Some(VariableKind::Let),
            _ => None,
        };

        if let Some(kind) = declaration_kind {
            self.next_token()?;
            let declarations = self.parse_variable_declarations(head_ctx, kind, true)?;
            let declaration = self.alloc(VariableDeclaration {
                span: self.finish(init_start),
                declarations,
                kind,
            });
            let is_of = self.at_keyword(Token::OfKeyword);
            if is_of || self.token() == Token::InKeyword {
                let word = if is_of { "of" } else { "in" };
                if is_await && !is_of {
                    return Err(self.error(&messages::FOR_AWAIT_REQUIRES_OF, &[]));
                }
                if declarations.len() != 1 {
                    return Err(self.error_at(&messages::FOR_IN_OF_SINGLE_BINDING, &[word], init_start));
                }
                let declarator = &declarations[0];
                let legacy_initializer = !is_of
                    && kind == VariableKind::Var
                    && self.options.web_compat
                    && !ctx.is_strict()
                    && matches!(declarator.id, Pattern::Identifier(_));
                if declarator.init.is_some() && !legacy_initializer {
                    return Err(self.error_at(&messages::FOR_IN_OF_INITIALIZER, &[word], declarator.span.start));
                }
                return self.parse_for_in_of(ctx, start, ForTarget::Variable(declaration), is_of, is_await);
            }
            if is_await {
                return Err(self.error(&messages::FOR_AWAIT_REQUIRES_OF, &[]));
            }
            for declarator in declarations {
                self.check_declarator_initializer(declarator, kind)?;
            }
            return self.parse_for_rest(ctx, start, Some(ForInit::Variable(declaration)));
        }

        let starts_with_let = self.at_keyword(Token::LetKeyword);
        let expr = self.parse_assignment_cover(head_ctx)?;
        let is_of = self.at_keyword(Token::OfKeyword);
        if is_of || self.token() == Token::InKeyword {
            let word = if is_of { "of" } else { "in" };
            if is_await && !is_of {
                return Err(self.error(&messages::FOR_AWAIT_REQUIRES_OF, &[]));
            }
            if is_of && starts_with_let {
                return Err(self.error_at(&messages::FOR_OF_LET, &[], init_start));
            }
            if is_of && !is_await && is_bare_async(expr, init_start) && !self.is_parenthesized(&expr) {
                return Err(self.error_at(&messages::FOR_OF_ASYNC, &[], init_start));
            }
            let target = self.to_for_target(expr, ctx, word)?;
            return self.parse_for_in_of(ctx, start, ForTarget::Pattern(target), is_of, is_await);
        }

        if is_await {
            return Err(self.error(&messages::FOR_AWAIT_REQUIRES_OF, &[]));
        }
        self.validate_cover(expr)?;
        let init = self.parse_sequence_rest(head_ctx, init_start, expr)?;
        self.parse_for_rest(ctx, start, Some(ForInit::Expression(init)))
    }

    /// Reinterpret the head expression of a for-in/of as its target.
    fn to_for_target(&mut self, expr: Expression<'a>, ctx: Context, word: &str) -> ParseResult<Pattern<'a>> {
        if matches!(expr, Expression::Array(_) | Expression::Object(_)) && !self.is_parenthesized(&expr) {
            self.destructible = DestructuringFlags::NONE;
            return self.to_pattern(expr, PatternMode::Assignment, ctx);
        }
        self.validate_cover(expr)?;
        let invalid = || self.error_at(&messages::INVALID_FOR_IN_OF_TARGET, &[word], expr.start());
        if !self.assignable {
            return Err(invalid());
        }
        match expr.without_parens() {
            Expression::Identifier(id) => {
                if ctx.is_strict() && is_eval_or_arguments(id.name) {
                    return Err(self.error_at(&messages::STRICT_EVAL_ARGUMENTS, &[], id.span.start));
                }
                Ok(Pattern::Identifier(id))
            }
            Expression::Member(member) => Ok(Pattern::Member(member)),
            _ => Err(invalid()),
        }
    }

    fn parse_for_rest(&mut self, ctx: Context, start: u32, init: Option<ForInit<'a>>) -> ParseResult<Statement<'a>> {
        let inner = ctx.without(Context::DISALLOW_IN);
        self.expect(Token::Semicolon)?;
        let test = if self.token() == Token::Semicolon {
            None
        } else {
            Some(self.parse_expression(inner)?)
        };
        self.expect(Token::Semicolon)?;
        let update = if self.token() == Token::RightParen {
            None
        } else {
            Some(self.parse_expression(inner)?)
        };
        self.expect(Token::RightParen)?;
        let body = self.parse_statement(ctx.with(Context::IN_ITERATION), StatementPosition::Single)?;
        Ok(Statement::For(self.alloc(ForStatement {
            span: self.finish(start),
            init,
            test,
            update,
            body,
        })))
    }

    fn parse_for_in_of(
        &mut self,
        ctx: Context,
        start: u32,
        left: ForTarget<'a>,
        is_of: bool,
        is_await: bool,
    ) -> ParseResult<Statement<'a>> {
        trace!(offset = start, is_of, "for head resolved");
        self.next_token()?;
        let inner = ctx.without(Context::DISALLOW_IN);
        let right = if is_of {
            self.parse_assignment_expression(inner)?
        } else {
            self.parse_expression(inner)?
        };
        self.expect(Token::RightParen)?;
        let body = self.parse_statement(ctx.with(Context::IN_ITERATION), StatementPosition::Single)?;
        let span = self.finish(start);
        Ok(if is_of {
            Statement::ForOf(self.alloc(ForOfStatement {
                span,
                is_await,
                left,
                right,
                body,
            }))
        } else {
            Statement::ForIn(self.alloc(ForInStatement { span, left, right, body }))
        })
    }
}

/// `"use strict";` as a plain expression statement.
fn is_use_strict(statement: Statement<'_>) -> bool {
    match statement {
        Statement::Expression(stmt) => match stmt.expression {
            Expression::Literal(lit) => lit.as_str() == Some("use strict") && lit.span.end - lit.span.start == 12,
            _ => false,
        },
        _ => false,
    }
}

/// The head expression is the bare identifier `async` written at `start`.
fn is_bare_async(expr: Expression<'_>, start: u32) -> bool {
    matches!(expr, Expression::Identifier(id) if id.name == "async" && id.span.start == start && id.span.end == start + 5)
}
