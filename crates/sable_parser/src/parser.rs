//! Parser state, token management and the entry points.
//!
//! The grammar itself is spread over sibling modules, each adding an
//! `impl Parser` block: expressions, patterns, statements, functions,
//! classes, modules and markup.

use bumpalo::collections::Vec as ArenaVec;
use rustc_hash::FxHashSet;
use sable_ast::types::{DestructuringFlags, TokenFlags};
use sable_ast::*;
use sable_binder::{BindingKind, LabelSet, ModuleRecord, PrivateNameTable, ScopeError, ScopeStack};
use sable_core::{Allocator, StringInterner};
use sable_diagnostics::{messages, DiagnosticMessage, ParseError, ParseResult};
use sable_options::ParseOptions;
use sable_scanner::{Scanner, TokenRecord};
use tracing::{debug, trace};

use crate::context::Context;
use crate::observer::ParseObserver;
use crate::utilities::is_eval_or_arguments;

/// Statements and expressions nested deeper than this fail to parse instead
/// of exhausting the stack.
pub const MAX_NESTING_DEPTH: u32 = 256;

/// Parse `source` into a [`Program`] allocated in `arena`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len(), module = options.module))]
pub fn parse<'a>(arena: &'a Allocator, source: &'a str, options: ParseOptions) -> ParseResult<Program<'a>> {
    Parser::new(arena, source, options, None).parse_program()
}

/// Like [`parse`], reporting comments, tokens and inserted semicolons to
/// `observer` as they are consumed.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len(), module = options.module))]
pub fn parse_with_observer<'a>(
    arena: &'a Allocator,
    source: &'a str,
    options: ParseOptions,
    observer: &mut dyn ParseObserver<'a>,
) -> ParseResult<Program<'a>> {
    Parser::new(arena, source, options, Some(observer)).parse_program()
}

/// Where a statement appears, which decides the declarations it may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatementPosition {
    /// Directly in a statement list.
    ListItem,
    /// The body of a loop, `with` or `else`-less single statement.
    Single,
    /// The consequent or alternate of an `if`.
    IfBody,
    /// The body of a label that is itself in a statement list.
    Labelled,
}

pub struct Parser<'a, 'o> {
    pub(crate) arena: &'a Allocator,
    pub(crate) scanner: Scanner<'a>,
    pub(crate) options: ParseOptions,
    observer: Option<&'o mut dyn ParseObserver<'a>>,
    pub(crate) scopes: ScopeStack,
    pub(crate) private_names: PrivateNameTable,
    pub(crate) labels: LabelSet,
    /// Index of the first label in a chain like `a: b: while (x) {}`.
    pub(crate) label_chain: Option<usize>,
    pub(crate) module_record: ModuleRecord,
    /// The expression just parsed is a simple assignment target.
    pub(crate) assignable: bool,
    /// Cover state of the array or object literal just parsed.
    pub(crate) destructible: DestructuringFlags,
    /// Start offsets of expressions that were wrapped in parentheses.
    pub(crate) parenthesized: FxHashSet<u32>,
    /// Start offsets of spread elements followed by a comma.
    pub(crate) spread_with_comma: FxHashSet<u32>,
    /// Offset of the most recent `yield` expression in the current function.
    pub(crate) last_yield: Option<u32>,
    /// Offset of the most recent `await` expression in the current function.
    pub(crate) last_await: Option<u32>,
    /// Offset of the most recent `await` used as an identifier.
    pub(crate) last_await_identifier: Option<u32>,
    /// Start of the innermost assignment expression being parsed; an arrow
    /// function may only begin here.
    pub(crate) assignment_start: u32,
    /// End of the most recently consumed token.
    pub(crate) prev_end: u32,
    depth: u32,
}

impl<'a, 'o> Parser<'a, 'o> {
    pub fn new(
        arena: &'a Allocator,
        source: &'a str,
        options: ParseOptions,
        observer: Option<&'o mut dyn ParseObserver<'a>>,
    ) -> Self {
        let mut scanner = Scanner::new(source);
        scanner.set_html_comments(options.web_compat && !options.module);
        scanner.set_collect_comments(observer.is_some());
        Self {
            arena,
            scanner,
            options,
            observer,
            scopes: ScopeStack::new(StringInterner::new()),
            private_names: PrivateNameTable::new(),
            labels: LabelSet::new(),
            label_chain: None,
            module_record: ModuleRecord::new(),
            assignable: false,
            destructible: DestructuringFlags::NONE,
            parenthesized: FxHashSet::default(),
            spread_with_comma: FxHashSet::default(),
            last_yield: None,
            last_await: None,
            last_await_identifier: None,
            assignment_start: u32::MAX,
            prev_end: 0,
            depth: 0,
        }
    }

    pub fn parse_program(mut self) -> ParseResult<Program<'a>> {
        let result = self.parse_program_inner();
        if let Err(err) = &result {
            debug!(code = err.code, offset = err.offset, "parse failed: {}", err.message);
        }
        result
    }

    fn parse_program_inner(&mut self) -> ParseResult<Program<'a>> {
        self.next_token()?;

        let mut ctx = Context::NONE;
        if self.options.module {
            ctx = ctx.with(Context::STRICT | Context::MODULE | Context::TOP_LEVEL | Context::IN_ASYNC);
        }
        if self.options.implied_strict {
            ctx = ctx.with(Context::STRICT);
        }
        if self.options.global_return {
            ctx = ctx.with(Context::IN_FUNCTION);
        }

        let (body, _) = self.parse_body_statements(ctx, true, Token::EndOfSource)?;
        if self.options.module {
            self.module_record.finish(&self.scopes).map_err(|err| self.scope_error(err))?;
        }

        let end = self.scanner.source().len() as u32;
        let source_type = if self.options.module { SourceType::Module } else { SourceType::Script };
        Ok(Program {
            span: self.span(0, end),
            source_type,
            body,
        })
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn token(&self) -> Token {
        self.scanner.token()
    }

    #[inline]
    pub(crate) fn start(&self) -> u32 {
        self.scanner.token_start()
    }

    #[inline]
    pub(crate) fn escaped(&self) -> bool {
        self.scanner.token_flags().contains(TokenFlags::ESCAPED)
    }

    #[inline]
    pub(crate) fn line_break_before(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    /// The current token is `token`, spelled without escapes.
    #[inline]
    pub(crate) fn at_keyword(&self, token: Token) -> bool {
        self.token() == token && !self.escaped()
    }

    /// Report the current token as consumed and let `scan` produce the next.
    fn advance(&mut self, scan: impl FnOnce(&mut Scanner<'a>) -> ParseResult<Token>) -> ParseResult<Token> {
        let current = self.scanner.token();
        if current != Token::EndOfSource {
            if let Some(observer) = self.observer.as_deref_mut() {
                observer.on_token(&TokenRecord {
                    kind: current,
                    value: self.scanner.token_raw(),
                    start: self.scanner.token_start(),
                    end: self.scanner.token_end(),
                });
            }
        }
        self.prev_end = self.scanner.token_end();
        let token = scan(&mut self.scanner)?;
        if let Some(observer) = self.observer.as_deref_mut() {
            for comment in self.scanner.take_comments() {
                observer.on_comment(&comment);
            }
        }
        Ok(token)
    }

    pub(crate) fn next_token(&mut self) -> ParseResult<Token> {
        self.advance(|scanner| {
            scanner.scan()?;
            Ok(scanner.rescan_greater_than())
        })
    }

    /// Advance without merging `>` with what follows, for markup tags.
    pub(crate) fn next_markup_token(&mut self) -> ParseResult<Token> {
        self.advance(|scanner| scanner.scan())
    }

    pub(crate) fn next_markup_child(&mut self) -> ParseResult<Token> {
        self.advance(|scanner| scanner.scan_jsx_child())
    }

    pub(crate) fn next_markup_attribute_value(&mut self) -> ParseResult<Token> {
        self.advance(|scanner| scanner.scan_jsx_attribute_value())
    }

    /// Kind and flags of the token after the current one.
    pub(crate) fn peek(&mut self) -> (Token, TokenFlags) {
        self.scanner.peek()
    }

    /// Kind of the token two ahead of the current one.
    pub(crate) fn peek_second(&mut self) -> Token {
        self.scanner.look_ahead(|s| match s.scan().and_then(|_| s.scan()) {
            Ok(token) => token,
            Err(_) => Token::EndOfSource,
        })
    }

    pub(crate) fn eat(&mut self, token: Token) -> ParseResult<bool> {
        if self.token() == token {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect(&mut self, token: Token) -> ParseResult<()> {
        if self.token() == token {
            self.next_token()?;
            return Ok(());
        }
        Err(match self.token() {
            Token::EndOfSource => self.error(&messages::UNEXPECTED_EOF, &[]),
            _ => self.error(&messages::EXPECTED_TOKEN, &[token.text()]),
        })
    }

    /// End a statement, inserting a semicolon where the grammar allows one.
    pub(crate) fn consume_semicolon(&mut self) -> ParseResult<()> {
        match self.token() {
            Token::Semicolon => {
                self.next_token()?;
                Ok(())
            }
            Token::RightBrace | Token::EndOfSource => {
                self.insert_semicolon();
                Ok(())
            }
            _ if self.line_break_before() => {
                self.insert_semicolon();
                Ok(())
            }
            _ => Err(self.unexpected()),
        }
    }

    pub(crate) fn insert_semicolon(&mut self) {
        let offset = self.prev_end;
        trace!(offset, "inserted semicolon");
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_insert_semicolon(offset);
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    pub(crate) fn error(&self, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        self.scanner.error_at(message, args, self.start())
    }

    pub(crate) fn error_at(&self, message: &DiagnosticMessage, args: &[&str], offset: u32) -> ParseError {
        self.scanner.error_at(message, args, offset)
    }

    /// The current token cannot appear here.
    pub(crate) fn unexpected(&self) -> ParseError {
        let token = self.token();
        if token == Token::EndOfSource {
            self.error(&messages::UNEXPECTED_EOF, &[])
        } else if token.is_word() && self.escaped() {
            self.error(&messages::ESCAPED_KEYWORD, &[])
        } else {
            self.error(&messages::UNEXPECTED_TOKEN, &[self.scanner.token_raw()])
        }
    }

    pub(crate) fn scope_error(&self, err: ScopeError) -> ParseError {
        self.scanner.error_at(&err.message, &[&err.name], err.offset)
    }

    /// Count one level of statement or expression nesting.
    pub(crate) fn enter_nesting(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(self.error(&messages::MAX_NESTING_DEPTH, &[]));
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn leave_nesting(&mut self) {
        self.depth -= 1;
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    pub(crate) fn span(&self, start: u32, end: u32) -> NodeSpan {
        let loc = self.options.loc.then(|| {
            let map = self.scanner.line_map();
            let from = map.position_of(start);
            let to = map.position_of(end);
            SourceLocation {
                start: LineColumn { line: from.line, column: from.column },
                end: LineColumn { line: to.line, column: to.column },
            }
        });
        NodeSpan {
            start,
            end,
            loc,
            ranged: self.options.ranges,
        }
    }

    /// Span from `start` to the end of the last consumed token.
    #[inline]
    pub(crate) fn finish(&self, start: u32) -> NodeSpan {
        self.span(start, self.prev_end)
    }

    #[inline]
    pub(crate) fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    #[inline]
    pub(crate) fn vec<T>(&self) -> ArenaVec<'a, T> {
        ArenaVec::new_in(self.arena.bump())
    }

    /// Decoded value of the current token, borrowed from the source when
    /// possible.
    pub(crate) fn token_value(&self) -> &'a str {
        match self.scanner.token_value_slice() {
            Some(value) => value,
            None => self.arena.alloc_str(self.scanner.token_value()),
        }
    }

    /// Raw text of literals, kept only when requested.
    pub(crate) fn literal_raw(&self) -> Option<&'a str> {
        self.options.raw.then(|| self.scanner.token_raw())
    }

    /// Build an identifier from the current token and advance.
    pub(crate) fn identifier_node(&mut self) -> ParseResult<&'a Identifier<'a>> {
        let start = self.start();
        let name = self.token_value();
        self.next_token()?;
        Ok(self.alloc(Identifier {
            span: self.finish(start),
            name,
        }))
    }

    // ========================================================================
    // Names and bindings
    // ========================================================================

    /// Validate `name` used as an identifier reference or label.
    pub(crate) fn check_identifier_reference(&self, name: &str, offset: u32, ctx: Context) -> ParseResult<()> {
        match Token::from_keyword(name) {
            Some(token) if token.is_reserved_word() => {
                Err(self.error_at(&messages::UNEXPECTED_RESERVED_WORD, &[name], offset))
            }
            Some(Token::YieldKeyword) if ctx.in_generator() => {
                Err(self.error_at(&messages::YIELD_AS_IDENTIFIER, &[], offset))
            }
            Some(Token::AwaitKeyword) if ctx.contains(Context::IN_STATIC_BLOCK) => {
                Err(self.error_at(&messages::AWAIT_IN_STATIC_BLOCK, &[], offset))
            }
            Some(Token::AwaitKeyword) if ctx.await_is_reserved() => {
                Err(self.error_at(&messages::AWAIT_AS_IDENTIFIER, &[], offset))
            }
            Some(token) if token.is_strict_reserved_word() && ctx.is_strict() => {
                Err(self.error_at(&messages::UNEXPECTED_STRICT_RESERVED_WORD, &[name], offset))
            }
            _ if name == "arguments" && ctx.contains(Context::IN_CLASS_FIELD) => {
                Err(self.error_at(&messages::ARGUMENTS_IN_INITIALIZER, &[], offset))
            }
            _ => Ok(()),
        }
    }

    /// Validate `name` as a binding identifier of the given kind.
    pub(crate) fn check_binding_identifier(
        &self,
        name: &str,
        offset: u32,
        ctx: Context,
        kind: BindingKind,
    ) -> ParseResult<()> {
        self.check_identifier_reference(name, offset, ctx)?;
        if ctx.is_strict() && is_eval_or_arguments(name) {
            return Err(self.error_at(&messages::STRICT_EVAL_ARGUMENTS, &[], offset));
        }
        if kind.is_lexical() && name == "let" {
            return Err(self.error_at(&messages::LET_IN_LEXICAL_BINDING, &[], offset));
        }
        Ok(())
    }

    pub(crate) fn declare(&mut self, name: &str, kind: BindingKind, offset: u32, ctx: Context) -> ParseResult<()> {
        let annex_b = self.options.web_compat && !ctx.is_strict();
        self.scopes
            .declare(name, kind, offset, annex_b)
            .map_err(|err| self.scope_error(err))
    }

    // ========================================================================
    // Bodies and directives
    // ========================================================================

    /// Parse statements up to `end`, starting with a directive prologue.
    ///
    /// Returns the statements and the context after the prologue, which is
    /// strict when a `"use strict"` directive was found. `simple_params` is
    /// false for functions whose parameter list forbids the directive.
    pub(crate) fn parse_body_statements(
        &mut self,
        ctx: Context,
        simple_params: bool,
        end: Token,
    ) -> ParseResult<(&'a [Statement<'a>], Context)> {
        let mut ctx = ctx;
        let mut body = self.vec();
        let mut octal_escape_at: Option<u32> = None;

        while self.token() == Token::StringLiteral {
            let start = self.start();
            let token_end = self.scanner.token_end();
            let flags = self.scanner.token_flags();
            let statement = self.parse_statement_list_item(ctx)?;
            let expression_statement = match statement {
                Statement::Expression(stmt) => match stmt.expression {
                    Expression::Literal(lit) if lit.span.start == start && lit.span.end == token_end => stmt,
                    _ => {
                        body.push(statement);
                        break;
                    }
                },
                _ => {
                    body.push(statement);
                    break;
                }
            };

            let source = self.scanner.source();
            let directive = &source[start as usize + 1..token_end as usize - 1];
            if flags.contains(TokenFlags::OCTAL_ESCAPE) && octal_escape_at.is_none() {
                octal_escape_at = Some(start);
            }
            if directive == "use strict" {
                if !simple_params {
                    return Err(self.error_at(&messages::ILLEGAL_USE_STRICT, &[], start));
                }
                if !ctx.is_strict() {
                    debug!(offset = start, "directive switches to strict mode");
                    ctx = ctx.with(Context::STRICT);
                }
                if let Some(offset) = octal_escape_at {
                    return Err(self.error_at(&messages::STRICT_OCTAL_ESCAPE, &[], offset));
                }
            }
            body.push(Statement::Expression(self.alloc(ExpressionStatement {
                span: expression_statement.span,
                expression: expression_statement.expression,
                directive: Some(directive),
            })));
        }

        while self.token() != end {
            if self.token() == Token::EndOfSource {
                return Err(self.unexpected());
            }
            body.push(self.parse_statement_list_item(ctx)?);
        }
        Ok((body.into_bump_slice(), ctx))
    }
}
