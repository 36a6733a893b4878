//! Function declarations, expressions and methods.

use sable_ast::types::DestructuringFlags;
use sable_ast::*;
use sable_binder::{BindingKind, ScopeKind};
use sable_diagnostics::{messages, ParseResult};

use crate::context::Context;
use crate::parser::Parser;

/// What kind of function a parameter list and body belong to. Everything
/// but `Function` requires unique parameter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MethodShape {
    Function,
    Method,
    Getter,
    Setter,
    Constructor,
    DerivedConstructor,
}

impl<'a, 'o> Parser<'a, 'o> {
    /// `function` / `async function` declaration, starting at the first
    /// keyword. The name may only be omitted after `export default`.
    pub(crate) fn parse_function_declaration(
        &mut self,
        ctx: Context,
        is_async: bool,
        name_required: bool,
    ) -> ParseResult<&'a Function<'a>> {
        let start = self.start();
        if is_async {
            self.next_token()?;
        }
        self.expect(Token::FunctionKeyword)?;
        let generator = self.eat(Token::Multiply)?;

        let id = if self.token().is_identifier() {
            let name_start = self.start();
            let name = self.token_value();
            let kind = self.function_binding_kind(ctx);
            self.check_binding_identifier(name, name_start, ctx, kind)?;
            self.declare(name, kind, name_start, ctx)?;
            Some(self.identifier_node()?)
        } else if name_required {
            return Err(if self.token().is_reserved_word() && !self.escaped() {
                self.error(&messages::UNEXPECTED_RESERVED_WORD, &[self.scanner.token_raw()])
            } else {
                self.error(&messages::FUNCTION_NAME_REQUIRED, &[])
            });
        } else {
            None
        };

        let fn_ctx = ctx.enter_function(is_async, generator);
        let (params, body) = self.parse_params_and_body(fn_ctx, MethodShape::Function, id)?;
        Ok(self.alloc(Function {
            kind: FunctionType::FunctionDeclaration,
            span: self.finish(start),
            id,
            expression: false,
            generator,
            is_async,
            params,
            body,
        }))
    }

    /// Function declarations are var-scoped directly in function bodies and
    /// script top level, and block-scoped everywhere else.
    fn function_binding_kind(&self, ctx: Context) -> BindingKind {
        let scope = self.scopes.current_kind();
        if scope.intersects(ScopeKind::FUNCTION_BODY | ScopeKind::STATIC_BLOCK)
            || (scope.contains(ScopeKind::TOP_LEVEL) && !ctx.is_module())
        {
            BindingKind::FunctionVar
        } else {
            BindingKind::FunctionLexical
        }
    }

    pub(crate) fn parse_function_expression(
        &mut self,
        ctx: Context,
        start: u32,
        is_async: bool,
    ) -> ParseResult<Expression<'a>> {
        if is_async {
            self.next_token()?;
        }
        self.expect(Token::FunctionKeyword)?;
        let generator = self.eat(Token::Multiply)?;
        let fn_ctx = ctx.enter_function(is_async, generator);

        // The name of a function expression follows the function's own
        // `yield` and `await` rules.
        let id = if self.token().is_identifier() {
            let name_start = self.start();
            let name = self.token_value();
            self.check_binding_identifier(name, name_start, fn_ctx, BindingKind::Var)?;
            Some(self.identifier_node()?)
        } else {
            None
        };

        let (params, body) = self.parse_params_and_body(fn_ctx, MethodShape::Function, id)?;
        self.assignable = false;
        self.destructible = DestructuringFlags::NONE;
        Ok(Expression::Function(self.alloc(Function {
            kind: FunctionType::FunctionExpression,
            span: self.finish(start),
            id,
            expression: false,
            generator,
            is_async,
            params,
            body,
        })))
    }

    /// Parameters and body of an object or class method, starting at `(`.
    pub(crate) fn parse_method_function(
        &mut self,
        ctx: Context,
        is_async: bool,
        generator: bool,
        shape: MethodShape,
    ) -> ParseResult<&'a Function<'a>> {
        let start = self.start();
        let mut fn_ctx = ctx.enter_function(is_async, generator).with(Context::IN_METHOD);
        if shape == MethodShape::DerivedConstructor {
            fn_ctx = fn_ctx.with(Context::IN_DERIVED_CONSTRUCTOR);
        }
        let (params, body) = self.parse_params_and_body(fn_ctx, shape, None)?;
        Ok(self.alloc(Function {
            kind: FunctionType::FunctionExpression,
            span: self.finish(start),
            id: None,
            expression: false,
            generator,
            is_async,
            params,
            body,
        }))
    }

    /// `(params) { body }` for a non-arrow function whose own context is
    /// `ctx`. Duplicate parameters are reported only once the body shows
    /// whether they are allowed.
    fn parse_params_and_body(
        &mut self,
        ctx: Context,
        shape: MethodShape,
        name: Option<&'a Identifier<'a>>,
    ) -> ParseResult<(&'a [Pattern<'a>], &'a BlockStatement<'a>)> {
        let params_scope = self.scopes.push(ScopeKind::FUNCTION_PARAMS);
        let saved_labels = self.labels.take();
        let saved_chain = self.label_chain.take();
        let saved_yield = self.last_yield.take();
        let saved_await = self.last_await.take();
        let saved_await_identifier = self.last_await_identifier.take();

        let params_start = self.start();
        let params = self.parse_formal_parameters(ctx.with(Context::IN_PARAMETERS))?;
        self.check_parameter_count(shape, params, params_start)?;
        let simple = params.iter().all(Pattern::is_simple_parameter);

        let body_start = self.start();
        self.expect(Token::LeftBrace)?;
        self.scopes.push(ScopeKind::FUNCTION_BODY);
        let (statements, body_ctx) = self.parse_body_statements(ctx, simple, Token::RightBrace)?;
        self.expect(Token::RightBrace)?;
        self.scopes.pop();

        let strict = body_ctx.is_strict();
        let unique = strict || !simple || shape != MethodShape::Function || ctx.in_generator() || ctx.in_async();
        if let Some(err) = self.scopes.take_deferred(params_scope) {
            if unique {
                return Err(self.scope_error(err));
            }
        }
        if strict && !ctx.is_strict() {
            for param in params {
                self.check_pattern_names(*param, body_ctx, BindingKind::Parameter)?;
            }
            if let Some(id) = name {
                self.check_binding_identifier(id.name, id.span.start, body_ctx, BindingKind::Var)?;
            }
        }
        self.scopes.pop();

        self.labels.restore(saved_labels);
        self.label_chain = saved_chain;
        self.last_yield = saved_yield;
        self.last_await = saved_await;
        self.last_await_identifier = saved_await_identifier;

        let body = self.alloc(BlockStatement {
            span: self.finish(body_start),
            body: statements,
        });
        Ok((params, body))
    }

    fn parse_formal_parameters(&mut self, ctx: Context) -> ParseResult<&'a [Pattern<'a>]> {
        self.expect(Token::LeftParen)?;
        let mut params = self.vec();
        while self.token() != Token::RightParen {
            if self.token() == Token::Ellipsis {
                params.push(self.parse_binding_rest(ctx, BindingKind::Parameter, Token::RightParen)?);
                break;
            }
            params.push(self.parse_binding_element(ctx, BindingKind::Parameter)?);
            if self.token() != Token::RightParen {
                self.expect(Token::Comma)?;
            }
        }
        self.expect(Token::RightParen)?;
        Ok(params.into_bump_slice())
    }

    fn check_parameter_count(&self, shape: MethodShape, params: &[Pattern<'a>], start: u32) -> ParseResult<()> {
        match shape {
            MethodShape::Getter if !params.is_empty() => Err(self.error_at(&messages::GETTER_PARAMETERS, &[], start)),
            MethodShape::Setter => match params {
                [Pattern::Rest(rest)] => Err(self.error_at(&messages::SETTER_REST_PARAMETER, &[], rest.span.start)),
                [_] => Ok(()),
                _ => Err(self.error_at(&messages::SETTER_PARAMETERS, &[], start)),
            },
            _ => Ok(()),
        }
    }
}
