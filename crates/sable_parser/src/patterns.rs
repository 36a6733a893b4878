//! Binding and assignment patterns.
//!
//! Declarations, parameters and `catch` bind names directly from the token
//! stream. Assignment targets and arrow parameters arrive as already parsed
//! expressions and are converted here.

use rustc_hash::FxHashSet;
use sable_ast::*;
use sable_binder::BindingKind;
use sable_diagnostics::{messages, ParseResult};

use crate::context::Context;
use crate::parser::Parser;
use crate::utilities::{is_eval_or_arguments, static_key_name};

/// How a converted literal will be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatternMode {
    /// `[a.b] = c`: member expressions are valid targets.
    Assignment,
    /// Arrow parameters: only identifiers may be bound.
    Binding,
}

impl<'a, 'o> Parser<'a, 'o> {
    // ========================================================================
    // Conversion from expressions
    // ========================================================================

    /// Reinterpret `expr` as a pattern element, including `target = default`.
    pub(crate) fn to_pattern(&mut self, expr: Expression<'a>, mode: PatternMode, ctx: Context) -> ParseResult<Pattern<'a>> {
        if matches!(expr, Expression::Parenthesized(_)) || self.is_parenthesized(&expr) {
            let inner = expr.without_parens();
            return match (mode, inner) {
                (PatternMode::Assignment, Expression::Identifier(id)) => {
                    self.check_pattern_identifier(id, mode, ctx)?;
                    Ok(Pattern::Identifier(id))
                }
                (PatternMode::Assignment, Expression::Member(member)) => Ok(Pattern::Member(member)),
                _ => Err(self.error_at(&messages::INVALID_DESTRUCTURING_TARGET, &[], expr.start())),
            };
        }

        match expr {
            Expression::Identifier(id) => {
                self.check_pattern_identifier(id, mode, ctx)?;
                Ok(Pattern::Identifier(id))
            }
            Expression::Member(member) if mode == PatternMode::Assignment => Ok(Pattern::Member(member)),
            Expression::Array(array) => self.array_to_pattern(array, mode, ctx),
            Expression::Object(object) => self.object_to_pattern(object, mode, ctx),
            Expression::Assignment(assign) if assign.operator == AssignmentOperator::Assign => {
                self.check_converted_pattern(assign.left, mode, ctx)?;
                Ok(Pattern::Assignment(self.alloc(AssignmentPattern {
                    span: assign.span,
                    left: assign.left,
                    right: assign.right,
                })))
            }
            _ => Err(self.error_at(&messages::INVALID_DESTRUCTURING_TARGET, &[], expr.start())),
        }
    }

    #[inline]
    pub(crate) fn element_to_pattern(&mut self, expr: Expression<'a>, mode: PatternMode, ctx: Context) -> ParseResult<Pattern<'a>> {
        self.to_pattern(expr, mode, ctx)
    }

    pub(crate) fn rest_to_pattern(
        &mut self,
        spread: &'a SpreadElement<'a>,
        mode: PatternMode,
        ctx: Context,
    ) -> ParseResult<Pattern<'a>> {
        self.rest_argument_to_pattern(spread.span.start, spread.argument, mode, ctx)
    }

    /// `...argument` starting at `start`, which may not carry a default.
    pub(crate) fn rest_argument_to_pattern(
        &mut self,
        start: u32,
        argument: Expression<'a>,
        mode: PatternMode,
        ctx: Context,
    ) -> ParseResult<Pattern<'a>> {
        if matches!(argument, Expression::Assignment(_)) && !self.is_parenthesized(&argument) {
            return Err(self.error_at(&messages::REST_WITH_INITIALIZER, &[], argument.start()));
        }
        let target = self.to_pattern(argument, mode, ctx)?;
        Ok(Pattern::Rest(self.alloc(RestElement {
            span: self.span(start, argument.end()),
            argument: target,
        })))
    }

    fn array_to_pattern(
        &mut self,
        array: &'a ArrayExpression<'a>,
        mode: PatternMode,
        ctx: Context,
    ) -> ParseResult<Pattern<'a>> {
        let mut elements = self.vec();
        let count = array.elements.len();
        for (index, element) in array.elements.iter().enumerate() {
            let converted = match *element {
                None => None,
                Some(ExpressionOrSpread::Expression(expr)) => Some(self.to_pattern(expr, mode, ctx)?),
                Some(ExpressionOrSpread::Spread(spread)) => {
                    self.check_rest_position(spread, index + 1 == count)?;
                    Some(self.rest_to_pattern(spread, mode, ctx)?)
                }
            };
            elements.push(converted);
        }
        Ok(Pattern::Array(self.alloc(ArrayPattern {
            span: array.span,
            elements: elements.into_bump_slice(),
        })))
    }

    fn object_to_pattern(
        &mut self,
        object: &'a ObjectExpression<'a>,
        mode: PatternMode,
        ctx: Context,
    ) -> ParseResult<Pattern<'a>> {
        let mut properties = self.vec();
        let mut keys = FxHashSet::default();
        let count = object.properties.len();
        for (index, member) in object.properties.iter().enumerate() {
            match *member {
                ObjectMember::Property(property) => {
                    if property.method || property.kind != PropertyKind::Init {
                        return Err(self.error_at(&messages::INVALID_DESTRUCTURING_TARGET, &[], property.span.start));
                    }
                    if !property.computed {
                        self.check_pattern_key(&mut keys, &property.key)?;
                    }
                    let value = self.to_pattern(property.value, mode, ctx)?;
                    properties.push(ObjectPatternProperty::Property(self.alloc(AssignmentProperty {
                        span: property.span,
                        key: property.key,
                        value,
                        kind: PropertyKind::Init,
                        method: false,
                        shorthand: property.shorthand,
                        computed: property.computed,
                    })));
                }
                ObjectMember::Spread(spread) => {
                    self.check_rest_position(spread, index + 1 == count)?;
                    let target = self.to_pattern(spread.argument, mode, ctx)?;
                    if !matches!(target, Pattern::Identifier(_) | Pattern::Member(_)) {
                        return Err(self.error_at(&messages::INVALID_DESTRUCTURING_TARGET, &[], spread.argument.start()));
                    }
                    properties.push(ObjectPatternProperty::Rest(self.alloc(RestElement {
                        span: spread.span,
                        argument: target,
                    })));
                }
            }
        }
        Ok(Pattern::Object(self.alloc(ObjectPattern {
            span: object.span,
            properties: properties.into_bump_slice(),
        })))
    }

    fn check_rest_position(&self, spread: &SpreadElement<'a>, last: bool) -> ParseResult<()> {
        if self.spread_with_comma.contains(&spread.span.start) {
            return Err(self.error_at(&messages::REST_TRAILING_COMMA, &[], spread.span.end));
        }
        if !last {
            return Err(self.error_at(&messages::REST_MUST_BE_LAST, &[], spread.span.start));
        }
        Ok(())
    }

    fn check_pattern_key(&self, keys: &mut FxHashSet<&'a str>, key: &Expression<'a>) -> ParseResult<()> {
        if !self.options.unique_keys_in_patterns {
            return Ok(());
        }
        if let Some(name) = static_key_name(key) {
            if !keys.insert(name) {
                return Err(self.error_at(&messages::DUPLICATE_PATTERN_KEY, &[name], key.start()));
            }
        }
        Ok(())
    }

    fn check_pattern_identifier(&self, id: &Identifier<'a>, mode: PatternMode, ctx: Context) -> ParseResult<()> {
        match mode {
            PatternMode::Binding => self.check_binding_identifier(id.name, id.span.start, ctx, BindingKind::Parameter),
            PatternMode::Assignment => {
                if ctx.is_strict() && is_eval_or_arguments(id.name) {
                    return Err(self.error_at(&messages::STRICT_EVAL_ARGUMENTS, &[], id.span.start));
                }
                Ok(())
            }
        }
    }

    /// Validate a pattern built earlier in assignment mode for use in `mode`.
    fn check_converted_pattern(&self, pattern: Pattern<'a>, mode: PatternMode, ctx: Context) -> ParseResult<()> {
        match pattern {
            Pattern::Identifier(id) => self.check_pattern_identifier(id, mode, ctx),
            Pattern::Member(member) => match mode {
                PatternMode::Assignment => Ok(()),
                PatternMode::Binding => Err(self.error_at(&messages::INVALID_DESTRUCTURING_TARGET, &[], member.span.start)),
            },
            Pattern::Array(array) => array
                .elements
                .iter()
                .flatten()
                .try_for_each(|element| self.check_converted_pattern(*element, mode, ctx)),
            Pattern::Object(object) => object.properties.iter().try_for_each(|property| match *property {
                ObjectPatternProperty::Property(property) => self.check_converted_pattern(property.value, mode, ctx),
                ObjectPatternProperty::Rest(rest) => self.check_converted_pattern(rest.argument, mode, ctx),
            }),
            Pattern::Rest(rest) => self.check_converted_pattern(rest.argument, mode, ctx),
            Pattern::Assignment(assign) => self.check_converted_pattern(assign.left, mode, ctx),
        }
    }

    // ========================================================================
    // Bound names
    // ========================================================================

    /// Declare every name bound by `pattern`.
    pub(crate) fn declare_pattern(&mut self, pattern: Pattern<'a>, kind: BindingKind, ctx: Context) -> ParseResult<()> {
        visit_bound_names(pattern, &mut |id| self.declare(id.name, kind, id.span.start, ctx))
    }

    /// Check every name bound by `pattern` against `ctx`, for parameters
    /// that a later `"use strict"` makes strict.
    pub(crate) fn check_pattern_names(&self, pattern: Pattern<'a>, ctx: Context, kind: BindingKind) -> ParseResult<()> {
        visit_bound_names(pattern, &mut |id| self.check_binding_identifier(id.name, id.span.start, ctx, kind))
    }

    // ========================================================================
    // Binding patterns from tokens
    // ========================================================================

    /// An identifier, array pattern or object pattern, declaring its names.
    pub(crate) fn parse_binding_target(&mut self, ctx: Context, kind: BindingKind) -> ParseResult<Pattern<'a>> {
        self.enter_nesting()?;
        let target = match self.token() {
            Token::LeftBracket => self.parse_array_binding(ctx, kind)?,
            Token::LeftBrace => self.parse_object_binding(ctx, kind)?,
            _ => Pattern::Identifier(self.parse_binding_identifier(ctx, kind)?),
        };
        self.leave_nesting();
        Ok(target)
    }

    pub(crate) fn parse_binding_identifier(&mut self, ctx: Context, kind: BindingKind) -> ParseResult<&'a Identifier<'a>> {
        let token = self.token();
        if !token.is_identifier() {
            if token.is_reserved_word() && !self.escaped() {
                return Err(self.error(&messages::UNEXPECTED_RESERVED_WORD, &[self.scanner.token_raw()]));
            }
            return Err(self.unexpected());
        }
        let start = self.start();
        let name = self.token_value();
        self.check_binding_identifier(name, start, ctx, kind)?;
        self.declare(name, kind, start, ctx)?;
        self.identifier_node()
    }

    /// A binding target with an optional `= default`.
    pub(crate) fn parse_binding_element(&mut self, ctx: Context, kind: BindingKind) -> ParseResult<Pattern<'a>> {
        let start = self.start();
        let target = self.parse_binding_target(ctx, kind)?;
        if self.token() != Token::Assign {
            return Ok(target);
        }
        self.next_token()?;
        let right = self.parse_assignment_expression(ctx.without(Context::DISALLOW_IN))?;
        Ok(Pattern::Assignment(self.alloc(AssignmentPattern {
            span: self.finish(start),
            left: target,
            right,
        })))
    }

    /// `...target` at the end of a list; the caller has seen the `...`.
    pub(crate) fn parse_binding_rest(&mut self, ctx: Context, kind: BindingKind, close: Token) -> ParseResult<Pattern<'a>> {
        let start = self.start();
        self.next_token()?;
        let argument = if close == Token::RightBrace {
            Pattern::Identifier(self.parse_binding_identifier(ctx, kind)?)
        } else {
            self.parse_binding_target(ctx, kind)?
        };
        if self.token() == Token::Assign {
            return Err(self.error(&messages::REST_WITH_INITIALIZER, &[]));
        }
        if self.token() == Token::Comma {
            let comma = self.start();
            self.next_token()?;
            return Err(if self.token() == close {
                self.error_at(&messages::REST_TRAILING_COMMA, &[], comma)
            } else {
                self.error_at(&messages::REST_MUST_BE_LAST, &[], start)
            });
        }
        Ok(Pattern::Rest(self.alloc(RestElement {
            span: self.finish(start),
            argument,
        })))
    }

    fn parse_array_binding(&mut self, ctx: Context, kind: BindingKind) -> ParseResult<Pattern<'a>> {
        let start = self.start();
        self.next_token()?;
        let mut elements = self.vec();
        while self.token() != Token::RightBracket {
            match self.token() {
                Token::Comma => {
                    self.next_token()?;
                    elements.push(None);
                    continue;
                }
                Token::Ellipsis => {
                    elements.push(Some(self.parse_binding_rest(ctx, kind, Token::RightBracket)?));
                    break;
                }
                _ => elements.push(Some(self.parse_binding_element(ctx, kind)?)),
            }
            if self.token() != Token::RightBracket {
                self.expect(Token::Comma)?;
            }
        }
        self.expect(Token::RightBracket)?;
        Ok(Pattern::Array(self.alloc(ArrayPattern {
            span: self.finish(start),
            elements: elements.into_bump_slice(),
        })))
    }

    fn parse_object_binding(&mut self, ctx: Context, kind: BindingKind) -> ParseResult<Pattern<'a>> {
        let start = self.start();
        self.next_token()?;
        let mut properties = self.vec();
        let mut keys = FxHashSet::default();

        while self.token() != Token::RightBrace {
            if self.token() == Token::Ellipsis {
                if let Pattern::Rest(rest) = self.parse_binding_rest(ctx, kind, Token::RightBrace)? {
                    properties.push(ObjectPatternProperty::Rest(rest));
                }
                break;
            }

            let property_start = self.start();
            let key_token = self.token();
            let key_escaped = self.escaped();
            let (key, computed) = self.parse_property_key(ctx, false)?;
            if !computed {
                self.check_pattern_key(&mut keys, &key)?;
            }

            let (value, shorthand) = if self.eat(Token::Colon)? {
                (self.parse_binding_element(ctx, kind)?, false)
            } else {
                let id = match key {
                    Expression::Identifier(id) if key_token.is_identifier() => id,
                    Expression::Identifier(id) if key_token.is_reserved_word() && !key_escaped => {
                        return Err(self.error_at(&messages::UNEXPECTED_RESERVED_WORD, &[id.name], property_start));
                    }
                    _ => return Err(self.unexpected()),
                };
                self.check_binding_identifier(id.name, property_start, ctx, kind)?;
                self.declare(id.name, kind, property_start, ctx)?;
                let value = if self.eat(Token::Assign)? {
                    let right = self.parse_assignment_expression(ctx.without(Context::DISALLOW_IN))?;
                    Pattern::Assignment(self.alloc(AssignmentPattern {
                        span: self.finish(property_start),
                        left: Pattern::Identifier(id),
                        right,
                    }))
                } else {
                    Pattern::Identifier(id)
                };
                (value, true)
            };

            properties.push(ObjectPatternProperty::Property(self.alloc(AssignmentProperty {
                span: self.finish(property_start),
                key,
                value,
                kind: PropertyKind::Init,
                method: false,
                shorthand,
                computed,
            })));
            if self.token() != Token::RightBrace {
                self.expect(Token::Comma)?;
            }
        }
        self.expect(Token::RightBrace)?;
        Ok(Pattern::Object(self.alloc(ObjectPattern {
            span: self.finish(start),
            properties: properties.into_bump_slice(),
        })))
    }
}

/// Call `f` for each identifier bound by `pattern`, in source order.
pub(crate) fn visit_bound_names<'a, F>(pattern: Pattern<'a>, f: &mut F) -> ParseResult<()>
where
    F: FnMut(&'a Identifier<'a>) -> ParseResult<()>,
{
    match pattern {
        Pattern::Identifier(id) => f(id),
        Pattern::Member(_) => Ok(()),
        Pattern::Array(array) => {
            for element in array.elements.iter().flatten() {
                visit_bound_names(*element, f)?;
            }
            Ok(())
        }
        Pattern::Object(object) => {
            for property in object.properties {
                match *property {
                    ObjectPatternProperty::Property(property) => visit_bound_names(property.value, f)?,
                    ObjectPatternProperty::Rest(rest) => visit_bound_names(rest.argument, f)?,
                }
            }
            Ok(())
        }
        Pattern::Rest(rest) => visit_bound_names(rest.argument, f),
        Pattern::Assignment(assign) => visit_bound_names(assign.left, f),
    }
}
