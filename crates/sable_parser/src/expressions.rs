//! Expression grammar.
//!
//! Array and object literals, parenthesized groups and `async(...)` calls
//! are parsed as expressions first and reinterpreted as patterns once an `=`
//! or `=>` shows what they were. Two registers describe the expression just
//! finished: `assignable` says it is a simple assignment target, and
//! `destructible` carries the cover state of array and object literals.

use std::borrow::Cow;

use sable_ast::types::DestructuringFlags;
use sable_ast::*;
use sable_binder::{BindingKind, ScopeKind};
use sable_diagnostics::{messages, ParseResult};

use crate::context::Context;
use crate::functions::MethodShape;
use crate::parser::Parser;
use crate::patterns::PatternMode;
use crate::precedence::binary_precedence;
use crate::utilities::{can_start_expression, is_eval_or_arguments, starts_property_key, static_key_name};

impl<'a, 'o> Parser<'a, 'o> {
    // ========================================================================
    // Comma and assignment
    // ========================================================================

    pub(crate) fn parse_expression(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let start = self.start();
        let first = self.parse_assignment_expression(ctx)?;
        self.parse_sequence_rest(ctx, start, first)
    }

    /// Continue `first` into a sequence expression when a comma follows.
    pub(crate) fn parse_sequence_rest(
        &mut self,
        ctx: Context,
        start: u32,
        first: Expression<'a>,
    ) -> ParseResult<Expression<'a>> {
        if self.token() != Token::Comma {
            return Ok(first);
        }
        let mut expressions = self.vec();
        expressions.push(first);
        while self.eat(Token::Comma)? {
            expressions.push(self.parse_assignment_expression(ctx)?);
        }
        self.assignable = false;
        Ok(Expression::Sequence(self.alloc(SequenceExpression {
            span: self.finish(start),
            expressions: expressions.into_bump_slice(),
        })))
    }

    pub(crate) fn parse_assignment_expression(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let expr = self.parse_assignment_cover(ctx)?;
        self.validate_cover(expr)?;
        Ok(expr)
    }

    /// Parse an assignment expression, leaving the cover state of array and
    /// object literals in `destructible` for the caller.
    pub(crate) fn parse_assignment_cover(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        self.enter_nesting()?;
        if self.at_keyword(Token::YieldKeyword) && ctx.in_generator() {
            let expr = self.parse_yield(ctx)?;
            self.leave_nesting();
            return Ok(expr);
        }
        let start = self.start();
        self.assignment_start = start;
        let left = self.parse_conditional(ctx)?;
        let token = self.token();
        if self.is_bare_arrow(&left) || !token.is_assignment_operator() {
            self.leave_nesting();
            return Ok(left);
        }

        let operator = AssignmentOperator::from_token(token).ok_or_else(|| self.unexpected())?;
        let target = if token == Token::Assign {
            self.to_assignment_target(left, ctx)?
        } else {
            self.validate_cover(left)?;
            self.to_simple_target(left, ctx)?
        };
        self.next_token()?;
        let right = self.parse_assignment_expression(ctx)?;
        self.leave_nesting();

        self.assignable = false;
        self.destructible = DestructuringFlags::NONE;
        Ok(Expression::Assignment(self.alloc(AssignmentExpression {
            span: self.finish(start),
            operator,
            left: target,
            right,
        })))
    }

    /// Left side of `=`: a literal becomes a destructuring pattern, anything
    /// else must be a simple target.
    fn to_assignment_target(&mut self, left: Expression<'a>, ctx: Context) -> ParseResult<Pattern<'a>> {
        match left {
            Expression::Array(_) | Expression::Object(_) if !self.is_parenthesized(&left) => {
                self.destructible = DestructuringFlags::NONE;
                self.to_pattern(left, PatternMode::Assignment, ctx)
            }
            _ => {
                self.validate_cover(left)?;
                self.to_simple_target(left, ctx)
            }
        }
    }

    fn to_simple_target(&mut self, left: Expression<'a>, ctx: Context) -> ParseResult<Pattern<'a>> {
        let invalid = || self.error_at(&messages::INVALID_ASSIGNMENT_TARGET, &[], left.start());
        if !self.assignable {
            return Err(invalid());
        }
        match left.without_parens() {
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

    /// Reject a finished expression whose cover state only makes sense as a
    /// pattern, and clear the register.
    pub(crate) fn validate_cover(&mut self, expr: Expression<'a>) -> ParseResult<()> {
        let flags = std::mem::take(&mut self.destructible);
        self.check_cover_flags(flags, std::slice::from_ref(&expr))
    }

    fn check_cover_flags(&self, flags: DestructuringFlags, exprs: &[Expression<'a>]) -> ParseResult<()> {
        let fallback = exprs.first().map_or(self.start(), |expr| expr.start());
        if flags.contains(DestructuringFlags::MUST_DESTRUCT) {
            let offset = exprs.iter().find_map(|expr| find_shorthand_initializer(*expr));
            return Err(self.error_at(
                &messages::INVALID_SHORTHAND_INITIALIZER,
                &[],
                offset.unwrap_or(fallback),
            ));
        }
        if flags.contains(DestructuringFlags::SEEN_PROTO) {
            let offset = exprs.iter().find_map(|expr| find_duplicate_proto(*expr));
            return Err(self.error_at(&messages::DUPLICATE_PROTO, &[], offset.unwrap_or(fallback)));
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn is_parenthesized(&self, expr: &Expression<'a>) -> bool {
        self.parenthesized.contains(&expr.start())
    }

    /// An arrow function that was not wrapped in parentheses ends the
    /// enclosing expression: nothing may be applied to it.
    #[inline]
    pub(crate) fn is_bare_arrow(&self, expr: &Expression<'a>) -> bool {
        matches!(expr, Expression::ArrowFunction(arrow) if !self.parenthesized.contains(&arrow.span.start))
    }

    // ========================================================================
    // Conditional and binary
    // ========================================================================

    fn parse_conditional(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let start = self.start();
        let test = self.parse_binary_expression(ctx)?;
        if self.token() != Token::Question || self.is_bare_arrow(&test) {
            return Ok(test);
        }
        self.validate_cover(test)?;
        self.next_token()?;
        let consequent = self.parse_assignment_expression(ctx.without(Context::DISALLOW_IN))?;
        self.expect(Token::Colon)?;
        let alternate = self.parse_assignment_expression(ctx)?;
        self.assignable = false;
        Ok(Expression::Conditional(self.alloc(ConditionalExpression {
            span: self.finish(start),
            test,
            consequent,
            alternate,
        })))
    }

    fn parse_binary_expression(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let start = self.start();
        let left = self.parse_unary(ctx)?;
        if self.is_bare_arrow(&left) {
            return Ok(left);
        }
        let (expr, _) = self.parse_binary_from(ctx, start, left, 1)?;
        if let Expression::PrivateIdentifier(private) = expr {
            return Err(self.error_at(&messages::UNEXPECTED_PRIVATE_NAME, &[], private.span.start));
        }
        Ok(expr)
    }

    /// Fold binary operators binding at least as tightly as `min` onto
    /// `left`. Returns the expression and the loosest operator folded in,
    /// which callers use to reject `??` mixed with `&&` or `||`.
    fn parse_binary_from(
        &mut self,
        ctx: Context,
        start: u32,
        mut left: Expression<'a>,
        min: u8,
    ) -> ParseResult<(Expression<'a>, Option<Token>)> {
        let mut last: Option<Token> = None;
        loop {
            let token = self.token();
            let prec = binary_precedence(token, ctx);
            if prec == 0 || prec < min {
                break;
            }
            if let Expression::PrivateIdentifier(private) = left {
                if token != Token::InKeyword {
                    return Err(self.error_at(&messages::UNEXPECTED_PRIVATE_NAME, &[], private.span.start));
                }
            }
            self.check_nullish_mixing(last, Some(token))?;
            if token == Token::Exponentiate
                && matches!(left, Expression::Unary(_) | Expression::Await(_))
                && !self.is_parenthesized(&left)
            {
                return Err(self.error_at(&messages::UNARY_BEFORE_EXPONENTIATION, &[], start));
            }
            self.validate_cover(left)?;
            self.next_token()?;

            let right_start = self.start();
            let operand = self.parse_unary(ctx)?;
            let next_min = if token.is_right_associative() { prec } else { prec + 1 };
            self.enter_nesting()?;
            let (right, right_last) = self.parse_binary_from(ctx, right_start, operand, next_min)?;
            self.leave_nesting();
            if let Expression::PrivateIdentifier(private) = right {
                return Err(self.error_at(&messages::UNEXPECTED_PRIVATE_NAME, &[], private.span.start));
            }
            self.validate_cover(right)?;
            self.check_nullish_mixing(Some(token), right_last)?;

            left = self.make_binary(start, token, left, right)?;
            last = Some(token);
            self.assignable = false;
        }
        Ok((left, last))
    }

    fn check_nullish_mixing(&self, a: Option<Token>, b: Option<Token>) -> ParseResult<()> {
        let (Some(a), Some(b)) = (a, b) else {
            return Ok(());
        };
        if (a.is_coalesce() && b.is_logical()) || (a.is_logical() && b.is_coalesce()) {
            return Err(self.error(&messages::NULLISH_MIXED_WITH_LOGICAL, &[]));
        }
        Ok(())
    }

    fn make_binary(
        &self,
        start: u32,
        token: Token,
        left: Expression<'a>,
        right: Expression<'a>,
    ) -> ParseResult<Expression<'a>> {
        let span = self.finish(start);
        if let Some(operator) = LogicalOperator::from_token(token) {
            return Ok(Expression::Logical(self.alloc(LogicalExpression {
                span,
                left,
                operator,
                right,
            })));
        }
        match BinaryOperator::from_token(token) {
            Some(operator) => Ok(Expression::Binary(self.alloc(BinaryExpression {
                span,
                left,
                operator,
                right,
            }))),
            None => Err(self.error_at(&messages::UNEXPECTED_TOKEN, &[token.text()], start)),
        }
    }

    // ========================================================================
    // Unary, update and await
    // ========================================================================

    pub(crate) fn parse_unary(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let start = self.start();
        let token = self.token();

        if token.is_unary_operator() && !self.escaped() {
            self.enter_nesting()?;
            self.next_token()?;
            let argument = self.parse_unary(ctx)?;
            self.leave_nesting();
            self.validate_cover(argument)?;
            let operator = UnaryOperator::from_token(token)
                .ok_or_else(|| self.error_at(&messages::UNEXPECTED_TOKEN, &[token.text()], start))?;
            if operator == UnaryOperator::Delete {
                self.check_delete_operand(argument, ctx, start)?;
            }
            self.assignable = false;
            return Ok(Expression::Unary(self.alloc(UnaryExpression {
                span: self.finish(start),
                operator,
                prefix: true,
                argument,
            })));
        }

        if token.is_update_operator() {
            self.enter_nesting()?;
            self.next_token()?;
            let argument = self.parse_unary(ctx)?;
            self.leave_nesting();
            self.check_update_target(argument, ctx, "prefix")?;
            self.assignable = false;
            return Ok(Expression::Update(self.alloc(UpdateExpression {
                span: self.finish(start),
                operator: update_operator(token),
                prefix: true,
                argument,
            })));
        }

        if self.at_keyword(Token::AwaitKeyword) && ctx.in_async() {
            return self.parse_await(ctx, start);
        }

        self.parse_postfix(ctx)
    }

    fn check_delete_operand(&self, argument: Expression<'a>, ctx: Context, start: u32) -> ParseResult<()> {
        let target = match argument.without_parens() {
            Expression::Chain(chain) => chain.expression,
            other => other,
        };
        match target {
            Expression::Identifier(_) if ctx.is_strict() => Err(self.error_at(&messages::STRICT_DELETE, &[], start)),
            Expression::Member(member) if matches!(member.property, Expression::PrivateIdentifier(_)) => {
                Err(self.error_at(&messages::DELETE_PRIVATE_FIELD, &[], start))
            }
            _ => Ok(()),
        }
    }

    fn check_update_target(&self, target: Expression<'a>, ctx: Context, kind: &str) -> ParseResult<()> {
        let valid = self.assignable
            && match target.without_parens() {
                Expression::Identifier(id) => {
                    if ctx.is_strict() && is_eval_or_arguments(id.name) {
                        return Err(self.error_at(&messages::STRICT_EVAL_ARGUMENTS, &[], id.span.start));
                    }
                    true
                }
                Expression::Member(_) => true,
                _ => false,
            };
        if valid {
            Ok(())
        } else {
            Err(self.error_at(&messages::INVALID_UPDATE_TARGET, &[kind], target.start()))
        }
    }

    fn parse_await(&mut self, ctx: Context, start: u32) -> ParseResult<Expression<'a>> {
        if ctx.in_parameters() {
            return Err(self.error(&messages::AWAIT_IN_PARAMETER, &[]));
        }
        self.last_await = Some(start);
        self.enter_nesting()?;
        self.next_token()?;
        let argument = self.parse_unary(ctx)?;
        self.leave_nesting();
        self.validate_cover(argument)?;
        self.assignable = false;
        Ok(Expression::Await(self.alloc(AwaitExpression {
            span: self.finish(start),
            argument,
        })))
    }

    fn parse_postfix(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let start = self.start();
        let expr = self.parse_left_hand_side(ctx)?;
        let token = self.token();
        if !token.is_update_operator() || self.line_break_before() || self.is_bare_arrow(&expr) {
            return Ok(expr);
        }
        self.validate_cover(expr)?;
        self.check_update_target(expr, ctx, "postfix")?;
        self.next_token()?;
        self.assignable = false;
        Ok(Expression::Update(self.alloc(UpdateExpression {
            span: self.finish(start),
            operator: update_operator(token),
            prefix: false,
            argument: expr,
        })))
    }

    // ========================================================================
    // Calls and members
    // ========================================================================

    pub(crate) fn parse_left_hand_side(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let start = self.start();
        let expr = match self.token() {
            Token::NewKeyword if !self.escaped() => self.parse_new(ctx)?,
            Token::SuperKeyword if !self.escaped() => self.parse_super(ctx, true)?,
            Token::ImportKeyword if !self.escaped() => self.parse_import_expression(ctx)?,
            _ => self.parse_primary(ctx)?,
        };
        if self.is_bare_arrow(&expr) {
            return Ok(expr);
        }
        self.parse_call_tail(ctx, start, expr, true)
    }

    /// Apply member accesses, calls and tagged templates to `expr`. An
    /// optional chain is wrapped in a single `ChainExpression`.
    pub(crate) fn parse_call_tail(
        &mut self,
        ctx: Context,
        start: u32,
        mut expr: Expression<'a>,
        allow_calls: bool,
    ) -> ParseResult<Expression<'a>> {
        let mut in_chain = false;
        loop {
            match self.token() {
                Token::Dot => {
                    self.validate_cover(expr)?;
                    self.next_token()?;
                    let property = self.parse_member_name()?;
                    expr = self.member(start, expr, property, false, false);
                    self.assignable = !in_chain;
                }
                Token::LeftBracket => {
                    self.validate_cover(expr)?;
                    self.next_token()?;
                    let property = self.parse_expression(ctx.without(Context::DISALLOW_IN))?;
                    self.expect(Token::RightBracket)?;
                    expr = self.member(start, expr, property, true, false);
                    self.assignable = !in_chain;
                }
                Token::LeftParen if allow_calls => {
                    self.validate_cover(expr)?;
                    let arguments = self.parse_arguments(ctx)?;
                    expr = self.call(start, expr, arguments, false);
                    self.assignable = false;
                }
                Token::QuestionDot => {
                    if !allow_calls {
                        return Err(self.error(&messages::OPTIONAL_CHAIN_NEW, &[]));
                    }
                    self.validate_cover(expr)?;
                    self.next_token()?;
                    in_chain = true;
                    expr = match self.token() {
                        Token::LeftParen => {
                            let arguments = self.parse_arguments(ctx)?;
                            self.call(start, expr, arguments, true)
                        }
                        Token::LeftBracket => {
                            self.next_token()?;
                            let property = self.parse_expression(ctx.without(Context::DISALLOW_IN))?;
                            self.expect(Token::RightBracket)?;
                            self.member(start, expr, property, true, true)
                        }
                        Token::NoSubstitutionTemplate | Token::TemplateHead => {
                            return Err(self.error(&messages::OPTIONAL_CHAIN_TEMPLATE, &[]));
                        }
                        _ => {
                            let property = self.parse_member_name()?;
                            self.member(start, expr, property, false, true)
                        }
                    };
                    self.assignable = false;
                }
                Token::NoSubstitutionTemplate | Token::TemplateHead => {
                    if in_chain {
                        return Err(self.error(&messages::OPTIONAL_CHAIN_TEMPLATE, &[]));
                    }
                    self.validate_cover(expr)?;
                    let quasi = self.parse_template(ctx, true)?;
                    expr = Expression::TaggedTemplate(self.alloc(TaggedTemplateExpression {
                        span: self.finish(start),
                        tag: expr,
                        quasi,
                    }));
                    self.assignable = false;
                }
                _ => break,
            }
        }

        if in_chain {
            self.assignable = false;
            expr = Expression::Chain(self.alloc(ChainExpression {
                span: self.finish(start),
                expression: expr,
            }));
        }
        Ok(expr)
    }

    pub(crate) fn member(
        &self,
        start: u32,
        object: Expression<'a>,
        property: Expression<'a>,
        computed: bool,
        optional: bool,
    ) -> Expression<'a> {
        Expression::Member(self.alloc(MemberExpression {
            span: self.finish(start),
            object,
            property,
            computed,
            optional,
        }))
    }

    pub(crate) fn call(
        &self,
        start: u32,
        callee: Expression<'a>,
        arguments: &'a [ExpressionOrSpread<'a>],
        optional: bool,
    ) -> Expression<'a> {
        Expression::Call(self.alloc(CallExpression {
            span: self.finish(start),
            callee,
            arguments,
            optional,
        }))
    }

    /// Name after `.`: any identifier name or a private name.
    pub(crate) fn parse_member_name(&mut self) -> ParseResult<Expression<'a>> {
        match self.token() {
            Token::PrivateName => Ok(Expression::PrivateIdentifier(self.parse_private_reference()?)),
            token if token.is_word() => Ok(Expression::Identifier(self.identifier_node()?)),
            _ => Err(self.unexpected()),
        }
    }

    /// A `#name` use, checked against the enclosing classes.
    fn parse_private_reference(&mut self) -> ParseResult<&'a PrivateIdentifier<'a>> {
        let start = self.start();
        let name = self.token_value();
        self.private_names
            .reference(name, start)
            .map_err(|err| self.scope_error(err))?;
        self.next_token()?;
        Ok(self.alloc(PrivateIdentifier {
            span: self.finish(start),
            name,
        }))
    }

    pub(crate) fn parse_arguments(&mut self, ctx: Context) -> ParseResult<&'a [ExpressionOrSpread<'a>]> {
        let (arguments, _) = self.parse_argument_list(ctx, false)?;
        Ok(arguments)
    }

    /// Parse `( ... )` arguments. With `cover`, array and object cover state
    /// is collected instead of checked, for `async (...)` that may turn out
    /// to be arrow parameters.
    fn parse_argument_list(
        &mut self,
        ctx: Context,
        cover: bool,
    ) -> ParseResult<(&'a [ExpressionOrSpread<'a>], DestructuringFlags)> {
        self.expect(Token::LeftParen)?;
        let ctx = ctx.without(Context::DISALLOW_IN);
        let mut arguments = self.vec();
        let mut flags = DestructuringFlags::NONE;
        while self.token() != Token::RightParen {
            let start = self.start();
            let spread = self.eat(Token::Ellipsis)?;
            let expr = if cover {
                let expr = self.parse_assignment_cover(ctx)?;
                flags |= std::mem::take(&mut self.destructible);
                expr
            } else {
                self.parse_assignment_expression(ctx)?
            };
            if spread {
                if self.token() == Token::Comma {
                    self.spread_with_comma.insert(start);
                }
                arguments.push(ExpressionOrSpread::Spread(self.alloc(SpreadElement {
                    span: self.finish(start),
                    argument: expr,
                })));
            } else {
                arguments.push(ExpressionOrSpread::Expression(expr));
            }
            if self.token() != Token::RightParen {
                self.expect(Token::Comma)?;
            }
        }
        self.next_token()?;
        Ok((arguments.into_bump_slice(), flags))
    }

    fn parse_new(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let start = self.start();
        let keyword_end = self.scanner.token_end();
        self.enter_nesting()?;
        self.next_token()?;

        if self.token() == Token::Dot {
            self.next_token()?;
            if !self.at_keyword(Token::TargetKeyword) {
                return Err(self.error(&messages::INVALID_META_PROPERTY, &["new", self.scanner.token_raw()]));
            }
            if !ctx.contains(Context::NEW_TARGET) {
                return Err(self.error_at(&messages::NEW_TARGET_NOT_ALLOWED, &[], start));
            }
            let meta = self.alloc(Identifier {
                span: self.span(start, keyword_end),
                name: "new",
            });
            let property = self.identifier_node()?;
            self.leave_nesting();
            self.assignable = false;
            return Ok(Expression::MetaProperty(self.alloc(MetaProperty {
                span: self.finish(start),
                meta,
                property,
            })));
        }

        let callee_start = self.start();
        let callee = match self.token() {
            Token::NewKeyword if !self.escaped() => self.parse_new(ctx)?,
            Token::SuperKeyword if !self.escaped() => self.parse_super(ctx, false)?,
            Token::ImportKeyword if !self.escaped() => {
                let expr = self.parse_import_expression(ctx)?;
                if let Expression::Import(_) = expr {
                    return Err(self.error_at(&messages::UNEXPECTED_TOKEN, &["import"], callee_start));
                }
                expr
            }
            _ => self.parse_primary(ctx)?,
        };
        let callee = self.parse_call_tail(ctx, callee_start, callee, false)?;
        let arguments = if self.token() == Token::LeftParen {
            self.parse_arguments(ctx)?
        } else {
            &[]
        };
        self.leave_nesting();
        self.assignable = false;
        Ok(Expression::New(self.alloc(NewExpression {
            span: self.finish(start),
            callee,
            arguments,
        })))
    }

    fn parse_super(&mut self, ctx: Context, allow_call: bool) -> ParseResult<Expression<'a>> {
        let start = self.start();
        self.next_token()?;
        match self.token() {
            Token::LeftParen if allow_call && ctx.contains(Context::IN_DERIVED_CONSTRUCTOR) => {}
            Token::LeftParen if allow_call => {
                return Err(self.error_at(&messages::SUPER_CALL_NOT_ALLOWED, &[], start));
            }
            Token::Dot | Token::LeftBracket if ctx.contains(Context::IN_METHOD) => {
                if self.token() == Token::Dot && self.peek().0 == Token::PrivateName {
                    return Err(self.error_at(&messages::UNEXPECTED_PRIVATE_NAME, &[], start));
                }
            }
            Token::Dot | Token::LeftBracket => {
                return Err(self.error_at(&messages::SUPER_PROPERTY_NOT_ALLOWED, &[], start));
            }
            _ => return Err(self.error_at(&messages::SUPER_UNEXPECTED, &[], start)),
        }
        self.assignable = false;
        self.destructible = DestructuringFlags::NONE;
        Ok(Expression::Super(self.alloc(Super {
            span: self.finish(start),
        })))
    }

    /// `import.meta` or `import(source[, options])`.
    fn parse_import_expression(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let start = self.start();
        let keyword_end = self.scanner.token_end();
        self.next_token()?;
        self.assignable = false;
        self.destructible = DestructuringFlags::NONE;
        match self.token() {
            Token::Dot => {
                self.next_token()?;
                if !self.at_keyword(Token::MetaKeyword) {
                    return Err(self.error(&messages::INVALID_META_PROPERTY, &["import", self.scanner.token_raw()]));
                }
                if !ctx.is_module() {
                    return Err(self.error_at(&messages::IMPORT_META_OUTSIDE_MODULE, &[], start));
                }
                let meta = self.alloc(Identifier {
                    span: self.span(start, keyword_end),
                    name: "import",
                });
                let property = self.identifier_node()?;
                Ok(Expression::MetaProperty(self.alloc(MetaProperty {
                    span: self.finish(start),
                    meta,
                    property,
                })))
            }
            Token::LeftParen => {
                self.next_token()?;
                let arg_ctx = ctx.without(Context::DISALLOW_IN);
                if matches!(self.token(), Token::RightParen | Token::Ellipsis) {
                    return Err(self.error(&messages::IMPORT_CALL_ARGUMENTS, &[]));
                }
                let source = self.parse_assignment_expression(arg_ctx)?;
                let mut options = None;
                if self.eat(Token::Comma)? && self.token() != Token::RightParen {
                    if self.token() == Token::Ellipsis {
                        return Err(self.error(&messages::IMPORT_CALL_ARGUMENTS, &[]));
                    }
                    options = Some(self.parse_assignment_expression(arg_ctx)?);
                    self.eat(Token::Comma)?;
                }
                if self.token() != Token::RightParen {
                    return Err(self.error(&messages::IMPORT_CALL_ARGUMENTS, &[]));
                }
                self.next_token()?;
                self.assignable = false;
                Ok(Expression::Import(self.alloc(ImportExpression {
                    span: self.finish(start),
                    source,
                    options,
                })))
            }
            _ => Err(self.unexpected()),
        }
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let start = self.start();
        let can_arrow = start == self.assignment_start;
        self.assignable = false;
        self.destructible = DestructuringFlags::NONE;

        let token = self.token();
        if token.is_identifier() {
            return self.parse_identifier_primary(ctx, start, can_arrow);
        }
        if token.is_reserved_word() && self.escaped() {
            return Err(self.error(&messages::ESCAPED_KEYWORD, &[]));
        }
        match token {
            Token::StringLiteral
            | Token::NumericLiteral
            | Token::BigIntLiteral
            | Token::TrueKeyword
            | Token::FalseKeyword
            | Token::NullKeyword => Ok(Expression::Literal(self.parse_literal_node(ctx)?)),
            Token::Divide | Token::DivideAssign => self.parse_regex_literal(),
            Token::ThisKeyword => {
                self.next_token()?;
                Ok(Expression::This(self.alloc(ThisExpression {
                    span: self.finish(start),
                })))
            }
            Token::NoSubstitutionTemplate | Token::TemplateHead => {
                Ok(Expression::Template(self.parse_template(ctx, false)?))
            }
            Token::LeftBracket => self.parse_array_literal(ctx),
            Token::LeftBrace => self.parse_object_literal(ctx),
            Token::LeftParen => self.parse_paren_group(ctx, start, can_arrow),
            Token::FunctionKeyword => self.parse_function_expression(ctx, start, false),
            Token::ClassKeyword => Ok(Expression::Class(self.parse_class(ctx, start, ClassType::ClassExpression, &[], false)?)),
            Token::At if self.options.next => {
                let decorators = self.parse_decorators(ctx)?;
                if self.token() != Token::ClassKeyword {
                    return Err(self.error(&messages::INVALID_DECORATOR_POSITION, &[]));
                }
                Ok(Expression::Class(self.parse_class(ctx, start, ClassType::ClassExpression, decorators, false)?))
            }
            Token::LessThan if self.options.jsx => self.parse_jsx_expression(ctx),
            Token::PrivateName if self.peek().0 == Token::InKeyword => {
                Ok(Expression::PrivateIdentifier(self.parse_private_reference()?))
            }
            Token::PrivateName => Err(self.error(&messages::UNEXPECTED_PRIVATE_NAME, &[])),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_identifier_primary(&mut self, ctx: Context, start: u32, can_arrow: bool) -> ParseResult<Expression<'a>> {
        if self.at_keyword(Token::AsyncKeyword) {
            let (next, flags) = self.peek();
            let same_line = !flags.has_preceding_line_break();
            if same_line && next == Token::FunctionKeyword {
                return self.parse_function_expression(ctx, start, true);
            }
            // `async of` not followed by `=>` is the head of `for (async of ...)`.
            let async_of = next == Token::OfKeyword && self.peek_second() != Token::Arrow;
            if same_line && can_arrow && next.is_identifier() && !async_of {
                return self.parse_async_identifier_arrow(ctx, start);
            }
            if next == Token::LeftParen {
                return self.parse_async_call_or_arrow(ctx, start, can_arrow);
            }
        }

        let name = self.token_value();
        let id = self.identifier_node()?;
        if can_arrow && self.token() == Token::Arrow {
            if self.line_break_before() {
                return Err(self.error(&messages::LINE_TERMINATOR_BEFORE_ARROW, &[]));
            }
            self.check_binding_identifier(name, start, ctx, BindingKind::Parameter)?;
            let mut params = self.vec();
            params.push(Pattern::Identifier(id));
            return self.parse_arrow_function(ctx, start, params.into_bump_slice(), false);
        }

        self.check_identifier_reference(name, start, ctx)?;
        if name == "await" {
            self.last_await_identifier = Some(start);
        }
        self.assignable = true;
        Ok(Expression::Identifier(id))
    }

    /// `async x => body`
    fn parse_async_identifier_arrow(&mut self, ctx: Context, start: u32) -> ParseResult<Expression<'a>> {
        self.next_token()?;
        let param_start = self.start();
        let name = self.token_value();
        let id = self.identifier_node()?;
        if self.token() != Token::Arrow {
            return Err(self.unexpected());
        }
        if self.line_break_before() {
            return Err(self.error(&messages::LINE_TERMINATOR_BEFORE_ARROW, &[]));
        }
        self.check_binding_identifier(name, param_start, ctx.with(Context::IN_ASYNC), BindingKind::Parameter)?;
        let mut params = self.vec();
        params.push(Pattern::Identifier(id));
        self.parse_arrow_function(ctx, start, params.into_bump_slice(), true)
    }

    /// `async(...)`, which is a call unless `=>` follows on the same line.
    fn parse_async_call_or_arrow(&mut self, ctx: Context, start: u32, can_arrow: bool) -> ParseResult<Expression<'a>> {
        let callee = self.identifier_node()?;
        let line_break = self.line_break_before();
        let (arguments, flags) = self.parse_argument_list(ctx, true)?;

        if can_arrow && !line_break && self.token() == Token::Arrow {
            if self.line_break_before() {
                return Err(self.error(&messages::LINE_TERMINATOR_BEFORE_ARROW, &[]));
            }
            if let Some(offset) = self.last_await.filter(|&at| at >= start) {
                return Err(self.error_at(&messages::AWAIT_IN_PARAMETER, &[], offset));
            }
            if let Some(offset) = self.last_await_identifier.filter(|&at| at >= start) {
                return Err(self.error_at(&messages::AWAIT_AS_IDENTIFIER, &[], offset));
            }
            if let Some(offset) = self.last_yield.filter(|&at| at >= start) {
                return Err(self.error_at(&messages::YIELD_IN_PARAMETER, &[], offset));
            }
            let params = self.arguments_to_params(arguments, ctx.with(Context::IN_ASYNC))?;
            return self.parse_arrow_function(ctx, start, params, true);
        }

        let exprs: Vec<Expression<'a>> = arguments
            .iter()
            .map(|arg| match *arg {
                ExpressionOrSpread::Expression(expr) => expr,
                ExpressionOrSpread::Spread(spread) => spread.argument,
            })
            .collect();
        self.check_cover_flags(flags, &exprs)?;
        self.assignable = false;
        Ok(self.call(start, Expression::Identifier(callee), arguments, false))
    }

    fn arguments_to_params(
        &mut self,
        arguments: &'a [ExpressionOrSpread<'a>],
        ctx: Context,
    ) -> ParseResult<&'a [Pattern<'a>]> {
        let mut params = self.vec();
        for (index, argument) in arguments.iter().enumerate() {
            match *argument {
                ExpressionOrSpread::Expression(expr) => {
                    params.push(self.element_to_pattern(expr, PatternMode::Binding, ctx)?);
                }
                ExpressionOrSpread::Spread(spread) => {
                    if self.spread_with_comma.contains(&spread.span.start) {
                        return Err(self.error_at(&messages::REST_TRAILING_COMMA, &[], spread.span.end));
                    }
                    if index + 1 != arguments.len() {
                        return Err(self.error_at(&messages::REST_MUST_BE_LAST, &[], spread.span.start));
                    }
                    params.push(self.rest_to_pattern(spread, PatternMode::Binding, ctx)?);
                }
            }
        }
        Ok(params.into_bump_slice())
    }

    // ========================================================================
    // Literals and templates
    // ========================================================================

    pub(crate) fn parse_literal_node(&mut self, ctx: Context) -> ParseResult<&'a Literal<'a>> {
        let start = self.start();
        let flags = self.scanner.token_flags();
        let raw = self.literal_raw();
        let (value, bigint) = match self.token() {
            Token::StringLiteral => {
                if ctx.is_strict() && flags.contains(TokenFlags::OCTAL_ESCAPE) {
                    return Err(self.error(&messages::STRICT_OCTAL_ESCAPE, &[]));
                }
                (LiteralValue::String(self.token_value()), None)
            }
            Token::NumericLiteral => {
                if ctx.is_strict() && flags.is_legacy_numeric() {
                    return Err(self.error(&messages::STRICT_OCTAL_LITERAL, &[]));
                }
                (LiteralValue::Number(self.scanner.token_number()), None)
            }
            Token::BigIntLiteral => (LiteralValue::BigInt, Some(self.token_value())),
            Token::TrueKeyword => (LiteralValue::Boolean(true), None),
            Token::FalseKeyword => (LiteralValue::Boolean(false), None),
            Token::NullKeyword => (LiteralValue::Null, None),
            _ => return Err(self.unexpected()),
        };
        self.next_token()?;
        Ok(self.alloc(Literal {
            span: self.finish(start),
            value,
            raw,
            regex: None,
            bigint,
        }))
    }

    fn parse_regex_literal(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.start();
        self.scanner.rescan_regex()?;
        let pattern = self.token_value();
        let flags = self.scanner.regex_flags();
        let raw = self.literal_raw();
        self.next_token()?;
        Ok(Expression::Literal(self.alloc(Literal {
            span: self.finish(start),
            value: LiteralValue::RegExp,
            raw,
            regex: Some(RegExpLiteral { pattern, flags }),
            bigint: None,
        })))
    }

    /// Parse a template starting at its first chunk. In a tagged template an
    /// invalid escape leaves the cooked value empty instead of failing.
    pub(crate) fn parse_template(&mut self, ctx: Context, tagged: bool) -> ParseResult<&'a TemplateLiteral<'a>> {
        let start = self.start();
        let mut quasis = self.vec();
        let mut expressions = self.vec();
        loop {
            let tail = matches!(self.token(), Token::NoSubstitutionTemplate | Token::TemplateTail);
            quasis.push(self.template_element(tagged, tail)?);
            self.next_token()?;
            if tail {
                break;
            }
            expressions.push(self.parse_expression(ctx.without(Context::DISALLOW_IN))?);
            if self.token() != Token::RightBrace {
                return Err(match self.token() {
                    Token::EndOfSource => self.error(&messages::UNTERMINATED_TEMPLATE_LITERAL, &[]),
                    _ => self.error(&messages::EXPECTED_TOKEN, &["}"]),
                });
            }
            self.scanner.rescan_template_continuation()?;
        }
        Ok(self.alloc(TemplateLiteral {
            span: self.finish(start),
            quasis: quasis.into_bump_slice(),
            expressions: expressions.into_bump_slice(),
        }))
    }

    fn template_element(&self, tagged: bool, tail: bool) -> ParseResult<TemplateElement<'a>> {
        let token_start = self.start();
        let token_end = self.scanner.token_end();
        let closing = if tail { 1 } else { 2 };
        let span = self.span(token_start + 1, token_end.saturating_sub(closing).max(token_start + 1));

        let cooked = if self.scanner.token_flags().contains(TokenFlags::INVALID_TEMPLATE_ESCAPE) {
            if !tagged {
                return Err(self.error_at(&messages::INVALID_TEMPLATE_ESCAPE, &[], self.scanner.invalid_escape_pos()));
            }
            None
        } else {
            Some(self.token_value())
        };
        let raw = match self.scanner.token_template_raw() {
            Cow::Borrowed(raw) => raw,
            Cow::Owned(raw) => self.arena.alloc_str(&raw),
        };
        Ok(TemplateElement {
            span,
            value: TemplateElementValue { raw, cooked },
            tail,
        })
    }

    // ========================================================================
    // Array and object literals
    // ========================================================================

    fn parse_array_literal(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let start = self.start();
        self.next_token()?;
        let ctx = ctx.without(Context::DISALLOW_IN);
        let mut elements = self.vec();
        let mut flags = DestructuringFlags::NONE;

        while self.token() != Token::RightBracket {
            if self.token() == Token::Comma {
                self.next_token()?;
                elements.push(None);
                continue;
            }
            let element_start = self.start();
            let spread = self.eat(Token::Ellipsis)?;
            let expr = self.parse_assignment_cover(ctx)?;
            flags |= std::mem::take(&mut self.destructible);
            let element = if spread {
                if self.token() == Token::Comma {
                    self.spread_with_comma.insert(element_start);
                }
                ExpressionOrSpread::Spread(self.alloc(SpreadElement {
                    span: self.finish(element_start),
                    argument: expr,
                }))
            } else {
                ExpressionOrSpread::Expression(expr)
            };
            elements.push(Some(element));
            if self.token() != Token::RightBracket {
                self.expect(Token::Comma)?;
            }
        }
        self.next_token()?;

        self.assignable = false;
        self.destructible = flags;
        Ok(Expression::Array(self.alloc(ArrayExpression {
            span: self.finish(start),
            elements: elements.into_bump_slice(),
        })))
    }

    fn parse_object_literal(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let start = self.start();
        self.next_token()?;
        let ctx = ctx.without(Context::DISALLOW_IN);
        let mut properties = self.vec();
        let mut flags = DestructuringFlags::NONE;
        let mut proto_count = 0u32;

        while self.token() != Token::RightBrace {
            let member_start = self.start();
            if self.eat(Token::Ellipsis)? {
                let argument = self.parse_assignment_cover(ctx)?;
                flags |= std::mem::take(&mut self.destructible);
                if self.token() == Token::Comma {
                    self.spread_with_comma.insert(member_start);
                }
                properties.push(ObjectMember::Spread(self.alloc(SpreadElement {
                    span: self.finish(member_start),
                    argument,
                })));
            } else {
                let (property, member_flags) = self.parse_object_property(ctx, &mut proto_count)?;
                flags |= member_flags;
                properties.push(ObjectMember::Property(property));
            }
            if self.token() != Token::RightBrace {
                self.expect(Token::Comma)?;
            }
        }
        self.next_token()?;

        if proto_count > 1 {
            flags |= DestructuringFlags::SEEN_PROTO;
        }
        self.assignable = false;
        self.destructible = flags;
        Ok(Expression::Object(self.alloc(ObjectExpression {
            span: self.finish(start),
            properties: properties.into_bump_slice(),
        })))
    }

    fn parse_object_property(
        &mut self,
        ctx: Context,
        proto_count: &mut u32,
    ) -> ParseResult<(&'a Property<'a>, DestructuringFlags)> {
        let start = self.start();
        let mut is_async = false;
        let mut generator = false;
        let mut kind = PropertyKind::Init;

        if self.at_keyword(Token::AsyncKeyword) {
            let (next, flags) = self.peek();
            if !flags.has_preceding_line_break() && (starts_property_key(next) || next == Token::Multiply) {
                is_async = true;
                self.next_token()?;
            }
        }
        if self.token() == Token::Multiply {
            generator = true;
            self.next_token()?;
        }
        if !is_async && !generator && (self.at_keyword(Token::GetKeyword) || self.at_keyword(Token::SetKeyword)) {
            if starts_property_key(self.peek().0) {
                kind = if self.token() == Token::GetKeyword { PropertyKind::Get } else { PropertyKind::Set };
                self.next_token()?;
            }
        }

        let key_token = self.token();
        let key_start = self.start();
        let (key, computed) = self.parse_property_key(ctx, false)?;

        if is_async || generator || kind != PropertyKind::Init || self.token() == Token::LeftParen {
            let shape = match kind {
                PropertyKind::Init => MethodShape::Method,
                PropertyKind::Get => MethodShape::Getter,
                PropertyKind::Set => MethodShape::Setter,
            };
            let value = self.parse_method_function(ctx, is_async, generator, shape)?;
            let property = self.alloc(Property {
                span: self.finish(start),
                key,
                value: Expression::Function(value),
                kind,
                method: kind == PropertyKind::Init,
                shorthand: false,
                computed,
            });
            return Ok((property, DestructuringFlags::NONE));
        }

        if self.eat(Token::Colon)? {
            if !computed && static_key_name(&key) == Some("__proto__") {
                *proto_count += 1;
            }
            let value = self.parse_assignment_cover(ctx)?;
            let flags = std::mem::take(&mut self.destructible);
            let property = self.alloc(Property {
                span: self.finish(start),
                key,
                value,
                kind,
                method: false,
                shorthand: false,
                computed,
            });
            return Ok((property, flags));
        }

        // Shorthand `{ a }` or cover initializer `{ a = 1 }`.
        let id = match key {
            Expression::Identifier(id) if !computed && key_token.is_identifier() => id,
            _ => return Err(self.unexpected()),
        };
        self.check_identifier_reference(id.name, key_start, ctx)?;
        if id.name == "await" {
            self.last_await_identifier = Some(key_start);
        }

        let (value, flags) = if self.token() == Token::Assign {
            self.next_token()?;
            let default = self.parse_assignment_expression(ctx)?;
            let value = Expression::Assignment(self.alloc(AssignmentExpression {
                span: self.finish(key_start),
                operator: AssignmentOperator::Assign,
                left: Pattern::Identifier(id),
                right: default,
            }));
            (value, DestructuringFlags::MUST_DESTRUCT)
        } else {
            (Expression::Identifier(id), DestructuringFlags::NONE)
        };
        let property = self.alloc(Property {
            span: self.finish(start),
            key,
            value,
            kind,
            method: false,
            shorthand: true,
            computed: false,
        });
        Ok((property, flags))
    }

    /// A property name: identifier name, string, number, computed `[expr]`,
    /// or a private name where `allow_private` is set. Returns the key and
    /// whether it was computed.
    pub(crate) fn parse_property_key(&mut self, ctx: Context, allow_private: bool) -> ParseResult<(Expression<'a>, bool)> {
        match self.token() {
            Token::LeftBracket => {
                self.next_token()?;
                let key = self.parse_assignment_expression(ctx.without(Context::DISALLOW_IN))?;
                self.expect(Token::RightBracket)?;
                Ok((key, true))
            }
            Token::StringLiteral | Token::NumericLiteral | Token::BigIntLiteral => {
                Ok((Expression::Literal(self.parse_literal_node(ctx)?), false))
            }
            Token::PrivateName if allow_private => {
                let start = self.start();
                let name = self.token_value();
                self.next_token()?;
                Ok((
                    Expression::PrivateIdentifier(self.alloc(PrivateIdentifier {
                        span: self.finish(start),
                        name,
                    })),
                    false,
                ))
            }
            Token::PrivateName => Err(self.error(&messages::UNEXPECTED_PRIVATE_NAME, &[])),
            token if token.is_word() => Ok((Expression::Identifier(self.identifier_node()?), false)),
            _ => Err(self.unexpected()),
        }
    }

    // ========================================================================
    // Parentheses and arrows
    // ========================================================================

    /// `( ... )`: a parenthesized expression, or the parameters of an arrow
    /// function when `=>` follows.
    fn parse_paren_group(&mut self, ctx: Context, start: u32, can_arrow: bool) -> ParseResult<Expression<'a>> {
        self.next_token()?;
        let inner = ctx.without(Context::DISALLOW_IN);
        let mut items = self.vec();
        let mut rest: Option<(u32, Expression<'a>)> = None;
        let mut trailing_comma = false;
        let mut flags = DestructuringFlags::NONE;

        while self.token() != Token::RightParen {
            let item_start = self.start();
            if self.eat(Token::Ellipsis)? {
                let argument = self.parse_assignment_cover(inner)?;
                flags |= std::mem::take(&mut self.destructible);
                if self.token() == Token::Comma {
                    let comma = self.start();
                    self.next_token()?;
                    return Err(if self.token() == Token::RightParen {
                        self.error_at(&messages::REST_TRAILING_COMMA, &[], comma)
                    } else {
                        self.error_at(&messages::REST_MUST_BE_LAST, &[], item_start)
                    });
                }
                rest = Some((item_start, argument));
                break;
            }
            items.push(self.parse_assignment_cover(inner)?);
            flags |= std::mem::take(&mut self.destructible);
            if self.token() == Token::RightParen {
                break;
            }
            self.expect(Token::Comma)?;
            trailing_comma = self.token() == Token::RightParen;
        }
        let close = self.start();
        self.expect(Token::RightParen)?;

        if can_arrow && self.token() == Token::Arrow {
            if self.line_break_before() {
                return Err(self.error(&messages::LINE_TERMINATOR_BEFORE_ARROW, &[]));
            }
            if let Some(offset) = self.last_yield.filter(|&at| at >= start) {
                return Err(self.error_at(&messages::YIELD_IN_PARAMETER, &[], offset));
            }
            if let Some(offset) = self.last_await.filter(|&at| at >= start) {
                return Err(self.error_at(&messages::AWAIT_IN_PARAMETER, &[], offset));
            }
            let mut params = self.vec();
            for item in items.iter() {
                params.push(self.element_to_pattern(*item, PatternMode::Binding, ctx)?);
            }
            if let Some((rest_start, argument)) = rest {
                params.push(self.rest_argument_to_pattern(rest_start, argument, PatternMode::Binding, ctx)?);
            }
            return self.parse_arrow_function(ctx, start, params.into_bump_slice(), false);
        }

        if let Some((rest_start, _)) = rest {
            return Err(self.error_at(&messages::UNEXPECTED_TOKEN, &["..."], rest_start));
        }
        if items.is_empty() || trailing_comma {
            return Err(self.error_at(&messages::UNEXPECTED_TOKEN, &[")"], close));
        }
        self.check_cover_flags(flags, &items)?;

        let single = items.len() == 1;
        let assignable = single && self.assignable;
        let expression = if single {
            items[0]
        } else {
            let first = items[0].start();
            let last = items[items.len() - 1].end();
            Expression::Sequence(self.alloc(SequenceExpression {
                span: self.span(first, last),
                expressions: items.into_bump_slice(),
            }))
        };

        let result = if self.options.preserve_parens {
            Expression::Parenthesized(self.alloc(ParenthesizedExpression {
                span: self.finish(start),
                expression,
            }))
        } else {
            self.parenthesized.insert(expression.start());
            expression
        };
        self.assignable = assignable;
        self.destructible = DestructuringFlags::NONE;
        Ok(result)
    }

    /// Parse `=> body` for already converted parameters starting at `start`.
    pub(crate) fn parse_arrow_function(
        &mut self,
        ctx: Context,
        start: u32,
        params: &'a [Pattern<'a>],
        is_async: bool,
    ) -> ParseResult<Expression<'a>> {
        self.expect(Token::Arrow)?;
        let arrow_ctx = ctx.enter_arrow(is_async);

        let params_scope = self.scopes.push(ScopeKind::ARROW_PARAMS);
        for param in params {
            self.declare_pattern(*param, BindingKind::Parameter, ctx)?;
        }
        if let Some(err) = self.scopes.take_deferred(params_scope) {
            return Err(self.scope_error(err));
        }

        let saved_labels = self.labels.take();
        let saved_chain = self.label_chain.take();
        let saved_yield = self.last_yield.take();
        let saved_await = self.last_await.take();
        let saved_await_identifier = self.last_await_identifier.take();
        let simple = params.iter().all(Pattern::is_simple_parameter);

        let (body, expression, strict) = if self.token() == Token::LeftBrace {
            let body_start = self.start();
            self.next_token()?;
            self.scopes.push(ScopeKind::FUNCTION_BODY);
            let (statements, body_ctx) = self.parse_body_statements(arrow_ctx, simple, Token::RightBrace)?;
            self.expect(Token::RightBrace)?;
            self.scopes.pop();
            let block = self.alloc(BlockStatement {
                span: self.finish(body_start),
                body: statements,
            });
            (ArrowBody::Block(block), false, body_ctx.is_strict())
        } else {
            let concise_ctx = arrow_ctx.with(ctx & Context::DISALLOW_IN);
            let expr = self.parse_assignment_expression(concise_ctx)?;
            (ArrowBody::Expression(expr), true, arrow_ctx.is_strict())
        };

        if strict && !ctx.is_strict() {
            for param in params {
                self.check_pattern_names(*param, ctx.with(Context::STRICT), BindingKind::Parameter)?;
            }
        }
        self.scopes.pop();
        self.labels.restore(saved_labels);
        self.label_chain = saved_chain;
        self.last_yield = saved_yield;
        self.last_await = saved_await;
        self.last_await_identifier = saved_await_identifier;

        self.assignable = false;
        self.destructible = DestructuringFlags::NONE;
        Ok(Expression::ArrowFunction(self.alloc(ArrowFunctionExpression {
            span: self.finish(start),
            id: None,
            expression,
            generator: false,
            is_async,
            params,
            body,
        })))
    }

    fn parse_yield(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let start = self.start();
        if ctx.in_parameters() {
            return Err(self.error(&messages::YIELD_IN_PARAMETER, &[]));
        }
        self.last_yield = Some(start);
        self.next_token()?;

        let mut delegate = false;
        let mut argument = None;
        if !self.line_break_before() {
            if self.eat(Token::Multiply)? {
                delegate = true;
                argument = Some(self.parse_assignment_expression(ctx)?);
            } else if can_start_expression(self.token()) {
                argument = Some(self.parse_assignment_expression(ctx)?);
            }
        }
        self.assignable = false;
        self.destructible = DestructuringFlags::NONE;
        Ok(Expression::Yield(self.alloc(YieldExpression {
            span: self.finish(start),
            delegate,
            argument,
        })))
    }
}

fn update_operator(token: Token) -> UpdateOperator {
    if token == Token::Increment {
        UpdateOperator::Increment
    } else {
        UpdateOperator::Decrement
    }
}

/// Offset of the first `{ a = 1 }` shorthand initializer in a literal.
fn find_shorthand_initializer(expr: Expression<'_>) -> Option<u32> {
    match expr {
        Expression::Array(array) => array.elements.iter().flatten().find_map(|element| match *element {
            ExpressionOrSpread::Expression(expr) => find_shorthand_initializer(expr),
            ExpressionOrSpread::Spread(spread) => find_shorthand_initializer(spread.argument),
        }),
        Expression::Object(object) => object.properties.iter().find_map(|member| match *member {
            ObjectMember::Property(property) if property.shorthand => match property.value {
                Expression::Assignment(assign) => Some(assign.span.start),
                _ => None,
            },
            ObjectMember::Property(property) => find_shorthand_initializer(property.value),
            ObjectMember::Spread(spread) => find_shorthand_initializer(spread.argument),
        }),
        _ => None,
    }
}

/// Offset of the second `__proto__` key in the first literal that has two.
fn find_duplicate_proto(expr: Expression<'_>) -> Option<u32> {
    match expr {
        Expression::Array(array) => array.elements.iter().flatten().find_map(|element| match *element {
            ExpressionOrSpread::Expression(expr) => find_duplicate_proto(expr),
            ExpressionOrSpread::Spread(spread) => find_duplicate_proto(spread.argument),
        }),
        Expression::Object(object) => {
            let mut seen = false;
            for member in object.properties {
                if let ObjectMember::Property(property) = member {
                    let is_proto = !property.computed
                        && !property.shorthand
                        && !property.method
                        && property.kind == PropertyKind::Init
                        && static_key_name(&property.key) == Some("__proto__");
                    if is_proto && seen {
                        return Some(property.key.start());
                    }
                    seen |= is_proto;
                }
            }
            object.properties.iter().find_map(|member| match *member {
                ObjectMember::Property(property) => find_duplicate_proto(property.value),
                ObjectMember::Spread(spread) => find_duplicate_proto(spread.argument),
            })
        }
        _ => None,
    }
}
