//! Class declarations, expressions and decorators.

use sable_ast::types::DestructuringFlags;
use sable_ast::*;
use sable_binder::{BindingKind, PrivateNameKind, ScopeKind};
use sable_diagnostics::{messages, ParseResult};

use crate::context::Context;
use crate::functions::MethodShape;
use crate::parser::Parser;
use crate::utilities::{ends_class_field_name, static_key_name};

/// Modifiers read before a class element's key.
#[derive(Debug, Clone, Copy, Default)]
struct ElementModifiers {
    is_static: bool,
    is_async: bool,
    generator: bool,
    accessor: Option<MethodKind>,
}

impl ElementModifiers {
    fn is_plain(&self) -> bool {
        !self.is_async && !self.generator && self.accessor.is_none()
    }

    fn function_kind(&self) -> &'static str {
        match self.accessor {
            Some(MethodKind::Get) => "getter",
            Some(MethodKind::Set) => "setter",
            _ if self.generator => "generator",
            _ => "async method",
        }
    }
}

impl<'a, 'o> Parser<'a, 'o> {
    /// `class` through the closing brace of the body. Class code is always
    /// strict.
    pub(crate) fn parse_class(
        &mut self,
        ctx: Context,
        start: u32,
        kind: ClassType,
        decorators: &'a [Decorator<'a>],
        default_export: bool,
    ) -> ParseResult<&'a Class<'a>> {
        self.expect(Token::ClassKeyword)?;
        let class_ctx = ctx.with(Context::STRICT);

        let id = if self.token().is_identifier() {
            let name_start = self.start();
            let name = self.token_value();
            self.check_binding_identifier(name, name_start, class_ctx, BindingKind::Class)?;
            if kind == ClassType::ClassDeclaration {
                self.declare(name, BindingKind::Class, name_start, class_ctx)?;
            }
            Some(self.identifier_node()?)
        } else if kind == ClassType::ClassDeclaration && !default_export {
            return Err(self.error(&messages::CLASS_NAME_REQUIRED, &[]));
        } else {
            None
        };

        let super_class = if self.eat(Token::ExtendsKeyword)? {
            let heritage = self.parse_left_hand_side(class_ctx)?;
            self.validate_cover(heritage)?;
            Some(heritage)
        } else {
            None
        };

        let body = self.parse_class_body(class_ctx, super_class.is_some())?;
        self.assignable = false;
        self.destructible = DestructuringFlags::NONE;
        Ok(self.alloc(Class {
            kind,
            span: self.finish(start),
            id,
            super_class,
            body,
            decorators,
        }))
    }

    fn parse_class_body(&mut self, ctx: Context, derived: bool) -> ParseResult<&'a ClassBody<'a>> {
        let start = self.start();
        self.expect(Token::LeftBrace)?;
        self.private_names.enter_class();
        self.scopes.push(ScopeKind::CLASS);

        let mut elements = self.vec();
        let mut has_constructor = false;
        while self.token() != Token::RightBrace {
            if self.eat(Token::Semicolon)? {
                continue;
            }
            if self.token() == Token::EndOfSource {
                return Err(self.unexpected());
            }
            elements.push(self.parse_class_element(ctx, derived, &mut has_constructor)?);
        }
        self.next_token()?;

        self.scopes.pop();
        self.private_names.exit_class().map_err(|err| self.scope_error(err))?;
        Ok(self.alloc(ClassBody {
            span: self.finish(start),
            body: elements.into_bump_slice(),
        }))
    }

    /// A contextual word is a modifier only when something other than the
    /// end of a field follows it.
    fn at_element_modifier(&mut self, token: Token) -> bool {
        self.at_keyword(token) && !ends_class_field_name(self.peek().0)
    }

    fn parse_class_element(
        &mut self,
        ctx: Context,
        derived: bool,
        has_constructor: &mut bool,
    ) -> ParseResult<ClassElement<'a>> {
        let start = self.start();
        let decorators: &'a [Decorator<'a>] = if self.token() == Token::At && self.options.next {
            self.parse_decorators(ctx)?
        } else {
            &[]
        };

        let mut modifiers = ElementModifiers::default();
        if self.at_element_modifier(Token::StaticKeyword) {
            self.next_token()?;
            if self.token() == Token::LeftBrace {
                if !decorators.is_empty() {
                    return Err(self.error_at(&messages::INVALID_DECORATOR_POSITION, &[], start));
                }
                return self.parse_static_block(ctx, start);
            }
            modifiers.is_static = true;
        }
        if self.at_element_modifier(Token::AsyncKeyword) && !self.peek().1.has_preceding_line_break() {
            self.next_token()?;
            modifiers.is_async = true;
        }
        if self.eat(Token::Multiply)? {
            modifiers.generator = true;
        }
        if modifiers.is_plain() {
            if self.at_element_modifier(Token::GetKeyword) {
                self.next_token()?;
                modifiers.accessor = Some(MethodKind::Get);
            } else if self.at_element_modifier(Token::SetKeyword) {
                self.next_token()?;
                modifiers.accessor = Some(MethodKind::Set);
            }
        }

        let key_start = self.start();
        let (key, computed) = self.parse_property_key(ctx, true)?;
        let name = if computed { None } else { static_key_name(&key) };
        let private = match key {
            Expression::PrivateIdentifier(id) => Some(id.name),
            _ => None,
        };

        if modifiers.is_static && name == Some("prototype") {
            return Err(self.error_at(&messages::STATIC_PROTOTYPE, &[], key_start));
        }

        if self.token() == Token::LeftParen {
            let is_constructor = !modifiers.is_static && name == Some("constructor");
            let (kind, shape) = if is_constructor {
                if !modifiers.is_plain() {
                    return Err(self.error_at(&messages::INVALID_CONSTRUCTOR, &[modifiers.function_kind()], key_start));
                }
                if *has_constructor {
                    return Err(self.error_at(&messages::DUPLICATE_CONSTRUCTOR, &[], key_start));
                }
                *has_constructor = true;
                let shape = if derived {
                    MethodShape::DerivedConstructor
                } else {
                    MethodShape::Constructor
                };
                (MethodKind::Constructor, shape)
            } else {
                match modifiers.accessor {
                    Some(MethodKind::Get) => (MethodKind::Get, MethodShape::Getter),
                    Some(MethodKind::Set) => (MethodKind::Set, MethodShape::Setter),
                    _ => (MethodKind::Method, MethodShape::Method),
                }
            };

            if let Some(private_name) = private {
                let private_kind = match kind {
                    MethodKind::Get => PrivateNameKind::Getter,
                    MethodKind::Set => PrivateNameKind::Setter,
                    _ => PrivateNameKind::Method,
                };
                self.private_names
                    .declare(private_name, private_kind, modifiers.is_static, key_start)
                    .map_err(|err| self.scope_error(err))?;
            }

            let value = self.parse_method_function(ctx, modifiers.is_async, modifiers.generator, shape)?;
            return Ok(ClassElement::Method(self.alloc(MethodDefinition {
                span: self.finish(start),
                is_static: modifiers.is_static,
                computed,
                key,
                kind,
                value,
                decorators,
            })));
        }

        if !modifiers.is_plain() {
            return Err(self.unexpected());
        }
        if name == Some("constructor") {
            return Err(self.error_at(&messages::CONSTRUCTOR_FIELD, &[], key_start));
        }
        if let Some(private_name) = private {
            self.private_names
                .declare(private_name, PrivateNameKind::Field, modifiers.is_static, key_start)
                .map_err(|err| self.scope_error(err))?;
        }

        let value = if self.eat(Token::Assign)? {
            Some(self.parse_assignment_expression(initializer_context(ctx))?)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(ClassElement::Property(self.alloc(PropertyDefinition {
            span: self.finish(start),
            is_static: modifiers.is_static,
            computed,
            key,
            value,
            decorators,
        })))
    }

    /// `static { ... }`, positioned on the `{`.
    fn parse_static_block(&mut self, ctx: Context, start: u32) -> ParseResult<ClassElement<'a>> {
        self.expect(Token::LeftBrace)?;
        let block_ctx = initializer_context(ctx).with(Context::IN_STATIC_BLOCK);
        self.scopes.push(ScopeKind::STATIC_BLOCK);
        let saved_labels = self.labels.take();
        let saved_chain = self.label_chain.take();

        let mut body = self.vec();
        while self.token() != Token::RightBrace {
            if self.token() == Token::EndOfSource {
                return Err(self.unexpected());
            }
            body.push(self.parse_statement_list_item(block_ctx)?);
        }
        self.next_token()?;

        self.labels.restore(saved_labels);
        self.label_chain = saved_chain;
        self.scopes.pop();
        Ok(ClassElement::StaticBlock(self.alloc(StaticBlock {
            span: self.finish(start),
            body: body.into_bump_slice(),
        })))
    }

    // ========================================================================
    // Decorators
    // ========================================================================

    /// `@a.b(c)` or `@(expr)`, repeated.
    pub(crate) fn parse_decorators(&mut self, ctx: Context) -> ParseResult<&'a [Decorator<'a>]> {
        let mut decorators = self.vec();
        while self.token() == Token::At {
            let start = self.start();
            self.next_token()?;
            let expression = self.parse_decorator_expression(ctx)?;
            decorators.push(Decorator {
                span: self.finish(start),
                expression,
            });
        }
        Ok(decorators.into_bump_slice())
    }

    fn parse_decorator_expression(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let start = self.start();
        if self.token() == Token::LeftParen {
            self.next_token()?;
            let expr = self.parse_expression(ctx.without(Context::DISALLOW_IN))?;
            self.expect(Token::RightParen)?;
            return Ok(expr);
        }
        if !self.token().is_identifier() {
            return Err(self.unexpected());
        }
        let name_start = self.start();
        let name = self.token_value();
        self.check_identifier_reference(name, name_start, ctx)?;
        let mut expr = Expression::Identifier(self.identifier_node()?);
        while self.eat(Token::Dot)? {
            let property = self.parse_member_name()?;
            expr = self.member(start, expr, property, false, false);
        }
        if self.token() == Token::LeftParen {
            let arguments = self.parse_arguments(ctx)?;
            expr = self.call(start, expr, arguments, false);
        }
        Ok(expr)
    }
}

/// Context for field initializers and static blocks: a fresh function
/// boundary where `this` and `super.x` refer to the class.
fn initializer_context(ctx: Context) -> Context {
    ctx.without(Context::FUNCTION_RESET | Context::IN_DERIVED_CONSTRUCTOR | Context::IN_FUNCTION)
        .with(Context::IN_CLASS_FIELD | Context::IN_METHOD | Context::NEW_TARGET)
}
