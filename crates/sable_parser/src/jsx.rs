//! Markup elements and fragments.

use sable_ast::*;
use sable_diagnostics::{messages, ParseResult};

use crate::context::Context;
use crate::parser::Parser;

/// An element or fragment, before it is wrapped for its parent.
enum MarkupNode<'a> {
    Element(&'a JsxElement<'a>),
    Fragment(&'a JsxFragment<'a>),
}

/// What the token after a finished element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkupExit {
    Expression,
    Child,
    Attribute,
}

impl<'a, 'o> Parser<'a, 'o> {
    /// A markup element or fragment in expression position, on the `<`.
    pub(crate) fn parse_jsx_expression(&mut self, ctx: Context) -> ParseResult<Expression<'a>> {
        let node = self.parse_markup(ctx, MarkupExit::Expression)?;
        if self.token() == Token::LessThan {
            return Err(self.error(&messages::JSX_ADJACENT_ELEMENTS, &[]));
        }
        self.assignable = false;
        Ok(match node {
            MarkupNode::Element(element) => Expression::JsxElement(element),
            MarkupNode::Fragment(fragment) => Expression::JsxFragment(fragment),
        })
    }

    /// Advance past an element's final `>`.
    fn leave_tag(&mut self, exit: MarkupExit) -> ParseResult<Token> {
        match exit {
            MarkupExit::Expression => self.next_token(),
            MarkupExit::Child => self.next_markup_child(),
            MarkupExit::Attribute => self.next_markup_token(),
        }
    }

    fn parse_markup(&mut self, ctx: Context, exit: MarkupExit) -> ParseResult<MarkupNode<'a>> {
        self.enter_nesting()?;
        let start = self.start();
        self.next_markup_token()?;

        if self.token() == Token::GreaterThan {
            let opening_fragment = self.alloc(JsxOpeningFragment {
                span: self.span(start, self.scanner.token_end()),
            });
            self.next_markup_child()?;
            let children = self.parse_markup_children(ctx)?;
            let closing_start = self.start();
            self.next_markup_token()?;
            self.next_markup_token()?;
            if self.token() != Token::GreaterThan {
                return Err(self.error(&messages::JSX_CLOSING_TAG_MISMATCH, &["<>"]));
            }
            let closing_fragment = self.alloc(JsxClosingFragment {
                span: self.span(closing_start, self.scanner.token_end()),
            });
            self.leave_tag(exit)?;
            self.leave_nesting();
            return Ok(MarkupNode::Fragment(self.alloc(JsxFragment {
                span: self.finish(start),
                opening_fragment,
                closing_fragment,
                children,
            })));
        }

        let name = self.parse_markup_name()?;
        let attributes = self.parse_markup_attributes(ctx)?;
        let self_closing = self.token() == Token::Divide;
        if self_closing {
            self.next_markup_token()?;
        }
        if self.token() != Token::GreaterThan {
            return Err(self.unexpected());
        }
        let opening_element = self.alloc(JsxOpeningElement {
            span: self.span(start, self.scanner.token_end()),
            name,
            attributes,
            self_closing,
        });

        if self_closing {
            self.leave_tag(exit)?;
            self.leave_nesting();
            return Ok(MarkupNode::Element(self.alloc(JsxElement {
                span: self.finish(start),
                opening_element,
                closing_element: None,
                children: &[],
            })));
        }

        self.next_markup_child()?;
        let children = self.parse_markup_children(ctx)?;
        let closing_start = self.start();
        self.next_markup_token()?;
        self.next_markup_token()?;
        let closing_name = if self.token() == Token::GreaterThan {
            None
        } else {
            Some(self.parse_markup_name()?)
        };
        let expected = markup_name_text(name);
        if closing_name.map(markup_name_text).as_deref() != Some(expected.as_str()) {
            return Err(self.error_at(&messages::JSX_CLOSING_TAG_MISMATCH, &[&expected], closing_start));
        }
        if self.token() != Token::GreaterThan {
            return Err(self.unexpected());
        }
        let closing_element = self.alloc(JsxClosingElement {
            span: self.span(closing_start, self.scanner.token_end()),
            name: closing_name.unwrap_or(name),
        });
        self.leave_tag(exit)?;
        self.leave_nesting();
        Ok(MarkupNode::Element(self.alloc(JsxElement {
            span: self.finish(start),
            opening_element,
            closing_element: Some(closing_element),
            children,
        })))
    }

    /// Children up to the `<` of the closing tag, which stays current.
    fn parse_markup_children(&mut self, ctx: Context) -> ParseResult<&'a [JsxChild<'a>]> {
        let mut children = self.vec();
        loop {
            let start = self.start();
            match self.token() {
                Token::JsxText => {
                    let value = self.token_value();
                    let raw = self.scanner.token_raw();
                    let end = self.scanner.token_end();
                    children.push(JsxChild::Text(self.alloc(JsxText {
                        span: self.span(start, end),
                        value,
                        raw,
                    })));
                    self.next_markup_child()?;
                }
                Token::LeftBrace => children.push(self.parse_markup_child_expression(ctx)?),
                Token::LessThan => {
                    if self.peek().0 == Token::Divide {
                        break;
                    }
                    children.push(match self.parse_markup(ctx, MarkupExit::Child)? {
                        MarkupNode::Element(element) => JsxChild::Element(element),
                        MarkupNode::Fragment(fragment) => JsxChild::Fragment(fragment),
                    });
                }
                Token::EndOfSource => return Err(self.error(&messages::JSX_UNTERMINATED, &[])),
                _ => return Err(self.unexpected()),
            }
        }
        Ok(children.into_bump_slice())
    }

    /// `{expr}`, `{...expr}` or `{}` among children.
    fn parse_markup_child_expression(&mut self, ctx: Context) -> ParseResult<JsxChild<'a>> {
        let start = self.start();
        let inner_start = self.scanner.token_end();
        self.next_token()?;
        let inner = ctx.without(Context::DISALLOW_IN);

        if self.eat(Token::Ellipsis)? {
            let expression = self.parse_expression(inner)?;
            self.expect_markup_close_brace()?;
            let span = self.span(start, self.scanner.token_end());
            self.next_markup_child()?;
            return Ok(JsxChild::Spread(self.alloc(JsxSpreadChild { span, expression })));
        }

        let expression = if self.token() == Token::RightBrace {
            JsxExpression::Empty(self.alloc(JsxEmptyExpression {
                span: self.span(inner_start, self.start()),
            }))
        } else {
            JsxExpression::Expression(self.parse_expression(inner)?)
        };
        self.expect_markup_close_brace()?;
        let span = self.span(start, self.scanner.token_end());
        self.next_markup_child()?;
        Ok(JsxChild::Expression(self.alloc(JsxExpressionContainer { span, expression })))
    }

    fn expect_markup_close_brace(&self) -> ParseResult<()> {
        if self.token() == Token::RightBrace {
            Ok(())
        } else {
            Err(self.error(&messages::EXPECTED_TOKEN, &["}"]))
        }
    }

    // ========================================================================
    // Names and attributes
    // ========================================================================

    /// A word of a markup name, which may contain `-`.
    fn parse_markup_identifier(&mut self) -> ParseResult<&'a JsxIdentifier<'a>> {
        if !self.token().is_word() {
            return Err(self.error(&messages::IDENTIFIER_EXPECTED, &[]));
        }
        self.scanner.scan_jsx_identifier();
        let start = self.start();
        let end = self.scanner.token_end();
        let name = self.token_value();
        self.next_markup_token()?;
        Ok(self.alloc(JsxIdentifier {
            span: self.span(start, end),
            name,
        }))
    }

    fn parse_markup_name(&mut self) -> ParseResult<JsxElementName<'a>> {
        let start = self.start();
        let first = self.parse_markup_identifier()?;
        if self.token() == Token::Colon {
            self.next_markup_token()?;
            let name = self.parse_markup_identifier()?;
            return Ok(JsxElementName::Namespaced(self.alloc(JsxNamespacedName {
                span: self.finish(start),
                namespace: first,
                name,
            })));
        }
        let mut object = JsxMemberObject::Identifier(first);
        let mut member = None;
        while self.token() == Token::Dot {
            self.next_markup_token()?;
            let property = self.parse_markup_identifier()?;
            let expr = self.alloc(JsxMemberExpression {
                span: self.finish(start),
                object,
                property,
            });
            object = JsxMemberObject::Member(expr);
            member = Some(expr);
        }
        Ok(match member {
            Some(expr) => JsxElementName::Member(expr),
            None => JsxElementName::Identifier(first),
        })
    }

    /// Attributes up to the `/` or `>` that ends the opening tag.
    fn parse_markup_attributes(&mut self, ctx: Context) -> ParseResult<&'a [JsxAttributeItem<'a>]> {
        let mut attributes = self.vec();
        loop {
            let start = self.start();
            match self.token() {
                Token::Divide | Token::GreaterThan => break,
                Token::LeftBrace => {
                    self.next_token()?;
                    self.expect(Token::Ellipsis)?;
                    let argument = self.parse_assignment_expression(ctx.without(Context::DISALLOW_IN))?;
                    self.expect_markup_close_brace()?;
                    let span = self.span(start, self.scanner.token_end());
                    self.next_markup_token()?;
                    attributes.push(JsxAttributeItem::Spread(self.alloc(JsxSpreadAttribute { span, argument })));
                }
                token if token.is_word() => {
                    let first = self.parse_markup_identifier()?;
                    let name = if self.token() == Token::Colon {
                        self.next_markup_token()?;
                        let local = self.parse_markup_identifier()?;
                        JsxAttributeName::Namespaced(self.alloc(JsxNamespacedName {
                            span: self.finish(start),
                            namespace: first,
                            name: local,
                        }))
                    } else {
                        JsxAttributeName::Identifier(first)
                    };
                    let value = if self.token() == Token::Assign {
                        self.next_markup_attribute_value()?;
                        Some(self.parse_markup_attribute_value(ctx)?)
                    } else {
                        None
                    };
                    attributes.push(JsxAttributeItem::Attribute(self.alloc(JsxAttribute {
                        span: self.finish(start),
                        name,
                        value,
                    })));
                }
                Token::EndOfSource => return Err(self.error(&messages::JSX_UNTERMINATED, &[])),
                _ => return Err(self.unexpected()),
            }
        }
        Ok(attributes.into_bump_slice())
    }

    fn parse_markup_attribute_value(&mut self, ctx: Context) -> ParseResult<JsxAttributeValue<'a>> {
        let start = self.start();
        match self.token() {
            Token::StringLiteral => {
                let value = self.token_value();
                let raw = self.literal_raw();
                let end = self.scanner.token_end();
                self.next_markup_token()?;
                Ok(JsxAttributeValue::String(self.alloc(Literal {
                    span: self.span(start, end),
                    value: LiteralValue::String(value),
                    raw,
                    regex: None,
                    bigint: None,
                })))
            }
            Token::LeftBrace => {
                self.next_token()?;
                if self.token() == Token::RightBrace {
                    return Err(self.error_at(&messages::JSX_EMPTY_ATTRIBUTE_EXPRESSION, &[], start));
                }
                let expression = self.parse_assignment_expression(ctx.without(Context::DISALLOW_IN))?;
                self.expect_markup_close_brace()?;
                let span = self.span(start, self.scanner.token_end());
                self.next_markup_token()?;
                Ok(JsxAttributeValue::Expression(self.alloc(JsxExpressionContainer {
                    span,
                    expression: JsxExpression::Expression(expression),
                })))
            }
            Token::LessThan => Ok(match self.parse_markup(ctx, MarkupExit::Attribute)? {
                MarkupNode::Element(element) => JsxAttributeValue::Element(element),
                MarkupNode::Fragment(fragment) => JsxAttributeValue::Fragment(fragment),
            }),
            _ => Err(self.unexpected()),
        }
    }
}

/// Source form of a tag name, for matching opening and closing tags.
fn markup_name_text(name: JsxElementName<'_>) -> String {
    match name {
        JsxElementName::Identifier(id) => id.name.to_string(),
        JsxElementName::Namespaced(ns) => format!("{}:{}", ns.namespace.name, ns.name.name),
        JsxElementName::Member(member) => {
            let mut text = member_object_text(member.object);
            text.push('.');
            text.push_str(member.property.name);
            text
        }
    }
}

fn member_object_text(object: JsxMemberObject<'_>) -> String {
    match object {
        JsxMemberObject::Identifier(id) => id.name.to_string(),
        JsxMemberObject::Member(member) => {
            let mut text = member_object_text(member.object);
            text.push('.');
            text.push_str(member.property.name);
            text
        }
    }
}
