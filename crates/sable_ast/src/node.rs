//! ESTree node definitions.
//!
//! Nodes are arena allocated; parents hold `&'a` references to children and
//! `&'a [T]` slices for lists. Each struct carries a [`NodeSpan`] and
//! serializes to the ESTree JSON shape with a `type` tag.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::token::Token;
use sable_core::text::{Span, TextPos};

// ============================================================================
// Spans
// ============================================================================

/// A 1-based line and 0-based column, as emitted in `loc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineColumn {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub start: LineColumn,
    pub end: LineColumn,
}

/// Source range of a node.
///
/// The offsets are always tracked. They are only emitted as
/// `start`/`end`/`range` when `ranged` is set, and `loc` only when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSpan {
    pub start: TextPos,
    pub end: TextPos,
    pub loc: Option<SourceLocation>,
    pub ranged: bool,
}

impl NodeSpan {
    pub fn new(start: TextPos, end: TextPos) -> Self {
        Self {
            start,
            end,
            loc: None,
            ranged: false,
        }
    }

    #[inline]
    pub fn range(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

impl Serialize for NodeSpan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if self.ranged {
            map.serialize_entry("start", &self.start)?;
            map.serialize_entry("end", &self.end)?;
            map.serialize_entry("range", &[self.start, self.end])?;
        }
        if let Some(loc) = &self.loc {
            map.serialize_entry("loc", loc)?;
        }
        map.end()
    }
}

/// Anything with a source range.
pub trait Spanned {
    fn span(&self) -> Span;

    fn start(&self) -> TextPos {
        self.span().start
    }

    fn end(&self) -> TextPos {
        self.span().end
    }
}

macro_rules! impl_spanned {
    ($($name:ident $(<$lt:lifetime>)?),* $(,)?) => {
        $(
            impl$(<$lt>)? Spanned for $name$(<$lt>)? {
                #[inline]
                fn span(&self) -> Span {
                    self.span.range()
                }
            }
        )*
    };
}

macro_rules! impl_spanned_enum {
    ($name:ident { $($variant:ident),* $(,)? }) => {
        impl<'a> Spanned for $name<'a> {
            fn span(&self) -> Span {
                match self {
                    $(Self::$variant(node) => node.span(),)*
                }
            }
        }
    };
}

fn is_empty_slice<T>(slice: &&[T]) -> bool {
    slice.is_empty()
}

// ============================================================================
// Program
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Script,
    Module,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Program<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub source_type: SourceType,
    pub body: &'a [Statement<'a>],
}

// ============================================================================
// Identifiers and literals
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct Identifier<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub name: &'a str,
}

/// `#name`; `name` excludes the `#`.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct PrivateIdentifier<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub name: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'a> {
    String(&'a str),
    Number(f64),
    Boolean(bool),
    Null,
    /// Serialized as `null`; the pattern lives in `regex`.
    RegExp,
    /// Serialized as `null`; the digits live in `bigint`.
    BigInt,
}

impl Serialize for LiteralValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            LiteralValue::String(s) => serializer.serialize_str(s),
            LiteralValue::Number(n) => {
                // Integral values print without a fraction, like JSON.stringify.
                if n.is_finite() && n.fract() == 0.0 && n.abs() <= 9_007_199_254_740_992.0 {
                    serializer.serialize_i64(n as i64)
                } else if n.is_finite() {
                    serializer.serialize_f64(n)
                } else {
                    serializer.serialize_unit()
                }
            }
            LiteralValue::Boolean(b) => serializer.serialize_bool(b),
            LiteralValue::Null | LiteralValue::RegExp | LiteralValue::BigInt => {
                serializer.serialize_unit()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegExpLiteral<'a> {
    pub pattern: &'a str,
    pub flags: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct Literal<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub value: LiteralValue<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<RegExpLiteral<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bigint: Option<&'a str>,
}

impl Literal<'_> {
    pub fn as_str(&self) -> Option<&str> {
        match self.value {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }
}

// ============================================================================
// Operators
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "===")]
    StrictEqual,
    #[serde(rename = "!==")]
    StrictNotEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "<<")]
    ShiftLeft,
    #[serde(rename = ">>")]
    ShiftRight,
    #[serde(rename = ">>>")]
    LogicalShiftRight,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Modulo,
    #[serde(rename = "**")]
    Exponentiate,
    #[serde(rename = "|")]
    BitwiseOr,
    #[serde(rename = "^")]
    BitwiseXor,
    #[serde(rename = "&")]
    BitwiseAnd,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    InstanceOf,
}

impl BinaryOperator {
    pub fn from_token(token: Token) -> Option<Self> {
        let op = match token {
            Token::LooseEqual => Self::Equal,
            Token::LooseNotEqual => Self::NotEqual,
            Token::StrictEqual => Self::StrictEqual,
            Token::StrictNotEqual => Self::StrictNotEqual,
            Token::LessThan => Self::LessThan,
            Token::LessThanOrEqual => Self::LessThanOrEqual,
            Token::GreaterThan => Self::GreaterThan,
            Token::GreaterThanOrEqual => Self::GreaterThanOrEqual,
            Token::ShiftLeft => Self::ShiftLeft,
            Token::ShiftRight => Self::ShiftRight,
            Token::LogicalShiftRight => Self::LogicalShiftRight,
            Token::Add => Self::Add,
            Token::Subtract => Self::Subtract,
            Token::Multiply => Self::Multiply,
            Token::Divide => Self::Divide,
            Token::Modulo => Self::Modulo,
            Token::Exponentiate => Self::Exponentiate,
            Token::BitwiseOr => Self::BitwiseOr,
            Token::BitwiseXor => Self::BitwiseXor,
            Token::BitwiseAnd => Self::BitwiseAnd,
            Token::InKeyword => Self::In,
            Token::InstanceOfKeyword => Self::InstanceOf,
            _ => return None,
        };
        Some(op)
    }

    pub fn token(self) -> Token {
        match self {
            Self::Equal => Token::LooseEqual,
            Self::NotEqual => Token::LooseNotEqual,
            Self::StrictEqual => Token::StrictEqual,
            Self::StrictNotEqual => Token::StrictNotEqual,
            Self::LessThan => Token::LessThan,
            Self::LessThanOrEqual => Token::LessThanOrEqual,
            Self::GreaterThan => Token::GreaterThan,
            Self::GreaterThanOrEqual => Token::GreaterThanOrEqual,
            Self::ShiftLeft => Token::ShiftLeft,
            Self::ShiftRight => Token::ShiftRight,
            Self::LogicalShiftRight => Token::LogicalShiftRight,
            Self::Add => Token::Add,
            Self::Subtract => Token::Subtract,
            Self::Multiply => Token::Multiply,
            Self::Divide => Token::Divide,
            Self::Modulo => Token::Modulo,
            Self::Exponentiate => Token::Exponentiate,
            Self::BitwiseOr => Token::BitwiseOr,
            Self::BitwiseXor => Token::BitwiseXor,
            Self::BitwiseAnd => Token::BitwiseAnd,
            Self::In => Token::InKeyword,
            Self::InstanceOf => Token::InstanceOfKeyword,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.token().text()
    }

    pub fn precedence(self) -> u8 {
        self.token().precedence()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "??")]
    Coalesce,
}

impl LogicalOperator {
    pub fn from_token(token: Token) -> Option<Self> {
        match token {
            Token::LogicalOr => Some(Self::Or),
            Token::LogicalAnd => Some(Self::And),
            Token::Coalesce => Some(Self::Coalesce),
            _ => None,
        }
    }

    pub fn token(self) -> Token {
        match self {
            Self::Or => Token::LogicalOr,
            Self::And => Token::LogicalAnd,
            Self::Coalesce => Token::Coalesce,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.token().text()
    }

    pub fn precedence(self) -> u8 {
        self.token().precedence()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "~")]
    BitwiseNot,
    #[serde(rename = "typeof")]
    Typeof,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

impl UnaryOperator {
    pub fn from_token(token: Token) -> Option<Self> {
        match token {
            Token::Subtract => Some(Self::Minus),
            Token::Add => Some(Self::Plus),
            Token::Negate => Some(Self::Not),
            Token::Complement => Some(Self::BitwiseNot),
            Token::TypeofKeyword => Some(Self::Typeof),
            Token::VoidKeyword => Some(Self::Void),
            Token::DeleteKeyword => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minus => "-",
            Self::Plus => "+",
            Self::Not => "!",
            Self::BitwiseNot => "~",
            Self::Typeof => "typeof",
            Self::Void => "void",
            Self::Delete => "delete",
        }
    }

    /// Keyword operators need a space before their operand.
    pub fn is_keyword(self) -> bool {
        matches!(self, Self::Typeof | Self::Void | Self::Delete)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl UpdateOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    Add,
    #[serde(rename = "-=")]
    Subtract,
    #[serde(rename = "*=")]
    Multiply,
    #[serde(rename = "/=")]
    Divide,
    #[serde(rename = "%=")]
    Modulo,
    #[serde(rename = "**=")]
    Exponentiate,
    #[serde(rename = "<<=")]
    ShiftLeft,
    #[serde(rename = ">>=")]
    ShiftRight,
    #[serde(rename = ">>>=")]
    LogicalShiftRight,
    #[serde(rename = "|=")]
    BitwiseOr,
    #[serde(rename = "^=")]
    BitwiseXor,
    #[serde(rename = "&=")]
    BitwiseAnd,
    #[serde(rename = "||=")]
    LogicalOr,
    #[serde(rename = "&&=")]
    LogicalAnd,
    #[serde(rename = "??=")]
    Coalesce,
}

impl AssignmentOperator {
    pub fn from_token(token: Token) -> Option<Self> {
        let op = match token {
            Token::Assign => Self::Assign,
            Token::AddAssign => Self::Add,
            Token::SubtractAssign => Self::Subtract,
            Token::MultiplyAssign => Self::Multiply,
            Token::DivideAssign => Self::Divide,
            Token::ModuloAssign => Self::Modulo,
            Token::ExponentiateAssign => Self::Exponentiate,
            Token::ShiftLeftAssign => Self::ShiftLeft,
            Token::ShiftRightAssign => Self::ShiftRight,
            Token::LogicalShiftRightAssign => Self::LogicalShiftRight,
            Token::BitwiseOrAssign => Self::BitwiseOr,
            Token::BitwiseXorAssign => Self::BitwiseXor,
            Token::BitwiseAndAssign => Self::BitwiseAnd,
            Token::LogicalOrAssign => Self::LogicalOr,
            Token::LogicalAndAssign => Self::LogicalAnd,
            Token::CoalesceAssign => Self::Coalesce,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Add => "+=",
            Self::Subtract => "-=",
            Self::Multiply => "*=",
            Self::Divide => "/=",
            Self::Modulo => "%=",
            Self::Exponentiate => "**=",
            Self::ShiftLeft => "<<=",
            Self::ShiftRight => ">>=",
            Self::LogicalShiftRight => ">>>=",
            Self::BitwiseOr => "|=",
            Self::BitwiseXor => "^=",
            Self::BitwiseAnd => "&=",
            Self::LogicalOr => "||=",
            Self::LogicalAnd => "&&=",
            Self::Coalesce => "??=",
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Expression<'a> {
    Identifier(&'a Identifier<'a>),
    PrivateIdentifier(&'a PrivateIdentifier<'a>),
    Literal(&'a Literal<'a>),
    This(&'a ThisExpression),
    Super(&'a Super),
    Array(&'a ArrayExpression<'a>),
    Object(&'a ObjectExpression<'a>),
    Function(&'a Function<'a>),
    ArrowFunction(&'a ArrowFunctionExpression<'a>),
    Class(&'a Class<'a>),
    Template(&'a TemplateLiteral<'a>),
    TaggedTemplate(&'a TaggedTemplateExpression<'a>),
    Member(&'a MemberExpression<'a>),
    Call(&'a CallExpression<'a>),
    New(&'a NewExpression<'a>),
    Chain(&'a ChainExpression<'a>),
    Update(&'a UpdateExpression<'a>),
    Unary(&'a UnaryExpression<'a>),
    Binary(&'a BinaryExpression<'a>),
    Logical(&'a LogicalExpression<'a>),
    Conditional(&'a ConditionalExpression<'a>),
    Assignment(&'a AssignmentExpression<'a>),
    Sequence(&'a SequenceExpression<'a>),
    Yield(&'a YieldExpression<'a>),
    Await(&'a AwaitExpression<'a>),
    Import(&'a ImportExpression<'a>),
    MetaProperty(&'a MetaProperty<'a>),
    Parenthesized(&'a ParenthesizedExpression<'a>),
    JsxElement(&'a JsxElement<'a>),
    JsxFragment(&'a JsxFragment<'a>),
}

impl_spanned_enum!(Expression {
    Identifier,
    PrivateIdentifier,
    Literal,
    This,
    Super,
    Array,
    Object,
    Function,
    ArrowFunction,
    Class,
    Template,
    TaggedTemplate,
    Member,
    Call,
    New,
    Chain,
    Update,
    Unary,
    Binary,
    Logical,
    Conditional,
    Assignment,
    Sequence,
    Yield,
    Await,
    Import,
    MetaProperty,
    Parenthesized,
    JsxElement,
    JsxFragment,
});

impl<'a> Expression<'a> {
    pub fn as_identifier(&self) -> Option<&'a Identifier<'a>> {
        match *self {
            Expression::Identifier(id) => Some(id),
            _ => None,
        }
    }

    /// Strip `ParenthesizedExpression` wrappers.
    pub fn without_parens(self) -> Expression<'a> {
        let mut expr = self;
        while let Expression::Parenthesized(paren) = expr {
            expr = paren.expression;
        }
        expr
    }

    pub fn is_string_literal(&self) -> bool {
        matches!(self, Expression::Literal(lit) if lit.as_str().is_some())
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ThisExpression {
    #[serde(flatten)]
    pub span: NodeSpan,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct Super {
    #[serde(flatten)]
    pub span: NodeSpan,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ExpressionOrSpread<'a> {
    Expression(Expression<'a>),
    Spread(&'a SpreadElement<'a>),
}

impl Spanned for ExpressionOrSpread<'_> {
    fn span(&self) -> Span {
        match self {
            Self::Expression(expr) => expr.span(),
            Self::Spread(spread) => spread.span(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct SpreadElement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub argument: Expression<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ArrayExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub elements: &'a [Option<ExpressionOrSpread<'a>>],
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ObjectMember<'a> {
    Property(&'a Property<'a>),
    Spread(&'a SpreadElement<'a>),
}

impl_spanned_enum!(ObjectMember { Property, Spread });

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ObjectExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub properties: &'a [ObjectMember<'a>],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

/// A property of an object literal.
///
/// A shorthand with an initializer (`{ a = 1 }`) is only valid once the
/// literal becomes a pattern; until then `value` holds an assignment.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct Property<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub key: Expression<'a>,
    pub value: Expression<'a>,
    pub kind: PropertyKind,
    pub method: bool,
    pub shorthand: bool,
    pub computed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FunctionType {
    FunctionDeclaration,
    FunctionExpression,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Function<'a> {
    #[serde(rename = "type")]
    pub kind: FunctionType,
    #[serde(flatten)]
    pub span: NodeSpan,
    pub id: Option<&'a Identifier<'a>>,
    pub expression: bool,
    pub generator: bool,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub params: &'a [Pattern<'a>],
    pub body: &'a BlockStatement<'a>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ArrowBody<'a> {
    Expression(Expression<'a>),
    Block(&'a BlockStatement<'a>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ArrowFunctionExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub id: Option<&'a Identifier<'a>>,
    pub expression: bool,
    pub generator: bool,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub params: &'a [Pattern<'a>],
    pub body: ArrowBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct TemplateLiteral<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub quasis: &'a [TemplateElement<'a>],
    pub expressions: &'a [Expression<'a>],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TemplateElementValue<'a> {
    pub raw: &'a str,
    /// `None` for a tagged template chunk with an invalid escape.
    pub cooked: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct TemplateElement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub value: TemplateElementValue<'a>,
    pub tail: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct TaggedTemplateExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub tag: Expression<'a>,
    pub quasi: &'a TemplateLiteral<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct MemberExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub object: Expression<'a>,
    pub property: Expression<'a>,
    pub computed: bool,
    pub optional: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct CallExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub callee: Expression<'a>,
    pub arguments: &'a [ExpressionOrSpread<'a>],
    pub optional: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct NewExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub callee: Expression<'a>,
    pub arguments: &'a [ExpressionOrSpread<'a>],
}

/// Boundary of an optional chain; wraps the outermost member or call.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ChainExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub expression: Expression<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct UpdateExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub argument: Expression<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct UnaryExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub operator: UnaryOperator,
    pub prefix: bool,
    pub argument: Expression<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct BinaryExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub left: Expression<'a>,
    pub operator: BinaryOperator,
    pub right: Expression<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct LogicalExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub left: Expression<'a>,
    pub operator: LogicalOperator,
    pub right: Expression<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ConditionalExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub test: Expression<'a>,
    pub consequent: Expression<'a>,
    pub alternate: Expression<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct AssignmentExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub operator: AssignmentOperator,
    pub left: Pattern<'a>,
    pub right: Expression<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct SequenceExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub expressions: &'a [Expression<'a>],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct YieldExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub delegate: bool,
    pub argument: Option<Expression<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct AwaitExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub argument: Expression<'a>,
}

/// `import(source)` or `import(source, options)`.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ImportExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub source: Expression<'a>,
    pub options: Option<Expression<'a>>,
}

/// `new.target` or `import.meta`.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct MetaProperty<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub meta: &'a Identifier<'a>,
    pub property: &'a Identifier<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ParenthesizedExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub expression: Expression<'a>,
}

// ============================================================================
// Patterns
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Pattern<'a> {
    Identifier(&'a Identifier<'a>),
    Object(&'a ObjectPattern<'a>),
    Array(&'a ArrayPattern<'a>),
    Rest(&'a RestElement<'a>),
    Assignment(&'a AssignmentPattern<'a>),
    /// Only valid in assignment patterns.
    Member(&'a MemberExpression<'a>),
}

impl_spanned_enum!(Pattern {
    Identifier,
    Object,
    Array,
    Rest,
    Assignment,
    Member,
});

impl Pattern<'_> {
    /// A parameter list with only plain identifiers is simple.
    pub fn is_simple_parameter(&self) -> bool {
        matches!(self, Pattern::Identifier(_))
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ObjectPatternProperty<'a> {
    Property(&'a AssignmentProperty<'a>),
    Rest(&'a RestElement<'a>),
}

impl_spanned_enum!(ObjectPatternProperty { Property, Rest });

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ObjectPattern<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub properties: &'a [ObjectPatternProperty<'a>],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "Property")]
pub struct AssignmentProperty<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub key: Expression<'a>,
    pub value: Pattern<'a>,
    pub kind: PropertyKind,
    pub method: bool,
    pub shorthand: bool,
    pub computed: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ArrayPattern<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub elements: &'a [Option<Pattern<'a>>],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct RestElement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub argument: Pattern<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct AssignmentPattern<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub left: Pattern<'a>,
    pub right: Expression<'a>,
}

// ============================================================================
// Classes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassType {
    ClassDeclaration,
    ClassExpression,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Class<'a> {
    #[serde(rename = "type")]
    pub kind: ClassType,
    #[serde(flatten)]
    pub span: NodeSpan,
    pub id: Option<&'a Identifier<'a>>,
    pub super_class: Option<Expression<'a>>,
    pub body: &'a ClassBody<'a>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub decorators: &'a [Decorator<'a>],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ClassBody<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub body: &'a [ClassElement<'a>],
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ClassElement<'a> {
    Method(&'a MethodDefinition<'a>),
    Property(&'a PropertyDefinition<'a>),
    StaticBlock(&'a StaticBlock<'a>),
}

impl_spanned_enum!(ClassElement {
    Method,
    Property,
    StaticBlock,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct MethodDefinition<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub computed: bool,
    pub key: Expression<'a>,
    pub kind: MethodKind,
    pub value: &'a Function<'a>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub decorators: &'a [Decorator<'a>],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct PropertyDefinition<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub computed: bool,
    pub key: Expression<'a>,
    pub value: Option<Expression<'a>>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub decorators: &'a [Decorator<'a>],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct StaticBlock<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub body: &'a [Statement<'a>],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct Decorator<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub expression: Expression<'a>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Statement<'a> {
    Expression(&'a ExpressionStatement<'a>),
    Block(&'a BlockStatement<'a>),
    Empty(&'a EmptyStatement),
    Debugger(&'a DebuggerStatement),
    With(&'a WithStatement<'a>),
    Return(&'a ReturnStatement<'a>),
    Labeled(&'a LabeledStatement<'a>),
    Break(&'a BreakStatement<'a>),
    Continue(&'a ContinueStatement<'a>),
    If(&'a IfStatement<'a>),
    Switch(&'a SwitchStatement<'a>),
    Throw(&'a ThrowStatement<'a>),
    Try(&'a TryStatement<'a>),
    While(&'a WhileStatement<'a>),
    DoWhile(&'a DoWhileStatement<'a>),
    For(&'a ForStatement<'a>),
    ForIn(&'a ForInStatement<'a>),
    ForOf(&'a ForOfStatement<'a>),
    Variable(&'a VariableDeclaration<'a>),
    Function(&'a Function<'a>),
    Class(&'a Class<'a>),
    Import(&'a ImportDeclaration<'a>),
    ExportNamed(&'a ExportNamedDeclaration<'a>),
    ExportDefault(&'a ExportDefaultDeclaration<'a>),
    ExportAll(&'a ExportAllDeclaration<'a>),
}

impl_spanned_enum!(Statement {
    Expression,
    Block,
    Empty,
    Debugger,
    With,
    Return,
    Labeled,
    Break,
    Continue,
    If,
    Switch,
    Throw,
    Try,
    While,
    DoWhile,
    For,
    ForIn,
    ForOf,
    Variable,
    Function,
    Class,
    Import,
    ExportNamed,
    ExportDefault,
    ExportAll,
});

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ExpressionStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub expression: Expression<'a>,
    /// Raw text of a directive-prologue string, without quotes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct BlockStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub body: &'a [Statement<'a>],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct EmptyStatement {
    #[serde(flatten)]
    pub span: NodeSpan,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct DebuggerStatement {
    #[serde(flatten)]
    pub span: NodeSpan,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct WithStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub object: Expression<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ReturnStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub argument: Option<Expression<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct LabeledStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub label: &'a Identifier<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct BreakStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub label: Option<&'a Identifier<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ContinueStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub label: Option<&'a Identifier<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct IfStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub test: Expression<'a>,
    pub consequent: Statement<'a>,
    pub alternate: Option<Statement<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct SwitchStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub discriminant: Expression<'a>,
    pub cases: &'a [SwitchCase<'a>],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct SwitchCase<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    /// `None` for `default:`.
    pub test: Option<Expression<'a>>,
    pub consequent: &'a [Statement<'a>],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ThrowStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub argument: Expression<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct TryStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub block: &'a BlockStatement<'a>,
    pub handler: Option<&'a CatchClause<'a>>,
    pub finalizer: Option<&'a BlockStatement<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct CatchClause<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub param: Option<Pattern<'a>>,
    pub body: &'a BlockStatement<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct WhileStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub test: Expression<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct DoWhileStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub body: Statement<'a>,
    pub test: Expression<'a>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ForInit<'a> {
    Variable(&'a VariableDeclaration<'a>),
    Expression(Expression<'a>),
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ForTarget<'a> {
    Variable(&'a VariableDeclaration<'a>),
    Pattern(Pattern<'a>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ForStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub init: Option<ForInit<'a>>,
    pub test: Option<Expression<'a>>,
    pub update: Option<Expression<'a>>,
    pub body: Statement<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ForInStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub left: ForTarget<'a>,
    pub right: Expression<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ForOfStatement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    #[serde(rename = "await")]
    pub is_await: bool,
    pub left: ForTarget<'a>,
    pub right: Expression<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct VariableDeclaration<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub declarations: &'a [VariableDeclarator<'a>],
    pub kind: VariableKind,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct VariableDeclarator<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub id: Pattern<'a>,
    pub init: Option<Expression<'a>>,
}

// ============================================================================
// Modules
// ============================================================================

/// An export or import name: an identifier or a string literal.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ModuleExportName<'a> {
    Identifier(&'a Identifier<'a>),
    Literal(&'a Literal<'a>),
}

impl_spanned_enum!(ModuleExportName { Identifier, Literal });

impl<'a> ModuleExportName<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            ModuleExportName::Identifier(id) => id.name,
            ModuleExportName::Literal(lit) => lit.as_str().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ImportAttribute<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub key: ModuleExportName<'a>,
    pub value: &'a Literal<'a>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ImportDeclarationSpecifier<'a> {
    Specifier(&'a ImportSpecifier<'a>),
    Default(&'a ImportDefaultSpecifier<'a>),
    Namespace(&'a ImportNamespaceSpecifier<'a>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ImportSpecifier<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub imported: ModuleExportName<'a>,
    pub local: &'a Identifier<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ImportDefaultSpecifier<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub local: &'a Identifier<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ImportNamespaceSpecifier<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub local: &'a Identifier<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ImportDeclaration<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub specifiers: &'a [ImportDeclarationSpecifier<'a>],
    pub source: &'a Literal<'a>,
    pub attributes: &'a [ImportAttribute<'a>],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ExportSpecifier<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub local: ModuleExportName<'a>,
    pub exported: ModuleExportName<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ExportNamedDeclaration<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub declaration: Option<Statement<'a>>,
    pub specifiers: &'a [ExportSpecifier<'a>],
    pub source: Option<&'a Literal<'a>>,
    pub attributes: &'a [ImportAttribute<'a>],
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ExportDefaultKind<'a> {
    Function(&'a Function<'a>),
    Class(&'a Class<'a>),
    Expression(Expression<'a>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ExportDefaultDeclaration<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub declaration: ExportDefaultKind<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub struct ExportAllDeclaration<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub exported: Option<ModuleExportName<'a>>,
    pub source: &'a Literal<'a>,
    pub attributes: &'a [ImportAttribute<'a>],
}

// ============================================================================
// Markup
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXIdentifier")]
pub struct JsxIdentifier<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXNamespacedName")]
pub struct JsxNamespacedName<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub namespace: &'a JsxIdentifier<'a>,
    pub name: &'a JsxIdentifier<'a>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum JsxMemberObject<'a> {
    Identifier(&'a JsxIdentifier<'a>),
    Member(&'a JsxMemberExpression<'a>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXMemberExpression")]
pub struct JsxMemberExpression<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub object: JsxMemberObject<'a>,
    pub property: &'a JsxIdentifier<'a>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum JsxElementName<'a> {
    Identifier(&'a JsxIdentifier<'a>),
    Namespaced(&'a JsxNamespacedName<'a>),
    Member(&'a JsxMemberExpression<'a>),
}

impl_spanned_enum!(JsxElementName {
    Identifier,
    Namespaced,
    Member,
});

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXElement", rename_all = "camelCase")]
pub struct JsxElement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub opening_element: &'a JsxOpeningElement<'a>,
    pub closing_element: Option<&'a JsxClosingElement<'a>>,
    pub children: &'a [JsxChild<'a>],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXOpeningElement", rename_all = "camelCase")]
pub struct JsxOpeningElement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub name: JsxElementName<'a>,
    pub attributes: &'a [JsxAttributeItem<'a>],
    pub self_closing: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXClosingElement")]
pub struct JsxClosingElement<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub name: JsxElementName<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXFragment", rename_all = "camelCase")]
pub struct JsxFragment<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub opening_fragment: &'a JsxOpeningFragment,
    pub closing_fragment: &'a JsxClosingFragment,
    pub children: &'a [JsxChild<'a>],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXOpeningFragment")]
pub struct JsxOpeningFragment {
    #[serde(flatten)]
    pub span: NodeSpan,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXClosingFragment")]
pub struct JsxClosingFragment {
    #[serde(flatten)]
    pub span: NodeSpan,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum JsxAttributeItem<'a> {
    Attribute(&'a JsxAttribute<'a>),
    Spread(&'a JsxSpreadAttribute<'a>),
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum JsxAttributeName<'a> {
    Identifier(&'a JsxIdentifier<'a>),
    Namespaced(&'a JsxNamespacedName<'a>),
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum JsxAttributeValue<'a> {
    String(&'a Literal<'a>),
    Expression(&'a JsxExpressionContainer<'a>),
    Element(&'a JsxElement<'a>),
    Fragment(&'a JsxFragment<'a>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXAttribute")]
pub struct JsxAttribute<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub name: JsxAttributeName<'a>,
    pub value: Option<JsxAttributeValue<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXSpreadAttribute")]
pub struct JsxSpreadAttribute<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub argument: Expression<'a>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum JsxExpression<'a> {
    Expression(Expression<'a>),
    Empty(&'a JsxEmptyExpression),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXExpressionContainer")]
pub struct JsxExpressionContainer<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub expression: JsxExpression<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXEmptyExpression")]
pub struct JsxEmptyExpression {
    #[serde(flatten)]
    pub span: NodeSpan,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXText")]
pub struct JsxText<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub value: &'a str,
    pub raw: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "JSXSpreadChild")]
pub struct JsxSpreadChild<'a> {
    #[serde(flatten)]
    pub span: NodeSpan,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum JsxChild<'a> {
    Text(&'a JsxText<'a>),
    Element(&'a JsxElement<'a>),
    Fragment(&'a JsxFragment<'a>),
    Expression(&'a JsxExpressionContainer<'a>),
    Spread(&'a JsxSpreadChild<'a>),
}

impl_spanned!(
    Program<'a>,
    Identifier<'a>,
    PrivateIdentifier<'a>,
    Literal<'a>,
    ThisExpression,
    Super,
    SpreadElement<'a>,
    ArrayExpression<'a>,
    ObjectExpression<'a>,
    Property<'a>,
    Function<'a>,
    ArrowFunctionExpression<'a>,
    TemplateLiteral<'a>,
    TemplateElement<'a>,
    TaggedTemplateExpression<'a>,
    MemberExpression<'a>,
    CallExpression<'a>,
    NewExpression<'a>,
    ChainExpression<'a>,
    UpdateExpression<'a>,
    UnaryExpression<'a>,
    BinaryExpression<'a>,
    LogicalExpression<'a>,
    ConditionalExpression<'a>,
    AssignmentExpression<'a>,
    SequenceExpression<'a>,
    YieldExpression<'a>,
    AwaitExpression<'a>,
    ImportExpression<'a>,
    MetaProperty<'a>,
    ParenthesizedExpression<'a>,
    ObjectPattern<'a>,
    AssignmentProperty<'a>,
    ArrayPattern<'a>,
    RestElement<'a>,
    AssignmentPattern<'a>,
    Class<'a>,
    ClassBody<'a>,
    MethodDefinition<'a>,
    PropertyDefinition<'a>,
    StaticBlock<'a>,
    Decorator<'a>,
    ExpressionStatement<'a>,
    BlockStatement<'a>,
    EmptyStatement,
    DebuggerStatement,
    WithStatement<'a>,
    ReturnStatement<'a>,
    LabeledStatement<'a>,
    BreakStatement<'a>,
    ContinueStatement<'a>,
    IfStatement<'a>,
    SwitchStatement<'a>,
    SwitchCase<'a>,
    ThrowStatement<'a>,
    TryStatement<'a>,
    CatchClause<'a>,
    WhileStatement<'a>,
    DoWhileStatement<'a>,
    ForStatement<'a>,
    ForInStatement<'a>,
    ForOfStatement<'a>,
    VariableDeclaration<'a>,
    VariableDeclarator<'a>,
    ImportAttribute<'a>,
    ImportSpecifier<'a>,
    ImportDefaultSpecifier<'a>,
    ImportNamespaceSpecifier<'a>,
    ImportDeclaration<'a>,
    ExportSpecifier<'a>,
    ExportNamedDeclaration<'a>,
    ExportDefaultDeclaration<'a>,
    ExportAllDeclaration<'a>,
    JsxIdentifier<'a>,
    JsxNamespacedName<'a>,
    JsxMemberExpression<'a>,
    JsxElement<'a>,
    JsxOpeningElement<'a>,
    JsxClosingElement<'a>,
    JsxFragment<'a>,
    JsxOpeningFragment,
    JsxClosingFragment,
    JsxAttribute<'a>,
    JsxSpreadAttribute<'a>,
    JsxExpressionContainer<'a>,
    JsxEmptyExpression,
    JsxText<'a>,
    JsxSpreadChild<'a>,
);
