//! Token kinds produced by the scanner.
//!
//! Each discriminant packs three things: a unique index in the low byte, a
//! binary-operator precedence in bits 8..12, and category bits above that.
//! Dispatch in the parser matches on the enum; the packed bits only serve the
//! hot category tests and precedence comparisons.

/// Bit layout of a [`Token`] discriminant.
pub mod bits {
    pub const PRECEDENCE_SHIFT: u32 = 8;
    pub const PRECEDENCE_MASK: u32 = 0xF << PRECEDENCE_SHIFT;

    pub const BINARY: u32 = 1 << 12;
    pub const ASSIGN: u32 = 1 << 13;
    pub const UPDATE: u32 = 1 << 14;
    pub const UNARY: u32 = 1 << 15;
    /// Usable as an identifier reference or binding in at least one context.
    pub const IDENTIFIER: u32 = 1 << 16;
    /// Reserved in every context.
    pub const RESERVED: u32 = 1 << 17;
    /// Reserved in strict mode code only.
    pub const STRICT_RESERVED: u32 = 1 << 18;
    /// Identifier that has special meaning in some positions.
    pub const CONTEXTUAL: u32 = 1 << 19;
    pub const PATTERN_START: u32 = 1 << 20;
    pub const LOGICAL: u32 = 1 << 21;
    pub const COALESCE: u32 = 1 << 22;
    pub const LITERAL: u32 = 1 << 23;
    pub const MEMBER_OR_CALL: u32 = 1 << 24;
    /// Any IdentifierName: identifiers and all keywords.
    pub const WORD: u32 = 1 << 25;
    /// Right-associative binary operator (`**`).
    pub const RIGHT_ASSOCIATIVE: u32 = 1 << 26;
    pub const TEMPLATE: u32 = 1 << 27;

    pub const fn prec(level: u32) -> u32 {
        level << PRECEDENCE_SHIFT
    }
}

use bits::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Token {
    // ========================================================================
    // Structural
    // ========================================================================
    EndOfSource = 0,
    Identifier = 1 | IDENTIFIER | WORD,
    PrivateName = 2,
    StringLiteral = 3 | LITERAL,
    NumericLiteral = 4 | LITERAL,
    BigIntLiteral = 5 | LITERAL,
    RegularExpression = 6 | LITERAL,
    NoSubstitutionTemplate = 7 | TEMPLATE | MEMBER_OR_CALL,
    TemplateHead = 8 | TEMPLATE | MEMBER_OR_CALL,
    TemplateMiddle = 9 | TEMPLATE,
    TemplateTail = 10 | TEMPLATE,
    JsxText = 11,

    // ========================================================================
    // Punctuation
    // ========================================================================
    LeftBrace = 20 | PATTERN_START,
    RightBrace = 21,
    LeftParen = 22 | MEMBER_OR_CALL,
    RightParen = 23,
    LeftBracket = 24 | PATTERN_START | MEMBER_OR_CALL,
    RightBracket = 25,
    Dot = 26 | MEMBER_OR_CALL,
    Ellipsis = 27,
    Semicolon = 28,
    Comma = 29,
    Colon = 30,
    Question = 31,
    QuestionDot = 32 | MEMBER_OR_CALL,
    Arrow = 33,
    At = 34,

    // ========================================================================
    // Assignment operators
    // ========================================================================
    Assign = 40 | ASSIGN,
    AddAssign = 41 | ASSIGN,
    SubtractAssign = 42 | ASSIGN,
    MultiplyAssign = 43 | ASSIGN,
    DivideAssign = 44 | ASSIGN,
    ModuloAssign = 45 | ASSIGN,
    ExponentiateAssign = 46 | ASSIGN,
    ShiftLeftAssign = 47 | ASSIGN,
    ShiftRightAssign = 48 | ASSIGN,
    LogicalShiftRightAssign = 49 | ASSIGN,
    BitwiseAndAssign = 50 | ASSIGN,
    BitwiseOrAssign = 51 | ASSIGN,
    BitwiseXorAssign = 52 | ASSIGN,
    LogicalAndAssign = 53 | ASSIGN,
    LogicalOrAssign = 54 | ASSIGN,
    CoalesceAssign = 55 | ASSIGN,

    // ========================================================================
    // Unary and update operators
    // ========================================================================
    Increment = 60 | UPDATE,
    Decrement = 61 | UPDATE,
    Negate = 62 | UNARY,
    Complement = 63 | UNARY,

    // ========================================================================
    // Binary operators
    // ========================================================================
    Coalesce = 70 | BINARY | COALESCE | prec(1),
    LogicalOr = 71 | BINARY | LOGICAL | prec(2),
    LogicalAnd = 72 | BINARY | LOGICAL | prec(3),
    BitwiseOr = 73 | BINARY | prec(4),
    BitwiseXor = 74 | BINARY | prec(5),
    BitwiseAnd = 75 | BINARY | prec(6),
    LooseEqual = 76 | BINARY | prec(7),
    LooseNotEqual = 77 | BINARY | prec(7),
    StrictEqual = 78 | BINARY | prec(7),
    StrictNotEqual = 79 | BINARY | prec(7),
    LessThan = 80 | BINARY | prec(8),
    GreaterThan = 81 | BINARY | prec(8),
    LessThanOrEqual = 82 | BINARY | prec(8),
    GreaterThanOrEqual = 83 | BINARY | prec(8),
    ShiftLeft = 84 | BINARY | prec(9),
    ShiftRight = 85 | BINARY | prec(9),
    LogicalShiftRight = 86 | BINARY | prec(9),
    Add = 87 | BINARY | UNARY | prec(10),
    Subtract = 88 | BINARY | UNARY | prec(10),
    Multiply = 89 | BINARY | prec(11),
    Divide = 90 | BINARY | prec(11),
    Modulo = 91 | BINARY | prec(11),
    Exponentiate = 92 | BINARY | RIGHT_ASSOCIATIVE | prec(12),

    // ========================================================================
    // Reserved words
    // ========================================================================
    BreakKeyword = 100 | RESERVED | WORD,
    CaseKeyword = 101 | RESERVED | WORD,
    CatchKeyword = 102 | RESERVED | WORD,
    ClassKeyword = 103 | RESERVED | WORD,
    ConstKeyword = 104 | RESERVED | WORD,
    ContinueKeyword = 105 | RESERVED | WORD,
    DebuggerKeyword = 106 | RESERVED | WORD,
    DefaultKeyword = 107 | RESERVED | WORD,
    DeleteKeyword = 108 | RESERVED | WORD | UNARY,
    DoKeyword = 109 | RESERVED | WORD,
    ElseKeyword = 110 | RESERVED | WORD,
    EnumKeyword = 111 | RESERVED | WORD,
    ExportKeyword = 112 | RESERVED | WORD,
    ExtendsKeyword = 113 | RESERVED | WORD,
    FalseKeyword = 114 | RESERVED | WORD | LITERAL,
    FinallyKeyword = 115 | RESERVED | WORD,
    ForKeyword = 116 | RESERVED | WORD,
    FunctionKeyword = 117 | RESERVED | WORD,
    IfKeyword = 118 | RESERVED | WORD,
    ImportKeyword = 119 | RESERVED | WORD,
    InKeyword = 120 | RESERVED | WORD | BINARY | prec(8),
    InstanceOfKeyword = 121 | RESERVED | WORD | BINARY | prec(8),
    NewKeyword = 122 | RESERVED | WORD,
    NullKeyword = 123 | RESERVED | WORD | LITERAL,
    ReturnKeyword = 124 | RESERVED | WORD,
    SuperKeyword = 125 | RESERVED | WORD,
    SwitchKeyword = 126 | RESERVED | WORD,
    ThisKeyword = 127 | RESERVED | WORD,
    ThrowKeyword = 128 | RESERVED | WORD,
    TrueKeyword = 129 | RESERVED | WORD | LITERAL,
    TryKeyword = 130 | RESERVED | WORD,
    TypeofKeyword = 131 | RESERVED | WORD | UNARY,
    VarKeyword = 132 | RESERVED | WORD,
    VoidKeyword = 133 | RESERVED | WORD | UNARY,
    WhileKeyword = 134 | RESERVED | WORD,
    WithKeyword = 135 | RESERVED | WORD,

    // ========================================================================
    // Strict mode reserved words
    // ========================================================================
    ImplementsKeyword = 140 | STRICT_RESERVED | IDENTIFIER | WORD,
    InterfaceKeyword = 141 | STRICT_RESERVED | IDENTIFIER | WORD,
    LetKeyword = 142 | STRICT_RESERVED | IDENTIFIER | WORD,
    PackageKeyword = 143 | STRICT_RESERVED | IDENTIFIER | WORD,
    PrivateKeyword = 144 | STRICT_RESERVED | IDENTIFIER | WORD,
    ProtectedKeyword = 145 | STRICT_RESERVED | IDENTIFIER | WORD,
    PublicKeyword = 146 | STRICT_RESERVED | IDENTIFIER | WORD,
    StaticKeyword = 147 | STRICT_RESERVED | IDENTIFIER | WORD,
    YieldKeyword = 148 | STRICT_RESERVED | IDENTIFIER | WORD,

    // ========================================================================
    // Contextual keywords
    // ========================================================================
    AsKeyword = 150 | CONTEXTUAL | IDENTIFIER | WORD,
    AsyncKeyword = 151 | CONTEXTUAL | IDENTIFIER | WORD,
    AwaitKeyword = 152 | CONTEXTUAL | IDENTIFIER | WORD,
    FromKeyword = 153 | CONTEXTUAL | IDENTIFIER | WORD,
    GetKeyword = 154 | CONTEXTUAL | IDENTIFIER | WORD,
    OfKeyword = 155 | CONTEXTUAL | IDENTIFIER | WORD,
    SetKeyword = 156 | CONTEXTUAL | IDENTIFIER | WORD,
    TargetKeyword = 157 | CONTEXTUAL | IDENTIFIER | WORD,
    MetaKeyword = 158 | CONTEXTUAL | IDENTIFIER | WORD,
}

impl Token {
    #[inline]
    pub fn bits(self) -> u32 {
        self as u32
    }

    #[inline]
    fn has(self, flag: u32) -> bool {
        self.bits() & flag != 0
    }

    /// Binary precedence, or 0 for tokens that are not binary operators.
    #[inline]
    pub fn precedence(self) -> u8 {
        ((self.bits() & PRECEDENCE_MASK) >> PRECEDENCE_SHIFT) as u8
    }

    #[inline]
    pub fn is_binary_operator(self) -> bool {
        self.has(BINARY)
    }

    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        self.has(ASSIGN)
    }

    #[inline]
    pub fn is_update_operator(self) -> bool {
        self.has(UPDATE)
    }

    #[inline]
    pub fn is_unary_operator(self) -> bool {
        self.has(UNARY)
    }

    #[inline]
    pub fn is_identifier(self) -> bool {
        self.has(IDENTIFIER)
    }

    #[inline]
    pub fn is_reserved_word(self) -> bool {
        self.has(RESERVED)
    }

    #[inline]
    pub fn is_strict_reserved_word(self) -> bool {
        self.has(STRICT_RESERVED)
    }

    #[inline]
    pub fn is_contextual_keyword(self) -> bool {
        self.has(CONTEXTUAL)
    }

    /// Any IdentifierName, usable as a property name after `.`.
    #[inline]
    pub fn is_word(self) -> bool {
        self.has(WORD)
    }

    #[inline]
    pub fn is_pattern_start(self) -> bool {
        self.has(PATTERN_START)
    }

    #[inline]
    pub fn is_logical(self) -> bool {
        self.has(LOGICAL)
    }

    #[inline]
    pub fn is_coalesce(self) -> bool {
        self.has(COALESCE)
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        self.has(LITERAL)
    }

    #[inline]
    pub fn is_template(self) -> bool {
        self.has(TEMPLATE)
    }

    #[inline]
    pub fn is_member_or_call_start(self) -> bool {
        self.has(MEMBER_OR_CALL)
    }

    #[inline]
    pub fn is_right_associative(self) -> bool {
        self.has(RIGHT_ASSOCIATIVE)
    }

    /// Look up the keyword token for an identifier name.
    pub fn from_keyword(text: &str) -> Option<Token> {
        let token = match text {
            "break" => Token::BreakKeyword,
            "case" => Token::CaseKeyword,
            "catch" => Token::CatchKeyword,
            "class" => Token::ClassKeyword,
            "const" => Token::ConstKeyword,
            "continue" => Token::ContinueKeyword,
            "debugger" => Token::DebuggerKeyword,
            "default" => Token::DefaultKeyword,
            "delete" => Token::DeleteKeyword,
            "do" => Token::DoKeyword,
            "else" => Token::ElseKeyword,
            "enum" => Token::EnumKeyword,
            "export" => Token::ExportKeyword,
            "extends" => Token::ExtendsKeyword,
            "false" => Token::FalseKeyword,
            "finally" => Token::FinallyKeyword,
            "for" => Token::ForKeyword,
            "function" => Token::FunctionKeyword,
            "if" => Token::IfKeyword,
            "import" => Token::ImportKeyword,
            "in" => Token::InKeyword,
            "instanceof" => Token::InstanceOfKeyword,
            "new" => Token::NewKeyword,
            "null" => Token::NullKeyword,
            "return" => Token::ReturnKeyword,
            "super" => Token::SuperKeyword,
            "switch" => Token::SwitchKeyword,
            "this" => Token::ThisKeyword,
            "throw" => Token::ThrowKeyword,
            "true" => Token::TrueKeyword,
            "try" => Token::TryKeyword,
            "typeof" => Token::TypeofKeyword,
            "var" => Token::VarKeyword,
            "void" => Token::VoidKeyword,
            "while" => Token::WhileKeyword,
            "with" => Token::WithKeyword,
            "implements" => Token::ImplementsKeyword,
            "interface" => Token::InterfaceKeyword,
            "let" => Token::LetKeyword,
            "package" => Token::PackageKeyword,
            "private" => Token::PrivateKeyword,
            "protected" => Token::ProtectedKeyword,
            "public" => Token::PublicKeyword,
            "static" => Token::StaticKeyword,
            "yield" => Token::YieldKeyword,
            "as" => Token::AsKeyword,
            "async" => Token::AsyncKeyword,
            "await" => Token::AwaitKeyword,
            "from" => Token::FromKeyword,
            "get" => Token::GetKeyword,
            "of" => Token::OfKeyword,
            "set" => Token::SetKeyword,
            "target" => Token::TargetKeyword,
            "meta" => Token::MetaKeyword,
            _ => return None,
        };
        Some(token)
    }

    /// Source text of a punctuator or keyword, or a description of the
    /// token class for literal-like tokens.
    pub fn text(self) -> &'static str {
        match self {
            Token::EndOfSource => "end of input",
            Token::Identifier => "identifier",
            Token::PrivateName => "private name",
            Token::StringLiteral => "string",
            Token::NumericLiteral => "number",
            Token::BigIntLiteral => "bigint",
            Token::RegularExpression => "regular expression",
            Token::NoSubstitutionTemplate
            | Token::TemplateHead
            | Token::TemplateMiddle
            | Token::TemplateTail => "template",
            Token::JsxText => "markup text",
            Token::LeftBrace => "{",
            Token::RightBrace => "}",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::LeftBracket => "[",
            Token::RightBracket => "]",
            Token::Dot => ".",
            Token::Ellipsis => "...",
            Token::Semicolon => ";",
            Token::Comma => ",",
            Token::Colon => ":",
            Token::Question => "?",
            Token::QuestionDot => "?.",
            Token::Arrow => "=>",
            Token::At => "@",
            Token::Assign => "=",
            Token::AddAssign => "+=",
            Token::SubtractAssign => "-=",
            Token::MultiplyAssign => "*=",
            Token::DivideAssign => "/=",
            Token::ModuloAssign => "%=",
            Token::ExponentiateAssign => "**=",
            Token::ShiftLeftAssign => "<<=",
            Token::ShiftRightAssign => ">>=",
            Token::LogicalShiftRightAssign => ">>>=",
            Token::BitwiseAndAssign => "&=",
            Token::BitwiseOrAssign => "|=",
            Token::BitwiseXorAssign => "^=",
            Token::LogicalAndAssign => "&&=",
            Token::LogicalOrAssign => "||=",
            Token::CoalesceAssign => "??=",
            Token::Increment => "++",
            Token::Decrement => "--",
            Token::Negate => "!",
            Token::Complement => "~",
            Token::Coalesce => "??",
            Token::LogicalOr => "||",
            Token::LogicalAnd => "&&",
            Token::BitwiseOr => "|",
            Token::BitwiseXor => "^",
            Token::BitwiseAnd => "&",
            Token::LooseEqual => "==",
            Token::LooseNotEqual => "!=",
            Token::StrictEqual => "===",
            Token::StrictNotEqual => "!==",
            Token::LessThan => "<",
            Token::GreaterThan => ">",
            Token::LessThanOrEqual => "<=",
            Token::GreaterThanOrEqual => ">=",
            Token::ShiftLeft => "<<",
            Token::ShiftRight => ">>",
            Token::LogicalShiftRight => ">>>",
            Token::Add => "+",
            Token::Subtract => "-",
            Token::Multiply => "*",
            Token::Divide => "/",
            Token::Modulo => "%",
            Token::Exponentiate => "**",
            Token::BreakKeyword => "break",
            Token::CaseKeyword => "case",
            Token::CatchKeyword => "catch",
            Token::ClassKeyword => "class",
            Token::ConstKeyword => "const",
            Token::ContinueKeyword => "continue",
            Token::DebuggerKeyword => "debugger",
            Token::DefaultKeyword => "default",
            Token::DeleteKeyword => "delete",
            Token::DoKeyword => "do",
            Token::ElseKeyword => "else",
            Token::EnumKeyword => "enum",
            Token::ExportKeyword => "export",
            Token::ExtendsKeyword => "extends",
            Token::FalseKeyword => "false",
            Token::FinallyKeyword => "finally",
            Token::ForKeyword => "for",
            Token::FunctionKeyword => "function",
            Token::IfKeyword => "if",
            Token::ImportKeyword => "import",
            Token::InKeyword => "in",
            Token::InstanceOfKeyword => "instanceof",
            Token::NewKeyword => "new",
            Token::NullKeyword => "null",
            Token::ReturnKeyword => "return",
            Token::SuperKeyword => "super",
            Token::SwitchKeyword => "switch",
            Token::ThisKeyword => "this",
            Token::ThrowKeyword => "throw",
            Token::TrueKeyword => "true",
            Token::TryKeyword => "try",
            Token::TypeofKeyword => "typeof",
            Token::VarKeyword => "var",
            Token::VoidKeyword => "void",
            Token::WhileKeyword => "while",
            Token::WithKeyword => "with",
            Token::ImplementsKeyword => "implements",
            Token::InterfaceKeyword => "interface",
            Token::LetKeyword => "let",
            Token::PackageKeyword => "package",
            Token::PrivateKeyword => "private",
            Token::ProtectedKeyword => "protected",
            Token::PublicKeyword => "public",
            Token::StaticKeyword => "static",
            Token::YieldKeyword => "yield",
            Token::AsKeyword => "as",
            Token::AsyncKeyword => "async",
            Token::AwaitKeyword => "await",
            Token::FromKeyword => "from",
            Token::GetKeyword => "get",
            Token::OfKeyword => "of",
            Token::SetKeyword => "set",
            Token::TargetKeyword => "target",
            Token::MetaKeyword => "meta",
        }
    }

    /// Short name used when reporting tokens to observers.
    pub fn category_name(self) -> &'static str {
        match self {
            Token::EndOfSource => "EOF",
            Token::Identifier => "Identifier",
            Token::PrivateName => "PrivateName",
            Token::StringLiteral => "StringLiteral",
            Token::NumericLiteral => "NumericLiteral",
            Token::BigIntLiteral => "BigIntLiteral",
            Token::RegularExpression => "RegularExpression",
            Token::NoSubstitutionTemplate
            | Token::TemplateHead
            | Token::TemplateMiddle
            | Token::TemplateTail => "Template",
            Token::JsxText => "JSXText",
            Token::TrueKeyword | Token::FalseKeyword => "BooleanLiteral",
            Token::NullKeyword => "NullLiteral",
            t if t.is_reserved_word() => "Keyword",
            t if t.is_word() => "Identifier",
            _ => "Punctuator",
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        assert!(Token::Multiply.precedence() > Token::Add.precedence());
        assert!(Token::Add.precedence() > Token::ShiftLeft.precedence());
        assert!(Token::LogicalAnd.precedence() > Token::LogicalOr.precedence());
        assert!(Token::LogicalOr.precedence() > Token::Coalesce.precedence());
        assert_eq!(Token::InKeyword.precedence(), Token::LessThan.precedence());
        assert_eq!(Token::Comma.precedence(), 0);
    }

    #[test]
    fn test_categories() {
        assert!(Token::Add.is_binary_operator());
        assert!(Token::Add.is_unary_operator());
        assert!(!Token::Negate.is_binary_operator());
        assert!(Token::CoalesceAssign.is_assignment_operator());
        assert!(Token::Exponentiate.is_right_associative());
        assert!(Token::LeftBracket.is_pattern_start());
        assert!(Token::LeftBracket.is_member_or_call_start());
        assert!(Token::YieldKeyword.is_identifier());
        assert!(Token::YieldKeyword.is_strict_reserved_word());
        assert!(!Token::ThisKeyword.is_identifier());
        assert!(Token::ThisKeyword.is_word());
        assert!(Token::TemplateHead.is_template());
    }

    #[test]
    fn test_from_keyword() {
        assert_eq!(Token::from_keyword("instanceof"), Some(Token::InstanceOfKeyword));
        assert_eq!(Token::from_keyword("of"), Some(Token::OfKeyword));
        assert_eq!(Token::from_keyword("Of"), None);
        assert_eq!(Token::from_keyword("constructor"), None);
    }

    #[test]
    fn test_text_round_trips_keywords() {
        for word in ["while", "let", "async", "enum", "static"] {
            let token = Token::from_keyword(word).unwrap();
            assert_eq!(token.text(), word);
        }
    }
}
