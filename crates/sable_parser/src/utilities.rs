//! Parser utility functions.

use sable_ast::{Expression, Token};

#[inline]
pub fn is_eval_or_arguments(name: &str) -> bool {
    matches!(name, "eval" | "arguments")
}

/// Check if a token can begin an expression, as needed after `yield`.
pub fn can_start_expression(token: Token) -> bool {
    token.is_identifier()
        || token.is_literal()
        || token.is_template()
        || token.is_unary_operator()
        || token.is_update_operator()
        || matches!(
            token,
            Token::LeftParen
                | Token::LeftBracket
                | Token::LeftBrace
                | Token::FunctionKeyword
                | Token::ClassKeyword
                | Token::NewKeyword
                | Token::ThisKeyword
                | Token::SuperKeyword
                | Token::ImportKeyword
                | Token::Divide
                | Token::DivideAssign
                | Token::LessThan
                | Token::PrivateName
                | Token::At
        )
}

/// Tokens after which `let` starts a lexical declaration.
#[inline]
pub fn starts_let_declaration(token: Token) -> bool {
    token.is_identifier() || matches!(token, Token::LeftBracket | Token::LeftBrace)
}

/// Check if a token can begin a property name.
#[inline]
pub fn starts_property_key(token: Token) -> bool {
    token.is_word()
        || matches!(
            token,
            Token::StringLiteral | Token::NumericLiteral | Token::BigIntLiteral | Token::LeftBracket | Token::PrivateName
        )
}

/// Check if a token can follow a class element name and make it a
/// field rather than a modifier such as `static` or `get`.
pub fn ends_class_field_name(token: Token) -> bool {
    matches!(
        token,
        Token::Assign | Token::Semicolon | Token::RightBrace | Token::LeftParen | Token::EndOfSource
    )
}

/// Property key text when it is statically known: identifiers, strings and
/// numbers.
pub fn static_key_name<'a>(key: &Expression<'a>) -> Option<&'a str> {
    match *key {
        Expression::Identifier(id) => Some(id.name),
        Expression::Literal(lit) => lit.as_str(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_start_expression() {
        assert!(can_start_expression(Token::Identifier));
        assert!(can_start_expression(Token::Subtract));
        assert!(can_start_expression(Token::Divide));
        assert!(!can_start_expression(Token::RightParen));
        assert!(!can_start_expression(Token::Colon));
        assert!(!can_start_expression(Token::Semicolon));
    }

    #[test]
    fn test_let_declaration_starts() {
        assert!(starts_let_declaration(Token::LeftBracket));
        assert!(starts_let_declaration(Token::YieldKeyword));
        assert!(!starts_let_declaration(Token::Assign));
        assert!(!starts_let_declaration(Token::InKeyword));
    }
}
