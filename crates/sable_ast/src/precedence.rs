//! Operator precedence for binary operators and whole expressions.

use crate::node::Expression;
use crate::token::Token;

/// Precedence levels, from loosest to tightest binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Comma = 0,
    /// Assignment, arrow functions and `yield`.
    Assignment = 1,
    Conditional = 2,
    Coalesce = 3,
    LogicalOr = 4,
    LogicalAnd = 5,
    BitwiseOr = 6,
    BitwiseXor = 7,
    BitwiseAnd = 8,
    Equality = 9,
    Relational = 10,
    Shift = 11,
    Additive = 12,
    Multiplicative = 13,
    Exponentiation = 14,
    Unary = 15,
    Update = 16,
    LeftHandSide = 17,
    Member = 18,
    Primary = 19,
}

impl OperatorPrecedence {
    /// Level of a binary operator token, given the token's packed binary
    /// precedence.
    pub fn of_binary(token: Token) -> Option<OperatorPrecedence> {
        let level = match token.precedence() {
            1 => OperatorPrecedence::Coalesce,
            2 => OperatorPrecedence::LogicalOr,
            3 => OperatorPrecedence::LogicalAnd,
            4 => OperatorPrecedence::BitwiseOr,
            5 => OperatorPrecedence::BitwiseXor,
            6 => OperatorPrecedence::BitwiseAnd,
            7 => OperatorPrecedence::Equality,
            8 => OperatorPrecedence::Relational,
            9 => OperatorPrecedence::Shift,
            10 => OperatorPrecedence::Additive,
            11 => OperatorPrecedence::Multiplicative,
            12 => OperatorPrecedence::Exponentiation,
            _ => return None,
        };
        Some(level)
    }

    /// The next tighter level; `Primary` is its own successor.
    pub fn tighter(self) -> OperatorPrecedence {
        use OperatorPrecedence::*;
        match self {
            Comma => Assignment,
            Assignment => Conditional,
            Conditional => Coalesce,
            Coalesce => LogicalOr,
            LogicalOr => LogicalAnd,
            LogicalAnd => BitwiseOr,
            BitwiseOr => BitwiseXor,
            BitwiseXor => BitwiseAnd,
            BitwiseAnd => Equality,
            Equality => Relational,
            Relational => Shift,
            Shift => Additive,
            Additive => Multiplicative,
            Multiplicative => Exponentiation,
            Exponentiation => Unary,
            Unary => Update,
            Update => LeftHandSide,
            LeftHandSide => Member,
            Member | Primary => Primary,
        }
    }
}

/// Precedence of an expression node, as needed to decide parenthesization.
///
/// `new` expressions rank as member expressions because they are always
/// written with an argument list.
pub fn expression_precedence(expr: &Expression<'_>) -> OperatorPrecedence {
    match expr {
        Expression::Sequence(_) => OperatorPrecedence::Comma,
        Expression::Assignment(_) | Expression::ArrowFunction(_) | Expression::Yield(_) => {
            OperatorPrecedence::Assignment
        }
        Expression::Conditional(_) => OperatorPrecedence::Conditional,
        Expression::Logical(logical) => {
            OperatorPrecedence::of_binary(logical.operator.token()).unwrap_or(OperatorPrecedence::LogicalOr)
        }
        Expression::Binary(binary) => {
            OperatorPrecedence::of_binary(binary.operator.token()).unwrap_or(OperatorPrecedence::Relational)
        }
        Expression::Unary(_) | Expression::Await(_) => OperatorPrecedence::Unary,
        Expression::Update(update) if update.prefix => OperatorPrecedence::Unary,
        Expression::Update(_) => OperatorPrecedence::Update,
        Expression::Call(_) | Expression::Import(_) | Expression::Chain(_) => OperatorPrecedence::LeftHandSide,
        Expression::New(_)
        | Expression::Member(_)
        | Expression::TaggedTemplate(_)
        | Expression::MetaProperty(_) => OperatorPrecedence::Member,
        _ => OperatorPrecedence::Primary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_follow_token_precedence() {
        assert_eq!(OperatorPrecedence::of_binary(Token::Coalesce), Some(OperatorPrecedence::Coalesce));
        assert_eq!(OperatorPrecedence::of_binary(Token::InKeyword), Some(OperatorPrecedence::Relational));
        assert!(OperatorPrecedence::of_binary(Token::Multiply) > OperatorPrecedence::of_binary(Token::Add));
        assert_eq!(OperatorPrecedence::of_binary(Token::Assign), None);
    }

    #[test]
    fn test_tighter_walks_every_level() {
        let mut level = OperatorPrecedence::Comma;
        let mut steps = 0;
        while level != OperatorPrecedence::Primary {
            let next = level.tighter();
            assert!(next > level);
            level = next;
            steps += 1;
        }
        assert_eq!(steps, OperatorPrecedence::Primary as u8);
        assert_eq!(OperatorPrecedence::Primary.tighter(), OperatorPrecedence::Primary);
    }
}
