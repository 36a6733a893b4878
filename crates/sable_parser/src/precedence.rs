//! Binary operator binding power in a parse context.

use sable_ast::Token;

use crate::context::Context;

/// Binding power of `token` as a binary operator in `ctx`, or 0 when it
/// does not continue a binary expression here.
#[inline]
pub fn binary_precedence(token: Token, ctx: Context) -> u8 {
    if token == Token::InKeyword && !ctx.allows_in() {
        return 0;
    }
    token.precedence()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_is_not_binary_in_for_head() {
        assert_eq!(binary_precedence(Token::InKeyword, Context::DISALLOW_IN), 0);
        assert_eq!(binary_precedence(Token::InKeyword, Context::NONE), 8);
        assert_eq!(binary_precedence(Token::InstanceOfKeyword, Context::DISALLOW_IN), 8);
    }
}
