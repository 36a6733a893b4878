//! Hooks for watching a parse.

use sable_scanner::{Comment, TokenRecord};

/// Receives comments, consumed tokens and inserted semicolons in source
/// order. Every method defaults to doing nothing.
pub trait ParseObserver<'a> {
    fn on_comment(&mut self, _comment: &Comment<'a>) {}

    fn on_token(&mut self, _token: &TokenRecord<'a>) {}

    /// A semicolon was inserted at `offset`.
    fn on_insert_semicolon(&mut self, _offset: u32) {}
}

/// Buffers everything it observes.
#[derive(Debug, Default)]
pub struct Collector<'a> {
    pub comments: Vec<Comment<'a>>,
    pub tokens: Vec<TokenRecord<'a>>,
    pub semicolons: Vec<u32>,
}

impl<'a> Collector<'a> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'a> ParseObserver<'a> for Collector<'a> {
    fn on_comment(&mut self, comment: &Comment<'a>) {
        self.comments.push(*comment);
    }

    fn on_token(&mut self, token: &TokenRecord<'a>) {
        self.tokens.push(*token);
    }

    fn on_insert_semicolon(&mut self, offset: u32) {
        self.semicolons.push(offset);
    }
}
