//! Records handed to parse observers.

use sable_ast::Token;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommentKind {
    Line,
    Block,
    /// `<!--` or `-->` in scripts.
    Html,
}

/// A comment with its delimiters stripped from `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comment<'a> {
    #[serde(rename = "type")]
    pub kind: CommentKind,
    pub value: &'a str,
    pub start: u32,
    pub end: u32,
}

/// A consumed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenRecord<'a> {
    #[serde(rename = "type", serialize_with = "serialize_kind")]
    pub kind: Token,
    pub value: &'a str,
    pub start: u32,
    pub end: u32,
}

impl TokenRecord<'_> {
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

fn serialize_kind<S: serde::Serializer>(kind: &Token, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.category_name())
}
