//! sable_scanner: The token source for the sable parser.
//!
//! Converts source text into tokens on demand. The parser drives rescans for
//! regular expressions, template continuations, `>` operators and markup.

mod char_codes;
mod scanner;
mod token;

pub use char_codes::{is_identifier_part, is_identifier_start, is_line_terminator};
pub use scanner::{Scanner, ScannerState};
pub use token::{Comment, CommentKind, TokenRecord};
