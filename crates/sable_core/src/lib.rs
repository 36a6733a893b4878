//! sable_core: Core utilities shared by the sable parser crates.
//!
//! Provides the node arena, string interning, source spans and the
//! offset-to-line/column map.

pub mod arena;
pub mod intern;
pub mod text;

pub use arena::Allocator;
pub use intern::{InternedString, StringInterner};
pub use text::{LineMap, Position, Span};
