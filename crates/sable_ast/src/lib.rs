//! sable_ast: Token kinds and the ESTree-shaped syntax tree.
//!
//! Nodes are allocated in the parse arena and reference their children by
//! `&'a` reference. Every node serializes to its ESTree JSON shape.

pub mod node;
pub mod precedence;
pub mod token;
pub mod types;

pub use node::*;
pub use token::Token;
pub use types::*;
