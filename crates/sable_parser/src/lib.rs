//! sable_parser: Single-pass recursive descent parser for JavaScript.
//!
//! Consumes tokens from the scanner and builds an arena-allocated ESTree
//! tree. Ambiguous prefixes (arrow parameters, destructuring assignment,
//! `for` heads) are parsed once as expressions and reinterpreted when the
//! following token decides their role. Parsing stops at the first error.

mod classes;
mod context;
mod expressions;
mod functions;
mod jsx;
mod modules;
mod observer;
mod parser;
mod patterns;
pub mod precedence;
mod statements;
mod utilities;

pub use context::Context;
pub use observer::{Collector, ParseObserver};
pub use parser::{parse, parse_with_observer, Parser, MAX_NESTING_DEPTH};
