//! Binding-name interning.
//!
//! Scope tables key on interned names, so a redeclaration check hashes a
//! `u32` instead of a string. A table lives as long as one parse.

use lasso::{Rodeo, Spur};
use std::fmt;

/// A name stored in a [`StringInterner`]. Only meaningful for the table
/// that produced it.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct InternedString(Spur);

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InternedString").field(&self.0).finish()
    }
}

/// Per-parse name table.
#[derive(Default)]
pub struct StringInterner {
    names: Rodeo,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn intern(&mut self, name: &str) -> InternedString {
        InternedString(self.names.get_or_intern(name))
    }

    /// The handle for `name` if it was ever declared.
    #[inline]
    pub fn get(&self, name: &str) -> Option<InternedString> {
        self.names.get(name).map(InternedString)
    }

    #[inline]
    pub fn resolve(&self, key: InternedString) -> &str {
        self.names.resolve(&key.0)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringInterner({} names)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_handle() {
        let mut names = StringInterner::new();
        let first = names.intern("arguments");
        let again = names.intern("arguments");
        let other = names.intern("eval");
        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(names.resolve(other), "eval");
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_lookup_without_declaring() {
        let mut names = StringInterner::new();
        assert_eq!(names.get("x"), None);
        assert!(names.is_empty());
        let x = names.intern("x");
        assert_eq!(names.get("x"), Some(x));
    }
}
