//! Arena allocation for syntax trees.
//!
//! Every node of a parsed program lives in one bump arena, so a whole tree is
//! released at once when the arena is dropped.

use bumpalo::Bump;

/// Bump allocator that owns every node of the trees parsed into it.
///
/// Nodes must not own heap memory of their own: the arena never runs
/// destructors, so strings and lists are arena slices too.
pub struct Allocator {
    bump: Bump,
}

impl Allocator {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    #[inline]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }

    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_outlive_the_call_that_made_them() {
        let arena = Allocator::new();
        let name = arena.alloc_str("value");
        let pair = arena.alloc((1u32, name));
        assert_eq!(pair.1, "value");
        assert!(arena.bump().allocated_bytes() > 0);
    }

    #[test]
    fn test_bump_vectors_share_the_arena() {
        let arena = Allocator::new();
        let mut items = bumpalo::collections::Vec::new_in(arena.bump());
        items.extend([3, 1, 2]);
        assert_eq!(items.into_bump_slice(), &[3, 1, 2]);
    }
}
