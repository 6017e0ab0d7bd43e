//! The bump arena syntax trees are allocated from.
//!
//! A tree borrows from the arena, so it lives only until the generator
//! resets the arena for the next file.

use bumpalo::Bump;

/// Owns the `Bump` the parser allocates into.
///
/// Nodes placed here never run destructors, so they hold only `&'a`
/// references and `Copy` data.
#[derive(Default)]
pub struct SyntaxArena {
    bump: Bump,
}

impl SyntaxArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }

    /// Free every tree at once, keeping the largest chunk for reuse.
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_reuses_memory() {
        let mut arena = SyntaxArena::new();
        let name = arena.bump().alloc_str("Add");
        assert_eq!(name, "Add");
        assert!(arena.bump().allocated_bytes() > 0);
        arena.reset();
        assert_eq!(arena.bump().alloc_str("Sum"), "Sum");
    }
}
