use bumpalo::Bump;
use std::collections::HashSet;

/// Arena-backed string interner.
///
/// Interned strings live as long as the arena, so holders of the returned
/// references stay independent of the interner itself.
pub struct StringInterner<'a> {
    arena: &'a Bump,
    set: HashSet<&'a str>,
}

impl<'a> StringInterner<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self { arena, set: HashSet::new() }
    }

    pub fn intern(&mut self, s: &str) -> &'a str {
        if let Some(&existing) = self.set.get(s) {
            existing
        } else {
            let interned: &'a str = self.arena.alloc_str(s);
            self.set.insert(interned);
            interned
        }
    }
}
