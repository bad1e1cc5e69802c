use std::hash::Hash;
use std::mem;

use hashbrown::HashSet;

/// Paths are bounded by game length, so a small reserve is plenty.
const GUARD_BUDGET_BYTES: usize = 1 << 20;

/// Positions that must be treated as repetitions: everything on the current
/// recursion path plus every position of the live game's past. Reaching one
/// of them closes a zero-sum loop and is valued as a draw.
pub struct CycleGuard<K> {
    open: HashSet<K>,
}

impl<K: Copy + Eq + Hash> CycleGuard<K> {
    pub fn new() -> Self {
        Self {
            open: HashSet::with_capacity(GUARD_BUDGET_BYTES / mem::size_of::<K>().max(1)),
        }
    }

    #[inline]
    pub fn insert(&mut self, key: K) {
        self.open.insert(key);
    }

    #[inline]
    pub fn remove(&mut self, key: &K) {
        self.open.remove(key);
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.open.contains(key)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.open.clear();
    }
}

impl<K: Copy + Eq + Hash> Default for CycleGuard<K> {
    fn default() -> Self {
        Self::new()
    }
}
