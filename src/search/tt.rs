use std::collections::HashMap;
use std::hash::Hash;
use std::mem;

use super::answer::Answer;

/// Memory the store may grow to before it is wiped in one piece.
const TABLE_BUDGET_BYTES: usize = 1 << 30;

/// Transposition store: best known [`Answer`] per position key.
///
/// Replacement is monotone in information: an entry is only overwritten by
/// one searched at least as deep, or by a solved entry replacing an unsolved
/// one. There is no per-entry eviction; when the entry count reaches the
/// budget-derived cap the engine clears the whole table between searches.
pub struct TranspositionTable<K, M> {
    map: HashMap<K, Answer<M>>,
    max_entries: usize,
}

impl<K: Copy + Eq + Hash, M: Clone> TranspositionTable<K, M> {
    pub fn new() -> Self {
        let entry_bytes = mem::size_of::<K>() + mem::size_of::<Answer<M>>();
        Self {
            map: HashMap::new(),
            max_entries: TABLE_BUDGET_BYTES / entry_bytes,
        }
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<&Answer<M>> {
        self.map.get(key)
    }

    /// Height-preferred insert. Shallower results never clobber deeper or
    /// solved ones, which keeps iterative deepening honest.
    #[inline]
    pub fn put(&mut self, key: K, entry: Answer<M>) {
        match self.map.get_mut(&key) {
            Some(old) => {
                let deeper = entry.height >= old.height;
                let resolves = entry.is_solved && !old.is_solved;
                if deeper || resolves {
                    *old = entry;
                }
            }
            None => {
                self.map.insert(key, entry);
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Entry count at which the table should be wiped.
    #[inline]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    #[inline]
    pub fn at_capacity(&self) -> bool {
        self.map.len() >= self.max_entries
    }

    #[inline]
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K: Copy + Eq + Hash, M: Clone> Default for TranspositionTable<K, M> {
    fn default() -> Self {
        Self::new()
    }
}
