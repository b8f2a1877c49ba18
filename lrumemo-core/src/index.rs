//! Recency-ordered key/value store with O(1) promotion and eviction.
//!
//! Entries live in a `Vec` arena and are chained into a doubly linked list by
//! index: the head is the most recently touched entry, the tail the least. A
//! `HashMap` maps each key to its arena slot. Removing an entry swaps the last
//! arena slot into the hole and relinks it, so the arena never has gaps.

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;

use crate::ConfigError;

/// Null link in the recency list.
const NIL: usize = usize::MAX;

struct Node<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

/// Bounded set of entries kept in recency order.
///
/// The index never evicts on its own: callers insert with
/// [`insert_front`](CacheIndex::insert_front) and then trim with
/// [`evict_while_over_capacity`](CacheIndex::evict_while_over_capacity).
///
/// # Examples
///
/// ```
/// use lrumemo_core::CacheIndex;
///
/// let mut index = CacheIndex::new(2).unwrap();
/// index.insert_front("a", 1);
/// index.insert_front("b", 2);
///
/// // touching "a" makes "b" the least recently used entry
/// assert_eq!(index.lookup(&"a"), Some(&1));
///
/// index.insert_front("c", 3);
/// assert_eq!(index.evict_while_over_capacity(), 1);
/// assert_eq!(index.keys(), vec!["c", "a"]);
/// ```
pub struct CacheIndex<K, V> {
    capacity: usize,
    map: HashMap<K, usize>,
    nodes: Vec<Node<K, V>>,
    head: usize,
    tail: usize,
}

impl<K, V> Debug for CacheIndex<K, V>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheIndex")
            .field("capacity", &self.capacity)
            .field("keys", &self.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}

impl<K, V> CacheIndex<K, V> {
    /// Most recently used entry.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.entry(self.head)
    }

    /// Least recently used entry, the next one to be evicted.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.entry(self.tail)
    }

    /// Iterates over the entries, most recently used first.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.nodes.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn entry(&self, slot: usize) -> Option<(&K, &V)> {
        self.nodes.get(slot).map(|node| (&node.key, &node.value))
    }
}

impl<K: Hash + Eq + Clone, V> CacheIndex<K, V> {
    /// Creates an empty index holding at most `capacity` entries once trimmed.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] when `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity < 1 {
            return Err(ConfigError::InvalidCapacity { capacity });
        }
        Ok(Self {
            capacity,
            // one extra slot: an insertion happens before the trim
            map: HashMap::with_capacity(capacity.saturating_add(1)),
            nodes: Vec::with_capacity(capacity.saturating_add(1)),
            head: NIL,
            tail: NIL,
        })
    }

    /// Returns the value for `key` and moves it to the front of the recency order.
    ///
    /// A miss leaves the index untouched.
    pub fn lookup(&mut self, key: &K) -> Option<&V> {
        let slot = self.slot(key)?;
        Some(self.promote(slot))
    }

    /// Returns the value for `key` without changing the recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|&slot| &self.nodes[slot].value)
    }

    /// Returns true if `key` is cached. Does not promote it.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Inserts a new entry at the front of the recency order.
    ///
    /// The key is expected to be absent. If it is present anyway, its previous
    /// entry is dropped first, so the key set stays unique.
    pub fn insert_front(&mut self, key: K, value: V) {
        debug_assert!(!self.contains(&key), "insert_front on a cached key");
        self.remove(&key);

        let slot = self.nodes.len();
        self.nodes.push(Node {
            key: key.clone(),
            value,
            prev: NIL,
            next: NIL,
        });
        self.link_front(slot);
        self.map.insert(key, slot);
    }

    /// Drops entries from the back of the recency order until the index fits
    /// its capacity. Returns how many entries were evicted.
    pub fn evict_while_over_capacity(&mut self) -> usize {
        let mut evicted = 0;
        while self.len() > self.capacity {
            if self.pop_back().is_none() {
                break;
            }
            evicted += 1;
        }
        evicted
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        if self.tail == NIL {
            return None;
        }
        let slot = self.tail;
        self.map.remove(&self.nodes[slot].key);
        self.unlink(slot);
        let node = self.detach(slot);
        Some((node.key, node.value))
    }

    /// Removes `key` from the index, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let slot = self.map.remove(key)?;
        self.unlink(slot);
        Some(self.detach(slot).value)
    }

    /// Snapshot of the cached keys, most recently used first.
    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Drops every entry. The capacity is kept.
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Arena slot of `key`, if cached.
    pub(crate) fn slot(&self, key: &K) -> Option<usize> {
        self.map.get(key).copied()
    }

    /// Moves the entry at `slot` to the front and returns its value.
    pub(crate) fn promote(&mut self, slot: usize) -> &V {
        if slot != self.head {
            self.unlink(slot);
            self.link_front(slot);
        }
        &self.nodes[slot].value
    }

    /// Value of the most recently used entry.
    ///
    /// # Panics
    ///
    /// Panics if the index is empty.
    pub(crate) fn most_recent(&self) -> &V {
        &self.nodes[self.head].value
    }

    fn link_front(&mut self, slot: usize) {
        let old_head = self.head;
        self.nodes[slot].prev = NIL;
        self.nodes[slot].next = old_head;
        if old_head == NIL {
            self.tail = slot;
        } else {
            self.nodes[old_head].prev = slot;
        }
        self.head = slot;
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = (self.nodes[slot].prev, self.nodes[slot].next);
        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }
        self.nodes[slot].prev = NIL;
        self.nodes[slot].next = NIL;
    }

    /// Takes an unlinked node out of the arena. The last node is moved into
    /// the freed slot and its neighbours and map entry are repointed.
    fn detach(&mut self, slot: usize) -> Node<K, V> {
        let node = self.nodes.swap_remove(slot);
        if slot < self.nodes.len() {
            let (prev, next) = (self.nodes[slot].prev, self.nodes[slot].next);
            if prev == NIL {
                self.head = slot;
            } else {
                self.nodes[prev].next = slot;
            }
            if next == NIL {
                self.tail = slot;
            } else {
                self.nodes[next].prev = slot;
            }
            if let Some(moved) = self.map.get_mut(&self.nodes[slot].key) {
                *moved = slot;
            }
        }
        node
    }
}

/// Iterator over a [`CacheIndex`], most recently used first.
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    cursor: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cursor)?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(capacity: usize, keys: &[u32]) -> CacheIndex<u32, u32> {
        let mut index = CacheIndex::new(capacity).unwrap();
        for &k in keys {
            index.insert_front(k, k * 10);
        }
        index
    }

    /// Walks the list backwards and checks it against the forward walk and the map.
    fn assert_consistent(index: &CacheIndex<u32, u32>) {
        let forward = index.keys();
        let mut backward = Vec::new();
        let mut cursor = index.tail;
        while cursor != NIL {
            backward.push(index.nodes[cursor].key);
            cursor = index.nodes[cursor].prev;
        }
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), index.map.len());
        for (slot, node) in index.nodes.iter().enumerate() {
            assert_eq!(index.map.get(&node.key), Some(&slot));
        }
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = CacheIndex::<u32, u32>::new(0);
        assert_eq!(
            result.err(),
            Some(ConfigError::InvalidCapacity { capacity: 0 })
        );
    }

    #[test]
    fn test_insert_front_order() {
        let index = index_of(5, &[1, 2, 3]);
        assert_eq!(index.keys(), vec![3, 2, 1]);
        assert_eq!(index.front(), Some((&3, &30)));
        assert_eq!(index.back(), Some((&1, &10)));
        assert_consistent(&index);
    }

    #[test]
    fn test_lookup_promotes() {
        let mut index = index_of(5, &[1, 2, 3]);
        assert_eq!(index.lookup(&1), Some(&10));
        assert_eq!(index.keys(), vec![1, 3, 2]);
        assert_eq!(index.lookup(&2), Some(&20));
        assert_eq!(index.keys(), vec![2, 1, 3]);
        assert_consistent(&index);
    }

    #[test]
    fn test_lookup_miss_has_no_effect() {
        let mut index = index_of(5, &[1, 2]);
        assert_eq!(index.lookup(&9), None);
        assert_eq!(index.keys(), vec![2, 1]);
    }

    #[test]
    fn test_peek_does_not_promote() {
        let index = index_of(5, &[1, 2]);
        assert_eq!(index.peek(&1), Some(&10));
        assert_eq!(index.keys(), vec![2, 1]);
    }

    #[test]
    fn test_evict_while_over_capacity() {
        let mut index = index_of(2, &[1, 2, 3, 4]);
        assert_eq!(index.len(), 4);
        assert_eq!(index.evict_while_over_capacity(), 2);
        assert_eq!(index.keys(), vec![4, 3]);
        assert!(!index.contains(&1));
        assert!(!index.contains(&2));
        assert_consistent(&index);

        assert_eq!(index.evict_while_over_capacity(), 0);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut index = index_of(3, &[1, 2, 3]);
        let _ = index.lookup(&1);
        index.insert_front(4, 40);
        index.evict_while_over_capacity();
        assert_eq!(index.keys(), vec![4, 1, 3]);
        assert_consistent(&index);
    }

    #[test]
    fn test_remove_middle_head_tail() {
        let mut index = index_of(10, &[1, 2, 3, 4, 5]);
        assert_eq!(index.remove(&3), Some(30));
        assert_consistent(&index);
        assert_eq!(index.remove(&5), Some(50));
        assert_consistent(&index);
        assert_eq!(index.remove(&1), Some(10));
        assert_consistent(&index);
        assert_eq!(index.keys(), vec![4, 2]);
        assert_eq!(index.remove(&1), None);
    }

    #[test]
    fn test_pop_back_until_empty() {
        let mut index = index_of(10, &[1, 2, 3]);
        assert_eq!(index.pop_back(), Some((1, 10)));
        assert_eq!(index.pop_back(), Some((2, 20)));
        assert_eq!(index.pop_back(), Some((3, 30)));
        assert_eq!(index.pop_back(), None);
        assert!(index.is_empty());
        assert_eq!(index.front(), None);
    }

    #[test]
    fn test_insert_existing_key_replaces() {
        let mut index = index_of(10, &[1, 2]);
        index.remove(&1);
        index.insert_front(1, 11);
        assert_eq!(index.keys(), vec![1, 2]);
        assert_eq!(index.peek(&1), Some(&11));
        assert_consistent(&index);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut index = index_of(3, &[1, 2, 3]);
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.capacity(), 3);
        index.insert_front(7, 70);
        assert_eq!(index.keys(), vec![7]);
        assert_consistent(&index);
    }

    #[test]
    fn test_iter_len() {
        let index = index_of(10, &[1, 2, 3]);
        let iter = index.iter();
        assert_eq!(iter.len(), 3);
        let values: Vec<u32> = iter.map(|(_, v)| *v).collect();
        assert_eq!(values, vec![30, 20, 10]);
    }

    #[test]
    fn test_random_operations_against_model() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        let mut index = CacheIndex::new(8).unwrap();
        // most recent first
        let mut model: Vec<u32> = Vec::new();

        for _ in 0..5_000 {
            let key = rng.u32(0..20);
            match rng.u8(0..3) {
                0 => {
                    let hit = index.lookup(&key).is_some();
                    assert_eq!(hit, model.contains(&key));
                    if let Some(pos) = model.iter().position(|&k| k == key) {
                        model.remove(pos);
                        model.insert(0, key);
                    }
                }
                1 => {
                    if !index.contains(&key) {
                        index.insert_front(key, key * 10);
                        model.insert(0, key);
                        index.evict_while_over_capacity();
                        model.truncate(8);
                    }
                }
                _ => {
                    let removed = index.remove(&key).is_some();
                    let pos = model.iter().position(|&k| k == key);
                    assert_eq!(removed, pos.is_some());
                    if let Some(pos) = pos {
                        model.remove(pos);
                    }
                }
            }
            assert!(index.len() <= 8);
            assert_eq!(index.keys(), model);
        }
        assert_consistent(&index);
    }
}
