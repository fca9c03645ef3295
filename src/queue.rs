//! Adaptable priority queue: a binary min-heap whose entries can be located through handles
//! and have their key changed in place.
//!
//! Every entry owns a slot in a side table that records its current position in the heap.
//! The slot is updated on every swap, so a [`Handle`] leads to its entry in O(1) and
//! [`AdaptablePriorityQueue::update_key`] only pays for the sift.
//! Removing an entry wipes its slot, any handle that still refers to it becomes stale and
//! is rejected with [`QueueError::StaleHandle`].

use crate::QueueError;

/// Opaque reference to an entry of an [`AdaptablePriorityQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    slot: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Element<K, V> {
    key: K,
    value: V,
    /// Slot tracking the position of this element in the heap.
    slot: usize,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    /// Position of the element in the heap, None once the element has been removed.
    index: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct AdaptablePriorityQueue<K, V> {
    heap: Vec<Element<K, V>>,
    slots: Vec<Slot>,
    free_slots: Vec<usize>,
}

impl<K, V> Default for AdaptablePriorityQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> AdaptablePriorityQueue<K, V> {
    pub const fn new() -> Self {
        Self {
            heap: vec![],
            slots: vec![],
            free_slots: vec![],
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free_slots: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns true only if the handle references an entry that is still in the queue.
    pub fn contains(&self, handle: Handle) -> bool {
        self.position(handle).is_some()
    }

    /// Gets the current key of the entry, None if the handle is stale.
    pub fn get_key(&self, handle: Handle) -> Option<&K> {
        self.position(handle).map(|index| &self.heap[index].key)
    }

    /// Gets the payload of the entry, None if the handle is stale.
    pub fn get_value(&self, handle: Handle) -> Option<&V> {
        self.position(handle).map(|index| &self.heap[index].value)
    }

    /// Removes all the entries, every handle given out so far becomes stale.
    pub fn clear(&mut self) {
        for element in std::mem::take(&mut self.heap) {
            self.wipe(element.slot);
        }
    }

    fn position(&self, handle: Handle) -> Option<usize> {
        self.slots
            .get(handle.slot)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.index)
    }

    fn handle_at(&self, index: usize) -> Handle {
        let slot = self.heap[index].slot;
        Handle {
            slot,
            generation: self.slots[slot].generation,
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.slots[self.heap[i].slot].index = Some(i);
        self.slots[self.heap[j].slot].index = Some(j);
    }

    /// Marks the slot as free so the handles pointing to it are no longer accepted.
    fn wipe(&mut self, slot: usize) {
        let slot_state = &mut self.slots[slot];
        slot_state.index = None;
        slot_state.generation = slot_state.generation.wrapping_add(1);
        self.free_slots.push(slot);
    }
}

impl<K: Ord, V> AdaptablePriorityQueue<K, V> {
    /// Inserts a new entry and returns the handle that can later be used to update its key.
    pub fn add(&mut self, key: K, value: V) -> Handle {
        let index = self.heap.len();

        let slot = match self.free_slots.pop() {
            Some(slot) => {
                self.slots[slot].index = Some(index);
                slot
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    index: Some(index),
                });
                self.slots.len() - 1
            }
        };

        self.heap.push(Element { key, value, slot });
        self.sift_up(index);

        Handle {
            slot,
            generation: self.slots[slot].generation,
        }
    }

    /// Gets the entry with the smallest key without removing it.
    pub fn peek_min(&self) -> Result<(Handle, &K, &V), QueueError> {
        let Element { key, value, .. } = self.heap.first().ok_or(QueueError::Empty)?;
        Ok((self.handle_at(0), key, value))
    }

    /// Changes the key of the entry and moves it to the position that restores the heap order.
    /// Both decreasing and increasing keys are supported.
    pub fn update_key(&mut self, handle: Handle, key: K) -> Result<(), QueueError> {
        let index = self.position(handle).ok_or(QueueError::StaleHandle)?;
        self.heap[index].key = key;

        if index > 0 && self.heap[(index - 1) / 2].key > self.heap[index].key {
            self.sift_up(index);
        } else {
            self.sift_down(index);
        }

        Ok(())
    }

    /// Removes the entry with the smallest key and returns its payload and key.
    /// The handle of the removed entry becomes stale.
    pub fn remove_min(&mut self) -> Result<(V, K), QueueError> {
        if self.heap.is_empty() {
            return Err(QueueError::Empty);
        }

        // the last element takes the place of the root
        let min = self.heap.swap_remove(0);
        self.wipe(min.slot);

        if !self.heap.is_empty() {
            self.slots[self.heap[0].slot].index = Some(0);
            self.sift_down(0);
        }

        Ok((min.value, min.key))
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[parent].key > self.heap[index].key {
                self.swap(parent, index);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            if left >= self.heap.len() {
                break;
            }

            let right = left + 1;
            let child = if right < self.heap.len() && self.heap[right].key < self.heap[left].key {
                right
            } else {
                left
            };

            if self.heap[child].key < self.heap[index].key {
                self.swap(child, index);
                index = child;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn assert_heap_invariants<K: Ord + std::fmt::Debug, V>(queue: &AdaptablePriorityQueue<K, V>) {
        for index in 1..queue.heap.len() {
            let parent = (index - 1) / 2;
            assert!(
                queue.heap[index].key >= queue.heap[parent].key,
                "{:?} at {index} is smaller than its parent {:?}",
                queue.heap[index].key,
                queue.heap[parent].key
            );
        }

        for (index, element) in queue.heap.iter().enumerate() {
            assert_eq!(queue.slots[element.slot].index, Some(index));
        }
    }

    fn drain<K: Ord, V>(queue: &mut AdaptablePriorityQueue<K, V>) -> Vec<(V, K)> {
        let mut entries = vec![];
        while !queue.is_empty() {
            entries.push(queue.remove_min().unwrap());
        }
        entries
    }

    #[test]
    fn queue_add_001() {
        let mut queue = AdaptablePriorityQueue::new();

        for key in [5, 3, 8, 1, 4] {
            queue.add(key, key * 10);
            assert_heap_invariants(&queue);
        }

        assert_eq!(queue.len(), 5);
        let (_, &key, &value) = queue.peek_min().unwrap();
        assert_eq!((key, value), (1, 10));
    }

    #[test]
    fn queue_remove_min_001() {
        let mut queue = AdaptablePriorityQueue::new();
        for key in [5, 3, 8, 1, 4] {
            queue.add(key, ());
        }

        let keys: Vec<_> = drain(&mut queue).into_iter().map(|(_, k)| k).collect();
        assert_eq!(keys, [1, 3, 4, 5, 8]);
    }

    #[test]
    fn queue_remove_min_002() {
        let mut queue: AdaptablePriorityQueue<u32, ()> = AdaptablePriorityQueue::new();

        assert_eq!(queue.remove_min(), Err(QueueError::Empty));
        assert_eq!(queue.peek_min().map(|(h, _, _)| h), Err(QueueError::Empty));
    }

    #[test]
    fn queue_remove_min_003() {
        // every removal returns the smallest key present at that time
        let mut queue = AdaptablePriorityQueue::new();
        let mut keys = vec![];

        for i in 0..200u64 {
            let key = (i * 7919) % 257;
            queue.add(key, i);
            keys.push(key);

            if i % 3 == 0 {
                let (_, removed) = queue.remove_min().unwrap();
                let min = keys.iter().copied().min().unwrap();
                assert_eq!(removed, min);
                let position = keys.iter().position(|&k| k == min).unwrap();
                keys.swap_remove(position);
            }
            assert_heap_invariants(&queue);
        }

        keys.sort_unstable();
        let drained: Vec<_> = drain(&mut queue).into_iter().map(|(_, k)| k).collect();
        assert_eq!(drained, keys);
    }

    #[test]
    fn queue_update_key_001() {
        let mut queue = AdaptablePriorityQueue::new();
        let handles: Vec<_> = [5, 3, 8, 1, 4]
            .into_iter()
            .map(|k| queue.add(k, k))
            .collect();

        // 8 -> 2
        queue.update_key(handles[2], 2).unwrap();
        assert_heap_invariants(&queue);
        assert_eq!(queue.get_key(handles[2]), Some(&2));

        let values: Vec<_> = drain(&mut queue).into_iter().map(|(v, _)| v).collect();
        assert_eq!(values, [1, 8, 3, 4, 5]);
    }

    #[test]
    fn queue_update_key_002() {
        let mut queue = AdaptablePriorityQueue::new();
        let handles: Vec<_> = (0..32).map(|k| queue.add(k, k)).collect();

        // increasing the root key must sift it down to the bottom
        queue.update_key(handles[0], 100).unwrap();
        assert_heap_invariants(&queue);

        // increasing an inner key whose parent still satisfies the order
        queue.update_key(handles[3], 50).unwrap();
        assert_heap_invariants(&queue);

        let values: Vec<_> = drain(&mut queue).into_iter().map(|(v, _)| v).collect();
        assert_eq!(values.first(), Some(&1));
        assert_eq!(values[values.len() - 2..], [3, 0]);
    }

    #[test]
    fn queue_update_key_003() {
        let mut queue = AdaptablePriorityQueue::new();
        let handles: Vec<_> = (0..64u64).map(|k| queue.add(1000 + k, k)).collect();

        for (i, &handle) in handles.iter().enumerate().rev() {
            let key = (i as u64 * 31) % 97;
            queue.update_key(handle, key).unwrap();
            assert_heap_invariants(&queue);
        }

        let mut previous = 0;
        for (value, key) in drain(&mut queue) {
            assert_eq!(key, (value * 31) % 97);
            assert!(key >= previous);
            previous = key;
        }
    }

    #[test]
    fn queue_stale_handle_001() {
        let mut queue = AdaptablePriorityQueue::new();
        let a = queue.add(1, 'a');
        let b = queue.add(2, 'b');

        assert_eq!(queue.remove_min(), Ok(('a', 1)));
        assert!(!queue.contains(a));
        assert!(queue.contains(b));
        assert_eq!(queue.get_key(a), None);
        assert_eq!(queue.get_value(a), None);
        assert_eq!(queue.update_key(a, 0), Err(QueueError::StaleHandle));

        // the recycled slot must not revive the stale handle
        let c = queue.add(0, 'c');
        assert_ne!(a, c);
        assert_eq!(queue.get_value(a), None);
        assert_eq!(queue.get_value(c), Some(&'c'));
        assert_eq!(queue.update_key(a, 5), Err(QueueError::StaleHandle));
        assert_eq!(queue.peek_min().map(|(h, k, v)| (h, *k, *v)), Ok((c, 0, 'c')));
    }

    #[test]
    fn queue_clear_001() {
        let mut queue = AdaptablePriorityQueue::with_capacity(4);
        let handles: Vec<_> = (0..4).map(|k| queue.add(k, k)).collect();

        queue.clear();

        assert!(queue.is_empty());
        assert!(handles.iter().all(|&h| !queue.contains(h)));
        assert_eq!(queue.remove_min(), Err(QueueError::Empty));
    }

    #[test]
    fn queue_ties_001() {
        let mut queue = AdaptablePriorityQueue::new();
        for value in 0..10 {
            queue.add(7, value);
        }
        assert_heap_invariants(&queue);

        let mut values = vec![];
        for (value, key) in drain(&mut queue) {
            assert_eq!(key, 7);
            values.push(value);
        }
        values.sort_unstable();
        assert_eq!(values, (0..10).collect::<Vec<_>>());
    }
}
