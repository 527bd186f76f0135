//! In-place structural transforms over a chain.
//!
//! Everything here mutates by relinking nodes, never by copying payloads.
//! All transforms are O(n), need no auxiliary element storage, and are
//! no-ops on chains too short to be affected.

use std::mem;

use crate::chain::{node, node_mut, Chain, Node};
use crate::{Slot, Storage};

impl<T, S, I: Slot> Chain<T, S, I>
where
    S: Storage<Node<T, I>, Slot = I>,
{
    /// Removes the node at index `floor(len / 2)` (zero-based) and
    /// returns its payload.
    ///
    /// Locates the middle with a slow/fast two-pointer scan, one pass, no
    /// prior length query. Returns `None` on an empty chain.
    pub fn delete_middle(&mut self, storage: &mut S) -> Option<T> {
        if self.head.is_nil() {
            return None;
        }

        let mut slow = self.head;
        let mut fast = self.head;
        loop {
            let step = node(storage, fast).next;
            if step.is_nil() || node(storage, step).next.is_nil() {
                break;
            }
            slow = node(storage, slow).next;
            fast = node(storage, step).next;
        }
        // Even length: the middle is one past the slow pointer.
        if node(storage, fast).next.is_live() {
            slow = node(storage, slow).next;
        }

        self.remove(storage, slow)
    }

    /// Removes every run of adjacent equal payloads, the first occurrence
    /// included. Returns the number of nodes removed.
    ///
    /// On a chain sorted by the same order this eliminates all duplicated
    /// values globally; on unsorted input only adjacent equal runs are
    /// caught.
    pub fn dedup(&mut self, storage: &mut S) -> usize
    where
        T: PartialEq,
    {
        let mut removed = 0;
        let mut cur = self.head;
        while cur.is_live() {
            let mut next = node(storage, cur).next;
            let mut run = false;
            while next.is_live() && node(storage, next).data == node(storage, cur).data {
                let after = node(storage, next).next;
                self.remove(storage, next);
                removed += 1;
                run = true;
                next = after;
            }
            if run {
                self.remove(storage, cur);
                removed += 1;
            }
            cur = next;
        }
        removed
    }

    /// Swaps each adjacent pair of nodes (positions 0↔1, 2↔3, …) by
    /// relinking. A trailing unpaired node is left in place.
    pub fn swap_pairs(&mut self, storage: &mut S) {
        let mut cur = self.head;
        while cur.is_live() {
            let next = node(storage, cur).next;
            if next.is_nil() {
                break;
            }
            self.unlink(storage, next);
            self.link_before(storage, cur, next);
            // `cur` is now the later of the pair; its successor starts
            // the next pair.
            cur = node(storage, cur).next;
        }
    }

    /// Reverses the chain by inverting every node's `prev`/`next` roles.
    pub fn reverse(&mut self, storage: &mut S) {
        let mut cur = self.head;
        while cur.is_live() {
            let n = node_mut(storage, cur);
            mem::swap(&mut n.prev, &mut n.next);
            // prev now holds the old successor.
            cur = n.prev;
        }
        mem::swap(&mut self.head, &mut self.tail);
    }

    /// Reverses each consecutive block of exactly `k` nodes in place.
    ///
    /// A trailing block shorter than `k` keeps its original order. When
    /// `k` is at least the chain length the whole chain is one block and
    /// is fully reversed. `k == 1` is a no-op.
    ///
    /// Callers must pass `k >= 1`; `k == 0` is outside the contract and
    /// tolerated as a no-op.
    pub fn reverse_blocks(&mut self, storage: &mut S, k: usize) {
        if k <= 1 {
            return;
        }
        if self.head.is_nil() {
            return;
        }
        if k >= self.len(storage) {
            self.reverse(storage);
            return;
        }

        let mut block_head = self.head;
        while block_head.is_live() {
            // A block is only reversed when k nodes actually start here.
            let mut probe = block_head;
            let mut count = 1;
            while count < k && node(storage, probe).next.is_live() {
                probe = node(storage, probe).next;
                count += 1;
            }
            if count < k {
                break;
            }

            // Hoist each successor of the block head to the block front;
            // the head sinks to the block's end as its successors pass it.
            let anchor = node(storage, block_head).prev;
            for _ in 1..k {
                let next = node(storage, block_head).next;
                self.unlink(storage, next);
                if anchor.is_live() {
                    self.link_after(storage, anchor, next);
                } else {
                    self.link_front(storage, next);
                }
            }
            block_head = node(storage, block_head).next;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::chain::Node;
    use crate::{Arena, Chain};

    type TestArena = Arena<Node<u64>>;
    type TestChain = Chain<u64, TestArena>;

    fn chain_of(values: &[u64]) -> (TestArena, TestChain) {
        let mut arena = Arena::with_capacity(64);
        let mut chain = Chain::new();
        for &v in values {
            chain.try_push_back(&mut arena, v).unwrap();
        }
        (arena, chain)
    }

    fn collect(arena: &TestArena, chain: &TestChain) -> Vec<u64> {
        chain.iter(arena).copied().collect()
    }

    #[test]
    fn delete_middle_empty() {
        let (mut arena, mut chain) = chain_of(&[]);
        assert_eq!(chain.delete_middle(&mut arena), None);
    }

    #[test]
    fn delete_middle_singleton() {
        let (mut arena, mut chain) = chain_of(&[7]);
        assert_eq!(chain.delete_middle(&mut arena), Some(7));
        assert!(chain.is_empty());
        assert!(arena.is_empty());
    }

    #[test]
    fn delete_middle_index_is_floor_half() {
        // len 2 -> index 1, len 3 -> index 1, len 4 -> index 2, len 5 -> index 2
        let cases: &[(&[u64], u64)] = &[
            (&[10, 11], 11),
            (&[10, 11, 12], 11),
            (&[10, 11, 12, 13], 12),
            (&[10, 11, 12, 13, 14], 12),
        ];
        for (input, expected) in cases {
            let (mut arena, mut chain) = chain_of(input);
            assert_eq!(chain.delete_middle(&mut arena), Some(*expected));
            assert_eq!(chain.len(&arena), input.len() - 1);
        }
    }

    #[test]
    fn dedup_sorted_removes_whole_runs() {
        let (mut arena, mut chain) = chain_of(&[1, 2, 2, 3]);
        assert_eq!(chain.dedup(&mut arena), 2);
        assert_eq!(collect(&arena, &chain), vec![1, 3]);
    }

    #[test]
    fn dedup_long_runs() {
        let (mut arena, mut chain) = chain_of(&[1, 1, 1, 2, 3, 3, 4]);
        assert_eq!(chain.dedup(&mut arena), 5);
        assert_eq!(collect(&arena, &chain), vec![2, 4]);
    }

    #[test]
    fn dedup_unsorted_only_catches_adjacent() {
        let (mut arena, mut chain) = chain_of(&[1, 2, 1, 1, 3]);
        assert_eq!(chain.dedup(&mut arena), 2);
        assert_eq!(collect(&arena, &chain), vec![1, 2, 3]);
    }

    #[test]
    fn dedup_no_duplicates() {
        let (mut arena, mut chain) = chain_of(&[1, 2, 3]);
        assert_eq!(chain.dedup(&mut arena), 0);
        assert_eq!(collect(&arena, &chain), vec![1, 2, 3]);
    }

    #[test]
    fn dedup_all_equal() {
        let (mut arena, mut chain) = chain_of(&[5, 5, 5, 5]);
        assert_eq!(chain.dedup(&mut arena), 4);
        assert!(chain.is_empty());
    }

    #[test]
    fn swap_pairs_even() {
        let (mut arena, mut chain) = chain_of(&[1, 2, 3, 4]);
        chain.swap_pairs(&mut arena);
        assert_eq!(collect(&arena, &chain), vec![2, 1, 4, 3]);
    }

    #[test]
    fn swap_pairs_odd_leaves_last() {
        let (mut arena, mut chain) = chain_of(&[1, 2, 3, 4, 5]);
        chain.swap_pairs(&mut arena);
        assert_eq!(collect(&arena, &chain), vec![2, 1, 4, 3, 5]);
    }

    #[test]
    fn swap_pairs_short_chains() {
        let (mut arena, mut chain) = chain_of(&[1]);
        chain.swap_pairs(&mut arena);
        assert_eq!(collect(&arena, &chain), vec![1]);

        let (mut arena, mut chain) = chain_of(&[]);
        chain.swap_pairs(&mut arena);
        assert!(chain.is_empty());
    }

    #[test]
    fn reverse_basic() {
        let (mut arena, mut chain) = chain_of(&[1, 2, 3, 4]);
        chain.reverse(&mut arena);
        assert_eq!(collect(&arena, &chain), vec![4, 3, 2, 1]);

        // Both directions stay consistent after the link inversion.
        let rev: Vec<u64> = chain.iter(&arena).rev().copied().collect();
        assert_eq!(rev, vec![1, 2, 3, 4]);
    }

    #[test]
    fn reverse_twice_is_identity() {
        let (mut arena, mut chain) = chain_of(&[1, 2, 3, 4, 5]);
        chain.reverse(&mut arena);
        chain.reverse(&mut arena);
        assert_eq!(collect(&arena, &chain), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn reverse_trivial() {
        let (mut arena, mut chain) = chain_of(&[]);
        chain.reverse(&mut arena);
        assert!(chain.is_empty());

        let (mut arena, mut chain) = chain_of(&[1]);
        chain.reverse(&mut arena);
        assert_eq!(collect(&arena, &chain), vec![1]);
    }

    #[test]
    fn reverse_blocks_partial_tail_untouched() {
        let (mut arena, mut chain) = chain_of(&[1, 2, 3, 4, 5]);
        chain.reverse_blocks(&mut arena, 2);
        assert_eq!(collect(&arena, &chain), vec![2, 1, 4, 3, 5]);
    }

    #[test]
    fn reverse_blocks_of_three() {
        let (mut arena, mut chain) = chain_of(&[1, 2, 3, 4, 5, 6, 7]);
        chain.reverse_blocks(&mut arena, 3);
        assert_eq!(collect(&arena, &chain), vec![3, 2, 1, 6, 5, 4, 7]);
    }

    #[test]
    fn reverse_blocks_k_equals_len_is_full_reverse() {
        let (mut arena, mut chain) = chain_of(&[1, 2, 3, 4]);
        chain.reverse_blocks(&mut arena, 4);
        assert_eq!(collect(&arena, &chain), vec![4, 3, 2, 1]);
    }

    #[test]
    fn reverse_blocks_k_beyond_len_is_full_reverse() {
        let (mut arena, mut chain) = chain_of(&[1, 2, 3]);
        chain.reverse_blocks(&mut arena, 10);
        assert_eq!(collect(&arena, &chain), vec![3, 2, 1]);
    }

    #[test]
    fn reverse_blocks_k_one_is_noop() {
        let (mut arena, mut chain) = chain_of(&[1, 2, 3]);
        chain.reverse_blocks(&mut arena, 1);
        assert_eq!(collect(&arena, &chain), vec![1, 2, 3]);
    }

    #[test]
    fn reverse_blocks_k_zero_tolerated() {
        let (mut arena, mut chain) = chain_of(&[1, 2, 3]);
        chain.reverse_blocks(&mut arena, 0);
        assert_eq!(collect(&arena, &chain), vec![1, 2, 3]);
    }
}
