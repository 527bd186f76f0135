//! Ordering engine: stable merge sort, monotonic suffix filters, and
//! k-way merge of pre-sorted chains.
//!
//! The sort is a natural-run merge: each pass splits the chain into
//! maximal already-ordered runs and merges adjacent run pairs, repeating
//! until one run remains. Pre-sorted and mostly-sorted input collapses in
//! one or two passes; the worst case stays O(n log n). Everything works
//! by relinking nodes, so equal payloads keep their relative order and no
//! auxiliary element storage is needed.

use std::mem;

use crate::chain::{node, node_mut, Chain, Node};
use crate::{Slot, Storage};

impl<T, S, I: Slot> Chain<T, S, I>
where
    S: Storage<Node<T, I>, Slot = I>,
{
    /// Sorts the chain by payload order. Stable, O(n log n).
    ///
    /// `descending` flips the comparator rather than reversing the
    /// sorted chain, so equal payloads keep their relative order either
    /// way. Empty and singleton chains are no-ops.
    pub fn sort(&mut self, storage: &mut S, descending: bool)
    where
        T: Ord,
    {
        if descending {
            self.sort_by(storage, |a, b| a >= b);
        } else {
            self.sort_by(storage, |a, b| a <= b);
        }
    }

    /// Natural-run merge passes. `le(a, b)` answers "may `a` stay before
    /// `b`"; it must be true on ties or stability is lost.
    fn sort_by<F>(&mut self, storage: &mut S, le: F)
    where
        F: Fn(&T, &T) -> bool,
    {
        loop {
            let mut out = Chain::new();
            let mut runs = 0usize;
            while let Some(a) = self.take_run(storage, &le) {
                runs += 1;
                if let Some(b) = self.take_run(storage, &le) {
                    runs += 1;
                    let merged = merge_runs(storage, a, b, &le);
                    out.splice_back(storage, merged);
                } else {
                    out.splice_back(storage, a);
                }
            }
            *self = out;
            if runs <= 1 {
                break;
            }
        }
    }

    /// Detaches the maximal ordered prefix as its own chain. O(run).
    fn take_run<F>(&mut self, storage: &mut S, le: &F) -> Option<Self>
    where
        F: Fn(&T, &T) -> bool,
    {
        let head = self.head;
        if head.is_nil() {
            return None;
        }

        let mut end = head;
        loop {
            let next = node(storage, end).next;
            if next.is_nil() || !le(&node(storage, end).data, &node(storage, next).data) {
                break;
            }
            end = next;
        }

        let rest = node(storage, end).next;
        node_mut(storage, end).next = I::NIL;
        if rest.is_live() {
            node_mut(storage, rest).prev = I::NIL;
            self.head = rest;
        } else {
            self.head = I::NIL;
            self.tail = I::NIL;
        }
        Some(Chain::from_parts(head, end))
    }

    /// Removes every node that has a strictly smaller payload somewhere
    /// to its right, leaving a non-decreasing sequence front to back.
    /// Returns the number of surviving nodes. O(n).
    pub fn ascend(&mut self, storage: &mut S) -> usize
    where
        T: Ord,
    {
        self.prune_from_back(storage, |value, bound| value > bound)
    }

    /// Removes every node that has a strictly greater payload somewhere
    /// to its right, leaving a non-increasing sequence front to back.
    /// Returns the number of surviving nodes. O(n).
    pub fn descend(&mut self, storage: &mut S) -> usize
    where
        T: Ord,
    {
        self.prune_from_back(storage, |value, bound| value < bound)
    }

    /// Right-to-left pass: `bound` is the payload of the nearest kept
    /// node to the right; a node violating the predicate against it is
    /// removed, otherwise it becomes the new bound.
    fn prune_from_back<F>(&mut self, storage: &mut S, violates: F) -> usize
    where
        F: Fn(&T, &T) -> bool,
    {
        let mut kept = 0usize;
        let mut bound = I::NIL;
        let mut cur = self.tail;
        while cur.is_live() {
            let prev = node(storage, cur).prev;
            let doomed = bound.is_live()
                && violates(&node(storage, cur).data, &node(storage, bound).data);
            if doomed {
                self.remove(storage, cur);
            } else {
                bound = cur;
                kept += 1;
            }
            cur = prev;
        }
        kept
    }
}

/// Stable two-way merge of two sorted chains into a new chain, by
/// relinking. On ties the node from `a` goes first.
fn merge_runs<T, S, I, F>(
    storage: &mut S,
    mut a: Chain<T, S, I>,
    mut b: Chain<T, S, I>,
    le: &F,
) -> Chain<T, S, I>
where
    I: Slot,
    S: Storage<Node<T, I>, Slot = I>,
    F: Fn(&T, &T) -> bool,
{
    let mut out = Chain::new();
    loop {
        if a.is_empty() {
            out.splice_back(storage, b);
            break;
        }
        if b.is_empty() {
            out.splice_back(storage, a);
            break;
        }
        let take_a = {
            let x = node(storage, a.head);
            let y = node(storage, b.head);
            le(&x.data, &y.data)
        };
        let slot = if take_a {
            a.detach_front(storage)
        } else {
            b.detach_front(storage)
        }
        .expect("run is non-empty");
        out.link_back(storage, slot);
    }
    out
}

/// Merges every chain in `chains` into the first one, which must all be
/// individually sorted in the requested order over the same storage.
/// Returns the resulting length of the first chain; all others end empty.
///
/// Elements move by relinking only, never by copy. On equal payloads,
/// nodes already accumulated stay ahead of incoming ones, so
/// earlier-indexed chains win ties.
///
/// Each sibling is folded in with a linear two-pointer walk, an
/// O(total × k) strategy chosen for simplicity over a small number of
/// chains rather than the heap-based O(total × log k).
///
/// An empty slice returns 0; a singleton slice returns the one chain's
/// length unchanged.
pub fn merge_sorted<T, S, I>(
    storage: &mut S,
    chains: &mut [Chain<T, S, I>],
    descending: bool,
) -> usize
where
    T: Ord,
    I: Slot,
    S: Storage<Node<T, I>, Slot = I>,
{
    if descending {
        fold_merge(storage, chains, &|a: &T, b: &T| a >= b)
    } else {
        fold_merge(storage, chains, &|a: &T, b: &T| a <= b)
    }
}

fn fold_merge<T, S, I, F>(storage: &mut S, chains: &mut [Chain<T, S, I>], le: &F) -> usize
where
    I: Slot,
    S: Storage<Node<T, I>, Slot = I>,
    F: Fn(&T, &T) -> bool,
{
    let Some((acc, rest)) = chains.split_first_mut() else {
        return 0;
    };

    for sibling in rest {
        let mut pos = acc.head;
        while let Some(incoming) = sibling.front_slot() {
            if pos.is_nil() {
                // Result exhausted: the sibling remainder is the tail.
                acc.splice_back(storage, mem::take(sibling));
                break;
            }
            let incoming_first = {
                let p = node(storage, pos);
                let q = node(storage, incoming);
                !le(&p.data, &q.data)
            };
            if incoming_first {
                sibling.unlink(storage, incoming);
                acc.link_before(storage, pos, incoming);
            } else {
                pos = node(storage, pos).next;
            }
        }
    }

    acc.len(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arena;

    fn chain_of(
        arena: &mut Arena<Node<u64>>,
        values: &[u64],
    ) -> Chain<u64, Arena<Node<u64>>> {
        let mut chain = Chain::new();
        for &v in values {
            chain.try_push_back(arena, v).unwrap();
        }
        chain
    }

    fn collect(arena: &Arena<Node<u64>>, chain: &Chain<u64, Arena<Node<u64>>>) -> Vec<u64> {
        chain.iter(arena).copied().collect()
    }

    #[test]
    fn sort_ascending() {
        let mut arena = Arena::with_capacity(64);
        let mut chain = chain_of(&mut arena, &[5, 3, 8, 1, 9, 2, 7]);

        chain.sort(&mut arena, false);
        assert_eq!(collect(&arena, &chain), vec![1, 2, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn sort_descending() {
        let mut arena = Arena::with_capacity(64);
        let mut chain = chain_of(&mut arena, &[5, 3, 8, 1, 9, 2, 7]);

        chain.sort(&mut arena, true);
        assert_eq!(collect(&arena, &chain), vec![9, 8, 7, 5, 3, 2, 1]);
    }

    #[test]
    fn sort_trivial_chains() {
        let mut arena: Arena<Node<u64>> = Arena::with_capacity(8);
        let mut empty: Chain<u64, _> = Chain::new();
        empty.sort(&mut arena, false);
        assert!(empty.is_empty());

        let mut single = chain_of(&mut arena, &[3]);
        single.sort(&mut arena, false);
        assert_eq!(collect(&arena, &single), vec![3]);
    }

    #[test]
    fn sort_already_sorted() {
        let mut arena = Arena::with_capacity(64);
        let mut chain = chain_of(&mut arena, &[1, 2, 3, 4]);

        chain.sort(&mut arena, false);
        assert_eq!(collect(&arena, &chain), vec![1, 2, 3, 4]);
    }

    #[test]
    fn sort_is_idempotent() {
        let mut arena = Arena::with_capacity(64);
        let mut chain = chain_of(&mut arena, &[4, 4, 2, 9, 1, 1, 6]);

        chain.sort(&mut arena, false);
        let once = collect(&arena, &chain);
        chain.sort(&mut arena, false);
        assert_eq!(collect(&arena, &chain), once);
    }

    #[test]
    fn sort_is_stable() {
        // Payloads ordered by key only; seq tells original positions apart.
        #[derive(Debug, PartialEq, Eq)]
        struct Tagged {
            key: u64,
            seq: u64,
        }
        impl PartialOrd for Tagged {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for Tagged {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.key.cmp(&other.key)
            }
        }

        let mut arena: Arena<Node<Tagged>> = Arena::with_capacity(16);
        let mut chain: Chain<Tagged, _> = Chain::new();
        for (key, seq) in [(2, 0), (1, 1), (2, 2), (1, 3), (2, 4)] {
            chain.try_push_back(&mut arena, Tagged { key, seq }).unwrap();
        }

        chain.sort(&mut arena, false);
        let order: Vec<(u64, u64)> = chain.iter(&arena).map(|t| (t.key, t.seq)).collect();
        assert_eq!(order, vec![(1, 1), (1, 3), (2, 0), (2, 2), (2, 4)]);

        chain.sort(&mut arena, true);
        let order: Vec<(u64, u64)> = chain.iter(&arena).map(|t| (t.key, t.seq)).collect();
        assert_eq!(order, vec![(2, 0), (2, 2), (2, 4), (1, 1), (1, 3)]);
    }

    #[test]
    fn ascend_keeps_non_decreasing_suffix() {
        let mut arena = Arena::with_capacity(64);
        let mut chain = chain_of(&mut arena, &[5, 2, 13, 3, 8]);

        assert_eq!(chain.ascend(&mut arena), 3);
        assert_eq!(collect(&arena, &chain), vec![2, 3, 8]);
    }

    #[test]
    fn descend_keeps_non_increasing_suffix() {
        let mut arena = Arena::with_capacity(64);
        let mut chain = chain_of(&mut arena, &[5, 2, 13, 3, 8]);

        assert_eq!(chain.descend(&mut arena), 2);
        assert_eq!(collect(&arena, &chain), vec![13, 8]);
    }

    #[test]
    fn filters_keep_equal_values() {
        let mut arena = Arena::with_capacity(64);
        let mut chain = chain_of(&mut arena, &[4, 4, 4]);
        assert_eq!(chain.ascend(&mut arena), 3);
        assert_eq!(collect(&arena, &chain), vec![4, 4, 4]);

        let mut chain = chain_of(&mut arena, &[4, 4, 4]);
        assert_eq!(chain.descend(&mut arena), 3);
        assert_eq!(collect(&arena, &chain), vec![4, 4, 4]);
    }

    #[test]
    fn filters_report_zero_on_empty() {
        let mut arena: Arena<Node<u64>> = Arena::with_capacity(8);
        let mut chain: Chain<u64, _> = Chain::new();
        assert_eq!(chain.ascend(&mut arena), 0);
        assert_eq!(chain.descend(&mut arena), 0);
    }

    #[test]
    fn merge_two_sorted_chains() {
        let mut arena = Arena::with_capacity(64);
        let a = chain_of(&mut arena, &[1, 3, 5]);
        let b = chain_of(&mut arena, &[2, 4, 6]);

        let mut chains = [a, b];
        let total = merge_sorted(&mut arena, &mut chains, false);

        assert_eq!(total, 6);
        assert_eq!(collect(&arena, &chains[0]), vec![1, 2, 3, 4, 5, 6]);
        assert!(chains[1].is_empty());
    }

    #[test]
    fn merge_three_descending() {
        let mut arena = Arena::with_capacity(64);
        let a = chain_of(&mut arena, &[9, 5, 1]);
        let b = chain_of(&mut arena, &[8, 4]);
        let c = chain_of(&mut arena, &[7, 6, 2]);

        let mut chains = [a, b, c];
        let total = merge_sorted(&mut arena, &mut chains, true);

        assert_eq!(total, 8);
        assert_eq!(collect(&arena, &chains[0]), vec![9, 8, 7, 6, 5, 4, 2, 1]);
        assert!(chains[1].is_empty());
        assert!(chains[2].is_empty());
    }

    #[test]
    fn merge_singleton_slice() {
        let mut arena = Arena::with_capacity(64);
        let a = chain_of(&mut arena, &[1, 2, 3]);

        let mut chains = [a];
        assert_eq!(merge_sorted(&mut arena, &mut chains, false), 3);
        assert_eq!(collect(&arena, &chains[0]), vec![1, 2, 3]);
    }

    #[test]
    fn merge_empty_slice() {
        let mut arena: Arena<Node<u64>> = Arena::with_capacity(8);
        let mut chains: [Chain<u64, _>; 0] = [];
        assert_eq!(merge_sorted(&mut arena, &mut chains, false), 0);
    }

    #[test]
    fn merge_with_empty_sibling() {
        let mut arena = Arena::with_capacity(64);
        let a = chain_of(&mut arena, &[1, 3]);
        let b: Chain<u64, _> = Chain::new();
        let c = chain_of(&mut arena, &[2]);

        let mut chains = [a, b, c];
        assert_eq!(merge_sorted(&mut arena, &mut chains, false), 3);
        assert_eq!(collect(&arena, &chains[0]), vec![1, 2, 3]);
    }

    #[test]
    fn merge_prefers_earlier_chain_on_ties() {
        #[derive(Debug, PartialEq, Eq)]
        struct Tagged {
            key: u64,
            src: u64,
        }
        impl PartialOrd for Tagged {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for Tagged {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.key.cmp(&other.key)
            }
        }

        let mut arena: Arena<Node<Tagged>> = Arena::with_capacity(16);
        let mut a: Chain<Tagged, _> = Chain::new();
        let mut b: Chain<Tagged, _> = Chain::new();
        for key in [1, 2] {
            a.try_push_back(&mut arena, Tagged { key, src: 0 }).unwrap();
            b.try_push_back(&mut arena, Tagged { key, src: 1 }).unwrap();
        }

        let mut chains = [a, b];
        merge_sorted(&mut arena, &mut chains, false);

        let order: Vec<(u64, u64)> = chains[0].iter(&arena).map(|t| (t.key, t.src)).collect();
        assert_eq!(order, vec![(1, 0), (1, 1), (2, 0), (2, 1)]);
    }
}
