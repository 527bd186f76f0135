//! Linked queues with external storage and in-place structural algorithms.
//!
//! This crate provides a doubly-linked queue whose algorithms rearrange the
//! queue by relinking nodes, never by copying payloads. The key insight:
//! separate storage from structure.
//!
//! # Design Philosophy
//!
//! Traditional linked queues own their nodes:
//!
//! ```text
//! VecDeque<T>    - contiguous, but middle removal shifts elements
//! LinkedList<T>  - owns nodes, one heap allocation per element
//! ```
//!
//! This crate inverts the model:
//!
//! ```text
//! Storage (Arena)  - owns node data, provides stable slots
//! Chain            - coordinates slots, doesn't own data
//! ```
//!
//! Benefits:
//! - **Stable slots**: Remove from the middle without invalidating others
//! - **Zero allocation on hot path**: Pre-allocate the arena at startup
//! - **Relink, don't copy**: Reverse, sort, merge, and shuffle move links,
//!   so payloads never leave their slots
//! - **Shared storage**: Several chains over one arena can exchange nodes
//!
//! # Quick Start
//!
//! For a single self-contained queue, [`Queue`] owns its arena:
//!
//! ```
//! use linkq::Queue;
//!
//! let mut q: Queue<u64> = Queue::with_capacity(1000);
//! q.push_back(3).unwrap();
//! q.push_back(1).unwrap();
//! q.push_back(2).unwrap();
//!
//! q.sort(false);
//! assert_eq!(q.pop_front(), Some(1));
//! assert_eq!(q.pop_back(), Some(3));
//! ```
//!
//! # Merging Chains
//!
//! Chains over a shared arena can be merged by relinking; no payload is
//! moved or cloned.
//!
//! ```
//! use linkq::{merge_sorted, Arena, Chain, Node};
//!
//! let mut arena: Arena<Node<u64>> = Arena::with_capacity(100);
//! let mut a: Chain<u64, _> = Chain::new();
//! let mut b: Chain<u64, _> = Chain::new();
//!
//! for v in [1u64, 3, 5] {
//!     a.try_push_back(&mut arena, v).unwrap();
//! }
//! for v in [2u64, 4, 6] {
//!     b.try_push_back(&mut arena, v).unwrap();
//! }
//!
//! let mut chains = [a, b];
//! let total = merge_sorted(&mut arena, &mut chains, false);
//! assert_eq!(total, 6);
//! assert_eq!(
//!     chains[0].iter(&arena).copied().collect::<Vec<_>>(),
//!     vec![1, 2, 3, 4, 5, 6]
//! );
//! ```
//!
//! # Critical Invariant: Same Storage Instance
//!
//! All operations on a chain must use the same storage instance the chain
//! was built over. This is the caller's responsibility (same discipline as
//! the `slab` crate). Passing a different storage panics or corrupts the
//! chain's ordering.
//!
//! # Operations
//!
//! | Operation | Cost | Notes |
//! |-----------|------|-------|
//! | `push_front` / `push_back` | O(1) | fails with [`Full`] at capacity |
//! | `pop_front` / `pop_back` | O(1) | |
//! | `len` | O(n) | counted by traversal, never cached |
//! | [`Chain::delete_middle`] | O(n) | slow/fast pointer scan |
//! | [`Chain::dedup`] | O(n) | drops whole runs of adjacent equals |
//! | [`Chain::swap_pairs`] | O(n) | relinks, payloads stay put |
//! | [`Chain::reverse`] | O(n) | |
//! | [`Chain::reverse_blocks`] | O(n) | trailing partial block untouched |
//! | [`Chain::sort`] | O(n log n) | stable natural-run merge |
//! | [`Chain::ascend`] / [`Chain::descend`] | O(n) | single right-to-left pass |
//! | [`merge_sorted`] | O(k·n) | pairwise fold over k chains |
//! | [`Chain::shuffle`] | O(n²) | uniform Fisher-Yates |
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`Storage`] impl for `slab::Slab`

#![warn(missing_docs)]

pub mod chain;
pub mod queue;
pub mod slot;
pub mod storage;

mod shuffle;
mod sort;
mod transform;

pub use chain::{Chain, Iter, Node};
pub use queue::Queue;
pub use slot::Slot;
pub use sort::merge_sorted;
pub use storage::{Arena, Full, Storage};
