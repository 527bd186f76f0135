//! Queue - a chain that owns its storage.
//!
//! [`Queue`] bundles an [`Arena`] with a [`Chain`] for the common case of
//! one queue with its own element pool, so callers are not threading
//! `&mut storage` through every call. When several queues need to
//! exchange elements by relinking (as [`merge_sorted`](crate::merge_sorted)
//! does), use chains over one shared storage instead.

use rand::Rng;

use crate::chain::{Chain, Iter, Node};
use crate::{Arena, Full, Slot};

/// A double-ended queue of owned payloads with the full set of in-place
/// structural algorithms.
///
/// Capacity is fixed at construction; a push past capacity reports
/// [`Full`] with the rejected payload and changes nothing. Dropping the
/// queue drops every remaining payload.
///
/// # Example
///
/// ```
/// use linkq::Queue;
///
/// let mut q: Queue<String> = Queue::with_capacity(16);
/// q.push_back("banana".into()).unwrap();
/// q.push_back("apple".into()).unwrap();
/// q.push_back("cherry".into()).unwrap();
///
/// q.sort(false);
/// let order: Vec<&str> = q.iter().map(String::as_str).collect();
/// assert_eq!(order, ["apple", "banana", "cherry"]);
/// ```
#[derive(Debug)]
pub struct Queue<T, I: Slot = u32> {
    arena: Arena<Node<T, I>, I>,
    chain: Chain<T, Arena<Node<T, I>, I>, I>,
}

impl<T, I: Slot> Queue<T, I> {
    /// Creates an empty queue with room for `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or does not fit the slot type.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            chain: Chain::new(),
        }
    }

    /// Returns the fixed capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Counts the elements by traversal. O(n); see [`Chain::len`].
    #[inline]
    pub fn len(&self) -> usize {
        self.chain.len(&self.arena)
    }

    /// Returns `true` if the queue has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Inserts an element at the front. O(1).
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` when at capacity; the queue is left
    /// unchanged.
    #[inline]
    pub fn push_front(&mut self, value: T) -> Result<(), Full<T>> {
        self.chain.try_push_front(&mut self.arena, value).map(|_| ())
    }

    /// Inserts an element at the back. O(1).
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` when at capacity; the queue is left
    /// unchanged.
    #[inline]
    pub fn push_back(&mut self, value: T) -> Result<(), Full<T>> {
        self.chain.try_push_back(&mut self.arena, value).map(|_| ())
    }

    /// Removes and returns the front element, or `None` if empty. O(1).
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        self.chain.pop_front(&mut self.arena)
    }

    /// Removes and returns the back element, or `None` if empty. O(1).
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        self.chain.pop_back(&mut self.arena)
    }

    /// Returns a reference to the front element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.chain.front(&self.arena)
    }

    /// Returns a reference to the back element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.chain.back(&self.arena)
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.chain.clear(&mut self.arena);
    }

    /// Returns a double-ended iterator over element references, front to
    /// back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, Arena<Node<T, I>, I>, I> {
        self.chain.iter(&self.arena)
    }

    // ========================================================================
    // Structural algorithms
    // ========================================================================

    /// Removes and returns the element at index `floor(len / 2)`, or
    /// `None` if empty. See [`Chain::delete_middle`].
    #[inline]
    pub fn delete_middle(&mut self) -> Option<T> {
        self.chain.delete_middle(&mut self.arena)
    }

    /// Removes every run of adjacent equal elements, first occurrence
    /// included; returns the removed count. See [`Chain::dedup`].
    #[inline]
    pub fn dedup(&mut self) -> usize
    where
        T: PartialEq,
    {
        self.chain.dedup(&mut self.arena)
    }

    /// Swaps each adjacent pair of elements by relinking.
    #[inline]
    pub fn swap_pairs(&mut self) {
        self.chain.swap_pairs(&mut self.arena);
    }

    /// Reverses the queue in place.
    #[inline]
    pub fn reverse(&mut self) {
        self.chain.reverse(&mut self.arena);
    }

    /// Reverses each consecutive block of `k` elements; a trailing block
    /// shorter than `k` keeps its order. See [`Chain::reverse_blocks`].
    #[inline]
    pub fn reverse_blocks(&mut self, k: usize) {
        self.chain.reverse_blocks(&mut self.arena, k);
    }

    /// Sorts the queue; stable, O(n log n). See [`Chain::sort`].
    #[inline]
    pub fn sort(&mut self, descending: bool)
    where
        T: Ord,
    {
        self.chain.sort(&mut self.arena, descending);
    }

    /// Removes every element with a strictly smaller element somewhere
    /// after it; returns the surviving count. See [`Chain::ascend`].
    #[inline]
    pub fn ascend(&mut self) -> usize
    where
        T: Ord,
    {
        self.chain.ascend(&mut self.arena)
    }

    /// Removes every element with a strictly greater element somewhere
    /// after it; returns the surviving count. See [`Chain::descend`].
    #[inline]
    pub fn descend(&mut self) -> usize
    where
        T: Ord,
    {
        self.chain.descend(&mut self.arena)
    }

    /// Permutes the queue uniformly at random. See [`Chain::shuffle`].
    #[inline]
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.chain.shuffle(&mut self.arena, rng);
    }
}

impl<T, I: Slot> Default for Queue<T, I> {
    fn default() -> Self {
        Self::with_capacity(16)
    }
}
