//! Doubly-linked chain over slot storage.
//!
//! A [`Chain`] is the queue container: an ordered sequence of nodes linked
//! through `prev`/`next` slots, with the ends marked by [`Slot::NIL`]. The
//! chain itself stores no payload; nodes live in user-provided storage and
//! the chain only performs O(1) relink operations on them.
//!
//! The classic sentinel-node view of a circular list maps onto this
//! representation directly: the chain's `head`/`tail` pair is the
//! sentinel's `next`/`prev`, and `NIL` stands for the sentinel itself.
//!
//! # Storage invariant
//!
//! A chain must always be used with the same storage instance. Passing a
//! different storage is a logic error and will panic or corrupt links.
//! This is the caller's responsibility (same discipline as the `slab`
//! crate).
//!
//! # Size is not cached
//!
//! [`Chain::len`] counts nodes by traversal. Keeping no counter means the
//! relink primitives touch nothing but links, and two chains over one
//! storage can exchange nodes through `unlink`/`link_*` with no
//! bookkeeping to keep consistent. Callers that query size in a loop
//! should count once and track the number themselves.
//!
//! # Example
//!
//! ```
//! use linkq::{Arena, Chain, Node};
//!
//! let mut arena: Arena<Node<&str>> = Arena::with_capacity(8);
//! let mut chain: Chain<&str, _> = Chain::new();
//!
//! chain.try_push_back(&mut arena, "alpha").unwrap();
//! chain.try_push_back(&mut arena, "beta").unwrap();
//! chain.try_push_front(&mut arena, "omega").unwrap();
//!
//! let order: Vec<_> = chain.iter(&arena).copied().collect();
//! assert_eq!(order, ["omega", "alpha", "beta"]);
//!
//! assert_eq!(chain.pop_back(&mut arena), Some("beta"));
//! assert_eq!(chain.len(&arena), 2);
//! ```

use std::marker::PhantomData;

use crate::{Full, Slot, Storage};

/// A node in a chain: one payload plus its embedded links.
///
/// Users interact with `&T` through the chain's accessors; the link fields
/// are an implementation detail.
#[derive(Debug)]
pub struct Node<T, I: Slot = u32> {
    pub(crate) data: T,
    pub(crate) prev: I,
    pub(crate) next: I,
}

impl<T, I: Slot> Node<T, I> {
    /// Creates a new unlinked node.
    #[inline]
    fn new(data: T) -> Self {
        Self {
            data,
            prev: I::NIL,
            next: I::NIL,
        }
    }
}

/// Looks up a node, panicking on a slot that is not in storage.
///
/// Handing a chain a foreign slot is a caller contract violation, not a
/// recoverable condition.
#[inline]
pub(crate) fn node<T, S, I>(storage: &S, slot: I) -> &Node<T, I>
where
    I: Slot,
    S: Storage<Node<T, I>, Slot = I>,
{
    storage.get(slot).expect("slot not in chain storage")
}

#[inline]
pub(crate) fn node_mut<T, S, I>(storage: &mut S, slot: I) -> &mut Node<T, I>
where
    I: Slot,
    S: Storage<Node<T, I>, Slot = I>,
{
    storage.get_mut(slot).expect("slot not in chain storage")
}

/// An ordered, doubly-linked queue of nodes over external storage.
///
/// See the [module docs](self) for the representation and the storage
/// invariant. All endpoint and relink operations are O(1); [`Chain::len`]
/// and the structural algorithms in the sibling modules are O(n).
#[derive(Debug)]
pub struct Chain<T, S, I: Slot = u32>
where
    S: Storage<Node<T, I>, Slot = I>,
{
    pub(crate) head: I,
    pub(crate) tail: I,
    _marker: PhantomData<(T, S)>,
}

impl<T, S, I: Slot> Default for Chain<T, S, I>
where
    S: Storage<Node<T, I>, Slot = I>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S, I: Slot> Chain<T, S, I>
where
    S: Storage<Node<T, I>, Slot = I>,
{
    /// Creates an empty chain.
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: I::NIL,
            tail: I::NIL,
            _marker: PhantomData,
        }
    }

    /// Builds a chain from already-linked endpoints. The nodes between
    /// `head` and `tail` must form a well-linked NIL-terminated segment.
    #[inline]
    pub(crate) const fn from_parts(head: I, tail: I) -> Self {
        Self {
            head,
            tail,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the chain has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_nil()
    }

    /// Counts the nodes by walking the chain. O(n).
    ///
    /// There is deliberately no cached counter; see the module docs.
    #[inline]
    pub fn len(&self, storage: &S) -> usize {
        self.iter(storage).count()
    }

    /// Returns the front node's slot, or `None` if empty.
    #[inline]
    pub fn front_slot(&self) -> Option<I> {
        if self.head.is_nil() {
            None
        } else {
            Some(self.head)
        }
    }

    /// Returns the back node's slot, or `None` if empty.
    #[inline]
    pub fn back_slot(&self) -> Option<I> {
        if self.tail.is_nil() {
            None
        } else {
            Some(self.tail)
        }
    }

    /// Returns a reference to the payload at `slot`.
    #[inline]
    pub fn get<'a>(&self, storage: &'a S, slot: I) -> Option<&'a T>
    where
        I: 'a,
    {
        storage.get(slot).map(|n| &n.data)
    }

    /// Returns a mutable reference to the payload at `slot`.
    #[inline]
    pub fn get_mut<'a>(&mut self, storage: &'a mut S, slot: I) -> Option<&'a mut T>
    where
        I: 'a,
    {
        storage.get_mut(slot).map(|n| &mut n.data)
    }

    /// Returns a reference to the front payload.
    #[inline]
    pub fn front<'a>(&self, storage: &'a S) -> Option<&'a T>
    where
        I: 'a,
    {
        self.get(storage, self.head)
    }

    /// Returns a reference to the back payload.
    #[inline]
    pub fn back<'a>(&self, storage: &'a S) -> Option<&'a T>
    where
        I: 'a,
    {
        self.get(storage, self.tail)
    }

    // ========================================================================
    // Insertion (allocate + link)
    // ========================================================================

    /// Inserts a value at the back. O(1).
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage has no free slot; the chain
    /// is left untouched.
    #[inline]
    pub fn try_push_back(&mut self, storage: &mut S, value: T) -> Result<I, Full<T>> {
        let slot = storage
            .try_insert(Node::new(value))
            .map_err(|e| Full(e.0.data))?;
        self.link_back(storage, slot);
        Ok(slot)
    }

    /// Inserts a value at the front. O(1).
    ///
    /// On an empty chain this is the same operation as
    /// [`try_push_back`](Self::try_push_back): there is only one valid
    /// position.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage has no free slot; the chain
    /// is left untouched.
    #[inline]
    pub fn try_push_front(&mut self, storage: &mut S, value: T) -> Result<I, Full<T>> {
        let slot = storage
            .try_insert(Node::new(value))
            .map_err(|e| Full(e.0.data))?;
        self.link_front(storage, slot);
        Ok(slot)
    }

    // ========================================================================
    // Removal (unlink + deallocate)
    // ========================================================================

    /// Removes and returns the front payload. O(1).
    ///
    /// Returns `None` if the chain is empty.
    #[inline]
    pub fn pop_front(&mut self, storage: &mut S) -> Option<T> {
        let slot = self.detach_front(storage)?;
        storage.remove(slot).map(|n| n.data)
    }

    /// Removes and returns the back payload. O(1).
    ///
    /// Returns `None` if the chain is empty.
    #[inline]
    pub fn pop_back(&mut self, storage: &mut S) -> Option<T> {
        let slot = self.detach_back(storage)?;
        storage.remove(slot).map(|n| n.data)
    }

    /// Unlinks a node and removes it from storage, returning its payload.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not in storage.
    #[inline]
    pub fn remove(&mut self, storage: &mut S, slot: I) -> Option<T> {
        self.unlink(storage, slot);
        storage.remove(slot).map(|n| n.data)
    }

    /// Removes every node, dropping all payloads. O(n).
    pub fn clear(&mut self, storage: &mut S) {
        let mut slot = self.head;
        while slot.is_live() {
            let next = node(storage, slot).next;
            storage.remove(slot);
            slot = next;
        }
        self.head = I::NIL;
        self.tail = I::NIL;
    }

    // ========================================================================
    // Link primitives (relink only, no alloc/dealloc)
    // ========================================================================

    /// Links an existing node at the back.
    ///
    /// The node must be in storage and not linked into any chain.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not in storage.
    pub fn link_back(&mut self, storage: &mut S, slot: I) {
        let tail = self.tail;
        let n = node_mut(storage, slot);
        n.prev = tail;
        n.next = I::NIL;

        if tail.is_live() {
            node_mut(storage, tail).next = slot;
        } else {
            self.head = slot;
        }
        self.tail = slot;
    }

    /// Links an existing node at the front.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not in storage.
    pub fn link_front(&mut self, storage: &mut S, slot: I) {
        let head = self.head;
        let n = node_mut(storage, slot);
        n.next = head;
        n.prev = I::NIL;

        if head.is_live() {
            node_mut(storage, head).prev = slot;
        } else {
            self.tail = slot;
        }
        self.head = slot;
    }

    /// Links an existing node immediately before `before`.
    ///
    /// # Panics
    ///
    /// Panics if `before` or `slot` is not in storage.
    pub fn link_before(&mut self, storage: &mut S, before: I, slot: I) {
        let prev = node(storage, before).prev;
        let n = node_mut(storage, slot);
        n.next = before;
        n.prev = prev;

        node_mut(storage, before).prev = slot;
        if prev.is_live() {
            node_mut(storage, prev).next = slot;
        } else {
            self.head = slot;
        }
    }

    /// Links an existing node immediately after `after`.
    ///
    /// # Panics
    ///
    /// Panics if `after` or `slot` is not in storage.
    pub fn link_after(&mut self, storage: &mut S, after: I, slot: I) {
        let next = node(storage, after).next;
        let n = node_mut(storage, slot);
        n.prev = after;
        n.next = next;

        node_mut(storage, after).next = slot;
        if next.is_live() {
            node_mut(storage, next).prev = slot;
        } else {
            self.tail = slot;
        }
    }

    /// Unlinks a node without deallocating it.
    ///
    /// The node stays in storage with cleared links and can be relinked
    /// here or into another chain over the same storage. Returns `false`
    /// if the node was not linked.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not in storage.
    pub fn unlink(&mut self, storage: &mut S, slot: I) -> bool {
        let n = node(storage, slot);
        let (prev, next) = (n.prev, n.next);

        if prev.is_nil() && next.is_nil() && self.head != slot {
            return false;
        }

        if prev.is_live() {
            node_mut(storage, prev).next = next;
        } else {
            self.head = next;
        }
        if next.is_live() {
            node_mut(storage, next).prev = prev;
        } else {
            self.tail = prev;
        }

        let n = node_mut(storage, slot);
        n.prev = I::NIL;
        n.next = I::NIL;
        true
    }

    /// Unlinks and returns the front slot, leaving the node in storage.
    #[inline]
    pub fn detach_front(&mut self, storage: &mut S) -> Option<I> {
        let head = self.head;
        if head.is_nil() {
            return None;
        }
        self.unlink(storage, head);
        Some(head)
    }

    /// Unlinks and returns the back slot, leaving the node in storage.
    #[inline]
    pub fn detach_back(&mut self, storage: &mut S) -> Option<I> {
        let tail = self.tail;
        if tail.is_nil() {
            return None;
        }
        self.unlink(storage, tail);
        Some(tail)
    }

    /// Splices every node of `other` onto the back of this chain. O(1).
    pub fn splice_back(&mut self, storage: &mut S, other: Self) {
        if other.head.is_nil() {
            return;
        }
        if self.head.is_nil() {
            self.head = other.head;
            self.tail = other.tail;
            return;
        }
        node_mut(storage, self.tail).next = other.head;
        node_mut(storage, other.head).prev = self.tail;
        self.tail = other.tail;
    }

    /// Exchanges the positions of two linked nodes by relinking. O(1).
    ///
    /// Payloads are not touched; only links move.
    ///
    /// # Panics
    ///
    /// Panics if either slot is not in storage.
    pub fn swap_slots(&mut self, storage: &mut S, a: I, b: I) {
        if a == b {
            return;
        }

        // Adjacent nodes swap by moving the later one in front.
        if node(storage, a).next == b {
            self.unlink(storage, b);
            self.link_before(storage, a, b);
            return;
        }
        if node(storage, b).next == a {
            self.unlink(storage, a);
            self.link_before(storage, b, a);
            return;
        }

        let a_prev = node(storage, a).prev;
        let b_prev = node(storage, b).prev;
        self.unlink(storage, a);
        self.unlink(storage, b);

        if a_prev.is_live() {
            self.link_after(storage, a_prev, b);
        } else {
            self.link_front(storage, b);
        }
        if b_prev.is_live() {
            self.link_after(storage, b_prev, a);
        } else {
            self.link_front(storage, a);
        }
    }

    /// Walks to the slot at zero-based position `pos`. O(pos).
    #[inline]
    pub fn slot_at(&self, storage: &S, pos: usize) -> Option<I> {
        let mut slot = self.head;
        for _ in 0..pos {
            if slot.is_nil() {
                return None;
            }
            slot = node(storage, slot).next;
        }
        if slot.is_nil() {
            None
        } else {
            Some(slot)
        }
    }

    /// Returns an iterator over payload references, front to back.
    ///
    /// The iterator is double-ended; iterating in reverse walks the
    /// `prev` links from the tail.
    #[inline]
    pub fn iter<'a>(&self, storage: &'a S) -> Iter<'a, T, S, I> {
        Iter {
            storage,
            front: self.head,
            back: self.tail,
            _marker: PhantomData,
        }
    }
}

/// Iterator over payload references in a chain.
pub struct Iter<'a, T, S, I: Slot> {
    storage: &'a S,
    front: I,
    back: I,
    _marker: PhantomData<T>,
}

impl<'a, T: 'a, S, I: Slot + 'a> Iterator for Iter<'a, T, S, I>
where
    S: Storage<Node<T, I>, Slot = I>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front.is_nil() {
            return None;
        }
        let n = node(self.storage, self.front);

        if self.front == self.back {
            self.front = I::NIL;
            self.back = I::NIL;
        } else {
            self.front = n.next;
        }
        Some(&n.data)
    }
}

impl<'a, T: 'a, S, I: Slot + 'a> DoubleEndedIterator for Iter<'a, T, S, I>
where
    S: Storage<Node<T, I>, Slot = I>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back.is_nil() {
            return None;
        }
        let n = node(self.storage, self.back);

        if self.front == self.back {
            self.front = I::NIL;
            self.back = I::NIL;
        } else {
            self.back = n.prev;
        }
        Some(&n.data)
    }
}
