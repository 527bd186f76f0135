//! Storage trait and the default arena backend.
//!
//! Storage hands out stable slots: a slot stays valid until the value in it
//! is explicitly removed, so chains can hold slots the way an intrusive
//! list would hold pointers. Insert, remove and lookup are all O(1).

use std::mem;

use crate::Slot;

/// Slot-stable storage for chain nodes.
///
/// # Requirements
///
/// - **Stable slots**: a slot remains valid until explicitly removed
/// - **O(1)** insert, remove and lookup
/// - **Slot reuse**: vacated slots may be handed out again
///
/// # Implementations
///
/// - [`Arena<T>`] — fixed capacity, safe, in this crate
/// - `slab::Slab<T>` — growable, never reports [`Full`] (feature `slab`)
pub trait Storage<T> {
    /// Slot type handed out by this storage.
    type Slot: Slot;

    /// Inserts a value, returning its slot.
    ///
    /// # Errors
    ///
    /// Returns [`Full`] with the rejected value if no slot is available.
    /// Growable backends never fail.
    fn try_insert(&mut self, value: T) -> Result<Self::Slot, Full<T>>;

    /// Removes and returns the value at `slot`, if occupied.
    fn remove(&mut self, slot: Self::Slot) -> Option<T>;

    /// Returns a reference to the value at `slot`, if occupied.
    fn get(&self, slot: Self::Slot) -> Option<&T>;

    /// Returns a mutable reference to the value at `slot`, if occupied.
    fn get_mut(&mut self, slot: Self::Slot) -> Option<&mut T>;
}

/// Error returned when storage has no free slot.
///
/// Carries the value that could not be inserted back to the caller, so a
/// failed insertion loses nothing and leaves storage untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> core::fmt::Display for Full<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "storage is full")
    }
}

impl<T: core::fmt::Debug> std::error::Error for Full<T> {}

// =============================================================================
// Arena - fixed capacity, free-list slot reuse
// =============================================================================

#[derive(Debug)]
enum Entry<T> {
    Occupied(T),
    Vacant { next_free: usize },
}

const NO_FREE: usize = usize::MAX;

/// Fixed-capacity storage with free-list slot reuse.
///
/// Entries live in one `Vec` that grows up to the capacity fixed at
/// construction and never beyond it; vacated entries are threaded on a
/// free list and reused LIFO. Insertion past capacity reports [`Full`].
///
/// # Example
///
/// ```
/// use linkq::{Arena, Storage};
///
/// let mut arena: Arena<u64> = Arena::with_capacity(8);
///
/// let slot = arena.try_insert(42).unwrap();
/// assert_eq!(arena.get(slot), Some(&42));
/// assert_eq!(arena.remove(slot), Some(42));
/// assert_eq!(arena.get(slot), None);
/// ```
#[derive(Debug)]
pub struct Arena<T, I: Slot = u32> {
    entries: Vec<Entry<T>>,
    capacity: usize,
    free_head: usize,
    len: usize,
    _marker: std::marker::PhantomData<I>,
}

impl<T, I: Slot> Arena<T, I> {
    /// Creates an arena with room for `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or does not fit the slot type.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        assert!(
            capacity < I::NIL.as_usize(),
            "capacity exceeds slot type maximum"
        );

        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            free_head: NO_FREE,
            len: 0,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the fixed capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Drops every stored value and makes all slots available again.
    ///
    /// Any chain still holding slots into this arena must be reset as
    /// well; clearing storage under a live chain leaves it dangling.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_head = NO_FREE;
        self.len = 0;
    }
}

impl<T, I: Slot> Storage<T> for Arena<T, I> {
    type Slot = I;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<Self::Slot, Full<T>> {
        let pos = if self.free_head != NO_FREE {
            let pos = self.free_head;
            match self.entries[pos] {
                Entry::Vacant { next_free } => self.free_head = next_free,
                Entry::Occupied(_) => unreachable!("free list points at occupied entry"),
            }
            self.entries[pos] = Entry::Occupied(value);
            pos
        } else {
            if self.entries.len() == self.capacity {
                return Err(Full(value));
            }
            self.entries.push(Entry::Occupied(value));
            self.entries.len() - 1
        };

        self.len += 1;
        Ok(I::from_usize(pos))
    }

    #[inline]
    fn remove(&mut self, slot: Self::Slot) -> Option<T> {
        let pos = slot.as_usize();
        match self.entries.get(pos) {
            Some(Entry::Occupied(_)) => {}
            _ => return None,
        }

        let entry = mem::replace(
            &mut self.entries[pos],
            Entry::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = pos;
        self.len -= 1;

        match entry {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant { .. } => unreachable!(),
        }
    }

    #[inline]
    fn get(&self, slot: Self::Slot) -> Option<&T> {
        match self.entries.get(slot.as_usize()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, slot: Self::Slot) -> Option<&mut T> {
        match self.entries.get_mut(slot.as_usize()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
impl<T> Storage<T> for slab::Slab<T> {
    type Slot = usize;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<Self::Slot, Full<T>> {
        Ok(self.insert(value))
    }

    #[inline]
    fn remove(&mut self, slot: Self::Slot) -> Option<T> {
        self.try_remove(slot)
    }

    #[inline]
    fn get(&self, slot: Self::Slot) -> Option<&T> {
        self.get(slot)
    }

    #[inline]
    fn get_mut(&mut self, slot: Self::Slot) -> Option<&mut T> {
        self.get_mut(slot)
    }
}
