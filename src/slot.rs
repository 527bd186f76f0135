//! Slot trait for storage indices.
//!
//! A [`Slot`] is the integer handle that links nodes together in place of
//! raw pointers. Every slot type carries a `NIL` sentinel playing the role
//! a null pointer would in an intrusive list.

/// Trait for slot/index types used as links between nodes.
///
/// Provides a sentinel value (`NIL`) and conversion to/from `usize`.
/// Implemented for the unsigned integer widths the crate uses; custom
/// handle types can implement it as well.
///
/// # Example
///
/// ```
/// use linkq::Slot;
///
/// let slot: u32 = 7;
/// assert!(slot.is_live());
/// assert!(u32::NIL.is_nil());
/// ```
pub trait Slot: Copy + Eq {
    /// Sentinel value meaning "no slot": the end of a chain, an empty
    /// head/tail, an unlinked node.
    ///
    /// For integer types this is `MAX`, which also caps usable capacity.
    const NIL: Self;

    /// Creates a slot from a `usize` position.
    fn from_usize(pos: usize) -> Self;

    /// Returns the slot as a `usize` position.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel.
    #[inline]
    fn is_nil(&self) -> bool {
        *self == Self::NIL
    }

    /// Returns `true` if this refers to an actual slot.
    #[inline]
    fn is_live(&self) -> bool {
        !self.is_nil()
    }
}

impl Slot for u16 {
    const NIL: Self = u16::MAX;

    #[inline]
    fn from_usize(pos: usize) -> Self {
        pos as u16
    }

    #[inline]
    fn as_usize(&self) -> usize {
        *self as usize
    }
}

impl Slot for u32 {
    const NIL: Self = u32::MAX;

    #[inline]
    fn from_usize(pos: usize) -> Self {
        pos as u32
    }

    #[inline]
    fn as_usize(&self) -> usize {
        *self as usize
    }
}

impl Slot for usize {
    const NIL: Self = usize::MAX;

    #[inline]
    fn from_usize(pos: usize) -> Self {
        pos
    }

    #[inline]
    fn as_usize(&self) -> usize {
        *self
    }
}
