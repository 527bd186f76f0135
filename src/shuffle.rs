//! Uniform random shuffle.
//!
//! Fisher–Yates over the chain: for each position from the back, exchange
//! it with a uniformly chosen position at or before it. The chain has no
//! random positional access, so each pick costs an O(n) walk, O(n²)
//! overall — acceptable for the queue sizes this crate targets. Callers
//! shuffling very large chains should permute an index array and rebuild
//! links instead; the output distribution is the same.

use rand::Rng;

use crate::chain::{Chain, Node};
use crate::{Slot, Storage};

impl<T, S, I: Slot> Chain<T, S, I>
where
    S: Storage<Node<T, I>, Slot = I>,
{
    /// Permutes the chain uniformly at random by relinking nodes.
    ///
    /// The generator is supplied by the caller, so seeding and
    /// reproducibility stay under the caller's control. Empty and
    /// singleton chains are no-ops.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, storage: &mut S, rng: &mut R) {
        let len = self.len(storage);
        if len < 2 {
            return;
        }
        for i in (1..len).rev() {
            let j = rng.gen_range(0..=i);
            if j == i {
                continue;
            }
            let a = self.slot_at(storage, j).expect("position within chain");
            let b = self.slot_at(storage, i).expect("position within chain");
            self.swap_slots(storage, a, b);
        }
    }
}
