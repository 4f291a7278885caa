//! # Marking — Bounded Token-Count Vectors
//!
//! A `Marking` is the full state of one net instance: one token count per
//! place. Counts are capped at [`MAX_TOKENS`] so that every count — and every
//! difference checked during enabledness — fits the fixed 8-bit range proofs
//! the circuits use in place of native ordering comparisons.
//!
//! A marking never validates itself against a particular net; the net owns
//! that check (`PetriNet::check_marking`) because only the net knows its
//! place count.

use serde::{Deserialize, Serialize};

use crate::identity::PlaceId;

/// Maximum token count per place.
pub const MAX_TOKENS: u64 = 255;

/// Bit width of the range checks that bound token counts in-circuit.
pub const TOKEN_BITS: usize = 8;

/// A full net state: one token count per place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marking(Vec<u64>);

impl Marking {
    /// Create a marking from raw counts. Counts are not bounds-checked here;
    /// `PetriNet::check_marking` enforces the bound together with the length.
    pub fn new(counts: Vec<u64>) -> Self {
        Self(counts)
    }

    /// A marking of `places` empty places.
    pub fn empty(places: usize) -> Self {
        Self(vec![0; places])
    }

    /// Number of places this marking covers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the marking covers zero places.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Token count at a place.
    pub fn count(&self, place: PlaceId) -> u64 {
        self.0[place.index()]
    }

    /// Mutable access to one count. Used only by the session applying an
    /// accepted firing; circuits never mutate markings.
    pub fn set(&mut self, place: PlaceId, count: u64) {
        self.0[place.index()] = count;
    }

    /// The raw count vector, in place order.
    pub fn counts(&self) -> &[u64] {
        &self.0
    }

    /// Whether every count is within the token bound.
    pub fn within_bounds(&self) -> bool {
        self.0.iter().all(|&c| c <= MAX_TOKENS)
    }
}

impl std::fmt::Display for Marking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "]")
    }
}
