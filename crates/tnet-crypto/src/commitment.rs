//! # Commitments — Binding State to a Public Root
//!
//! Deterministic bindings of private vectors to a single public field
//! element. Two flavors share the same MiMC hash under distinct domain tags:
//!
//! - **State commitments** bind a full marking (or any token-count vector).
//!   No salt: the state space is large and the root is recomputed inside
//!   every circuit that consumes the marking.
//! - **Hidden-value commitments** bind a short private vector (e.g. two hole
//!   cards) together with a salt, for commit-then-reveal flows where the
//!   value space is small enough to brute-force without one.
//!
//! ## Security Invariant
//!
//! The domain tag is the first absorbed element, so a state root can never
//! be replayed as a hidden-value root or vice versa, even over identical
//! vectors.

use ark_ff::{PrimeField, Zero};
use sha2::{Digest, Sha256};

use tnet_core::Marking;

use crate::field::{fr_from_hex, fr_to_hex, Fr};
use crate::mimc::mimc_hash;

/// Domain tags for the commitment flavors.
///
/// Each tag is a field element derived from a versioned ASCII label, the
/// same way the MiMC round constants are derived from their seed.
pub mod domain {
    use super::*;

    /// Domain tag for marking/state commitments.
    pub fn state() -> Fr {
        tag(b"tokennet.commit.state.v1")
    }

    /// Domain tag for salted hidden-value commitments.
    pub fn hidden() -> Fr {
        tag(b"tokennet.commit.hidden.v1")
    }

    fn tag(label: &[u8]) -> Fr {
        Fr::from_le_bytes_mod_order(&Sha256::digest(label))
    }
}

/// A public commitment root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Root(pub Fr);

impl Root {
    /// The root as a field element, for use as a circuit public input.
    pub fn as_field(&self) -> Fr {
        self.0
    }

    /// Hex exchange encoding.
    pub fn to_hex(&self) -> String {
        fr_to_hex(&self.0)
    }

    /// Decode from the hex exchange encoding.
    pub fn from_hex(hex: &str) -> Result<Self, tnet_core::TnetError> {
        Ok(Self(fr_from_hex(hex)?))
    }
}

impl std::fmt::Display for Root {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "root:{}", self.to_hex())
    }
}

/// Blinding salt for hidden-value commitments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Salt(pub Fr);

impl Salt {
    /// Sample a uniformly random salt.
    pub fn random<R: rand::RngCore>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Self(Fr::from_le_bytes_mod_order(&bytes))
    }

    /// A zero salt, for seats that never commit (e.g. folded parties whose
    /// openings are structurally present but unconstrained).
    pub fn zero() -> Self {
        Self(Fr::zero())
    }
}

/// Commit to a marking: `mimc(state_tag, count_0, …, count_{n-1})`.
///
/// Deterministic; recomputed in-circuit by every circuit that takes the
/// marking as a private input.
pub fn commit_marking(marking: &Marking) -> Root {
    let mut elements = Vec::with_capacity(1 + marking.len());
    elements.push(domain::state());
    elements.extend(marking.counts().iter().map(|&c| Fr::from(c)));
    Root(mimc_hash(&elements))
}

/// Commit to a short private vector with a salt:
/// `mimc(hidden_tag, v_0, …, v_{k-1}, salt)`.
pub fn commit_hidden(values: &[Fr], salt: &Salt) -> Root {
    let mut elements = Vec::with_capacity(2 + values.len());
    elements.push(domain::hidden());
    elements.extend_from_slice(values);
    elements.push(salt.0);
    Root(mimc_hash(&elements))
}
