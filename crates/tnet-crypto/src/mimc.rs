//! # MiMC — Circuit-Native Hash
//!
//! The exponent-5 MiMC block cipher over the BN254 scalar field, used in a
//! Miyaguchi–Preneel mode to hash sequences of field elements. Each round is
//! `state ← (state + key + c_r)^5` — three multiplications — so one
//! permutation costs 330 constraints in-circuit, cheap enough to recompute a
//! full marking commitment inside every proof.
//!
//! ## Round constants
//!
//! 110 constants derived from a SHA-256 chain over a fixed seed tag and
//! reduced into the field. The derivation is deterministic: the native path
//! here and the gadget in `tnet-circuit` call the same [`round_constants`]
//! and therefore agree on every digest.
//!
//! ## Security Invariant
//!
//! The seed tag is part of the scheme: changing it changes every commitment
//! root ever published. It is versioned (`.v1`) so a future constant change
//! is an explicit migration, not a silent fork.

use std::sync::OnceLock;

use ark_ff::{Field, PrimeField, Zero};
use sha2::{Digest, Sha256};

use crate::field::Fr;

/// Number of rounds of the exponent-5 permutation.
pub const MIMC_ROUNDS: usize = 110;

const MIMC_SEED: &[u8] = b"tokennet.mimc.bn254.v1";

/// The shared round-constant table, derived once per process.
pub fn round_constants() -> &'static [Fr] {
    static CONSTANTS: OnceLock<Vec<Fr>> = OnceLock::new();
    CONSTANTS.get_or_init(|| {
        let mut digest = Sha256::digest(MIMC_SEED);
        let mut constants = Vec::with_capacity(MIMC_ROUNDS);
        for _ in 0..MIMC_ROUNDS {
            digest = Sha256::digest(digest);
            constants.push(Fr::from_le_bytes_mod_order(&digest));
        }
        constants
    })
}

/// One keyed MiMC permutation: 110 rounds of `(state + key + c_r)^5`,
/// followed by the final key addition.
pub fn mimc_permute(key: Fr, input: Fr) -> Fr {
    let mut state = input;
    for c in round_constants() {
        let t = state + key + c;
        let t2 = t.square();
        state = t2.square() * t;
    }
    state + key
}

/// Hash a sequence of field elements.
///
/// Miyaguchi–Preneel chaining: `h ← permute(h, m) + h + m` for each element,
/// starting from zero. Deterministic by construction; binding under the
/// usual MiMC security assumptions.
pub fn mimc_hash(elements: &[Fr]) -> Fr {
    let mut h = Fr::zero();
    for &m in elements {
        h = mimc_permute(h, m) + h + m;
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_are_stable_and_distinct() {
        let a = round_constants();
        let b = round_constants();
        assert_eq!(a.len(), MIMC_ROUNDS);
        assert_eq!(a, b);
        // A SHA-256 chain does not repeat in 110 steps.
        for i in 0..a.len() {
            for j in (i + 1)..a.len() {
                assert_ne!(a[i], a[j], "constants {i} and {j} collide");
            }
        }
    }

    #[test]
    fn test_hash_is_deterministic() {
        let input = [Fr::from(1u64), Fr::from(2u64), Fr::from(3u64)];
        assert_eq!(mimc_hash(&input), mimc_hash(&input));
    }

    #[test]
    fn test_hash_separates_single_element_changes() {
        let base = [Fr::from(1u64), Fr::from(2u64), Fr::from(3u64)];
        for i in 0..base.len() {
            let mut perturbed = base;
            perturbed[i] += Fr::from(1u64);
            assert_ne!(mimc_hash(&base), mimc_hash(&perturbed), "element {i}");
        }
    }

    #[test]
    fn test_hash_separates_lengths() {
        let short = [Fr::from(5u64)];
        let long = [Fr::from(5u64), Fr::from(0u64)];
        assert_ne!(mimc_hash(&short), mimc_hash(&long));
    }

    #[test]
    fn test_permutation_differs_from_identity() {
        let x = Fr::from(42u64);
        assert_ne!(mimc_permute(Fr::zero(), x), x);
    }
}
