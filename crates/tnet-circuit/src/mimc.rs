//! # In-Circuit MiMC
//!
//! The constraint-system mirror of `tnet-crypto::mimc`, constant-for-
//! constant. Each round of `(state + key + c_r)^5` costs three
//! multiplication gates (square, square, multiply); the chaining mode and
//! domain-tag layout match the native path exactly, which is what lets every
//! circuit recompute a published commitment root over its private inputs.

use tnet_crypto::{commitment, round_constants};

use crate::builder::CircuitBuilder;
use crate::cs::{LinearCombination, Variable};
use crate::error::CircuitError;

/// One keyed MiMC permutation over linear combinations.
pub fn mimc_permute_gadget(
    b: &mut CircuitBuilder,
    key: &LinearCombination,
    input: &LinearCombination,
) -> Result<LinearCombination, CircuitError> {
    let mut state = input.clone();
    for (round, c) in round_constants().iter().enumerate() {
        let t = state + key.clone() + LinearCombination::constant(*c);
        let t2 = b.mul(format!("mimc round {round}: t^2"), &t, &t)?;
        let t2_lc = LinearCombination::from(t2);
        let t4 = b.mul(format!("mimc round {round}: t^4"), &t2_lc, &t2_lc)?;
        let t5 = b.mul(format!("mimc round {round}: t^5"), &t4.into(), &t)?;
        state = t5.into();
    }
    Ok(state + key.clone())
}

/// Miyaguchi–Preneel hash over a sequence of linear combinations, mirroring
/// `tnet_crypto::mimc_hash`.
pub fn mimc_hash_gadget(
    b: &mut CircuitBuilder,
    elements: &[LinearCombination],
) -> Result<LinearCombination, CircuitError> {
    let mut h = LinearCombination::zero();
    for m in elements {
        let permuted = mimc_permute_gadget(b, &h, m)?;
        h = permuted + h + m.clone();
    }
    Ok(h)
}

/// Recompute a marking/state commitment root over token-count variables,
/// mirroring `tnet_crypto::commit_marking`.
pub fn commit_marking_gadget(
    b: &mut CircuitBuilder,
    counts: &[Variable],
) -> Result<LinearCombination, CircuitError> {
    let mut elements = Vec::with_capacity(1 + counts.len());
    elements.push(LinearCombination::constant(commitment::domain::state()));
    elements.extend(counts.iter().map(|&v| LinearCombination::from(v)));
    mimc_hash_gadget(b, &elements)
}

/// Recompute a salted hidden-value commitment root, mirroring
/// `tnet_crypto::commit_hidden`.
pub fn commit_hidden_gadget(
    b: &mut CircuitBuilder,
    values: &[LinearCombination],
    salt: &LinearCombination,
) -> Result<LinearCombination, CircuitError> {
    let mut elements = Vec::with_capacity(2 + values.len());
    elements.push(LinearCombination::constant(commitment::domain::hidden()));
    elements.extend(values.iter().cloned());
    elements.push(salt.clone());
    mimc_hash_gadget(b, &elements)
}
