//! # Transition Circuit
//!
//! Proves that a committed pre-state advanced to a committed post-state by
//! one valid firing of a publicly-selected transition, without revealing
//! either marking.
//!
//! ## Public inputs (in order)
//!
//! 1. `pre_root` — commitment to the pre-marking.
//! 2. `post_root` — commitment to the post-marking.
//! 3. `selected` — index of the transition that fired.
//!
//! ## Relation
//!
//! With private markings `pre`, `post`:
//!
//! 1. `commit(pre) == pre_root` and `commit(post) == post_root`.
//! 2. For every transition `t`, an indicator `ind_t = (selected == t)`,
//!    with `Σ ind_t == 1`. The per-place token delta is the indicator-
//!    weighted sum of every transition's statically-known effect — the
//!    branch-free form of "one of N fixed behaviors, chosen at proof time".
//! 3. `post[p] == pre[p] + delta[p]` for every place.
//! 4. Enabledness: for every place, `pre[p] − required[p]` decomposes into
//!    8 bits, where `required[p]` is the indicator-weighted count of tokens
//!    the selected transition consumes there. A disabled firing makes the
//!    difference wrap and the decomposition unsatisfiable.
//!
//! The circuit's gate structure is generated from the net's shape; one
//! compiled system serves every proof for that net.

use tnet_core::error::WitnessError;
use tnet_core::{Marking, PetriNet, PlaceId, TransitionId, TOKEN_BITS};
use tnet_crypto::{commit_marking, Fr, Root};

use crate::builder::{CircuitBuilder, Synthesize};
use crate::cs::{LinearCombination, Variable};
use crate::error::CircuitError;
use crate::mimc::commit_marking_gadget;

/// Private inputs for one firing proof.
#[derive(Debug, Clone)]
pub struct TransitionWitness {
    /// The full marking before the firing.
    pub pre_marking: Marking,
    /// The full marking after the firing.
    pub post_marking: Marking,
    /// The transition that fired.
    pub transition: TransitionId,
}

#[derive(Debug, Clone, Copy)]
struct TransitionPublic {
    pre_root: Fr,
    post_root: Fr,
    selected: Fr,
}

/// The transition-validity circuit for one net shape.
#[derive(Debug)]
pub struct TransitionCircuit<'a> {
    net: &'a PetriNet,
    public: Option<TransitionPublic>,
    witness: Option<TransitionWitness>,
}

impl<'a> TransitionCircuit<'a> {
    /// The verifier's instance: shape only, no witness.
    pub fn blank(net: &'a PetriNet) -> Self {
        Self {
            net,
            public: None,
            witness: None,
        }
    }

    /// The prover's instance. Validates the witness against the net's
    /// native semantics first, so an inconsistent witness is reported as a
    /// typed caller error before any synthesis or proving happens.
    pub fn with_witness(
        net: &'a PetriNet,
        witness: TransitionWitness,
    ) -> Result<Self, WitnessError> {
        net.check_marking(&witness.pre_marking)?;
        net.check_marking(&witness.post_marking)?;
        if witness.transition.index() >= net.num_transitions() {
            return Err(WitnessError::IndexOutOfBounds {
                context: "transition selector".to_string(),
                index: witness.transition.index(),
                size: net.num_transitions(),
            });
        }
        let expected = net.fire(&witness.pre_marking, witness.transition)?;
        if expected != witness.post_marking {
            return Err(WitnessError::EffectMismatch {
                transition: witness.transition,
            });
        }
        Ok(Self::assemble(net, witness))
    }

    /// The prover's instance without pre-validation. Exists so tests can
    /// drive inconsistent witnesses into the constraint layer itself.
    pub fn with_witness_unchecked(net: &'a PetriNet, witness: TransitionWitness) -> Self {
        Self::assemble(net, witness)
    }

    fn assemble(net: &'a PetriNet, witness: TransitionWitness) -> Self {
        let public = TransitionPublic {
            pre_root: commit_marking(&witness.pre_marking).as_field(),
            post_root: commit_marking(&witness.post_marking).as_field(),
            selected: Fr::from(witness.transition.index() as u64),
        };
        Self {
            net,
            public: Some(public),
            witness: Some(witness),
        }
    }

    /// The public-input vector a verifier binds to, in the documented
    /// order: `[pre_root, post_root, selected]`.
    pub fn public_inputs(pre_root: &Root, post_root: &Root, transition: TransitionId) -> Vec<Fr> {
        vec![
            pre_root.as_field(),
            post_root.as_field(),
            Fr::from(transition.index() as u64),
        ]
    }

    fn alloc_marking(
        &self,
        b: &mut CircuitBuilder,
        which: &'static str,
        marking: Option<&Marking>,
    ) -> Result<Vec<Variable>, CircuitError> {
        let mut vars = Vec::with_capacity(self.net.num_places());
        for p in 0..self.net.num_places() {
            let value = marking.map(|m| Fr::from(m.count(PlaceId(p))));
            let var = b.alloc_witness(move || {
                value.ok_or_else(|| CircuitError::MissingAssignment {
                    context: format!("{which} marking, place {p}"),
                })
            })?;
            b.assert_in_range(format!("{which} marking place {p}"), &var.into(), TOKEN_BITS)?;
            vars.push(var);
        }
        Ok(vars)
    }
}

impl Synthesize for TransitionCircuit<'_> {
    fn synthesize(&self, b: &mut CircuitBuilder) -> Result<(), CircuitError> {
        let num_places = self.net.num_places();
        let num_transitions = self.net.num_transitions();

        let pre_root = b.alloc_public("pre-state root", self.public.map(|p| p.pre_root))?;
        let post_root = b.alloc_public("post-state root", self.public.map(|p| p.post_root))?;
        let selected = b.alloc_public("selected transition", self.public.map(|p| p.selected))?;

        let pre = self.alloc_marking(b, "pre", self.witness.as_ref().map(|w| &w.pre_marking))?;
        let post =
            self.alloc_marking(b, "post", self.witness.as_ref().map(|w| &w.post_marking))?;

        let pre_commit = commit_marking_gadget(b, &pre)?;
        b.enforce_zero("pre-state commitment", pre_commit - pre_root.into())?;
        let post_commit = commit_marking_gadget(b, &post)?;
        b.enforce_zero("post-state commitment", post_commit - post_root.into())?;

        // One indicator per transition; exactly one may be set, which also
        // binds the public selector into [0, num_transitions).
        let selected_lc = LinearCombination::from(selected);
        let mut indicators = Vec::with_capacity(num_transitions);
        let mut indicator_sum = LinearCombination::zero();
        for t in 0..num_transitions {
            let ind = b.is_equal_const(
                format!("transition {t} indicator"),
                &selected_lc,
                t as u64,
            )?;
            indicator_sum = indicator_sum + ind.into();
            indicators.push(ind);
        }
        b.enforce_zero(
            "exactly one transition selected",
            indicator_sum - LinearCombination::one(),
        )?;

        for p in 0..num_places {
            // delta[p] = Σ_t ind_t · (tokens produced − tokens consumed at p);
            // required[p] = Σ_t ind_t · tokens consumed at p. Both are pure
            // linear combinations over the indicators — no extra gates.
            let mut delta = LinearCombination::zero();
            let mut required = LinearCombination::zero();
            let mut any_input = false;
            for t in 0..num_transitions {
                let tid = TransitionId(t);
                let produced = self
                    .net
                    .outputs(tid)
                    .iter()
                    .filter(|q| q.index() == p)
                    .count() as u64;
                let consumed = self
                    .net
                    .inputs(tid)
                    .iter()
                    .filter(|q| q.index() == p)
                    .count() as u64;
                if produced > 0 {
                    delta = delta.add_term(indicators[t], Fr::from(produced));
                }
                if consumed > 0 {
                    delta = delta.add_term(indicators[t], -Fr::from(consumed));
                    required = required.add_term(indicators[t], Fr::from(consumed));
                    any_input = true;
                }
            }
            b.enforce_zero(
                format!("conservation at place {p}"),
                LinearCombination::from(post[p]) - LinearCombination::from(pre[p]) - delta,
            )?;
            // Enabledness: pre[p] − required[p] must be non-negative. Only
            // places some transition consumes from can ever violate this.
            if any_input {
                b.assert_in_range(
                    format!("enabledness at place {p}"),
                    &(LinearCombination::from(pre[p]) - required),
                    TOKEN_BITS,
                )?;
            }
        }
        Ok(())
    }
}
