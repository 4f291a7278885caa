//! # Terminal Circuit
//!
//! Proves that a committed marking has at least one token in a publicly
//! claimed outcome place — the win/end condition — without revealing the
//! rest of the state.
//!
//! ## Public inputs (in order)
//!
//! 1. `root` — commitment to the marking.
//! 2. `outcome` — index of the claimed outcome place.
//!
//! ## Relation
//!
//! 1. `commit(marking) == root`.
//! 2. `outcome` is one of the net's declared outcome places (indicator sum
//!    over the declared set equals one).
//! 3. The token count selected at the claimed place — again an indicator-
//!    weighted sum — minus one decomposes into 8 bits, i.e. the place holds
//!    at least one token.

use tnet_core::error::WitnessError;
use tnet_core::{Marking, PetriNet, PlaceId, TOKEN_BITS};
use tnet_crypto::{commit_marking, Fr, Root};

use crate::builder::{CircuitBuilder, Synthesize};
use crate::cs::LinearCombination;
use crate::error::CircuitError;
use crate::mimc::commit_marking_gadget;

#[derive(Debug, Clone, Copy)]
struct TerminalPublic {
    root: Fr,
    outcome: Fr,
}

/// The terminal-condition circuit for one net shape.
#[derive(Debug)]
pub struct TerminalCircuit<'a> {
    net: &'a PetriNet,
    public: Option<TerminalPublic>,
    witness: Option<Marking>,
}

impl<'a> TerminalCircuit<'a> {
    /// The verifier's instance: shape only, no witness.
    pub fn blank(net: &'a PetriNet) -> Self {
        Self {
            net,
            public: None,
            witness: None,
        }
    }

    /// The prover's instance. Validates the claim against the marking
    /// natively first, so a bad claim is a typed caller error before any
    /// synthesis.
    pub fn with_witness(
        net: &'a PetriNet,
        marking: Marking,
        outcome: PlaceId,
    ) -> Result<Self, WitnessError> {
        net.check_marking(&marking)?;
        if !net.outcome_places().contains(&outcome) {
            return Err(WitnessError::IndexOutOfBounds {
                context: "outcome place".to_string(),
                index: outcome.index(),
                size: net.num_places(),
            });
        }
        if marking.count(outcome) == 0 {
            return Err(WitnessError::EmptyOutcome { place: outcome });
        }
        Ok(Self::assemble(net, marking, outcome))
    }

    /// The prover's instance without pre-validation, for driving bad claims
    /// into the constraint layer in tests.
    pub fn with_witness_unchecked(net: &'a PetriNet, marking: Marking, outcome: PlaceId) -> Self {
        Self::assemble(net, marking, outcome)
    }

    fn assemble(net: &'a PetriNet, marking: Marking, outcome: PlaceId) -> Self {
        let public = TerminalPublic {
            root: commit_marking(&marking).as_field(),
            outcome: Fr::from(outcome.index() as u64),
        };
        Self {
            net,
            public: Some(public),
            witness: Some(marking),
        }
    }

    /// The public-input vector a verifier binds to, in the documented
    /// order: `[root, outcome]`.
    pub fn public_inputs(root: &Root, outcome: PlaceId) -> Vec<Fr> {
        vec![root.as_field(), Fr::from(outcome.index() as u64)]
    }
}

impl Synthesize for TerminalCircuit<'_> {
    fn synthesize(&self, b: &mut CircuitBuilder) -> Result<(), CircuitError> {
        let root = b.alloc_public("state root", self.public.map(|p| p.root))?;
        let outcome = b.alloc_public("outcome place", self.public.map(|p| p.outcome))?;

        let marking = self.witness.as_ref();
        let mut counts = Vec::with_capacity(self.net.num_places());
        for p in 0..self.net.num_places() {
            let value = marking.map(|m| Fr::from(m.count(PlaceId(p))));
            let var = b.alloc_witness(move || {
                value.ok_or_else(|| CircuitError::MissingAssignment {
                    context: format!("marking place {p}"),
                })
            })?;
            b.assert_in_range(format!("marking place {p}"), &var.into(), TOKEN_BITS)?;
            counts.push(var);
        }

        let commit = commit_marking_gadget(b, &counts)?;
        b.enforce_zero("state commitment", commit - root.into())?;

        // The claim must name a declared outcome place, and the count
        // selected there must be at least one.
        let outcome_lc = LinearCombination::from(outcome);
        let mut indicator_sum = LinearCombination::zero();
        let mut selected_count = LinearCombination::zero();
        for &place in self.net.outcome_places() {
            let ind = b.is_equal_const(
                format!("outcome {place} indicator"),
                &outcome_lc,
                place.index() as u64,
            )?;
            indicator_sum = indicator_sum + ind.into();
            let contribution = b.mul(
                format!("tokens if outcome is {place}"),
                &ind.into(),
                &counts[place.index()].into(),
            )?;
            selected_count = selected_count + contribution.into();
        }
        b.enforce_zero(
            "claimed outcome is a declared outcome place",
            indicator_sum - LinearCombination::one(),
        )?;
        b.assert_in_range(
            "outcome place occupied",
            &(selected_count - LinearCombination::one()),
            TOKEN_BITS,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{compile, solve};
    use tnet_core::NetDescription;

    fn race_net() -> PetriNet {
        let desc: NetDescription = serde_json::from_str(
            r#"{
                "places": [
                    {"name": "running", "initial": 1},
                    {"name": "alpha_wins"},
                    {"name": "beta_wins"}
                ],
                "transitions": [
                    {"name": "alpha", "inputs": ["running"], "outputs": ["alpha_wins"]},
                    {"name": "beta", "inputs": ["running"], "outputs": ["beta_wins"]}
                ],
                "outcome_places": ["alpha_wins", "beta_wins"]
            }"#,
        )
        .expect("valid json");
        PetriNet::from_description(&desc).expect("valid net")
    }

    #[test]
    fn test_occupied_outcome_satisfies_circuit() {
        let net = race_net();
        let marking = Marking::new(vec![0, 1, 0]);
        let circuit =
            TerminalCircuit::with_witness(&net, marking, PlaceId(1)).expect("valid claim");
        let (cs, assignment) = solve(&circuit).expect("satisfiable");
        cs.check(&assignment).expect("assignment satisfies");
    }

    #[test]
    fn test_public_input_prefix_matches_documented_order() {
        let net = race_net();
        let marking = Marking::new(vec![0, 1, 0]);
        let root = commit_marking(&marking);
        let circuit =
            TerminalCircuit::with_witness(&net, marking, PlaceId(1)).expect("valid claim");
        let (cs, assignment) = solve(&circuit).expect("satisfiable");
        let expected = TerminalCircuit::public_inputs(&root, PlaceId(1));
        assert_eq!(cs.num_public(), expected.len());
        assert_eq!(&assignment[..expected.len()], &expected[..]);
    }

    #[test]
    fn test_prevalidation_rejects_empty_outcome() {
        let net = race_net();
        let marking = Marking::new(vec![0, 1, 0]);
        assert!(matches!(
            TerminalCircuit::with_witness(&net, marking, PlaceId(2)),
            Err(WitnessError::EmptyOutcome { place: PlaceId(2) })
        ));
    }

    #[test]
    fn test_circuit_rejects_empty_outcome() {
        let net = race_net();
        let marking = Marking::new(vec![0, 1, 0]);
        let circuit = TerminalCircuit::with_witness_unchecked(&net, marking, PlaceId(2));
        assert!(solve(&circuit).is_err());
    }

    #[test]
    fn test_rejects_claim_on_non_outcome_place() {
        let net = race_net();
        // "running" is occupied but not a declared outcome place.
        let marking = Marking::new(vec![1, 0, 0]);
        assert!(matches!(
            TerminalCircuit::with_witness(&net, marking.clone(), PlaceId(0)),
            Err(WitnessError::IndexOutOfBounds { .. })
        ));
        let circuit = TerminalCircuit::with_witness_unchecked(&net, marking, PlaceId(0));
        assert!(solve(&circuit).is_err());
    }

    #[test]
    fn test_verification_rejects_swapped_outcome_claim() {
        let net = race_net();
        let marking = Marking::new(vec![0, 1, 0]);
        let circuit =
            TerminalCircuit::with_witness(&net, marking, PlaceId(1)).expect("valid claim");
        let (cs, mut assignment) = solve(&circuit).expect("satisfiable");
        // Re-point the public claim at the other outcome place.
        assignment[1] = Fr::from(2u64);
        assert!(cs.check(&assignment).is_err());
    }

    #[test]
    fn test_compile_and_prove_agree_on_shape() {
        let net = race_net();
        let compiled = compile(&TerminalCircuit::blank(&net)).expect("compiles");
        let circuit = TerminalCircuit::with_witness(&net, Marking::new(vec![0, 0, 1]), PlaceId(2))
            .expect("valid claim");
        let (solved, assignment) = solve(&circuit).expect("satisfiable");
        assert_eq!(compiled.num_gates(), solved.num_gates());
        compiled.check(&assignment).expect("verifier view accepts");
    }
}
