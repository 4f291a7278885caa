//! # Transparent Proof System
//!
//! A deterministic backend whose proof is the full satisfying assignment
//! plus a binding digest. Verification recompiles the circuit shape,
//! checks that the proof's public prefix equals the declared public inputs,
//! and evaluates every gate.
//!
//! ## Security Notice
//!
//! This backend is sound — a false claim has no accepting proof — but it is
//! neither succinct nor zero-knowledge: the assignment *is* the witness.
//! It is the reference backend for deterministic settlement and for testing
//! circuits; privacy-preserving deployments substitute a succinct backend
//! behind the same [`ProofSystem`] trait.

use ark_serialize::CanonicalSerialize;
use sha2::{Digest, Sha256};

use tnet_circuit::{compile, solve, CircuitError, Synthesize};
use tnet_crypto::Fr;

use crate::traits::{ProofError, ProofSystem, VerifyError};

/// A transparent proof: the assignment and a digest binding it.
#[derive(Debug, Clone)]
pub struct TransparentProof {
    /// The full variable assignment, public prefix included.
    pub assignment: Vec<Fr>,
    /// SHA-256 over the serialized assignment; a cheap integrity check for
    /// blobs that crossed a wire.
    pub binding: [u8; 32],
}

impl TransparentProof {
    fn bind(assignment: &[Fr]) -> [u8; 32] {
        let mut bytes = Vec::new();
        for value in assignment {
            // Serialization into a Vec cannot fail.
            let _ = value.serialize_compressed(&mut bytes);
        }
        let digest = Sha256::digest(&bytes);
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        out
    }
}

/// The transparent backend. Stateless; one instance serves any number of
/// concurrent prove/verify calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransparentProofSystem;

impl ProofSystem for TransparentProofSystem {
    type Proof = TransparentProof;

    fn prove(&self, circuit: &dyn Synthesize) -> Result<Self::Proof, ProofError> {
        // Prove-mode synthesis checks every gate as it is added, so an
        // inconsistent witness fails closed here, typed as a caller error.
        let (cs, assignment) = solve(circuit)?;
        tracing::debug!(
            gates = cs.num_gates(),
            variables = cs.num_variables(),
            "transparent proof generated"
        );
        let binding = TransparentProof::bind(&assignment);
        Ok(TransparentProof {
            assignment,
            binding,
        })
    }

    fn verify(
        &self,
        shape: &dyn Synthesize,
        public_inputs: &[Fr],
        proof: &Self::Proof,
    ) -> Result<(), VerifyError> {
        let cs = compile(shape)
            .map_err(|e| VerifyError::InvalidProof(format!("shape does not compile: {e}")))?;
        if proof.assignment.len() != cs.num_variables() {
            return Err(VerifyError::InvalidProof(format!(
                "assignment has {} values, circuit has {} variables",
                proof.assignment.len(),
                cs.num_variables()
            )));
        }
        if proof.binding != TransparentProof::bind(&proof.assignment) {
            return Err(VerifyError::InvalidProof(
                "binding digest does not match assignment".to_string(),
            ));
        }
        if public_inputs.len() != cs.num_public() {
            return Err(VerifyError::PublicInputMismatch(format!(
                "{} public inputs declared, circuit expects {}",
                public_inputs.len(),
                cs.num_public()
            )));
        }
        for (i, expected) in public_inputs.iter().enumerate() {
            if proof.assignment[i] != *expected {
                return Err(VerifyError::PublicInputMismatch(format!(
                    "public input {i} differs from the proof's binding"
                )));
            }
        }
        match cs.check(&proof.assignment) {
            Ok(()) => Ok(()),
            Err(CircuitError::Unsatisfied { label, .. }) => Err(VerifyError::Rejected { label }),
            Err(other) => Err(VerifyError::InvalidProof(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tnet_core::{Marking, NetDescription, PetriNet, TransitionId};
    use tnet_circuit::{TransitionCircuit, TransitionWitness};
    use tnet_crypto::commit_marking;

    fn chain_net() -> PetriNet {
        let desc: NetDescription = serde_json::from_str(
            r#"{
                "places": [
                    {"name": "start", "initial": 1},
                    {"name": "mid"},
                    {"name": "done"}
                ],
                "transitions": [
                    {"name": "advance", "inputs": ["start"], "outputs": ["mid"]},
                    {"name": "finish", "inputs": ["mid"], "outputs": ["done"]}
                ],
                "outcome_places": ["done"]
            }"#,
        )
        .expect("valid json");
        PetriNet::from_description(&desc).expect("valid net")
    }

    fn valid_firing(net: &PetriNet) -> (TransitionWitness, Vec<Fr>) {
        let pre = net.initial_marking().clone();
        let post = net.fire(&pre, TransitionId(0)).expect("enabled");
        let inputs = TransitionCircuit::public_inputs(
            &commit_marking(&pre),
            &commit_marking(&post),
            TransitionId(0),
        );
        (
            TransitionWitness {
                pre_marking: pre,
                post_marking: post,
                transition: TransitionId(0),
            },
            inputs,
        )
    }

    #[test]
    fn test_prove_then_verify_roundtrip() {
        let net = chain_net();
        let (witness, inputs) = valid_firing(&net);
        let circuit = TransitionCircuit::with_witness(&net, witness).expect("valid witness");
        let system = TransparentProofSystem;
        let proof = system.prove(&circuit).expect("provable");
        system
            .verify(&TransitionCircuit::blank(&net), &inputs, &proof)
            .expect("verifies");
    }

    #[test]
    fn test_verify_rejects_wrong_public_inputs() {
        let net = chain_net();
        let (witness, mut inputs) = valid_firing(&net);
        let circuit = TransitionCircuit::with_witness(&net, witness).expect("valid witness");
        let system = TransparentProofSystem;
        let proof = system.prove(&circuit).expect("provable");
        // Claim the other transition fired.
        inputs[2] = Fr::from(1u64);
        assert!(matches!(
            system.verify(&TransitionCircuit::blank(&net), &inputs, &proof),
            Err(VerifyError::PublicInputMismatch(_))
        ));
    }

    #[test]
    fn test_verify_rejects_tampered_assignment() {
        let net = chain_net();
        let (witness, inputs) = valid_firing(&net);
        let circuit = TransitionCircuit::with_witness(&net, witness).expect("valid witness");
        let system = TransparentProofSystem;
        let mut proof = system.prove(&circuit).expect("provable");
        // Flip a witness value deep in the assignment.
        let last = proof.assignment.len() - 1;
        proof.assignment[last] += Fr::from(1u64);
        let err = system
            .verify(&TransitionCircuit::blank(&net), &inputs, &proof)
            .expect_err("tampered");
        assert!(matches!(err, VerifyError::InvalidProof(_)));
    }

    #[test]
    fn test_verify_rejects_forged_relation() {
        let net = chain_net();
        let (witness, inputs) = valid_firing(&net);
        let circuit = TransitionCircuit::with_witness(&net, witness).expect("valid witness");
        let system = TransparentProofSystem;
        let mut proof = system.prove(&circuit).expect("provable");
        // Recompute the binding so only the relation check can catch it.
        let last = proof.assignment.len() - 1;
        proof.assignment[last] += Fr::from(1u64);
        proof.binding = TransparentProof::bind(&proof.assignment);
        let err = system
            .verify(&TransitionCircuit::blank(&net), &inputs, &proof)
            .expect_err("forged");
        assert!(matches!(err, VerifyError::Rejected { .. }));
    }

    #[test]
    fn test_prove_fails_closed_on_bad_witness() {
        let net = chain_net();
        let bad = TransitionWitness {
            pre_marking: net.initial_marking().clone(),
            post_marking: Marking::new(vec![1, 0, 1]),
            transition: TransitionId(1),
        };
        let circuit = TransitionCircuit::with_witness_unchecked(&net, bad);
        let system = TransparentProofSystem;
        assert!(matches!(
            system.prove(&circuit),
            Err(ProofError::Witness(_))
        ));
    }
}
