//! # Proof System Trait
//!
//! The abstract interface for proof backends. All implementations must
//! satisfy this trait so that the transparent backend and future succinct
//! ones are interchangeable at compile time.
//!
//! ## Security Invariant
//!
//! The trait requires `Send + Sync`: proving and verifying are pure
//! functions of (circuit, witness) and (shape, public inputs, proof)
//! respectively, with no shared mutable state, so calls may run freely on
//! worker pools. Cancellation, if needed, is an external deadline around a
//! whole call — constraint evaluation is not interruptible mid-way.

use thiserror::Error;

use tnet_circuit::{CircuitError, Synthesize};
use tnet_crypto::Fr;

/// Error during proof generation.
#[derive(Error, Debug)]
pub enum ProofError {
    /// The private inputs cannot satisfy the relation. A caller error:
    /// detected locally before any proving work, never retried.
    #[error("cannot build a valid witness: {0}")]
    Witness(#[source] CircuitError),

    /// Internal prover failure (malformed circuit, backend fault).
    #[error("prover error: {0}")]
    Prover(String),
}

impl From<CircuitError> for ProofError {
    fn from(err: CircuitError) -> Self {
        match err {
            CircuitError::Unsatisfied { .. }
            | CircuitError::RangeExceeded { .. }
            | CircuitError::MissingAssignment { .. }
            | CircuitError::Witness(_) => ProofError::Witness(err),
            other => ProofError::Prover(other.to_string()),
        }
    }
}

/// Error during proof verification.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The proof blob is malformed or does not fit the circuit shape.
    #[error("invalid proof: {0}")]
    InvalidProof(String),

    /// The proof does not bind the declared public inputs.
    #[error("public input mismatch: {0}")]
    PublicInputMismatch(String),

    /// The relation itself is unsatisfied — the claim is false.
    #[error("proof rejected: constraint {label:?}")]
    Rejected {
        /// Label of the failing constraint.
        label: String,
    },
}

/// Abstract interface for a proof backend.
///
/// `prove` consumes a circuit instance populated with its witness;
/// `verify` consumes the blank shape, the public inputs in the circuit's
/// documented order, and a proof. Both are pure and thread-safe.
pub trait ProofSystem: Send + Sync {
    /// The proof type produced by this backend.
    type Proof: Send + Sync;

    /// Generate a proof for a witness-populated circuit.
    fn prove(&self, circuit: &dyn Synthesize) -> Result<Self::Proof, ProofError>;

    /// Verify a proof against a blank circuit shape and its declared
    /// public inputs.
    fn verify(
        &self,
        shape: &dyn Synthesize,
        public_inputs: &[Fr],
        proof: &Self::Proof,
    ) -> Result<(), VerifyError>;
}
