//! # Circuit Errors
//!
//! Failures while building a constraint system or while checking a witness
//! against it. Witness-level failures (an unsatisfied gate, a value that
//! does not fit its declared bit width) are caller errors in the taxonomy of
//! `tnet-core::error` — they are surfaced during `Prove`-mode synthesis,
//! before any proof backend runs.

use thiserror::Error;

use tnet_core::error::WitnessError;

/// Error during circuit synthesis or constraint evaluation.
#[derive(Error, Debug)]
pub enum CircuitError {
    /// A witness value required by `Prove`-mode synthesis was not supplied.
    #[error("witness value missing for {context}")]
    MissingAssignment {
        /// Which allocation lacked a value.
        context: String,
    },

    /// A gate is not satisfied by the current assignment.
    #[error("constraint {label:?} (gate {gate}) unsatisfied")]
    Unsatisfied {
        /// Index of the failing gate.
        gate: usize,
        /// The gate's label.
        label: String,
    },

    /// A value does not fit the declared bit width. In this stack this
    /// always means an ordering violation: the "non-negative" quantity
    /// being decomposed wrapped around the field.
    #[error("range check {label:?}: value does not fit {bits} bits")]
    RangeExceeded {
        /// The range check's label.
        label: String,
        /// The declared width.
        bits: usize,
    },

    /// An assignment vector does not match the constraint system's shape.
    #[error("assignment has {got} values, constraint system has {expected} variables")]
    AssignmentLength {
        /// Values supplied.
        got: usize,
        /// Variables declared.
        expected: usize,
    },

    /// Public inputs must form a fixed prefix of the variable order; a
    /// public allocation after the first witness allocation would break
    /// the documented input ordering.
    #[error("public input allocated after witness variables")]
    PublicAfterWitness,

    /// A pre-synthesis witness validation failed.
    #[error(transparent)]
    Witness(#[from] WitnessError),
}
