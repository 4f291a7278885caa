//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the Tokennet Stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! The hierarchy mirrors the three failure classes of the system:
//!
//! - **Topology errors** are fatal configuration defects detected at net
//!   construction, before any proving can occur.
//! - **Witness errors** are caller errors: the prepared private inputs do
//!   not satisfy the relation. They are detected locally, ideally before a
//!   prover is ever invoked, and are never retried.
//! - **Proof rejection** is the verification-time verdict on a claimed
//!   proof. It is kept distinct from witness errors so that a dishonest
//!   remote prover is never conflated with a local preparation bug.

use thiserror::Error;

use crate::identity::{PlaceId, TransitionId};

/// Top-level error type for the Tokennet Stack.
#[derive(Error, Debug)]
pub enum TnetError {
    /// Net topology is malformed (fatal, construction time).
    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),

    /// Private inputs do not satisfy the relation (caller error).
    #[error("witness error: {0}")]
    Witness(#[from] WitnessError),

    /// A claimed proof failed verification.
    #[error("proof rejected: {0}")]
    ProofRejected(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Fatal configuration defects in a net description.
///
/// Every variant aborts `PetriNet` construction. A net that passes
/// construction is structurally valid for the lifetime of the process.
#[derive(Error, Debug)]
pub enum TopologyError {
    /// A transition consumes from no place. Such a transition would be
    /// unconditionally enabled forever, which is rarely intended.
    #[error("transition {transition} has no input places")]
    NoInputs {
        /// The offending transition.
        transition: TransitionId,
    },

    /// A transition produces into no place.
    #[error("transition {transition} has no output places")]
    NoOutputs {
        /// The offending transition.
        transition: TransitionId,
    },

    /// An arc references a place name that is not declared.
    #[error("transition {transition_name:?} references unknown place {place_name:?}")]
    UnknownPlace {
        /// The transition whose arc list is bad.
        transition_name: String,
        /// The undeclared place name.
        place_name: String,
    },

    /// Two places share a name; arc resolution would be ambiguous.
    #[error("duplicate place name {name:?}")]
    DuplicatePlace {
        /// The repeated name.
        name: String,
    },

    /// An initial token count exceeds the bound used by the range checks.
    #[error("place {place} initial count {count} exceeds the {max} token bound")]
    InitialCountOverflow {
        /// The over-provisioned place.
        place: PlaceId,
        /// The declared count.
        count: u64,
        /// The enforced maximum.
        max: u64,
    },

    /// The net declares no outcome places, so no terminal proof can exist.
    #[error("net declares no outcome places")]
    NoOutcomePlaces,

    /// An outcome entry references a place name that is not declared.
    #[error("outcome list references unknown place {place_name:?}")]
    UnknownOutcomePlace {
        /// The undeclared name.
        place_name: String,
    },
}

/// Caller errors: the prepared private inputs cannot satisfy the relation.
///
/// All variants are terminal for the attempted operation and are never
/// retried — the inputs themselves are wrong, not the system.
#[derive(Error, Debug)]
pub enum WitnessError {
    /// A claimed opening does not hash to the public root.
    #[error("commitment mismatch: claimed opening does not match the public root")]
    CommitmentMismatch,

    /// The selected transition is not enabled under the pre-marking.
    #[error("transition {transition} not enabled: place {place} holds no token")]
    NotEnabled {
        /// The transition that was selected.
        transition: TransitionId,
        /// The empty input place.
        place: PlaceId,
    },

    /// A value expected to fit the declared bit width does not.
    #[error("range check failed for {context}: value does not fit {bits} bits")]
    RangeExceeded {
        /// What was being decomposed.
        context: String,
        /// The declared width.
        bits: usize,
    },

    /// The claimed post-marking is not the true effect of the transition.
    #[error("post-marking does not match the effect of transition {transition}")]
    EffectMismatch {
        /// The transition whose effect was claimed.
        transition: TransitionId,
    },

    /// A terminal claim names an outcome place that holds no token.
    #[error("outcome place {place} holds no token")]
    EmptyOutcome {
        /// The claimed outcome place.
        place: PlaceId,
    },

    /// A marking has the wrong number of places for its net.
    #[error("marking has {got} places, net declares {expected}")]
    MarkingLength {
        /// Length supplied.
        got: usize,
        /// Length the net requires.
        expected: usize,
    },

    /// A selector index is outside the declared set.
    #[error("index {index} out of bounds for {context} of size {size}")]
    IndexOutOfBounds {
        /// Which selector.
        context: String,
        /// The out-of-range value.
        index: usize,
        /// The declared set size.
        size: usize,
    },
}
