//! # tnet-circuit — Constraint Encoding for Token-Flow Proofs
//!
//! Re-derives the stack's imperative semantics — firing a transition,
//! checking a win condition, ranking a poker hand, naming a showdown winner
//! — as rank-1 constraint systems over the BN254 scalar field, the form a
//! non-interactive proof system can verify.
//!
//! ## Architecture
//!
//! - **Constraint system** (`cs.rs`): variables, linear combinations, and
//!   labeled `a·b = c` gates, with full evaluation for the transparent
//!   verification path.
//! - **Builder** (`builder.rs`): one synthesis routine per circuit serves
//!   both sides — `Compile` mode yields the verifier's gate structure,
//!   `Prove` mode additionally yields the assignment and rejects an
//!   inconsistent witness at the first failing gate.
//! - **Gadgets** (`gadgets.rs`): zero-equality indicators, branch-free
//!   select, and fixed-width bit-decomposition range checks — the
//!   primitives that replace `if`, `==`, and `>=` over a finite field.
//! - **MiMC** (`mimc.rs`): the in-circuit commitment hash, mirroring
//!   `tnet-crypto` constant-for-constant.
//! - **Circuits**: `transition.rs`, `terminal.rs` (generated per net
//!   shape), `hand.rs` (the arithmetized classifier), and `showdown.rs`
//!   (the masked multi-party aggregate).
//!
//! ## Concurrency
//!
//! Synthesis is pure and deterministic in the circuit's shape; a compiled
//! [`ConstraintSystem`] is immutable and safely shared across threads.

pub mod builder;
pub mod cs;
pub mod error;
pub mod gadgets;
pub mod hand;
pub mod mimc;
pub mod showdown;
pub mod terminal;
pub mod transition;

pub use builder::{compile, solve, CircuitBuilder, Synthesize, SynthesisMode};
pub use cs::{ConstraintSystem, LinearCombination, Variable};
pub use error::CircuitError;
pub use hand::{evaluate_hand_gadget, HandWires, HAND_CARDS};
pub use showdown::{
    PartyClaim, PartyOpening, ShowdownCircuit, ShowdownPublic, NUM_COMMUNITY, NUM_HOLE,
};
pub use terminal::TerminalCircuit;
pub use transition::{TransitionCircuit, TransitionWitness};
