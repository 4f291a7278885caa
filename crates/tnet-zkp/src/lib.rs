//! # tnet-zkp — Proof System Layer
//!
//! Defines the trait-based proof-system abstraction for the Tokennet Stack
//! and the transparent backend used for deterministic verification.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): the `ProofSystem` trait is the interface
//!   every backend must satisfy. It is the compile-time contract that keeps
//!   transparent and succinct implementations interchangeable: callers bind
//!   to a circuit's documented public-input order and nothing else.
//!
//! - **Transparent** (`transparent.rs`): `TransparentProofSystem` carries
//!   the full assignment as its proof and verifies by complete constraint
//!   evaluation. Deterministic and sound, but neither succinct nor
//!   zero-knowledge — the witness is the proof. Succinct backends slot in
//!   behind the same trait without touching any circuit.
//!
//! ## Error Taxonomy
//!
//! Proving errors ("cannot build a valid witness") and verification errors
//! ("proof rejected") are distinct types. A witness inconsistency is a
//! caller error, detected before proving and never retried; a rejected
//! proof is the verifier's verdict on someone else's claim.

pub mod traits;
pub mod transparent;

pub use traits::{ProofError, ProofSystem, VerifyError};
pub use transparent::{TransparentProof, TransparentProofSystem};
