//! # tnet-crypto — Field-Native Hashing and Commitments
//!
//! Cryptographic primitives for the Tokennet Stack, all expressed over the
//! BN254 scalar field so that every operation performed here natively can be
//! recomputed inside a constraint system at low multiplicative degree.
//!
//! ## Architecture
//!
//! - **Field** (`field.rs`): the native field alias and small-integer/hex
//!   conversions. Everything committed in this system is first coerced into
//!   a field element.
//!
//! - **MiMC** (`mimc.rs`): the exponent-5 MiMC permutation with 110 rounds
//!   and a Miyaguchi–Preneel chaining mode. Deliberately simple algebra —
//!   three field multiplications per round — so the in-circuit mirror in
//!   `tnet-circuit` stays cheap.
//!
//! - **Commitments** (`commitment.rs`): domain-separated bindings of
//!   token-count vectors and salted hidden values to a single public root.
//!
//! ## Security Invariant
//!
//! The native hash here and the gadget in `tnet-circuit` share one set of
//! round constants, derived deterministically from a fixed seed tag. Every
//! circuit recomputes commitments in-circuit and compares against the public
//! root; soundness of the whole scheme rests on the two paths agreeing and
//! on the hash's computational binding.

pub mod commitment;
pub mod field;
pub mod mimc;

pub use commitment::{commit_hidden, commit_marking, domain, Root, Salt};
pub use field::{fr_from_hex, fr_to_hex, fr_to_u64, Fr};
pub use mimc::{mimc_hash, mimc_permute, round_constants, MIMC_ROUNDS};
