//! # Circuit Builder — Bimodal Synthesis
//!
//! One synthesis routine serves both sides of a proof:
//!
//! - **Compile mode** runs the routine with no witness and records only the
//!   gate structure. Value closures are never invoked; the result is the
//!   verifier's [`ConstraintSystem`].
//! - **Prove mode** additionally evaluates every allocation and checks each
//!   gate the moment it is added. An inconsistent witness is rejected at the
//!   first failing gate — before any proof backend runs — with the gate's
//!   label naming what went wrong.
//!
//! Because both modes execute the same routine, the gate structure cannot
//! drift between prover and verifier. The one rule circuits must obey is
//! that gate creation never depends on witness *values* (all loops and
//! branches are over static shape), which every circuit in this crate
//! satisfies by construction.
//!
//! Public inputs are allocated first and form a fixed prefix of the
//! variable order; the builder rejects a public allocation after the first
//! witness allocation so the documented input ordering cannot be violated.

use ark_ff::Zero;

use tnet_crypto::{fr_to_u64, Fr};

use crate::cs::{ConstraintSystem, Gate, LinearCombination, Variable};
use crate::error::CircuitError;

/// Which side of the proof a synthesis run serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisMode {
    /// Gate structure only; witness closures are not invoked.
    Compile,
    /// Gate structure plus a full assignment, checked eagerly.
    Prove,
}

/// Accumulates gates (and, in `Prove` mode, the assignment) during one
/// synthesis run.
#[derive(Debug)]
pub struct CircuitBuilder {
    mode: SynthesisMode,
    gates: Vec<Gate>,
    assignment: Vec<Fr>,
    num_public: usize,
    witness_started: bool,
}

impl CircuitBuilder {
    /// A builder for the verifier's side: gate structure only.
    pub fn compile() -> Self {
        Self::new(SynthesisMode::Compile)
    }

    /// A builder for the prover's side: gates plus eager-checked assignment.
    pub fn prove() -> Self {
        Self::new(SynthesisMode::Prove)
    }

    fn new(mode: SynthesisMode) -> Self {
        Self {
            mode,
            gates: Vec::new(),
            assignment: Vec::new(),
            num_public: 0,
            witness_started: false,
        }
    }

    /// The active synthesis mode.
    pub fn mode(&self) -> SynthesisMode {
        self.mode
    }

    /// Whether this run carries an assignment.
    pub fn is_prove(&self) -> bool {
        self.mode == SynthesisMode::Prove
    }

    /// Allocate a public input.
    ///
    /// In `Prove` mode the value is required; in `Compile` mode it is
    /// ignored. Public inputs must all be allocated before the first
    /// witness variable.
    pub fn alloc_public(
        &mut self,
        context: &str,
        value: Option<Fr>,
    ) -> Result<Variable, CircuitError> {
        if self.witness_started {
            return Err(CircuitError::PublicAfterWitness);
        }
        let value = match (self.mode, value) {
            (SynthesisMode::Prove, Some(v)) => v,
            (SynthesisMode::Prove, None) => {
                return Err(CircuitError::MissingAssignment {
                    context: context.to_string(),
                })
            }
            (SynthesisMode::Compile, _) => Fr::zero(),
        };
        self.num_public += 1;
        Ok(self.push(value))
    }

    /// Allocate a witness variable. The closure is invoked only in `Prove`
    /// mode; `Compile` mode records the slot and moves on.
    pub fn alloc_witness<F>(&mut self, value: F) -> Result<Variable, CircuitError>
    where
        F: FnOnce() -> Result<Fr, CircuitError>,
    {
        self.witness_started = true;
        let value = match self.mode {
            SynthesisMode::Prove => value()?,
            SynthesisMode::Compile => Fr::zero(),
        };
        Ok(self.push(value))
    }

    fn push(&mut self, value: Fr) -> Variable {
        let var = Variable(self.assignment.len() as u32);
        self.assignment.push(value);
        var
    }

    /// Evaluate a linear combination under the current assignment.
    /// Meaningful only in `Prove` mode (zeros otherwise); used by gadgets
    /// to derive hint values for their own allocations.
    pub fn value(&self, lc: &LinearCombination) -> Fr {
        lc.evaluate(&self.assignment)
    }

    /// Evaluate a linear combination as a small integer. Only meaningful
    /// for values the circuit range-bounds to 64 bits or less.
    pub fn value_u64(&self, lc: &LinearCombination) -> u64 {
        fr_to_u64(&self.value(lc))
    }

    /// Add the gate `a · b = c`.
    ///
    /// In `Prove` mode the gate is checked immediately; an unsatisfied gate
    /// means the witness cannot satisfy the relation, reported with this
    /// gate's label.
    pub fn enforce(
        &mut self,
        label: impl Into<String>,
        a: LinearCombination,
        b: LinearCombination,
        c: LinearCombination,
    ) -> Result<(), CircuitError> {
        let label = label.into();
        if self.is_prove() {
            let av = a.evaluate(&self.assignment);
            let bv = b.evaluate(&self.assignment);
            let cv = c.evaluate(&self.assignment);
            if av * bv != cv {
                return Err(CircuitError::Unsatisfied {
                    gate: self.gates.len(),
                    label,
                });
            }
        }
        self.gates.push(Gate { a, b, c, label });
        Ok(())
    }

    /// Enforce `lc == 0`.
    pub fn enforce_zero(
        &mut self,
        label: impl Into<String>,
        lc: LinearCombination,
    ) -> Result<(), CircuitError> {
        self.enforce(label, lc, LinearCombination::one(), LinearCombination::zero())
    }

    /// Enforce `a == b`.
    pub fn enforce_equal(
        &mut self,
        label: impl Into<String>,
        a: LinearCombination,
        b: LinearCombination,
    ) -> Result<(), CircuitError> {
        self.enforce_zero(label, a - b)
    }

    /// Finish the run, yielding the compiled system and (in `Prove` mode)
    /// the full assignment.
    pub fn finish(self) -> (ConstraintSystem, Vec<Fr>) {
        let cs = ConstraintSystem {
            num_public: self.num_public,
            num_variables: self.assignment.len(),
            gates: self.gates,
        };
        (cs, self.assignment)
    }
}

/// A circuit that can synthesize itself into a builder.
///
/// Implementations must generate an identical gate structure in both modes;
/// only allocated *values* may differ. The final text of every public-input
/// ordering is documented on the implementing type.
pub trait Synthesize {
    /// Run the circuit's synthesis routine.
    fn synthesize(&self, builder: &mut CircuitBuilder) -> Result<(), CircuitError>;
}

/// Compile a circuit's gate structure (the verifier's view).
pub fn compile(circuit: &dyn Synthesize) -> Result<ConstraintSystem, CircuitError> {
    let mut builder = CircuitBuilder::compile();
    circuit.synthesize(&mut builder)?;
    let (cs, _) = builder.finish();
    tracing::debug!(
        gates = cs.num_gates(),
        variables = cs.num_variables(),
        public = cs.num_public(),
        "compiled constraint system"
    );
    Ok(cs)
}

/// Synthesize a circuit with its witness, yielding the compiled system and
/// the satisfying assignment (the prover's view). Fails closed on the first
/// inconsistency, before any proof backend is invoked.
pub fn solve(circuit: &dyn Synthesize) -> Result<(ConstraintSystem, Vec<Fr>), CircuitError> {
    let mut builder = CircuitBuilder::prove();
    circuit.synthesize(&mut builder)?;
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    // x (public), y (witness), constraint x * y = 6.
    struct Product {
        x: Option<Fr>,
        y: Option<Fr>,
    }

    impl Synthesize for Product {
        fn synthesize(&self, b: &mut CircuitBuilder) -> Result<(), CircuitError> {
            let x = b.alloc_public("x", self.x)?;
            let y_value = self.y;
            let y = b.alloc_witness(|| {
                y_value.ok_or(CircuitError::MissingAssignment {
                    context: "y".to_string(),
                })
            })?;
            b.enforce(
                "product is six",
                x.into(),
                y.into(),
                LinearCombination::constant_u64(6),
            )
        }
    }

    #[test]
    fn test_compile_without_witness() {
        let cs = compile(&Product { x: None, y: None }).expect("compiles");
        assert_eq!(cs.num_public(), 1);
        assert_eq!(cs.num_variables(), 2);
        assert_eq!(cs.num_gates(), 1);
    }

    #[test]
    fn test_solve_with_valid_witness() {
        let (cs, assignment) = solve(&Product {
            x: Some(Fr::from(2u64)),
            y: Some(Fr::from(3u64)),
        })
        .expect("satisfiable");
        cs.check(&assignment).expect("assignment satisfies");
        assert_eq!(assignment[0], Fr::from(2u64));
    }

    #[test]
    fn test_solve_rejects_bad_witness_eagerly() {
        let err = solve(&Product {
            x: Some(Fr::from(2u64)),
            y: Some(Fr::from(4u64)),
        })
        .expect_err("unsatisfiable");
        assert!(matches!(err, CircuitError::Unsatisfied { .. }));
    }

    #[test]
    fn test_prove_requires_public_values() {
        let err = solve(&Product {
            x: None,
            y: Some(Fr::from(3u64)),
        })
        .expect_err("missing public");
        assert!(matches!(err, CircuitError::MissingAssignment { .. }));
    }

    #[test]
    fn test_modes_agree_on_shape() {
        let compiled = compile(&Product { x: None, y: None }).expect("compiles");
        let (solved, _) = solve(&Product {
            x: Some(Fr::from(1u64)),
            y: Some(Fr::from(6u64)),
        })
        .expect("satisfiable");
        assert_eq!(compiled.num_gates(), solved.num_gates());
        assert_eq!(compiled.num_variables(), solved.num_variables());
        assert_eq!(compiled.num_public(), solved.num_public());
    }
}
