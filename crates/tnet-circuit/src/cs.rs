//! # Rank-1 Constraint System
//!
//! The compiled form of every circuit in the stack: a list of gates
//! `⟨a, w⟩ · ⟨b, w⟩ = ⟨c, w⟩` over linear combinations of variables, where
//! the first `num_public` variables are the circuit's public inputs in their
//! documented order.
//!
//! The gate structure of any circuit here is a pure function of shape (net
//! topology, party count) — never of witness values — so a compiled system
//! can be built once per shape and shared read-only across threads.

use tnet_crypto::Fr;

use crate::error::CircuitError;

/// A variable: an index into the assignment vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable(pub(crate) u32);

impl Variable {
    /// The assignment-vector index.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A weighted sum of variables plus a constant:
/// `constant + Σ coeff_i · var_i`.
#[derive(Debug, Clone)]
pub struct LinearCombination {
    pub(crate) terms: Vec<(Variable, Fr)>,
    pub(crate) constant: Fr,
}

impl LinearCombination {
    /// The empty combination (zero).
    pub fn zero() -> Self {
        use ark_ff::Zero;
        Self {
            terms: Vec::new(),
            constant: Fr::zero(),
        }
    }

    /// The constant one.
    pub fn one() -> Self {
        Self::constant(Fr::from(1u64))
    }

    /// A pure constant.
    pub fn constant(value: Fr) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// A small-integer constant.
    pub fn constant_u64(value: u64) -> Self {
        Self::constant(Fr::from(value))
    }

    /// Append a weighted variable term.
    pub fn add_term(mut self, var: Variable, coeff: Fr) -> Self {
        self.terms.push((var, coeff));
        self
    }

    /// Multiply every term and the constant by a scalar.
    pub fn scale(mut self, factor: Fr) -> Self {
        for (_, coeff) in &mut self.terms {
            *coeff *= factor;
        }
        self.constant *= factor;
        self
    }

    /// Evaluate under an assignment.
    pub fn evaluate(&self, assignment: &[Fr]) -> Fr {
        let mut acc = self.constant;
        for (var, coeff) in &self.terms {
            acc += assignment[var.index()] * coeff;
        }
        acc
    }
}

impl From<Variable> for LinearCombination {
    fn from(var: Variable) -> Self {
        Self::zero().add_term(var, Fr::from(1u64))
    }
}

impl std::ops::Add for LinearCombination {
    type Output = Self;
    fn add(mut self, rhs: Self) -> Self {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl std::ops::Sub for LinearCombination {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self + rhs.neg()
    }
}

impl LinearCombination {
    fn neg(self) -> Self {
        let minus_one = -Fr::from(1u64);
        self.scale(minus_one)
    }
}

/// One rank-1 gate: `a · b = c`.
#[derive(Debug, Clone)]
pub struct Gate {
    pub(crate) a: LinearCombination,
    pub(crate) b: LinearCombination,
    pub(crate) c: LinearCombination,
    pub(crate) label: String,
}

/// A compiled circuit: gate list plus the variable layout.
#[derive(Debug, Clone)]
pub struct ConstraintSystem {
    pub(crate) num_public: usize,
    pub(crate) num_variables: usize,
    pub(crate) gates: Vec<Gate>,
}

impl ConstraintSystem {
    /// Number of public inputs (the fixed prefix of the variable order).
    pub fn num_public(&self) -> usize {
        self.num_public
    }

    /// Total number of variables, public inputs included.
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// Number of gates.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Check a full assignment against every gate.
    ///
    /// The relation is one conjunction: the first unsatisfied gate is
    /// reported and there is no notion of partial success.
    pub fn check(&self, assignment: &[Fr]) -> Result<(), CircuitError> {
        if assignment.len() != self.num_variables {
            return Err(CircuitError::AssignmentLength {
                got: assignment.len(),
                expected: self.num_variables,
            });
        }
        for (i, gate) in self.gates.iter().enumerate() {
            let a = gate.a.evaluate(assignment);
            let b = gate.b.evaluate(assignment);
            let c = gate.c.evaluate(assignment);
            if a * b != c {
                return Err(CircuitError::Unsatisfied {
                    gate: i,
                    label: gate.label.clone(),
                });
            }
        }
        Ok(())
    }
}
