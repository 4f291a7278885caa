//! # Arithmetic Gadgets
//!
//! The small vocabulary every circuit in this stack is written in. A finite
//! field has no native `if`, `==`, or `>=`; these gadgets rebuild them from
//! multiplication gates:
//!
//! - **Zero-equality indicator** (`is_zero`, `is_equal_const`): 1 iff an
//!   expression vanishes, via an inverse hint. The basis for emulating every
//!   conditional and for the indicator-weighted sums that express "one of N
//!   fixed behaviors, selected at proof time".
//! - **Select** (`select`): branch-free `cond ? t : f` as `f + cond·(t−f)`.
//! - **Range check** (`assert_in_range`): fixed-width bit decomposition.
//!   The substitute for ordering comparisons: `x − y ≥ 0` is proved by
//!   decomposing the difference, which is impossible when the true value is
//!   negative and has wrapped to a huge field element. The width must be
//!   chosen against the maximum magnitude of the checked quantity or the
//!   check is unsound.

use ark_ff::{BigInteger, Field, PrimeField, Zero};

use tnet_crypto::Fr;

use crate::builder::CircuitBuilder;
use crate::cs::{LinearCombination, Variable};
use crate::error::CircuitError;

impl CircuitBuilder {
    /// Allocate the product of two linear combinations.
    pub fn mul(
        &mut self,
        label: impl Into<String>,
        a: &LinearCombination,
        b: &LinearCombination,
    ) -> Result<Variable, CircuitError> {
        let value = self.value(a) * self.value(b);
        let product = self.alloc_witness(|| Ok(value))?;
        self.enforce(label, a.clone(), b.clone(), product.into())?;
        Ok(product)
    }

    /// Enforce that `x` is 0 or 1.
    pub fn assert_boolean(
        &mut self,
        label: impl Into<String>,
        x: &LinearCombination,
    ) -> Result<(), CircuitError> {
        self.enforce(
            label,
            x.clone(),
            LinearCombination::one() - x.clone(),
            LinearCombination::zero(),
        )
    }

    /// Zero-equality indicator: a boolean variable that is 1 iff `x == 0`.
    ///
    /// Uses the inverse-hint construction: with `inv` a witness hint,
    /// `x · inv = 1 − out` forces `out = 1` when `x = 0`, and `x · out = 0`
    /// forces `out = 0` when `x ≠ 0`.
    pub fn is_zero(
        &mut self,
        label: impl Into<String>,
        x: &LinearCombination,
    ) -> Result<Variable, CircuitError> {
        let label = label.into();
        let x_value = self.value(x);
        let out_value = if x_value.is_zero() {
            Fr::from(1u64)
        } else {
            Fr::zero()
        };
        let inv_value = x_value.inverse().unwrap_or_else(Fr::zero);
        let out = self.alloc_witness(|| Ok(out_value))?;
        let inv = self.alloc_witness(|| Ok(inv_value))?;
        self.enforce(
            format!("{label}: inverse hint"),
            x.clone(),
            inv.into(),
            LinearCombination::one() - LinearCombination::from(out),
        )?;
        self.enforce(
            format!("{label}: annihilation"),
            x.clone(),
            out.into(),
            LinearCombination::zero(),
        )?;
        Ok(out)
    }

    /// Indicator for `x == c` with a small-integer constant.
    pub fn is_equal_const(
        &mut self,
        label: impl Into<String>,
        x: &LinearCombination,
        c: u64,
    ) -> Result<Variable, CircuitError> {
        self.is_zero(label, &(x.clone() - LinearCombination::constant_u64(c)))
    }

    /// Branch-free conditional: `cond ? if_true : if_false`, with `cond`
    /// already constrained boolean by the caller. Costs one gate.
    pub fn select(
        &mut self,
        label: impl Into<String>,
        cond: &LinearCombination,
        if_true: &LinearCombination,
        if_false: &LinearCombination,
    ) -> Result<LinearCombination, CircuitError> {
        let diff = if_true.clone() - if_false.clone();
        let scaled = self.mul(label, cond, &diff)?;
        Ok(if_false.clone() + LinearCombination::from(scaled))
    }

    /// Boolean OR of two boolean combinations: `a + b − a·b`.
    pub fn or(
        &mut self,
        label: impl Into<String>,
        a: &LinearCombination,
        b: &LinearCombination,
    ) -> Result<LinearCombination, CircuitError> {
        let both = self.mul(label, a, b)?;
        Ok(a.clone() + b.clone() - LinearCombination::from(both))
    }

    /// Prove `x ∈ [0, 2^bits)` by fixed-width bit decomposition, returning
    /// the bit variables (low to high).
    ///
    /// In `Prove` mode an out-of-range value — in this stack, always a
    /// wrapped negative from an ordering violation — is rejected here, with
    /// a distinct error, before the unsatisfiable gates would be reached.
    pub fn assert_in_range(
        &mut self,
        label: impl Into<String>,
        x: &LinearCombination,
        bits: usize,
    ) -> Result<Vec<Variable>, CircuitError> {
        let label = label.into();
        let value_bits = self.value(x).into_bigint().to_bits_le();
        if self.is_prove() && value_bits.iter().skip(bits).any(|&b| b) {
            return Err(CircuitError::RangeExceeded { label, bits });
        }
        let mut bit_vars = Vec::with_capacity(bits);
        let mut recomposed = LinearCombination::zero();
        let mut coeff = Fr::from(1u64);
        for i in 0..bits {
            let bit_value = if value_bits[i] {
                Fr::from(1u64)
            } else {
                Fr::zero()
            };
            let bit = self.alloc_witness(|| Ok(bit_value))?;
            self.assert_boolean(format!("{label}: bit {i}"), &bit.into())?;
            recomposed = recomposed.add_term(bit, coeff);
            coeff = coeff + coeff;
            bit_vars.push(bit);
        }
        self.enforce_zero(format!("{label}: recomposition"), recomposed - x.clone())?;
        Ok(bit_vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{compile, solve, Synthesize};

    struct IsZeroProbe {
        x: u64,
        expect_indicator: u64,
    }

    impl Synthesize for IsZeroProbe {
        fn synthesize(&self, b: &mut CircuitBuilder) -> Result<(), CircuitError> {
            let x = b.alloc_public("x", Some(Fr::from(self.x)))?;
            let out = b.is_zero("probe", &x.into())?;
            b.enforce_zero(
                "indicator matches expectation",
                LinearCombination::from(out)
                    - LinearCombination::constant_u64(self.expect_indicator),
            )
        }
    }

    #[test]
    fn test_is_zero_indicator() {
        assert!(solve(&IsZeroProbe { x: 0, expect_indicator: 1 }).is_ok());
        assert!(solve(&IsZeroProbe { x: 7, expect_indicator: 0 }).is_ok());
        assert!(solve(&IsZeroProbe { x: 0, expect_indicator: 0 }).is_err());
        assert!(solve(&IsZeroProbe { x: 7, expect_indicator: 1 }).is_err());
    }

    // A forged indicator assignment must fail the compiled gates even when
    // the prover bypasses honest synthesis.
    #[test]
    fn test_is_zero_rejects_forged_assignment() {
        let probe = IsZeroProbe { x: 7, expect_indicator: 0 };
        let cs = compile(&probe).expect("compiles");
        let (_, honest) = solve(&probe).expect("honest witness");
        // Variables: [x, out, inv]; forge out = 1 while x = 7.
        let mut forged = honest.clone();
        forged[1] = Fr::from(1u64);
        assert!(cs.check(&honest).is_ok());
        assert!(cs.check(&forged).is_err());
    }

    struct RangeProbe {
        x: u64,
        bits: usize,
    }

    impl Synthesize for RangeProbe {
        fn synthesize(&self, b: &mut CircuitBuilder) -> Result<(), CircuitError> {
            let x = b.alloc_public("x", Some(Fr::from(self.x)))?;
            b.assert_in_range("probe", &x.into(), self.bits)?;
            Ok(())
        }
    }

    #[test]
    fn test_range_check_boundaries() {
        assert!(solve(&RangeProbe { x: 0, bits: 8 }).is_ok());
        assert!(solve(&RangeProbe { x: 255, bits: 8 }).is_ok());
        let err = solve(&RangeProbe { x: 256, bits: 8 }).expect_err("too wide");
        assert!(matches!(err, CircuitError::RangeExceeded { bits: 8, .. }));
    }

    // The negative-wrap case the range check exists for: a "small negative"
    // is a huge field element and must not decompose.
    struct DifferenceProbe {
        minuend: u64,
        subtrahend: u64,
    }

    impl Synthesize for DifferenceProbe {
        fn synthesize(&self, b: &mut CircuitBuilder) -> Result<(), CircuitError> {
            let x = b.alloc_public("minuend", Some(Fr::from(self.minuend)))?;
            let y = b.alloc_public("subtrahend", Some(Fr::from(self.subtrahend)))?;
            let diff = LinearCombination::from(x) - LinearCombination::from(y);
            b.assert_in_range("difference non-negative", &diff, 8)?;
            Ok(())
        }
    }

    #[test]
    fn test_range_check_catches_negative_wrap() {
        assert!(solve(&DifferenceProbe { minuend: 5, subtrahend: 3 }).is_ok());
        assert!(solve(&DifferenceProbe { minuend: 3, subtrahend: 3 }).is_ok());
        let err = solve(&DifferenceProbe { minuend: 3, subtrahend: 5 }).expect_err("negative");
        assert!(matches!(err, CircuitError::RangeExceeded { .. }));
    }

    struct SelectProbe {
        cond: u64,
        expected: u64,
    }

    impl Synthesize for SelectProbe {
        fn synthesize(&self, b: &mut CircuitBuilder) -> Result<(), CircuitError> {
            let cond = b.alloc_public("cond", Some(Fr::from(self.cond)))?;
            let cond_lc = LinearCombination::from(cond);
            b.assert_boolean("cond", &cond_lc)?;
            let picked = b.select(
                "pick",
                &cond_lc,
                &LinearCombination::constant_u64(11),
                &LinearCombination::constant_u64(22),
            )?;
            b.enforce_zero(
                "picked matches",
                picked - LinearCombination::constant_u64(self.expected),
            )
        }
    }

    #[test]
    fn test_select() {
        assert!(solve(&SelectProbe { cond: 1, expected: 11 }).is_ok());
        assert!(solve(&SelectProbe { cond: 0, expected: 22 }).is_ok());
        assert!(solve(&SelectProbe { cond: 1, expected: 22 }).is_err());
        assert!(solve(&SelectProbe { cond: 2, expected: 11 }).is_err());
    }

    struct OrProbe {
        a: u64,
        b: u64,
        expected: u64,
    }

    impl Synthesize for OrProbe {
        fn synthesize(&self, b: &mut CircuitBuilder) -> Result<(), CircuitError> {
            let av = b.alloc_public("a", Some(Fr::from(self.a)))?;
            let bv = b.alloc_public("b", Some(Fr::from(self.b)))?;
            let out = b.or("or", &av.into(), &bv.into())?;
            b.enforce_zero(
                "or matches",
                out - LinearCombination::constant_u64(self.expected),
            )
        }
    }

    #[test]
    fn test_or_truth_table() {
        for (a, b, expected) in [(0, 0, 0), (0, 1, 1), (1, 0, 1), (1, 1, 1)] {
            assert!(
                solve(&OrProbe { a, b, expected }).is_ok(),
                "or({a}, {b}) != {expected}"
            );
        }
    }
}
