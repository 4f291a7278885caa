//! # Showdown Circuit
//!
//! Proves a claimed winner among several parties, some of whom may have
//! folded, without revealing any hole cards. Composes the hidden-value
//! commitment check and the hand evaluator once per party, then validates
//! the winner with a masked all-pairs score comparison.
//!
//! ## Public inputs (in order)
//!
//! 1. `community[0..5]` — the five shared card codes.
//! 2. Per party `i`, five values: `commit_root_i`, `active_i`,
//!    `category_i`, `primary_i`, `secondary_i`.
//! 3. `winner` — the claimed winner's party index.
//!
//! ## Masking
//!
//! Folded parties impose no semantic constraint. Every per-party check is
//! multiplied by the party's active flag — `(recomputed − root) · active
//! == 0` and likewise for the claimed score components — so an inactive
//! party's opening can be all zeros. (Card decomposition itself is still
//! structural, so folded openings must be *well-formed* card codes; zeros
//! qualify.)
//!
//! ## Winner validation
//!
//! Exactly one winner indicator fires, the winner must be active, and for
//! every party the masked difference `active_i · (winner_score − score_i)`
//! is proved non-negative by 12-bit decomposition, where
//! `score = category·256 + primary·16 + secondary`. A subtraction alone
//! would wrap and prove nothing; the range proof is what makes dominance
//! sound.

use tnet_core::error::WitnessError;
use tnet_core::hand::{CATEGORY_WEIGHT, PRIMARY_WEIGHT, SCORE_BITS};
use tnet_core::{evaluate_seven, Card, HandScore};
use tnet_crypto::{commit_hidden, Fr, Root, Salt};

use crate::builder::{CircuitBuilder, Synthesize};
use crate::cs::LinearCombination;
use crate::error::CircuitError;
use crate::hand::{evaluate_hand_gadget, HAND_CARDS};
use crate::mimc::commit_hidden_gadget;

/// Number of shared community cards.
pub const NUM_COMMUNITY: usize = 5;

/// Number of private hole cards per party.
pub const NUM_HOLE: usize = 2;

/// One party's public claim.
#[derive(Debug, Clone, Copy)]
pub struct PartyClaim {
    /// The party's hidden-value commitment root.
    pub root: Root,
    /// Whether the party is still in the hand.
    pub active: bool,
    /// The claimed evaluation of the party's seven cards.
    pub score: HandScore,
}

/// One party's private opening.
#[derive(Debug, Clone, Copy)]
pub struct PartyOpening {
    /// The two hole cards.
    pub hole: [Card; NUM_HOLE],
    /// The commitment salt.
    pub salt: Salt,
}

impl PartyOpening {
    /// The opening a folded seat carries: zeroed cards and salt. Valid as
    /// circuit structure, bound by nothing.
    pub fn folded() -> Self {
        Self {
            hole: [Card::from_code(0).expect("zero is a card"); NUM_HOLE],
            salt: Salt::zero(),
        }
    }

    /// The native commitment over this opening.
    pub fn commit(&self) -> Root {
        let values = [
            Fr::from(self.hole[0].code() as u64),
            Fr::from(self.hole[1].code() as u64),
        ];
        commit_hidden(&values, &self.salt)
    }
}

/// The public half of one showdown.
#[derive(Debug, Clone)]
pub struct ShowdownPublic {
    /// The five community cards.
    pub community: [Card; NUM_COMMUNITY],
    /// Per-party claims, in seat order.
    pub claims: Vec<PartyClaim>,
    /// The claimed winner's seat index.
    pub winner: usize,
}

impl ShowdownPublic {
    /// The public-input vector a verifier binds to, in the documented
    /// order: community cards, then per-party
    /// `[root, active, category, primary, secondary]`, then the winner.
    pub fn to_inputs(&self) -> Vec<Fr> {
        let mut inputs = Vec::with_capacity(NUM_COMMUNITY + 5 * self.claims.len() + 1);
        for card in &self.community {
            inputs.push(Fr::from(card.code() as u64));
        }
        for claim in &self.claims {
            inputs.push(claim.root.as_field());
            inputs.push(Fr::from(claim.active as u64));
            inputs.push(Fr::from(claim.score.category.value() as u64));
            inputs.push(Fr::from(claim.score.primary as u64));
            inputs.push(Fr::from(claim.score.secondary as u64));
        }
        inputs.push(Fr::from(self.winner as u64));
        inputs
    }
}

/// The showdown circuit for a fixed party count.
#[derive(Debug)]
pub struct ShowdownCircuit {
    num_parties: usize,
    public: Option<ShowdownPublic>,
    witness: Option<Vec<PartyOpening>>,
}

impl ShowdownCircuit {
    /// The verifier's instance for `num_parties` seats.
    pub fn blank(num_parties: usize) -> Self {
        Self {
            num_parties,
            public: None,
            witness: None,
        }
    }

    /// The prover's instance. Validates natively first: openings match the
    /// active roots, claimed scores match the evaluator, the winner is an
    /// active seat and dominates every active score.
    pub fn with_witness(
        public: ShowdownPublic,
        openings: Vec<PartyOpening>,
    ) -> Result<Self, WitnessError> {
        let n = public.claims.len();
        if openings.len() != n {
            return Err(WitnessError::MarkingLength {
                got: openings.len(),
                expected: n,
            });
        }
        if public.winner >= n {
            return Err(WitnessError::IndexOutOfBounds {
                context: "winner seat".to_string(),
                index: public.winner,
                size: n,
            });
        }
        if !public.claims[public.winner].active {
            return Err(WitnessError::IndexOutOfBounds {
                context: "winner must be an active seat".to_string(),
                index: public.winner,
                size: n,
            });
        }
        let winner_score = public.claims[public.winner].score.score();
        for (i, (claim, opening)) in public.claims.iter().zip(&openings).enumerate() {
            if !claim.active {
                continue;
            }
            if opening.commit() != claim.root {
                return Err(WitnessError::CommitmentMismatch);
            }
            let evaluated = evaluate_seven(&seven_cards(opening, &public.community));
            if evaluated != claim.score {
                return Err(WitnessError::IndexOutOfBounds {
                    context: format!("claimed score for seat {i} does not match its cards"),
                    index: i,
                    size: n,
                });
            }
            if claim.score.score() > winner_score {
                return Err(WitnessError::RangeExceeded {
                    context: format!("seat {i} outscores the claimed winner"),
                    bits: SCORE_BITS,
                });
            }
        }
        Ok(Self {
            num_parties: n,
            public: Some(public),
            witness: Some(openings),
        })
    }

    /// The prover's instance without pre-validation, for driving dishonest
    /// claims into the constraint layer in tests.
    pub fn with_witness_unchecked(public: ShowdownPublic, openings: Vec<PartyOpening>) -> Self {
        Self {
            num_parties: public.claims.len(),
            public: Some(public),
            witness: Some(openings),
        }
    }
}

fn seven_cards(opening: &PartyOpening, community: &[Card; NUM_COMMUNITY]) -> [Card; HAND_CARDS] {
    [
        opening.hole[0],
        opening.hole[1],
        community[0],
        community[1],
        community[2],
        community[3],
        community[4],
    ]
}

impl Synthesize for ShowdownCircuit {
    fn synthesize(&self, b: &mut CircuitBuilder) -> Result<(), CircuitError> {
        let n = self.num_parties;
        let public = self.public.as_ref();

        // ── Public inputs, in documented order ───────────────────────
        let mut community = Vec::with_capacity(NUM_COMMUNITY);
        for i in 0..NUM_COMMUNITY {
            let value = public.map(|p| Fr::from(p.community[i].code() as u64));
            let var = b.alloc_public(&format!("community card {i}"), value)?;
            community.push(LinearCombination::from(var));
        }
        let mut roots = Vec::with_capacity(n);
        let mut actives = Vec::with_capacity(n);
        let mut categories = Vec::with_capacity(n);
        let mut primaries = Vec::with_capacity(n);
        let mut secondaries = Vec::with_capacity(n);
        for i in 0..n {
            let claim = public.map(|p| p.claims[i]);
            roots.push(LinearCombination::from(b.alloc_public(
                &format!("party {i} commitment root"),
                claim.map(|c| c.root.as_field()),
            )?));
            actives.push(LinearCombination::from(b.alloc_public(
                &format!("party {i} active flag"),
                claim.map(|c| Fr::from(c.active as u64)),
            )?));
            categories.push(LinearCombination::from(b.alloc_public(
                &format!("party {i} category"),
                claim.map(|c| Fr::from(c.score.category.value() as u64)),
            )?));
            primaries.push(LinearCombination::from(b.alloc_public(
                &format!("party {i} primary tiebreak"),
                claim.map(|c| Fr::from(c.score.primary as u64)),
            )?));
            secondaries.push(LinearCombination::from(b.alloc_public(
                &format!("party {i} secondary tiebreak"),
                claim.map(|c| Fr::from(c.score.secondary as u64)),
            )?));
        }
        let winner = b.alloc_public(
            "claimed winner",
            public.map(|p| Fr::from(p.winner as u64)),
        )?;

        // ── Per-party structure ──────────────────────────────────────
        let openings = self.witness.as_ref();
        let mut scores = Vec::with_capacity(n);
        for i in 0..n {
            b.assert_boolean(format!("party {i} active flag boolean"), &actives[i])?;
            // Claimed score components are range-bound so the packed score
            // arithmetic below cannot overflow its 12-bit comparison.
            b.assert_in_range(format!("party {i} category range"), &categories[i], 4)?;
            b.assert_in_range(
                format!("party {i} category bound"),
                &(LinearCombination::constant_u64(8) - categories[i].clone()),
                4,
            )?;
            b.assert_in_range(format!("party {i} primary range"), &primaries[i], 4)?;
            b.assert_in_range(
                format!("party {i} primary bound"),
                &(LinearCombination::constant_u64(12) - primaries[i].clone()),
                4,
            )?;
            b.assert_in_range(format!("party {i} secondary range"), &secondaries[i], 4)?;
            b.assert_in_range(
                format!("party {i} secondary bound"),
                &(LinearCombination::constant_u64(12) - secondaries[i].clone()),
                4,
            )?;

            let hole0_value = openings.map(|o| Fr::from(o[i].hole[0].code() as u64));
            let hole0 = b.alloc_witness(move || {
                hole0_value.ok_or_else(|| CircuitError::MissingAssignment {
                    context: format!("party {i} hole card 0"),
                })
            })?;
            let hole1_value = openings.map(|o| Fr::from(o[i].hole[1].code() as u64));
            let hole1 = b.alloc_witness(move || {
                hole1_value.ok_or_else(|| CircuitError::MissingAssignment {
                    context: format!("party {i} hole card 1"),
                })
            })?;
            let salt_value = openings.map(|o| o[i].salt.0);
            let salt = b.alloc_witness(move || {
                salt_value.ok_or_else(|| CircuitError::MissingAssignment {
                    context: format!("party {i} salt"),
                })
            })?;

            // Commitment opening, masked by the active flag.
            let recomputed = commit_hidden_gadget(
                b,
                &[hole0.into(), hole1.into()],
                &salt.into(),
            )?;
            b.enforce(
                format!("party {i} commitment opening (masked)"),
                recomputed - roots[i].clone(),
                actives[i].clone(),
                LinearCombination::zero(),
            )?;

            // Hand evaluation over hole + community, claimed components
            // asserted under the same mask.
            let cards: [LinearCombination; HAND_CARDS] = [
                hole0.into(),
                hole1.into(),
                community[0].clone(),
                community[1].clone(),
                community[2].clone(),
                community[3].clone(),
                community[4].clone(),
            ];
            let wires = evaluate_hand_gadget(b, &format!("party {i}"), &cards)?;
            b.enforce(
                format!("party {i} category claim (masked)"),
                wires.category - categories[i].clone(),
                actives[i].clone(),
                LinearCombination::zero(),
            )?;
            b.enforce(
                format!("party {i} primary claim (masked)"),
                wires.primary - primaries[i].clone(),
                actives[i].clone(),
                LinearCombination::zero(),
            )?;
            b.enforce(
                format!("party {i} secondary claim (masked)"),
                wires.secondary - secondaries[i].clone(),
                actives[i].clone(),
                LinearCombination::zero(),
            )?;

            // The party's packed score as a public linear combination.
            let score = categories[i].clone().scale(Fr::from(CATEGORY_WEIGHT))
                + primaries[i].clone().scale(Fr::from(PRIMARY_WEIGHT))
                + secondaries[i].clone();
            scores.push(score);
        }

        // ── Winner validation ────────────────────────────────────────
        let winner_lc = LinearCombination::from(winner);
        let mut indicator_sum = LinearCombination::zero();
        let mut winner_active = LinearCombination::zero();
        let mut winner_score = LinearCombination::zero();
        for i in 0..n {
            let ind = b.is_equal_const(format!("winner is party {i}"), &winner_lc, i as u64)?;
            let ind_lc = LinearCombination::from(ind);
            indicator_sum = indicator_sum + ind_lc.clone();
            let active_if_winner = b.mul(
                format!("party {i} active if winner"),
                &ind_lc,
                &actives[i],
            )?;
            winner_active = winner_active + active_if_winner.into();
            let score_if_winner = b.mul(
                format!("party {i} score if winner"),
                &ind_lc,
                &scores[i],
            )?;
            winner_score = winner_score + score_if_winner.into();
        }
        b.enforce_zero(
            "winner names exactly one seat",
            indicator_sum - LinearCombination::one(),
        )?;
        b.enforce_zero(
            "winner is active",
            winner_active - LinearCombination::one(),
        )?;

        // Masked dominance: for every active party the winner's score is
        // at least theirs, proved by decomposition of the difference.
        for i in 0..n {
            let diff = winner_score.clone() - scores[i].clone();
            let masked = b.mul(format!("party {i} score gap (masked)"), &diff, &actives[i])?;
            b.assert_in_range(
                format!("party {i} score gap non-negative"),
                &masked.into(),
                SCORE_BITS,
            )?;
        }
        Ok(())
    }
}
