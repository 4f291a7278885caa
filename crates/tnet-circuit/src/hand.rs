//! # Arithmetized Hand Evaluator
//!
//! The in-circuit mirror of `tnet_core::hand::evaluate_seven`: a seven-card
//! classifier built entirely from addition, multiplication, and the
//! zero-equality indicator — no data-dependent branching anywhere.
//!
//! Pipeline, gate by gate:
//!
//! 1. Decompose each packed card into rank and suit by allocating both as
//!    hints, range-binding them (rank ≤ 12 via two 4-bit checks, suit ≤ 3
//!    via one 2-bit check) and enforcing `card = suit·13 + rank`. Together
//!    with the bijective packing this proves the decomposition.
//! 2. Histogram: 13 rank buckets and 4 suit buckets, each the sum of
//!    zero-equality indicators over the seven cards.
//! 3. Made-hand detection: exact-count indicators against 2, 3, 4 per rank
//!    bucket, with ascending select folds tracking the highest (and second
//!    highest) rank achieving each.
//! 4. Flush: a suit bucket in {5, 6, 7} (seven cards bound the count).
//! 5. Straight: ten constant rank windows (ace-low wheel first), each hit
//!    iff all five ranks are occupied; ascending fold keeps the best top.
//! 6. Priority resolution: category/tiebreak overwrites ordered weakest to
//!    strongest via branch-free selects.
//!
//! The straight-flush condition is the documented approximation shared with
//! the native evaluator: straight AND flush simultaneously present, without
//! proving they share five cards.

use tnet_core::hand::STRAIGHT_WINDOWS;
use tnet_crypto::Fr;

use crate::builder::CircuitBuilder;
use crate::cs::LinearCombination;
use crate::error::CircuitError;

/// Number of cards a hand evaluation consumes.
pub const HAND_CARDS: usize = 7;

/// The evaluator's output wires.
#[derive(Debug, Clone)]
pub struct HandWires {
    /// Category 0–8.
    pub category: LinearCombination,
    /// Primary tiebreak rank.
    pub primary: LinearCombination,
    /// Secondary tiebreak rank.
    pub secondary: LinearCombination,
}

/// Evaluate seven packed cards. `tag` disambiguates gate labels when the
/// gadget is instantiated several times in one circuit (once per party).
pub fn evaluate_hand_gadget(
    b: &mut CircuitBuilder,
    tag: &str,
    cards: &[LinearCombination; HAND_CARDS],
) -> Result<HandWires, CircuitError> {
    // ── Card decomposition ───────────────────────────────────────────
    let mut ranks: Vec<LinearCombination> = Vec::with_capacity(HAND_CARDS);
    let mut suits: Vec<LinearCombination> = Vec::with_capacity(HAND_CARDS);
    for (i, card) in cards.iter().enumerate() {
        let code = b.value_u64(card);
        let rank_value = Fr::from(code % 13);
        let suit_value = Fr::from(code / 13);
        let rank = b.alloc_witness(move || Ok(rank_value))?;
        let suit = b.alloc_witness(move || Ok(suit_value))?;
        let rank_lc = LinearCombination::from(rank);
        let suit_lc = LinearCombination::from(suit);
        b.assert_in_range(format!("{tag}: card {i} rank"), &rank_lc, 4)?;
        b.assert_in_range(
            format!("{tag}: card {i} rank bound"),
            &(LinearCombination::constant_u64(12) - rank_lc.clone()),
            4,
        )?;
        b.assert_in_range(format!("{tag}: card {i} suit"), &suit_lc, 2)?;
        b.enforce_zero(
            format!("{tag}: card {i} decomposition"),
            card.clone() - suit_lc.clone().scale(Fr::from(13u64)) - rank_lc.clone(),
        )?;
        ranks.push(rank_lc);
        suits.push(suit_lc);
    }

    // ── Histograms ───────────────────────────────────────────────────
    let mut rank_count: Vec<LinearCombination> = Vec::with_capacity(13);
    for r in 0..13u64 {
        let mut sum = LinearCombination::zero();
        for (i, rank) in ranks.iter().enumerate() {
            let eq = b.is_equal_const(format!("{tag}: card {i} has rank {r}"), rank, r)?;
            sum = sum + eq.into();
        }
        rank_count.push(sum);
    }
    let mut suit_count: Vec<LinearCombination> = Vec::with_capacity(4);
    for s in 0..4u64 {
        let mut sum = LinearCombination::zero();
        for (i, suit) in suits.iter().enumerate() {
            let eq = b.is_equal_const(format!("{tag}: card {i} has suit {s}"), suit, s)?;
            sum = sum + eq.into();
        }
        suit_count.push(sum);
    }

    let mut occupied: Vec<LinearCombination> = Vec::with_capacity(13);
    for r in 0..13 {
        let empty = b.is_zero(format!("{tag}: rank {r} empty"), &rank_count[r])?;
        occupied.push(LinearCombination::one() - empty.into());
    }

    // ── Made-hand folds (ascending, so the last overwrite is the
    //    highest matching rank) ──────────────────────────────────────
    let mut high_rank = LinearCombination::zero();
    let mut best_pair = LinearCombination::zero();
    let mut second_pair = LinearCombination::zero();
    let mut pair_sum = LinearCombination::zero();
    let mut best_trips = LinearCombination::zero();
    let mut second_trips = LinearCombination::zero();
    let mut trips_sum = LinearCombination::zero();
    let mut quad_rank = LinearCombination::zero();
    let mut quad_sum = LinearCombination::zero();
    for r in 0..13 {
        let r_const = LinearCombination::constant_u64(r as u64);
        high_rank = b.select(
            format!("{tag}: high-rank fold {r}"),
            &occupied[r],
            &r_const,
            &high_rank,
        )?;

        let eq2 = b.is_equal_const(format!("{tag}: rank {r} pair"), &rank_count[r], 2)?;
        let eq2_lc = LinearCombination::from(eq2);
        second_pair = b.select(
            format!("{tag}: second-pair fold {r}"),
            &eq2_lc,
            &best_pair,
            &second_pair,
        )?;
        best_pair = b.select(
            format!("{tag}: best-pair fold {r}"),
            &eq2_lc,
            &r_const,
            &best_pair,
        )?;
        pair_sum = pair_sum + eq2_lc;

        let eq3 = b.is_equal_const(format!("{tag}: rank {r} trips"), &rank_count[r], 3)?;
        let eq3_lc = LinearCombination::from(eq3);
        second_trips = b.select(
            format!("{tag}: second-trips fold {r}"),
            &eq3_lc,
            &best_trips,
            &second_trips,
        )?;
        best_trips = b.select(
            format!("{tag}: best-trips fold {r}"),
            &eq3_lc,
            &r_const,
            &best_trips,
        )?;
        trips_sum = trips_sum + eq3_lc;

        let eq4 = b.is_equal_const(format!("{tag}: rank {r} quads"), &rank_count[r], 4)?;
        quad_rank = b.select(
            format!("{tag}: quad-rank fold {r}"),
            &eq4.into(),
            &r_const,
            &quad_rank,
        )?;
        quad_sum = quad_sum + eq4.into();
    }

    let no_pair = b.is_zero(format!("{tag}: no pair"), &pair_sum)?;
    let has_pair = LinearCombination::one() - no_pair.into();
    // Seven cards allow at most three pairs.
    let pairs_two = b.is_equal_const(format!("{tag}: two pairs"), &pair_sum, 2)?;
    let pairs_three = b.is_equal_const(format!("{tag}: three pairs"), &pair_sum, 3)?;
    let has_two_pair = LinearCombination::from(pairs_two) + pairs_three.into();
    let no_trips = b.is_zero(format!("{tag}: no trips"), &trips_sum)?;
    let has_trips = LinearCombination::one() - no_trips.into();
    let has_two_trips = b.is_equal_const(format!("{tag}: double trips"), &trips_sum, 2)?;
    // At most one rank can reach four cards, so the sum is already boolean.
    let has_quads = quad_sum;

    // ── Flush ────────────────────────────────────────────────────────
    let mut has_flush = LinearCombination::zero();
    for s in 0..4 {
        for c in 5..=7u64 {
            let eq = b.is_equal_const(
                format!("{tag}: suit {s} count {c}"),
                &suit_count[s],
                c,
            )?;
            has_flush = has_flush + eq.into();
        }
    }

    // ── Straight ─────────────────────────────────────────────────────
    let mut has_straight = LinearCombination::zero();
    let mut straight_top = LinearCombination::zero();
    for (w, (window, top)) in STRAIGHT_WINDOWS.iter().enumerate() {
        let mut hit = occupied[window[0] as usize].clone();
        for k in 1..5 {
            let step = b.mul(
                format!("{tag}: straight window {w} step {k}"),
                &hit,
                &occupied[window[k] as usize],
            )?;
            hit = step.into();
        }
        straight_top = b.select(
            format!("{tag}: straight-top fold {w}"),
            &hit,
            &LinearCombination::constant_u64(*top as u64),
            &straight_top,
        )?;
        has_straight = b.or(format!("{tag}: straight fold {w}"), &hit, &has_straight)?;
    }

    // ── Priority resolution, weakest to strongest ────────────────────
    let zero = LinearCombination::zero();
    let mut category = LinearCombination::zero();
    let mut primary = high_rank.clone();
    let mut secondary = LinearCombination::zero();

    overwrite(b, tag, "pair", &has_pair, 1, &best_pair, &zero, &mut category, &mut primary, &mut secondary)?;
    overwrite(b, tag, "two pair", &has_two_pair, 2, &best_pair, &second_pair, &mut category, &mut primary, &mut secondary)?;
    overwrite(b, tag, "trips", &has_trips, 3, &best_trips, &zero, &mut category, &mut primary, &mut secondary)?;
    overwrite(b, tag, "straight", &has_straight, 4, &straight_top, &zero, &mut category, &mut primary, &mut secondary)?;
    overwrite(b, tag, "flush", &has_flush, 5, &high_rank, &zero, &mut category, &mut primary, &mut secondary)?;

    let trips_and_pair = b.mul(format!("{tag}: trips with pair"), &has_trips, &has_pair)?;
    let full_cond = b.or(
        format!("{tag}: full house condition"),
        &trips_and_pair.into(),
        &has_two_trips.into(),
    )?;
    let full_secondary = b.select(
        format!("{tag}: full house secondary"),
        &has_pair,
        &best_pair,
        &second_trips,
    )?;
    overwrite(b, tag, "full house", &full_cond, 6, &best_trips, &full_secondary, &mut category, &mut primary, &mut secondary)?;
    overwrite(b, tag, "quads", &has_quads, 7, &quad_rank, &zero, &mut category, &mut primary, &mut secondary)?;

    // Documented approximation: straight AND flush present, not
    // necessarily over the same five cards.
    let straight_flush = b.mul(
        format!("{tag}: straight flush condition"),
        &has_straight,
        &has_flush,
    )?;
    overwrite(b, tag, "straight flush", &straight_flush.into(), 8, &straight_top, &zero, &mut category, &mut primary, &mut secondary)?;

    Ok(HandWires {
        category,
        primary,
        secondary,
    })
}

/// One step of the priority fold: overwrite (category, primary, secondary)
/// when `cond` holds.
#[allow(clippy::too_many_arguments)]
fn overwrite(
    b: &mut CircuitBuilder,
    tag: &str,
    name: &str,
    cond: &LinearCombination,
    category_value: u64,
    new_primary: &LinearCombination,
    new_secondary: &LinearCombination,
    category: &mut LinearCombination,
    primary: &mut LinearCombination,
    secondary: &mut LinearCombination,
) -> Result<(), CircuitError> {
    *category = b.select(
        format!("{tag}: {name} category"),
        cond,
        &LinearCombination::constant_u64(category_value),
        category,
    )?;
    *primary = b.select(format!("{tag}: {name} primary"), cond, new_primary, primary)?;
    *secondary = b.select(
        format!("{tag}: {name} secondary"),
        cond,
        new_secondary,
        secondary,
    )?;
    Ok(())
}
