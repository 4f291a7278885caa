//! # Hand Ranking — Native Evaluator
//!
//! Classifies a seven-card hand into a comparable `(category, primary,
//! secondary)` score. This is the native mirror of the arithmetized
//! evaluator in `tnet-circuit`: both are written against the same
//! branch-free algorithm (indicator histograms and ascending select folds)
//! so that witness preparation and the in-circuit relation agree bit for
//! bit. Changing one without the other breaks every showdown proof.
//!
//! ## Known approximation
//!
//! Straight-flush detection tests "has a straight AND has a flush" without
//! proving the two use the same five cards. A hand with an unrelated
//! straight and flush is therefore classified as a straight flush. This is
//! deliberate, documented behavior, pinned by a test; tightening it is a
//! coordinated change to both evaluators.
//!
//! ## Tiebreak policy
//!
//! The ace-low wheel reports top rank 3 (the card "5"), not ace. Secondary
//! tiebreak is 0 except for two pair (second pair rank) and full house
//! (pair rank, or the second three-of-a-kind's rank when the hand holds two
//! trips). Flush primary is the highest occupied rank. Kickers beyond
//! (primary, secondary) do not participate in ordering.

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Weight of the category term in the packed score.
pub const CATEGORY_WEIGHT: u64 = 256;

/// Weight of the primary-tiebreak term in the packed score.
pub const PRIMARY_WEIGHT: u64 = 16;

/// Bit width that bounds any packed score (max score is 2252 < 2^12).
pub const SCORE_BITS: usize = 12;

/// The ten five-rank straight windows, ascending by top rank. The ace-low
/// wheel comes first and reports top rank 3 (the card "5") for tiebreaking.
pub const STRAIGHT_WINDOWS: [([u8; 5], u8); 10] = [
    ([12, 0, 1, 2, 3], 3),
    ([0, 1, 2, 3, 4], 4),
    ([1, 2, 3, 4, 5], 5),
    ([2, 3, 4, 5, 6], 6),
    ([3, 4, 5, 6, 7], 7),
    ([4, 5, 6, 7, 8], 8),
    ([5, 6, 7, 8, 9], 9),
    ([6, 7, 8, 9, 10], 10),
    ([7, 8, 9, 10, 11], 11),
    ([8, 9, 10, 11, 12], 12),
];

/// Hand category, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandCategory {
    /// No made hand; highest occupied rank decides.
    HighCard = 0,
    /// One rank with exactly two cards.
    Pair = 1,
    /// Two ranks with exactly two cards each.
    TwoPair = 2,
    /// One rank with exactly three cards.
    Trips = 3,
    /// Five consecutive occupied ranks (wheel included).
    Straight = 4,
    /// Five or more cards of one suit.
    Flush = 5,
    /// Trips plus a separate pair (or a second trips).
    FullHouse = 6,
    /// One rank with all four cards.
    Quads = 7,
    /// Straight and flush simultaneously present (see module docs).
    StraightFlush = 8,
}

impl HandCategory {
    /// The category's numeric value as used in circuit public inputs.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// The canonical category name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::HighCard => "HIGH_CARD",
            Self::Pair => "PAIR",
            Self::TwoPair => "TWO_PAIR",
            Self::Trips => "TRIPS",
            Self::Straight => "STRAIGHT",
            Self::Flush => "FLUSH",
            Self::FullHouse => "FULL_HOUSE",
            Self::Quads => "QUADS",
            Self::StraightFlush => "STRAIGHT_FLUSH",
        }
    }
}

impl std::fmt::Display for HandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparable outcome of evaluating seven cards.
///
/// Ordering is by packed score: `category * 256 + primary * 16 + secondary`.
/// Any two hands with different categories order by category regardless of
/// tiebreaks, because the weights dominate the maximal tiebreak values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandScore {
    /// The hand category.
    pub category: HandCategory,
    /// Primary tiebreak rank (0–12).
    pub primary: u8,
    /// Secondary tiebreak rank (0–12).
    pub secondary: u8,
}

impl HandScore {
    /// Pack into the single total-ordered score the showdown circuit
    /// compares: `category * 256 + primary * 16 + secondary`.
    pub fn score(&self) -> u64 {
        self.category.value() as u64 * CATEGORY_WEIGHT
            + self.primary as u64 * PRIMARY_WEIGHT
            + self.secondary as u64
    }
}

impl PartialOrd for HandScore {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandScore {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.score().cmp(&other.score())
    }
}

/// Evaluate seven cards into a `HandScore`.
///
/// The algorithm deliberately avoids data-dependent branching structure:
/// histograms, exact-count detectors, and ascending overwrite folds, in the
/// same order as the arithmetized version.
pub fn evaluate_seven(cards: &[Card; 7]) -> HandScore {
    let mut rank_count = [0u8; 13];
    let mut suit_count = [0u8; 4];
    for card in cards {
        rank_count[card.rank() as usize] += 1;
        suit_count[card.suit() as usize] += 1;
    }

    // Ascending folds: the last matching rank wins, i.e. the highest.
    let mut high_rank = 0u8;
    let mut best_pair = 0u8;
    let mut second_pair = 0u8;
    let mut pair_count = 0u8;
    let mut best_trips = 0u8;
    let mut second_trips = 0u8;
    let mut trips_count = 0u8;
    let mut quad_rank = 0u8;
    let mut has_quads = false;
    for r in 0..13u8 {
        let count = rank_count[r as usize];
        if count >= 1 {
            high_rank = r;
        }
        if count == 2 {
            second_pair = best_pair;
            best_pair = r;
            pair_count += 1;
        }
        if count == 3 {
            second_trips = best_trips;
            best_trips = r;
            trips_count += 1;
        }
        if count == 4 {
            quad_rank = r;
            has_quads = true;
        }
    }
    let has_pair = pair_count >= 1;
    let has_two_pair = pair_count >= 2;
    let has_trips = trips_count >= 1;
    let has_two_trips = trips_count >= 2;

    // Seven cards bound any suit count, so "at least five" is the exact
    // membership test count ∈ {5, 6, 7}.
    let has_flush = suit_count.iter().any(|&c| (5..=7).contains(&c));

    let mut has_straight = false;
    let mut straight_top = 0u8;
    for (window, top) in STRAIGHT_WINDOWS {
        if window.iter().all(|&r| rank_count[r as usize] >= 1) {
            has_straight = true;
            straight_top = top;
        }
    }

    // Priority resolution, low to high: each condition overwrites the
    // previous outcome, mirroring the circuit's select chain.
    let mut category = HandCategory::HighCard;
    let mut primary = high_rank;
    let mut secondary = 0u8;
    if has_pair {
        category = HandCategory::Pair;
        primary = best_pair;
        secondary = 0;
    }
    if has_two_pair {
        category = HandCategory::TwoPair;
        primary = best_pair;
        secondary = second_pair;
    }
    if has_trips {
        category = HandCategory::Trips;
        primary = best_trips;
        secondary = 0;
    }
    if has_straight {
        category = HandCategory::Straight;
        primary = straight_top;
        secondary = 0;
    }
    if has_flush {
        category = HandCategory::Flush;
        primary = high_rank;
        secondary = 0;
    }
    if (has_trips && has_pair) || has_two_trips {
        category = HandCategory::FullHouse;
        primary = best_trips;
        secondary = if has_pair { best_pair } else { second_trips };
    }
    if has_quads {
        category = HandCategory::Quads;
        primary = quad_rank;
        secondary = 0;
    }
    if has_straight && has_flush {
        category = HandCategory::StraightFlush;
        primary = straight_top;
        secondary = 0;
    }

    HandScore {
        category,
        primary,
        secondary,
    }
}
