//! # Showdown Orchestration
//!
//! Assembles one table's showdown: seats commit to their hole cards when
//! dealt, may fold, and at showdown the table produces the public claim
//! vector and the private openings the showdown circuit consumes.
//!
//! The table computes every active seat's score with the native evaluator —
//! the same semantics the circuit re-derives — and names the winner as the
//! earliest seat achieving the maximum score (ties share the maximum; the
//! circuit's dominance check only requires "≥ every active score", so any
//! tied seat would verify).

use rand::RngCore;
use thiserror::Error;

use tnet_core::{evaluate_seven, Card, HandCategory, HandScore};
use tnet_crypto::{Root, Salt};
use tnet_circuit::{PartyClaim, PartyOpening, ShowdownPublic, NUM_COMMUNITY, NUM_HOLE};

/// Errors in table orchestration.
#[derive(Error, Debug)]
pub enum TableError {
    /// A seat index does not exist at this table.
    #[error("seat {seat} does not exist")]
    UnknownSeat {
        /// The bad index.
        seat: usize,
    },

    /// Showdown requires at least one unfolded seat.
    #[error("no active seats remain")]
    NoActiveSeats,
}

#[derive(Debug, Clone)]
struct Seat {
    opening: PartyOpening,
    root: Root,
    active: bool,
}

/// One table: shared community cards plus committed seats.
#[derive(Debug)]
pub struct Table {
    community: [Card; NUM_COMMUNITY],
    seats: Vec<Seat>,
}

impl Table {
    /// A table over the given community cards.
    pub fn new(community: [Card; NUM_COMMUNITY]) -> Self {
        Self {
            community,
            seats: Vec::new(),
        }
    }

    /// Deal a seat: commit to its hole cards under a fresh salt. Returns
    /// the seat index and the commitment root to publish.
    pub fn seat<R: RngCore>(&mut self, rng: &mut R, hole: [Card; NUM_HOLE]) -> (usize, Root) {
        let opening = PartyOpening {
            hole,
            salt: Salt::random(rng),
        };
        let root = opening.commit();
        self.seats.push(Seat {
            opening,
            root,
            active: true,
        });
        (self.seats.len() - 1, root)
    }

    /// Fold a seat. Its commitment stays published; its cards never bind
    /// anything again.
    pub fn fold(&mut self, seat: usize) -> Result<(), TableError> {
        let seat = self
            .seats
            .get_mut(seat)
            .ok_or(TableError::UnknownSeat { seat })?;
        seat.active = false;
        Ok(())
    }

    /// Number of seats dealt so far.
    pub fn num_seats(&self) -> usize {
        self.seats.len()
    }

    /// A seat's published commitment root.
    pub fn commitment(&self, seat: usize) -> Option<Root> {
        self.seats.get(seat).map(|s| s.root)
    }

    /// Assemble the showdown: public claims (folded seats carry zeroed
    /// scores) and private openings (folded seats carry zeroed openings).
    pub fn showdown(&self) -> Result<(ShowdownPublic, Vec<PartyOpening>), TableError> {
        let mut claims = Vec::with_capacity(self.seats.len());
        let mut openings = Vec::with_capacity(self.seats.len());
        let mut winner: Option<(usize, u64)> = None;
        for (i, seat) in self.seats.iter().enumerate() {
            if seat.active {
                let score = evaluate_seven(&self.seven_cards(&seat.opening));
                if winner.map_or(true, |(_, best)| score.score() > best) {
                    winner = Some((i, score.score()));
                }
                claims.push(PartyClaim {
                    root: seat.root,
                    active: true,
                    score,
                });
                openings.push(seat.opening);
            } else {
                claims.push(PartyClaim {
                    root: seat.root,
                    active: false,
                    score: HandScore {
                        category: HandCategory::HighCard,
                        primary: 0,
                        secondary: 0,
                    },
                });
                openings.push(PartyOpening::folded());
            }
        }
        let (winner, _) = winner.ok_or(TableError::NoActiveSeats)?;
        tracing::debug!(winner, seats = self.seats.len(), "showdown assembled");
        Ok((
            ShowdownPublic {
                community: self.community,
                claims,
                winner,
            },
            openings,
        ))
    }

    fn seven_cards(&self, opening: &PartyOpening) -> [Card; 7] {
        [
            opening.hole[0],
            opening.hole[1],
            self.community[0],
            self.community[1],
            self.community[2],
            self.community[3],
            self.community[4],
        ]
    }
}
