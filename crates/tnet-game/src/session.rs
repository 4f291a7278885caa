//! # Game Session
//!
//! One live net instance: the current marking, mutated exactly once per
//! accepted firing, and an append-only history binding every firing to its
//! pre/post commitment roots.
//!
//! The session executes the net natively; circuits only ever verify. A
//! firing that is not enabled is rejected here, before any witness or proof
//! work — the fail-fast half of the witness-inconsistency taxonomy.

use std::sync::Arc;

use tnet_core::error::WitnessError;
use tnet_core::{GameId, Marking, PetriNet, PlaceId, Timestamp, TransitionId};
use tnet_crypto::{commit_marking, Root};
use tnet_circuit::TransitionWitness;

/// Record of one accepted firing.
#[derive(Debug, Clone)]
pub struct FiringRecord {
    /// The transition that fired.
    pub transition: TransitionId,
    /// Commitment to the marking before the firing.
    pub pre_root: Root,
    /// Commitment to the marking after the firing.
    pub post_root: Root,
    /// When the firing was accepted (UTC).
    pub at: Timestamp,
}

/// An accepted firing: the history record plus the private inputs needed
/// to prove it.
#[derive(Debug, Clone)]
pub struct Firing {
    /// The public, history-appended record.
    pub record: FiringRecord,
    /// The transition circuit's private inputs. Held by the prover only;
    /// publishing it would reveal the state.
    pub witness: TransitionWitness,
}

/// One game's evolving state.
#[derive(Debug)]
pub struct GameSession {
    id: GameId,
    net: Arc<PetriNet>,
    marking: Marking,
    history: Vec<FiringRecord>,
}

impl GameSession {
    /// Start a game at the net's declared initial marking.
    pub fn new(id: GameId, net: Arc<PetriNet>) -> Self {
        let marking = net.initial_marking().clone();
        Self {
            id,
            net,
            marking,
            history: Vec::new(),
        }
    }

    /// The game's identifier.
    pub fn id(&self) -> &GameId {
        &self.id
    }

    /// The shared topology this game runs on.
    pub fn net(&self) -> &Arc<PetriNet> {
        &self.net
    }

    /// The current marking.
    pub fn marking(&self) -> &Marking {
        &self.marking
    }

    /// Commitment to the current marking.
    pub fn current_root(&self) -> Root {
        commit_marking(&self.marking)
    }

    /// The append-only firing history.
    pub fn history(&self) -> &[FiringRecord] {
        &self.history
    }

    /// Whether the given outcome place currently holds a token.
    pub fn outcome_reached(&self, outcome: PlaceId) -> bool {
        self.net.outcome_places().contains(&outcome) && self.marking.count(outcome) >= 1
    }

    /// Fire a transition, advancing the marking and appending to history.
    ///
    /// Enabledness is checked natively before anything mutates; a disabled
    /// firing leaves the session untouched and returns the typed caller
    /// error. The returned [`Firing`] carries the witness for the
    /// transition circuit.
    pub fn fire(&mut self, transition: TransitionId) -> Result<Firing, WitnessError> {
        let pre = self.marking.clone();
        let post = self.net.fire(&pre, transition)?;
        let record = FiringRecord {
            transition,
            pre_root: commit_marking(&pre),
            post_root: commit_marking(&post),
            at: Timestamp::now(),
        };
        tracing::debug!(
            game = %self.id,
            transition = %transition,
            pre_root = %record.pre_root,
            post_root = %record.post_root,
            "firing accepted"
        );
        self.marking = post.clone();
        self.history.push(record.clone());
        Ok(Firing {
            record,
            witness: TransitionWitness {
                pre_marking: pre,
                post_marking: post,
                transition,
            },
        })
    }
}
