//! # Petri-Net Topology Model
//!
//! The static description of a net: places, transitions, and their
//! unit-weight input/output arc sets. A `PetriNet` is built exactly once per
//! application shape ("tic-tac-toe", "poker") from an externally-produced
//! [`NetDescription`], validated in full at construction, and never mutated
//! afterwards — it is a constant lookup table, shared read-only (wrap it in
//! an `Arc`) across every circuit construction and concurrent verification.
//!
//! ## Validation
//!
//! Construction rejects, fatally and before any proving can occur:
//!
//! - a transition with no inputs or no outputs (a no-input transition would
//!   be unconditionally enabled forever, which is rarely intended);
//! - arcs or outcome entries naming undeclared places;
//! - duplicate place names (arc resolution would be ambiguous);
//! - initial token counts above the [`MAX_TOKENS`] bound;
//! - an empty outcome-place set (no terminal proof could ever exist).
//!
//! ## Execution vs verification
//!
//! `enabled` and `fire` implement the native token-game semantics for the
//! application side of the lifecycle. The circuits never execute a net; they
//! only verify a claimed `(pre, post, transition)` triple against these same
//! semantics, re-derived as arithmetic constraints.

use serde::{Deserialize, Serialize};

use crate::error::{TopologyError, WitnessError};
use crate::identity::{PlaceId, TransitionId};
use crate::marking::{Marking, MAX_TOKENS};

/// A token reservoir.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    /// Human-readable place name, unique within the net.
    pub name: String,
}

/// An atomic state change: consumes one token from each input place and
/// produces one token in each output place. All arc weights are 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    /// Human-readable transition name.
    pub name: String,
    /// Input places, in declaration order.
    pub inputs: Vec<PlaceId>,
    /// Output places, in declaration order.
    pub outputs: Vec<PlaceId>,
}

/// Externally-produced net description, the one configuration surface of the
/// stack. Places and arcs are referenced by name; resolution to indices and
/// all structural validation happen in [`PetriNet::from_description`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetDescription {
    /// Declared places with their initial token counts.
    pub places: Vec<PlaceDescription>,
    /// Declared transitions with named arc lists.
    pub transitions: Vec<TransitionDescription>,
    /// Names of the places whose occupancy ends the game.
    pub outcome_places: Vec<String>,
}

/// One place in a [`NetDescription`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDescription {
    /// Place name, unique within the description.
    pub name: String,
    /// Tokens present at game start.
    #[serde(default)]
    pub initial: u64,
}

/// One transition in a [`NetDescription`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionDescription {
    /// Transition name.
    pub name: String,
    /// Names of input places.
    pub inputs: Vec<String>,
    /// Names of output places.
    pub outputs: Vec<String>,
}

/// The immutable topology of one net shape.
#[derive(Debug, Clone)]
pub struct PetriNet {
    places: Vec<Place>,
    transitions: Vec<Transition>,
    initial_marking: Marking,
    outcome_places: Vec<PlaceId>,
}

impl PetriNet {
    /// Resolve and validate an external description into a net.
    ///
    /// # Errors
    ///
    /// Any structural defect listed in the module documentation aborts
    /// construction with the corresponding [`TopologyError`].
    pub fn from_description(desc: &NetDescription) -> Result<Self, TopologyError> {
        let mut names = std::collections::HashMap::new();
        for (i, place) in desc.places.iter().enumerate() {
            if names.insert(place.name.clone(), PlaceId(i)).is_some() {
                return Err(TopologyError::DuplicatePlace {
                    name: place.name.clone(),
                });
            }
        }

        let resolve = |transition_name: &str, place_name: &str| {
            names
                .get(place_name)
                .copied()
                .ok_or_else(|| TopologyError::UnknownPlace {
                    transition_name: transition_name.to_string(),
                    place_name: place_name.to_string(),
                })
        };

        let mut transitions = Vec::with_capacity(desc.transitions.len());
        for (t, td) in desc.transitions.iter().enumerate() {
            if td.inputs.is_empty() {
                return Err(TopologyError::NoInputs {
                    transition: TransitionId(t),
                });
            }
            if td.outputs.is_empty() {
                return Err(TopologyError::NoOutputs {
                    transition: TransitionId(t),
                });
            }
            let inputs = td
                .inputs
                .iter()
                .map(|n| resolve(&td.name, n))
                .collect::<Result<Vec<_>, _>>()?;
            let outputs = td
                .outputs
                .iter()
                .map(|n| resolve(&td.name, n))
                .collect::<Result<Vec<_>, _>>()?;
            transitions.push(Transition {
                name: td.name.clone(),
                inputs,
                outputs,
            });
        }

        let initial = Marking::new(desc.places.iter().map(|p| p.initial).collect());
        for (i, &count) in initial.counts().iter().enumerate() {
            if count > MAX_TOKENS {
                return Err(TopologyError::InitialCountOverflow {
                    place: PlaceId(i),
                    count,
                    max: MAX_TOKENS,
                });
            }
        }

        if desc.outcome_places.is_empty() {
            return Err(TopologyError::NoOutcomePlaces);
        }
        let outcome_places = desc
            .outcome_places
            .iter()
            .map(|n| {
                names
                    .get(n)
                    .copied()
                    .ok_or_else(|| TopologyError::UnknownOutcomePlace {
                        place_name: n.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            places: desc.places.iter().map(|p| Place { name: p.name.clone() }).collect(),
            transitions,
            initial_marking: initial,
            outcome_places,
        })
    }

    /// Number of places.
    pub fn num_places(&self) -> usize {
        self.places.len()
    }

    /// Number of transitions.
    pub fn num_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// The place table, in index order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// The transition table, in index order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Input places of a transition.
    pub fn inputs(&self, t: TransitionId) -> &[PlaceId] {
        &self.transitions[t.index()].inputs
    }

    /// Output places of a transition.
    pub fn outputs(&self, t: TransitionId) -> &[PlaceId] {
        &self.transitions[t.index()].outputs
    }

    /// The marking every game of this net starts from.
    pub fn initial_marking(&self) -> &Marking {
        &self.initial_marking
    }

    /// Places whose occupancy ends the game, usable in terminal proofs.
    pub fn outcome_places(&self) -> &[PlaceId] {
        &self.outcome_places
    }

    /// Look up a place index by name.
    pub fn place_by_name(&self, name: &str) -> Option<PlaceId> {
        self.places
            .iter()
            .position(|p| p.name == name)
            .map(PlaceId)
    }

    /// Look up a transition index by name.
    pub fn transition_by_name(&self, name: &str) -> Option<TransitionId> {
        self.transitions
            .iter()
            .position(|t| t.name == name)
            .map(TransitionId)
    }

    /// Whether a marking has the right length and bounded counts for this net.
    pub fn check_marking(&self, marking: &Marking) -> Result<(), WitnessError> {
        if marking.len() != self.num_places() {
            return Err(WitnessError::MarkingLength {
                got: marking.len(),
                expected: self.num_places(),
            });
        }
        if !marking.within_bounds() {
            return Err(WitnessError::RangeExceeded {
                context: "marking token count".to_string(),
                bits: crate::marking::TOKEN_BITS,
            });
        }
        Ok(())
    }

    /// Whether `t` may fire under `marking`: every input place holds at
    /// least one token.
    pub fn enabled(&self, marking: &Marking, t: TransitionId) -> bool {
        self.inputs(t).iter().all(|&p| marking.count(p) >= 1)
    }

    /// Apply one firing of `t` to `marking`, returning the successor state.
    ///
    /// # Errors
    ///
    /// [`WitnessError::NotEnabled`] naming the first empty input place, or a
    /// length/bounds error if the marking does not belong to this net.
    /// An output place already at [`MAX_TOKENS`] surfaces as a range error.
    pub fn fire(&self, marking: &Marking, t: TransitionId) -> Result<Marking, WitnessError> {
        self.check_marking(marking)?;
        for &p in self.inputs(t) {
            if marking.count(p) == 0 {
                return Err(WitnessError::NotEnabled {
                    transition: t,
                    place: p,
                });
            }
        }
        let mut next = marking.clone();
        for &p in self.inputs(t) {
            next.set(p, next.count(p) - 1);
        }
        for &p in self.outputs(t) {
            let count = next.count(p) + 1;
            if count > MAX_TOKENS {
                return Err(WitnessError::RangeExceeded {
                    context: format!("token count at {p} after firing {t}"),
                    bits: crate::marking::TOKEN_BITS,
                });
            }
            next.set(p, count);
        }
        Ok(next)
    }
}
