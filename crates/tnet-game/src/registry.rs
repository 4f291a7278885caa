//! # Game Registry
//!
//! The id-keyed map of live sessions. Each session is independently
//! lockable; the registry's own lock guards only the map and is never held
//! across a firing, so games never contend with each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use tnet_core::{GameId, PetriNet};

use crate::session::GameSession;

/// Registry of live games, keyed by game id.
///
/// Values are `Arc<Mutex<GameSession>>`: callers clone the `Arc` out under
/// the registry's read lock, drop the registry lock, and only then lock the
/// individual session to fire.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: RwLock<HashMap<GameId, Arc<Mutex<GameSession>>>>,
}

impl GameRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new game on the given topology and register it.
    pub fn create(&self, net: Arc<PetriNet>) -> (GameId, Arc<Mutex<GameSession>>) {
        let id = GameId::new();
        let session = Arc::new(Mutex::new(GameSession::new(id.clone(), net)));
        self.write().insert(id.clone(), session.clone());
        tracing::info!(game = %id, "game registered");
        (id, session)
    }

    /// Look up a game, cloning its handle out of the map.
    pub fn get(&self, id: &GameId) -> Option<Arc<Mutex<GameSession>>> {
        self.read().get(id).cloned()
    }

    /// Remove a finished game, returning its handle if it was registered.
    pub fn remove(&self, id: &GameId) -> Option<Arc<Mutex<GameSession>>> {
        let removed = self.write().remove(id);
        if removed.is_some() {
            tracing::info!(game = %id, "game removed");
        }
        removed
    }

    /// Number of registered games.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no games are registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Lock poisoning means another thread panicked mid-operation; the map
    // itself (Arc handles) is still structurally sound, so recover it.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<GameId, Arc<Mutex<GameSession>>>> {
        self.games.read().unwrap_or_else(|poison| poison.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<GameId, Arc<Mutex<GameSession>>>> {
        self.games.write().unwrap_or_else(|poison| poison.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tnet_core::{NetDescription, TransitionId};

    fn chain_net() -> Arc<PetriNet> {
        let desc: NetDescription = serde_json::from_str(
            r#"{
                "places": [
                    {"name": "start", "initial": 1},
                    {"name": "mid"},
                    {"name": "done"}
                ],
                "transitions": [
                    {"name": "advance", "inputs": ["start"], "outputs": ["mid"]},
                    {"name": "finish", "inputs": ["mid"], "outputs": ["done"]}
                ],
                "outcome_places": ["done"]
            }"#,
        )
        .expect("valid json");
        Arc::new(PetriNet::from_description(&desc).expect("valid net"))
    }

    #[test]
    fn test_create_get_remove() {
        let registry = GameRegistry::new();
        let net = chain_net();
        let (id, _session) = registry.create(net);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&id).is_some());
        assert!(registry.remove(&id).is_some());
        assert!(registry.is_empty());
        assert!(registry.get(&id).is_none());
    }

    #[test]
    fn test_games_are_independent() {
        let registry = GameRegistry::new();
        let net = chain_net();
        let (id_a, game_a) = registry.create(net.clone());
        let (id_b, game_b) = registry.create(net);
        assert_ne!(id_a, id_b);

        game_a
            .lock()
            .expect("unpoisoned")
            .fire(TransitionId(0))
            .expect("enabled");
        // Game B is untouched by game A's firing.
        assert_eq!(
            game_b.lock().expect("unpoisoned").marking().counts(),
            &[1, 0, 0]
        );
    }

    #[test]
    fn test_concurrent_firings_on_distinct_games() {
        let registry = Arc::new(GameRegistry::new());
        let net = chain_net();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let (id, _) = registry.create(net.clone());
            let registry = registry.clone();
            handles.push(std::thread::spawn(move || {
                let session = registry.get(&id).expect("registered");
                let mut session = session.lock().expect("unpoisoned");
                session.fire(TransitionId(0)).expect("enabled");
                session.fire(TransitionId(1)).expect("enabled");
                assert_eq!(session.marking().counts(), &[0, 0, 1]);
            }));
        }
        for handle in handles {
            handle.join().expect("no panics");
        }
        assert_eq!(registry.len(), 8);
    }
}
