use crate::state::{GameState, Player};

/// Holder of the one authoritative snapshot.
///
/// The store never merges: [`GameStateStore::replace`] swaps the whole
/// snapshot and bumps the revision so callers can tell that a re-projection
/// is due.
#[derive(Debug, Clone, Default)]
pub struct GameStateStore {
    current: Option<GameState>,
    revision: u64,
}

impl GameStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, state: GameState) {
        self.revision += 1;
        log::debug!(
            "state replaced (revision {}, day {})",
            self.revision,
            state.current_day
        );
        self.current = Some(state);
    }

    #[must_use]
    pub const fn current(&self) -> Option<&GameState> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn player(&self) -> Option<&Player> {
        self.current.as_ref().and_then(|state| state.player.as_ref())
    }

    #[must_use]
    pub fn has_player(&self) -> bool {
        self.player().is_some()
    }

    /// Number of replacements so far; zero while empty.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}
