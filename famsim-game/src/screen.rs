use crate::state::GameState;
use std::fmt;

/// Top-level views; exactly one is visible at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Start,
    CreateCharacter,
    LoadGame,
    Game,
    GameIntro,
}

impl Screen {
    pub const ALL: [Self; 5] = [
        Self::Start,
        Self::CreateCharacter,
        Self::LoadGame,
        Self::Game,
        Self::GameIntro,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::CreateCharacter => "create-character",
            Self::LoadGame => "load-game",
            Self::Game => "game",
            Self::GameIntro => "game-intro",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen to open after the startup probe.
#[must_use]
pub fn screen_for_probe(probe: Option<&GameState>) -> Screen {
    if probe.is_some_and(GameState::has_player) {
        Screen::Game
    } else {
        Screen::Start
    }
}

/// Tracks the visible screen. There is no history: leaving a screen forgets
/// it, and `Start` is the only way back.
#[derive(Debug, Clone, Default)]
pub struct ScreenManager {
    active: Screen,
}

impl ScreenManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, screen: Screen) {
        if self.active != screen {
            log::debug!("screen {} -> {}", self.active, screen);
        }
        self.active = screen;
    }

    #[must_use]
    pub const fn active(&self) -> Screen {
        self.active
    }

    #[must_use]
    pub fn is_visible(&self, screen: Screen) -> bool {
        self.active == screen
    }

    /// The game-info side panel follows the game screen.
    #[must_use]
    pub fn game_info_visible(&self) -> bool {
        self.is_visible(Screen::Game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Player;

    #[test]
    fn exactly_one_screen_is_visible() {
        let mut screens = ScreenManager::new();
        for target in Screen::ALL {
            screens.show(target);
            let visible = Screen::ALL
                .iter()
                .filter(|s| screens.is_visible(**s))
                .count();
            assert_eq!(visible, 1);
            assert_eq!(screens.game_info_visible(), target == Screen::Game);
        }
    }

    #[test]
    fn probe_decides_initial_screen() {
        assert_eq!(screen_for_probe(None), Screen::Start);
        let empty = GameState::default();
        assert_eq!(screen_for_probe(Some(&empty)), Screen::Start);
        let loaded = GameState {
            player: Some(Player::default()),
            ..GameState::default()
        };
        assert_eq!(screen_for_probe(Some(&loaded)), Screen::Game);
    }
}
