use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Games offered in the lobby. Only Snake has rules; the others render a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Snake,
    Tetris,
    Game2048,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Snake, GameKind::Tetris, GameKind::Game2048];

    /// Identifier used in storage keys and placeholder text
    pub fn id(&self) -> &'static str {
        match self {
            GameKind::Snake => "snake",
            GameKind::Tetris => "tetris",
            GameKind::Game2048 => "2048",
        }
    }

    /// Title shown above the canvas
    pub fn title(&self) -> String {
        let id = self.id();
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn is_implemented(&self) -> bool {
        matches!(self, GameKind::Snake)
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for GameKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameKind::ALL
            .into_iter()
            .find(|game| game.id() == s)
            .ok_or_else(|| ParseError::UnknownGame(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_str() {
        for game in GameKind::ALL {
            assert_eq!(game.id().parse::<GameKind>(), Ok(game));
        }
    }

    #[test]
    fn titles_capitalize_first_char() {
        assert_eq!(GameKind::Snake.title(), "Snake");
        assert_eq!(GameKind::Tetris.title(), "Tetris");
        assert_eq!(GameKind::Game2048.title(), "2048");
    }

    #[test]
    fn unknown_game_is_rejected() {
        assert_eq!(
            "pong".parse::<GameKind>(),
            Err(ParseError::UnknownGame("pong".to_string()))
        );
    }
}
