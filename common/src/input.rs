//! Maps raw keyboard, touch and button input onto abstract game actions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::game::GameKind;
use crate::snake::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Up,
    Right,
    Down,
    Rotate,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Up => "up",
            Action::Right => "right",
            Action::Down => "down",
            Action::Rotate => "rotate",
        }
    }

    /// Movement actions map to a direction; rotate has none
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Action::Left => Some(Direction::Left),
            Action::Up => Some(Direction::Up),
            Action::Right => Some(Direction::Right),
            Action::Down => Some(Direction::Down),
            Action::Rotate => None,
        }
    }

    /// Button glyph for the on-screen controls
    pub fn label(&self) -> &'static str {
        match self {
            Action::Left => "⬅️",
            Action::Up => "⬆️",
            Action::Right => "➡️",
            Action::Down => "⬇️",
            Action::Rotate => "🔄",
        }
    }

    /// Keyboard mapping using DOM `KeyboardEvent.key` names
    pub fn from_key(key: &str) -> Option<Action> {
        match key {
            "ArrowLeft" => Some(Action::Left),
            "ArrowUp" => Some(Action::Up),
            "ArrowRight" => Some(Action::Right),
            "ArrowDown" => Some(Action::Down),
            _ => None,
        }
    }
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Action::Left),
            "up" => Ok(Action::Up),
            "right" => Ok(Action::Right),
            "down" => Ok(Action::Down),
            "rotate" => Ok(Action::Rotate),
            other => Err(ParseError::UnknownAction(other.to_string())),
        }
    }
}

/// Turns a touch start/end pair into a direction along the dominant axis.
/// Screen y grows downward, so a positive vertical delta is `Down`.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTracker {
    threshold: f64,
    start: Option<(f64, f64)>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self { threshold, start: None }
    }

    pub fn begin(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    pub fn end(&mut self, x: f64, y: f64) -> Option<Action> {
        let (start_x, start_y) = self.start.take()?;
        let dx = x - start_x;
        let dy = y - start_y;

        if dx.abs() > dy.abs() {
            if dx > self.threshold {
                Some(Action::Right)
            } else if dx < -self.threshold {
                Some(Action::Left)
            } else {
                None
            }
        } else if dy > self.threshold {
            Some(Action::Down)
        } else if dy < -self.threshold {
            Some(Action::Up)
        } else {
            None
        }
    }
}

/// On-screen control set shown under the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlScheme {
    SwipeHint,
    TetrisControls,
}

impl ControlScheme {
    pub const SWIPE_HINT_TEXT: &'static str = "(Swipe or Arrow Keys to move)";

    pub fn for_game(game: GameKind) -> Self {
        match game {
            GameKind::Tetris => ControlScheme::TetrisControls,
            GameKind::Snake | GameKind::Game2048 => ControlScheme::SwipeHint,
        }
    }

    /// Button rows, top to bottom. Empty for the swipe hint.
    pub fn button_rows(&self) -> &'static [&'static [Action]] {
        match self {
            ControlScheme::SwipeHint => &[],
            ControlScheme::TetrisControls => &[
                &[Action::Rotate, Action::Up],
                &[Action::Left, Action::Down, Action::Right],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_strings() {
        for action in [Action::Left, Action::Up, Action::Right, Action::Down, Action::Rotate] {
            assert_eq!(action.as_str().parse::<Action>(), Ok(action));
        }
        assert!(matches!("jump".parse::<Action>(), Err(ParseError::UnknownAction(_))));
        assert!("LEFT".parse::<Action>().is_err());
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(Action::from_key("ArrowLeft"), Some(Action::Left));
        assert_eq!(Action::from_key("ArrowUp"), Some(Action::Up));
        assert_eq!(Action::from_key("ArrowRight"), Some(Action::Right));
        assert_eq!(Action::from_key("ArrowDown"), Some(Action::Down));
        assert_eq!(Action::from_key("w"), None);
        assert_eq!(Action::from_key("Enter"), None);
    }

    #[test]
    fn test_swipe_directions() {
        let mut swipe = SwipeTracker::new(30.0);

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(150.0, 110.0), Some(Action::Right));

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(40.0, 90.0), Some(Action::Left));

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(110.0, 160.0), Some(Action::Down));

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(95.0, 20.0), Some(Action::Up));
    }

    #[test]
    fn test_short_swipe_is_ignored() {
        let mut swipe = SwipeTracker::new(30.0);
        swipe.begin(0.0, 0.0);
        assert_eq!(swipe.end(30.0, 0.0), None);
        swipe.begin(0.0, 0.0);
        assert_eq!(swipe.end(0.0, -30.0), None);
    }

    #[test]
    fn test_dominant_axis_wins() {
        // Long enough vertically, but horizontal dominates and is under threshold
        let mut swipe = SwipeTracker::new(30.0);
        swipe.begin(0.0, 0.0);
        assert_eq!(swipe.end(25.0, 20.0), None);
    }

    #[test]
    fn test_end_without_begin() {
        let mut swipe = SwipeTracker::new(30.0);
        assert_eq!(swipe.end(200.0, 0.0), None);
        swipe.begin(0.0, 0.0);
        assert_eq!(swipe.end(200.0, 0.0), Some(Action::Right));
        assert_eq!(swipe.end(400.0, 0.0), None);
    }

    #[test]
    fn test_control_schemes() {
        assert_eq!(ControlScheme::for_game(GameKind::Snake), ControlScheme::SwipeHint);
        assert_eq!(ControlScheme::for_game(GameKind::Game2048), ControlScheme::SwipeHint);
        assert_eq!(ControlScheme::for_game(GameKind::Tetris), ControlScheme::TetrisControls);

        assert!(ControlScheme::SwipeHint.button_rows().is_empty());
        let rows = ControlScheme::TetrisControls.button_rows();
        assert_eq!(rows[0], &[Action::Rotate, Action::Up]);
        assert_eq!(rows[1], &[Action::Left, Action::Down, Action::Right]);
    }
}
