use std::collections::VecDeque;
use std::ops::Add;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{FOOD_SCORE, GRID_CELL, SELF_COLLISION_SKIP};
use crate::util::{PseudoRandom, RandomSource};

/// Starting body, head first, laid out horizontally
const INITIAL_BODY: [Position; 3] = [
    Position { x: 150, y: 150 },
    Position { x: 140, y: 150 },
    Position { x: 130, y: 150 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

impl Add<Heading> for Position {
    type Output = Position;

    fn add(self, heading: Heading) -> Position {
        Position { x: self.x + heading.dx, y: self.y + heading.dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub fn heading(&self) -> Heading {
        match self {
            Direction::Left => Heading::LEFT,
            Direction::Up => Heading::UP,
            Direction::Right => Heading::RIGHT,
            Direction::Down => Heading::DOWN,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Per-tick step vector, always one grid cell along a single axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub dx: i32,
    pub dy: i32,
}

impl Heading {
    pub const LEFT: Heading = Heading { dx: -GRID_CELL, dy: 0 };
    pub const UP: Heading = Heading { dx: 0, dy: -GRID_CELL };
    pub const RIGHT: Heading = Heading { dx: GRID_CELL, dy: 0 };
    pub const DOWN: Heading = Heading { dx: 0, dy: GRID_CELL };

    /// A turn is only allowed onto the axis we are not moving along.
    /// This is what rules out direct reversals.
    pub fn accepts(&self, direction: Direction) -> bool {
        if direction.is_horizontal() { self.dx == 0 } else { self.dy == 0 }
    }
}

/// Re-entrancy flag owned by the game loop. Engaged by an accepted turn and
/// released by the loop at the start of every tick, so at most one turn lands per tick.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickLatch {
    engaged: bool,
}

impl TickLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn engage(&mut self) {
        self.engaged = true;
    }

    pub fn release(&mut self) {
        self.engaged = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakePhase {
    Idle,
    Running,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Latch engaged or no round in progress; nothing changed
    Skipped,
    Moved,
    Ate { score: u32 },
    GameOver,
}

/// Snake rules on a grid of `GRID_CELL` sized cells inside a `width` x `height` canvas
#[derive(Debug, Clone)]
pub struct SnakeGame<R: RandomSource = PseudoRandom> {
    body: VecDeque<Position>,
    food: Position,
    heading: Heading,
    score: u32,
    phase: SnakePhase,
    width: i32,
    height: i32,
    rng: R,
}

impl<R: RandomSource> SnakeGame<R> {
    pub fn new(width: i32, height: i32, rng: R) -> Self {
        SnakeGame {
            body: VecDeque::new(),
            food: Position::new(0, 0),
            heading: Heading::RIGHT,
            score: 0,
            phase: SnakePhase::Idle,
            width,
            height,
            rng,
        }
    }

    pub fn init(&mut self) {
        self.body = INITIAL_BODY.into_iter().collect();
        self.heading = Heading::RIGHT;
        self.score = 0;
        self.phase = SnakePhase::Running;
        self.spawn_food();
    }

    /// Drop the round and go back to the idle state
    pub fn reset(&mut self) {
        self.body.clear();
        self.phase = SnakePhase::Idle;
    }

    /// Place food on a random grid point inside the canvas. Cells under the
    /// snake are not excluded.
    pub fn spawn_food(&mut self) {
        let x = self.random_grid_coord(self.width);
        let y = self.random_grid_coord(self.height);
        self.food = Position::new(x, y);
    }

    fn random_grid_coord(&mut self, extent: i32) -> i32 {
        let span = (extent - GRID_CELL).max(0) as f64;
        let cells = (self.rng.next_unit() * span / GRID_CELL as f64).round() as i32;
        cells * GRID_CELL
    }

    pub fn place_food(&mut self, position: Position) {
        self.food = position;
    }

    pub fn step(&mut self, latch: &TickLatch) -> StepOutcome {
        if latch.is_engaged() || self.phase != SnakePhase::Running {
            return StepOutcome::Skipped;
        }

        let Some(&head) = self.body.front() else {
            return StepOutcome::Skipped;
        };

        let new_head = head + self.heading;
        self.body.push_front(new_head);

        let ate = new_head == self.food;
        if ate {
            self.score += FOOD_SCORE;
            self.spawn_food();
            debug!("Food eaten at {:?}, score {}, next food at {:?}", new_head, self.score, self.food);
        } else {
            self.body.pop_back();
        }

        if !self.in_bounds(&new_head) || self.has_eaten_self() {
            self.phase = SnakePhase::GameOver;
            debug!("Snake crashed at {:?} with length {}", new_head, self.body.len());
            return StepOutcome::GameOver;
        }

        if ate {
            StepOutcome::Ate { score: self.score }
        } else {
            StepOutcome::Moved
        }
    }

    /// Returns whether the turn was taken. Accepted turns engage the latch.
    pub fn set_heading(&mut self, direction: Direction, latch: &mut TickLatch) -> bool {
        if latch.is_engaged() || self.phase != SnakePhase::Running {
            return false;
        }

        if !self.heading.accepts(direction) {
            return false;
        }

        self.heading = direction.heading();
        latch.engage();
        true
    }

    fn in_bounds(&self, position: &Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    // The first few segments are skipped so a fresh turn never reads as a collision
    fn has_eaten_self(&self) -> bool {
        let Some(head) = self.body.front() else {
            return false;
        };
        self.body.iter().skip(SELF_COLLISION_SKIP).any(|segment| segment == head)
    }

    pub fn body(&self) -> impl ExactSizeIterator<Item = &Position> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Option<&Position> {
        self.body.front()
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> SnakePhase {
        self.phase
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}
