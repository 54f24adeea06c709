/// Side length of one grid cell in canvas units
pub const GRID_CELL: i32 = 10;

/// Default interval between snake ticks in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 100;

/// Points awarded per food eaten
pub const FOOD_SCORE: u32 = 10;

/// Body segments at the front of the snake that never count as a self-collision
pub const SELF_COLLISION_SKIP: usize = 4;

/// Minimum swipe distance before a touch gesture counts as a direction
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 30.0;

pub const DEFAULT_CANVAS_WIDTH: i32 = 300;
pub const DEFAULT_CANVAS_HEIGHT: i32 = 300;

/// Suffix appended to a game id to form its high-score storage key
pub const HIGHSCORE_KEY_SUFFIX: &str = "_highscore";
