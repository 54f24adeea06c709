//! The arcade's single game loop. The host drives it with animation-frame
//! callbacks and input events; everything runs on one thread.

use anyhow::Result;
use log::{debug, info, warn};

use crate::config::ArcadeConfig;
use crate::game::GameKind;
use crate::input::{Action, ControlScheme, SwipeTracker};
use crate::render::{self, Surface};
use crate::score_store::{KeyValueStore, ScoreStore};
use crate::snake::{SnakeGame, StepOutcome, TickLatch};
use crate::util::PseudoRandom;

/// Identifies one chain of scheduled frames. Restarting or leaving a game
/// retires the current token, so callbacks still queued under it are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Per-refresh callback scheduling, e.g. `requestAnimationFrame`
pub trait FrameScheduler {
    /// Arrange for `GameLoop::on_frame` to run once on the next display refresh
    fn request_frame(&mut self, token: FrameToken) -> Result<()>;

    fn cancel_frame(&mut self, token: FrameToken);
}

/// Page elements around the canvas
pub trait Shell {
    fn show_lobby(&mut self) -> Result<()>;

    fn show_game(&mut self, title: &str) -> Result<()>;

    fn set_score(&mut self, score: u32);

    fn set_high_score(&mut self, score: u32);

    fn set_controls(&mut self, scheme: ControlScheme) -> Result<()>;
}

/// Mutable game state owned by the loop
#[derive(Debug)]
pub struct Session {
    pub active: Option<GameKind>,
    pub snake: SnakeGame,
    pub latch: TickLatch,
    pub swipe: SwipeTracker,
    last_tick_ms: f64,
    frame: Option<FrameToken>,
    generation: u64,
}

impl Session {
    fn new(config: &ArcadeConfig) -> Self {
        let rng = PseudoRandom::new(config.rng_seed.unwrap_or_default());
        Session {
            active: None,
            snake: SnakeGame::new(config.canvas_width, config.canvas_height, rng),
            latch: TickLatch::new(),
            swipe: SwipeTracker::new(config.swipe_threshold),
            last_tick_ms: 0.0,
            frame: None,
            generation: 0,
        }
    }

    fn next_token(&mut self) -> FrameToken {
        self.generation += 1;
        FrameToken(self.generation)
    }

    fn score(&self, game: GameKind) -> u32 {
        match game {
            GameKind::Snake => self.snake.score(),
            GameKind::Tetris | GameKind::Game2048 => 0,
        }
    }
}

pub struct GameLoop<D: Surface, K: KeyValueStore, U: Shell, F: FrameScheduler> {
    config: ArcadeConfig,
    surface: D,
    scores: ScoreStore<K>,
    shell: U,
    scheduler: F,
    session: Session,
}

impl<D: Surface, K: KeyValueStore, U: Shell, F: FrameScheduler> GameLoop<D, K, U, F> {
    pub fn new(config: ArcadeConfig, surface: D, store: K, shell: U, scheduler: F) -> Self {
        let session = Session::new(&config);
        GameLoop {
            config,
            surface,
            scores: ScoreStore::new(store),
            shell,
            scheduler,
            session,
        }
    }

    /// Leave the lobby and start `game`, replacing any game already running.
    /// `now_ms` must come from the same clock as the frame timestamps.
    pub fn start_game(&mut self, game: GameKind, now_ms: f64) -> Result<()> {
        info!("Starting {}", game);

        self.shell.show_game(&game.title())?;
        self.shell.set_score(0);
        self.shell.set_high_score(self.scores.load(game));
        self.session.active = Some(game);
        self.shell.set_controls(ControlScheme::for_game(game))?;

        if game == GameKind::Snake {
            self.session.snake.init();
            self.session.latch.release();
            self.shell.set_score(self.session.snake.score());
        }

        if let Some(stale) = self.session.frame.take() {
            self.scheduler.cancel_frame(stale);
        }
        let token = self.session.next_token();
        self.session.frame = Some(token);
        self.session.last_tick_ms = now_ms;

        self.on_frame(token, now_ms)
    }

    /// Animation-frame callback. Keeps the chain alive while a game is active
    /// and advances Snake at most once per tick interval.
    pub fn on_frame(&mut self, token: FrameToken, time_ms: f64) -> Result<()> {
        if self.session.frame != Some(token) {
            debug!("Ignoring frame from retired chain {}", token.generation());
            return Ok(());
        }

        let Some(game) = self.session.active else {
            return Ok(());
        };

        self.scheduler.request_frame(token)?;

        match game {
            GameKind::Snake => {
                let elapsed = time_ms - self.session.last_tick_ms;
                if elapsed < self.config.tick_interval_ms as f64 {
                    return Ok(());
                }
                self.session.last_tick_ms = time_ms;
                self.tick_snake()
            }
            GameKind::Tetris | GameKind::Game2048 => render::draw_placeholder(&mut self.surface, game),
        }
    }

    fn tick_snake(&mut self) -> Result<()> {
        render::clear_frame(&mut self.surface);

        self.session.latch.release();
        match self.session.snake.step(&self.session.latch) {
            StepOutcome::Ate { score } => self.shell.set_score(score),
            StepOutcome::GameOver => {
                self.shell.set_score(self.session.snake.score());
                self.game_over()?;
            }
            StepOutcome::Moved | StepOutcome::Skipped => {}
        }

        if self.session.active.is_some() {
            render::draw_snake(&mut self.surface, &self.session.snake);
        }
        Ok(())
    }

    /// Stops model updates and shows the overlay. The frame chain winds down
    /// on its own; the token is only retired on lobby return or restart.
    fn game_over(&mut self) -> Result<()> {
        let Some(game) = self.session.active.take() else {
            return Ok(());
        };

        let score = self.session.score(game);
        info!("Game over in {} with score {}", game, score);
        self.persist_high_score(game, score);
        render::draw_game_over(&mut self.surface)
    }

    pub fn return_to_lobby(&mut self) -> Result<()> {
        if let Some(token) = self.session.frame.take() {
            self.scheduler.cancel_frame(token);
        }

        if let Some(game) = self.session.active.take() {
            let score = self.session.score(game);
            info!("Leaving {} with score {}", game, score);
            self.persist_high_score(game, score);
        }
        self.session.snake.reset();
        self.surface.clear();

        self.shell.show_lobby()
    }

    fn persist_high_score(&mut self, game: GameKind, score: u32) {
        match self.scores.save(game, score) {
            Ok(Some(high_score)) => {
                info!("New {} high score: {}", game, high_score);
                self.shell.set_high_score(high_score);
            }
            Ok(None) => {}
            Err(e) => warn!("{:#}", e),
        }
    }

    /// Single dispatch point for every input source
    pub fn handle_input(&mut self, action: Action) {
        let Some(game) = self.session.active else {
            return;
        };

        match game {
            GameKind::Snake => {
                let Some(direction) = action.direction() else {
                    return;
                };
                if self.session.snake.set_heading(direction, &mut self.session.latch) {
                    debug!("Snake turned {:?}", direction);
                }
            }
            GameKind::Tetris | GameKind::Game2048 => {
                debug!("{} has no handler for {:?} yet", game, action);
            }
        }
    }

    /// Button clicks arrive as action names; unknown names are dropped
    pub fn handle_action_name(&mut self, name: &str) {
        match name.parse::<Action>() {
            Ok(action) => self.handle_input(action),
            Err(e) => warn!("{}", e),
        }
    }

    pub fn handle_key(&mut self, key: &str) {
        if let Some(action) = Action::from_key(key) {
            self.handle_input(action);
        }
    }

    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.session.swipe.begin(x, y);
    }

    pub fn touch_end(&mut self, x: f64, y: f64) {
        if let Some(action) = self.session.swipe.end(x, y) {
            self.handle_input(action);
        }
    }

    pub fn active_game(&self) -> Option<GameKind> {
        self.session.active
    }

    pub fn current_frame(&self) -> Option<FrameToken> {
        self.session.frame
    }

    pub fn high_score(&self, game: GameKind) -> u32 {
        self.scores.load(game)
    }

    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    pub fn shell(&self) -> &U {
        &self.shell
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn store(&self) -> &K {
        self.scores.inner()
    }
}
