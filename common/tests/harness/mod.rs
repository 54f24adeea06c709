#![allow(dead_code)]

use anyhow::Result;
use common::{
    ArcadeConfig, ControlScheme, FrameScheduler, FrameToken, GameLoop, MemoryStore, Shell, Surface,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect { x: f64, y: f64, width: f64, height: f64, color: String },
    Text { text: String, x: f64, y: f64, color: String, font: String },
    Clear,
}

/// Records every draw call instead of rasterizing
#[derive(Debug)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ops: Vec::new() }
    }

    pub fn rects_of(&self, color: &str) -> Vec<(f64, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { x, y, color: c, .. } if c == color => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.ops.push(DrawOp::Rect { x, y, width, height, color: color.to_string() });
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str, font: &str) -> Result<()> {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            color: color.to_string(),
            font: font.to_string(),
        });
        Ok(())
    }
}

#[derive(Debug)]
pub struct FakeShell {
    pub lobby_visible: bool,
    pub title: Option<String>,
    pub score: u32,
    pub high_score: u32,
    pub controls: Option<ControlScheme>,
}

impl Default for FakeShell {
    fn default() -> Self {
        Self { lobby_visible: true, title: None, score: 0, high_score: 0, controls: None }
    }
}

impl Shell for FakeShell {
    fn show_lobby(&mut self) -> Result<()> {
        self.lobby_visible = true;
        Ok(())
    }

    fn show_game(&mut self, title: &str) -> Result<()> {
        self.lobby_visible = false;
        self.title = Some(title.to_string());
        Ok(())
    }

    fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    fn set_high_score(&mut self, score: u32) {
        self.high_score = score;
    }

    fn set_controls(&mut self, scheme: ControlScheme) -> Result<()> {
        self.controls = Some(scheme);
        Ok(())
    }
}

/// Holds at most one pending frame, like a single requestAnimationFrame slot
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pub pending: Option<FrameToken>,
    pub requests: usize,
    pub cancelled: Vec<FrameToken>,
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self, token: FrameToken) -> Result<()> {
        self.pending = Some(token);
        self.requests += 1;
        Ok(())
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
        self.cancelled.push(token);
    }
}

pub type TestLoop = GameLoop<RecordingSurface, MemoryStore, FakeShell, ManualScheduler>;

pub fn test_loop(store: MemoryStore) -> TestLoop {
    let config = ArcadeConfig { rng_seed: Some(12345), ..Default::default() };
    GameLoop::new(
        config,
        RecordingSurface::new(300.0, 300.0),
        store,
        FakeShell::default(),
        ManualScheduler::default(),
    )
}

/// Fire the pending frame callback, if any, at `time_ms`.
/// Returns whether a callback ran.
pub fn pump(game_loop: &mut TestLoop, time_ms: f64) -> Result<bool> {
    match game_loop.scheduler_mut().pending.take() {
        Some(token) => {
            game_loop.on_frame(token, time_ms)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
