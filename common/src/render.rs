use anyhow::Result;

use crate::constants::GRID_CELL;
use crate::game::GameKind;
use crate::snake::SnakeGame;
use crate::util::RandomSource;

pub const BACKGROUND_COLOR: &str = "#000";
pub const SNAKE_COLOR: &str = "lime";
pub const FOOD_COLOR: &str = "red";
pub const TEXT_COLOR: &str = "#fff";
pub const OVERLAY_COLOR: &str = "rgba(0, 0, 0, 0.75)";
pub const PLACEHOLDER_FONT: &str = "20px sans-serif";
pub const GAME_OVER_FONT: &str = "10px sans-serif";

/// A 2D raster target, in canvas units
pub trait Surface {
    fn width(&self) -> f64;

    fn height(&self) -> f64;

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);

    /// Reset every pixel to transparent
    fn clear(&mut self);

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str, font: &str) -> Result<()>;
}

/// Full-canvas background fill, done before every processed tick
pub fn clear_frame<S: Surface + ?Sized>(surface: &mut S) {
    let (width, height) = (surface.width(), surface.height());
    surface.fill_rect(0.0, 0.0, width, height, BACKGROUND_COLOR);
}

pub fn draw_snake<S: Surface + ?Sized, R: RandomSource>(surface: &mut S, game: &SnakeGame<R>) {
    let cell = GRID_CELL as f64;
    for segment in game.body() {
        surface.fill_rect(segment.x as f64, segment.y as f64, cell, cell, SNAKE_COLOR);
    }

    let food = game.food();
    surface.fill_rect(food.x as f64, food.y as f64, cell, cell, FOOD_COLOR);
}

/// Stand-in frame for games without rules yet
pub fn draw_placeholder<S: Surface + ?Sized>(surface: &mut S, game: GameKind) -> Result<()> {
    clear_frame(surface);
    let y = surface.height() / 2.0;
    surface.fill_text(&format!("{} in development...", game.id()), 40.0, y, TEXT_COLOR, PLACEHOLDER_FONT)
}

pub fn draw_game_over<S: Surface + ?Sized>(surface: &mut S) -> Result<()> {
    let (width, height) = (surface.width(), surface.height());
    surface.fill_rect(0.0, 0.0, width, height, OVERLAY_COLOR);
    surface.fill_text("GAME OVER", 90.0, height / 2.0, TEXT_COLOR, GAME_OVER_FONT)
}
