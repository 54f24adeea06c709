mod config;
mod constants;
mod error;
mod game;
mod game_loop;
mod input;
mod score_store;
mod snake;

pub mod render;
pub mod util;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use game::*;
pub use game_loop::*;
pub use input::*;
pub use score_store::*;
pub use snake::*;
pub use render::Surface;
pub use util::{PseudoRandom, RandomSource};
