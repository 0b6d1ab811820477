//! Movement, collision and game-state core of a grid maze chase game.
//!
//! Hosts drive [`Game::update`] from their own timer and read the maze and
//! entity state back out to draw it.

pub mod actor;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod ghost;
pub mod maze;
pub mod player;
pub mod vector;

pub use actor::{Actor, Mover};
pub use components::{Direction, Key, PelletKind, TilePos};
pub use config::Config;
pub use error::LayoutError;
pub use game::{Events, Game, GameState};
pub use ghost::Ghost;
pub use maze::{Maze, PelletSet, Tile};
pub use player::Player;
pub use vector::Vector;
