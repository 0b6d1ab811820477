use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::actor::{Actor, Mover};
use crate::components::{Direction, TilePos};
use crate::maze::Maze;
use crate::vector::Vector;

/// Wandering adversary. Picks a new heading at every intersection it crosses.
#[derive(Debug, Clone)]
pub struct Ghost {
    actor: Actor,
}

impl Ghost {
    pub fn new(position: Vector, speed: f32, radius: f32, rng: &mut impl Rng) -> Self {
        let mut actor = Actor::new(position, speed, radius);
        actor.direction = Direction::CARDINALS
            .choose(rng)
            .copied()
            .unwrap_or(Direction::Right);
        Self { actor }
    }

    pub fn update(&mut self, dt: f32, maze: &Maze, rng: &mut impl Rng) {
        if self.actor.is_aligned() {
            let tile = maze.pixel_to_tile(self.actor.position);
            self.actor.direction = self.choose_direction(maze, tile, rng);
        }
        self.actor.advance(dt, maze);
    }

    /// Back to `position` heading right.
    pub fn respawn(&mut self, position: Vector) {
        self.actor.place(position, Direction::Right);
    }

    pub fn speed(&self) -> f32 {
        self.actor.speed
    }

    fn choose_direction(&self, maze: &Maze, tile: TilePos, rng: &mut impl Rng) -> Direction {
        let available = maze.available_directions(tile);
        let reverse = self.actor.direction.opposite();
        let forward: Vec<Direction> = available
            .iter()
            .copied()
            .filter(|&dir| dir != reverse)
            .collect();
        let candidates = if forward.is_empty() { &available } else { &forward };

        let choice = candidates.choose(rng).copied().unwrap_or(reverse);
        trace!(col = tile.col, row = tile.row, ?choice, "ghost turn");
        choice
    }
}

impl Mover for Ghost {
    fn actor(&self) -> &Actor {
        &self.actor
    }
}
