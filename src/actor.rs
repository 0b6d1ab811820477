use crate::components::Direction;
use crate::constants::{ALIGN_EPSILON, TILE_SIZE};
use crate::maze::Maze;
use crate::vector::Vector;

/// Grid-locked moving body shared by the player and the ghosts.
#[derive(Debug, Clone)]
pub struct Actor {
    pub position: Vector,
    pub direction: Direction,
    pub next_direction: Option<Direction>,
    pub speed: f32,
    pub radius: f32,
}

impl Actor {
    pub fn new(position: Vector, speed: f32, radius: f32) -> Self {
        Self {
            position,
            direction: Direction::None,
            next_direction: None,
            speed,
            radius,
        }
    }

    /// One physics step: honor a buffered turn if possible, advance, stop
    /// dead at walls, then wrap horizontally.
    pub fn advance(&mut self, dt: f32, maze: &Maze) {
        if self.next_direction.is_some() {
            self.try_change_direction(maze);
        }

        let candidate = self.position + self.direction.vector() * (self.speed * dt);
        if maze.collides_with_wall(candidate, self.radius) {
            self.stop_at_wall(maze);
        } else {
            self.position = candidate;
        }
        self.position = maze.wrap_position(self.position);
    }

    /// Within `ALIGN_EPSILON` of the nearest tile center on both axes.
    pub fn is_aligned(&self) -> bool {
        axis_aligned(self.position.x) && axis_aligned(self.position.y)
    }

    /// Teleports to `position` facing `direction`, dropping any buffered turn.
    pub fn place(&mut self, position: Vector, direction: Direction) {
        self.position = position;
        self.direction = direction;
        self.next_direction = None;
    }

    fn try_change_direction(&mut self, maze: &Maze) {
        let Some(next) = self.next_direction else {
            return;
        };
        if next == self.direction {
            self.next_direction = None;
            return;
        }
        if !self.is_aligned() {
            return;
        }
        let target = maze.pixel_to_tile(self.position).step(next);
        if maze.is_wall(target) {
            return;
        }
        self.direction = next;
        self.next_direction = None;
    }

    fn stop_at_wall(&mut self, maze: &Maze) {
        let tile = maze.pixel_to_tile(self.position);
        self.position = maze.tile_to_pixel_center(tile);
        self.direction = Direction::None;
    }
}

fn axis_aligned(coord: f32) -> bool {
    let size = TILE_SIZE as f32;
    let offset = (coord - size / 2.0).rem_euclid(size);
    offset.min(size - offset) < ALIGN_EPSILON
}

/// Read access to the body inside an entity.
pub trait Mover {
    fn actor(&self) -> &Actor;

    fn position(&self) -> Vector {
        self.actor().position
    }

    fn direction(&self) -> Direction {
        self.actor().direction
    }

    fn radius(&self) -> f32 {
        self.actor().radius
    }

    /// Circle overlap, forgiving by `tolerance` pixels.
    fn touches(&self, other: &impl Mover, tolerance: f32) -> bool {
        let reach = self.radius() + other.radius() - tolerance;
        self.position().distance_to(other.position()) <= reach
    }
}

impl Mover for Actor {
    fn actor(&self) -> &Actor {
        self
    }
}
