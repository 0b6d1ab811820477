use crate::actor::{Actor, Mover};
use crate::components::{Direction, Key};
use crate::constants::MOUTH_CYCLE;
use crate::maze::Maze;
use crate::vector::Vector;

/// Held keys are scanned in this order; the first match wins.
const INPUT_PRIORITY: [Key; 4] = [Key::Left, Key::Right, Key::Up, Key::Down];

#[derive(Debug, Clone)]
pub struct Player {
    actor: Actor,
    orientation: Direction,
    mouth_time: f32,
}

impl Player {
    pub fn new(position: Vector, speed: f32, radius: f32) -> Self {
        let mut actor = Actor::new(position, speed, radius);
        actor.direction = Direction::Left;
        Self {
            actor,
            orientation: Direction::Left,
            mouth_time: 0.0,
        }
    }

    pub fn handle_input(&mut self, pressed: &[Key]) {
        if let Some(dir) = INPUT_PRIORITY
            .iter()
            .find(|key| pressed.contains(*key))
            .and_then(|key| key.direction())
        {
            self.actor.next_direction = Some(dir);
        }
    }

    pub fn update(&mut self, dt: f32, maze: &Maze) {
        self.actor.advance(dt, maze);
        if !self.actor.direction.is_none() {
            self.orientation = self.actor.direction;
        }
        self.mouth_time = (self.mouth_time + dt) % MOUTH_CYCLE;
    }

    /// Back to `position` heading left, as after losing a life.
    pub fn respawn(&mut self, position: Vector) {
        self.actor.place(position, Direction::Left);
        self.orientation = Direction::Left;
    }

    /// Last non-zero heading; survives a full stop.
    pub fn orientation(&self) -> Direction {
        self.orientation
    }

    pub fn next_direction(&self) -> Option<Direction> {
        self.actor.next_direction
    }

    /// Half-opening of the mouth in degrees, sweeping 50 -> 30 -> 50 per cycle.
    pub fn mouth_angle(&self) -> f32 {
        let phase = (self.mouth_time / (MOUTH_CYCLE / 2.0) - 1.0).abs();
        30.0 + phase * 20.0
    }
}

impl Mover for Player {
    fn actor(&self) -> &Actor {
        &self.actor
    }
}
