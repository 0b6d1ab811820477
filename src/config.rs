use crate::constants::{
    ACTOR_RADIUS, COLLISION_TOLERANCE, GHOST_BASE_SPEED, GHOST_SPEED_PER_LEVEL, PLAYER_SPEED,
    STARTING_LIVES,
};

/// Gameplay tuning
#[derive(Debug, Clone)]
pub struct Config {
    pub player_speed: f32,
    pub ghost_base_speed: f32,
    pub ghost_speed_per_level: f32,
    pub starting_lives: u32,
    pub actor_radius: f32,
    pub collision_tolerance: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            ghost_base_speed: GHOST_BASE_SPEED,
            ghost_speed_per_level: GHOST_SPEED_PER_LEVEL,
            starting_lives: STARTING_LIVES,
            actor_radius: ACTOR_RADIUS,
            collision_tolerance: COLLISION_TOLERANCE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ghost speed for a 1-based level number
    pub fn ghost_speed(&self, level: u32) -> f32 {
        self.ghost_base_speed + self.ghost_speed_per_level * level.saturating_sub(1) as f32
    }
}
