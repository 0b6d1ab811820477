use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::actor::Mover;
use crate::components::{Key, PelletKind};
use crate::config::Config;
use crate::error::LayoutError;
use crate::ghost::Ghost;
use crate::maze::Maze;
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    GameOver,
}

/// What happened during the last playing tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub pellet_eaten: bool,
    pub power_pellet_eaten: bool,
    pub life_lost: bool,
    pub level_cleared: bool,
    pub game_over: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Owns the maze and every entity; drives the menu/playing/game-over cycle.
pub struct Game<R: Rng = StdRng> {
    maze: Maze,
    player: Player,
    ghosts: Vec<Ghost>,
    score: u32,
    level: u32,
    lives: u32,
    state: GameState,
    events: Events,
    config: Config,
    rng: R,
}

impl Game<StdRng> {
    pub fn with_seed<S: AsRef<str>>(
        layout: &[S],
        config: Config,
        seed: u64,
    ) -> Result<Self, LayoutError> {
        Self::new(layout, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn new<S: AsRef<str>>(layout: &[S], config: Config, mut rng: R) -> Result<Self, LayoutError> {
        let maze = Maze::new(layout)?;
        let player = spawn_player(&maze, &config);
        let ghosts = spawn_ghosts(&maze, &config, 1, &mut rng);
        Ok(Self {
            maze,
            player,
            ghosts,
            score: 0,
            level: 1,
            lives: config.starting_lives,
            state: GameState::Menu,
            events: Events::new(),
            config,
            rng,
        })
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Start/restart pulse. Ignored while a game is running.
    pub fn start(&mut self) {
        if self.state != GameState::Playing {
            self.start_new_game();
        }
    }

    /// Discrete key press. In the menu only Enter/Space start a game; on the
    /// game-over screen any key does. Returns whether the press was consumed.
    pub fn on_key_press(&mut self, key: Key) -> bool {
        match self.state {
            GameState::Menu if matches!(key, Key::Enter | Key::Space) => {
                self.start_new_game();
                true
            }
            GameState::GameOver => {
                self.start_new_game();
                true
            }
            _ => false,
        }
    }

    pub fn start_new_game(&mut self) {
        self.score = 0;
        self.level = 1;
        self.lives = self.config.starting_lives;
        self.maze.reset_pellets();
        self.create_entities();
        self.events.clear();
        self.state = GameState::Playing;
        info!(pellets = self.maze.remaining_pellets(), "new game started");
    }

    /// Advance one tick of `dt` seconds with the keys currently held.
    pub fn update(&mut self, dt: f32, pressed: &[Key]) {
        if self.state != GameState::Playing {
            return;
        }
        self.events.clear();

        self.player.handle_input(pressed);
        self.player.update(dt, &self.maze);
        for ghost in &mut self.ghosts {
            ghost.update(dt, &self.maze, &mut self.rng);
        }

        let tile = self.maze.pixel_to_tile(self.player.position());
        match self.maze.pellet_at(tile) {
            Some(PelletKind::Normal) => self.events.pellet_eaten = true,
            Some(PelletKind::Power) => self.events.power_pellet_eaten = true,
            None => {}
        }
        self.score += self.maze.collect_pellet(tile);

        if self.maze.remaining_pellets() == 0 {
            self.level += 1;
            self.maze.reset_pellets();
            self.create_entities();
            self.events.level_cleared = true;
            info!(level = self.level, score = self.score, "level cleared");
            return;
        }

        let tolerance = self.config.collision_tolerance;
        if self
            .ghosts
            .iter()
            .any(|ghost| self.player.touches(ghost, tolerance))
        {
            self.lose_life();
        }
    }

    /// Puts the player and the ghosts back on their start tiles. Score, level
    /// and pellets are untouched.
    pub fn reset_positions(&mut self) {
        let start = self.maze.tile_to_pixel_center(self.maze.player_start());
        self.player.respawn(start);
        for (ghost, &tile) in self.ghosts.iter_mut().zip(self.maze.ghost_starts()) {
            ghost.respawn(self.maze.tile_to_pixel_center(tile));
        }
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.life_lost = true;
        debug!(lives = self.lives, "life lost");
        if self.lives == 0 {
            self.state = GameState::GameOver;
            self.events.game_over = true;
            info!(score = self.score, level = self.level, "game over");
        } else {
            self.reset_positions();
        }
    }

    fn create_entities(&mut self) {
        self.player = spawn_player(&self.maze, &self.config);
        self.ghosts = spawn_ghosts(&self.maze, &self.config, self.level, &mut self.rng);
        debug!(
            ghosts = self.ghosts.len(),
            ghost_speed = self.config.ghost_speed(self.level),
            "entities created"
        );
    }
}

fn spawn_player(maze: &Maze, config: &Config) -> Player {
    let start = maze.tile_to_pixel_center(maze.player_start());
    Player::new(start, config.player_speed, config.actor_radius)
}

fn spawn_ghosts(maze: &Maze, config: &Config, level: u32, rng: &mut impl Rng) -> Vec<Ghost> {
    let speed = config.ghost_speed(level);
    maze.ghost_starts()
        .iter()
        .map(|&tile| {
            Ghost::new(
                maze.tile_to_pixel_center(tile),
                speed,
                config.actor_radius,
                rng,
            )
        })
        .collect()
}
