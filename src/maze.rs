use std::collections::BTreeSet;

use tracing::trace;

use crate::components::{Direction, PelletKind, TilePos};
use crate::constants::{PELLET_SCORE, POWER_PELLET_SCORE, SCREEN_WIDTH, TILE_SIZE};
use crate::error::LayoutError;
use crate::vector::Vector;

/// Static cell kind parsed from the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    Power,
    Gate,
}

impl Tile {
    fn from_marker(marker: char) -> Self {
        match marker {
            '#' => Tile::Wall,
            '.' => Tile::Pellet,
            'o' => Tile::Power,
            '-' => Tile::Gate,
            _ => Tile::Empty,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PelletSet {
    pub normal: BTreeSet<TilePos>,
    pub power: BTreeSet<TilePos>,
}

impl PelletSet {
    pub fn len(&self) -> usize {
        self.normal.len() + self.power.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tile grid plus the pellets still on it.
#[derive(Debug, Clone)]
pub struct Maze {
    width: i32,
    height: i32,
    grid: Vec<Vec<Tile>>,
    template: PelletSet,
    pellets: PelletSet,
    player_start: TilePos,
    ghost_starts: Vec<TilePos>,
}

impl Maze {
    pub fn new<S: AsRef<str>>(layout: &[S]) -> Result<Self, LayoutError> {
        let first = layout.first().ok_or(LayoutError::Empty)?;
        let expected = first.as_ref().chars().count();

        let mut grid = Vec::with_capacity(layout.len());
        let mut template = PelletSet::default();
        let mut player_start = None;
        let mut ghost_starts = Vec::new();

        for (row, line) in layout.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != expected {
                return Err(LayoutError::InconsistentWidth {
                    row,
                    found,
                    expected,
                });
            }

            let mut cells = Vec::with_capacity(found);
            for (col, marker) in line.chars().enumerate() {
                let pos = TilePos::new(col as i32, row as i32);
                match marker {
                    '.' => {
                        template.normal.insert(pos);
                    }
                    'o' => {
                        template.power.insert(pos);
                    }
                    'P' if player_start.is_none() => player_start = Some(pos),
                    'G' => ghost_starts.push(pos),
                    _ => {}
                }
                cells.push(Tile::from_marker(marker));
            }
            grid.push(cells);
        }

        let player_start = player_start.ok_or(LayoutError::MissingPlayerStart)?;
        if ghost_starts.is_empty() {
            ghost_starts.push(player_start);
        }

        Ok(Self {
            width: expected as i32,
            height: grid.len() as i32,
            grid,
            pellets: template.clone(),
            template,
            player_start,
            ghost_starts,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn player_start(&self) -> TilePos {
        self.player_start
    }

    /// Declared ghost starts, or the player start when none are declared.
    pub fn ghost_starts(&self) -> &[TilePos] {
        &self.ghost_starts
    }

    /// Static cell at `tile`, `None` when out of bounds.
    pub fn tile(&self, tile: TilePos) -> Option<Tile> {
        if !self.is_valid_tile(tile) {
            return None;
        }
        Some(self.grid[tile.row as usize][tile.col as usize])
    }

    pub fn pellets(&self) -> &PelletSet {
        &self.pellets
    }

    pub fn pellet_at(&self, tile: TilePos) -> Option<PelletKind> {
        if self.pellets.normal.contains(&tile) {
            Some(PelletKind::Normal)
        } else if self.pellets.power.contains(&tile) {
            Some(PelletKind::Power)
        } else {
            None
        }
    }

    pub fn tile_to_pixel_center(&self, tile: TilePos) -> Vector {
        let half = TILE_SIZE / 2;
        Vector::new(
            (tile.col * TILE_SIZE + half) as f32,
            (tile.row * TILE_SIZE + half) as f32,
        )
    }

    pub fn pixel_to_tile(&self, position: Vector) -> TilePos {
        let size = TILE_SIZE as f32;
        TilePos::new(
            (position.x / size).floor() as i32,
            (position.y / size).floor() as i32,
        )
    }

    pub fn is_valid_tile(&self, tile: TilePos) -> bool {
        (0..self.width).contains(&tile.col) && (0..self.height).contains(&tile.row)
    }

    /// Out-of-bounds tiles count as walls.
    pub fn is_wall(&self, tile: TilePos) -> bool {
        self.tile(tile).map_or(true, |cell| cell == Tile::Wall)
    }

    /// Samples the four corners of the bounding square around `position`.
    /// A corner outside the grid hits the implicit border wall.
    pub fn collides_with_wall(&self, position: Vector, radius: f32) -> bool {
        let corners = [
            Vector::new(-radius, -radius),
            Vector::new(radius, -radius),
            Vector::new(-radius, radius),
            Vector::new(radius, radius),
        ];
        corners
            .iter()
            .any(|&offset| self.is_wall(self.pixel_to_tile(position + offset)))
    }

    /// Open neighbors of `tile`, in right, left, down, up order.
    pub fn available_directions(&self, tile: TilePos) -> Vec<Direction> {
        Direction::CARDINALS
            .into_iter()
            .filter(|&dir| !self.is_wall(tile.step(dir)))
            .collect()
    }

    /// Removes the pellet at `tile` and returns its score, or 0 if none is left.
    pub fn collect_pellet(&mut self, tile: TilePos) -> u32 {
        let score = if self.pellets.normal.remove(&tile) {
            PELLET_SCORE
        } else if self.pellets.power.remove(&tile) {
            POWER_PELLET_SCORE
        } else {
            return 0;
        };
        trace!(col = tile.col, row = tile.row, score, "pellet collected");
        score
    }

    pub fn remaining_pellets(&self) -> usize {
        self.pellets.len()
    }

    pub fn reset_pellets(&mut self) {
        self.pellets = self.template.clone();
    }

    /// Horizontal wrap across the screen edges; y is left alone.
    pub fn wrap_position(&self, position: Vector) -> Vector {
        let width = SCREEN_WIDTH as f32;
        let x = if position.x < 0.0 {
            width - (TILE_SIZE / 2) as f32
        } else if position.x >= width {
            (TILE_SIZE / 2) as f32
        } else {
            position.x
        };
        Vector::new(x, position.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAZE_LAYOUT;

    fn tiny() -> Maze {
        Maze::new(&["####", "#P.#", "####"]).unwrap()
    }

    #[test]
    fn test_rejects_empty_layout() {
        let layout: [&str; 0] = [];
        assert_eq!(Maze::new(&layout).unwrap_err(), LayoutError::Empty);
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = Maze::new(&["####", "#P.", "####"]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InconsistentWidth {
                row: 1,
                found: 3,
                expected: 4
            }
        );
    }

    #[test]
    fn test_rejects_missing_player_start() {
        let err = Maze::new(&["####", "#..#", "####"]).unwrap_err();
        assert_eq!(err, LayoutError::MissingPlayerStart);
    }

    #[test]
    fn test_ghosts_fall_back_to_player_start() {
        let maze = tiny();
        assert_eq!(maze.player_start(), TilePos::new(1, 1));
        assert_eq!(maze.ghost_starts(), &[TilePos::new(1, 1)]);
    }

    #[test]
    fn test_stock_layout_parses() {
        let maze = Maze::new(&MAZE_LAYOUT).unwrap();
        assert_eq!(maze.width(), 28);
        assert_eq!(maze.height(), 28);
        assert_eq!(maze.player_start(), TilePos::new(13, 22));
        assert_eq!(maze.ghost_starts().len(), 4);
        assert_eq!(maze.pellets().power.len(), 4);
    }

    #[test]
    fn test_out_of_bounds_is_wall_but_invalid() {
        let maze = tiny();
        for tile in [
            TilePos::new(-1, 1),
            TilePos::new(4, 1),
            TilePos::new(1, -1),
            TilePos::new(1, 3),
            TilePos::new(-5, -5),
        ] {
            assert!(maze.is_wall(tile), "{tile:?} should be a wall");
            assert!(!maze.is_valid_tile(tile));
        }
        assert!(maze.is_valid_tile(TilePos::new(0, 0)));
        assert!(!maze.is_wall(TilePos::new(2, 1)));
    }

    #[test]
    fn test_pixel_tile_conversions() {
        let maze = tiny();
        assert_eq!(
            maze.tile_to_pixel_center(TilePos::new(2, 1)),
            Vector::new(50.0, 30.0)
        );
        assert_eq!(maze.pixel_to_tile(Vector::new(50.0, 30.0)), TilePos::new(2, 1));
        assert_eq!(maze.pixel_to_tile(Vector::new(39.9, 20.0)), TilePos::new(1, 1));
        assert_eq!(maze.pixel_to_tile(Vector::new(-0.5, 5.0)), TilePos::new(-1, 0));
    }

    #[test]
    fn test_collect_pellet_is_idempotent() {
        let mut maze = tiny();
        let tile = TilePos::new(2, 1);
        assert_eq!(maze.remaining_pellets(), 1);
        assert_eq!(maze.collect_pellet(tile), 10);
        assert_eq!(maze.remaining_pellets(), 0);
        assert_eq!(maze.collect_pellet(tile), 0);
        assert_eq!(maze.remaining_pellets(), 0);
        assert_eq!(maze.collect_pellet(TilePos::new(1, 1)), 0);
    }

    #[test]
    fn test_power_pellet_scores_fifty() {
        let mut maze = Maze::new(&["#####", "#Po.#", "#####"]).unwrap();
        assert_eq!(maze.pellet_at(TilePos::new(2, 1)), Some(PelletKind::Power));
        assert_eq!(maze.collect_pellet(TilePos::new(2, 1)), 50);
        assert_eq!(maze.pellet_at(TilePos::new(2, 1)), None);
        assert_eq!(maze.collect_pellet(TilePos::new(3, 1)), 10);
    }

    #[test]
    fn test_reset_pellets_restores_template() {
        let mut maze = Maze::new(&MAZE_LAYOUT).unwrap();
        let total = maze.remaining_pellets();
        let tiles: Vec<TilePos> = maze.pellets().normal.iter().take(25).copied().collect();
        for tile in tiles {
            maze.collect_pellet(tile);
        }
        assert_eq!(maze.remaining_pellets(), total - 25);
        maze.reset_pellets();
        assert_eq!(maze.remaining_pellets(), total);
    }

    #[test]
    fn test_available_directions_order() {
        let maze = Maze::new(&["#####", "#.#.#", "#.P.#", "#####"]).unwrap();
        assert_eq!(
            maze.available_directions(TilePos::new(2, 2)),
            vec![Direction::Right, Direction::Left]
        );
        assert_eq!(
            maze.available_directions(TilePos::new(1, 2)),
            vec![Direction::Right, Direction::Up]
        );
        assert!(maze.available_directions(TilePos::new(0, 0)).is_empty());
    }

    #[test]
    fn test_collides_with_wall_corners() {
        let maze = tiny();
        let center = maze.tile_to_pixel_center(TilePos::new(1, 1));
        assert!(!maze.collides_with_wall(center, 8.0));
        assert!(maze.collides_with_wall(center, 10.5));
        assert!(maze.collides_with_wall(center + Vector::new(-3.0, 0.0), 8.0));
        assert!(!maze.collides_with_wall(center + Vector::new(12.0, 0.0), 8.0));
    }

    #[test]
    fn test_corners_past_the_edge_collide() {
        let maze = Maze::new(&["#####", "  P  ", "#####"]).unwrap();
        assert!(maze.collides_with_wall(Vector::new(2.0, 30.0), 8.0));
        assert!(maze.collides_with_wall(Vector::new(98.0, 30.0), 8.0));
        assert!(!maze.collides_with_wall(Vector::new(8.0, 30.0), 8.0));
        assert!(!maze.collides_with_wall(Vector::new(91.5, 30.0), 8.0));
    }

    #[test]
    fn test_wrap_position() {
        let maze = Maze::new(&MAZE_LAYOUT).unwrap();
        let width = SCREEN_WIDTH as f32;
        assert_eq!(maze.wrap_position(Vector::new(-0.1, 7.0)), Vector::new(width - 10.0, 7.0));
        assert_eq!(maze.wrap_position(Vector::new(width, 7.0)), Vector::new(10.0, 7.0));
        assert_eq!(maze.wrap_position(Vector::new(width + 40.0, 7.0)), Vector::new(10.0, 7.0));
        for x in [0.0, 1.5, 280.0, width - 0.01] {
            let pos = Vector::new(x, 3.0);
            assert_eq!(maze.wrap_position(pos), pos);
        }
        let once = maze.wrap_position(Vector::new(-30.0, 1.0));
        assert_eq!(maze.wrap_position(once), once);
    }

    #[test]
    fn test_wrap_bounds_are_the_screen_not_the_grid() {
        let maze = tiny();
        let inside = Vector::new(100.0, 30.0);
        assert_eq!(maze.wrap_position(inside), inside);
        assert_eq!(
            maze.wrap_position(Vector::new(-1.0, 30.0)),
            Vector::new(SCREEN_WIDTH as f32 - 10.0, 30.0)
        );
        assert_eq!(
            maze.wrap_position(Vector::new(SCREEN_WIDTH as f32, 30.0)),
            Vector::new(10.0, 30.0)
        );
    }
}
