//! Tunable constants shared by the maze, the actors and the game loop.

/// Side length of one maze tile, in pixels.
pub const TILE_SIZE: i32 = 20;
/// Columns in the stock maze.
pub const GRID_WIDTH: i32 = 28;
/// Rows reserved for the stock maze (the layout itself may be shorter).
pub const GRID_HEIGHT: i32 = 31;
pub const SCREEN_WIDTH: i32 = GRID_WIDTH * TILE_SIZE;
pub const SCREEN_HEIGHT: i32 = GRID_HEIGHT * TILE_SIZE;

/// Host frame delay (~60 FPS).
pub const FRAME_DELAY_MS: u64 = 16;

pub const PELLET_SCORE: u32 = 10;
pub const POWER_PELLET_SCORE: u32 = 50;

pub const PLAYER_SPEED: f32 = 120.0;
pub const GHOST_BASE_SPEED: f32 = 90.0;
pub const GHOST_SPEED_PER_LEVEL: f32 = 10.0;
pub const ACTOR_RADIUS: f32 = 8.0;
pub const STARTING_LIVES: u32 = 3;

/// Player/ghost hits register only when the circles overlap by more than this.
pub const COLLISION_TOLERANCE: f32 = 2.0;

/// Maximum distance, in pixels, from a tile center at which an actor counts as
/// grid-aligned. Exact equality never holds under accumulated float error.
pub const ALIGN_EPSILON: f32 = 1.0;

/// Length of one open/close cycle of the player's mouth, in seconds.
pub const MOUTH_CYCLE: f32 = 0.4;

/// Stock maze: `#` wall, `.` pellet, `o` power pellet, ` ` empty,
/// `P` player start, `G` ghost start. Anything else is open floor.
pub const MAZE_LAYOUT: [&str; 28] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ###--### ##.#     ",
    "######.## #      # ##.######",
    "      .   # GGGG #   .      ",
    "######.## #      # ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......P.......##..o.#",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];
