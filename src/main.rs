use std::fs::File;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

use pacman_maze::constants::{FRAME_DELAY_MS, MAZE_LAYOUT};
use pacman_maze::{Config, Direction, Game, GameState, Key, Mover, PelletKind, Tile, TilePos};

const CELL_W: usize = 2;
const INPUT_HOLD_MS: u64 = 160;

#[derive(Parser)]
#[command(author, version, about = "Terminal maze chase", long_about = None)]
struct Args {
    /// Delay between simulation ticks, in milliseconds
    #[arg(long, env = "PACMAN_TICK_MS", default_value_t = FRAME_DELAY_MS)]
    tick_ms: u64,

    /// Seed for ghost wandering; random when absent
    #[arg(long, env = "PACMAN_SEED")]
    seed: Option<u64>,

    /// Write logs here (the terminal itself is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player(Direction),
    Ghost,
    Wall,
    Gate,
    Empty,
    Pellet,
    Power,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![BLANK; width * height],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

/// Directional keys last seen per direction; terminals report presses only.
#[derive(Default)]
struct HeldKeys {
    last_seen: [Option<Instant>; 4],
    last_pressed: Option<Key>,
}

impl HeldKeys {
    const ORDER: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];

    fn press(&mut self, key: Key) {
        if let Some(idx) = Self::ORDER.iter().position(|k| *k == key) {
            self.last_seen[idx] = Some(Instant::now());
            self.last_pressed = Some(key);
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    /// The most recent direction still inside the hold window, if any.
    fn active(&self) -> Vec<Key> {
        let now = Instant::now();
        let hold = Duration::from_millis(INPUT_HOLD_MS);
        let fresh = |idx: usize| {
            self.last_seen[idx].filter(|t| now.duration_since(*t) <= hold)
        };

        if let Some(key) = self.last_pressed {
            if let Some(idx) = Self::ORDER.iter().position(|k| *k == key) {
                if fresh(idx).is_some() {
                    return vec![key];
                }
            }
        }
        let mut best: Option<(Key, Instant)> = None;
        for (idx, key) in Self::ORDER.iter().enumerate() {
            if let Some(t) = fresh(idx) {
                match best {
                    Some((_, bt)) if t <= bt => {}
                    _ => best = Some((*key, t)),
                }
            }
        }
        best.map(|(key, _)| vec![key]).unwrap_or_default()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game =
        Game::new(&MAZE_LAYOUT, Config::new(), rng).context("stock maze layout is invalid")?;
    info!(seed = ?args.seed, tick_ms = args.tick_ms, "starting");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut game, args.tick_ms);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    info!(score = game.score(), level = game.level(), "exiting");
    result
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(stdout: &mut Stdout, game: &mut Game, tick_ms: u64) -> Result<()> {
    let maze_w = game.maze().width() as usize;
    let maze_h = game.maze().height() as usize;
    let mut renderer = Renderer::new(maze_w, maze_h);
    let mut held = HeldKeys::default();
    let tick = Duration::from_millis(tick_ms.max(1));
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    return Ok(());
                }
                let key = map_key(key.code);
                if game.on_key_press(key) {
                    held.clear();
                    renderer.needs_full = true;
                    last_tick = Instant::now();
                } else {
                    held.press(key);
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_tick);
        if dt >= tick {
            last_tick = now;
            game.update(dt.as_secs_f32(), &held.active());
            if game.events().level_cleared {
                renderer.needs_full = true;
            }
        }
        render(stdout, game, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < tick {
            thread::sleep(tick - elapsed);
        }
    }
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Key::Left,
        KeyCode::Right | KeyCode::Char('l') => Key::Right,
        KeyCode::Up | KeyCode::Char('k') => Key::Up,
        KeyCode::Down | KeyCode::Char('j') => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(' ') => Key::Space,
        _ => Key::Other,
    }
}

/// Status line above the board for the current screen.
fn hud_line(game: &Game) -> String {
    match game.state() {
        GameState::Menu => "PAC-MAN  -  Enter/Space to start, arrows/hjkl to move, q to quit".into(),
        GameState::Playing => format!(
            "Score: {}  Level: {}  Lives: {}  Pellets: {}",
            game.score(),
            game.level(),
            game.lives(),
            game.maze().remaining_pellets()
        ),
        GameState::GameOver => format!(
            "GAME OVER - Final Score: {}  (any key restarts, q quits)",
            game.score()
        ),
    }
}

fn render(stdout: &mut Stdout, game: &Game, renderer: &mut Renderer) -> io::Result<()> {
    let cols = game.maze().width() as usize;
    let rows = game.maze().height() as usize;
    let board = ((cols * CELL_W) as u16, rows as u16 + 2);

    if !renderer.center_on(terminal::size()?, board) {
        stdout.queue(Clear(ClearType::All))?;
        stdout.queue(MoveTo(0, 0))?;
        stdout.queue(Print(format!(
            "Terminal too small for the maze: need {}x{}.",
            board.0, board.1
        )))?;
        return stdout.flush();
    }

    renderer.draw_hud(stdout, hud_line(game))?;
    renderer.draw_board(stdout, game)?;
    renderer.needs_full = false;
    stdout.flush()
}

impl Renderer {
    /// Recenters a `board`-sized frame in `term`; false when it does not fit.
    fn center_on(&mut self, term: (u16, u16), board: (u16, u16)) -> bool {
        let (term_w, term_h) = term;
        let (board_w, board_h) = board;
        if term_w < board_w || term_h < board_h {
            self.needs_full = true;
            return false;
        }
        let origin = ((term_w - board_w) / 2, (term_h - board_h) / 2 + 1);
        if origin != (self.origin_x, self.origin_y) {
            (self.origin_x, self.origin_y) = origin;
            self.needs_full = true;
        }
        true
    }

    fn draw_hud(&mut self, stdout: &mut Stdout, hud: String) -> io::Result<()> {
        if !self.needs_full && hud == self.last_hud {
            return Ok(());
        }
        stdout.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        self.last_hud = hud;
        Ok(())
    }

    /// Repaints only the cells whose glyph changed since the last frame.
    fn draw_board(&mut self, stdout: &mut Stdout, game: &Game) -> io::Result<()> {
        let maze = game.maze();
        let cols = maze.width();
        let actors = (game.state() != GameState::Menu).then(|| ActorTiles::of(game));

        for (idx, slot) in self.last.iter_mut().enumerate() {
            let tile = TilePos::new(idx as i32 % cols, idx as i32 / cols);
            let cell = actors
                .as_ref()
                .and_then(|actors| actors.cell_at(tile, game))
                .unwrap_or_else(|| board_cell(game, tile));
            if self.needs_full || cell != *slot {
                *slot = cell;
                let x = self.origin_x + (tile.col as usize * CELL_W) as u16;
                let y = self.origin_y + tile.row as u16;
                stdout.queue(MoveTo(x, y))?;
                stdout.queue(SetForegroundColor(cell.color))?;
                stdout.queue(Print(cell.glyph.padded()))?;
                stdout.queue(ResetColor)?;
            }
        }
        Ok(())
    }
}

/// Tiles currently occupied by the player and the ghosts.
struct ActorTiles {
    player: TilePos,
    ghosts: Vec<TilePos>,
}

impl ActorTiles {
    fn of(game: &Game) -> Self {
        let maze = game.maze();
        Self {
            player: maze.pixel_to_tile(game.player().position()),
            ghosts: game
                .ghosts()
                .iter()
                .map(|ghost| maze.pixel_to_tile(ghost.position()))
                .collect(),
        }
    }

    fn cell_at(&self, tile: TilePos, game: &Game) -> Option<Cell> {
        if tile == self.player {
            Some(Cell {
                glyph: Glyph::Player(game.player().orientation()),
                color: Color::Yellow,
            })
        } else if self.ghosts.contains(&tile) {
            Some(Cell {
                glyph: Glyph::Ghost,
                color: Color::Red,
            })
        } else {
            None
        }
    }
}

/// Pellets over static tiles.
fn board_cell(game: &Game, tile: TilePos) -> Cell {
    let maze = game.maze();
    let (glyph, color) = match (maze.pellet_at(tile), maze.tile(tile)) {
        (Some(PelletKind::Normal), _) => (Glyph::Pellet, Color::White),
        (Some(PelletKind::Power), _) => (Glyph::Power, Color::Magenta),
        (None, Some(Tile::Wall)) => (Glyph::Wall, Color::Blue),
        (None, Some(Tile::Gate)) => (Glyph::Gate, Color::Cyan),
        _ => return BLANK,
    };
    Cell { glyph, color }
}

impl Glyph {
    fn text(self) -> &'static str {
        match self {
            Glyph::Player(Direction::Right) => "ᗧ",
            Glyph::Player(Direction::Up) => "ᗢ",
            Glyph::Player(Direction::Down) => "ᗣ",
            Glyph::Player(_) => "ᗤ",
            Glyph::Ghost => "👻",
            Glyph::Wall => "██",
            Glyph::Gate => "==",
            Glyph::Empty => "",
            Glyph::Pellet => "·",
            Glyph::Power => "●",
        }
    }

    /// Glyph text padded with spaces to exactly one cell.
    fn padded(self) -> String {
        let text = self.text();
        let pad = CELL_W.saturating_sub(UnicodeWidthStr::width(text));
        format!("{text}{}", " ".repeat(pad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_follows_state() {
        let mut game = Game::with_seed(&MAZE_LAYOUT, Config::new(), 1).unwrap();
        assert!(hud_line(&game).contains("Enter/Space to start"));
        game.start();
        let pellets = game.maze().remaining_pellets();
        assert_eq!(
            hud_line(&game),
            format!("Score: 0  Level: 1  Lives: 3  Pellets: {pellets}")
        );
    }

    #[test]
    fn test_center_on_repaints_after_moving() {
        let mut renderer = Renderer::new(2, 2);
        renderer.needs_full = false;
        assert!(!renderer.center_on((3, 3), (4, 4)));
        assert!(renderer.needs_full);

        renderer.needs_full = false;
        assert!(renderer.center_on((10, 10), (4, 4)));
        assert_eq!((renderer.origin_x, renderer.origin_y), (3, 4));
        assert!(renderer.needs_full);

        renderer.needs_full = false;
        assert!(renderer.center_on((10, 10), (4, 4)));
        assert!(!renderer.needs_full);
    }

    #[test]
    fn test_glyphs_fill_one_cell() {
        for glyph in [
            Glyph::Player(Direction::Up),
            Glyph::Ghost,
            Glyph::Wall,
            Glyph::Empty,
            Glyph::Pellet,
        ] {
            assert_eq!(UnicodeWidthStr::width(glyph.padded().as_str()), CELL_W);
        }
    }
}
