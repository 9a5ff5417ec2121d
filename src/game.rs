use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::collision::{collides, collides_with_locked};
use crate::config::GameConfig;
use crate::piece::{Kind, Pattern, Piece, Rotation, KIND_COUNT};
use crate::playfield::{LockOutcome, Playfield, Row, COLS, ROWS};

// ============================================================================
// Types
// ============================================================================

/// One decoded player request, consumed by [`Game::tick`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    /// Replace the falling piece with the upcoming one without locking.
    SpawnNextDebug,
    Restart,
    Quit,
    None,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Playing,
    GameOverMenu,
    Terminated,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PieceMoved,
    PieceRotated,
    PieceLocked(Kind),
    PieceSpawned(Kind),
    /// `before` is the playfield as it was just before the rows collapsed.
    LinesCleared { rows: Vec<usize>, before: Playfield },
    GameOver,
    GameRestarted,
    Quit,
}

// ============================================================================
// Piece Provider Trait
// ============================================================================

pub trait PieceProvider {
    fn next_piece(&mut self) -> Kind;
}

/// Uniform choice among the seven kinds.
pub struct RandomPieceProvider {
    rng: StdRng,
}

impl RandomPieceProvider {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPieceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceProvider for RandomPieceProvider {
    fn next_piece(&mut self) -> Kind {
        Kind::ALL[self.rng.gen_range(0..KIND_COUNT)]
    }
}

pub struct SequencePieceProvider {
    pieces: Vec<Kind>,
    index: usize,
}

impl SequencePieceProvider {
    pub fn new(pieces: Vec<Kind>) -> Self {
        assert!(!pieces.is_empty(), "piece sequence must not be empty");
        Self { pieces, index: 0 }
    }
}

impl PieceProvider for SequencePieceProvider {
    fn next_piece(&mut self) -> Kind {
        let piece = self.pieces[self.index % self.pieces.len()];
        self.index += 1;
        piece
    }
}

// ============================================================================
// Game
// ============================================================================

pub struct Game {
    pub playfield: Playfield,
    pub current_piece: Piece,
    next_kind: Kind,
    shape_counts: [u32; KIND_COUNT],
    run_time: Duration,
    /// Time since the last automatic descent.
    drop_clock: Duration,
    lines_cleared: u32,
    state: GameState,
    config: GameConfig,
    piece_provider: Box<dyn PieceProvider>,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_provider(config, Box::new(RandomPieceProvider::new()))
    }

    /// The first piece drawn from `provider` falls first, the second is shown
    /// as next.
    pub fn with_provider(config: GameConfig, mut provider: Box<dyn PieceProvider>) -> Self {
        let first = provider.next_piece();
        let mut game = Self {
            playfield: Playfield::new(),
            current_piece: Piece::spawn(first),
            next_kind: first,
            shape_counts: [0; KIND_COUNT],
            run_time: Duration::ZERO,
            drop_clock: Duration::ZERO,
            lines_cleared: 0,
            state: GameState::Playing,
            config,
            piece_provider: provider,
            events: Vec::new(),
        };
        game.spawn_next_piece();
        game.events.clear();
        game
    }

    pub fn with_playfield(playfield: Playfield, current_piece: Piece) -> Self {
        let mut game = Self::new(GameConfig::default());
        game.playfield = playfield;
        game.current_piece = current_piece;
        game
    }

    // ------------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------------

    /// Advances the session by one frame that lasted `elapsed`.
    pub fn tick(&mut self, intent: Intent, elapsed: Duration) {
        match self.state {
            GameState::Terminated => return,
            GameState::GameOverMenu => {
                match intent {
                    Intent::Restart => self.restart(),
                    Intent::Quit => self.quit(),
                    _ => {}
                }
                return;
            }
            GameState::Playing => {}
        }

        let hard_dropped = self.apply_intent(intent);
        if self.state != GameState::Playing {
            return;
        }

        self.drop_clock += elapsed;
        self.run_time += elapsed;

        if hard_dropped {
            return;
        }

        if self.drop_clock > self.gravity_interval() {
            self.drop_clock = Duration::ZERO;
            self.current_piece.position.y += 1;
        }

        if collides_with_locked(&self.playfield, &self.current_piece) {
            self.current_piece.position.y -= 1;
            self.lock_and_spawn();
        }
    }

    /// Returns true when the intent already locked the piece.
    fn apply_intent(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => {
                self.move_piece(-1, 0);
            }
            Intent::MoveRight => {
                self.move_piece(1, 0);
            }
            Intent::SoftDrop => {
                self.move_piece(0, 1);
            }
            Intent::RotateCw => {
                self.rotate_piece(Rotation::Clockwise);
            }
            Intent::RotateCcw => {
                self.rotate_piece(Rotation::CounterClockwise);
            }
            Intent::HardDrop => {
                self.hard_drop();
                return true;
            }
            Intent::SpawnNextDebug => self.spawn_next_piece(),
            Intent::Quit => self.quit(),
            Intent::Restart | Intent::None => {}
        }
        false
    }

    // ------------------------------------------------------------------------
    // Piece control
    // ------------------------------------------------------------------------

    pub fn move_piece(&mut self, dx: i16, dy: i16) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let moved = self.current_piece.moved(dx, dy);
        if collides(&self.playfield, &moved) {
            return false;
        }
        self.current_piece = moved;
        self.events.push(GameEvent::PieceMoved);
        true
    }

    pub fn rotate_piece(&mut self, direction: Rotation) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let rotated = self.current_piece.rotated(direction);
        if collides(&self.playfield, &rotated) {
            return false;
        }
        self.current_piece = rotated;
        self.events.push(GameEvent::PieceRotated);
        true
    }

    /// Drops the piece as far as locked cells and the floor allow, then locks
    /// it without waiting for gravity.
    pub fn hard_drop(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        loop {
            let below = self.current_piece.moved(0, 1);
            if collides_with_locked(&self.playfield, &below) {
                break;
            }
            self.current_piece = below;
        }
        self.lock_and_spawn();
    }

    /// Makes the upcoming piece the falling one and rolls a new upcoming piece.
    pub fn spawn_next_piece(&mut self) {
        let kind = self.next_kind;
        self.current_piece = Piece::spawn(kind);
        self.next_kind = self.piece_provider.next_piece();
        self.shape_counts[kind.index()] += 1;
        debug!("spawned {:?}, next {:?}", kind, self.next_kind);
        self.events.push(GameEvent::PieceSpawned(kind));
    }

    fn lock_and_spawn(&mut self) {
        let kind = self.current_piece.kind;
        match self.playfield.lock(&self.current_piece) {
            LockOutcome::ToppedOut => {
                self.state = GameState::GameOverMenu;
                info!(
                    "game over after {}s with {} lines",
                    self.run_time.as_secs(),
                    self.lines_cleared
                );
                self.events.push(GameEvent::GameOver);
                return;
            }
            LockOutcome::Locked => {}
        }
        debug!("locked {:?} at {:?}", kind, self.current_piece.position);
        self.events.push(GameEvent::PieceLocked(kind));
        self.spawn_next_piece();
        self.clear_lines();
    }

    /// Collapses every full row and adds them to the line counter.
    pub fn clear_lines(&mut self) -> u32 {
        let rows = self.playfield.find_full_rows();
        if rows.is_empty() {
            return 0;
        }
        let before = self.playfield.clone();
        let cleared = self.playfield.clear_and_collapse(&rows) as u32;
        self.lines_cleared += cleared;
        info!(
            "cleared {} line(s) {:?}, total {}",
            cleared, rows, self.lines_cleared
        );
        self.events.push(GameEvent::LinesCleared { rows, before });
        cleared
    }

    // ------------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------------

    pub fn restart(&mut self) {
        self.playfield = Playfield::new();
        self.shape_counts = [0; KIND_COUNT];
        self.run_time = Duration::ZERO;
        self.drop_clock = Duration::ZERO;
        self.lines_cleared = 0;
        self.state = GameState::Playing;
        self.events.clear();
        self.spawn_next_piece();

        info!("game restarted");
        self.events.push(GameEvent::GameRestarted);
    }

    pub fn quit(&mut self) {
        if self.state == GameState::Terminated {
            return;
        }
        self.state = GameState::Terminated;
        info!(
            "quit after {}s with {} lines",
            self.run_time.as_secs(),
            self.lines_cleared
        );
        self.events.push(GameEvent::Quit);
    }

    // ------------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOverMenu
    }

    pub fn is_terminated(&self) -> bool {
        self.state == GameState::Terminated
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn next_kind(&self) -> Kind {
        self.next_kind
    }

    pub fn next_pattern(&self) -> Pattern {
        self.next_kind.shape()
    }

    /// Spawn count per kind, indexed by [`Kind::index`].
    pub fn shape_counts(&self) -> &[u32; KIND_COUNT] {
        &self.shape_counts
    }

    pub fn run_time(&self) -> Duration {
        self.run_time
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn gravity_interval(&self) -> Duration {
        self.config.gravity_interval(self.lines_cleared)
    }

    /// Returns the visual grid state with the visible part of the current
    /// piece overlaid
    pub fn render_grid(&self) -> Vec<Row> {
        let mut visual_grid = self.playfield.rows().to_vec();
        for (pos, cell) in self.current_piece.blocks() {
            if (0..ROWS as i16).contains(&pos.y) && (0..COLS as i16).contains(&pos.x) {
                visual_grid[pos.y as usize][pos.x as usize] = cell;
            }
        }
        visual_grid
    }

    /// Takes and clears all pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;
    use crate::piece::Cell;

    pub fn empty_playfield() -> Playfield {
        Playfield::new()
    }

    pub fn fill_row(playfield: &mut Playfield, row: usize) {
        for col in 0..COLS {
            playfield.set(row, col, Cell::Filled(Kind::T));
        }
    }

    pub fn fill_row_with_gap(playfield: &mut Playfield, row: usize, gap_col: usize) {
        for col in 0..COLS {
            if col != gap_col {
                playfield.set(row, col, Cell::Filled(Kind::T));
            }
        }
    }

    /// A game whose pieces come from `pieces` in order, on an empty field.
    pub fn sequence_game(pieces: Vec<Kind>) -> Game {
        Game::with_provider(
            GameConfig::default(),
            Box::new(SequencePieceProvider::new(pieces)),
        )
    }
}
