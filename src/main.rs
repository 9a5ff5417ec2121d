mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs::File,
    io::{self, stdout, Stdout},
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use blockfall::config::{
    GameConfig, DEFAULT_BASE_INTERVAL_MS, DEFAULT_BLINK_MS, DEFAULT_FRAMES_PER_SECOND,
    DEFAULT_INTERVAL_STEP_MS, DEFAULT_MIN_INTERVAL_MS,
};
use blockfall::game::{Game, GameEvent, GameState, Intent, PieceProvider, RandomPieceProvider};
use blockfall::input::key_to_intent;
use blockfall::playfield::Playfield;
use ui::ClearBlink;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const BLINK_PHASES: usize = 4;

// ============================================================================
// Command Line
// ============================================================================

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(name = "blockfall", version)]
struct Args {
    /// Frames drawn per second; input is read once per frame.
    #[arg(long, default_value_t = DEFAULT_FRAMES_PER_SECOND, value_name = "FPS")]
    fps: u32,

    /// Gravity interval before any line is cleared.
    #[arg(long, default_value_t = DEFAULT_BASE_INTERVAL_MS, value_name = "MS")]
    base_interval_ms: u64,

    /// Gravity speed-up per cleared line.
    #[arg(long, default_value_t = DEFAULT_INTERVAL_STEP_MS, value_name = "MS")]
    interval_step_ms: u64,

    /// Shortest gravity interval.
    #[arg(long, default_value_t = DEFAULT_MIN_INTERVAL_MS, value_name = "MS")]
    min_interval_ms: u64,

    /// Duration of each phase of the line-clear blink.
    #[arg(long, default_value_t = DEFAULT_BLINK_MS, value_name = "MS")]
    blink_ms: u64,

    /// Clear lines instantly, without blinking.
    #[arg(long)]
    no_animation: bool,

    /// Seed for a reproducible piece sequence.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG, default "info").
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            base_interval_ms: self.base_interval_ms,
            interval_step_ms: self.interval_step_ms,
            min_interval_ms: self.min_interval_ms,
            frames_per_second: self.fps,
            blink_ms: if self.no_animation { 0 } else { self.blink_ms },
        }
    }
}

/// The terminal owns stdout and stderr, so logs only go to an explicit file.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ============================================================================
// Main Loop
// ============================================================================

fn poll_intent(state: GameState) -> io::Result<Intent> {
    if event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key_to_intent(key, state));
            }
        }
    }
    Ok(Intent::None)
}

/// Blocks for the whole animation; no input is read meanwhile.
fn blink_cleared_rows(terminal: &mut Tui, game: &Game, rows: &[usize], before: &Playfield) -> Result<()> {
    let phase = game.config().blink_interval();
    if phase.is_zero() {
        return Ok(());
    }
    for step in 0..BLINK_PHASES {
        let blink = ClearBlink {
            before,
            rows,
            hidden: step % 2 == 0,
        };
        terminal.draw(|frame| ui::render(frame, game, Some(&blink)))?;
        thread::sleep(phase);
    }
    Ok(())
}

fn run(terminal: &mut Tui, game: &mut Game) -> Result<()> {
    let frame_interval = game.config().frame_interval();
    let mut last_frame = Instant::now();

    while !game.is_terminated() {
        let frame_start = Instant::now();
        let elapsed = frame_start - last_frame;
        last_frame = frame_start;

        let intent = poll_intent(game.state())?;
        game.tick(intent, elapsed);

        for event in game.take_events() {
            if let GameEvent::LinesCleared { rows, before } = event {
                blink_cleared_rows(terminal, game, &rows, &before)?;
            }
        }

        terminal.draw(|frame| ui::render(frame, game, None))?;

        if let Some(remaining) = (frame_start + frame_interval).checked_duration_since(Instant::now()) {
            thread::sleep(remaining);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = args.game_config();
    config.validate().context("invalid game configuration")?;

    let provider: Box<dyn PieceProvider> = match args.seed {
        Some(seed) => Box::new(RandomPieceProvider::seeded(seed)),
        None => Box::new(RandomPieceProvider::new()),
    };
    let mut game = Game::with_provider(config, provider);
    info!("starting with {:?}", game.config());

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    stdout().execute(EnterAlternateScreen)?;
    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(anyhow::Error::from)
        .and_then(|mut terminal| {
            terminal.hide_cursor()?;
            let outcome = run(&mut terminal, &mut game);
            terminal.show_cursor()?;
            outcome
        });

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result?;
    println!("Thanks for playing!");
    Ok(())
}
