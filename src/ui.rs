use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use blockfall::game::Game;
use blockfall::piece::{Cell, Kind, Pattern};
use blockfall::playfield::{Playfield, Row, COLS, ROWS};

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const BLOCK_CHAR: &str = "██";
const EMPTY_CHAR: &str = " .";
const BLANK_CHAR: &str = "  ";

// ============================================================================
// Color Mapping
// ============================================================================

fn kind_color(kind: Kind) -> Color {
    match kind {
        Kind::I => Color::Cyan,
        Kind::J => Color::Blue,
        Kind::L => Color::White,
        Kind::O => Color::Yellow,
        Kind::S => Color::Green,
        Kind::T => Color::Magenta,
        Kind::Z => Color::Red,
    }
}

fn cell_span(cell: Cell) -> Span<'static> {
    match cell {
        Cell::Empty => Span::styled(EMPTY_CHAR, Style::default().fg(Color::DarkGray)),
        Cell::Filled(kind) => Span::styled(BLOCK_CHAR, Style::default().fg(kind_color(kind))),
    }
}

/// Rows being removed by a line clear, shown over the pre-clear playfield.
pub struct ClearBlink<'a> {
    pub before: &'a Playfield,
    pub rows: &'a [usize],
    /// Whether the cleared rows are currently drawn empty.
    pub hidden: bool,
}

// ============================================================================
// Rendering
// ============================================================================

pub fn render(frame: &mut Frame, game: &Game, blink: Option<&ClearBlink>) {
    let area = frame.size();

    let grid_display_width = (COLS as u16 * CELL_WIDTH) + 2;
    let grid_display_height = ROWS as u16 + 2;
    let side_width = 30;
    let total_width = grid_display_width + side_width;

    let main_area = centered_rect(total_width, grid_display_height + 1, area);

    let vertical = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(grid_display_height),
    ])
    .split(main_area);

    if let Some(blink) = blink {
        let banner = Paragraph::new(format!("CLEARED: {}", blink.rows.len()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Black).bg(Color::White));
        frame.render_widget(banner, vertical[0]);
    }

    let horizontal = Layout::horizontal([
        Constraint::Length(grid_display_width),
        Constraint::Length(side_width),
    ])
    .split(vertical[1]);

    let side = Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).split(horizontal[1]);

    match blink {
        Some(blink) => render_blink(frame, blink, horizontal[0]),
        None => render_grid(frame, &game.render_grid(), horizontal[0]),
    }
    render_preview(frame, &game.next_pattern(), side[0]);
    render_stats(frame, game, side[1]);

    if game.is_game_over() {
        render_game_over(frame, area);
    }
}

fn grid_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(" Blockfall ")
        .title_alignment(Alignment::Center)
}

fn render_grid(frame: &mut Frame, rows: &[Row], area: Rect) {
    let block = grid_block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = rows
        .iter()
        .map(|row| Line::from(row.iter().map(|cell| cell_span(*cell)).collect::<Vec<_>>()))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_blink(frame: &mut Frame, blink: &ClearBlink, area: Rect) {
    let mut rows = blink.before.rows().to_vec();
    if blink.hidden {
        for &row in blink.rows {
            rows[row] = [Cell::Empty; COLS];
        }
    }
    render_grid(frame, &rows, area);
}

fn render_preview(frame: &mut Frame, pattern: &Pattern, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Next ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = pattern
        .cells()
        .iter()
        .filter(|row| row.iter().any(|cell| cell.is_filled()))
        .map(|row| {
            let mut spans = vec![Span::raw(" ")];
            spans.extend(row.iter().map(|cell| match cell {
                Cell::Empty => Span::raw(BLANK_CHAR),
                Cell::Filled(kind) => Span::styled(BLOCK_CHAR, Style::default().fg(kind_color(*kind))),
            }));
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_stats(frame: &mut Frame, game: &Game, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Stats ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let counts = game.shape_counts();
    let count = |kind: Kind| format!("{}: {}", kind.letter(), counts[kind.index()]);
    let heading = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::Yellow)));

    let lines = vec![
        heading("Shapes"),
        Line::from(format!("{}, {}", count(Kind::I), count(Kind::J))),
        Line::from(format!("{}, {}", count(Kind::L), count(Kind::O))),
        Line::from(format!("{}, {}", count(Kind::S), count(Kind::T))),
        Line::from(count(Kind::Z)),
        Line::from(""),
        heading("Stats"),
        Line::from(format!("run time: {}s", game.run_time().as_secs())),
        Line::from(format!("line count: {}", game.lines_cleared())),
        Line::from(format!("drop speed: {}ms", game.gravity_interval().as_millis())),
        Line::from(""),
        heading("Controls"),
        Line::from("Move <- or ->, down to step"),
        Line::from("Up for drop"),
        Line::from("Space for CW, R for CCW"),
        Line::from("Q to quit"),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_game_over(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Game Over!", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(Span::styled(
            "R: retry, Q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black)),
    );

    let popup_area = centered_rect(24, 6, area);
    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}
