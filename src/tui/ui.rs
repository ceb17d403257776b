//! Stateless UI rendering for ultimate tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use strictly_ultimate::Constraint as Lock;
use strictly_ultimate::{BoardOutcome, GameStatus, Lean, Position, Square, rules_text};

use super::app::{App, Screen};

const PLAYABLE_BG: Color = Color::Rgb(187, 222, 251);
const BLOCKED_BG: Color = Color::Rgb(255, 205, 210);
const CLAIMED_FG: Color = Color::Rgb(255, 165, 0);

/// Renders whichever screen the app is on.
pub fn draw(frame: &mut Frame, app: &App, turn_seconds: u64) {
    match app.screen() {
        Screen::Instructions => draw_instructions(frame, turn_seconds),
        Screen::Board => draw_game(frame, app),
    }
}

fn draw_instructions(frame: &mut Frame, turn_seconds: u64) {
    let area = center_rect(frame.area(), 72, 18);
    let text = format!(
        "{}\n\nPress 's' to start, 'q' to quit",
        rules_text(turn_seconds)
    );
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Ultimate Tic Tac Toe").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_game(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Min(11),    // Board
            Constraint::Length(3),  // Turn and timer
            Constraint::Length(3),  // Status
            Constraint::Length(1),  // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Strictly Ultimate - Ultimate Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], app);
    draw_turn(frame, chunks[2], app);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    let help = Paragraph::new("Arrows move, Enter/Space plays, 'r' restarts, 'q' quits")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::with_capacity(11);
    for row in 0..9 {
        if row == 3 || row == 6 {
            lines.push(Line::from(Span::styled(
                "─────────┼─────────┼─────────",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let mut spans = Vec::with_capacity(11);
        for col in 0..9 {
            if col == 3 || col == 6 {
                spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
            }
            spans.push(cell_span(app, row, col));
        }
        lines.push(Line::from(spans));
    }

    let board_area = center_rect(area, 29, 11);
    frame.render_widget(Paragraph::new(lines), board_area);
}

fn cell_span(app: &App, row: usize, col: usize) -> Span<'static> {
    let snapshot = app.snapshot();
    let (Some(board), Some(cell)) = (
        Position::from_row_col(row / 3, col / 3),
        Position::from_row_col(row % 3, col % 3),
    ) else {
        return Span::raw("   ");
    };

    let (text, mut style) = match snapshot.outcome(board) {
        BoardOutcome::Won(winner) => (
            format!(" {} ", app.config().style(winner).symbol()),
            Style::default().fg(CLAIMED_FG).add_modifier(Modifier::BOLD),
        ),
        BoardOutcome::Draw => (" · ".to_string(), Style::default().fg(Color::DarkGray)),
        BoardOutcome::Unresolved => {
            let bg = if snapshot.is_playable(board) {
                PLAYABLE_BG
            } else {
                BLOCKED_BG
            };
            match snapshot.square(board, cell) {
                Square::Empty => ("   ".to_string(), Style::default().bg(bg)),
                Square::Occupied(player) => (
                    format!(" {} ", app.config().style(player).symbol()),
                    Style::default()
                        .fg(Color::Black)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ),
            }
        }
    };

    if app.cursor().is_at(board, cell) {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(text, style)
}

fn draw_turn(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.snapshot();
    let mover = app.config().style(*snapshot.to_move());

    let mut spans = vec![Span::raw(format!(
        "Player Turn: {} {}   ",
        mover.symbol(),
        mover.name()
    ))];

    if *snapshot.status() == GameStatus::InProgress {
        spans.push(Span::styled(
            format!("{:>2}", app.remaining()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(match snapshot.constraint() {
            Lock::Free => "   Play anywhere".to_string(),
            Lock::Locked(board) => {
                let lean = match snapshot.leans()[board.to_index()] {
                    Lean::Leaning(player) => {
                        format!("{} likely", app.config().style(player).name())
                    }
                    Lean::Even => "Even".to_string(),
                };
                format!("   Play in: {} ({})", board, lean)
            }
        }));
    }

    if let Some(player) = app.notice() {
        spans.push(Span::styled(
            format!("   {} lost their turn!", app.config().style(player).symbol()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
