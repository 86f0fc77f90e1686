use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::board::Board;
use crate::game::{Coordinate, TileKind};
use crate::metrics::GameMetrics;

/// Per-frame figures that do not live on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub fruits_eaten: u32,
    pub snake_len: usize,
    /// No direction has been entered yet this game
    pub waiting: bool,
    pub game_over: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, board: &Board, hud: &Hud, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(hud, metrics);
        frame.render_widget(stats, chunks[0]);

        // Two columns per cell, plus the border
        let grid_width = (board.width() as u16).saturating_mul(2).saturating_add(2);
        let grid_height = (board.height() as u16).saturating_add(2);

        if hud.game_over {
            let panel_area = centered(chunks[1], grid_width.max(40), grid_height.max(10));
            let game_over = self.render_game_over(hud, metrics);
            frame.render_widget(game_over, panel_area);
        } else {
            let game_area = centered(chunks[1], grid_width, grid_height);
            let grid = self.render_grid(board, hud);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, board: &Board, hud: &Hud) -> Paragraph<'static> {
        let mut lines = Vec::with_capacity(board.height());

        for row in 0..board.height() {
            let spans: Vec<Span> = (0..board.width())
                .map(|col| {
                    let coord = Coordinate::new(row, col);
                    if board.head() == Some(coord) {
                        return Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        );
                    }
                    match board.tile(coord) {
                        TileKind::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
                        TileKind::Fruit => Span::styled(
                            "O ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        TileKind::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                    }
                })
                .collect();

            lines.push(Line::from(spans));
        }

        let title = if hud.waiting {
            " Snake - press a direction to start "
        } else {
            " Snake "
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        )
    }

    fn render_stats(&self, hud: &Hud, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Fruit: ", label),
            Span::styled(
                hud.fruits_eaten.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(hud.snake_len.to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, hud: &Hud, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(
                metrics.last_cause.unwrap_or_default(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Fruit eaten: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    hud.fruits_eaten.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
