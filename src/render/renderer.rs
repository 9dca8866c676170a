use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Direction, GameSnapshot, Position};
use crate::metrics::GameMetrics;
use crate::modes::menu::Menu;

/// Terminal columns per grid cell
const CELL_WIDTH: usize = 2;

/// What occupies a single grid cell on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Head(Direction),
    Body,
    Fruit,
    Empty,
}

impl Cell {
    fn span(self) -> Span<'static> {
        match self {
            Cell::Wall => Span::styled("▒▒", Style::default().fg(Color::DarkGray)),
            Cell::Head(direction) => Span::styled(
                head_glyph(direction),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::Body => Span::styled("# ", Style::default().fg(Color::Green)),
            Cell::Fruit => Span::styled(
                "ò ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::North => "^ ",
        Direction::East => "> ",
        Direction::South => "v ",
        Direction::West => "< ",
    }
}

/// Lay the snapshot out as rows of cells, walls included
pub fn layout_cells(snapshot: &GameSnapshot) -> Vec<Vec<Cell>> {
    let head = snapshot.head();
    let body: HashSet<Position> = snapshot.snake.iter().copied().collect();
    let fruits: HashSet<Position> = snapshot.fruits.iter().copied().collect();
    let grid = snapshot.grid;

    (0..grid.height() as i32)
        .map(|y| {
            (0..grid.width() as i32)
                .map(|x| {
                    let pos = Position::new(x, y);
                    if Some(pos) == head {
                        Cell::Head(snapshot.heading)
                    } else if !grid.is_interior(pos) {
                        Cell::Wall
                    } else if body.contains(&pos) {
                        Cell::Body
                    } else if fruits.contains(&pos) {
                        Cell::Fruit
                    } else {
                        Cell::Empty
                    }
                })
                .collect()
        })
        .collect()
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &GameSnapshot, metrics: &GameMetrics) {
        let chunks = screen_layout(frame.area());

        let stats = self.render_stats(chunks[0], snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = centered(chunks[1]);

        if snapshot.is_alive() {
            let grid = self.render_grid(game_area, snapshot);
            frame.render_widget(grid, game_area);
        } else {
            let game_over = self.render_game_over(game_area, snapshot, metrics);
            frame.render_widget(game_over, game_area);
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    /// Draw a menu over the whole screen
    pub fn render_menu(&self, frame: &mut Frame, menu: &Menu, metrics: &GameMetrics) {
        let area = centered(frame.area());

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                menu.title,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
        ];

        for (i, item) in menu.items().iter().enumerate() {
            let line = if i == menu.focus() {
                Line::from(vec![Span::styled(
                    format!("> {} <", item.label()),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )])
            } else {
                Line::from(vec![Span::styled(
                    item.label(),
                    Style::default().fg(Color::White),
                )])
            };
            text.push(line);
            text.push(Line::from(""));
        }

        if metrics.games_played > 0 {
            text.push(Line::from(vec![
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]));
        }

        let menu_widget = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White)),
        );
        frame.render_widget(menu_widget, area);
    }

    fn render_grid(&self, area: Rect, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Kobra ");

        // A clipped board would hide walls and fruit, so refuse to draw it
        let inner = block.inner(area);
        let grid = snapshot.grid;
        if grid.width() * CELL_WIDTH > inner.width as usize
            || grid.height() > inner.height as usize
        {
            let text = vec![
                Line::from(""),
                Line::from(vec![Span::styled(
                    "Terminal too small",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )]),
                Line::from(format!(
                    "The {}x{} board needs {}x{} cells, have {}x{}",
                    grid.width(),
                    grid.height(),
                    grid.width() * CELL_WIDTH,
                    grid.height(),
                    inner.width,
                    inner.height
                )),
            ];
            return Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center);
        }

        let lines: Vec<Line> = layout_cells(snapshot)
            .into_iter()
            .map(|row| Line::from(row.into_iter().map(Cell::span).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        _area: Rect,
        snapshot: &GameSnapshot,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}ms", snapshot.speed_ms),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        _area: Rect,
        snapshot: &GameSnapshot,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Your points: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if metrics.last_was_best {
            text.push(Line::from(vec![Span::styled(
                "New best!",
                Style::default().fg(Color::Green),
            )]));
        }

        text.extend([
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again, ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" for the menu or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ]);

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" to pause | "),
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

/// Header, game area and footer
fn screen_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Game area
            Constraint::Length(3), // Footer
        ])
        .split(area)
}

/// Largest grid, walls included, that [`Renderer::render`] can draw on a
/// terminal of `cols` x `rows`. `None` when not even a 3x3 grid fits.
pub fn fit_grid(cols: u16, rows: u16) -> Option<(usize, usize)> {
    let board = centered(screen_layout(Rect::new(0, 0, cols, rows))[1]);
    let inner = Block::default().borders(Borders::ALL).inner(board);

    let width = inner.width as usize / CELL_WIDTH;
    let height = inner.height as usize;
    (width >= 3 && height >= 3).then_some((width, height))
}

/// Middle 80% of `area`, horizontally
fn centered(area: Rect) -> Rect {
    Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area)[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, Grid, Pilot, SessionController, SessionState};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn snapshot() -> GameSnapshot {
        GameSnapshot {
            snake: vec![Position::new(1, 1), Position::new(2, 1)],
            heading: Direction::East,
            fruits: vec![Position::new(2, 2)],
            score: 1,
            speed_ms: 390,
            state: SessionState::Playing,
            grid: Grid::new(5, 4).unwrap(),
        }
    }

    #[test]
    fn test_layout_dimensions() {
        let cells = layout_cells(&snapshot());
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|row| row.len() == 5));
    }

    #[test]
    fn test_layout_contents() {
        let cells = layout_cells(&snapshot());

        assert_eq!(cells[0][0], Cell::Wall);
        assert_eq!(cells[3][4], Cell::Wall);
        assert_eq!(cells[1][1], Cell::Body);
        assert_eq!(cells[1][2], Cell::Head(Direction::East));
        assert_eq!(cells[2][2], Cell::Fruit);
        assert_eq!(cells[2][3], Cell::Empty);
    }

    /// Rows of the drawn screen holding an unbroken wall as wide as the grid
    fn full_wall_rows(buffer: &Buffer, grid_width: usize) -> usize {
        let wall = "▒".repeat(grid_width * CELL_WIDTH);
        (0..buffer.area.height)
            .filter(|&y| {
                let row: String = (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect();
                row.contains(&wall)
            })
            .count()
    }

    fn draw(cols: u16, rows: u16, snapshot: &GameSnapshot, metrics: &GameMetrics) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(cols, rows)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, snapshot, metrics))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_fitted_grid_is_fully_drawn_on_80x24() {
        let (width, height) = fit_grid(80, 24).unwrap();
        let mut session = SessionController::new(GameConfig {
            rng_seed: Some(3),
            ..GameConfig::new(width, height)
        })
        .unwrap();
        session.start(Pilot::Human).unwrap();
        let snapshot = session.snapshot();

        let buffer = draw(80, 24, &snapshot, &GameMetrics::new());

        // Top and bottom walls, and no clipping message
        assert_eq!(full_wall_rows(&buffer, width), 2);
        let screen: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(!screen.contains("Terminal too small"));
    }

    #[test]
    fn test_oversized_grid_is_not_clipped() {
        let snapshot = GameSnapshot {
            grid: Grid::new(20, 20).unwrap(),
            ..snapshot()
        };

        let buffer = draw(80, 24, &snapshot, &GameMetrics::new());

        assert_eq!(full_wall_rows(&buffer, 20), 0);
        let screen: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(screen.contains("Terminal too small"));
    }

    #[test]
    fn test_fit_grid_rejects_tiny_terminals() {
        assert_eq!(fit_grid(80, 24), Some((31, 16)));
        assert_eq!(fit_grid(10, 8), None);
    }

    #[test]
    fn test_head_glyph_follows_heading() {
        assert_eq!(head_glyph(Direction::North), "^ ");
        assert_eq!(head_glyph(Direction::West), "< ");
    }
}
