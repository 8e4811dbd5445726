use std::collections::HashMap;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{DrawList, FontSize, Game, Phase, Position, SegmentColor, TextPosition};
use crate::metrics::GameMetrics;

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
/// Terminal columns per grid cell
const CELL_WIDTH: u16 = 2;

/// Largest grid that fits a terminal of `width` x `height` character cells
pub fn grid_for_terminal(width: u16, height: u16) -> (usize, usize) {
    let cols = width.saturating_sub(2) / CELL_WIDTH;
    let rows = height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT + 2);
    (cols as usize, rows as usize)
}

/// Paints a game's draw list, score header and controls into a ratatui frame
pub struct TerminalView;

impl TerminalView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, game: &Game<DrawList>, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT), // Header
                Constraint::Min(0),                // Game area
                Constraint::Length(FOOTER_HEIGHT), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(game, metrics), chunks[0]);

        let grid = game.grid();
        let board_area = centered(
            chunks[1],
            board_width(grid.num_cols),
            board_height(grid.num_rows),
        );
        frame.render_widget(self.render_grid(game), board_area);
        self.render_messages(frame, board_area, game);

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, game: &Game<DrawList>) -> Paragraph<'static> {
        let grid = game.grid();
        let cells: HashMap<Position, SegmentColor> = game.renderer().segments().collect();
        let player_head = game.player().head();
        let robot_head = game.robot().map(|robot| robot.head());

        let mut lines = Vec::with_capacity(grid.num_rows);
        for y in 0..grid.num_rows {
            let mut spans = Vec::with_capacity(grid.num_cols);

            for x in 0..grid.num_cols {
                let pos = Position::new(x as i32, y as i32);

                let cell = match cells.get(&pos) {
                    Some(SegmentColor::Green) => Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Some(SegmentColor::Red) if pos == player_head => Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(SegmentColor::Red) => {
                        Span::styled("□ ", Style::default().fg(Color::Green))
                    }
                    Some(SegmentColor::Blue) if Some(pos) == robot_head => Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(SegmentColor::Blue) => {
                        Span::styled("□ ", Style::default().fg(Color::Blue))
                    }
                    None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let border_color = if game.phase() == Phase::Over {
            Color::Red
        } else {
            Color::White
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(border_color))
                .title(" Snake "),
        )
    }

    /// Overlay draw-list text a quarter of the way down the board
    fn render_messages(&self, frame: &mut Frame, board_area: Rect, game: &Game<DrawList>) {
        let display = game.display();
        let inner = Rect {
            x: board_area.x + 1,
            y: board_area.y + 1,
            width: board_area.width.saturating_sub(2),
            height: board_area.height.saturating_sub(2),
        };
        let headline_row = inner.y + inner.height / 4;

        for (text, size, position) in game.renderer().texts() {
            let row = match position {
                TextPosition::Headline => headline_row,
                TextPosition::BelowHeadline(lines) => headline_row.saturating_add(lines),
            };
            if row >= inner.y + inner.height {
                continue;
            }

            let area = Rect {
                x: inner.x,
                y: row,
                width: inner.width,
                height: 1,
            };
            frame.render_widget(Clear, area);
            let style = text_style(display.scaled(size));
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(text.to_string(), style)))
                    .alignment(Alignment::Center),
                area,
            );
        }
    }

    fn render_stats(&self, game: &Game<DrawList>, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                game.score().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", label),
            Span::styled(game.high_score().to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{} fps", game.fps()), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
            Span::raw("    "),
            Span::styled(phase_label(game.phase()), Style::default().fg(Color::Cyan)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal text has one size, so the scaled point size picks an emphasis instead
fn text_style(points: f32) -> Style {
    if points >= 32.0 {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if points >= 20.0 {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Columns the bordered board needs for `num_cols` cells
fn board_width(num_cols: usize) -> u16 {
    u16::try_from(num_cols)
        .unwrap_or(u16::MAX)
        .saturating_mul(CELL_WIDTH)
        .saturating_add(2)
}

fn board_height(num_rows: usize) -> u16 {
    u16::try_from(num_rows).unwrap_or(u16::MAX).saturating_add(2)
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Loading => "LOADING",
        Phase::Ready => "READY",
        Phase::Running => "RUNNING",
        Phase::Paused => "PAUSED",
        Phase::Over => "OVER",
    }
}

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silent;
    use crate::game::{Breakpoints, DisplayProfile, GameConfig};
    use crate::store::MemoryHighScoreStore;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_grid_for_terminal() {
        assert_eq!(grid_for_terminal(80, 30), (39, 22));
        assert_eq!(grid_for_terminal(4, 4), (1, 0));
    }

    #[test]
    fn test_board_size_saturates() {
        assert_eq!(board_width(20), 42);
        assert_eq!(board_height(20), 22);
        assert_eq!(board_width(40_000), u16::MAX);
        assert_eq!(board_height(usize::MAX), u16::MAX);
    }

    #[test]
    fn test_message_emphasis_follows_font_scale() {
        let bp = Breakpoints::default();
        let desktop = DisplayProfile::detect(120, false, bp);
        let phone = DisplayProfile::detect(40, true, bp);

        assert!(text_style(desktop.scaled(FontSize::Large))
            .add_modifier
            .contains(Modifier::BOLD));
        assert_eq!(text_style(desktop.scaled(FontSize::Medium)).fg, Some(Color::White));
        assert!(!text_style(phone.scaled(FontSize::Large))
            .add_modifier
            .contains(Modifier::BOLD));
        assert_eq!(text_style(phone.scaled(FontSize::Medium)).fg, Some(Color::Gray));
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 10);
        assert_eq!(centered(area, 4, 2), Rect::new(3, 4, 4, 2));
        assert_eq!(centered(area, 40, 20), area);
    }

    #[test]
    fn test_renders_board_and_start_message() {
        let config = GameConfig {
            seed: Some(5),
            ..GameConfig::new(30, 12)
        };
        let mut game = Game::new(
            config,
            DrawList::new(),
            Box::new(MemoryHighScoreStore::new(12)),
            Box::new(Silent),
        );
        game.load();

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|frame| TerminalView::new().render(frame, &game, &GameMetrics::new()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Score: 0"));
        assert!(text.contains("High: 12"));
        assert!(text.contains("READY"));
        assert!(text.contains("To begin, press the Right, Left, or Up arrow"));
        assert!(text.contains("■"));
    }
}
