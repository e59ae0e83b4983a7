//! Terminal stand-in for the LED matrix.

use super::{Color, FrameView, LedFrame, MATRIX_SIZE, RenderSink};
use crate::clock::{Delay, ThreadDelay};
use crate::controller::{HUMAN_MARK, TurnState};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ledtoe_tictactoe::{GamePhase, Position};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color as TermColor, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io::{self, Stdout};
use tracing::{debug, info, instrument, warn};

/// The matrix runs at low duty; scale up for a terminal.
const BRIGHTNESS_GAIN: u8 = 8;

/// RGB values for each logical color, in LED driver units (0-31).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Grid lines.
    pub grid: (u8, u8, u8),
    /// Cursor highlight.
    pub cursor: (u8, u8, u8),
    /// Player A marks.
    pub player_a: (u8, u8, u8),
    /// Player B marks.
    pub player_b: (u8, u8, u8),
    /// Draw flash.
    pub draw: (u8, u8, u8),
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid: (5, 5, 0),
            cursor: (0, 20, 0),
            player_a: (30, 0, 0),
            player_b: (0, 0, 30),
            draw: (20, 20, 0),
        }
    }
}

impl Palette {
    /// Terminal RGB for a logical color.
    pub fn rgb(&self, color: Color) -> (u8, u8, u8) {
        let (r, g, b) = match color {
            Color::Off => (0, 0, 0),
            Color::Grid => self.grid,
            Color::Cursor => self.cursor,
            Color::PlayerA => self.player_a,
            Color::PlayerB => self.player_b,
            Color::Draw => self.draw,
        };
        (
            r.saturating_mul(BRIGHTNESS_GAIN),
            g.saturating_mul(BRIGHTNESS_GAIN),
            b.saturating_mul(BRIGHTNESS_GAIN),
        )
    }

    fn style(&self, color: Color) -> Style {
        let (r, g, b) = self.rgb(color);
        Style::default().fg(TermColor::Rgb(r, g, b))
    }
}

/// One line describing the game state under the matrix.
pub(crate) fn status_line(view: &FrameView) -> String {
    match view.phase {
        GamePhase::Finished(outcome) => {
            let result = match outcome.winner() {
                Some(player) if player == HUMAN_MARK => "You win!",
                Some(_) => "AI wins",
                None => "Draw",
            };
            format!("{result} Confirm or reset for a new game.")
        }
        GamePhase::Active => match view.turn {
            TurnState::AiTurn => "AI is thinking...".to_string(),
            TurnState::HumanTurn => format!("Your move ({})", view.cursor.label()),
        },
    }
}

/// Draws the matrix with ratatui in the alternate screen.
pub struct TerminalSink {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    palette: Palette,
    delay: ThreadDelay,
    frame: LedFrame,
    status: String,
    help: &'static str,
}

impl std::fmt::Debug for TerminalSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSink")
            .field("palette", &self.palette)
            .field("frame", &self.frame)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl TerminalSink {
    /// Switches the terminal to raw mode and the alternate screen.
    ///
    /// `help` is shown under the status line.
    #[instrument(skip(palette))]
    pub fn enter(palette: Palette, help: &'static str) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        info!("Terminal display ready");

        Ok(Self {
            terminal,
            palette,
            delay: ThreadDelay,
            frame: LedFrame::default(),
            status: String::new(),
            help,
        })
    }

    /// Leaves the alternate screen and restores the terminal.
    #[instrument(skip(self))]
    pub fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        info!("Terminal restored");
        Ok(())
    }

    fn draw(&mut self, frame: LedFrame) {
        let palette = self.palette;
        let status = self.status.as_str();
        let help = self.help;
        if let Err(e) = self
            .terminal
            .draw(|f| draw_matrix(f, &frame, &palette, status, help))
        {
            warn!(error = %e, "Failed to draw frame");
        }
    }

    fn blink(&mut self, cycles: u8, period_ms: u64, mut frame_for: impl FnMut(bool) -> LedFrame) {
        for i in 0..cycles {
            let frame = frame_for(i % 2 == 0);
            self.draw(frame);
            self.delay.delay_ms(period_ms);
        }
    }
}

impl RenderSink for TerminalSink {
    fn render_frame(&mut self, view: &FrameView) {
        self.frame = LedFrame::compose(view);
        self.status = status_line(view);
        self.draw(self.frame);
    }

    #[instrument(skip(self))]
    fn flash_fill(&mut self, color: Color, cycles: u8, period_ms: u64) {
        debug!("Flashing matrix");
        self.blink(cycles, period_ms, |lit| {
            LedFrame::filled(if lit { color } else { Color::Off })
        });
    }

    #[instrument(skip(self))]
    fn flash_cell(&mut self, position: Position, color: Color, cycles: u8, period_ms: u64) {
        debug!("Flashing square");
        let mut frame = self.frame;
        self.blink(cycles, period_ms, |lit| {
            frame.set_square(position, if lit { color } else { Color::Off });
            frame
        });
        self.frame = frame;
    }
}

fn draw_matrix(f: &mut Frame, frame: &LedFrame, palette: &Palette, status: &str, help: &str) {
    let mut lines: Vec<Line> = Vec::with_capacity(MATRIX_SIZE + 4);
    for row in frame.rows() {
        let spans: Vec<Span> = row
            .iter()
            .map(|color| {
                let glyph = if *color == Color::Off { " ·" } else { "██" };
                Span::styled(glyph, palette.style(*color))
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(MATRIX_SIZE as u16 + 2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(f.area());

    let matrix = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title("ledtoe").borders(Borders::ALL));
    f.render_widget(matrix, chunks[0]);
    f.render_widget(
        Paragraph::new(status).alignment(Alignment::Center),
        chunks[1],
    );
    f.render_widget(
        Paragraph::new(help)
            .alignment(Alignment::Center)
            .style(Style::default().fg(TermColor::DarkGray)),
        chunks[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledtoe_tictactoe::{Board, Outcome, Player};

    fn view(phase: GamePhase, turn: TurnState) -> FrameView {
        FrameView {
            board: Board::new(),
            cursor: Position::TopLeft,
            phase,
            turn,
        }
    }

    #[test]
    fn test_palette_scales_driver_values() {
        let palette = Palette::default();
        assert_eq!(palette.rgb(Color::Off), (0, 0, 0));
        assert_eq!(palette.rgb(Color::PlayerA), (240, 0, 0));
        assert_eq!(palette.rgb(Color::Cursor), (0, 160, 0));
        assert_ne!(palette.rgb(Color::Cursor), palette.rgb(Color::PlayerB));
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(
            status_line(&view(GamePhase::Active, TurnState::HumanTurn)),
            "Your move (Top-left)"
        );
        assert_eq!(
            status_line(&view(GamePhase::Active, TurnState::AiTurn)),
            "AI is thinking..."
        );
        let lost = view(GamePhase::Finished(Outcome::Winner(Player::A)), TurnState::AiTurn);
        assert!(status_line(&lost).starts_with("AI wins"));
        let won = view(GamePhase::Finished(Outcome::Winner(Player::B)), TurnState::HumanTurn);
        assert!(status_line(&won).starts_with("You win!"));
        let draw = view(GamePhase::Finished(Outcome::Draw), TurnState::AiTurn);
        assert!(status_line(&draw).starts_with("Draw"));
    }
}
