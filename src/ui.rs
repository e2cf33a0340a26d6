use std::io;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::grid::Pos;
use crate::scheduler::GameView;
use crate::snake::Snake;

/// Terminal columns per board cell, so tiles come out roughly square.
pub const CELL_WIDTH: u16 = 2;

/// Typical pixel size of one terminal character cell.
pub const GLYPH_PIXELS: (i32, i32) = (8, 16);

const BACKGROUND: Color = Color::Rgb(0x33, 0x33, 0x33);
const FOOD: Color = Color::Red;
const HEAD: Color = Color::Rgb(0x00, 0xFF, 0x00);
const BODY: Color = Color::Rgb(0x00, 0xAA, 0x00);

/// Everything the terminal needs to draw one frame.
#[derive(Debug, Default)]
struct Scene {
    grid_size: u16,
    snake: Vec<Pos>,
    food: Option<Pos>,
    score: u32,
    final_score: Option<u32>,
}

impl Scene {
    fn paint_tile(&self, pos: Pos, color: Color, area: Rect, buf: &mut Buffer) {
        if pos.x < 0 || pos.y < 0 {
            return;
        }
        let x = area.x + pos.x as u16 * CELL_WIDTH;
        let y = area.y + pos.y as u16;
        if x + CELL_WIDTH > area.right() || y >= area.bottom() {
            return;
        }
        buf[(x, y)].set_symbol("[").set_fg(BACKGROUND).set_bg(color);
        buf[(x + 1, y)].set_symbol("]").set_fg(BACKGROUND).set_bg(color);
    }
}

impl Widget for &Scene {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(BACKGROUND));

        if let Some(food) = self.food {
            self.paint_tile(food, FOOD, area, buf);
        }

        // Tail first so the head is painted last
        for (index, &pos) in self.snake.iter().enumerate().rev() {
            let color = if index == 0 { HEAD } else { BODY };
            self.paint_tile(pos, color, area, buf);
        }
    }
}

/// Draws the game into a ratatui terminal.
pub struct TerminalView<B: Backend> {
    terminal: Terminal<B>,
    scene: Scene,
    board: Rect,
}

impl<B: Backend> TerminalView<B> {
    pub fn new(terminal: Terminal<B>, grid_size: u16) -> Self {
        TerminalView {
            terminal,
            scene: Scene {
                grid_size,
                ..Default::default()
            },
            board: Rect::default(),
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Screen area of the board as of the last draw.
    pub fn board_area(&self) -> Rect {
        self.board
    }

    /// Converts a mouse position into approximate pixels, so swipe distances
    /// mean the same as on a touch screen.
    pub fn to_swipe_point(&self, column: u16, row: u16) -> (i32, i32) {
        let (width, height) = GLYPH_PIXELS;
        (column as i32 * width, row as i32 * height)
    }

    pub fn redraw(&mut self) -> io::Result<()> {
        let scene = &self.scene;
        let mut board = self.board;
        self.terminal.draw(|frame| board = draw(frame, scene))?;
        self.board = board;
        Ok(())
    }
}

fn draw(frame: &mut Frame, scene: &Scene) -> Rect {
    let layout = Layout::default()
        .direction(layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + score
            Constraint::Min(0),    // Board
        ])
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(format!("SNEK    Score: {}", scene.score))
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL)),
        layout[0],
    );

    let outer = Rect {
        width: (scene.grid_size * CELL_WIDTH + 2).min(layout[1].width),
        height: (scene.grid_size + 2).min(layout[1].height),
        ..layout[1]
    };
    let title = if scene.final_score.is_some() {
        "Game over"
    } else {
        "Playing"
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let board = block.inner(outer);

    frame.render_widget(block, outer);
    frame.render_widget(scene, board);

    if let Some(final_score) = scene.final_score {
        let overlay = centered(board, 5);
        frame.render_widget(Clear, overlay);
        frame.render_widget(
            Paragraph::new(format!(
                "GAME OVER\nYour final score is: {}\nSPACE to play again, Q to quit",
                final_score
            ))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
            overlay,
        );
    }

    board
}

fn centered(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        y: area.y + (area.height - height) / 2,
        height,
        ..area
    }
}

impl<B: Backend> GameView for TerminalView<B> {
    fn render(&mut self, snake: &Snake, food: Pos) -> io::Result<()> {
        self.scene.snake = snake.segments().collect();
        self.scene.food = Some(food);
        self.redraw()
    }

    fn set_score(&mut self, score: u32) -> io::Result<()> {
        self.scene.score = score;
        self.redraw()
    }

    fn show_game_over(&mut self, final_score: u32) -> io::Result<()> {
        self.scene.final_score = Some(final_score);
        self.redraw()
    }

    fn hide_game_over_overlay(&mut self) -> io::Result<()> {
        self.scene.final_score = None;
        self.redraw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SWIPE_THRESHOLD;
    use crate::grid::Direction;
    use crate::input::SwipeTracker;
    use ratatui::backend::TestBackend;

    fn view(grid_size: u16) -> TerminalView<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        TerminalView::new(terminal, grid_size)
    }

    fn bg_at(view: &TerminalView<TestBackend>, pos: Pos) -> Color {
        let board = view.board_area();
        let x = board.x + pos.x as u16 * CELL_WIDTH;
        let y = board.y + pos.y as u16;
        view.terminal().backend().buffer()[(x, y)].bg
    }

    fn screen_text(view: &TerminalView<TestBackend>) -> String {
        let buffer = view.terminal().backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_tiles_are_painted() {
        let mut view = view(20);
        let snake = Snake::new(Pos::new(10, 10), Direction::Right, 3);

        view.render(&snake, Pos::new(2, 3)).unwrap();

        assert_eq!(view.board_area(), Rect::new(1, 4, 40, 20));
        assert_eq!(bg_at(&view, Pos::new(10, 10)), HEAD);
        assert_eq!(bg_at(&view, Pos::new(9, 10)), BODY);
        assert_eq!(bg_at(&view, Pos::new(8, 10)), BODY);
        assert_eq!(bg_at(&view, Pos::new(2, 3)), FOOD);
        assert_eq!(bg_at(&view, Pos::new(0, 0)), BACKGROUND);
    }

    #[test]
    fn test_score_and_overlay() {
        let mut view = view(20);
        let snake = Snake::new(Pos::new(10, 10), Direction::Right, 3);
        view.render(&snake, Pos::new(2, 3)).unwrap();

        view.set_score(30).unwrap();
        assert!(screen_text(&view).contains("Score: 30"));

        view.show_game_over(30).unwrap();
        let text = screen_text(&view);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Your final score is: 30"));

        view.hide_game_over_overlay().unwrap();
        assert!(!screen_text(&view).contains("GAME OVER"));
    }

    #[test]
    fn test_small_terminal_clips_instead_of_panicking() {
        let terminal = Terminal::new(TestBackend::new(12, 8)).unwrap();
        let mut view = TerminalView::new(terminal, 20);
        let snake = Snake::new(Pos::new(10, 10), Direction::Right, 3);

        view.render(&snake, Pos::new(19, 19)).unwrap();
        view.show_game_over(0).unwrap();
    }

    #[test]
    fn test_screen_to_swipe_point() {
        let view = view(20);

        assert_eq!(view.to_swipe_point(0, 0), (0, 0));
        assert_eq!(view.to_swipe_point(3, 5), (24, 80));
    }

    #[test]
    fn test_short_drag_is_a_swipe() {
        let view = view(20);
        let mut swipe = SwipeTracker::new(DEFAULT_SWIPE_THRESHOLD);

        // Two columns to the right
        let (x, y) = view.to_swipe_point(10, 10);
        swipe.begin(x, y);
        let (x, y) = view.to_swipe_point(12, 10);
        assert_eq!(swipe.end(x, y), Some(Direction::Right));

        // One row up
        let (x, y) = view.to_swipe_point(10, 10);
        swipe.begin(x, y);
        let (x, y) = view.to_swipe_point(10, 9);
        assert_eq!(swipe.end(x, y), Some(Direction::Up));

        // A single column is too short
        let (x, y) = view.to_swipe_point(10, 10);
        swipe.begin(x, y);
        let (x, y) = view.to_swipe_point(11, 10);
        assert_eq!(swipe.end(x, y), None);
    }
}
