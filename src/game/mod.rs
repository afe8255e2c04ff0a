mod clock;
mod direction;
mod engine;
mod food;
mod grid;
mod overlay;
mod schedule;
mod score;
mod session;
mod snake;
pub(crate) use self::direction::{Boundary, Direction};
pub(crate) use self::engine::Rules;
pub(crate) use self::food::FoodPolicy;
pub(crate) use self::session::Notice;
use self::grid::{Cell, Grid};
use self::overlay::Overlay;
use self::session::{Phase, Session};
use crate::command::Command;
use crate::consts;
use crate::options::{CellSize, Options};
use crate::util::{center_rect, get_display_area};
use crossterm::event::Event;
use rand::{rngs::StdRng, Rng};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::Instant;

/// The game screen: a [`Session`] plus everything needed to draw it and feed
/// it input from the terminal
#[derive(Clone, Debug)]
pub(crate) struct Game<R = StdRng> {
    session: Session<R>,
    cell_size: CellSize,
    muted: bool,
}

/// Something the game screen needs the application to do
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Action {
    Quit,
    /// Store the new value of the mute flag
    SetMuted(bool),
    /// Forget the stored high score
    ClearHighScore,
}

impl<R: Rng> Game<R> {
    /// Create a game sized to fit a terminal of `area`
    pub(crate) fn new(
        options: Options,
        high_score: u32,
        muted: bool,
        rng: R,
        area: Rect,
    ) -> Game<R> {
        let grid = board_grid(area, options.cell_size).unwrap_or_else(|| {
            tracing::warn!(
                width = area.width,
                height = area.height,
                "Terminal too small for board; using smallest grid"
            );
            Grid::MIN
        });
        tracing::info!(%grid, boundary = %options.boundary, food = %options.food, "Creating game");
        Game {
            session: Session::new(grid, options.rules(), options.speed, high_score, rng),
            cell_size: options.cell_size,
            muted,
        }
    }

    /// Handle an input event.  Returns `Some` if the application needs to
    /// act on it.
    pub(crate) fn handle_event(&mut self, event: Event, now: Instant) -> Option<Action> {
        match event {
            Event::FocusLost => {
                self.session.pause();
                None
            }
            Event::Resize(width, height) => {
                self.resize(Rect::new(0, 0, width, height), now);
                None
            }
            _ => self.handle_command(Command::from_key_event(event.as_key_press_event()?)?, now),
        }
    }

    fn handle_command(&mut self, cmd: Command, now: Instant) -> Option<Action> {
        if let Some(direction) = cmd.direction() {
            self.session.set_direction(direction);
            return None;
        }
        match cmd {
            Command::Quit | Command::Q => return Some(Action::Quit),
            Command::Enter => match self.session.phase() {
                Phase::Idle => {
                    self.session.start(now);
                }
                Phase::Paused => {
                    self.session.resume(now);
                }
                Phase::GameOver | Phase::Cleared => {
                    self.session.restart(now);
                }
                Phase::Running => (),
            },
            Command::Space | Command::Esc => {
                self.session.toggle_pause(now);
            }
            Command::R => {
                self.session.restart(now);
            }
            Command::Speed(speed) => {
                self.session.set_speed(speed, now);
            }
            Command::M => {
                self.muted = !self.muted;
                return Some(Action::SetMuted(self.muted));
            }
            Command::C => {
                if self.session.phase() != Phase::Running {
                    self.session.clear_high_score();
                    return Some(Action::ClearHighScore);
                }
            }
            Command::Up | Command::Down | Command::Left | Command::Right => (),
        }
        None
    }

    fn resize(&mut self, area: Rect, now: Instant) {
        if let Some(grid) = board_grid(area, self.cell_size) {
            self.session.resize(grid, now);
        } else {
            tracing::warn!(
                width = area.width,
                height = area.height,
                "Terminal too small for board; ignoring resize"
            );
        }
    }

    /// Fire whichever timers are due at `now`
    pub(crate) fn run_due(&mut self, now: Instant) -> Vec<Notice> {
        self.session.run_due(now)
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Whether the snake is currently on the move
    pub(crate) fn is_running(&self) -> bool {
        self.session.phase() == Phase::Running
    }

    /// When the event loop next needs to call [`Game::run_due()`].  `None`
    /// means nothing will happen until there is input.
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.session.next_deadline()
    }

    fn score_bar(&self) -> Line<'static> {
        let mut bar = format!(
            " Score: {}  Best: {}  Time: {}  Speed: {}",
            self.session.score(),
            self.session.high_score(),
            self.session.clock(),
            self.session.speed(),
        );
        if self.muted {
            bar.push_str("  [muted]");
        }
        Line::styled(bar, consts::SCORE_BAR_STYLE)
    }

    fn help_line(&self) -> Line<'static> {
        let keys: &[(&'static str, &'static str)] = if self.session.phase() == Phase::Running {
            &[("Pause", "Space"), ("Mute", "m"), ("Quit", "q")]
        } else {
            &[("Mute", "m"), ("Clear best", "c"), ("Quit", "q")]
        };
        let mut line = Line::default();
        for &(label, key) in keys {
            line.push_span(Span::raw(format!(" {label} (")));
            line.push_span(Span::styled(key, consts::KEY_STYLE));
            line.push_span(Span::raw(") "));
        }
        line
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_region, help_area] = screen_layout(display);
        self.score_bar().render(score_area, buf);

        let grid = self.session.grid();
        let board_size = Size {
            width: grid
                .cols()
                .saturating_mul(self.cell_size.columns())
                .saturating_add(2),
            height: grid
                .rows()
                .saturating_mul(self.cell_size.rows())
                .saturating_add(2),
        };
        let block_area = center_rect(board_region, board_size);
        if self.session.rules().boundary == Boundary::Wrapping {
            DottedBorder.render(block_area, buf);
        } else {
            Block::bordered().render(block_area, buf);
        }

        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            cell_size: self.cell_size,
            buf,
        };
        if let Some(engine) = self.session.engine() {
            if let Some(food) = engine.food() {
                board.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
            }
            for c in engine.snake().segments().skip(1) {
                board.draw_cell(c, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_BODY_STYLE);
            }
            // Draw the head last so that, if it's a collision, we overwrite
            // whatever it's colliding with
            if self.session.phase() == Phase::GameOver {
                board.draw_cell(
                    engine.snake().head(),
                    consts::COLLISION_SYMBOL,
                    consts::COLLISION_STYLE,
                );
            } else {
                board.draw_cell(
                    engine.snake().head(),
                    consts::SNAKE_HEAD_SYMBOL,
                    consts::SNAKE_HEAD_STYLE,
                );
            }
        }

        self.help_line().render(help_area, buf);

        if let Some(overlay) = Overlay::for_phase(
            self.session.phase(),
            self.session.speed(),
            self.session.score(),
            self.session.high_score(),
        ) {
            overlay.render(center_rect(display, overlay.size()), buf);
        }
    }
}

/// Split the display area into the score bar, the region holding the board,
/// and the line of key hints
fn screen_layout(display: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(display)
}

/// The largest grid that fits on a terminal of `area` with cells of
/// `cell_size`
fn board_grid(area: Rect, cell_size: CellSize) -> Option<Grid> {
    let [_, board_region, _] = screen_layout(get_display_area(area));
    let inner = board_region.inner(Margin::new(1, 1));
    Grid::from_board(
        u32::from(inner.width),
        u32::from(inner.height) * u32::from(CellSize::ROW_PX),
        u32::from(cell_size.px()),
    )
}

/// The inside of the board's border.  Each grid cell covers a block of
/// terminal cells whose size is given by `cell_size`.
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    cell_size: CellSize,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let width = self.cell_size.columns();
        let height = self.cell_size.rows();
        let Some(x0) = cell
            .col
            .checked_mul(width)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y0) = cell
            .row
            .checked_mul(height)
            .and_then(|y| self.area.y.checked_add(y))
        else {
            return;
        };
        for y in y0..y0.saturating_add(height) {
            for x in x0..x0.saturating_add(width) {
                if !self.area.contains(Position::new(x, y)) {
                    continue;
                }
                if let Some(c) = self.buf.cell_mut((x, y)) {
                    c.set_char(symbol);
                    c.set_style(Style::reset().patch(style));
                }
            }
        }
    }
}

/// Border drawn around a board whose edges wrap
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let mut put = |x: u16, y: u16, symbol: char| {
            if let Some(cell) = buf.cell_mut((area.x.saturating_add(x), area.y.saturating_add(y))) {
                cell.set_char(symbol);
            }
        };
        let max_x = area.width.saturating_sub(1);
        let max_y = area.height.saturating_sub(1);
        put(0, 0, '·');
        put(max_x, 0, '·');
        put(max_x, max_y, '·');
        put(0, max_y, '·');
        for x in 1..max_x {
            put(x, 0, '⋯');
            put(x, max_y, '⋯');
        }
        for y in 1..max_y {
            put(0, y, '⋮');
            put(max_x, y, '⋮');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Speed;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123_4567_89AB_CDEF;

    fn game(options: Options, area: Rect) -> Game<ChaCha12Rng> {
        Game::new(options, 0, false, ChaCha12Rng::seed_from_u64(RNG_SEED), area)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn symbols(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .filter_map(|x| buf.cell((x, y)).map(ratatui::buffer::Cell::symbol))
                    .collect()
            })
            .collect()
    }

    fn symbol_at(buf: &Buffer, x: u16, y: u16) -> &str {
        buf.cell((x, y)).map_or("", ratatui::buffer::Cell::symbol)
    }

    #[rstest]
    #[case(80, 24, 2, Grid::new(20, 39))]
    #[case(120, 50, 2, Grid::new(20, 39))]
    #[case(80, 24, 4, Grid::new(10, 19))]
    #[case(20, 8, 2, Grid::new(4, 9))]
    #[case(4, 4, 2, None)]
    fn test_board_grid(
        #[case] width: u16,
        #[case] height: u16,
        #[case] cell_px: u16,
        #[case] grid: Option<Grid>,
    ) {
        let cell_size = CellSize::new(cell_px).unwrap();
        assert_eq!(board_grid(Rect::new(0, 0, width, height), cell_size), grid);
    }

    #[test]
    fn keys_drive_the_session() {
        let t0 = Instant::now();
        let mut game = game(Options::default(), Rect::new(0, 0, 80, 24));
        assert_eq!(game.session.phase(), Phase::Idle);
        assert_eq!(game.next_deadline(), None);
        assert_eq!(game.handle_event(key(KeyCode::Char(' ')), t0), None);
        assert_eq!(game.session.phase(), Phase::Idle);
        assert_eq!(game.handle_event(key(KeyCode::Enter), t0), None);
        assert_eq!(game.session.phase(), Phase::Running);
        assert!(game.next_deadline().is_some());
        assert_eq!(game.handle_event(key(KeyCode::Char(' ')), t0), None);
        assert_eq!(game.session.phase(), Phase::Paused);
        assert_eq!(game.handle_event(key(KeyCode::Esc), t0), None);
        assert_eq!(game.session.phase(), Phase::Running);
        assert_eq!(game.handle_event(Event::FocusLost, t0), None);
        assert_eq!(game.session.phase(), Phase::Paused);
        assert_eq!(game.handle_event(key(KeyCode::Enter), t0), None);
        assert_eq!(game.session.phase(), Phase::Running);
        assert_eq!(
            game.handle_event(key(KeyCode::Char('q')), t0),
            Some(Action::Quit)
        );
    }

    #[test]
    fn speed_keys_only_work_when_stopped() {
        let t0 = Instant::now();
        let mut game = game(Options::default(), Rect::new(0, 0, 80, 24));
        assert_eq!(game.handle_event(key(KeyCode::Char('1')), t0), None);
        assert_eq!(game.session.speed(), Speed::Fast);
        assert_eq!(game.handle_event(key(KeyCode::Enter), t0), None);
        assert_eq!(game.handle_event(key(KeyCode::Char('3')), t0), None);
        assert_eq!(game.session.speed(), Speed::Fast);
    }

    #[test]
    fn mute_and_clear_high_score() {
        let t0 = Instant::now();
        let mut game = Game::new(
            Options::default(),
            50,
            false,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
            Rect::new(0, 0, 80, 24),
        );
        assert_eq!(
            game.handle_event(key(KeyCode::Char('m')), t0),
            Some(Action::SetMuted(true))
        );
        assert_eq!(
            game.handle_event(key(KeyCode::Char('m')), t0),
            Some(Action::SetMuted(false))
        );
        assert_eq!(game.handle_event(key(KeyCode::Enter), t0), None);
        assert_eq!(game.handle_event(key(KeyCode::Char('c')), t0), None);
        assert_eq!(game.session.high_score(), 50);
        assert_eq!(game.handle_event(key(KeyCode::Char('p')), t0), None);
        assert_eq!(game.handle_event(key(KeyCode::Esc), t0), None);
        assert_eq!(
            game.handle_event(key(KeyCode::Char('c')), t0),
            Some(Action::ClearHighScore)
        );
        assert_eq!(game.session.high_score(), 0);
    }

    #[test]
    fn resize_adopts_new_grid() {
        let t0 = Instant::now();
        let mut game = game(Options::default(), Rect::new(0, 0, 80, 24));
        assert_eq!(game.handle_event(key(KeyCode::Enter), t0), None);
        assert_eq!(game.handle_event(Event::Resize(2, 2), t0), None);
        assert_eq!(game.session.grid(), Grid::new(20, 39).unwrap());
        assert_eq!(game.handle_event(Event::Resize(40, 12), t0), None);
        let grid = Grid::new(8, 19).unwrap();
        assert_eq!(game.session.grid(), grid);
        let engine = game.session.engine().unwrap();
        assert_eq!(engine.grid(), grid);
        assert!(engine.fits(grid));
        assert_eq!(game.session.phase(), Phase::Running);
    }

    #[test]
    fn render_running_game() {
        let t0 = Instant::now();
        let area = Rect::new(0, 0, 20, 8);
        let mut game = game(Options::default(), area);
        assert_eq!(game.handle_event(key(KeyCode::Enter), t0), None);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let lines = symbols(&buffer);
        assert_eq!(lines[0], " Score: 0  Best: 0  ");
        assert_eq!(lines[1], format!("┌{}┐", "─".repeat(18)));
        assert_eq!(lines[6], format!("└{}┘", "─".repeat(18)));
        // The grid is 4x9 and the snake starts at (2, 2); each cell is two
        // columns wide and the board's inside starts at (1, 2).
        assert_eq!(symbol_at(&buffer, 5, 4), "█");
        assert_eq!(symbol_at(&buffer, 6, 4), "█");
        let food = game.session.engine().unwrap().food().unwrap();
        assert_eq!(symbol_at(&buffer, 1 + food.col * 2, 2 + food.row), "●");
        assert_eq!(symbol_at(&buffer, 2 + food.col * 2, 2 + food.row), "●");
    }

    #[test]
    fn render_idle_wrapping_game() {
        let area = Rect::new(0, 0, 80, 24);
        let options = Options {
            boundary: Boundary::Wrapping,
            ..Options::default()
        };
        let game = game(options, area);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let lines = symbols(&buffer);
        assert!(lines[0].starts_with(" Score: 0  Best: 0  Time: 00:00  Speed: Normal"));
        assert!(lines[1].starts_with("·⋯⋯"));
        assert!(lines[1].ends_with("⋯⋯·"));
        assert!(lines[2].starts_with('⋮'));
        assert!(lines.iter().any(|ln| ln.contains(" SNAKE ")));
        assert!(lines.iter().any(|ln| ln.contains("Speed: Normal ")));
        assert!(lines[23].starts_with(" Mute (m)  Clear best (c)  Quit (q)"));
    }
}
