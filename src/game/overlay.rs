use super::session::Phase;
use crate::consts;
use crate::options::Speed;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A pop-up drawn over the board whenever the snake isn't moving
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Overlay {
    Start { speed: Speed },
    Paused,
    GameOver { score: u32, high_score: u32 },
    Cleared { score: u32 },
}

impl Overlay {
    /// The width that should be used for the `Rect` passed to
    /// `Overlay::render()`
    pub(super) const WIDTH: u16 = 28;

    pub(super) fn for_phase(
        phase: Phase,
        speed: Speed,
        score: u32,
        high_score: u32,
    ) -> Option<Overlay> {
        match phase {
            Phase::Idle => Some(Overlay::Start { speed }),
            Phase::Running => None,
            Phase::Paused => Some(Overlay::Paused),
            Phase::GameOver => Some(Overlay::GameOver { score, high_score }),
            Phase::Cleared => Some(Overlay::Cleared { score }),
        }
    }

    /// The size of the `Rect` that should be passed to `Overlay::render()`
    pub(super) fn size(&self) -> Size {
        let lines = u16::try_from(self.lines().len()).unwrap_or(u16::MAX);
        Size {
            width: Self::WIDTH,
            height: lines.saturating_add(2),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Overlay::Start { .. } => " SNAKE ",
            Overlay::Paused => " PAUSED ",
            Overlay::GameOver { .. } => " GAME OVER ",
            Overlay::Cleared { .. } => " BOARD CLEARED ",
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        match *self {
            Overlay::Start { speed } => vec![
                Line::from(format!("Speed: {speed}")),
                Line::default(),
                key_line("Start", "Enter"),
                key_line("Change speed", "1/2/3"),
                key_line("Quit", "q"),
            ],
            Overlay::Paused => vec![
                key_line("Resume", "Space"),
                key_line("Restart", "r"),
                key_line("Change speed", "1/2/3"),
                key_line("Quit", "q"),
            ],
            Overlay::GameOver { score, high_score } => vec![
                Line::from(format!("Score: {score}")),
                Line::from(format!("Best:  {high_score}")),
                Line::default(),
                key_line("Play again", "Enter"),
                key_line("Quit", "q"),
            ],
            Overlay::Cleared { score } => vec![
                Line::from(format!("Score: {score}")),
                Line::default(),
                key_line("Play again", "Enter"),
                key_line("Quit", "q"),
            ],
        }
    }
}

fn key_line(label: &'static str, key: &'static str) -> Line<'static> {
    Line::from_iter([
        Span::raw(label),
        Span::raw(" ("),
        Span::styled(key, consts::KEY_STYLE),
        Span::raw(")"),
    ])
}

impl Widget for Overlay {
    /*
     * ┌───────── PAUSED ─────────┐
     * │ Resume (Space)           │
     * │ Restart (r)              │
     * │ Change speed (1/2/3)     │
     * │ Quit (q)                 │
     * └──────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(self.title())
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        for (line, row) in self.lines().into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

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

    #[test]
    fn paused() {
        let overlay = Overlay::Paused;
        let size = overlay.size();
        assert_eq!(size, Size::new(28, 6));
        let area = Rect::new(0, 0, size.width, size.height);
        let mut buffer = Buffer::empty(area);
        overlay.render(area, &mut buffer);
        assert_eq!(
            symbols(&buffer),
            [
                format!("┌{0} PAUSED {0}┐", "─".repeat(9)),
                format!("│ {:<24} │", "Resume (Space)"),
                format!("│ {:<24} │", "Restart (r)"),
                format!("│ {:<24} │", "Change speed (1/2/3)"),
                format!("│ {:<24} │", "Quit (q)"),
                format!("└{}┘", "─".repeat(26)),
            ]
        );
    }

    #[test]
    fn game_over_shows_scores() {
        let overlay = Overlay::GameOver {
            score: 40,
            high_score: 90,
        };
        let size = overlay.size();
        let area = Rect::new(0, 0, size.width, size.height);
        let mut buffer = Buffer::empty(area);
        overlay.render(area, &mut buffer);
        let lines = symbols(&buffer);
        assert_eq!(lines[1], format!("│ {:<24} │", "Score: 40"));
        assert_eq!(lines[2], format!("│ {:<24} │", "Best:  90"));
    }

    #[test]
    fn overlay_per_phase() {
        assert_eq!(
            Overlay::for_phase(Phase::Idle, Speed::Fast, 0, 0),
            Some(Overlay::Start { speed: Speed::Fast })
        );
        assert_eq!(Overlay::for_phase(Phase::Running, Speed::Fast, 0, 0), None);
        assert_eq!(
            Overlay::for_phase(Phase::Cleared, Speed::Fast, 30, 30),
            Some(Overlay::Cleared { score: 30 })
        );
    }
}
