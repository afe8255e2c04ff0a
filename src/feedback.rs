use crate::game::Notice;
use std::io::{self, Write};

/// Audible feedback for things that happen during play
pub(crate) trait Feedback {
    fn cue(&mut self, cue: Cue) -> io::Result<()>;

    fn set_muted(&mut self, muted: bool);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Cue {
    /// The snake has started moving, on start, restart or resume
    Started,
    /// The snake has stopped moving, on pause or at the end of a session
    Stopped,
    Food,
    GameOver,
}

impl Cue {
    /// The cue, if any, that goes with a notice from the session
    pub(crate) fn for_notice(notice: Notice) -> Option<Cue> {
        match notice {
            Notice::Ate => Some(Cue::Food),
            Notice::GameOver | Notice::Cleared => Some(Cue::GameOver),
            Notice::Moved | Notice::NewHighScore(_) => None,
        }
    }
}

/// Rings the terminal bell on food and game over.  A bell can't be held for
/// as long as the snake moves, so `Started` and `Stopped` are silent.
#[derive(Debug)]
pub(crate) struct Bell<W> {
    out: W,
    muted: bool,
}

impl<W: Write> Bell<W> {
    pub(crate) fn new(out: W, muted: bool) -> Self {
        Bell { out, muted }
    }
}

impl<W: Write> Feedback for Bell<W> {
    fn cue(&mut self, cue: Cue) -> io::Result<()> {
        if self.muted || matches!(cue, Cue::Started | Cue::Stopped) {
            return Ok(());
        }
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}
