use std::fmt;

/// Whole seconds of play in the current session
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Clock {
    elapsed: u32,
}

impl Clock {
    pub(crate) fn elapsed(self) -> u32 {
        self.elapsed
    }

    pub(crate) fn tick(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    pub(crate) fn reset(&mut self) {
        self.elapsed = 0;
    }
}

/// Formats as `MM:SS`.  Minutes keep counting past 99.
impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.elapsed / 60;
        let seconds = self.elapsed % 60;
        f.pad(&format!("{minutes:02}:{seconds:02}"))
    }
}
