use crate::feedback::{Cue, Feedback};
use crate::game::{Action, Game, Notice};
use crate::prefs::PrefsStore;
use crossterm::event::{poll, read};
use rand::{rngs::StdRng, Rng};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

/// The event loop, plus the collaborators that hear about what happens in
/// the game
#[derive(Debug)]
pub(crate) struct App<F, R = StdRng> {
    game: Game<R>,
    prefs: PrefsStore,
    feedback: F,
    /// Whether the snake was moving as of the last `Started`/`Stopped` cue
    moving: bool,
    quitting: bool,
}

impl<F: Feedback, R: Rng> App<F, R> {
    pub(crate) fn new(game: Game<R>, prefs: PrefsStore, feedback: F) -> Self {
        App {
            game,
            prefs,
            feedback,
            moving: false,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            terminal.draw(|frame| self.game.draw(frame))?;
            self.process_input()?;
        }
        Ok(())
    }

    /// Wait for either an input event or the next timer deadline, whichever
    /// comes first, then deal with both
    fn process_input(&mut self) -> io::Result<()> {
        let ready = match self.game.next_deadline() {
            Some(deadline) => {
                let wait = deadline.saturating_duration_since(Instant::now());
                !wait.is_zero() && poll(wait)?
            }
            None => true,
        };
        if ready {
            if let Some(action) = self.game.handle_event(read()?, Instant::now()) {
                self.perform(action);
            }
        }
        for notice in self.game.run_due(Instant::now()) {
            self.notify(notice);
        }
        self.track_motion();
        Ok(())
    }

    /// Cue the start or stop of movement whenever the game enters or leaves
    /// the running state
    fn track_motion(&mut self) {
        let running = self.game.is_running();
        if running == self.moving {
            return;
        }
        self.moving = running;
        self.play(if running { Cue::Started } else { Cue::Stopped });
    }

    fn play(&mut self, cue: Cue) {
        if let Err(e) = self.feedback.cue(cue) {
            tracing::warn!(error = ?e, ?cue, "Failed to play feedback cue");
        }
    }

    fn perform(&mut self, action: Action) {
        match action {
            Action::Quit => self.quitting = true,
            Action::SetMuted(muted) => {
                tracing::debug!(muted, "Toggled mute");
                self.feedback.set_muted(muted);
                if let Err(e) = self.prefs.save_muted(muted) {
                    tracing::error!(error = ?e, "Failed to save mute setting");
                }
            }
            Action::ClearHighScore => {
                tracing::info!("Clearing high score");
                if let Err(e) = self.prefs.clear_high_score() {
                    tracing::error!(error = ?e, "Failed to clear saved high score");
                }
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        if let Notice::NewHighScore(score) = notice {
            tracing::debug!(score, "New high score");
            if let Err(e) = self.prefs.save_high_score(score) {
                tracing::error!(error = ?e, "Failed to save high score");
            }
        }
        if let Some(cue) = Cue::for_notice(notice) {
            self.play(cue);
        }
    }
}
