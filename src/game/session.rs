use super::clock::Clock;
use super::direction::Direction;
use super::engine::{Engine, Rules, TickOutcome};
use super::grid::Grid;
use super::schedule::{Alarm, Timers};
use super::score::ScoreTracker;
use crate::consts;
use crate::options::Speed;
use rand::Rng;
use std::time::Instant;

/// Where a session stands.  Only [`Phase::Running`] has its timers armed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// Nothing has been played yet
    Idle,
    Running,
    Paused,
    /// The snake hit a wall or itself
    GameOver,
    /// The snake filled the whole board
    Cleared,
}

/// Something that happened during play which the outside world may want to
/// hear about
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Notice {
    Moved,
    Ate,
    /// The high score was beaten and now has the given value
    NewHighScore(u32),
    GameOver,
    Cleared,
}

/// The game as a whole: which operations are currently legal, the engine
/// for the session in progress, the score, the clock, and the timers that
/// drive them.
#[derive(Clone, Debug)]
pub(crate) struct Session<R> {
    rng: R,
    rules: Rules,
    speed: Speed,
    grid: Grid,
    phase: Phase,
    /// `None` until the first session starts
    engine: Option<Engine>,
    score: ScoreTracker,
    clock: Clock,
    timers: Timers,
}

impl<R: Rng> Session<R> {
    pub(crate) fn new(grid: Grid, rules: Rules, speed: Speed, high_score: u32, rng: R) -> Self {
        Session {
            rng,
            rules,
            speed,
            grid,
            phase: Phase::Idle,
            engine: None,
            score: ScoreTracker::new(high_score),
            clock: Clock::default(),
            timers: Timers::default(),
        }
    }

    /// Begin the first session.  Does nothing unless idle; use
    /// [`Session::restart()`] after that.
    pub(crate) fn start(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.begin(now);
        true
    }

    /// Throw away the current session and begin a fresh one.  Does nothing
    /// if no session has been started yet.
    pub(crate) fn restart(&mut self, now: Instant) -> bool {
        if self.phase == Phase::Idle {
            return false;
        }
        self.begin(now);
        true
    }

    fn begin(&mut self, now: Instant) {
        self.score.reset();
        self.clock.reset();
        self.engine = Some(Engine::new(self.grid, self.rules, &mut self.rng));
        self.timers.arm(self.speed.interval(), now);
        self.phase = Phase::Running;
        tracing::debug!(grid = %self.grid, speed = %self.speed, "Session started");
    }

    pub(crate) fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.timers.cancel();
        self.phase = Phase::Paused;
        tracing::debug!("Session paused");
        true
    }

    pub(crate) fn resume(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.timers.arm(self.speed.interval(), now);
        self.phase = Phase::Running;
        tracing::debug!("Session resumed");
        true
    }

    pub(crate) fn toggle_pause(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(now),
            _ => false,
        }
    }

    /// Change the speed of the snake.  Refused while the snake is moving.
    /// A change made while paused restarts the session at the new speed;
    /// otherwise it applies from the next start.
    pub(crate) fn set_speed(&mut self, speed: Speed, now: Instant) -> bool {
        if self.phase == Phase::Running || speed == self.speed {
            return false;
        }
        self.speed = speed;
        tracing::debug!(%speed, "Speed changed");
        if self.phase == Phase::Paused {
            self.begin(now);
        }
        true
    }

    /// Ask the snake to turn on its next move.  Honored while running or
    /// paused; a turn made while paused is taken once play resumes.
    pub(crate) fn set_direction(&mut self, direction: Direction) -> bool {
        if !matches!(self.phase, Phase::Running | Phase::Paused) {
            return false;
        }
        self.engine
            .as_mut()
            .is_some_and(|engine| engine.set_direction(direction))
    }

    pub(crate) fn clear_high_score(&mut self) {
        self.score.clear_high_score();
    }

    /// Switch to a new grid after the board has been resized.  A session in
    /// progress carries on if the snake and food still fit; otherwise it is
    /// restarted on the new grid.  Returns `true` if a restart happened.
    pub(crate) fn resize(&mut self, grid: Grid, now: Instant) -> bool {
        if grid == self.grid {
            return false;
        }
        tracing::debug!(old = %self.grid, new = %grid, "Board resized");
        self.grid = grid;
        if !matches!(self.phase, Phase::Running | Phase::Paused) {
            return false;
        }
        if let Some(engine) = self.engine.as_mut().filter(|engine| engine.fits(grid)) {
            engine.regrid(grid);
            return false;
        }
        tracing::info!("Snake no longer fits on resized board; restarting");
        self.begin(now);
        true
    }

    /// Fire whichever timers are due at `now`
    pub(crate) fn run_due(&mut self, now: Instant) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Some(alarm) = self.timers.poll(now) {
            match alarm {
                Alarm::Clock => self.tick_clock(),
                Alarm::Movement => notices.extend(self.advance()),
            }
        }
        notices
    }

    /// Move the snake one cell and deal with the result
    pub(crate) fn advance(&mut self) -> Vec<Notice> {
        if self.phase != Phase::Running {
            return Vec::new();
        }
        let Some(engine) = self.engine.as_mut() else {
            return Vec::new();
        };
        let outcome = engine.tick(&mut self.rng);
        tracing::trace!(
            ?outcome,
            head = %engine.snake().head(),
            direction = %engine.direction(),
            "Tick"
        );
        let mut notices = Vec::new();
        match outcome {
            TickOutcome::Continue => notices.push(Notice::Moved),
            TickOutcome::Ate | TickOutcome::Filled => {
                notices.extend([Notice::Moved, Notice::Ate]);
                if self.score.add(consts::FOOD_POINTS) {
                    notices.push(Notice::NewHighScore(self.score.high_score()));
                }
                if outcome == TickOutcome::Filled {
                    notices.extend(self.on_filled());
                    notices.push(Notice::Cleared);
                }
            }
            TickOutcome::Collided => {
                notices.extend(self.on_collision());
                notices.push(Notice::GameOver);
            }
        }
        notices
    }

    pub(crate) fn tick_clock(&mut self) {
        if self.phase == Phase::Running {
            self.clock.tick();
        }
    }

    /// End the session after a collision.  Returns a `NewHighScore` notice
    /// if the final score had to be committed as the high score.
    fn on_collision(&mut self) -> Option<Notice> {
        self.timers.cancel();
        self.phase = Phase::GameOver;
        tracing::debug!(score = self.score.score(), elapsed = self.clock.elapsed(), "Game over");
        self.commit_high_score()
    }

    fn on_filled(&mut self) -> Option<Notice> {
        self.timers.cancel();
        self.phase = Phase::Cleared;
        tracing::info!(score = self.score.score(), elapsed = self.clock.elapsed(), "Board cleared");
        self.commit_high_score()
    }

    fn commit_high_score(&mut self) -> Option<Notice> {
        if self.score.commit() {
            Some(Notice::NewHighScore(self.score.high_score()))
        } else {
            None
        }
    }
}

impl<R> Session<R> {
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn rules(&self) -> Rules {
        self.rules
    }

    pub(crate) fn speed(&self) -> Speed {
        self.speed
    }

    pub(crate) fn score(&self) -> u32 {
        self.score.score()
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.score.high_score()
    }

    pub(crate) fn clock(&self) -> Clock {
        self.clock
    }

    /// When the event loop next needs to call [`Session::run_due()`]
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }
}
