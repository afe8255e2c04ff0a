use std::time::{Duration, Instant};

/// A repeating deadline.  Dropping the handle cancels it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Repeating {
    period: Duration,
    next: Instant,
}

impl Repeating {
    /// Create a handle that first fires one `period` after `now`
    pub(crate) fn start(period: Duration, now: Instant) -> Repeating {
        Repeating {
            period,
            next: now + period,
        }
    }

    pub(crate) fn deadline(&self) -> Instant {
        self.next
    }

    /// Returns `true` if the deadline has passed, and moves the deadline one
    /// period on.  If that still leaves it in the past, the schedule is
    /// re-based on `now` instead of letting missed firings pile up.
    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}

/// Which of the two timers fired
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Alarm {
    Movement,
    Clock,
}

/// The movement timer and the one-second clock timer.  They are armed and
/// cancelled together.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Timers(Option<(Repeating, Repeating)>);

impl Timers {
    pub(crate) const CLOCK_PERIOD: Duration = Duration::from_secs(1);

    pub(crate) fn arm(&mut self, movement_period: Duration, now: Instant) {
        self.0 = Some((
            Repeating::start(movement_period, now),
            Repeating::start(Self::CLOCK_PERIOD, now),
        ));
    }

    pub(crate) fn cancel(&mut self) {
        self.0 = None;
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self) -> bool {
        self.0.is_some()
    }

    /// The earliest instant at which either timer is due
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.0
            .map(|(movement, clock)| movement.deadline().min(clock.deadline()))
    }

    /// Return the next timer due at `now`, rescheduling it.  Call repeatedly
    /// until it returns `None`.
    pub(crate) fn poll(&mut self, now: Instant) -> Option<Alarm> {
        let (movement, clock) = self.0.as_mut()?;
        // The clock goes first when both are due so that a collision on this
        // tick does not swallow the second that has already elapsed.
        if clock.poll(now) {
            Some(Alarm::Clock)
        } else if movement.poll(now) {
            Some(Alarm::Movement)
        } else {
            None
        }
    }
}
