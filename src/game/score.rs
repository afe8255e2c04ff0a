/// Points for the current session and the best ever seen
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct ScoreTracker {
    score: u32,
    high_score: u32,
}

impl ScoreTracker {
    pub(crate) fn new(high_score: u32) -> ScoreTracker {
        ScoreTracker {
            score: 0,
            high_score,
        }
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Add `points` to the score.  Returns `true` if the score is now above
    /// the previous high score, in which case the high score has been raised
    /// to match and should be saved.
    pub(crate) fn add(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        self.commit()
    }

    /// Raise the high score to the current score if it has fallen behind,
    /// as it can after [`ScoreTracker::clear_high_score()`].  Returns `true`
    /// if it was raised.
    pub(crate) fn commit(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Zero the score for a new session.  The high score is kept.
    pub(crate) fn reset(&mut self) {
        self.score = 0;
    }

    pub(crate) fn clear_high_score(&mut self) {
        self.high_score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_reported_each_time_it_rises() {
        let mut tracker = ScoreTracker::new(20);
        assert!(!tracker.add(10));
        assert!(!tracker.add(10));
        assert_eq!(tracker.high_score(), 20);
        assert!(tracker.add(10));
        assert_eq!(tracker.high_score(), 30);
        assert!(tracker.add(10));
        assert_eq!(tracker.high_score(), 40);
    }

    #[test]
    fn reset_keeps_high_score() {
        let mut tracker = ScoreTracker::new(0);
        assert!(tracker.add(10));
        tracker.reset();
        assert_eq!(tracker.score(), 0);
        assert_eq!(tracker.high_score(), 10);
        assert!(!tracker.add(10));
        assert!(tracker.add(10));
    }

    #[test]
    fn clear_high_score() {
        let mut tracker = ScoreTracker::new(50);
        assert!(!tracker.add(10));
        tracker.clear_high_score();
        assert_eq!(tracker.high_score(), 0);
        assert_eq!(tracker.score(), 10);
        assert!(tracker.add(10));
        assert_eq!(tracker.high_score(), 20);
    }

    #[test]
    fn commit_after_clearing() {
        let mut tracker = ScoreTracker::new(0);
        assert!(tracker.add(10));
        assert!(!tracker.commit());
        tracker.clear_high_score();
        assert!(tracker.commit());
        assert_eq!(tracker.high_score(), 10);
        assert!(!tracker.commit());
    }
}
