use serde::{Deserialize, Serialize};
use strum::Display;

use crate::constants::game::{BRONZE_SCORE, GOLD_SCORE, PLATINUM_SCORE, SILVER_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Serialize, Deserialize)]
pub enum Medal {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Medal {
    pub fn for_score(score: u32) -> Option<Medal> {
        match score {
            s if s >= PLATINUM_SCORE => Some(Medal::Platinum),
            s if s >= GOLD_SCORE => Some(Medal::Gold),
            s if s >= SILVER_SCORE => Some(Medal::Silver),
            s if s >= BRONZE_SCORE => Some(Medal::Bronze),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Score {
    current: u32,
    best: u32,
    new_best: bool,
}

impl Score {
    pub fn new(best: u32) -> Self {
        Score { current: 0, best, new_best: false }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn is_new_best(&self) -> bool {
        self.new_best
    }

    pub fn medal(&self) -> Option<Medal> {
        Medal::for_score(self.current)
    }

    /// Starts a new run; the best score survives.
    pub fn reset(&mut self) {
        self.current = 0;
        self.new_best = false;
    }

    /// Counts one cleared pipe and returns the new best when it moved.
    pub fn add_point(&mut self) -> Option<u32> {
        self.current += 1;
        if self.current > self.best {
            self.best = self.current;
            self.new_best = true;
            Some(self.best)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_best_only_after_crossing() {
        let mut score = Score::new(2);
        assert_eq!(score.add_point(), None);
        assert_eq!(score.add_point(), None);
        assert!(!score.is_new_best());
        assert_eq!(score.add_point(), Some(3));
        assert!(score.is_new_best());
        assert_eq!(score.add_point(), Some(4));
        assert!(score.is_new_best());
    }

    #[test]
    fn test_reset_keeps_best() {
        let mut score = Score::new(0);
        score.add_point();
        score.add_point();
        score.reset();
        assert_eq!(score.current(), 0);
        assert_eq!(score.best(), 2);
        assert!(!score.is_new_best());
        score.add_point();
        assert_eq!(score.best(), 2);
        assert!(!score.is_new_best());
    }

    #[test]
    fn test_medal_tiers() {
        assert_eq!(Medal::for_score(9), None);
        assert_eq!(Medal::for_score(10), Some(Medal::Bronze));
        assert_eq!(Medal::for_score(19), Some(Medal::Bronze));
        assert_eq!(Medal::for_score(20), Some(Medal::Silver));
        assert_eq!(Medal::for_score(30), Some(Medal::Gold));
        assert_eq!(Medal::for_score(40), Some(Medal::Platinum));
        assert_eq!(Medal::for_score(400), Some(Medal::Platinum));
    }
}
