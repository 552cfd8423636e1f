//! Numeric rule constants and legal number ranges.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const NUM_MIN: i32 = 1;
pub const NUM_MAX: i32 = 50;
pub const HIDDEN_MIN: i32 = 1;
pub const HIDDEN_MAX: i32 = 30;

/// A guess this close to a kill trap loses the round.
pub const KILL_RADIUS: i32 = 1;
/// A guess this close to a kill trap (but outside [`KILL_RADIUS`]) skips
/// the guesser's next turn.
pub const NEAR_RADIUS: i32 = 5;

pub const CHANGE_COOLDOWN: u32 = 7;
pub const CHANGE_LIMIT: u32 = 2;

pub const INFO_CAP_BASE: usize = 7;
pub const INFO_CAP_DECLARED: usize = 10;
pub const INFO_CAP_TRAPPER_BONUS: usize = 3;
pub const INFO_CAP_DEVOTION_PENALTY: usize = 2;
pub const INFO_CAP_FLOOR: usize = 1;
pub const INFO_CAP_CEILING: usize = 13;

pub const FREE_INFO_BASE: u32 = 1;
pub const FREE_INFO_DECLARED: u32 = 2;
pub const BULK_INFO_LIMIT: usize = 3;

pub const YES_NO_BASE: u32 = 1;
pub const YES_NO_ANALYST: u32 = 3;
pub const YES_NO_ANALYST_COOLDOWN: u32 = 2;

pub const ACCUSE_PENALTY: u32 = 1;
pub const ACCUSE_PENALTY_TRICKSTER: u32 = 2;

pub const DEVOTION_COOLDOWN: u32 = 1;
pub const DEVOTION_OFFERS: usize = 3;

/// Guess cooldown staged by taking a sudden-press follow-up.
pub const SUDDEN_PRESS_PENALTY: u32 = 3;

// ---------------------------------------------------------------------------
// NumberRange
// ---------------------------------------------------------------------------

/// An inclusive integer range, optionally punctured at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: i32,
    pub max: i32,
    pub exclude_zero: bool,
}

impl NumberRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            exclude_zero: false,
        }
    }

    pub fn without_zero(mut self) -> Self {
        self.exclude_zero = true;
        self
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value) && !(self.exclude_zero && value == 0)
    }

    /// Draws a uniformly distributed member of the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        if self.exclude_zero && self.min <= 0 && self.max >= 0 {
            // Draw from one fewer value and shift the non-negative half up.
            let drawn = rng.random_range(self.min..self.max);
            if drawn >= 0 { drawn + 1 } else { drawn }
        } else {
            rng.random_range(self.min..=self.max)
        }
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_range_contains_is_inclusive() {
        let r = NumberRange::new(1, 50);
        assert!(r.contains(1));
        assert!(r.contains(50));
        assert!(!r.contains(0));
        assert!(!r.contains(51));
    }

    #[test]
    fn test_range_without_zero_rejects_zero() {
        let r = NumberRange::new(-30, 30).without_zero();
        assert!(!r.contains(0));
        assert!(r.contains(-30));
        assert!(r.contains(30));
    }

    #[test]
    fn test_sample_without_zero_never_draws_zero() {
        let r = NumberRange::new(-3, 3).without_zero();
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen_edges = (false, false);
        for _ in 0..500 {
            let v = r.sample(&mut rng);
            assert!(r.contains(v), "drew {v}");
            seen_edges.0 |= v == -3;
            seen_edges.1 |= v == 3;
        }
        assert!(seen_edges.0 && seen_edges.1, "both ends should be reachable");
    }

    #[test]
    fn test_sample_stays_in_plain_range() {
        let r = NumberRange::new(HIDDEN_MIN, HIDDEN_MAX);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            assert!(r.contains(r.sample(&mut rng)));
        }
    }
}
