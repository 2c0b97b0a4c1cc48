use crate::models::Difficulty;

/// Time limits (seconds) for three and two stars
struct StarThresholds {
    three: u64,
    two: u64,
}

pub struct Scorer;

impl Scorer {
    /// Star rating for finishing a puzzle in `elapsed_secs`.
    ///
    /// | Difficulty | 3 stars | 2 stars |
    /// |------------|---------|---------|
    /// | Easy       | ≤ 60s   | ≤ 120s  |
    /// | Medium     | ≤ 120s  | ≤ 240s  |
    /// | Hard       | ≤ 180s  | ≤ 360s  |
    ///
    /// Anything slower still earns one star.
    pub fn stars_for(difficulty: Difficulty, elapsed_secs: u64) -> u8 {
        let thresholds = Self::thresholds(difficulty);

        if elapsed_secs <= thresholds.three {
            3
        } else if elapsed_secs <= thresholds.two {
            2
        } else {
            1
        }
    }

    fn thresholds(difficulty: Difficulty) -> StarThresholds {
        match difficulty {
            Difficulty::Easy => StarThresholds { three: 60, two: 120 },
            Difficulty::Medium => StarThresholds {
                three: 120,
                two: 240,
            },
            Difficulty::Hard => StarThresholds {
                three: 180,
                two: 360,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easy_thresholds() {
        assert_eq!(Scorer::stars_for(Difficulty::Easy, 0), 3);
        assert_eq!(Scorer::stars_for(Difficulty::Easy, 60), 3);
        assert_eq!(Scorer::stars_for(Difficulty::Easy, 61), 2);
        assert_eq!(Scorer::stars_for(Difficulty::Easy, 120), 2);
        assert_eq!(Scorer::stars_for(Difficulty::Easy, 121), 1);
    }

    #[test]
    fn test_harder_levels_allow_more_time() {
        assert_eq!(Scorer::stars_for(Difficulty::Medium, 120), 3);
        assert_eq!(Scorer::stars_for(Difficulty::Medium, 240), 2);
        assert_eq!(Scorer::stars_for(Difficulty::Hard, 180), 3);
        assert_eq!(Scorer::stars_for(Difficulty::Hard, 361), 1);
    }

    #[test]
    fn test_slow_finish_still_earns_a_star() {
        assert_eq!(Scorer::stars_for(Difficulty::Hard, 10_000), 1);
    }
}
