use once_cell::sync::Lazy;

use crate::models::{Difficulty, LevelDefinition, WordSpec};

struct LevelSeed {
    id: u32,
    title: &'static str,
    grid_size: usize,
    difficulty: Difficulty,
    description: &'static str,
    words: &'static [(&'static str, &'static str)],
}

const LEVEL_SEEDS: &[LevelSeed] = &[
    LevelSeed {
        id: 1,
        title: "Faith Foundations",
        grid_size: 8,
        difficulty: Difficulty::Easy,
        description: "Find words about faith and trust in God",
        words: &[
            ("FAITH", "Complete trust in God"),
            ("GRACE", "God's unmerited favor"),
            ("PRAYER", "Talking to God"),
            ("LOVE", "Divine affection"),
            ("HOPE", "Confident expectation"),
        ],
    },
    LevelSeed {
        id: 2,
        title: "Divine Healing",
        grid_size: 10,
        difficulty: Difficulty::Easy,
        description: "Discover words about God's healing power",
        words: &[
            ("HEALING", "God's supernatural restoration"),
            ("MIRACLE", "Wonder-working power"),
            ("HEALTH", "Complete wellness"),
            ("JESUS", "God's delivering power"),
            ("POWER", "Divine strength"),
            ("VICTORY", "Overcoming triumph"),
        ],
    },
    LevelSeed {
        id: 3,
        title: "Holy Spirit Power",
        grid_size: 12,
        difficulty: Difficulty::Easy,
        description: "Find words about the Spirit's work",
        words: &[
            ("SPIRIT", "Third person of Trinity"),
            ("GIFTS", "Supernatural abilities"),
            ("FRUIT", "Godly character traits"),
            ("WISDOM", "Divine knowledge"),
            ("PEACE", "Inner tranquility"),
            ("JOY", "Spiritual happiness"),
            ("GOODNESS", "Moral excellence"),
        ],
    },
    LevelSeed {
        id: 4,
        title: "Prosperity Principles",
        grid_size: 14,
        difficulty: Difficulty::Easy,
        description: "Search for biblical prosperity words",
        words: &[
            ("PROSPERITY", "Biblical abundance"),
            ("BLESSING", "God's favor"),
            ("TITHING", "Giving a tenth to God"),
            ("OFFERING", "Generous giving"),
            ("WEALTH", "Material abundance"),
            ("SUCCESS", "Divine achievement"),
            ("PROVISION", "God's supply"),
            ("INCREASE", "Divine multiplication"),
        ],
    },
    LevelSeed {
        id: 5,
        title: "Christian Character",
        grid_size: 16,
        difficulty: Difficulty::Easy,
        description: "Look for godly character traits",
        words: &[
            ("CHARACTER", "Godly nature"),
            ("INTEGRITY", "Moral wholeness"),
            ("HUMILITY", "Quality of being humble"),
            ("PATIENCE", "Waiting on God's timing"),
            ("KINDNESS", "Gentle compassion"),
            ("VIRTUE", "Moral excellence"),
            ("RIGHTEOUSNESS", "Right standing with God"),
            ("HOLINESS", "Set apart for God"),
        ],
    },
    LevelSeed {
        id: 6,
        title: "Ministry & Service",
        grid_size: 18,
        difficulty: Difficulty::Medium,
        description: "Find words about serving God",
        words: &[
            ("MINISTRY", "Serving God"),
            ("EVANGELISM", "Spreading the Gospel"),
            ("DISCIPLESHIP", "Teaching God's Word"),
            ("LEADERSHIP", "Godly guidance"),
            ("FELLOWSHIP", "Christian community"),
            ("WORSHIP", "Praising God"),
            ("INTERCESSION", "Praying for others"),
            ("ANOINTING", "Divine empowerment"),
            ("CALLING", "God's purpose for life"),
        ],
    },
    LevelSeed {
        id: 7,
        title: "Truth & Light",
        grid_size: 10,
        difficulty: Difficulty::Medium,
        description: "Seek words about God's truth",
        words: &[
            ("TESTIMONY", "Personal witness"),
            ("TRUTH", "God's reality"),
            ("LIGHT", "Divine illumination"),
            ("SALVATION", "Divine rescue"),
            ("FREEDOM", "Liberation in Christ"),
            ("VICTORY", "Triumph over enemy"),
        ],
    },
    LevelSeed {
        id: 8,
        title: "Divine Communion",
        grid_size: 14,
        difficulty: Difficulty::Medium,
        description: "Find words about fellowship with God",
        words: &[
            ("COMMUNION", "Fellowship with God"),
            ("REVELATION", "Divine disclosure"),
            ("TRANSFORMATION", "Spiritual change"),
            ("RENEWAL", "Making all things new"),
            ("RESTORATION", "Bringing back to God"),
            ("REGENERATION", "New birth in Christ"),
        ],
    },
    LevelSeed {
        id: 9,
        title: "Kingdom Authority",
        grid_size: 14,
        difficulty: Difficulty::Medium,
        description: "Search for words about God's kingdom",
        words: &[
            ("MISSIONS", "Global Gospel spread"),
            ("HARVEST", "Gathering souls"),
            ("KINGDOM", "God's reign"),
            ("AUTHORITY", "Divine power"),
            ("DOMINION", "Ruling with Christ"),
            ("MANDATE", "Divine commission"),
            ("PURPOSE", "God's plan"),
        ],
    },
    LevelSeed {
        id: 10,
        title: "Supernatural Breakthrough",
        grid_size: 16,
        difficulty: Difficulty::Medium,
        description: "Find miraculous words",
        words: &[
            ("BREAKTHROUGH", "Breaking barriers"),
            ("MIRACLE", "Supernatural wonder"),
            ("SUPERNATURAL", "Beyond natural"),
            ("MANIFESTATION", "Making visible"),
            ("DEMONSTRATION", "Showing power"),
            ("EXHIBITION", "Divine display"),
            ("GLORY", "God's splendor"),
        ],
    },
    LevelSeed {
        id: 11,
        title: "Loving Compassion",
        grid_size: 10,
        difficulty: Difficulty::Hard,
        description: "Search for compassion words",
        words: &[
            ("COMPASSION", "Deep sympathy"),
            ("MERCY", "Loving kindness"),
            ("TENDERNESS", "Gentle care"),
            ("GENTLENESS", "Mild strength"),
            ("KINDNESS", "Friendly nature"),
            ("GOODNESS", "Moral excellence"),
        ],
    },
    LevelSeed {
        id: 12,
        title: "Righteous Standing",
        grid_size: 14,
        difficulty: Difficulty::Hard,
        description: "Find righteousness words",
        words: &[
            ("RIGHTEOUSNESS", "Right standing"),
            ("SANCTIFICATION", "Being set apart"),
            ("JUSTIFICATION", "Declared righteous"),
            ("REDEMPTION", "Bought back"),
            ("RECONCILIATION", "Restored relationship"),
            ("ATONEMENT", "Payment for sin"),
        ],
    },
    LevelSeed {
        id: 13,
        title: "Ultimate Glorification",
        grid_size: 20,
        difficulty: Difficulty::Hard,
        description: "Master level - find all divine words",
        words: &[
            ("TRANSFORMATION", "Complete change"),
            ("MANIFESTATION", "Divine display"),
            ("DEMONSTRATION", "Powerful showing"),
            ("ESTABLISHMENT", "Firm foundation"),
            ("MULTIPLICATION", "Divine increase"),
            ("ADMINISTRATION", "Wise management"),
            ("SUPERNATURAL", "Beyond natural"),
            ("RIGHTEOUSNESS", "Right standing"),
            ("SANCTIFICATION", "Set apart"),
            ("GLORIFICATION", "Final perfection"),
        ],
    },
];

/// The built-in level catalog, ordered by id
pub static LEVELS: Lazy<Vec<LevelDefinition>> = Lazy::new(|| {
    LEVEL_SEEDS
        .iter()
        .map(|seed| LevelDefinition {
            id: seed.id,
            title: seed.title.to_string(),
            grid_size: seed.grid_size,
            difficulty: seed.difficulty,
            description: seed.description.to_string(),
            words: seed
                .words
                .iter()
                .map(|(word, clue)| WordSpec::new(word, clue))
                .collect(),
        })
        .collect()
});

pub fn all_levels() -> &'static [LevelDefinition] {
    &LEVELS
}

pub fn get_level_by_id(id: u32) -> Option<&'static LevelDefinition> {
    LEVELS.iter().find(|level| level.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GridGenerator, DEFAULT_PLACEMENT_TRIALS};
    use crate::utils::letters::UniformLetters;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_level_ids_are_sequential() {
        for (i, level) in all_levels().iter().enumerate() {
            assert_eq!(level.id as usize, i + 1);
        }
    }

    #[test]
    fn test_get_level_by_id() {
        assert_eq!(
            get_level_by_id(1).map(|l| l.title.as_str()),
            Some("Faith Foundations")
        );
        assert!(get_level_by_id(0).is_none());
        assert!(get_level_by_id(999).is_none());
    }

    #[test]
    fn test_every_word_fits_its_grid() {
        for level in all_levels() {
            for spec in &level.words {
                assert!(
                    spec.len() <= level.grid_size,
                    "level {}: {} does not fit a {}x{} grid",
                    level.id,
                    spec.word,
                    level.grid_size,
                    level.grid_size
                );
            }
        }
    }

    #[test]
    fn test_every_level_generates_a_playable_grid() {
        let mut rng = StdRng::seed_from_u64(99);

        for level in all_levels() {
            let puzzle = GridGenerator::generate_with(
                level.grid_size,
                &level.words,
                DEFAULT_PLACEMENT_TRIALS,
                &UniformLetters,
                &mut rng,
            );

            assert_eq!(puzzle.grid.len(), level.grid_size);
            assert!(!puzzle.placed_words.is_empty(), "level {}", level.id);
            assert_eq!(
                puzzle.placed_words.len() + puzzle.dropped.len(),
                level.words.len()
            );
        }
    }
}
