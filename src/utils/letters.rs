use once_cell::sync::Lazy;
use rand::{Rng, RngCore};
use serde::Deserialize;

pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Letter frequency distribution for English (approximate)
pub static LETTER_DISTRIBUTION: Lazy<Vec<(char, f32)>> = Lazy::new(|| {
    vec![
        ('E', 12.70),
        ('T', 9.05),
        ('A', 8.16),
        ('O', 7.50),
        ('I', 6.96),
        ('N', 6.74),
        ('S', 6.32),
        ('H', 6.09),
        ('R', 5.98),
        ('D', 4.25),
        ('L', 4.02),
        ('C', 2.78),
        ('U', 2.75),
        ('M', 2.40),
        ('W', 2.36),
        ('F', 2.22),
        ('G', 2.01),
        ('Y', 1.97),
        ('P', 1.92),
        ('B', 1.49),
        ('V', 0.97),
        ('K', 0.77),
        ('J', 0.15),
        ('X', 0.15),
        ('Q', 0.09),
        ('Z', 0.07),
    ]
});

/// Calculate the cumulative distribution for weighted random selection
pub fn get_cumulative_distribution() -> Vec<(char, f32)> {
    let mut cumulative = 0.0;
    LETTER_DISTRIBUTION
        .iter()
        .map(|(ch, freq)| {
            cumulative += freq;
            (*ch, cumulative)
        })
        .collect()
}

/// Supplies the filler letters for cells no word landed on
pub trait RandomLetterSource {
    fn next_letter(&self, rng: &mut dyn RngCore) -> char;
}

/// Every letter A-Z equally likely
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformLetters;

impl RandomLetterSource for UniformLetters {
    fn next_letter(&self, rng: &mut dyn RngCore) -> char {
        ALPHABET[rng.random_range(0..ALPHABET.len())] as char
    }
}

/// Letters weighted by English frequency, so filler blends in with real words
#[derive(Debug, Clone)]
pub struct FrequencyLetters {
    cumulative: Vec<(char, f32)>,
    total: f32,
}

impl FrequencyLetters {
    pub fn new() -> Self {
        let cumulative = get_cumulative_distribution();
        let total = cumulative.last().map_or(0.0, |(_, c)| *c);
        Self { cumulative, total }
    }
}

impl Default for FrequencyLetters {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomLetterSource for FrequencyLetters {
    fn next_letter(&self, rng: &mut dyn RngCore) -> char {
        let random_value = rng.random::<f32>() * self.total;

        for (letter, cumulative) in &self.cumulative {
            if random_value <= *cumulative {
                return *letter;
            }
        }

        'E' // Fallback
    }
}

/// Which letter source fills the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    #[default]
    Uniform,
    Frequency,
}

impl FillMode {
    pub fn letter_source(self) -> Box<dyn RandomLetterSource + Send + Sync> {
        match self {
            FillMode::Uniform => Box::new(UniformLetters),
            FillMode::Frequency => Box::new(FrequencyLetters::new()),
        }
    }
}

impl std::str::FromStr for FillMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(FillMode::Uniform),
            "frequency" => Ok(FillMode::Frequency),
            other => Err(format!("unknown fill mode '{}'", other)),
        }
    }
}
