use serde::{Deserialize, Serialize};

use super::WordSpec;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A catalog level: the word list and grid size a puzzle is generated from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub id: u32,
    pub title: String,
    pub grid_size: usize,
    pub difficulty: Difficulty,
    pub description: String,
    pub words: Vec<WordSpec>,
}
