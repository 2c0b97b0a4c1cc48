pub mod level;
pub mod progress;
pub mod puzzle;

pub use level::{Difficulty, LevelDefinition};
pub use progress::{LevelProgressRow, LevelScore, Progress, FIRST_LEVEL_ID};
pub use puzzle::{Cell, Direction, Grid, PlacedWord, WordSpec};
