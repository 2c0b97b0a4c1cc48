// Word search engine: generation, selection and matching

pub mod grid;
pub mod matcher;
pub mod placer;
pub mod scorer;
pub mod session;
pub mod tracer;

pub use grid::{GeneratedPuzzle, GridGenerator, DEFAULT_PLACEMENT_TRIALS};
pub use matcher::WordMatcher;
pub use placer::GridPlacer;
pub use scorer::Scorer;
pub use session::{Hint, PuzzleSession, PuzzleStatus, SelectionOutcome};
pub use tracer::SelectionTracer;
