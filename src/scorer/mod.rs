pub mod learned;
pub mod loader;
pub mod network;
pub mod rules;
pub mod types;
pub mod vocab;

pub use self::learned::LearnedScorer;
pub use self::rules::RuleScorer;
pub use self::types::{RuleScore, ScoreRecord};

use crate::error::GsResult;
use crate::sequence::CodingSequence;

/// Learned score for one coding sequence. Implementations must be pure
/// functions of the sequence so that re-scoring is reproducible.
pub trait Predictor: Send + Sync {
    fn predict(&self, seq: &CodingSequence) -> GsResult<f64>;
}
