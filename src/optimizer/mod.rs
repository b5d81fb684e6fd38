pub mod runner;

pub use self::runner::{OptimizationOptions, Optimizer};

use crate::error::{GeneSynError, GsResult};
use crate::scorer::ScoreRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub rank: usize,
    #[serde(flatten)]
    pub record: ScoreRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub index: usize,
    pub reason: String,
}

/// Learned score descending, then rule score descending, then generation order.
pub fn compare_records(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    b.learned_score
        .total_cmp(&a.learned_score)
        .then_with(|| b.rule_score.total_cmp(&a.rule_score))
        .then_with(|| a.index.cmp(&b.index))
}

/// Candidates of one optimization run, ranked 1..=n. Never empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawResultSet")]
pub struct RankedResultSet {
    candidates: Vec<RankedCandidate>,
    skipped: Vec<SkippedCandidate>,
}

// Stored ranks are ignored on read; the set is ranked again.
#[derive(Deserialize)]
struct RawResultSet {
    candidates: Vec<RankedCandidate>,
    #[serde(default)]
    skipped: Vec<SkippedCandidate>,
}

impl TryFrom<RawResultSet> for RankedResultSet {
    type Error = GeneSynError;

    fn try_from(raw: RawResultSet) -> GsResult<Self> {
        let records = raw.candidates.into_iter().map(|c| c.record).collect();
        Self::rank(records, raw.skipped)
    }
}

impl RankedResultSet {
    pub fn rank(mut records: Vec<ScoreRecord>, skipped: Vec<SkippedCandidate>) -> GsResult<Self> {
        if records.is_empty() {
            return Err(GeneSynError::InvalidInput(
                "no candidates to rank".to_string(),
            ));
        }
        records.sort_by(compare_records);

        let candidates = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| RankedCandidate { rank: i + 1, record })
            .collect();

        Ok(Self {
            candidates,
            skipped,
        })
    }

    /// The recommended candidate (rank 1).
    pub fn best(&self) -> &RankedCandidate {
        &self.candidates[0]
    }

    pub fn candidates(&self) -> &[RankedCandidate] {
        &self.candidates
    }

    pub fn skipped(&self) -> &[SkippedCandidate] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
