use crate::sequence::CodingSequence;
use serde::{Deserialize, Serialize};

/// Rule-based heuristics for one coding sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleScore {
    pub cai: f64,
    pub gc_percent: f64,
    pub penalty: u32,
    pub composite: f64,
}

/// Everything measured about one candidate. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// 0-based generation order, used as the final tie-breaker.
    pub index: usize,
    pub sequence: CodingSequence,
    pub cai: f64,
    pub gc_percent: f64,
    pub penalty: u32,
    pub rule_score: f64,
    pub learned_score: f64,
}

impl ScoreRecord {
    pub fn new(
        index: usize,
        sequence: CodingSequence,
        rules: RuleScore,
        learned_score: f64,
    ) -> Self {
        Self {
            index,
            sequence,
            cai: rules.cai,
            gc_percent: rules.gc_percent,
            penalty: rules.penalty,
            rule_score: rules.composite,
            learned_score,
        }
    }
}
