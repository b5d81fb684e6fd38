use crate::config::{RepeatCounting, RuleWeights};
use crate::error::{GeneSynError, GsResult};
use crate::scorer::types::RuleScore;
use crate::sequence::CodingSequence;

/// 100 * (G + C) / length.
pub fn gc_percent(seq: &[u8]) -> GsResult<f64> {
    if seq.is_empty() {
        return Err(GeneSynError::EmptySequence);
    }
    let gc = seq.iter().filter(|&&b| b == b'G' || b == b'C').count();
    Ok(100.0 * gc as f64 / seq.len() as f64)
}

pub fn count_motif(seq: &[u8], motif: &[u8], mode: RepeatCounting) -> u32 {
    if motif.is_empty() || motif.len() > seq.len() {
        return 0;
    }

    let mut count = 0;
    let mut i = 0;
    while i + motif.len() <= seq.len() {
        if &seq[i..i + motif.len()] == motif {
            count += 1;
            i += match mode {
                RepeatCounting::NonOverlapping => motif.len(),
                RepeatCounting::Overlapping => 1,
            };
        } else {
            i += 1;
        }
    }
    count
}

pub fn repeat_penalty(seq: &[u8], motifs: &[String], mode: RepeatCounting) -> u32 {
    motifs
        .iter()
        .map(|m| count_motif(seq, m.as_bytes(), mode))
        .sum()
}

/// Heuristic scorer. GC and penalty are pure; the CAI value is a uniform
/// placeholder drawn from the caller's random source.
#[derive(Debug, Clone)]
pub struct RuleScorer {
    weights: RuleWeights,
    motifs: Vec<String>,
}

impl Default for RuleScorer {
    fn default() -> Self {
        Self::new(RuleWeights::default())
    }
}

impl RuleScorer {
    pub fn new(weights: RuleWeights) -> Self {
        let motifs = weights.repeat_motifs();
        Self { weights, motifs }
    }

    pub fn weights(&self) -> &RuleWeights {
        &self.weights
    }

    pub fn composite(&self, cai: f64, gc_percent: f64, penalty: u32) -> f64 {
        let w = &self.weights;
        w.weight_cai * cai
            - w.weight_gc * (gc_percent - w.gc_target).abs()
            - w.weight_penalty * penalty as f64
    }

    /// Draws the CAI stand-in from [cai_min, cai_max].
    pub fn draw_cai(&self, rng: &mut fastrand::Rng) -> f64 {
        let w = &self.weights;
        w.cai_min + rng.f64() * (w.cai_max - w.cai_min)
    }

    /// Scores with a known CAI value.
    pub fn evaluate(&self, seq: &CodingSequence, cai: f64) -> GsResult<RuleScore> {
        let bytes = seq.as_bytes();
        let gc = gc_percent(bytes)?;
        let penalty = repeat_penalty(bytes, &self.motifs, self.weights.repeat_counting);
        Ok(RuleScore {
            cai,
            gc_percent: gc,
            penalty,
            composite: self.composite(cai, gc, penalty),
        })
    }

    pub fn score(&self, seq: &CodingSequence, rng: &mut fastrand::Rng) -> GsResult<RuleScore> {
        if seq.is_empty() {
            return Err(GeneSynError::EmptySequence);
        }
        let cai = self.draw_cai(rng);
        self.evaluate(seq, cai)
    }
}
