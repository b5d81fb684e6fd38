use crate::config::{Config, FailurePolicy, RankingParams};
use crate::codon::CodonTable;
use crate::error::{GeneSynError, GsResult};
use crate::generator::SequenceGenerator;
use crate::optimizer::{RankedResultSet, SkippedCandidate};
use crate::scorer::{Predictor, RuleScorer, ScoreRecord};
use crate::sequence::ProteinSequence;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, TypedBuilder)]
pub struct OptimizationOptions {
    #[builder(default = 1)]
    pub min_count: usize,
    #[builder(default = 10_000)]
    pub max_count: usize,
    #[builder(default = FailurePolicy::Abort)]
    pub failure_policy: FailurePolicy,
    #[builder(default = false)]
    pub parallel: bool,
    #[builder(default, setter(strip_option))]
    pub max_time: Option<Duration>,
    #[builder(default, setter(strip_option))]
    pub seed: Option<u64>,
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl From<&RankingParams> for OptimizationOptions {
    fn from(p: &RankingParams) -> Self {
        Self {
            min_count: p.min_count,
            max_count: p.max_count,
            failure_policy: p.failure_policy,
            parallel: p.parallel,
            max_time: p.max_time.map(Duration::from_secs),
            seed: p.seed,
        }
    }
}

enum Slot {
    Done(GsResult<ScoreRecord>),
    TimedOut,
}

/// Generate -> rule score -> learned score -> rank.
pub struct Optimizer {
    generator: SequenceGenerator,
    rules: RuleScorer,
    predictor: Arc<dyn Predictor>,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(
        generator: SequenceGenerator,
        rules: RuleScorer,
        predictor: Arc<dyn Predictor>,
        options: OptimizationOptions,
    ) -> Self {
        Self {
            generator,
            rules,
            predictor,
            options,
        }
    }

    pub fn from_config(config: &Config, predictor: Arc<dyn Predictor>) -> GsResult<Self> {
        Ok(Self::new(
            SequenceGenerator::new(CodonTable::ecoli(), &config.generator)?,
            RuleScorer::new(config.rules.clone()),
            predictor,
            OptimizationOptions::from(&config.ranking),
        ))
    }

    pub fn options(&self) -> &OptimizationOptions {
        &self.options
    }

    /// Candidate `index` draws from its own source seeded with
    /// `base_seed + index`, so the outcome does not depend on scheduling.
    pub fn evaluate(
        &self,
        protein: &ProteinSequence,
        index: usize,
        base_seed: u64,
    ) -> GsResult<ScoreRecord> {
        let mut rng = fastrand::Rng::with_seed(base_seed.wrapping_add(index as u64));
        let sequence = self.generator.generate(protein, &mut rng)?;
        let rules = self.rules.score(&sequence, &mut rng)?;
        let learned = self.predictor.predict(&sequence)?;
        Ok(ScoreRecord::new(index, sequence, rules, learned))
    }

    pub fn optimize(&self, protein: &ProteinSequence, count: usize) -> GsResult<RankedResultSet> {
        let opts = &self.options;
        if protein.is_empty() {
            return Err(GeneSynError::InvalidInput(
                "protein sequence is empty".to_string(),
            ));
        }
        if count < opts.min_count || count > opts.max_count {
            return Err(GeneSynError::InvalidInput(format!(
                "count {} outside allowed range [{}, {}]",
                count, opts.min_count, opts.max_count
            )));
        }

        let base_seed = opts.seed.unwrap_or_else(|| fastrand::u64(..));
        info!(
            "🧬 Optimizing {} residues x {} candidates (seed {}, policy {}{})",
            protein.len(),
            count,
            base_seed,
            opts.failure_policy,
            if opts.parallel { ", parallel" } else { "" }
        );

        let start = Instant::now();
        let slot = |index: usize| -> Slot {
            if let Some(limit) = opts.max_time {
                if start.elapsed() >= limit {
                    return Slot::TimedOut;
                }
            }
            Slot::Done(self.evaluate(protein, index, base_seed))
        };

        let mut records = Vec::with_capacity(count);
        let mut skipped = Vec::new();
        let mut last_error = None;

        let mut harvest = |index: usize, slot: Slot| -> GsResult<()> {
            match slot {
                Slot::TimedOut => Err(GeneSynError::DeadlineExceeded {
                    completed: records.len(),
                    requested: count,
                }),
                Slot::Done(Ok(record)) => {
                    records.push(record);
                    Ok(())
                }
                Slot::Done(Err(e)) => match opts.failure_policy {
                    FailurePolicy::Abort => Err(e),
                    FailurePolicy::Skip => {
                        warn!("⚠️  Candidate #{} skipped: {}", index, e);
                        skipped.push(SkippedCandidate {
                            index,
                            reason: e.to_string(),
                        });
                        last_error = Some(e);
                        Ok(())
                    }
                },
            }
        };

        if opts.parallel {
            // Under Abort a failure short-circuits the collect, so candidates
            // not yet started are never evaluated.
            let slots: Vec<Slot> = (0..count)
                .into_par_iter()
                .map(|index| match slot(index) {
                    Slot::Done(Err(e)) if opts.failure_policy == FailurePolicy::Abort => Err(e),
                    s => Ok(s),
                })
                .collect::<GsResult<_>>()?;
            for (index, s) in slots.into_iter().enumerate() {
                harvest(index, s)?;
            }
        } else {
            for index in 0..count {
                harvest(index, slot(index))?;
            }
        }

        if records.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        debug!(
            "Scored {} candidates ({} skipped) in {:.2?}",
            records.len(),
            skipped.len(),
            start.elapsed()
        );

        RankedResultSet::rank(records, skipped)
    }
}
