use crate::codon::parse_codon;
use crate::error::{GeneSynError, GsResult};
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumString};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub generator: GeneratorParams,
    #[command(flatten)]
    #[serde(default)]
    pub rules: RuleWeights,
    #[command(flatten)]
    #[serde(default)]
    pub ranking: RankingParams,
}

/// How repeat motifs are counted inside a coding sequence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum RepeatCounting {
    /// Left-to-right scan that resumes after each match ("AAAAA" has one "AAAA").
    NonOverlapping,
    /// Every start offset counts ("AAAAA" has two "AAAA").
    Overlapping,
}

/// What the pipeline does when a single candidate fails.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    Abort,
    Skip,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    /// Fail on residues without a codon instead of substituting the fallback.
    #[arg(long, default_value_t = false)]
    pub strict: bool,
    #[arg(long, default_value = "ATG")]
    pub fallback_codon: String,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            strict: false,
            fallback_codon: "ATG".to_string(),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleWeights {
    // composite = cai*w_cai - |gc - target|*w_gc - penalty*w_penalty
    #[arg(long, default_value_t = 1.0)]
    pub weight_cai: f64,
    #[arg(long, default_value_t = 0.1)]
    pub weight_gc: f64,
    #[arg(long, default_value_t = 50.0)]
    pub gc_target: f64,
    #[arg(long, default_value_t = 0.5)]
    pub weight_penalty: f64,

    // Placeholder CAI draw bounds
    #[arg(long, default_value_t = 0.6)]
    pub cai_min: f64,
    #[arg(long, default_value_t = 1.0)]
    pub cai_max: f64,

    #[arg(long, default_value = "AAAA,TTTT")]
    pub repeat_motifs: String,
    #[arg(long, value_enum, default_value_t = RepeatCounting::NonOverlapping)]
    pub repeat_counting: RepeatCounting,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            weight_cai: 1.0,
            weight_gc: 0.1,
            gc_target: 50.0,
            weight_penalty: 0.5,
            cai_min: 0.6,
            cai_max: 1.0,
            repeat_motifs: "AAAA,TTTT".to_string(),
            repeat_counting: RepeatCounting::NonOverlapping,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingParams {
    #[arg(long, default_value_t = 1)]
    pub min_count: usize,
    #[arg(long, default_value_t = 10_000)]
    pub max_count: usize,
    #[arg(long, value_enum, default_value_t = FailurePolicy::Abort)]
    pub failure_policy: FailurePolicy,
    #[arg(long, default_value_t = false)]
    pub parallel: bool,
    /// Deadline for the whole batch, in seconds.
    #[arg(long)]
    pub max_time: Option<u64>,
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

impl Default for RankingParams {
    fn default() -> Self {
        Self {
            min_count: 1,
            max_count: 10_000,
            failure_policy: FailurePolicy::Abort,
            parallel: false,
            max_time: None,
            seed: None,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GsResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrites file values with flags the user actually typed.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(generator.strict);
        update_if_present!(generator.fallback_codon);

        update_if_present!(rules.weight_cai);
        update_if_present!(rules.weight_gc);
        update_if_present!(rules.gc_target);
        update_if_present!(rules.weight_penalty);
        update_if_present!(rules.cai_min);
        update_if_present!(rules.cai_max);
        update_if_present!(rules.repeat_motifs);
        update_if_present!(rules.repeat_counting);

        update_if_present!(ranking.min_count);
        update_if_present!(ranking.max_count);
        update_if_present!(ranking.failure_policy);
        update_if_present!(ranking.parallel);
        update_if_present!(ranking.max_time);
        update_if_present!(ranking.seed);
    }

    pub fn validate(&self) -> GsResult<()> {
        parse_codon(&self.generator.fallback_codon)?;

        let r = &self.rules;
        if !(r.cai_min.is_finite() && r.cai_max.is_finite()) || r.cai_min > r.cai_max {
            return Err(GeneSynError::InvalidInput(format!(
                "CAI range [{}, {}] is empty",
                r.cai_min, r.cai_max
            )));
        }
        if r.repeat_motifs().is_empty() {
            return Err(GeneSynError::InvalidInput(
                "at least one repeat motif is required".to_string(),
            ));
        }

        let k = &self.ranking;
        if k.min_count == 0 || k.min_count > k.max_count {
            return Err(GeneSynError::InvalidInput(format!(
                "count bounds [{}, {}] are invalid",
                k.min_count, k.max_count
            )));
        }
        Ok(())
    }
}

impl RuleWeights {
    pub fn repeat_motifs(&self) -> Vec<String> {
        self.repeat_motifs
            .split(',')
            .map(|s| s.trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
