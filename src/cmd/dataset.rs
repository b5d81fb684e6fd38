use clap::Args;
use genesyn::codon::CodonTable;
use genesyn::config::Config;
use genesyn::error::GsResult;
use genesyn::generator::SequenceGenerator;
use genesyn::scorer::loader::{write_training_csv, TrainingRow};
use genesyn::scorer::RuleScorer;
use rayon::prelude::*;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short, long)]
    pub protein: Option<String>,

    #[arg(long)]
    pub protein_file: Option<PathBuf>,

    #[arg(short = 'n', long, default_value_t = 1_000)]
    pub count: usize,

    /// Destination CSV; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Synthetic variants labelled with their rule-based composite score.
pub fn run(args: &DatasetArgs, config: Config) -> GsResult<()> {
    let protein = super::read_protein(args.protein.as_deref(), args.protein_file.as_deref())?;
    let generator = SequenceGenerator::new(CodonTable::ecoli(), &config.generator)?;
    let rules = RuleScorer::new(config.rules.clone());
    let base_seed = config.ranking.seed.unwrap_or_else(|| fastrand::u64(..));

    info!(
        "🧪 Generating {} synthetic variants (seed {})",
        args.count, base_seed
    );

    let rows = (0..args.count)
        .into_par_iter()
        .map(|i| -> GsResult<TrainingRow> {
            let mut rng = fastrand::Rng::with_seed(base_seed.wrapping_add(i as u64));
            let seq = generator.generate(&protein, &mut rng)?;
            let score = rules.score(&seq, &mut rng)?;
            Ok(TrainingRow {
                dna_seq: seq.into(),
                score: score.composite,
            })
        })
        .collect::<GsResult<Vec<_>>>()?;

    match &args.output {
        Some(path) => {
            write_training_csv(File::create(path)?, &rows)?;
            info!("💾 Wrote {} rows to {}", rows.len(), path.display());
        }
        None => write_training_csv(io::stdout().lock(), &rows)?,
    }
    Ok(())
}
