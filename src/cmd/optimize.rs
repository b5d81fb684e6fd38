use crate::reports;
use clap::{Args, ValueEnum};
use genesyn::config::Config;
use genesyn::export;
use genesyn::error::GsResult;
use genesyn::optimizer::Optimizer;
use genesyn::scorer::loader::load_training_csv;
use genesyn::scorer::vocab::Vocabulary;
use genesyn::scorer::LearnedScorer;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub config: Config,

    /// Protein as one-letter codes (a pasted FASTA body is fine).
    #[arg(short, long)]
    pub protein: Option<String>,

    #[arg(long)]
    pub protein_file: Option<PathBuf>,

    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,

    /// Training CSV to refit the vocabulary from and check against the model.
    #[arg(long)]
    pub reference_csv: Option<PathBuf>,

    /// Write the best candidate as FASTA.
    #[arg(long)]
    pub fasta: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn run(args: &OptimizeArgs, config: Config, model_path: &str) -> GsResult<()> {
    let protein = super::read_protein(args.protein.as_deref(), args.protein_file.as_deref())?;

    let reference = match &args.reference_csv {
        Some(path) => {
            let corpus = load_training_csv(path)?;
            Some(Vocabulary::fit(corpus.sequences()))
        }
        None => None,
    };

    let scorer = LearnedScorer::load(model_path, reference.as_ref())?;
    let optimizer = Optimizer::from_config(&config, Arc::new(scorer))?;
    let results = optimizer.optimize(&protein, args.count)?;

    info!(
        "✅ Optimization completed: {} ranked, {} skipped",
        results.len(),
        results.skipped().len()
    );

    match args.format {
        OutputFormat::Table => {
            reports::print_ranked_table(&results);
            reports::print_best(&results);
        }
        OutputFormat::Json => println!("{}", reports::render_json(&results)?),
        OutputFormat::Csv => reports::write_csv(&results, io::stdout().lock())?,
    }

    if let Some(path) = &args.fasta {
        export::write_best_fasta(&results, path)?;
    }
    Ok(())
}
