use crate::reports;
use clap::Args;
use genesyn::error::GsResult;
use genesyn::scorer::learned::check_vocabulary;
use genesyn::scorer::loader::load_training_csv;
use genesyn::scorer::network::ModelArtifact;
use genesyn::scorer::vocab::Vocabulary;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct VocabArgs {
    /// Training CSV with `dna_seq` and `score` columns.
    #[arg(long)]
    pub corpus: PathBuf,

    /// Compare against the vocabulary stored in the model artifact.
    #[arg(long, default_value_t = false)]
    pub verify: bool,
}

pub fn run(args: &VocabArgs, model_path: &str) -> GsResult<()> {
    let corpus = load_training_csv(&args.corpus)?;
    let vocab = Vocabulary::fit(corpus.sequences());
    reports::print_vocabulary(&vocab);

    if args.verify {
        let artifact = ModelArtifact::load(model_path)?;
        artifact.validate()?;
        check_vocabulary(&artifact.vocabulary, &vocab)?;
        info!("✅ Model vocabulary matches {}", args.corpus.display());
    }
    Ok(())
}
