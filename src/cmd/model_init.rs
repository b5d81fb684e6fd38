use clap::Args;
use genesyn::error::{GeneSynError, GsResult};
use genesyn::scorer::loader::load_training_csv;
use genesyn::scorer::network::{ModelArtifact, NetworkDims, DEFAULT_SEQUENCE_LENGTH};
use genesyn::scorer::vocab::Vocabulary;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ModelInitArgs {
    /// Fit the vocabulary from this CSV instead of the ACGT default.
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Destination; defaults to the global --model path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_SEQUENCE_LENGTH)]
    pub sequence_length: usize,
    #[arg(long, default_value_t = 16)]
    pub embedding_dim: usize,
    #[arg(long, default_value_t = 64)]
    pub lstm_units: usize,
    #[arg(long, default_value = "32")]
    pub dense_units: String,

    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl ModelInitArgs {
    pub fn dims(&self) -> GsResult<NetworkDims> {
        let dense_units = self
            .dense_units
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<usize>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or_else(|| {
                        GeneSynError::InvalidInput(format!("invalid dense width '{}'", s))
                    })
            })
            .collect::<GsResult<Vec<_>>>()?;

        if self.sequence_length == 0 || self.embedding_dim == 0 || self.lstm_units == 0 {
            return Err(GeneSynError::InvalidInput(
                "network dimensions must be positive".to_string(),
            ));
        }

        Ok(NetworkDims {
            sequence_length: self.sequence_length,
            embedding_dim: self.embedding_dim,
            lstm_units: self.lstm_units,
            dense_units,
        })
    }
}

pub fn run(args: &ModelInitArgs, model_path: &str) -> GsResult<()> {
    let vocab = match &args.corpus {
        Some(path) => Vocabulary::fit(load_training_csv(path)?.sequences()),
        None => Vocabulary::nucleotides(),
    };
    let dims = args.dims()?;
    let artifact = ModelArtifact::initialize(vocab, &dims, args.seed);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(model_path));
    artifact.save(&output)?;

    warn!("⚠️  Weights are untrained; scores only exercise the pipeline.");
    info!(
        "💾 Model artifact written to {} (vocab checksum {})",
        output.display(),
        artifact.vocabulary_checksum
    );
    Ok(())
}
