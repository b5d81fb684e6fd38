use crate::error::{GeneSynError, GsResult};
use crate::scorer::network::BiLstmNetwork;
use crate::scorer::vocab::Vocabulary;
use crate::scorer::Predictor;
use crate::sequence::CodingSequence;
use std::path::Path;
use tracing::{info, warn};

/// Pre-trained regression model behind the `Predictor` seam.
#[derive(Debug, Clone)]
pub struct LearnedScorer {
    network: BiLstmNetwork,
}

impl LearnedScorer {
    pub fn new(network: BiLstmNetwork) -> Self {
        Self { network }
    }

    /// Loads the artifact. When `reference` is given (typically a vocabulary
    /// refitted from the training CSV) it must equal the artifact's own.
    pub fn load<P: AsRef<Path>>(path: P, reference: Option<&Vocabulary>) -> GsResult<Self> {
        let network = BiLstmNetwork::load(path)?;
        if let Some(reference) = reference {
            check_vocabulary(network.vocabulary(), reference)?;
            info!("✅ Vocabulary matches reference corpus ({})", &reference.checksum()[..12]);
        }
        Ok(Self { network })
    }

    pub fn network(&self) -> &BiLstmNetwork {
        &self.network
    }
}

pub fn check_vocabulary(model: &Vocabulary, reference: &Vocabulary) -> GsResult<()> {
    let expected = model.checksum();
    let found = reference.checksum();
    if expected != found {
        warn!(
            "Vocabulary drift: model {:?} vs reference {:?}",
            model.tokens(),
            reference.tokens()
        );
        return Err(GeneSynError::VocabularyMismatch { expected, found });
    }
    Ok(())
}

impl Predictor for LearnedScorer {
    fn predict(&self, seq: &CodingSequence) -> GsResult<f64> {
        if seq.is_empty() {
            return Err(GeneSynError::EmptySequence);
        }
        let encoded = self.network.encode(seq.as_str());
        let value = self.network.infer(&encoded) as f64;
        if !value.is_finite() {
            return Err(GeneSynError::InvalidModelOutput(value));
        }
        Ok(value)
    }
}
