#![allow(dead_code)]

use genesyn::error::{GeneSynError, GsResult};
use genesyn::scorer::network::{BiLstmNetwork, ModelArtifact, NetworkDims};
use genesyn::scorer::vocab::Vocabulary;
use genesyn::scorer::{LearnedScorer, Predictor};
use genesyn::sequence::CodingSequence;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn tiny_dims() -> NetworkDims {
    NetworkDims {
        sequence_length: 30,
        embedding_dim: 4,
        lstm_units: 3,
        dense_units: vec![5],
    }
}

pub fn tiny_artifact(seed: u64) -> ModelArtifact {
    ModelArtifact::initialize(Vocabulary::nucleotides(), &tiny_dims(), seed)
}

pub fn tiny_scorer(seed: u64) -> LearnedScorer {
    LearnedScorer::new(BiLstmNetwork::new(tiny_artifact(seed)).unwrap())
}

/// Scores by GC fraction, so ordering is easy to predict.
pub struct GcPredictor;

impl Predictor for GcPredictor {
    fn predict(&self, seq: &CodingSequence) -> GsResult<f64> {
        if seq.is_empty() {
            return Err(GeneSynError::EmptySequence);
        }
        let gc = seq.as_bytes().iter().filter(|&&b| b == b'G' || b == b'C').count();
        Ok(gc as f64 / seq.len() as f64)
    }
}

/// Fails every `every`-th call (1-based), counting across calls.
pub struct FlakyPredictor {
    pub every: usize,
    calls: AtomicUsize,
}

impl FlakyPredictor {
    pub fn new(every: usize) -> Self {
        Self {
            every,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Predictor for FlakyPredictor {
    fn predict(&self, seq: &CodingSequence) -> GsResult<f64> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n % self.every == 0 {
            return Err(GeneSynError::ModelUnavailable(format!("call {} failed", n)));
        }
        GcPredictor.predict(seq)
    }
}
