//! Frozen sequence-regression model: embedding -> bidirectional LSTM ->
//! dense stack -> scalar.
//!
//! Weights come from an external trainer and are stored as one JSON
//! artifact together with the vocabulary they were trained against.
//! Matrices are row-major with shape `[inputs, outputs]`; LSTM gates are
//! packed in `i, f, c, o` order.

use crate::error::{GeneSynError, GsResult};
use crate::scorer::vocab::{pad_sequence, PadSide, Vocabulary};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumString};
use tracing::{debug, info};

pub const ARTIFACT_FORMAT_VERSION: u32 = 1;
pub const DEFAULT_SEQUENCE_LENGTH: usize = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f32>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    fn row(&self, r: usize) -> &[f32] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// out += x * self
    fn accumulate(&self, x: &[f32], out: &mut [f32]) {
        for (r, &xv) in x.iter().enumerate() {
            if xv == 0.0 {
                continue;
            }
            for (o, &w) in out.iter_mut().zip(self.row(r)) {
                *o += xv * w;
            }
        }
    }

    fn check(&self, rows: usize, cols: usize, name: &str) -> GsResult<()> {
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            GeneSynError::ModelUnavailable(format!("{} shape {}x{} overflows", name, rows, cols))
        })?;
        if self.rows != rows || self.cols != cols || self.data.len() != expected {
            return Err(GeneSynError::ModelUnavailable(format!(
                "{} has shape {}x{} ({} values), expected {}x{}",
                name,
                self.rows,
                self.cols,
                self.data.len(),
                rows,
                cols
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LstmWeights {
    pub units: usize,
    pub kernel: Matrix,
    pub recurrent: Matrix,
    pub bias: Vec<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Linear,
    Relu,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub kernel: Matrix,
    pub bias: Vec<f32>,
    pub activation: Activation,
}

/// Layer sizes used when initializing a fresh artifact.
#[derive(Debug, Clone)]
pub struct NetworkDims {
    pub sequence_length: usize,
    pub embedding_dim: usize,
    pub lstm_units: usize,
    pub dense_units: Vec<usize>,
}

impl Default for NetworkDims {
    fn default() -> Self {
        Self {
            sequence_length: DEFAULT_SEQUENCE_LENGTH,
            embedding_dim: 16,
            lstm_units: 64,
            dense_units: vec![32],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub sequence_length: usize,
    pub padding: PadSide,
    pub truncating: PadSide,
    pub vocabulary: Vocabulary,
    pub vocabulary_checksum: String,
    pub embedding: Matrix,
    pub forward: LstmWeights,
    pub backward: LstmWeights,
    pub dense: Vec<DenseLayer>,
}

impl ModelArtifact {
    pub fn load<P: AsRef<Path>>(path: P) -> GsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GeneSynError::ModelUnavailable(format!("cannot read '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            GeneSynError::ModelUnavailable(format!("cannot parse '{}': {}", path.display(), e))
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> GsResult<()> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Untrained weights (Glorot-uniform kernels, forget-gate bias of 1).
    /// Deterministic for a given seed.
    pub fn initialize(vocabulary: Vocabulary, dims: &NetworkDims, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let units = dims.lstm_units;

        let mut glorot = |rows: usize, cols: usize| {
            let limit = (6.0 / (rows + cols) as f32).sqrt();
            Matrix {
                rows,
                cols,
                data: (0..rows * cols)
                    .map(|_| (rng.f32() * 2.0 - 1.0) * limit)
                    .collect(),
            }
        };

        let embedding = glorot(vocabulary.input_dim(), dims.embedding_dim);

        let lstm = |glorot: &mut dyn FnMut(usize, usize) -> Matrix| {
            let mut bias = vec![0.0; 4 * units];
            bias[units..2 * units].fill(1.0);
            LstmWeights {
                units,
                kernel: glorot(dims.embedding_dim, 4 * units),
                recurrent: glorot(units, 4 * units),
                bias,
            }
        };
        let forward = lstm(&mut glorot);
        let backward = lstm(&mut glorot);

        let mut dense = Vec::with_capacity(dims.dense_units.len() + 1);
        let mut fan_in = 2 * units;
        for &width in &dims.dense_units {
            dense.push(DenseLayer {
                kernel: glorot(fan_in, width),
                bias: vec![0.0; width],
                activation: Activation::Relu,
            });
            fan_in = width;
        }
        dense.push(DenseLayer {
            kernel: glorot(fan_in, 1),
            bias: vec![0.0],
            activation: Activation::Linear,
        });

        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            sequence_length: dims.sequence_length,
            padding: PadSide::Pre,
            truncating: PadSide::Pre,
            vocabulary_checksum: vocabulary.checksum(),
            vocabulary,
            embedding,
            forward,
            backward,
            dense,
        }
    }

    /// Shape and vocabulary consistency. The stored checksum must describe
    /// the stored vocabulary.
    pub fn validate(&self) -> GsResult<()> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(GeneSynError::ModelUnavailable(format!(
                "unsupported artifact format {}",
                self.format_version
            )));
        }
        if self.sequence_length == 0 {
            return Err(GeneSynError::ModelUnavailable(
                "sequence length must be positive".to_string(),
            ));
        }

        let found = self.vocabulary.checksum();
        if found != self.vocabulary_checksum {
            return Err(GeneSynError::VocabularyMismatch {
                expected: self.vocabulary_checksum.clone(),
                found,
            });
        }

        let embed_dim = self.embedding.cols;
        self.embedding
            .check(self.vocabulary.input_dim(), embed_dim, "embedding")?;

        for (name, w) in [("forward", &self.forward), ("backward", &self.backward)] {
            let u = w.units;
            let gates = u.checked_mul(4).filter(|_| u > 0).ok_or_else(|| {
                GeneSynError::ModelUnavailable(format!("{} LSTM has {} units", name, u))
            })?;
            w.kernel.check(embed_dim, gates, name)?;
            w.recurrent.check(u, gates, name)?;
            if w.bias.len() != gates {
                return Err(GeneSynError::ModelUnavailable(format!(
                    "{} LSTM bias has {} values, expected {}",
                    name,
                    w.bias.len(),
                    gates
                )));
            }
        }

        // Both unit counts were checked against real allocations above.
        let mut fan_in = self.forward.units + self.backward.units;
        for (i, layer) in self.dense.iter().enumerate() {
            let width = layer.kernel.cols;
            layer.kernel.check(fan_in, width, &format!("dense[{}]", i))?;
            if layer.bias.len() != width {
                return Err(GeneSynError::ModelUnavailable(format!(
                    "dense[{}] bias has {} values, expected {}",
                    i,
                    layer.bias.len(),
                    width
                )));
            }
            fan_in = width;
        }
        if self.dense.is_empty() || fan_in != 1 {
            return Err(GeneSynError::ModelUnavailable(
                "dense stack must end in a single output".to_string(),
            ));
        }
        Ok(())
    }
}

/// A validated artifact ready for inference. Immutable, so it can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct BiLstmNetwork {
    artifact: ModelArtifact,
}

impl BiLstmNetwork {
    pub fn new(artifact: ModelArtifact) -> GsResult<Self> {
        artifact.validate()?;
        debug!(
            "Network: vocab={} embed={} lstm={}+{} dense={} len={}",
            artifact.vocabulary.len(),
            artifact.embedding.cols,
            artifact.forward.units,
            artifact.backward.units,
            artifact.dense.len(),
            artifact.sequence_length
        );
        Ok(Self { artifact })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> GsResult<Self> {
        let path = path.as_ref();
        info!("🧠 Loading model artifact: {}", path.display());
        Self::new(ModelArtifact::load(path)?)
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.artifact.vocabulary
    }

    /// Text -> fixed-length index sequence.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        let a = &self.artifact;
        pad_sequence(
            &a.vocabulary.encode(text),
            a.sequence_length,
            a.padding,
            a.truncating,
        )
    }

    // Out-of-range indices fall back to the padding row.
    fn embedding_row(&self, idx: u32) -> &[f32] {
        let embedding = &self.artifact.embedding;
        let r = idx as usize;
        embedding.row(if r < embedding.rows { r } else { 0 })
    }

    pub fn infer(&self, indices: &[u32]) -> f32 {
        let a = &self.artifact;
        let fw = lstm_final_state(&a.forward, indices.iter().map(|&i| self.embedding_row(i)));
        let bw = lstm_final_state(
            &a.backward,
            indices.iter().rev().map(|&i| self.embedding_row(i)),
        );

        let mut x: Vec<f32> = fw.into_iter().chain(bw).collect();
        for layer in &a.dense {
            let mut out = layer.bias.clone();
            layer.kernel.accumulate(&x, &mut out);
            if layer.activation == Activation::Relu {
                out.iter_mut().for_each(|v| *v = v.max(0.0));
            }
            x = out;
        }
        x[0]
    }
}

#[inline(always)]
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn lstm_final_state<'a, I>(w: &LstmWeights, inputs: I) -> Vec<f32>
where
    I: Iterator<Item = &'a [f32]>,
{
    let u = w.units;
    let mut h = vec![0.0f32; u];
    let mut c = vec![0.0f32; u];
    let mut z = vec![0.0f32; 4 * u];

    for x in inputs {
        z.copy_from_slice(&w.bias);
        w.kernel.accumulate(x, &mut z);
        w.recurrent.accumulate(&h, &mut z);

        for k in 0..u {
            let i = sigmoid(z[k]);
            let f = sigmoid(z[u + k]);
            let g = z[2 * u + k].tanh();
            let o = sigmoid(z[3 * u + k]);
            c[k] = f * c[k] + i * g;
            h[k] = o * c[k].tanh();
        }
    }
    h
}
