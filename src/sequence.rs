use crate::error::{GeneSynError, GsResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Amino-acid one-letter codes, upper-cased, whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProteinSequence(String);

impl ProteinSequence {
    /// Accepts a raw paste. A leading FASTA header line is dropped and all
    /// ASCII whitespace (line breaks included) is removed.
    pub fn parse(raw: &str) -> GsResult<Self> {
        let body = match raw.trim_start().strip_prefix('>') {
            Some(rest) => rest.split_once('\n').map(|(_, b)| b).unwrap_or(""),
            None => raw,
        };

        let residues: String = body
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if residues.is_empty() {
            return Err(GeneSynError::InvalidInput(
                "protein sequence is empty".to_string(),
            ));
        }
        Ok(Self(residues))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn residues(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProteinSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Nucleotides over {A, C, G, T}. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodingSequence(String);

impl CodingSequence {
    /// Validates the alphabet. The empty sequence is allowed so that
    /// scorers can report it themselves.
    pub fn new(seq: impl Into<String>) -> GsResult<Self> {
        let seq = seq.into().to_ascii_uppercase();
        if let Some((pos, bad)) = seq
            .char_indices()
            .find(|(_, c)| !matches!(c, 'A' | 'C' | 'G' | 'T'))
        {
            return Err(GeneSynError::InvalidInput(format!(
                "'{}' at position {} is not a nucleotide",
                bad, pos
            )));
        }
        Ok(Self(seq))
    }

    pub(crate) fn from_codons_unchecked(seq: String) -> Self {
        Self(seq)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn codons(&self) -> impl Iterator<Item = &str> + '_ {
        self.0
            .as_bytes()
            .chunks(3)
            .filter_map(|c| std::str::from_utf8(c).ok())
    }
}

impl TryFrom<String> for CodingSequence {
    type Error = GeneSynError;

    fn try_from(value: String) -> GsResult<Self> {
        Self::new(value)
    }
}

impl From<CodingSequence> for String {
    fn from(value: CodingSequence) -> Self {
        value.0
    }
}

impl fmt::Display for CodingSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
