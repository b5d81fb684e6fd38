//! Character vocabulary for the learned scorer.
//!
//! Indices are assigned by descending character frequency over a reference
//! corpus, starting at 1. Index 0 doubles as the padding sentinel and the
//! out-of-vocabulary index. Text is lower-cased (full Unicode mapping) both
//! when fitting and when encoding; every other character, whitespace and
//! punctuation included, is a token of its own.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use strum_macros::{Display, EnumString};

pub const PAD_INDEX: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PadSide {
    Pre,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<char>", into = "Vec<char>")]
pub struct Vocabulary {
    // tokens[i] has index i + 1
    tokens: Vec<char>,
    lookup: HashMap<char, u32>,
}

impl From<Vec<char>> for Vocabulary {
    fn from(tokens: Vec<char>) -> Self {
        let lookup = tokens
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i as u32 + 1))
            .collect();
        Self { tokens, lookup }
    }
}

impl From<Vocabulary> for Vec<char> {
    fn from(v: Vocabulary) -> Self {
        v.tokens
    }
}

impl Vocabulary {
    pub fn fit<'a, I>(corpus: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut order: Vec<(char, usize)> = Vec::new();
        let mut seen: HashMap<char, usize> = HashMap::new();

        for text in corpus {
            for c in lowercase(text) {
                match seen.get(&c) {
                    Some(&slot) => order[slot].1 += 1,
                    None => {
                        seen.insert(c, order.len());
                        order.push((c, 1));
                    }
                }
            }
        }

        // Stable: ties keep first-appearance order.
        order.sort_by(|a, b| b.1.cmp(&a.1));
        Vocabulary::from(order.into_iter().map(|(c, _)| c).collect::<Vec<_>>())
    }

    /// Default for nucleotide corpora when no reference CSV is at hand.
    pub fn nucleotides() -> Self {
        Vocabulary::from(vec!['g', 'c', 'a', 't'])
    }

    /// Index of an already lower-cased character.
    fn lookup(&self, c: char) -> u32 {
        self.lookup.get(&c).copied().unwrap_or(PAD_INDEX)
    }

    /// A character whose lower-case form spans several characters has no
    /// single index and maps to `PAD_INDEX`.
    pub fn index_of(&self, c: char) -> u32 {
        let mut lower = c.to_lowercase();
        match (lower.next(), lower.next()) {
            (Some(l), None) => self.lookup(l),
            _ => PAD_INDEX,
        }
    }

    pub fn encode(&self, text: &str) -> Vec<u32> {
        lowercase(text).map(|c| self.lookup(c)).collect()
    }

    /// Number of embedding rows required, padding row included.
    pub fn input_dim(&self) -> usize {
        self.tokens.len() + 1
    }

    pub fn tokens(&self) -> &[char] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();
        for (i, c) in self.tokens.iter().enumerate() {
            hasher.update(format!("{}:{}\n", i + 1, c).as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

fn lowercase(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase)
}

/// Pads or truncates to exactly `len` indices.
pub fn pad_sequence(indices: &[u32], len: usize, padding: PadSide, truncating: PadSide) -> Vec<u32> {
    let kept = if indices.len() > len {
        match truncating {
            PadSide::Pre => &indices[indices.len() - len..],
            PadSide::Post => &indices[..len],
        }
    } else {
        indices
    };

    let fill = len - kept.len();
    let mut out = Vec::with_capacity(len);
    match padding {
        PadSide::Pre => {
            out.resize(fill, PAD_INDEX);
            out.extend_from_slice(kept);
        }
        PadSide::Post => {
            out.extend_from_slice(kept);
            out.resize(len, PAD_INDEX);
        }
    }
    out
}
